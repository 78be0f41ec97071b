pub mod dialogue_runner;
pub mod printer;

pub use dialogue_runner::*;
pub use printer::*;
