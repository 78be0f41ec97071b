pub mod character_roster;
pub mod cli;
pub mod dialogue_box;
pub mod dialogue_runner;
pub mod portrait_registry;
pub mod printer_settings;
pub mod text_printer;

pub use character_roster::*;
pub use cli::*;
pub use dialogue_box::*;
pub use dialogue_runner::*;
pub use portrait_registry::*;
pub use printer_settings::*;
pub use text_printer::*;
