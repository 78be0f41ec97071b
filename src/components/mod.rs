pub mod character;
pub mod participant;
pub mod portrait;
pub mod print_session;

pub use character::*;
pub use participant::*;
pub use portrait::*;
pub use print_session::*;
