pub mod components;
pub mod events;
pub mod plugins;
pub mod resources;
pub mod sinks;
pub mod systems;
pub mod utils;
