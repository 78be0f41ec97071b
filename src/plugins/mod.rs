pub mod dialogue;
pub mod dialogue_ui;
pub mod input;
pub mod portraits;
pub mod typing_sound;
