//! Dialogue plugin - wires the text printer into the Bevy schedule.
//!
//! Each frame runs, in order: portrait registration, the dialogue script,
//! the printer tick, portrait updates, typing sounds and the dialogue box UI.

use bevy::prelude::*;

use crate::events::{DialogueFinishedEvent, PrintSucceededEvent};
use crate::plugins::dialogue_ui::{draw_dialogue_box, DialogueUiPlugin};
use crate::plugins::input::InputPlugin;
use crate::plugins::portraits::{apply_portraits, register_portraits, PortraitPlugin};
use crate::plugins::typing_sound::{play_typing_sounds, TypingSoundPlugin};
use crate::resources::character_roster::CharacterRoster;
use crate::resources::dialogue_runner::DialogueRunner;
use crate::resources::printer_settings::PrinterSettings;
use crate::resources::text_printer::TextPrinter;
use crate::systems::{run_dialogue_script, tick_text_printer};

#[derive(Default)]
pub struct DialoguePlugin {
    pub settings: PrinterSettings,
}

impl Plugin for DialoguePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(TextPrinter::new(self.settings.clone()))
            .init_resource::<CharacterRoster>()
            .init_resource::<DialogueRunner>()
            .add_event::<PrintSucceededEvent>()
            .add_event::<DialogueFinishedEvent>()
            .add_plugins((InputPlugin, PortraitPlugin, TypingSoundPlugin, DialogueUiPlugin))
            .add_systems(
                Update,
                (
                    register_portraits,
                    run_dialogue_script,
                    tick_text_printer,
                    apply_portraits,
                    play_typing_sounds,
                    draw_dialogue_box,
                )
                    .chain(),
            );
    }
}
