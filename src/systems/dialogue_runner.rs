use bevy::prelude::*;

use crate::events::DialogueFinishedEvent;
use crate::resources::character_roster::CharacterRoster;
use crate::resources::dialogue_box::DialogueBox;
use crate::resources::dialogue_runner::DialogueRunner;
use crate::resources::portrait_registry::PortraitRegistry;
use crate::resources::text_printer::TextPrinter;

/// Feeds the loaded dialogue script to the printer.
pub fn run_dialogue_script(
    mut runner: ResMut<DialogueRunner>,
    mut printer: ResMut<TextPrinter>,
    roster: Res<CharacterRoster>,
    mut dialogue_box: ResMut<DialogueBox>,
    mut portraits: ResMut<PortraitRegistry>,
    mut finished: EventWriter<DialogueFinishedEvent>,
) {
    if !runner.is_running() {
        return;
    }

    if runner.step(&mut printer, &roster, &mut *dialogue_box, &mut *portraits) {
        finished.send(DialogueFinishedEvent);
    }
}
