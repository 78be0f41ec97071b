use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::components::print_session::SessionStatus;
use crate::events::PrintSucceededEvent;
use crate::plugins::input::DialogueAction;
use crate::plugins::typing_sound::TypingSoundQueue;
use crate::resources::dialogue_box::DialogueBox;
use crate::resources::portrait_registry::PortraitRegistry;
use crate::resources::text_printer::TextPrinter;

/// Advances the print in flight by one frame.
pub fn tick_text_printer(
    time: Res<Time>,
    action_query: Query<&ActionState<DialogueAction>>,
    mut printer: ResMut<TextPrinter>,
    mut dialogue_box: ResMut<DialogueBox>,
    mut portraits: ResMut<PortraitRegistry>,
    mut sound: ResMut<TypingSoundQueue>,
    mut succeeded: EventWriter<PrintSucceededEvent>,
) {
    if !printer.is_printing() {
        return;
    }

    let confirm = action_query
        .iter()
        .any(|action_state| action_state.just_pressed(&DialogueAction::Confirm));

    let status = printer.tick(
        time.delta_secs(),
        confirm,
        &mut *dialogue_box,
        &mut *portraits,
        &mut *sound,
    );

    if status == SessionStatus::Succeeded {
        let speaker = printer.session().speaker();
        debug!("Print succeeded (speaker {:?})", speaker);
        succeeded.send(PrintSucceededEvent { speaker });
    }
}
