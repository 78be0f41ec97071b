use bevy::prelude::*;

/// Event emitted on the frame a print completes.
#[derive(Event, Debug)]
pub struct PrintSucceededEvent {
    /// Participant index of the speaker, if the line had one.
    pub speaker: Option<usize>,
}

/// Event emitted once when the running dialogue script runs out of tasks.
#[derive(Event, Debug)]
pub struct DialogueFinishedEvent;
