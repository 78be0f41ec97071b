//! Output surfaces driven by the text printer.
//!
//! The printer never talks to Bevy directly; it writes through these traits.
//! The crate's plugins provide resource-backed implementations.

use crate::components::participant::Participant;

/// A text widget that shows a prefix of its current text.
pub trait TextDisplay {
    fn set_text(&mut self, text: &str);
    fn set_max_visible_characters(&mut self, count: usize);
    /// Number of characters in the most recently assigned text, counted in
    /// `char`s like the printer's reveal cursor.
    fn character_count(&self) -> usize;
}

/// Receives the participant list and the current speaker after each update.
pub trait PortraitSink {
    fn update_portraits(&mut self, participants: &[Participant], speaker: Option<usize>);
}

/// Plays the typing sound.
pub trait TypingSound {
    fn play(&mut self, pitch: f32);
}

#[cfg(test)]
pub(crate) mod recording {
    //! Sink doubles that record what the printer sent them.

    use super::*;

    #[derive(Debug, Default)]
    pub struct RecordingDisplay {
        pub text: String,
        pub max_visible: usize,
        pub updates: usize,
    }

    impl TextDisplay for RecordingDisplay {
        fn set_text(&mut self, text: &str) {
            self.text = text.to_string();
        }

        fn set_max_visible_characters(&mut self, count: usize) {
            self.max_visible = count;
            self.updates += 1;
        }

        fn character_count(&self) -> usize {
            self.text.chars().count()
        }
    }

    #[derive(Debug, Default)]
    pub struct RecordingPortraits {
        pub speakers: Vec<Option<usize>>,
        pub emotions: Vec<Vec<String>>,
    }

    impl PortraitSink for RecordingPortraits {
        fn update_portraits(&mut self, participants: &[Participant], speaker: Option<usize>) {
            self.speakers.push(speaker);
            self.emotions
                .push(participants.iter().map(|p| p.emotion().to_string()).collect());
        }
    }

    #[derive(Debug, Default)]
    pub struct RecordingSound {
        pub pitches: Vec<f32>,
    }

    impl TypingSound for RecordingSound {
        fn play(&mut self, pitch: f32) {
            self.pitches.push(pitch);
        }
    }
}
