use bevy::prelude::*;

use crate::sinks::TextDisplay;

/// Text shown in the dialogue box, and how much of it is revealed.
#[derive(Resource, Debug, Default)]
pub struct DialogueBox {
    text: String,
    max_visible: usize,
    char_count: usize,
}

impl DialogueBox {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn max_visible_characters(&self) -> usize {
        self.max_visible
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the currently visible portion of the text.
    pub fn visible_text(&self) -> &str {
        // Cut on a char boundary so multi-byte characters stay whole.
        self.text
            .char_indices()
            .nth(self.max_visible)
            .map(|(i, _)| &self.text[..i])
            .unwrap_or(&self.text)
    }
}

impl TextDisplay for DialogueBox {
    fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_string();
            self.char_count = self.text.chars().count();
        }
    }

    fn set_max_visible_characters(&mut self, count: usize) {
        self.max_visible = count;
    }

    fn character_count(&self) -> usize {
        self.char_count
    }
}
