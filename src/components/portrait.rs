use bevy::prelude::*;

/// A UI image node that shows one dialogue participant.
///
/// Needs an `ImageNode` on the same entity. A child with `PortraitShadow`
/// shades the portrait while its participant is not speaking.
#[derive(Component, Debug, Clone, Default)]
pub struct AnimatedPortrait {
    /// Index into the printer's participants.
    pub participant: usize,
    /// Asset path currently loaded into the image.
    shown: Option<String>,
}

impl AnimatedPortrait {
    pub fn new(participant: usize) -> Self {
        Self {
            participant,
            shown: None,
        }
    }

    pub fn shown(&self) -> Option<&str> {
        self.shown.as_deref()
    }

    /// Records `texture` as shown. Returns false if it already was.
    pub fn show(&mut self, texture: &str) -> bool {
        if self.shown.as_deref() == Some(texture) {
            return false;
        }
        self.shown = Some(texture.to_string());
        true
    }
}

/// Shadow overlay drawn on top of a portrait.
#[derive(Component, Debug, Clone, Copy)]
pub struct PortraitShadow {
    /// Overlay opacity while fully shaded.
    pub max_alpha: f32,
}

impl Default for PortraitShadow {
    fn default() -> Self {
        Self { max_alpha: 0.6 }
    }
}

impl PortraitShadow {
    pub fn color(&self, shade: f32) -> Color {
        Color::srgba(0.0, 0.0, 0.0, self.max_alpha * shade.clamp(0.0, 1.0))
    }
}
