use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::resources::dialogue_box::DialogueBox;

pub struct DialogueUiPlugin;

impl Plugin for DialogueUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogueBox>();
    }
}

/// Draws the revealed part of the dialogue box along the bottom of the window.
pub fn draw_dialogue_box(mut contexts: EguiContexts, dialogue_box: Res<DialogueBox>) {
    if dialogue_box.is_empty() {
        return;
    }

    egui::TopBottomPanel::bottom("dialogue_box")
        .min_height(120.0)
        .frame(
            egui::Frame::none()
                .fill(egui::Color32::from_rgba_unmultiplied(20, 16, 12, 230))
                .inner_margin(egui::Margin::symmetric(24.0, 16.0)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.label(
                egui::RichText::new(dialogue_box.visible_text())
                    .size(18.0)
                    .color(egui::Color32::WHITE),
            );
        });
}
