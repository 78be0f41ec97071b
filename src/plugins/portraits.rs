//! Portrait plugin - keeps `AnimatedPortrait` UI nodes in sync with the printer.
//!
//! New portraits register with `PortraitRegistry` and despawned ones
//! deregister. After the printer ticks, `apply_portraits` copies each slot's
//! texture and shadow onto its entity.

use bevy::prelude::*;

use crate::components::portrait::{AnimatedPortrait, PortraitShadow};
use crate::resources::portrait_registry::PortraitRegistry;

pub struct PortraitPlugin;

impl Plugin for PortraitPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PortraitRegistry>();
    }
}

/// Registers new portraits and forgets removed ones.
pub fn register_portraits(
    mut registry: ResMut<PortraitRegistry>,
    added: Query<(Entity, &AnimatedPortrait, Option<&Children>), Added<AnimatedPortrait>>,
    shadows: Query<(), With<PortraitShadow>>,
    mut removed: RemovedComponents<AnimatedPortrait>,
) {
    for entity in removed.read() {
        registry.deregister(entity);
    }

    for (entity, portrait, children) in &added {
        let has_shadow = children.is_some_and(|children| children.iter().any(|child| shadows.contains(*child)));
        registry.register(entity, portrait.participant, has_shadow);
    }
}

/// Copies registry state onto the portrait nodes.
pub fn apply_portraits(
    registry: Res<PortraitRegistry>,
    asset_server: Res<AssetServer>,
    mut portraits: Query<(&mut AnimatedPortrait, &mut ImageNode, Option<&Children>)>,
    mut shadows: Query<(&PortraitShadow, &mut BackgroundColor)>,
) {
    if !registry.is_changed() {
        return;
    }

    for (entity, slot) in registry.iter() {
        let Ok((mut portrait, mut image, children)) = portraits.get_mut(*entity) else {
            continue;
        };

        if let Some(texture) = slot.texture.as_deref() {
            if portrait.show(texture) {
                trace!("Portrait {:?} now shows '{}'", entity, texture);
                image.image = asset_server.load(texture.to_string());
            }
        }

        let (Some(shade), Some(children)) = (slot.shadow_alpha, children) else {
            continue;
        };
        for child in children.iter() {
            if let Ok((shadow, mut color)) = shadows.get_mut(*child) {
                color.0 = shadow.color(shade);
            }
        }
    }
}
