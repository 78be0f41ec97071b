//! Registry of on-screen portraits.
//!
//! Each portrait entity registers the participant slot it shows. When the
//! printer reports a speaker, the registry picks the speaker's emotion
//! portrait and shades every other portrait. The portrait plugin copies the
//! result onto the entities.

use bevy::prelude::*;
use bevy::utils::HashMap;

use crate::components::character::DEFAULT_EMOTION;
use crate::components::participant::Participant;
use crate::sinks::PortraitSink;

/// Display state of one registered portrait.
#[derive(Debug, Clone, PartialEq)]
pub struct PortraitSlot {
    /// Index of the participant shown by this portrait.
    pub participant: usize,
    /// Asset path of the texture to show.
    pub texture: Option<String>,
    /// Shadow overlay alpha, `None` when the portrait has no shadow.
    pub shadow_alpha: Option<f32>,
}

#[derive(Resource, Debug, Default)]
pub struct PortraitRegistry {
    slots: HashMap<Entity, PortraitSlot>,
}

impl PortraitRegistry {
    pub fn register(&mut self, entity: Entity, participant: usize, has_shadow: bool) {
        debug!("Registered portrait {:?} for participant {}", entity, participant);
        self.slots.insert(
            entity,
            PortraitSlot {
                participant,
                texture: None,
                shadow_alpha: has_shadow.then_some(0.0),
            },
        );
    }

    pub fn deregister(&mut self, entity: Entity) -> bool {
        self.slots.remove(&entity).is_some()
    }

    pub fn get(&self, entity: Entity) -> Option<&PortraitSlot> {
        self.slots.get(&entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Entity, &PortraitSlot)> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl PortraitSink for PortraitRegistry {
    fn update_portraits(&mut self, participants: &[Participant], speaker: Option<usize>) {
        for slot in self.slots.values_mut() {
            let Some(participant) = participants.get(slot.participant) else {
                continue;
            };
            let is_speaker = speaker == Some(slot.participant);

            if is_speaker {
                slot.texture = participant.portrait().map(str::to_string);
            }
            if let Some(alpha) = slot.shadow_alpha.as_mut() {
                *alpha = if is_speaker { 0.0 } else { 1.0 };
            }
            if slot.texture.is_none() {
                slot.texture = participant
                    .character()
                    .portrait(DEFAULT_EMOTION)
                    .map(str::to_string);
            }
        }
    }
}
