//! Typing sound playback.
//!
//! The printer queues pitches into `TypingSoundQueue` while it ticks;
//! `play_typing_sounds` drains the queue through kira once per frame.

use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl, AudioPlugin, AudioSource};

use crate::resources::text_printer::TextPrinter;
use crate::sinks::TypingSound;

/// Pending typing sound requests, as playback rates.
#[derive(Resource, Debug, Default)]
pub struct TypingSoundQueue {
    pending: Vec<f32>,
}

impl TypingSoundQueue {
    pub fn drain(&mut self) -> std::vec::Drain<'_, f32> {
        self.pending.drain(..)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl TypingSound for TypingSoundQueue {
    fn play(&mut self, pitch: f32) {
        self.pending.push(pitch);
    }
}

/// Loaded typing sound clip.
#[derive(Resource, Debug, Default)]
pub struct TypingSoundAsset {
    pub handle: Option<Handle<AudioSource>>,
}

pub struct TypingSoundPlugin;

impl Plugin for TypingSoundPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<AudioPlugin>() {
            app.add_plugins(AudioPlugin);
        }
        app.init_resource::<TypingSoundQueue>()
            .init_resource::<TypingSoundAsset>()
            .add_systems(Startup, load_typing_sound);
    }
}

fn load_typing_sound(
    asset_server: Res<AssetServer>,
    printer: Res<TextPrinter>,
    mut sound: ResMut<TypingSoundAsset>,
) {
    let path = printer.settings().typing_sound.clone();
    if path.is_empty() {
        warn!("No typing sound configured, printing silently");
        return;
    }
    info!("Loading typing sound '{}'", path);
    sound.handle = Some(asset_server.load(path));
}

/// Plays every queued typing sound. Requests are dropped when no clip is loaded.
pub fn play_typing_sounds(
    audio: Res<Audio>,
    sound: Res<TypingSoundAsset>,
    mut queue: ResMut<TypingSoundQueue>,
) {
    if queue.is_empty() {
        return;
    }
    let Some(handle) = sound.handle.as_ref() else {
        queue.clear();
        return;
    };
    for pitch in queue.drain() {
        audio.play(handle.clone()).with_playback_rate(pitch as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_collects_pitches_in_order() {
        let mut queue = TypingSoundQueue::default();
        queue.play(1.25);
        queue.play(0.5);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.drain().collect::<Vec<_>>(), vec![1.25, 0.5]);
        assert!(queue.is_empty());
    }
}
