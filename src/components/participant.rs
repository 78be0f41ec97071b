//! Dialogue participants.
//!
//! A participant binds a character to a slot for one dialogue sequence. The
//! slot index is the speaker id used by print calls and by `[0.name]` tags.

use bevy::log::debug;
use std::sync::Arc;

use super::character::{Character, DEFAULT_EMOTION};

/// A character taking part in the current dialogue, with its current emotion.
#[derive(Debug, Clone)]
pub struct Participant {
    character: Arc<Character>,
    emotion: String,
}

impl Participant {
    pub fn new(character: Arc<Character>) -> Self {
        Self {
            character,
            emotion: DEFAULT_EMOTION.to_string(),
        }
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    /// True if both participants are bound to the same character record.
    pub fn is_same_character(&self, other: &Arc<Character>) -> bool {
        Arc::ptr_eq(&self.character, other)
    }

    pub fn emotion(&self) -> &str {
        &self.emotion
    }

    pub fn set_emotion(&mut self, emotion: impl Into<String>) {
        self.emotion = emotion.into();
    }

    /// Portrait for the current emotion, falling back to the default portrait.
    pub fn portrait(&self) -> Option<&str> {
        self.character.portrait(&self.emotion)
    }
}

/// Source of characters for participant resolution.
pub trait CharacterLookup {
    /// The player character, if one is registered.
    fn player(&self) -> Option<Arc<Character>>;
    /// Finds a character by name.
    fn find(&self, name: &str) -> Option<Arc<Character>>;
}

fn is_player_alias(name: &str) -> bool {
    matches!(
        name.to_lowercase().as_str(),
        "player" | "playeronly" | "player only"
    )
}

/// Builds the participant list from a comma-separated name specification.
///
/// A single name is a monologue or a two-way conversation with the player:
/// `"player"` gives `[player]`, `"none"` gives `[]` and any other name gives
/// `[player, name]` (or `[player]` when the name does not resolve). Several
/// names resolve one by one; `"player"` must be listed to include the player.
/// Unresolved names and repeated characters are dropped.
pub fn parse_participants(spec: &str, lookup: &impl CharacterLookup) -> Vec<Participant> {
    let names: Vec<&str> = spec.split(',').map(str::trim).collect();

    let characters = match names.as_slice() {
        [name] => from_one_name(name, lookup),
        _ => from_many_names(&names, lookup),
    };

    characters.into_iter().map(Participant::new).collect()
}

fn from_one_name(name: &str, lookup: &impl CharacterLookup) -> Vec<Arc<Character>> {
    if is_player_alias(name) {
        return lookup.player().into_iter().collect();
    }
    if name.eq_ignore_ascii_case("none") {
        return Vec::new();
    }

    let mut characters = Vec::new();
    if let Some(player) = lookup.player() {
        characters.push(player);
    }
    match lookup.find(name) {
        Some(found) => push_unique(&mut characters, found),
        None => debug!("Participant '{}' not found, continuing with player only", name),
    }
    characters
}

fn from_many_names(names: &[&str], lookup: &impl CharacterLookup) -> Vec<Arc<Character>> {
    let mut characters = Vec::new();
    for name in names {
        let resolved = if is_player_alias(name) {
            lookup.player()
        } else {
            lookup.find(name)
        };
        match resolved {
            Some(character) => push_unique(&mut characters, character),
            None => debug!("Dropping unresolved participant '{}'", name),
        }
    }
    characters
}

fn push_unique(characters: &mut Vec<Arc<Character>>, character: Arc<Character>) {
    if !characters.iter().any(|c| Arc::ptr_eq(c, &character)) {
        characters.push(character);
    }
}
