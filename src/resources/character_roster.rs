//! Registry of every character that can take part in a dialogue.

use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

use crate::components::character::Character;
use crate::components::participant::CharacterLookup;

/// On-disk roster format.
#[derive(Debug, Deserialize)]
struct RosterFile {
    /// Name of the player character, resolved like any other lookup.
    #[serde(default)]
    player: Option<String>,
    characters: Vec<Character>,
}

/// All known characters, plus which of them is the player.
#[derive(Resource, Debug, Default)]
pub struct CharacterRoster {
    characters: Vec<Arc<Character>>,
    player: Option<Arc<Character>>,
}

impl CharacterRoster {
    /// Adds a character and returns the shared record.
    pub fn insert(&mut self, character: Character) -> Arc<Character> {
        let character = Arc::new(character);
        self.characters.push(character.clone());
        character
    }

    /// Adds a character and makes it the player.
    pub fn insert_player(&mut self, character: Character) -> Arc<Character> {
        let character = self.insert(character);
        self.player = Some(character.clone());
        character
    }

    /// Marks an already registered character as the player.
    pub fn set_player(&mut self, name: &str) -> bool {
        match self.find(name) {
            Some(character) => {
                self.player = Some(character);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Parses a roster from JSON: `{ "player": "...", "characters": [...] }`.
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let file: RosterFile =
            serde_json::from_str(json).map_err(|e| format!("Failed to parse roster: {}", e))?;

        let mut roster = Self::default();
        for character in file.characters {
            roster.insert(character);
        }
        if let Some(player) = file.player {
            if !roster.set_player(&player) {
                warn!("Roster player '{}' is not in the character list", player);
            }
        }
        Ok(roster)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read roster {:?}: {}", path, e))?;
        let roster = Self::from_json_str(&contents)?;
        info!("Loaded {} characters from {:?}", roster.len(), path);
        Ok(roster)
    }
}

impl CharacterLookup for CharacterRoster {
    fn player(&self) -> Option<Arc<Character>> {
        self.player.clone()
    }

    /// Matches the name's file-name form first, then a first name or
    /// nickname (ignoring case).
    fn find(&self, name: &str) -> Option<Arc<Character>> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let filename = Character::name_to_filename(name);
        self.characters
            .iter()
            .find(|c| c.filename() == filename)
            .or_else(|| {
                self.characters.iter().find(|c| {
                    c.firstname().eq_ignore_ascii_case(name)
                        || (!c.nickname().is_empty() && c.nickname().eq_ignore_ascii_case(name))
                })
            })
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::participant::parse_participants;

    const ROSTER_JSON: &str = r#"{
        "player": "Mary Read",
        "characters": [
            { "firstname": "Mary", "lastname": "Read", "voice_pitch": 1.1 },
            { "firstname": "Bob", "default_portrait": "portraits/bob.png" },
            { "firstname": "Anne", "lastname": "Bonny", "nickname": "Toothless",
              "portraits": { "happy": "portraits/anne-happy.png" } }
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let roster = CharacterRoster::from_json_str(ROSTER_JSON).unwrap();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.player().unwrap().fullname(), "Mary Read");
    }

    #[test]
    fn test_find_by_name_forms() {
        let roster = CharacterRoster::from_json_str(ROSTER_JSON).unwrap();
        assert_eq!(roster.find("anne-bonny").unwrap().firstname(), "Anne");
        assert_eq!(roster.find("Anne Bonny").unwrap().firstname(), "Anne");
        assert_eq!(roster.find("ANNE").unwrap().firstname(), "Anne");
        assert_eq!(roster.find("toothless").unwrap().firstname(), "Anne");
        assert_eq!(roster.find("Bob").unwrap().firstname(), "Bob");
        assert!(roster.find("Calico Jack").is_none());
        assert!(roster.find("").is_none());
    }

    #[test]
    fn test_lookups_share_identity() {
        let roster = CharacterRoster::from_json_str(ROSTER_JSON).unwrap();
        let a = roster.find("Anne").unwrap();
        let b = roster.find("anne-bonny").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_unknown_player_is_ignored() {
        let roster = CharacterRoster::from_json_str(
            r#"{ "player": "Ghost", "characters": [ { "firstname": "Bob" } ] }"#,
        )
        .unwrap();
        assert!(roster.player().is_none());
        // Without a player, a single name resolves to that character only.
        let participants = parse_participants("Bob", &roster);
        assert_eq!(participants.len(), 1);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(CharacterRoster::from_json_str(r#"{ "characters": 3 }"#).is_err());
    }

    #[test]
    fn test_parse_participants_against_roster() {
        let roster = CharacterRoster::from_json_str(ROSTER_JSON).unwrap();
        let participants = parse_participants("player, Bob", &roster);
        let names: Vec<String> = participants.iter().map(|p| p.character().fullname()).collect();
        assert_eq!(names, vec!["Mary Read", "Bob "]);

        assert!(parse_participants("None", &roster).is_empty());
        assert_eq!(parse_participants("playeronly", &roster).len(), 1);
    }

    #[test]
    fn test_insert_player() {
        let mut roster = CharacterRoster::default();
        assert!(roster.is_empty());
        let player = roster.insert_player(Character::new("Jack", "Rackham"));
        assert!(Arc::ptr_eq(&roster.player().unwrap(), &player));
        assert!(roster.set_player("jack-rackham"));
        assert!(!roster.set_player("nobody"));
    }
}
