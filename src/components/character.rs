//! Character records for dialogue sequences.
//!
//! A character carries the names a dialogue can refer to, the portraits
//! shown while it speaks and the pitch of its typing voice.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lowest voice pitch a character may use.
pub const MIN_VOICE_PITCH: f32 = 0.35;
/// Highest voice pitch a character may use.
pub const MAX_VOICE_PITCH: f32 = 2.15;
/// Emotion every participant starts with.
pub const DEFAULT_EMOTION: &str = "neutral";

/// Which name is shown as the speaker label in the dialogue box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortName {
    #[default]
    Firstname,
    Lastname,
    Nickname,
    Fullname,
}

fn default_voice_pitch() -> f32 {
    1.0
}

/// An immutable character definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    firstname: String,
    #[serde(default)]
    lastname: String,
    #[serde(default)]
    nickname: String,
    /// Portrait shown when no emotion-specific portrait exists.
    #[serde(default)]
    default_portrait: Option<String>,
    /// Portrait asset paths keyed by emotion label.
    #[serde(default)]
    portraits: HashMap<String, String>,
    #[serde(default = "default_voice_pitch")]
    voice_pitch: f32,
    #[serde(default)]
    short_name: ShortName,
}

impl Character {
    /// Creates a character with no portraits and a neutral voice.
    pub fn new(firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        Self {
            firstname: firstname.into(),
            lastname: lastname.into(),
            nickname: String::new(),
            default_portrait: None,
            portraits: HashMap::new(),
            voice_pitch: default_voice_pitch(),
            short_name: ShortName::default(),
        }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = nickname.into();
        self
    }

    pub fn with_short_name(mut self, short_name: ShortName) -> Self {
        self.short_name = short_name;
        self
    }

    /// Sets the voice pitch, clamped to the supported range.
    pub fn with_voice_pitch(mut self, pitch: f32) -> Self {
        self.voice_pitch = pitch.clamp(MIN_VOICE_PITCH, MAX_VOICE_PITCH);
        self
    }

    pub fn with_default_portrait(mut self, path: impl Into<String>) -> Self {
        self.default_portrait = Some(path.into());
        self
    }

    pub fn with_portrait(mut self, emotion: impl Into<String>, path: impl Into<String>) -> Self {
        self.portraits.insert(emotion.into(), path.into());
        self
    }

    /// Converts a character name to the form used for asset file names.
    pub fn name_to_filename(name: &str) -> String {
        name.to_lowercase().trim().replace(' ', "-")
    }

    pub fn firstname(&self) -> &str {
        &self.firstname
    }

    pub fn lastname(&self) -> &str {
        &self.lastname
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn fullname(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }

    pub fn filename(&self) -> String {
        Self::name_to_filename(&self.fullname())
    }

    /// The name used as the speaker label.
    pub fn shortname(&self) -> String {
        match self.short_name {
            ShortName::Firstname => self.firstname.clone(),
            ShortName::Lastname => self.lastname.clone(),
            ShortName::Nickname => self.nickname.clone(),
            ShortName::Fullname => self.fullname(),
        }
    }

    /// Voice pitch, always within `MIN_VOICE_PITCH..=MAX_VOICE_PITCH` even
    /// when a roster file carries an out-of-range value.
    pub fn voice_pitch(&self) -> f32 {
        self.voice_pitch.clamp(MIN_VOICE_PITCH, MAX_VOICE_PITCH)
    }

    pub fn default_portrait(&self) -> Option<&str> {
        self.default_portrait.as_deref()
    }

    /// Returns the portrait for `emotion`, falling back to the default portrait.
    pub fn portrait(&self, emotion: &str) -> Option<&str> {
        self.portraits
            .get(emotion)
            .map(String::as_str)
            .or(self.default_portrait.as_deref())
    }

    /// True if the character has a portrait specific to `emotion`.
    pub fn has_portrait(&self, emotion: &str) -> bool {
        self.portraits.contains_key(emotion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_names() {
        let c = Character::new("Mary", "Read").with_nickname("Mark");
        assert_eq!(c.fullname(), "Mary Read");
        assert_eq!(c.filename(), "mary-read");
        assert_eq!(c.shortname(), "Mary");
        assert_eq!(c.clone().with_short_name(ShortName::Lastname).shortname(), "Read");
        assert_eq!(c.clone().with_short_name(ShortName::Nickname).shortname(), "Mark");
        assert_eq!(c.with_short_name(ShortName::Fullname).shortname(), "Mary Read");
    }

    #[test]
    fn test_filename_trims_and_lowercases() {
        assert_eq!(Character::name_to_filename("  Anne Bonny "), "anne-bonny");
        // A character without a last name keeps a clean file name.
        assert_eq!(Character::new("Bob", "").filename(), "bob");
    }

    #[test]
    fn test_voice_pitch_is_clamped() {
        assert_eq!(Character::new("A", "B").with_voice_pitch(5.0).voice_pitch(), MAX_VOICE_PITCH);
        assert_eq!(Character::new("A", "B").with_voice_pitch(0.0).voice_pitch(), MIN_VOICE_PITCH);
        assert_eq!(Character::new("A", "B").voice_pitch(), 1.0);
    }

    #[test]
    fn test_portrait_fallback() {
        let c = Character::new("Ann", "Bonny")
            .with_default_portrait("portraits/ann.png")
            .with_portrait("happy", "portraits/ann-happy.png");
        assert_eq!(c.portrait("happy"), Some("portraits/ann-happy.png"));
        assert_eq!(c.portrait("sad"), Some("portraits/ann.png"));
        assert!(c.has_portrait("happy"));
        assert!(!c.has_portrait("sad"));
        assert_eq!(Character::new("No", "Face").portrait(DEFAULT_EMOTION), None);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let c: Character = serde_json::from_str(
            r#"{ "firstname": "Jack", "lastname": "Rackham", "short_name": "fullname" }"#,
        )
        .unwrap();
        assert_eq!(c.shortname(), "Jack Rackham");
        assert_eq!(c.voice_pitch(), 1.0);
        assert!(c.default_portrait().is_none());
    }
}
