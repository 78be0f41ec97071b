//! Text printer settings.
//!
//! Loaded once at startup from a JSON file. Missing fields take their
//! defaults, and an unreadable file falls back to the default settings.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::components::print_session::PrintBehaviour;

/// Default file name for settings storage.
const SETTINGS_FILE_NAME: &str = "printer.json";
/// Directory name under the platform config directory.
const APP_DIR_NAME: &str = "storyprint";

/// Tunables for the text printer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterSettings {
    /// Seconds between two revealed characters (0.04 = 25 chars/sec).
    pub char_interval: f32,
    /// Hold time for delay prints that do not give one.
    pub default_delay_after_print: f32,
    /// Typing sound pitch when nobody is speaking.
    pub default_voice_pitch: f32,
    /// Asset path of the typing sound.
    pub typing_sound: String,
    /// Behaviour used by prints that do not choose one.
    pub default_behaviour: PrintBehaviour,
    /// Clear the dialogue box when a print completes. Immediate prints
    /// always stay on screen.
    pub reset_text_on_completion: bool,
}

impl Default for PrinterSettings {
    fn default() -> Self {
        Self {
            char_interval: 0.040,
            default_delay_after_print: 2.0,
            default_voice_pitch: 0.5,
            typing_sound: "sounds/default-speech.ogg".to_string(),
            default_behaviour: PrintBehaviour::Await,
            reset_text_on_completion: true,
        }
    }
}

impl PrinterSettings {
    /// Parses settings from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse printer settings: {}", e))
    }

    /// Loads settings from `path`, or from the platform config directory when
    /// no path is given. Returns the defaults if nothing usable is found.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::get_settings_path) else {
            warn!("Could not determine config directory, using default printer settings");
            return Self::default();
        };

        if !path.exists() {
            info!("No printer settings at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::load_from_file(&path) {
            Ok(settings) => {
                info!("Loaded printer settings from {:?}", path);
                settings
            }
            Err(e) => {
                error!("{}", e);
                Self::default()
            }
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read printer settings {:?}: {}", path, e))?;
        Self::from_json_str(&contents)
    }

    /// Returns the platform-specific path for the settings file.
    pub fn get_settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push(APP_DIR_NAME);
            path.push(SETTINGS_FILE_NAME);
            path
        })
    }

    /// Saves the settings to `path`, creating its directory if needed.
    pub fn save_to_file(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                std::fs::create_dir_all(dir)
                    .map_err(|e| format!("Failed to create settings directory: {}", e))?;
                info!("Created settings directory: {:?}", dir);
            }
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize printer settings: {}", e))?;
        std::fs::write(path, json)
            .map_err(|e| format!("Failed to write printer settings: {}", e))?;
        info!("Saved printer settings to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = PrinterSettings::default();
        assert_eq!(settings.char_interval, 0.040);
        assert_eq!(settings.default_delay_after_print, 2.0);
        assert_eq!(settings.default_voice_pitch, 0.5);
        assert_eq!(settings.default_behaviour, PrintBehaviour::Await);
        assert!(settings.reset_text_on_completion);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = PrinterSettings::from_json_str(
            r#"{ "char_interval": 0.02, "default_behaviour": { "Delay": 1.5 } }"#,
        )
        .unwrap();
        assert_eq!(settings.char_interval, 0.02);
        assert_eq!(settings.default_behaviour, PrintBehaviour::Delay(1.5));
        assert_eq!(settings.typing_sound, "sounds/default-speech.ogg");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(PrinterSettings::from_json_str("{ nope").is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("storyprint-settings-{}", std::process::id()));
        let path = dir.join(SETTINGS_FILE_NAME);
        let settings = PrinterSettings {
            default_behaviour: PrintBehaviour::Immediate,
            ..Default::default()
        };

        settings.save_to_file(&path).unwrap();
        assert_eq!(PrinterSettings::load_from_file(&path).unwrap(), settings);
        assert_eq!(PrinterSettings::load_or_default(Some(&path)), settings);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("storyprint-does-not-exist/printer.json");
        assert_eq!(PrinterSettings::load_or_default(Some(&path)), PrinterSettings::default());
    }
}
