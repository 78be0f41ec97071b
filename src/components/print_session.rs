//! Typewriter print sessions.
//!
//! A print session reveals one dialogue line character by character, fires
//! on-print commands as the cursor passes them and decides when the line is
//! done according to its `PrintBehaviour`. A session lives from one
//! `TextPrinter::start_print` call until it reports `SessionStatus::Succeeded`.

use bevy::log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::components::participant::Participant;
use crate::resources::printer_settings::PrinterSettings;
use crate::sinks::{PortraitSink, TextDisplay, TypingSound};
use crate::utils::tags::{process_tags, CommandMap, OnPrintCommand};

/// Delay argument that selects `PrintBehaviour::Await` in dialogue scripts.
pub const AWAIT_DELAY_SENTINEL: f32 = -1.0;
/// Delay argument that selects `PrintBehaviour::Immediate` in dialogue scripts.
pub const IMMEDIATE_DELAY_SENTINEL: f32 = -2.0;

/// How a print decides that it is finished.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PrintBehaviour {
    /// Wait for the player to confirm.
    #[default]
    Await,
    /// Hold the fully printed line for this many seconds.
    Delay(f32),
    /// Show the whole line at once and finish on the first tick.
    Immediate,
}

impl PrintBehaviour {
    /// Maps the numeric delay argument used by dialogue scripts:
    /// `-1` awaits input, `-2` prints immediately, anything else is a hold time.
    pub fn from_delay_arg(delay: f32) -> Self {
        if delay == AWAIT_DELAY_SENTINEL {
            Self::Await
        } else if delay == IMMEDIATE_DELAY_SENTINEL {
            Self::Immediate
        } else {
            Self::Delay(delay)
        }
    }

    /// Parses `"await"`, `"delay"` or `"immediate"` (any case).
    pub fn from_name(name: &str, default_delay: f32) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "await" => Some(Self::Await),
            "delay" => Some(Self::Delay(default_delay)),
            "immediate" => Some(Self::Immediate),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Await => "await",
            Self::Delay(_) => "delay",
            Self::Immediate => "immediate",
        }
    }
}

/// Which participant a print is spoken by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakerRef {
    /// Reuse the last speaker.
    Last,
    /// Print without a speaker.
    Nobody,
    /// Participant at this index.
    Id(usize),
}

impl SpeakerRef {
    pub const LAST_SENTINEL: i32 = -1;
    pub const NOBODY_SENTINEL: i32 = -2;

    /// Maps a script speaker id. `-1` is the last speaker; any other negative
    /// value prints without a speaker.
    pub fn from_raw(id: i32) -> Self {
        match usize::try_from(id) {
            Ok(index) => Self::Id(index),
            Err(_) if id == Self::LAST_SENTINEL => Self::Last,
            Err(_) => Self::Nobody,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Created; the first tick has not run yet.
    Starting,
    Revealing,
    /// Fully revealed, waiting for the behaviour's completion condition.
    Holding,
    Completed,
}

/// Result of one session tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    /// The session completed on this tick. Reported exactly once.
    Succeeded,
    /// The session had already completed; nothing was updated.
    Finished,
}

/// State of one print operation.
#[derive(Debug, Clone)]
pub struct PrintSession {
    /// Reveal cursor: number of visible characters.
    max_visible: usize,
    /// Seconds between two revealed characters.
    char_interval: f32,
    /// Counts down from `char_interval`; a character is revealed at zero.
    char_timer: f32,
    behaviour: PrintBehaviour,
    /// Remaining hold time for `PrintBehaviour::Delay`.
    hold_remaining: f32,
    text: String,
    speaker: Option<usize>,
    commands: CommandMap,
    /// Set by the `silent` command.
    silenced: bool,
    /// Whether the text is cleared when the session completes.
    resets_text: bool,
    default_pitch: f32,
    phase: SessionPhase,
}

impl Default for PrintSession {
    /// An already completed, empty session.
    fn default() -> Self {
        Self {
            max_visible: 0,
            char_interval: 0.0,
            char_timer: 0.0,
            behaviour: PrintBehaviour::Await,
            hold_remaining: 0.0,
            text: String::new(),
            speaker: None,
            commands: CommandMap::new(),
            silenced: false,
            resets_text: true,
            default_pitch: 0.0,
            phase: SessionPhase::Completed,
        }
    }
}

impl PrintSession {
    /// Sets up a session for `text` and pushes it to the display.
    ///
    /// `speaker` must already be a valid index into `participants` or `None`.
    /// A speaker's label is prepended on its own line and is visible from the
    /// first frame.
    pub fn start(
        speaker: Option<usize>,
        text: &str,
        behaviour: PrintBehaviour,
        settings: &PrinterSettings,
        participants: &mut [Participant],
        display: &mut dyn TextDisplay,
    ) -> Self {
        let label = speaker
            .and_then(|index| participants.get(index))
            .map(|p| p.character().shortname());

        let (prefixed, max_visible) = match &label {
            Some(label) => (format!("{}\n{}", label, text), label.chars().count() + 1),
            None => (text.to_string(), 0),
        };
        let processed = process_tags(&prefixed, participants);

        let mut session = Self {
            max_visible,
            char_interval: settings.char_interval,
            char_timer: settings.char_interval,
            behaviour,
            hold_remaining: match behaviour {
                PrintBehaviour::Delay(secs) => secs,
                _ => 0.0,
            },
            text: processed.text,
            speaker: speaker.filter(|_| label.is_some()),
            commands: processed.commands,
            silenced: false,
            resets_text: settings.reset_text_on_completion
                && behaviour != PrintBehaviour::Immediate,
            default_pitch: settings.default_voice_pitch,
            phase: SessionPhase::Starting,
        };

        display.set_text(&session.text);
        let total = display.character_count();
        if behaviour == PrintBehaviour::Immediate {
            session.reveal_all(total, participants);
        }
        display.set_max_visible_characters(session.max_visible);

        debug!(
            "Print started ({}, speaker {:?}, {} chars, {} command positions)",
            behaviour.name(),
            session.speaker,
            total,
            session.commands.len()
        );
        session
    }

    /// Advances the session by one frame.
    ///
    /// `confirm` is whether the confirm input was pressed since the last tick.
    /// It is ignored on the first tick so the input that ended the previous
    /// line cannot skip this one.
    pub fn tick(
        &mut self,
        delta_seconds: f32,
        confirm: bool,
        participants: &mut [Participant],
        display: &mut dyn TextDisplay,
        portraits: &mut dyn PortraitSink,
        sound: &mut dyn TypingSound,
    ) -> SessionStatus {
        if self.phase == SessionPhase::Completed {
            return SessionStatus::Finished;
        }
        let starting = self.phase == SessionPhase::Starting;
        if starting {
            self.phase = SessionPhase::Revealing;
        }

        let total = display.character_count();
        if self.char_timer <= 0.0 && self.max_visible < total {
            self.char_timer = self.char_interval;
            self.max_visible += 1;
            if !self.silenced && self.max_visible % 2 == 1 {
                sound.play(self.voice_pitch(participants));
            }
        }

        self.fire_commands_at(self.max_visible, participants);
        self.char_timer -= delta_seconds;

        if self.max_visible >= total {
            self.phase = SessionPhase::Holding;
            if let PrintBehaviour::Delay(_) = self.behaviour {
                self.hold_remaining -= delta_seconds;
            }
        }

        let succeeded = self.check_completion(starting, confirm, total, participants);

        display.set_text(&self.text);
        display.set_max_visible_characters(self.max_visible);
        portraits.update_portraits(participants, self.speaker);

        if succeeded {
            SessionStatus::Succeeded
        } else {
            SessionStatus::Running
        }
    }

    fn check_completion(
        &mut self,
        starting: bool,
        confirm: bool,
        total: usize,
        participants: &mut [Participant],
    ) -> bool {
        let done = match self.behaviour {
            PrintBehaviour::Await => {
                if confirm && !starting {
                    if self.max_visible < total {
                        self.reveal_all(total, participants);
                    }
                    true
                } else {
                    false
                }
            }
            PrintBehaviour::Delay(_) => self.hold_remaining < 0.0,
            PrintBehaviour::Immediate => self.max_visible >= total,
        };

        if done {
            self.phase = SessionPhase::Completed;
            if self.resets_text {
                self.text.clear();
            }
            debug!("Print completed ({})", self.behaviour.name());
        }
        done
    }

    /// Jumps the cursor to the end and fires every pending command in
    /// ascending position order.
    fn reveal_all(&mut self, total: usize, participants: &mut [Participant]) {
        self.max_visible = self.max_visible.max(total);
        let pending = std::mem::take(&mut self.commands);
        for command in pending.values().flatten() {
            self.trigger(command, participants);
        }
    }

    fn fire_commands_at(&mut self, position: usize, participants: &mut [Participant]) {
        if let Some(commands) = self.commands.remove(&position) {
            for command in &commands {
                self.trigger(command, participants);
            }
        }
    }

    fn trigger(&mut self, command: &OnPrintCommand, participants: &mut [Participant]) {
        trace!("On-print command '{}' {:?}", command.name, command.params);
        if command.name == "silent" {
            self.silenced = true;
            return;
        }

        // Anything else is treated as a portrait emotion for the speaker.
        let Some(speaker) = self.speaker.and_then(|index| participants.get_mut(index)) else {
            return;
        };
        if speaker.character().has_portrait(&command.name) {
            speaker.set_emotion(command.name.as_str());
        } else {
            trace!(
                "Ignoring on-print command '{}': no matching portrait for {}",
                command.name,
                speaker.character().fullname()
            );
        }
    }

    fn voice_pitch(&self, participants: &[Participant]) -> f32 {
        self.speaker
            .and_then(|index| participants.get(index))
            .map_or(self.default_pitch, |p| p.character().voice_pitch())
    }

    pub fn max_visible_characters(&self) -> usize {
        self.max_visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn behaviour(&self) -> PrintBehaviour {
        self.behaviour
    }

    pub fn speaker(&self) -> Option<usize> {
        self.speaker
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_completed(&self) -> bool {
        self.phase == SessionPhase::Completed
    }

    pub fn is_silenced(&self) -> bool {
        self.silenced
    }

    /// Commands whose position has not been reached yet.
    pub fn pending_commands(&self) -> &CommandMap {
        &self.commands
    }

    pub fn hold_remaining(&self) -> f32 {
        self.hold_remaining
    }
}
