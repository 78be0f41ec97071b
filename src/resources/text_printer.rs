//! The text printer: owns the dialogue participants and the print in flight.

use bevy::prelude::*;

use crate::components::participant::{parse_participants, CharacterLookup, Participant};
use crate::components::print_session::{PrintBehaviour, PrintSession, SessionStatus, SpeakerRef};
use crate::resources::printer_settings::PrinterSettings;
use crate::sinks::{PortraitSink, TextDisplay, TypingSound};

/// Prints dialogue lines into a `TextDisplay`, one session at a time.
#[derive(Resource, Debug)]
pub struct TextPrinter {
    participants: Vec<Participant>,
    /// Speaker reused by prints that pass `SpeakerRef::Last`.
    last_speaker: usize,
    default_behaviour: PrintBehaviour,
    settings: PrinterSettings,
    session: PrintSession,
}

impl Default for TextPrinter {
    fn default() -> Self {
        Self::new(PrinterSettings::default())
    }
}

impl TextPrinter {
    pub fn new(settings: PrinterSettings) -> Self {
        Self {
            participants: Vec::new(),
            last_speaker: 0,
            default_behaviour: settings.default_behaviour,
            settings,
            session: PrintSession::default(),
        }
    }

    pub fn settings(&self) -> &PrinterSettings {
        &self.settings
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn set_participants(&mut self, participants: Vec<Participant>) {
        self.participants = participants;
    }

    /// Replaces the participants from a name specification such as
    /// `"player, Bob"`. See `parse_participants`.
    pub fn set_participants_from_spec(&mut self, spec: &str, lookup: &impl CharacterLookup) -> &[Participant] {
        self.participants = parse_participants(spec, lookup);
        info!("Participants set from '{}': {} resolved", spec, self.participants.len());
        &self.participants
    }

    pub fn last_speaker(&self) -> usize {
        self.last_speaker
    }

    /// Makes `id` the current speaker, optionally changing its emotion first.
    /// Ignored when `id` is out of range.
    pub fn set_speaker(&mut self, id: usize, emotion: Option<&str>, portraits: &mut dyn PortraitSink) -> bool {
        let Some(participant) = self.participants.get_mut(id) else {
            warn!("Cannot set speaker {}: only {} participants", id, self.participants.len());
            return false;
        };
        if let Some(emotion) = emotion {
            participant.set_emotion(emotion);
        }
        self.last_speaker = id;
        portraits.update_portraits(&self.participants, Some(id));
        true
    }

    pub fn default_behaviour(&self) -> PrintBehaviour {
        self.default_behaviour
    }

    pub fn set_default_behaviour(&mut self, behaviour: PrintBehaviour) {
        self.default_behaviour = behaviour;
    }

    /// Sets the default behaviour from `"await"`, `"delay"` or `"immediate"`.
    /// Delay uses the configured default hold time.
    pub fn set_default_behaviour_by_name(&mut self, name: &str) -> bool {
        match PrintBehaviour::from_name(name, self.settings.default_delay_after_print) {
            Some(behaviour) => {
                self.default_behaviour = behaviour;
                true
            }
            None => {
                warn!("Unknown print behaviour '{}'", name);
                false
            }
        }
    }

    /// The default behaviour with an explicit hold time. The delay only
    /// applies when the default behaviour is `Delay`.
    pub fn behaviour_with_delay(&self, delay: f32) -> PrintBehaviour {
        match self.default_behaviour {
            PrintBehaviour::Delay(_) => PrintBehaviour::Delay(delay),
            other => other,
        }
    }

    /// A delay print using the configured default hold time.
    pub fn default_delay_behaviour(&self) -> PrintBehaviour {
        PrintBehaviour::Delay(self.settings.default_delay_after_print)
    }

    /// Resolves a speaker reference to a participant index.
    ///
    /// An explicit id becomes the new last speaker even when it is out of
    /// range; an out-of-range speaker prints as nobody.
    pub fn resolve_speaker(&mut self, speaker: SpeakerRef) -> Option<usize> {
        let id = match speaker {
            SpeakerRef::Nobody => return None,
            SpeakerRef::Last => self.last_speaker,
            SpeakerRef::Id(id) => {
                self.last_speaker = id;
                id
            }
        };

        if id < self.participants.len() {
            Some(id)
        } else {
            if !self.participants.is_empty() {
                warn!(
                    "Speaker {} out of range ({} participants), printing without a speaker",
                    id,
                    self.participants.len()
                );
            }
            None
        }
    }

    /// Starts printing `text`.
    ///
    /// While a print is still in flight, the call is ignored and the running
    /// session is returned unchanged.
    pub fn start_print(
        &mut self,
        speaker: SpeakerRef,
        text: &str,
        behaviour: PrintBehaviour,
        display: &mut dyn TextDisplay,
    ) -> &PrintSession {
        if self.is_printing() {
            debug!("Print already in flight, ignoring new print request");
            return &self.session;
        }

        let speaker = self.resolve_speaker(speaker);
        self.session = PrintSession::start(
            speaker,
            text,
            behaviour,
            &self.settings,
            &mut self.participants,
            display,
        );
        &self.session
    }

    /// Starts a print with the default behaviour.
    pub fn print(&mut self, speaker: SpeakerRef, text: &str, display: &mut dyn TextDisplay) -> &PrintSession {
        let behaviour = self.default_behaviour;
        self.start_print(speaker, text, behaviour, display)
    }

    /// Advances the print in flight by one frame.
    pub fn tick(
        &mut self,
        delta_seconds: f32,
        confirm: bool,
        display: &mut dyn TextDisplay,
        portraits: &mut dyn PortraitSink,
        sound: &mut dyn TypingSound,
    ) -> SessionStatus {
        self.session.tick(
            delta_seconds,
            confirm,
            &mut self.participants,
            display,
            portraits,
            sound,
        )
    }

    pub fn session(&self) -> &PrintSession {
        &self.session
    }

    /// True while a print session has not completed.
    pub fn is_printing(&self) -> bool {
        !self.session.is_completed()
    }
}
