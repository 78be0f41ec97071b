//! Sequential dialogue scripts.
//!
//! A script is a JSON list of tasks. Setup tasks finish as soon as they run;
//! print tasks start a print and hold the queue until the printer is idle
//! again.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;

use crate::components::print_session::{PrintBehaviour, SpeakerRef};
use crate::resources::character_roster::CharacterRoster;
use crate::resources::text_printer::TextPrinter;
use crate::sinks::{PortraitSink, TextDisplay};

fn last_speaker() -> i32 {
    SpeakerRef::LAST_SENTINEL
}

/// One step of a dialogue script.
///
/// Speaker ids are raw script values: `-1` reuses the last speaker and any
/// other negative id prints without a speaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "task", rename_all = "snake_case")]
pub enum DialogueTask {
    SetParticipants {
        names: String,
    },
    SetSpeaker {
        id: usize,
        #[serde(default)]
        emotion: Option<String>,
    },
    SetDefaultPrintBehaviour {
        behaviour: String,
    },
    /// Print with the printer's default behaviour. A `delay` only applies
    /// when that default is delay.
    Print {
        #[serde(default = "last_speaker")]
        speaker: i32,
        text: String,
        #[serde(default)]
        delay: Option<f32>,
    },
    PrintAwait {
        #[serde(default = "last_speaker")]
        speaker: i32,
        text: String,
    },
    /// Print and hold for `delay` seconds, or the default hold time.
    PrintDelay {
        #[serde(default = "last_speaker")]
        speaker: i32,
        text: String,
        #[serde(default)]
        delay: Option<f32>,
    },
    PrintImmediate {
        #[serde(default = "last_speaker")]
        speaker: i32,
        text: String,
    },
}

impl DialogueTask {
    /// Parses a script: a JSON array of tasks.
    pub fn parse_script(json: &str) -> Result<Vec<Self>, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse dialogue script: {}", e))
    }

    pub fn load_script(path: &Path) -> Result<Vec<Self>, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read dialogue script {:?}: {}", path, e))?;
        let tasks = Self::parse_script(&contents)?;
        info!("Loaded {} dialogue tasks from {:?}", tasks.len(), path);
        Ok(tasks)
    }
}

/// Runs a dialogue script against the text printer, one task at a time.
#[derive(Resource, Debug, Default)]
pub struct DialogueRunner {
    tasks: VecDeque<DialogueTask>,
    /// A script was loaded and has not finished yet.
    active: bool,
}

impl DialogueRunner {
    pub fn new(tasks: Vec<DialogueTask>) -> Self {
        Self {
            tasks: tasks.into(),
            active: true,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, String> {
        DialogueTask::parse_script(json).map(Self::new)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        DialogueTask::load_script(path).map(Self::new)
    }

    /// Appends a task, restarting the runner if it had finished.
    pub fn push(&mut self, task: DialogueTask) {
        self.tasks.push_back(task);
        self.active = true;
    }

    pub fn is_running(&self) -> bool {
        self.active
    }

    pub fn remaining(&self) -> usize {
        self.tasks.len()
    }

    /// Runs tasks until one has to wait for the printer.
    ///
    /// Returns true on the call that finishes the script.
    pub fn step(
        &mut self,
        printer: &mut TextPrinter,
        roster: &CharacterRoster,
        display: &mut dyn TextDisplay,
        portraits: &mut dyn PortraitSink,
    ) -> bool {
        if !self.active {
            return false;
        }
        // Tasks stay queued while any print is in flight, ours or not.
        if printer.is_printing() {
            return false;
        }

        while let Some(task) = self.tasks.pop_front() {
            if self.run_task(task, printer, roster, display, portraits) {
                return false;
            }
        }

        self.active = false;
        info!("Dialogue script finished");
        true
    }

    /// Returns true when the task started a print.
    fn run_task(
        &mut self,
        task: DialogueTask,
        printer: &mut TextPrinter,
        roster: &CharacterRoster,
        display: &mut dyn TextDisplay,
        portraits: &mut dyn PortraitSink,
    ) -> bool {
        trace!("Running dialogue task {:?}", task);
        let (speaker, text, behaviour) = match task {
            DialogueTask::SetParticipants { names } => {
                printer.set_participants_from_spec(&names, roster);
                return false;
            }
            DialogueTask::SetSpeaker { id, emotion } => {
                printer.set_speaker(id, emotion.as_deref(), portraits);
                return false;
            }
            DialogueTask::SetDefaultPrintBehaviour { behaviour } => {
                printer.set_default_behaviour_by_name(&behaviour);
                return false;
            }
            DialogueTask::Print { speaker, text, delay } => {
                let behaviour = match delay {
                    Some(delay) => printer.behaviour_with_delay(delay),
                    None => printer.default_behaviour(),
                };
                (speaker, text, behaviour)
            }
            DialogueTask::PrintAwait { speaker, text } => (speaker, text, PrintBehaviour::Await),
            DialogueTask::PrintDelay { speaker, text, delay } => {
                let behaviour = match delay {
                    Some(delay) => PrintBehaviour::from_delay_arg(delay),
                    None => printer.default_delay_behaviour(),
                };
                (speaker, text, behaviour)
            }
            DialogueTask::PrintImmediate { speaker, text } => {
                (speaker, text, PrintBehaviour::Immediate)
            }
        };

        printer.start_print(SpeakerRef::from_raw(speaker), &text, behaviour, display);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::character::Character;
    use crate::components::print_session::SessionStatus;
    use crate::sinks::recording::{RecordingDisplay, RecordingPortraits, RecordingSound};

    const SCRIPT: &str = r#"[
        { "task": "set_participants", "names": "Bob" },
        { "task": "set_speaker", "id": 1, "emotion": "happy" },
        { "task": "print", "text": "Ahoy!" },
        { "task": "print_immediate", "speaker": -2, "text": "The wind picks up." },
        { "task": "set_default_print_behaviour", "behaviour": "delay" },
        { "task": "print", "speaker": 0, "text": "Hi", "delay": 0.1 }
    ]"#;

    struct Stage {
        printer: TextPrinter,
        roster: CharacterRoster,
        display: RecordingDisplay,
        portraits: RecordingPortraits,
        sound: RecordingSound,
    }

    impl Stage {
        fn new() -> Self {
            let mut roster = CharacterRoster::default();
            roster.insert_player(Character::new("Mary", "Read"));
            roster.insert(Character::new("Bob", "").with_portrait("happy", "bob-happy.png"));
            Self {
                printer: TextPrinter::default(),
                roster,
                display: RecordingDisplay::default(),
                portraits: RecordingPortraits::default(),
                sound: RecordingSound::default(),
            }
        }

        /// One frame: runner first, then the printer, as the plugin orders them.
        fn frame(&mut self, runner: &mut DialogueRunner, confirm: bool) -> (bool, SessionStatus) {
            let finished = runner.step(
                &mut self.printer,
                &self.roster,
                &mut self.display,
                &mut self.portraits,
            );
            let status = self.printer.tick(
                0.05,
                confirm,
                &mut self.display,
                &mut self.portraits,
                &mut self.sound,
            );
            (finished, status)
        }
    }

    #[test]
    fn test_parse_script() {
        let tasks = DialogueTask::parse_script(SCRIPT).unwrap();
        assert_eq!(tasks.len(), 6);
        assert_eq!(
            tasks[2],
            DialogueTask::Print {
                speaker: -1,
                text: "Ahoy!".to_string(),
                delay: None
            }
        );
        assert_eq!(
            tasks[1],
            DialogueTask::SetSpeaker {
                id: 1,
                emotion: Some("happy".to_string())
            }
        );
    }

    #[test]
    fn test_unknown_task_is_an_error() {
        assert!(DialogueTask::parse_script(r#"[{ "task": "branch", "to": 3 }]"#).is_err());
    }

    #[test]
    fn test_setup_tasks_run_in_one_step() {
        let mut stage = Stage::new();
        let mut runner = DialogueRunner::from_json_str(SCRIPT).unwrap();

        let (finished, _) = stage.frame(&mut runner, false);
        assert!(!finished);
        assert_eq!(stage.printer.participants().len(), 2);
        assert_eq!(stage.printer.last_speaker(), 1);
        assert_eq!(stage.printer.participants()[1].emotion(), "happy");
        assert_eq!(stage.display.text, "Bob\nAhoy!");
        assert_eq!(runner.remaining(), 3);
    }

    #[test]
    fn test_runs_script_to_the_end() {
        let mut stage = Stage::new();
        let mut runner = DialogueRunner::from_json_str(SCRIPT).unwrap();

        // The await print holds the queue until confirmed.
        for _ in 0..20 {
            stage.frame(&mut runner, false);
        }
        assert_eq!(runner.remaining(), 3);
        assert_eq!(stage.printer.session().text(), "Bob\nAhoy!");

        let (_, status) = stage.frame(&mut runner, true);
        assert_eq!(status, SessionStatus::Succeeded);

        // Immediate narration, then the delayed line, then done.
        let mut finished_frames = 0;
        for _ in 0..40 {
            let (finished, _) = stage.frame(&mut runner, false);
            if finished {
                finished_frames += 1;
            }
        }
        assert_eq!(finished_frames, 1);
        assert!(!runner.is_running());
        assert_eq!(runner.remaining(), 0);
        assert_eq!(stage.printer.default_behaviour(), PrintBehaviour::Delay(2.0));
        assert_eq!(stage.printer.session().behaviour(), PrintBehaviour::Delay(0.1));
        assert!(!stage.printer.is_printing());
    }

    #[test]
    fn test_immediate_print_waits_one_frame() {
        let mut stage = Stage::new();
        let mut runner = DialogueRunner::new(vec![
            DialogueTask::PrintImmediate { speaker: -2, text: "One".to_string() },
            DialogueTask::PrintImmediate { speaker: -2, text: "Two".to_string() },
        ]);

        stage.frame(&mut runner, false);
        assert_eq!(stage.display.text, "One");
        stage.frame(&mut runner, false);
        assert_eq!(stage.display.text, "Two");
        let (finished, status) = stage.frame(&mut runner, false);
        assert!(finished);
        assert_eq!(status, SessionStatus::Finished);
        assert_eq!(stage.display.text, "Two");
    }

    #[test]
    fn test_script_waits_for_print_started_elsewhere() {
        let mut stage = Stage::new();
        stage.printer.start_print(
            SpeakerRef::Nobody,
            "Other",
            PrintBehaviour::Immediate,
            &mut stage.display,
        );
        let mut runner = DialogueRunner::new(vec![DialogueTask::PrintAwait {
            speaker: -2,
            text: "Script line".to_string(),
        }]);

        // The running print completes this frame; the script line stays queued.
        let (finished, status) = stage.frame(&mut runner, false);
        assert!(!finished);
        assert_eq!(status, SessionStatus::Succeeded);
        assert_eq!(runner.remaining(), 1);
        assert_eq!(stage.display.text, "Other");

        let (finished, _) = stage.frame(&mut runner, false);
        assert!(!finished);
        assert_eq!(runner.remaining(), 0);
        assert_eq!(stage.display.text, "Script line");
        assert_eq!(stage.printer.session().text(), "Script line");
        assert!(runner.is_running());
    }

    #[test]
    fn test_print_delay_sentinels() {
        let mut stage = Stage::new();
        let mut runner = DialogueRunner::new(vec![DialogueTask::PrintDelay {
            speaker: -2,
            text: "Wait".to_string(),
            delay: Some(-1.0),
        }]);
        stage.frame(&mut runner, false);
        assert_eq!(stage.printer.session().behaviour(), PrintBehaviour::Await);

        let mut stage = Stage::new();
        let mut runner = DialogueRunner::new(vec![DialogueTask::PrintDelay {
            speaker: -2,
            text: "Hold".to_string(),
            delay: None,
        }]);
        stage.frame(&mut runner, true);
        assert_eq!(stage.printer.session().behaviour(), PrintBehaviour::Delay(2.0));
        assert!(stage.printer.is_printing());
    }

    #[test]
    fn test_empty_and_idle_runners() {
        let mut stage = Stage::new();

        let mut idle = DialogueRunner::default();
        assert!(!idle.is_running());
        assert!(!stage.frame(&mut idle, false).0);

        let mut empty = DialogueRunner::new(Vec::new());
        assert!(stage.frame(&mut empty, false).0);
        assert!(!stage.frame(&mut empty, false).0);

        empty.push(DialogueTask::SetDefaultPrintBehaviour {
            behaviour: "immediate".to_string(),
        });
        assert!(empty.is_running());
        assert!(stage.frame(&mut empty, false).0);
        assert_eq!(stage.printer.default_behaviour(), PrintBehaviour::Immediate);
    }
}
