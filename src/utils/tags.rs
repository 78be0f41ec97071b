//! Dialogue tag processing.
//!
//! Raw dialogue lines may embed bracketed tags:
//!
//! - `[0.firstname]` is replaced by a name of participant 0. Supported fields
//!   are `name` (the speaker label), `fullname`, `firstname`, `lastname` and
//!   `nickname`.
//! - `[silent]`, `[happy]` or `[cmd=a;b]` are removed from the text and fire
//!   when the printer reveals the character where the tag stood.
//!
//! Tags are not nested. Unbalanced brackets are left as best-effort text.

use bevy::log::debug;
use std::collections::BTreeMap;

use crate::components::participant::Participant;

const TAG_START: char = '[';
const TAG_END: char = ']';

/// A command extracted from an on-print tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnPrintCommand {
    pub name: String,
    pub params: Vec<String>,
}

impl OnPrintCommand {
    /// Parses `name` or `name=param1;param2`.
    pub fn parse(content: &str) -> Self {
        match content.split_once('=') {
            Some((name, params)) => Self {
                name: name.to_string(),
                params: params.split(';').map(str::to_string).collect(),
            },
            None => Self {
                name: content.to_string(),
                params: Vec::new(),
            },
        }
    }
}

/// On-print commands keyed by the character offset at which they fire.
/// Commands sharing an offset keep their order in the source line.
pub type CommandMap = BTreeMap<usize, Vec<OnPrintCommand>>;

/// A dialogue line with its tags resolved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessedText {
    pub text: String,
    pub commands: CommandMap,
}

/// Rewrites name tags and extracts on-print commands from `raw`.
///
/// The line is scanned right to left. Command offsets are first recorded as
/// the number of characters following the tag, which edits further left
/// cannot change, and are converted to offsets into the final string once
/// every tag has been handled. Offsets count `char`s.
pub fn process_tags(raw: &str, participants: &[Participant]) -> ProcessedText {
    let mut chars: Vec<char> = raw.chars().collect();
    let mut found: Vec<(usize, OnPrintCommand)> = Vec::new();
    let mut tag_end: Option<usize> = None;

    let mut i = chars.len();
    while i > 0 {
        i -= 1;
        match (chars[i], tag_end) {
            (TAG_END, None) => tag_end = Some(i),
            (TAG_START, Some(end)) => {
                let content: String = chars[i + 1..end].iter().collect();
                let replacement: Vec<char> = if content.starts_with(|c: char| c.is_ascii_digit()) {
                    participant_name(&content, participants).chars().collect()
                } else {
                    found.push((chars.len() - end - 1, OnPrintCommand::parse(&content)));
                    Vec::new()
                };
                chars.splice(i..=end, replacement);
                tag_end = None;
            }
            _ => {}
        }
    }

    let len = chars.len();
    let mut commands = CommandMap::new();
    // `found` runs right to left.
    for (trailing, command) in found.into_iter().rev() {
        commands.entry(len - trailing).or_default().push(command);
    }

    ProcessedText {
        text: chars.into_iter().collect(),
        commands,
    }
}

/// Resolves `<index>.<field>` against the participant list.
/// Unknown fields and out-of-range indices resolve to an empty string.
fn participant_name(content: &str, participants: &[Participant]) -> String {
    // Segments after the field are ignored: `[0.name.x]` reads as `[0.name]`.
    let mut segments = content.split('.');
    let index = segments.next().unwrap_or_default();
    let field = segments.next().unwrap_or_default();
    let Some(participant) = index.parse::<usize>().ok().and_then(|i| participants.get(i)) else {
        debug!("Name tag [{}] refers to a missing participant", content);
        return String::new();
    };

    let character = participant.character();
    match field.to_lowercase().as_str() {
        "name" => character.shortname(),
        "fullname" => character.fullname(),
        "firstname" => character.firstname().to_string(),
        "lastname" => character.lastname().to_string(),
        "nickname" => character.nickname().to_string(),
        _ => {
            debug!("Name tag [{}] has an unknown field", content);
            String::new()
        }
    }
}
