//! Easter-egg command interpreter
//!
//! Parses one line per submission, dispatches it through the fixed command
//! table and keeps the scrollback of command/response pairs.

pub mod commands;
pub mod content;
pub mod output;

pub use commands::{CommandOutcome, CommandSpec, Effect, Invocation, COMMANDS};
pub use output::{Block, Output};

use crate::preferences::{PreferenceStore, Preferences};
use tracing::debug;

/// One command/response pair in the scrollback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollbackEntry {
    /// Trimmed input line, empty for the welcome entry
    pub input: String,
    pub output: Output,
}

/// A tokenized input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// Lowercased command name
    pub name: String,
    pub args: Vec<&'a str>,
}

/// Split a line into a lowercased command name and its arguments.
/// Returns None for blank input.
pub fn parse_line(line: &str) -> Option<ParsedLine<'_>> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?.to_lowercase();
    Some(ParsedLine {
        name,
        args: tokens.collect(),
    })
}

/// Run a line against the command table without touching any state
pub fn execute(line: &str, preferences: Preferences) -> Option<CommandOutcome> {
    let parsed = parse_line(line)?;
    let outcome = match commands::lookup(&parsed.name) {
        Some(spec) => (spec.handler)(&Invocation {
            args: &parsed.args,
            preferences,
        }),
        None => CommandOutcome::output(commands::not_found(&parsed.name)),
    };
    Some(outcome)
}

/// Registered command names starting with `partial` (case-insensitive)
pub fn completions(partial: &str) -> Vec<&'static str> {
    let partial = partial.trim().to_lowercase();
    COMMANDS
        .iter()
        .map(|spec| spec.name)
        .filter(|name| name.starts_with(&partial))
        .collect()
}

/// The single command name completing `partial`, if exactly one matches
pub fn complete(partial: &str) -> Option<&'static str> {
    if partial.trim().is_empty() {
        return None;
    }
    match completions(partial).as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

/// Result of a non-empty submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub command: String,
    /// The command asked the host to close the overlay
    pub close_requested: bool,
    /// The scrollback was emptied
    pub cleared: bool,
}

/// Interpreter state: the scrollback of the current overlay session
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    scrollback: Vec<ScrollbackEntry>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session seeded with the welcome banner
    pub fn with_welcome(title: &str) -> Self {
        Self {
            scrollback: vec![ScrollbackEntry {
                input: String::new(),
                output: content::welcome(title),
            }],
        }
    }

    pub fn scrollback(&self) -> &[ScrollbackEntry] {
        &self.scrollback
    }

    /// Parse and run one line, applying its effects.
    /// Blank input is ignored and returns None.
    pub fn submit(&mut self, line: &str, preferences: &mut PreferenceStore) -> Option<Submission> {
        let command = line.trim();
        let outcome = execute(command, preferences.get())?;
        debug!("Executed {:?} with effects {:?}", command, outcome.effects);

        let mut submission = Submission {
            command: command.to_string(),
            close_requested: false,
            cleared: false,
        };

        for effect in &outcome.effects {
            match effect {
                Effect::SetDisplayMode(mode) => preferences.set_display_mode(*mode),
                Effect::CloseOverlay => submission.close_requested = true,
                Effect::ClearScrollback => {
                    self.scrollback.clear();
                    submission.cleared = true;
                }
            }
        }

        if !submission.cleared {
            self.scrollback.push(ScrollbackEntry {
                input: submission.command.clone(),
                output: outcome.output,
            });
        }

        Some(submission)
    }
}
