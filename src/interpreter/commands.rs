//! Command table and handlers
//!
//! Every handler is a pure function of its invocation. Side effects on the
//! host (preferences, overlay, scrollback) are returned as [`Effect`]s and
//! applied by the caller.

use super::content;
use super::output::Output;
use crate::preferences::{DisplayMode, Preferences};

/// Arguments and read-only state passed to a handler
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    pub args: &'a [&'a str],
    pub preferences: Preferences,
}

/// Host-side change requested by a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    SetDisplayMode(DisplayMode),
    CloseOverlay,
    ClearScrollback,
}

/// What a handler produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub output: Output,
    pub effects: Vec<Effect>,
}

impl CommandOutcome {
    pub fn output(output: Output) -> Self {
        Self {
            output,
            effects: Vec::new(),
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

pub type Handler = fn(&Invocation<'_>) -> CommandOutcome;

/// A registered command
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: Handler,
}

/// Every command the interpreter knows, in help order
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "help",
        description: "Show the list of available commands.",
        usage: "help",
        handler: help,
    },
    CommandSpec {
        name: "about",
        description: "Show information about me.",
        usage: "about",
        handler: about,
    },
    CommandSpec {
        name: "projects",
        description: "List my projects.",
        usage: "projects",
        handler: projects,
    },
    CommandSpec {
        name: "contact",
        description: "Show contact information.",
        usage: "contact",
        handler: contact,
    },
    CommandSpec {
        name: "clear",
        description: "Clear the terminal screen.",
        usage: "clear",
        handler: clear,
    },
    CommandSpec {
        name: "echo",
        description: "Print the given text.",
        usage: "echo [text]",
        handler: echo,
    },
    CommandSpec {
        name: "date",
        description: "Show the current date and time.",
        usage: "date",
        handler: date,
    },
    CommandSpec {
        name: "skills",
        description: "Show my skills.",
        usage: "skills",
        handler: skills,
    },
    CommandSpec {
        name: "theme",
        description: "Change the terminal theme (light, dark).",
        usage: "theme [light|dark]",
        handler: theme,
    },
    CommandSpec {
        name: "exit",
        description: "Close the terminal.",
        usage: "exit",
        handler: exit,
    },
];

pub const CLOSING_MESSAGE: &str = "Closing terminal...";

/// Case-insensitive lookup
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
}

/// `Usage: <usage>` for a registered command
pub fn usage_line(name: &str) -> String {
    let usage = lookup(name).map_or(name, |spec| spec.usage);
    format!("Usage: {}", usage)
}

/// Diagnostic for a name that is not in the table
pub fn not_found(name: &str) -> Output {
    Output::text(format!(
        "Command not found: {}. Type 'help' to see available commands.",
        name
    ))
}

fn help(_: &Invocation<'_>) -> CommandOutcome {
    let output = COMMANDS.iter().fold(
        Output::new().with_heading("Available commands:"),
        |output, spec| output.with_entry(spec.name, spec.description),
    );
    CommandOutcome::output(output)
}

fn about(_: &Invocation<'_>) -> CommandOutcome {
    CommandOutcome::output(content::about())
}

fn projects(_: &Invocation<'_>) -> CommandOutcome {
    CommandOutcome::output(content::projects())
}

fn contact(_: &Invocation<'_>) -> CommandOutcome {
    CommandOutcome::output(content::contact())
}

fn skills(_: &Invocation<'_>) -> CommandOutcome {
    CommandOutcome::output(content::skills())
}

fn clear(_: &Invocation<'_>) -> CommandOutcome {
    CommandOutcome::output(Output::new()).with_effect(Effect::ClearScrollback)
}

fn echo(invocation: &Invocation<'_>) -> CommandOutcome {
    CommandOutcome::output(Output::text(invocation.args.join(" ")))
}

fn date(_: &Invocation<'_>) -> CommandOutcome {
    let now = chrono::Local::now();
    CommandOutcome::output(Output::text(now.format("%c").to_string()))
}

fn theme(invocation: &Invocation<'_>) -> CommandOutcome {
    let mode = match invocation.args.first().copied() {
        Some("light") => DisplayMode::Light,
        Some("dark") => DisplayMode::Dark,
        _ => return CommandOutcome::output(Output::text(usage_line("theme"))),
    };

    CommandOutcome::output(Output::text(format!("Theme changed to {}.", mode)))
        .with_effect(Effect::SetDisplayMode(mode))
}

fn exit(_: &Invocation<'_>) -> CommandOutcome {
    CommandOutcome::output(Output::text(CLOSING_MESSAGE)).with_effect(Effect::CloseOverlay)
}
