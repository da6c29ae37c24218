//! Terminal rendering of scrollback, landing screen and transcript lines

use crossterm::style::{Color, Stylize};
use crossterm::{cursor, execute, terminal};
use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;
use termimad::MadSkin;

use super::theme::Theme;
use crate::demo::{LineKind, TranscriptLine};
use crate::interpreter::{Block, Output, ScrollbackEntry};
use crate::preferences::Preferences;

/// Terminal renderer themed from the current preferences
pub struct TerminalRenderer {
    preferences: Rc<Cell<Preferences>>,
}

impl TerminalRenderer {
    /// The cell is kept current by a preference-store observer
    pub fn new(preferences: Rc<Cell<Preferences>>) -> Self {
        Self { preferences }
    }

    pub fn theme(&self) -> Theme {
        Theme::for_preferences(&self.preferences.get())
    }

    fn build_skin(theme: &Theme) -> MadSkin {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(to_termimad_color(theme.title));
        skin.paragraph.set_fg(to_termimad_color(theme.text));
        skin.bold.set_fg(to_termimad_color(theme.accent));
        skin.italic.set_fg(to_termimad_color(theme.heading));
        skin
    }

    /// Render the landing screen hero
    pub fn render_landing(&self, markdown: &str) {
        let theme = self.theme();
        let skin = Self::build_skin(&theme);
        println!();
        skin.print_text(markdown);
        println!();
        println!("  {}", "Press Esc to leave.".with(theme.dim));
        println!();
    }

    /// Render the overlay header bar
    pub fn render_header(&self, title: &str, fullscreen: bool) {
        let theme = self.theme();
        let mode = if fullscreen { "fullscreen" } else { "window" };
        println!(
            "{} {}",
            format!("  {} ", title).with(theme.title),
            format!("[{}; Ctrl+F resize, Ctrl+C close, Tab complete]", mode).with(theme.dim),
        );
        println!();
    }

    /// Render a full scrollback
    pub fn render_scrollback(&self, entries: &[ScrollbackEntry], prompt: &str) {
        for entry in entries {
            self.render_entry(entry, prompt);
        }
    }

    /// Render one command/response pair
    pub fn render_entry(&self, entry: &ScrollbackEntry, prompt: &str) {
        let theme = self.theme();
        if !entry.input.is_empty() {
            println!(
                "{} {}",
                prompt.with(theme.prompt),
                entry.input.as_str().with(theme.text)
            );
        }
        self.render_output(&entry.output);
    }

    /// Render structured command output
    pub fn render_output(&self, output: &Output) {
        let theme = self.theme();
        for block in output.blocks() {
            match block {
                Block::Heading(text) => println!("{}", text.as_str().with(theme.heading)),
                Block::Text(text) => println!("{}", text.as_str().with(theme.text)),
                Block::Accent(text) => println!("{}", text.as_str().with(theme.accent).bold()),
                Block::Entry { label, detail } => println!(
                    "{} {}",
                    format!("{:<10}", label).with(theme.accent),
                    detail.as_str().with(theme.dim)
                ),
            }
        }
    }

    /// Redraw the prompt line with the current input
    pub fn render_input_line(&self, prompt: &str, input: &str) -> io::Result<()> {
        let theme = self.theme();
        let mut stdout = io::stdout();
        execute!(
            stdout,
            cursor::MoveToColumn(0),
            terminal::Clear(terminal::ClearType::CurrentLine)
        )?;
        write!(stdout, "{} {}", prompt.with(theme.prompt), input.with(theme.text))?;
        stdout.flush()
    }

    /// Render one replayed transcript line
    pub fn render_transcript_line(&self, line: &TranscriptLine) {
        let theme = self.theme();
        let color = match line.kind {
            LineKind::Command => Color::Blue,
            LineKind::Output => theme.text,
            LineKind::Error => theme.error,
            LineKind::Info => Color::Yellow,
            LineKind::Success => theme.success,
        };
        println!("{}", line.content.with(color));
    }

    /// Render the current preference record
    pub fn render_preferences(&self, preferences: &Preferences) {
        let theme = self.theme();
        println!(
            "  {} {}",
            "Display mode:".with(theme.dim),
            preferences.mode.as_str().with(theme.accent)
        );
        println!(
            "  {} {}",
            "Visual style:".with(theme.dim),
            preferences.style.as_str().with(theme.accent)
        );
        println!(
            "  {} {}",
            "Theme class:".with(theme.dim),
            preferences.theme_class().with(theme.accent)
        );
    }

    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(
            io::stdout(),
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )
    }

    /// Render a system message
    pub fn render_system(&self, msg: &str) {
        let theme = self.theme();
        println!("  {} {}", "\u{25b6}".with(theme.heading), msg.with(theme.heading));
    }

    /// Render a success message
    pub fn render_success(&self, msg: &str) {
        let theme = self.theme();
        println!("  {} {}", "\u{2713}".with(theme.success), msg.with(theme.success));
    }

    /// Render info text
    pub fn render_info(&self, msg: &str) {
        println!("  {}", msg.with(self.theme().dim));
    }
}

/// Convert crossterm Color to termimad color
fn to_termimad_color(color: Color) -> termimad::crossterm::style::Color {
    // termimad re-exports crossterm, so these types are compatible
    match color {
        Color::Black => termimad::crossterm::style::Color::Black,
        Color::DarkGrey => termimad::crossterm::style::Color::DarkGrey,
        Color::Red => termimad::crossterm::style::Color::Red,
        Color::Green => termimad::crossterm::style::Color::Green,
        Color::Yellow => termimad::crossterm::style::Color::Yellow,
        Color::Blue => termimad::crossterm::style::Color::Blue,
        Color::Magenta => termimad::crossterm::style::Color::Magenta,
        Color::Cyan => termimad::crossterm::style::Color::Cyan,
        Color::White => termimad::crossterm::style::Color::White,
        Color::Grey => termimad::crossterm::style::Color::Grey,
        Color::Rgb { r, g, b } => termimad::crossterm::style::Color::Rgb { r, g, b },
        _ => termimad::crossterm::style::Color::Reset,
    }
}
