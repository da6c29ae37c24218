//! Interactive terminal UI for portfolio-shell
//!
//! The landing screen watches ordinary keystrokes for the hidden trigger
//! word; once typed, the command overlay takes over the prompt until it is
//! closed again.

pub mod progress;
pub mod prompt;
pub mod renderer;
pub mod theme;

use crate::config::Config;
use crate::demo::TranscriptPlayer;
use crate::interpreter::content;
use crate::overlay::{Keystroke, Overlay, OverlayEvent};
use crate::preferences::{PreferenceStore, Preferences};
use crate::sound::{SoundKind, SoundPlayer};

use progress::ReplayProgress;
use prompt::{PromptAction, PromptHandler};
use renderer::TerminalRenderer;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{execute, terminal};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info};

/// Enables raw mode for its lifetime
struct RawMode;

impl RawMode {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Block until the next key press
fn read_key() -> Result<KeyEvent> {
    let _raw = RawMode::enable()?;
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Release {
                return Ok(key);
            }
        }
    }
}

/// Keep a renderer-side copy of the preferences current
fn observe_preferences(preferences: &mut PreferenceStore) -> Rc<Cell<Preferences>> {
    let current = Rc::new(Cell::new(preferences.get()));
    let observer = Rc::clone(&current);
    preferences.subscribe(move |prefs| observer.set(*prefs));
    current
}

/// Result of handling a key inside the overlay
enum KeyResult {
    Continue,
    Closed,
}

/// Landing screen plus the hidden command overlay
pub struct InteractiveShell {
    config: Config,
    preferences: PreferenceStore,
    sound: SoundPlayer,
    overlay: Overlay,
    renderer: TerminalRenderer,
    prompt_handler: PromptHandler,
    /// Whether the alternate screen is active for fullscreen mode
    alternate_screen: bool,
}

impl InteractiveShell {
    pub fn new(config: Config, mut preferences: PreferenceStore, sound: SoundPlayer) -> Self {
        let renderer = TerminalRenderer::new(observe_preferences(&mut preferences));
        let overlay = Overlay::new(&config.terminal.trigger_word, config.terminal.title.clone());

        Self {
            config,
            preferences,
            sound,
            overlay,
            renderer,
            prompt_handler: PromptHandler::new(),
            alternate_screen: false,
        }
    }

    /// Run the landing screen until the user leaves
    pub fn run(&mut self) -> Result<()> {
        self.renderer.render_landing(content::LANDING);
        debug!("Watching for trigger word {:?}", self.overlay.trigger_word());

        loop {
            let key = read_key()?;

            if self.overlay.is_open() {
                if let KeyResult::Closed = self.handle_overlay_key(key)? {
                    self.leave_overlay()?;
                }
                continue;
            }

            let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
                && key.code == KeyCode::Char('c');
            if key.code == KeyCode::Esc || ctrl_c {
                break;
            }

            let stroke = match key.code {
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Keystroke::Char(c)
                }
                _ => Keystroke::Other,
            };
            // The landing screen has no text input, so focus is never inside one
            if self.overlay.observe_key(stroke, false) {
                self.sound.play(SoundKind::Success);
                self.enter_overlay()?;
            }
        }

        if self.alternate_screen {
            execute!(std::io::stdout(), terminal::LeaveAlternateScreen)?;
        }
        info!("Interactive shell finished");
        Ok(())
    }

    fn enter_overlay(&mut self) -> Result<()> {
        self.prompt_handler.reset();
        println!();
        self.redraw_overlay()
    }

    fn redraw_overlay(&mut self) -> Result<()> {
        if self.overlay.is_fullscreen() {
            self.renderer.clear_screen()?;
        }
        self.renderer
            .render_header(&self.config.terminal.title, self.overlay.is_fullscreen());
        self.renderer
            .render_scrollback(self.overlay.scrollback(), &self.config.terminal.prompt);
        self.redraw_input()
    }

    fn redraw_input(&self) -> Result<()> {
        self.renderer
            .render_input_line(&self.config.terminal.prompt, self.overlay.input())?;
        Ok(())
    }

    fn leave_overlay(&mut self) -> Result<()> {
        if self.alternate_screen {
            execute!(std::io::stdout(), terminal::LeaveAlternateScreen)?;
            self.alternate_screen = false;
        }
        println!();
        self.renderer.render_info("Terminal closed.");
        Ok(())
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) -> Result<KeyResult> {
        match self.prompt_handler.action_for(key) {
            PromptAction::Insert(c) => {
                self.overlay.push_char(c);
                self.redraw_input()?;
            }
            PromptAction::Backspace => {
                self.overlay.pop_char();
                self.redraw_input()?;
            }
            PromptAction::Recall(line) => {
                self.overlay.set_input(line);
                self.redraw_input()?;
            }
            PromptAction::Complete => {
                if self.overlay.complete_input() {
                    self.sound.play(SoundKind::Ui);
                }
                self.redraw_input()?;
            }
            PromptAction::Submit => return self.submit(),
            PromptAction::Cancel => {
                self.overlay.apply(OverlayEvent::Cancel);
                self.sound.play(SoundKind::Ui);
                return Ok(KeyResult::Closed);
            }
            PromptAction::ToggleFullscreen => {
                self.overlay.apply(OverlayEvent::ToggleFullscreen);
                self.sound.play(SoundKind::Click);
                self.set_alternate_screen(self.overlay.is_fullscreen())?;
                self.redraw_overlay()?;
            }
            PromptAction::Ignore => {}
        }
        Ok(KeyResult::Continue)
    }

    fn submit(&mut self) -> Result<KeyResult> {
        let line = self.overlay.input().to_string();
        println!();

        let Some(submission) = self.overlay.submit(&mut self.preferences) else {
            self.redraw_input()?;
            return Ok(KeyResult::Continue);
        };
        self.prompt_handler.record(&line);
        self.sound.play(SoundKind::Click);
        debug!("Submitted {:?}", submission.command);

        if submission.cleared {
            self.renderer.clear_screen()?;
            self.renderer
                .render_header(&self.config.terminal.title, self.overlay.is_fullscreen());
        } else if let Some(entry) = self.overlay.scrollback().last() {
            self.renderer.render_output(&entry.output);
        }

        if submission.close_requested {
            return Ok(KeyResult::Closed);
        }
        self.redraw_input()?;
        Ok(KeyResult::Continue)
    }

    fn set_alternate_screen(&mut self, enabled: bool) -> Result<()> {
        if enabled == self.alternate_screen {
            return Ok(());
        }
        if enabled {
            execute!(std::io::stdout(), terminal::EnterAlternateScreen)?;
        } else {
            execute!(std::io::stdout(), terminal::LeaveAlternateScreen)?;
        }
        self.alternate_screen = enabled;
        Ok(())
    }
}

/// Replay the CI/CD transcript with a progress counter
pub async fn run_demo(
    preferences: &mut PreferenceStore,
    sound: &mut SoundPlayer,
    speed: f64,
) -> Result<()> {
    let renderer = TerminalRenderer::new(observe_preferences(preferences));
    let mut player = TranscriptPlayer::deployment();
    let progress = ReplayProgress::new(player.len());

    renderer.render_system("CI/CD Pipeline Demo");
    println!();

    let revealed = player
        .replay(speed, |line, shown, _total| {
            progress.print_above(|| renderer.render_transcript_line(line));
            progress.set_position(shown);
            if let Some(kind) = line.kind.sound() {
                sound.play(kind);
            }
        })
        .await;

    progress.finish("done");
    println!();
    renderer.render_success(&format!("Replayed {} of {} lines", revealed, player.len()));
    info!("Replayed {} transcript lines", revealed);
    Ok(())
}
