//! The hidden command overlay
//!
//! States: Closed (initial), Open and OpenFullscreen. The trigger word opens
//! it; `exit`, the close action or the cancel chord close it. Each opening
//! starts a fresh interpreter session.

pub mod trigger;

pub use trigger::{KeyContext, Keystroke, TriggerWatcher};

use crate::interpreter::{self, Interpreter, ScrollbackEntry, Submission};
use crate::preferences::PreferenceStore;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Closed,
    Open,
    OpenFullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    TriggerMatched,
    ToggleFullscreen,
    /// The `exit` command
    Exit,
    /// Close button
    Close,
    /// Cancel key-chord (Ctrl+C)
    Cancel,
}

impl OverlayState {
    /// Next state; events with no transition leave the state unchanged
    pub fn on(self, event: OverlayEvent) -> OverlayState {
        use OverlayEvent::*;
        use OverlayState::*;

        match (self, event) {
            (Closed, TriggerMatched) => Open,
            (Open, ToggleFullscreen) => OpenFullscreen,
            (OpenFullscreen, ToggleFullscreen) => Open,
            (Open | OpenFullscreen, Exit | Close | Cancel) => Closed,
            (state, _) => state,
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, OverlayState::Closed)
    }
}

/// Overlay session: state machine, trigger watcher, input line and interpreter
#[derive(Debug)]
pub struct Overlay {
    state: OverlayState,
    watcher: TriggerWatcher,
    interpreter: Interpreter,
    input: String,
    title: String,
}

impl Overlay {
    pub fn new(trigger_word: &str, title: impl Into<String>) -> Self {
        Self {
            state: OverlayState::Closed,
            watcher: TriggerWatcher::new(trigger_word),
            interpreter: Interpreter::new(),
            input: String::new(),
            title: title.into(),
        }
    }

    /// The lowercased word that opens the overlay
    pub fn trigger_word(&self) -> String {
        self.watcher.word()
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.state == OverlayState::OpenFullscreen
    }

    pub fn scrollback(&self) -> &[ScrollbackEntry] {
        self.interpreter.scrollback()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Feed an application-wide keystroke; true if it opened the overlay
    pub fn observe_key(&mut self, key: Keystroke, input_focused: bool) -> bool {
        let context = KeyContext {
            overlay_open: self.is_open(),
            input_focused,
        };
        if !self.watcher.observe(key, context) {
            return false;
        }
        self.apply(OverlayEvent::TriggerMatched)
    }

    /// Apply an event; true if the state changed
    pub fn apply(&mut self, event: OverlayEvent) -> bool {
        let next = self.state.on(event);
        if next == self.state {
            return false;
        }

        if self.state == OverlayState::Closed {
            info!("Command overlay opened");
            self.interpreter = Interpreter::with_welcome(&self.title);
            self.input.clear();
        } else if next == OverlayState::Closed {
            info!("Command overlay closed ({:?})", event);
            self.watcher.reset();
        }
        debug!("Overlay {:?} -> {:?}", self.state, next);
        self.state = next;
        true
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Replace the input with its unique command completion; true if replaced
    pub fn complete_input(&mut self) -> bool {
        match interpreter::complete(&self.input) {
            Some(name) => {
                self.input = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Submit the current input line. Blank input changes nothing.
    pub fn submit(&mut self, preferences: &mut PreferenceStore) -> Option<Submission> {
        if !self.is_open() {
            return None;
        }

        let submission = self.interpreter.submit(&self.input, preferences)?;
        self.input.clear();
        if submission.close_requested {
            self.apply(OverlayEvent::Exit);
        }
        Some(submission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::DisplayMode;
    use crate::storage::MemoryStore;

    fn overlay() -> Overlay {
        Overlay::new("terminal", "JDTerminal v1.0.0")
    }

    fn type_word(overlay: &mut Overlay, word: &str) -> usize {
        word.chars()
            .filter(|c| overlay.observe_key(Keystroke::Char(*c), false))
            .count()
    }

    fn submit(overlay: &mut Overlay, prefs: &mut PreferenceStore, line: &str) -> Option<Submission> {
        overlay.set_input(line);
        overlay.submit(prefs)
    }

    #[test]
    fn test_state_machine_transitions() {
        use OverlayEvent::*;
        use OverlayState::*;

        assert_eq!(Closed.on(TriggerMatched), Open);
        assert_eq!(Open.on(ToggleFullscreen), OpenFullscreen);
        assert_eq!(OpenFullscreen.on(ToggleFullscreen), Open);
        for event in [Exit, Close, Cancel] {
            assert_eq!(Open.on(event), Closed);
            assert_eq!(OpenFullscreen.on(event), Closed);
            assert_eq!(Closed.on(event), Closed);
        }
        assert_eq!(Closed.on(ToggleFullscreen), Closed);
        assert_eq!(Open.on(TriggerMatched), Open);
    }

    #[test]
    fn test_trigger_opens_once_with_welcome() {
        let mut overlay = overlay();
        assert_eq!(type_word(&mut overlay, "terminal"), 1);
        assert_eq!(overlay.state(), OverlayState::Open);
        assert_eq!(overlay.scrollback().len(), 1);
        assert!(overlay.scrollback()[0].input.is_empty());

        // Typing it again while open does nothing
        assert_eq!(type_word(&mut overlay, "terminal"), 0);
    }

    #[test]
    fn test_trigger_word_is_lowercased() {
        assert_eq!(Overlay::new("TeRminal", "t").trigger_word(), "terminal");
        assert_eq!(overlay().trigger_word(), "terminal");
    }

    #[test]
    fn test_trigger_ignored_when_input_focused() {
        let mut overlay = overlay();
        let opened = "terminal"
            .chars()
            .any(|c| overlay.observe_key(Keystroke::Char(c), true));
        assert!(!opened);
        assert!(!overlay.is_open());
    }

    #[test]
    fn test_exit_command_closes_and_reopen_discards_scrollback() {
        let mut prefs = PreferenceStore::load(Box::new(MemoryStore::new()));
        let mut overlay = overlay();
        type_word(&mut overlay, "terminal");
        overlay.apply(OverlayEvent::ToggleFullscreen);

        submit(&mut overlay, &mut prefs, "about");
        assert_eq!(overlay.scrollback().len(), 2);

        let submission = submit(&mut overlay, &mut prefs, "exit").unwrap();
        assert!(submission.close_requested);
        assert_eq!(overlay.state(), OverlayState::Closed);

        type_word(&mut overlay, "terminal");
        assert_eq!(overlay.state(), OverlayState::Open);
        assert_eq!(overlay.scrollback().len(), 1);
    }

    #[test]
    fn test_blank_submit_changes_nothing() {
        let mut prefs = PreferenceStore::load(Box::new(MemoryStore::new()));
        let mut overlay = overlay();
        type_word(&mut overlay, "terminal");

        assert!(submit(&mut overlay, &mut prefs, "   ").is_none());
        assert_eq!(overlay.state(), OverlayState::Open);
        assert_eq!(overlay.scrollback().len(), 1);
        assert_eq!(prefs.get().mode, DisplayMode::Dark);
    }

    #[test]
    fn test_submit_while_closed_is_ignored() {
        let mut prefs = PreferenceStore::load(Box::new(MemoryStore::new()));
        let mut overlay = overlay();
        assert!(submit(&mut overlay, &mut prefs, "theme light").is_none());
        assert_eq!(prefs.get().mode, DisplayMode::Dark);
    }

    #[test]
    fn test_cancel_chord_closes() {
        let mut overlay = overlay();
        type_word(&mut overlay, "terminal");
        assert!(overlay.apply(OverlayEvent::Cancel));
        assert!(!overlay.is_open());
        assert!(!overlay.apply(OverlayEvent::Cancel));
    }

    #[test]
    fn test_completion_replaces_unique_prefix_only() {
        let mut overlay = overlay();
        overlay.set_input("sk");
        assert!(overlay.complete_input());
        assert_eq!(overlay.input(), "skills");

        overlay.set_input("e");
        assert!(!overlay.complete_input());
        assert_eq!(overlay.input(), "e");

        overlay.set_input("xyz");
        assert!(!overlay.complete_input());
        assert_eq!(overlay.input(), "xyz");
    }
}
