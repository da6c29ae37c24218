//! Hidden trigger-word watcher

use std::collections::VecDeque;

/// A key press as seen by the watcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    Char(char),
    /// Any non-character key (arrows, modifiers, function keys)
    Other,
}

/// Where the keystroke happened
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyContext {
    pub overlay_open: bool,
    pub input_focused: bool,
}

/// Matches the last N keystrokes against a fixed word.
///
/// The window never holds more than `word.len()` keys; non-character keys
/// occupy a slot so they break a partial match.
#[derive(Debug, Clone)]
pub struct TriggerWatcher {
    word: Vec<char>,
    window: VecDeque<Option<char>>,
}

impl TriggerWatcher {
    pub fn new(word: &str) -> Self {
        let word: Vec<char> = word.to_lowercase().chars().collect();
        let window = VecDeque::with_capacity(word.len());
        Self { word, window }
    }

    pub fn word(&self) -> String {
        self.word.iter().collect()
    }

    /// Feed one keystroke; true when the trigger word was just completed
    pub fn observe(&mut self, key: Keystroke, context: KeyContext) -> bool {
        if context.overlay_open || context.input_focused || self.word.is_empty() {
            return false;
        }

        let slot = match key {
            Keystroke::Char(c) => c.to_lowercase().next(),
            Keystroke::Other => None,
        };
        if self.window.len() == self.word.len() {
            self.window.pop_front();
        }
        self.window.push_back(slot);

        let matched = self.window.len() == self.word.len()
            && self
                .window
                .iter()
                .zip(&self.word)
                .all(|(slot, expected)| *slot == Some(*expected));
        if matched {
            self.reset();
        }
        matched
    }

    pub fn reset(&mut self) {
        self.window.clear();
    }
}
