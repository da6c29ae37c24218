//! Key handling for the overlay prompt, with input history

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the shell to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAction {
    Insert(char),
    Backspace,
    Submit,
    Complete,
    /// Ctrl+C
    Cancel,
    /// Ctrl+F
    ToggleFullscreen,
    /// Replace the input with a history entry (or empty when leaving history)
    Recall(String),
    Ignore,
}

/// Translates key events and remembers submitted lines
pub struct PromptHandler {
    history: Vec<String>,
    /// Index into history while browsing with Up/Down
    browsing: Option<usize>,
}

impl PromptHandler {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            browsing: None,
        }
    }

    pub fn action_for(&mut self, key: KeyEvent) -> PromptAction {
        if key.kind == KeyEventKind::Release {
            return PromptAction::Ignore;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => PromptAction::Cancel,
                KeyCode::Char('f') => PromptAction::ToggleFullscreen,
                _ => PromptAction::Ignore,
            };
        }

        match key.code {
            KeyCode::Char(c) => PromptAction::Insert(c),
            KeyCode::Backspace => PromptAction::Backspace,
            KeyCode::Enter => PromptAction::Submit,
            KeyCode::Tab => PromptAction::Complete,
            KeyCode::F(11) => PromptAction::ToggleFullscreen,
            KeyCode::Up => self.recall_older(),
            KeyCode::Down => self.recall_newer(),
            _ => PromptAction::Ignore,
        }
    }

    /// Remember a submitted line
    pub fn record(&mut self, line: &str) {
        let line = line.trim();
        self.browsing = None;
        if !line.is_empty() && self.history.last().map(String::as_str) != Some(line) {
            self.history.push(line.to_string());
        }
    }

    /// Forget history; each overlay session starts fresh
    pub fn reset(&mut self) {
        self.history.clear();
        self.browsing = None;
    }

    /// Get input history
    pub fn history(&self) -> &[String] {
        &self.history
    }

    fn recall_older(&mut self) -> PromptAction {
        if self.history.is_empty() {
            return PromptAction::Ignore;
        }
        let index = match self.browsing {
            Some(i) => i.saturating_sub(1),
            None => self.history.len() - 1,
        };
        self.browsing = Some(index);
        PromptAction::Recall(self.history[index].clone())
    }

    fn recall_newer(&mut self) -> PromptAction {
        match self.browsing {
            Some(i) if i + 1 < self.history.len() => {
                self.browsing = Some(i + 1);
                PromptAction::Recall(self.history[i + 1].clone())
            }
            Some(_) => {
                self.browsing = None;
                PromptAction::Recall(String::new())
            }
            None => PromptAction::Ignore,
        }
    }
}

impl Default for PromptHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_basic_keys() {
        let mut prompt = PromptHandler::new();
        assert_eq!(prompt.action_for(press(KeyCode::Char('x'))), PromptAction::Insert('x'));
        assert_eq!(prompt.action_for(press(KeyCode::Tab)), PromptAction::Complete);
        assert_eq!(prompt.action_for(press(KeyCode::Enter)), PromptAction::Submit);
        assert_eq!(
            prompt.action_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            PromptAction::Cancel
        );
        assert_eq!(
            prompt.action_for(KeyEvent::new(KeyCode::Char('f'), KeyModifiers::CONTROL)),
            PromptAction::ToggleFullscreen
        );
    }

    #[test]
    fn test_history_browsing() {
        let mut prompt = PromptHandler::new();
        assert_eq!(prompt.action_for(press(KeyCode::Up)), PromptAction::Ignore);

        prompt.record("help");
        prompt.record("about");
        prompt.record("about");
        prompt.record("  ");
        assert_eq!(prompt.history(), ["help", "about"]);

        assert_eq!(prompt.action_for(press(KeyCode::Up)), PromptAction::Recall("about".into()));
        assert_eq!(prompt.action_for(press(KeyCode::Up)), PromptAction::Recall("help".into()));
        assert_eq!(prompt.action_for(press(KeyCode::Up)), PromptAction::Recall("help".into()));
        assert_eq!(prompt.action_for(press(KeyCode::Down)), PromptAction::Recall("about".into()));
        assert_eq!(prompt.action_for(press(KeyCode::Down)), PromptAction::Recall(String::new()));
        assert_eq!(prompt.action_for(press(KeyCode::Down)), PromptAction::Ignore);
    }
}
