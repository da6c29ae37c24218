//! Display preferences shared by every themed surface
//!
//! The store is an explicit state holder: consumers receive it by reference and
//! register observers instead of reading ambient global state. Every mutation
//! is persisted before observers run.

use crate::storage::{load_record, save_record, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

/// Storage key for the preference record
pub const PREFERENCES_KEY: &str = "portfolio-theme";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreferenceError {
    #[error("Unknown display mode: {0} (expected light or dark)")]
    UnknownMode(String),

    #[error("Unknown visual style: {0} (expected default, cyberpunk, terminal or space)")]
    UnknownStyle(String),
}

/// Light/dark colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Light,
    #[default]
    Dark,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 2] = [DisplayMode::Light, DisplayMode::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Light => "light",
            DisplayMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Light => DisplayMode::Dark,
            DisplayMode::Dark => DisplayMode::Light,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(DisplayMode::Light),
            "dark" => Ok(DisplayMode::Dark),
            _ => Err(PreferenceError::UnknownMode(s.to_string())),
        }
    }
}

/// Cosmetic preset layered on top of the display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualStyle {
    #[default]
    Default,
    Cyberpunk,
    Terminal,
    Space,
}

impl VisualStyle {
    pub const ALL: [VisualStyle; 4] = [
        VisualStyle::Default,
        VisualStyle::Cyberpunk,
        VisualStyle::Terminal,
        VisualStyle::Space,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VisualStyle::Default => "default",
            VisualStyle::Cyberpunk => "cyberpunk",
            VisualStyle::Terminal => "terminal",
            VisualStyle::Space => "space",
        }
    }
}

impl fmt::Display for VisualStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisualStyle {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VisualStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PreferenceError::UnknownStyle(s.to_string()))
    }
}

/// The persisted preference record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub mode: DisplayMode,
    pub style: VisualStyle,
}

impl Preferences {
    /// Class name used by themed surfaces, e.g. `theme-space-dark`
    pub fn theme_class(&self) -> String {
        format!("theme-{}-{}", self.style, self.mode)
    }
}

/// Handle returned by [`PreferenceStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&Preferences)>;

/// Observable, persisted holder of the current [`Preferences`]
pub struct PreferenceStore {
    current: Preferences,
    storage: Box<dyn KeyValueStore>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl PreferenceStore {
    /// Load from storage, falling back to defaults when absent or malformed
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        let current = load_record::<Preferences>(&*storage, PREFERENCES_KEY)
            .unwrap_or_default();
        debug!("Loaded preferences: {}", current.theme_class());

        Self {
            current,
            storage,
            observers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn get(&self) -> Preferences {
        self.current
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.update(|prefs| prefs.mode = mode);
    }

    pub fn set_visual_style(&mut self, style: VisualStyle) {
        self.update(|prefs| prefs.style = style);
    }

    pub fn toggle_display_mode(&mut self) {
        self.update(|prefs| prefs.mode = prefs.mode.toggled());
    }

    /// Register an observer called after every mutation
    pub fn subscribe(&mut self, observer: impl FnMut(&Preferences) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() < before
    }

    fn update(&mut self, mutate: impl FnOnce(&mut Preferences)) {
        mutate(&mut self.current);

        if let Err(e) = save_record(&mut *self.storage, PREFERENCES_KEY, &self.current) {
            warn!("Failed to persist preferences: {}", e);
        }

        let snapshot = self.current;
        for (_, observer) in self.observers.iter_mut() {
            observer(&snapshot);
        }
    }
}

impl fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("current", &self.current)
            .field("observers", &self.observers.len())
            .finish()
    }
}
