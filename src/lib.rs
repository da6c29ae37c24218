//! portfolio-shell - A portfolio landing screen with a hidden command terminal
//!
//! Typing the trigger word on the landing screen opens a command overlay
//! backed by a small table-driven interpreter.
//!
//! ## Key Features
//!
//! - **Preferences**: Persisted display mode and visual style with change observers
//! - **Command Interpreter**: Fixed command table with Tab completion and a scrollback
//! - **Trigger Overlay**: Keystroke watcher and the closed/open/fullscreen state machine
//! - **Sound Cues**: Opt-in, fire-and-forget interaction sounds
//! - **Transcript Demo**: Timed replay of a CI/CD pipeline run

pub mod config;
pub mod demo;
pub mod interpreter;
pub mod overlay;
pub mod preferences;
pub mod sound;
pub mod storage;
pub mod tui;

pub use config::{Config, ConfigBuilder, ConfigError};
pub use demo::{TranscriptLine, TranscriptPlayer};
pub use interpreter::{CommandOutcome, Interpreter, Output, ScrollbackEntry};
pub use overlay::{Overlay, OverlayEvent, OverlayState, TriggerWatcher};
pub use preferences::{DisplayMode, PreferenceStore, Preferences, VisualStyle};
pub use sound::{SoundKind, SoundPlayer, SoundPreferences};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
