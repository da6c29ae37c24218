//! Sound preferences and fire-and-forget playback
//!
//! Playback never surfaces to the user: a failing sink is logged and the
//! interaction carries on. Nothing is retried.

use crate::config::SoundSettings;
use crate::storage::{load_record, save_record, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::{debug, error, warn};

/// Storage key for the sound record
pub const SOUND_KEY: &str = "portfolio-sound-preferences";

/// Default playback volume (0.0 - 1.0)
pub const DEFAULT_VOLUME: f32 = 0.3;

#[derive(Error, Debug)]
pub enum SoundError {
    #[error("Failed to start audio player {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Audio output unavailable: {0}")]
    Output(#[from] std::io::Error),

    #[error("Missing sound asset: {0}")]
    MissingAsset(PathBuf),
}

/// The interaction cues the interface can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundKind {
    Click,
    Hover,
    Success,
    Error,
    Ui,
    Typing,
}

impl SoundKind {
    pub fn name(&self) -> &'static str {
        match self {
            SoundKind::Click => "click",
            SoundKind::Hover => "hover",
            SoundKind::Success => "success",
            SoundKind::Error => "error",
            SoundKind::Ui => "ui",
            SoundKind::Typing => "typing",
        }
    }

    /// Asset file for this cue inside `asset_dir`
    pub fn asset_path(&self, asset_dir: &Path) -> PathBuf {
        asset_dir.join(format!("{}.mp3", self.name()))
    }
}

impl fmt::Display for SoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Persisted audio-enabled flag; sounds are off unless the user opts in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
struct SoundRecord {
    enabled: bool,
}

/// Holder of the persisted audio-enabled flag
pub struct SoundPreferences {
    record: SoundRecord,
    storage: Box<dyn KeyValueStore>,
}

impl SoundPreferences {
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        let record = load_record::<SoundRecord>(&*storage, SOUND_KEY).unwrap_or_default();
        Self { record, storage }
    }

    pub fn enabled(&self) -> bool {
        self.record.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.record.enabled = enabled;
        if let Err(e) = save_record(&mut *self.storage, SOUND_KEY, &self.record) {
            warn!("Failed to persist sound preferences: {}", e);
        }
    }

    pub fn toggle(&mut self) {
        self.set_enabled(!self.record.enabled);
    }
}

/// Something that can emit a sound cue
pub trait AudioSink {
    fn play(&mut self, kind: SoundKind, volume: f32) -> Result<(), SoundError>;
}

/// Discards every cue
#[derive(Debug, Default)]
pub struct SilentSink;

impl AudioSink for SilentSink {
    fn play(&mut self, _kind: SoundKind, _volume: f32) -> Result<(), SoundError> {
        Ok(())
    }
}

/// Rings the terminal bell for cues that deserve attention; muted at volume 0
#[derive(Debug, Default)]
pub struct BellSink;

impl AudioSink for BellSink {
    fn play(&mut self, kind: SoundKind, volume: f32) -> Result<(), SoundError> {
        if volume > 0.0 && matches!(kind, SoundKind::Success | SoundKind::Error) {
            let mut stderr = std::io::stderr();
            stderr.write_all(b"\x07")?;
            stderr.flush()?;
        }
        Ok(())
    }
}

/// Default player arguments: just the clip path
pub const DEFAULT_PLAYER_ARGS: &[&str] = &["{file}"];

/// Spawns an external player (e.g. `paplay`, `afplay`) on the cue's asset file
///
/// Arguments are templates. `{file}` is the clip path, `{volume}` the volume
/// as 0.0 - 1.0, `{percent}` as 0 - 100 and `{pa_volume}` on PulseAudio's
/// 0 - 65536 scale. The clip path is appended when no argument names `{file}`.
#[derive(Debug, Clone)]
pub struct CommandSink {
    program: String,
    args: Vec<String>,
    asset_dir: PathBuf,
}

impl CommandSink {
    pub fn new(program: impl Into<String>, asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: DEFAULT_PLAYER_ARGS.iter().map(|a| a.to_string()).collect(),
            asset_dir: asset_dir.into(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Expand the argument templates for one clip
    pub fn expand_args(&self, asset: &Path, volume: f32) -> Vec<String> {
        let volume = volume.clamp(0.0, 1.0);
        let file = asset.display().to_string();
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                arg.replace("{file}", &file)
                    .replace("{volume}", &format!("{:.2}", volume))
                    .replace("{percent}", &format!("{}", (volume * 100.0).round() as u32))
                    .replace("{pa_volume}", &format!("{}", (volume * 65536.0).round() as u32))
            })
            .collect();
        if !self.args.iter().any(|arg| arg.contains("{file}")) {
            args.push(file);
        }
        args
    }
}

impl AudioSink for CommandSink {
    fn play(&mut self, kind: SoundKind, volume: f32) -> Result<(), SoundError> {
        let asset = kind.asset_path(&self.asset_dir);
        if !asset.exists() {
            return Err(SoundError::MissingAsset(asset));
        }

        let mut child = Command::new(&self.program)
            .args(self.expand_args(&asset, volume))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SoundError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Reap the child off the UI thread
        std::thread::spawn(move || {
            if let Err(e) = child.wait() {
                debug!("Audio player did not exit cleanly: {}", e);
            }
        });
        Ok(())
    }
}

/// Plays cues when the user has sound enabled
pub struct SoundPlayer {
    preferences: SoundPreferences,
    sink: Box<dyn AudioSink>,
    volume: f32,
}

impl SoundPlayer {
    pub fn new(preferences: SoundPreferences, sink: Box<dyn AudioSink>) -> Self {
        Self {
            preferences,
            sink,
            volume: DEFAULT_VOLUME,
        }
    }

    /// Player for the configured sink: an external program, else the bell if allowed
    pub fn from_settings(settings: &SoundSettings, preferences: SoundPreferences) -> Self {
        let sink: Box<dyn AudioSink> = match &settings.player {
            Some(program) => Box::new(
                CommandSink::new(program.clone(), settings.asset_dir.clone())
                    .with_args(settings.player_args.clone()),
            ),
            None if settings.bell => Box::new(BellSink),
            None => Box::new(SilentSink),
        };
        Self::new(preferences, sink).with_volume(settings.volume)
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    pub fn preferences(&self) -> &SoundPreferences {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut SoundPreferences {
        &mut self.preferences
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Fire-and-forget; failures are logged and swallowed
    pub fn play(&mut self, kind: SoundKind) {
        if !self.preferences.enabled() {
            return;
        }
        if let Err(e) = self.sink.play(kind, self.volume) {
            error!("Error playing sound {}: {}", kind, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct RecordingSink {
        played: Rc<RefCell<Vec<SoundKind>>>,
        volumes: Rc<RefCell<Vec<f32>>>,
        fail: bool,
    }

    impl AudioSink for RecordingSink {
        fn play(&mut self, kind: SoundKind, volume: f32) -> Result<(), SoundError> {
            self.played.borrow_mut().push(kind);
            self.volumes.borrow_mut().push(volume);
            if self.fail {
                return Err(SoundError::MissingAsset(PathBuf::from("gone.mp3")));
            }
            Ok(())
        }
    }

    #[test]
    fn test_sound_is_off_by_default() {
        let prefs = SoundPreferences::load(Box::new(MemoryStore::new()));
        assert!(!prefs.enabled());
    }

    #[test]
    fn test_sound_flag_round_trip() {
        let memory = MemoryStore::new();
        let mut prefs = SoundPreferences::load(Box::new(memory.clone()));
        prefs.toggle();
        assert!(prefs.enabled());

        let reloaded = SoundPreferences::load(Box::new(memory.clone()));
        assert!(reloaded.enabled());
        assert!(memory.raw(SOUND_KEY).unwrap().contains("\"enabled\":true"));
    }

    #[test]
    fn test_disabled_player_never_reaches_sink() {
        let sink = RecordingSink::default();
        let prefs = SoundPreferences::load(Box::new(MemoryStore::new()));
        let mut player = SoundPlayer::new(prefs, Box::new(sink.clone()));

        player.play(SoundKind::Click);
        assert!(sink.played.borrow().is_empty());

        player.preferences_mut().set_enabled(true);
        player.play(SoundKind::Click);
        assert_eq!(*sink.played.borrow(), vec![SoundKind::Click]);
    }

    #[test]
    fn test_sink_failure_is_swallowed() {
        let sink = RecordingSink {
            fail: true,
            ..Default::default()
        };
        let mut prefs = SoundPreferences::load(Box::new(MemoryStore::new()));
        prefs.set_enabled(true);
        let mut player = SoundPlayer::new(prefs, Box::new(sink.clone()));

        player.play(SoundKind::Error);
        player.play(SoundKind::Error);
        assert_eq!(sink.played.borrow().len(), 2);
    }

    #[test]
    fn test_command_sink_reports_missing_asset() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CommandSink::new("paplay", dir.path());
        assert!(matches!(
            sink.play(SoundKind::Ui, DEFAULT_VOLUME),
            Err(SoundError::MissingAsset(_))
        ));
    }

    #[test]
    fn test_volume_reaches_sink() {
        let sink = RecordingSink::default();
        let mut prefs = SoundPreferences::load(Box::new(MemoryStore::new()));
        prefs.set_enabled(true);

        let mut player = SoundPlayer::new(prefs, Box::new(sink.clone()));
        player.play(SoundKind::Click);
        let mut player = player.with_volume(0.8);
        player.play(SoundKind::Click);
        let player = player.with_volume(4.0);

        assert_eq!(*sink.volumes.borrow(), vec![DEFAULT_VOLUME, 0.8]);
        assert_eq!(player.volume(), 1.0);
    }

    #[test]
    fn test_player_args_carry_volume() {
        let asset = Path::new("/sounds/click.mp3");

        let plain = CommandSink::new("mpv", "/sounds");
        assert_eq!(plain.expand_args(asset, 0.3), vec!["/sounds/click.mp3"]);

        let paplay = CommandSink::new("paplay", "/sounds")
            .with_args(vec!["--volume={pa_volume}".into(), "{file}".into()]);
        assert_eq!(
            paplay.expand_args(asset, 0.5),
            vec!["--volume=32768", "/sounds/click.mp3"]
        );

        let afplay = CommandSink::new("afplay", "/sounds")
            .with_args(vec!["-v".into(), "{volume}".into()]);
        assert_eq!(
            afplay.expand_args(asset, 0.3),
            vec!["-v", "0.30", "/sounds/click.mp3"]
        );

        let ffplay = CommandSink::new("ffplay", "/sounds")
            .with_args(vec!["-volume".into(), "{percent}".into(), "{file}".into()]);
        assert_eq!(ffplay.expand_args(asset, 0.3)[1], "30");
    }

    #[test]
    fn test_asset_paths() {
        let path = SoundKind::Typing.asset_path(Path::new("/sounds"));
        assert_eq!(path, PathBuf::from("/sounds/typing.mp3"));
    }
}
