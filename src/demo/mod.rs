//! Scripted CI/CD terminal replay
//!
//! Replays a fixed deployment transcript line by line with per-line delays.
//! The replay accepts no input besides play, pause and reset.

use crate::sound::SoundKind;
use std::time::Duration;
use tracing::debug;

/// Visual category of a transcript line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Command,
    Output,
    Error,
    Info,
    Success,
}

impl LineKind {
    /// Cue played when a line of this kind appears
    pub fn sound(&self) -> Option<SoundKind> {
        match self {
            LineKind::Command => Some(SoundKind::Typing),
            LineKind::Success => Some(SoundKind::Success),
            LineKind::Error => Some(SoundKind::Error),
            LineKind::Output | LineKind::Info => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub content: &'static str,
    pub kind: LineKind,
    /// Pause before the line appears
    pub delay: Duration,
}

/// Longest pause a slowed-down replay will wait before one line
pub const MAX_LINE_DELAY: Duration = Duration::from_secs(30);

/// `delay` scaled by `1 / speed`, capped at [`MAX_LINE_DELAY`]. Speeds that
/// are not finite and positive play at normal speed.
pub fn scaled_delay(delay: Duration, speed: f64) -> Duration {
    let speed = if speed.is_finite() && speed > 0.0 { speed } else { 1.0 };
    Duration::try_from_secs_f64(delay.as_secs_f64() / speed)
        .map_or(MAX_LINE_DELAY, |scaled| scaled.min(MAX_LINE_DELAY))
}

const fn line(content: &'static str, kind: LineKind, delay_ms: u64) -> TranscriptLine {
    TranscriptLine {
        content,
        kind,
        delay: Duration::from_millis(delay_ms),
    }
}

/// The deployment walkthrough, from `git push` to a healthy rollout
pub fn deployment_transcript() -> Vec<TranscriptLine> {
    use LineKind::*;

    vec![
        line("$ git push origin main", Command, 500),
        line("Enumerating objects: 16, done.", Output, 800),
        line("Counting objects: 100% (16/16), done.", Output, 400),
        line("Compressing objects: 100% (10/10), done.", Output, 600),
        line("Writing objects: 100% (10/10), 1.23 KiB | 1.23 MiB/s, done.", Output, 500),
        line("Total 10 (delta 6), reused 0 (delta 0), pack-reused 0", Output, 300),
        line("remote: 🚀 CI Build Started...", Info, 1000),
        line("remote: 📦 Installing dependencies...", Info, 1500),
        line("remote: ✅ Dependencies installed successfully", Success, 800),
        line("remote: 🔍 Running tests...", Info, 1200),
        line("remote: ✅ All tests passed successfully (128 tests)", Success, 1000),
        line("remote: 🔨 Building application...", Info, 1800),
        line("remote: ✅ Build successful", Success, 1000),
        line("remote: 🐳 Building Docker image...", Info, 1500),
        line("remote: ✅ Docker image built and pushed to registry", Success, 1200),
        line("remote: 🚢 Deploying to Kubernetes cluster...", Info, 2000),
        line("remote: 🔄 Updating deployment...", Info, 1000),
        line("remote: 🔄 Rolling update in progress...", Info, 1500),
        line("remote: ✅ Deployment successful", Success, 800),
        line("remote: 🔍 Running health checks...", Info, 1200),
        line("remote: ✅ All services are healthy", Success, 800),
        line(
            "remote: 🚀 Application deployed and available at https://app.example.com",
            Success,
            1000,
        ),
        line("$ ", Command, 500),
    ]
}

/// Play/pause/reset state over a transcript
#[derive(Debug, Clone)]
pub struct TranscriptPlayer {
    lines: Vec<TranscriptLine>,
    position: usize,
    playing: bool,
}

impl TranscriptPlayer {
    pub fn new(lines: Vec<TranscriptLine>) -> Self {
        Self {
            lines,
            position: 0,
            playing: false,
        }
    }

    pub fn deployment() -> Self {
        Self::new(deployment_transcript())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines revealed so far
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.lines.len()
    }

    pub fn visible_lines(&self) -> &[TranscriptLine] {
        &self.lines[..self.position]
    }

    /// Label of the play control
    pub fn play_label(&self) -> &'static str {
        if self.position == 0 {
            "Start"
        } else {
            "Resume"
        }
    }

    /// Start or resume; refused once every line has been shown
    pub fn start(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.playing = true;
        true
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn reset(&mut self) {
        self.playing = false;
        self.position = 0;
    }

    /// Delay before the next line, if one is pending
    pub fn next_delay(&self) -> Option<Duration> {
        self.lines.get(self.position).map(|line| line.delay)
    }

    /// Reveal the next line; playback stops after the last one
    pub fn advance(&mut self) -> Option<&TranscriptLine> {
        if !self.playing || self.is_finished() {
            return None;
        }
        self.position += 1;
        if self.is_finished() {
            self.playing = false;
        }
        self.lines.get(self.position - 1)
    }

    /// Replay from the current position, sleeping each line's
    /// [`scaled_delay`]. Returns the number of lines revealed.
    pub async fn replay<F>(&mut self, speed: f64, mut on_line: F) -> usize
    where
        F: FnMut(&TranscriptLine, usize, usize),
    {
        if !self.start() {
            return 0;
        }

        let total = self.len();
        let mut revealed = 0;
        while let Some(delay) = self.next_delay() {
            tokio::time::sleep(scaled_delay(delay, speed)).await;
            if self.advance().is_none() {
                break;
            }
            revealed += 1;
            let shown = self.position;
            debug!("Transcript line {}/{}", shown, total);
            on_line(&self.lines[shown - 1], shown, total);
        }
        revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short() -> TranscriptPlayer {
        TranscriptPlayer::new(vec![
            line("$ make", LineKind::Command, 5),
            line("ok", LineKind::Success, 5),
            line("$ ", LineKind::Command, 5),
        ])
    }

    #[test]
    fn test_deployment_transcript_shape() {
        let transcript = deployment_transcript();
        assert_eq!(transcript.len(), 23);
        assert_eq!(transcript[0].content, "$ git push origin main");
        assert_eq!(transcript.last().unwrap().kind, LineKind::Command);
    }

    #[test]
    fn test_advance_requires_playing() {
        let mut player = short();
        assert!(player.advance().is_none());
        assert_eq!(player.play_label(), "Start");

        player.start();
        assert_eq!(player.advance().unwrap().content, "$ make");
        player.pause();
        assert!(player.advance().is_none());
        assert_eq!(player.play_label(), "Resume");
    }

    #[test]
    fn test_playback_stops_at_end_and_reset_rewinds() {
        let mut player = short();
        player.start();
        while player.advance().is_some() {}

        assert!(player.is_finished());
        assert!(!player.is_playing());
        assert_eq!(player.visible_lines().len(), 3);
        assert!(!player.start());

        player.reset();
        assert_eq!(player.position(), 0);
        assert!(player.visible_lines().is_empty());
        assert!(player.start());
    }

    #[test]
    fn test_line_sounds() {
        assert_eq!(LineKind::Command.sound(), Some(SoundKind::Typing));
        assert_eq!(LineKind::Error.sound(), Some(SoundKind::Error));
        assert_eq!(LineKind::Output.sound(), None);
    }

    #[test]
    fn test_scaled_delay() {
        let delay = Duration::from_millis(500);
        assert_eq!(scaled_delay(delay, 2.0), Duration::from_millis(250));
        assert_eq!(scaled_delay(delay, 0.0), delay);
        assert_eq!(scaled_delay(delay, f64::NAN), delay);
        assert_eq!(scaled_delay(delay, 1e-300), MAX_LINE_DELAY);
        assert_eq!(scaled_delay(delay, 0.001), MAX_LINE_DELAY);
    }

    #[tokio::test]
    async fn test_replay_reveals_lines_in_order() {
        let mut player = short();
        let mut seen = Vec::new();
        let revealed = player
            .replay(50.0, |line, shown, total| {
                seen.push((line.content, shown, total));
            })
            .await;

        assert_eq!(revealed, 3);
        assert_eq!(seen, vec![("$ make", 1, 3), ("ok", 2, 3), ("$ ", 3, 3)]);
        assert_eq!(player.replay(50.0, |_, _, _| {}).await, 0);
    }
}
