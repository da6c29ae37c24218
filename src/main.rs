//! portfolio-shell CLI - Portfolio landing screen with a hidden command terminal

use anyhow::Result;
use clap::{Parser, Subcommand};
use portfolio_shell::{
    config::Config,
    interpreter::Interpreter,
    preferences::{DisplayMode, PreferenceStore, VisualStyle},
    sound::{SoundPlayer, SoundPreferences},
    storage::FileStore,
    tui::{self, renderer::TerminalRenderer, InteractiveShell},
};
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "portfolio-shell")]
#[command(about = "Portfolio landing screen with a hidden command terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Directory for persisted preferences (overrides config and env)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the landing screen; type the trigger word to open the terminal
    Shell,

    /// Run a single terminal command and print its output
    Run {
        /// Command line, e.g. `theme light`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        line: Vec<String>,
    },

    /// Inspect or change theme preferences
    #[command(subcommand)]
    Prefs(PrefsCommands),

    /// Inspect or change sound preferences
    #[command(subcommand)]
    Sound(SoundCommands),

    /// Replay the CI/CD pipeline transcript
    Demo {
        /// Playback speed multiplier
        #[arg(short, long)]
        speed: Option<f64>,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum PrefsCommands {
    /// Show the stored preferences
    Show,

    /// Set the display mode (light, dark)
    Mode { mode: DisplayMode },

    /// Set the visual style (default, cyberpunk, terminal, space)
    Style { style: VisualStyle },

    /// Flip between light and dark
    Toggle,
}

#[derive(Subcommand)]
enum SoundCommands {
    /// Show whether sound is enabled
    Status,

    /// Enable sound cues
    On,

    /// Disable sound cues
    Off,

    /// Flip the sound setting
    Toggle,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Initialize configuration file with defaults
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let command = match cli.command.unwrap_or(Commands::Shell) {
        Commands::Config(cmd) => return run_config_command(cmd),
        other => other,
    };

    let mut config = Config::load()?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = Some(dir);
    }
    if let Commands::Demo { speed: Some(speed) } = command {
        config.demo.speed = speed;
    }
    config.validate()?;
    debug!("Using data directory {}", config.data_dir().display());

    let store = FileStore::new(config.data_dir());
    let mut preferences = PreferenceStore::load(Box::new(store.clone()));
    let mut sound = SoundPlayer::from_settings(&config.sound, SoundPreferences::load(Box::new(store)));

    match command {
        Commands::Shell => {
            let mut shell = InteractiveShell::new(config, preferences, sound);
            shell.run()?;
        }
        Commands::Run { line } => {
            run_line(&line.join(" "), preferences);
        }
        Commands::Prefs(cmd) => {
            run_prefs_command(cmd, preferences);
        }
        Commands::Sound(cmd) => {
            run_sound_command(cmd, sound);
        }
        Commands::Demo { .. } => {
            tui::run_demo(&mut preferences, &mut sound, config.demo.speed).await?;
        }
        Commands::Config(_) => {}
    }

    Ok(())
}

fn renderer_for(preferences: &PreferenceStore) -> TerminalRenderer {
    TerminalRenderer::new(Rc::new(Cell::new(preferences.get())))
}

fn run_line(line: &str, mut preferences: PreferenceStore) {
    let mut interpreter = Interpreter::new();
    let Some(submission) = interpreter.submit(line, &mut preferences) else {
        return;
    };
    info!("Ran {:?}", submission.command);

    // Render after the command so a theme change shows in its own output
    let renderer = renderer_for(&preferences);
    if let Some(entry) = interpreter.scrollback().last() {
        renderer.render_output(&entry.output);
    }
}

fn run_prefs_command(cmd: PrefsCommands, mut preferences: PreferenceStore) {
    match cmd {
        PrefsCommands::Show => {}
        PrefsCommands::Mode { mode } => preferences.set_display_mode(mode),
        PrefsCommands::Style { style } => preferences.set_visual_style(style),
        PrefsCommands::Toggle => preferences.toggle_display_mode(),
    }
    let current = preferences.get();
    renderer_for(&preferences).render_preferences(&current);
}

fn run_sound_command(cmd: SoundCommands, mut sound: SoundPlayer) {
    match cmd {
        SoundCommands::Status => {}
        SoundCommands::On => sound.preferences_mut().set_enabled(true),
        SoundCommands::Off => sound.preferences_mut().set_enabled(false),
        SoundCommands::Toggle => sound.preferences_mut().toggle(),
    }
    let state = if sound.preferences().enabled() { "on" } else { "off" };
    println!("Sound: {}", state);
}

fn run_config_command(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Init { force } => {
            config_init(force)?;
        }
        ConfigCommands::Show => {
            config_show()?;
        }
        ConfigCommands::Path => {
            config_path();
        }
    }
    Ok(())
}

fn config_init(force: bool) -> Result<()> {
    let path = Config::default_path();

    if path.exists() && !force {
        println!("Configuration file already exists at: {}", path.display());
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config = Config::default();
    config.save()?;

    println!("Configuration file created at: {}", path.display());
    println!();
    println!("Settings can also come from environment variables:");
    println!("  export PORTFOLIO_DATA_DIR=/path/to/data");
    println!("  export PORTFOLIO_TRIGGER_WORD=terminal");
    println!("  export PORTFOLIO_SOUND_PLAYER=paplay");

    Ok(())
}

fn config_show() -> Result<()> {
    let config = Config::load()?;
    println!("{}", toml::to_string_pretty(&config)?);

    println!("\n--- Environment Variables ---");
    for var in ["PORTFOLIO_DATA_DIR", "PORTFOLIO_TRIGGER_WORD", "PORTFOLIO_SOUND_PLAYER"] {
        println!(
            "{}: {}",
            var,
            std::env::var(var).unwrap_or_else(|_| "not set".to_string())
        );
    }
    println!("Data directory: {}", config.data_dir().display());

    Ok(())
}

fn config_path() {
    let path = Config::default_path();
    println!("{}", path.display());
    if path.exists() {
        println!("(exists)");
    } else {
        println!("(not created yet - run 'portfolio-shell config init')");
    }
}
