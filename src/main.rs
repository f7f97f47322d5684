//! Pomodoro clock CLI - a work/break countdown in the terminal
//!
//! This tool helps you stay focused using the Pomodoro Technique:
//! - 25 minutes of focused work
//! - 5 minutes of break, extendable in 5-minute steps

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::sync::mpsc;

use pomodoro_clock::cli::input::spawn_stdin_reader;
use pomodoro_clock::cli::{Cli, Commands, Display, RunArgs};
use pomodoro_clock::host::{ActionOutcome, DriverEvent, MonotonicClock, SessionDriver};
use pomodoro_clock::sound::{BellSoundPlayer, SoundPlayer};
use pomodoro_clock::config::ConfigError;
use pomodoro_clock::{format_clock, HostConfig};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        if let Some(config_err) = e.downcast_ref::<ConfigError>() {
            Display::show_hint(config_err.suggestion());
        }
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so they never interleave with the clock line.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => {
            run(args).await?;
        }
        Some(Commands::Clock { millis }) => {
            println!("{}", format_clock(millis));
        }
        Some(Commands::Config { config }) => {
            let config = HostConfig::load(config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Runs the interactive timer until quit, EOF on stdin, or Ctrl-C.
async fn run(args: RunArgs) -> Result<()> {
    let mut config =
        HostConfig::load(args.config.as_deref()).context("設定の読み込みに失敗しました")?;
    if let Some(tick_ms) = args.tick_ms {
        config = config.with_tick_interval_ms(tick_ms);
    }
    if args.no_sound {
        config = config.with_sound(false);
    }
    config.validate()?;

    let renderer = Renderer {
        json: args.json,
        scale: config.progress_scale,
        bar_width: config.bar_width,
    };

    let sound: Arc<dyn SoundPlayer> = Arc::new(BellSoundPlayer::new(!config.sound_enabled));
    let driver = SessionDriver::new(config, Arc::new(MonotonicClock::new()), sound);

    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (ev_tx, mut ev_rx) = mpsc::unbounded_channel();

    spawn_stdin_reader(cmd_tx).context("入力スレッドを起動できません")?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };
    let driver_task = tokio::spawn(driver.run(cmd_rx, ev_tx, shutdown));

    if !renderer.json {
        Display::show_controls(false);
    }
    while let Some(event) = ev_rx.recv().await {
        renderer.render(&event);
    }
    if !renderer.json {
        println!();
    }

    driver_task.await.context("タイマーが異常終了しました")?
}

/// Routes driver events to the terminal or to JSON lines.
struct Renderer {
    json: bool,
    scale: u32,
    bar_width: usize,
}

impl Renderer {
    fn render(&self, event: &DriverEvent) {
        if self.json {
            Display::show_json(event);
            return;
        }

        match event {
            DriverEvent::Render(display) => {
                Display::show_render(display, self.scale, self.bar_width);
            }
            DriverEvent::Reset(display) => {
                Display::show_render(display, self.scale, self.bar_width);
            }
            DriverEvent::Completed { title, message, .. } => {
                Display::show_completed(title, message);
            }
            DriverEvent::Action { outcome } => {
                Display::show_action(outcome);
                match outcome {
                    ActionOutcome::Started(_) | ActionOutcome::Extended { .. } => {
                        Display::show_controls(true);
                    }
                    ActionOutcome::Stopped => Display::show_controls(false),
                    ActionOutcome::Ignored => {}
                }
            }
        }
    }
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
