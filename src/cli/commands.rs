//! Command definitions for the Pomodoro clock CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro clock - a 25/5 work and break countdown
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro-clock",
    version,
    about = "ターミナルで動くポモドーロタイマー",
    long_about = "25分の作業と5分の休憩を切り替えるシンプルなカウントダウンタイマー。\n\
                  `run` で対話モードを起動し、s で開始/停止、b で休憩/5分延長します。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the interactive timer in the foreground
    Run(RunArgs),

    /// Format a millisecond duration as MM:SS
    Clock {
        /// Duration in milliseconds
        millis: u64,
    },

    /// Print the effective configuration as JSON
    Config {
        /// Path to a configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Path to a configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Poll cadence in milliseconds (10-1000)
    #[arg(
        long,
        value_parser = clap::value_parser!(u64).range(10..=1000)
    )]
    pub tick_ms: Option<u64>,

    /// Disable the completion bell
    #[arg(long)]
    pub no_sound: bool,

    /// Emit events as JSON lines instead of the terminal clock
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Tests
// ============================================================================
