//! Display utilities for the Pomodoro clock CLI.
//!
//! This module provides formatted output for:
//! - The live clock line with progress bar
//! - Completion alerts and action results
//! - Error messages

use std::io::{self, Write};

use colored::{Color, Colorize};

use crate::host::controls::{break_label, start_stop_label};
use crate::host::{ActionOutcome, DriverEvent};
use crate::types::{DisplayState, SessionKind};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Builds the clock line, e.g. `作業 24:59 [███████████████████░] 99%`.
    pub fn render_line(display: &DisplayState, scale: u32, bar_width: usize) -> String {
        let (bar, percentage) = Self::bar(display.progress, scale, bar_width);
        Self::line(display, &bar, percentage)
    }

    /// Same as [`Display::render_line`], with the bar in the session color.
    pub fn render_colored_line(display: &DisplayState, scale: u32, bar_width: usize) -> String {
        let (bar, percentage) = Self::bar(display.progress, scale, bar_width);
        let bar = bar.color(Self::bar_color(display.kind)).to_string();
        Self::line(display, &bar, percentage)
    }

    /// Red while working, green on a break.
    pub fn bar_color(kind: SessionKind) -> Color {
        match kind {
            SessionKind::Work => Color::Red,
            SessionKind::Break => Color::Green,
        }
    }

    /// Builds the control hint for the current state.
    pub fn controls_hint(running: bool) -> String {
        format!(
            "[s] {}  [b] {}  [q] Quit",
            start_stop_label(running),
            break_label(running)
        )
    }

    /// Overwrites the current terminal line with the clock.
    pub fn show_render(display: &DisplayState, scale: u32, bar_width: usize) {
        print!("\r{}", Self::render_colored_line(display, scale, bar_width));
        let _ = io::stdout().flush();
    }

    /// Shows the completion alert and how to dismiss it.
    pub fn show_completed(title: &str, message: &str) {
        println!();
        println!("─────────────────────────────");
        println!("{}", title);
        println!("{}", message);
        println!("─────────────────────────────");
        println!("Enterキーで確認してください");
    }

    /// Shows the result of a user action.
    pub fn show_action(outcome: &ActionOutcome) {
        if let Some(text) = Self::action_text(outcome) {
            println!();
            println!("{}", text);
        }
    }

    /// Shows the control hint on its own line.
    pub fn show_controls(running: bool) {
        println!();
        println!("{}", Self::controls_hint(running));
    }

    /// Prints an event as one JSON line.
    pub fn show_json(event: &DriverEvent) {
        match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => Self::show_error(&e.to_string()),
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }

    /// Shows how the user might fix the last error.
    pub fn show_hint(suggestion: &str) {
        eprintln!("ヒント: {}", suggestion);
    }

    /// Text describing an action result, if it is worth printing.
    fn action_text(outcome: &ActionOutcome) -> Option<String> {
        match outcome {
            ActionOutcome::Started(kind) => {
                Some(format!("* {}を開始しました", Self::kind_label(*kind)))
            }
            ActionOutcome::Stopped => Some("[] タイマーを停止しました".to_string()),
            ActionOutcome::Extended { .. } => Some("+ 休憩を5分延長しました".to_string()),
            ActionOutcome::Ignored => None,
        }
    }

    fn kind_label(kind: SessionKind) -> &'static str {
        match kind {
            SessionKind::Work => "作業",
            SessionKind::Break => "休憩",
        }
    }

    fn line(display: &DisplayState, bar: &str, percentage: u32) -> String {
        format!(
            "{} {} [{}] {:>3}%",
            Self::kind_label(display.kind),
            display.clock,
            bar,
            percentage
        )
    }

    fn bar(progress: u32, scale: u32, bar_width: usize) -> (String, u32) {
        let (filled, percentage) = Self::fill(progress, scale, bar_width);
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(bar_width - filled));
        (bar, percentage)
    }

    /// Returns (filled bar cells, whole percentage) for a scaled progress value.
    fn fill(progress: u32, scale: u32, bar_width: usize) -> (usize, u32) {
        if scale == 0 {
            return (0, 0);
        }
        let progress = u64::from(progress.min(scale));
        let scale = u64::from(scale);
        let filled = (progress * bar_width as u64 / scale) as usize;
        let percentage = (progress * 100 / scale) as u32;
        (filled, percentage)
    }
}

// ============================================================================
// Tests
// ============================================================================
