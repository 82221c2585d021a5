//! Output formatting and progress indicators
//!
//! This module provides utilities for displaying progress spinners,
//! status glyphs, and formatted messages to the user.

use std::sync::atomic::{AtomicBool, Ordering};

use indicatif::{ProgressBar, ProgressStyle};

static QUIET: AtomicBool = AtomicBool::new(false);
static JSON: AtomicBool = AtomicBool::new(false);

/// Global output configuration derived from CLI flags
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// Suppress all output except errors
    pub quiet: bool,
    /// Output in JSON format for scripting
    pub json: bool,
    /// Verbosity level (-v count)
    pub verbose: u8,
}

impl OutputConfig {
    /// Create a new output configuration
    pub fn new(quiet: bool, json: bool, verbose: u8) -> Self {
        Self {
            quiet,
            json,
            verbose,
        }
    }

    /// Apply this configuration globally
    pub fn apply_global(self) {
        QUIET.store(self.quiet, Ordering::Relaxed);
        JSON.store(self.json, Ordering::Relaxed);
    }
}

/// Whether quiet mode is active
pub fn quiet_enabled() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Whether JSON output mode is active
pub fn json_enabled() -> bool {
    JSON.load(Ordering::Relaxed)
}

/// Create a spinner for operations with unknown duration.
///
/// Hidden in quiet and JSON modes.
pub fn create_spinner(message: &str) -> ProgressBar {
    if quiet_enabled() || json_enabled() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Print a line unless quiet mode is active
pub fn println_unless_quiet(message: &str) {
    if !quiet_enabled() {
        println!("{message}");
    }
}

/// Display a top-level error
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} {error:#}", status::ERROR);
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}
