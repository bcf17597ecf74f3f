//! Where CLI output goes.
//!
//! Results (JSON lines, transcripts, WAV audio) are written to stdout so they
//! can be piped. Everything meant for a person (status lines, warnings, the
//! spinner, `tracing` logs) goes to stderr.

use std::io::{self, Write};
use std::sync::OnceLock;

static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Hide status lines and the spinner.
    pub quiet: bool,
    pub no_color: bool,
}

impl OutputConfig {
    /// Builds the configuration from CLI flags, also honoring a non-empty
    /// `NO_COLOR` (https://no-color.org/).
    pub fn from_flags(quiet: bool, no_color: bool) -> Self {
        Self {
            quiet,
            no_color: no_color || no_color_requested(std::env::var_os("NO_COLOR")),
        }
    }
}

fn no_color_requested(value: Option<std::ffi::OsString>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Sets the process-wide output configuration. Only the first call counts.
pub fn init(config: OutputConfig) {
    let _ = OUTPUT_CONFIG.set(config);
}

pub fn config() -> &'static OutputConfig {
    OUTPUT_CONFIG.get_or_init(|| OutputConfig::from_flags(false, false))
}

pub fn is_quiet() -> bool {
    config().quiet
}

pub fn is_no_color() -> bool {
    config().no_color
}

/// Writes raw bytes (audio) to stdout and flushes.
pub fn write_binary(bytes: &[u8]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(bytes)?;
    stdout.flush()
}

/// Print a status line to stderr unless quiet.
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

/// Print a warning to stderr, even when quiet.
#[macro_export]
macro_rules! warning {
    ($($arg:tt)*) => {
        eprintln!($($arg)*);
    };
}
