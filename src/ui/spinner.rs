use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::future::Future;
use std::time::Duration;

use crate::output;

const TICKS: &[&str] = &["◐", "◓", "◑", "◒"];

/// Spinner on stderr shown while waiting on the server.
///
/// Hidden in quiet mode. Cleared when dropped.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let bar = if output::is_quiet() {
            ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
        } else {
            ProgressBar::new_spinner()
        };
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(TICKS)
                .template("{spinner} {msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(120));

        Self { bar }
    }

    /// Shows a spinner until `task` completes.
    pub async fn wait_for<F: Future>(message: &str, task: F) -> F::Output {
        let spinner = Self::new(message);
        let output = task.await;
        spinner.stop();
        output
    }

    pub fn stop(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}
