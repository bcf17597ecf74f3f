use anyhow::Result;

use crate::cli::{TaskFailed, print_json};
use crate::client::RhasspyClient;
use crate::outcome::Training;
use crate::status;
use crate::ui::{Spinner, Style};

pub async fn run_version(client: &RhasspyClient) -> Result<()> {
    println!("{}", client.version().await?.trim_end());
    Ok(())
}

pub async fn run_restart(client: &RhasspyClient) -> Result<()> {
    println!("{}", client.restart().await?.trim_end());
    Ok(())
}

/// Trains the profile and prints the outcome as JSON.
///
/// A failed training run is printed like a successful one and then reported
/// as [`TaskFailed`] so the exit status reflects it.
pub async fn run_train(client: &RhasspyClient, no_cache: bool) -> Result<()> {
    let outcome = Spinner::wait_for("Training profile...", client.train(no_cache)).await;

    print_json(&outcome)?;

    match outcome {
        Training::Success => {
            status!("{}", Style::success("Training complete"));
            Ok(())
        }
        Training::Failure { .. } => Err(TaskFailed { task: "training" }.into()),
    }
}
