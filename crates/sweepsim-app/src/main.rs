//! Headless front end for the remote cleaning-robot simulation.
//!
//! Connects the control loop to the live service, requests a run from
//! environment configuration, auto-runs it to completion, and logs
//! derived statistics on every snapshot change.
//!
//! # Architecture
//!
//! ```text
//! env config --> SimulationDriver --> HTTP service (create/step/state/reset)
//!                      |
//!                      v
//!            ControlUpdate --> stats + grid render model --> log output
//! ```
//!
//! Failures are non-fatal to the driver; this headless run has no user
//! around to retry, so the first surfaced error ends the process with a
//! message instead.

mod config;

use anyhow::Result;
use sweepsim_client::{HttpService, ServiceBackend};
use sweepsim_control::{ControlUpdate, RunState, SimulationDriver};
use sweepsim_types::Snapshot;
use sweepsim_view::{collection_stats, grid_view};
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Application entry point.
///
/// Initializes logging, loads configuration from environment variables,
/// wires an HTTP backend into the simulation driver, then configures and
/// auto-runs one simulation until it finishes.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the service surfaces
/// a failure during the run.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("sweepsim starting");

    let config = AppConfig::from_env()?;
    info!(
        service_url = config.service_url,
        num_robots = config.simulation.num_robots,
        num_trash = config.simulation.num_trash,
        base_x = config.simulation.base_x,
        base_y = config.simulation.base_y,
        "configuration loaded"
    );

    let backend = ServiceBackend::Http(HttpService::new(config.service_url));
    let (driver, handle, mut updates) = SimulationDriver::new(backend);
    let driver_task = tokio::spawn(driver.run());

    handle.configure(config.simulation);
    handle.start_auto_run();

    let outcome = watch_until_done(&mut updates).await;

    drop(handle);
    let _ = driver_task.await;
    outcome
}

/// Follow driver updates until the run finishes or an error surfaces.
async fn watch_until_done(updates: &mut watch::Receiver<ControlUpdate>) -> Result<()> {
    loop {
        if updates.changed().await.is_err() {
            // Driver gone without finishing; nothing more to observe.
            return Ok(());
        }
        let update = updates.borrow_and_update().clone();

        if let Some(error) = update.last_error {
            return Err(error.into());
        }

        let (Some(snapshot), Some(totals)) = (update.snapshot.as_ref(), update.totals) else {
            continue;
        };

        let stats = collection_stats(snapshot, totals);
        info!(
            run_state = update.run_state.as_str(),
            turns_elapsed = snapshot.turns_elapsed,
            collected = stats.collected,
            percent_collected = stats.percent_collected,
            robots_carrying = stats.robots_carrying,
            throughput = stats.throughput,
            "progress"
        );

        if update.run_state == RunState::Finished {
            info!(
                turns_elapsed = snapshot.turns_elapsed,
                "run complete\n{}",
                render_text(snapshot)
            );
            return Ok(());
        }
    }
}

/// Render the grid as one character per cell for terminal output.
fn render_text(snapshot: &Snapshot) -> String {
    grid_view(snapshot)
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.label.unwrap_or("."))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
