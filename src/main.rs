//! ECO Mane telemetry poller
//!
//! Periodically scrapes a Panasonic ECO Mane HEMS gateway over HTTP and keeps
//! the latest complete reading (daily usage aggregates plus power and energy
//! of every circuit) as an immutable snapshot.
//!
//! # Architecture
//!
//! - **Poller**: one cycle per poll interval (60 seconds by default); a cycle
//!   publishes only if every request in it succeeded.
//! - **Bootstrap**: the first snapshot is retried every retry interval
//!   (120 seconds by default) until the device answers.
//! - **Sink**: every published snapshot is written to InfluxDB when
//!   `INFLUXDB_URL` is set, and logged otherwise.
//!
//! SIGTERM and SIGINT stop the poller; a cycle in flight is abandoned.

mod config;
mod ecomane;
mod error;
mod influxdb;
mod model;
mod poller;

#[cfg(test)]
mod test_utils;

use crate::model::TelemetrySnapshot;
use crate::poller::Poller;
use anyhow::Context;
use std::sync::Arc;
use tokio::signal::ctrl_c;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::watch;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_config = config::load_app_config().context("Failed to load AppConfig")?;
    tracing_subscriber::fmt()
        .with_max_level(app_config.log_level())
        .init();

    let ecomane_config = config::load_ecomane_config().context("Failed to load EcomaneConfig")?;
    let poller_config = config::load_poller_config().context("Failed to load PollerConfig")?;
    let influx_config = config::load_influx_config().context("Failed to load InfluxConfig")?;

    let address = ecomane_config.address.trim().to_string();
    let client = ecomane::Client::new(ecomane_config).context("Failed to build HTTP client")?;
    tracing::info!(
        "Polling {} every {} seconds",
        client.base_url(),
        poller_config.poll_interval_sec
    );
    let poller = Arc::new(Poller::new(Arc::new(client), address, poller_config));

    let sink = match influx_config {
        Some(config) => {
            tracing::info!("Writing snapshots to InfluxDB bucket {}", config.bucket);
            Some(influxdb::Client::new(config))
        }
        None => {
            tracing::info!("INFLUXDB_URL not set, snapshots are only logged");
            None
        }
    };
    let sink_task = tokio::spawn(forward_snapshots(poller.subscribe(), sink));

    let mut sig_term = signal(SignalKind::terminate()).context("Failed to register SIGTERM handler")?;
    let shutdown = async move {
        tokio::select! {
            _ = sig_term.recv() => tracing::info!("Received SIGTERM. Exiting..."),
            _ = ctrl_c() => tracing::info!("Received SIGINT. Exiting..."),
        }
    };
    tokio::pin!(shutdown);

    tracing::info!("Running... Press Ctrl-C or send SIGTERM to terminate.");
    tokio::select! {
        _ = &mut shutdown => {
            sink_task.abort();
            return Ok(());
        }
        snapshot = poller.first_refresh() => {
            tracing::info!(
                "Found {} circuits and {} of {} usage metrics",
                poller.circuit_total(),
                Poller::usage_metric_specs()
                    .iter()
                    .filter(|spec| snapshot.get(spec.key).is_some())
                    .count(),
                Poller::usage_metric_specs().len()
            );
        }
    }

    poller.run(shutdown).await;
    sink_task.abort();
    tracing::info!(
        "Stopped with snapshot v{} ({} consecutive failures)",
        poller.snapshot().version(),
        poller.consecutive_failures()
    );
    Ok(())
}

/// Hands every published snapshot to the sink until the poller goes away.
///
/// Only the newest snapshot is seen if several are published while a write
/// is in progress. Write failures are logged and never reach the poller.
async fn forward_snapshots(
    mut receiver: watch::Receiver<Arc<TelemetrySnapshot>>,
    sink: Option<influxdb::Client>,
) {
    while receiver.changed().await.is_ok() {
        let snapshot = Arc::clone(&receiver.borrow_and_update());

        match &sink {
            Some(client) => match client.write_snapshot(&snapshot).await {
                Ok(count) => tracing::info!(
                    "Successfully wrote {} points to InfluxDB (snapshot v{})",
                    count,
                    snapshot.version()
                ),
                Err(e) => tracing::error!(
                    "Failed to write snapshot v{} to InfluxDB: {:?}",
                    snapshot.version(),
                    e
                ),
            },
            None => tracing::debug!("Snapshot v{}: {:?}", snapshot.version(), snapshot.values()),
        }
    }
    tracing::debug!("Snapshot channel closed");
}
