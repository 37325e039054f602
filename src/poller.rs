//! Periodic polling of one ECO Mane gateway.
//!
//! A cycle reads the usage page, then walks the circuit list page by page,
//! fetching today's energy of every circuit on the way. All of it is
//! collected into a [`SnapshotBuilder`] and only published when the whole
//! cycle succeeds: readers see either the previous snapshot or the new one,
//! never a mix.
//!
//! Cycles never overlap. The scheduled loop runs them back to back on one
//! task, and [`Poller::refresh`] additionally serializes callers behind a lock.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use chrono::Local;
use scraper::Html;
use tokio::sync::{watch, Mutex};
use tokio::time::{self, MissedTickBehavior};

use crate::config::PollerConfig;
use crate::ecomane::{
    parse_circuit_page, parse_usage_page, usage_metric_specs, CircuitEnergyFetcher, CircuitPage,
    PageCursor, PageFetcher, PageStep, Resource, ScanEnd,
};
use crate::error::{CycleError, EcomaneError};
use crate::model::{SnapshotBuilder, TelemetrySnapshot, UsageMetricSpec, IP_ADDRESS_KEY};

pub struct Poller {
    fetcher: Arc<dyn PageFetcher>,
    address: String,
    config: PollerConfig,
    sender: watch::Sender<Arc<TelemetrySnapshot>>,
    cycle_lock: Mutex<()>,
    consecutive_failures: AtomicU32,
}

impl Poller {
    /// Creates a poller that has not fetched anything yet. Until the first
    /// successful cycle, [`Poller::snapshot`] returns an empty snapshot.
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        address: impl Into<String>,
        config: PollerConfig,
    ) -> Self {
        let (sender, _) = watch::channel(Arc::new(TelemetrySnapshot::empty()));
        Self {
            fetcher,
            address: address.into(),
            config,
            sender,
            cycle_lock: Mutex::new(()),
            consecutive_failures: AtomicU32::new(0),
        }
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> Arc<TelemetrySnapshot> {
        Arc::clone(&self.sender.borrow())
    }

    /// Receiver notified on every publication.
    pub fn subscribe(&self) -> watch::Receiver<Arc<TelemetrySnapshot>> {
        self.sender.subscribe()
    }

    /// Number of circuits in the current snapshot.
    pub fn circuit_total(&self) -> usize {
        self.sender.borrow().circuit_count()
    }

    pub fn usage_metric_specs() -> &'static [UsageMetricSpec] {
        usage_metric_specs()
    }

    /// Failed cycles since the last successful one.
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures.load(Ordering::SeqCst)
    }

    /// Runs one cycle and returns its data without publishing it.
    pub async fn run_cycle(&self) -> Result<SnapshotBuilder, CycleError> {
        let mut builder = SnapshotBuilder::new();
        builder.insert(IP_ADDRESS_KEY, self.address.as_str());

        let usage = self.fetch_usage().await.map_err(CycleError::Usage)?;
        tracing::debug!("Usage page yielded {} metrics", usage.len());
        builder.extend(usage);

        self.scan_circuits(&mut builder).await?;
        Ok(builder)
    }

    /// Runs one cycle and publishes its result. On failure the previous
    /// snapshot stays in place.
    pub async fn refresh(&self) -> Result<Arc<TelemetrySnapshot>, CycleError> {
        let _guard = self.cycle_lock.lock().await;

        match self.run_cycle().await {
            Ok(builder) => {
                let version = self.sender.borrow().version() + 1;
                let snapshot = Arc::new(builder.finish(version, Local::now()));
                self.sender.send_replace(Arc::clone(&snapshot));
                self.consecutive_failures.store(0, Ordering::SeqCst);
                tracing::info!(
                    "Published snapshot v{} from {} ({} circuits, {} values)",
                    version,
                    self.address,
                    snapshot.circuit_count(),
                    snapshot.len()
                );
                Ok(snapshot)
            }
            Err(e) => {
                let failures = self.consecutive_failures.fetch_add(1, Ordering::SeqCst) + 1;
                tracing::warn!(
                    kind = %e.kind(),
                    consecutive_failures = failures,
                    "Poll cycle for {} failed: {:?}",
                    self.address,
                    e
                );
                Err(e)
            }
        }
    }

    /// Repeats [`Poller::refresh`] every retry interval until one succeeds.
    ///
    /// There is no attempt limit; callers that need to give up wrap this in
    /// a timeout or a `select!`.
    pub async fn first_refresh(&self) -> Arc<TelemetrySnapshot> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.refresh().await {
                Ok(snapshot) => {
                    tracing::info!("Initial data fetched after {} attempt(s)", attempt);
                    return snapshot;
                }
                Err(_) => {
                    tracing::warn!(
                        "Initial data fetch failed (attempt {}), retrying in {} seconds",
                        attempt,
                        self.config.retry_interval_sec
                    );
                    time::sleep(self.config.retry_interval()).await;
                }
            }
        }
    }

    /// Refreshes every poll interval until `shutdown` completes.
    ///
    /// The first refresh happens one interval after the call, so this is
    /// meant to follow [`Poller::first_refresh`]. A cycle still in flight
    /// when `shutdown` fires is dropped and publishes nothing.
    pub async fn run<S>(&self, shutdown: S)
    where
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let mut interval = time::interval(self.config.poll_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        interval.tick().await;

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Stopping poller for {}", self.address);
                    break;
                }
                _ = async {
                    interval.tick().await;
                    // failures are logged by refresh and retried on the next tick
                    let _ = self.refresh().await;
                } => {}
            }
        }
    }

    async fn fetch_usage(&self) -> Result<BTreeMap<String, String>, EcomaneError> {
        let body = self.fetcher.get(&Resource::Usage.path()).await?;
        Ok(parse_usage_body(&body))
    }

    async fn fetch_circuit_page(&self, page: u32) -> Result<CircuitPage, EcomaneError> {
        let body = self.fetcher.get(&Resource::CircuitList { page }.path()).await?;
        Ok(parse_circuit_body(&body))
    }

    async fn scan_circuits(&self, builder: &mut SnapshotBuilder) -> Result<(), CycleError> {
        let energy = CircuitEnergyFetcher::new(Arc::clone(&self.fetcher));
        let mut cursor = PageCursor::new(self.config.max_pages);

        loop {
            let page = cursor.page();
            let circuit_page = self
                .fetch_circuit_page(page)
                .await
                .map_err(|source| CycleError::CircuitPage { page, source })?;
            cursor.observe_total(circuit_page.total_pages);

            let step = cursor.advance(&circuit_page.slots)?;
            if step == PageStep::Done(ScanEnd::RepeatedPage) {
                tracing::debug!(
                    "Circuit scan ended on page {}: {:?}",
                    page,
                    ScanEnd::RepeatedPage
                );
                break;
            }

            for slot in circuit_page.slots {
                let index = builder.next_index();
                let slot_no = slot.slot;
                let mut record = slot.into_record(index);

                match record.selection_token.as_deref() {
                    Some(token) => {
                        let value = energy
                            .fetch(page, cursor.total_pages(), token)
                            .await
                            .map_err(|source| CycleError::CircuitEnergy {
                                index,
                                page,
                                source,
                            })?;
                        record.energy = Some(value);
                    }
                    None => tracing::warn!(
                        "Circuit {} (page {}, slot {}) has no selection token, skipping energy",
                        index,
                        page,
                        slot_no
                    ),
                }

                tracing::debug!(
                    "Circuit {}: place={:?} circuit={:?} power={:?} energy={:?}",
                    index,
                    record.place,
                    record.circuit,
                    record.power,
                    record.energy
                );
                builder.push_circuit(record);
            }

            if let PageStep::Done(end) = step {
                tracing::debug!("Circuit scan ended on page {}: {:?}", page, end);
                break;
            }
        }

        Ok(())
    }
}

fn parse_usage_body(body: &str) -> BTreeMap<String, String> {
    parse_usage_page(&Html::parse_document(body))
}

fn parse_circuit_body(body: &str) -> CircuitPage {
    parse_circuit_page(&Html::parse_document(body))
}
