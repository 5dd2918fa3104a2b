use super::fetcher::Fetcher;
use super::mapper::RecordMapper;
use crate::database::models::QuakeRecord;
use crate::database::{write_records, CollectionHandle, InsertOutcome, RecordStore};
use crate::error::QuakefeedError;
use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};

/// Summary of one fetch → map → write cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    pub features: usize,
    pub outcome: InsertOutcome,
    pub elapsed_ms: u128,
}

/// Polls the earthquake feed and persists new events, one cycle at a time
pub struct FeedMonitor {
    fetcher: Fetcher,
    store: Arc<dyn RecordStore>,
    handle: CollectionHandle,
    interval: Duration,
}

impl FeedMonitor {
    /// Creates a new FeedMonitor writing into `handle`
    pub fn new(
        fetcher: Fetcher,
        store: Arc<dyn RecordStore>,
        handle: CollectionHandle,
        interval: Duration,
    ) -> Self {
        Self {
            fetcher,
            store,
            handle,
            interval,
        }
    }

    /// Runs poll cycles until `shutdown` flips to true or its sender is dropped.
    ///
    /// A cycle in progress always completes; only the idle wait between
    /// cycles is interrupted. Returns the number of attempted cycles,
    /// failed ones included.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> u64 {
        info!(
            "Starting feed monitor for {} into {} with {}s interval",
            self.fetcher.url(),
            self.handle,
            self.interval.as_secs()
        );

        let mut cycles = 0u64;

        loop {
            if *shutdown.borrow() {
                break;
            }

            if let Err(e) = self.poll_once().await {
                error!("Poll cycle against {} failed: {}", self.fetcher.url(), e);
            }
            cycles += 1;

            tokio::select! {
                _ = sleep(self.interval) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Feed monitor stopped after {} cycles", cycles);
        cycles
    }

    /// Performs a single fetch → map → write cycle
    pub async fn poll_once(&self) -> Result<CycleReport, QuakefeedError> {
        let started = Instant::now();

        let records = self.fetch_records().await?;
        let outcome = write_records(self.store.as_ref(), &self.handle, &records).await?;

        let report = CycleReport {
            features: records.len(),
            outcome,
            elapsed_ms: started.elapsed().as_millis(),
        };

        info!(
            "Cycle complete: features={}, inserted={}, duplicates={}, elapsed_ms={}",
            report.features, report.outcome.inserted, report.outcome.duplicates, report.elapsed_ms
        );

        Ok(report)
    }

    /// Runs one cycle against the monitor's store and writes every mapped
    /// record to `out` as a JSON line, duplicates included.
    pub async fn dry_run<W: Write>(&self, out: &mut W) -> Result<CycleReport, QuakefeedError> {
        let started = Instant::now();

        let records = self.fetch_records().await?;
        let outcome = write_records(self.store.as_ref(), &self.handle, &records).await?;

        for record in &records {
            serde_json::to_writer(&mut *out, record).map_err(std::io::Error::from)?;
            writeln!(out)?;
        }

        Ok(CycleReport {
            features: records.len(),
            outcome,
            elapsed_ms: started.elapsed().as_millis(),
        })
    }

    /// Fetches and maps the feed without touching the store
    pub async fn fetch_records(&self) -> Result<Vec<QuakeRecord>, QuakefeedError> {
        let document = self.fetcher.fetch().await?;
        Ok(RecordMapper::map(&document)?)
    }
}

/// Spawns a task that flips the returned receiver to true once `signal` resolves.
///
/// If the signal cannot be listened for, the sender is kept alive and never
/// fires, so the monitor keeps polling until the process is killed.
pub fn spawn_shutdown_listener<F>(signal: F) -> watch::Receiver<bool>
where
    F: Future<Output = std::io::Result<()>> + Send + 'static,
{
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        match signal.await {
            Ok(()) => {
                info!("Shutdown requested, finishing current cycle");
                let _ = shutdown_tx.send(true);
            }
            Err(e) => {
                warn!("Failed to listen for shutdown signal: {}", e);
                let _keep_alive = shutdown_tx;
                std::future::pending::<()>().await;
            }
        }
    });

    shutdown_rx
}
