//! Background worker for continuous auto-verification

use crate::{AutoVerifier, AutoVerifyMetrics, JanitorConfig, JanitorError};
use chrono::Utc;
use impact_domain::traits::EntryStore;
use tokio::time::{interval, Duration};

/// Background worker that runs [`AutoVerifier::sweep`] on a schedule
///
/// # Examples
///
/// ```no_run
/// use impact_janitor::{JanitorConfig, JanitorWorker};
/// use impact_store::SqliteStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = SqliteStore::new("impact.db")?;
///     let mut worker = JanitorWorker::new(JanitorConfig::default());
///
///     // Run until Ctrl+C
///     worker.run(store).await?;
///     Ok(())
/// }
/// ```
pub struct JanitorWorker {
    verifier: AutoVerifier,
    interval: Duration,
}

impl JanitorWorker {
    /// Create a new background worker with the given configuration
    pub fn new(config: JanitorConfig) -> Self {
        let interval = config.sweep_interval();
        Self {
            verifier: AutoVerifier::new(config),
            interval,
        }
    }

    /// Create a worker with default configuration
    pub fn default_config() -> Self {
        Self::new(JanitorConfig::default())
    }

    /// Run the worker until a shutdown signal (Ctrl+C) is received
    ///
    /// A failed sweep is logged and retried on the next tick.
    pub async fn run<S>(&mut self, mut store: S) -> Result<(), JanitorError>
    where
        S: EntryStore,
        S::Error: std::fmt::Display,
    {
        let mut ticker = interval(self.interval);

        tracing::info!("Janitor worker started (interval: {:?})", self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.verifier.sweep(&mut store, Utc::now()) {
                        Ok(metrics) => {
                            tracing::info!(
                                "Sweep completed: {} verified in total, {} skipped by dry run",
                                metrics.verified,
                                metrics.skipped_dry_run
                            );
                        }
                        Err(e) => {
                            tracing::error!("Sweep failed: {}", e);
                        }
                    }
                }
                signal = tokio::signal::ctrl_c() => {
                    signal.map_err(|e| JanitorError::Worker(e.to_string()))?;
                    tracing::info!("Shutdown signal received, stopping janitor");
                    break;
                }
            }
        }

        tracing::info!("Janitor stopped. Final metrics:\n{}", self.metrics().summary());
        Ok(())
    }

    /// Run for a specific number of cycles, stopping at the first failure
    pub async fn run_cycles<S>(&mut self, mut store: S, cycles: usize) -> Result<S, JanitorError>
    where
        S: EntryStore,
        S::Error: std::fmt::Display,
    {
        let mut ticker = interval(self.interval);

        for cycle in 0..cycles {
            ticker.tick().await;
            tracing::debug!("Starting sweep cycle {}/{}", cycle + 1, cycles);

            if let Err(e) = self.verifier.sweep(&mut store, Utc::now()) {
                tracing::error!("Sweep {}/{} failed: {}", cycle + 1, cycles, e);
                return Err(e);
            }
        }

        tracing::info!(
            "Janitor finished {} cycles. Final metrics:\n{}",
            cycles,
            self.metrics().summary()
        );
        Ok(store)
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &AutoVerifyMetrics {
        self.verifier.metrics()
    }

    /// Reset the metrics counters
    pub fn reset_metrics(&mut self) {
        self.verifier.reset_metrics();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, NaiveDate};
    use impact_domain::traits::EntryQuery;
    use impact_domain::{EntryId, ImpactEntry};

    #[derive(Default)]
    struct MockStore {
        entries: Vec<ImpactEntry>,
    }

    impl EntryStore for MockStore {
        type Error = String;

        fn insert_entry(&mut self, entry: ImpactEntry) -> Result<EntryId, String> {
            let id = entry.id;
            self.entries.push(entry);
            Ok(id)
        }

        fn get_entry(&self, id: EntryId) -> Result<Option<ImpactEntry>, String> {
            Ok(self.entries.iter().find(|e| e.id == id).cloned())
        }

        fn query_entries(&self, query: &EntryQuery) -> Result<Vec<ImpactEntry>, String> {
            Ok(self.entries.iter().filter(|e| query.matches(e)).cloned().collect())
        }

        fn update_statuses(&mut self, updates: &[ImpactEntry]) -> Result<(), String> {
            for update in updates {
                if let Some(slot) = self.entries.iter_mut().find(|e| e.id == update.id) {
                    *slot = update.clone();
                }
            }
            Ok(())
        }
    }

    fn stale_entry() -> ImpactEntry {
        ImpactEntry::new(
            "vol-1",
            2.0,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Utc::now() - ChronoDuration::hours(72),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_worker_creation() {
        let worker = JanitorWorker::default_config();
        assert_eq!(worker.metrics().sweep_count, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_cycles() {
        let mut store = MockStore::default();
        store.insert_entry(stale_entry()).unwrap();

        let config = JanitorConfig {
            sweep_interval_minutes: 1,
            ..Default::default()
        };
        let mut worker = JanitorWorker::new(config);

        // Paused clock: the second tick auto-advances instead of waiting a minute
        let store = worker.run_cycles(store, 2).await.unwrap();

        assert_eq!(worker.metrics().sweep_count, 2);
        assert_eq!(worker.metrics().verified, 1);
        assert!(store.entries[0].verification.is_verified());
    }

    #[tokio::test]
    async fn test_reset_metrics() {
        let config = JanitorConfig {
            sweep_interval_minutes: 1,
            ..Default::default()
        };
        let mut worker = JanitorWorker::new(config);

        worker.run_cycles(MockStore::default(), 1).await.unwrap();
        assert_eq!(worker.metrics().sweep_count, 1);

        worker.reset_metrics();
        assert_eq!(worker.metrics().sweep_count, 0);
    }
}
