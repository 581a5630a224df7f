//! Sweeps overdue pending entries into the verified state

use crate::{AutoVerifyMetrics, JanitorConfig, JanitorError};
use chrono::{DateTime, Utc};
use impact_domain::traits::{EntryQuery, EntryStore};
use impact_domain::{workflow, ImpactEntry};

/// Auto-verifies entries nobody reviewed within the configured window
///
/// # Examples
///
/// ```no_run
/// use chrono::Utc;
/// use impact_janitor::{AutoVerifier, JanitorConfig};
/// use impact_store::SqliteStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = SqliteStore::new("impact.db")?;
/// let mut verifier = AutoVerifier::new(JanitorConfig::default());
///
/// let metrics = verifier.sweep(&mut store, Utc::now())?;
/// println!("{}", metrics.summary());
/// # Ok(())
/// # }
/// ```
pub struct AutoVerifier {
    config: JanitorConfig,
    metrics: AutoVerifyMetrics,
}

impl AutoVerifier {
    /// Create a new verifier with the given configuration
    pub fn new(config: JanitorConfig) -> Self {
        Self {
            config,
            metrics: AutoVerifyMetrics::new(),
        }
    }

    /// Create a verifier with default configuration
    pub fn default_config() -> Self {
        Self::new(JanitorConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &JanitorConfig {
        &self.config
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &AutoVerifyMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Verify every pending entry that is overdue at `now`
    ///
    /// At most `batch_limit` entries are handled per sweep, oldest first. The
    /// whole batch is written in one store call, so a failed write leaves
    /// every entry pending. Returns the cumulative metrics after the sweep.
    pub fn sweep<S: EntryStore>(
        &mut self,
        store: &mut S,
        now: DateTime<Utc>,
    ) -> Result<AutoVerifyMetrics, JanitorError>
    where
        S::Error: std::fmt::Display,
    {
        let window = self.config.auto_verify_window();
        let cutoff = now - window;
        tracing::debug!(cutoff = %cutoff, "Starting auto-verify sweep");

        let query = EntryQuery {
            limit: Some(self.config.batch_limit),
            ..EntryQuery::pending_before(cutoff)
        };
        let candidates = store
            .query_entries(&query)
            .map_err(|e| JanitorError::Store(e.to_string()))?;

        // The store filter is a prefilter; the workflow rule decides.
        let due: Vec<ImpactEntry> = candidates
            .iter()
            .filter_map(|entry| workflow::auto_verify_after(entry, now, window))
            .collect();

        if self.config.dry_run {
            for entry in &due {
                tracing::info!(
                    entry = %entry.id,
                    hours = entry.hours(),
                    "[DRY RUN] Would auto-verify entry"
                );
            }
            self.metrics.record_dry_run(due.len());
        } else if !due.is_empty() {
            store
                .update_statuses(&due)
                .map_err(|e| JanitorError::Store(e.to_string()))?;

            for entry in &due {
                self.metrics.record_verified(entry);
            }
            tracing::info!("Auto-verified {} entries", due.len());
        }

        self.metrics.record_sweep(now);
        Ok(self.metrics.clone())
    }
}
