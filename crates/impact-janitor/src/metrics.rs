//! Metrics collection for auto-verify sweeps

use chrono::{DateTime, Utc};
use impact_domain::ImpactEntry;
use std::collections::BTreeMap;

/// Label used for entries logged without an organization
pub const UNASSIGNED_ORG: &str = "unassigned";

/// Cumulative counters across every sweep run by one verifier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutoVerifyMetrics {
    /// Entries verified automatically
    pub verified: usize,

    /// Hours carried by those entries
    pub verified_hours: f64,

    /// Entries that were due but left untouched because of dry-run mode
    pub skipped_dry_run: usize,

    /// Entries verified per organization
    pub by_org: BTreeMap<String, usize>,

    /// Total sweep iterations completed
    pub sweep_count: usize,

    /// `now` of the most recent sweep
    pub last_sweep_at: Option<DateTime<Utc>>,
}

impl AutoVerifyMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one entry flipped to verified
    pub fn record_verified(&mut self, entry: &ImpactEntry) {
        self.verified += 1;
        self.verified_hours += entry.hours();
        let org = entry.org().unwrap_or(UNASSIGNED_ORG);
        *self.by_org.entry(org.to_string()).or_insert(0) += 1;
    }

    /// Record entries left pending by a dry run
    pub fn record_dry_run(&mut self, count: usize) {
        self.skipped_dry_run += count;
    }

    /// Record a sweep cycle completion
    pub fn record_sweep(&mut self, now: DateTime<Utc>) {
        self.sweep_count += 1;
        self.last_sweep_at = Some(now);
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Auto-Verify Summary".to_string(),
            "===================".to_string(),
            format!("Sweep cycles: {}", self.sweep_count),
            format!("Entries verified: {}", self.verified),
            format!("Hours verified: {:.1}", self.verified_hours),
        ];

        if self.skipped_dry_run > 0 {
            lines.push(format!("Skipped (dry run): {}", self.skipped_dry_run));
        }

        if !self.by_org.is_empty() {
            lines.push(String::new());
            lines.push("Verified by organization:".to_string());
            for (org, count) in &self.by_org {
                lines.push(format!("  {}: {}", org, count));
            }
        }

        lines.join("\n")
    }
}
