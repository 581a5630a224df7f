//! Impact valuation: monetary value, verification score and summaries

use crate::geo::round_to;
use crate::{ImpactEntry, StatusKind, ValidationError, VerificationStatus, VerificationTier};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Default value of one volunteer hour in US dollars
pub const DEFAULT_HOURLY_RATE: f64 = 33.49;

/// Score points for an entry verified at Platinum
pub const PLATINUM_POINTS: u32 = 10;

/// Score points for an entry verified at Gold
pub const GOLD_POINTS: u32 = 7;

/// Score points for an entry verified at Silver
pub const SILVER_POINTS: u32 = 5;

/// Score points for an entry verified without a tier
pub const UNTIERED_POINTS: u32 = 3;

/// Point total that maps to a full score of 100
pub const SCORE_NORMALIZATION: u32 = 200;

/// Tunable scoring constants
///
/// Defaults are the business constants; 20 Platinum verifications reach the
/// full score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Points per Platinum entry
    pub platinum_points: u32,
    /// Points per Gold entry
    pub gold_points: u32,
    /// Points per Silver entry
    pub silver_points: u32,
    /// Points per verified entry without a tier
    pub untiered_points: u32,
    /// Point total mapped to 100
    pub normalization: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            platinum_points: PLATINUM_POINTS,
            gold_points: GOLD_POINTS,
            silver_points: SILVER_POINTS,
            untiered_points: UNTIERED_POINTS,
            normalization: SCORE_NORMALIZATION,
        }
    }
}

impl ScoringConfig {
    /// Points earned by one entry in the given state
    pub fn points_for(&self, status: &VerificationStatus) -> u32 {
        match status {
            VerificationStatus::Verified(VerificationTier::Platinum) => self.platinum_points,
            VerificationStatus::Verified(VerificationTier::Gold) => self.gold_points,
            VerificationStatus::Verified(VerificationTier::Silver) => self.silver_points,
            VerificationStatus::VerifiedUntiered => self.untiered_points,
            VerificationStatus::Pending | VerificationStatus::Disputed { .. } => 0,
        }
    }
}

/// Aggregate impact over a set of entries
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImpactSummary {
    /// Hours across all entries
    pub total_hours: f64,
    /// Hours on verified entries
    pub verified_hours: f64,
    /// Hours on pending entries
    pub pending_hours: f64,
    /// Distinct organizations across all entries
    pub unique_orgs: usize,
    /// Distinct causes across all entries
    pub unique_causes: usize,
    /// Dollar value of the verified hours
    pub monetary_value: f64,
}

/// Verified hours for one calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyHours {
    /// Month key, `YYYY-MM`
    pub month: String,
    /// Verified hours in that month
    pub hours: f64,
}

/// Position between badge thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeProgress {
    /// Highest threshold reached (0 if none)
    pub current: f64,
    /// Next threshold to reach, if any
    pub next: Option<f64>,
    /// Percent of the way from `current` to `next` (100 when there is no next)
    pub progress: u32,
}

/// Dollar value of `hours` at `hourly_rate`, rounded to cents
pub fn monetary_value(hours: f64, hourly_rate: f64) -> f64 {
    round_to(hours * hourly_rate, 2)
}

/// Dollar value of `hours` at [`DEFAULT_HOURLY_RATE`]
pub fn monetary_value_default(hours: f64) -> f64 {
    monetary_value(hours, DEFAULT_HOURLY_RATE)
}

/// Verification score in `[0, 100]` with the default constants
pub fn verification_score(entries: &[ImpactEntry]) -> u32 {
    verification_score_with(entries, &ScoringConfig::default())
}

/// Verification score in `[0, 100]` with custom constants
pub fn verification_score_with(entries: &[ImpactEntry], config: &ScoringConfig) -> u32 {
    if config.normalization == 0 {
        return 0;
    }

    let points: u64 = entries
        .iter()
        .map(|e| u64::from(config.points_for(&e.verification)))
        .sum();

    let score = (points as f64 / f64::from(config.normalization) * 100.0).round();
    score.min(100.0) as u32
}

/// Totals, distinct counts and value across `entries`
pub fn impact_summary(entries: &[ImpactEntry]) -> ImpactSummary {
    let mut summary = ImpactSummary::default();
    let mut orgs = HashSet::new();
    let mut causes = HashSet::new();

    for entry in entries {
        summary.total_hours += entry.hours();
        match entry.verification.kind() {
            StatusKind::Verified => summary.verified_hours += entry.hours(),
            StatusKind::Pending => summary.pending_hours += entry.hours(),
            StatusKind::Disputed => {}
        }
        if let Some(org) = entry.org() {
            orgs.insert(org);
        }
        if let Some(cause) = entry.cause() {
            causes.insert(cause);
        }
    }

    summary.unique_orgs = orgs.len();
    summary.unique_causes = causes.len();
    summary.monetary_value = monetary_value_default(summary.verified_hours);
    summary
}

/// Verified hours per cause
pub fn group_by_cause(entries: &[ImpactEntry]) -> HashMap<String, f64> {
    group_verified(entries, ImpactEntry::cause)
}

/// Verified hours per organization
pub fn group_by_organization(entries: &[ImpactEntry]) -> HashMap<String, f64> {
    group_verified(entries, ImpactEntry::org)
}

fn group_verified<F>(entries: &[ImpactEntry], key: F) -> HashMap<String, f64>
where
    F: Fn(&ImpactEntry) -> Option<&str>,
{
    let mut groups = HashMap::new();
    for entry in entries.iter().filter(|e| e.verification.is_verified()) {
        if let Some(k) = key(entry) {
            *groups.entry(k.to_string()).or_insert(0.0) += entry.hours();
        }
    }
    groups
}

/// Verified hours per month, oldest month first
pub fn group_by_month(entries: &[ImpactEntry]) -> Vec<MonthlyHours> {
    let mut months: BTreeMap<String, f64> = BTreeMap::new();
    for entry in entries.iter().filter(|e| e.verification.is_verified()) {
        let key = entry.date.format("%Y-%m").to_string();
        *months.entry(key).or_insert(0.0) += entry.hours();
    }

    months
        .into_iter()
        .map(|(month, hours)| MonthlyHours { month, hours })
        .collect()
}

/// Progress of `current_hours` toward the next badge threshold
///
/// # Errors
/// Returns [`ValidationError::ThresholdsNotAscending`] unless the thresholds
/// are strictly ascending.
pub fn badge_progress(
    current_hours: f64,
    thresholds: &[f64],
) -> Result<BadgeProgress, ValidationError> {
    if thresholds.windows(2).any(|w| w[0] >= w[1]) {
        return Err(ValidationError::ThresholdsNotAscending);
    }

    let current = thresholds
        .iter()
        .copied()
        .filter(|t| *t <= current_hours)
        .last()
        .unwrap_or(0.0);
    let next = thresholds.iter().copied().find(|t| *t > current_hours);

    let progress = match next {
        None => 100,
        Some(next) => {
            let pct = ((current_hours - current) / (next - current) * 100.0).round();
            pct.clamp(0.0, 100.0) as u32
        }
    };

    Ok(BadgeProgress { current, next, progress })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use proptest::prelude::*;

    fn status() -> impl Strategy<Value = VerificationStatus> {
        prop_oneof![
            Just(VerificationStatus::Pending),
            Just(VerificationStatus::VerifiedUntiered),
            Just(VerificationStatus::Verified(VerificationTier::Silver)),
            Just(VerificationStatus::Verified(VerificationTier::Gold)),
            Just(VerificationStatus::Verified(VerificationTier::Platinum)),
            Just(VerificationStatus::Disputed { reason: "mismatch".to_string() }),
        ]
    }

    fn entries() -> impl Strategy<Value = Vec<ImpactEntry>> {
        prop::collection::vec((0.0f64..24.0, status()), 0..40).prop_map(|items| {
            items
                .into_iter()
                .map(|(hours, status)| {
                    ImpactEntry::new(
                        "vol-1",
                        hours,
                        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                        Utc::now(),
                    )
                    .unwrap()
                    .with_status(status)
                })
                .collect()
        })
    }

    proptest! {
        /// Property: the score never leaves [0, 100]
        #[test]
        fn test_score_bounded(entries in entries()) {
            prop_assert!(verification_score(&entries) <= 100);
        }

        /// Property: verified and pending hours never exceed the total
        #[test]
        fn test_summary_partitions_hours(entries in entries()) {
            let summary = impact_summary(&entries);
            prop_assert!(summary.verified_hours + summary.pending_hours <= summary.total_hours + 1e-9);
        }

        /// Property: monetary value matches hours times rate rounded to cents
        #[test]
        fn test_monetary_value_rounding(hours in 0.0f64..1000.0, rate in 0.0f64..100.0) {
            let value = monetary_value(hours, rate);
            prop_assert_eq!(value, (hours * rate * 100.0).round() / 100.0);
        }
    }
}
