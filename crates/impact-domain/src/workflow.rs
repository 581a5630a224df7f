//! Verification workflow
//!
//! ```text
//! Pending ──approve(tier)──▶ Verified(tier)
//!    │  └──48h unresolved──▶ Verified(Silver)
//!    └────dispute(reason)──▶ Disputed(reason)
//! ```
//!
//! Verified and Disputed are terminal. Transitions never mutate their input;
//! they return the updated entry for the caller to persist.

use crate::{EntryId, ImpactEntry, ValidationError, VerificationError, VerificationStatus, VerificationTier};
use chrono::{DateTime, Duration, Utc};

/// How long an entry may stay pending before it is auto-verified
pub const AUTO_VERIFY_AFTER_HOURS: i64 = 48;

/// Tier assigned by auto-verification
pub const AUTO_VERIFY_TIER: VerificationTier = VerificationTier::Silver;

/// [`AUTO_VERIFY_AFTER_HOURS`] as a duration
pub fn auto_verify_window() -> Duration {
    Duration::hours(AUTO_VERIFY_AFTER_HOURS)
}

fn ensure_pending(entry: &ImpactEntry) -> Result<(), VerificationError> {
    if entry.verification.is_pending() {
        Ok(())
    } else {
        Err(VerificationError::InvalidState {
            entry_id: entry.id,
            current: entry.verification.kind(),
        })
    }
}

/// Verify a pending entry at `tier`
///
/// # Errors
/// [`VerificationError::InvalidState`] if the entry is not pending.
pub fn approve(entry: &ImpactEntry, tier: VerificationTier) -> Result<ImpactEntry, VerificationError> {
    ensure_pending(entry)?;
    Ok(entry.clone().with_status(VerificationStatus::Verified(tier)))
}

/// Verify every entry at `tier`, or none of them
///
/// All entries are checked before any transition is produced. An empty batch
/// succeeds with no entries.
///
/// # Errors
/// [`VerificationError::BatchRejected`] naming every entry that is not pending.
pub fn approve_all(
    entries: &[ImpactEntry],
    tier: VerificationTier,
) -> Result<Vec<ImpactEntry>, VerificationError> {
    let offending: Vec<EntryId> = entries
        .iter()
        .filter(|e| !e.verification.is_pending())
        .map(|e| e.id)
        .collect();

    if !offending.is_empty() {
        return Err(VerificationError::BatchRejected { offending });
    }

    entries.iter().map(|e| approve(e, tier)).collect()
}

/// Dispute a pending entry
///
/// The reason is stored trimmed.
///
/// # Errors
/// [`VerificationError::InvalidState`] if the entry is not pending, or
/// [`ValidationError::EmptyDisputeReason`] for a blank reason.
pub fn dispute(entry: &ImpactEntry, reason: &str) -> Result<ImpactEntry, VerificationError> {
    ensure_pending(entry)?;

    let reason = reason.trim();
    if reason.is_empty() {
        return Err(ValidationError::EmptyDisputeReason.into());
    }

    Ok(entry.clone().with_status(VerificationStatus::Disputed {
        reason: reason.to_string(),
    }))
}

/// Whether a scheduler should auto-verify `entry` at `now`
///
/// True when the entry is pending and at least 48 hours old.
pub fn is_auto_verify_due(entry: &ImpactEntry, now: DateTime<Utc>) -> bool {
    is_auto_verify_due_after(entry, now, auto_verify_window())
}

/// [`is_auto_verify_due`] with an explicit window
pub fn is_auto_verify_due_after(entry: &ImpactEntry, now: DateTime<Utc>, window: Duration) -> bool {
    entry.verification.is_pending() && now - entry.created_at >= window
}

/// The auto-verify transition, if it is due at `now`
pub fn auto_verify(entry: &ImpactEntry, now: DateTime<Utc>) -> Option<ImpactEntry> {
    auto_verify_after(entry, now, auto_verify_window())
}

/// [`auto_verify`] with an explicit window
pub fn auto_verify_after(
    entry: &ImpactEntry,
    now: DateTime<Utc>,
    window: Duration,
) -> Option<ImpactEntry> {
    if !is_auto_verify_due_after(entry, now, window) {
        return None;
    }
    approve(entry, AUTO_VERIFY_TIER).ok()
}
