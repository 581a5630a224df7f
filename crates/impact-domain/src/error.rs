//! Domain error types

use crate::{EntryId, StatusKind};
use thiserror::Error;

/// Malformed input rejected before any computation or transition
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Hours must be a finite, non-negative number
    #[error("Hours must be non-negative, got {0}")]
    NegativeHours(f64),

    /// A dispute needs a reason
    #[error("Dispute reason must not be empty")]
    EmptyDisputeReason,

    /// Dispute reason shorter than the configured minimum
    #[error("Dispute reason must be at least {min} characters, got {len}")]
    DisputeReasonTooShort {
        /// Characters after trimming
        len: usize,
        /// Configured minimum
        min: usize,
    },

    /// Badge thresholds must be strictly ascending
    #[error("Badge thresholds must be in ascending order")]
    ThresholdsNotAscending,

    /// Too many entries in one batch
    #[error("Batch of {size} entries exceeds the limit of {max}")]
    BatchTooLarge {
        /// Entries in the batch
        size: usize,
        /// Configured maximum
        max: usize,
    },
}

/// Errors raised by verification transitions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VerificationError {
    /// Transition requested on an entry that is not pending
    #[error("Entry {entry_id} is {current}, expected pending")]
    InvalidState {
        /// The entry that was not pending
        entry_id: EntryId,
        /// Its current status
        current: StatusKind,
    },

    /// A batch approval was refused; no entry in the batch was changed
    #[error("Batch rejected, entries not pending: {}", format_ids(.offending))]
    BatchRejected {
        /// Every entry that blocked the batch
        offending: Vec<EntryId>,
    },

    /// Malformed input
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

fn format_ids(ids: &[EntryId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
