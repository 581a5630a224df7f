//! Verification service error types

use impact_domain::{EntryId, ValidationError, VerificationError};
use thiserror::Error;

/// Errors that can occur during reviewer operations
#[derive(Error, Debug)]
pub enum VerificationServiceError {
    /// The requested transition is not allowed
    #[error(transparent)]
    Workflow(#[from] VerificationError),

    /// No entry with this ID
    #[error("Entry not found: {0}")]
    NotFound(EntryId),

    /// The session may not review this entry
    #[error("User {user_id} may not review entry {entry_id}")]
    Unauthorized {
        /// Reviewer attempting the operation
        user_id: String,
        /// Entry outside the reviewer's organizations
        entry_id: EntryId,
    },

    /// A batch approval was refused; no entry in the batch was changed
    #[error(
        "Batch rejected: missing [{}], unauthorized [{}], not pending [{}]",
        format_ids(.missing),
        format_ids(.unauthorized),
        format_ids(.not_pending)
    )]
    BatchRejected {
        /// IDs with no stored entry
        missing: Vec<EntryId>,
        /// Entries outside the reviewer's organizations
        unauthorized: Vec<EntryId>,
        /// Reviewable entries that were already verified or disputed
        not_pending: Vec<EntryId>,
    },

    /// Store error
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ValidationError> for VerificationServiceError {
    fn from(err: ValidationError) -> Self {
        Self::Workflow(err.into())
    }
}

fn format_ids(ids: &[EntryId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
