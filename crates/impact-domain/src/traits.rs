//! Trait definitions for external interactions
//!
//! Persistence is owned by the backend; these traits are the boundary the
//! workflow and janitor crates program against.

use crate::{EntryId, ImpactEntry, StatusKind};
use chrono::{DateTime, Utc};

/// Trait for storing and retrieving impact entries
///
/// Implemented by the infrastructure layer (impact-store)
pub trait EntryStore {
    /// Error type for store operations
    type Error;

    /// Insert a new entry
    fn insert_entry(&mut self, entry: ImpactEntry) -> Result<EntryId, Self::Error>;

    /// Get an entry by ID
    fn get_entry(&self, id: EntryId) -> Result<Option<ImpactEntry>, Self::Error>;

    /// Query entries matching criteria
    fn query_entries(&self, query: &EntryQuery) -> Result<Vec<ImpactEntry>, Self::Error>;

    /// Move every given entry out of the pending state, all or nothing
    ///
    /// Each stored row must still be pending when the write lands; an entry
    /// reviewed by someone else since it was read fails the whole batch.
    /// Hours and other fields are never rewritten.
    fn update_statuses(&mut self, entries: &[ImpactEntry]) -> Result<(), Self::Error>;
}

/// Query criteria for retrieving entries
#[derive(Debug, Clone, Default)]
pub struct EntryQuery {
    /// Filter by organization
    pub org_id: Option<String>,

    /// Filter by volunteer
    pub volunteer_id: Option<String>,

    /// Filter by status
    pub status: Option<StatusKind>,

    /// Only entries logged at or before this instant
    pub created_before: Option<DateTime<Utc>>,

    /// Maximum results to return
    pub limit: Option<usize>,
}

impl EntryQuery {
    /// Pending entries logged at or before `cutoff`, the auto-verify candidates
    pub fn pending_before(cutoff: DateTime<Utc>) -> Self {
        Self {
            status: Some(StatusKind::Pending),
            created_before: Some(cutoff),
            ..Default::default()
        }
    }

    /// Whether an entry satisfies every filter except `limit`
    pub fn matches(&self, entry: &ImpactEntry) -> bool {
        self.org_id.as_deref().map_or(true, |org| entry.org() == Some(org))
            && self
                .volunteer_id
                .as_deref()
                .map_or(true, |v| entry.volunteer_id == v)
            && self.status.map_or(true, |s| entry.verification.kind() == s)
            && self.created_before.map_or(true, |t| entry.created_at <= t)
    }
}
