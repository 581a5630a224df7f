//! Impact Idol Storage Layer
//!
//! Implements the EntryStore trait using SQLite.
//!
//! The backend owns the production database; this store is the reference
//! adapter used by the auto-verify janitor and by integration tests.
//!
//! # Examples
//!
//! ```no_run
//! use impact_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for entry operations
//! ```

#![warn(missing_docs)]

use chrono::{DateTime, NaiveDate, Utc};
use impact_domain::traits::{EntryQuery, EntryStore};
use impact_domain::{EntryId, ImpactEntry, StatusKind, VerificationStatus, VerificationTier};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT_COLUMNS: &str = "SELECT id, volunteer_id, hours, status, tier, dispute_reason, \
     org_id, cause_id, date, created_at FROM entries";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Entry not found
    #[error("Entry not found: {0}")]
    NotFound(EntryId),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Entry with the same ID already stored
    #[error("Duplicate entry: {0}")]
    Duplicate(EntryId),

    /// Entry left the pending state after it was read
    #[error("Entry {0} is no longer pending")]
    Conflict(EntryId),
}

/// SQLite-based implementation of EntryStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    /// Convert EntryId to bytes for storage
    fn entry_id_to_bytes(id: EntryId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    /// Convert bytes to EntryId
    fn bytes_to_entry_id(bytes: &[u8]) -> Result<EntryId, StoreError> {
        let arr: [u8; 16] = bytes.try_into().map_err(|_| {
            StoreError::InvalidData(format!("Expected 16 bytes for EntryId, got {}", bytes.len()))
        })?;
        Ok(EntryId::from_value(u128::from_be_bytes(arr)))
    }

    /// Split a status into its (status, tier, reason) columns
    fn status_columns(status: &VerificationStatus) -> (&'static str, Option<&'static str>, Option<&str>) {
        (
            status.kind().as_str(),
            status.tier().map(|t| t.as_str()),
            status.dispute_reason(),
        )
    }

    /// Rebuild a status from its columns
    fn columns_to_status(
        status: &str,
        tier: Option<String>,
        reason: Option<String>,
    ) -> Result<VerificationStatus, StoreError> {
        let kind = StatusKind::parse(status)
            .ok_or_else(|| StoreError::InvalidData(format!("Unknown status: {}", status)))?;

        match kind {
            StatusKind::Pending => Ok(VerificationStatus::Pending),
            StatusKind::Verified => match tier {
                None => Ok(VerificationStatus::VerifiedUntiered),
                Some(t) => VerificationTier::parse(&t)
                    .map(VerificationStatus::Verified)
                    .ok_or_else(|| StoreError::InvalidData(format!("Unknown tier: {}", t))),
            },
            StatusKind::Disputed => Ok(VerificationStatus::Disputed {
                reason: reason.unwrap_or_default(),
            }),
        }
    }

    fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<ImpactEntry> {
        fn conversion<E>(column: usize, kind: rusqlite::types::Type) -> impl FnOnce(E) -> rusqlite::Error
        where
            E: std::error::Error + Send + Sync + 'static,
        {
            move |e| rusqlite::Error::FromSqlConversionFailure(column, kind, Box::new(e))
        }

        let id_bytes: Vec<u8> = row.get(0)?;
        let id = Self::bytes_to_entry_id(&id_bytes)
            .map_err(conversion(0, rusqlite::types::Type::Blob))?;

        let status: String = row.get(3)?;
        let verification = Self::columns_to_status(&status, row.get(4)?, row.get(5)?)
            .map_err(conversion(3, rusqlite::types::Type::Text))?;

        let date: String = row.get(8)?;
        let date = NaiveDate::parse_from_str(&date, DATE_FORMAT)
            .map_err(conversion(8, rusqlite::types::Type::Text))?;

        let created_millis: i64 = row.get(9)?;
        let created_at = DateTime::<Utc>::from_timestamp_millis(created_millis).ok_or_else(|| {
            conversion(9, rusqlite::types::Type::Integer)(StoreError::InvalidData(format!(
                "Timestamp out of range: {}",
                created_millis
            )))
        })?;

        ImpactEntry::restore(
            id,
            row.get(1)?,
            row.get(2)?,
            verification,
            row.get(6)?,
            row.get(7)?,
            date,
            created_at,
        )
        .map_err(conversion(2, rusqlite::types::Type::Real))
    }

    /// Number of stored entries
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl EntryStore for SqliteStore {
    type Error = StoreError;

    fn insert_entry(&mut self, entry: ImpactEntry) -> Result<EntryId, Self::Error> {
        let id_bytes = Self::entry_id_to_bytes(entry.id);

        let exists: bool = self
            .conn
            .query_row("SELECT 1 FROM entries WHERE id = ?1", params![&id_bytes], |_| Ok(true))
            .optional()?
            .unwrap_or(false);

        if exists {
            return Err(StoreError::Duplicate(entry.id));
        }

        let (status, tier, reason) = Self::status_columns(&entry.verification);

        self.conn.execute(
            "INSERT INTO entries (id, volunteer_id, hours, status, tier, dispute_reason, org_id, cause_id, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                &id_bytes,
                &entry.volunteer_id,
                entry.hours(),
                status,
                tier,
                reason,
                entry.org(),
                entry.cause(),
                entry.date.format(DATE_FORMAT).to_string(),
                entry.created_at.timestamp_millis(),
            ],
        )?;

        Ok(entry.id)
    }

    fn get_entry(&self, id: EntryId) -> Result<Option<ImpactEntry>, Self::Error> {
        let id_bytes = Self::entry_id_to_bytes(id);

        let entry = self
            .conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![&id_bytes],
                Self::row_to_entry,
            )
            .optional()?;

        Ok(entry)
    }

    fn query_entries(&self, query: &EntryQuery) -> Result<Vec<ImpactEntry>, Self::Error> {
        let mut sql = format!("{} WHERE 1=1", SELECT_COLUMNS);
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(org_id) = &query.org_id {
            sql.push_str(" AND org_id = ?");
            params.push(Box::new(org_id.clone()));
        }

        if let Some(volunteer_id) = &query.volunteer_id {
            sql.push_str(" AND volunteer_id = ?");
            params.push(Box::new(volunteer_id.clone()));
        }

        if let Some(status) = query.status {
            sql.push_str(" AND status = ?");
            params.push(Box::new(status.as_str()));
        }

        if let Some(cutoff) = query.created_before {
            sql.push_str(" AND created_at <= ?");
            params.push(Box::new(cutoff.timestamp_millis()));
        }

        sql.push_str(" ORDER BY created_at, id");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            params.push(Box::new(limit as i64));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let entries = stmt
            .query_map(&param_refs[..], Self::row_to_entry)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    fn update_statuses(&mut self, entries: &[ImpactEntry]) -> Result<(), Self::Error> {
        let tx = self.conn.transaction()?;

        for entry in entries {
            let id_bytes = Self::entry_id_to_bytes(entry.id);
            let (status, tier, reason) = Self::status_columns(&entry.verification);
            let changed = tx.execute(
                "UPDATE entries SET status = ?1, tier = ?2, dispute_reason = ?3
                 WHERE id = ?4 AND status = 'pending'",
                params![status, tier, reason, &id_bytes],
            )?;

            // dropping the transaction rolls back earlier updates
            if changed == 0 {
                let exists = tx
                    .query_row("SELECT 1 FROM entries WHERE id = ?1", params![&id_bytes], |_| Ok(()))
                    .optional()?
                    .is_some();
                return Err(if exists {
                    StoreError::Conflict(entry.id)
                } else {
                    StoreError::NotFound(entry.id)
                });
            }
        }

        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_id_bytes_roundtrip() {
        let id = EntryId::new();
        let bytes = SqliteStore::entry_id_to_bytes(id);
        assert_eq!(bytes.len(), 16);
        assert_eq!(SqliteStore::bytes_to_entry_id(&bytes).unwrap(), id);
        assert!(SqliteStore::bytes_to_entry_id(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_status_columns() {
        let gold = VerificationStatus::Verified(VerificationTier::Gold);
        assert_eq!(SqliteStore::status_columns(&gold), ("verified", Some("gold"), None));

        let untiered = SqliteStore::columns_to_status("verified", None, None).unwrap();
        assert_eq!(untiered, VerificationStatus::VerifiedUntiered);

        let disputed =
            SqliteStore::columns_to_status("disputed", None, Some("late".to_string())).unwrap();
        assert_eq!(disputed.dispute_reason(), Some("late"));

        assert!(SqliteStore::columns_to_status("archived", None, None).is_err());
        assert!(SqliteStore::columns_to_status("verified", Some("bronze".into()), None).is_err());
    }
}
