//! Impact entry module - one logged volunteering activity

use crate::{ValidationError, VerificationStatus};
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

/// Unique identifier for an entry based on UUIDv7
///
/// UUIDv7 keeps identifiers chronologically sortable, so entries logged
/// later compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(u128);

impl EntryId {
    /// Generate a new UUIDv7-based EntryId
    ///
    /// # Examples
    ///
    /// ```
    /// use impact_domain::EntryId;
    ///
    /// let id = EntryId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create an EntryId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse an EntryId from its UUID string form
    ///
    /// # Examples
    ///
    /// ```
    /// use impact_domain::EntryId;
    ///
    /// let id = EntryId::new();
    /// let parsed = EntryId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid entry id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A logged volunteering activity
///
/// Hours never change after creation; corrections are new entries or
/// disputes. Transitions of [`verification`](Self::verification) belong
/// to [`crate::workflow`].
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactEntry {
    /// Unique identifier
    pub id: EntryId,

    /// Volunteer who logged the hours
    pub volunteer_id: String,

    /// Hours volunteered
    hours: f64,

    /// Lifecycle state, tier included
    pub verification: VerificationStatus,

    /// Hosting organization, if any
    pub org_id: Option<String>,

    /// Cause the work served, if any
    pub cause_id: Option<String>,

    /// Day the work happened
    pub date: NaiveDate,

    /// When the entry was logged
    pub created_at: DateTime<Utc>,
}

impl ImpactEntry {
    /// Create a new pending entry
    ///
    /// # Errors
    /// Returns [`ValidationError::NegativeHours`] for negative or non-finite hours.
    pub fn new(
        volunteer_id: impl Into<String>,
        hours: f64,
        date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(ValidationError::NegativeHours(hours));
        }

        Ok(Self {
            id: EntryId::new(),
            volunteer_id: volunteer_id.into(),
            hours,
            verification: VerificationStatus::Pending,
            org_id: None,
            cause_id: None,
            date,
            created_at,
        })
    }

    /// Rebuild an entry from stored fields
    ///
    /// Used by persistence adapters; the hours are re-validated.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: EntryId,
        volunteer_id: String,
        hours: f64,
        verification: VerificationStatus,
        org_id: Option<String>,
        cause_id: Option<String>,
        date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let mut entry = Self::new(volunteer_id, hours, date, created_at)?;
        entry.id = id;
        entry.verification = verification;
        entry.org_id = org_id;
        entry.cause_id = cause_id;
        Ok(entry)
    }

    /// Attach the hosting organization
    pub fn with_org(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    /// Attach the cause
    pub fn with_cause(mut self, cause_id: impl Into<String>) -> Self {
        self.cause_id = Some(cause_id.into());
        self
    }

    /// Set the verification state (snapshots and fixtures)
    pub fn with_status(mut self, verification: VerificationStatus) -> Self {
        self.verification = verification;
        self
    }

    /// Hours volunteered
    pub fn hours(&self) -> f64 {
        self.hours
    }

    /// Organization id, treating an empty string as absent
    pub fn org(&self) -> Option<&str> {
        self.org_id.as_deref().filter(|s| !s.is_empty())
    }

    /// Cause id, treating an empty string as absent
    pub fn cause(&self) -> Option<&str> {
        self.cause_id.as_deref().filter(|s| !s.is_empty())
    }
}
