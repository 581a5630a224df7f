//! Organization statistics: retention and no-show rates

use crate::geo::round_to;
use chrono::NaiveDate;

/// A volunteer's activity with one organization
#[derive(Debug, Clone, PartialEq)]
pub struct Volunteer {
    /// Volunteer identifier (pass-through)
    pub id: String,
    /// Date of the first logged activity
    pub first_activity: NaiveDate,
    /// Date of the most recent logged activity
    pub last_activity: NaiveDate,
    /// Number of activities logged
    pub activity_count: u32,
}

impl Volunteer {
    /// Whether the volunteer came back after their first activity
    pub fn is_returning(&self) -> bool {
        self.activity_count > 1
    }
}

/// Outcome of a signup for an opportunity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationStatus {
    /// Signed up, event not yet held
    Registered,
    /// Showed up
    Attended,
    /// Did not show up
    NoShow,
    /// Cancelled ahead of time
    Cancelled,
    /// Waiting for a free slot
    Waitlisted,
}

impl RegistrationStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Registered => "registered",
            RegistrationStatus::Attended => "attended",
            RegistrationStatus::NoShow => "no_show",
            RegistrationStatus::Cancelled => "cancelled",
            RegistrationStatus::Waitlisted => "waitlisted",
        }
    }

    /// Parse a status name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "registered" => Some(RegistrationStatus::Registered),
            "attended" => Some(RegistrationStatus::Attended),
            "no_show" => Some(RegistrationStatus::NoShow),
            "cancelled" => Some(RegistrationStatus::Cancelled),
            "waitlisted" => Some(RegistrationStatus::Waitlisted),
            _ => None,
        }
    }
}

/// One signup for an opportunity
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    /// Volunteer who signed up (pass-through)
    pub volunteer_id: String,
    /// Outcome of the signup
    pub status: RegistrationStatus,
}

impl Registration {
    /// Create a registration snapshot
    pub fn new(volunteer_id: impl Into<String>, status: RegistrationStatus) -> Self {
        Self {
            volunteer_id: volunteer_id.into(),
            status,
        }
    }
}

/// Percent of volunteers with more than one activity, rounded to 0.1
///
/// Returns 0 when there are no volunteers.
pub fn retention_rate(volunteers: &[Volunteer]) -> f64 {
    percentage(
        volunteers.iter().filter(|v| v.is_returning()).count(),
        volunteers.len(),
    )
}

/// Percent of registrations that were no-shows, rounded to 0.1
///
/// Returns 0 when there are no registrations.
pub fn no_show_rate(registrations: &[Registration]) -> f64 {
    percentage(
        registrations
            .iter()
            .filter(|r| r.status == RegistrationStatus::NoShow)
            .count(),
        registrations.len(),
    )
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(part as f64 / total as f64 * 100.0, 1)
}

/// Dashboard numbers for one organization
#[derive(Debug, Clone, PartialEq)]
pub struct OrgStats {
    /// Volunteers with at least one activity
    pub volunteer_count: usize,
    /// See [`retention_rate`]
    pub retention_rate: f64,
    /// See [`no_show_rate`]
    pub no_show_rate: f64,
}

impl OrgStats {
    /// Compute all rates from snapshots
    pub fn compute(volunteers: &[Volunteer], registrations: &[Registration]) -> Self {
        Self {
            volunteer_count: volunteers.len(),
            retention_rate: retention_rate(volunteers),
            no_show_rate: no_show_rate(registrations),
        }
    }
}
