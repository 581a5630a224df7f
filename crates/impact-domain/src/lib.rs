//! Impact Idol Domain Layer
//!
//! This crate contains the core business logic for tracking, verifying and
//! valuing volunteer work. It performs no I/O: every function takes immutable
//! snapshots of entries, volunteers or registrations and returns derived values.
//!
//! ## Key Concepts
//!
//! - **Impact entry**: one logged volunteering activity (hours on a date)
//! - **Verification status**: `Pending`, `Verified(tier)` or `Disputed(reason)`
//! - **Tier**: trust level of a verified entry (Silver → Gold → Platinum)
//! - **Auto-verify**: entries left pending for 48 hours become Silver
//!
//! ## Modules
//!
//! - [`geo`]: Haversine distance, radius filtering and bounding boxes
//! - [`valuation`]: monetary value, verification score, impact summaries
//! - [`stats`]: organization retention and no-show rates
//! - [`workflow`]: the verification state machine
//! - [`traits`]: the persistence boundary implemented by other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entry;
pub mod error;
pub mod geo;
pub mod stats;
pub mod status;
pub mod tier;
pub mod traits;
pub mod valuation;
pub mod workflow;

// Re-exports for convenience
pub use entry::{EntryId, ImpactEntry};
pub use error::{ValidationError, VerificationError};
pub use geo::Coordinates;
pub use stats::{Registration, RegistrationStatus, Volunteer};
pub use status::{StatusKind, VerificationStatus};
pub use tier::VerificationTier;
pub use valuation::ScoringConfig;
