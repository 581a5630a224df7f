//! Impact Idol Verification
//!
//! Reviewer-facing operations on logged hours: approve, approve-all and
//! dispute. The service
//! - checks the reviewer's session may act for each entry's organization,
//! - applies the pure transitions from [`impact_domain::workflow`],
//! - persists the result through an [`impact_domain::traits::EntryStore`].
//!
//! Batch approvals validate every entry before anything is written, and the
//! store commits them in one call.
//!
//! # Examples
//!
//! ```no_run
//! use impact_domain::VerificationTier;
//! use impact_store::SqliteStore;
//! use impact_verification::{ReviewerSession, VerificationConfig, VerificationService};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = SqliteStore::new("impact.db")?;
//! let service = VerificationService::new(VerificationConfig::default());
//! let session = ReviewerSession::org_admin("user-42", ["org-pantry"]);
//!
//! # let entry_id = impact_domain::EntryId::new();
//! service.approve(&mut store, &session, entry_id, VerificationTier::Gold)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod service;
mod session;

pub use config::VerificationConfig;
pub use error::VerificationServiceError;
pub use service::VerificationService;
pub use session::{Persona, ReviewerSession};
