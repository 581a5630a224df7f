//! Impact Janitor
//!
//! Background service that verifies volunteer hours nobody reviewed in time.
//!
//! # Overview
//!
//! Pending entries are reviewed by organization admins. An entry still pending
//! 48 hours after it was logged is verified automatically at the Silver tier.
//! The janitor finds those entries on a schedule and commits them as one
//! batch per sweep.
//!
//! # Usage
//!
//! ## One-time Sweep
//!
//! ```no_run
//! use chrono::Utc;
//! use impact_janitor::AutoVerifier;
//! use impact_store::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = SqliteStore::new("impact.db")?;
//! let mut verifier = AutoVerifier::default_config();
//!
//! let metrics = verifier.sweep(&mut store, Utc::now())?;
//! println!("{}", metrics.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Background Worker
//!
//! ```no_run
//! use impact_janitor::{JanitorConfig, JanitorWorker};
//! use impact_store::SqliteStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SqliteStore::new("impact.db")?;
//!     let mut worker = JanitorWorker::new(JanitorConfig::aggressive());
//!     worker.run(store).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! auto_verify_after_hours = 48
//! sweep_interval_minutes = 15
//! batch_limit = 500
//! dry_run = false
//! database_path = "impact.db"
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod metrics;
mod verifier;
mod worker;

pub use config::JanitorConfig;
pub use error::JanitorError;
pub use metrics::{AutoVerifyMetrics, UNASSIGNED_ORG};
pub use verifier::AutoVerifier;
pub use worker::JanitorWorker;
