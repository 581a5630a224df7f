//! Reviewer operations over stored entries

use crate::{ReviewerSession, VerificationConfig, VerificationServiceError};
use impact_domain::traits::EntryStore;
use impact_domain::{workflow, EntryId, ImpactEntry, ValidationError, VerificationTier};
use std::collections::HashSet;

/// Applies reviewer decisions to stored entries
///
/// Every operation loads the entries, checks the session, runs the pure
/// transition and persists the result. Nothing is written unless every
/// check passes.
pub struct VerificationService {
    config: VerificationConfig,
}

impl VerificationService {
    /// Create a new service with the given configuration
    pub fn new(config: VerificationConfig) -> Self {
        Self { config }
    }

    /// Create a service with default configuration
    pub fn default_config() -> Self {
        Self::new(VerificationConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    /// Verify one pending entry at `tier`
    pub fn approve<S: EntryStore>(
        &self,
        store: &mut S,
        session: &ReviewerSession,
        id: EntryId,
        tier: VerificationTier,
    ) -> Result<ImpactEntry, VerificationServiceError>
    where
        S::Error: std::fmt::Display,
    {
        let entry = self.load(store, session, id)?;
        let approved = workflow::approve(&entry, tier).map_err(|e| {
            tracing::warn!(entry = %id, user = %session.user_id, "Approve rejected: {}", e);
            e
        })?;

        Self::persist(store, std::slice::from_ref(&approved))?;
        tracing::info!(entry = %id, user = %session.user_id, tier = %tier, "Entry verified");
        Ok(approved)
    }

    /// Verify every listed entry at `tier`, or none of them
    ///
    /// Repeated IDs are approved once. Missing entries, entries outside the
    /// session's organizations and entries that are not pending all fail the
    /// whole batch before anything is written. When any ID is missing or
    /// unauthorized the error lists every offending ID of each kind;
    /// otherwise the workflow's own rejection names the non-pending entries.
    pub fn approve_all<S: EntryStore>(
        &self,
        store: &mut S,
        session: &ReviewerSession,
        ids: &[EntryId],
        tier: VerificationTier,
    ) -> Result<Vec<ImpactEntry>, VerificationServiceError>
    where
        S::Error: std::fmt::Display,
    {
        let mut seen = HashSet::new();
        let ids: Vec<EntryId> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();

        if ids.len() > self.config.max_batch_size {
            return Err(ValidationError::BatchTooLarge {
                size: ids.len(),
                max: self.config.max_batch_size,
            }
            .into());
        }

        let mut entries = Vec::with_capacity(ids.len());
        let mut missing = Vec::new();
        let mut unauthorized = Vec::new();
        for id in &ids {
            match self.load(store, session, *id) {
                Ok(entry) => entries.push(entry),
                Err(VerificationServiceError::NotFound(id)) => missing.push(id),
                Err(VerificationServiceError::Unauthorized { entry_id, .. }) => {
                    unauthorized.push(entry_id)
                }
                Err(e) => return Err(e),
            }
        }

        if !missing.is_empty() || !unauthorized.is_empty() {
            let not_pending = entries
                .iter()
                .filter(|e| !e.verification.is_pending())
                .map(|e| e.id)
                .collect();
            tracing::warn!(
                user = %session.user_id,
                missing = missing.len(),
                unauthorized = unauthorized.len(),
                "Batch approval rejected"
            );
            return Err(VerificationServiceError::BatchRejected {
                missing,
                unauthorized,
                not_pending,
            });
        }

        let approved = workflow::approve_all(&entries, tier).map_err(|e| {
            tracing::warn!(user = %session.user_id, batch = entries.len(), "Batch approval rejected: {}", e);
            e
        })?;

        Self::persist(store, &approved)?;
        tracing::info!(
            user = %session.user_id,
            tier = %tier,
            "Verified {} entries in one batch",
            approved.len()
        );
        Ok(approved)
    }

    /// Dispute one pending entry
    pub fn dispute<S: EntryStore>(
        &self,
        store: &mut S,
        session: &ReviewerSession,
        id: EntryId,
        reason: &str,
    ) -> Result<ImpactEntry, VerificationServiceError>
    where
        S::Error: std::fmt::Display,
    {
        let entry = self.load(store, session, id)?;

        let disputed = workflow::dispute(&entry, reason).map_err(|e| {
            tracing::warn!(entry = %id, user = %session.user_id, "Dispute rejected: {}", e);
            e
        })?;

        let len = reason.trim().chars().count();
        if len < self.config.min_dispute_reason_len {
            return Err(ValidationError::DisputeReasonTooShort {
                len,
                min: self.config.min_dispute_reason_len,
            }
            .into());
        }

        Self::persist(store, std::slice::from_ref(&disputed))?;
        tracing::info!(entry = %id, user = %session.user_id, "Entry disputed");
        Ok(disputed)
    }

    /// Fetch an entry the session is allowed to review
    fn load<S: EntryStore>(
        &self,
        store: &S,
        session: &ReviewerSession,
        id: EntryId,
    ) -> Result<ImpactEntry, VerificationServiceError>
    where
        S::Error: std::fmt::Display,
    {
        let entry = store
            .get_entry(id)
            .map_err(|e| VerificationServiceError::Store(e.to_string()))?
            .ok_or(VerificationServiceError::NotFound(id))?;

        if self.config.require_org_admin && !session.can_review(entry.org()) {
            tracing::warn!(entry = %id, user = %session.user_id, "Reviewer lacks access to entry");
            return Err(VerificationServiceError::Unauthorized {
                user_id: session.user_id.clone(),
                entry_id: id,
            });
        }

        Ok(entry)
    }

    fn persist<S: EntryStore>(store: &mut S, entries: &[ImpactEntry]) -> Result<(), VerificationServiceError>
    where
        S::Error: std::fmt::Display,
    {
        store
            .update_statuses(entries)
            .map_err(|e| VerificationServiceError::Store(e.to_string()))
    }
}
