//! Reviewer sessions
//!
//! The acting user and persona are passed explicitly into every operation
//! instead of being read from shared global state.

use std::collections::HashSet;

/// Role the user is acting in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persona {
    /// Individual volunteer; may not review hours
    Volunteer,

    /// Administrator of one or more organizations
    OrgAdmin {
        /// Organizations this admin reviews for
        org_ids: HashSet<String>,
    },

    /// Platform staff; may review any entry
    PlatformAdmin,
}

/// Who is performing a reviewer operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewerSession {
    /// Acting user
    pub user_id: String,
    /// Persona the user is acting in
    pub persona: Persona,
}

impl ReviewerSession {
    /// Session for a volunteer
    pub fn volunteer(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            persona: Persona::Volunteer,
        }
    }

    /// Session for an organization admin
    pub fn org_admin<I, S>(user_id: impl Into<String>, org_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user_id: user_id.into(),
            persona: Persona::OrgAdmin {
                org_ids: org_ids.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// Session for platform staff
    pub fn platform_admin(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            persona: Persona::PlatformAdmin,
        }
    }

    /// Whether this session may review hours logged with `org_id`
    ///
    /// Entries without an organization can only be reviewed by platform staff.
    pub fn can_review(&self, org_id: Option<&str>) -> bool {
        match (&self.persona, org_id) {
            (Persona::PlatformAdmin, _) => true,
            (Persona::OrgAdmin { org_ids }, Some(org)) => org_ids.contains(org),
            _ => false,
        }
    }
}
