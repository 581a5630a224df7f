//! Verification status of an impact entry
//!
//! Status and tier are a single tagged value, so a tier can only exist on a
//! verified entry.

use crate::VerificationTier;

/// Where an entry sits in the verification lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    /// Logged, awaiting review by the organization
    Pending,

    /// Verified at the given tier
    Verified(VerificationTier),

    /// Verified before tiers existed; scored below Silver
    VerifiedUntiered,

    /// Rejected by the organization
    Disputed {
        /// Why the organization disputed the hours
        reason: String,
    },
}

/// Status without its payload, for queries and storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Awaiting review
    Pending,
    /// Verified, with or without a tier
    Verified,
    /// Disputed
    Disputed,
}

impl StatusKind {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::Pending => "pending",
            StatusKind::Verified => "verified",
            StatusKind::Disputed => "disputed",
        }
    }

    /// Parse a status name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(StatusKind::Pending),
            "verified" => Some(StatusKind::Verified),
            "disputed" => Some(StatusKind::Disputed),
            _ => None,
        }
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl VerificationStatus {
    /// The payload-free kind of this status
    pub fn kind(&self) -> StatusKind {
        match self {
            VerificationStatus::Pending => StatusKind::Pending,
            VerificationStatus::Verified(_) | VerificationStatus::VerifiedUntiered => {
                StatusKind::Verified
            }
            VerificationStatus::Disputed { .. } => StatusKind::Disputed,
        }
    }

    /// Tier, present only when verified at a tier
    pub fn tier(&self) -> Option<VerificationTier> {
        match self {
            VerificationStatus::Verified(tier) => Some(*tier),
            _ => None,
        }
    }

    /// Dispute reason, present only when disputed
    pub fn dispute_reason(&self) -> Option<&str> {
        match self {
            VerificationStatus::Disputed { reason } => Some(reason.as_str()),
            _ => None,
        }
    }

    /// Whether the entry still awaits review
    pub fn is_pending(&self) -> bool {
        matches!(self, VerificationStatus::Pending)
    }

    /// Whether the entry has been verified (at any tier)
    pub fn is_verified(&self) -> bool {
        self.kind() == StatusKind::Verified
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationStatus::Verified(tier) => write!(f, "verified ({})", tier),
            other => f.write_str(other.kind().as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_only_on_verified() {
        assert_eq!(VerificationStatus::Pending.tier(), None);
        assert_eq!(
            VerificationStatus::Verified(VerificationTier::Gold).tier(),
            Some(VerificationTier::Gold)
        );
        assert_eq!(VerificationStatus::VerifiedUntiered.tier(), None);
        let disputed = VerificationStatus::Disputed { reason: "no-show".to_string() };
        assert_eq!(disputed.tier(), None);
        assert_eq!(disputed.dispute_reason(), Some("no-show"));
    }

    #[test]
    fn test_kind() {
        assert!(VerificationStatus::VerifiedUntiered.is_verified());
        assert!(VerificationStatus::Pending.is_pending());
        assert_eq!(StatusKind::parse("Disputed"), Some(StatusKind::Disputed));
        assert_eq!(StatusKind::parse("archived"), None);
    }

    #[test]
    fn test_display() {
        let status = VerificationStatus::Verified(VerificationTier::Platinum);
        assert_eq!(status.to_string(), "verified (platinum)");
        assert_eq!(VerificationStatus::Pending.to_string(), "pending");
    }
}
