//! Tier module - trust levels for verified entries

/// Trust level assigned when an entry is verified
///
/// - Silver: self-reported or email-only confirmation (also the auto-verify tier)
/// - Gold: QR or GPS check-in
/// - Platinum: squad and organization co-verified
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VerificationTier {
    /// Self-reported or email-only
    Silver,

    /// Checked in on site (QR code or GPS)
    Gold,

    /// Co-verified by squad and organization
    Platinum,
}

impl VerificationTier {
    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationTier::Silver => "silver",
            VerificationTier::Gold => "gold",
            VerificationTier::Platinum => "platinum",
        }
    }

    /// Parse a tier from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "silver" => Some(VerificationTier::Silver),
            "gold" => Some(VerificationTier::Gold),
            "platinum" => Some(VerificationTier::Platinum),
            _ => None,
        }
    }

    /// Default score points for an entry verified at this tier
    pub fn points(&self) -> u32 {
        match self {
            VerificationTier::Silver => 5,
            VerificationTier::Gold => 7,
            VerificationTier::Platinum => 10,
        }
    }
}

impl std::str::FromStr for VerificationTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid tier: {}", s))
    }
}

impl std::fmt::Display for VerificationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(VerificationTier::Silver < VerificationTier::Gold);
        assert!(VerificationTier::Gold < VerificationTier::Platinum);
    }

    #[test]
    fn test_tier_parse() {
        assert_eq!(VerificationTier::parse("GOLD"), Some(VerificationTier::Gold));
        assert_eq!("platinum".parse::<VerificationTier>(), Ok(VerificationTier::Platinum));
        assert!("bronze".parse::<VerificationTier>().is_err());
    }

    #[test]
    fn test_tier_points() {
        assert_eq!(VerificationTier::Platinum.points(), 10);
        assert_eq!(VerificationTier::Gold.points(), 7);
        assert_eq!(VerificationTier::Silver.points(), 5);
    }
}
