//! Membership status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Membership status of a client.
///
/// Only `Active` members may buy from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipStatus {
    /// Signed up but never paid, or switched off by an admin.
    #[default]
    Inactive,

    /// Paid and within the current period.
    Active,

    /// Period lapsed. Flipped lazily when the status is read.
    Expired,
}

impl MembershipStatus {
    /// Returns true if this status allows store purchases.
    pub fn is_active(&self) -> bool {
        matches!(self, MembershipStatus::Active)
    }

    /// Stable storage/wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Inactive => "INACTIVE",
            MembershipStatus::Active => "ACTIVE",
            MembershipStatus::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INACTIVE" => Ok(MembershipStatus::Inactive),
            "ACTIVE" => Ok(MembershipStatus::Active),
            "EXPIRED" => Ok(MembershipStatus::Expired),
            other => Err(format!("Unknown membership status: {}", other)),
        }
    }
}

impl StateMachine for MembershipStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use MembershipStatus::*;
        match self {
            Inactive => vec![Active],
            Active => vec![Active, Expired, Inactive], // Active -> Active is a renewal
            Expired => vec![Active, Inactive],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ════════════════════════════════════════════════════════════════════════════
    // Transitions
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn inactive_can_only_become_active() {
        let status = MembershipStatus::Inactive;
        assert!(status.can_transition_to(&MembershipStatus::Active));
        assert!(!status.can_transition_to(&MembershipStatus::Expired));
        assert!(!status.can_transition_to(&MembershipStatus::Inactive));
    }

    #[test]
    fn active_can_renew_expire_or_be_switched_off() {
        let status = MembershipStatus::Active;
        assert_eq!(
            status.transition_to(MembershipStatus::Active),
            Ok(MembershipStatus::Active)
        );
        assert!(status.can_transition_to(&MembershipStatus::Expired));
        assert!(status.can_transition_to(&MembershipStatus::Inactive));
    }

    #[test]
    fn expired_can_be_reactivated() {
        assert!(MembershipStatus::Expired.can_transition_to(&MembershipStatus::Active));
        assert!(!MembershipStatus::Expired.can_transition_to(&MembershipStatus::Expired));
    }

    #[test]
    fn no_status_is_terminal() {
        for status in [
            MembershipStatus::Inactive,
            MembershipStatus::Active,
            MembershipStatus::Expired,
        ] {
            assert!(!status.is_terminal());
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Representation
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn serializes_screaming_case() {
        let json = serde_json::to_string(&MembershipStatus::Expired).unwrap();
        assert_eq!(json, "\"EXPIRED\"");
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("active".parse::<MembershipStatus>(), Ok(MembershipStatus::Active));
        assert!("paused".parse::<MembershipStatus>().is_err());
    }

    #[test]
    fn defaults_to_inactive() {
        assert_eq!(MembershipStatus::default(), MembershipStatus::Inactive);
        assert!(!MembershipStatus::default().is_active());
    }
}
