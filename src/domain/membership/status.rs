//! Membership status state machine.
//!
//! Defines all possible membership states and the valid transitions of
//! the subscription lifecycle.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Membership subscription status.
///
/// Wire values are the Spanish names the product has always persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipStatus {
    /// Initial state: subscription requested, awaiting first payment.
    #[serde(rename = "pendiente")]
    Pending,

    /// Paid and usable: reservations, check-ins and confirmations allowed.
    #[serde(rename = "activa")]
    Active,

    /// Reserved by the data model. No pause/resume transitions are
    /// defined by the rule set; the only way out is an explicit cancel.
    #[serde(rename = "pausada")]
    Paused,

    /// Billing period lapsed without renewal. Reactivated by a new
    /// billing confirmation.
    #[serde(rename = "vencida")]
    Expired,

    /// Explicitly cancelled by the user or an admin. Terminal.
    #[serde(rename = "cancelada")]
    Cancelled,
}

impl MembershipStatus {
    /// Spanish wire name, used in messages and serialized payloads.
    pub fn wire_name(&self) -> &'static str {
        match self {
            MembershipStatus::Pending => "pendiente",
            MembershipStatus::Active => "activa",
            MembershipStatus::Paused => "pausada",
            MembershipStatus::Expired => "vencida",
            MembershipStatus::Cancelled => "cancelada",
        }
    }

    /// Whether this status counts toward the one-membership-per-user
    /// invariant enforced at subscription time.
    pub fn occupies_user_slot(&self) -> bool {
        matches!(self, MembershipStatus::Active | MembershipStatus::Paused)
    }
}

impl std::fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl StateMachine for MembershipStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MembershipStatus::*;
        matches!(
            (self, target),
            // From PENDING
            (Pending, Active)
                | (Pending, Cancelled)
            // From ACTIVE
                | (Active, Active) // Renewal
                | (Active, Expired)
                | (Active, Cancelled)
            // From PAUSED (reserved state; cancel is the only exit)
                | (Paused, Cancelled)
            // From EXPIRED
                | (Expired, Active)
                | (Expired, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MembershipStatus::*;
        match self {
            Pending => vec![Active, Cancelled],
            Active => vec![Active, Expired, Cancelled],
            Paused => vec![Cancelled],
            Expired => vec![Active, Cancelled],
            Cancelled => vec![],
        }
    }
}
