//! Membership store port.
//!
//! The document store itself is opaque; this port only promises
//! find/update-by-id semantics plus the two guarantees the engine cannot
//! live without:
//!
//! - **Conditional saves**: `save` compares the caller's expected version
//!   against the stored one and rejects stale writes, so two concurrent
//!   reservations at the weekly cap can never both land.
//! - **Single-slot uniqueness**: `insert` rejects a second membership for
//!   a user who already holds an active or paused one, within the same
//!   atomic unit as the write.

use async_trait::async_trait;

use crate::domain::foundation::{MembershipId, UserId};
use crate::domain::membership::{Membership, MembershipError};

/// Repository port for Membership aggregate persistence.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Persists a brand-new membership.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the user already holds an active/paused
    ///   membership
    /// - `Infrastructure` on persistence failure
    async fn insert(&self, membership: &Membership) -> Result<(), MembershipError>;

    /// Find a membership by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &MembershipId)
        -> Result<Option<Membership>, MembershipError>;

    /// Find the membership currently occupying a user's active/paused
    /// slot, if any.
    async fn find_active_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Membership>, MembershipError>;

    /// Find a membership by the billing provider's subscription
    /// reference. Used to route inbound billing signals.
    async fn find_by_billing_ref(
        &self,
        subscription_ref: &str,
    ) -> Result<Option<Membership>, MembershipError>;

    /// Conditionally persists an updated membership.
    ///
    /// Succeeds only when `expected_version` matches the stored version,
    /// and returns the new version. Read-modify-write cycles that lost
    /// the race get `ConcurrentModification`; retrying is the caller's
    /// decision, never the engine's.
    ///
    /// # Errors
    ///
    /// - `ConcurrentModification` on a version mismatch
    /// - `NotFound` if the membership was never inserted
    /// - `Infrastructure` on persistence failure
    async fn save(
        &self,
        membership: &Membership,
        expected_version: u64,
    ) -> Result<u64, MembershipError>;
}
