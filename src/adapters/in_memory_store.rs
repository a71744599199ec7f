//! In-memory membership store.
//!
//! Reference implementation of the store port, including the two
//! guarantees a production adapter must reproduce: the compare-and-swap
//! on save and the one-active-membership-per-user constraint enforced
//! inside the same critical section as the write.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::foundation::{MembershipId, UserId};
use crate::domain::membership::{Membership, MembershipError};
use crate::ports::MembershipStore;

/// In-memory store keyed by membership id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipStore {
    memberships: Arc<RwLock<HashMap<MembershipId, Membership>>>,
}

impl InMemoryMembershipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored memberships (useful for tests).
    pub async fn count(&self) -> usize {
        self.memberships.read().await.len()
    }
}

#[async_trait]
impl MembershipStore for InMemoryMembershipStore {
    async fn insert(&self, membership: &Membership) -> Result<(), MembershipError> {
        let mut memberships = self.memberships.write().await;

        let slot_taken = memberships
            .values()
            .any(|m| m.user_id == membership.user_id && m.status.occupies_user_slot());
        if slot_taken || memberships.contains_key(&membership.id) {
            return Err(MembershipError::already_exists(membership.user_id.clone()));
        }

        memberships.insert(membership.id, membership.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &MembershipId,
    ) -> Result<Option<Membership>, MembershipError> {
        Ok(self.memberships.read().await.get(id).cloned())
    }

    async fn find_active_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Membership>, MembershipError> {
        Ok(self
            .memberships
            .read()
            .await
            .values()
            .find(|m| &m.user_id == user_id && m.status.occupies_user_slot())
            .cloned())
    }

    async fn find_by_billing_ref(
        &self,
        subscription_ref: &str,
    ) -> Result<Option<Membership>, MembershipError> {
        Ok(self
            .memberships
            .read()
            .await
            .values()
            .find(|m| m.billing.subscription_ref.as_deref() == Some(subscription_ref))
            .cloned())
    }

    async fn save(
        &self,
        membership: &Membership,
        expected_version: u64,
    ) -> Result<u64, MembershipError> {
        let mut memberships = self.memberships.write().await;

        let stored = memberships
            .get(&membership.id)
            .ok_or(MembershipError::NotFound(membership.id))?;

        if stored.version != expected_version {
            debug!(
                membership_id = %membership.id,
                expected = expected_version,
                actual = stored.version,
                "stale save rejected"
            );
            return Err(MembershipError::ConcurrentModification);
        }

        let mut updated = membership.clone();
        updated.version = expected_version + 1;
        let new_version = updated.version;
        memberships.insert(membership.id, updated);
        Ok(new_version)
    }
}
