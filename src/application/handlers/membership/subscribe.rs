//! SubscribeHandler - creates a membership awaiting first payment.

use std::sync::Arc;

use tracing::info;

use crate::config::ClubConfig;
use crate::domain::foundation::{MembershipId, UserId};
use crate::domain::membership::{Membership, MembershipError};
use crate::ports::{Clock, MembershipStore};

/// Command to request a club subscription.
#[derive(Debug, Clone)]
pub struct SubscribeCommand {
    pub user_id: UserId,
    /// Provider subscription reference, when checkout already created one.
    pub subscription_ref: Option<String>,
}

/// Handler for subscription requests.
///
/// The membership starts in `pendiente`; activation happens when the
/// billing provider confirms the first charge.
pub struct SubscribeHandler {
    store: Arc<dyn MembershipStore>,
    clock: Arc<dyn Clock>,
    config: ClubConfig,
}

impl SubscribeHandler {
    pub fn new(store: Arc<dyn MembershipStore>, clock: Arc<dyn Clock>, config: ClubConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub async fn handle(&self, cmd: SubscribeCommand) -> Result<Membership, MembershipError> {
        let now = self.clock.now();

        // Fast check; the store re-validates inside its own atomic unit,
        // which is what actually guards concurrent subscriptions.
        if self.store.find_active_by_user(&cmd.user_id).await?.is_some() {
            return Err(MembershipError::already_exists(cmd.user_id));
        }

        let membership = Membership::subscribe(
            MembershipId::new(),
            cmd.user_id,
            cmd.subscription_ref,
            self.config.limites.salidas_por_semana,
            now,
        );

        self.store.insert(&membership).await?;

        info!(
            membership_id = %membership.id,
            user_id = %membership.user_id,
            "membership created, awaiting first payment"
        );

        Ok(membership)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedClock, InMemoryMembershipStore};
    use crate::domain::foundation::Timestamp;
    use crate::domain::membership::MembershipStatus;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    fn handler(store: Arc<InMemoryMembershipStore>) -> SubscribeHandler {
        SubscribeHandler::new(
            store,
            Arc::new(FixedClock::at(ts("2026-03-01T12:00:00Z"))),
            ClubConfig::default(),
        )
    }

    fn cmd(user: &str) -> SubscribeCommand {
        SubscribeCommand {
            user_id: UserId::new(user).unwrap(),
            subscription_ref: Some(format!("mp-{}", user)),
        }
    }

    #[tokio::test]
    async fn creates_pending_membership_with_config_seeded_cap() {
        let store = Arc::new(InMemoryMembershipStore::new());
        let membership = handler(store.clone()).handle(cmd("user-1")).await.unwrap();

        assert_eq!(membership.status, MembershipStatus::Pending);
        assert_eq!(membership.uso_mensual.limite_semanal, 2);
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn rejects_user_with_active_membership() {
        let store = Arc::new(InMemoryMembershipStore::new());
        let handler = handler(store.clone());

        let first = handler.handle(cmd("user-1")).await.unwrap();
        let mut active = first.clone();
        active.activate(ts("2026-03-01T13:00:00Z")).unwrap();
        store.save(&active, 0).await.unwrap();

        let err = handler.handle(cmd("user-1")).await.unwrap_err();
        assert!(matches!(err, MembershipError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn allows_resubscription_after_cancellation() {
        let store = Arc::new(InMemoryMembershipStore::new());
        let handler = handler(store.clone());

        let first = handler.handle(cmd("user-1")).await.unwrap();
        let mut cancelled = first.clone();
        cancelled
            .cancel("no me convenció", ts("2026-03-02T12:00:00Z"))
            .unwrap();
        store.save(&cancelled, 0).await.unwrap();

        assert!(handler.handle(cmd("user-1")).await.is_ok());
    }
}
