//! Notification dispatch port.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::foundation::UserId;
use crate::domain::membership::{MembershipError, NotificationKind};

/// Fire-and-forget member notifications.
///
/// The engine decides *when* to emit; transport (push/email/socket) is
/// entirely external. Handlers log and continue on failure: a dropped
/// notification never fails the domain operation that produced it.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        user_id: &UserId,
        kind: NotificationKind,
        payload: Value,
    ) -> Result<(), MembershipError>;
}
