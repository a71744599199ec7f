//! Notifier adapters.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;
use tracing::info;

use crate::domain::foundation::UserId;
use crate::domain::membership::{MembershipError, NotificationKind};
use crate::ports::Notifier;

/// Logs notifications instead of delivering them.
///
/// The default transport stub for development: deployments replace it
/// with the push gateway adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(
        &self,
        user_id: &UserId,
        kind: NotificationKind,
        payload: Value,
    ) -> Result<(), MembershipError> {
        info!(user_id = %user_id, kind = %kind, %payload, "notification");
        Ok(())
    }
}

/// Captures notifications for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(UserId, NotificationKind, Value)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications sent so far, in order.
    pub fn sent(&self) -> Vec<(UserId, NotificationKind, Value)> {
        self.sent.lock().unwrap().clone()
    }

    /// Kinds sent so far, in order.
    pub fn kinds(&self) -> Vec<NotificationKind> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, kind, _)| *kind)
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(
        &self,
        user_id: &UserId,
        kind: NotificationKind,
        payload: Value,
    ) -> Result<(), MembershipError> {
        self.sent
            .lock()
            .unwrap()
            .push((user_id.clone(), kind, payload));
        Ok(())
    }
}
