//! CancelHandler - explicit membership cancellation.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::MembershipId;
use crate::domain::membership::{Membership, MembershipError};
use crate::ports::{Clock, MembershipStore};

/// Command to cancel a membership.
#[derive(Debug, Clone)]
pub struct CancelCommand {
    pub membership_id: MembershipId,
    /// Reason given by the user or admin, recorded on the aggregate.
    pub motivo: String,
}

/// Handler for cancellations.
///
/// Any non-terminal state can cancel; `cancelada` is terminal and a
/// second cancel surfaces as `InvalidStateTransition`. The record is
/// kept for history, never deleted.
pub struct CancelHandler {
    store: Arc<dyn MembershipStore>,
    clock: Arc<dyn Clock>,
}

impl CancelHandler {
    pub fn new(store: Arc<dyn MembershipStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn handle(&self, cmd: CancelCommand) -> Result<Membership, MembershipError> {
        let now = self.clock.now();

        let mut membership = self
            .store
            .find_by_id(&cmd.membership_id)
            .await?
            .ok_or(MembershipError::NotFound(cmd.membership_id))?;
        membership.normalize(now);

        membership.cancel(cmd.motivo, now)?;

        let expected = membership.version;
        membership.version = self.store.save(&membership, expected).await?;

        info!(
            membership_id = %membership.id,
            motivo = membership.motivo_cancelacion.as_deref().unwrap_or(""),
            "membership cancelled"
        );

        Ok(membership)
    }
}
