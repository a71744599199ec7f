//! BillingEventHandler - reacts to billing provider signals.
//!
//! The provider pushes "billing status changed" events; the engine never
//! calls out. An approved charge activates or renews, a rejected one
//! lapses an active membership, a pending one only records the provider
//! status.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::domain::membership::{
    BillingSignal, BillingStatus, Membership, MembershipError, MembershipStatus, NotificationKind,
};
use crate::ports::{Clock, MembershipStore, Notifier};

/// Handler for inbound billing signals.
pub struct BillingEventHandler {
    store: Arc<dyn MembershipStore>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl BillingEventHandler {
    pub fn new(
        store: Arc<dyn MembershipStore>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            notifier,
            clock,
        }
    }

    pub async fn handle(&self, signal: BillingSignal) -> Result<Membership, MembershipError> {
        let now = self.clock.now();

        let mut membership = self
            .store
            .find_by_billing_ref(&signal.subscription_ref)
            .await?
            .ok_or_else(|| MembershipError::UnknownBillingRef(signal.subscription_ref.clone()))?;
        membership.normalize(now);

        let notification = match signal.status {
            BillingStatus::Approved => {
                let first_activation = membership.status == MembershipStatus::Pending;
                if membership.status == MembershipStatus::Active {
                    membership.renew(now)?;
                } else {
                    membership.activate(now)?;
                }
                membership.billing.provider_status = Some(signal.status.wire_name().to_string());

                info!(
                    membership_id = %membership.id,
                    first_activation,
                    "billing approved, membership active"
                );

                Some(if first_activation {
                    (NotificationKind::Bienvenida, json!({}))
                } else {
                    (
                        NotificationKind::RenovacionExitosa,
                        json!({ "proxima_fecha_pago": membership.proxima_fecha_pago }),
                    )
                })
            }
            BillingStatus::Rejected => {
                membership.billing.provider_status = Some(signal.status.wire_name().to_string());
                if membership.status == MembershipStatus::Active {
                    membership.expire(now)?;
                    info!(membership_id = %membership.id, "renewal failed, membership lapsed");
                    Some((NotificationKind::RenovacionFallida, json!({})))
                } else {
                    // A rejected first charge leaves the membership
                    // pendiente; the user can retry checkout.
                    None
                }
            }
            BillingStatus::Pending => {
                membership.billing.provider_status = Some(signal.status.wire_name().to_string());
                None
            }
        };

        let expected = membership.version;
        membership.version = self.store.save(&membership, expected).await?;

        if let Some((kind, payload)) = notification {
            if let Err(err) = self.notifier.notify(&membership.user_id, kind, payload).await {
                warn!(membership_id = %membership.id, %err, "notification dispatch failed");
            }
        }

        Ok(membership)
    }
}
