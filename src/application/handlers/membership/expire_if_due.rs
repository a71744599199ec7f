//! ExpireIfDueHandler - period expiry and monthly rollover sweep.
//!
//! There is no scheduler inside the engine; callers run this lazily
//! (on read paths or a coarse external cron). An active membership whose
//! period lapsed without a renewal payment expires; one whose renewal
//! was collected rolls its period and usage counter over instead.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::config::ClubConfig;
use crate::domain::foundation::MembershipId;
use crate::domain::membership::{
    rollover_if_due, Membership, MembershipError, MembershipStats, MembershipStatus,
    NotificationKind,
};
use crate::ports::{Clock, MembershipStore, Notifier};

/// What the sweep did to the membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpireOutcome {
    /// Period lapsed with no renewal payment: `activa -> vencida`.
    Expired,
    /// Renewal was collected; the period and usage counter rolled over.
    RolledOver,
    /// Nothing was due.
    Unchanged,
}

/// Result of the expiry/rollover sweep.
#[derive(Debug, Clone)]
pub struct ExpireResult {
    pub membership: Membership,
    pub outcome: ExpireOutcome,
}

/// Handler for the period expiry/rollover sweep.
pub struct ExpireIfDueHandler {
    store: Arc<dyn MembershipStore>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    config: ClubConfig,
}

impl ExpireIfDueHandler {
    pub fn new(
        store: Arc<dyn MembershipStore>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        config: ClubConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            clock,
            config,
        }
    }

    pub async fn handle(
        &self,
        membership_id: MembershipId,
    ) -> Result<ExpireResult, MembershipError> {
        let now = self.clock.now();

        let mut membership = self
            .store
            .find_by_id(&membership_id)
            .await?
            .ok_or(MembershipError::NotFound(membership_id))?;
        membership.normalize(now);

        if membership.status != MembershipStatus::Active {
            return Ok(ExpireResult {
                membership,
                outcome: ExpireOutcome::Unchanged,
            });
        }

        // A renewal signal moves `proxima_fecha_pago` past the current
        // period end; while the two coincide, no renewal has arrived.
        let renewed = membership.proxima_fecha_pago.is_after(&membership.fecha_fin);

        if now >= membership.fecha_fin && !renewed {
            membership.expire(now)?;

            let expected = membership.version;
            membership.version = self.store.save(&membership, expected).await?;

            info!(membership_id = %membership.id, "period lapsed without renewal");
            self.notify(
                &membership,
                NotificationKind::RenovacionFallida,
                json!({ "fecha_fin": membership.fecha_fin }),
            )
            .await;

            return Ok(ExpireResult {
                membership,
                outcome: ExpireOutcome::Expired,
            });
        }

        if rollover_if_due(&mut membership, now) {
            let stats = MembershipStats::derive(&membership, &self.config.badges, now);

            let expected = membership.version;
            membership.version = self.store.save(&membership, expected).await?;

            info!(
                membership_id = %membership.id,
                proxima_fecha_pago = ?membership.proxima_fecha_pago,
                "billing period rolled over"
            );
            self.notify(
                &membership,
                NotificationKind::ResumenMensual,
                json!({
                    "total_salidas": stats.total_salidas,
                    "salidas_este_mes": stats.salidas_este_mes,
                    "badge": stats.badge,
                }),
            )
            .await;

            return Ok(ExpireResult {
                membership,
                outcome: ExpireOutcome::RolledOver,
            });
        }

        Ok(ExpireResult {
            membership,
            outcome: ExpireOutcome::Unchanged,
        })
    }

    async fn notify(
        &self,
        membership: &Membership,
        kind: NotificationKind,
        payload: serde_json::Value,
    ) {
        if let Err(err) = self.notifier.notify(&membership.user_id, kind, payload).await {
            warn!(membership_id = %membership.id, %err, "notification dispatch failed");
        }
    }
}
