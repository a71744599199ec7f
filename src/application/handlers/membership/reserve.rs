//! ReserveHandler - reserves a covered outing against the membership.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::config::ClubConfig;
use crate::domain::foundation::MembershipId;
use crate::domain::membership::{
    can_reserve, is_eligible, Membership, MembershipError, NotificationKind, ReservationDecision,
    ReservationDenial, Salida,
};
use crate::ports::{Clock, MembershipStore, Notifier};

/// Command to reserve an outing.
#[derive(Debug, Clone)]
pub struct ReserveCommand {
    pub membership_id: MembershipId,
    /// Snapshot of the outing being reserved.
    pub salida: Salida,
}

/// Result of a successful reservation.
#[derive(Debug, Clone)]
pub struct ReserveResult {
    pub membership: Membership,
    /// Slots left in the outing's week after this reservation.
    pub remaining_this_week: u32,
}

/// Handler for reservations.
///
/// Order: eligibility of the outing, then the reservation guard (state,
/// penalty, weekly cap), then the history append and the conditional
/// save. A denial leaves the aggregate untouched.
pub struct ReserveHandler {
    store: Arc<dyn MembershipStore>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    config: ClubConfig,
}

impl ReserveHandler {
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

    pub async fn handle(&self, cmd: ReserveCommand) -> Result<ReserveResult, MembershipError> {
        let now = self.clock.now();

        let mut membership = self
            .store
            .find_by_id(&cmd.membership_id)
            .await?
            .ok_or(MembershipError::NotFound(cmd.membership_id))?;
        membership.normalize(now);

        if !is_eligible(&self.config, cmd.salida.precio, Some(&cmd.salida.deporte)) {
            return Err(MembershipError::not_eligible(
                cmd.salida.precio,
                Some(&cmd.salida.deporte),
            ));
        }

        match can_reserve(&membership, cmd.salida.fecha, now) {
            ReservationDecision::Denied(denial) => {
                if let ReservationDenial::WeeklyCapReached { limite } = &denial {
                    let payload = json!({
                        "limite_semanal": limite,
                        "salida_id": cmd.salida.id,
                    });
                    if let Err(err) = self
                        .notifier
                        .notify(&membership.user_id, NotificationKind::LimiteAlcanzado, payload)
                        .await
                    {
                        warn!(membership_id = %membership.id, %err, "notification dispatch failed");
                    }
                }
                Err(denial.into_error())
            }
            ReservationDecision::Allowed {
                remaining_this_week,
            } => {
                membership.record_reservation(cmd.salida.id, cmd.salida.fecha, now);

                let expected = membership.version;
                membership.version = self.store.save(&membership, expected).await?;

                info!(
                    membership_id = %membership.id,
                    salida_id = %cmd.salida.id,
                    remaining_this_week,
                    "salida reserved"
                );

                Ok(ReserveResult {
                    membership,
                    remaining_this_week,
                })
            }
        }
    }
}
