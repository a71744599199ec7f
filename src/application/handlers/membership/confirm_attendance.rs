//! ConfirmAttendanceHandler - resolves post-event attendance.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::config::ClubConfig;
use crate::domain::foundation::{SalidaId, UserId};
use crate::domain::membership::{
    confirm, ConfirmationOutcome, MembershipError, NotificationKind,
};
use crate::ports::{Clock, MembershipStore, Notifier};

/// Command to confirm (or deny) attendance for a past outing.
#[derive(Debug, Clone)]
pub struct ConfirmAttendanceCommand {
    pub user_id: UserId,
    pub salida_id: SalidaId,
    pub asistio: bool,
}

/// Handler for attendance confirmations.
///
/// Confirms exactly once per outing; a retried request surfaces as
/// `AlreadyConfirmed`. A confirmation that completes a no-show streak
/// applies the penalty and notifies the member.
pub struct ConfirmAttendanceHandler {
    store: Arc<dyn MembershipStore>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    config: ClubConfig,
}

impl ConfirmAttendanceHandler {
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
        cmd: ConfirmAttendanceCommand,
    ) -> Result<ConfirmationOutcome, MembershipError> {
        let now = self.clock.now();

        let mut membership = self
            .store
            .find_active_by_user(&cmd.user_id)
            .await?
            .ok_or_else(|| MembershipError::not_found_for_user(cmd.user_id.clone()))?;
        membership.normalize(now);

        let outcome = confirm(
            &mut membership,
            cmd.salida_id,
            cmd.asistio,
            &self.config.penalizacion,
            now,
        )?;

        let expected = membership.version;
        membership.version = self.store.save(&membership, expected).await?;

        info!(
            membership_id = %membership.id,
            salida_id = %cmd.salida_id,
            asistio = cmd.asistio,
            penalty_applied = outcome.penalty_applied.is_some(),
            "attendance confirmed"
        );

        if let Some(episode) = &outcome.penalty_applied {
            let payload = json!({
                "dias": self.config.penalizacion.dias,
                "fecha_fin": episode.fecha_fin,
                "motivo": episode.motivo,
            });
            if let Err(err) = self
                .notifier
                .notify(
                    &membership.user_id,
                    NotificationKind::PenalizacionAplicada,
                    payload,
                )
                .await
            {
                warn!(membership_id = %membership.id, %err, "notification dispatch failed");
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedClock, InMemoryMembershipStore, RecordingNotifier};
    use crate::domain::foundation::{MembershipId, Timestamp};
    use crate::domain::membership::Membership;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    struct Fixture {
        store: Arc<InMemoryMembershipStore>,
        notifier: Arc<RecordingNotifier>,
        handler: ConfirmAttendanceHandler,
        salidas: Vec<SalidaId>,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(InMemoryMembershipStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let clock = Arc::new(FixedClock::at(ts("2026-03-15T10:00:00Z")));

        let start = ts("2026-03-01T12:00:00Z");
        let mut membership = Membership::subscribe(
            MembershipId::new(),
            UserId::new("user-1").unwrap(),
            None,
            2,
            start,
        );
        membership.activate(start).unwrap();

        let salidas: Vec<SalidaId> = (0..2).map(|_| SalidaId::new()).collect();
        membership.record_reservation(salidas[0], ts("2026-03-07T09:00:00Z"), start);
        membership.record_reservation(salidas[1], ts("2026-03-14T09:00:00Z"), start);
        store.insert(&membership).await.unwrap();

        let handler = ConfirmAttendanceHandler::new(
            store.clone(),
            notifier.clone(),
            clock,
            ClubConfig::default(),
        );
        Fixture {
            store,
            notifier,
            handler,
            salidas,
        }
    }

    fn cmd(salida_id: SalidaId, asistio: bool) -> ConfirmAttendanceCommand {
        ConfirmAttendanceCommand {
            user_id: UserId::new("user-1").unwrap(),
            salida_id,
            asistio,
        }
    }

    #[tokio::test]
    async fn attendance_confirmation_persists() {
        let fixture = fixture().await;
        let outcome = fixture
            .handler
            .handle(cmd(fixture.salidas[0], true))
            .await
            .unwrap();

        assert!(outcome.asistio);
        assert!(outcome.penalty_applied.is_none());
        assert!(fixture.notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn second_consecutive_no_show_penalizes_and_notifies() {
        let fixture = fixture().await;
        fixture
            .handler
            .handle(cmd(fixture.salidas[0], false))
            .await
            .unwrap();
        let outcome = fixture
            .handler
            .handle(cmd(fixture.salidas[1], false))
            .await
            .unwrap();

        assert!(outcome.penalty_applied.is_some());
        assert_eq!(
            fixture.notifier.kinds(),
            vec![NotificationKind::PenalizacionAplicada]
        );
        assert_eq!(fixture.notifier.sent()[0].2["dias"], 3);
    }

    #[tokio::test]
    async fn duplicate_confirmation_is_rejected_without_side_effects() {
        let fixture = fixture().await;
        fixture
            .handler
            .handle(cmd(fixture.salidas[0], false))
            .await
            .unwrap();

        let err = fixture
            .handler
            .handle(cmd(fixture.salidas[0], false))
            .await
            .unwrap_err();
        assert!(matches!(err, MembershipError::AlreadyConfirmed(_)));

        // The streak reflects only the first confirmation.
        let membership_id = fixture
            .store
            .find_active_by_user(&UserId::new("user-1").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(membership_id.penalty.inasistencias_consecutivas, 1);
    }

    #[tokio::test]
    async fn user_without_membership_is_rejected() {
        let fixture = fixture().await;
        let err = fixture
            .handler
            .handle(ConfirmAttendanceCommand {
                user_id: UserId::new("user-2").unwrap(),
                salida_id: fixture.salidas[0],
                asistio: true,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MembershipError::NotFoundForUser(_)));
    }
}
