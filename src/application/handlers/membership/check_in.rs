//! CheckInHandler - validates presence at the meeting point.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::ClubConfig;
use crate::domain::foundation::{GeoPoint, MembershipId};
use crate::domain::membership::{
    validate_check_in, CheckInDecision, Membership, MembershipError, Salida,
};
use crate::ports::{Clock, MembershipStore};

/// Command to check in at an outing.
#[derive(Debug, Clone)]
pub struct CheckInCommand {
    pub membership_id: MembershipId,
    /// Snapshot of the outing being checked into.
    pub salida: Salida,
    /// Client-reported coordinates at the time of the attempt.
    pub ubicacion: GeoPoint,
}

/// Handler for check-ins.
///
/// The outing must already be reserved; a valid attempt flips the
/// record's check-in flag and counts against the monthly usage counter.
/// Check-in is a presence signal, not an attendance confirmation.
pub struct CheckInHandler {
    store: Arc<dyn MembershipStore>,
    clock: Arc<dyn Clock>,
    config: ClubConfig,
}

impl CheckInHandler {
    pub fn new(store: Arc<dyn MembershipStore>, clock: Arc<dyn Clock>, config: ClubConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub async fn handle(&self, cmd: CheckInCommand) -> Result<Membership, MembershipError> {
        let now = self.clock.now();

        let mut membership = self
            .store
            .find_by_id(&cmd.membership_id)
            .await?
            .ok_or(MembershipError::NotFound(cmd.membership_id))?;
        membership.normalize(now);

        let record = membership
            .find_record(cmd.salida.id)
            .ok_or(MembershipError::RecordNotFound(cmd.salida.id))?;
        if record.check_in_realizado {
            return Err(MembershipError::validation(
                "check_in",
                "check-in already registered for this salida",
            ));
        }

        if cmd.salida.location_coords.is_none() {
            warn!(
                salida_id = %cmd.salida.id,
                "salida has no coordinates, allowing check-in without geofence"
            );
        }

        match validate_check_in(&self.config.check_in, &cmd.salida, cmd.ubicacion, now) {
            CheckInDecision::Denied(denial) => Err(denial.into_error()),
            CheckInDecision::Allowed => {
                membership.register_check_in(cmd.salida.id, now)?;

                let expected = membership.version;
                membership.version = self.store.save(&membership, expected).await?;

                info!(
                    membership_id = %membership.id,
                    salida_id = %cmd.salida.id,
                    "check-in registered"
                );

                Ok(membership)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedClock, InMemoryMembershipStore};
    use crate::domain::foundation::{SalidaId, Timestamp, UserId};

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    fn meeting_point() -> GeoPoint {
        GeoPoint::new(-34.6037, -58.3816)
    }

    fn salida() -> Salida {
        Salida::new(
            SalidaId::new(),
            ts("2026-03-21T09:00:00Z"),
            8_000.0,
            "Trekking",
            Some(meeting_point()),
        )
    }

    struct Fixture {
        store: Arc<InMemoryMembershipStore>,
        clock: Arc<FixedClock>,
        handler: CheckInHandler,
        membership_id: MembershipId,
        salida: Salida,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(InMemoryMembershipStore::new());
        // Ten minutes before the outing starts.
        let clock = Arc::new(FixedClock::at(ts("2026-03-21T08:50:00Z")));
        let salida = salida();

        let start = ts("2026-03-01T12:00:00Z");
        let mut membership = Membership::subscribe(
            MembershipId::new(),
            UserId::new("user-1").unwrap(),
            None,
            2,
            start,
        );
        membership.activate(start).unwrap();
        membership.record_reservation(salida.id, salida.fecha, start);
        store.insert(&membership).await.unwrap();

        let handler = CheckInHandler::new(store.clone(), clock.clone(), ClubConfig::default());
        Fixture {
            store,
            clock,
            handler,
            membership_id: membership.id,
            salida,
        }
    }

    #[tokio::test]
    async fn valid_check_in_marks_record_and_counts_usage() {
        let fixture = fixture().await;
        let membership = fixture
            .handler
            .handle(CheckInCommand {
                membership_id: fixture.membership_id,
                salida: fixture.salida.clone(),
                ubicacion: meeting_point(),
            })
            .await
            .unwrap();

        let record = membership.find_record(fixture.salida.id).unwrap();
        assert!(record.check_in_realizado);
        assert_eq!(membership.uso_mensual.salidas_realizadas, 1);

        let stored = fixture
            .store
            .find_by_id(&fixture.membership_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.version, 1);
    }

    #[tokio::test]
    async fn too_far_is_rejected_with_distance() {
        let fixture = fixture().await;
        let err = fixture
            .handler
            .handle(CheckInCommand {
                membership_id: fixture.membership_id,
                salida: fixture.salida.clone(),
                ubicacion: GeoPoint::new(-34.6137, -58.3816), // ~1.1 km south
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MembershipError::CheckInTooFar { .. }));
    }

    #[tokio::test]
    async fn outside_window_is_rejected() {
        let fixture = fixture().await;
        fixture.clock.set(ts("2026-03-21T09:20:00Z")); // 20 min late

        let err = fixture
            .handler
            .handle(CheckInCommand {
                membership_id: fixture.membership_id,
                salida: fixture.salida.clone(),
                ubicacion: meeting_point(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, MembershipError::CheckInOutsideWindow);
    }

    #[tokio::test]
    async fn unreserved_salida_is_record_not_found() {
        let fixture = fixture().await;
        let other = Salida::new(
            SalidaId::new(),
            ts("2026-03-21T09:00:00Z"),
            8_000.0,
            "Trekking",
            Some(meeting_point()),
        );

        let err = fixture
            .handler
            .handle(CheckInCommand {
                membership_id: fixture.membership_id,
                salida: other,
                ubicacion: meeting_point(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MembershipError::RecordNotFound(_)));
    }

    #[tokio::test]
    async fn duplicate_check_in_is_rejected() {
        let fixture = fixture().await;
        let cmd = CheckInCommand {
            membership_id: fixture.membership_id,
            salida: fixture.salida.clone(),
            ubicacion: meeting_point(),
        };
        fixture.handler.handle(cmd.clone()).await.unwrap();

        let err = fixture.handler.handle(cmd).await.unwrap_err();
        assert!(matches!(err, MembershipError::Validation { .. }));
    }

    #[tokio::test]
    async fn salida_without_coordinates_skips_geofence() {
        let fixture = fixture().await;
        let mut no_coords = fixture.salida.clone();
        no_coords.location_coords = None;

        let membership = fixture
            .handler
            .handle(CheckInCommand {
                membership_id: fixture.membership_id,
                salida: no_coords,
                ubicacion: GeoPoint::new(40.4168, -3.7038), // nowhere near
            })
            .await
            .unwrap();
        assert!(membership
            .find_record(fixture.salida.id)
            .unwrap()
            .check_in_realizado);
    }
}
