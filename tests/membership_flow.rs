//! End-to-end membership flow.
//!
//! Walks one member through the whole subscription lifecycle against the
//! in-memory store: subscribe, first payment, reservations up to the
//! weekly cap, a geofenced check-in, two no-shows that trigger a penalty,
//! the penalty block, and the monthly renewal rollover.

use std::sync::Arc;

use club_trekking::adapters::{FixedClock, InMemoryMembershipStore, RecordingNotifier};
use club_trekking::application::handlers::membership::{
    BillingEventHandler, CheckInCommand, CheckInHandler, ConfirmAttendanceCommand,
    ConfirmAttendanceHandler, ExpireIfDueHandler, ExpireOutcome, ReserveCommand, ReserveHandler,
    SubscribeCommand, SubscribeHandler,
};
use club_trekking::config::ClubConfig;
use club_trekking::domain::foundation::{GeoPoint, SalidaId, Timestamp, UserId, EARTH_RADIUS_METERS};
use club_trekking::domain::membership::{
    BillingSignal, BillingStatus, MembershipError, MembershipStatus, NotificationKind, Salida,
};
use club_trekking::ports::MembershipStore;

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();
    });
}

fn ts(s: &str) -> Timestamp {
    Timestamp::parse_rfc3339(s).unwrap()
}

fn user() -> UserId {
    UserId::new("user-trekker").unwrap()
}

fn cerro_base() -> GeoPoint {
    GeoPoint::new(-41.1335, -71.3103)
}

/// A point `meters` east of `from`, along its parallel.
fn point_east_of(from: GeoPoint, meters: f64) -> GeoPoint {
    let lng_offset = (meters / (EARTH_RADIUS_METERS * from.lat.to_radians().cos())).to_degrees();
    GeoPoint::new(from.lat, from.lng + lng_offset)
}

fn trekking(fecha: &str, precio: f64) -> Salida {
    Salida::new(SalidaId::new(), ts(fecha), precio, "Trekking", Some(cerro_base()))
}

struct Engine {
    store: Arc<InMemoryMembershipStore>,
    notifier: Arc<RecordingNotifier>,
    clock: Arc<FixedClock>,
    subscribe: SubscribeHandler,
    billing: BillingEventHandler,
    reserve: ReserveHandler,
    check_in: CheckInHandler,
    confirm: ConfirmAttendanceHandler,
    expire: ExpireIfDueHandler,
}

fn engine(start: Timestamp) -> Engine {
    init_tracing();
    let store = Arc::new(InMemoryMembershipStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let clock = Arc::new(FixedClock::at(start));
    let config = ClubConfig::default();

    Engine {
        subscribe: SubscribeHandler::new(store.clone(), clock.clone(), config.clone()),
        billing: BillingEventHandler::new(store.clone(), notifier.clone(), clock.clone()),
        reserve: ReserveHandler::new(
            store.clone(),
            notifier.clone(),
            clock.clone(),
            config.clone(),
        ),
        check_in: CheckInHandler::new(store.clone(), clock.clone(), config.clone()),
        confirm: ConfirmAttendanceHandler::new(
            store.clone(),
            notifier.clone(),
            clock.clone(),
            config.clone(),
        ),
        expire: ExpireIfDueHandler::new(store.clone(), notifier.clone(), clock.clone(), config),
        store,
        notifier,
        clock,
    }
}

#[tokio::test]
async fn full_membership_lifecycle() {
    // Monday of the week under test.
    let engine = engine(ts("2026-03-16T10:00:00Z"));

    // Subscribe, then the provider confirms the first charge.
    let membership = engine
        .subscribe
        .handle(SubscribeCommand {
            user_id: user(),
            subscription_ref: Some("mp-pre-777".into()),
        })
        .await
        .unwrap();
    assert_eq!(membership.status, MembershipStatus::Pending);

    let membership = engine
        .billing
        .handle(BillingSignal {
            subscription_ref: "mp-pre-777".into(),
            status: BillingStatus::Approved,
        })
        .await
        .unwrap();
    assert_eq!(membership.status, MembershipStatus::Active);
    assert_eq!(engine.notifier.kinds(), vec![NotificationKind::Bienvenida]);

    // Two covered outings in the same calendar week, both allowed.
    let miercoles = trekking("2026-03-18T09:00:00Z", 8_000.0);
    let viernes = trekking("2026-03-20T09:00:00Z", 9_500.0);

    let result = engine
        .reserve
        .handle(ReserveCommand {
            membership_id: membership.id,
            salida: miercoles.clone(),
        })
        .await
        .unwrap();
    assert_eq!(result.remaining_this_week, 1);

    let result = engine
        .reserve
        .handle(ReserveCommand {
            membership_id: membership.id,
            salida: viernes.clone(),
        })
        .await
        .unwrap();
    assert_eq!(result.remaining_this_week, 0);

    // A third in the same week hits the cap.
    let err = engine
        .reserve
        .handle(ReserveCommand {
            membership_id: membership.id,
            salida: trekking("2026-03-21T09:00:00Z", 7_000.0),
        })
        .await
        .unwrap_err();
    assert_eq!(err, MembershipError::weekly_cap_reached(2));
    assert!(engine
        .notifier
        .kinds()
        .contains(&NotificationKind::LimiteAlcanzado));

    // Check in 50 m from the meeting point, ten minutes before the start.
    engine.clock.set(ts("2026-03-18T08:50:00Z"));
    let checked_in = engine
        .check_in
        .handle(CheckInCommand {
            membership_id: membership.id,
            salida: miercoles.clone(),
            ubicacion: point_east_of(cerro_base(), 50.0),
        })
        .await
        .unwrap();
    assert!(checked_in.find_record(miercoles.id).unwrap().check_in_realizado);
    assert_eq!(checked_in.uso_mensual.salidas_realizadas, 1);

    // Both outings pass; the member never confirms either attendance.
    engine.clock.set(ts("2026-03-21T10:00:00Z"));
    let first = engine
        .confirm
        .handle(ConfirmAttendanceCommand {
            user_id: user(),
            salida_id: miercoles.id,
            asistio: false,
        })
        .await
        .unwrap();
    assert!(first.penalty_applied.is_none());

    let second = engine
        .confirm
        .handle(ConfirmAttendanceCommand {
            user_id: user(),
            salida_id: viernes.id,
            asistio: false,
        })
        .await
        .unwrap();
    let episode = second.penalty_applied.expect("second no-show penalizes");
    assert_eq!(episode.fecha_fin, ts("2026-03-24T10:00:00Z"));
    assert!(engine
        .notifier
        .kinds()
        .contains(&NotificationKind::PenalizacionAplicada));

    let stored = engine.store.find_by_id(&membership.id).await.unwrap().unwrap();
    assert!(stored.penalty.activa);
    assert_eq!(stored.penalty.dias_restantes, 3);

    // The next day every reservation is blocked by the penalty.
    engine.clock.set(ts("2026-03-22T10:00:00Z"));
    let err = engine
        .reserve
        .handle(ReserveCommand {
            membership_id: membership.id,
            salida: trekking("2026-03-25T09:00:00Z", 8_000.0),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, MembershipError::PenaltyActive { dias_restantes, .. }
        if dias_restantes > 0));

    // Once the penalty lapses, reservations work again without any sweeper.
    engine.clock.set(ts("2026-03-25T10:00:00Z"));
    engine
        .reserve
        .handle(ReserveCommand {
            membership_id: membership.id,
            salida: trekking("2026-03-26T09:00:00Z", 8_000.0),
        })
        .await
        .unwrap();

    // The renewal charge lands, and the sweep rolls the period over.
    engine
        .billing
        .handle(BillingSignal {
            subscription_ref: "mp-pre-777".into(),
            status: BillingStatus::Approved,
        })
        .await
        .unwrap();

    engine.clock.set(ts("2026-04-17T10:00:00Z"));
    let result = engine.expire.handle(membership.id).await.unwrap();
    assert_eq!(result.outcome, ExpireOutcome::RolledOver);
    assert_eq!(result.membership.uso_mensual.salidas_realizadas, 0);
    assert_eq!(result.membership.status, MembershipStatus::Active);
    assert!(engine
        .notifier
        .kinds()
        .contains(&NotificationKind::ResumenMensual));
}

#[tokio::test]
async fn lapsed_membership_without_renewal_expires() {
    let engine = engine(ts("2026-03-16T10:00:00Z"));

    engine
        .subscribe
        .handle(SubscribeCommand {
            user_id: user(),
            subscription_ref: Some("mp-pre-778".into()),
        })
        .await
        .unwrap();
    let membership = engine
        .billing
        .handle(BillingSignal {
            subscription_ref: "mp-pre-778".into(),
            status: BillingStatus::Approved,
        })
        .await
        .unwrap();

    engine.clock.set(ts("2026-04-17T10:00:00Z"));
    let result = engine.expire.handle(membership.id).await.unwrap();
    assert_eq!(result.outcome, ExpireOutcome::Expired);
    assert_eq!(result.membership.status, MembershipStatus::Expired);

    // An expired membership cannot reserve.
    let err = engine
        .reserve
        .handle(ReserveCommand {
            membership_id: membership.id,
            salida: trekking("2026-04-18T09:00:00Z", 8_000.0),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, MembershipError::NotActive { .. }));
}

#[tokio::test]
async fn concurrent_reservations_cannot_both_take_the_last_slot() {
    let engine = engine(ts("2026-03-16T10:00:00Z"));

    engine
        .subscribe
        .handle(SubscribeCommand {
            user_id: user(),
            subscription_ref: Some("mp-pre-779".into()),
        })
        .await
        .unwrap();
    let membership = engine
        .billing
        .handle(BillingSignal {
            subscription_ref: "mp-pre-779".into(),
            status: BillingStatus::Approved,
        })
        .await
        .unwrap();

    // One of two weekly slots already taken.
    engine
        .reserve
        .handle(ReserveCommand {
            membership_id: membership.id,
            salida: trekking("2026-03-17T09:00:00Z", 8_000.0),
        })
        .await
        .unwrap();

    // Two tabs race for the last slot of the week.
    let (a, b) = tokio::join!(
        engine.reserve.handle(ReserveCommand {
            membership_id: membership.id,
            salida: trekking("2026-03-19T09:00:00Z", 8_000.0),
        }),
        engine.reserve.handle(ReserveCommand {
            membership_id: membership.id,
            salida: trekking("2026-03-20T09:00:00Z", 8_000.0),
        }),
    );

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1, "exactly one racer may take the last slot");

    // The loser saw either the stale-write conflict or the cap itself.
    let loser = if a.is_ok() { b.unwrap_err() } else { a.unwrap_err() };
    assert!(matches!(
        loser,
        MembershipError::ConcurrentModification | MembershipError::WeeklyCapReached { .. }
    ));

    let stored = engine.store.find_by_id(&membership.id).await.unwrap().unwrap();
    assert_eq!(stored.historial.len(), 2);
}
