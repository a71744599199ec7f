//! Membership aggregate entity.
//!
//! One record per user per subscription lifetime segment. A user has at
//! most one membership in the active/paused slot at a time; that
//! uniqueness is enforced at the store boundary together with the
//! subscribe operation.
//!
//! # Design Decisions
//!
//! - **Explicit time**: every temporal rule receives `now`; the aggregate
//!   never reads the wall clock.
//! - **Lazy expiry**: penalties lapse when observed, via
//!   [`Membership::normalize`] at the start of every public operation.
//! - **Derived weekly usage**: the weekly count is always computed from
//!   `historial` filtered to a [`CalendarWeek`], never stored.
//! - **Versioned saves**: `version` is the optimistic-concurrency token
//!   checked by the store on save.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CalendarWeek, MembershipId, SalidaId, StateMachine, Timestamp, UserId,
};

use super::{AttendanceRecord, MembershipError, MembershipStatus, PenaltyState};

/// External subscription reference plus the provider's last known status.
///
/// Opaque to the engine: only ever read as "active" / "not active".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BillingRef {
    pub subscription_ref: Option<String>,
    pub provider_status: Option<String>,
}

impl BillingRef {
    /// Whether the provider considers the subscription paid up.
    pub fn is_provider_active(&self) -> bool {
        matches!(
            self.provider_status.as_deref(),
            Some("approved") | Some("authorized")
        )
    }
}

/// Monthly usage counter and the config-seeded weekly cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyUsage {
    /// Outings checked into during the current billing period.
    pub salidas_realizadas: u32,
    /// Per-week reservation cap, seeded from config at subscribe time.
    pub limite_semanal: u32,
    /// When the monthly counter was last reset.
    pub ultima_reset: Timestamp,
}

/// Membership aggregate - a user's subscription to the club.
///
/// # Invariants
///
/// - `user_id` is immutable after creation
/// - Status transitions follow the [`MembershipStatus`] state machine
/// - `historial` is append-only; each record's tri-state resolves once
/// - `penalty.dias_restantes` is derived, never independent truth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub id: MembershipId,

    pub user_id: UserId,

    #[serde(rename = "estado")]
    pub status: MembershipStatus,

    /// Current billing-period start (inclusive).
    pub fecha_inicio: Timestamp,

    /// Current billing-period end; used only for "is the period over".
    pub fecha_fin: Timestamp,

    /// Next expected charge date, advanced together with the period.
    pub proxima_fecha_pago: Timestamp,

    pub billing: BillingRef,

    pub uso_mensual: MonthlyUsage,

    #[serde(rename = "historial_salidas")]
    pub historial: Vec<AttendanceRecord>,

    #[serde(rename = "penalizacion")]
    pub penalty: PenaltyState,

    pub fecha_cancelacion: Option<Timestamp>,
    pub motivo_cancelacion: Option<String>,

    /// Optimistic-concurrency token, bumped by the store on save.
    pub version: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Membership {
    /// Creates a membership in `pendiente`, awaiting the first payment
    /// confirmation from the billing provider.
    pub fn subscribe(
        id: MembershipId,
        user_id: UserId,
        subscription_ref: Option<String>,
        limite_semanal: u32,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            status: MembershipStatus::Pending,
            fecha_inicio: now,
            fecha_fin: now.add_months(1),
            proxima_fecha_pago: now.add_months(1),
            billing: BillingRef {
                subscription_ref,
                provider_status: None,
            },
            uso_mensual: MonthlyUsage {
                salidas_realizadas: 0,
                limite_semanal,
                ultima_reset: now,
            },
            historial: Vec::new(),
            penalty: PenaltyState::new(),
            fecha_cancelacion: None,
            motivo_cancelacion: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Normalizes lazily-expired state. Runs at the start of every
    /// public operation, so rule evaluation never sees a stale penalty.
    pub fn normalize(&mut self, now: Timestamp) {
        self.penalty.normalize(now);
    }

    /// Whether the membership is usable right now: state is `activa`
    /// and the billing period has not lapsed.
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.status == MembershipStatus::Active && now.is_before(&self.fecha_fin)
    }

    /// Activates after a billing confirmation (`pendiente|vencida ->
    /// activa`), setting period boundaries from `now`.
    pub fn activate(&mut self, now: Timestamp) -> Result<(), MembershipError> {
        self.transition_to(MembershipStatus::Active)?;
        self.fecha_inicio = now;
        self.fecha_fin = now.add_months(1);
        self.proxima_fecha_pago = now.add_months(1);
        self.updated_at = now;
        Ok(())
    }

    /// Renewal payment confirmed while already active: only the next
    /// charge date moves; period advancement is the rollover's job.
    pub fn renew(&mut self, now: Timestamp) -> Result<(), MembershipError> {
        self.transition_to(MembershipStatus::Active)?;
        self.proxima_fecha_pago = now.add_months(1);
        self.updated_at = now;
        Ok(())
    }

    /// Period lapsed without renewal: `activa -> vencida`.
    pub fn expire(&mut self, now: Timestamp) -> Result<(), MembershipError> {
        self.transition_to(MembershipStatus::Expired)?;
        self.updated_at = now;
        Ok(())
    }

    /// Explicit cancellation from any non-terminal state. Terminal.
    pub fn cancel(&mut self, motivo: impl Into<String>, now: Timestamp) -> Result<(), MembershipError> {
        self.transition_to(MembershipStatus::Cancelled)?;
        self.fecha_cancelacion = Some(now);
        self.motivo_cancelacion = Some(motivo.into());
        self.updated_at = now;
        Ok(())
    }

    /// Appends a reservation to the history. The record starts with no
    /// check-in and a pending confirmation.
    pub fn record_reservation(&mut self, salida_id: SalidaId, fecha: Timestamp, now: Timestamp) {
        self.historial.push(AttendanceRecord::reserved(salida_id, fecha));
        self.updated_at = now;
    }

    /// Marks a successful check-in on the matching history record and
    /// counts the outing against the monthly usage counter.
    pub fn register_check_in(
        &mut self,
        salida_id: SalidaId,
        now: Timestamp,
    ) -> Result<(), MembershipError> {
        let record = self
            .historial
            .iter_mut()
            .find(|r| r.salida_id == salida_id)
            .ok_or(MembershipError::RecordNotFound(salida_id))?;
        record.mark_check_in();
        self.uso_mensual.salidas_realizadas += 1;
        self.updated_at = now;
        Ok(())
    }

    /// Looks up a history record by salida.
    pub fn find_record(&self, salida_id: SalidaId) -> Option<&AttendanceRecord> {
        self.historial.iter().find(|r| r.salida_id == salida_id)
    }

    /// Number of history entries falling in `week`, boundaries inclusive.
    ///
    /// This is the weekly usage: derived on demand so reservations
    /// straddling week boundaries are never double-counted.
    pub fn salidas_in_week(&self, week: &CalendarWeek) -> usize {
        self.historial
            .iter()
            .filter(|r| week.contains(r.fecha))
            .count()
    }

    fn transition_to(&mut self, target: MembershipStatus) -> Result<(), MembershipError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| MembershipError::invalid_transition(self.status, target))?;
        Ok(())
    }
}
