//! Post-event attendance confirmation.
//!
//! Resolves the tri-state attendance outcome for a past outing exactly
//! once and feeds the penalty rules. A duplicate confirmation is an
//! error rather than a silent no-op, so retried requests are detectable.

use crate::config::PenalizacionConfig;
use crate::domain::foundation::{SalidaId, Timestamp};

use super::{AttendanceRecord, Membership, MembershipError, PenaltyEpisode};

/// What a confirmation did to the membership.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationOutcome {
    pub asistio: bool,
    /// Set when this confirmation pushed the streak over the threshold.
    pub penalty_applied: Option<PenaltyEpisode>,
    /// Streak value after the confirmation.
    pub inasistencias_consecutivas: u32,
}

/// Confirms whether the member attended `salida_id`.
///
/// On attendance the no-show streak resets and the record is marked as
/// checked-in (completion implies presence). On a no-show the streak
/// grows and may trigger a penalty.
pub fn confirm(
    membership: &mut Membership,
    salida_id: SalidaId,
    asistio: bool,
    config: &PenalizacionConfig,
    now: Timestamp,
) -> Result<ConfirmationOutcome, MembershipError> {
    let idx = membership
        .historial
        .iter()
        .position(|r| r.salida_id == salida_id)
        .ok_or(MembershipError::RecordNotFound(salida_id))?;

    membership.historial[idx].confirm(asistio, now)?;

    let penalty_applied = if asistio {
        membership.historial[idx].mark_check_in();
        membership.penalty.register_attendance();
        None
    } else {
        membership.penalty.register_no_show(config, now)
    };

    membership.updated_at = now;

    Ok(ConfirmationOutcome {
        asistio,
        penalty_applied,
        inasistencias_consecutivas: membership.penalty.inasistencias_consecutivas,
    })
}

/// History entries awaiting a confirmation prompt.
///
/// Returns records that are unconfirmed, already past, and at most one
/// day old. Anything older stays unconfirmed and invisible to this
/// query: a deliberate bound on how long the prompt nags, with the
/// known gap that stale entries never resurface.
pub fn pending_confirmations(membership: &Membership, now: Timestamp) -> Vec<&AttendanceRecord> {
    let cutoff = now.minus_days(1);
    membership
        .historial
        .iter()
        .filter(|r| !r.is_confirmed() && r.fecha.is_before(&now) && r.fecha >= cutoff)
        .collect()
}
