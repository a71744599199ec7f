//! Reservation guard.
//!
//! Decides whether a member may reserve a given outing. Checks run in
//! order and short-circuit on the first failure: active state, no live
//! penalty, then the derived weekly count against the cap.
//!
//! Callers must [`Membership::normalize`] first; the guard itself is a
//! pure read of the aggregate snapshot.

use crate::domain::foundation::{CalendarWeek, Timestamp};

use super::{Membership, MembershipError, MembershipStatus};

/// Outcome of a reservation check.
#[derive(Debug, Clone, PartialEq)]
pub enum ReservationDecision {
    /// The reservation may proceed.
    Allowed {
        /// Slots left in the outing's week after this reservation.
        remaining_this_week: u32,
    },
    /// The reservation is denied; reasons are distinguishable so callers
    /// can render distinct user messages.
    Denied(ReservationDenial),
}

/// Why a reservation was denied.
#[derive(Debug, Clone, PartialEq)]
pub enum ReservationDenial {
    NotActive { estado: MembershipStatus },
    Penalized {
        dias_restantes: u32,
        fecha_fin: Timestamp,
    },
    WeeklyCapReached { limite: u32 },
}

impl ReservationDenial {
    /// The corresponding typed error.
    pub fn into_error(self) -> MembershipError {
        match self {
            ReservationDenial::NotActive { estado } => MembershipError::not_active(estado),
            ReservationDenial::Penalized {
                dias_restantes,
                fecha_fin,
            } => MembershipError::penalty_active(dias_restantes, fecha_fin),
            ReservationDenial::WeeklyCapReached { limite } => {
                MembershipError::weekly_cap_reached(limite)
            }
        }
    }
}

/// Checks whether `membership` may reserve an outing dated `salida_fecha`.
pub fn can_reserve(
    membership: &Membership,
    salida_fecha: Timestamp,
    now: Timestamp,
) -> ReservationDecision {
    if !membership.is_active(now) {
        return ReservationDecision::Denied(ReservationDenial::NotActive {
            estado: membership.status,
        });
    }

    if membership.penalty.activa {
        // normalize() already expired lapsed penalties; an active flag
        // here means the block is live.
        return ReservationDecision::Denied(ReservationDenial::Penalized {
            dias_restantes: membership.penalty.dias_restantes,
            fecha_fin: membership
                .penalty
                .fecha_fin
                .unwrap_or(now),
        });
    }

    let week = CalendarWeek::containing(salida_fecha);
    let reserved = membership.salidas_in_week(&week) as u32;
    let limite = membership.uso_mensual.limite_semanal;

    if reserved >= limite {
        ReservationDecision::Denied(ReservationDenial::WeeklyCapReached { limite })
    } else {
        ReservationDecision::Allowed {
            remaining_this_week: limite - reserved - 1,
        }
    }
}
