//! Check-in validation.
//!
//! A check-in proves physical presence at the meeting point: the user's
//! coordinates must fall inside the geofence radius and the attempt must
//! land inside the time window around the outing's start. Both conditions
//! must hold; each failure has its own denial reason.

use crate::config::CheckInConfig;
use crate::domain::foundation::{GeoPoint, Timestamp};

use super::{MembershipError, Salida};

/// Outcome of a check-in validation.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckInDecision {
    Allowed,
    Denied(CheckInDenial),
}

/// Why a check-in was denied.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckInDenial {
    TooFar {
        distancia_metros: f64,
        radio_metros: f64,
    },
    OutsideWindow,
}

impl CheckInDenial {
    /// The corresponding typed error.
    pub fn into_error(self) -> MembershipError {
        match self {
            CheckInDenial::TooFar {
                distancia_metros,
                radio_metros,
            } => MembershipError::check_in_too_far(distancia_metros, radio_metros),
            CheckInDenial::OutsideWindow => MembershipError::CheckInOutsideWindow,
        }
    }
}

/// Validates a check-in attempt for `salida` made from `user_coords` at
/// `now`.
///
/// Outings without meeting-point coordinates skip the geofence check:
/// legacy data predates the coordinates field and locking those outings
/// out of check-in would be worse than trusting the time window alone.
pub fn validate(
    config: &CheckInConfig,
    salida: &Salida,
    user_coords: GeoPoint,
    now: Timestamp,
) -> CheckInDecision {
    if let Some(meeting_point) = salida.location_coords {
        let distancia = user_coords.distance_meters(&meeting_point);
        if distancia > config.radio_metros {
            return CheckInDecision::Denied(CheckInDenial::TooFar {
                distancia_metros: distancia,
                radio_metros: config.radio_metros,
            });
        }
    }

    let delta_ms = now.millis_since(&salida.fecha);
    let antes_ms = config.tiempo_antes_minutos * 60_000;
    let despues_ms = config.tiempo_despues_minutos * 60_000;

    if delta_ms < -antes_ms || delta_ms > despues_ms {
        return CheckInDecision::Denied(CheckInDenial::OutsideWindow);
    }

    CheckInDecision::Allowed
}
