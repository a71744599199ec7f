//! Coverage eligibility rule.

use crate::config::ClubConfig;

/// Whether an outing qualifies for membership coverage.
///
/// An outing is covered when its price is positive and at most
/// `max_precio_salida`, and its sport is the covered one.
///
/// Callers that predate the sport field pass `None`; the check then
/// falls back to price only. This relaxation is intentional
/// backward-compatibility: tightening it would silently exclude
/// legacy outings, so it must stay until those callers are migrated.
pub fn is_eligible(config: &ClubConfig, precio: f64, deporte: Option<&str>) -> bool {
    let precio_ok = precio > 0.0 && precio <= config.max_precio_salida;

    match deporte {
        None => precio_ok,
        Some(deporte) => precio_ok && deporte == config.deporte_permitido,
    }
}
