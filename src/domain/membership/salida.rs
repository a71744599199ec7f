//! Salida snapshot consumed by the rules.
//!
//! The outing catalog lives in another part of the system; the engine
//! only receives the fields its rules read.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{GeoPoint, SalidaId, Timestamp};

/// The slice of an outing the membership rules evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Salida {
    pub id: SalidaId,

    /// Scheduled start date/time.
    pub fecha: Timestamp,

    /// Listed price (ARS).
    pub precio: f64,

    /// Sport of the outing, e.g. "Trekking".
    pub deporte: String,

    /// Meeting point. Legacy outings may lack coordinates; check-in is
    /// then allowed without the geofence check.
    pub location_coords: Option<GeoPoint>,
}

impl Salida {
    pub fn new(
        id: SalidaId,
        fecha: Timestamp,
        precio: f64,
        deporte: impl Into<String>,
        location_coords: Option<GeoPoint>,
    ) -> Self {
        Self {
            id,
            fecha,
            precio,
            deporte: deporte.into(),
            location_coords,
        }
    }
}
