//! Attendance history records.
//!
//! One record per reserved outing. The history is append-only; the only
//! mutation a record allows after creation is the single tri-state
//! confirmation transition (unset -> attended / unset -> no-show) plus
//! the check-in flag.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SalidaId, Timestamp};

use super::MembershipError;

/// A reserved outing in the membership history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub salida_id: SalidaId,

    /// Scheduled date/time of the outing.
    pub fecha: Timestamp,

    /// Whether a valid geofenced check-in was registered. A prerequisite
    /// signal for attendance, not equivalent to it.
    pub check_in_realizado: bool,

    /// Tri-state: `None` = pending, `Some(true)` = attended,
    /// `Some(false)` = no-show. Transitions exactly once.
    pub asistencia_confirmada: Option<bool>,

    pub fecha_confirmacion: Option<Timestamp>,
}

impl AttendanceRecord {
    /// A fresh reservation: no check-in, confirmation pending.
    pub fn reserved(salida_id: SalidaId, fecha: Timestamp) -> Self {
        Self {
            salida_id,
            fecha,
            check_in_realizado: false,
            asistencia_confirmada: None,
            fecha_confirmacion: None,
        }
    }

    /// Whether the tri-state has already been resolved.
    pub fn is_confirmed(&self) -> bool {
        self.asistencia_confirmada.is_some()
    }

    /// Resolves the tri-state. A second call is an error, not a silent
    /// no-op, so callers can detect duplicate confirmation attempts.
    pub fn confirm(&mut self, asistio: bool, now: Timestamp) -> Result<(), MembershipError> {
        if self.is_confirmed() {
            return Err(MembershipError::already_confirmed(self.salida_id));
        }
        self.asistencia_confirmada = Some(asistio);
        self.fecha_confirmacion = Some(now);
        Ok(())
    }

    /// Marks the geofenced check-in as done.
    pub fn mark_check_in(&mut self) {
        self.check_in_realizado = true;
    }
}
