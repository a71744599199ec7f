//! Outbound notification kinds.
//!
//! The engine decides *when* a member should be notified; delivery
//! (push, email, socket) is entirely external, behind the
//! [`Notifier`](crate::ports::Notifier) port. Wire names are the
//! snake-case Spanish identifiers the mobile clients already consume.

use serde::{Deserialize, Serialize};

/// Kinds of member notifications the engine can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// First activation of a membership.
    Bienvenida,
    /// A new covered outing was published. Emitted by the catalog side;
    /// carried here so all kinds share one enum.
    NuevaSalida,
    /// Reminder 24h before a reserved outing.
    RecordatorioSalida,
    /// Reminder 1h before check-in opens.
    RecordatorioCheckIn,
    /// A reservation was denied by the weekly cap.
    LimiteAlcanzado,
    /// A renewal charge was collected.
    RenovacionExitosa,
    /// A renewal charge failed; the membership lapsed.
    RenovacionFallida,
    /// Monthly usage summary.
    ResumenMensual,
    /// A no-show penalty was applied.
    PenalizacionAplicada,
}

impl NotificationKind {
    /// Wire identifier used by the notification transport.
    pub fn kind(&self) -> &'static str {
        match self {
            NotificationKind::Bienvenida => "bienvenida",
            NotificationKind::NuevaSalida => "nueva_salida",
            NotificationKind::RecordatorioSalida => "recordatorio_salida",
            NotificationKind::RecordatorioCheckIn => "recordatorio_check_in",
            NotificationKind::LimiteAlcanzado => "limite_alcanzado",
            NotificationKind::RenovacionExitosa => "renovacion_exitosa",
            NotificationKind::RenovacionFallida => "renovacion_fallida",
            NotificationKind::ResumenMensual => "resumen_mensual",
            NotificationKind::PenalizacionAplicada => "penalizacion_aplicada",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_serde_representation() {
        for kind in [
            NotificationKind::Bienvenida,
            NotificationKind::NuevaSalida,
            NotificationKind::RecordatorioSalida,
            NotificationKind::RecordatorioCheckIn,
            NotificationKind::LimiteAlcanzado,
            NotificationKind::RenovacionExitosa,
            NotificationKind::RenovacionFallida,
            NotificationKind::ResumenMensual,
            NotificationKind::PenalizacionAplicada,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.kind()));
        }
    }

    #[test]
    fn display_matches_kind() {
        assert_eq!(
            NotificationKind::LimiteAlcanzado.to_string(),
            "limite_alcanzado"
        );
    }
}
