//! Membership-specific error types.
//!
//! Every rule rejection is a typed value returned to the caller; nothing
//! here is an infrastructure exception, and the engine never retries on
//! its own. The orchestration layer owns the translation into user-facing
//! messages and status codes.

use crate::domain::foundation::{
    DomainError, ErrorCode, MembershipId, SalidaId, Timestamp, UserId, ValidationError,
};

use super::MembershipStatus;

/// Membership-specific errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MembershipError {
    /// Membership was not found.
    NotFound(MembershipId),

    /// No membership exists for this user.
    NotFoundForUser(UserId),

    /// User already has a membership occupying the active/paused slot.
    AlreadyExists(UserId),

    /// A billing signal referenced a subscription no membership carries.
    UnknownBillingRef(String),

    /// The outing does not qualify for membership coverage.
    NotEligible {
        precio: f64,
        deporte: Option<String>,
    },

    /// Operation attempted on a membership not currently active.
    NotActive { estado: MembershipStatus },

    /// Reservation blocked by an unexpired no-show penalty.
    PenaltyActive {
        dias_restantes: u32,
        fecha_fin: Timestamp,
    },

    /// Reservation blocked by the derived weekly count.
    WeeklyCapReached { limite: u32 },

    /// Check-in attempted outside the geofence radius.
    CheckInTooFar {
        distancia_metros: f64,
        radio_metros: f64,
    },

    /// Check-in attempted outside the allowed time window.
    CheckInOutsideWindow,

    /// Referenced salida is absent from the membership history.
    RecordNotFound(SalidaId),

    /// Duplicate attendance confirmation attempt.
    AlreadyConfirmed(SalidaId),

    /// Illegal lifecycle transition requested.
    InvalidStateTransition {
        from: MembershipStatus,
        to: MembershipStatus,
    },

    /// Optimistic-concurrency conflict on save.
    ConcurrentModification,

    /// Validation failed.
    Validation { field: String, message: String },

    /// Infrastructure error from the store.
    Infrastructure(String),
}

impl MembershipError {
    pub fn not_found(id: MembershipId) -> Self {
        MembershipError::NotFound(id)
    }

    pub fn not_found_for_user(user_id: UserId) -> Self {
        MembershipError::NotFoundForUser(user_id)
    }

    pub fn already_exists(user_id: UserId) -> Self {
        MembershipError::AlreadyExists(user_id)
    }

    pub fn not_eligible(precio: f64, deporte: Option<&str>) -> Self {
        MembershipError::NotEligible {
            precio,
            deporte: deporte.map(str::to_string),
        }
    }

    pub fn not_active(estado: MembershipStatus) -> Self {
        MembershipError::NotActive { estado }
    }

    pub fn penalty_active(dias_restantes: u32, fecha_fin: Timestamp) -> Self {
        MembershipError::PenaltyActive {
            dias_restantes,
            fecha_fin,
        }
    }

    pub fn weekly_cap_reached(limite: u32) -> Self {
        MembershipError::WeeklyCapReached { limite }
    }

    pub fn check_in_too_far(distancia_metros: f64, radio_metros: f64) -> Self {
        MembershipError::CheckInTooFar {
            distancia_metros,
            radio_metros,
        }
    }

    pub fn record_not_found(salida_id: SalidaId) -> Self {
        MembershipError::RecordNotFound(salida_id)
    }

    pub fn already_confirmed(salida_id: SalidaId) -> Self {
        MembershipError::AlreadyConfirmed(salida_id)
    }

    pub fn invalid_transition(from: MembershipStatus, to: MembershipStatus) -> Self {
        MembershipError::InvalidStateTransition { from, to }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MembershipError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::NotFound(_) | MembershipError::NotFoundForUser(_) => {
                ErrorCode::MembershipNotFound
            }
            MembershipError::AlreadyExists(_) => ErrorCode::MembershipExists,
            MembershipError::UnknownBillingRef(_) => ErrorCode::MembershipNotFound,
            MembershipError::NotEligible { .. } => ErrorCode::NotEligible,
            MembershipError::NotActive { .. } => ErrorCode::MembershipNotActive,
            MembershipError::PenaltyActive { .. } => ErrorCode::PenaltyActive,
            MembershipError::WeeklyCapReached { .. } => ErrorCode::WeeklyCapReached,
            MembershipError::CheckInTooFar { .. } => ErrorCode::CheckInTooFar,
            MembershipError::CheckInOutsideWindow => ErrorCode::CheckInOutsideWindow,
            MembershipError::RecordNotFound(_) => ErrorCode::RecordNotFound,
            MembershipError::AlreadyConfirmed(_) => ErrorCode::AlreadyConfirmed,
            MembershipError::InvalidStateTransition { .. } => ErrorCode::InvalidStateTransition,
            MembershipError::ConcurrentModification => ErrorCode::ConcurrentModification,
            MembershipError::Validation { .. } => ErrorCode::ValidationFailed,
            MembershipError::Infrastructure(_) => ErrorCode::StoreError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            MembershipError::NotFound(id) => format!("Membership not found: {}", id),
            MembershipError::NotFoundForUser(user_id) => {
                format!("No membership found for user: {}", user_id)
            }
            MembershipError::AlreadyExists(user_id) => {
                format!("User {} already has an active membership", user_id)
            }
            MembershipError::UnknownBillingRef(subscription_ref) => {
                format!("No membership for subscription {}", subscription_ref)
            }
            MembershipError::NotEligible { precio, deporte } => match deporte {
                Some(deporte) => format!(
                    "Outing not covered by the membership (price {}, sport {})",
                    precio, deporte
                ),
                None => format!("Outing not covered by the membership (price {})", precio),
            },
            MembershipError::NotActive { estado } => {
                format!("Membership is {} and cannot be used", estado)
            }
            MembershipError::PenaltyActive { dias_restantes, .. } => format!(
                "Reservations blocked for {} more day(s) due to consecutive no-shows",
                dias_restantes
            ),
            MembershipError::WeeklyCapReached { limite } => {
                format!("Weekly limit of {} outing(s) reached", limite)
            }
            MembershipError::CheckInTooFar {
                distancia_metros,
                radio_metros,
            } => format!(
                "You are {:.0} m from the meeting point; check-in requires {:.0} m or less",
                distancia_metros, radio_metros
            ),
            MembershipError::CheckInOutsideWindow => {
                "Check-in is not open for this outing right now".to_string()
            }
            MembershipError::RecordNotFound(salida_id) => {
                format!("Salida {} not found in membership history", salida_id)
            }
            MembershipError::AlreadyConfirmed(salida_id) => {
                format!("Attendance for salida {} was already confirmed", salida_id)
            }
            MembershipError::InvalidStateTransition { from, to } => {
                format!("Cannot transition membership from {} to {}", from, to)
            }
            MembershipError::ConcurrentModification => {
                "Membership was modified concurrently; reload and retry".to_string()
            }
            MembershipError::Validation { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MembershipError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if the *caller* may retry this error. The engine
    /// itself never retries: a retry re-derives time-dependent state.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MembershipError::Infrastructure(_) | MembershipError::ConcurrentModification
        )
    }
}

impl std::fmt::Display for MembershipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MembershipError {}

impl From<ValidationError> for MembershipError {
    fn from(err: ValidationError) -> Self {
        MembershipError::Validation {
            field: "value".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<MembershipError> for DomainError {
    fn from(err: MembershipError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
