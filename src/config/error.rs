//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Monthly price must be positive")]
    InvalidPrecioMensual,

    #[error("Max covered outing price must be positive")]
    InvalidMaxPrecioSalida,

    #[error("Covered sport cannot be empty")]
    EmptyDeportePermitido,

    #[error("Weekly outing limit must be at least 1")]
    InvalidLimiteSemanal,

    #[error("Check-in radius must be positive")]
    InvalidRadioCheckIn,

    #[error("Check-in window minutes cannot be negative")]
    InvalidCheckInWindow,

    #[error("Penalty length must be at least 1 day")]
    InvalidPenalizacionDias,

    #[error("No-show threshold must be at least 1")]
    InvalidPenalizacionUmbral,

    #[error("Badge thresholds must be strictly increasing")]
    InvalidBadgeThresholds,
}
