//! Club configuration module
//!
//! Tunable constants governing the membership rules: pricing, coverage
//! criteria, usage limits, check-in geofence/window, penalty escalation
//! and badge thresholds. Pure data; no behavior.
//!
//! Values are loaded from environment variables with the `CLUB_TREKKING`
//! prefix (nested sections separated by `__`), falling back to the static
//! defaults the product has always shipped with.
//!
//! # Example
//!
//! ```no_run
//! use club_trekking::config::ClubConfig;
//!
//! let config = ClubConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Weekly cap: {}", config.limites.salidas_por_semana);
//! ```

mod error;

pub use error::{ConfigError, ValidationError};

use once_cell::sync::Lazy;
use serde::Deserialize;

/// Shared default configuration, for call sites that have no override.
pub static DEFAULT_CONFIG: Lazy<ClubConfig> = Lazy::new(ClubConfig::default);

/// Root configuration for the membership engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClubConfig {
    /// Monthly membership price (ARS).
    pub precio_mensual: f64,

    /// Outings priced at or under this are covered by the membership.
    pub max_precio_salida: f64,

    /// The only sport covered by the membership.
    pub deporte_permitido: String,

    /// Usage limits.
    pub limites: LimitesConfig,

    /// Check-in geofence and time window.
    pub check_in: CheckInConfig,

    /// No-show penalty escalation.
    pub penalizacion: PenalizacionConfig,

    /// Gamification badge thresholds.
    pub badges: BadgeThresholds,
}

impl Default for ClubConfig {
    fn default() -> Self {
        Self {
            precio_mensual: 25_000.0,
            max_precio_salida: 10_000.0,
            deporte_permitido: "Trekking".to_string(),
            limites: LimitesConfig::default(),
            check_in: CheckInConfig::default(),
            penalizacion: PenalizacionConfig::default(),
            badges: BadgeThresholds::default(),
        }
    }
}

/// Usage limits.
///
/// The pause fields are reserved: the data model allows a paused
/// membership but the rule set defines no pause/resume transitions yet.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitesConfig {
    /// Maximum covered reservations per calendar week.
    pub salidas_por_semana: u32,
    /// Reserved: pauses allowed per month.
    pub pausas_por_mes: u32,
    /// Reserved: minimum pause length in days.
    pub dias_minimos_pausa: u32,
}

impl Default for LimitesConfig {
    fn default() -> Self {
        Self {
            salidas_por_semana: 2,
            pausas_por_mes: 1,
            dias_minimos_pausa: 7,
        }
    }
}

/// Check-in geofence and time window.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CheckInConfig {
    /// Maximum distance to the meeting point, in meters.
    pub radio_metros: f64,
    /// Check-in opens this many minutes before the outing starts.
    pub tiempo_antes_minutos: i64,
    /// Check-in closes this many minutes after the outing starts.
    pub tiempo_despues_minutos: i64,
}

impl Default for CheckInConfig {
    fn default() -> Self {
        Self {
            radio_metros: 100.0,
            tiempo_antes_minutos: 30,
            tiempo_despues_minutos: 15,
        }
    }
}

/// No-show penalty escalation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PenalizacionConfig {
    /// Penalty length in days.
    pub dias: i64,
    /// Consecutive confirmed no-shows that trigger a penalty.
    pub inasistencias_consecutivas: u32,
}

impl Default for PenalizacionConfig {
    fn default() -> Self {
        Self {
            dias: 3,
            inasistencias_consecutivas: 2,
        }
    }
}

/// Badge thresholds by total attended outings. Bronce starts at zero.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BadgeThresholds {
    pub plata_minimo_salidas: u32,
    pub oro_minimo_salidas: u32,
}

impl Default for BadgeThresholds {
    fn default() -> Self {
        Self {
            plata_minimo_salidas: 10,
            oro_minimo_salidas: 25,
        }
    }
}

impl ClubConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `CLUB_TREKKING` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// Unset values fall back to the static defaults.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("CLUB_TREKKING")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: ClubConfig = config.try_deserialize()?;
        Ok(loaded)
    }

    /// Validate the loaded configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.precio_mensual <= 0.0 {
            return Err(ValidationError::InvalidPrecioMensual);
        }
        if self.max_precio_salida <= 0.0 {
            return Err(ValidationError::InvalidMaxPrecioSalida);
        }
        if self.deporte_permitido.is_empty() {
            return Err(ValidationError::EmptyDeportePermitido);
        }
        if self.limites.salidas_por_semana == 0 {
            return Err(ValidationError::InvalidLimiteSemanal);
        }
        if self.check_in.radio_metros <= 0.0 {
            return Err(ValidationError::InvalidRadioCheckIn);
        }
        if self.check_in.tiempo_antes_minutos < 0 || self.check_in.tiempo_despues_minutos < 0 {
            return Err(ValidationError::InvalidCheckInWindow);
        }
        if self.penalizacion.dias < 1 {
            return Err(ValidationError::InvalidPenalizacionDias);
        }
        if self.penalizacion.inasistencias_consecutivas == 0 {
            return Err(ValidationError::InvalidPenalizacionUmbral);
        }
        if self.badges.plata_minimo_salidas >= self.badges.oro_minimo_salidas {
            return Err(ValidationError::InvalidBadgeThresholds);
        }
        Ok(())
    }
}
