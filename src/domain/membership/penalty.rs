//! No-show penalty rules.
//!
//! Two consecutive confirmed no-shows put the membership under a
//! time-boxed reservation block. Expiry is lazy: there is no background
//! sweeper, the state is normalized at the start of every public
//! operation.

use serde::{Deserialize, Serialize};

use crate::config::PenalizacionConfig;
use crate::domain::foundation::Timestamp;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// A past penalty, kept for history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyEpisode {
    pub fecha_inicio: Timestamp,
    pub fecha_fin: Timestamp,
    pub motivo: String,
    pub inasistencias_consecutivas: u32,
}

/// Penalty state carried on the membership aggregate.
///
/// `dias_restantes` is always a function of `fecha_fin - now`, recomputed
/// by [`PenaltyState::normalize`]; it is never independent truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PenaltyState {
    pub activa: bool,
    pub fecha_inicio: Option<Timestamp>,
    pub fecha_fin: Option<Timestamp>,
    pub dias_restantes: u32,
    pub inasistencias_consecutivas: u32,
    pub historial: Vec<PenaltyEpisode>,
}

impl PenaltyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lazily expires a lapsed penalty and recomputes `dias_restantes`.
    pub fn normalize(&mut self, now: Timestamp) {
        if !self.activa {
            return;
        }
        match self.fecha_fin {
            Some(fin) if now >= fin => {
                self.activa = false;
                self.dias_restantes = 0;
            }
            Some(fin) => {
                let remaining_ms = fin.millis_since(&now);
                self.dias_restantes =
                    ((remaining_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY) as u32;
            }
            None => {
                // An active penalty always carries an end date; a missing
                // one means corrupted state, treat it as expired.
                self.activa = false;
                self.dias_restantes = 0;
            }
        }
    }

    /// Whether new reservations are blocked at `now`.
    pub fn is_blocked(&mut self, now: Timestamp) -> bool {
        self.normalize(now);
        self.activa
    }

    /// Records an attended outing: the consecutive no-show streak resets.
    pub fn register_attendance(&mut self) {
        self.inasistencias_consecutivas = 0;
    }

    /// Records a confirmed no-show, applying a penalty when the streak
    /// reaches the configured threshold.
    ///
    /// Returns the applied episode, if any, so callers can notify.
    pub fn register_no_show(
        &mut self,
        config: &PenalizacionConfig,
        now: Timestamp,
    ) -> Option<PenaltyEpisode> {
        self.inasistencias_consecutivas += 1;
        if self.inasistencias_consecutivas >= config.inasistencias_consecutivas {
            Some(self.apply(config, now))
        } else {
            None
        }
    }

    /// Applies a penalty starting at `now` and resets the streak counter,
    /// so a no-show right after starts a fresh 1-count rather than
    /// stacking a second penalty.
    fn apply(&mut self, config: &PenalizacionConfig, now: Timestamp) -> PenaltyEpisode {
        let fecha_fin = now.add_days(config.dias);

        self.activa = true;
        self.fecha_inicio = Some(now);
        self.fecha_fin = Some(fecha_fin);
        self.dias_restantes = config.dias as u32;

        let episode = PenaltyEpisode {
            fecha_inicio: now,
            fecha_fin,
            motivo: format!(
                "{} inasistencias consecutivas",
                self.inasistencias_consecutivas
            ),
            inasistencias_consecutivas: self.inasistencias_consecutivas,
        };
        self.historial.push(episode.clone());

        self.inasistencias_consecutivas = 0;
        episode
    }
}
