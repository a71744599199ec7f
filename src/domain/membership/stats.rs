//! Derived membership statistics.
//!
//! Read-only aggregation over the attendance history; nothing here is
//! stored.

use serde::{Deserialize, Serialize};

use crate::config::BadgeThresholds;
use crate::domain::foundation::Timestamp;

use super::{Badge, Membership};

/// A member's usage summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipStats {
    pub total_salidas: u32,
    pub total_con_check_in: u32,
    pub salidas_este_mes: u32,
    pub badge: Badge,
}

impl MembershipStats {
    /// Derives the summary from the history at `now`.
    pub fn derive(membership: &Membership, thresholds: &BadgeThresholds, now: Timestamp) -> Self {
        let total_salidas = membership.historial.len() as u32;
        let total_con_check_in = membership
            .historial
            .iter()
            .filter(|r| r.check_in_realizado)
            .count() as u32;

        let inicio_mes = now.start_of_month();
        let salidas_este_mes = membership
            .historial
            .iter()
            .filter(|r| r.fecha >= inicio_mes)
            .count() as u32;

        Self {
            total_salidas,
            total_con_check_in,
            salidas_este_mes,
            badge: Badge::for_total(thresholds, total_salidas),
        }
    }
}
