//! Billing period rollover and the inbound provider signal.
//!
//! The engine never calls the billing provider; it only reacts to
//! signals handed to it. The monthly rollover resets the usage counter
//! and advances the period boundaries, a different counting horizon
//! from the always-derived weekly cap, on purpose.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::Membership;

/// Provider-side payment outcome, already verified upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingStatus {
    /// Charge collected; the subscription is paid up.
    Approved,
    /// Charge rejected or the subscription was cancelled provider-side.
    Rejected,
    /// Charge still in flight; no lifecycle effect.
    Pending,
}

/// Inbound "billing status changed" event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingSignal {
    /// The provider's subscription identifier, matched against
    /// `billing.subscription_ref`.
    pub subscription_ref: String,
    pub status: BillingStatus,
}

impl BillingStatus {
    /// Wire value stored as the provider status on the aggregate.
    pub fn wire_name(&self) -> &'static str {
        match self {
            BillingStatus::Approved => "approved",
            BillingStatus::Rejected => "rejected",
            BillingStatus::Pending => "pending",
        }
    }
}

/// Rolls the monthly period over when due.
///
/// Due means one calendar month has elapsed since the period start.
/// The reset zeroes `salidas_realizadas` and re-anchors all three dates
/// at `now`. Returns whether a rollover happened.
pub fn rollover_if_due(membership: &mut Membership, now: Timestamp) -> bool {
    let due_at = membership.fecha_inicio.add_months(1);
    if now.is_before(&due_at) {
        return false;
    }

    membership.uso_mensual.salidas_realizadas = 0;
    membership.uso_mensual.ultima_reset = now;
    membership.fecha_inicio = now;
    membership.fecha_fin = now.add_months(1);
    membership.proxima_fecha_pago = now.add_months(1);
    membership.updated_at = now;
    true
}
