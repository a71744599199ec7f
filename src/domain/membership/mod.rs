//! Membership domain module.
//!
//! The Club del Trekking engine: coverage eligibility, weekly caps,
//! geofenced check-ins, attendance confirmation with escalating no-show
//! penalties, and the monthly billing-period rollover.
//!
//! # Module Structure
//!
//! - `aggregate` - Membership aggregate entity
//! - `status` - MembershipStatus state machine
//! - `attendance` - per-outing history records
//! - `penalty` - no-show penalty rules
//! - `eligibility` - coverage rule (price + sport)
//! - `reservation` - reservation guard (state, penalty, weekly cap)
//! - `checkin` - geofence + time-window validation
//! - `confirmation` - one-shot attendance resolution
//! - `billing` - monthly rollover + inbound billing signal
//! - `badge` / `stats` - derived gamification data

mod aggregate;
mod attendance;
mod badge;
mod billing;
mod checkin;
mod confirmation;
mod eligibility;
mod errors;
mod events;
mod penalty;
mod reservation;
mod salida;
mod stats;
mod status;

pub use aggregate::{BillingRef, Membership, MonthlyUsage};
pub use attendance::AttendanceRecord;
pub use badge::Badge;
pub use billing::{rollover_if_due, BillingSignal, BillingStatus};
pub use checkin::{validate as validate_check_in, CheckInDecision, CheckInDenial};
pub use confirmation::{confirm, pending_confirmations, ConfirmationOutcome};
pub use eligibility::is_eligible;
pub use errors::MembershipError;
pub use events::NotificationKind;
pub use penalty::{PenaltyEpisode, PenaltyState};
pub use reservation::{can_reserve, ReservationDecision, ReservationDenial};
pub use salida::Salida;
pub use stats::MembershipStats;
pub use status::MembershipStatus;
