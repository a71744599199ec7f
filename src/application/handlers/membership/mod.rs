//! Membership lifecycle handlers.
//!
//! The public operations of the engine: subscribe, react to billing
//! signals, reserve, check in, confirm attendance, cancel, and the
//! period expiry/rollover sweep.

mod billing_event;
mod cancel;
mod check_in;
mod confirm_attendance;
mod expire_if_due;
mod reserve;
mod subscribe;

pub use billing_event::BillingEventHandler;
pub use cancel::{CancelCommand, CancelHandler};
pub use check_in::{CheckInCommand, CheckInHandler};
pub use confirm_attendance::{ConfirmAttendanceCommand, ConfirmAttendanceHandler};
pub use expire_if_due::{ExpireIfDueHandler, ExpireOutcome, ExpireResult};
pub use reserve::{ReserveCommand, ReserveHandler, ReserveResult};
pub use subscribe::{SubscribeCommand, SubscribeHandler};
