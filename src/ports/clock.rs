//! Clock port.

use crate::domain::foundation::Timestamp;

/// Injected time source.
///
/// Every temporal rule (penalty expiry, check-in window, weekly and
/// monthly boundaries) receives `now` from here, so the rules are
/// testable without wall-clock coupling.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
