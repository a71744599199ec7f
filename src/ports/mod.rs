//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `MembershipStore` - load/save of the aggregate with an optimistic
//!   version check
//! - `Notifier` - fire-and-forget member notifications
//! - `Clock` - the injected time source; rule code never reads the wall
//!   clock directly

mod clock;
mod membership_store;
mod notifier;

pub use clock::Clock;
pub use membership_store::MembershipStore;
pub use notifier::Notifier;
