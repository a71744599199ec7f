//! Adapters - in-process implementations of the ports.
//!
//! The real deployment plugs a document store and a push gateway into
//! the same ports; the adapters here are the reference implementations
//! used by tests and development setups.

mod clock;
mod in_memory_store;
mod notify;

pub use clock::{FixedClock, SystemClock};
pub use in_memory_store::InMemoryMembershipStore;
pub use notify::{RecordingNotifier, TracingNotifier};
