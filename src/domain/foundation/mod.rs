//! Foundation value objects shared across the domain.
//!
//! Small immutable types with validated constructors: identifiers,
//! timestamps, calendar weeks, geographic points and the error types
//! every module builds on.

mod errors;
mod geo;
mod ids;
mod state_machine;
mod timestamp;
mod week;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use geo::{GeoPoint, EARTH_RADIUS_METERS};
pub use ids::{MembershipId, SalidaId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
pub use week::CalendarWeek;
