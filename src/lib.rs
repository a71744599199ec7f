//! Club del Trekking - Membership & Attendance Engine
//!
//! This crate implements the subscription rules of the Club del Trekking:
//! eligibility of outings for membership coverage, weekly usage caps,
//! geofenced check-ins, post-event attendance confirmation with escalating
//! no-show penalties, and monthly billing-period rollover.
//!
//! It is a pure domain library. HTTP routing, document-store persistence,
//! the billing provider's webhook protocol and notification transport all
//! live behind ports; this crate only owns the rules that must hold
//! regardless of transport or storage.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
