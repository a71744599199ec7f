//! Application layer - the membership lifecycle orchestrator.
//!
//! One command handler per public operation. Every handler follows the
//! same shape: resolve `now` from the clock, load the aggregate,
//! normalize lazily-expired state, evaluate rules, mutate, and save
//! with the optimistic version check.

pub mod handlers;
