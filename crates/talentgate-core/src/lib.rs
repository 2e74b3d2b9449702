//! Shared service plumbing for Talentgate services.
//!
//! Health handlers, tracing setup, request-id middleware, and serde helpers.
//! Domain logic never lives here.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
