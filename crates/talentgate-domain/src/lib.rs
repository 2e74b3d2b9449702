//! Pure domain types shared by Talentgate services.
//!
//! Everything here is framework-free. Serde derives for wire payloads are
//! the only dependency, so any layer of any service can depend on this
//! crate without dragging in a web stack.

pub mod user;
