//! Auth types shared across Talentgate services.
//!
//! Provides the session cookie builders and the opaque [`token::SessionToken`].
//! Sessions are validated against the database by the auth service; nothing
//! in here can tell a valid token from a revoked one.

pub mod cookie;
pub mod token;
