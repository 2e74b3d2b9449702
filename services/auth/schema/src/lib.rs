//! sea-orm entities owned by the auth service.

pub mod otp_codes;
pub mod outbox_events;
pub mod sessions;
pub mod users;
