use axum::http::{HeaderMap, header};

use crate::domain::types::RequestMetadata;

pub mod admin;
pub mod health;
pub mod otp;
pub mod session;

/// Pull user-agent and client IP out of the request headers for session
/// audit fields. The IP honors `x-forwarded-for` (first hop) and falls back
/// to `x-real-ip`; absent headers just leave the fields empty.
pub(crate) fn request_metadata(headers: &HeaderMap) -> RequestMetadata {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned);
    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_owned())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(ToOwned::to_owned)
        });
    RequestMetadata {
        user_agent,
        ip_address,
    }
}
