//! Cookie builders for the session token.
//!
//! The cookie Max-Age always equals the session TTL, so the browser drops
//! the cookie at the same moment the server stops accepting the session.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the session token.
pub const SESSION_COOKIE: &str = "talentgate_session";

/// Session time-to-live in seconds (7 days). Shared by the session store
/// (`expires_at`) and the cookie (`Max-Age`).
pub const SESSION_TTL_SECS: u64 = 604_800;

/// Set the session cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use talentgate_auth_types::cookie::{set_session_cookie, SESSION_COOKIE};
///
/// let jar = CookieJar::new();
/// let jar = set_session_cookie(jar, "token_value".to_string(), "example.com".to_string());
/// let cookie = jar.get(SESSION_COOKIE).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(604_800)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(jar: CookieJar, token: String, domain: String) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .domain(domain)
        .max_age(Duration::seconds(SESSION_TTL_SECS as i64))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Read the session token from the jar, if present.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use talentgate_auth_types::cookie::{read_session_cookie, set_session_cookie};
///
/// let jar = CookieJar::new();
/// assert_eq!(read_session_cookie(&jar), None);
/// let jar = set_session_cookie(jar, "token_value".to_string(), "example.com".to_string());
/// assert_eq!(read_session_cookie(&jar).as_deref(), Some("token_value"));
/// ```
pub fn read_session_cookie(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_owned())
}

/// Clear the session cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use talentgate_auth_types::cookie::{
///     clear_session_cookie, set_session_cookie, SESSION_COOKIE,
/// };
///
/// let jar = CookieJar::new();
/// let jar = set_session_cookie(jar, "token_value".to_string(), "example.com".to_string());
/// let jar = clear_session_cookie(jar, "example.com".to_string());
/// let cookie = jar.get(SESSION_COOKIE).unwrap();
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// assert_eq!(cookie.value(), "");
/// ```
pub fn clear_session_cookie(jar: CookieJar, domain: String) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .domain(domain)
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}
