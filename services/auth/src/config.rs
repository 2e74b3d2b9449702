/// Auth service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AuthConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Cookie domain attribute (root domain, e.g. "example.com").
    pub cookie_domain: String,
    /// Base32-encoded shared secret for the admin TOTP path.
    pub admin_totp_secret: String,
    /// Issuer label shown in authenticator apps (default "Talentgate").
    /// Env var: `TOTP_ISSUER`.
    pub totp_issuer: String,
    /// Account label shown in authenticator apps (default "admin").
    /// Env var: `TOTP_ACCOUNT`.
    pub totp_account: String,
    /// TOTP code length in digits (default 6). Env var: `TOTP_DIGITS`.
    pub totp_digits: usize,
    /// TOTP step length in seconds (default 30). Env var: `TOTP_STEP`.
    pub totp_step: u64,
    /// TCP port to listen on (default 3112). Env var: `AUTH_PORT`.
    pub auth_port: u16,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            cookie_domain: std::env::var("COOKIE_DOMAIN").expect("COOKIE_DOMAIN"),
            admin_totp_secret: std::env::var("ADMIN_TOTP_SECRET").expect("ADMIN_TOTP_SECRET"),
            totp_issuer: std::env::var("TOTP_ISSUER").unwrap_or_else(|_| "Talentgate".to_owned()),
            totp_account: std::env::var("TOTP_ACCOUNT").unwrap_or_else(|_| "admin".to_owned()),
            totp_digits: std::env::var("TOTP_DIGITS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(6),
            totp_step: std::env::var("TOTP_STEP")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            auth_port: std::env::var("AUTH_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3112),
        }
    }
}
