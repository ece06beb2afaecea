use chrono::FixedOffset;

use crate::auth::jwt::JwtConfig;

/// Default display offset for dates shown to moderators (Israel standard time).
const DEFAULT_DISPLAY_OFFSET_MINUTES: i32 = 120;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub database_url: String,
    pub jwt: JwtConfig,
    /// Argon2 PHC string of the shared admin password.
    pub admin_password_hash: String,
    /// Offset used when rendering dates for moderators and in emails.
    pub display_offset: FixedOffset,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                      | Required | Default                 |
    /// |------------------------------|----------|-------------------------|
    /// | `HOST`                       | no       | `0.0.0.0`               |
    /// | `PORT`                       | no       | `3000`                  |
    /// | `CORS_ORIGINS`               | no       | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`       | no       | `30`                    |
    /// | `DATABASE_URL`               | **yes**  |                         |
    /// | `JWT_SECRET`                 | **yes**  |                         |
    /// | `JWT_EXPIRY_HOURS`           | no       | `12`                    |
    /// | `ADMIN_PASSWORD_HASH`        | **yes**  |                         |
    /// | `DISPLAY_UTC_OFFSET_MINUTES` | no       | `120`                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = parse_var("PORT", 3000u16)?;

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_var("REQUEST_TIMEOUT_SECS", 30u64)?;
        let database_url = required_var("DATABASE_URL")?;
        let jwt = JwtConfig::from_env()?;
        let admin_password_hash = required_var("ADMIN_PASSWORD_HASH")?;

        let offset_minutes =
            parse_var("DISPLAY_UTC_OFFSET_MINUTES", DEFAULT_DISPLAY_OFFSET_MINUTES)?;
        let display_offset =
            FixedOffset::east_opt(offset_minutes * 60).ok_or_else(|| ConfigError::Invalid {
                name: "DISPLAY_UTC_OFFSET_MINUTES",
                reason: format!("{offset_minutes} is out of range"),
            })?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            jwt,
            admin_password_hash,
            display_offset,
        })
    }
}

/// Read a variable that must be present and non-empty.
pub(crate) fn required_var(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

/// Read and parse an optional variable, falling back to `default`.
pub(crate) fn parse_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
