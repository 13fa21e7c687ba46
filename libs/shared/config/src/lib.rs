use std::env;
use tracing::warn;

/// Environment key holding the access token forwarded to the clinic API.
pub const ACCESS_TOKEN_KEY: &str = "PRONTIVUS_ACCESS_TOKEN";

/// Key used by installations that predate the rename. Read only as a fallback.
pub const LEGACY_ACCESS_TOKEN_KEY: &str = "CLINICORE_ACCESS_TOKEN";

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub access_token: Option<String>,
    pub clinic_utc_offset_minutes: i32,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup so tests do not
    /// have to mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("PRONTIVUS_API_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| {
                warn!("PRONTIVUS_API_URL not set, using default {}", DEFAULT_API_URL);
                DEFAULT_API_URL.to_string()
            });

        let access_token = resolve_access_token(&lookup);

        let clinic_utc_offset_minutes = match lookup("CLINIC_UTC_OFFSET_MINUTES") {
            Some(raw) => raw.trim().parse::<i32>().unwrap_or_else(|_| {
                warn!("CLINIC_UTC_OFFSET_MINUTES is not an integer ({}), using 0", raw);
                0
            }),
            None => 0,
        };

        let port = match lookup("DASHBOARD_PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                warn!("DASHBOARD_PORT is not a valid port ({}), using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let config = Self {
            api_base_url,
            access_token,
            clinic_utc_offset_minutes,
            port,
        };

        if !config.is_configured() {
            warn!("No default access token configured - requests must carry their own bearer token");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.api_base_url.is_empty() && self.access_token.is_some()
    }
}

fn resolve_access_token<F>(lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(token) = non_empty(ACCESS_TOKEN_KEY) {
        return Some(token);
    }

    non_empty(LEGACY_ACCESS_TOKEN_KEY).map(|token| {
        warn!(
            "{} not set, falling back to legacy {}",
            ACCESS_TOKEN_KEY, LEGACY_ACCESS_TOKEN_KEY
        );
        token
    })
}
