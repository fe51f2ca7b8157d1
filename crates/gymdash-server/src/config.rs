use std::env;

use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub sqlite_path: String,
    pub backend_url: String,
    pub backend_timeout_secs: u64,
    pub secure_cookies: bool,
    pub auth_rate_limit: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let backend_url = env::var("BACKEND_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());
        // Reject garbage early instead of on the first login attempt
        Url::parse(&backend_url)
            .map_err(|e| anyhow::anyhow!("BACKEND_URL is not a valid URL: {e}"))?;

        Ok(Self {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("SERVER_PORT must be a valid port number"))?,
            sqlite_path: env::var("SQLITE_PATH")
                .unwrap_or_else(|_| "./data/gymdash.db".to_string()),
            backend_url: backend_url.trim_end_matches('/').to_string(),
            backend_timeout_secs: timeout_secs(env::var("BACKEND_TIMEOUT_SECS").ok().as_deref()),
            secure_cookies: flag("SECURE_COOKIES", false),
            auth_rate_limit: flag("AUTH_RATE_LIMIT", true),
        })
    }
}

/// Unset, unparsable or zero falls back to 30 seconds; a zero timeout would
/// fail every backend call.
fn timeout_secs(raw: Option<&str>) -> u64 {
    match raw.and_then(|v| v.trim().parse::<u64>().ok()) {
        Some(0) => {
            tracing::warn!("BACKEND_TIMEOUT_SECS=0 ignored, using {DEFAULT_TIMEOUT_SECS}");
            DEFAULT_TIMEOUT_SECS
        }
        Some(secs) => secs,
        None => DEFAULT_TIMEOUT_SECS,
    }
}

fn flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
