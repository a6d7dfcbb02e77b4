use std::{net::SocketAddr, time::Duration};

use anyhow::{Context, Result};

/// Service configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL, e.g. `sqlite://wellness.db`.
    pub database_url: String,

    /// HMAC secret used to sign bearer tokens.
    pub jwt_secret: String,

    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,

    /// Artificial delay before the chat endpoint answers.
    pub chat_delay: Duration,

    /// Artificial delay before the scan endpoint answers.
    pub scan_delay: Duration,

    /// Lifetime of issued tokens.
    pub token_ttl: time::Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required: `DATABASE_URL`, `JWT_SECRET`.
    ///
    /// Optional: `BIND_ADDR` (default "127.0.0.1:3001"), `CHAT_DELAY_MS`
    /// (default 1000), `SCAN_DELAY_MS` (default 2000), `TOKEN_TTL_DAYS`
    /// (default 90).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET must be set")?;
        if jwt_secret.is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| "127.0.0.1:3001".to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address")?;

        let chat_delay = Duration::from_millis(parse_or(&lookup, "CHAT_DELAY_MS", 1000)?);
        let scan_delay = Duration::from_millis(parse_or(&lookup, "SCAN_DELAY_MS", 2000)?);
        let token_ttl = time::Duration::days(parse_or(&lookup, "TOKEN_TTL_DAYS", 90)?);

        tracing::info!(
            bind_addr = %bind_addr,
            database_url = %database_url,
            chat_delay_ms = chat_delay.as_millis() as u64,
            scan_delay_ms = scan_delay.as_millis() as u64,
            "configuration loaded"
        );

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            chat_delay,
            scan_delay,
            token_ttl,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("{key} must be a non-negative integer, got {raw:?}")),
        None => Ok(default),
    }
}
