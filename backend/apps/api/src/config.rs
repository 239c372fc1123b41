//! Environment configuration for the API binary.
//!
//! Everything is read once at startup. Library crates receive plain values.

use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::config::{DEFAULT_REFRESH_TOKEN_DAYS, MAX_REFRESH_TOKEN_DAYS};

const DEFAULT_PORT: u16 = 8081;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 3;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Holds secrets, so no `Debug`.
pub struct ApiConfig {
    pub database_url: String,
    pub port: u16,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    /// `(email, password)` when both variables are set
    pub bootstrap_admin: Option<(String, String)>,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// `allow_random_secret` is true for debug builds only.
    pub fn from_lookup<F>(lookup: F, allow_random_secret: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .context("DATABASE_URL must be set")?;

        let refresh_token_days: i64 =
            parse_or(&lookup, "REFRESH_TOKEN_EXPIRY_DAYS", DEFAULT_REFRESH_TOKEN_DAYS)?;
        if !(1..=MAX_REFRESH_TOKEN_DAYS).contains(&refresh_token_days) {
            bail!("REFRESH_TOKEN_EXPIRY_DAYS must be between 1 and {MAX_REFRESH_TOKEN_DAYS}");
        }

        let auth = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => AuthConfig::new(secret, refresh_token_days),
            None if allow_random_secret => {
                tracing::warn!(
                    "JWT_SECRET is not set; using a random secret, tokens will not survive a restart"
                );
                AuthConfig {
                    refresh_token_ttl: chrono::Duration::days(refresh_token_days),
                    ..AuthConfig::with_random_secret()
                }
            }
            None => bail!("JWT_SECRET must be set"),
        };

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let bootstrap_admin = match (
            lookup("BOOTSTRAP_ADMIN_EMAIL").filter(|s| !s.trim().is_empty()),
            lookup("BOOTSTRAP_ADMIN_PASSWORD").filter(|s| !s.is_empty()),
        ) {
            (Some(email), Some(password)) => Some((email, password)),
            _ => None,
        };

        Ok(Self {
            database_url,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            acquire_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DATABASE_ACQUIRE_TIMEOUT_SECS",
                DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?),
            frontend_origins,
            auth,
            bootstrap_admin,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(
            lookup(&[("DATABASE_URL", "postgres://localhost/rms"), ("JWT_SECRET", "s")]),
            false,
        )
        .unwrap();

        assert_eq!(config.port, 8081);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.acquire_timeout, Duration::from_secs(3));
        assert_eq!(config.auth.access_token_secret, b"s".to_vec());
        assert_eq!(config.auth.refresh_token_ttl, chrono::Duration::days(7));
        assert!(config.bootstrap_admin.is_none());
        assert_eq!(config.frontend_origins.len(), 2);
    }

    #[test]
    fn test_missing_secret_is_fatal_in_release() {
        let env = lookup(&[("DATABASE_URL", "postgres://x"), ("JWT_SECRET", "")]);
        assert!(ApiConfig::from_lookup(env, false).is_err());
    }

    #[test]
    fn test_missing_secret_falls_back_in_debug() {
        let env = lookup(&[("DATABASE_URL", "postgres://x"), ("REFRESH_TOKEN_EXPIRY_DAYS", "30")]);
        let config = ApiConfig::from_lookup(env, true).unwrap();
        assert_eq!(config.auth.access_token_secret.len(), 32);
        assert_eq!(config.auth.refresh_token_ttl, chrono::Duration::days(30));
    }

    #[test]
    fn test_invalid_numbers_are_errors() {
        let env = lookup(&[("DATABASE_URL", "postgres://x"), ("JWT_SECRET", "s"), ("PORT", "http")]);
        assert!(ApiConfig::from_lookup(env, false).is_err());

        let env = lookup(&[
            ("DATABASE_URL", "postgres://x"),
            ("JWT_SECRET", "s"),
            ("REFRESH_TOKEN_EXPIRY_DAYS", "0"),
        ]);
        assert!(ApiConfig::from_lookup(env, false).is_err());
    }

    #[test]
    fn test_refresh_days_upper_bound() {
        let env = |days: &'static str| {
            lookup(&[
                ("DATABASE_URL", "postgres://x"),
                ("JWT_SECRET", "s"),
                ("REFRESH_TOKEN_EXPIRY_DAYS", days),
            ])
        };

        let config = ApiConfig::from_lookup(env("3650"), false).unwrap();
        assert_eq!(config.auth.refresh_token_ttl, chrono::Duration::days(3650));

        assert!(ApiConfig::from_lookup(env("3651"), false).is_err());
        assert!(ApiConfig::from_lookup(env("100000000"), false).is_err());
    }

    #[test]
    fn test_bootstrap_admin_needs_both_values() {
        let env = lookup(&[
            ("DATABASE_URL", "postgres://x"),
            ("JWT_SECRET", "s"),
            ("BOOTSTRAP_ADMIN_EMAIL", "root@example.com"),
        ]);
        assert!(ApiConfig::from_lookup(env, false).unwrap().bootstrap_admin.is_none());

        let env = lookup(&[
            ("DATABASE_URL", "postgres://x"),
            ("JWT_SECRET", "s"),
            ("BOOTSTRAP_ADMIN_EMAIL", "root@example.com"),
            ("BOOTSTRAP_ADMIN_PASSWORD", "Harbor-Light-2024"),
        ]);
        assert!(ApiConfig::from_lookup(env, false).unwrap().bootstrap_admin.is_some());
    }
}
