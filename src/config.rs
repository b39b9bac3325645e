use std::env;
use std::str::FromStr;

use crate::error::AppError;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Tokens are valid for 30 days.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;
pub const DEFAULT_BCRYPT_COST: u32 = 10;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Process configuration, loaded once at startup and handed to constructors.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_uri: String,
    pub token_secret: String,
    pub server_port: u16,
    pub server_host: String,
    pub token_ttl_secs: i64,
    pub bcrypt_cost: u32,
    pub database_max_connections: u32,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// `DATABASE_URI` and `TOKEN_SECRET` are required and must be non-empty; every other
    /// setting falls back to its default when unset but is rejected when it does not parse.
    pub fn from_vars<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String, AppError> {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| AppError::ConfigurationError(format!("{} must be set", key)))
        };

        Ok(Self {
            database_uri: required("DATABASE_URI")?,
            token_secret: required("TOKEN_SECRET")?,
            server_port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            server_host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            token_ttl_secs: parse_or(&lookup, "TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?,
            bcrypt_cost: parse_or(&lookup, "BCRYPT_COST", DEFAULT_BCRYPT_COST)?,
            database_max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            )?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::ConfigurationError(format!("{} must be a number", key))),
    }
}
