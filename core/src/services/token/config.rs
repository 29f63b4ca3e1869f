//! Configuration for the token service

use std::env;

use chrono::Duration;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::domain::entities::token::TokenKind;

/// Duration strings accepted in configuration, e.g. "30s", "15m", "1h", "7d"
static DURATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)(s|m|h|d)$").unwrap());

/// Configuration failures, raised at startup rather than at request time
#[derive(Error, Debug)]
pub enum TokenConfigError {
    #[error("Missing required environment variable: {var}")]
    MissingVar { var: String },

    #[error("Invalid duration string: {value}")]
    InvalidDuration { value: String },

    #[error("Token secret must not be empty")]
    EmptySecret,

    #[error("Access and refresh token secrets must differ")]
    IdenticalSecrets,
}

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Signing secret for access tokens
    pub access_token_secret: String,
    /// Signing secret for refresh tokens, distinct from the access secret
    pub refresh_token_secret: String,
    /// Access token time-to-live
    pub access_token_ttl: Duration,
    /// Refresh token time-to-live
    pub refresh_token_ttl: Duration,
    /// Issuer claim embedded and validated on verify
    pub issuer: String,
    /// Audience claim embedded and validated on verify
    pub audience: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_token_secret: "dev-access-secret-change-in-production".to_string(),
            refresh_token_secret: "dev-refresh-secret-change-in-production".to_string(),
            access_token_ttl: Duration::minutes(15),
            refresh_token_ttl: Duration::days(7),
            issuer: "crewbase".to_string(),
            audience: "crewbase-api".to_string(),
        }
    }
}

impl TokenServiceConfig {
    /// Loads the configuration from the environment.
    ///
    /// `ACCESS_TOKEN_SECRET` and `REFRESH_TOKEN_SECRET` are required and
    /// must differ; `ACCESS_TOKEN_EXPIRES_IN` (default "15m"),
    /// `REFRESH_TOKEN_EXPIRES_IN` (default "7d"), `ISSUER` and `AUDIENCE`
    /// fall back to development defaults.
    pub fn from_env() -> Result<Self, TokenConfigError> {
        let access_token_secret =
            env::var("ACCESS_TOKEN_SECRET").map_err(|_| TokenConfigError::MissingVar {
                var: "ACCESS_TOKEN_SECRET".to_string(),
            })?;
        let refresh_token_secret =
            env::var("REFRESH_TOKEN_SECRET").map_err(|_| TokenConfigError::MissingVar {
                var: "REFRESH_TOKEN_SECRET".to_string(),
            })?;

        let access_token_ttl =
            parse_duration(&env::var("ACCESS_TOKEN_EXPIRES_IN").unwrap_or_else(|_| "15m".to_string()))?;
        let refresh_token_ttl =
            parse_duration(&env::var("REFRESH_TOKEN_EXPIRES_IN").unwrap_or_else(|_| "7d".to_string()))?;

        let config = Self {
            access_token_secret,
            refresh_token_secret,
            access_token_ttl,
            refresh_token_ttl,
            issuer: env::var("ISSUER").unwrap_or_else(|_| "crewbase".to_string()),
            audience: env::var("AUDIENCE").unwrap_or_else(|_| "crewbase-api".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks the secret invariants: non-empty and distinct per kind
    pub fn validate(&self) -> Result<(), TokenConfigError> {
        if self.access_token_secret.is_empty() || self.refresh_token_secret.is_empty() {
            return Err(TokenConfigError::EmptySecret);
        }
        if self.access_token_secret == self.refresh_token_secret {
            return Err(TokenConfigError::IdenticalSecrets);
        }
        Ok(())
    }

    /// Signing secret for a token kind
    pub fn secret_for(&self, kind: TokenKind) -> &str {
        match kind {
            TokenKind::Access => &self.access_token_secret,
            TokenKind::Refresh => &self.refresh_token_secret,
        }
    }

    /// Time-to-live policy for a token kind
    pub fn ttl_for(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_token_ttl,
            TokenKind::Refresh => self.refresh_token_ttl,
        }
    }

    /// TTL for a token kind, in whole seconds
    pub fn expires_in_seconds(&self, kind: TokenKind) -> i64 {
        self.ttl_for(kind).num_seconds()
    }
}

/// Parses a duration string of the form `<number><s|m|h|d>`
pub(crate) fn parse_duration(value: &str) -> Result<Duration, TokenConfigError> {
    let captures = DURATION_RE
        .captures(value)
        .ok_or_else(|| TokenConfigError::InvalidDuration {
            value: value.to_string(),
        })?;

    let number: i64 = captures[1]
        .parse()
        .map_err(|_| TokenConfigError::InvalidDuration {
            value: value.to_string(),
        })?;

    let duration = match &captures[2] {
        "s" => Duration::seconds(number),
        "m" => Duration::minutes(number),
        "h" => Duration::hours(number),
        _ => Duration::days(number),
    };

    Ok(duration)
}
