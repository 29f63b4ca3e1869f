//! Error type definitions for token issuance and verification.
//!
//! All variants except `TokenGenerationFailed` and `Denylist` are
//! client-input failures; the consuming middleware translates them to an
//! HTTP 401 with the generic message carried here. Messages never include
//! signature or key material.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Invalid or malformed token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Missing authentication token")]
    MissingToken,

    #[error("Token presented for the wrong purpose")]
    InvalidTokenKind,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Denylist store error: {message}")]
    Denylist { message: String },
}

impl TokenError {
    /// Stable code for programmatic handling across the API surface
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::InvalidToken => "INVALID_TOKEN",
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::TokenRevoked => "TOKEN_REVOKED",
            TokenError::MissingToken => "MISSING_TOKEN",
            TokenError::InvalidTokenKind => "INVALID_TOKEN_KIND",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
            TokenError::Denylist { .. } => "DENYLIST_ERROR",
        }
    }

    /// Whether the failure is attributable to client input.
    ///
    /// Client errors map to HTTP 401 in the consuming middleware; the rest
    /// are internal and map to 500.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            TokenError::TokenGenerationFailed | TokenError::Denylist { .. }
        )
    }
}

/// Unified error response structure for API responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl ToString, message: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }
}

impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        ErrorResponse::new(err.error_code(), err.to_string())
    }
}
