//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - Access and refresh token generation and verification
//! - Unverified decoding for inspection and diagnostics
//! - Refresh token rotation and pre-expiry revocation
//! - Bearer extraction from the Authorization transport header
//! - Background cleanup of lapsed denylist entries

mod cleanup;
mod config;
mod extract;
mod service;

#[cfg(test)]
mod tests;

pub use cleanup::{DenylistCleanup, DenylistCleanupConfig};
pub use config::{TokenConfigError, TokenServiceConfig};
pub use extract::{extract_bearer_token, is_well_formed};
pub use service::TokenService;
