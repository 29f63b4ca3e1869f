//! # CrewBase Core
//!
//! Core business logic and domain layer for the CrewBase backend.
//! This crate contains the token service and its domain entities,
//! the denylist capability interface, and the error types shared with
//! the presentation layer.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
