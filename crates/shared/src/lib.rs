//! Shared types, errors, and configuration for Tally.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Money helpers with two-place decimal precision
//! - Application-wide error types
//! - Identity token claims and validation
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::{AppConfig, LogFormat};
pub use error::AppError;
pub use jwt::{JwtConfig, JwtError, JwtService};
