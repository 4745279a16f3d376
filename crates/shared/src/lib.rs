//! Shared types, errors, and configuration for EconoMe.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management
//! - JWT claims and token validation

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;

pub use auth::Claims;
pub use config::{AppConfig, ReportConfig};
pub use error::AppError;
pub use jwt::{JwtConfig, JwtError, JwtService};
