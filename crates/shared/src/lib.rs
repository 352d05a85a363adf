//! Shared types, errors, and configuration for Tallybook.
//!
//! This crate provides common types used across all other crates:
//! - Money helpers with decimal precision
//! - Typed IDs for upstream transaction and account references
//! - Application-wide error types
//! - Reporting configuration

pub mod config;
pub mod error;
pub mod types;

pub use config::ReportingConfig;
pub use error::{AppError, AppResult};
