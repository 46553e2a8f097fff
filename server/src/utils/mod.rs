//! Utility module - shared types and helpers
//!
//! - [`AppError`] / [`AppResult`] - application error handling
//! - [`logger`] - tracing setup

pub mod error;
pub mod logger;

pub use error::{AppError, ErrorBody};

/// Application-level Result type
///
/// Used in HTTP handlers and application logic
pub type AppResult<T> = Result<T, AppError>;
