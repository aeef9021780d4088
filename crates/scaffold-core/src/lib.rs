#![deny(rust_2018_idioms)]
#![warn(clippy::all)]

//! # scaffold-core
//!
//! Building blocks shared by every service layer.
//!
//! This crate provides the `Either` failure/success container that all
//! other layers report recoverable failures through, the `BaseError`
//! contract implemented by every error kind, JSON and date helpers, and
//! scoped logging on top of `tracing`.

/// Failure/success result container.
pub mod either;
/// Base error contract and validation error map.
pub mod error;
/// JSON cloning and comparison helpers.
pub mod data;
/// ISO-8601 date string detection and normalization.
pub mod date_time;
/// Log levels, scopes, and the recent-log buffer.
pub mod logger;

pub use either::{Either, failure, success};
pub use error::{BaseError, ErrorInfo, ValidationErrors};
pub use logger::{LogBuffer, LogLevel, LoggerScope, LoggingConfig};

use thiserror::Error;

/// Errors raised by core helpers
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown log level: {0}")]
    UnknownLogLevel(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Crate-local result type for core helpers.
pub type Result<T> = std::result::Result<T, Error>;
