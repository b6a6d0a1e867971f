//! # App Error Type
//!
//! Unified error type for the scanner binary.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Serial Guard                           │
//! │                                                                         │
//! │  Startup (config, database open)                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  AppError ──► printed once to stderr ──► non-zero exit code            │
//! │                                                                         │
//! │  Scan loop (submit, undo, reset, export)                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Never an AppError. Store and export failures become Info statuses     │
//! │  so a bad disk never stops the operator from scanning.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serialguard_core::CoreError;
use serialguard_db::DbError;
use thiserror::Error;

/// Errors that can stop the scanner from starting or finishing a command.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration values are invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read or parse the configuration file.
    #[error("Failed to load configuration: {0}")]
    ConfigLoadFailed(String),

    /// No platform data directory and no explicit database path.
    #[error("Could not determine app data directory")]
    NoDataDir,

    /// Database layer error.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// Domain error (record encoding).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Terminal or file I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::ConfigLoadFailed(err.to_string())
    }
}

impl AppError {
    /// Process exit code for this error.
    ///
    /// ```text
    /// 2  configuration
    /// 3  database
    /// 1  anything else
    /// ```
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::InvalidConfig(_) | AppError::ConfigLoadFailed(_) | AppError::NoDataDir => 2,
            AppError::Database(_) => 3,
            _ => 1,
        }
    }
}

/// Result type for app operations.
pub type AppResult<T> = Result<T, AppError>;
