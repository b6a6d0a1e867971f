//! # Error Types
//!
//! Domain-specific error types for serialguard-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  serialguard-core errors (this file)                                   │
//! │  ├── CoreError        - Record encoding and wrapped validation         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  serialguard-db errors (separate crate)                                │
//! │  └── DbError          - Storage operation failures                     │
//! │                                                                         │
//! │  scanner app errors                                                    │
//! │  └── AppError         - Startup / configuration failures               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → (never reaches the operator)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Where Errors Do NOT Appear
//! `ScanSession::submit`, `undo` and `reset` never fail. An empty scan is a
//! normal outcome reported through [`crate::StatusKind::Empty`], not an error.
//! Errors only surface from the strict constructors ([`crate::Serial::parse`])
//! and from record encoding.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The session could not be encoded into its persisted form.
    #[error("Failed to encode session record: {0}")]
    Encode(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty after normalization.
    #[error("{field} is required")]
    Required { field: String },

    /// Value is not in its canonical (trimmed, upper-cased) form.
    #[error("{field} is not normalized: '{value}'")]
    NotNormalized { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
