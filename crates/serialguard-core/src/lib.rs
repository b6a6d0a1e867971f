//! # serialguard-core: Pure Scan-Session Logic for Serial Guard
//!
//! This crate is the **heart** of Serial Guard. It holds the pallet state
//! machine as plain synchronous code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Serial Guard Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front End (scanner terminal)                    │   │
//! │  │   Scan input ──► Status line ──► Cue ──► Lists & stats          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ serialguard-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  serial   │  │  session  │  │  record   │  │   types   │  │   │
//! │  │   │ normalize │  │  submit   │  │  encode   │  │ ScanStatus│  │   │
//! │  │   │  Serial   │  │ undo/reset│  │  decode   │  │   Cue     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO AUDIO • NO CLIPBOARD               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              serialguard-db (Persistence Layer)                 │   │
//! │  │              SQLite key-value store, migrations                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`serial`] - Serial normalization and validation
//! - [`session`] - The `ScanSession` state machine
//! - [`record`] - Persisted form and defensive decoding
//! - [`types`] - Status, cue and projection types
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use serialguard_core::{ScanSession, StatusKind};
//!
//! let mut session = ScanSession::new();
//! session.submit("X1");
//! session.submit("X2");
//! let status = session.submit("x1");
//!
//! assert_eq!(status.kind, StatusKind::Duplicate);
//! assert_eq!(session.duplicate_events()[0].dup_at, 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod record;
pub mod serial;
pub mod session;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use record::{DecodeReport, RecordField, SessionRecord, MAX_SCAN_COUNT, STORAGE_KEY};
pub use serial::{normalize, Serial};
pub use session::{ExportOutcome, ScanSession};
pub use types::*;
