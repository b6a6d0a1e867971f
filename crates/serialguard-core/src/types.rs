//! # Domain Types
//!
//! Value types returned by the scan session and shared with front ends.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ScanStatus    │   │ DuplicateEvent  │   │ SessionSummary  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  kind           │   │  serial         │   │  scan_count     │       │
//! │  │  message        │   │  first_position │   │  unique_count   │       │
//! │  └────────┬────────┘   │  dup_at         │   │  duplicate_count│       │
//! │           │            └─────────────────┘   └─────────────────┘       │
//! │           ▼                                                             │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   StatusKind    │──►│      Cue        │                             │
//! │  │  Empty          │   │  Error   (1.0)  │                             │
//! │  │  Duplicate ─────┼──►│  Success (0.5)  │                             │
//! │  │  Added ─────────┘   └─────────────────┘                             │
//! │  │  Info           │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::serial::Serial;

// =============================================================================
// Status
// =============================================================================

/// The kind of outcome an operation produced.
///
/// Front ends style the status line and pick the audio cue from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// Input normalized to nothing, or there was nothing to act on.
    Empty,
    /// The serial was already on the pallet.
    Duplicate,
    /// The serial was added to the pallet.
    Added,
    /// Informational outcome (undo, reset, export, storage warnings).
    Info,
}

impl StatusKind {
    /// Returns the audio cue a front end should play, if any.
    pub fn cue(self) -> Option<Cue> {
        match self {
            StatusKind::Duplicate => Some(Cue::Error),
            StatusKind::Added => Some(Cue::Success),
            StatusKind::Empty | StatusKind::Info => None,
        }
    }
}

/// Audio cue classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    /// Played on duplicates.
    Error,
    /// Played on new serials.
    Success,
}

impl Cue {
    /// Playback volume in `0.0..=1.0`.
    ///
    /// Duplicates must be heard over warehouse noise; confirmations stay quieter.
    pub fn volume(self) -> f32 {
        match self {
            Cue::Error => 1.0,
            Cue::Success => 0.5,
        }
    }
}

/// Result of a session operation: what happened, and what to tell the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ScanStatus {
    pub kind: StatusKind,
    pub message: String,
}

impl ScanStatus {
    /// Creates a status of the given kind.
    pub fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        ScanStatus {
            kind,
            message: message.into(),
        }
    }

    /// Empty scan: nothing was added and no counter moved.
    pub fn empty_scan() -> Self {
        ScanStatus::new(StatusKind::Empty, "Serial vacío — no se añadió")
    }

    /// Duplicate scan naming the serial and where it was first picked.
    pub fn duplicate(serial: &Serial, first_position: u64) -> Self {
        ScanStatus::new(
            StatusKind::Duplicate,
            format!(
                "DUPLICADO detectado: {} (picado antes en #{})",
                serial, first_position
            ),
        )
    }

    /// New serial accepted.
    pub fn added(serial: &Serial) -> Self {
        ScanStatus::new(StatusKind::Added, format!("Añadido: {}", serial))
    }

    /// Informational status.
    pub fn info(message: impl Into<String>) -> Self {
        ScanStatus::new(StatusKind::Info, message)
    }

    /// Shortcut for `self.kind.cue()`.
    pub fn cue(&self) -> Option<Cue> {
        self.kind.cue()
    }
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

// =============================================================================
// Duplicate Event
// =============================================================================

/// One rejected re-submission of a serial already on the pallet.
///
/// ## Positions
/// - `first_position`: 1-based index of the serial in the unique list when the
///   duplicate was scanned. Frozen: a later undo does not renumber it.
/// - `dup_at`: the scan count right after this submission was counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateEvent {
    #[ts(type = "string")]
    pub serial: Serial,
    #[ts(type = "number")]
    pub first_position: u64,
    #[ts(type = "number")]
    pub dup_at: u64,
}

// =============================================================================
// Projections
// =============================================================================

/// Counters shown in the stats panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    /// Accepted submissions (unique + duplicate).
    #[ts(type = "number")]
    pub scan_count: u64,
    #[ts(type = "number")]
    pub unique_count: u64,
    #[ts(type = "number")]
    pub duplicate_count: u64,
}

/// A unique serial with its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NumberedSerial {
    #[ts(type = "number")]
    pub position: u64,
    #[ts(type = "string")]
    pub serial: Serial,
}

/// A duplicate event with its 1-based position in the duplicate list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NumberedDuplicate {
    #[ts(type = "number")]
    pub position: u64,
    pub event: DuplicateEvent,
}

// =============================================================================
// Unit Tests
// =============================================================================
