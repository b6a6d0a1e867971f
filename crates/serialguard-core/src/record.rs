//! # Session Record
//!
//! The persisted form of a [`crate::ScanSession`] and its defensive decoder.
//!
//! ## Wire Format
//! ```json
//! {
//!   "uniqueSerials": ["ABC123", "X2"],
//!   "duplicateEvents": [{ "serial": "ABC123", "firstPosition": 1, "dupAt": 3 }],
//!   "scanCount": 3
//! }
//! ```
//!
//! Stored under [`STORAGE_KEY`], overwritten whole after every mutation.
//!
//! ## Decoding Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Per-Field Validation                               │
//! │                                                                         │
//! │  text ──► JSON object? ──no──► empty record (malformed = true)          │
//! │               │                                                         │
//! │              yes                                                        │
//! │               │                                                         │
//! │               ├── uniqueSerials   ok? keep : default + dropped          │
//! │               ├── duplicateEvents ok? keep : default + dropped          │
//! │               └── scanCount       ok? keep : default + dropped          │
//! │                                                                         │
//! │  A bad field never takes the good ones down with it.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records written by the browser build used `serials`, `duplicates` and
//! `firstAt`; those names are read when the current name is absent.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreResult;
use crate::serial::Serial;
use crate::types::DuplicateEvent;

/// Storage key for the current pallet. The suffix is the schema version.
pub const STORAGE_KEY: &str = "serial_scan_dup.current_pallet_v1";

/// Largest stored scan count accepted on load. Anything above leaves no
/// headroom for further scans and is treated as corrupt.
pub const MAX_SCAN_COUNT: u64 = i64::MAX as u64;

/// Durable fields of a scan session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub unique_serials: Vec<Serial>,
    pub duplicate_events: Vec<DuplicateEvent>,
    pub scan_count: u64,
}

/// Top-level record fields, for reporting what the decoder replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    UniqueSerials,
    DuplicateEvents,
    ScanCount,
}

impl RecordField {
    /// Current wire name.
    pub fn name(self) -> &'static str {
        match self {
            RecordField::UniqueSerials => "uniqueSerials",
            RecordField::DuplicateEvents => "duplicateEvents",
            RecordField::ScanCount => "scanCount",
        }
    }

    fn legacy_name(self) -> Option<&'static str> {
        match self {
            RecordField::UniqueSerials => Some("serials"),
            RecordField::DuplicateEvents => Some("duplicates"),
            RecordField::ScanCount => None,
        }
    }
}

impl std::fmt::Display for RecordField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of [`SessionRecord::decode`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// The usable record, defaults substituted where needed.
    pub record: SessionRecord,

    /// The text was not a JSON object at all.
    pub malformed: bool,

    /// Fields that were present but failed validation.
    pub dropped: Vec<RecordField>,
}

impl DecodeReport {
    /// True when the text decoded without substitutions.
    pub fn is_clean(&self) -> bool {
        !self.malformed && self.dropped.is_empty()
    }
}

impl SessionRecord {
    /// Encodes the record as JSON.
    pub fn encode(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes persisted text, substituting defaults for invalid fields.
    ///
    /// ## Example
    /// ```rust
    /// use serialguard_core::record::{RecordField, SessionRecord};
    ///
    /// let report = SessionRecord::decode(r#"{"uniqueSerials":["A"],"scanCount":"bad"}"#);
    /// assert_eq!(report.record.unique_serials.len(), 1);
    /// assert_eq!(report.record.scan_count, 0);
    /// assert_eq!(report.dropped, vec![RecordField::ScanCount]);
    /// ```
    pub fn decode(text: &str) -> DecodeReport {
        let object = match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(object)) => object,
            _ => {
                return DecodeReport {
                    malformed: true,
                    ..DecodeReport::default()
                }
            }
        };

        let mut report = DecodeReport::default();

        if let Some(value) = lookup(&object, RecordField::UniqueSerials) {
            match decode_serials(value) {
                Some(serials) => report.record.unique_serials = serials,
                None => report.dropped.push(RecordField::UniqueSerials),
            }
        }

        if let Some(value) = lookup(&object, RecordField::DuplicateEvents) {
            match decode_events(value) {
                Some(events) => report.record.duplicate_events = events,
                None => report.dropped.push(RecordField::DuplicateEvents),
            }
        }

        if let Some(value) = lookup(&object, RecordField::ScanCount) {
            match value.as_u64().filter(|&count| count <= MAX_SCAN_COUNT) {
                Some(count) => report.record.scan_count = count,
                None => report.dropped.push(RecordField::ScanCount),
            }
        }

        report
    }
}

fn lookup(object: &Map<String, Value>, field: RecordField) -> Option<&Value> {
    object
        .get(field.name())
        .or_else(|| field.legacy_name().and_then(|name| object.get(name)))
}

/// Array of normalized, pairwise distinct serials.
fn decode_serials(value: &Value) -> Option<Vec<Serial>> {
    let mut seen = HashSet::new();

    value
        .as_array()?
        .iter()
        .map(|item| {
            let serial = Serial::from_normalized(item.as_str()?).ok()?;
            seen.insert(serial.clone()).then_some(serial)
        })
        .collect()
}

fn decode_events(value: &Value) -> Option<Vec<DuplicateEvent>> {
    value.as_array()?.iter().map(decode_event).collect()
}

fn decode_event(value: &Value) -> Option<DuplicateEvent> {
    let object = value.as_object()?;

    let serial = Serial::from_normalized(object.get("serial")?.as_str()?).ok()?;
    let first_position = object
        .get("firstPosition")
        .or_else(|| object.get("firstAt"))?
        .as_u64()
        .filter(|&p| p >= 1)?;
    let dup_at = object.get("dupAt")?.as_u64().filter(|&p| p >= 1)?;

    Some(DuplicateEvent {
        serial,
        first_position,
        dup_at,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
