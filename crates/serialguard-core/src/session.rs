//! # Scan Session
//!
//! The pallet state machine: unique serials, duplicate history and the scan
//! counter.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Scan Session Operations                              │
//! │                                                                         │
//! │  Operator Action        Session Call         State Change               │
//! │  ───────────────        ────────────         ────────────               │
//! │                                                                         │
//! │  Scan / Enter ────────► submit(raw) ───┬───► (empty) nothing            │
//! │                                        ├───► scan_count += 1            │
//! │                                        │     new  → unique.push(s)      │
//! │                                        │     seen → duplicates.push(e)  │
//! │                                                                         │
//! │  Deshacer ────────────► undo() ──────────────► unique.pop()             │
//! │                                               scan_count -= 1 (≥ 0)     │
//! │                                                                         │
//! │  Reiniciar pallet ────► reset() ─────────────► everything cleared       │
//! │                                                                         │
//! │  Copiar valores ──────► export() ────────────► (read only)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `unique` never holds the same serial twice.
//! - Every operation keeps `scan_count >= unique.len()`.
//! - Duplicate events are append-only; undo and later scans never touch them.
//!
//! Nothing here performs I/O or remembers the last status. Each operation
//! returns its [`ScanStatus`]; the caller decides what to render, which cue to
//! play and when to persist.

use indexmap::IndexSet;

use crate::record::{DecodeReport, SessionRecord};
use crate::serial::{normalize, Serial};
use crate::types::{
    DuplicateEvent, NumberedDuplicate, NumberedSerial, ScanStatus, SessionSummary, StatusKind,
};

/// Separator used by the export view.
pub const EXPORT_SEPARATOR: &str = ", ";

/// A pallet being scanned.
#[derive(Debug, Clone, Default)]
pub struct ScanSession {
    /// Unique serials in scan order. Index + 1 is the operator-facing position.
    unique: IndexSet<Serial>,

    /// One entry per rejected duplicate, in scan order.
    duplicates: Vec<DuplicateEvent>,

    /// Accepted submissions: unique admissions plus duplicate detections.
    scan_count: u64,
}

impl ScanSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Submits raw scanner input.
    ///
    /// ## Behavior
    /// - Normalizes to nothing: returns `Empty`, no counter moves.
    /// - Otherwise the scan counter goes up first, so a duplicate records the
    ///   incremented value as its `dup_at`.
    /// - Already present: appends a [`DuplicateEvent`], returns `Duplicate`.
    /// - New: appends to the unique list, returns `Added`.
    ///
    /// ## Example
    /// ```rust
    /// use serialguard_core::{ScanSession, StatusKind};
    ///
    /// let mut session = ScanSession::new();
    /// assert_eq!(session.submit("abc123").kind, StatusKind::Added);
    /// assert_eq!(session.submit(" abc123 ").kind, StatusKind::Duplicate);
    /// assert_eq!(session.scan_count(), 2);
    /// ```
    pub fn submit(&mut self, raw: &str) -> ScanStatus {
        let Some(serial) = normalize(raw) else {
            return ScanStatus::empty_scan();
        };

        self.scan_count = self.scan_count.saturating_add(1);

        if let Some(index) = self.unique.get_index_of(&serial) {
            let first_position = index as u64 + 1;
            let status = ScanStatus::duplicate(&serial, first_position);
            self.duplicates.push(DuplicateEvent {
                serial,
                first_position,
                dup_at: self.scan_count,
            });
            return status;
        }

        let status = ScanStatus::added(&serial);
        self.unique.insert(serial);
        status
    }

    /// Reverses the most recent unique admission.
    ///
    /// Only the unique list is rolled back: when the last scan was a duplicate,
    /// the last *unique* serial is still the one removed and the duplicate
    /// history stays as recorded. With no unique serial left nothing changes.
    pub fn undo(&mut self) -> ScanStatus {
        if self.unique.pop().is_none() {
            return ScanStatus::info("No hay seriales para deshacer");
        }

        self.scan_count = self.scan_count.saturating_sub(1);
        ScanStatus::info("Último serial eliminado")
    }

    /// Clears the pallet.
    pub fn reset(&mut self) -> ScanStatus {
        self.unique.clear();
        self.duplicates.clear();
        self.scan_count = 0;
        ScanStatus::info("Pallet reiniciado")
    }

    /// Builds the comma-separated export of unique serials.
    pub fn export(&self) -> ExportOutcome {
        if self.unique.is_empty() {
            return ExportOutcome::Nothing(ScanStatus::new(
                StatusKind::Empty,
                "No hay seriales para copiar",
            ));
        }

        let text = self
            .unique
            .iter()
            .map(Serial::as_str)
            .collect::<Vec<_>>()
            .join(EXPORT_SEPARATOR);

        ExportOutcome::Ready {
            text,
            count: self.unique.len(),
        }
    }

    // =========================================================================
    // Read-only projections
    // =========================================================================

    /// Unique serials in scan order.
    pub fn unique_serials(&self) -> impl ExactSizeIterator<Item = &Serial> + '_ {
        self.unique.iter()
    }

    /// Duplicate events in scan order.
    pub fn duplicate_events(&self) -> &[DuplicateEvent] {
        &self.duplicates
    }

    pub fn scan_count(&self) -> u64 {
        self.scan_count
    }

    pub fn unique_count(&self) -> usize {
        self.unique.len()
    }

    pub fn duplicate_count(&self) -> usize {
        self.duplicates.len()
    }

    /// 1-based position of a serial in the unique list.
    pub fn position_of(&self, serial: &Serial) -> Option<u64> {
        self.unique.get_index_of(serial).map(|i| i as u64 + 1)
    }

    /// True when nothing has been scanned.
    pub fn is_empty(&self) -> bool {
        self.unique.is_empty() && self.duplicates.is_empty() && self.scan_count == 0
    }

    /// Whether undo would remove a serial.
    pub fn can_undo(&self) -> bool {
        !self.unique.is_empty()
    }

    /// Whether reset would change anything visible to the operator.
    pub fn can_reset(&self) -> bool {
        self.scan_count > 0
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            scan_count: self.scan_count,
            unique_count: self.unique.len() as u64,
            duplicate_count: self.duplicates.len() as u64,
        }
    }

    /// Unique serials with their 1-based positions.
    pub fn numbered_serials(&self) -> Vec<NumberedSerial> {
        self.unique
            .iter()
            .enumerate()
            .map(|(i, serial)| NumberedSerial {
                position: i as u64 + 1,
                serial: serial.clone(),
            })
            .collect()
    }

    /// Duplicate events with their 1-based positions in the duplicate list.
    pub fn numbered_duplicates(&self) -> Vec<NumberedDuplicate> {
        self.duplicates
            .iter()
            .enumerate()
            .map(|(i, event)| NumberedDuplicate {
                position: i as u64 + 1,
                event: event.clone(),
            })
            .collect()
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Snapshot of the durable fields.
    pub fn to_record(&self) -> SessionRecord {
        SessionRecord {
            unique_serials: self.unique.iter().cloned().collect(),
            duplicate_events: self.duplicates.clone(),
            scan_count: self.scan_count,
        }
    }

    /// Rebuilds a session from a record.
    ///
    /// The record is taken as-is: a counter replaced by its default during
    /// decoding stays at that default.
    pub fn from_record(record: SessionRecord) -> Self {
        ScanSession {
            unique: record.unique_serials.into_iter().collect(),
            duplicates: record.duplicate_events,
            scan_count: record.scan_count,
        }
    }

    /// Decodes persisted text into a session. Never fails.
    pub fn restore(text: &str) -> Self {
        SessionRecord::decode(text).into_session()
    }
}

impl PartialEq for ScanSession {
    fn eq(&self, other: &Self) -> bool {
        self.unique.iter().eq(other.unique.iter())
            && self.duplicates == other.duplicates
            && self.scan_count == other.scan_count
    }
}

impl Eq for ScanSession {}

impl DecodeReport {
    /// Consumes the report and builds the session.
    pub fn into_session(self) -> ScanSession {
        ScanSession::from_record(self.record)
    }
}

// =============================================================================
// Export
// =============================================================================

/// Result of [`ScanSession::export`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Text ready to hand to the sink.
    Ready { text: String, count: usize },
    /// Nothing to export; carries the status to show.
    Nothing(ScanStatus),
}

impl ExportOutcome {
    /// Status once the sink accepted the text.
    pub fn delivered(count: usize) -> ScanStatus {
        ScanStatus::info(format!("{} serial(es) exportados", count))
    }

    /// Status when the sink could not be written.
    pub fn failed() -> ScanStatus {
        ScanStatus::info("No se pudo exportar los seriales")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn serials(session: &ScanSession) -> Vec<&str> {
        session.unique_serials().map(Serial::as_str).collect()
    }

    fn serial(raw: &str) -> Serial {
        Serial::parse(raw).unwrap()
    }

    #[test]
    fn test_empty_submission_touches_nothing() {
        let mut session = ScanSession::new();
        session.submit("A1");

        for raw in ["", "   ", "\t", "\r\n", " \u{a0} "] {
            let status = session.submit(raw);
            assert_eq!(status.kind, StatusKind::Empty);
            assert_eq!(status.message, "Serial vacío — no se añadió");
        }

        assert_eq!(session.scan_count(), 1);
        assert_eq!(serials(&session), vec!["A1"]);
        assert!(session.duplicate_events().is_empty());
    }

    #[test]
    fn test_new_serial_is_added() {
        let mut session = ScanSession::new();
        let status = session.submit("x9");

        assert_eq!(status.kind, StatusKind::Added);
        assert_eq!(status.message, "Añadido: X9");
        assert_eq!(serials(&session), vec!["X9"]);
        assert_eq!(session.scan_count(), 1);
    }

    #[test]
    fn test_scenario_a_duplicate_after_normalization() {
        let mut session = ScanSession::new();

        assert_eq!(session.submit("abc123").kind, StatusKind::Added);
        assert_eq!(serials(&session), vec!["ABC123"]);
        assert_eq!(session.scan_count(), 1);

        let status = session.submit(" abc123 ");
        assert_eq!(status.kind, StatusKind::Duplicate);
        assert_eq!(
            status.message,
            "DUPLICADO detectado: ABC123 (picado antes en #1)"
        );
        assert_eq!(serials(&session), vec!["ABC123"]);
        assert_eq!(session.scan_count(), 2);
        assert_eq!(
            session.duplicate_events(),
            &[DuplicateEvent {
                serial: serial("ABC123"),
                first_position: 1,
                dup_at: 2,
            }]
        );
    }

    #[test]
    fn test_scenario_b_undo_keeps_duplicate_history() {
        let mut session = ScanSession::new();
        session.submit("X1");
        session.submit("X2");
        session.submit("X1");

        let expected = vec![DuplicateEvent {
            serial: serial("X1"),
            first_position: 1,
            dup_at: 3,
        }];
        assert_eq!(session.duplicate_events(), expected.as_slice());

        let status = session.undo();
        assert_eq!(status.kind, StatusKind::Info);
        assert_eq!(serials(&session), vec!["X1"]);
        assert_eq!(session.scan_count(), 2);
        assert_eq!(session.duplicate_events(), expected.as_slice());
    }

    #[test]
    fn test_scenario_c_empty_then_reset() {
        let mut session = ScanSession::new();
        assert_eq!(session.submit("").kind, StatusKind::Empty);
        assert_eq!(session.scan_count(), 0);

        let status = session.reset();
        assert_eq!(status.message, "Pallet reiniciado");
        assert_eq!(session, ScanSession::new());
    }

    #[test]
    fn test_duplicate_positions() {
        let mut session = ScanSession::new();
        for raw in ["A", "B", "C", "B", "A", "C", "C"] {
            session.submit(raw);
        }

        let firsts: Vec<u64> = session
            .duplicate_events()
            .iter()
            .map(|e| e.first_position)
            .collect();
        let dups: Vec<u64> = session.duplicate_events().iter().map(|e| e.dup_at).collect();

        assert_eq!(firsts, vec![2, 1, 3, 3]);
        assert_eq!(dups, vec![4, 5, 6, 7]);
        assert_eq!(session.scan_count(), 7);
        assert_eq!(session.unique_count(), 3);
    }

    #[test]
    fn test_undo_on_empty_session() {
        let mut session = ScanSession::new();
        let status = session.undo();

        assert_eq!(status.kind, StatusKind::Info);
        assert_eq!(status.message, "No hay seriales para deshacer");
        assert_eq!(session.scan_count(), 0);
        assert!(session.is_empty());
    }

    #[test]
    fn test_undo_removes_last_unique_not_last_duplicate() {
        let mut session = ScanSession::new();
        session.submit("A");
        session.submit("B");
        session.submit("A");

        session.undo();
        assert_eq!(serials(&session), vec!["A"]);
        assert_eq!(session.duplicate_count(), 1);
    }

    #[test]
    fn test_undo_with_only_duplicates_counted() {
        let mut session = ScanSession::new();
        session.submit("A");
        session.submit("A");
        session.undo();
        assert_eq!(session.scan_count(), 1);
        assert_eq!(session.unique_count(), 0);
        assert!(!session.can_undo());

        let before = session.clone();
        let status = session.undo();
        assert_eq!(status.kind, StatusKind::Info);
        assert_eq!(status.message, "No hay seriales para deshacer");
        assert_eq!(session, before);
        assert_eq!(session.scan_count(), 1);
    }

    #[test]
    fn test_restored_max_scan_count_does_not_overflow() {
        let mut session =
            ScanSession::restore(r#"{"uniqueSerials":["A"],"scanCount":18446744073709551615}"#);
        assert_eq!(session.scan_count(), 0);

        assert_eq!(session.submit("B").kind, StatusKind::Added);
        let status = session.submit("A");
        assert_eq!(status.kind, StatusKind::Duplicate);
        assert_eq!(session.scan_count(), 2);
        assert_eq!(session.duplicate_events()[0].dup_at, 2);
    }

    #[test]
    fn test_submit_saturates_at_counter_limit() {
        let mut session = ScanSession::from_record(SessionRecord {
            unique_serials: vec![serial("A")],
            duplicate_events: Vec::new(),
            scan_count: u64::MAX,
        });

        session.submit("B");
        assert_eq!(session.scan_count(), u64::MAX);
        assert_eq!(session.unique_count(), 2);
    }

    #[test]
    fn test_undone_serial_can_be_rescanned() {
        let mut session = ScanSession::new();
        session.submit("A");
        session.undo();
        assert_eq!(session.submit("a").kind, StatusKind::Added);
        assert_eq!(session.position_of(&serial("A")), Some(1));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = ScanSession::new();
        for raw in ["A", "B", "A", "C"] {
            session.submit(raw);
        }
        session.reset();

        assert_eq!(session.unique_count(), 0);
        assert_eq!(session.duplicate_count(), 0);
        assert_eq!(session.scan_count(), 0);
        assert!(!session.can_reset());
    }

    #[test]
    fn test_scan_count_never_below_unique_count() {
        let mut session = ScanSession::new();
        let script = ["A", "B", "", "A", "C", "B", "D"];
        for (i, raw) in script.iter().enumerate() {
            session.submit(raw);
            if i % 3 == 2 {
                session.undo();
            }
            assert!(session.scan_count() >= session.unique_count() as u64);
        }
        while session.can_undo() {
            session.undo();
            assert!(session.scan_count() >= session.unique_count() as u64);
        }
    }

    #[test]
    fn test_export() {
        let mut session = ScanSession::new();
        match session.export() {
            ExportOutcome::Nothing(status) => {
                assert_eq!(status.kind, StatusKind::Empty);
                assert_eq!(status.message, "No hay seriales para copiar");
            }
            other => panic!("expected nothing to export, got {:?}", other),
        }

        session.submit("b2");
        session.submit("a1");
        session.submit("b2");

        assert_eq!(
            session.export(),
            ExportOutcome::Ready {
                text: "B2, A1".to_string(),
                count: 2,
            }
        );
        assert_eq!(ExportOutcome::delivered(2).message, "2 serial(es) exportados");
    }

    #[test]
    fn test_projections() {
        let mut session = ScanSession::new();
        session.submit("A");
        session.submit("B");
        session.submit("B");

        assert_eq!(
            session.summary(),
            SessionSummary {
                scan_count: 3,
                unique_count: 2,
                duplicate_count: 1,
            }
        );

        let numbered = session.numbered_serials();
        assert_eq!(numbered[1].position, 2);
        assert_eq!(numbered[1].serial.as_str(), "B");

        let dups = session.numbered_duplicates();
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].position, 1);
        assert_eq!(dups[0].event.first_position, 2);

        assert!(session.can_undo());
        assert!(session.can_reset());
    }

    #[test]
    fn test_record_round_trip() {
        let mut session = ScanSession::new();
        for raw in ["A", "B", "A", "C", "B"] {
            session.submit(raw);
        }
        session.undo();

        let json = session.to_record().encode().unwrap();
        let restored = ScanSession::restore(&json);

        assert_eq!(restored, session);
        assert_eq!(serials(&restored), vec!["A", "B"]);
        assert_eq!(restored.duplicate_count(), 2);
        assert_eq!(restored.scan_count(), 4);
    }
}

/// Property-based tests over random scan scripts
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Submit(String),
        Undo,
        Reset,
    }

    // Small alphabet so duplicates are frequent
    fn raw_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            "[ \t\r\n]{1,3}",
            "[ ]{0,2}[a-cA-C][0-2][ \t]{0,2}",
            "[a-zA-Z0-9 -]{0,8}",
        ]
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => raw_strategy().prop_map(Op::Submit),
            2 => Just(Op::Undo),
            1 => Just(Op::Reset),
        ]
    }

    /// Plain-Vec rendition of the session rules to compare against.
    #[derive(Debug, Default)]
    struct Model {
        unique: Vec<Serial>,
        duplicates: Vec<DuplicateEvent>,
        scan_count: u64,
    }

    impl Model {
        fn apply(&mut self, op: &Op) -> StatusKind {
            match op {
                Op::Submit(raw) => {
                    let Some(serial) = normalize(raw) else {
                        return StatusKind::Empty;
                    };
                    self.scan_count += 1;
                    match self.unique.iter().position(|s| *s == serial) {
                        Some(index) => {
                            self.duplicates.push(DuplicateEvent {
                                serial,
                                first_position: index as u64 + 1,
                                dup_at: self.scan_count,
                            });
                            StatusKind::Duplicate
                        }
                        None => {
                            self.unique.push(serial);
                            StatusKind::Added
                        }
                    }
                }
                Op::Undo => {
                    if self.unique.pop().is_some() {
                        self.scan_count -= 1;
                    }
                    StatusKind::Info
                }
                Op::Reset => {
                    *self = Model::default();
                    StatusKind::Info
                }
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Property: normalizing twice changes nothing
        #[test]
        fn prop_normalize_is_idempotent(raw in raw_strategy()) {
            match normalize(&raw) {
                Some(serial) => {
                    prop_assert!(Serial::is_normalized(serial.as_str()));
                    prop_assert_eq!(normalize(serial.as_str()), Some(serial));
                }
                None => prop_assert!(raw.trim().is_empty()),
            }
        }

        /// Property: every script keeps the session equal to the model and
        /// the counter at or above the unique count
        #[test]
        fn prop_script_matches_model(ops in prop::collection::vec(op_strategy(), 0..60)) {
            let mut session = ScanSession::new();
            let mut model = Model::default();

            for op in &ops {
                let kind = match op {
                    Op::Submit(raw) => session.submit(raw).kind,
                    Op::Undo => session.undo().kind,
                    Op::Reset => session.reset().kind,
                };
                prop_assert_eq!(kind, model.apply(op));

                prop_assert!(session.scan_count() >= session.unique_count() as u64);
                prop_assert_eq!(session.scan_count(), model.scan_count);
                prop_assert!(session.unique_serials().eq(model.unique.iter()));
                prop_assert_eq!(session.duplicate_events(), model.duplicates.as_slice());
                prop_assert_eq!(session.can_undo(), !model.unique.is_empty());
            }
        }

        /// Property: any reachable state survives encode then restore
        #[test]
        fn prop_reachable_state_round_trips(ops in prop::collection::vec(op_strategy(), 0..60)) {
            let mut session = ScanSession::new();
            for op in &ops {
                match op {
                    Op::Submit(raw) => session.submit(raw),
                    Op::Undo => session.undo(),
                    Op::Reset => session.reset(),
                };
            }

            let text = session.to_record().encode().unwrap();
            let report = SessionRecord::decode(&text);
            prop_assert!(report.is_clean());
            prop_assert_eq!(report.into_session(), session);
        }
    }
}
