//! # Session State
//!
//! The single live pallet plus the store it is saved to.
//!
//! ## Thread Safety
//! The session sits behind a `tokio::sync::Mutex` and the save happens while
//! the lock is still held, so saved records always land in mutation order.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State Operations                             │
//! │                                                                         │
//! │  Scanner Input            SessionState              Store               │
//! │  ─────────────            ────────────              ─────               │
//! │                                                                         │
//! │  "abc123⏎" ─────────────► submit() ──► lock ──► save(record)           │
//! │  ":undo" ───────────────► undo()   ──► lock ──► save(record)           │
//! │  ":reset" ──────────────► reset()  ──► lock ──► save(record)           │
//! │  ":export" ─────────────► export() ──► lock ──► (read only)            │
//! │                                                                         │
//! │  A failed save is logged and surfaces as `ScanResponse::warning`.       │
//! │  The in-memory session keeps the change either way.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use serialguard_core::{ExportOutcome, ScanSession, ScanStatus, SessionRecord, SessionSummary};
use serialguard_db::SessionStore;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Message shown when the session could not be written to the store.
pub const SAVE_FAILED_MESSAGE: &str = "No se pudo guardar la sesión";

/// What a mutation hands back to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    /// Outcome of the operation itself.
    pub status: ScanStatus,
    /// Present when the new state could not be saved.
    pub warning: Option<ScanStatus>,
    /// Counters after the operation.
    pub summary: SessionSummary,
}

/// Live session bound to a store.
#[derive(Debug)]
pub struct SessionState<S> {
    session: Mutex<ScanSession>,
    store: S,
}

impl<S: SessionStore> SessionState<S> {
    /// Reads the store once and builds the session from whatever is there.
    ///
    /// Unreadable or malformed data starts an empty pallet; the problem is
    /// logged, never returned.
    pub async fn load(store: S) -> Self {
        let session = match store.load().await {
            Ok(Some(text)) => {
                let report = SessionRecord::decode(&text);
                if report.malformed {
                    warn!("Stored session is not a valid record, starting empty");
                } else if !report.is_clean() {
                    let fields: Vec<&str> = report.dropped.iter().map(|f| f.name()).collect();
                    warn!(?fields, "Stored session had invalid fields, reset to defaults");
                }
                report.into_session()
            }
            Ok(None) => {
                debug!("No stored session, starting empty");
                ScanSession::new()
            }
            Err(e) => {
                warn!(error = %e, "Could not read stored session, starting empty");
                ScanSession::new()
            }
        };

        info!(
            scans = session.scan_count(),
            unique = session.unique_count(),
            duplicates = session.duplicate_count(),
            "Session loaded"
        );

        SessionState {
            session: Mutex::new(session),
            store,
        }
    }

    /// Submits one scan.
    pub async fn submit(&self, raw: &str) -> ScanResponse {
        self.mutate(|session| session.submit(raw)).await
    }

    /// Removes the last unique serial.
    pub async fn undo(&self) -> ScanResponse {
        self.mutate(ScanSession::undo).await
    }

    /// Clears the pallet.
    pub async fn reset(&self) -> ScanResponse {
        self.mutate(ScanSession::reset).await
    }

    /// Builds the export text.
    pub async fn export(&self) -> ExportOutcome {
        self.session.lock().await.export()
    }

    /// Current counters.
    pub async fn summary(&self) -> SessionSummary {
        self.session.lock().await.summary()
    }

    /// Runs `f` against a read-only view of the session.
    pub async fn read<R>(&self, f: impl FnOnce(&ScanSession) -> R) -> R {
        let session = self.session.lock().await;
        f(&session)
    }

    /// Copy of the current session.
    pub async fn snapshot(&self) -> ScanSession {
        self.session.lock().await.clone()
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    async fn mutate(&self, op: impl FnOnce(&mut ScanSession) -> ScanStatus) -> ScanResponse {
        let mut session = self.session.lock().await;
        let status = op(&mut session);
        debug!(kind = ?status.kind, message = %status.message, "Session updated");

        let warning = self.persist(&session).await;

        ScanResponse {
            status,
            warning,
            summary: session.summary(),
        }
    }

    async fn persist(&self, session: &ScanSession) -> Option<ScanStatus> {
        let text = match session.to_record().encode() {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "Failed to encode session");
                return Some(ScanStatus::info(SAVE_FAILED_MESSAGE));
            }
        };

        match self.store.save(&text).await {
            Ok(()) => None,
            Err(e) => {
                error!(error = %e, "Failed to save session");
                Some(ScanStatus::info(SAVE_FAILED_MESSAGE))
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
