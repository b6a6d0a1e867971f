//! # Export
//!
//! Hands the comma-separated unique serials to a sink.
//!
//! ```text
//! state.export()
//!   ├── Nothing(status) ──────────────► "No hay seriales para copiar"
//!   └── Ready { text, count }
//!         ├── sink accepted ──────────► "{count} serial(es) exportados"
//!         └── sink failed ────────────► "No se pudo exportar los seriales"
//! ```
//!
//! Export never mutates the session, so it never saves.

use std::io::Write;
use std::path::Path;

use serialguard_core::{ExportOutcome, ScanStatus};
use serialguard_db::SessionStore;
use tracing::{error, info};

use crate::state::SessionState;

/// Exports to `output` if given, otherwise to `stdout`.
pub async fn run<S: SessionStore>(
    state: &SessionState<S>,
    output: Option<&Path>,
    stdout: &mut dyn Write,
) -> ScanStatus {
    let outcome = state.export().await;
    match output {
        Some(path) => deliver(outcome, |text| std::fs::write(path, format!("{}\n", text))),
        None => deliver(outcome, |text| writeln!(stdout, "{}", text)),
    }
}

/// Runs `sink` on ready text and maps the result to a status.
pub fn deliver(
    outcome: ExportOutcome,
    sink: impl FnOnce(&str) -> std::io::Result<()>,
) -> ScanStatus {
    match outcome {
        ExportOutcome::Nothing(status) => status,
        ExportOutcome::Ready { text, count } => match sink(&text) {
            Ok(()) => {
                info!(count, "Serials exported");
                ExportOutcome::delivered(count)
            }
            Err(e) => {
                error!(error = %e, "Export sink failed");
                ExportOutcome::failed()
            }
        },
    }
}
