//! # One-shot Session Commands
//!
//! Each command runs one operation against the stored pallet and exits.
//! Useful for scripting and for scanners that launch a process per read.

use std::io::Write;

use serde::Serialize;
use serialguard_core::{NumberedDuplicate, NumberedSerial, SessionSummary};
use serialguard_db::SessionStore;

use crate::cli::OutputFormat;
use crate::commands::play_cue;
use crate::cue::CuePlayer;
use crate::error::AppResult;
use crate::render;
use crate::state::{ScanResponse, SessionState};

/// JSON shape of `show --format json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub summary: SessionSummary,
    pub serials: Vec<NumberedSerial>,
    pub duplicates: Vec<NumberedDuplicate>,
}

/// Submits each serial in order, one cue and one status block per serial.
pub async fn add<S: SessionStore>(
    state: &SessionState<S>,
    serials: &[String],
    cues: &mut dyn CuePlayer,
    out: &mut dyn Write,
) -> AppResult<Vec<ScanResponse>> {
    let mut responses = Vec::with_capacity(serials.len());
    for raw in serials {
        let response = state.submit(raw).await;
        play_cue(cues, &response.status);
        writeln!(out, "{}", render::response(&response))?;
        responses.push(response);
    }
    Ok(responses)
}

/// Removes the last unique serial.
pub async fn undo<S: SessionStore>(
    state: &SessionState<S>,
    out: &mut dyn Write,
) -> AppResult<ScanResponse> {
    let response = state.undo().await;
    writeln!(out, "{}", render::response(&response))?;
    Ok(response)
}

/// Clears the pallet.
pub async fn reset<S: SessionStore>(
    state: &SessionState<S>,
    out: &mut dyn Write,
) -> AppResult<ScanResponse> {
    let response = state.reset().await;
    writeln!(out, "{}", render::response(&response))?;
    Ok(response)
}

/// Prints stats and both lists.
pub async fn show<S: SessionStore>(
    state: &SessionState<S>,
    format: OutputFormat,
    out: &mut dyn Write,
) -> AppResult<()> {
    match format {
        OutputFormat::Text => {
            let text = state.read(render::session_view).await;
            writeln!(out, "{}", text)?;
        }
        OutputFormat::Json => {
            let view = state
                .read(|s| SessionView {
                    summary: s.summary(),
                    serials: s.numbered_serials(),
                    duplicates: s.numbered_duplicates(),
                })
                .await;
            writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
        }
    }
    Ok(())
}

/// Prints the counters.
pub async fn status<S: SessionStore>(
    state: &SessionState<S>,
    format: OutputFormat,
    out: &mut dyn Write,
) -> AppResult<()> {
    let summary = state.summary().await;
    match format {
        OutputFormat::Text => writeln!(out, "{}", render::stats_line(&summary))?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&summary)?)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::TerminalBell;
    use serialguard_core::StatusKind;
    use serialguard_db::MemorySessionStore;

    #[tokio::test]
    async fn test_add_plays_cues_and_prints() {
        let state = SessionState::load(MemorySessionStore::new()).await;
        let mut bell = TerminalBell::new(Vec::new());
        let mut out = Vec::new();

        let serials = vec!["a1".to_string(), "A1".to_string()];
        let responses = add(&state, &serials, &mut bell, &mut out).await.unwrap();

        assert_eq!(responses[0].status.kind, StatusKind::Added);
        assert_eq!(responses[1].status.kind, StatusKind::Duplicate);
        // One ring for the add, two for the duplicate.
        assert_eq!(bell.into_inner(), b"\x07\x07\x07");

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[+] Añadido: A1"));
        assert!(text.contains("[!] DUPLICADO detectado: A1 (picado antes en #1)"));
    }

    #[tokio::test]
    async fn test_empty_scan_is_silent() {
        let state = SessionState::load(MemorySessionStore::new()).await;
        let mut bell = TerminalBell::new(Vec::new());
        let mut out = Vec::new();

        add(&state, &["   ".to_string()], &mut bell, &mut out)
            .await
            .unwrap();

        assert!(bell.into_inner().is_empty());
        assert_eq!(state.summary().await.scan_count, 0);
    }

    #[tokio::test]
    async fn test_undo_reset_output() {
        let state = SessionState::load(MemorySessionStore::new()).await;
        let mut out = Vec::new();

        let response = undo(&state, &mut out).await.unwrap();
        assert_eq!(response.status.message, "No hay seriales para deshacer");

        state.submit("x").await;
        let response = reset(&state, &mut out).await.unwrap();
        assert_eq!(response.status.message, "Pallet reiniciado");
        assert!(String::from_utf8(out).unwrap().contains("[i] Pallet reiniciado"));
    }

    #[tokio::test]
    async fn test_show_json() {
        let state = SessionState::load(MemorySessionStore::new()).await;
        state.submit("a").await;
        state.submit("a").await;
        let mut out = Vec::new();

        show(&state, OutputFormat::Json, &mut out).await.unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["summary"]["scanCount"], 2);
        assert_eq!(value["serials"][0]["serial"], "A");
        assert_eq!(value["duplicates"][0]["event"]["dupAt"], 2);
    }

    #[tokio::test]
    async fn test_status_text() {
        let state = SessionState::load(MemorySessionStore::new()).await;
        state.submit("a").await;
        let mut out = Vec::new();

        status(&state, OutputFormat::Text, &mut out).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Total escaneados: 1 | Únicos: 1 | Duplicados: 0\n"
        );
    }
}
