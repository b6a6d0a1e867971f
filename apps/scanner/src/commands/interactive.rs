//! # Interactive Scan Loop
//!
//! Handheld scanners type the serial and press Enter, so every input line is
//! one submission. Lines starting with `:` are operator commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin line            action                                           │
//! │  ──────────            ──────                                           │
//! │  "abc123"   ─────────► submit  ──► cue ──► status + stats               │
//! │  ""         ─────────► submit  ──► "Serial vacío — no se añadió"        │
//! │  ":undo"    ─────────► undo                                             │
//! │  ":reset"   ─────────► reset                                            │
//! │  ":list"    ─────────► unique list                                      │
//! │  ":dups"    ─────────► duplicate list                                   │
//! │  ":export"  ─────────► comma-separated serials                          │
//! │  ":help"    ─────────► command help                                     │
//! │  ":quit" / EOF ──────► exit                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;

use serialguard_core::ScanStatus;
use serialguard_db::SessionStore;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::commands::{export, play_cue};
use crate::cue::CuePlayer;
use crate::error::AppResult;
use crate::render;
use crate::state::SessionState;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand {
    Scan(String),
    Undo,
    Reset,
    List,
    Dups,
    Export,
    Help,
    Quit,
    Unknown(String),
}

/// Classifies an input line. Anything not starting with `:` is a scan,
/// passed through untouched so the session does the normalization.
pub fn parse_line(line: &str) -> LineCommand {
    let Some(command) = line.trim().strip_prefix(':') else {
        return LineCommand::Scan(line.to_string());
    };

    match command.trim().to_ascii_lowercase().as_str() {
        "undo" | "u" => LineCommand::Undo,
        "reset" => LineCommand::Reset,
        "list" | "l" => LineCommand::List,
        "dups" | "d" => LineCommand::Dups,
        "export" | "e" => LineCommand::Export,
        "help" | "h" | "?" => LineCommand::Help,
        "quit" | "q" | "exit" => LineCommand::Quit,
        other => LineCommand::Unknown(other.to_string()),
    }
}

/// Runs the loop until `:quit` or end of input.
pub async fn run<S, R>(
    state: &SessionState<S>,
    input: R,
    out: &mut dyn Write,
    cues: &mut dyn CuePlayer,
) -> AppResult<()>
where
    S: SessionStore,
    R: AsyncBufRead + Unpin,
{
    writeln!(out, "{}", render::banner())?;
    writeln!(out, "{}", render::stats_line(&state.summary().await))?;
    out.flush()?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = parse_line(&line);
        debug!(?command, "Input line");

        match command {
            LineCommand::Scan(raw) => {
                let response = state.submit(&raw).await;
                play_cue(cues, &response.status);
                writeln!(out, "{}", render::response(&response))?;
            }
            LineCommand::Undo => {
                let response = state.undo().await;
                writeln!(out, "{}", render::response(&response))?;
            }
            LineCommand::Reset => {
                let response = state.reset().await;
                writeln!(out, "{}", render::response(&response))?;
            }
            LineCommand::List => {
                writeln!(out, "{}", state.read(render::serial_list).await)?;
            }
            LineCommand::Dups => {
                let dups = state.read(render::duplicate_list).await;
                match dups {
                    Some(text) => writeln!(out, "{}", text)?,
                    None => writeln!(
                        out,
                        "{}",
                        render::status_line(&ScanStatus::info("Sin duplicados"))
                    )?,
                }
            }
            LineCommand::Export => {
                let status = export::run(state, None, out).await;
                writeln!(out, "{}", render::status_line(&status))?;
            }
            LineCommand::Help => writeln!(out, "{}", render::help())?,
            LineCommand::Quit => break,
            LineCommand::Unknown(name) => {
                let status = ScanStatus::info(format!("Comando desconocido: :{}", name));
                writeln!(out, "{}", render::status_line(&status))?;
            }
        }
        out.flush()?;
    }

    info!("Interactive session ended");
    Ok(())
}
