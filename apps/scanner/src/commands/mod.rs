//! # Commands
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cli::Command            commands::                                     │
//! │  ────────────            ──────────                                     │
//! │  (none)       ─────────► interactive::run     stdin loop, one scan/line │
//! │  add          ─────────► session::add                                   │
//! │  undo / reset ─────────► session::undo / session::reset                 │
//! │  show         ─────────► session::show                                  │
//! │  status       ─────────► session::status                                │
//! │  export       ─────────► export::run                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command writes to a caller-supplied writer so tests can capture it.

pub mod export;
pub mod interactive;
pub mod session;

use serialguard_core::ScanStatus;
use tracing::warn;

use crate::cue::CuePlayer;

/// Plays the cue for `status`, if it has one. Playback errors are logged.
pub(crate) fn play_cue(cues: &mut dyn CuePlayer, status: &ScanStatus) {
    if let Some(cue) = status.cue() {
        if let Err(e) = cues.play(cue) {
            warn!(error = %e, "Failed to play cue");
        }
    }
}
