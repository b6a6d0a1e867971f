//! # Audio Cues
//!
//! Scanner operators work without looking at the screen, so every scan gets
//! an audible answer.
//!
//! ```text
//! Cue::Success  ──► BEL        (one short beep)
//! Cue::Error    ──► BEL BEL    (double beep, duplicate on the pallet)
//! ```
//!
//! A terminal bell has no volume control; the cue's volume is only logged.

use serialguard_core::Cue;
use std::io::{self, Write};
use tracing::trace;

const BEL: &[u8] = b"\x07";

/// Plays cues.
pub trait CuePlayer {
    /// Plays `cue`. Failures are non-fatal to the caller.
    fn play(&mut self, cue: Cue) -> io::Result<()>;
}

/// Rings the terminal bell.
#[derive(Debug)]
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<io::Stderr> {
    /// Bell on stderr, leaving stdout free for export text.
    pub fn stderr() -> Self {
        TerminalBell { out: io::stderr() }
    }
}

impl<W: Write> TerminalBell<W> {
    /// Bell on an arbitrary writer.
    pub fn new(out: W) -> Self {
        TerminalBell { out }
    }

    /// Consumes the player, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CuePlayer for TerminalBell<W> {
    fn play(&mut self, cue: Cue) -> io::Result<()> {
        trace!(?cue, volume = cue.volume(), "Playing cue");

        let rings = match cue {
            Cue::Success => 1,
            Cue::Error => 2,
        };
        for _ in 0..rings {
            self.out.write_all(BEL)?;
        }
        self.out.flush()
    }
}

/// Plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPlayer;

impl CuePlayer for SilentPlayer {
    fn play(&mut self, _cue: Cue) -> io::Result<()> {
        Ok(())
    }
}

/// Picks the player for the configured sound setting.
pub fn player(sound_enabled: bool) -> Box<dyn CuePlayer> {
    if sound_enabled {
        Box::new(TerminalBell::stderr())
    } else {
        Box::new(SilentPlayer)
    }
}
