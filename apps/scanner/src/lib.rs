//! # Serial Guard Scanner
//!
//! Terminal front end for the pallet scan session.
//!
//! ## Module Organization
//! ```text
//! serialguard_scanner/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap definitions
//! ├── config.rs       ◄─── AppConfig layering
//! ├── state.rs        ◄─── SessionState (session + store)
//! ├── commands/       ◄─── interactive loop, one-shot commands, export
//! ├── render.rs       ◄─── text views
//! ├── cue.rs          ◄─── terminal bell
//! └── error.rs        ◄─── AppError
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod cue;
pub mod error;
pub mod render;
pub mod state;

use std::io::{self, Write};

use serialguard_db::{Database, DbConfig, MemorySessionStore, SessionStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use config::AppConfig;
use error::AppResult;
use state::SessionState;

/// Runs the scanner.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Scanner Startup                                   │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → config.toml → SERIALGUARD_* env → CLI flags            │
/// │                                                                         │
/// │  2. Open Store ───────────────────────────────────────────────────────► │
/// │     • --ephemeral: MemorySessionStore                                   │
/// │     • otherwise: SQLite (WAL) + migrations, SqliteSessionStore          │
/// │                                                                         │
/// │  3. Load Session ─────────────────────────────────────────────────────► │
/// │     • one read; bad data starts an empty pallet                         │
/// │                                                                         │
/// │  4. Dispatch ─────────────────────────────────────────────────────────► │
/// │     • no subcommand: interactive loop on stdin                          │
/// │     • add / undo / reset / show / export / status                       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> AppResult<()> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.db.clone(), cli.quiet, cli.ephemeral);
    config.validate()?;

    if config.ephemeral {
        info!("Using in-memory session store");
        let state = SessionState::load(MemorySessionStore::new()).await;
        return dispatch(&state, cli.command, &config).await;
    }

    let db_path = config.resolve_database_path()?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;
    let state = SessionState::load(db.session_store()).await;

    let result = dispatch(&state, cli.command, &config).await;
    db.close().await;
    result
}

/// Runs one command (or the interactive loop) against `state`.
pub async fn dispatch<S: SessionStore>(
    state: &SessionState<S>,
    command: Option<Command>,
    config: &AppConfig,
) -> AppResult<()> {
    let mut stdout = io::stdout().lock();
    let mut cues = cue::player(config.sound_enabled);

    match command {
        None => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            commands::interactive::run(state, stdin, &mut stdout, cues.as_mut()).await?;
        }
        Some(Command::Add { serials }) => {
            commands::session::add(state, &serials, cues.as_mut(), &mut stdout).await?;
        }
        Some(Command::Undo) => {
            commands::session::undo(state, &mut stdout).await?;
        }
        Some(Command::Reset) => {
            commands::session::reset(state, &mut stdout).await?;
        }
        Some(Command::Show { format }) => {
            commands::session::show(state, format, &mut stdout).await?;
        }
        Some(Command::Status { format }) => {
            commands::session::status(state, format, &mut stdout).await?;
        }
        Some(Command::Export { output }) => {
            let status = commands::export::run(state, output.as_deref(), &mut stdout).await;
            // stdout carries only the serials
            eprintln!("{}", render::status_line(&status));
        }
    }

    stdout.flush()?;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=serialguard=trace` - Show trace for serialguard crates only
/// - Default: warnings, plus debug for serialguard crates when `verbose`
///
/// Logs go to stderr; stdout is reserved for scan output and export text.
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,serialguard=debug,sqlx=warn"
    } else {
        "warn,sqlx=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
