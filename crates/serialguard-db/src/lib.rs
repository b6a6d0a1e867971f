//! # serialguard-db: Persistence Layer for Serial Guard
//!
//! Keeps the current pallet alive across restarts. Uses SQLite through sqlx
//! for local storage.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Serial Guard Data Flow                             │
//! │                                                                         │
//! │  SessionState::submit (scanner app)                                    │
//! │       │                                                                 │
//! │       │  session.to_record().encode()                                   │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  serialguard-db (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │ SessionStore  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│  (store.rs)   │    │  (embedded)  │  │   │
//! │  │   │               │    │      │        │    │              │  │   │
//! │  │   │ SqlitePool    │    │ KvRepository  │    │ 001_kv_store │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/serialguard/serialguard.db                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Key-value repository
//! - [`store`] - `SessionStore` trait and its SQLite / in-memory impls
//!
//! ## Usage
//!
//! ```rust,ignore
//! use serialguard_db::{Database, DbConfig, SessionStore};
//!
//! let db = Database::new(DbConfig::new("path/to/serialguard.db")).await?;
//! let store = db.session_store();
//!
//! store.save(&session.to_record().encode()?).await?;
//! let text = store.load().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::kv::{KvEntry, KvRepository};
pub use store::{MemorySessionStore, SessionStore, SqliteSessionStore};
