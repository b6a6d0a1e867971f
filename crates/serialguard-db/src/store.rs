//! # Session Stores
//!
//! Where the current pallet's record text lives between runs.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         SessionStore                                    │
//! │                                                                         │
//! │  load()   → Ok(None)        nothing saved yet                          │
//! │           → Ok(Some(text))  last saved text, verbatim                  │
//! │           → Err(..)         store unreadable (caller starts empty)     │
//! │                                                                         │
//! │  save(t)  → overwrite the single slot with t                           │
//! │  clear()  → drop the slot                                              │
//! │                                                                         │
//! │  The store never parses the text. Decoding is serialguard-core's job.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use serialguard_core::STORAGE_KEY;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::repository::kv::KvRepository;

/// A single-slot text store for the current session.
pub trait SessionStore: Send + Sync {
    /// Reads the saved text, if any.
    fn load(&self) -> impl Future<Output = DbResult<Option<String>>> + Send;

    /// Replaces the saved text.
    fn save(&self, text: &str) -> impl Future<Output = DbResult<()>> + Send;

    /// Removes the saved text.
    fn clear(&self) -> impl Future<Output = DbResult<()>> + Send;
}

// =============================================================================
// SQLite
// =============================================================================

/// Session store backed by the `kv_store` table.
#[derive(Debug, Clone)]
pub struct SqliteSessionStore {
    kv: KvRepository,
    key: String,
}

impl SqliteSessionStore {
    /// Store bound to [`STORAGE_KEY`].
    pub fn new(kv: KvRepository) -> Self {
        Self::with_key(kv, STORAGE_KEY)
    }

    /// Store bound to a custom key.
    pub fn with_key(kv: KvRepository, key: impl Into<String>) -> Self {
        SqliteSessionStore {
            kv,
            key: key.into(),
        }
    }

    /// The key this store reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl SessionStore for SqliteSessionStore {
    async fn load(&self) -> DbResult<Option<String>> {
        let text = self.kv.get(&self.key).await?;
        debug!(key = %self.key, found = text.is_some(), "Loaded session text");
        Ok(text)
    }

    async fn save(&self, text: &str) -> DbResult<()> {
        self.kv.put(&self.key, text).await
    }

    async fn clear(&self) -> DbResult<()> {
        self.kv.delete(&self.key).await?;
        Ok(())
    }
}

// =============================================================================
// In-memory
// =============================================================================

/// Session store held in process memory.
///
/// Used by tests and by `--ephemeral` runs. A store built with
/// [`MemorySessionStore::failing`] rejects every write, which is how the
/// scanner's save-failure path gets exercised.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<String>>,
    fail_writes: AtomicBool,
}

impl MemorySessionStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with `text`.
    pub fn with_contents(text: impl Into<String>) -> Self {
        MemorySessionStore {
            slot: Mutex::new(Some(text.into())),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Store whose writes always fail.
    pub fn failing() -> Self {
        let store = Self::default();
        store.set_failing(true);
        store
    }

    /// Toggles write failures.
    pub fn set_failing(&self, failing: bool) {
        self.fail_writes.store(failing, Ordering::SeqCst);
    }

    /// Current slot contents.
    pub async fn contents(&self) -> Option<String> {
        self.slot.lock().await.clone()
    }

    fn check_writable(&self) -> DbResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            warn!("Memory store rejected write");
            return Err(DbError::Unavailable("memory store is read-only".to_string()));
        }
        Ok(())
    }
}

impl SessionStore for MemorySessionStore {
    async fn load(&self) -> DbResult<Option<String>> {
        Ok(self.slot.lock().await.clone())
    }

    async fn save(&self, text: &str) -> DbResult<()> {
        self.check_writable()?;
        *self.slot.lock().await = Some(text.to_string());
        Ok(())
    }

    async fn clear(&self) -> DbResult<()> {
        self.check_writable()?;
        *self.slot.lock().await = None;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use serialguard_core::ScanSession;

    #[tokio::test]
    async fn test_sqlite_store_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = db.session_store();
        assert_eq!(store.key(), STORAGE_KEY);
        assert_eq!(store.load().await.unwrap(), None);

        let mut session = ScanSession::new();
        session.submit("a1");
        session.submit("B2");
        session.submit("A1");
        let text = session.to_record().encode().unwrap();

        store.save(&text).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(ScanSession::restore(&loaded), session);

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sqlite_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pallet.db");

        {
            let db = Database::new(DbConfig::new(&path)).await.unwrap();
            db.session_store().save("{\"scanCount\":7}").await.unwrap();
            db.close().await;
        }

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let text = db.session_store().load().await.unwrap().unwrap();
        assert_eq!(ScanSession::restore(&text).scan_count(), 7);
    }

    #[tokio::test]
    async fn test_keys_are_isolated() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let main = db.session_store();
        let other = SqliteSessionStore::with_key(db.kv(), "other");

        main.save("main").await.unwrap();
        other.save("other").await.unwrap();
        other.clear().await.unwrap();

        assert_eq!(main.load().await.unwrap().as_deref(), Some("main"));
    }

    #[tokio::test]
    async fn test_closed_database_fails_to_save() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = db.session_store();
        db.close().await;

        assert!(store.save("{}").await.is_err());
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemorySessionStore::with_contents("x");
        assert_eq!(store.load().await.unwrap().as_deref(), Some("x"));

        store.save("y").await.unwrap();
        assert_eq!(store.contents().await.as_deref(), Some("y"));

        store.clear().await.unwrap();
        assert_eq!(store.contents().await, None);
    }

    #[tokio::test]
    async fn test_failing_memory_store_keeps_old_value() {
        let store = MemorySessionStore::with_contents("old");
        store.set_failing(true);

        assert!(matches!(
            store.save("new").await,
            Err(DbError::Unavailable(_))
        ));
        assert_eq!(store.load().await.unwrap().as_deref(), Some("old"));

        let fresh = MemorySessionStore::failing();
        assert!(fresh.clear().await.is_err());
    }
}
