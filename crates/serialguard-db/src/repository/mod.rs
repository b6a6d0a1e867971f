//! # Repository Module
//!
//! Database repository implementations for Serial Guard.
//!
//! ```text
//! SessionStore (store.rs)
//!      │
//!      │  kv.put(STORAGE_KEY, text)
//!      ▼
//! KvRepository
//! ├── get(&self, key)
//! ├── get_entry(&self, key)
//! ├── put(&self, key, value)
//! ├── delete(&self, key)
//! └── keys(&self)
//!      │
//!      ▼
//! SQLite `kv_store` table
//! ```
//!
//! ## Available Repositories
//!
//! - [`kv::KvRepository`] - Single-table string storage

pub mod kv;
