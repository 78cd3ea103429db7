//! # tally-db: Persistence Layer for Tally
//!
//! Saves and restores the calculator's working state and meal log as two
//! JSON documents in a key-value store. The default store is a SQLite file
//! accessed through sqlx; an in-memory store backs tests.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Data Flow                                  │
//! │                                                                         │
//! │  Session command (press_key, new_meal, ...)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     tally-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────────┐   ┌───────────────┐   ┌──────────────┐  │   │
//! │  │   │PersistenceAdapter│   │ KeyValueStore │   │  Migrations  │  │   │
//! │  │   │ (persistence.rs) │──►│  (store.rs)   │   │  (embedded)  │  │   │
//! │  │   │                  │   │               │   │              │  │   │
//! │  │   │ save / load      │   │ Database      │   │ 001_kv_store │  │   │
//! │  │   │ save_log/load_log│   │ MemoryStore   │   │              │  │   │
//! │  │   └──────────────────┘   └───────────────┘   └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite kv_store table: "items-in-meal", "meal-log"                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - SQL repositories
//! - [`store`] - Key-value store abstraction
//! - [`persistence`] - State and log documents
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_db::{Database, PersistenceAdapter, StoreConfig};
//!
//! let db = Database::new(StoreConfig::new("path/to/tally.db")).await?;
//! let persistence = PersistenceAdapter::new(db);
//!
//! let mut state = AppState::default();
//! persistence.load(&mut state).await?;
//! persistence.load_log(&mut state).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod persistence;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use persistence::{PersistenceAdapter, PersistenceKeys};
pub use pool::{Database, StoreConfig};
pub use repository::kv::KvRepository;
pub use store::{KeyValueStore, MemoryStore};
