//! # Tally App
//!
//! Application layer of the meal bill calculator. A display host (desktop
//! shell, web view, test harness) opens a [`Session`] and calls one
//! command per UI event; every command returns a [`Snapshot`] to render.
//!
//! ## Module Organization
//! ```text
//! tally_app/
//! ├── lib.rs          ◄─── You are here (startup helpers)
//! ├── clock.rs        ◄─── Clock trait, Malaysia-time formatting
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── AppConfig (defaults + TALLY_* env)
//! │   ├── session.rs  ◄─── Session: AppState + persistence + clock
//! │   └── snapshot.rs ◄─── Display DTOs (TypeScript bindings)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── keypad.rs   ◄─── Entry editing and "+"
//! │   ├── tax.rs      ◄─── SST / service charge
//! │   ├── meal.rs     ◄─── New meal, reset, clear log
//! │   └── view.rs     ◄─── Snapshot, theme, clock
//! └── error.rs        ◄─── AppError for commands
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! tally_app::init_tracing();
//!
//! let mut session = tally_app::open_default(AppConfig::from_env()).await?;
//! let snapshot = commands::press_key(&mut session, '5').await?;
//! let snapshot = commands::commit_entry(&mut session).await?;
//! ```

pub mod clock;
pub mod commands;
pub mod error;
pub mod state;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{AppError, AppResult, ErrorCode};
pub use state::{AppConfig, Session, Snapshot};

use tally_db::{Database, PersistenceAdapter, StoreConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,tally=debug,sqlx=warn";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tally_db=trace` - Show trace for one crate only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Does nothing if a subscriber is already installed.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Opens a session on the SQLite store.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Determine Database Path ──────────────────────────────────────────► │
/// │     • TALLY_DB_PATH, or the platform data directory                     │
/// │                                                                         │
/// │  2. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode                                              │
/// │     • Run pending migrations                                            │
/// │                                                                         │
/// │  3. Open Session ─────────────────────────────────────────────────────► │
/// │     • load "items-in-meal", then "meal-log"                             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn open_default(config: AppConfig) -> AppResult<Session<Database, SystemClock>> {
    let db_path = config.resolve_database_path()?;
    info!(?db_path, "Database path determined");

    open_with_store(StoreConfig::new(db_path), config).await
}

/// Opens a session on the database described by `store_config`.
pub async fn open_with_store(
    store_config: StoreConfig,
    config: AppConfig,
) -> AppResult<Session<Database, SystemClock>> {
    let db = Database::new(store_config).await?;
    info!("Database connected and migrations applied");

    let persistence = PersistenceAdapter::with_keys(db, config.persistence_keys());
    Session::open(persistence, config, SystemClock).await
}
