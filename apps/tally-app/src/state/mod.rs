//! # State Module
//!
//! The session and the values it is built from.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  Session<S: KeyValueStore, C: Clock>                            │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────────┐ ┌──────────────────┐ ┌──────────────────┐    │   │
//! │  │  │  AppState    │ │PersistenceAdapter│ │ AppConfig, Clock │    │   │
//! │  │  │  (tally-core)│ │  (tally-db)      │ │                  │    │   │
//! │  │  └──────────────┘ └──────────────────┘ └──────────────────┘    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                    Snapshot (after every command)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;
mod snapshot;

pub use config::{AppConfig, DATABASE_FILE};
pub use session::Session;
pub use snapshot::{AmountView, ItemLine, LogEntry, LogView, Snapshot, TotalsView, EMPTY_LOG_TEXT};
