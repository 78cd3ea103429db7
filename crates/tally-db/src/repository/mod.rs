//! # Repository Module
//!
//! Database repository implementations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PersistenceAdapter                                                     │
//! │       │                                                                 │
//! │       │  store.set("items-in-meal", json)                              │
//! │       ▼                                                                 │
//! │  KvRepository                                                           │
//! │  ├── get(&self, key)                                                   │
//! │  └── set(&self, key, value)                                            │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite kv_store table                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`kv::KvRepository`] - Key-value rows holding the JSON blobs

pub mod kv;
