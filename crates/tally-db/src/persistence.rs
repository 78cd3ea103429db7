//! # Persistence Adapter
//!
//! Reads and writes the two JSON documents the calculator keeps:
//!
//! | Key (default)   | Contents                                         |
//! |-----------------|--------------------------------------------------|
//! | `items-in-meal` | Whole [`AppState`], log included                 |
//! | `meal-log`      | Just the log array                               |
//!
//! The log lives under both keys. `load` runs before `load_log`, so a
//! present log document wins over the copy inside the state document.
//!
//! ## Failure Handling
//! ```text
//! store.get(key) ──► None ─────────────────► defaults kept, Ok(false)
//!        │
//!        └──► Some(raw) ──► decode ──► Err(CorruptPersistedState)
//!                             │            │
//!                             │            └──► warn!, defaults kept, Ok(false)
//!                             ▼
//!                       merge over state, Ok(true)
//! ```
//! Store I/O errors are not swallowed; only undecodable data is.

use tally_core::{AppState, AppStatePatch, MealRecord};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::store::KeyValueStore;

/// Default key of the working-state document.
pub const STATE_KEY: &str = "items-in-meal";

/// Default key of the log document.
pub const LOG_KEY: &str = "meal-log";

/// Storage keys for the two documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceKeys {
    pub state: String,
    pub log: String,
}

impl PersistenceKeys {
    pub fn new(state: impl Into<String>, log: impl Into<String>) -> Self {
        PersistenceKeys {
            state: state.into(),
            log: log.into(),
        }
    }
}

impl Default for PersistenceKeys {
    fn default() -> Self {
        PersistenceKeys::new(STATE_KEY, LOG_KEY)
    }
}

/// Saves and restores [`AppState`] through a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct PersistenceAdapter<S> {
    store: S,
    keys: PersistenceKeys,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    /// Creates an adapter using the default keys.
    pub fn new(store: S) -> Self {
        Self::with_keys(store, PersistenceKeys::default())
    }

    pub fn with_keys(store: S, keys: PersistenceKeys) -> Self {
        PersistenceAdapter { store, keys }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn keys(&self) -> &PersistenceKeys {
        &self.keys
    }

    /// Writes the full working state, log included, under the state key.
    pub async fn save(&self, state: &AppState) -> DbResult<()> {
        let json = serde_json::to_string(state)?;
        self.store.set(&self.keys.state, &json).await
    }

    /// Merges the stored state document over `state`.
    ///
    /// Returns `true` if a document was found and applied. A missing or
    /// corrupt document leaves `state` untouched.
    pub async fn load(&self, state: &mut AppState) -> DbResult<bool> {
        let Some(raw) = self.store.get(&self.keys.state).await? else {
            debug!(key = %self.keys.state, "No stored state, using defaults");
            return Ok(false);
        };

        match decode_state(&self.keys.state, &raw) {
            Ok(patch) => {
                patch.apply_to(state);
                debug!(
                    key = %self.keys.state,
                    items = state.items.len(),
                    meals = state.log.len(),
                    "Stored state loaded"
                );
                Ok(true)
            }
            Err(err) => {
                warn!(error = %err, "Ignoring stored state");
                Ok(false)
            }
        }
    }

    /// Writes the log array under the log key.
    pub async fn save_log(&self, log: &[MealRecord]) -> DbResult<()> {
        let json = serde_json::to_string(log)?;
        self.store.set(&self.keys.log, &json).await
    }

    /// Replaces `state.log` with the stored log document.
    ///
    /// A document holding `null` empties the log. A missing or corrupt
    /// document leaves the log untouched.
    pub async fn load_log(&self, state: &mut AppState) -> DbResult<bool> {
        let Some(raw) = self.store.get(&self.keys.log).await? else {
            debug!(key = %self.keys.log, "No stored meal log");
            return Ok(false);
        };

        match decode_log(&self.keys.log, &raw) {
            Ok(log) => {
                debug!(key = %self.keys.log, meals = log.len(), "Stored meal log loaded");
                state.log = log;
                Ok(true)
            }
            Err(err) => {
                warn!(error = %err, "Ignoring stored meal log");
                Ok(false)
            }
        }
    }
}

fn decode_state(key: &str, raw: &str) -> DbResult<AppStatePatch> {
    serde_json::from_str(raw).map_err(|e| DbError::corrupt(key, e))
}

fn decode_log(key: &str, raw: &str) -> DbResult<Vec<MealRecord>> {
    let log: Option<Vec<MealRecord>> =
        serde_json::from_str(raw).map_err(|e| DbError::corrupt(key, e))?;
    Ok(log.unwrap_or_default())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, StoreConfig};
    use crate::store::MemoryStore;
    use tally_core::{Money, TaxDefaults, TaxKind, TaxRate, Theme};

    const WEB_STATE: &str = r#"{
        "entry": "12.5",
        "items": [10, 5.5],
        "sstEnabled": true,
        "sstRate": 6,
        "svcEnabled": false,
        "svcRate": 10,
        "theme": "dark",
        "log": []
    }"#;

    const WEB_LOG: &str = r#"[{
        "title": "Meal #1",
        "when": "19 Oct 2026, 3:45 pm",
        "items": [10, 5.5],
        "settings": {"sstEnabled": true, "sstRate": 6, "svcEnabled": true, "svcRate": 10},
        "totals": {"subtotal": 15.5, "sst": 0.9299999999999999, "svc": 1.55, "grand": 17.98}
    }]"#;

    fn sample_state() -> AppState {
        let mut state = AppState::default();
        for key in "10".chars() {
            state.entry.push(key);
        }
        state.commit_entry();
        for key in "5.5".chars() {
            state.entry.push(key);
        }
        state.commit_entry();
        state.set_tax_enabled(TaxKind::Sst, true);
        state.set_tax_rate(TaxKind::Sst, TaxRate::from_bps(600));
        state.set_tax_enabled(TaxKind::ServiceCharge, true);
        state
    }

    #[tokio::test]
    async fn test_round_trip() {
        let adapter = PersistenceAdapter::new(MemoryStore::new());
        let mut original = sample_state();
        original.entry.push('7');
        original.set_theme(Theme::Dark);
        original.commit_meal("19 Oct 2026, 3:45 pm".to_string(), &TaxDefaults::default());
        original.entry.push('3');

        adapter.save(&original).await.unwrap();

        let mut loaded = AppState::default();
        assert!(adapter.load(&mut loaded).await.unwrap());
        assert_eq!(loaded, original);
    }

    #[tokio::test]
    async fn test_load_missing_keeps_defaults() {
        let adapter = PersistenceAdapter::new(MemoryStore::new());
        let mut state = AppState::default();

        assert!(!adapter.load(&mut state).await.unwrap());
        assert!(!adapter.load_log(&mut state).await.unwrap());
        assert_eq!(state, AppState::default());
    }

    #[tokio::test]
    async fn test_load_web_app_documents() {
        let store = MemoryStore::new();
        store.set(STATE_KEY, WEB_STATE).await.unwrap();
        store.set(LOG_KEY, WEB_LOG).await.unwrap();
        let adapter = PersistenceAdapter::new(store);

        let mut state = AppState::default();
        adapter.load(&mut state).await.unwrap();
        adapter.load_log(&mut state).await.unwrap();

        assert_eq!(state.entry.as_str(), "12.5");
        assert_eq!(state.items, vec![Money::from_sen(1000), Money::from_sen(550)]);
        assert!(state.sst_enabled);
        assert_eq!(state.sst_rate.bps(), 600);
        assert!(!state.svc_enabled);
        assert_eq!(state.theme, Theme::Dark);

        assert_eq!(state.log.len(), 1);
        let meal = &state.log[0];
        assert_eq!(meal.title, "Meal #1");
        assert_eq!(meal.timestamp, "19 Oct 2026, 3:45 pm");
        assert_eq!(meal.totals.sst, Money::from_sen(93));
        assert_eq!(meal.totals.grand, Money::from_sen(1798));
    }

    #[tokio::test]
    async fn test_partial_document_merges_over_defaults() {
        let store = MemoryStore::new();
        store.set(STATE_KEY, r#"{"items": [3], "unknown": 1}"#).await.unwrap();
        let adapter = PersistenceAdapter::new(store);

        let mut state = AppState::default();
        assert!(adapter.load(&mut state).await.unwrap());

        assert_eq!(state.items, vec![Money::from_sen(300)]);
        assert_eq!(state.sst_rate, TaxDefaults::default().sst_rate);
        assert_eq!(state.theme, Theme::Light);
    }

    #[tokio::test]
    async fn test_corrupt_state_falls_back() {
        let store = MemoryStore::new();
        store.set(STATE_KEY, "{not json").await.unwrap();
        let adapter = PersistenceAdapter::new(store);

        let mut state = AppState::default();
        assert!(!adapter.load(&mut state).await.unwrap());
        assert_eq!(state, AppState::default());
    }

    #[tokio::test]
    async fn test_wrong_shape_state_falls_back() {
        let store = MemoryStore::new();
        store.set(STATE_KEY, r#"{"items": "10", "theme": "dark"}"#).await.unwrap();
        let adapter = PersistenceAdapter::new(store);

        let mut state = AppState::default();
        assert!(!adapter.load(&mut state).await.unwrap());
        assert_eq!(state.theme, Theme::Light);
    }

    #[tokio::test]
    async fn test_oversized_amounts_fall_back() {
        let store = MemoryStore::new();
        store
            .set(STATE_KEY, r#"{"items": [9.2e16, 9.2e16], "theme": "dark"}"#)
            .await
            .unwrap();
        let adapter = PersistenceAdapter::new(store);

        let mut state = AppState::default();
        assert!(!adapter.load(&mut state).await.unwrap());
        assert_eq!(state, AppState::default());
        assert!(state.totals().grand.is_zero());
    }

    #[tokio::test]
    async fn test_oversized_rate_falls_back() {
        let store = MemoryStore::new();
        store
            .set(STATE_KEY, r#"{"items": [10], "sstEnabled": true, "sstRate": 1e12}"#)
            .await
            .unwrap();
        let adapter = PersistenceAdapter::new(store);

        let mut state = AppState::default();
        assert!(!adapter.load(&mut state).await.unwrap());
        assert_eq!(state, AppState::default());
    }

    #[tokio::test]
    async fn test_oversized_log_amount_keeps_current_log() {
        let store = MemoryStore::new();
        let huge_log = WEB_LOG.replace("\"grand\": 17.98", "\"grand\": 9.2e16");
        store.set(LOG_KEY, &huge_log).await.unwrap();
        let adapter = PersistenceAdapter::new(store);

        let mut state = AppState::default();
        assert!(!adapter.load_log(&mut state).await.unwrap());
        assert!(state.log.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_log_keeps_current_log() {
        let store = MemoryStore::new();
        store.set(LOG_KEY, "[{\"title\": 5}]").await.unwrap();
        let adapter = PersistenceAdapter::new(store);

        let mut state = sample_state();
        state.commit_meal("now".to_string(), &TaxDefaults::default());

        assert!(!adapter.load_log(&mut state).await.unwrap());
        assert_eq!(state.log.len(), 1);
    }

    #[tokio::test]
    async fn test_null_log_empties() {
        let store = MemoryStore::new();
        store.set(LOG_KEY, "null").await.unwrap();
        let adapter = PersistenceAdapter::new(store);

        let mut state = sample_state();
        state.commit_meal("now".to_string(), &TaxDefaults::default());

        assert!(adapter.load_log(&mut state).await.unwrap());
        assert!(state.log.is_empty());
    }

    /// The log is written under both keys, and the log document wins on
    /// load.
    #[tokio::test]
    async fn test_log_is_stored_twice() {
        let store = MemoryStore::new();
        let adapter = PersistenceAdapter::new(store.clone());

        let mut state = sample_state();
        state.commit_meal("19 Oct 2026, 3:45 pm".to_string(), &TaxDefaults::default());
        adapter.save_log(&state.log).await.unwrap();
        adapter.save(&state).await.unwrap();

        let state_doc: serde_json::Value =
            serde_json::from_str(&store.get(STATE_KEY).await.unwrap().unwrap()).unwrap();
        let log_doc: serde_json::Value =
            serde_json::from_str(&store.get(LOG_KEY).await.unwrap().unwrap()).unwrap();
        assert_eq!(state_doc["log"], log_doc);

        // Diverge the copies: the log document is authoritative.
        state.clear_log();
        adapter.save(&state).await.unwrap();

        let mut loaded = AppState::default();
        adapter.load(&mut loaded).await.unwrap();
        assert!(loaded.log.is_empty());
        adapter.load_log(&mut loaded).await.unwrap();
        assert_eq!(loaded.log.len(), 1);
    }

    #[tokio::test]
    async fn test_custom_keys() {
        let store = MemoryStore::new();
        let adapter =
            PersistenceAdapter::with_keys(store.clone(), PersistenceKeys::new("state", "log"));

        adapter.save(&AppState::default()).await.unwrap();
        adapter.save_log(&[]).await.unwrap();

        assert!(store.get("state").await.unwrap().is_some());
        assert_eq!(store.get("log").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get(STATE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sqlite_round_trip() {
        let db = Database::new(StoreConfig::in_memory()).await.unwrap();
        let adapter = PersistenceAdapter::new(db);

        let mut original = sample_state();
        original.commit_meal("19 Oct 2026, 3:45 pm".to_string(), &TaxDefaults::default());
        adapter.save_log(&original.log).await.unwrap();
        adapter.save(&original).await.unwrap();

        let mut loaded = AppState::default();
        adapter.load(&mut loaded).await.unwrap();
        adapter.load_log(&mut loaded).await.unwrap();
        assert_eq!(loaded, original);
    }
}
