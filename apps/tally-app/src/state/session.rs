//! # Session
//!
//! Owns the working [`AppState`] together with its persistence, config and
//! clock. Commands take `&mut Session`, so mutations never overlap.
//!
//! ## Startup
//! ```text
//! AppState::new(config defaults)
//!        │
//!        ▼
//! persistence.load()      ◄── "items-in-meal" merged over defaults
//!        │
//!        ▼
//! persistence.load_log()  ◄── "meal-log" replaces the log
//!        │
//!        ▼
//! Session ready
//! ```

use tally_core::AppState;
use tally_db::{KeyValueStore, PersistenceAdapter};
use tracing::info;

use super::config::AppConfig;
use super::snapshot::Snapshot;
use crate::clock::{self, Clock, SystemClock};
use crate::error::AppResult;

/// A running calculator.
#[derive(Debug)]
pub struct Session<S, C = SystemClock> {
    state: AppState,
    persistence: PersistenceAdapter<S>,
    config: AppConfig,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> Session<S, C> {
    /// Restores the stored state over the configured defaults.
    ///
    /// Corrupt stored documents are skipped; store I/O errors are returned.
    pub async fn open(
        persistence: PersistenceAdapter<S>,
        config: AppConfig,
        clock: C,
    ) -> AppResult<Self> {
        let mut state = AppState::new(&config.tax_defaults());
        persistence.load(&mut state).await?;
        persistence.load_log(&mut state).await?;

        info!(
            items = state.items.len(),
            meals = state.log.len(),
            "Session opened"
        );

        Ok(Session {
            state,
            persistence,
            config,
            clock,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn persistence(&self) -> &PersistenceAdapter<S> {
        &self.persistence
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::build(&self.state, &self.config)
    }

    /// Current time as clock text.
    pub fn clock_display(&self) -> String {
        clock::clock_display(self.clock.now(), self.config.utc_offset())
    }

    /// Current time as a meal timestamp.
    pub fn meal_timestamp(&self) -> String {
        clock::meal_timestamp(self.clock.now(), self.config.utc_offset())
    }

    /// Writes the state document.
    pub(crate) async fn persist(&self) -> AppResult<()> {
        self.persistence.save(&self.state).await?;
        Ok(())
    }

    /// Writes the log document.
    pub(crate) async fn persist_log(&self) -> AppResult<()> {
        self.persistence.save_log(&self.state.log).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};
    use tally_core::{Money, Theme};
    use tally_db::persistence::{LOG_KEY, STATE_KEY};
    use tally_db::MemoryStore;

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 19, 7, 45, 12).unwrap())
    }

    #[tokio::test]
    async fn test_open_empty_store() {
        let session = Session::open(
            PersistenceAdapter::new(MemoryStore::new()),
            AppConfig::default(),
            clock(),
        )
        .await
        .unwrap();

        assert_eq!(session.state(), &AppState::default());
        assert_eq!(session.clock_display(), "19 Oct 2026, 15:45:12");
        assert_eq!(session.meal_timestamp(), "19 Oct 2026, 3:45 pm");
    }

    #[tokio::test]
    async fn test_open_uses_configured_defaults() {
        let config = AppConfig::from_lookup(|name| {
            (name == "TALLY_SST_RATE").then(|| "6".to_string())
        });

        let session = Session::open(PersistenceAdapter::new(MemoryStore::new()), config, clock())
            .await
            .unwrap();

        assert_eq!(session.state().sst_rate.bps(), 600);
    }

    #[tokio::test]
    async fn test_open_restores_both_documents() {
        let store = MemoryStore::new();
        store
            .set(STATE_KEY, r#"{"entry":"3","items":[4.5],"theme":"dark","log":[]}"#)
            .await
            .unwrap();
        store
            .set(
                LOG_KEY,
                r#"[{"title":"Meal #1","when":"18 Oct 2026, 8:00 pm","items":[9],
                    "settings":{"sstEnabled":false,"sstRate":8,"svcEnabled":false,"svcRate":10},
                    "totals":{"subtotal":9,"sst":0,"svc":0,"grand":9}}]"#,
            )
            .await
            .unwrap();

        let session = Session::open(PersistenceAdapter::new(store), AppConfig::default(), clock())
            .await
            .unwrap();

        assert_eq!(session.state().entry.as_str(), "3");
        assert_eq!(session.state().items, vec![Money::from_sen(450)]);
        assert_eq!(session.state().theme, Theme::Dark);
        assert_eq!(session.state().log.len(), 1);
        assert_eq!(session.snapshot().totals.subtotal.display, "RM7.50");
    }

    #[tokio::test]
    async fn test_open_ignores_corrupt_state() {
        let store = MemoryStore::new();
        store.set(STATE_KEY, "][").await.unwrap();

        let session = Session::open(PersistenceAdapter::new(store), AppConfig::default(), clock())
            .await
            .unwrap();

        assert_eq!(session.state(), &AppState::default());
    }
}
