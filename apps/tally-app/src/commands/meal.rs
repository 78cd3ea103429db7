//! # Meal Commands
//!
//! Saving the current bill to the meal log and resetting.
//!
//! ## New Meal Flow
//! ```text
//! new_meal
//!    │
//!    ├── subtotal == 0 ──► nothing saved, nothing written
//!    │
//!    ▼
//! state.commit_meal(timestamp)      "Meal #N", items + pending entry
//!    │
//!    ├── persistence.save_log(log)  "meal-log"
//!    ▼
//! persistence.save(state)           "items-in-meal" (log copy included)
//! ```

use tally_db::KeyValueStore;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::error::AppResult;
use crate::state::{Session, Snapshot};

/// Saves the current bill as the next meal and starts a fresh one.
///
/// Theme and log are kept; entry, items and tax settings go back to the
/// configured defaults. A bill with a zero subtotal is not saved.
pub async fn new_meal<S: KeyValueStore, C: Clock>(
    session: &mut Session<S, C>,
) -> AppResult<Snapshot> {
    let timestamp = session.meal_timestamp();
    let defaults = session.config().tax_defaults();

    let Some(record) = session.state_mut().commit_meal(timestamp, &defaults) else {
        debug!("new_meal command: nothing to save");
        return Ok(session.snapshot());
    };

    info!(
        title = %record.title,
        items = record.items.len(),
        grand_sen = record.totals.grand.sen(),
        "Meal saved"
    );

    session.persist_log().await?;
    session.persist().await?;
    Ok(session.snapshot())
}

/// Clears the entry and items and restores the default tax settings.
/// The log and theme are kept.
pub async fn reset_all<S: KeyValueStore, C: Clock>(
    session: &mut Session<S, C>,
) -> AppResult<Snapshot> {
    let defaults = session.config().tax_defaults();
    session.state_mut().reset_working(&defaults);
    debug!("reset_all command");

    session.persist().await?;
    Ok(session.snapshot())
}

/// Empties the meal log.
pub async fn clear_log<S: KeyValueStore, C: Clock>(
    session: &mut Session<S, C>,
) -> AppResult<Snapshot> {
    let changed = session.state_mut().clear_log();
    debug!(changed, "clear_log command");

    if changed {
        session.persist_log().await?;
        session.persist().await?;
    }
    Ok(session.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::keypad::commit_entry;
    use crate::commands::tax::{set_tax_rate, toggle_tax};
    use crate::commands::testing::{session, session_with, type_keys};
    use crate::commands::view::set_theme;
    use tally_core::{AppState, Money, TaxKind, Theme};
    use tally_db::persistence::{LOG_KEY, STATE_KEY};
    use tally_db::MemoryStore;

    #[tokio::test]
    async fn test_new_meal_records_and_resets() {
        let mut session = session().await;
        type_keys(&mut session, "10").await;
        commit_entry(&mut session).await.unwrap();
        type_keys(&mut session, "5.5").await;
        toggle_tax(&mut session, TaxKind::Sst, true).await.unwrap();
        set_tax_rate(&mut session, TaxKind::Sst, "6").await.unwrap();
        toggle_tax(&mut session, TaxKind::ServiceCharge, true).await.unwrap();

        let snapshot = new_meal(&mut session).await.unwrap();

        let state = session.state();
        assert_eq!(state.log.len(), 1);
        let meal = &state.log[0];
        assert_eq!(meal.title, "Meal #1");
        assert_eq!(meal.timestamp, "19 Oct 2026, 3:45 pm");
        assert_eq!(meal.items, vec![Money::from_sen(1000), Money::from_sen(550)]);
        assert_eq!(meal.settings.sst_rate.bps(), 600);
        assert_eq!(meal.totals.grand, Money::from_sen(1798));

        assert_eq!(snapshot.entry, "");
        assert!(snapshot.items.is_empty());
        assert!(!snapshot.sst_enabled);
        assert!(!snapshot.svc_enabled);
        assert_eq!(snapshot.sst_rate.bps(), 800);
        assert_eq!(snapshot.svc_rate.bps(), 1000);
        assert_eq!(snapshot.log.entries[0].grand.display, "RM17.98");
    }

    #[tokio::test]
    async fn test_new_meal_with_zero_subtotal_is_noop() {
        let store = MemoryStore::new();
        let mut session = session_with(store.clone()).await;
        type_keys(&mut session, "0.00").await;

        let snapshot = new_meal(&mut session).await.unwrap();

        assert!(snapshot.log.is_empty);
        assert_eq!(snapshot.entry, "0.00");
        assert_eq!(store.get(LOG_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_titles_are_sequential() {
        let mut session = session().await;
        for price in ["3", "4", "5"] {
            type_keys(&mut session, price).await;
            new_meal(&mut session).await.unwrap();
        }

        let snapshot = new_meal(&mut session).await.unwrap();
        let titles: Vec<&str> = snapshot.log.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Meal #3", "Meal #2", "Meal #1"]);
    }

    #[tokio::test]
    async fn test_new_meal_keeps_theme_and_writes_both_keys() {
        let store = MemoryStore::new();
        let mut session = session_with(store.clone()).await;
        set_theme(&mut session, true).await.unwrap();
        type_keys(&mut session, "8").await;

        new_meal(&mut session).await.unwrap();

        assert_eq!(session.state().theme, Theme::Dark);

        let state_doc: serde_json::Value =
            serde_json::from_str(&store.get(STATE_KEY).await.unwrap().unwrap()).unwrap();
        let log_doc: serde_json::Value =
            serde_json::from_str(&store.get(LOG_KEY).await.unwrap().unwrap()).unwrap();
        assert_eq!(state_doc["log"], log_doc);
        assert_eq!(log_doc[0]["when"], "19 Oct 2026, 3:45 pm");
        assert_eq!(state_doc["theme"], "dark");
    }

    #[tokio::test]
    async fn test_reset_all_keeps_log() {
        let mut session = session().await;
        type_keys(&mut session, "8").await;
        new_meal(&mut session).await.unwrap();
        type_keys(&mut session, "12").await;
        commit_entry(&mut session).await.unwrap();
        toggle_tax(&mut session, TaxKind::ServiceCharge, true).await.unwrap();

        let snapshot = reset_all(&mut session).await.unwrap();

        assert!(snapshot.items.is_empty());
        assert!(!snapshot.svc_enabled);
        assert_eq!(snapshot.log.entries.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_log() {
        let store = MemoryStore::new();
        let mut session = session_with(store.clone()).await;
        type_keys(&mut session, "8").await;
        new_meal(&mut session).await.unwrap();

        let snapshot = clear_log(&mut session).await.unwrap();
        assert!(snapshot.log.is_empty);

        let reopened = session_with(store).await;
        assert!(reopened.state().log.is_empty());
        assert_eq!(reopened.state(), &AppState::default());
    }
}
