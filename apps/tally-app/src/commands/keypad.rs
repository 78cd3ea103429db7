//! # Keypad Commands
//!
//! Editing the entry buffer and committing it as an item.
//!
//! ## Entry Lifecycle
//! ```text
//! ┌──────────┐  press_key   ┌──────────┐  commit_entry  ┌──────────────┐
//! │  ""      │─────────────►│  "12.5"  │───────────────►│ items += 12.50│
//! └──────────┘              └──────────┘                │ entry = ""    │
//!      ▲                     │   │                      └──────────────┘
//!      │      clear_entry    │   │ backspace
//!      └─────────────────────┘   ▼
//!                              "12."
//! ```

use tally_db::KeyValueStore;
use tracing::debug;

use crate::clock::Clock;
use crate::error::AppResult;
use crate::state::{Session, Snapshot};

/// A keypad key: a digit or `.`.
///
/// ## Behavior
/// - A second `.` is ignored
/// - Keys are ignored once the entry holds 6 characters
/// - Anything other than `0-9` and `.` is ignored
pub async fn press_key<S: KeyValueStore, C: Clock>(
    session: &mut Session<S, C>,
    key: char,
) -> AppResult<Snapshot> {
    let changed = session.state_mut().entry.push(key);
    debug!(key = %key, changed, entry = %session.state().entry.as_str(), "press_key command");

    if changed {
        session.persist().await?;
    }
    Ok(session.snapshot())
}

/// Removes the last character of the entry.
pub async fn backspace<S: KeyValueStore, C: Clock>(
    session: &mut Session<S, C>,
) -> AppResult<Snapshot> {
    let changed = session.state_mut().entry.backspace();
    debug!(changed, "backspace command");

    if changed {
        session.persist().await?;
    }
    Ok(session.snapshot())
}

/// Empties the entry.
pub async fn clear_entry<S: KeyValueStore, C: Clock>(
    session: &mut Session<S, C>,
) -> AppResult<Snapshot> {
    let changed = session.state_mut().entry.clear();
    debug!(changed, "clear_entry command");

    if changed {
        session.persist().await?;
    }
    Ok(session.snapshot())
}

/// The "+" key: commits the entry, rounded to the sen, as a new item.
///
/// An empty entry is a no-op; a lone `.` commits as a zero item.
pub async fn commit_entry<S: KeyValueStore, C: Clock>(
    session: &mut Session<S, C>,
) -> AppResult<Snapshot> {
    let committed = session.state_mut().commit_entry();
    debug!(amount = ?committed.map(|m| m.sen()), "commit_entry command");

    if committed.is_some() {
        session.persist().await?;
    }
    Ok(session.snapshot())
}

/// Text typed or pasted straight into the entry field.
///
/// The text is reduced to digits and one decimal point (later points are
/// dropped, their digits kept) and cut to 6 characters.
pub async fn input_entry<S: KeyValueStore, C: Clock>(
    session: &mut Session<S, C>,
    text: &str,
) -> AppResult<Snapshot> {
    let changed = session.state_mut().entry.set_input(text);
    debug!(
        input = %text,
        changed,
        entry = %session.state().entry.as_str(),
        "input_entry command"
    );

    if changed {
        session.persist().await?;
    }
    Ok(session.snapshot())
}
