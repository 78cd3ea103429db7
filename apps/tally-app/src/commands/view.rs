//! # View Commands
//!
//! Reading the snapshot, the theme switch and the clock.

use tally_core::Theme;
use tally_db::KeyValueStore;
use tracing::debug;

use crate::clock::Clock;
use crate::error::AppResult;
use crate::state::{Session, Snapshot};

/// Current snapshot, for the first render.
pub fn get_snapshot<S: KeyValueStore, C: Clock>(session: &Session<S, C>) -> Snapshot {
    session.snapshot()
}

/// The dark-mode switch.
pub async fn set_theme<S: KeyValueStore, C: Clock>(
    session: &mut Session<S, C>,
    dark: bool,
) -> AppResult<Snapshot> {
    let theme = Theme::from_dark_switch(dark);
    let changed = session.state_mut().set_theme(theme);
    debug!(theme = ?theme, changed, "set_theme command");

    if changed {
        session.persist().await?;
    }
    Ok(session.snapshot())
}

/// Clock text for the once-per-second timer, e.g. `19 Oct 2026, 15:45:12`.
pub fn tick_clock<S: KeyValueStore, C: Clock>(session: &Session<S, C>) -> String {
    session.clock_display()
}
