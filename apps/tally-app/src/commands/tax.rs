//! # Tax Commands
//!
//! The SST and service charge switches and their rate fields.

use tally_core::validation::{parse_rate_input, validate_tax_rate_bps};
use tally_core::TaxKind;
use tally_db::KeyValueStore;
use tracing::debug;

use crate::clock::Clock;
use crate::error::AppResult;
use crate::state::{Session, Snapshot};

/// Switches a surcharge on or off.
pub async fn toggle_tax<S: KeyValueStore, C: Clock>(
    session: &mut Session<S, C>,
    kind: TaxKind,
    enabled: bool,
) -> AppResult<Snapshot> {
    let changed = session.state_mut().set_tax_enabled(kind, enabled);
    debug!(kind = ?kind, enabled, changed, "toggle_tax command");

    if changed {
        session.persist().await?;
    }
    Ok(session.snapshot())
}

/// Text typed into a rate field, in percent.
///
/// ## Behavior
/// - Blank, unparseable, zero or negative text selects the configured
///   default rate
/// - Rates above 100% are rejected and the state is left unchanged
pub async fn set_tax_rate<S: KeyValueStore, C: Clock>(
    session: &mut Session<S, C>,
    kind: TaxKind,
    text: &str,
) -> AppResult<Snapshot> {
    let fallback = session.config().tax_defaults().rate(kind);
    let rate = parse_rate_input(text, fallback);
    validate_tax_rate_bps(kind, rate.bps())?;

    let changed = session.state_mut().set_tax_rate(kind, rate);
    debug!(kind = ?kind, input = %text, bps = rate.bps(), changed, "set_tax_rate command");

    if changed {
        session.persist().await?;
    }
    Ok(session.snapshot())
}
