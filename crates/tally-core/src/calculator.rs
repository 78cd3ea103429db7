//! # Calculator
//!
//! Derives the bill totals from the committed items, the pending entry and
//! the tax settings.
//!
//! ```text
//! items ──┐
//!         ├──► subtotal ──┬──► sst = subtotal × sstRate  (if enabled)
//! entry ──┘               ├──► svc = subtotal × svcRate  (if enabled)
//!                         └──► grand = subtotal + sst + svc
//! ```
//!
//! Each surcharge is rounded half up to the sen; grand is the exact sum of
//! the three rounded parts, so the displayed lines always add up.

use serde::{Deserialize, Serialize};

use crate::entry::EntryBuffer;
use crate::money::Money;
use crate::types::{TaxKind, TaxSettings};

/// Computed bill totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Money,
    pub sst: Money,
    pub svc: Money,
    pub grand: Money,
}

/// Sum of the committed items plus the pending entry.
///
/// An empty or unparseable entry contributes zero.
pub fn compute_subtotal(items: &[Money], entry: &EntryBuffer) -> Money {
    items.iter().sum::<Money>() + entry.value()
}

/// Full totals for the current bill.
///
/// ## Example
/// ```rust
/// use tally_core::{compute_totals, EntryBuffer, Money, TaxRate, TaxSettings};
///
/// let items = [Money::from_sen(1000), Money::from_sen(550)];
/// let settings = TaxSettings {
///     sst_enabled: true,
///     sst_rate: TaxRate::from_bps(600),
///     svc_enabled: true,
///     svc_rate: TaxRate::from_bps(1000),
/// };
///
/// let totals = compute_totals(&items, &EntryBuffer::new(), &settings);
/// assert_eq!(totals.subtotal.sen(), 1550);
/// assert_eq!(totals.sst.sen(), 93);
/// assert_eq!(totals.svc.sen(), 155);
/// assert_eq!(totals.grand.sen(), 1798);
/// ```
pub fn compute_totals(items: &[Money], entry: &EntryBuffer, settings: &TaxSettings) -> Totals {
    let subtotal = compute_subtotal(items, entry);
    let surcharge = |kind: TaxKind| {
        settings
            .effective_rate(kind)
            .map(|rate| subtotal.calculate_tax(rate))
            .unwrap_or_default()
    };

    let sst = surcharge(TaxKind::Sst);
    let svc = surcharge(TaxKind::ServiceCharge);

    Totals {
        subtotal,
        sst,
        svc,
        grand: subtotal + sst + svc,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
