//! # Working State and Meal Log
//!
//! `AppState` is the single record the display layer renders from. It is
//! owned by the app's session and changed only through the methods below.
//!
//! ## State Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         AppState Lifecycle                              │
//! │                                                                         │
//! │  Startup:  AppState::new(defaults) ◄── AppStatePatch (stored blob)      │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │  Editing:  entry.push / commit_entry / set_tax_* / set_theme            │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │  New meal: commit_meal(when) ──► log.push(MealRecord)                  │
//! │                 │                 working fields back to defaults       │
//! │                 ▼                 (log is kept)                         │
//! │  Cleanup:  reset_working / clear_log                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::calculator::{compute_totals, Totals};
use crate::entry::EntryBuffer;
use crate::money::Money;
use crate::types::{TaxDefaults, TaxKind, TaxRate, TaxSettings, Theme};

// =============================================================================
// Meal Record
// =============================================================================

/// A finalized bill in the meal log.
///
/// Records are never edited after creation; the log only grows or is
/// cleared as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRecord {
    /// Sequential title, e.g. "Meal #3".
    pub title: String,

    /// Localized time the meal was saved.
    #[serde(rename = "when")]
    pub timestamp: String,

    /// Non-zero item prices, including the entry pending at save time.
    pub items: Vec<Money>,

    /// Tax settings frozen at save time.
    pub settings: TaxSettings,

    pub totals: Totals,
}

// =============================================================================
// App State
// =============================================================================

/// The calculator's complete working state.
///
/// Serialized field names match the stored `items-in-meal` document:
/// `entry`, `items`, `sstEnabled`, `sstRate`, `svcEnabled`, `svcRate`,
/// `theme`, `log`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Price being typed.
    pub entry: EntryBuffer,

    /// Committed item prices, in entry order.
    pub items: Vec<Money>,

    pub sst_enabled: bool,
    pub sst_rate: TaxRate,
    pub svc_enabled: bool,
    pub svc_rate: TaxRate,

    pub theme: Theme,

    /// Finalized meals, oldest first.
    pub log: Vec<MealRecord>,
}

impl AppState {
    /// Creates a fresh state: empty bill, taxes off, default rates, light
    /// theme, empty log.
    pub fn new(defaults: &TaxDefaults) -> Self {
        let tax = TaxSettings::from_defaults(defaults);
        AppState {
            entry: EntryBuffer::new(),
            items: Vec::new(),
            sst_enabled: tax.sst_enabled,
            sst_rate: tax.sst_rate,
            svc_enabled: tax.svc_enabled,
            svc_rate: tax.svc_rate,
            theme: Theme::default(),
            log: Vec::new(),
        }
    }

    /// Current tax configuration.
    pub fn tax_settings(&self) -> TaxSettings {
        TaxSettings {
            sst_enabled: self.sst_enabled,
            sst_rate: self.sst_rate,
            svc_enabled: self.svc_enabled,
            svc_rate: self.svc_rate,
        }
    }

    /// Totals of the bill being built, pending entry included.
    pub fn totals(&self) -> Totals {
        compute_totals(&self.items, &self.entry, &self.tax_settings())
    }

    /// The "+" key: moves the entry into the item list.
    ///
    /// Returns the committed amount, or `None` (and changes nothing) when
    /// the entry is empty. A lone `.` commits as zero.
    pub fn commit_entry(&mut self) -> Option<Money> {
        let amount = self.entry.take_committed()?;
        self.items.push(amount);
        Some(amount)
    }

    /// Switches a surcharge on or off. Returns `true` if it changed.
    pub fn set_tax_enabled(&mut self, kind: TaxKind, enabled: bool) -> bool {
        let flag = match kind {
            TaxKind::Sst => &mut self.sst_enabled,
            TaxKind::ServiceCharge => &mut self.svc_enabled,
        };
        let changed = *flag != enabled;
        *flag = enabled;
        changed
    }

    /// Sets a surcharge rate. Returns `true` if it changed.
    pub fn set_tax_rate(&mut self, kind: TaxKind, rate: TaxRate) -> bool {
        let slot = match kind {
            TaxKind::Sst => &mut self.sst_rate,
            TaxKind::ServiceCharge => &mut self.svc_rate,
        };
        let changed = *slot != rate;
        *slot = rate;
        changed
    }

    /// Returns `true` if the theme changed.
    pub fn set_theme(&mut self, theme: Theme) -> bool {
        let changed = self.theme != theme;
        self.theme = theme;
        changed
    }

    /// Clears the entry and items and restores tax toggles and rates.
    /// Theme and log are kept.
    pub fn reset_working(&mut self, defaults: &TaxDefaults) {
        let tax = TaxSettings::from_defaults(defaults);
        self.entry.clear();
        self.items.clear();
        self.sst_enabled = tax.sst_enabled;
        self.sst_rate = tax.sst_rate;
        self.svc_enabled = tax.svc_enabled;
        self.svc_rate = tax.svc_rate;
    }

    /// Title the next saved meal will get.
    pub fn next_meal_title(&self) -> String {
        format!("Meal #{}", self.log.len() + 1)
    }

    /// Items that go into a meal record: committed items plus the pending
    /// entry, zero amounts dropped.
    pub fn meal_items(&self) -> Vec<Money> {
        self.items
            .iter()
            .copied()
            .chain(std::iter::once(self.entry.value()))
            .filter(|amount| !amount.is_zero())
            .collect()
    }

    /// Saves the current bill to the log and starts a new one.
    ///
    /// ## Behavior
    /// - Subtotal of zero: nothing is saved, state is untouched, `None`
    /// - Otherwise a record titled "Meal #N" (N = log length + 1) is
    ///   appended, the working fields are reset to `defaults`, and a copy
    ///   of the record is returned. The log itself is never cleared here.
    pub fn commit_meal(&mut self, timestamp: String, defaults: &TaxDefaults) -> Option<MealRecord> {
        let totals = self.totals();
        if totals.subtotal.is_zero() {
            return None;
        }

        let record = MealRecord {
            title: self.next_meal_title(),
            timestamp,
            items: self.meal_items(),
            settings: self.tax_settings(),
            totals,
        };

        self.log.push(record.clone());
        self.reset_working(defaults);
        Some(record)
    }

    /// Empties the meal log. Returns `true` if anything was removed.
    pub fn clear_log(&mut self) -> bool {
        let changed = !self.log.is_empty();
        self.log.clear();
        changed
    }
}

impl Default for AppState {
    fn default() -> Self {
        AppState::new(&TaxDefaults::default())
    }
}

// =============================================================================
// App State Patch
// =============================================================================

/// A stored state document, merged field by field over defaults.
///
/// Every field present in the document overwrites the default; absent or
/// `null` fields leave the default in place. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStatePatch {
    pub entry: Option<EntryBuffer>,
    pub items: Option<Vec<Money>>,
    pub sst_enabled: Option<bool>,
    pub sst_rate: Option<TaxRate>,
    pub svc_enabled: Option<bool>,
    pub svc_rate: Option<TaxRate>,
    pub theme: Option<Theme>,
    pub log: Option<Vec<MealRecord>>,
}

impl AppStatePatch {
    /// Applies the present fields onto `state`.
    pub fn apply_to(self, state: &mut AppState) {
        if let Some(entry) = self.entry {
            state.entry = entry;
        }
        if let Some(items) = self.items {
            state.items = items;
        }
        if let Some(enabled) = self.sst_enabled {
            state.sst_enabled = enabled;
        }
        if let Some(rate) = self.sst_rate {
            state.sst_rate = rate;
        }
        if let Some(enabled) = self.svc_enabled {
            state.svc_enabled = enabled;
        }
        if let Some(rate) = self.svc_rate {
            state.svc_rate = rate;
        }
        if let Some(theme) = self.theme {
            state.theme = theme;
        }
        if let Some(log) = self.log {
            state.log = log;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
