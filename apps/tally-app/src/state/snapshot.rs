//! # Display Snapshot
//!
//! Everything the display layer needs after a command, already formatted.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  entry: "2.5"                                │
//! │  Item 1                          RM10.00     │
//! │  Item 2                           RM5.50     │
//! │  Subtotal                        RM18.00     │
//! │  SST (6%)            [on]         RM1.08     │
//! │  Service (10%)       [on]         RM1.80     │
//! │  Total                           RM20.88     │
//! ├──────────────────────────────────────────────┤
//! │  Meal #2   19 Oct 2026, 3:45 pm   RM17.98    │
//! │  Meal #1   19 Oct 2026, 1:10 pm    RM9.00    │
//! └──────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tally_core::{AppState, MealRecord, Money, TaxRate, Theme};
use ts_rs::TS;

use super::config::AppConfig;

/// Placeholder the display layer shows for an empty log.
pub const EMPTY_LOG_TEXT: &str = "No meals logged yet.";

/// An amount with its display text.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AmountView {
    #[ts(type = "number")]
    pub value: Money,
    pub display: String,
}

impl AmountView {
    pub fn new(value: Money, config: &AppConfig) -> Self {
        AmountView {
            value,
            display: config.format_amount(value),
        }
    }
}

/// One committed item, labeled "Item N" from 1.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemLine {
    pub label: String,
    pub amount: AmountView,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TotalsView {
    pub subtotal: AmountView,
    pub sst: AmountView,
    pub svc: AmountView,
    pub grand: AmountView,
}

/// A saved meal as listed in the log.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LogEntry {
    pub title: String,
    pub when: String,
    pub grand: AmountView,
}

impl LogEntry {
    fn from_record(record: &MealRecord, config: &AppConfig) -> Self {
        LogEntry {
            title: record.title.clone(),
            when: record.timestamp.clone(),
            grand: AmountView::new(record.totals.grand, config),
        }
    }
}

/// The meal log, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LogView {
    pub is_empty: bool,
    /// Text to show instead of entries; set only when the log is empty.
    pub placeholder: Option<String>,
    pub entries: Vec<LogEntry>,
}

/// Render input for the whole calculator.
///
/// ## Serialization
/// ```json
/// {
///   "entry": "2.5",
///   "items": [{ "label": "Item 1", "amount": { "value": 10.0, "display": "RM10.00" } }],
///   "totals": { "subtotal": {...}, "sst": {...}, "svc": {...}, "grand": {...} },
///   "sstEnabled": true, "sstRate": 6.0,
///   "svcEnabled": false, "svcRate": 10.0,
///   "theme": "light",
///   "log": { "isEmpty": true, "placeholder": "No meals logged yet.", "entries": [] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Snapshot {
    pub entry: String,
    pub items: Vec<ItemLine>,
    pub totals: TotalsView,
    pub sst_enabled: bool,
    #[ts(type = "number")]
    pub sst_rate: TaxRate,
    pub svc_enabled: bool,
    #[ts(type = "number")]
    pub svc_rate: TaxRate,
    pub theme: Theme,
    pub log: LogView,
}

impl Snapshot {
    pub fn build(state: &AppState, config: &AppConfig) -> Self {
        let totals = state.totals();

        let items = state
            .items
            .iter()
            .enumerate()
            .map(|(idx, amount)| ItemLine {
                label: format!("Item {}", idx + 1),
                amount: AmountView::new(*amount, config),
            })
            .collect();

        let entries: Vec<LogEntry> = state
            .log
            .iter()
            .rev()
            .map(|record| LogEntry::from_record(record, config))
            .collect();

        Snapshot {
            entry: state.entry.as_str().to_string(),
            items,
            totals: TotalsView {
                subtotal: AmountView::new(totals.subtotal, config),
                sst: AmountView::new(totals.sst, config),
                svc: AmountView::new(totals.svc, config),
                grand: AmountView::new(totals.grand, config),
            },
            sst_enabled: state.sst_enabled,
            sst_rate: state.sst_rate,
            svc_enabled: state.svc_enabled,
            svc_rate: state.svc_rate,
            theme: state.theme,
            log: LogView {
                is_empty: entries.is_empty(),
                placeholder: entries.is_empty().then(|| EMPTY_LOG_TEXT.to_string()),
                entries,
            },
        }
    }
}
