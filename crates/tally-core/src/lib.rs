//! # tally-core: Pure Logic for the Tally Meal Bill Calculator
//!
//! This crate holds every rule of the calculator as plain functions and
//! methods with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Display Layer (host)                         │   │
//! │  │    Keypad ──► Entry field ──► Items list ──► Totals ──► Log     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands / snapshot                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tally-app (Session)                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌──────────┐  │   │
//! │  │   │   money   │  │   entry   │  │ calculator │  │  state   │  │   │
//! │  │   │   Money   │  │  Entry    │  │  Totals    │  │ AppState │  │   │
//! │  │   │  TaxRate  │  │  Buffer   │  │            │  │MealRecord│  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tally-db (Persistence)                       │   │
//! │  │          "items-in-meal" state blob, "meal-log" blob            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type in integer sen (no floating point arithmetic)
//! - [`types`] - Tax rates, tax settings, theme
//! - [`entry`] - The entry buffer the keypad types into
//! - [`calculator`] - Subtotal, SST, service charge and grand total
//! - [`state`] - Working state and the meal log
//! - [`validation`] - Rate input rules
//! - [`error`] - Validation error types
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{AppState, TaxKind, TaxRate};
//!
//! let mut state = AppState::default();
//! for key in "10".chars() {
//!     state.entry.push(key);
//! }
//! state.commit_entry();
//! for key in "5.5".chars() {
//!     state.entry.push(key);
//! }
//! state.commit_entry();
//!
//! state.set_tax_enabled(TaxKind::Sst, true);
//! state.set_tax_rate(TaxKind::Sst, TaxRate::from_bps(600));
//! state.set_tax_enabled(TaxKind::ServiceCharge, true);
//!
//! let totals = state.totals();
//! assert_eq!(totals.subtotal.to_string(), "RM15.50");
//! assert_eq!(totals.sst.to_string(), "RM0.93");
//! assert_eq!(totals.svc.to_string(), "RM1.55");
//! assert_eq!(totals.grand.to_string(), "RM17.98");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod entry;
pub mod error;
pub mod money;
pub mod state;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{compute_subtotal, compute_totals, Totals};
pub use entry::EntryBuffer;
pub use error::ValidationError;
pub use money::Money;
pub use state::{AppState, AppStatePatch, MealRecord};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of characters the entry buffer holds.
///
/// Six characters covers prices up to `999999` or `9999.9`.
pub const MAX_ENTRY_LEN: usize = 6;

/// Currency symbol used when rendering amounts.
pub const CURRENCY_SYMBOL: &str = "RM";

/// Default SST rate: 8%.
pub const DEFAULT_SST_RATE: TaxRate = TaxRate::from_bps(800);

/// Default service charge rate: 10%.
pub const DEFAULT_SVC_RATE: TaxRate = TaxRate::from_bps(1000);
