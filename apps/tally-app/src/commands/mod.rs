//! # Commands Module
//!
//! One function per UI event. Every command mutates the session, persists
//! what changed, and returns the new [`Snapshot`](crate::state::Snapshot).
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── keypad.rs   ◄─── Digit keys, backspace, clear, "+", typed input
//! ├── tax.rs      ◄─── SST / service charge toggles and rates
//! ├── meal.rs     ◄─── New meal, reset, clear log
//! └── view.rs     ◄─── Snapshot, theme, clock
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Display layer                                                          │
//! │  keypad "5" clicked                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  press_key(&mut session, '5').await                                     │
//! │         │                                                               │
//! │         ├── session.state_mut().entry.push('5')                        │
//! │         ├── changed? ── persistence.save(state)                        │
//! │         ▼                                                               │
//! │  Ok(Snapshot) ──► display layer re-renders                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Actions that change nothing skip the write.

pub mod keypad;
pub mod meal;
pub mod tax;
pub mod view;

pub use keypad::{backspace, clear_entry, commit_entry, input_entry, press_key};
pub use meal::{clear_log, new_meal, reset_all};
pub use tax::{set_tax_rate, toggle_tax};
pub use view::{get_snapshot, set_theme, tick_clock};
