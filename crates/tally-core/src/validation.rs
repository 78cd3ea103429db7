//! # Validation Module
//!
//! Rules for the two tax-rate inputs.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Rate Input Handling                                │
//! │                                                                         │
//! │  Rate field text ("6", "", "abc", "150")                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  parse_rate_input(text, default)                                        │
//! │  ├── not a number, zero, negative ──► default rate (fail soft)         │
//! │  └── positive number ──────────────► TaxRate (rounded to 1 bps)        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  validate_tax_rate_bps(bps)                                             │
//! │  └── above 100% ───────────────────► ValidationError::OutOfRange       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::{TaxKind, TaxRate};

/// Largest accepted rate: 100% in basis points.
pub const MAX_TAX_RATE_BPS: u32 = 10_000;

/// Parses a percentage typed into a rate field.
///
/// ## Example
/// ```rust
/// use tally_core::validation::parse_percentage;
///
/// assert_eq!(parse_percentage(" 6.5 ").unwrap(), 6.5);
/// assert!(parse_percentage("six").is_err());
/// ```
pub fn parse_percentage(text: &str) -> ValidationResult<f64> {
    let pct: f64 = text
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "rate".to_string(),
            reason: format!("'{}' is not a number", text.trim()),
        })?;

    if !pct.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "rate".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    Ok(pct)
}

/// Reads a rate field, falling back to `fallback` when the text is empty,
/// unparseable, zero or negative.
///
/// ## Example
/// ```rust
/// use tally_core::validation::parse_rate_input;
/// use tally_core::TaxRate;
///
/// let default = TaxRate::from_bps(800);
/// assert_eq!(parse_rate_input("6", default).bps(), 600);
/// assert_eq!(parse_rate_input("", default), default);
/// assert_eq!(parse_rate_input("0", default), default);
/// ```
pub fn parse_rate_input(text: &str, fallback: TaxRate) -> TaxRate {
    match parse_percentage(text) {
        Ok(pct) if pct > 0.0 => TaxRate::from_percentage(pct),
        _ => fallback,
    }
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(kind: TaxKind, bps: u32) -> ValidationResult<()> {
    if bps > MAX_TAX_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: kind.label().to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
