//! # Domain Types
//!
//! Small value types shared by the calculator, the working state and the
//! meal log.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │   TaxSettings   │   │     Theme       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  sst on/rate    │   │  Light          │       │
//! │  │  600 = 6%       │   │  svc on/rate    │   │  Dark           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    TaxKind      │   │   TaxDefaults   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Sst            │   │  sst_rate  8%   │                             │
//! │  │  ServiceCharge  │   │  svc_rate 10%   │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use ts_rs::TS;

use crate::validation::MAX_TAX_RATE_BPS;
use crate::{DEFAULT_SST_RATE, DEFAULT_SVC_RATE};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so 600 bps = 6% SST.
/// Users type percentages; they are rounded to the nearest basis point.
///
/// Serialized as a plain percentage number (`6`, `8.25`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage.
    ///
    /// Negative and NaN percentages become zero.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::TaxRate;
    ///
    /// assert_eq!(TaxRate::from_percentage(8.25).bps(), 825);
    /// assert_eq!(TaxRate::from_percentage(6.0).bps(), 600);
    /// ```
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Serialize for TaxRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.percentage())
    }
}

impl<'de> Deserialize<'de> for TaxRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pct = f64::deserialize(deserializer)?;
        let max_pct = f64::from(MAX_TAX_RATE_BPS) / 100.0;
        if !pct.is_finite() || !(0.0..=max_pct).contains(&pct) {
            return Err(de::Error::custom(format!(
                "tax rate {pct} is outside 0..={max_pct}"
            )));
        }
        Ok(TaxRate::from_percentage(pct))
    }
}

// =============================================================================
// Tax Kind
// =============================================================================

/// The two independent surcharges a bill can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum TaxKind {
    /// Sales and Service Tax.
    Sst,
    /// Restaurant service charge.
    ServiceCharge,
}

impl TaxKind {
    /// Human-readable label, used in log fields and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            TaxKind::Sst => "SST rate",
            TaxKind::ServiceCharge => "service charge rate",
        }
    }
}

// =============================================================================
// Theme
// =============================================================================

/// Display theme, persisted with the working state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Maps the dark-mode switch position to a theme.
    pub fn from_dark_switch(checked: bool) -> Self {
        if checked {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

// =============================================================================
// Tax Settings
// =============================================================================

/// Which surcharges apply and at what rates.
///
/// A copy is frozen into every [`crate::MealRecord`] so old bills keep the
/// rates they were computed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSettings {
    pub sst_enabled: bool,
    pub sst_rate: TaxRate,
    pub svc_enabled: bool,
    pub svc_rate: TaxRate,
}

impl TaxSettings {
    /// Both surcharges off, rates at their defaults.
    pub fn from_defaults(defaults: &TaxDefaults) -> Self {
        TaxSettings {
            sst_enabled: false,
            sst_rate: defaults.sst_rate,
            svc_enabled: false,
            svc_rate: defaults.svc_rate,
        }
    }

    /// Returns the rate of a surcharge if it is switched on.
    pub fn effective_rate(&self, kind: TaxKind) -> Option<TaxRate> {
        match kind {
            TaxKind::Sst if self.sst_enabled => Some(self.sst_rate),
            TaxKind::ServiceCharge if self.svc_enabled => Some(self.svc_rate),
            _ => None,
        }
    }
}

impl Default for TaxSettings {
    fn default() -> Self {
        TaxSettings::from_defaults(&TaxDefaults::default())
    }
}

// =============================================================================
// Tax Defaults
// =============================================================================

/// Rates restored by "reset" and used when a rate input is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxDefaults {
    pub sst_rate: TaxRate,
    pub svc_rate: TaxRate,
}

impl TaxDefaults {
    /// Default rate of one surcharge.
    pub fn rate(&self, kind: TaxKind) -> TaxRate {
        match kind {
            TaxKind::Sst => self.sst_rate,
            TaxKind::ServiceCharge => self.svc_rate,
        }
    }
}

impl Default for TaxDefaults {
    fn default() -> Self {
        TaxDefaults {
            sst_rate: DEFAULT_SST_RATE,
            svc_rate: DEFAULT_SVC_RATE,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(8.0).bps(), 800);
        assert_eq!(TaxRate::from_percentage(8.25).bps(), 825);
        assert_eq!(TaxRate::from_percentage(0.004).bps(), 0);
        assert_eq!(TaxRate::from_percentage(-3.0).bps(), 0);
        assert_eq!(TaxRate::from_percentage(6.0).percentage(), 6.0);
    }

    #[test]
    fn test_tax_rate_serializes_as_percentage() {
        let json = serde_json::to_string(&TaxRate::from_bps(650)).unwrap();
        assert_eq!(json, "6.5");

        let rate: TaxRate = serde_json::from_str("10").unwrap();
        assert_eq!(rate.bps(), 1000);

        assert!(serde_json::from_str::<TaxRate>("-1").is_err());
    }

    #[test]
    fn test_tax_rate_rejects_stored_rate_above_full() {
        let rate: TaxRate = serde_json::from_str("100").unwrap();
        assert_eq!(rate.bps(), MAX_TAX_RATE_BPS);

        assert!(serde_json::from_str::<TaxRate>("100.5").is_err());
        assert!(serde_json::from_str::<TaxRate>("1e12").is_err());
    }

    #[test]
    fn test_theme_serialization() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        let theme: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(theme, Theme::Light);
        assert!(serde_json::from_str::<Theme>("\"sepia\"").is_err());
    }

    #[test]
    fn test_theme_from_dark_switch() {
        assert_eq!(Theme::from_dark_switch(true), Theme::Dark);
        assert_eq!(Theme::from_dark_switch(false), Theme::Light);
        assert!(Theme::Dark.is_dark());
    }

    #[test]
    fn test_tax_settings_default_is_off_with_default_rates() {
        let settings = TaxSettings::default();
        assert!(!settings.sst_enabled);
        assert!(!settings.svc_enabled);
        assert_eq!(settings.sst_rate, DEFAULT_SST_RATE);
        assert_eq!(settings.svc_rate, DEFAULT_SVC_RATE);
        assert_eq!(settings.effective_rate(TaxKind::Sst), None);
    }

    #[test]
    fn test_effective_rate_when_enabled() {
        let settings = TaxSettings {
            sst_enabled: true,
            ..TaxSettings::default()
        };
        assert_eq!(settings.effective_rate(TaxKind::Sst), Some(DEFAULT_SST_RATE));
        assert_eq!(settings.effective_rate(TaxKind::ServiceCharge), None);
    }

    #[test]
    fn test_tax_settings_json_shape() {
        let json = serde_json::to_value(TaxSettings::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "sstEnabled": false,
                "sstRate": 8.0,
                "svcEnabled": false,
                "svcRate": 10.0
            })
        );
    }
}
