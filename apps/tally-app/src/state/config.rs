//! # Configuration
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TALLY_*`)
//! 2. Defaults (this file)
//!
//! ## Environment Variables
//! | Variable                 | Meaning                          | Default          |
//! |--------------------------|----------------------------------|------------------|
//! | `TALLY_SST_RATE`         | Default SST rate, percent        | `8`              |
//! | `TALLY_SVC_RATE`         | Default service charge, percent  | `10`             |
//! | `TALLY_CURRENCY_SYMBOL`  | Prefix for displayed amounts     | `RM`             |
//! | `TALLY_UTC_OFFSET_HOURS` | Timezone for timestamps          | `8`              |
//! | `TALLY_DB_PATH`          | SQLite file                      | platform data dir|
//! | `TALLY_STATE_KEY`        | Key of the state document        | `items-in-meal`  |
//! | `TALLY_LOG_KEY`          | Key of the log document          | `meal-log`       |
//!
//! Invalid values are logged and ignored.
//!
//! Configuration is read-only after the session opens.

use std::path::PathBuf;

use chrono::FixedOffset;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tally_core::validation::{parse_percentage, validate_tax_rate_bps};
use tally_core::{
    Money, TaxDefaults, TaxKind, TaxRate, CURRENCY_SYMBOL, DEFAULT_SST_RATE, DEFAULT_SVC_RATE,
};
use tally_db::persistence::{LOG_KEY, STATE_KEY};
use tally_db::PersistenceKeys;
use tracing::warn;

use crate::clock::{self, MALAYSIA_UTC_OFFSET_HOURS};
use crate::error::{AppError, AppResult};

/// File name of the SQLite database inside the data directory.
pub const DATABASE_FILE: &str = "tally.db";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Rate restored by reset and new meal, and used when the SST field is
    /// blank or zero.
    pub sst_rate: TaxRate,

    /// Same as `sst_rate`, for the service charge.
    pub svc_rate: TaxRate,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Hours east of UTC for timestamps and the clock.
    pub utc_offset_hours: i32,

    /// SQLite file. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,

    pub state_key: String,
    pub log_key: String,
}

impl Default for AppConfig {
    /// Returns the Malaysian defaults: SST 8%, service charge 10%, "RM",
    /// UTC+08:00.
    fn default() -> Self {
        AppConfig {
            sst_rate: DEFAULT_SST_RATE,
            svc_rate: DEFAULT_SVC_RATE,
            currency_symbol: CURRENCY_SYMBOL.to_string(),
            utc_offset_hours: MALAYSIA_UTC_OFFSET_HOURS,
            database_path: None,
            state_key: STATE_KEY.to_string(),
            log_key: LOG_KEY.to_string(),
        }
    }
}

impl AppConfig {
    /// Creates a config from environment variables and defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Creates a config from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(text) = lookup("TALLY_SST_RATE") {
            if let Some(rate) = rate_override("TALLY_SST_RATE", &text, TaxKind::Sst) {
                config.sst_rate = rate;
            }
        }

        if let Some(text) = lookup("TALLY_SVC_RATE") {
            if let Some(rate) = rate_override("TALLY_SVC_RATE", &text, TaxKind::ServiceCharge) {
                config.svc_rate = rate;
            }
        }

        if let Some(symbol) = lookup("TALLY_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol.trim().to_string();
        }

        if let Some(text) = lookup("TALLY_UTC_OFFSET_HOURS") {
            match text.trim().parse::<i32>() {
                Ok(hours) if clock::utc_offset(hours).is_some() => {
                    config.utc_offset_hours = hours;
                }
                _ => warn!(value = %text, "Ignoring invalid TALLY_UTC_OFFSET_HOURS"),
            }
        }

        if let Some(path) = lookup("TALLY_DB_PATH") {
            if !path.trim().is_empty() {
                config.database_path = Some(PathBuf::from(path));
            }
        }

        if let Some(key) = non_empty(lookup("TALLY_STATE_KEY")) {
            config.state_key = key;
        }

        if let Some(key) = non_empty(lookup("TALLY_LOG_KEY")) {
            config.log_key = key;
        }

        config
    }

    /// Rates restored on reset and new meal.
    pub fn tax_defaults(&self) -> TaxDefaults {
        TaxDefaults {
            sst_rate: self.sst_rate,
            svc_rate: self.svc_rate,
        }
    }

    /// Formats an amount for display, e.g. "RM12.34".
    pub fn format_amount(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }

    pub fn utc_offset(&self) -> FixedOffset {
        clock::utc_offset_or_utc(self.utc_offset_hours)
    }

    pub fn persistence_keys(&self) -> PersistenceKeys {
        PersistenceKeys::new(self.state_key.clone(), self.log_key.clone())
    }

    /// Determines the database file path.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.tally.tally/tally.db`
    /// - **Windows**: `%APPDATA%\tally\tally\data\tally.db`
    /// - **Linux**: `~/.local/share/tally/tally.db`
    ///
    /// The data directory is created if missing. `TALLY_DB_PATH` is used
    /// as given.
    pub fn resolve_database_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let proj_dirs = ProjectDirs::from("com", "tally", "tally")
            .ok_or_else(|| AppError::internal("Could not determine app data directory"))?;

        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir).map_err(|e| {
            AppError::internal(format!("Could not create {}: {}", data_dir.display(), e))
        })?;

        Ok(data_dir.join(DATABASE_FILE))
    }
}

fn rate_override(var: &str, text: &str, kind: TaxKind) -> Option<TaxRate> {
    let rate = match parse_percentage(text) {
        Ok(pct) if pct > 0.0 => TaxRate::from_percentage(pct),
        _ => {
            warn!(var, value = %text, "Ignoring invalid rate");
            return None;
        }
    };

    match validate_tax_rate_bps(kind, rate.bps()) {
        Ok(()) => Some(rate),
        Err(e) => {
            warn!(var, error = %e, "Ignoring invalid rate");
            None
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
