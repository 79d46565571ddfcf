//! # Configuration State
//!
//! Shop settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CELLSHOP_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::str::FromStr;

use cellshop_core::invoice::BillProfile;
use cellshop_core::validation::validate_tax_rate;
use cellshop_core::{BillKind, Money, Percent, ValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable is set but cannot be parsed.
    #[error("Invalid value for {var}: '{value}'")]
    InvalidValue { var: String, value: String },

    /// A GST rate parses but is not a usable rate.
    #[error("Invalid value for {var}: {source}")]
    InvalidRate {
        var: String,
        #[source]
        source: ValidationError,
    },
}

/// Shop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Shop name (printed on bills)
    pub shop_name: String,

    /// Address lines (printed on bills)
    pub shop_address: Vec<String>,

    /// GST registration number, if registered
    pub gstin: Option<String>,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// GST rate used when an item row leaves the rate blank
    pub default_gst: Percent,

    /// GST rate on repair labour
    pub labour_gst: Percent,

    /// Stock level at or below which an item is reported as low
    pub low_stock_threshold: i64,
}

impl Default for ConfigState {
    /// Development defaults: 18% GST on goods and labour, alert at 2 units.
    fn default() -> Self {
        ConfigState {
            shop_name: "Cellshop Mobiles & Repairs".to_string(),
            shop_address: vec!["Shop 4, Station Road".to_string()],
            gstin: None,
            currency_code: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            default_gst: Percent::from_bps(1800),
            labour_gst: Percent::from_bps(1800),
            low_stock_threshold: 2,
        }
    }
}

impl ConfigState {
    /// Loads configuration from the process environment.
    ///
    /// Unparsable values are logged and the default is kept.
    ///
    /// ## Environment Variables
    /// - `CELLSHOP_SHOP_NAME`
    /// - `CELLSHOP_GSTIN`
    /// - `CELLSHOP_CURRENCY_SYMBOL`
    /// - `CELLSHOP_DEFAULT_GST`: percent, e.g. "18"
    /// - `CELLSHOP_LABOUR_GST`: percent
    /// - `CELLSHOP_LOW_STOCK_THRESHOLD`: units
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok(), false).unwrap_or_else(|err| {
            warn!(error = %err, "Falling back to default configuration");
            ConfigState::default()
        })
    }

    /// Like [`ConfigState::from_env`] but reports the first bad value.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok(), true)
    }

    /// Builds configuration from any variable source.
    ///
    /// With `strict` unset, bad values are skipped instead of returned.
    pub fn from_lookup<F>(lookup: F, strict: bool) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(name) = lookup("CELLSHOP_SHOP_NAME") {
            config.shop_name = name;
        }

        if let Some(gstin) = lookup("CELLSHOP_GSTIN").filter(|g| !g.trim().is_empty()) {
            config.gstin = Some(gstin);
        }

        if let Some(symbol) = lookup("CELLSHOP_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(rate) = parse_rate(&lookup, "CELLSHOP_DEFAULT_GST", strict)? {
            config.default_gst = rate;
        }

        if let Some(rate) = parse_rate(&lookup, "CELLSHOP_LABOUR_GST", strict)? {
            config.labour_gst = rate;
        }

        if let Some(threshold) = parse_var::<i64, _>(&lookup, "CELLSHOP_LOW_STOCK_THRESHOLD", strict)? {
            config.low_stock_threshold = threshold;
        }

        Ok(config)
    }

    /// Formats an amount with the shop's currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use cellshop_core::Money;
    /// use cellshop_counter::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(21_240)), "₹212.40");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        if amount.is_negative() {
            format!("-{}{}", self.currency_symbol, amount.abs())
        } else {
            format!("{}{}", self.currency_symbol, amount)
        }
    }

    /// The engine configuration for one billing screen.
    pub fn profile_for(&self, kind: BillKind) -> BillProfile {
        BillProfile::for_kind(kind).default_tax_rate(self.default_gst)
    }
}

/// Parses a GST percentage and checks it lies in `0..=100`.
fn parse_rate<F>(lookup: &F, var: &str, strict: bool) -> Result<Option<Percent>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(rate) = parse_var::<Decimal, _>(lookup, var, strict)? else {
        return Ok(None);
    };

    let rate = Percent::new(rate);
    match validate_tax_rate(rate) {
        Ok(()) => Ok(Some(rate.round_to_places())),
        Err(source) if strict => Err(ConfigError::InvalidRate {
            var: var.to_string(),
            source,
        }),
        Err(err) => {
            warn!(var, error = %err, "Ignoring out-of-range GST rate");
            Ok(None)
        }
    }
}

fn parse_var<T, F>(lookup: &F, var: &str, strict: bool) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };

    match raw.trim().parse::<T>() {
        Ok(value) => Ok(Some(value)),
        Err(_) if strict => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            value: raw,
        }),
        Err(_) => {
            warn!(var, value = %raw, "Ignoring unparsable configuration value");
            Ok(None)
        }
    }
}
