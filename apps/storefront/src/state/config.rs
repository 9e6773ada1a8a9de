//! # Configuration State
//!
//! Stores the storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TECHSTORE_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};
use techstore_core::{Money, DEFAULT_MAX_PRICE_DOLLARS};
use tracing::warn;

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name shown in the header.
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Upper end of the price-range slider, in whole dollars.
    /// Also the default price filter when none is given.
    pub max_price_dollars: i64,
}

impl Default for ConfigState {
    /// Returns defaults suitable for development.
    ///
    /// ## Default Values
    /// - Store: "TechStore"
    /// - Currency: USD ($), 2 decimals
    /// - Price slider: $0 to $2000
    fn default() -> Self {
        ConfigState {
            store_name: "TechStore".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            max_price_dollars: DEFAULT_MAX_PRICE_DOLLARS,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `TECHSTORE_STORE_NAME`: Override store name
    /// - `TECHSTORE_CURRENCY_SYMBOL`: Override currency symbol
    /// - `TECHSTORE_MAX_PRICE`: Override the price slider ceiling (whole dollars)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Unparseable values are
    /// logged and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup("TECHSTORE_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(symbol) = lookup("TECHSTORE_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(raw) = lookup("TECHSTORE_MAX_PRICE") {
            match raw.trim().parse::<i64>() {
                Ok(dollars) if dollars >= 0 => config.max_price_dollars = dollars,
                _ => warn!(value = %raw, "ignoring invalid TECHSTORE_MAX_PRICE"),
            }
        }

        config
    }

    /// The price-range ceiling as money.
    pub fn max_price(&self) -> Money {
        Money::from_dollars(self.max_price_dollars)
    }

    /// Formats an amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use techstore_core::Money;
    /// use techstore_storefront::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        // Money is always held in cents; fewer display decimals truncate.
        let shown_decimals = u32::from(self.currency_decimals.min(2));
        let divisor = 10_i64.pow(shown_decimals);
        let scaled = cents / 10_i64.pow(2 - shown_decimals);
        let whole = scaled / divisor;
        let frac = (scaled % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if shown_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = shown_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_format_currency_positive() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_dollars(1)), "$1.00");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
    }

    #[test]
    fn test_format_currency_whole_units() {
        let config = ConfigState {
            currency_decimals: 0,
            ..ConfigState::default()
        };
        assert_eq!(config.format_currency(Money::from_dollars(999)), "$999");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ConfigState::from_lookup(lookup_from(&[
            ("TECHSTORE_STORE_NAME", "Gadget Hut"),
            ("TECHSTORE_CURRENCY_SYMBOL", "€"),
            ("TECHSTORE_MAX_PRICE", "1500"),
        ]));
        assert_eq!(config.store_name, "Gadget Hut");
        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.max_price(), Money::from_dollars(1500));
    }

    #[test]
    fn test_from_lookup_keeps_default_on_bad_price() {
        for raw in ["lots", "-5"] {
            let config = ConfigState::from_lookup(lookup_from(&[("TECHSTORE_MAX_PRICE", raw)]));
            assert_eq!(config.max_price_dollars, DEFAULT_MAX_PRICE_DOLLARS);
        }
    }
}
