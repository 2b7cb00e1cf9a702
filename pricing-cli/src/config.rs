//! Configuration loading from environment.

use std::env;

use pricing_types::{CurrencyCode, FallbackRates};
use rust_decimal::Decimal;

/// Application configuration.
pub struct Config {
    /// Rates used by `--missing-rate fallback`
    pub fallback_rates: FallbackRates,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// `LANDED_COST_FALLBACK_<CODE>` (e.g. `LANDED_COST_FALLBACK_EUR=146.2`)
    /// overrides the built-in fallback rate for that currency.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut fallback_rates = FallbackRates::builtin();

        for currency in CurrencyCode::all().iter().filter(|c| !c.is_local()) {
            let key = format!("LANDED_COST_FALLBACK_{}", currency.code());
            if let Ok(raw) = env::var(&key) {
                let rate: Decimal = raw
                    .trim()
                    .parse()
                    .map_err(|e| anyhow::anyhow!("{} is not a decimal rate: {}", key, e))?;
                fallback_rates = fallback_rates.with_rate(*currency, rate)?;
            }
        }

        Ok(Self { fallback_rates })
    }
}
