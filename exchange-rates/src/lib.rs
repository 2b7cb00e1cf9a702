//! Currency codes and local-currency exchange rate tables.
//!
//! Supplier offers are quoted in a foreign currency (EUR, USD) while every
//! landed cost is expressed in the buyer's settlement currency, the Algerian
//! Dinar (DZD). This crate holds:
//!
//! - [`CurrencyCode`], generated by the [`define_currencies!`] macro
//! - [`ExchangeRate`], one dated "1 unit of X = rate DZD" quote
//! - [`RateTable`], a validated set with exactly one active rate per currency
//! - [`MissingRatePolicy`], what to do when an offer's currency has no rate
//!
//! # Adding a New Currency
//! Add a line to the `define_currencies!` invocation:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     GBP => ("GBP", "£", "Pound sterling", 17000, 2),
//! }
//! ```
//!
//! # Example
//! ```
//! use chrono::NaiveDate;
//! use exchange_rates::{CurrencyCode, ExchangeRate, MissingRatePolicy, RateTable};
//! use rust_decimal::Decimal;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//! let table = RateTable::new(vec![
//!     ExchangeRate::new(CurrencyCode::EUR, Decimal::new(14550, 2), day),
//! ])
//! .unwrap();
//!
//! let eur = table.resolve(CurrencyCode::EUR, &MissingRatePolicy::Reject).unwrap();
//! assert_eq!(eur.to_local(Decimal::from(100)), Decimal::new(1455000, 2));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors raised while building or querying a rate table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateError {
    #[error("Exchange rate for {currency} must be positive, got {rate}")]
    NonPositiveRate { currency: CurrencyCode, rate: Decimal },

    #[error("More than one active exchange rate for {0}")]
    DuplicateRate(CurrencyCode),

    #[error("No exchange rate configured for {0}")]
    MissingRate(CurrencyCode),
}

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines all currencies and the CurrencyCode enum
// ─────────────────────────────────────────────────────────────────────────────

/// Macro to define currencies with their metadata and built-in local rate.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     Name => ("CODE", "SYMBOL", "display name", rate_mantissa, rate_scale),
/// }
/// ```
///
/// The built-in rate is `rate_mantissa × 10^-rate_scale` units of the local
/// currency per unit of `Name`. It is only ever used through an explicit
/// [`MissingRatePolicy::Fallback`].
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $symbol:literal, $display:literal, $mantissa:expr, $scale:expr)
        ),* $(,)?
    ) => {
        /// Currencies an offer may be quoted in.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum CurrencyCode {
            $($name),*
        }

        impl CurrencyCode {
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $code),*
                }
            }

            pub fn symbol(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $symbol),*
                }
            }

            pub fn display_name(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $display),*
                }
            }

            /// Built-in rate into the local currency.
            pub fn default_local_rate(&self) -> rust_decimal::Decimal {
                match self {
                    $(CurrencyCode::$name => rust_decimal::Decimal::new($mantissa, $scale)),*
                }
            }

            pub fn all() -> &'static [CurrencyCode] {
                &[$(CurrencyCode::$name),*]
            }
        }

        impl std::fmt::Display for CurrencyCode {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.code())
            }
        }

        impl std::str::FromStr for CurrencyCode {
            type Err = String;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($code => Ok(CurrencyCode::$name),)*
                    _ => Err(format!("Unknown currency: {}", s)),
                }
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS - Add new currencies here!
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    EUR => ("EUR", "€", "Euro", 14550, 2),
    USD => ("USD", "$", "US dollar", 13420, 2),
    DZD => ("DZD", "DA", "Algerian dinar", 1, 0),
}

impl CurrencyCode {
    /// The buyer's settlement currency. Every landed cost is expressed in it.
    pub const LOCAL: CurrencyCode = CurrencyCode::DZD;

    pub fn is_local(&self) -> bool {
        *self == Self::LOCAL
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Exchange Rates
// ─────────────────────────────────────────────────────────────────────────────

/// One unit of `currency` is worth `rate` units of the local currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub currency: CurrencyCode,
    pub rate: Decimal,
    pub last_updated: NaiveDate,
}

impl ExchangeRate {
    pub fn new(currency: CurrencyCode, rate: Decimal, last_updated: NaiveDate) -> Self {
        Self {
            currency,
            rate,
            last_updated,
        }
    }
}

/// Where a resolved rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// The currency is the local currency; the rate is 1.
    Local,
    /// Taken from the active rate table.
    Table,
    /// The table had no entry and the fallback policy supplied one.
    Fallback,
}

impl fmt::Display for RateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateSource::Local => write!(f, "local"),
            RateSource::Table => write!(f, "table"),
            RateSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// A rate ready to apply to an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRate {
    pub currency: CurrencyCode,
    pub rate: Decimal,
    pub source: RateSource,
}

impl ResolvedRate {
    /// Converts an amount in `self.currency` into the local currency.
    pub fn to_local(&self, amount: Decimal) -> Decimal {
        amount * self.rate
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Missing Rate Policy
// ─────────────────────────────────────────────────────────────────────────────

/// Per-currency rates used only when the active table has no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackRates {
    rates: BTreeMap<CurrencyCode, Decimal>,
}

impl FallbackRates {
    /// An empty set; every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in rates from [`CurrencyCode::default_local_rate`].
    pub fn builtin() -> Self {
        let rates = CurrencyCode::all()
            .iter()
            .filter(|c| !c.is_local())
            .map(|&c| (c, c.default_local_rate()))
            .collect();
        Self { rates }
    }

    /// Sets the fallback for one currency, replacing any previous value.
    pub fn with_rate(mut self, currency: CurrencyCode, rate: Decimal) -> Result<Self, RateError> {
        if rate <= Decimal::ZERO {
            return Err(RateError::NonPositiveRate { currency, rate });
        }
        self.rates.insert(currency, rate);
        Ok(self)
    }

    pub fn get(&self, currency: CurrencyCode) -> Option<Decimal> {
        self.rates.get(&currency).copied()
    }
}

/// What to do when an offer's currency has no active rate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MissingRatePolicy {
    /// Refuse to price the offer. The comparison reports it instead.
    #[default]
    Reject,
    /// Price the offer with a configured rate and flag the result.
    Fallback(FallbackRates),
}

impl MissingRatePolicy {
    pub fn name(&self) -> &'static str {
        match self {
            MissingRatePolicy::Reject => "reject",
            MissingRatePolicy::Fallback(_) => "fallback",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rate Table
// ─────────────────────────────────────────────────────────────────────────────

/// Active exchange rates, at most one per currency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateTable {
    rates: BTreeMap<CurrencyCode, ExchangeRate>,
}

impl RateTable {
    /// Builds a table, rejecting non-positive and duplicate rates.
    pub fn new(rates: impl IntoIterator<Item = ExchangeRate>) -> Result<Self, RateError> {
        let mut table = BTreeMap::new();
        for rate in rates {
            if rate.rate <= Decimal::ZERO {
                return Err(RateError::NonPositiveRate {
                    currency: rate.currency,
                    rate: rate.rate,
                });
            }
            let currency = rate.currency;
            if table.insert(currency, rate).is_some() {
                return Err(RateError::DuplicateRate(currency));
            }
        }
        Ok(Self { rates: table })
    }

    pub fn get(&self, currency: CurrencyCode) -> Option<&ExchangeRate> {
        self.rates.get(&currency)
    }

    /// The rate into the local currency, if one is known. The local currency
    /// always converts at 1.
    pub fn rate(&self, currency: CurrencyCode) -> Option<Decimal> {
        if currency.is_local() {
            return Some(Decimal::ONE);
        }
        self.rates.get(&currency).map(|r| r.rate)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExchangeRate> {
        self.rates.values()
    }

    /// Owned copy of the active rates, ordered by currency.
    pub fn rates(&self) -> Vec<ExchangeRate> {
        self.rates.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Looks up the rate for `currency`, applying `policy` on a miss.
    pub fn resolve(
        &self,
        currency: CurrencyCode,
        policy: &MissingRatePolicy,
    ) -> Result<ResolvedRate, RateError> {
        if currency.is_local() {
            return Ok(ResolvedRate {
                currency,
                rate: Decimal::ONE,
                source: RateSource::Local,
            });
        }

        if let Some(entry) = self.rates.get(&currency) {
            return Ok(ResolvedRate {
                currency,
                rate: entry.rate,
                source: RateSource::Table,
            });
        }

        match policy {
            MissingRatePolicy::Reject => Err(RateError::MissingRate(currency)),
            MissingRatePolicy::Fallback(fallback) => {
                let rate = fallback
                    .get(currency)
                    .ok_or(RateError::MissingRate(currency))?;
                tracing::warn!(%currency, %rate, "no active exchange rate, using fallback");
                Ok(ResolvedRate {
                    currency,
                    rate,
                    source: RateSource::Fallback,
                })
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn eur_table() -> RateTable {
        RateTable::new(vec![ExchangeRate::new(CurrencyCode::EUR, dec!(145.50), day())]).unwrap()
    }

    #[test]
    fn test_currency_code_parse() {
        assert_eq!("EUR".parse::<CurrencyCode>().unwrap(), CurrencyCode::EUR);
        assert_eq!(" usd ".parse::<CurrencyCode>().unwrap(), CurrencyCode::USD);
        assert!("JPY".parse::<CurrencyCode>().is_err());
    }

    #[test]
    fn test_currency_code_display_and_serde() {
        assert_eq!(CurrencyCode::DZD.to_string(), "DZD");
        assert_eq!(serde_json::to_string(&CurrencyCode::EUR).unwrap(), "\"EUR\"");
        let parsed: CurrencyCode = serde_json::from_str("\"USD\"").unwrap();
        assert_eq!(parsed, CurrencyCode::USD);
    }

    #[test]
    fn test_builtin_rates() {
        assert_eq!(CurrencyCode::EUR.default_local_rate(), dec!(145.50));
        assert_eq!(CurrencyCode::USD.default_local_rate(), dec!(134.20));
        assert_eq!(CurrencyCode::DZD.default_local_rate(), Decimal::ONE);
        assert_eq!(CurrencyCode::all().len(), 3);
    }

    #[test]
    fn test_table_rejects_non_positive_rate() {
        let result = RateTable::new(vec![ExchangeRate::new(CurrencyCode::USD, dec!(0), day())]);
        assert!(matches!(result, Err(RateError::NonPositiveRate { .. })));
    }

    #[test]
    fn test_table_rejects_duplicate_currency() {
        let result = RateTable::new(vec![
            ExchangeRate::new(CurrencyCode::EUR, dec!(145.50), day()),
            ExchangeRate::new(CurrencyCode::EUR, dec!(146.00), day()),
        ]);
        assert_eq!(result, Err(RateError::DuplicateRate(CurrencyCode::EUR)));
    }

    #[test]
    fn test_local_currency_always_resolves() {
        let table = RateTable::default();
        let resolved = table
            .resolve(CurrencyCode::DZD, &MissingRatePolicy::Reject)
            .unwrap();
        assert_eq!(resolved.rate, Decimal::ONE);
        assert_eq!(resolved.source, RateSource::Local);
        assert_eq!(table.rate(CurrencyCode::DZD), Some(Decimal::ONE));
    }

    #[test]
    fn test_resolve_from_table() {
        let resolved = eur_table()
            .resolve(CurrencyCode::EUR, &MissingRatePolicy::Reject)
            .unwrap();
        assert_eq!(resolved.source, RateSource::Table);
        assert_eq!(resolved.to_local(dec!(155000)), dec!(22552500));
    }

    #[test]
    fn test_missing_rate_rejected() {
        let result = eur_table().resolve(CurrencyCode::USD, &MissingRatePolicy::Reject);
        assert_eq!(result, Err(RateError::MissingRate(CurrencyCode::USD)));
    }

    #[test]
    fn test_missing_rate_fallback() {
        let policy = MissingRatePolicy::Fallback(FallbackRates::builtin());
        let resolved = eur_table().resolve(CurrencyCode::USD, &policy).unwrap();
        assert_eq!(resolved.rate, dec!(134.20));
        assert_eq!(resolved.source, RateSource::Fallback);
    }

    #[test]
    fn test_fallback_without_entry_still_fails() {
        let policy = MissingRatePolicy::Fallback(FallbackRates::new());
        let result = eur_table().resolve(CurrencyCode::USD, &policy);
        assert_eq!(result, Err(RateError::MissingRate(CurrencyCode::USD)));
    }

    #[test]
    fn test_fallback_rejects_non_positive_rate() {
        let result = FallbackRates::new().with_rate(CurrencyCode::USD, dec!(-1));
        assert!(matches!(result, Err(RateError::NonPositiveRate { .. })));
    }
}
