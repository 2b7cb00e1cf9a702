//! Landed-cost breakdown of a single offer.

use exchange_rates::{CurrencyCode, RateError, RateSource, ResolvedRate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::offer::{OfferId, OfferStatus, SupplierOffer};
use super::params::CostParameters;

/// Every step from the supplier's price to the final local-currency cost.
///
/// Amounts after `original_price` are in the local currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandedCost {
    /// Items plus freight, in the offer currency
    pub original_price: Decimal,
    pub currency: CurrencyCode,
    pub rate: Decimal,
    pub rate_source: RateSource,
    pub local_price: Decimal,
    pub with_customs: Decimal,
    pub with_tax: Decimal,
    pub final_price: Decimal,
    pub total_quantity: Decimal,
    /// `None` when the offer has no quantity to spread the cost over
    pub price_per_unit: Option<Decimal>,
}

impl LandedCost {
    /// Computes the breakdown for `offer` at `rate` under `params`.
    pub fn compute(
        offer: &SupplierOffer,
        rate: ResolvedRate,
        params: &CostParameters,
    ) -> Result<Self, UnpricedReason> {
        let overflow = || UnpricedReason::ArithmeticOverflow;

        let mut original_price = Decimal::ZERO;
        let mut total_quantity = Decimal::ZERO;
        for item in &offer.items {
            let line = item.line_total().ok_or_else(overflow)?;
            original_price = original_price.checked_add(line).ok_or_else(overflow)?;
            total_quantity = total_quantity
                .checked_add(item.quantity)
                .ok_or_else(overflow)?;
        }
        let original_price = original_price
            .checked_add(offer.freight_price)
            .ok_or_else(overflow)?;

        let local_price = original_price.checked_mul(rate.rate).ok_or_else(overflow)?;
        let with_customs = local_price
            .checked_mul(params.customs_factor())
            .ok_or_else(overflow)?;
        let with_tax = with_customs
            .checked_mul(params.tax_factor())
            .ok_or_else(overflow)?;
        let final_price = with_tax
            .checked_add(params.additional_fee_fixed())
            .ok_or_else(overflow)?;

        let price_per_unit = if total_quantity.is_zero() {
            None
        } else {
            Some(
                final_price
                    .checked_div(total_quantity)
                    .ok_or_else(overflow)?,
            )
        };

        Ok(Self {
            original_price,
            currency: offer.currency,
            rate: rate.rate,
            rate_source: rate.source,
            local_price,
            with_customs,
            with_tax,
            final_price,
            total_quantity,
            price_per_unit,
        })
    }

    /// Duty added on top of the converted price.
    pub fn customs_amount(&self) -> Decimal {
        self.with_customs - self.local_price
    }

    /// VAT added on top of the duty-inclusive price.
    pub fn tax_amount(&self) -> Decimal {
        self.with_tax - self.with_customs
    }

    pub fn additional_fee(&self) -> Decimal {
        self.final_price - self.with_tax
    }

    pub fn used_fallback_rate(&self) -> bool {
        self.rate_source == RateSource::Fallback
    }
}

/// An offer with its landed cost and position in the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedOffer {
    /// 1 = cheapest
    pub rank: usize,
    pub offer_id: OfferId,
    pub supplier_id: String,
    pub supplier_name: String,
    pub status: OfferStatus,
    pub negotiation_rounds: usize,
    pub cost: LandedCost,
}

impl RankedOffer {
    pub fn new(rank: usize, offer: &SupplierOffer, cost: LandedCost) -> Self {
        Self {
            rank,
            offer_id: offer.id.clone(),
            supplier_id: offer.supplier_id.clone(),
            supplier_name: offer.supplier_name.clone(),
            status: offer.status,
            negotiation_rounds: offer.negotiation_rounds.len(),
            cost,
        }
    }

    pub fn final_price(&self) -> Decimal {
        self.cost.final_price
    }

    /// Top three offers may be selected for an order.
    pub fn is_shortlisted(&self) -> bool {
        self.rank <= 3
    }
}

/// Why an offer was left out of the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum UnpricedReason {
    #[error("no exchange rate for {0}")]
    MissingExchangeRate(CurrencyCode),

    #[error("invalid offer: {0}")]
    InvalidOffer(String),

    #[error("amount out of range")]
    ArithmeticOverflow,
}

impl From<RateError> for UnpricedReason {
    fn from(err: RateError) -> Self {
        match err {
            RateError::MissingRate(currency) => UnpricedReason::MissingExchangeRate(currency),
            other => UnpricedReason::InvalidOffer(other.to_string()),
        }
    }
}

/// An offer the comparison could not price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpricedOffer {
    pub offer_id: OfferId,
    pub supplier_name: String,
    pub currency: CurrencyCode,
    pub reason: UnpricedReason,
}
