//! Landed-cost comparison and ranking of supplier offers.
//!
//! The comparator is a pure function of its inputs: offers, the active rate
//! table and the cost parameters. Offers it cannot price (no exchange rate
//! under [`MissingRatePolicy::Reject`], negative amounts) are reported in
//! [`Comparison::unpriced`] instead of failing the whole run.

use exchange_rates::{MissingRatePolicy, RateTable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::landed_cost::{LandedCost, RankedOffer, UnpricedOffer, UnpricedReason};
use super::offer::SupplierOffer;
use super::params::CostParameters;

/// Result of comparing the offers of one RFQ.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Sorted by final price, cheapest first
    pub ranked: Vec<RankedOffer>,
    pub unpriced: Vec<UnpricedOffer>,
}

impl Comparison {
    /// The cheapest offer, if any was priced.
    pub fn best(&self) -> Option<&RankedOffer> {
        self.ranked.first()
    }

    /// How much the best offer saves over the runner-up.
    pub fn savings_vs_second(&self) -> Option<Decimal> {
        match self.ranked.as_slice() {
            [best, second, ..] => Some(second.final_price() - best.final_price()),
            _ => None,
        }
    }

    /// The `n` cheapest offers.
    pub fn shortlist(&self, n: usize) -> &[RankedOffer] {
        &self.ranked[..n.min(self.ranked.len())]
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// Prices and ranks supplier offers.
#[derive(Debug, Clone, Default)]
pub struct PriceComparator {
    missing_rate: MissingRatePolicy,
}

impl PriceComparator {
    pub fn new(missing_rate: MissingRatePolicy) -> Self {
        Self { missing_rate }
    }

    pub fn missing_rate_policy(&self) -> &MissingRatePolicy {
        &self.missing_rate
    }

    /// Landed cost of a single offer.
    pub fn price(
        &self,
        offer: &SupplierOffer,
        rates: &RateTable,
        params: &CostParameters,
    ) -> Result<LandedCost, UnpricedReason> {
        offer
            .validate()
            .map_err(|e| UnpricedReason::InvalidOffer(e.to_string()))?;
        let rate = rates.resolve(offer.currency, &self.missing_rate)?;
        LandedCost::compute(offer, rate, params)
    }

    /// Prices every offer and ranks them by final price.
    ///
    /// Offers with equal final prices keep their input order.
    pub fn compare(
        &self,
        offers: &[SupplierOffer],
        rates: &RateTable,
        params: &CostParameters,
    ) -> Comparison {
        let mut priced = Vec::with_capacity(offers.len());
        let mut unpriced = Vec::new();

        for offer in offers {
            match self.price(offer, rates, params) {
                Ok(cost) => {
                    tracing::debug!(
                        offer_id = %offer.id,
                        currency = %offer.currency,
                        final_price = %cost.final_price,
                        "priced offer"
                    );
                    priced.push((offer, cost));
                }
                Err(reason) => {
                    tracing::warn!(offer_id = %offer.id, %reason, "offer left out of comparison");
                    unpriced.push(UnpricedOffer {
                        offer_id: offer.id.clone(),
                        supplier_name: offer.supplier_name.clone(),
                        currency: offer.currency,
                        reason,
                    });
                }
            }
        }

        // sort_by is stable: ties keep input order
        priced.sort_by(|a, b| a.1.final_price.cmp(&b.1.final_price));

        let ranked = priced
            .into_iter()
            .enumerate()
            .map(|(idx, (offer, cost))| RankedOffer::new(idx + 1, offer, cost))
            .collect();

        Comparison { ranked, unpriced }
    }
}

/// Compares offers with the default comparator, which refuses to guess
/// missing exchange rates.
pub fn compare_offers(
    offers: &[SupplierOffer],
    rates: &RateTable,
    params: &CostParameters,
) -> Comparison {
    PriceComparator::default().compare(offers, rates, params)
}
