//! Data Transfer Objects for the data boundaries.

use chrono::{DateTime, Utc};
use exchange_rates::{ExchangeRate, MissingRatePolicy, RateTable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    Comparison, CostParameters, OfferId, RankedOffer, RfqId, SupplierOffer, UnpricedOffer,
};

// ─────────────────────────────────────────────────────────────────────────────
// Snapshot DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Offers and exchange rates as exported from the purchasing desk.
///
/// Offers may belong to several RFQs; the repository groups them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RfqSnapshot {
    #[serde(default)]
    pub exchange_rates: Vec<ExchangeRate>,
    #[serde(default)]
    pub offers: Vec<SupplierOffer>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Report DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Record of one comparison run: inputs that shaped it and its outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub rfq_id: RfqId,
    /// Active rates at evaluation time
    pub exchange_rates: Vec<ExchangeRate>,
    pub parameters: CostParameters,
    /// `reject` or `fallback`
    pub missing_rate_policy: String,
    pub offers: Vec<RankedOffer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unpriced: Vec<UnpricedOffer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_offer_id: Option<OfferId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_vs_second: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl ComparisonReport {
    pub fn new(
        rfq_id: RfqId,
        rates: &RateTable,
        parameters: CostParameters,
        policy: &MissingRatePolicy,
        comparison: Comparison,
    ) -> Self {
        let best_offer_id = comparison.best().map(|b| b.offer_id.clone());
        let savings_vs_second = comparison.savings_vs_second();

        Self {
            rfq_id,
            exchange_rates: rates.rates(),
            parameters,
            missing_rate_policy: policy.name().to_string(),
            offers: comparison.ranked,
            unpriced: comparison.unpriced,
            best_offer_id,
            savings_vs_second,
            created_at: Utc::now(),
        }
    }

    pub fn best(&self) -> Option<&RankedOffer> {
        self.offers.first()
    }
}
