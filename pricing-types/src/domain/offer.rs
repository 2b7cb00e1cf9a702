//! Supplier offer domain model.

use chrono::NaiveDate;
use exchange_rates::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a request for quotation, e.g. `RFQ-2024-001`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RfqId(String);

impl RfqId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RfqId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RfqId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifier of a supplier offer, e.g. `OFF-001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferId(String);

impl OfferId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OfferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OfferId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Where an offer stands in the purchasing workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OfferStatus {
    #[default]
    Pending,
    Received,
    UnderReview,
    Negotiating,
    Accepted,
    Rejected,
}

impl std::fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OfferStatus::Pending => "pending",
            OfferStatus::Received => "received",
            OfferStatus::UnderReview => "under-review",
            OfferStatus::Negotiating => "negotiating",
            OfferStatus::Accepted => "accepted",
            OfferStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerType {
    #[serde(rename = "20ft")]
    TwentyFoot,
    #[serde(rename = "40ft")]
    FortyFoot,
}

/// Shipping containers quoted with the offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerInfo {
    pub number_of_containers: u32,
    pub container_type: ContainerType,
    /// Total weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_weight: Option<Decimal>,
}

/// One product line on a supplier offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferItem {
    pub product_id: String,
    pub product_name: String,
    /// Quantity in the product's unit (tons, kg, ...)
    pub quantity: Decimal,
    /// Ex-works unit price, informational only
    #[serde(default)]
    pub exw_price: Decimal,
    /// Unit price delivered to the destination port (CFR)
    pub cfr_price: Decimal,
    #[serde(default)]
    pub packaging: String,
    #[serde(default)]
    pub origin_country: String,
}

impl OfferItem {
    /// `cfr_price × quantity`, or `None` on overflow.
    pub fn line_total(&self) -> Option<Decimal> {
        self.cfr_price.checked_mul(self.quantity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NegotiationStatus {
    Pending,
    Accepted,
    Rejected,
    CounterOffered,
}

/// One round of price negotiation with the supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationRound {
    pub id: String,
    pub round: u32,
    pub requested_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_response: Option<Decimal>,
    pub status: NegotiationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: NaiveDate,
}

/// A supplier's priced response to one RFQ.
///
/// Prices are in `currency`; `freight_price` covers the whole shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierOffer {
    pub id: OfferId,
    pub rfq_id: RfqId,
    pub supplier_id: String,
    pub supplier_name: String,
    pub currency: CurrencyCode,
    pub items: Vec<OfferItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_info: Option<ContainerInfo>,
    pub freight_price: Decimal,
    pub valid_until: NaiveDate,
    #[serde(default)]
    pub payment_terms: String,
    #[serde(default)]
    pub delivery_terms: String,
    #[serde(default)]
    pub status: OfferStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub negotiation_rounds: Vec<NegotiationRound>,
}

impl SupplierOffer {
    /// Sum of all item quantities.
    pub fn total_quantity(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Checks that every monetary field and quantity is non-negative.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.freight_price < Decimal::ZERO {
            return Err(DomainError::NegativeAmount {
                field: "freight_price".into(),
                value: self.freight_price,
            });
        }

        for (idx, item) in self.items.iter().enumerate() {
            let fields = [
                ("quantity", item.quantity),
                ("cfr_price", item.cfr_price),
                ("exw_price", item.exw_price),
            ];
            for (name, value) in fields {
                if value < Decimal::ZERO {
                    return Err(DomainError::NegativeAmount {
                        field: format!("items[{}].{}", idx, name),
                        value,
                    });
                }
            }
        }

        Ok(())
    }

    /// Whether the offer is still open on `date` (inclusive).
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        date <= self.valid_until
    }
}
