//! Repository port trait.
//!
//! The only way the application reaches offers and exchange rates.
//! Adapters (in-memory, file-backed) implement this trait and hand out
//! owned snapshots, so a comparison never observes a concurrent update.

use exchange_rates::ExchangeRate;

use crate::domain::{RfqId, SupplierOffer};
use crate::error::RepoError;

/// Read access to offers and the active exchange rates.
#[async_trait::async_trait]
pub trait OfferRepository: Send + Sync + 'static {
    /// Lists the RFQs that have at least one offer.
    async fn list_rfqs(&self) -> Result<Vec<RfqId>, RepoError>;

    /// Offers submitted for `rfq_id`, in submission order.
    async fn offers_for_rfq(&self, rfq_id: &RfqId) -> Result<Vec<SupplierOffer>, RepoError>;

    /// The active exchange rates, one per currency.
    async fn exchange_rates(&self) -> Result<Vec<ExchangeRate>, RepoError>;
}
