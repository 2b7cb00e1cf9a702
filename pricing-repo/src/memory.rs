//! In-memory repository adapter.

use std::path::Path;

use async_trait::async_trait;
use dashmap::DashMap;

use pricing_types::{
    CurrencyCode, DomainError, ExchangeRate, OfferRepository, RateTable, RepoError, RfqId,
    RfqSnapshot, SupplierOffer,
};

// ─────────────────────────────────────────────────────────────────────────────
// In-Memory Repository
// ─────────────────────────────────────────────────────────────────────────────

/// Offers grouped by RFQ plus the active exchange rates.
///
/// Offers keep their insertion order within an RFQ.
#[derive(Debug, Default)]
pub struct InMemoryRepo {
    offers: DashMap<RfqId, Vec<SupplierOffer>>,
    rates: DashMap<CurrencyCode, ExchangeRate>,
}

impl InMemoryRepo {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository from a snapshot.
    ///
    /// Rates go through [`RateTable`] validation, so a snapshot with a
    /// non-positive or duplicated rate is rejected as a whole.
    pub fn from_snapshot(snapshot: RfqSnapshot) -> Result<Self, RepoError> {
        let table = RateTable::new(snapshot.exchange_rates).map_err(DomainError::from)?;

        let repo = Self::new();
        for rate in table.rates() {
            repo.rates.insert(rate.currency, rate);
        }
        for offer in snapshot.offers {
            repo.insert_offer(offer)?;
        }

        tracing::debug!(
            rfqs = repo.offers.len(),
            rates = repo.rates.len(),
            "loaded offer snapshot"
        );
        Ok(repo)
    }

    /// Reads a JSON snapshot file.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, RepoError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RepoError::Io(format!("{}: {}", path.display(), e)))?;
        let snapshot: RfqSnapshot = serde_json::from_str(&raw)
            .map_err(|e| RepoError::Parse(format!("{}: {}", path.display(), e)))?;
        Self::from_snapshot(snapshot)
    }

    /// Adds an offer to its RFQ. Offer ids are unique within an RFQ.
    pub fn insert_offer(&self, offer: SupplierOffer) -> Result<(), RepoError> {
        let mut offers = self.offers.entry(offer.rfq_id.clone()).or_default();
        if offers.iter().any(|o| o.id == offer.id) {
            return Err(RepoError::Conflict(format!(
                "Offer {} already exists for {}",
                offer.id, offer.rfq_id
            )));
        }
        offers.push(offer);
        Ok(())
    }

    /// Makes `rate` the active rate for its currency, returning the one it
    /// replaced.
    pub fn upsert_rate(&self, rate: ExchangeRate) -> Result<Option<ExchangeRate>, RepoError> {
        // Reuse the table's checks for a single rate.
        RateTable::new([rate.clone()]).map_err(DomainError::from)?;
        Ok(self.rates.insert(rate.currency, rate))
    }

    /// Drops the active rate for `currency`.
    pub fn remove_rate(&self, currency: CurrencyCode) -> Option<ExchangeRate> {
        self.rates.remove(&currency).map(|(_, rate)| rate)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// OfferRepository
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl OfferRepository for InMemoryRepo {
    async fn list_rfqs(&self) -> Result<Vec<RfqId>, RepoError> {
        let mut ids: Vec<RfqId> = self
            .offers
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| entry.key().clone())
            .collect();
        ids.sort();
        Ok(ids)
    }

    async fn offers_for_rfq(&self, rfq_id: &RfqId) -> Result<Vec<SupplierOffer>, RepoError> {
        Ok(self
            .offers
            .get(rfq_id)
            .map(|offers| offers.value().clone())
            .unwrap_or_default())
    }

    async fn exchange_rates(&self) -> Result<Vec<ExchangeRate>, RepoError> {
        let mut rates: Vec<ExchangeRate> =
            self.rates.iter().map(|entry| entry.value().clone()).collect();
        rates.sort_by_key(|r| r.currency);
        Ok(rates)
    }
}
