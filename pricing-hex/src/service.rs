//! Comparison Application Service
//!
//! Loads offers and exchange rates through the repository port and hands
//! read-only snapshots to the comparator.
//! Contains NO infrastructure logic - pure business orchestration.

use pricing_types::{
    AppError, ComparisonReport, CostParameters, OfferRepository, PriceComparator, RateTable,
    RfqId,
};

/// Application service for offer comparisons.
///
/// Generic over `R: OfferRepository` - the adapter is injected at compile time.
pub struct ComparisonService<R: OfferRepository> {
    repo: R,
    comparator: PriceComparator,
}

impl<R: OfferRepository> ComparisonService<R> {
    /// Creates a new comparison service with the given repository.
    pub fn new(repo: R, comparator: PriceComparator) -> Self {
        Self { repo, comparator }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn comparator(&self) -> &PriceComparator {
        &self.comparator
    }

    /// Lists RFQs that have offers to compare.
    pub async fn list_rfqs(&self) -> Result<Vec<RfqId>, AppError> {
        self.repo.list_rfqs().await.map_err(Into::into)
    }

    /// Ranks the offers of `rfq_id` by landed cost.
    #[tracing::instrument(skip_all, fields(rfq_id = %rfq_id))]
    pub async fn compare_rfq(
        &self,
        rfq_id: &RfqId,
        params: &CostParameters,
    ) -> Result<ComparisonReport, AppError> {
        let offers = self.repo.offers_for_rfq(rfq_id).await?;
        if offers.is_empty() {
            return Err(AppError::NotFound(format!("No offers for {}", rfq_id)));
        }

        let rates = self.repo.exchange_rates().await?;
        let table = RateTable::new(rates)
            .map_err(|e| AppError::BadRequest(format!("Invalid exchange rates: {}", e)))?;

        let comparison = self.comparator.compare(&offers, &table, params);

        match comparison.best() {
            Some(best) => tracing::info!(
                offers = offers.len(),
                ranked = comparison.len(),
                unpriced = comparison.unpriced.len(),
                best_offer = %best.offer_id,
                final_price = %best.final_price(),
                "comparison complete"
            ),
            None => tracing::warn!(
                offers = offers.len(),
                unpriced = comparison.unpriced.len(),
                "no offer could be priced"
            ),
        }

        Ok(ComparisonReport::new(
            rfq_id.clone(),
            &table,
            *params,
            self.comparator.missing_rate_policy(),
            comparison,
        ))
    }
}
