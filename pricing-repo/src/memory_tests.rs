//! In-memory repository tests.

#[cfg(test)]
mod tests {
    use std::io::Write;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use pricing_types::{
        CurrencyCode, DomainError, ExchangeRate, OfferItem, OfferRepository, OfferStatus,
        RateError, RepoError, RfqId, RfqSnapshot, SupplierOffer,
    };

    use crate::{InMemoryRepo, build_repo};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn offer(id: &str, rfq: &str, cfr_price: Decimal) -> SupplierOffer {
        SupplierOffer {
            id: id.into(),
            rfq_id: rfq.into(),
            supplier_id: "1".into(),
            supplier_name: "ChemEurope GmbH".into(),
            currency: CurrencyCode::EUR,
            items: vec![OfferItem {
                product_id: "1".into(),
                product_name: "Titanium Dioxide".into(),
                quantity: dec!(50),
                exw_price: dec!(2800),
                cfr_price,
                packaging: "25kg bags on pallets".into(),
                origin_country: "Germany".into(),
            }],
            container_info: None,
            freight_price: dec!(7500),
            valid_until: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            payment_terms: "LC at sight".into(),
            delivery_terms: "CFR Algiers".into(),
            status: OfferStatus::Received,
            submitted_at: Some(day()),
            notes: None,
            negotiation_rounds: Vec::new(),
        }
    }

    fn snapshot() -> RfqSnapshot {
        RfqSnapshot {
            exchange_rates: vec![
                ExchangeRate::new(CurrencyCode::USD, dec!(134.20), day()),
                ExchangeRate::new(CurrencyCode::EUR, dec!(145.50), day()),
            ],
            offers: vec![
                offer("OFF-002", "RFQ-2024-002", dec!(1000)),
                offer("OFF-001", "RFQ-2024-001", dec!(2950)),
                offer("OFF-003", "RFQ-2024-001", dec!(2900)),
            ],
        }
    }

    #[tokio::test]
    async fn test_offers_grouped_by_rfq_in_insertion_order() {
        let repo = InMemoryRepo::from_snapshot(snapshot()).unwrap();

        let offers = repo
            .offers_for_rfq(&RfqId::new("RFQ-2024-001"))
            .await
            .unwrap();

        let ids: Vec<&str> = offers.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["OFF-001", "OFF-003"]);
    }

    #[tokio::test]
    async fn test_unknown_rfq_has_no_offers() {
        let repo = InMemoryRepo::from_snapshot(snapshot()).unwrap();

        let offers = repo.offers_for_rfq(&RfqId::new("RFQ-1999-404")).await.unwrap();

        assert!(offers.is_empty());
    }

    #[tokio::test]
    async fn test_list_rfqs_sorted() {
        let repo = InMemoryRepo::from_snapshot(snapshot()).unwrap();

        let rfqs = repo.list_rfqs().await.unwrap();

        assert_eq!(
            rfqs,
            vec![RfqId::new("RFQ-2024-001"), RfqId::new("RFQ-2024-002")]
        );
    }

    #[tokio::test]
    async fn test_exchange_rates_sorted_by_currency() {
        let repo = InMemoryRepo::from_snapshot(snapshot()).unwrap();

        let rates = repo.exchange_rates().await.unwrap();

        let currencies: Vec<CurrencyCode> = rates.iter().map(|r| r.currency).collect();
        assert_eq!(currencies, vec![CurrencyCode::EUR, CurrencyCode::USD]);
    }

    #[test]
    fn test_duplicate_rate_in_snapshot_fails() {
        let mut snap = snapshot();
        snap.exchange_rates
            .push(ExchangeRate::new(CurrencyCode::EUR, dec!(150), day()));

        let result = InMemoryRepo::from_snapshot(snap);

        assert!(matches!(
            result,
            Err(RepoError::Domain(DomainError::Rate(RateError::DuplicateRate(
                CurrencyCode::EUR
            ))))
        ));
    }

    #[test]
    fn test_duplicate_offer_conflicts() {
        let repo = InMemoryRepo::from_snapshot(snapshot()).unwrap();

        let result = repo.insert_offer(offer("OFF-001", "RFQ-2024-001", dec!(1)));

        assert!(matches!(result, Err(RepoError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_upsert_rate_replaces_active_rate() {
        let repo = InMemoryRepo::from_snapshot(snapshot()).unwrap();

        let previous = repo
            .upsert_rate(ExchangeRate::new(CurrencyCode::EUR, dec!(146.10), day()))
            .unwrap();

        assert_eq!(previous.unwrap().rate, dec!(145.50));
        let rates = repo.exchange_rates().await.unwrap();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0].rate, dec!(146.10));
    }

    #[test]
    fn test_upsert_rejects_non_positive_rate() {
        let repo = InMemoryRepo::new();

        let result = repo.upsert_rate(ExchangeRate::new(CurrencyCode::USD, dec!(0), day()));

        assert!(matches!(result, Err(RepoError::Domain(_))));
    }

    #[tokio::test]
    async fn test_remove_rate() {
        let repo = InMemoryRepo::from_snapshot(snapshot()).unwrap();

        assert!(repo.remove_rate(CurrencyCode::USD).is_some());
        assert_eq!(repo.exchange_rates().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_build_repo_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&snapshot()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let repo = build_repo(file.path()).await.unwrap();

        assert_eq!(repo.list_rfqs().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_load_json_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let result = InMemoryRepo::load_json(file.path()).await;

        assert!(matches!(result, Err(RepoError::Parse(_))));
    }

    #[tokio::test]
    async fn test_load_json_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let result = InMemoryRepo::load_json(dir.path().join("missing.json")).await;

        assert!(matches!(result, Err(RepoError::Io(_))));
    }
}
