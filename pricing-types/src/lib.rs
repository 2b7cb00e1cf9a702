//! # Pricing Types
//!
//! Domain types, the landed-cost comparator and port traits for comparing
//! supplier offers on a request for quotation (RFQ).
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (SupplierOffer, CostParameters, LandedCost)
//!   and the comparator itself
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Snapshot and report shapes for the data boundaries
//! - `error/` - Domain, repository and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Comparison, ContainerInfo, ContainerType, CostParameters, LandedCost, NegotiationRound,
    NegotiationStatus, OfferId, OfferItem, OfferStatus, PriceComparator, RankedOffer, RfqId,
    SupplierOffer, UnpricedOffer, UnpricedReason, compare_offers,
};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
pub use exchange_rates::{
    CurrencyCode, ExchangeRate, FallbackRates, MissingRatePolicy, RateError, RateSource,
    RateTable,
};
pub use ports::OfferRepository;
