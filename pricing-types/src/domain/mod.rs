//! Domain models for the pricing service.

pub mod comparison;
pub mod landed_cost;
pub mod offer;
pub mod params;

pub use comparison::{Comparison, PriceComparator, compare_offers};
pub use landed_cost::{LandedCost, RankedOffer, UnpricedOffer, UnpricedReason};
pub use offer::{
    ContainerInfo, ContainerType, NegotiationRound, NegotiationStatus, OfferId, OfferItem,
    OfferStatus, RfqId, SupplierOffer,
};
pub use params::CostParameters;
