//! # Pricing Hex
//!
//! Application service layer for the pricing service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (loads snapshots, runs the comparator)
//!
//! The service is generic over `R: OfferRepository`, allowing
//! different repository implementations to be injected.

pub mod service;


pub use service::ComparisonService;
