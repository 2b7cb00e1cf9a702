//! # Pricing Repository
//!
//! Concrete repository implementations (adapters) for the pricing service.
//! This crate provides the adapters that implement the `OfferRepository` port.

mod memory;

#[cfg(test)]
mod memory_tests;

pub use memory::InMemoryRepo;

/// Build a repository from a JSON snapshot file.
///
/// This function:
/// 1. Reads and parses the snapshot
/// 2. Validates the exchange rates (one positive rate per currency)
/// 3. Returns a ready-to-use repository
///
/// # Examples
///
/// ```ignore
/// let repo = build_repo("demos/rfq-2024-001.json").await?;
/// ```
pub async fn build_repo(path: impl AsRef<std::path::Path>) -> anyhow::Result<InMemoryRepo> {
    Ok(InMemoryRepo::load_json(path).await?)
}
