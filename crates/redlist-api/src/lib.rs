//! Rust client for the IUCN Red List API v3
//!
//! This crate provides typed bindings to the Red List species API, which
//! offers access to the global species assessments, the country register,
//! and per-country species occurrence lists.
//!
//! # Example
//!
//! ```no_run
//! use redlist_api::RedlistClient;
//!
//! # async fn example() -> Result<(), redlist_api::RedlistError> {
//! let client = RedlistClient::new("YOUR-TOKEN");
//!
//! if let Some(version) = client.version().await? {
//!     println!("Red List release: {}", version);
//! }
//!
//! // Walk the paged species listing
//! let mut page = 0;
//! while let Some(listing) = client.species_page(page).await? {
//!     if listing.count == 0 {
//!         break;
//!     }
//!     for species in &listing.result {
//!         println!("{:?}", species.scientific_name);
//!     }
//!     page += 1;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - `GET /version` - Current data release identifier
//! - `GET /species/page/{page}` - Paged global species listing
//! - `GET /species/id/{taxonid}` - Full assessment detail for one taxon
//! - `GET /country/list` - ISO code to country name register
//! - `GET /country/getspecies/{isocode}` - Species recorded in one country

mod client;
mod error;
mod types;

pub use client::RedlistClient;
pub use error::{RedlistError, Result};
pub use types::{
    CountryListResponse, CountryOccurrence, CountryRecord, CountrySpeciesResponse, SpeciesPage,
    SpeciesRecord, TaxonDetail, TaxonDetailResponse, VersionResponse,
};
