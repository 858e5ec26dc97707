//! Red List taxon archive
//!
//! Fetches the species checklist, assessment details, country register and
//! per-country occurrences for one taxonomic order from the IUCN Red List
//! API, caches the datasets as tab-separated files, and exposes the
//! populated store plus a derived countries-per-taxon view to report
//! consumers.

pub mod cache;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod store;

pub use config::Config;
pub use error::{Result, TaxaError};
pub use pipeline::Pipeline;
pub use source::SpeciesSource;
pub use store::{Checklist, Occurrence, RedlistStore, TaxonSummary};
