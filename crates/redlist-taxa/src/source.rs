//! Injectable species source abstraction
//!
//! The pipeline is generic over this trait so tests can substitute canned
//! fixtures for the live Red List endpoints.

use crate::error::Result;
use redlist_api::{CountryOccurrence, CountryRecord, RedlistClient, SpeciesPage, TaxonDetail};

/// The five remote operations the pipeline depends on
#[allow(async_fn_in_trait)]
pub trait SpeciesSource {
    /// Current data release identifier
    async fn version(&self) -> Result<Option<String>>;

    /// One page of the global species listing; `None` means no more data
    async fn species_page(&self, page: u32) -> Result<Option<SpeciesPage>>;

    /// Full assessment detail records for one taxon identifier
    async fn species_by_id(&self, taxonid: u64) -> Result<Vec<TaxonDetail>>;

    /// The ISO code to country name register
    async fn countries(&self) -> Result<Vec<CountryRecord>>;

    /// Species recorded in one country
    async fn country_species(&self, isocode: &str) -> Result<Vec<CountryOccurrence>>;
}

impl SpeciesSource for RedlistClient {
    async fn version(&self) -> Result<Option<String>> {
        Ok(RedlistClient::version(self).await?)
    }

    async fn species_page(&self, page: u32) -> Result<Option<SpeciesPage>> {
        Ok(RedlistClient::species_page(self, page).await?)
    }

    async fn species_by_id(&self, taxonid: u64) -> Result<Vec<TaxonDetail>> {
        Ok(RedlistClient::species_by_id(self, taxonid).await?)
    }

    async fn countries(&self) -> Result<Vec<CountryRecord>> {
        Ok(RedlistClient::countries(self).await?)
    }

    async fn country_species(&self, isocode: &str) -> Result<Vec<CountryOccurrence>> {
        Ok(RedlistClient::country_species(self, isocode).await?)
    }
}
