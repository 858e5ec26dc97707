//! Sequential fetch pipeline
//!
//! Five stages in a strict dependency chain: version, checklist, details,
//! countries, occurrences. The details stage needs the checklist; the
//! occurrences stage needs both the checklist and the country register.
//! Every remote call is awaited in turn; nothing runs concurrently.

use crate::error::Result;
use crate::source::SpeciesSource;
use crate::store::{Occurrence, RedlistStore};
use tracing::debug;

/// Safety bound on the paged species listing
pub const MAX_SPECIES_PAGES: u32 = 100;

/// Orchestrates the fetch stages against an injected source
///
/// Constructed without a source (no access token configured) every stage
/// is a no-op, which supports an offline, cache-only mode.
pub struct Pipeline<S> {
    source: Option<S>,
    order_name: String,
}

impl<S: SpeciesSource> Pipeline<S> {
    pub fn new(source: Option<S>, order_name: &str) -> Self {
        Self {
            source,
            order_name: order_name.to_string(),
        }
    }

    /// Run all five stages in dependency order
    pub async fn fetch_all(&self, store: &mut RedlistStore) -> Result<()> {
        self.fetch_version(store).await?;
        self.fetch_checklist(store).await?;
        self.fetch_details(store).await?;
        self.fetch_countries(store).await?;
        self.fetch_occurrences(store).await?;
        Ok(())
    }

    /// Stage 1: data release version
    pub async fn fetch_version(&self, store: &mut RedlistStore) -> Result<()> {
        let Some(source) = &self.source else {
            return Ok(());
        };
        if let Some(version) = source.version().await? {
            store.version = version;
        }
        debug!(version = %store.version, "Fetched data release version");
        Ok(())
    }

    /// Stage 2: walk the global species listing and retain the target order
    ///
    /// Stops on an empty body, on the first page reporting `count == 0`, or
    /// at the page cap. The order filter is applied client-side with an
    /// exact, case-sensitive match.
    pub async fn fetch_checklist(&self, store: &mut RedlistStore) -> Result<()> {
        let Some(source) = &self.source else {
            return Ok(());
        };
        let mut page = 0;
        while page < MAX_SPECIES_PAGES {
            let Some(listing) = source.species_page(page).await? else {
                break;
            };
            if listing.count == 0 {
                break;
            }
            for record in listing.result {
                if record.order_name.as_deref() != Some(self.order_name.as_str()) {
                    continue;
                }
                if let (Some(name), Some(taxonid)) = (record.scientific_name, record.taxonid) {
                    store.checklist.insert(&name, taxonid);
                }
            }
            debug!(
                page,
                retained = store.checklist.len(),
                "Scanned species page"
            );
            page += 1;
        }
        debug!(total = store.checklist.len(), "Checklist complete");
        Ok(())
    }

    /// Stage 3: one detail call per checklist identifier
    pub async fn fetch_details(&self, store: &mut RedlistStore) -> Result<()> {
        let Some(source) = &self.source else {
            return Ok(());
        };
        let taxonids: Vec<u64> = store.checklist.taxonids().collect();
        for taxonid in taxonids {
            for detail in source.species_by_id(taxonid).await? {
                if let Some(name) = detail.scientific_name.clone() {
                    debug!(taxonid, name = %name, "Fetched assessment detail");
                    store.details.insert(name, detail);
                }
            }
        }
        Ok(())
    }

    /// Stage 4: country register
    pub async fn fetch_countries(&self, store: &mut RedlistStore) -> Result<()> {
        let Some(source) = &self.source else {
            return Ok(());
        };
        for record in source.countries().await? {
            if let (Some(isocode), Some(country)) = (record.isocode, record.country) {
                store.countries.insert(isocode, country);
            }
        }
        debug!(total = store.countries.len(), "Country register complete");
        Ok(())
    }

    /// Stage 5: one call per country, keeping only checklist taxa
    pub async fn fetch_occurrences(&self, store: &mut RedlistStore) -> Result<()> {
        let Some(source) = &self.source else {
            return Ok(());
        };
        let isocodes: Vec<String> = store.countries.keys().cloned().collect();
        for isocode in isocodes {
            debug!(country = %isocode, "Fetching taxa in country");
            for record in source.country_species(&isocode).await? {
                let Some(taxonid) = record.taxonid else {
                    continue;
                };
                if !store.checklist.contains_id(taxonid) {
                    continue;
                }
                store.occurrences.push(Occurrence {
                    country_isocode: isocode.clone(),
                    taxonid,
                    scientific_name: record.scientific_name.unwrap_or_default(),
                    category: record.category.unwrap_or_default(),
                });
            }
        }
        debug!(total = store.occurrences.len(), "Occurrence list complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redlist_api::{CountryOccurrence, CountryRecord, SpeciesPage, SpeciesRecord, TaxonDetail};
    use std::cell::Cell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeSource {
        version: Option<String>,
        pages: Vec<SpeciesPage>,
        details: HashMap<u64, Vec<TaxonDetail>>,
        countries: Vec<CountryRecord>,
        by_country: HashMap<String, Vec<CountryOccurrence>>,
        pages_requested: Cell<u32>,
    }

    impl SpeciesSource for FakeSource {
        async fn version(&self) -> Result<Option<String>> {
            Ok(self.version.clone())
        }

        async fn species_page(&self, page: u32) -> Result<Option<SpeciesPage>> {
            self.pages_requested.set(self.pages_requested.get() + 1);
            Ok(self.pages.get(page as usize).cloned())
        }

        async fn species_by_id(&self, taxonid: u64) -> Result<Vec<TaxonDetail>> {
            Ok(self.details.get(&taxonid).cloned().unwrap_or_default())
        }

        async fn countries(&self) -> Result<Vec<CountryRecord>> {
            Ok(self.countries.clone())
        }

        async fn country_species(&self, isocode: &str) -> Result<Vec<CountryOccurrence>> {
            Ok(self.by_country.get(isocode).cloned().unwrap_or_default())
        }
    }

    fn species(name: &str, taxonid: u64, order_name: &str) -> SpeciesRecord {
        SpeciesRecord {
            taxonid: Some(taxonid),
            scientific_name: Some(name.to_string()),
            order_name: Some(order_name.to_string()),
            ..Default::default()
        }
    }

    fn page(records: Vec<SpeciesRecord>) -> SpeciesPage {
        SpeciesPage {
            count: records.len() as u64,
            result: records,
        }
    }

    #[tokio::test]
    async fn test_checklist_filters_on_exact_order() {
        let source = FakeSource {
            pages: vec![
                page(vec![
                    species("Nyctalus noctula", 14920, "CHIROPTERA"),
                    species("Vulpes vulpes", 23062, "CARNIVORA"),
                    species("Myotis daubentonii", 14128, "Chiroptera"),
                ]),
                SpeciesPage::default(),
            ],
            ..Default::default()
        };
        let pipeline = Pipeline::new(Some(source), "CHIROPTERA");

        let mut store = RedlistStore::new();
        pipeline.fetch_checklist(&mut store).await.unwrap();

        let names: Vec<&str> = store
            .checklist
            .iter()
            .map(|e| e.scientific_name.as_str())
            .collect();
        assert_eq!(names, vec!["Nyctalus noctula"]);
    }

    #[tokio::test]
    async fn test_pagination_stops_at_first_empty_page() {
        let source = FakeSource {
            pages: vec![
                page(vec![species("Nyctalus noctula", 14920, "CHIROPTERA")]),
                page(vec![species("Myotis myotis", 14133, "CHIROPTERA")]),
                SpeciesPage::default(),
                page(vec![species("Plecotus auritus", 17596, "CHIROPTERA")]),
            ],
            ..Default::default()
        };
        let pipeline = Pipeline::new(Some(source), "CHIROPTERA");

        let mut store = RedlistStore::new();
        pipeline.fetch_checklist(&mut store).await.unwrap();

        assert_eq!(store.checklist.len(), 2);
        assert!(!store.checklist.contains_id(17596));
        assert_eq!(pipeline.source.as_ref().unwrap().pages_requested.get(), 3);
    }

    #[tokio::test]
    async fn test_occurrences_drop_unknown_taxonids() {
        let mut by_country = HashMap::new();
        by_country.insert(
            "SE".to_string(),
            vec![
                CountryOccurrence {
                    taxonid: Some(14920),
                    scientific_name: Some("Nyctalus noctula".to_string()),
                    category: Some("LC".to_string()),
                },
                CountryOccurrence {
                    taxonid: Some(99999),
                    scientific_name: Some("Alces alces".to_string()),
                    category: Some("LC".to_string()),
                },
            ],
        );
        let source = FakeSource {
            by_country,
            ..Default::default()
        };
        let pipeline = Pipeline::new(Some(source), "CHIROPTERA");

        let mut store = RedlistStore::new();
        store.checklist.insert("Nyctalus noctula", 14920);
        store
            .countries
            .insert("SE".to_string(), "Sweden".to_string());

        pipeline.fetch_occurrences(&mut store).await.unwrap();

        assert_eq!(store.occurrences.len(), 1);
        assert_eq!(store.occurrences[0].taxonid, 14920);
        assert_eq!(store.occurrences[0].country_isocode, "SE");
    }

    #[tokio::test]
    async fn test_details_merge_by_scientific_name() {
        let mut details = HashMap::new();
        details.insert(
            14920,
            vec![TaxonDetail {
                taxonid: Some(14920),
                scientific_name: Some("Nyctalus noctula".to_string()),
                category: Some("LC".to_string()),
                ..Default::default()
            }],
        );
        let source = FakeSource {
            details,
            ..Default::default()
        };
        let pipeline = Pipeline::new(Some(source), "CHIROPTERA");

        let mut store = RedlistStore::new();
        store.checklist.insert("Nyctalus noctula", 14920);
        store.checklist.insert("Myotis myotis", 14133);

        pipeline.fetch_details(&mut store).await.unwrap();

        // No detail published for 14133; the checklist entry just stays bare
        assert_eq!(store.details.len(), 1);
        assert_eq!(
            store.details["Nyctalus noctula"].category.as_deref(),
            Some("LC")
        );
    }

    #[tokio::test]
    async fn test_no_token_leaves_store_empty() {
        let pipeline = Pipeline::<FakeSource>::new(None, "CHIROPTERA");

        let mut store = RedlistStore::new();
        pipeline.fetch_all(&mut store).await.unwrap();

        assert!(store.version.is_empty());
        assert!(store.checklist.is_empty());
        assert!(store.details.is_empty());
        assert!(store.countries.is_empty());
        assert!(store.occurrences.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_runs_stages_in_order() {
        let mut details = HashMap::new();
        details.insert(
            14920,
            vec![TaxonDetail {
                taxonid: Some(14920),
                scientific_name: Some("Nyctalus noctula".to_string()),
                ..Default::default()
            }],
        );
        let mut by_country = HashMap::new();
        by_country.insert(
            "SE".to_string(),
            vec![CountryOccurrence {
                taxonid: Some(14920),
                scientific_name: Some("Nyctalus noctula".to_string()),
                category: Some("LC".to_string()),
            }],
        );
        let source = FakeSource {
            version: Some("2018-1".to_string()),
            pages: vec![
                page(vec![species("Nyctalus noctula", 14920, "CHIROPTERA")]),
                SpeciesPage::default(),
            ],
            details,
            countries: vec![CountryRecord {
                isocode: Some("SE".to_string()),
                country: Some("Sweden".to_string()),
            }],
            by_country,
            ..Default::default()
        };
        let pipeline = Pipeline::new(Some(source), "CHIROPTERA");

        let mut store = RedlistStore::new();
        pipeline.fetch_all(&mut store).await.unwrap();

        assert_eq!(store.version, "2018-1");
        assert_eq!(store.checklist.len(), 1);
        assert_eq!(store.details.len(), 1);
        assert_eq!(store.countries["SE"], "Sweden");
        assert_eq!(store.occurrences.len(), 1);
    }
}
