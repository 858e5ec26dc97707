//! Derived summary rows for downstream report renderers
//!
//! Spreadsheet or text renderers consume the store read-only; the one view
//! they need beyond the raw datasets is the per-taxon country range built
//! by grouping occurrences on the taxon identifier.

use crate::store::RedlistStore;

/// Country range of one checklist taxon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonRange {
    pub taxonid: u64,
    pub scientific_name: String,
    /// Conservation category from the detail table, when assessed
    pub category: Option<String>,
    /// ISO codes of the countries the taxon is recorded in, in ingestion order
    pub country_codes: Vec<String>,
}

/// Build one range row per checklist entry, in checklist order
pub fn taxon_ranges(store: &RedlistStore) -> Vec<TaxonRange> {
    let grouped = store.countries_per_taxon();
    store
        .checklist
        .iter()
        .map(|entry| {
            let country_codes = grouped
                .get(&entry.taxonid)
                .map(|occurrences| {
                    occurrences
                        .iter()
                        .map(|o| o.country_isocode.clone())
                        .collect()
                })
                .unwrap_or_default();
            let category = store
                .details
                .get(&entry.scientific_name)
                .and_then(|detail| detail.category.clone());
            TaxonRange {
                taxonid: entry.taxonid,
                scientific_name: entry.scientific_name.clone(),
                category,
                country_codes,
            }
        })
        .collect()
}
