//! In-memory store for the four Red List datasets
//!
//! The store is an explicit owned value: population code (network pipeline
//! or cache loader) takes `&mut RedlistStore` and fills a cleared instance.
//! There are no merge semantics; mixing population paths requires a `clear`
//! in between.

use redlist_api::TaxonDetail;
use std::collections::{BTreeMap, HashSet};

/// One checklist entry: the minimal name-to-identifier index record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonSummary {
    pub scientific_name: String,
    pub taxonid: u64,
}

/// A taxon recorded in a country with its conservation category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub country_isocode: String,
    pub taxonid: u64,
    pub scientific_name: String,
    pub category: String,
}

/// Insertion-ordered checklist with O(1) identifier membership checks
///
/// Other datasets are validated against the checklist: occurrences whose
/// taxon identifier is unknown here are dropped at ingestion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Checklist {
    entries: Vec<TaxonSummary>,
    ids: HashSet<u64>,
}

impl Checklist {
    /// Insert an entry, keeping the position of the first encounter when a
    /// scientific name repeats
    pub fn insert(&mut self, scientific_name: &str, taxonid: u64) {
        self.ids.insert(taxonid);
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.scientific_name == scientific_name)
        {
            entry.taxonid = taxonid;
        } else {
            self.entries.push(TaxonSummary {
                scientific_name: scientific_name.to_string(),
                taxonid,
            });
        }
    }

    pub fn contains_id(&self, taxonid: u64) -> bool {
        self.ids.contains(&taxonid)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &TaxonSummary> {
        self.entries.iter()
    }

    /// Taxon identifiers in insertion order
    pub fn taxonids(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.iter().map(|e| e.taxonid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The four datasets plus the upstream release version
#[derive(Debug, Clone, Default)]
pub struct RedlistStore {
    /// Upstream data release identifier, immutable between clears
    pub version: String,
    /// Name-to-identifier checklist in first-encounter order
    pub checklist: Checklist,
    /// Full assessment details keyed (and therefore sorted) by scientific name
    pub details: BTreeMap<String, TaxonDetail>,
    /// ISO code to display name register, sorted by code
    pub countries: BTreeMap<String, String>,
    /// Taxon-in-country records in ingestion order
    pub occurrences: Vec<Occurrence>,
}

impl RedlistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every dataset to empty
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Citation string for the loaded data release
    pub fn citation(&self) -> String {
        let year = self.version.get(0..4).unwrap_or(&self.version);
        format!(
            "IUCN {}. IUCN Red List of Threatened Species. Version {} <www.iucnredlist.org>",
            year, self.version
        )
    }

    /// Occurrences grouped by taxon identifier, the derived view consumed
    /// by downstream report renderers
    pub fn countries_per_taxon(&self) -> BTreeMap<u64, Vec<&Occurrence>> {
        let mut grouped: BTreeMap<u64, Vec<&Occurrence>> = BTreeMap::new();
        for occurrence in &self.occurrences {
            grouped.entry(occurrence.taxonid).or_default().push(occurrence);
        }
        grouped
    }
}
