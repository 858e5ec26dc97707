//! Data types for Red List API responses
//!
//! These structs mirror the Red List v3 JSON envelopes. Non-key fields are
//! optional because the upstream API omits or nulls them freely.

use serde::Deserialize;

/// Response from the `/version` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct VersionResponse {
    pub version: Option<String>,
}

/// One page of the global species listing from `/species/page/{page}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeciesPage {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub result: Vec<SpeciesRecord>,
}

/// One species record from the paged global listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeciesRecord {
    pub taxonid: Option<u64>,
    pub scientific_name: Option<String>,
    pub kingdom_name: Option<String>,
    pub phylum_name: Option<String>,
    pub class_name: Option<String>,
    pub order_name: Option<String>,
    pub family_name: Option<String>,
    pub genus_name: Option<String>,
    pub main_common_name: Option<String>,
    pub category: Option<String>,
}

/// Response envelope from `/species/id/{taxonid}`
#[derive(Debug, Clone, Deserialize)]
pub struct TaxonDetailResponse {
    pub name: Option<String>,
    #[serde(default)]
    pub result: Vec<TaxonDetail>,
}

/// Full assessment detail for one taxon
///
/// The numeric range fields (`aoo_km2`, `eoo_km2`, elevation and depth
/// bounds) arrive as either JSON numbers or strings depending on the
/// assessment, so they go through a tolerant deserializer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaxonDetail {
    pub taxonid: Option<u64>,
    pub scientific_name: Option<String>,
    pub kingdom: Option<String>,
    pub phylum: Option<String>,
    pub class: Option<String>,
    pub order: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub main_common_name: Option<String>,
    pub authority: Option<String>,
    pub published_year: Option<i64>,
    pub category: Option<String>,
    pub criteria: Option<String>,
    pub marine_system: Option<bool>,
    pub freshwater_system: Option<bool>,
    pub terrestrial_system: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub aoo_km2: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub eoo_km2: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub elevation_upper: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub elevation_lower: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub depth_upper: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub depth_lower: Option<f64>,
    pub assessor: Option<String>,
    pub reviewer: Option<String>,
    pub errata_flag: Option<bool>,
    pub errata_reason: Option<String>,
    pub amended_flag: Option<bool>,
    pub amended_reason: Option<String>,
}

/// Helper to deserialize a numeric field that can be a number or a string
fn deserialize_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct NumberVisitor;

    impl<'de> Visitor<'de> for NumberVisitor {
        type Value = Option<f64>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a number, a numeric string, or null")
        }

        fn visit_f64<E>(self, v: f64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v))
        }

        fn visit_u64<E>(self, v: u64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_i64<E>(self, v: i64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v.trim().is_empty() {
                return Ok(None);
            }
            v.trim().parse::<f64>().map(Some).map_err(de::Error::custom)
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(NumberVisitor)
}

/// Response from `/country/list`
#[derive(Debug, Clone, Deserialize)]
pub struct CountryListResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub results: Vec<CountryRecord>,
}

/// One entry of the country register
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountryRecord {
    pub isocode: Option<String>,
    pub country: Option<String>,
}

/// Response from `/country/getspecies/{isocode}`
#[derive(Debug, Clone, Deserialize)]
pub struct CountrySpeciesResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub result: Vec<CountryOccurrence>,
}

/// One species recorded in a country
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountryOccurrence {
    pub taxonid: Option<u64>,
    pub scientific_name: Option<String>,
    pub category: Option<String>,
}
