//! Tab-separated cache codec
//!
//! Persists the four datasets as TSV files (CRLF line endings, UTF-8, one
//! header row) and rebuilds a fresh store from them. The field schemas are
//! shared constants used by both writer and reader; on load the on-disk
//! header is verified against the schema and a mismatch is fatal, so stale
//! cache files fail loudly instead of silently mis-mapping columns.
//!
//! Row ordering: checklist and occurrence files in ingestion order, detail
//! and country files sorted by key. Absent field values are written as
//! empty strings and read back as absent.

use crate::error::{Result, TaxaError};
use crate::store::{Occurrence, RedlistStore};
use redlist_api::TaxonDetail;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CHECKLIST_HEADER: [&str; 2] = ["scientific_name", "taxonid"];

pub const INFO_HEADER: [&str; 28] = [
    "scientific_name",
    "taxonid",
    "kingdom",
    "phylum",
    "class",
    "order",
    "family",
    "genus",
    "main_common_name",
    "authority",
    "published_year",
    "category",
    "criteria",
    "marine_system",
    "freshwater_system",
    "terrestrial_system",
    "aoo_km2",
    "eoo_km2",
    "elevation_upper",
    "elevation_lower",
    "depth_upper",
    "depth_lower",
    "assessor",
    "reviewer",
    "errata_flag",
    "errata_reason",
    "amended_flag",
    "amended_reason",
];

pub const COUNTRY_HEADER: [&str; 2] = ["isocode", "country"];

pub const BY_COUNTRY_HEADER: [&str; 4] =
    ["country_isocode", "taxonid", "scientific_name", "category"];

fn version_path(dir: &Path) -> PathBuf {
    dir.join("redlist_version.txt")
}

fn checklist_path(dir: &Path, taxon: &str) -> PathBuf {
    dir.join(format!("redlist_{}_checklist.txt", taxon))
}

fn info_path(dir: &Path, taxon: &str) -> PathBuf {
    dir.join(format!("redlist_{}_info.txt", taxon))
}

fn country_path(dir: &Path) -> PathBuf {
    dir.join("redlist_countries.txt")
}

fn by_country_path(dir: &Path, taxon: &str) -> PathBuf {
    dir.join(format!("redlist_{}_by_countries.txt", taxon))
}

/// Write the four datasets plus the version file into `dir`
pub fn save(store: &RedlistStore, dir: &Path, taxon: &str) -> Result<()> {
    fs::write(version_path(dir), &store.version)?;

    let mut out = header_row(&CHECKLIST_HEADER);
    for entry in store.checklist.iter() {
        out.push_str(&entry.scientific_name);
        out.push('\t');
        out.push_str(&entry.taxonid.to_string());
        out.push_str("\r\n");
    }
    fs::write(checklist_path(dir, taxon), out)?;

    let mut out = header_row(&INFO_HEADER);
    for detail in store.details.values() {
        out.push_str(&detail_row(detail).join("\t"));
        out.push_str("\r\n");
    }
    fs::write(info_path(dir, taxon), out)?;

    let mut out = header_row(&COUNTRY_HEADER);
    for (isocode, country) in &store.countries {
        out.push_str(isocode);
        out.push('\t');
        out.push_str(country);
        out.push_str("\r\n");
    }
    fs::write(country_path(dir), out)?;

    let mut out = header_row(&BY_COUNTRY_HEADER);
    for occurrence in &store.occurrences {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\r\n",
            occurrence.country_isocode,
            occurrence.taxonid,
            occurrence.scientific_name,
            occurrence.category
        ));
    }
    fs::write(by_country_path(dir, taxon), out)?;

    Ok(())
}

/// Rebuild a fresh store from the files in `dir`
///
/// A missing file or an unexpected header row is a fatal error; rows with
/// fewer than two tab-separated parts are skipped.
pub fn load(dir: &Path, taxon: &str) -> Result<RedlistStore> {
    let mut store = RedlistStore::new();

    store.version = fs::read_to_string(version_path(dir))?;

    let path = checklist_path(dir, taxon);
    for parts in data_rows(&fs::read_to_string(&path)?) {
        if let Ok(taxonid) = parts[1].parse() {
            store.checklist.insert(parts[0], taxonid);
        }
    }

    let path = info_path(dir, taxon);
    let text = fs::read_to_string(&path)?;
    check_header(&text, &INFO_HEADER, &path)?;
    for parts in data_rows(&text) {
        let detail = detail_from_row(&parts);
        if let Some(name) = detail.scientific_name.clone() {
            store.details.insert(name, detail);
        }
    }

    for parts in data_rows(&fs::read_to_string(country_path(dir))?) {
        store
            .countries
            .insert(parts[0].to_string(), parts[1].to_string());
    }

    let path = by_country_path(dir, taxon);
    for parts in data_rows(&fs::read_to_string(&path)?) {
        if let Ok(taxonid) = parts[1].parse() {
            store.occurrences.push(Occurrence {
                country_isocode: parts[0].to_string(),
                taxonid,
                scientific_name: parts.get(2).copied().unwrap_or("").to_string(),
                category: parts.get(3).copied().unwrap_or("").to_string(),
            });
        }
    }

    Ok(store)
}

fn header_row(fields: &[&str]) -> String {
    let mut row = fields.join("\t");
    row.push_str("\r\n");
    row
}

/// Split a file into tab-separated data rows, skipping the header row and
/// any row with fewer than two parts
fn data_rows(text: &str) -> impl Iterator<Item = Vec<&str>> {
    text.lines()
        .skip(1)
        .map(|row| row.split('\t').collect::<Vec<&str>>())
        .filter(|parts| parts.len() > 1)
}

fn check_header(text: &str, expected: &[&str], path: &Path) -> Result<()> {
    let found: Vec<&str> = text.lines().next().unwrap_or("").split('\t').collect();
    if found != expected {
        return Err(TaxaError::Cache(format!(
            "unexpected header in {}: expected {} fields, found {:?}",
            path.display(),
            expected.len(),
            found
        )));
    }
    Ok(())
}

fn cell<T: Display>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

/// Serialize one detail record in `INFO_HEADER` field order
fn detail_row(detail: &TaxonDetail) -> Vec<String> {
    vec![
        cell(&detail.scientific_name),
        cell(&detail.taxonid),
        cell(&detail.kingdom),
        cell(&detail.phylum),
        cell(&detail.class),
        cell(&detail.order),
        cell(&detail.family),
        cell(&detail.genus),
        cell(&detail.main_common_name),
        cell(&detail.authority),
        cell(&detail.published_year),
        cell(&detail.category),
        cell(&detail.criteria),
        cell(&detail.marine_system),
        cell(&detail.freshwater_system),
        cell(&detail.terrestrial_system),
        cell(&detail.aoo_km2),
        cell(&detail.eoo_km2),
        cell(&detail.elevation_upper),
        cell(&detail.elevation_lower),
        cell(&detail.depth_upper),
        cell(&detail.depth_lower),
        cell(&detail.assessor),
        cell(&detail.reviewer),
        cell(&detail.errata_flag),
        cell(&detail.errata_reason),
        cell(&detail.amended_flag),
        cell(&detail.amended_reason),
    ]
}

fn parse_cell<T: FromStr>(parts: &[&str], index: usize) -> Option<T> {
    let raw = parts.get(index).copied().unwrap_or("");
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}

fn string_cell(parts: &[&str], index: usize) -> Option<String> {
    let raw = parts.get(index).copied().unwrap_or("");
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Rebuild one detail record from a row in `INFO_HEADER` field order
fn detail_from_row(parts: &[&str]) -> TaxonDetail {
    TaxonDetail {
        scientific_name: string_cell(parts, 0),
        taxonid: parse_cell(parts, 1),
        kingdom: string_cell(parts, 2),
        phylum: string_cell(parts, 3),
        class: string_cell(parts, 4),
        order: string_cell(parts, 5),
        family: string_cell(parts, 6),
        genus: string_cell(parts, 7),
        main_common_name: string_cell(parts, 8),
        authority: string_cell(parts, 9),
        published_year: parse_cell(parts, 10),
        category: string_cell(parts, 11),
        criteria: string_cell(parts, 12),
        marine_system: parse_cell(parts, 13),
        freshwater_system: parse_cell(parts, 14),
        terrestrial_system: parse_cell(parts, 15),
        aoo_km2: parse_cell(parts, 16),
        eoo_km2: parse_cell(parts, 17),
        elevation_upper: parse_cell(parts, 18),
        elevation_lower: parse_cell(parts, 19),
        depth_upper: parse_cell(parts, 20),
        depth_lower: parse_cell(parts, 21),
        assessor: string_cell(parts, 22),
        reviewer: string_cell(parts, 23),
        errata_flag: parse_cell(parts, 24),
        errata_reason: string_cell(parts, 25),
        amended_flag: parse_cell(parts, 26),
        amended_reason: string_cell(parts, 27),
    }
}
