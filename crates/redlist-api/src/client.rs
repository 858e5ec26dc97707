//! Red List API HTTP client

use crate::error::Result;
use crate::types::*;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for the IUCN Red List API v3
///
/// Every endpoint takes the access token as a query parameter. Calls are
/// plain one-shot GETs; pagination and per-taxon/per-country iteration are
/// driven by the caller.
pub struct RedlistClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl RedlistClient {
    /// Base URL for the Red List API v3
    pub const DEFAULT_BASE_URL: &'static str = "http://apiv3.iucnredlist.org/api/v3";

    /// Create a new client with default settings (30 second timeout)
    pub fn new(token: &str) -> Self {
        Self::with_base_url(token, Self::DEFAULT_BASE_URL)
    }

    /// Create a new client against a custom base URL
    pub fn with_base_url(token: &str, base_url: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Get the current data release identifier
    pub async fn version(&self) -> Result<Option<String>> {
        let response: Option<VersionResponse> = self.fetch("/version").await?;
        Ok(response.and_then(|r| r.version))
    }

    /// Get one page of the global species listing
    ///
    /// Returns `None` when the server answers with an empty body, which the
    /// upstream API uses (alongside `count == 0`) to signal the end of the
    /// listing.
    pub async fn species_page(&self, page: u32) -> Result<Option<SpeciesPage>> {
        self.fetch(&format!("/species/page/{}", page)).await
    }

    /// Get the full assessment detail for one taxon identifier
    ///
    /// The `result` array normally holds a single element.
    pub async fn species_by_id(&self, taxonid: u64) -> Result<Vec<TaxonDetail>> {
        let response: Option<TaxonDetailResponse> =
            self.fetch(&format!("/species/id/{}", taxonid)).await?;
        Ok(response.map(|r| r.result).unwrap_or_default())
    }

    /// Get the ISO code to country name register
    pub async fn countries(&self) -> Result<Vec<CountryRecord>> {
        let response: Option<CountryListResponse> = self.fetch("/country/list").await?;
        Ok(response.map(|r| r.results).unwrap_or_default())
    }

    /// Get the species recorded in one country
    ///
    /// The upstream route expects the ISO code in lower case.
    pub async fn country_species(&self, isocode: &str) -> Result<Vec<CountryOccurrence>> {
        let code = isocode.to_lowercase();
        let response: Option<CountrySpeciesResponse> = self
            .fetch(&format!(
                "/country/getspecies/{}",
                urlencoding::encode(&code)
            ))
            .await?;
        Ok(response.map(|r| r.result).unwrap_or_default())
    }

    /// Issue one GET and decode the body, treating an empty body as no data
    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let url = format!(
            "{}{}?token={}",
            self.base_url,
            path,
            urlencoding::encode(&self.token)
        );
        let response = self.http.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;
        decode(&body)
    }
}

/// Decode a response body, mapping an empty body to `None`
fn decode<T: DeserializeOwned>(body: &str) -> Result<Option<T>> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(body)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_empty_body_is_none() {
        let page: Option<SpeciesPage> = decode("").unwrap();
        assert!(page.is_none());
        let page: Option<SpeciesPage> = decode("  \r\n").unwrap();
        assert!(page.is_none());
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        let result: Result<Option<SpeciesPage>> = decode("{not json");
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_envelope() {
        let body = r#"{"count": 0, "result": []}"#;
        let page: Option<SpeciesPage> = decode(body).unwrap();
        assert_eq!(page.unwrap().count, 0);
    }
}
