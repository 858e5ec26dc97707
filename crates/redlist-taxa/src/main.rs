//! Red List taxon archive CLI
//!
//! `redlist-taxa fetch` populates the store from the live API and writes
//! the cache files; `redlist-taxa load` rebuilds the store from the cache.
//! Either way a dataset summary and the release citation are printed.

use redlist_api::RedlistClient;
use redlist_taxa::{cache, report, Config, Pipeline, RedlistStore, Result, TaxaError};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("redlist_taxa=info".parse()?);
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Load configuration from environment
    let config = Config::from_env();
    info!("Order: {}", config.order_name);
    info!("Cache dir: {}", config.cache_dir.display());

    let mode = std::env::args().nth(1).unwrap_or_else(|| "fetch".to_string());

    let mut store = RedlistStore::new();
    match mode.as_str() {
        "fetch" => {
            if config.token.is_none() {
                warn!("No REDLIST_TOKEN configured; fetch stages are skipped");
            }
            let source = config.token.as_deref().map(RedlistClient::new);
            let pipeline = Pipeline::new(source, &config.order_name);
            pipeline.fetch_all(&mut store).await?;

            std::fs::create_dir_all(&config.cache_dir)?;
            cache::save(&store, &config.cache_dir, &config.taxon_slug())?;
            info!("Cache written to {}", config.cache_dir.display());
        }
        "load" => {
            store = cache::load(&config.cache_dir, &config.taxon_slug())?;
            info!("Cache loaded from {}", config.cache_dir.display());
        }
        other => {
            return Err(TaxaError::Config(format!(
                "unknown mode '{}', expected 'fetch' or 'load'",
                other
            )))
        }
    }

    info!(
        taxa = store.checklist.len(),
        details = store.details.len(),
        countries = store.countries.len(),
        occurrences = store.occurrences.len(),
        "Datasets populated"
    );
    for range in report::taxon_ranges(&store) {
        debug!(
            taxonid = range.taxonid,
            name = %range.scientific_name,
            category = range.category.as_deref().unwrap_or(""),
            countries = range.country_codes.len(),
            "Taxon range"
        );
    }

    println!("{}", store.citation());
    Ok(())
}
