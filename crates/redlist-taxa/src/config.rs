use std::env;
use std::path::PathBuf;

/// Application configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Red List API access token. Absent means offline mode: every fetch
    /// stage becomes a no-op and only the cache path can populate a store.
    pub token: Option<String>,
    /// Taxonomic order to retain from the global listing, upper case
    pub order_name: String,
    /// Directory holding the cache files
    pub cache_dir: PathBuf,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        let token = env::var("REDLIST_TOKEN").ok().filter(|t| !t.is_empty());

        let order_name = env::var("REDLIST_ORDER").unwrap_or_else(|_| "CHIROPTERA".to_string());

        let cache_dir = env::var("REDLIST_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Self {
            token,
            order_name,
            cache_dir,
        }
    }

    /// Lower-case order name used in cache file names
    pub fn taxon_slug(&self) -> String {
        self.order_name.to_lowercase()
    }
}
