use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::share::{BatchPolicy, DEFAULT_BRAND, DEFAULT_LINK_BASE, ShareComposer};

const DEFAULT_API_URL: &str = "https://manavcreationbackend.onrender.com";

#[derive(Debug, Clone)]
pub struct Config {
    /// Catalog backend origin (without `/api/v1`)
    pub api_url: String,
    /// Prefix for product deep links in shared text
    pub link_base: String,
    /// Store name used in the share header
    pub brand: String,
    /// Where downloaded images live while being shared
    pub cache_dir: PathBuf,
    /// Limit for a single image download (None = wait indefinitely)
    pub download_timeout: Option<Duration>,
    pub batch_policy: BatchPolicy,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` uses the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let download_timeout = var("STOREFRONT_DOWNLOAD_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let batch_policy = match var("STOREFRONT_BATCH_POLICY") {
            Some(v) => BatchPolicy::from_str(&v).unwrap_or_else(|| {
                tracing::warn!(value = %v, "Unknown STOREFRONT_BATCH_POLICY, using abort");
                BatchPolicy::default()
            }),
            None => BatchPolicy::default(),
        };

        Self {
            api_url: var("STOREFRONT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            link_base: var("STOREFRONT_LINK_BASE").unwrap_or_else(|| DEFAULT_LINK_BASE.to_string()),
            brand: var("STOREFRONT_BRAND").unwrap_or_else(|| DEFAULT_BRAND.to_string()),
            cache_dir: var("STOREFRONT_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| env::temp_dir().join("storefront-share")),
            download_timeout,
            batch_policy,
        }
    }

    pub fn composer(&self) -> ShareComposer {
        ShareComposer::new(&self.brand, &self.link_base)
    }
}
