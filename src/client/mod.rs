//! Census Data API client
//!
//! One `CensusClient` serves every survey family; the per-family request
//! methods live in the submodules (`acs`, `business`, `economy`,
//! `timeseries`) and all funnel through [`CensusClient::fetch`].

mod acs;
mod business;
mod economy;
mod timeseries;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::error::{CensusError, Result};
use crate::models::Table;
use crate::query::QueryBuilder;

/// Client for the US Census Bureau Data API
pub struct CensusClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    cache: Option<ResponseCache>,
    offline: bool,
}

impl CensusClient {
    /// Create a client with default configuration and no API key
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        let client = Client::builder()
            .user_agent(config.api.user_agent.clone())
            .timeout(Duration::from_secs(config.network.timeout))
            .build()
            .unwrap_or_default();

        let cache = if config.cache.enabled {
            Some(ResponseCache::new(
                config.cache_dir().join("responses"),
                config.cache.max_age_hours,
            ))
        } else {
            None
        };

        Self {
            client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            api_key: config.api.key.clone(),
            cache,
            offline: config.network.offline,
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Disable the response cache
    pub fn without_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    /// Toggle offline mode (serve cached responses only)
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// The configured API key, or an error for keyed endpoints
    fn require_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(CensusError::MissingApiKey)
    }

    /// Start a query against the configured base URL
    fn query(&self, path: impl Into<String>) -> QueryBuilder {
        QueryBuilder::new(self.base_url.as_str(), path)
    }

    /// Run a query: cache lookup, HTTPS GET, wire-format decode, cache store
    async fn fetch(&self, query: QueryBuilder, hint: &str) -> Result<Table> {
        let cache_url = query.cache_url();

        if self.offline {
            if let Some(cache) = &self.cache {
                if let Some(table) = cache.load(&cache_url, true) {
                    debug!("offline cache hit for {}", cache_url);
                    return Ok(table);
                }
            }
            return Err(CensusError::Offline(format!(
                "no cached response for {}",
                cache_url
            )));
        }

        if let Some(cache) = &self.cache {
            if let Some(table) = cache.load(&cache_url, false) {
                debug!("cache hit for {}", cache_url);
                return Ok(table);
            }
        }

        // cache_url in logs, never the keyed URL
        debug!("GET {}", cache_url);
        let response = self.client.get(query.url()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CensusError::api(status.as_u16(), hint));
        }

        let body: serde_json::Value = response.json().await?;
        let table = Table::from_value(body)?;
        debug!("decoded {} rows x {} columns", table.len(), table.width());

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.store(&cache_url, &table) {
                warn!("failed to cache response: {}", e);
            }
        }

        Ok(table)
    }
}

impl Default for CensusClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_key() {
        let client = CensusClient::new();
        assert!(matches!(
            client.require_key(),
            Err(CensusError::MissingApiKey)
        ));

        let client = client.with_api_key("MYKEY");
        assert_eq!(client.require_key().unwrap(), "MYKEY");
    }

    #[tokio::test]
    async fn test_offline_without_cache_is_an_error() {
        let client = CensusClient::new().without_cache().offline(true);
        let result = client.health_insurance(2018, Some("02"), None).await;
        assert!(matches!(result, Err(CensusError::Offline(_))));
    }
}
