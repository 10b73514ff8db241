use crate::model::{CatalogLoadError, RawRecord};
use crate::source::{decode_catalog, CatalogSource};

use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) GameDeals/0.1";

/// Downloads the catalog as a JSON array over HTTP.
pub struct HttpCatalogSource {
    pub client: Client,
    pub url: String,
}

impl HttpCatalogSource {
    pub fn new(url: &str, timeout_seconds: u64, user_agent: &str) -> Result<Self, CatalogLoadError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_raw_catalog(&self) -> Result<Vec<RawRecord>, CatalogLoadError> {
        info!("Fetching catalog from {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Catalog request failed [{}]: {}", status, self.url);
            return Err(CatalogLoadError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.bytes().await?;
        let records = decode_catalog(&body)?;
        info!("Fetched {} raw records ({} bytes)", records.len(), body.len());
        Ok(records)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
