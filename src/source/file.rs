use crate::model::{CatalogLoadError, RawRecord};
use crate::source::{decode_catalog, CatalogSource};

use std::path::PathBuf;
use tracing::info;

/// Reads a catalog snapshot saved on disk.
pub struct FileCatalogSource {
    pub path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch_raw_catalog(&self) -> Result<Vec<RawRecord>, CatalogLoadError> {
        info!("Reading catalog from {}", self.path.display());
        let body = tokio::fs::read(&self.path).await?;
        decode_catalog(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
