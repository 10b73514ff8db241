use crate::model::{CatalogLoadError, RawRecord};

#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Returns the full raw catalog, or one error with no partial results.
    async fn fetch_raw_catalog(&self) -> Result<Vec<RawRecord>, CatalogLoadError>;

    /// Where the catalog comes from, for logs.
    fn describe(&self) -> String;
}
