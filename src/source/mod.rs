pub mod fetcher;
pub mod file;
pub mod traits;

pub use fetcher::HttpCatalogSource;
pub use file::FileCatalogSource;
pub use traits::CatalogSource;

use crate::model::{CatalogLoadError, RawRecord};

/// Decodes a whole catalog body. Any element that is not an object fails the load.
pub fn decode_catalog(body: &[u8]) -> Result<Vec<RawRecord>, CatalogLoadError> {
    Ok(serde_json::from_slice(body)?)
}
