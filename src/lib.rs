pub mod catalog;
pub mod config;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod presenter;
pub mod source;
pub mod utils;
pub mod view;

pub use catalog::{Catalog, LoadState};
pub use model::{CanonicalRecord, CatalogLoadError, Offer, Platform, RawRecord, RawStoreOffer};
pub use normalizer::{normalize, normalize_all};
pub use view::{CollectionView, SortKey};
