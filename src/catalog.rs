use crate::model::CatalogLoadError;
use crate::normalizer::normalize_all;
use crate::source::CatalogSource;
use crate::view::CollectionView;
use chrono::{DateTime, Utc};
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Unloaded,
    Loaded { at: DateTime<Utc>, records: usize },
    Failed { at: DateTime<Utc>, reason: String },
}

/// Owns the collection view and tracks whether a snapshot has been loaded.
///
/// `load` takes `&mut self`, so loads never overlap. A failed load leaves the
/// previous snapshot in place.
#[derive(Debug)]
pub struct Catalog {
    view: CollectionView,
    state: LoadState,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            view: CollectionView::new(),
            state: LoadState::Unloaded,
        }
    }

    pub async fn load(&mut self, source: &dyn CatalogSource) -> Result<usize, CatalogLoadError> {
        info!("Loading catalog from {}...", source.describe());
        let raws = match source.fetch_raw_catalog().await {
            Ok(raws) => raws,
            Err(e) => {
                error!("Catalog load failed: {}", e);
                self.state = LoadState::Failed {
                    at: Utc::now(),
                    reason: e.to_string(),
                };
                return Err(e);
            }
        };

        let records = normalize_all(raws);
        let count = records.len();
        let priced = records.iter().filter(|r| r.best_offer().is_some()).count();
        self.view.replace_snapshot(records);
        self.state = LoadState::Loaded {
            at: Utc::now(),
            records: count,
        };
        info!("Catalog loaded: {} games, {} with a price", count, priced);
        Ok(count)
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, LoadState::Loaded { .. })
    }

    pub fn view(&self) -> &CollectionView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut CollectionView {
        &mut self.view
    }
}
