// Core structs: RawRecord, Offer, CanonicalRecord and the error types
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::{lenient, lenient_stores};

/// One store listing as it arrives from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawStoreOffer {
    #[serde(rename = "StoreName", default, deserialize_with = "lenient")]
    pub store_name: Option<String>,
    #[serde(rename = "Url", default, deserialize_with = "lenient")]
    pub url: Option<String>,
    /// Only a JSON number is accepted here; anything else reads as absent.
    #[serde(rename = "PriceNumber", default, deserialize_with = "lenient")]
    pub price_number: Option<f64>,
    #[serde(rename = "PriceRaw", default, deserialize_with = "lenient")]
    pub price_raw: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawAnalysis {
    #[serde(rename = "Calificacion", default, deserialize_with = "lenient")]
    pub rating: Option<f64>,
    #[serde(rename = "HorasPromedio", default, deserialize_with = "lenient")]
    pub avg_hours: Option<f64>,
    /// Any JSON number; `250000.0` is as good as `250000`.
    #[serde(rename = "CantidadResenas", default, deserialize_with = "lenient")]
    pub review_count: Option<f64>,
}

/// A catalog entry before normalization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Nombre", default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(rename = "ImagenUrl", default, deserialize_with = "lenient")]
    pub cover_url: Option<String>,
    #[serde(rename = "Analisis", default, deserialize_with = "lenient")]
    pub analysis: Option<RawAnalysis>,
    #[serde(rename = "FuenteInicialUrl", default, deserialize_with = "lenient")]
    pub source_url: Option<String>,
    /// Keyed by store; document order is kept.
    #[serde(rename = "Tiendas", default, deserialize_with = "lenient_stores")]
    pub stores: IndexMap<String, RawStoreOffer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Platform {
    Pc,
    PlayStation,
    Xbox,
    Switch,
}

impl Platform {
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Pc => "PC",
            Platform::PlayStation => "PlayStation",
            Platform::Xbox => "Xbox",
            Platform::Switch => "Switch",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A store listing that carried a usable price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Offer {
    pub store_key: String,
    pub store_name: String,
    pub url: Option<String>,
    pub price: f64,
    pub price_raw: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    pub title: String,
    pub cover_url: String,
    pub platform: Platform,
    pub rating: Option<f64>,
    pub avg_hours: Option<f64>,
    pub review_count: Option<u64>,
    /// Sorted by price, cheapest first.
    pub offers: Vec<Offer>,
    pub regular_price: Option<f64>,
    pub discount_percent: Option<i64>,
    pub source_url: Option<String>,
}

impl CanonicalRecord {
    /// The title doubles as the identifier.
    pub fn id(&self) -> &str {
        &self.title
    }

    pub fn best_offer(&self) -> Option<&Offer> {
        self.offers.first()
    }

    pub fn best_price(&self) -> Option<f64> {
        self.best_offer().map(|o| o.price)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("catalog decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
