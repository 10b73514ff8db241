use crate::model::CanonicalRecord;
use feruca::Collator;
use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The orderings a catalog view supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Name,
    PriceAsc,
    PriceDesc,
    RatingDesc,
    DiscountDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Name,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::RatingDesc,
        SortKey::DiscountDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::PriceAsc => "priceAsc",
            SortKey::PriceDesc => "priceDesc",
            SortKey::RatingDesc => "ratingDesc",
            SortKey::DiscountDesc => "discountDesc",
        }
    }

    /// Orders `indices`, which point into `records`, by this key.
    pub fn sort_indices(&self, records: &[CanonicalRecord], indices: &mut [usize]) {
        match self {
            SortKey::Name => {
                let mut collator = Collator::default();
                indices.sort_by(|&a, &b| {
                    collator.collate(records[a].title.as_str(), records[b].title.as_str())
                });
            }
            _ => indices.sort_by(|&a, &b| self.compare(&records[a], &records[b])),
        }
    }

    pub fn compare(&self, a: &CanonicalRecord, b: &CanonicalRecord) -> Ordering {
        match self {
            SortKey::Name => compare_titles(&a.title, &b.title),
            // Unpriced records go last in both directions.
            SortKey::PriceAsc => {
                let pa = a.best_price().unwrap_or(f64::INFINITY);
                let pb = b.best_price().unwrap_or(f64::INFINITY);
                pa.total_cmp(&pb)
            }
            SortKey::PriceDesc => {
                let pa = a.best_price().unwrap_or(0.0);
                let pb = b.best_price().unwrap_or(0.0);
                pb.total_cmp(&pa)
            }
            SortKey::RatingDesc => b.rating.unwrap_or(0.0).total_cmp(&a.rating.unwrap_or(0.0)),
            SortKey::DiscountDesc => b
                .discount_percent
                .unwrap_or(0)
                .cmp(&a.discount_percent.unwrap_or(0)),
        }
    }
}

/// Locale-aware title order (CLDR root collation): accented letters sort with
/// their base letter, and lowercase comes before uppercase on otherwise equal titles.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    Collator::default().collate(a, b)
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str().to_ascii_lowercase() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown sort key '{}', expected one of: name, priceAsc, priceDesc, ratingDesc, discountDesc",
                    s
                )
            })
    }
}
