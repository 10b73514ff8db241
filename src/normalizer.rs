use crate::model::{CanonicalRecord, Offer, Platform, RawRecord, RawStoreOffer};
use crate::parser::regular_price_from_text;
use crate::utils::{fold_case, non_empty};
use tracing::debug;

pub fn normalize_all(raws: Vec<RawRecord>) -> Vec<CanonicalRecord> {
    raws.into_iter().map(normalize).collect()
}

/// Builds the canonical record for one catalog entry. Never fails: missing or
/// malformed fields come out as `None` or empty.
pub fn normalize(raw: RawRecord) -> CanonicalRecord {
    let offers = extract_offers(raw.stores);
    let best_price = offers.first().map(|o| o.price);

    let regular_price = best_price.and_then(|best| {
        offers
            .iter()
            .find_map(|o| o.price_raw.as_deref())
            .and_then(|raw| regular_price_from_text(raw, best))
    });

    let discount_percent = match (best_price, regular_price) {
        (Some(best), Some(regular)) => discount_percent(best, regular),
        _ => None,
    };

    let source_url = non_empty(raw.source_url);
    let platform = detect_platform(source_url.as_deref());
    let analysis = raw.analysis.unwrap_or_default();
    let title = raw.title.unwrap_or_default();

    debug!(
        "Normalized '{}': {} offers, best {:?}, regular {:?}",
        title,
        offers.len(),
        best_price,
        regular_price
    );

    CanonicalRecord {
        title,
        cover_url: raw.cover_url.unwrap_or_default(),
        platform,
        rating: analysis.rating,
        avg_hours: analysis.avg_hours,
        review_count: analysis.review_count.and_then(review_count_from),
        offers,
        regular_price,
        discount_percent,
        source_url,
    }
}

/// Keeps the stores that carry a finite numeric price, cheapest first.
/// Equal prices keep their mapping order.
fn extract_offers(stores: impl IntoIterator<Item = (String, RawStoreOffer)>) -> Vec<Offer> {
    let mut offers: Vec<Offer> = stores
        .into_iter()
        .filter_map(|(store_key, store)| {
            let price = store.price_number.filter(|p| p.is_finite())?;
            Some(Offer {
                store_key,
                store_name: store.store_name.unwrap_or_default(),
                url: non_empty(store.url),
                price,
                price_raw: non_empty(store.price_raw),
            })
        })
        .collect();
    offers.sort_by(|a, b| a.price.total_cmp(&b.price));
    offers
}

fn review_count_from(raw: f64) -> Option<u64> {
    (raw.is_finite() && raw >= 0.0).then(|| raw.round() as u64)
}

/// `round(100 × (1 − price / regular))`, rounding halves up.
pub fn discount_percent(price: f64, regular: f64) -> Option<i64> {
    if regular == 0.0 {
        return None;
    }
    let percent = (100.0 * (1.0 - price / regular) + 0.5).floor();
    percent.is_finite().then_some(percent as i64)
}

/// Discount of a single store listing against the record's regular price.
pub fn offer_discount_percent(offer: &Offer, regular_price: Option<f64>) -> Option<i64> {
    regular_price.and_then(|regular| discount_percent(offer.price, regular))
}

/// Guesses the platform from the record's source URL. Rules are checked in order
/// and the first hit wins, so a URL mentioning both "ps" and "xbox" is PlayStation.
pub fn detect_platform(source_url: Option<&str>) -> Platform {
    let Some(url) = source_url else {
        return Platform::Pc;
    };
    let url = fold_case(url);
    let has = |needle: &str| url.contains(needle);

    if has("steam") || has("pc") {
        Platform::Pc
    } else if has("playstation") || has("ps") {
        Platform::PlayStation
    } else if has("xbox") {
        Platform::Xbox
    } else if has("switch") {
        Platform::Switch
    } else {
        Platform::Pc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawAnalysis;

    fn store(name: &str, price: Option<f64>, raw: Option<&str>) -> RawStoreOffer {
        RawStoreOffer {
            store_name: Some(name.to_string()),
            url: Some(format!("https://{}.example/game", name.to_lowercase())),
            price_number: price,
            price_raw: raw.map(str::to_string),
        }
    }

    fn record(stores: Vec<(&str, RawStoreOffer)>) -> RawRecord {
        RawRecord {
            title: Some("Hollow Knight".to_string()),
            cover_url: Some("https://img.example/hk.jpg".to_string()),
            analysis: Some(RawAnalysis {
                rating: Some(4.8),
                avg_hours: Some(27.5),
                review_count: Some(12_345.0),
            }),
            source_url: Some("https://store.steampowered.com/app/367520".to_string()),
            stores: stores.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }

    #[test]
    fn drops_stores_without_a_finite_price() {
        let canonical = normalize(record(vec![
            ("a", store("A", None, Some("$10"))),
            ("b", store("B", Some(f64::NAN), None)),
            ("c", store("C", Some(f64::INFINITY), None)),
            ("d", store("D", Some(7.5), None)),
        ]));
        let keys: Vec<&str> = canonical.offers.iter().map(|o| o.store_key.as_str()).collect();
        assert_eq!(keys, ["d"]);
    }

    #[test]
    fn offers_are_sorted_and_ties_keep_mapping_order() {
        let canonical = normalize(record(vec![
            ("gog", store("GOG", Some(9.0), None)),
            ("steam", store("Steam", Some(5.0), None)),
            ("epic", store("Epic", Some(5.0), None)),
        ]));
        let keys: Vec<&str> = canonical.offers.iter().map(|o| o.store_key.as_str()).collect();
        assert_eq!(keys, ["steam", "epic", "gog"]);
        assert_eq!(canonical.best_price(), Some(5.0));
    }

    #[test]
    fn duplicate_store_names_are_kept() {
        let canonical = normalize(record(vec![
            ("steam_a", store("Steam", Some(5.0), None)),
            ("steam_b", store("Steam", Some(6.0), None)),
        ]));
        assert_eq!(canonical.offers.len(), 2);
    }

    #[test]
    fn regular_price_uses_first_offer_with_raw_text() {
        let canonical = normalize(record(vec![
            ("a", store("A", Some(20.0), Some("$40.00$20.00"))),
            ("b", store("B", Some(10.0), Some(""))),
            ("c", store("C", Some(15.0), Some("$30.00$15.00"))),
        ]));
        // Sorted offers are b (empty text), c, a; c carries the first usable text.
        assert_eq!(canonical.regular_price, Some(30.0));
        assert_eq!(canonical.discount_percent, Some(67));
    }

    #[test]
    fn discount_rounds_half_up() {
        assert_eq!(discount_percent(87.5, 100.0), Some(13));
        assert_eq!(discount_percent(13.49, 14.99), Some(10));
        assert_eq!(discount_percent(5.0, 0.0), None);
    }

    #[test]
    fn offer_discount_needs_a_regular_price() {
        let offer = Offer {
            store_key: "steam".into(),
            store_name: "Steam".into(),
            url: None,
            price: 15.0,
            price_raw: None,
        };
        assert_eq!(offer_discount_percent(&offer, Some(20.0)), Some(25));
        assert_eq!(offer_discount_percent(&offer, None), None);
    }

    #[test]
    fn empty_strings_become_absent() {
        let mut raw = record(vec![("a", store("A", Some(1.0), Some("")))]);
        raw.cover_url = None;
        raw.source_url = Some(String::new());
        raw.stores["a"].url = Some(String::new());
        let canonical = normalize(raw);
        assert_eq!(canonical.cover_url, "");
        assert_eq!(canonical.source_url, None);
        assert_eq!(canonical.offers[0].url, None);
        assert_eq!(canonical.offers[0].price_raw, None);
    }

    #[test]
    fn quality_signals_are_not_defaulted() {
        let mut raw = record(vec![]);
        raw.analysis = None;
        let canonical = normalize(raw);
        assert_eq!(canonical.rating, None);
        assert_eq!(canonical.avg_hours, None);
        assert_eq!(canonical.review_count, None);
    }

    #[test]
    fn review_count_accepts_any_non_negative_number() {
        let mut raw = record(vec![]);
        raw.analysis = Some(RawAnalysis {
            review_count: Some(250_000.0),
            ..Default::default()
        });
        assert_eq!(normalize(raw.clone()).review_count, Some(250_000));

        raw.analysis = Some(RawAnalysis {
            review_count: Some(-3.0),
            ..Default::default()
        });
        assert_eq!(normalize(raw).review_count, None);
    }

    #[test]
    fn zero_rating_is_kept() {
        let mut raw = record(vec![]);
        raw.analysis = Some(RawAnalysis {
            rating: Some(0.0),
            ..Default::default()
        });
        assert_eq!(normalize(raw).rating, Some(0.0));
    }

    #[test]
    fn platform_rules_in_priority_order() {
        assert_eq!(detect_platform(None), Platform::Pc);
        assert_eq!(detect_platform(Some("https://STORE.STEAMPOWERED.com")), Platform::Pc);
        assert_eq!(detect_platform(Some("https://store.playstation.com/xbox-bundle")), Platform::PlayStation);
        assert_eq!(detect_platform(Some("http://www.xbox.com/games")), Platform::Xbox);
        assert_eq!(detect_platform(Some("http://nintendo.com/switch/game")), Platform::Switch);
        assert_eq!(detect_platform(Some("http://example.com")), Platform::Pc);
        assert_eq!(detect_platform(Some("http://example.com/PS5")), Platform::PlayStation);
    }

    #[test]
    fn platform_substring_quirks() {
        // "ps" inside "https" makes every https URL without "pc"/"steam" a PlayStation URL.
        assert_eq!(detect_platform(Some("https://www.xbox.com")), Platform::PlayStation);
        assert_eq!(detect_platform(Some("http://www.xbox.com")), Platform::Xbox);
    }
}
