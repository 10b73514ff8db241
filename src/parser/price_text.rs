// Store price-text parsing
use regex::Regex;
use std::sync::LazyLock;

static NUMBER_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9.]+").expect("valid regex"));

/// Pulls every run of digits and dots out of a raw price string and parses it.
///
/// Stores concatenate the struck-through and the current price with no separator
/// (`"$14.99$13.49"`), so each run is read independently. Currency symbols are
/// ignored. Runs that do not parse as a number (`"."`, `"1.2.3"`) are dropped.
/// The result is sorted from highest to lowest.
pub fn extract_prices(raw: &str) -> Vec<f64> {
    let mut prices: Vec<f64> = NUMBER_RUN
        .find_iter(raw)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .collect();
    prices.sort_by(|a, b| b.total_cmp(a));
    prices
}

/// The highest price in `raw` that is strictly above `current`, if any.
pub fn regular_price_from_text(raw: &str, current: f64) -> Option<f64> {
    extract_prices(raw).into_iter().find(|&n| n > current)
}
