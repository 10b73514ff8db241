// Terminal rendering of catalog views and game details.
use crate::model::CanonicalRecord;
use crate::normalizer::offer_discount_percent;
use crate::view::CollectionView;
use num_format::{Locale, ToFormattedString};
use std::fmt::Write;

pub const MISSING: &str = "—";

pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) => format!("${:.2}", p),
        None => "N/D".to_string(),
    }
}

pub fn format_discount(percent: i64) -> String {
    format!("-{}%", percent)
}

/// Groups digits in threes: 12345 -> "12,345".
pub fn format_count(count: u64) -> String {
    count.to_formatted_string(&Locale::en)
}

pub fn results_summary(view: &CollectionView) -> String {
    match view.len() {
        0 => "No games match".to_string(),
        1 => "Showing 1 game".to_string(),
        n => format!("Showing {} games", n),
    }
}

/// One line per game, as shown in the list.
pub fn card_line(game: &CanonicalRecord) -> String {
    let mut line = format!(
        "{} [{}] {}",
        game.title,
        game.platform,
        format_price(game.best_price())
    );
    if let Some(regular) = game.regular_price {
        let _ = write!(line, " (was {})", format_price(Some(regular)));
    }
    if let Some(discount) = game.discount_percent.filter(|&d| d != 0) {
        let _ = write!(line, " {}", format_discount(discount));
    }
    if let Some(rating) = game.rating.filter(|&r| r != 0.0) {
        let _ = write!(line, " ★ {}", rating);
    }
    line
}

pub fn render_list(view: &CollectionView) -> String {
    let mut out = String::new();
    for game in view.visible() {
        out.push_str(&card_line(game));
        out.push('\n');
    }
    out.push_str(&results_summary(view));
    out
}

/// Full description of one game with its per-store offers.
pub fn render_detail(game: &CanonicalRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", game.title);
    let _ = writeln!(out, "Platform: {}", game.platform);
    let _ = writeln!(
        out,
        "Rating: {}",
        game.rating
            .filter(|&r| r != 0.0)
            .map_or_else(|| MISSING.to_string(), |r| format!("★ {}", r))
    );
    let _ = writeln!(
        out,
        "Average hours: {}",
        game.avg_hours.map_or_else(|| MISSING.to_string(), |h| h.to_string())
    );
    let _ = writeln!(
        out,
        "Reviews: {}",
        game.review_count
            .filter(|&c| c != 0)
            .map_or_else(|| MISSING.to_string(), format_count)
    );
    let _ = writeln!(
        out,
        "Best price: {}",
        game.best_price().map_or_else(|| MISSING.to_string(), |p| format_price(Some(p)))
    );
    let _ = writeln!(
        out,
        "Regular price: {}",
        game.regular_price.map_or_else(|| MISSING.to_string(), |p| format_price(Some(p)))
    );
    if let Some(discount) = game.discount_percent.filter(|&d| d != 0) {
        let _ = writeln!(out, "Discount: {}", format_discount(discount));
    }

    let _ = writeln!(out, "\nOffers:");
    for offer in &game.offers {
        let discount = offer_discount_percent(offer, game.regular_price)
            .map_or_else(|| MISSING.to_string(), |d| format!("{}%", d));
        let _ = writeln!(
            out,
            "  {:<20} {:>10} {:>6}  {}",
            offer.store_name,
            format_price(Some(offer.price)),
            discount,
            offer.url.as_deref().unwrap_or("")
        );
    }

    if let Some(url) = &game.source_url {
        let _ = writeln!(out, "\nSource: {}", url);
    }
    out
}
