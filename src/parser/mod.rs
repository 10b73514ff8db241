// Parsing of the free-form price text that stores attach to a listing.

pub mod price_text;

pub use price_text::{extract_prices, regular_price_from_text};
