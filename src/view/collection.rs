use crate::model::CanonicalRecord;
use crate::utils::fold_case;
use crate::view::sort::SortKey;
use std::sync::Arc;

/// Holds one normalized catalog snapshot plus the search term and sort key
/// currently applied to it.
///
/// The visible sequence is rebuilt on every change: filter first, then sort.
/// It stores positions into the snapshot, never copies of records.
#[derive(Debug, Clone, Default)]
pub struct CollectionView {
    snapshot: Arc<Vec<CanonicalRecord>>,
    search_term: String,
    sort_key: SortKey,
    visible: Vec<usize>,
}

impl CollectionView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<CanonicalRecord>) -> Self {
        let mut view = Self::new();
        view.replace_snapshot(records);
        view
    }

    /// Swaps in a new snapshot. The only way the records change.
    pub fn replace_snapshot(&mut self, records: Vec<CanonicalRecord>) {
        self.snapshot = Arc::new(records);
        self.recompute();
    }

    /// Shared handle to the current snapshot, unaffected by later replacements.
    pub fn snapshot(&self) -> Arc<Vec<CanonicalRecord>> {
        Arc::clone(&self.snapshot)
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.recompute();
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
        self.recompute();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Records matching the search term, in the selected order.
    pub fn visible(&self) -> impl Iterator<Item = &CanonicalRecord> + '_ {
        self.visible.iter().map(|&i| &self.snapshot[i])
    }

    pub fn visible_records(&self) -> Vec<&CanonicalRecord> {
        self.visible().collect()
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Size of the whole snapshot, ignoring the search term.
    pub fn total(&self) -> usize {
        self.snapshot.len()
    }

    /// Looks a record up by title across the whole snapshot. With duplicate
    /// titles the first one in catalog order is returned.
    pub fn get_by_id(&self, id: &str) -> Option<&CanonicalRecord> {
        self.snapshot.iter().find(|r| r.id() == id)
    }

    fn recompute(&mut self) {
        let needle = fold_case(self.search_term.trim());
        let records = &self.snapshot;

        let mut visible: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, r)| needle.is_empty() || fold_case(&r.title).contains(&needle))
            .map(|(i, _)| i)
            .collect();

        self.sort_key.sort_indices(records, &mut visible);
        self.visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Offer, Platform};

    fn game(title: &str, price: Option<f64>) -> CanonicalRecord {
        CanonicalRecord {
            title: title.to_string(),
            cover_url: String::new(),
            platform: Platform::Pc,
            rating: None,
            avg_hours: None,
            review_count: None,
            offers: price
                .map(|p| Offer {
                    store_key: "steam".into(),
                    store_name: "Steam".into(),
                    url: None,
                    price: p,
                    price_raw: None,
                })
                .into_iter()
                .collect(),
            regular_price: None,
            discount_percent: None,
            source_url: None,
        }
    }

    fn titles(view: &CollectionView) -> Vec<&str> {
        view.visible().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn new_view_is_empty() {
        let view = CollectionView::new();
        assert!(view.is_empty());
        assert_eq!(view.total(), 0);
    }

    #[test]
    fn search_is_trimmed_and_case_insensitive() {
        let mut view = CollectionView::with_records(vec![game("Portal", None), game("Portal 2", None), game("Braid", None)]);
        view.set_search_term("  PORTAL ");
        assert_eq!(titles(&view), ["Portal", "Portal 2"]);
        view.set_search_term("");
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn replacing_snapshot_keeps_search_and_sort() {
        let mut view = CollectionView::with_records(vec![game("Braid", Some(9.0))]);
        view.set_search_term("a");
        view.set_sort_key(SortKey::PriceDesc);
        let old = view.snapshot();

        view.replace_snapshot(vec![game("Limbo", Some(5.0)), game("Fez", Some(8.0)), game("Spelunky", Some(15.0))]);
        assert!(view.is_empty());
        view.set_search_term("e");
        assert_eq!(titles(&view), ["Spelunky", "Fez"]);
        assert_eq!(old.len(), 1);
    }

    #[test]
    fn lookup_ignores_the_filter() {
        let mut view = CollectionView::with_records(vec![game("Inside", None), game("Limbo", None)]);
        view.set_search_term("inside");
        assert_eq!(view.get_by_id("Limbo").map(|r| r.title.as_str()), Some("Limbo"));
        assert!(view.get_by_id("limbo").is_none());
    }

    #[test]
    fn lookup_with_duplicate_titles_returns_first() {
        let view = CollectionView::with_records(vec![game("Doom", Some(20.0)), game("Doom", Some(5.0))]);
        assert_eq!(view.get_by_id("Doom").and_then(|r| r.best_price()), Some(20.0));
    }
}
