// View module: search and ordering over a normalized catalog snapshot.

pub mod collection;
pub mod sort;

pub use collection::CollectionView;
pub use sort::SortKey;
