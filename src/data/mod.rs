/// Data layer: card types, loading, and filtering.
///
/// Architecture:
/// ```text
///  cardlist_filtered.csv / custom_cards.csv / cardlist_p_only.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  header mapping + field parsing → LoadReport
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ Vec<Card>   │  one entry per printing, rebuilt on every load
///   └────────────┘
///        │
///        ├──────────────────┐
///        ▼                  ▼
///   ┌──────────┐      ┌────────────┐
///   │  filter   │      │ FacetIndex  │  distinct values per facet
///   └──────────┘      └────────────┘
/// ```

pub mod error;
pub mod fields;
pub mod filter;
pub mod loader;
pub mod model;
