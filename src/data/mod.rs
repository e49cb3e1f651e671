/// Data layer: core types, loading, caching, and filtering.
///
/// Architecture:
/// ```text
///  zimra_data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read_records → augment (revenue threshold, quadrants)
///   └──────────┘
///        │            ┌──────────┐
///        ├───────────▶│  cache    │  memoized per path + file signature
///        ▼            └──────────┘
///   ┌──────────────┐
///   │    Table      │  Vec<TaxpayerRecord>, revenue threshold
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterMode → filtered Table + Summary
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ breakdown  │  score ordering, region/sector bars
///   └───────────┘
/// ```

pub mod breakdown;
pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
