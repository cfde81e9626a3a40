/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, cached facets
///   └──────────┘
///        │
///        ▼
///    view::graph / view::table (derived projections)
/// ```
pub mod loader;
pub mod model;
