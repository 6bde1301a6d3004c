/// Data layer: core types, loading, and chart derivation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, site / booster lookups
///   └──────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  site + payload-range controls → chart tables
///   └───────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
