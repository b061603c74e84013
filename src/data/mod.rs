/// Data layer: core types, loading, statistics and categorization.
///
/// Architecture:
/// ```text
///  StressLevelDataset.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  locate + parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats   │  mean / Pearson r / scale5 → Summary
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ category │  column name → Category → marker shape
///   └──────────┘
/// ```

pub mod category;
pub mod loader;
pub mod model;
pub mod stats;
