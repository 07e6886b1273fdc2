/// Data layer: core types, loading, cleaning, statistics and export.
///
/// Architecture:
/// ```text
///   uploaded .csv bytes
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → Table (kinds inferred per column)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  store    │  the session's working Table
///   └──────────┘
///        │
///        ├──► cleaner    drop missing / duplicate rows → new Table
///        ├──► summary    shape, describe
///        ├──► histogram  numeric columns → bins
///        └──► export     Table → CSV bytes
/// ```

pub mod cleaner;
pub mod export;
pub mod histogram;
pub mod loader;
pub mod model;
pub mod store;
pub mod summary;
