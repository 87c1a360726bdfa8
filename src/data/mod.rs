/// Data layer: core types, loading, caching and filtering.
///
/// Architecture:
/// ```text
///   Indian_IPO_Market_Data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  memoize by path + mtime + size
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → IpoTable (or empty + LoadError)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year selection → filtered IpoTable
///   └──────────┘
/// ```

pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
