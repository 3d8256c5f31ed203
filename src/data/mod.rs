/// Data layer: sheet reading, typed tables, memoised loading and selection.
///
/// Architecture:
/// ```text
///  .xlsx / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  sheet    │  first worksheet → RawSheet → header + rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fixed layouts → SalaryTable / StatusTable / CountryTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  CachedTable: load once, share as Arc
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  user selection → rows for one chart
///   └──────────┘
/// ```

pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sheet;
