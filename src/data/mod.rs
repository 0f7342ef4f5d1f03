/// Data layer: core types, loading, masking and aggregation.
///
/// Architecture:
/// ```text
///  actual_i.csv        expected_i.csv
///        │                    │
///        ▼                    ▼
///   ┌──────────┐        ┌──────────┐
///   │  loader   │        │  loader   │  parse file → Table
///   └──────────┘        └──────────┘
///        │                    │
///        ▼                    │
///   ┌──────────┐              │
///   │  filter   │ ValidityMask ─┤  same rows kept in both
///   └──────────┘              │
///        │                    ▼
///        └─────────►┌────────────┐
///                   │ aggregate   │  → CarResult
///                   └────────────┘
///                         │
///                         ▼
///                   ┌────────────┐
///                   │   batch     │  one CarResult per car → ResultSet
///                   └────────────┘
/// ```

pub mod aggregate;
pub mod batch;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
