/// Data layer: core types, loading, filtering, aggregation, and export.
///
/// Architecture:
/// ```text
///       data.csv
///          │
///          ▼
///    ┌──────────┐
///    │  loader   │  parse + repair → EmployeeTable (cached per session)
///    └──────────┘
///          │
///          ▼
///    ┌───────────────┐
///    │ EmployeeTable  │  Vec<Employee>, distinct-value and numeric indices
///    └───────────────┘
///          │
///          ▼
///    ┌──────────┐      ┌──────────┐
///    │  filter   │ ───▶ │  stats    │  criteria → subset → aggregates
///    └──────────┘      └──────────┘
///          │
///          ▼
///    ┌──────────┐
///    │  export   │  subset → CSV bytes
///    └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
