/// Data layer: path schema, loading, filtering and the trace store.
///
/// Architecture:
/// ```text
///   <root>/**/*.csv
///        │
///        ▼
///   ┌──────────┐
///   │ discover  │  walk root → candidate paths
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  substring allow-lists on path keys
///   └──────────┘
///        │
///        ▼
///   ┌───────────────────┐
///   │ classify + parse   │  PathSchema → TraceKey, file → Trace
///   └───────────────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ TraceStore  │  modem → mode → metric → trial → Trace
///   └────────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;
pub mod store;
