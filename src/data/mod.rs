/// Data layer: survey types, loading, filtering and derived artifacts.
///
/// Architecture:
/// ```text
///   Book1.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → SurveyTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ SurveyTable  │  Vec<SurveyRow>, immutable, shared via Arc
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Selection → included row indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ pipeline  │  rows, comparison series, correlation, stats
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod stats;
