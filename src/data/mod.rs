/// Data layer: table parsing, binning, ratios and axis ranges.
///
/// Architecture:
/// ```text
///  .txt / .dat / .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<Sample>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  series   │  uniform bin edges → Series
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  ratio    │  divide by the denominator → RatioSeries
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  range    │  min / max over series → display ranges
///   └──────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
pub mod range;
pub mod ratio;
pub mod series;

pub use error::DataError;
