use std::path::PathBuf;

use thiserror::Error;

/// Failures of the table-to-series pipeline.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("table not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("{}:{line}: {reason}", path.display())]
    Format {
        path: PathBuf,
        /// 1-based line (or record) number.
        line: usize,
        reason: String,
    },

    #[error("series '{name}' needs at least 2 samples to infer a bin width, got {count}")]
    InsufficientData { name: String, count: usize },

    #[error(
        "cannot divide '{numerator}' ({numerator_bins} bins) by '{denominator}' ({denominator_bins} bins)"
    )]
    LengthMismatch {
        numerator: String,
        numerator_bins: usize,
        denominator: String,
        denominator_bins: usize,
    },

    #[error("cannot compute a value range: {0}")]
    EmptyInput(String),

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
