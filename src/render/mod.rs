/// Presentation layer: draws an assembled [`ComparisonPlot`] and exports it.
///
/// ```text
///   ComparisonPlot ──plot──▶ SVG text ──output──▶ <name>.pdf
///                                           └──▶ <name>.png
/// ```

pub mod config;
pub mod output;
pub mod plot;

use std::path::PathBuf;

use thiserror::Error;

use crate::state::ComparisonPlot;

pub use config::RenderConfig;
pub use output::OutputFormat;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("drawing error: {0}")]
    Drawing(String),
    #[error("SVG parsing error: {0}")]
    Svg(String),
    #[error("PNG encoding error: {0}")]
    Png(String),
    #[error("PDF conversion error: {0}")]
    Pdf(String),
    #[error("style error: {0}")]
    Style(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Draw the plot once and write `<base>.pdf` and `<base>.png`.
/// The extension is appended, so `-o plot.v2` gives `plot.v2.pdf`.
pub fn write_outputs(
    plot: &ComparisonPlot,
    config: &RenderConfig,
    base: &str,
) -> Result<Vec<PathBuf>> {
    let svg = plot::draw_svg(plot, config)?;

    let mut written = Vec::with_capacity(OutputFormat::ALL.len());
    for format in OutputFormat::ALL {
        let path = PathBuf::from(format!("{base}.{}", format.extension()));
        let bytes = format.encode(&svg, config)?;
        std::fs::write(&path, bytes)?;
        log::info!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
