use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::render::{self, RenderConfig};
use crate::state::{ComparisonPlot, PlotRequest};

const ABOUT: &str = "Plot cross section tables and their ratios";

const LONG_ABOUT: &str = "\
Plot cross section tables (mass, cross section, uncertainty per line).
Tables can be added as numerator or denominator. This only affects the ratio
panel: without a denominator table no ratio panel is shown; with one, every
table is divided by it. There can only be one denominator table.";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(name = "xsratio", version, about = ABOUT, long_about = LONG_ABOUT)]
pub struct Cli {
    /// Denominator table
    #[arg(short = 'd', value_name = "TABLE")]
    pub denominator: Option<PathBuf>,

    /// Numerator table (repeatable)
    #[arg(short = 'n', value_name = "TABLE")]
    pub numerators: Vec<PathBuf>,

    /// Legend entry for tables, denominator first (repeatable)
    #[arg(short = 'l', value_name = "LABEL")]
    pub labels: Vec<String>,

    /// Title of the plot
    #[arg(short = 't', value_name = "TITLE", default_value = "")]
    pub title: String,

    /// Output name; writes <NAME>.pdf and <NAME>.png
    #[arg(short = 'o', value_name = "NAME", default_value = "name")]
    pub output: String,

    /// JSON file overriding the default plot style
    #[arg(short = 's', long = "style", value_name = "FILE")]
    pub style: Option<PathBuf>,
}

impl Cli {
    pub fn request(&self) -> PlotRequest {
        PlotRequest {
            denominator: self.denominator.clone(),
            numerators: self.numerators.clone(),
            labels: self.labels.clone(),
            title: self.title.clone(),
        }
    }

    fn render_config(&self) -> Result<RenderConfig> {
        match &self.style {
            Some(path) => RenderConfig::from_json_file(path)
                .with_context(|| format!("loading style {}", path.display())),
            None => Ok(RenderConfig::default()),
        }
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Load, assemble and write the plot. Returns the written files; none when
/// no numerator table was given.
pub fn run(cli: &Cli) -> Result<Vec<PathBuf>> {
    if cli.numerators.is_empty() {
        println!("Please define at least one table for the numerator.");
        println!("Exit.");
        return Ok(Vec::new());
    }

    let config = cli.render_config()?;
    let plot = ComparisonPlot::assemble(&cli.request())?;
    let written = render::write_outputs(&plot, &config, &cli.output)
        .with_context(|| format!("writing {}.pdf / {}.png", cli.output, cli.output))?;
    Ok(written)
}
