use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use xsratio::data::loader::save_table;
use xsratio::data::model::Sample;

/// Write a synthetic cross-section table, `xs(m) = scale * exp(-m / slope)`,
/// for trying out the plotter.
#[derive(Debug, Parser)]
#[command(name = "generate_table")]
struct Args {
    /// First mass point
    #[arg(long, default_value_t = 100.0)]
    mass_min: f64,

    /// Last mass point (inclusive when it lies on the grid)
    #[arg(long, default_value_t = 1000.0)]
    mass_max: f64,

    /// Mass step
    #[arg(long, default_value_t = 25.0)]
    step: f64,

    /// Cross section extrapolated to m = 0, in fb
    #[arg(long, default_value_t = 1.0e4)]
    scale: f64,

    /// Exponential fall-off length in mass units
    #[arg(long, default_value_t = 150.0)]
    slope: f64,

    /// Relative uncertainty of every point
    #[arg(long, default_value_t = 0.05)]
    rel_unc: f64,

    /// Output table
    #[arg(short = 'o', default_value = "table.txt")]
    output: PathBuf,
}

fn falling_table(args: &Args) -> Vec<Sample> {
    let n = ((args.mass_max - args.mass_min) / args.step + 1e-9).floor() as usize + 1;
    (0..n)
        .map(|i| {
            let mass = args.mass_min + i as f64 * args.step;
            let xs = args.scale * (-mass / args.slope).exp();
            Sample::new(mass, xs, xs * args.rel_unc)
        })
        .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.step <= 0.0 || args.mass_max <= args.mass_min {
        bail!("need step > 0 and mass-max > mass-min");
    }

    let samples = falling_table(&args);
    save_table(&args.output, &samples)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!(
        "Wrote {} samples ({} .. {}) to {}",
        samples.len(),
        args.mass_min,
        args.mass_max,
        args.output.display()
    );
    Ok(())
}
