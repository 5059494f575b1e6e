use plotters::coord::Shift;
use plotters::prelude::*;

use super::{RenderConfig, RenderError, Result};
use crate::color::ColorId;
use crate::data::model::{Bin, Binned};
use crate::data::range::ValueRange;
use crate::state::ComparisonPlot;

const FONT: &str = "sans-serif";
const LEGEND_SWATCH: i32 = 20;

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

fn drawing<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

// ---------------------------------------------------------------------------
// Whole figure
// ---------------------------------------------------------------------------

/// Render the comparison plot to an SVG document.
///
/// With a denominator the figure is split into the cross-section panel
/// (log scale) on top and the ratio panel (linear) below; otherwise the
/// cross-section panel takes the whole figure.
pub fn draw_svg(plot: &ComparisonPlot, config: &RenderConfig) -> Result<String> {
    let span = plot
        .mass_span()
        .ok_or_else(|| RenderError::Drawing("plot has no bins".into()))?;
    let axes = std::iter::once(span)
        .chain(std::iter::once((plot.main_range.min, plot.main_range.max)))
        .chain(plot.ratio_range.map(|r| (r.min, r.max)));
    for (lo, hi) in axes {
        if !(lo.is_finite() && hi.is_finite()) {
            return Err(RenderError::Drawing(format!("axis range [{lo}, {hi}] is not finite")));
        }
    }
    let (width, height) = (config.figure.width, config.figure.height);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(drawing)?;

        match (plot.denominator(), plot.ratio_range) {
            (Some(den), Some(ratio_range)) => {
                let split = (height as f64 * (1.0 - config.figure.ratio_fraction)).round() as i32;
                let (upper, lower) = root.split_vertically(split);
                draw_main(&upper, plot, config, span, false)?;
                draw_ratio(&lower, plot, config, span, den.series.name(), ratio_range)?;
            }
            _ => draw_main(&root, plot, config, span, true)?,
        }

        root.present().map_err(drawing)?;
    }
    Ok(svg)
}

// ---------------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------------

fn draw_main(
    area: &Area<'_>,
    plot: &ComparisonPlot,
    config: &RenderConfig,
    (x_lo, x_hi): (f64, f64),
    with_x_axis: bool,
) -> Result<()> {
    let (y_lo, y_hi) = log_bounds(plot.main_range);

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(10)
        .margin_right(25)
        .x_label_area_size(if with_x_axis { 55 } else { 0 })
        .y_label_area_size(80);
    if !plot.title.is_empty() {
        builder.caption(&plot.title, (FONT, config.font.title));
    }
    let mut chart = builder
        .build_cartesian_2d(x_lo..x_hi, (y_lo..y_hi).log_scale())
        .map_err(drawing)?;

    let y_format = |v: &f64| format!("{v:.0e}");
    let mut mesh = chart.configure_mesh();
    mesh.disable_mesh()
        .y_desc(config.y_title.as_str())
        .y_label_formatter(&y_format)
        .axis_desc_style((FONT, config.font.label))
        .label_style((FONT, config.font.tick));
    if with_x_axis {
        mesh.x_desc(config.x_title.as_str());
    }
    mesh.draw().map_err(drawing)?;

    for entry in &plot.entries {
        let bins = entry.series.bins();
        let hidden = bins.iter().filter(|b| b.value.is_finite() && b.value <= 0.0).count();
        if hidden > 0 {
            log::warn!(
                "'{}': {hidden} non-positive bin(s) not shown on the log axis",
                entry.series.name()
            );
        }

        let style = line_style(entry.color, config.line_width);
        let mut segments = line_segments(bins, |v| v > 0.0).into_iter();
        chart
            .draw_series(LineSeries::new(segments.next().unwrap_or_default(), style))
            .map_err(drawing)?
            .label(entry.series.name())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + LEGEND_SWATCH, y)], style));
        for segment in segments {
            chart.draw_series(LineSeries::new(segment, style)).map_err(drawing)?;
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font((FONT, config.font.legend))
        .background_style(&WHITE.mix(0.8))
        .border_style(&WHITE)
        .draw()
        .map_err(drawing)?;
    Ok(())
}

fn draw_ratio(
    area: &Area<'_>,
    plot: &ComparisonPlot,
    config: &RenderConfig,
    (x_lo, x_hi): (f64, f64),
    reference: &str,
    range: ValueRange,
) -> Result<()> {
    let (y_lo, y_hi) = linear_bounds(range);

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .margin_right(25)
        .x_label_area_size(55)
        .y_label_area_size(80)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(drawing)?;

    let y_format = |v: &f64| format!("{v:.2}");
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(config.x_title.as_str())
        .y_desc(format!("ratio w.r.t. {reference}"))
        .y_labels(5)
        .y_label_formatter(&y_format)
        .axis_desc_style((FONT, config.font.label))
        .label_style((FONT, config.font.tick))
        .draw()
        .map_err(drawing)?;

    for entry in &plot.entries {
        let Some(ratio) = &entry.ratio else {
            continue;
        };
        let style = line_style(entry.color, config.line_width);
        for segment in line_segments(ratio.bins(), |_| true) {
            chart.draw_series(LineSeries::new(segment, style)).map_err(drawing)?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn line_style(color: ColorId, width: u32) -> ShapeStyle {
    color.rgb().stroke_width(width)
}

/// Split bins into runs of drawable (center, value) points. An undefined
/// value, or one rejected by `keep`, ends the current run.
pub fn line_segments(bins: &[Bin], keep: impl Fn(f64) -> bool) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for bin in bins {
        if bin.value.is_finite() && keep(bin.value) {
            current.push((bin.center, bin.value));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Positive, non-empty bounds for a logarithmic axis.
fn log_bounds(range: ValueRange) -> (f64, f64) {
    let hi = if range.max > 0.0 { range.max } else { 1.0 };
    let lo = if range.min > 0.0 && range.min < hi { range.min } else { hi * 1e-3 };
    (lo, hi)
}

/// Non-empty bounds for a linear axis.
fn linear_bounds(range: ValueRange) -> (f64, f64) {
    if range.max > range.min {
        (range.min, range.max)
    } else {
        (range.min - 0.5, range.max + 0.5)
    }
}
