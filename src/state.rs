use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::color::{ColorId, color_for};
use crate::data::DataError;
use crate::data::loader::load_table;
use crate::data::model::{Binned, RatioSeries, Series};
use crate::data::range::{ValueRange, aggregate};
use crate::data::ratio::ratio_all;
use crate::data::series::build_series;

// ---------------------------------------------------------------------------
// Plot request – what the user asked for
// ---------------------------------------------------------------------------

/// Input tables and labels, independent of how they were collected.
#[derive(Debug, Clone, Default)]
pub struct PlotRequest {
    pub denominator: Option<PathBuf>,
    pub numerators: Vec<PathBuf>,
    /// Legend labels, denominator first when there is one.
    pub labels: Vec<String>,
    pub title: String,
}

impl PlotRequest {
    /// Legend label of the table at `position` (denominator counts as 0),
    /// falling back to the table path.
    pub fn label_for(&self, position: usize, path: &Path) -> String {
        self.labels
            .get(position)
            .cloned()
            .unwrap_or_else(|| path.display().to_string())
    }
}

// ---------------------------------------------------------------------------
// Assembled plot – series paired with their ratios
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Denominator,
    Numerator,
}

/// One legend entry: a series, its ratio to the denominator (when there is
/// a denominator) and its line colour.
#[derive(Debug, Clone)]
pub struct PlotEntry {
    pub role: Role,
    pub series: Series,
    pub ratio: Option<RatioSeries>,
    pub color: ColorId,
}

/// Everything the renderer needs, in legend order.
#[derive(Debug, Clone)]
pub struct ComparisonPlot {
    pub title: String,
    pub entries: Vec<PlotEntry>,
    /// Display range of the cross-section axis.
    pub main_range: ValueRange,
    /// Display range of the ratio axis, `None` without a denominator.
    pub ratio_range: Option<ValueRange>,
}

impl ComparisonPlot {
    /// Load every table of the request and assemble the plot.
    pub fn assemble(request: &PlotRequest) -> Result<Self> {
        let offset = usize::from(request.denominator.is_some());

        let denominator = request
            .denominator
            .as_deref()
            .map(|path| load_series(path, request.label_for(0, path)))
            .transpose()?;

        let numerators = request
            .numerators
            .iter()
            .enumerate()
            .map(|(i, path)| load_series(path, request.label_for(i + offset, path)))
            .collect::<Result<Vec<_>>>()?;

        Self::from_series(&request.title, denominator, numerators)
            .context("assembling comparison plot")
    }

    /// Pair series with their ratios, assign colours and compute ranges.
    pub fn from_series(
        title: &str,
        denominator: Option<Series>,
        numerators: Vec<Series>,
    ) -> Result<Self, DataError> {
        let ratios = denominator
            .as_ref()
            .map(|den| ratio_all(den, &numerators))
            .transpose()?;

        let main_range = aggregate(denominator.iter().chain(&numerators))?.main_axis();
        let ratio_range = ratios
            .as_ref()
            .map(|r| aggregate(r))
            .transpose()?
            .map(|r| r.ratio_axis());
        log::debug!("main range {main_range:?}, ratio range {ratio_range:?}");

        let mut ratios = ratios.map(Vec::into_iter);
        let entries = denominator
            .map(|s| (Role::Denominator, s))
            .into_iter()
            .chain(numerators.into_iter().map(|s| (Role::Numerator, s)))
            .enumerate()
            .map(|(i, (role, series))| PlotEntry {
                role,
                series,
                ratio: ratios.as_mut().and_then(Iterator::next),
                color: color_for(i),
            })
            .collect();

        Ok(ComparisonPlot {
            title: title.to_string(),
            entries,
            main_range,
            ratio_range,
        })
    }

    pub fn denominator(&self) -> Option<&PlotEntry> {
        self.entries.iter().find(|e| e.role == Role::Denominator)
    }

    /// Lowest and highest bin edge over all series.
    pub fn mass_span(&self) -> Option<(f64, f64)> {
        self.entries
            .iter()
            .filter_map(|e| e.series.edges())
            .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
    }
}

fn load_series(path: &Path, name: String) -> Result<Series> {
    log::debug!("table {} labelled '{name}'", path.display());
    let samples = load_table(path).with_context(|| format!("loading table {}", path.display()))?;
    let series = build_series(&samples, name)
        .with_context(|| format!("binning table {}", path.display()))?;
    Ok(series)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::data::model::Sample;

    fn series(name: &str, rows: &[(f64, f64, f64)]) -> Series {
        let samples: Vec<Sample> = rows.iter().map(|&(m, x, u)| Sample::new(m, x, u)).collect();
        build_series(&samples, name).unwrap()
    }

    fn write_table(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn end_to_end_with_denominator() {
        let dir = tempfile::tempdir().unwrap();
        let den = write_table(dir.path(), "den.txt", "100 1.0 0.1\n200 0.5 0.05\n");
        let num = write_table(dir.path(), "num.txt", "100 2.0 0.2\n200 1.0 0.1\n");
        let request = PlotRequest {
            denominator: Some(den),
            numerators: vec![num],
            labels: vec!["LO".into(), "NLO".into()],
            title: "xs".into(),
        };

        let plot = ComparisonPlot::assemble(&request).unwrap();
        assert_eq!(plot.entries.len(), 2);
        assert_eq!(plot.denominator().unwrap().series.name(), "LO");

        let num_ratio = plot.entries[1].ratio.as_ref().unwrap();
        assert_eq!(num_ratio.name(), "NLO");
        let values: Vec<f64> = num_ratio.bins().iter().map(|b| b.value).collect();
        assert_eq!(values, vec![2.0, 2.0]);

        assert_relative_eq!(plot.main_range.min, 0.25);
        assert_relative_eq!(plot.main_range.max, 4.0);
        // The self-ratio (all ones) sets the lower end of the ratio axis.
        let ratio_range = plot.ratio_range.unwrap();
        assert_relative_eq!(ratio_range.min, 0.9);
        assert_relative_eq!(ratio_range.max, 2.2);
    }

    #[test]
    fn without_denominator_there_are_no_ratios() {
        let a = series("a", &[(100.0, 3.0, 0.1), (200.0, 1.0, 0.1)]);
        let b = series("b", &[(100.0, 0.2, 0.1), (200.0, 0.1, 0.1)]);
        let plot = ComparisonPlot::from_series("", None, vec![a, b]).unwrap();

        assert!(plot.denominator().is_none());
        assert!(plot.ratio_range.is_none());
        assert!(plot.entries.iter().all(|e| e.ratio.is_none()));
        assert!(plot.entries.iter().all(|e| e.role == Role::Numerator));
        assert_relative_eq!(plot.main_range.min, 0.05);
        assert_relative_eq!(plot.main_range.max, 6.0);
    }

    #[test]
    fn entries_keep_order_and_colors() {
        let den = series("den", &[(100.0, 1.0, 0.1), (200.0, 0.5, 0.05)]);
        let nums = vec![
            series("a", &[(100.0, 2.0, 0.2), (200.0, 1.0, 0.1)]),
            series("b", &[(100.0, 4.0, 0.2), (200.0, 2.0, 0.1)]),
            series("c", &[(100.0, 8.0, 0.2), (200.0, 4.0, 0.1)]),
        ];
        let plot = ComparisonPlot::from_series("", Some(den), nums).unwrap();

        let names: Vec<&str> = plot.entries.iter().map(|e| e.series.name()).collect();
        assert_eq!(names, vec!["den", "a", "b", "c"]);
        let colors: Vec<u16> = plot.entries.iter().map(|e| e.color.0).collect();
        assert_eq!(colors, vec![2, 3, 4, 6]);
        for entry in &plot.entries {
            assert_eq!(entry.ratio.as_ref().unwrap().name(), entry.series.name());
        }
        assert_eq!(plot.entries[0].role, Role::Denominator);
    }

    #[test]
    fn mismatched_numerator_aborts() {
        let den = series("den", &[(100.0, 1.0, 0.1), (200.0, 0.5, 0.05)]);
        let num = series("num", &[(100.0, 1.0, 0.1), (200.0, 0.5, 0.05), (300.0, 0.2, 0.1)]);
        assert!(matches!(
            ComparisonPlot::from_series("", Some(den), vec![num]),
            Err(DataError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn labels_shift_with_denominator() {
        let request = PlotRequest {
            denominator: Some("den.txt".into()),
            numerators: vec!["a.txt".into(), "b.txt".into()],
            labels: vec!["D".into(), "A".into()],
            title: String::new(),
        };
        assert_eq!(request.label_for(0, Path::new("den.txt")), "D");
        assert_eq!(request.label_for(1, Path::new("a.txt")), "A");
        assert_eq!(request.label_for(2, Path::new("b.txt")), "b.txt");
    }

    #[test]
    fn labels_without_denominator_start_at_first_numerator() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_table(dir.path(), "a.txt", "100 2.0 0.2\n200 1.0 0.1\n");
        let b = write_table(dir.path(), "b.txt", "100 1.0 0.2\n200 0.5 0.1\n");
        let request = PlotRequest {
            denominator: None,
            numerators: vec![a, b.clone()],
            labels: vec!["first".into()],
            title: String::new(),
        };
        let plot = ComparisonPlot::assemble(&request).unwrap();
        assert_eq!(plot.entries[0].series.name(), "first");
        assert_eq!(plot.entries[1].series.name(), b.display().to_string());
    }

    #[test]
    fn bad_table_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write_table(dir.path(), "bad.txt", "100 1.0\n");
        let request = PlotRequest {
            numerators: vec![bad.clone()],
            ..Default::default()
        };
        let err = ComparisonPlot::assemble(&request).unwrap_err();
        assert!(format!("{err:#}").contains("bad.txt"));
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::Format { .. })
        ));
    }

    #[test]
    fn mass_span_covers_all_entries() {
        let a = series("a", &[(100.0, 1.0, 0.1), (200.0, 0.5, 0.05)]);
        let b = series("b", &[(150.0, 1.0, 0.1), (350.0, 0.5, 0.05)]);
        let plot = ComparisonPlot::from_series("", None, vec![a, b]).unwrap();
        assert_eq!(plot.mass_span(), Some((50.0, 450.0)));
    }
}
