use super::error::DataError;
use super::model::{Bin, Sample, Series};

/// Bin a table into a [`Series`].
///
/// The bin width is taken from the spacing of the first two samples and
/// applied to every sample. Later irregular spacing is not detected, so a
/// table with uneven mass steps gets overlapping or gapped bins.
///
/// Samples stay in input order; repeated masses give repeated bins.
pub fn build_series(samples: &[Sample], name: impl Into<String>) -> Result<Series, DataError> {
    let name = name.into();
    let [first, second, ..] = samples else {
        return Err(DataError::InsufficientData {
            name,
            count: samples.len(),
        });
    };

    let width = second.mass - first.mass;
    log::debug!("series '{name}': {} bins of width {width}", samples.len());

    let bins = samples
        .iter()
        .map(|s| Bin::centered(s.mass, width, s.cross_section, s.uncertainty))
        .collect();
    Ok(Series::from_bins(name, width, bins))
}
