use super::error::DataError;
use super::model::Binned;

/// Closed interval of bin values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        ValueRange { min, max }
    }

    /// Display range of the logarithmic cross-section axis: `[min/2, max*2]`.
    pub fn main_axis(&self) -> ValueRange {
        ValueRange::new(self.min / 2.0, self.max * 2.0)
    }

    /// Display range of the linear ratio axis: `[0.9*min, 1.1*max]`.
    pub fn ratio_axis(&self) -> ValueRange {
        ValueRange::new(0.9 * self.min, 1.1 * self.max)
    }
}

/// Smallest and largest bin value over every bin of every series.
///
/// Uncertainties do not widen the range. Undefined (`NaN`) and infinite bins
/// are skipped.
/// Fails when there is nothing to aggregate: no series, a series without
/// bins, or no defined value at all.
pub fn aggregate<'a, S>(series: impl IntoIterator<Item = &'a S>) -> Result<ValueRange, DataError>
where
    S: Binned + 'a,
{
    let mut count = 0usize;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for s in series {
        count += 1;
        if s.bins().is_empty() {
            return Err(DataError::EmptyInput(format!("series '{}' has no bins", s.name())));
        }
        for value in s.bins().iter().map(|b| b.value).filter(|v| v.is_finite()) {
            min = min.min(value);
            max = max.max(value);
        }
    }

    if count == 0 {
        return Err(DataError::EmptyInput("no series given".into()));
    }
    if min > max {
        return Err(DataError::EmptyInput("no finite bin value".into()));
    }
    Ok(ValueRange::new(min, max))
}
