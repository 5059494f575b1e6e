use super::error::DataError;
use super::model::{Bin, Binned, RatioSeries, Series};

/// Divide `other` by `reference`, bin for bin.
///
/// * Passing the same series twice gives exactly 1 ± 0 in every bin.
/// * A zero reference bin yields `NaN` for that bin instead of an error.
/// * Uncertainties combine as for uncorrelated operands:
///   `σ = sqrt(σo²·r² + σr²·o²) / r²`.
pub fn ratio(reference: &Series, other: &Series) -> Result<RatioSeries, DataError> {
    if reference.len() != other.len() {
        return Err(DataError::LengthMismatch {
            numerator: other.name().to_string(),
            numerator_bins: other.len(),
            denominator: reference.name().to_string(),
            denominator_bins: reference.len(),
        });
    }

    let bins: Vec<Bin> = if std::ptr::eq(reference, other) {
        other.bins().iter().map(|b| b.with_content(1.0, 0.0)).collect()
    } else {
        other
            .bins()
            .iter()
            .zip(reference.bins())
            .map(|(o, r)| {
                let (value, uncertainty) = divide(o.value, o.uncertainty, r.value, r.uncertainty);
                o.with_content(value, uncertainty)
            })
            .collect()
    };

    let undefined = bins.iter().filter(|b| b.value.is_nan()).count();
    if undefined > 0 {
        log::warn!(
            "'{}' / '{}': {undefined} bin(s) undefined (zero denominator)",
            other.name(),
            reference.name()
        );
    }

    Ok(RatioSeries::from_bins(
        other.name().to_string(),
        other.bin_width(),
        bins,
    ))
}

/// Ratios of every series against `reference`, led by the reference's own
/// (trivial) ratio so the result lines up with legend order.
pub fn ratio_all(reference: &Series, others: &[Series]) -> Result<Vec<RatioSeries>, DataError> {
    std::iter::once(reference)
        .chain(others)
        .map(|s| ratio(reference, s))
        .collect()
}

fn divide(num: f64, num_err: f64, den: f64, den_err: f64) -> (f64, f64) {
    if den == 0.0 {
        return (f64::NAN, f64::NAN);
    }
    let den2 = den * den;
    let err = ((num_err * num_err) * den2 + (den_err * den_err) * (num * num)).sqrt() / den2;
    (num / den, err)
}
