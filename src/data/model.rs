// ---------------------------------------------------------------------------
// Sample – one row of a cross-section table
// ---------------------------------------------------------------------------

/// A single table row: cross section and its uncertainty at one mass point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub mass: f64,
    pub cross_section: f64,
    pub uncertainty: f64,
}

impl Sample {
    pub fn new(mass: f64, cross_section: f64, uncertainty: f64) -> Self {
        Sample {
            mass,
            cross_section,
            uncertainty,
        }
    }
}

// ---------------------------------------------------------------------------
// Bin – one mass slot of a binned series
// ---------------------------------------------------------------------------

/// One rectangular bin. Edges are fixed when the owning series is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub low_edge: f64,
    pub high_edge: f64,
    pub center: f64,
    pub value: f64,
    pub uncertainty: f64,
}

impl Bin {
    /// A bin of width `width` centered on `center`.
    pub fn centered(center: f64, width: f64, value: f64, uncertainty: f64) -> Self {
        Bin {
            low_edge: center - width / 2.0,
            high_edge: center + width / 2.0,
            center,
            value,
            uncertainty,
        }
    }

    /// Same geometry, different content.
    pub fn with_content(&self, value: f64, uncertainty: f64) -> Self {
        Bin {
            value,
            uncertainty,
            ..*self
        }
    }
}

// ---------------------------------------------------------------------------
// Binned – shared read access for series and ratios
// ---------------------------------------------------------------------------

/// Anything that exposes a named, ordered list of bins.
pub trait Binned {
    fn name(&self) -> &str;
    fn bins(&self) -> &[Bin];

    /// Lowest low edge and highest high edge, `None` without bins.
    fn edges(&self) -> Option<(f64, f64)> {
        let bins = self.bins();
        if bins.is_empty() {
            return None;
        }
        let lo = bins.iter().map(|b| b.low_edge).fold(f64::INFINITY, f64::min);
        let hi = bins.iter().map(|b| b.high_edge).fold(f64::NEG_INFINITY, f64::max);
        Some((lo, hi))
    }
}

// ---------------------------------------------------------------------------
// Series – a binned table
// ---------------------------------------------------------------------------

/// A table converted to uniform-width bins, ready for plotting.
///
/// Only [`crate::data::series::build_series`] creates one; the content is
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    bin_width: f64,
    bins: Vec<Bin>,
}

impl Series {
    pub(crate) fn from_bins(name: String, bin_width: f64, bins: Vec<Bin>) -> Self {
        Series {
            name,
            bin_width,
            bins,
        }
    }

    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

impl Binned for Series {
    fn name(&self) -> &str {
        &self.name
    }

    fn bins(&self) -> &[Bin] {
        &self.bins
    }
}

// ---------------------------------------------------------------------------
// RatioSeries – a series divided by the denominator
// ---------------------------------------------------------------------------

/// Bin-by-bin quotient of a numerator series over the denominator.
/// Carries the numerator's name and bin geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioSeries {
    name: String,
    bin_width: f64,
    bins: Vec<Bin>,
}

impl RatioSeries {
    pub(crate) fn from_bins(name: String, bin_width: f64, bins: Vec<Bin>) -> Self {
        RatioSeries {
            name,
            bin_width,
            bins,
        }
    }

    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

impl Binned for RatioSeries {
    fn name(&self) -> &str {
        &self.name
    }

    fn bins(&self) -> &[Bin] {
        &self.bins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_bin_edges() {
        let b = Bin::centered(150.0, 50.0, 1.2, 0.1);
        assert_eq!(b.low_edge, 125.0);
        assert_eq!(b.high_edge, 175.0);
        assert_eq!(b.center, 150.0);
    }

    #[test]
    fn edges_span_all_bins() {
        let bins = vec![
            Bin::centered(100.0, 10.0, 1.0, 0.0),
            Bin::centered(110.0, 10.0, 1.0, 0.0),
            Bin::centered(120.0, 10.0, 1.0, 0.0),
        ];
        let s = Series::from_bins("s".into(), 10.0, bins);
        assert_eq!(s.edges(), Some((95.0, 125.0)));

        let empty = RatioSeries::from_bins("r".into(), 10.0, Vec::new());
        assert_eq!(empty.edges(), None);
    }
}
