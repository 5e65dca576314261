//! Median/MAD clipping for outlier handling.

use ndarray::Array1;

use crate::{MathError, median};

/// Clipping bounds derived from a median and a median absolute deviation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipBounds {
    /// Median of the finite inputs.
    pub median: f64,
    /// Median absolute deviation around `median`.
    pub mad: f64,
    /// `median - n * mad`.
    pub lower: f64,
    /// `median + n * mad`.
    pub upper: f64,
}

impl ClipBounds {
    /// Check whether a value lies inside the bounds (inclusive).
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.lower && x <= self.upper
    }
}

/// Clip a 1D array into `[median - n * MAD, median + n * MAD]`.
///
/// Statistics are computed over finite values only; NaN entries are kept as NaN.
/// Returns `None` bounds when the array holds no finite value.
///
/// # Errors
/// Returns `MathError::InvalidClipMultiple` if `n` is not finite and positive.
pub fn mad_clip(
    data: &Array1<f64>,
    n: f64,
) -> Result<(Array1<f64>, Option<ClipBounds>), MathError> {
    if !(n.is_finite() && n > 0.0) {
        return Err(MathError::InvalidClipMultiple(n));
    }

    let finite: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    if finite.is_empty() {
        return Ok((data.clone(), None));
    }

    let xm = median(&finite);
    let deviations: Vec<f64> = finite.iter().map(|x| (x - xm).abs()).collect();
    let mad = median(&deviations);

    let bounds = ClipBounds { median: xm, mad, lower: xm - n * mad, upper: xm + n * mad };
    let clipped = data.mapv(|x| if x.is_nan() { x } else { x.clamp(bounds.lower, bounds.upper) });

    Ok((clipped, Some(bounds)))
}

/// Median/MAD clipping configuration and transform.
#[derive(Debug, Clone)]
pub struct MadClipper {
    /// Number of MADs on each side of the median.
    multiple: f64,
}

impl MadClipper {
    /// Create a new clipper.
    ///
    /// # Errors
    /// Returns `MathError::InvalidClipMultiple` if `multiple` is not finite and positive.
    pub fn new(multiple: f64) -> Result<Self, MathError> {
        if !(multiple.is_finite() && multiple > 0.0) {
            return Err(MathError::InvalidClipMultiple(multiple));
        }
        Ok(Self { multiple })
    }

    /// Get the MAD multiple.
    #[must_use]
    pub const fn multiple(&self) -> f64 {
        self.multiple
    }

    /// Apply clipping to an array.
    ///
    /// # Errors
    /// Returns error if clipping fails.
    pub fn apply(&self, data: &Array1<f64>) -> Result<Array1<f64>, MathError> {
        mad_clip(data, self.multiple).map(|(clipped, _)| clipped)
    }
}

impl Default for MadClipper {
    fn default() -> Self {
        Self { multiple: 3.0 }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;
    use rstest::rstest;

    use super::*;

    #[test]
    fn clip_pulls_in_outlier() {
        let data = array![1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let (clipped, bounds) = mad_clip(&data, 3.0).unwrap();
        let bounds = bounds.unwrap();

        // median 3.5, deviations [2.5,1.5,0.5,0.5,1.5,96.5] -> MAD 1.5
        assert_relative_eq!(bounds.median, 3.5, epsilon = 1e-12);
        assert_relative_eq!(bounds.mad, 1.5, epsilon = 1e-12);
        assert_relative_eq!(clipped[5], 8.0, epsilon = 1e-12);
        assert_relative_eq!(clipped[0], 1.0, epsilon = 1e-12);
        assert!(clipped.iter().all(|&x| bounds.contains(x)));
    }

    #[test]
    fn clip_keeps_nan() {
        let data = array![1.0, f64::NAN, 3.0];
        let (clipped, _) = mad_clip(&data, 3.0).unwrap();
        assert!(clipped[1].is_nan());
    }

    #[test]
    fn clip_all_nan_has_no_bounds() {
        let (clipped, bounds) = mad_clip(&array![f64::NAN, f64::NAN], 3.0).unwrap();
        assert!(bounds.is_none());
        assert!(clipped.iter().all(|x| x.is_nan()));
    }

    #[test]
    fn clip_constant_collapses_to_median() {
        let (clipped, bounds) = mad_clip(&array![2.0, 2.0, 2.0], 3.0).unwrap();
        assert_eq!(bounds.unwrap().mad, 0.0);
        assert_eq!(clipped, array![2.0, 2.0, 2.0]);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn invalid_multiple_errors(#[case] n: f64) {
        assert!(mad_clip(&array![1.0, 2.0], n).is_err());
        assert!(MadClipper::new(n).is_err());
    }

    #[test]
    fn clipper_apply() {
        let clipper = MadClipper::default();
        assert_eq!(clipper.multiple(), 3.0);
        let result = clipper.apply(&array![1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
        assert_eq!(result.len(), 6);
    }
}
