use crate::image_pipeline::common::error::{Result, SkipperError};
use crate::image_pipeline::overscan::layout::OverscanLayout;

/// Window size at or below which the trimmed divisor falls back to the
/// full count.
const DEFAULT_MIN_TRIMMED_COUNT: usize = 4;

/// Robust location estimate used for an overscan window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaselineEstimator {
    /// Drop `layout.trim()` values at each end, average the rest.
    #[default]
    TrimmedMean,
    /// Average the central third of the sorted values.
    CentralThird,
}

impl BaselineEstimator {
    pub fn estimate(&self, values: &[f64], layout: &OverscanLayout) -> Result<f64> {
        match self {
            Self::TrimmedMean => {
                trimmed_mean_with_min(values, layout.trim(), layout.min_trimmed_count())
            }
            Self::CentralThird => central_third_mean(values),
        }
    }
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    sorted
}

/// Mean after dropping the `trim` smallest and `trim` largest values.
pub fn trimmed_mean(values: &[f64], trim: usize) -> Result<f64> {
    trimmed_mean_with_min(values, trim, DEFAULT_MIN_TRIMMED_COUNT)
}

/// Trimmed mean with an explicit divisor threshold.
///
/// The summed range and the divisor are picked by two separate tests:
/// the sum covers the middle `n - 2*trim` values when `n > 2*trim` and
/// is empty otherwise, while the divisor is `n - 2*trim` whenever
/// `n > min_count` and `n` otherwise. A window of `2*trim` values or
/// fewer therefore has a baseline of zero. A zero divisor is reported as
/// `InvalidRegion`.
pub fn trimmed_mean_with_min(values: &[f64], trim: usize, min_count: usize) -> Result<f64> {
    let n = values.len();
    if n == 0 {
        return Err(SkipperError::InvalidRegion(
            "overscan window has no pixels".to_string(),
        ));
    }

    let sum: f64 = if n > 2 * trim {
        sorted_copy(values)[trim..n - trim].iter().sum()
    } else {
        0.0
    };

    let divisor = if n > min_count {
        n as i64 - 2 * trim as i64
    } else {
        n as i64
    };
    if divisor == 0 {
        return Err(SkipperError::InvalidRegion(format!(
            "trimming {} values from each end of a {}-pixel window leaves nothing to average",
            trim, n
        )));
    }

    Ok(sum / divisor as f64)
}

/// Mean of the sorted values with index in `[n/3, 2n/3)`.
pub fn central_third_mean(values: &[f64]) -> Result<f64> {
    let n = values.len();
    let (lo, hi) = (n / 3, 2 * n / 3);
    if hi <= lo {
        return Err(SkipperError::InvalidRegion(format!(
            "{}-pixel window has an empty central third",
            n
        )));
    }

    let sorted = sorted_copy(values);
    Ok(sorted[lo..hi].iter().sum::<f64>() / (hi - lo) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_mean_ignores_outliers() {
        let mut values = vec![100.0; 40];
        values[3] = 1.0e6;
        values[17] = -5.0e4;
        values[30] = 9.9e5;
        assert_eq!(trimmed_mean(&values, 4).unwrap(), 100.0);
    }

    #[test]
    fn test_trimmed_mean_between_order_statistics() {
        let values: Vec<f64> = (0..44).map(|i| ((i * 37) % 44) as f64 * 1.5 - 7.0).collect();
        let trim = 4;
        let mean = trimmed_mean(&values, trim).unwrap();

        let mut sorted = values.clone();
        sorted.sort_by(f64::total_cmp);
        assert!(mean >= sorted[trim]);
        assert!(mean <= sorted[values.len() - trim - 1]);
    }

    #[test]
    fn test_trimmed_mean_is_order_independent() {
        let values = [5.0, 1.0, 9.0, 3.0, 7.0, 2.0, 8.0, 4.0, 6.0, 0.0, 11.0];
        let mut reversed = values;
        reversed.reverse();
        let mut rotated = values;
        rotated.rotate_left(4);

        let expected = trimmed_mean(&values, 2).unwrap();
        assert_eq!(trimmed_mean(&reversed, 2).unwrap(), expected);
        assert_eq!(trimmed_mean(&rotated, 2).unwrap(), expected);
    }

    #[test]
    fn test_trimmed_mean_exact_middle() {
        let values = [10.0, 1.0, 2.0, 3.0, 4.0, 50.0];
        // drops 1.0 and 50.0
        assert_eq!(trimmed_mean(&values, 1).unwrap(), 4.75);
    }

    #[test]
    fn test_empty_window_is_invalid() {
        assert!(matches!(trimmed_mean(&[], 4), Err(SkipperError::InvalidRegion(_))));
    }

    #[test]
    fn test_small_window_has_zero_baseline() {
        // 6 values, trim 4: nothing is summed, the divisor is 6 - 8.
        let values = [10.0; 6];
        assert_eq!(trimmed_mean(&values, 4).unwrap(), 0.0);
    }

    #[test]
    fn test_small_window_zero_divisor_is_invalid() {
        let values = [10.0; 8];
        assert!(matches!(trimmed_mean(&values, 4), Err(SkipperError::InvalidRegion(_))));
    }

    #[test]
    fn test_tiny_window_has_zero_baseline() {
        let values = [1.0, 2.0, 3.0, 6.0];
        assert_eq!(trimmed_mean(&values, 4).unwrap(), 0.0);
    }

    #[test]
    fn test_window_just_above_twice_trim_is_trimmed() {
        let values = [7.0, 100.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, -50.0];
        // sorted: -50 1 2 3 4 5 6 7 100, middle value is 4
        assert_eq!(trimmed_mean(&values, 4).unwrap(), 4.0);
    }

    #[test]
    fn test_central_third_mean() {
        let values = [9.0, 1.0, 5.0, 4.0, 100.0, 6.0];
        // sorted: 1 4 5 6 9 100, central third is [5, 6]
        assert_eq!(central_third_mean(&values).unwrap(), 5.5);
        assert!(matches!(central_third_mean(&[1.0]), Err(SkipperError::InvalidRegion(_))));
    }

    #[test]
    fn test_estimator_uses_layout_trim() {
        let layout = OverscanLayout::new(40, 16, 1, 1).unwrap();
        let values = [10.0, 1.0, 2.0, 3.0, 4.0, 50.0];
        let mean = BaselineEstimator::TrimmedMean.estimate(&values, &layout).unwrap();
        assert_eq!(mean, 4.75);
    }
}
