//! Point-error metrics over index-aligned sequences
//!
//! Every metric here expects `actual` and `predicted` to already be the same
//! length and aligned index by index. Use [`right_aligned`] first when the
//! prediction sequence starts later than the actual series.

use crate::{MathError, Result};

/// Trailing overlap of two sequences.
///
/// With `n = min(actual.len(), predicted.len())`, returns the last `n`
/// elements of each. A prediction sequence that is shorter because of a
/// model warm-up therefore lines up with the most recent actual values.
///
/// ```
/// use forecast_math::right_aligned;
///
/// let actual = [1.0, 2.0, 3.0, 4.0];
/// let fitted = [2.5, 3.5];
/// let (a, f) = right_aligned(&actual, &fitted);
/// assert_eq!(a, &[3.0, 4.0]);
/// assert_eq!(f, &[2.5, 3.5]);
/// ```
pub fn right_aligned<'a>(actual: &'a [f64], predicted: &'a [f64]) -> (&'a [f64], &'a [f64]) {
    let n = actual.len().min(predicted.len());
    (
        &actual[actual.len() - n..],
        &predicted[predicted.len() - n..],
    )
}

fn check_aligned(actual: &[f64], predicted: &[f64]) -> Result<()> {
    if actual.len() != predicted.len() {
        return Err(MathError::InvalidInput(format!(
            "Actual length ({}) doesn't match predicted length ({})",
            actual.len(),
            predicted.len()
        )));
    }

    if actual.is_empty() {
        return Err(MathError::InsufficientData(
            "No overlapping values to compare".to_string(),
        ));
    }

    Ok(())
}

/// Mean absolute error
pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_aligned(actual, predicted)?;

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum();

    Ok(sum / actual.len() as f64)
}

/// Mean squared error
pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_aligned(actual, predicted)?;

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    Ok(sum / actual.len() as f64)
}

/// Root mean squared error
pub fn root_mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    Ok(mean_squared_error(actual, predicted)?.sqrt())
}

/// Mean absolute percentage error, in percent.
///
/// Indices where the actual value is zero are left out of the mean. When no
/// index is left the result is [`MathError::Undefined`] rather than NaN or
/// infinity.
pub fn mean_absolute_percentage_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_aligned(actual, predicted)?;

    let (sum, count) = actual
        .iter()
        .zip(predicted.iter())
        .filter(|(a, _)| **a != 0.0)
        .fold((0.0, 0usize), |(sum, count), (a, p)| {
            (sum + ((a - p) / a).abs(), count + 1)
        });

    if count == 0 {
        return Err(MathError::Undefined(
            "MAPE needs at least one non-zero actual value".to_string(),
        ));
    }

    Ok(sum / count as f64 * 100.0)
}
