//! Lag differencing and its inverse

use crate::{MathError, Result};

/// Difference a series at the given lag: `out[i] = values[i + lag] - values[i]`.
///
/// The result is `lag` elements shorter than the input.
pub fn difference(values: &[f64], lag: usize) -> Result<Vec<f64>> {
    if lag == 0 {
        return Err(MathError::InvalidInput(
            "Differencing lag must be at least 1".to_string(),
        ));
    }

    if values.len() <= lag {
        return Err(MathError::InsufficientData(format!(
            "Need more than {} values to difference at lag {}, got {}",
            lag,
            lag,
            values.len()
        )));
    }

    Ok(values[lag..]
        .iter()
        .zip(values.iter())
        .map(|(later, earlier)| later - earlier)
        .collect())
}

/// Undo [`difference`] for values that continue past the end of `history`.
///
/// `diffs[k]` is the difference between the `k`-th continuation value and the
/// value `lag` steps before it, which comes from `history` or from earlier
/// continuation values.
pub fn integrate(history: &[f64], diffs: &[f64], lag: usize) -> Result<Vec<f64>> {
    if lag == 0 {
        return Err(MathError::InvalidInput(
            "Integration lag must be at least 1".to_string(),
        ));
    }

    if history.len() < lag {
        return Err(MathError::InsufficientData(format!(
            "Need at least {} history values to integrate at lag {}, got {}",
            lag,
            lag,
            history.len()
        )));
    }

    let mut extended = history[history.len() - lag..].to_vec();
    let mut restored = Vec::with_capacity(diffs.len());

    for (k, diff) in diffs.iter().enumerate() {
        let value = diff + extended[k];
        extended.push(value);
        restored.push(value);
    }

    Ok(restored)
}
