//! Forecast accuracy metrics
//!
//! All functions return `NaN` when the inputs differ in length. Means are
//! `NaN` over empty inputs; sums are zero.

fn valid(actual: &[f64], predicted: &[f64]) -> bool {
    actual.len() == predicted.len() && !actual.is_empty()
}

/// Mean Absolute Error
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if !valid(actual, predicted) {
        return f64::NAN;
    }
    abs_error(actual, predicted) / actual.len() as f64
}

/// Mean Squared Error
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    if !valid(actual, predicted) {
        return f64::NAN;
    }
    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    sum / actual.len() as f64
}

/// Sum of absolute errors
pub fn abs_error(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() {
        return f64::NAN;
    }
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum()
}

/// Mean Absolute Percentage Error
///
/// Observations with a zero target are skipped.
pub fn mape(actual: &[f64], predicted: &[f64]) -> f64 {
    if !valid(actual, predicted) {
        return f64::NAN;
    }
    let valid: Vec<_> = actual
        .iter()
        .zip(predicted.iter())
        .filter(|(&a, _)| a.abs() > 1e-10)
        .collect();
    if valid.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = valid.iter().map(|(&a, &p)| ((a - p) / a).abs()).sum();
    sum / valid.len() as f64
}

/// Symmetric Mean Absolute Percentage Error, in `[0, 2]`
///
/// Observations where target and forecast are both zero are skipped.
pub fn smape(actual: &[f64], predicted: &[f64]) -> f64 {
    if !valid(actual, predicted) {
        return f64::NAN;
    }
    let terms: Vec<f64> = actual
        .iter()
        .zip(predicted.iter())
        .filter(|(a, p)| a.abs() + p.abs() > 1e-10)
        .map(|(a, p)| 2.0 * (a - p).abs() / (a.abs() + p.abs()))
        .collect();
    if terms.is_empty() {
        return f64::NAN;
    }
    terms.iter().sum::<f64>() / terms.len() as f64
}

/// Quantile (pinball) loss at level `q`, scaled by two so that the median
/// loss equals the absolute error.
///
/// Terms with zero weight contribute nothing, so the infinite forecasts a
/// distribution gives at `q = 0` or `q = 1` score zero on the side they bound.
pub fn quantile_loss(actual: &[f64], quantile_forecast: &[f64], q: f64) -> f64 {
    if actual.len() != quantile_forecast.len() {
        return f64::NAN;
    }
    2.0 * actual
        .iter()
        .zip(quantile_forecast.iter())
        .map(|(&a, &f)| {
            let indicator = if a <= f { 1.0 } else { 0.0 };
            let weight = indicator - q;
            if weight == 0.0 {
                0.0
            } else {
                ((a - f) * weight).abs()
            }
        })
        .sum::<f64>()
}

/// Fraction of observations at or below the quantile forecast.
pub fn coverage(actual: &[f64], quantile_forecast: &[f64]) -> f64 {
    if !valid(actual, quantile_forecast) {
        return f64::NAN;
    }
    let below = actual
        .iter()
        .zip(quantile_forecast.iter())
        .filter(|(a, f)| a <= f)
        .count();
    below as f64 / actual.len() as f64
}
