//! Windowed statistics shared by every computation.
//!
//! All outputs are index-aligned with the input. Positions without enough
//! history hold `NaN`; a `NaN` anywhere inside a window makes that window's
//! result `NaN` (no skipping).

/// Successive difference: `out[i] = series[i] - series[i-1]`, `out[0] = NaN`.
pub fn diff(series: &[f64]) -> Vec<f64> {
    let mut out = vec![f64::NAN; series.len()];
    for i in 1..series.len() {
        out[i] = series[i] - series[i - 1];
    }
    out
}

/// Trailing arithmetic mean over `window` values ending at each position.
///
/// Lookback: window - 1 (first valid value at index window-1).
/// `window == 0` yields an all-`NaN` series. Runs in O(n).
pub fn rolling_mean(series: &[f64], window: usize) -> Vec<f64> {
    let n = series.len();
    let mut result = vec![f64::NAN; n];

    if window == 0 || n < window {
        return result;
    }

    // Running sum over the non-missing values in the window. It is reset to
    // exactly 0.0 whenever the window holds no non-zero value, so a window
    // of zeros averages to 0.0 with no add/subtract residue.
    let mut sum = 0.0;
    let mut nan_count = 0usize;
    let mut nonzero_count = 0usize;
    for i in 0..n {
        let entering = series[i];
        if entering.is_nan() {
            nan_count += 1;
        } else {
            sum += entering;
            if entering != 0.0 {
                nonzero_count += 1;
            }
        }
        if i >= window {
            let leaving = series[i - window];
            if leaving.is_nan() {
                nan_count -= 1;
            } else {
                sum -= leaving;
                if leaving != 0.0 {
                    nonzero_count -= 1;
                }
            }
        }
        if nonzero_count == 0 {
            sum = 0.0;
        }
        if i + 1 >= window && nan_count == 0 {
            result[i] = sum / window as f64;
        }
    }

    result
}

/// Split successive differences into gains and losses.
///
/// `gain[i] = max(diff[i], 0)`, `loss[i] = max(-diff[i], 0)`. Position 0 has
/// no predecessor and holds 0.0 in both outputs (missing if the first value
/// is). Any later position touching a missing value stays `NaN` in both.
pub fn gain_loss_split(series: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut delta = diff(series);
    if let Some(first) = series.first() {
        if !first.is_nan() {
            delta[0] = 0.0;
        }
    }
    let gain = delta
        .iter()
        .map(|&d| if d.is_nan() { f64::NAN } else { d.max(0.0) })
        .collect();
    let loss = delta
        .iter()
        .map(|&d| if d.is_nan() { f64::NAN } else { (-d).max(0.0) })
        .collect();
    (gain, loss)
}
