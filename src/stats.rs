//! Numeric kernels over plain value slices.
//!
//! These functions assume their arguments were already validated by the
//! caller and never fail. Undefined cells are returned as `None`.

fn compute_mean(vals: &[f64]) -> f64 {
    if vals.is_empty() {
        return f64::NAN;
    }
    vals.iter().sum::<f64>() / vals.len() as f64
}

/// Mean of the `window` most recent values ending at each position.
///
/// Positions with fewer than `window` values up to and including themselves
/// are `None`; a window longer than the series leaves every cell `None`.
pub fn rolling_mean(vals: &[f64], window: usize) -> Vec<Option<f64>> {
    let n_vals = vals.len();
    let mut result = vec![None; n_vals];
    if window == 0 || window > n_vals {
        return result;
    }

    let mut sum: f64 = vals[..window].iter().sum();
    result[window - 1] = Some(sum / window as f64);

    for i in window..n_vals {
        sum += vals[i] - vals[i - window];
        result[i] = Some(sum / window as f64);
    }

    result
}

/// First difference, `None` at position 0.
pub fn differential(vals: &[f64]) -> Vec<Option<f64>> {
    let mut result = Vec::with_capacity(vals.len());
    if vals.is_empty() {
        return result;
    }
    result.push(None);
    result.extend(vals.windows(2).map(|pair| Some(pair[1] - pair[0])));
    result
}

/// Lag autocorrelation normalised by the full-series mean and variance.
///
/// Returns `None` for a constant series (zero variance) and for `lag >= len`.
pub fn autocorrelation(vals: &[f64], lag: usize) -> Option<f64> {
    let n_vals = vals.len();
    if lag >= n_vals || is_constant(vals) {
        return None;
    }

    let mean = compute_mean(vals);
    let diff_2_sum: f64 = vals.iter().map(|&val| (val - mean) * (val - mean)).sum();
    if diff_2_sum == 0.0 {
        return None;
    }

    let cross_sum: f64 = vals
        .iter()
        .zip(&vals[lag..])
        .map(|(&a, &b)| (a - mean) * (b - mean))
        .sum();

    Some(cross_sum / diff_2_sum)
}

fn is_constant(vals: &[f64]) -> bool {
    vals.windows(2).all(|pair| pair[0] == pair[1])
}

/// Indices of strict local maxima and minima, excluding both endpoints.
///
/// Equal neighbours never qualify.
pub fn local_extrema(vals: &[f64]) -> (Vec<usize>, Vec<usize>) {
    let mut i_maxima = Vec::new();
    let mut i_minima = Vec::new();

    for (i_mid, triple) in vals.windows(3).enumerate() {
        let (prev, val, next) = (triple[0], triple[1], triple[2]);
        if val > prev && val > next {
            i_maxima.push(i_mid + 1);
        } else if val < prev && val < next {
            i_minima.push(i_mid + 1);
        }
    }

    (i_maxima, i_minima)
}
