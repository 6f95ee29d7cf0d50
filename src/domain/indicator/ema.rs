//! Exponential Moving Average.
//!
//! k = 2/(n+1), seeded with the first close, then EMA[i] = k*C[i] + (1-k)*EMA[i-1].
//! Every row is defined; there is no SMA seed and no warm-up gap.

pub fn calculate_ema(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; closes.len()];
    }

    let k = smoothing_factor(period);
    let mut values = Vec::with_capacity(closes.len());
    let mut ema: Option<f64> = None;

    for &close in closes {
        let next = match ema {
            None => close,
            Some(prev) => k * close + (1.0 - k) * prev,
        };
        ema = Some(next);
        values.push(ema);
    }

    values
}

/// EMA over a column that may contain gaps, seeded at its first defined value.
///
/// Undefined inputs stay undefined in the output and do not advance the
/// recurrence.
pub fn ema_of_defined(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    let k = smoothing_factor(period);
    let mut ema: Option<f64> = None;

    values
        .iter()
        .map(|value| {
            let input = (*value)?;
            let next = match ema {
                None => input,
                Some(prev) => k * input + (1.0 - k) * prev,
            };
            ema = Some(next);
            ema
        })
        .collect()
}

pub fn smoothing_factor(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}
