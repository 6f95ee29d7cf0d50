//! Simple Moving Average with an expanding warm-up window.
//!
//! SMA(n)[i] = mean(C[i-n+1..=i]) once n closes are available.
//! For i < n-1 the mean of all closes so far is used instead, so no row is
//! lost to warm-up.

pub fn calculate_sma(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; closes.len()];
    }

    let mut values = Vec::with_capacity(closes.len());
    let mut sum = 0.0;

    for (i, &close) in closes.iter().enumerate() {
        let leaving = if i >= period { closes[i - period] } else { 0.0 };
        sum = sum - leaving + close;
        let count = (i + 1).min(period);
        values.push(Some(sum / count as f64));
    }

    values
}
