//! Indicator backend built on the `ta` crate.
//!
//! `ta`'s SMA already averages over the bars seen so far during warm-up and
//! its EMA is seeded at the first input, which is exactly the recurrence
//! backend's behaviour. Its RSI uses exponential smoothing, so RSI is
//! assembled here from `ta` SMAs over gains and losses instead.

use crate::domain::indicator::MacdSeries;
use crate::domain::indicator::rsi::rsi_from_averages;
use crate::ports::indicator_port::IndicatorPort;
use ta::Next;
use ta::indicators::{ExponentialMovingAverage, SimpleMovingAverage};

#[derive(Debug, Clone, Copy, Default)]
pub struct TaBackend;

fn run<I: Next<f64, Output = f64>>(mut indicator: I, values: &[f64]) -> Vec<Option<f64>> {
    values.iter().map(|&v| Some(indicator.next(v))).collect()
}

impl IndicatorPort for TaBackend {
    fn name(&self) -> &'static str {
        "native"
    }

    fn sma(&self, closes: &[f64], period: usize) -> Vec<Option<f64>> {
        match SimpleMovingAverage::new(period) {
            Ok(sma) => run(sma, closes),
            Err(_) => vec![None; closes.len()],
        }
    }

    fn ema(&self, closes: &[f64], period: usize) -> Vec<Option<f64>> {
        match ExponentialMovingAverage::new(period) {
            Ok(ema) => run(ema, closes),
            Err(_) => vec![None; closes.len()],
        }
    }

    fn rsi(&self, closes: &[f64], period: usize) -> Vec<Option<f64>> {
        let mut values = vec![None; closes.len()];
        let (Ok(mut avg_gain), Ok(mut avg_loss)) = (
            SimpleMovingAverage::new(period),
            SimpleMovingAverage::new(period),
        ) else {
            return values;
        };

        for i in 1..closes.len() {
            let change = closes[i] - closes[i - 1];
            let gain = avg_gain.next(change.max(0.0));
            let loss = avg_loss.next((-change).max(0.0));
            if i >= period {
                values[i] = rsi_from_averages(gain, loss);
            }
        }

        values
    }

    fn macd(&self, closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
        let ema_fast = self.ema(closes, fast);
        let ema_slow = self.ema(closes, slow);

        let line: Vec<Option<f64>> = ema_fast
            .iter()
            .zip(&ema_slow)
            .map(|(f, s)| Some((*f)? - (*s)?))
            .collect();

        let signal = match ExponentialMovingAverage::new(signal) {
            Ok(mut ema) => line.iter().map(|v| v.map(|v| ema.next(v))).collect(),
            Err(_) => vec![None; line.len()],
        };

        MacdSeries { line, signal }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::RecurrenceBackend;
    use approx::assert_relative_eq;

    fn wave(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + (i as f64 * 0.37).sin() * 5.0 + i as f64 * 0.05)
            .collect()
    }

    fn assert_columns_close(native: &[Option<f64>], reference: &[Option<f64>]) {
        assert_eq!(native.len(), reference.len());
        for (i, (n, r)) in native.iter().zip(reference).enumerate() {
            match (n, r) {
                (Some(n), Some(r)) => assert_relative_eq!(*n, *r, max_relative = 1e-9, epsilon = 1e-9),
                (None, None) => {}
                _ => panic!("definedness differs at index {}: {:?} vs {:?}", i, n, r),
            }
        }
    }

    #[test]
    fn sma_matches_reference() {
        let closes = wave(80);
        assert_columns_close(&TaBackend.sma(&closes, 20), &RecurrenceBackend.sma(&closes, 20));
    }

    #[test]
    fn ema_matches_reference() {
        let closes = wave(80);
        assert_columns_close(&TaBackend.ema(&closes, 20), &RecurrenceBackend.ema(&closes, 20));
    }

    #[test]
    fn rsi_matches_reference() {
        let closes = wave(80);
        assert_columns_close(&TaBackend.rsi(&closes, 14), &RecurrenceBackend.rsi(&closes, 14));
    }

    #[test]
    fn macd_matches_reference() {
        let closes = wave(80);
        let native = TaBackend.macd(&closes, 12, 26, 9);
        let reference = RecurrenceBackend.macd(&closes, 12, 26, 9);
        assert_columns_close(&native.line, &reference.line);
        assert_columns_close(&native.signal, &reference.signal);
    }

    #[test]
    fn rsi_boundaries() {
        let rising: Vec<f64> = (0..20).map(|i| 10.0 + i as f64).collect();
        let falling: Vec<f64> = rising.iter().rev().copied().collect();

        assert!(TaBackend.rsi(&rising, 14)[14..].iter().all(|v| *v == Some(100.0)));
        assert!(TaBackend.rsi(&falling, 14)[14..].iter().all(|v| *v == Some(0.0)));
        assert!(TaBackend.rsi(&[7.0; 20], 14).iter().all(Option::is_none));
    }

    #[test]
    fn zero_period_is_undefined() {
        let closes = wave(5);
        assert!(TaBackend.sma(&closes, 0).iter().all(Option::is_none));
        assert!(TaBackend.ema(&closes, 0).iter().all(Option::is_none));
        assert!(TaBackend.rsi(&closes, 0).iter().all(Option::is_none));
    }
}
