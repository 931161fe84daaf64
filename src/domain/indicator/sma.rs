//! Simple moving average of closes.
//!
//! Output is aligned with the input: entry `i` is `None` while `i < period - 1`,
//! then the mean of the trailing `period` closes rounded to 2 decimals.

use crate::domain::candle::{round2, Candle};

pub fn moving_average(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; candles.len()];
    }

    let mut values = Vec::with_capacity(candles.len());

    for i in 0..candles.len() {
        if i + 1 < period {
            values.push(None);
            continue;
        }
        let window = &candles[i + 1 - period..=i];
        let sum: f64 = window.iter().map(|c| c.close).sum();
        values.push(Some(round2(sum / period as f64)));
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_candles(closes: &[f64]) -> Vec<Candle> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                date: start + chrono::Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
            })
            .collect()
    }

    #[test]
    fn sma_empty() {
        assert!(moving_average(&[], 5).is_empty());
    }

    #[test]
    fn sma_warmup_is_none() {
        let candles = make_candles(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let ma = moving_average(&candles, 3);
        assert_eq!(ma.len(), 5);
        assert_eq!(ma[0], None);
        assert_eq!(ma[1], None);
        assert_eq!(ma[2], Some(2.0));
        assert_eq!(ma[3], Some(3.0));
        assert_eq!(ma[4], Some(4.0));
    }

    #[test]
    fn sma_period_one_is_close() {
        let candles = make_candles(&[10.5, 11.25, 9.75]);
        let ma = moving_average(&candles, 1);
        assert_eq!(ma, vec![Some(10.5), Some(11.25), Some(9.75)]);
    }

    #[test]
    fn sma_period_longer_than_series() {
        let candles = make_candles(&[1.0, 2.0]);
        assert_eq!(moving_average(&candles, 5), vec![None, None]);
    }

    #[test]
    fn sma_zero_period_is_all_none() {
        let candles = make_candles(&[1.0, 2.0, 3.0]);
        assert_eq!(moving_average(&candles, 0), vec![None, None, None]);
    }

    #[test]
    fn sma_rounds_to_two_decimals() {
        let candles = make_candles(&[1.0, 1.0, 2.0]);
        let ma = moving_average(&candles, 3);
        assert_eq!(ma[2], Some(1.33));
    }

    #[test]
    fn sma_matches_direct_mean() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + ((i * 7) % 11) as f64 * 1.37).collect();
        let candles = make_candles(&closes);
        let ma = moving_average(&candles, 20);
        for i in 19..closes.len() {
            let direct = closes[i - 19..=i].iter().sum::<f64>() / 20.0;
            let got = ma[i].unwrap();
            assert!((got - direct).abs() <= 0.005 + 1e-9, "index {}", i);
        }
    }
}
