//! Linear trend forecasting over the historical cost series.
//!
//! Fits an ordinary least-squares line to the series indexed by period
//! position and extrapolates it. No smoothing, no seasonality.

use chrono::{Months, NaiveDate};

/// Fit `y = slope * x + intercept` over points `(i, series[i])`.
///
/// Returns `None` for an empty series. A single observation has zero degrees
/// of freedom for the slope, so that case is pinned to a flat line through
/// the one value rather than left to the general formula (whose denominator
/// would be zero).
fn fit_line(series: &[f64]) -> Option<(f64, f64)> {
    match series.len() {
        0 => None,
        1 => Some((0.0, series[0])),
        _ => {
            let n = series.len() as f64;
            let sum_x: f64 = (0..series.len()).map(|i| i as f64).sum();
            let sum_y: f64 = series.iter().sum();
            let sum_xx: f64 = (0..series.len()).map(|i| (i as f64).powi(2)).sum();
            let sum_xy: f64 = series.iter().enumerate().map(|(i, y)| i as f64 * y).sum();

            let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x);
            let intercept = (sum_y - slope * sum_x) / n;
            Some((slope, intercept))
        }
    }
}

/// Extrapolate `horizon` future period totals from the historical series.
///
/// Values are evaluated at `x = n .. n + horizon - 1` and are intentionally
/// not clamped: a declining trend may forecast below the last observation,
/// or below zero.
pub fn forecast_costs(series: &[f64], horizon: usize) -> Result<Vec<f64>, String> {
    let (slope, intercept) =
        fit_line(series).ok_or("need at least one historical data point")?;

    Ok((series.len()..series.len() + horizon)
        .map(|x| slope * x as f64 + intercept)
        .collect())
}

/// Month-year labels for the forecast points: label `i` (1-indexed) is `from`
/// advanced `i` calendar months, formatted like "December 2024".
pub fn month_labels(from: NaiveDate, horizon: usize) -> Vec<String> {
    (1..=horizon as u32)
        .map(|i| (from + Months::new(i)).format("%B %Y").to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_series_extends_the_line() {
        let forecast = forecast_costs(&[10.0, 20.0, 30.0], 3).unwrap();
        assert_eq!(forecast.len(), 3);
        for (got, want) in forecast.iter().zip([40.0, 50.0, 60.0]) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
    }

    #[test]
    fn test_constant_series_stays_flat() {
        let forecast = forecast_costs(&[50.0, 50.0, 50.0], 3).unwrap();
        for got in forecast {
            assert!((got - 50.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_point_forecasts_flat() {
        let forecast = forecast_costs(&[42.0], 3).unwrap();
        assert_eq!(forecast, vec![42.0, 42.0, 42.0]);
    }

    #[test]
    fn test_empty_series_is_an_error() {
        assert!(forecast_costs(&[], 3).is_err());
    }

    #[test]
    fn test_declining_trend_not_floored_at_zero() {
        let forecast = forecast_costs(&[30.0, 20.0, 10.0], 3).unwrap();
        assert!((forecast[0] - 0.0).abs() < 1e-9);
        assert!(forecast[1] < 0.0);
        assert!(forecast[2] < forecast[1]);
    }

    #[test]
    fn test_month_labels_from_november() {
        let from = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
        assert_eq!(
            month_labels(from, 3),
            vec!["December 2024", "January 2025", "February 2025"]
        );
    }
}
