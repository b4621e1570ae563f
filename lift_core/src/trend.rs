//! Linear trend estimation over weekly series.
//!
//! Ordinary least squares over `(i, y[i])` for `i = 0..n`. A trend line is
//! only worth drawing when the fit explains more than half the variance.

use serde::{Deserialize, Serialize};

/// R² above which a trend is considered significant
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.5;

/// Fitted line `y = slope * x + intercept`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination; `None` when every y value is equal
    pub r_squared: Option<f64>,
}

impl LinearTrend {
    /// Fit a line to `values`, using each value's index as x.
    ///
    /// Returns `None` for fewer than two points: that means "not enough
    /// data", not "flat".
    pub fn fit(values: &[f64]) -> Option<Self> {
        let n = values.len();
        if n < 2 {
            return None;
        }

        let count = n as f64;
        let x_mean = (0..n).map(|i| i as f64).sum::<f64>() / count;
        let y_mean = values.iter().sum::<f64>() / count;

        let mut numerator = 0.0;
        let mut x_variance = 0.0;
        for (i, y) in values.iter().enumerate() {
            let dx = i as f64 - x_mean;
            numerator += dx * (y - y_mean);
            x_variance += dx * dx;
        }

        let slope = if x_variance == 0.0 {
            0.0
        } else {
            numerator / x_variance
        };
        let intercept = y_mean - slope * x_mean;

        let ss_tot: f64 = values.iter().map(|y| (y - y_mean).powi(2)).sum();
        let r_squared = if ss_tot == 0.0 {
            None
        } else {
            let ss_res: f64 = values
                .iter()
                .enumerate()
                .map(|(i, y)| (y - (slope * i as f64 + intercept)).powi(2))
                .sum();
            Some(1.0 - ss_res / ss_tot)
        };

        tracing::debug!(
            "Fitted trend over {} points: slope={:.3} intercept={:.3} r2={:?}",
            n,
            slope,
            intercept,
            r_squared
        );

        Some(Self {
            slope,
            intercept,
            r_squared,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// True when R² exceeds [`SIGNIFICANCE_THRESHOLD`]
    pub fn is_significant(&self) -> bool {
        self.r_squared
            .map(|r2| r2 > SIGNIFICANCE_THRESHOLD)
            .unwrap_or(false)
    }

    /// Predicted values for `x = 0..n`
    pub fn line(&self, n: usize) -> Vec<f64> {
        (0..n).map(|x| self.predict(x as f64)).collect()
    }
}
