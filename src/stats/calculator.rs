//! Statistics Calculator Module
//! Box-plot summaries for the distribution charts.

use serde::Serialize;
use statrs::statistics::Statistics;

/// Whisker reach in multiples of the interquartile range.
pub const WHISKER_IQR: f64 = 1.5;

/// Five-number summary plus mean/std for one distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest value not below `q1 - 1.5 * IQR`
    pub whisker_low: f64,
    /// Largest value not above `q3 + 1.5 * IQR`
    pub whisker_high: f64,
}

impl BoxSummary {
    /// Values outside the whiskers, in input order.
    pub fn outliers<'a>(&self, values: &'a [f64]) -> impl Iterator<Item = f64> + 'a {
        let (low, high) = (self.whisker_low, self.whisker_high);
        values.iter().copied().filter(move |&v| v < low || v > high)
    }
}

/// Handles the statistical side of the box-plot charts.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Summarize `values`; `None` when there is nothing to summarize.
    pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
        let n = values.len();
        if n == 0 {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= q1 - WHISKER_IQR * iqr)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= q3 + WHISKER_IQR * iqr)
            .unwrap_or(q3);

        let std = if n > 1 { values.iter().std_dev() } else { 0.0 };

        Some(BoxSummary {
            count: n,
            mean: values.iter().mean(),
            std,
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[n - 1],
            whisker_low,
            whisker_high,
        })
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }
}
