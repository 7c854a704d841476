//! Per-generation fitness statistics.

use serde::Serialize;

/// Fitness summary of the organisms alive at the end of a generation.
///
/// Serialized with the upper-case keys `BEST`, `WORST`, `AVG`, `SUM`, `COUNT`.
/// For an empty population `BEST`, `WORST` and `AVG` are NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct GenerationStats {
    /// Highest fitness.
    pub best: f64,
    /// Lowest fitness.
    pub worst: f64,
    /// Mean fitness.
    pub avg: f64,
    /// Sum of all fitness values.
    pub sum: f64,
    /// Number of organisms measured.
    pub count: usize,
}

impl GenerationStats {
    /// Summarises a sequence of fitness values.
    pub fn from_fitness<I>(fitness: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<f64>,
    {
        let mut best = f64::NEG_INFINITY;
        let mut worst = f64::INFINITY;
        let mut sum = 0.0;
        let mut count = 0usize;
        for value in fitness {
            let value = value.into();
            best = best.max(value);
            worst = worst.min(value);
            sum += value;
            count += 1;
        }

        if count == 0 {
            return Self {
                best: f64::NAN,
                worst: f64::NAN,
                avg: f64::NAN,
                sum: 0.0,
                count: 0,
            };
        }

        Self {
            best,
            worst,
            avg: sum / count as f64,
            sum,
            count,
        }
    }

    /// Whether the summary covers no organisms.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
