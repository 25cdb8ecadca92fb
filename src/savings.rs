//! Savings of an optimized tour against the unoptimized input order.

use crate::distance::TourMetrics;
use crate::models::{MetricSavings, Savings};

/// Compares optimized metrics with the input-order baseline.
///
/// # Examples
///
/// ```
/// use u_tour::distance::TourMetrics;
/// use u_tour::savings::SavingsCalculator;
///
/// let original = TourMetrics { distance_km: 10.0, time_hours: 0.25, fuel: 3.0, co2_kg: 8.04 };
/// let optimized = TourMetrics { distance_km: 8.0, time_hours: 0.2, fuel: 2.4, co2_kg: 6.432 };
/// let savings = SavingsCalculator::new(original).compare(&optimized);
/// assert!((savings.distance.saved - 2.0).abs() < 1e-12);
/// assert!((savings.distance.saved_percent - 20.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SavingsCalculator {
    original: TourMetrics,
}

impl SavingsCalculator {
    /// Uses `original` (the input order's metrics) as the baseline.
    pub fn new(original: TourMetrics) -> Self {
        Self { original }
    }

    /// The baseline metrics.
    pub fn original(&self) -> &TourMetrics {
        &self.original
    }

    /// Absolute and percent savings for every dimension.
    pub fn compare(&self, optimized: &TourMetrics) -> Savings {
        Savings {
            distance: metric(self.original.distance_km, optimized.distance_km),
            time: metric(self.original.time_hours, optimized.time_hours),
            fuel: metric(self.original.fuel, optimized.fuel),
            emissions: metric(self.original.co2_kg, optimized.co2_kg),
        }
    }
}

/// One dimension of savings; percent is zero when the baseline is zero.
pub fn metric(original: f64, optimized: f64) -> MetricSavings {
    let saved = original - optimized;
    let saved_percent = if original > 0.0 {
        saved / original * 100.0
    } else {
        0.0
    };
    MetricSavings {
        original,
        optimized,
        saved,
        saved_percent,
    }
}
