use serde::{Deserialize, Serialize};

pub const DEFAULT_WEIGHT_RATE: f64 = 10.0;
pub const DEFAULT_DISTANCE_RATE: f64 = 5.0;

/// `base + weight * weight_rate + distance * distance_rate`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostCalculator {
    pub weight_rate: f64,
    pub distance_rate: f64,
}

impl CostCalculator {
    pub fn new(weight_rate: f64, distance_rate: f64) -> Self {
        Self {
            weight_rate,
            distance_rate,
        }
    }

    pub fn cost(&self, base: f64, weight: f64, distance: f64) -> f64 {
        base + weight * self.weight_rate + distance * self.distance_rate
    }
}

impl Default for CostCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHT_RATE, DEFAULT_DISTANCE_RATE)
    }
}
