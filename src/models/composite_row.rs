use serde::{Deserialize, Serialize};

use crate::domain::Horizon;
use crate::models::Metric;

/// One unit's metrics re-averaged over a horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeRow<U> {
    pub unit: U,
    pub horizon: Horizon,
    /// Instances that actually went into the average (<= window).
    pub instances: usize,
    pub values: Vec<(Metric, f64)>,
}

impl<U> CompositeRow<U> {
    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.values
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, v)| *v)
    }
}

/// One metric of one unit across every horizon, shortest first (see `Horizon::ALL`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeMatrixRow<U> {
    pub unit: U,
    pub metric: Metric,
    pub values: [f64; 5],
}

impl<U> CompositeMatrixRow<U> {
    pub fn at(&self, horizon: Horizon) -> f64 {
        self.values[horizon.index()]
    }
}
