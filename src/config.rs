//! Numeric tolerance and iteration limits shared by every algorithm.

use std::cmp::Ordering;

use crate::error::{FlowError, Result};

/// Default tolerance for capacity and flow comparisons.
pub const DEFAULT_EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowConfig {
    /// Values within `epsilon` of each other compare equal; an excess or
    /// residual capacity `<= epsilon` counts as zero.
    pub epsilon: f64,
    /// Upper bound on push-relabel discharges. `None` derives a bound from the
    /// network size.
    pub max_discharges: Option<usize>,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_discharges: None,
        }
    }
}

impl FlowConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_max_discharges(mut self, max_discharges: usize) -> Self {
        self.max_discharges = Some(max_discharges);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(FlowError::InvalidEpsilon(self.epsilon));
        }
        Ok(())
    }

    /// Compares two flow values, treating differences below epsilon as equal.
    pub fn compare(&self, a: f64, b: f64) -> Ordering {
        if (a - b).abs() < self.epsilon {
            Ordering::Equal
        } else if a < b {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// `true` if `value` is strictly above the tolerance.
    pub fn is_positive(&self, value: f64) -> bool {
        value > self.epsilon
    }

    /// Discharge bound for a network with `vertices` vertices and `arcs` arcs.
    ///
    /// FIFO push-relabel performs O(V^3) discharges; the default leaves a wide
    /// margin above that.
    pub fn discharge_limit(&self, vertices: usize, arcs: usize) -> usize {
        match self.max_discharges {
            Some(limit) => limit,
            None => vertices
                .saturating_mul(vertices)
                .saturating_mul(vertices)
                .saturating_mul(8)
                .saturating_add(arcs)
                .saturating_add(64),
        }
    }
}
