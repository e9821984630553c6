// src/space/bounds.rs
// Axis-aligned box limiting the positional part of sampled poses.

use crate::error::{DemoError, Result};
use nalgebra::Vector3;

/// Axis-aligned bounds on x, y and z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    low: Vector3<f64>,
    high: Vector3<f64>,
}

impl Bounds {
    /// Creates bounds, rejecting non-finite or inverted limits.
    pub fn new(low: Vector3<f64>, high: Vector3<f64>) -> Result<Self> {
        for axis in 0..3 {
            if !low[axis].is_finite() || !high[axis].is_finite() {
                return Err(DemoError::InvalidBounds(format!(
                    "axis {} has non-finite limits [{}, {}]",
                    axis, low[axis], high[axis]
                )));
            }
            if low[axis] >= high[axis] {
                return Err(DemoError::InvalidBounds(format!(
                    "axis {} low {} is not below high {}",
                    axis, low[axis], high[axis]
                )));
            }
        }
        Ok(Bounds { low, high })
    }

    /// Same limits on every axis, e.g. [-10, 10]^3.
    pub fn uniform(low: f64, high: f64) -> Result<Self> {
        Bounds::new(Vector3::repeat(low), Vector3::repeat(high))
    }

    /// Lower corner.
    pub fn low(&self) -> &Vector3<f64> {
        &self.low
    }

    /// Upper corner.
    pub fn high(&self) -> &Vector3<f64> {
        &self.high
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: &Vector3<f64>) -> bool {
        (0..3).all(|axis| point[axis] >= self.low[axis] && point[axis] <= self.high[axis])
    }

    /// Length of the box diagonal.
    pub fn diagonal(&self) -> f64 {
        (self.high - self.low).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_bounds_are_rejected() {
        let err = Bounds::uniform(10.0, -10.0).unwrap_err();
        assert!(matches!(err, DemoError::InvalidBounds(_)));
    }

    #[test]
    fn non_finite_bounds_are_rejected() {
        assert!(Bounds::uniform(f64::NEG_INFINITY, 1.0).is_err());
        assert!(Bounds::new(Vector3::zeros(), Vector3::new(1.0, f64::NAN, 1.0)).is_err());
    }

    #[test]
    fn contains_is_inclusive() {
        let bounds = Bounds::uniform(-10.0, 10.0).unwrap();
        assert!(bounds.contains(&Vector3::new(-10.0, 10.0, 0.0)));
        assert!(!bounds.contains(&Vector3::new(0.0, 10.5, 0.0)));
    }
}
