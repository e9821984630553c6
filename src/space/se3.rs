// src/space/se3.rs
// The SE(3) state space: bounded R^3 translation combined with SO(3) rotation.
// Distance is the sum of the Euclidean position distance and the quaternion angle.

use super::{Bounds, Pose};
use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use rand::Rng;
use std::f64::consts::{FRAC_PI_2, PI};

/// Quaternions closer than this to parallel are treated as identical.
const MAX_QUATERNION_NORM_ERROR: f64 = 1e-9;

/// Bounded SE(3) state space.
#[derive(Clone, Debug)]
pub struct Se3Space {
    bounds: Bounds,
}

impl Se3Space {
    /// Space whose positions are limited by `bounds`.
    pub fn new(bounds: Bounds) -> Self {
        Se3Space { bounds }
    }

    /// Positional bounds.
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Largest distance between any two states of the space.
    pub fn maximum_extent(&self) -> f64 {
        self.bounds.diagonal() + FRAC_PI_2
    }

    /// Position distance plus rotation angle.
    pub fn distance(&self, a: &Pose, b: &Pose) -> f64 {
        (a.position() - b.position()).norm() + rotation_distance(a.rotation(), b.rotation())
    }

    /// Linear interpolation of position and spherical interpolation of
    /// rotation; `t` = 0 yields `a`, `t` = 1 yields `b`.
    pub fn interpolate(&self, a: &Pose, b: &Pose, t: f64) -> Pose {
        let position = a.position().lerp(b.position(), t);
        let (qa, mut qb) = (*a.rotation(), *b.rotation());
        // shortest arc
        if qa.coords.dot(&qb.coords) < 0.0 {
            qb = UnitQuaternion::new_unchecked(-qb.into_inner());
        }
        let rotation = qa
            .try_slerp(&qb, t, MAX_QUATERNION_NORM_ERROR)
            .unwrap_or_else(|| qa.nlerp(&qb, t));
        Pose::new(position, rotation)
    }

    /// Whether the position of `pose` lies inside the bounds.
    pub fn satisfies_bounds(&self, pose: &Pose) -> bool {
        self.bounds.contains(pose.position())
    }

    /// Uniform sample: uniform position in the bounds, uniform rotation
    /// (Shoemake's subgroup algorithm).
    pub fn sample_uniform<R: Rng + ?Sized>(&self, rng: &mut R) -> Pose {
        let (low, high) = (self.bounds.low(), self.bounds.high());
        let position = Vector3::new(
            rng.random_range(low.x..=high.x),
            rng.random_range(low.y..=high.y),
            rng.random_range(low.z..=high.z),
        );
        Pose::new(position, uniform_rotation(rng))
    }
}

/// Angle between two orientations, in [0, pi/2] for the quaternion metric.
fn rotation_distance(a: &UnitQuaternion<f64>, b: &UnitQuaternion<f64>) -> f64 {
    let dq = a.coords.dot(&b.coords).abs();
    if dq > 1.0 - MAX_QUATERNION_NORM_ERROR {
        return 0.0;
    }
    dq.acos()
}

fn uniform_rotation<R: Rng + ?Sized>(rng: &mut R) -> UnitQuaternion<f64> {
    let x0: f64 = rng.random();
    let r1 = (1.0 - x0).sqrt();
    let r2 = x0.sqrt();
    let t1 = 2.0 * PI * rng.random::<f64>();
    let t2 = 2.0 * PI * rng.random::<f64>();
    let q = Quaternion::new(r2 * t2.cos(), r1 * t1.sin(), r1 * t1.cos(), r2 * t2.sin());
    UnitQuaternion::from_quaternion(q)
}
