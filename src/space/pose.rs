// src/space/pose.rs
// SE(3) pose: a position in R^3 plus a unit-quaternion orientation.

use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use std::fmt;

/// A rigid-body pose. Immutable value type, cheap to copy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    position: Vector3<f64>,
    rotation: UnitQuaternion<f64>,
}

impl Pose {
    /// Creates a pose from a position and an orientation.
    pub fn new(position: Vector3<f64>, rotation: UnitQuaternion<f64>) -> Self {
        Pose { position, rotation }
    }

    /// Creates a pose at (x, y, z) with identity orientation.
    pub fn from_xyz(x: f64, y: f64, z: f64) -> Self {
        Pose::new(Vector3::new(x, y, z), UnitQuaternion::identity())
    }

    /// Creates a pose from a position and an (x, y, z, w) quaternion.
    /// The quaternion is normalized; a zero quaternion falls back to identity.
    pub fn from_parts(position: [f64; 3], orientation: [f64; 4]) -> Self {
        let [qx, qy, qz, qw] = orientation;
        let q = Quaternion::new(qw, qx, qy, qz);
        let rotation = if q.norm() > f64::EPSILON {
            UnitQuaternion::from_quaternion(q)
        } else {
            UnitQuaternion::identity()
        };
        Pose::new(Vector3::from(position), rotation)
    }

    /// Translation part.
    pub fn position(&self) -> &Vector3<f64> {
        &self.position
    }

    /// Rotation part.
    pub fn rotation(&self) -> &UnitQuaternion<f64> {
        &self.rotation
    }

    /// x coordinate.
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// y coordinate.
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// z coordinate.
    pub fn z(&self) -> f64 {
        self.position.z
    }

    /// Orientation as (x, y, z, w).
    pub fn orientation_xyzw(&self) -> [f64; 4] {
        let q = self.rotation.quaternion();
        [q.i, q.j, q.k, q.w]
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [qx, qy, qz, qw] = self.orientation_xyzw();
        write!(
            f,
            "position [{:.4} {:.4} {:.4}] rotation [{:.4} {:.4} {:.4} {:.4}]",
            self.position.x, self.position.y, self.position.z, qx, qy, qz, qw
        )
    }
}
