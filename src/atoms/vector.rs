/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Vector3D type for representing 3D positions and directions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Represents a 3D vector for positions and other spatial quantities
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3D {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Vector3D {
    /// Create a new 3D vector
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create a new vector at the origin
    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Unit vector along the z axis
    pub fn unit_z() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Calculate the distance to another vector
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Calculate the length (magnitude) of the vector
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Calculate the dot product with another vector
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Calculate the cross product with another vector
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Normalize the vector to unit length
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 1e-10 {
            Self {
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            }
        } else {
            Self::origin()
        }
    }

    /// Returns true if all components are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Rotate the vector around an axis by the given angle (in radians)
    ///
    /// Uses the Rodrigues rotation formula. The axis does not need to be
    /// normalized.
    pub fn rotated_about(&self, axis: &Self, angle: f64) -> Self {
        let k = axis.normalize();
        let cos_a = angle.cos();
        let sin_a = angle.sin();
        let term1 = *self * cos_a;
        let term2 = k.cross(self) * sin_a;
        let term3 = k * (k.dot(self) * (1.0 - cos_a));
        term1 + term2 + term3
    }

    /// Rotate the vector so that the z axis maps onto `target`
    ///
    /// Rotation around the axis perpendicular to both z and `target`. With
    /// `target` (anti)parallel to z the rotation degenerates to identity or
    /// a flip around x.
    pub fn rotated_z_to(&self, target: &Self) -> Self {
        let t = target.normalize();
        let z = Self::unit_z();
        let axis = z.cross(&t);
        if axis.length() < 1e-10 {
            if t.z < 0.0 {
                // Antiparallel: flip around x
                return Self::new(self.x, -self.y, -self.z);
            }
            return *self;
        }
        let angle = t.dot(&z).clamp(-1.0, 1.0).acos();
        self.rotated_about(&axis, angle)
    }
}

impl fmt::Display for Vector3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6}, {:.6})", self.x, self.y, self.z)
    }
}

impl Add for Vector3D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vector3D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f64> for Vector3D {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }
}

impl Neg for Vector3D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vector_operations() {
        let v1 = Vector3D::new(1.0, 2.0, 3.0);
        let v2 = Vector3D::new(4.0, 5.0, 6.0);

        assert_relative_eq!(v1.distance(&v2), 5.196152, epsilon = 1e-6);
        assert_relative_eq!(v1.length(), 3.741657, epsilon = 1e-6);
        assert_relative_eq!(v1.dot(&v2), 32.0, epsilon = 1e-6);

        let cross = v1.cross(&v2);
        assert_relative_eq!(cross.x, -3.0, epsilon = 1e-6);
        assert_relative_eq!(cross.y, 6.0, epsilon = 1e-6);
        assert_relative_eq!(cross.z, -3.0, epsilon = 1e-6);

        let norm = v1.normalize();
        assert_relative_eq!(norm.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_about_axis() {
        let v = Vector3D::new(1.0, 0.0, 0.0);
        let rotated = v.rotated_about(&Vector3D::unit_z(), std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-10);
        assert_relative_eq!(rotated.y, 1.0, epsilon = 1e-10);
        assert_relative_eq!(rotated.z, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_rotation_z_to_target() {
        let v = Vector3D::new(0.0, 0.0, 2.0);
        let target = Vector3D::new(1.0, 0.0, 0.0);
        let rotated = v.rotated_z_to(&target);
        assert_relative_eq!(rotated.x, 2.0, epsilon = 1e-10);
        assert_relative_eq!(rotated.y, 0.0, epsilon = 1e-10);
        assert_relative_eq!(rotated.z, 0.0, epsilon = 1e-10);

        // Identity when the target is already z
        let same = v.rotated_z_to(&Vector3D::unit_z());
        assert_relative_eq!(same.z, 2.0, epsilon = 1e-10);
    }
}
