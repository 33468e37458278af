/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Periodic cell and minimum-image displacement
//!
//! The cell stores the three lattice vectors as rows together with a
//! per-axis periodicity flag, so the same type describes fully periodic
//! bulk, slabs (periodic in x/y only) and isolated nanoparticles (no
//! periodicity at all).

use serde::{Deserialize, Serialize};

use super::errors::{Result, StructureError};
use super::vector::Vector3D;

/// Periodic cell with lattice vectors stored as rows of a 3x3 matrix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    /// Lattice vectors as rows (a, b, c)
    matrix: [[f64; 3]; 3],
    /// Inverse of the lattice matrix, cached for fractional conversion
    inverse: [[f64; 3]; 3],
    /// Per-axis periodicity flags
    pbc: [bool; 3],
}

fn determinant(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

fn invert(m: &[[f64; 3]; 3]) -> Option<[[f64; 3]; 3]> {
    let det = determinant(m);
    if det.abs() < 1e-12 {
        return None;
    }
    let inv_det = 1.0 / det;
    let mut inv = [[0.0; 3]; 3];
    inv[0][0] = (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det;
    inv[0][1] = (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det;
    inv[0][2] = (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det;
    inv[1][0] = (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det;
    inv[1][1] = (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det;
    inv[1][2] = (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det;
    inv[2][0] = (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det;
    inv[2][1] = (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det;
    inv[2][2] = (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det;
    Some(inv)
}

impl Cell {
    /// Create a new cell from lattice vectors (rows) and periodicity flags
    pub fn new(matrix: [[f64; 3]; 3], pbc: [bool; 3]) -> Result<Self> {
        let inverse = invert(&matrix).ok_or_else(|| {
            StructureError::InvalidCell("cell has zero or near-zero volume".to_string())
        })?;
        Ok(Self { matrix, inverse, pbc })
    }

    /// Create an orthorhombic cell from the three box lengths
    pub fn orthorhombic(a: f64, b: f64, c: f64, pbc: [bool; 3]) -> Result<Self> {
        Self::new([[a, 0.0, 0.0], [0.0, b, 0.0], [0.0, 0.0, c]], pbc)
    }

    /// Create a placeholder cell for a non-periodic structure
    pub fn isolated() -> Self {
        // Unit box; never consulted because no axis is periodic
        Self {
            matrix: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            inverse: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            pbc: [false; 3],
        }
    }

    /// Get the lattice matrix (rows are the lattice vectors)
    pub fn matrix(&self) -> &[[f64; 3]; 3] {
        &self.matrix
    }

    /// Get the periodicity flags
    pub fn pbc(&self) -> [bool; 3] {
        self.pbc
    }

    /// Whether any axis is periodic
    pub fn is_periodic(&self) -> bool {
        self.pbc.iter().any(|&p| p)
    }

    /// Convert a Cartesian position to fractional coordinates
    pub fn to_fractional(&self, cart: &Vector3D) -> Vector3D {
        let c = [cart.x, cart.y, cart.z];
        let mut f = [0.0; 3];
        for (j, fj) in f.iter_mut().enumerate() {
            for (i, ci) in c.iter().enumerate() {
                *fj += ci * self.inverse[i][j];
            }
        }
        Vector3D::new(f[0], f[1], f[2])
    }

    /// Convert fractional coordinates to a Cartesian position
    pub fn to_cartesian(&self, frac: &Vector3D) -> Vector3D {
        let f = [frac.x, frac.y, frac.z];
        let mut c = [0.0; 3];
        for (j, cj) in c.iter_mut().enumerate() {
            for (i, fi) in f.iter().enumerate() {
                *cj += fi * self.matrix[i][j];
            }
        }
        Vector3D::new(c[0], c[1], c[2])
    }

    /// Shortest displacement vector from `from` to `to` under the
    /// minimum-image convention
    ///
    /// Wrapping is applied only along periodic axes; for a fully
    /// non-periodic cell this is the plain Cartesian difference.
    pub fn mic_vector(&self, from: &Vector3D, to: &Vector3D) -> Vector3D {
        if !self.is_periodic() {
            return *to - *from;
        }
        let mut frac = self.to_fractional(&(*to - *from));
        if self.pbc[0] {
            frac.x -= frac.x.round();
        }
        if self.pbc[1] {
            frac.y -= frac.y.round();
        }
        if self.pbc[2] {
            frac.z -= frac.z.round();
        }
        self.to_cartesian(&frac)
    }

    /// Shortest distance between two points under the minimum-image convention
    pub fn mic_distance(&self, from: &Vector3D, to: &Vector3D) -> f64 {
        self.mic_vector(from, to).length()
    }
}
