/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Atom representation for coverage analysis

use serde::{Deserialize, Serialize};

use super::vector::Vector3D;
use crate::species::is_adsorbate_element;

/// Represents a single atom: an element symbol at a Cartesian position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Atom {
    /// Element symbol
    symbol: String,
    /// Position of the atom in 3D space
    position: Vector3D,
}

impl Atom {
    /// Create a new atom with the given element symbol and position
    pub fn new(symbol: &str, position: Vector3D) -> Self {
        Self {
            symbol: symbol.to_string(),
            position,
        }
    }

    /// Get the element symbol
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Get the atom's position
    pub fn position(&self) -> &Vector3D {
        &self.position
    }

    /// Set the atom's position
    pub fn set_position(&mut self, position: Vector3D) {
        self.position = position;
    }

    /// Whether this atom belongs to the adsorbate element alphabet
    ///
    /// Atoms outside the alphabet are substrate atoms by definition.
    pub fn is_adsorbate(&self) -> bool {
        is_adsorbate_element(&self.symbol)
    }
}
