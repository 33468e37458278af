/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Atomic structure representation for coverage analysis
//!
//! An `AtomicStructure` is the input unit for occupancy resolution: a list
//! of atoms inside a (possibly partially periodic) cell, partitioned into a
//! rigid substrate and mobile adsorbate atoms by the fixed adsorbate
//! element alphabet.

use serde::{Deserialize, Serialize};

use super::atom::Atom;
use super::cell::Cell;
use super::errors::{Result, StructureError};
use super::vector::Vector3D;

/// AtomicStructure represents a collection of atoms in a cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtomicStructure {
    /// List of atoms in the structure
    atoms: Vec<Atom>,
    /// Periodic cell
    cell: Cell,
}

impl AtomicStructure {
    /// Create a new empty structure with the given cell
    pub fn new(cell: Cell) -> Self {
        Self {
            atoms: Vec::new(),
            cell,
        }
    }

    /// Create a structure from a list of atoms
    pub fn from_atoms(cell: Cell, atoms: Vec<Atom>) -> Self {
        Self { atoms, cell }
    }

    /// Add an atom to the structure, returning its index
    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    /// Get the number of atoms
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Whether the structure contains no atoms
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Get a reference to an atom by index
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Get a mutable reference to an atom by index
    pub fn atom_mut(&mut self, index: usize) -> Option<&mut Atom> {
        self.atoms.get_mut(index)
    }

    /// Get a slice of all atoms
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Get the cell
    pub fn cell(&self) -> &Cell {
        &self.cell
    }

    /// Whether any cell axis is periodic
    pub fn is_periodic(&self) -> bool {
        self.cell.is_periodic()
    }

    /// Get the element symbols of all atoms, in index order
    pub fn symbols(&self) -> Vec<&str> {
        self.atoms.iter().map(|a| a.symbol()).collect()
    }

    /// Indices of all adsorbate atoms, in ascending order
    pub fn adsorbate_indices(&self) -> Vec<usize> {
        self.atoms
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_adsorbate())
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of all substrate atoms, in ascending order
    pub fn substrate_indices(&self) -> Vec<usize> {
        self.atoms
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.is_adsorbate())
            .map(|(i, _)| i)
            .collect()
    }

    /// Minimum-image distance between two atoms
    pub fn distance(&self, i: usize, j: usize) -> Result<f64> {
        let len = self.atoms.len();
        let a = self
            .atoms
            .get(i)
            .ok_or(StructureError::IndexOutOfRange { index: i, len })?;
        let b = self
            .atoms
            .get(j)
            .ok_or(StructureError::IndexOutOfRange { index: j, len })?;
        Ok(self.cell.mic_distance(a.position(), b.position()))
    }

    /// Minimum-image distance from an atom to an arbitrary point
    pub fn distance_to_point(&self, i: usize, point: &Vector3D) -> Result<f64> {
        let len = self.atoms.len();
        let a = self
            .atoms
            .get(i)
            .ok_or(StructureError::IndexOutOfRange { index: i, len })?;
        Ok(self.cell.mic_distance(a.position(), point))
    }

    /// Remove the atoms at the given indices
    ///
    /// Indices may be given in any order; removal happens from the back so
    /// the remaining indices stay valid during the operation.
    pub fn remove_atoms(&mut self, indices: &[usize]) {
        let mut sorted: Vec<usize> = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        for &i in sorted.iter().rev() {
            if i < self.atoms.len() {
                self.atoms.remove(i);
            }
        }
    }
}
