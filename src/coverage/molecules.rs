/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Adsorbate molecule identification
//!
//! Adsorbate molecules are the connected components of the short-range
//! bond graph over the adsorbate atoms. Spurious intermolecular H···H
//! contacts are cut before connectivity is computed: an H–H bond survives
//! only when at least one of the two hydrogens has no other neighbor,
//! which preserves an isolated H2 molecule while separating hydrogens that
//! each belong to their own molecule.

use std::collections::{HashMap, VecDeque};

use ndarray::Array2;

use crate::atoms::neighbors::{adjacency_matrix, neighbor_shell_list};
use crate::atoms::AtomicStructure;

/// Buffer over covalent radii for adsorbate bond detection (in Å)
const ADSORBATE_BOND_BUFFER: f64 = 0.2;

/// The adsorbate atoms of a structure, their bond graph and molecules
#[derive(Debug, Clone, Default)]
pub struct AdsorbateInventory {
    /// Global indices of all adsorbate atoms, ascending
    ids: Vec<usize>,
    /// Global index -> position within `ids`
    local: HashMap<usize, usize>,
    /// Bond adjacency over the adsorbate atoms (local indexing)
    adjacency: Array2<u8>,
    /// Connected components as sorted global index tuples
    molecules: Vec<Vec<usize>>,
    /// Global atom index -> position within `molecules`
    molecule_of: HashMap<usize, usize>,
}

impl AdsorbateInventory {
    /// Identifies all adsorbate molecules in a structure
    pub fn identify(structure: &AtomicStructure) -> Self {
        let ids = structure.adsorbate_indices();
        if ids.is_empty() {
            return Self::default();
        }

        let nblist = neighbor_shell_list(structure, &ids, ADSORBATE_BOND_BUFFER);
        let mut adjacency = adjacency_matrix(&nblist);
        let n = ids.len();

        let is_h: Vec<bool> = ids
            .iter()
            .map(|&i| structure.atom(i).map(|a| a.symbol() == "H") == Some(true))
            .collect();
        let degrees: Vec<usize> = (0..n)
            .map(|i| (0..n).filter(|&j| adjacency[(i, j)] == 1).count())
            .collect();

        // Cut H-H contacts where both hydrogens also bond elsewhere
        for i in 0..n {
            if !is_h[i] || degrees[i] <= 1 {
                continue;
            }
            for j in 0..n {
                if is_h[j] && adjacency[(i, j)] == 1 && degrees[j] > 1 {
                    adjacency[(i, j)] = 0;
                    adjacency[(j, i)] = 0;
                }
            }
        }

        // Connected components over the cut bond graph, via explicit BFS
        let mut component_of = vec![usize::MAX; n];
        let mut molecules: Vec<Vec<usize>> = Vec::new();
        for start in 0..n {
            if component_of[start] != usize::MAX {
                continue;
            }
            let component_index = molecules.len();
            let mut members = Vec::new();
            let mut queue = VecDeque::new();
            component_of[start] = component_index;
            queue.push_back(start);
            while let Some(current) = queue.pop_front() {
                members.push(ids[current]);
                for next in 0..n {
                    if adjacency[(current, next)] == 1 && component_of[next] == usize::MAX {
                        component_of[next] = component_index;
                        queue.push_back(next);
                    }
                }
            }
            members.sort_unstable();
            molecules.push(members);
        }

        let local: HashMap<usize, usize> = ids.iter().enumerate().map(|(l, &g)| (g, l)).collect();
        let mut molecule_of = HashMap::new();
        for (m, members) in molecules.iter().enumerate() {
            for &g in members {
                molecule_of.insert(g, m);
            }
        }

        Self {
            ids,
            local,
            adjacency,
            molecules,
            molecule_of,
        }
    }

    /// Whether the structure has any adsorbate atoms
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Global indices of all adsorbate atoms
    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    /// All molecules as sorted global index tuples
    pub fn molecules(&self) -> &[Vec<usize>] {
        &self.molecules
    }

    /// The molecule containing a given atom
    pub fn molecule_of(&self, global_index: usize) -> Option<&[usize]> {
        self.molecule_of
            .get(&global_index)
            .map(|&m| self.molecules[m].as_slice())
    }

    /// Global indices of the atoms directly bonded to a given atom
    pub fn bonded_neighbors(&self, global_index: usize) -> Vec<usize> {
        let Some(&l) = self.local.get(&global_index) else {
            return Vec::new();
        };
        (0..self.ids.len())
            .filter(|&j| self.adjacency[(l, j)] == 1)
            .map(|j| self.ids[j])
            .collect()
    }

    /// Whether two adsorbate atoms are directly bonded
    pub fn are_bonded(&self, a: usize, b: usize) -> bool {
        match (self.local.get(&a), self.local.get(&b)) {
            (Some(&la), Some(&lb)) => self.adjacency[(la, lb)] == 1,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::{Atom, Cell, Vector3D};

    fn structure_with(atoms: &[(&str, f64, f64, f64)]) -> AtomicStructure {
        let cell = Cell::orthorhombic(20.0, 20.0, 20.0, [false; 3]).unwrap();
        let mut s = AtomicStructure::new(cell);
        for &(symbol, x, y, z) in atoms {
            s.add_atom(Atom::new(symbol, Vector3D::new(x, y, z)));
        }
        s
    }

    #[test]
    fn test_isolated_h2_is_one_molecule() {
        let s = structure_with(&[("H", 1.0, 1.0, 1.0), ("H", 1.75, 1.0, 1.0)]);
        let inventory = AdsorbateInventory::identify(&s);
        assert_eq!(inventory.molecules(), &[vec![0, 1]]);
    }

    #[test]
    fn test_intermolecular_hh_contact_is_cut() {
        // Two OH groups whose hydrogens come close: without the cut the
        // four atoms would merge into one component.
        let s = structure_with(&[
            ("O", 0.0, 0.0, 0.0),
            ("H", 0.9, 0.0, 0.3),
            ("O", 2.6, 0.0, 0.0),
            ("H", 1.7, 0.0, 0.3),
        ]);
        let inventory = AdsorbateInventory::identify(&s);
        assert_eq!(inventory.molecules().len(), 2);
        assert_eq!(inventory.molecule_of(1), Some(&[0, 1][..]));
        assert_eq!(inventory.molecule_of(3), Some(&[2, 3][..]));
    }

    #[test]
    fn test_lone_atoms_are_singletons() {
        let s = structure_with(&[("O", 0.0, 0.0, 0.0), ("C", 8.0, 8.0, 8.0)]);
        let inventory = AdsorbateInventory::identify(&s);
        assert_eq!(inventory.molecules().len(), 2);
    }

    #[test]
    fn test_bonded_neighbors() {
        let s = structure_with(&[
            ("C", 0.0, 0.0, 0.0),
            ("O", 0.0, 0.0, 1.15),
        ]);
        let inventory = AdsorbateInventory::identify(&s);
        assert_eq!(inventory.bonded_neighbors(0), vec![1]);
        assert!(inventory.are_bonded(0, 1));
    }

    #[test]
    fn test_empty_structure() {
        let s = structure_with(&[]);
        let inventory = AdsorbateInventory::identify(&s);
        assert!(inventory.is_empty());
        assert!(inventory.molecules().is_empty());
    }
}
