/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Short-range neighbor lists over atom subsets
//!
//! Two atoms are neighbors when their minimum-image distance is below the
//! sum of their covalent radii plus a configurable buffer. Rows are built
//! independently, so the pairwise scan parallelizes over atoms without
//! affecting determinism.

use ndarray::Array2;
use rayon::prelude::*;

use super::database::covalent_radius;
use super::structure::AtomicStructure;

/// Builds neighbor lists for the atoms at `ids` within a structure
///
/// # Arguments
///
/// * `structure` - The structure the atoms live in (provides cell and MIC)
/// * `ids` - Global atom indices of the subset to analyze
/// * `dx` - Buffer added to the covalent-radii sum (in Å)
///
/// # Returns
///
/// One neighbor list per subset atom, holding positions *within the
/// subset* (local indices), each sorted ascending.
pub fn neighbor_shell_list(
    structure: &AtomicStructure,
    ids: &[usize],
    dx: f64,
) -> Vec<Vec<usize>> {
    let cell = structure.cell();
    let atoms: Vec<_> = ids
        .iter()
        .map(|&i| {
            let atom = structure.atom(i).expect("subset index out of range");
            (*atom.position(), covalent_radius(atom.symbol()))
        })
        .collect();

    (0..atoms.len())
        .into_par_iter()
        .map(|i| {
            let (pos_i, r_i) = atoms[i];
            let mut row = Vec::new();
            for (j, &(pos_j, r_j)) in atoms.iter().enumerate() {
                if i == j {
                    continue;
                }
                let cutoff = r_i + r_j + dx;
                if cell.mic_distance(&pos_i, &pos_j) < cutoff {
                    row.push(j);
                }
            }
            row
        })
        .collect()
}

/// Converts neighbor lists into a symmetric adjacency matrix
pub fn adjacency_matrix(neighbor_lists: &[Vec<usize>]) -> Array2<u8> {
    let n = neighbor_lists.len();
    let mut matrix = Array2::zeros((n, n));
    for (i, row) in neighbor_lists.iter().enumerate() {
        for &j in row {
            matrix[(i, j)] = 1;
            matrix[(j, i)] = 1;
        }
    }
    matrix
}

/// Checks whether newly added adsorbate atoms violate the minimum
/// inter-adsorbate distance
///
/// The last `n_added` entries of `ads_ids` are the atoms of the freshly
/// placed adsorbate; any of them closer than `cutoff` to an earlier
/// adsorbate atom is a violation.
pub fn atoms_too_close_after_addition(
    structure: &AtomicStructure,
    ads_ids: &[usize],
    n_added: usize,
    cutoff: f64,
) -> bool {
    if ads_ids.len() <= n_added {
        return false;
    }
    let (old, new) = ads_ids.split_at(ads_ids.len() - n_added);
    for &i in new {
        for &j in old {
            if structure.distance(i, j).unwrap_or(f64::INFINITY) < cutoff {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::atom::Atom;
    use crate::atoms::cell::Cell;
    use crate::atoms::vector::Vector3D;

    fn co_on_box() -> AtomicStructure {
        let cell = Cell::orthorhombic(10.0, 10.0, 10.0, [true; 3]).unwrap();
        let mut s = AtomicStructure::new(cell);
        s.add_atom(Atom::new("C", Vector3D::new(1.0, 1.0, 1.0)));
        s.add_atom(Atom::new("O", Vector3D::new(1.0, 1.0, 2.15)));
        s.add_atom(Atom::new("O", Vector3D::new(5.0, 5.0, 5.0)));
        s
    }

    #[test]
    fn test_neighbor_list_bonds_co_only() {
        let s = co_on_box();
        let nblist = neighbor_shell_list(&s, &[0, 1, 2], 0.2);
        assert_eq!(nblist[0], vec![1]);
        assert_eq!(nblist[1], vec![0]);
        assert!(nblist[2].is_empty());
    }

    #[test]
    fn test_adjacency_matrix_is_symmetric() {
        let s = co_on_box();
        let nblist = neighbor_shell_list(&s, &[0, 1, 2], 0.2);
        let adj = adjacency_matrix(&nblist);
        assert_eq!(adj[(0, 1)], 1);
        assert_eq!(adj[(1, 0)], 1);
        assert_eq!(adj[(0, 2)], 0);
    }

    #[test]
    fn test_too_close_detection() {
        let cell = Cell::orthorhombic(10.0, 10.0, 10.0, [true; 3]).unwrap();
        let mut s = AtomicStructure::new(cell);
        s.add_atom(Atom::new("O", Vector3D::new(1.0, 1.0, 1.0)));
        s.add_atom(Atom::new("O", Vector3D::new(1.0, 1.0, 2.0)));
        assert!(atoms_too_close_after_addition(&s, &[0, 1], 1, 1.5));
        assert!(!atoms_too_close_after_addition(&s, &[0, 1], 1, 0.5));
        // Nothing added means nothing to check
        assert!(!atoms_too_close_after_addition(&s, &[0], 1, 1.5));
    }
}
