/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Coverage graph construction
//!
//! The coverage graph is the canonical representation of an occupancy
//! snapshot used for isomorphism testing. In molecule-wise mode its nodes
//! are the substrate atoms of the chosen surface region plus one node per
//! retained fragment; in atom-wise mode every atom becomes a node and
//! edges come from a freshly computed neighbor list. Fragment nodes are
//! inserted in ascending fragment-index order so equal structures always
//! enumerate nodes identically. Graphs are rebuilt from scratch for every
//! trial structure, never mutated incrementally.

use ndarray::Array2;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::atoms::neighbors::neighbor_shell_list;
use crate::sites::{Site, SiteGeometry};

use super::resolver::AdsorbateCoverage;

/// Options controlling coverage graph construction
#[derive(Debug, Clone)]
pub struct CoverageGraphOptions {
    /// Build one node per atom instead of one node per fragment
    pub atom_wise: bool,

    /// Keep multidentate species split into fragments; without this a
    /// multidentate molecule contributes a single whole-adsorbate node
    pub fragmentation: bool,

    /// Include subsurface substrate atoms in the graph
    pub subsurf_effect: bool,

    /// Include every substrate atom in the graph
    pub full_effect: bool,

    /// Add edges between co-dentate fragments of the same molecule
    pub connect_dentates: bool,

    /// Neighbor-list buffer for atom-wise mode (in Å)
    pub dx: f64,
}

impl Default for CoverageGraphOptions {
    fn default() -> Self {
        Self {
            atom_wise: false,
            fragmentation: true,
            subsurf_effect: false,
            full_effect: false,
            connect_dentates: true,
            dx: 0.5,
        }
    }
}

/// The substrate atom subset selected by the graph options
fn substrate_subset(geometry: &SiteGeometry, options: &CoverageGraphOptions) -> Vec<usize> {
    if options.full_effect {
        geometry.substrate_indices()
    } else if options.subsurf_effect {
        let mut ids = geometry.surface_indices().to_vec();
        ids.extend_from_slice(geometry.subsurface_indices());
        ids
    } else {
        geometry.surface_indices().to_vec()
    }
}

/// Occupied sites retained as fragment nodes, in deterministic order
fn retained_sites<'a>(
    coverage: &'a AdsorbateCoverage,
    fragmentation: bool,
) -> Vec<&'a Site> {
    let mut occupied: Vec<&Site> = coverage
        .sites()
        .iter()
        .filter(|s| s.occupied)
        .collect();
    occupied.sort_by(|a, b| a.fragment_indices.cmp(&b.fragment_indices));
    if fragmentation {
        return occupied;
    }
    // Molecule-level: keep only the fragment anchored by the first atom
    // of each multidentate molecule.
    occupied
        .into_iter()
        .filter(|s| {
            if s.dentate <= 1 {
                return true;
            }
            match (&s.adsorbate_indices, s.bonding_index) {
                (Some(adsi), Some(bondid)) => adsi.first() == Some(&bondid),
                _ => true,
            }
        })
        .collect()
}

/// Pairs of retained fragments linked through the adsorbate bond graph
fn dentate_links(coverage: &AdsorbateCoverage, retained: &[&Site]) -> Vec<(usize, usize)> {
    let mut links = Vec::new();
    for i in 0..retained.len() {
        for j in (i + 1)..retained.len() {
            let (a, b) = (retained[i], retained[j]);
            if a.dentate <= 1 || b.dentate <= 1 {
                continue;
            }
            if a.adsorbate_indices != b.adsorbate_indices {
                continue;
            }
            if let (Some(ba), Some(bb)) = (a.bonding_index, b.bonding_index) {
                if coverage.inventory().are_bonded(ba, bb) {
                    links.push((i, j));
                }
            }
        }
    }
    links
}

/// Builds the coverage graph of a resolved snapshot
///
/// Node weights carry the element symbol (substrate and atom-wise nodes)
/// or the fragment/adsorbate name (fragment nodes); isomorphism checks
/// match on these tags.
pub fn build_graph(
    coverage: &AdsorbateCoverage,
    geometry: &SiteGeometry,
    options: &CoverageGraphOptions,
) -> UnGraph<String, ()> {
    let mut graph = UnGraph::<String, ()>::default();
    let structure = coverage.structure();
    let symbols = structure.symbols();

    if options.atom_wise {
        let mut ids = substrate_subset(geometry, options);
        ids.extend_from_slice(coverage.inventory().ids());
        ids.sort_unstable();
        ids.dedup();

        let nodes: Vec<NodeIndex> = ids
            .iter()
            .map(|&i| graph.add_node(symbols[i].to_string()))
            .collect();
        let nblist = neighbor_shell_list(structure, &ids, options.dx);
        for (p, row) in nblist.iter().enumerate() {
            for &q in row {
                if p < q {
                    graph.add_edge(nodes[p], nodes[q], ());
                }
            }
        }
        return graph;
    }

    let subset = substrate_subset(geometry, options);
    let nodes: Vec<NodeIndex> = subset
        .iter()
        .map(|&i| graph.add_node(symbols[i].to_string()))
        .collect();

    let adjacency = geometry.adjacency();
    for (p, &gp) in subset.iter().enumerate() {
        for (q, &gq) in subset.iter().enumerate().skip(p + 1) {
            if adjacency[(gp, gq)] == 1 {
                graph.add_edge(nodes[p], nodes[q], ());
            }
        }
    }

    let retained = retained_sites(coverage, options.fragmentation);
    let mut fragment_nodes = Vec::with_capacity(retained.len());
    for site in &retained {
        let tag = if options.fragmentation {
            site.fragment.clone()
        } else {
            site.adsorbate.clone()
        }
        .unwrap_or_default();
        let node = graph.add_node(tag);
        for idx in &site.indices {
            if let Some(p) = subset.iter().position(|g| g == idx) {
                graph.add_edge(node, nodes[p], ());
            }
        }
        fragment_nodes.push(node);
    }

    if options.fragmentation && options.connect_dentates {
        for (i, j) in dentate_links(coverage, &retained) {
            graph.add_edge(fragment_nodes[i], fragment_nodes[j], ());
        }
    }

    graph
}

/// Builds the adjacency matrix of the coverage graph
///
/// The numeric fingerprint alternative to [`build_graph`]: a square,
/// symmetric 0/1 matrix over the same node ordering.
pub fn build_adjacency_matrix(
    coverage: &AdsorbateCoverage,
    geometry: &SiteGeometry,
    options: &CoverageGraphOptions,
) -> Array2<u8> {
    let graph = build_graph(coverage, geometry, options);
    let n = graph.node_count();
    let mut matrix = Array2::zeros((n, n));
    for edge in graph.edge_indices() {
        if let Some((a, b)) = graph.edge_endpoints(edge) {
            matrix[(a.index(), b.index())] = 1;
            matrix[(b.index(), a.index())] = 1;
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::{Atom, AtomicStructure, Cell, Vector3D};
    use crate::coverage::resolver::CoverageConfig;
    use crate::sites::SiteKind;
    use ndarray::Array2;

    fn geometry_two_ontop() -> SiteGeometry {
        let sites = vec![
            Site::new(
                SiteKind::Ontop,
                "fcc111",
                vec![0],
                Vector3D::new(0.0, 0.0, 10.0),
                Vector3D::unit_z(),
            ),
            Site::new(
                SiteKind::Ontop,
                "fcc111",
                vec![1],
                Vector3D::new(2.8, 0.0, 10.0),
                Vector3D::unit_z(),
            ),
        ];
        let mut adjacency = Array2::zeros((2, 2));
        adjacency[(0, 1)] = 1;
        adjacency[(1, 0)] = 1;
        SiteGeometry::new(sites, vec![0, 1], vec![], adjacency, false, false).unwrap()
    }

    fn co_structure() -> AtomicStructure {
        let cell = Cell::orthorhombic(5.6, 5.6, 20.0, [true, true, false]).unwrap();
        let mut s = AtomicStructure::new(cell);
        s.add_atom(Atom::new("Pt", Vector3D::new(0.0, 0.0, 10.0)));
        s.add_atom(Atom::new("Pt", Vector3D::new(2.8, 0.0, 10.0)));
        s.add_atom(Atom::new("C", Vector3D::new(0.0, 0.0, 11.5)));
        s.add_atom(Atom::new("O", Vector3D::new(0.0, 0.0, 12.65)));
        s
    }

    #[test]
    fn test_molecule_wise_graph_shape() {
        let geometry = geometry_two_ontop();
        let coverage = AdsorbateCoverage::resolve(
            &co_structure(),
            &geometry,
            &CoverageConfig::default(),
        )
        .unwrap();
        let graph = build_graph(&coverage, &geometry, &CoverageGraphOptions::default());

        // Two substrate nodes, one CO fragment node
        assert_eq!(graph.node_count(), 3);
        // Substrate-substrate edge plus fragment-substrate contact
        assert_eq!(graph.edge_count(), 2);
        let tags: Vec<&String> = graph.node_weights().collect();
        assert!(tags.iter().any(|t| t.as_str() == "CO"));
    }

    #[test]
    fn test_adjacency_matrix_matches_graph() {
        let geometry = geometry_two_ontop();
        let coverage = AdsorbateCoverage::resolve(
            &co_structure(),
            &geometry,
            &CoverageConfig::default(),
        )
        .unwrap();
        let options = CoverageGraphOptions::default();
        let graph = build_graph(&coverage, &geometry, &options);
        let matrix = build_adjacency_matrix(&coverage, &geometry, &options);

        assert_eq!(matrix.nrows(), graph.node_count());
        let edge_sum: usize = matrix.iter().map(|&v| v as usize).sum();
        assert_eq!(edge_sum, 2 * graph.edge_count());
        // Symmetry
        for i in 0..matrix.nrows() {
            for j in 0..matrix.ncols() {
                assert_eq!(matrix[(i, j)], matrix[(j, i)]);
            }
        }
    }

    #[test]
    fn test_atom_wise_graph() {
        let geometry = geometry_two_ontop();
        let coverage = AdsorbateCoverage::resolve(
            &co_structure(),
            &geometry,
            &CoverageConfig::default(),
        )
        .unwrap();
        let options = CoverageGraphOptions {
            atom_wise: true,
            ..CoverageGraphOptions::default()
        };
        let graph = build_graph(&coverage, &geometry, &options);

        // All four atoms become nodes; the C-O bond is an edge
        assert_eq!(graph.node_count(), 4);
        let tags: Vec<&String> = graph.node_weights().collect();
        assert!(tags.iter().any(|t| t.as_str() == "C"));
        assert!(tags.iter().any(|t| t.as_str() == "O"));
    }

    #[test]
    fn test_node_order_is_deterministic() {
        let geometry = geometry_two_ontop();
        let coverage = AdsorbateCoverage::resolve(
            &co_structure(),
            &geometry,
            &CoverageConfig::default(),
        )
        .unwrap();
        let options = CoverageGraphOptions::default();
        let a: Vec<String> = build_graph(&coverage, &geometry, &options)
            .node_weights()
            .cloned()
            .collect();
        let b: Vec<String> = build_graph(&coverage, &geometry, &options)
            .node_weights()
            .cloned()
            .collect();
        assert_eq!(a, b);
    }
}
