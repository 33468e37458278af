/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Tests for coverage graph construction and isomorphism testing

use ndarray::Array2;
use petgraph::algo::is_isomorphic_matching;

use acat_rs::atoms::{Atom, AtomicStructure, Cell, Vector3D};
use acat_rs::coverage::{
    build_adjacency_matrix, build_graph, AdsorbateCoverage, CoverageConfig, CoverageGraphOptions,
};
use acat_rs::sites::{Site, SiteGeometry, SiteKind};

fn square_slab_geometry() -> SiteGeometry {
    let z = Vector3D::unit_z();
    let sites = vec![
        Site::new(SiteKind::Ontop, "fcc100", vec![0], Vector3D::new(0.0, 0.0, 10.0), z),
        Site::new(SiteKind::Ontop, "fcc100", vec![1], Vector3D::new(2.8, 0.0, 10.0), z),
        Site::new(SiteKind::Ontop, "fcc100", vec![2], Vector3D::new(0.0, 2.8, 10.0), z),
        Site::new(SiteKind::Ontop, "fcc100", vec![3], Vector3D::new(2.8, 2.8, 10.0), z),
        Site::new(SiteKind::Bridge, "fcc100", vec![0, 1], Vector3D::new(1.4, 0.0, 10.0), z),
        Site::new(SiteKind::Bridge, "fcc100", vec![0, 2], Vector3D::new(0.0, 1.4, 10.0), z),
        Site::new(SiteKind::Bridge, "fcc100", vec![1, 3], Vector3D::new(2.8, 1.4, 10.0), z),
        Site::new(SiteKind::Bridge, "fcc100", vec![2, 3], Vector3D::new(1.4, 2.8, 10.0), z),
        Site::new(SiteKind::FourFold, "fcc100", vec![0, 1, 2, 3], Vector3D::new(1.4, 1.4, 10.0), z),
    ];
    let mut adjacency = Array2::zeros((4, 4));
    for (i, j) in [(0, 1), (0, 2), (1, 3), (2, 3)] {
        adjacency[(i, j)] = 1;
        adjacency[(j, i)] = 1;
    }
    SiteGeometry::new(sites, vec![0, 1, 2, 3], vec![], adjacency, false, false).unwrap()
}

fn square_slab() -> AtomicStructure {
    let cell = Cell::orthorhombic(5.6, 5.6, 20.0, [true, true, false]).unwrap();
    let mut s = AtomicStructure::new(cell);
    s.add_atom(Atom::new("Pt", Vector3D::new(0.0, 0.0, 10.0)));
    s.add_atom(Atom::new("Pt", Vector3D::new(2.8, 0.0, 10.0)));
    s.add_atom(Atom::new("Pt", Vector3D::new(0.0, 2.8, 10.0)));
    s.add_atom(Atom::new("Pt", Vector3D::new(2.8, 2.8, 10.0)));
    s
}

fn slab_with_bidentate_methanol() -> AtomicStructure {
    let mut s = square_slab();
    s.add_atom(Atom::new("C", Vector3D::new(1.3, 0.4, 11.2)));
    s.add_atom(Atom::new("H", Vector3D::new(0.8, 0.0, 11.7)));
    s.add_atom(Atom::new("H", Vector3D::new(1.9, 0.9, 11.5)));
    s.add_atom(Atom::new("H", Vector3D::new(1.7, 0.0, 12.0)));
    s.add_atom(Atom::new("O", Vector3D::new(0.4, 1.3, 11.2)));
    s.add_atom(Atom::new("H", Vector3D::new(0.0, 1.9, 12.0)));
    s
}

fn resolve(structure: &AtomicStructure, geometry: &SiteGeometry) -> AdsorbateCoverage {
    AdsorbateCoverage::resolve(structure, geometry, &CoverageConfig::default()).unwrap()
}

#[test]
fn test_fragment_graph_of_bidentate_methanol() {
    let geometry = square_slab_geometry();
    let coverage = resolve(&slab_with_bidentate_methanol(), &geometry);
    let graph = build_graph(&coverage, &geometry, &CoverageGraphOptions::default());

    // Four substrate nodes plus CH3 and OH fragment nodes
    assert_eq!(graph.node_count(), 6);
    // Substrate ring (4 edges) + two contacts per bridge fragment (4)
    // + one co-dentate link between CH3 and OH
    assert_eq!(graph.edge_count(), 9);

    let tags: Vec<&str> = graph.node_weights().map(|t| t.as_str()).collect();
    assert!(tags.contains(&"CH3"));
    assert!(tags.contains(&"OH"));
}

#[test]
fn test_molecule_level_graph_collapses_fragments() {
    let geometry = square_slab_geometry();
    let coverage = resolve(&slab_with_bidentate_methanol(), &geometry);
    let options = CoverageGraphOptions {
        fragmentation: false,
        ..CoverageGraphOptions::default()
    };
    let graph = build_graph(&coverage, &geometry, &options);

    // One whole-adsorbate node instead of two fragments
    assert_eq!(graph.node_count(), 5);
    let tags: Vec<&str> = graph.node_weights().map(|t| t.as_str()).collect();
    assert!(tags.contains(&"CH3OH"));
    assert!(!tags.contains(&"CH3"));
    // Substrate ring + the two contacts of the retained fragment's site
    assert_eq!(graph.edge_count(), 6);
}

#[test]
fn test_connect_dentates_toggle() {
    let geometry = square_slab_geometry();
    let coverage = resolve(&slab_with_bidentate_methanol(), &geometry);
    let connected = build_graph(&coverage, &geometry, &CoverageGraphOptions::default());
    let disconnected = build_graph(
        &coverage,
        &geometry,
        &CoverageGraphOptions {
            connect_dentates: false,
            ..CoverageGraphOptions::default()
        },
    );
    assert_eq!(connected.edge_count(), disconnected.edge_count() + 1);
}

#[test]
fn test_equivalent_patterns_are_isomorphic() {
    // One O on ontop site 0 versus one O on ontop site 3: different site
    // indices, same pattern up to relabeling
    let geometry = square_slab_geometry();
    let mut a = square_slab();
    a.add_atom(Atom::new("O", Vector3D::new(0.0, 0.0, 11.7)));
    let mut b = square_slab();
    b.add_atom(Atom::new("O", Vector3D::new(2.8, 2.8, 11.7)));

    let options = CoverageGraphOptions::default();
    let ga = build_graph(&resolve(&a, &geometry), &geometry, &options);
    let gb = build_graph(&resolve(&b, &geometry), &geometry, &options);

    assert!(is_isomorphic_matching(
        &ga,
        &gb,
        |x: &String, y: &String| x == y,
        |_: &(), _: &()| true
    ));
}

#[test]
fn test_different_sites_are_not_isomorphic() {
    // O on an ontop site versus O on the 4-fold hollow: structurally
    // different coverages
    let geometry = square_slab_geometry();
    let mut a = square_slab();
    a.add_atom(Atom::new("O", Vector3D::new(0.0, 0.0, 11.7)));
    let mut b = square_slab();
    b.add_atom(Atom::new("O", Vector3D::new(1.4, 1.4, 11.2)));

    let options = CoverageGraphOptions::default();
    let ga = build_graph(&resolve(&a, &geometry), &geometry, &options);
    let gb = build_graph(&resolve(&b, &geometry), &geometry, &options);

    assert!(!is_isomorphic_matching(
        &ga,
        &gb,
        |x: &String, y: &String| x == y,
        |_: &(), _: &()| true
    ));
}

#[test]
fn test_adjacency_matrix_fingerprint() {
    let geometry = square_slab_geometry();
    let coverage = resolve(&slab_with_bidentate_methanol(), &geometry);
    let options = CoverageGraphOptions::default();
    let graph = build_graph(&coverage, &geometry, &options);
    let matrix = build_adjacency_matrix(&coverage, &geometry, &options);

    assert_eq!(matrix.nrows(), graph.node_count());
    assert_eq!(matrix.ncols(), graph.node_count());
    let ones: usize = matrix.iter().map(|&v| v as usize).sum();
    assert_eq!(ones, 2 * graph.edge_count());
}

#[test]
fn test_atom_wise_graph_contains_every_atom() {
    let geometry = square_slab_geometry();
    let structure = slab_with_bidentate_methanol();
    let coverage = resolve(&structure, &geometry);
    let options = CoverageGraphOptions {
        atom_wise: true,
        ..CoverageGraphOptions::default()
    };
    let graph = build_graph(&coverage, &geometry, &options);

    assert_eq!(graph.node_count(), structure.atom_count());
    let h_nodes = graph
        .node_weights()
        .filter(|t| t.as_str() == "H")
        .count();
    assert_eq!(h_nodes, 4);
}

#[test]
fn test_empty_coverage_graph_is_substrate_only() {
    let geometry = square_slab_geometry();
    let coverage = resolve(&square_slab(), &geometry);
    let graph = build_graph(&coverage, &geometry, &CoverageGraphOptions::default());
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 4);
}
