/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Benchmarks for occupancy resolution and graph construction

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array2;

use acat_rs::atoms::{Atom, AtomicStructure, Cell, Vector3D};
use acat_rs::coverage::{build_graph, AdsorbateCoverage, CoverageConfig, CoverageGraphOptions};
use acat_rs::sites::{Site, SiteGeometry, SiteKind};

/// An n x n ontop-site slab patch with an O adatom on every fourth site
fn benchmark_system(n: usize) -> (AtomicStructure, SiteGeometry) {
    let a = 2.8;
    let cell = Cell::orthorhombic(a * n as f64, a * n as f64, 20.0, [true, true, false]).unwrap();
    let mut structure = AtomicStructure::new(cell);
    let mut sites = Vec::new();
    let mut adjacency = Array2::zeros((n * n, n * n));

    for i in 0..n {
        for j in 0..n {
            let index = i * n + j;
            let x = a * i as f64;
            let y = a * j as f64;
            structure.add_atom(Atom::new("Pt", Vector3D::new(x, y, 10.0)));
            sites.push(Site::new(
                SiteKind::Ontop,
                "fcc100",
                vec![index],
                Vector3D::new(x, y, 10.0),
                Vector3D::unit_z(),
            ));
            let right = i * n + (j + 1) % n;
            let down = ((i + 1) % n) * n + j;
            adjacency[(index, right)] = 1;
            adjacency[(right, index)] = 1;
            adjacency[(index, down)] = 1;
            adjacency[(down, index)] = 1;
        }
    }
    for i in 0..n {
        for j in 0..n {
            if (i + j) % 4 == 0 {
                structure.add_atom(Atom::new(
                    "O",
                    Vector3D::new(a * i as f64, a * j as f64, 11.7),
                ));
            }
        }
    }

    let surface: Vec<usize> = (0..n * n).collect();
    let geometry =
        SiteGeometry::new(sites, surface, vec![], adjacency, false, false).unwrap();
    (structure, geometry)
}

fn bench_resolution(c: &mut Criterion) {
    let (structure, geometry) = benchmark_system(8);
    let config = CoverageConfig {
        label_occupied_sites: true,
        ..CoverageConfig::default()
    };
    c.bench_function("resolve_8x8_quarter_coverage", |b| {
        b.iter(|| {
            let coverage =
                AdsorbateCoverage::resolve(black_box(&structure), &geometry, &config).unwrap();
            black_box(coverage.n_occupied())
        })
    });
}

fn bench_graph_build(c: &mut Criterion) {
    let (structure, geometry) = benchmark_system(8);
    let config = CoverageConfig::default();
    let coverage = AdsorbateCoverage::resolve(&structure, &geometry, &config).unwrap();
    let options = CoverageGraphOptions::default();
    c.bench_function("graph_8x8_quarter_coverage", |b| {
        b.iter(|| {
            let graph = build_graph(black_box(&coverage), &geometry, &options);
            black_box(graph.node_count())
        })
    });
}

criterion_group!(benches, bench_resolution, bench_graph_build);
criterion_main!(benches);
