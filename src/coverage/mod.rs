/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Adsorbate coverage module
//!
//! The occupancy-resolution engine: adsorbate molecule identification,
//! site-adsorbate matching with dentate bookkeeping, and the coverage
//! graph used for isomorphism testing.

pub mod errors;
pub mod graph;
pub mod molecules;
pub mod resolver;

pub use errors::{CoverageError, Result};
pub use graph::{build_adjacency_matrix, build_graph, CoverageGraphOptions};
pub use molecules::AdsorbateInventory;
pub use resolver::{enumerate_occupied_sites, AdsorbateCoverage, CoverageConfig};
