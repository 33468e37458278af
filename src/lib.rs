/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! # acat-rs
//!
//! A Rust implementation of adsorbate coverage analysis and pattern
//! generation for catalytic surfaces.
//!
//! Given an atomic structure partitioned into a rigid substrate and mobile
//! adsorbates, the crate resolves which adsorption sites are occupied (and
//! by which adsorbate fragment, with what dentate multiplicity), builds a
//! canonical labeled graph of the coverage for isomorphism testing, and
//! drives stochastic or systematic search over add/remove/move/replace
//! mutations of the coverage pattern, rejecting geometrically invalid or
//! duplicate configurations.
//!
//! Site geometry enumeration is out of scope: sites, surface index sets
//! and the substrate adjacency are consumed from an external provider via
//! [`sites::SiteGeometry`].

pub mod atoms;
pub mod cli;
pub mod coverage;
pub mod io;
pub mod pattern;
pub mod sites;
pub mod species;
pub mod utils;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

pub use atoms::{Atom, AtomicStructure, Cell, Vector3D};
pub use coverage::{AdsorbateCoverage, CoverageConfig, CoverageGraphOptions};
pub use pattern::{StochasticPatternGenerator, SystematicPatternGenerator};
pub use sites::{Site, SiteGeometry, SiteKind};
