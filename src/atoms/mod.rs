/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Atomic structure module
//!
//! This module provides the structure model consumed by the coverage
//! engine: atoms, periodic cells with minimum-image arithmetic, the element
//! database and short-range neighbor lists.

pub mod atom;
pub mod cell;
pub mod database;
pub mod errors;
pub mod neighbors;
pub mod structure;
pub mod vector;

pub use atom::Atom;
pub use cell::Cell;
pub use errors::{Result, StructureError};
pub use structure::AtomicStructure;
pub use vector::Vector3D;
