/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Input/output module
//!
//! The structure archive written by the pattern generators and the JSON
//! interchange format for site geometries.

pub mod errors;
pub mod geometry;
pub mod trajectory;

pub use errors::{IoError, Result};
pub use geometry::{load_site_geometry, SiteGeometryFile};
pub use trajectory::{frame_count, read_trajectory, FrameMeta, TrajectoryWriter};
