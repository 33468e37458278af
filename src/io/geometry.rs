/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Site geometry JSON files
//!
//! The external site provider hands over its site list as a JSON document;
//! this module maps that document onto a `SiteGeometry`.

use std::fs;
use std::path::Path;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::sites::{Site, SiteGeometry};

use super::errors::{IoError, Result};

/// On-disk form of a site geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteGeometryFile {
    /// Ordered site list
    pub sites: Vec<Site>,
    /// Surface-exposed substrate atom indices
    pub surface_indices: Vec<usize>,
    /// Subsurface substrate atom indices
    #[serde(default)]
    pub subsurface_indices: Vec<usize>,
    /// Substrate adjacency matrix, row by row
    pub adjacency: Vec<Vec<u8>>,
    /// Whether 6-fold subsurface adsorption is allowed
    #[serde(default)]
    pub allow_6fold: bool,
    /// Whether composition participates in label signatures
    #[serde(default)]
    pub composition_effect: bool,
}

impl SiteGeometryFile {
    /// Converts the file form into a validated `SiteGeometry`
    pub fn into_geometry(self) -> Result<SiteGeometry> {
        let n = self.adjacency.len();
        let mut adjacency = Array2::zeros((n, n));
        for (i, row) in self.adjacency.iter().enumerate() {
            if row.len() != n {
                return Err(IoError::ParseError(format!(
                    "adjacency row {} has length {}, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            for (j, &value) in row.iter().enumerate() {
                adjacency[(i, j)] = value;
            }
        }
        Ok(SiteGeometry::new(
            self.sites,
            self.surface_indices,
            self.subsurface_indices,
            adjacency,
            self.allow_6fold,
            self.composition_effect,
        )?)
    }
}

/// Loads a site geometry from a JSON file
pub fn load_site_geometry<P: AsRef<Path>>(path: P) -> Result<SiteGeometry> {
    let text = fs::read_to_string(path)?;
    let file: SiteGeometryFile = serde_json::from_str(&text)?;
    file.into_geometry()
}
