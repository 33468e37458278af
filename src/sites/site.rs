/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Adsorption site records
//!
//! A `Site` carries the static geometry delivered by the site provider
//! (defining substrate atoms, position, normal, kind, surface context and
//! optional composition) together with the mutable occupancy fields filled
//! in by the occupancy resolver. All occupancy fields start out in the
//! unoccupied state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::SiteError;
use crate::atoms::Vector3D;

/// Geometric class of an adsorption site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SiteKind {
    #[serde(rename = "ontop")]
    Ontop,
    #[serde(rename = "bridge")]
    Bridge,
    #[serde(rename = "short-bridge")]
    ShortBridge,
    #[serde(rename = "long-bridge")]
    LongBridge,
    #[serde(rename = "fcc")]
    Fcc,
    #[serde(rename = "hcp")]
    Hcp,
    #[serde(rename = "3fold")]
    ThreeFold,
    #[serde(rename = "4fold")]
    FourFold,
    #[serde(rename = "5fold")]
    FiveFold,
    #[serde(rename = "6fold")]
    SixFold,
}

impl SiteKind {
    /// String form of the site kind
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteKind::Ontop => "ontop",
            SiteKind::Bridge => "bridge",
            SiteKind::ShortBridge => "short-bridge",
            SiteKind::LongBridge => "long-bridge",
            SiteKind::Fcc => "fcc",
            SiteKind::Hcp => "hcp",
            SiteKind::ThreeFold => "3fold",
            SiteKind::FourFold => "4fold",
            SiteKind::FiveFold => "5fold",
            SiteKind::SixFold => "6fold",
        }
    }

    /// Whether this kind sits beneath the surface layer
    pub fn is_subsurface(&self) -> bool {
        matches!(self, SiteKind::SixFold)
    }
}

impl fmt::Display for SiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SiteKind {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ontop" => Ok(SiteKind::Ontop),
            "bridge" => Ok(SiteKind::Bridge),
            "short-bridge" => Ok(SiteKind::ShortBridge),
            "long-bridge" => Ok(SiteKind::LongBridge),
            "fcc" => Ok(SiteKind::Fcc),
            "hcp" => Ok(SiteKind::Hcp),
            "3fold" => Ok(SiteKind::ThreeFold),
            "4fold" => Ok(SiteKind::FourFold),
            "5fold" => Ok(SiteKind::FiveFold),
            "6fold" => Ok(SiteKind::SixFold),
            other => Err(SiteError::UnknownSiteKind(other.to_string())),
        }
    }
}

/// An adsorption site with its occupancy state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    /// Sorted indices of the substrate atoms that define the site
    pub indices: Vec<usize>,
    /// Cartesian position of the site
    pub position: Vector3D,
    /// Surface normal at the site
    pub normal: Vector3D,
    /// Geometric class of the site
    pub kind: SiteKind,
    /// Surface context (facet or morphology label)
    pub surface: String,
    /// Elemental composition of the defining atoms, if tracked
    #[serde(default)]
    pub composition: Option<String>,

    /// Whether an adsorbate currently occupies the site
    #[serde(default)]
    pub occupied: bool,
    /// Index of the adsorbate atom bound to the site
    #[serde(default)]
    pub bonding_index: Option<usize>,
    /// Distance between the bonding atom and the site
    #[serde(default)]
    pub bond_length: Option<f64>,
    /// Name of the occupying adsorbate
    #[serde(default)]
    pub adsorbate: Option<String>,
    /// Name of the occupying fragment
    #[serde(default)]
    pub fragment: Option<String>,
    /// Sorted indices of all atoms of the occupying adsorbate molecule
    #[serde(default)]
    pub adsorbate_indices: Option<Vec<usize>>,
    /// Indices of the fragment atoms attributed to this site
    #[serde(default)]
    pub fragment_indices: Option<Vec<usize>>,
    /// Number of sites simultaneously anchoring the occupying adsorbate
    #[serde(default)]
    pub dentate: u32,
    /// Combined site/adsorbate label, when labeling is enabled
    #[serde(default)]
    pub label: Option<String>,
}

impl Site {
    /// Create a new unoccupied site
    ///
    /// The defining indices are sorted ascending; they are the unique key
    /// of a site within a site list.
    pub fn new(
        kind: SiteKind,
        surface: &str,
        mut indices: Vec<usize>,
        position: Vector3D,
        normal: Vector3D,
    ) -> Self {
        indices.sort_unstable();
        Self {
            indices,
            position,
            normal,
            kind,
            surface: surface.to_string(),
            composition: None,
            occupied: false,
            bonding_index: None,
            bond_length: None,
            adsorbate: None,
            fragment: None,
            adsorbate_indices: None,
            fragment_indices: None,
            dentate: 0,
            label: None,
        }
    }

    /// Attach an elemental composition to the site
    pub fn with_composition(mut self, composition: &str) -> Self {
        self.composition = Some(composition.to_string());
        self
    }

    /// Reset all occupancy fields to the unoccupied defaults
    pub fn reset_occupancy(&mut self) {
        self.occupied = false;
        self.bonding_index = None;
        self.bond_length = None;
        self.adsorbate = None;
        self.fragment = None;
        self.adsorbate_indices = None;
        self.fragment_indices = None;
        self.dentate = 0;
        self.label = None;
    }

    /// Whether the site sits beneath the surface layer
    pub fn is_subsurface(&self) -> bool {
        self.kind.is_subsurface()
    }

    /// Label signature of the site
    ///
    /// The composition participates only when the provider tracks
    /// composition effects.
    pub fn signature(&self, composition_effect: bool) -> String {
        match (&self.composition, composition_effect) {
            (Some(composition), true) => {
                format!("{}|{}|{}", self.kind, self.surface, composition)
            }
            _ => format!("{}|{}", self.kind, self.surface),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_kind_roundtrip() {
        for kind in [
            SiteKind::Ontop,
            SiteKind::Bridge,
            SiteKind::ShortBridge,
            SiteKind::Fcc,
            SiteKind::SixFold,
        ] {
            assert_eq!(kind.as_str().parse::<SiteKind>().unwrap(), kind);
        }
        assert!("7fold".parse::<SiteKind>().is_err());
    }

    #[test]
    fn test_indices_sorted_on_construction() {
        let site = Site::new(
            SiteKind::Fcc,
            "fcc111",
            vec![4, 0, 2],
            Vector3D::origin(),
            Vector3D::unit_z(),
        );
        assert_eq!(site.indices, vec![0, 2, 4]);
        assert!(!site.occupied);
        assert_eq!(site.dentate, 0);
    }

    #[test]
    fn test_signature_with_composition() {
        let site = Site::new(
            SiteKind::Fcc,
            "fcc111",
            vec![0, 1, 2],
            Vector3D::origin(),
            Vector3D::unit_z(),
        )
        .with_composition("PtPtNi");
        assert_eq!(site.signature(false), "fcc|fcc111");
        assert_eq!(site.signature(true), "fcc|fcc111|PtPtNi");
    }

    #[test]
    fn test_reset_occupancy() {
        let mut site = Site::new(
            SiteKind::Ontop,
            "edge",
            vec![0],
            Vector3D::origin(),
            Vector3D::unit_z(),
        );
        site.occupied = true;
        site.bonding_index = Some(12);
        site.bond_length = Some(1.8);
        site.dentate = 2;
        site.reset_occupancy();
        assert!(!site.occupied);
        assert_eq!(site.bonding_index, None);
        assert_eq!(site.dentate, 0);
    }
}
