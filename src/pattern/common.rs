/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Shared machinery of the pattern generators
//!
//! Both the stochastic and the systematic generator run the same trial
//! state machine: resolve occupancy, build the two-shell exclusion zone
//! around occupied sites, filter candidate sites per species, place or
//! remove an adsorbate, then re-resolve and validate. This module holds
//! the pieces common to both.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::atoms::{AtomicStructure, Vector3D};
use crate::coverage::{AdsorbateCoverage, CoverageConfig};
use crate::sites::{Site, SiteGeometry, SiteKind};
use crate::species::registry::{is_known_species, is_monodentate, is_multidentate};
use crate::species::{formula_atom_count, has_template};

use super::errors::{PatternError, Result};

/// Mutation actions supported by the generators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "add")]
    Add,
    #[serde(rename = "remove")]
    Remove,
    #[serde(rename = "move")]
    Move,
    #[serde(rename = "replace")]
    Replace,
}

impl Action {
    /// String form of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Remove => "remove",
            Action::Move => "move",
            Action::Replace => "replace",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "add" => Ok(Action::Add),
            "remove" => Ok(Action::Remove),
            "move" => Ok(Action::Move),
            "replace" => Ok(Action::Replace),
            other => Err(PatternError::UnknownAction(other.to_string())),
        }
    }
}

/// Constructor-time configuration shared by both generators
#[derive(Debug, Clone)]
pub struct PatternGeneratorConfig {
    /// Adsorbate species available to the generator
    pub adsorbate_species: Vec<String>,

    /// Per-species placement probability weights; uniform when `None`.
    /// Keys must cover the species list exactly.
    pub species_probabilities: Option<HashMap<String, f64>>,

    /// Per-image selection weights; uniform when `None`
    pub image_probabilities: Option<Vec<f64>>,

    /// Minimum distance between atoms of different adsorbates (in Å)
    pub min_adsorbate_distance: f64,

    /// Per-site-kind placement heights overlaid on the defaults
    pub heights: Option<HashMap<SiteKind, f64>>,

    /// Maximum site-to-atom bonding distance for occupancy resolution
    pub dmax: f64,

    /// Site kinds each species must not occupy
    pub species_forbidden_sites: Option<HashMap<String, Vec<SiteKind>>>,

    /// Numeric site labels each species must not occupy; takes precedence
    /// over `species_forbidden_sites`
    pub species_forbidden_labels: Option<HashMap<String, Vec<u32>>>,

    /// Whether multidentate species are cut into fragments for labels and
    /// graphs
    pub fragmentation: bool,

    /// Path of the output structure archive
    pub trajectory: PathBuf,

    /// Whether to append to an existing archive instead of overwriting
    pub append_trajectory: bool,

    /// Path of the human-readable trial log
    pub logfile: Option<PathBuf>,

    /// RNG seed; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for PatternGeneratorConfig {
    fn default() -> Self {
        Self {
            adsorbate_species: Vec::new(),
            species_probabilities: None,
            image_probabilities: None,
            min_adsorbate_distance: 1.5,
            heights: None,
            dmax: 2.5,
            species_forbidden_sites: None,
            species_forbidden_labels: None,
            fragmentation: true,
            trajectory: PathBuf::from("patterns.traj"),
            append_trajectory: false,
            logfile: Some(PathBuf::from("patterns.log")),
            seed: None,
        }
    }
}

/// Species partition and config validation shared by both generators
///
/// Returns the (monodentate, multidentate) partition of the requested
/// species. Any species missing from the registries or without a
/// placement template, and any malformed weight map, is a hard
/// configuration error.
pub fn validate_config(
    images: &[AtomicStructure],
    config: &PatternGeneratorConfig,
) -> Result<(Vec<String>, Vec<String>)> {
    if images.is_empty() {
        return Err(PatternError::NoImages);
    }

    let unknown: Vec<String> = config
        .adsorbate_species
        .iter()
        .filter(|s| !is_known_species(s))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(PatternError::UnknownSpecies(unknown));
    }
    let untemplated: Vec<String> = config
        .adsorbate_species
        .iter()
        .filter(|s| !has_template(s))
        .cloned()
        .collect();
    if !untemplated.is_empty() {
        return Err(PatternError::UnknownSpecies(untemplated));
    }

    if let Some(weights) = &config.species_probabilities {
        let keys: HashSet<&str> = weights.keys().map(|k| k.as_str()).collect();
        let species: HashSet<&str> = config
            .adsorbate_species
            .iter()
            .map(|s| s.as_str())
            .collect();
        if keys != species {
            return Err(PatternError::SpeciesWeightMismatch);
        }
    }
    if let Some(weights) = &config.image_probabilities {
        if weights.len() != images.len() {
            return Err(PatternError::ImageWeightMismatch {
                images: images.len(),
                weights: weights.len(),
            });
        }
    }

    let monodentate: Vec<String> = config
        .adsorbate_species
        .iter()
        .filter(|s| is_monodentate(s))
        .cloned()
        .collect();
    let multidentate: Vec<String> = config
        .adsorbate_species
        .iter()
        .filter(|s| is_multidentate(s))
        .cloned()
        .collect();
    Ok((monodentate, multidentate))
}

/// Resolves occupancy for a trial structure
pub fn resolve_coverage(
    structure: &AtomicStructure,
    geometry: &SiteGeometry,
    dmax: f64,
    label_occupied_sites: bool,
) -> Result<AdsorbateCoverage> {
    let config = CoverageConfig {
        dmax,
        subtract_heights: None,
        label_occupied_sites,
    };
    Ok(AdsorbateCoverage::resolve(structure, geometry, &config)?)
}

/// The two-shell exclusion zone around the occupied sites of a snapshot
pub struct ExclusionZone {
    /// Site indices excluded for new placements (occupied sites plus two
    /// adjacency shells around each)
    pub excluded: HashSet<usize>,
    /// Indices of the occupied sites themselves
    pub occupied: Vec<usize>,
    /// Excluded sites that are not themselves occupied; a trial that newly
    /// occupies one of these is rejected
    pub neighborhood: Vec<usize>,
}

impl ExclusionZone {
    /// Builds the exclusion zone from a resolved snapshot
    pub fn new(sites: &[Site], site_nblist: &[Vec<usize>]) -> Self {
        let mut excluded = HashSet::new();
        let mut occupied = Vec::new();
        for (j, site) in sites.iter().enumerate() {
            if site.occupied {
                excluded.extend(site_nblist[j].iter().copied());
                occupied.push(j);
            }
        }
        let neighborhood = excluded
            .iter()
            .copied()
            .filter(|i| !occupied.contains(i))
            .collect();
        Self {
            excluded,
            occupied,
            neighborhood,
        }
    }

    /// An empty zone (clean starting structure)
    pub fn empty() -> Self {
        Self {
            excluded: HashSet::new(),
            occupied: Vec::new(),
            neighborhood: Vec::new(),
        }
    }
}

/// Whether a species may occupy a site under the forbidden maps
///
/// Forbidden labels take precedence over forbidden site kinds, mirroring
/// the configuration contract.
pub fn site_allowed_for_species(
    geometry: &SiteGeometry,
    site: &Site,
    species: &str,
    config: &PatternGeneratorConfig,
) -> bool {
    if let Some(forbidden) = &config.species_forbidden_labels {
        if let Some(labels) = forbidden.get(species) {
            if let Some(label) = geometry.site_label(site) {
                return !labels.contains(&label);
            }
        }
        return true;
    }
    if let Some(forbidden) = &config.species_forbidden_sites {
        if let Some(kinds) = forbidden.get(species) {
            return !kinds.contains(&site.kind);
        }
    }
    true
}

/// 6-fold subsurface gating: such sites take only single-atom species, and
/// only when the geometry allows subsurface adsorption at all
pub fn six_fold_allowed(site: &Site, species: &str, allow_6fold: bool) -> Result<bool> {
    if !site.kind.is_subsurface() {
        return Ok(true);
    }
    if !allow_6fold {
        return Ok(false);
    }
    Ok(formula_atom_count(species)? == 1)
}

/// Minimum-image direction from one site to another, used to orient
/// multidentate placements
pub fn orientation_vector(
    structure: &AtomicStructure,
    from: &Site,
    to: &Site,
) -> Vector3D {
    structure.cell().mic_vector(&from.position, &to.position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::{Atom, Cell};

    fn one_image() -> Vec<AtomicStructure> {
        let cell = Cell::orthorhombic(5.6, 5.6, 20.0, [true, true, false]).unwrap();
        let mut s = AtomicStructure::new(cell);
        s.add_atom(Atom::new("Pt", Vector3D::new(0.0, 0.0, 10.0)));
        vec![s]
    }

    #[test]
    fn test_unknown_species_is_hard_error() {
        let config = PatternGeneratorConfig {
            adsorbate_species: vec!["CO".to_string(), "XYZ".to_string()],
            ..PatternGeneratorConfig::default()
        };
        let err = validate_config(&one_image(), &config).unwrap_err();
        assert!(matches!(err, PatternError::UnknownSpecies(_)));
    }

    #[test]
    fn test_weight_key_mismatch_is_hard_error() {
        let config = PatternGeneratorConfig {
            adsorbate_species: vec!["CO".to_string(), "OH".to_string()],
            species_probabilities: Some(HashMap::from([("CO".to_string(), 1.0)])),
            ..PatternGeneratorConfig::default()
        };
        let err = validate_config(&one_image(), &config).unwrap_err();
        assert!(matches!(err, PatternError::SpeciesWeightMismatch));
    }

    #[test]
    fn test_species_partition() {
        let config = PatternGeneratorConfig {
            adsorbate_species: vec!["CO".to_string(), "CH3OH".to_string()],
            ..PatternGeneratorConfig::default()
        };
        let (mono, multi) = validate_config(&one_image(), &config).unwrap();
        assert_eq!(mono, vec!["CO".to_string()]);
        assert_eq!(multi, vec!["CH3OH".to_string()]);
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!("add".parse::<Action>().unwrap(), Action::Add);
        assert_eq!("replace".parse::<Action>().unwrap(), Action::Replace);
        assert!("destroy".parse::<Action>().is_err());
    }
}
