/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Occupancy resolution
//!
//! `AdsorbateCoverage` answers, for a structure and a site geometry, which
//! sites are occupied, by which adsorbate or fragment, and with what
//! dentate multiplicity. Resolution is a two-pass process: a matching pass
//! assigns each binding atom to its nearest site under the nearest-wins
//! displacement policy, and a finalization pass resets untouched sites,
//! reads back dentate counts per molecule and derives coverage figures.
//! The returned snapshot is never mutated afterwards; a new trial
//! structure gets a new resolution.

use std::collections::HashMap;

use crate::atoms::{AtomicStructure, Vector3D};
use crate::sites::{Site, SiteGeometry, SiteKind};
use crate::species::formula::hill_formula;
use crate::species::registry::{resolve_adsorbate_name, site_heights};

use super::errors::Result;
use super::molecules::AdsorbateInventory;

/// Number of decimal digits kept on bond lengths
///
/// Fixed rounding makes re-resolution bit-for-bit reproducible, which the
/// duplicate detection relies on.
const BOND_LENGTH_DECIMALS: i32 = 8;

fn round_bond_length(value: f64) -> f64 {
    let factor = 10f64.powi(BOND_LENGTH_DECIMALS);
    (value * factor).round() / factor
}

/// Configuration for occupancy resolution
#[derive(Debug, Clone)]
pub struct CoverageConfig {
    /// Maximum bond length between an atom and its nearest site (in Å)
    pub dmax: f64,

    /// Per-site-kind heights subtracted along the normal when locating the
    /// nearest site; entries overlay the default height table. `None`
    /// matches against raw site positions.
    pub subtract_heights: Option<HashMap<SiteKind, f64>>,

    /// Whether to assign a combined site/adsorbate label to occupied sites
    pub label_occupied_sites: bool,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            dmax: 2.5,
            subtract_heights: None,
            label_occupied_sites: false,
        }
    }
}

/// Resolved adsorbate coverage of a structure
#[derive(Debug, Clone)]
pub struct AdsorbateCoverage {
    structure: AtomicStructure,
    inventory: AdsorbateInventory,
    sites: Vec<Site>,
    labeling: bool,
    label_list: Vec<String>,
    n_occupied: usize,
    coverage: f64,
    subsurf_coverage: f64,
    monodentate_adsorbates: Vec<String>,
    multidentate_adsorbates: Vec<String>,
    multidentate_fragments: Vec<String>,
    multidentate_labels: Vec<String>,
}

impl AdsorbateCoverage {
    /// Resolves the adsorbate coverage of a structure against a site geometry
    ///
    /// # Arguments
    ///
    /// * `structure` - The structure to analyze (substrate + adsorbates)
    /// * `geometry` - Site geometry from the external provider
    /// * `config` - Resolution parameters
    ///
    /// # Returns
    ///
    /// The resolved coverage snapshot. A structure without adsorbate atoms
    /// yields an all-unoccupied snapshot with zero coverage; no distance
    /// matching is attempted in that case.
    pub fn resolve(
        structure: &AtomicStructure,
        geometry: &SiteGeometry,
        config: &CoverageConfig,
    ) -> Result<Self> {
        let inventory = AdsorbateInventory::identify(structure);
        let mut sites = geometry.snapshot();
        let label_list = vec!["0".to_string(); sites.len()];

        let mut resolved = Self {
            structure: structure.clone(),
            inventory,
            sites: Vec::new(),
            labeling: config.label_occupied_sites,
            label_list,
            n_occupied: 0,
            coverage: 0.0,
            subsurf_coverage: 0.0,
            monodentate_adsorbates: Vec::new(),
            multidentate_adsorbates: Vec::new(),
            multidentate_fragments: Vec::new(),
            multidentate_labels: Vec::new(),
        };

        if !resolved.inventory.is_empty() {
            resolved.assign_sites(&mut sites, config);
        }
        resolved.finalize(&mut sites, geometry);
        resolved.classify_fragments(&mut sites, geometry);
        resolved.sites = sites;
        Ok(resolved)
    }

    /// Matching pass: assign every binding atom to its nearest site
    fn assign_sites(&mut self, sites: &mut [Site], config: &CoverageConfig) {
        let structure = &self.structure;
        let cell = structure.cell();
        let symbols = structure.symbols();
        let subtract = config
            .subtract_heights
            .as_ref()
            .map(|overrides| site_heights(Some(overrides)));

        for &adsid in self.inventory.ids() {
            // Hydrogens bound inside a molecule are represented by their
            // heavy binding atom; only H and H2 bind through hydrogen.
            if symbols[adsid] == "H" {
                let molecule = self
                    .inventory
                    .molecule_of(adsid)
                    .expect("adsorbate atom belongs to a molecule");
                if molecule.len() > 1 {
                    let rest: Vec<usize> =
                        molecule.iter().copied().filter(|&i| i != adsid).collect();
                    let diatomic_hydrogen = rest.len() == 1 && symbols[rest[0]] == "H";
                    if !diatomic_hydrogen {
                        continue;
                    }
                }
            }

            let adspos = *structure.atom(adsid).expect("index valid").position();

            // Nearest site by anchor distance; ties resolve to the first
            // site in the fixed iteration order.
            let mut nearest: Option<(usize, f64)> = None;
            for (i, site) in sites.iter().enumerate() {
                let anchor = anchor_point(site, subtract.as_ref());
                let d = cell.mic_distance(&anchor, &adspos);
                if nearest.map(|(_, best)| d < best).unwrap_or(true) {
                    nearest = Some((i, d));
                }
            }
            let Some((stid, anchor_distance)) = nearest else {
                continue;
            };

            let site = &mut sites[stid];
            let bond_length = if subtract.is_some() {
                round_bond_length(cell.mic_distance(&site.position, &adspos))
            } else {
                round_bond_length(anchor_distance)
            };
            if bond_length > config.dmax {
                continue;
            }

            // An existing strictly shorter claim wins: nearest atom, not
            // first-come.
            if site.occupied {
                if let Some(existing) = site.bond_length {
                    if bond_length >= existing {
                        continue;
                    }
                }
            }

            let molecule = self
                .inventory
                .molecule_of(adsid)
                .expect("adsorbate atom belongs to a molecule")
                .to_vec();
            let molecule_symbols: Vec<&str> = molecule.iter().map(|&i| symbols[i]).collect();
            let name = resolve_adsorbate_name(&molecule_symbols);

            site.occupied = true;
            site.bonding_index = Some(adsid);
            site.bond_length = Some(bond_length);
            site.adsorbate = Some(name.clone());
            site.fragment = Some(name);
            site.adsorbate_indices = Some(molecule);
        }
    }

    /// Finalization pass: reset untouched sites, read back dentate counts
    /// and derive the coverage figures
    fn finalize(&mut self, sites: &mut [Site], geometry: &SiteGeometry) {
        let mut ndentate: HashMap<Vec<usize>, u32> = HashMap::new();
        for site in sites.iter() {
            if site.occupied {
                if let Some(adsi) = &site.adsorbate_indices {
                    *ndentate.entry(adsi.clone()).or_insert(0) += 1;
                }
            }
        }

        let mut n_surf_occupied = 0usize;
        let mut n_subsurf_occupied = 0usize;
        self.n_occupied = 0;
        for site in sites.iter_mut() {
            if !site.occupied {
                site.reset_occupancy();
                continue;
            }
            self.n_occupied += 1;
            if site.is_subsurface() {
                n_subsurf_occupied += 1;
            } else {
                n_surf_occupied += 1;
            }
            site.dentate = site
                .adsorbate_indices
                .as_ref()
                .and_then(|adsi| ndentate.get(adsi))
                .copied()
                .unwrap_or(0);
        }

        let n_surf = geometry.surface_indices().len();
        self.coverage = if n_surf > 0 {
            n_surf_occupied as f64 / n_surf as f64
        } else {
            0.0
        };
        let n_subsurf = geometry.subsurface_indices().len();
        self.subsurf_coverage = if n_subsurf > 0 {
            n_subsurf_occupied as f64 / n_subsurf as f64
        } else {
            0.0
        };
    }

    /// Fragment decomposition and label assignment for occupied sites
    fn classify_fragments(&mut self, sites: &mut [Site], geometry: &SiteGeometry) {
        let symbols = self.structure.symbols();
        let mut multidentate_seen: Vec<Vec<usize>> = Vec::new();

        for (j, site) in sites.iter_mut().enumerate() {
            if !site.occupied {
                continue;
            }
            let adssym = site.adsorbate.clone().unwrap_or_default();
            let adsids = site.adsorbate_indices.clone().unwrap_or_default();
            let bondid = site.bonding_index.expect("occupied site has bonding atom");

            if site.dentate > 1 {
                // The fragment is the bonding atom plus its hydrogens,
                // contiguous in the molecule's sorted index tuple.
                let conns = self.inventory.bonded_neighbors(bondid);
                let hnn = conns.iter().filter(|&&i| symbols[i] == "H").count();
                let mut fragment_symbol = symbols[bondid].to_string();
                if hnn == 1 {
                    fragment_symbol.push('H');
                } else if hnn > 1 {
                    fragment_symbol.push_str(&format!("H{}", hnn));
                }
                site.fragment = Some(fragment_symbol);

                let ibond = adsids
                    .iter()
                    .position(|&i| i == bondid)
                    .expect("bonding atom is part of its molecule");
                let end = (ibond + hnn + 1).min(adsids.len());
                site.fragment_indices = Some(adsids[ibond..end].to_vec());

                if !multidentate_seen.contains(&adsids) {
                    multidentate_seen.push(adsids.clone());
                    self.multidentate_adsorbates.push(adssym.clone());
                }
            } else {
                site.fragment_indices = site.adsorbate_indices.clone();
                self.monodentate_adsorbates.push(adssym.clone());
            }

            if self.labeling {
                let numeric = match &site.label {
                    Some(existing) => existing.clone(),
                    None => geometry
                        .site_label(site)
                        .map(|l| l.to_string())
                        .unwrap_or_else(|| "0".to_string()),
                };
                let fragment = site.fragment.clone().unwrap_or_default();
                let label = format!("{}{}", numeric, fragment);
                site.label = Some(label.clone());
                self.label_list[j] = label.clone();
                if site.dentate > 1 {
                    self.multidentate_fragments.push(label);
                    if bondid == adsids[0] {
                        self.multidentate_labels.push(format!("{}{}", numeric, adssym));
                    }
                }
            }
        }
    }

    /// The analyzed structure
    pub fn structure(&self) -> &AtomicStructure {
        &self.structure
    }

    /// The adsorbate molecule inventory
    pub fn inventory(&self) -> &AdsorbateInventory {
        &self.inventory
    }

    /// The resolved occupancy snapshot
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// All occupied sites
    pub fn occupied_sites(&self) -> Vec<&Site> {
        self.sites.iter().filter(|s| s.occupied).collect()
    }

    /// Look up a site by its defining substrate indices
    pub fn site_by_indices(&self, indices: &[usize]) -> Option<&Site> {
        let mut key: Vec<usize> = indices.to_vec();
        key.sort_unstable();
        self.sites.iter().find(|s| s.indices == key)
    }

    /// Number of occupied sites
    pub fn n_occupied(&self) -> usize {
        self.n_occupied
    }

    /// Adsorbate coverage of the surface (occupied surface sites per
    /// surface atom)
    pub fn coverage(&self) -> f64 {
        self.coverage
    }

    /// Adsorbate coverage of the subsurface
    pub fn subsurf_coverage(&self) -> f64 {
        self.subsurf_coverage
    }

    /// Names of all multidentate adsorbates, one entry per molecule
    pub fn multidentate_adsorbates(&self) -> &[String] {
        &self.multidentate_adsorbates
    }

    /// Names of every adsorbate on the surface, monodentate species first,
    /// one entry per molecule
    pub fn adsorbate_names(&self) -> Vec<String> {
        let mut names = self.monodentate_adsorbates.clone();
        names.extend(self.multidentate_adsorbates.iter().cloned());
        names
    }

    /// Each adsorbate as a (name, sorted molecule indices) pair
    ///
    /// A multidentate adsorbate is reported once regardless of how many
    /// sites it spans. When `known_species` is given, adsorbates outside
    /// the list are reported as their fragments instead.
    pub fn adsorbates(&self, known_species: Option<&[String]>) -> Vec<(String, Vec<usize>)> {
        let mut result: Vec<(String, Vec<usize>)> = Vec::new();
        let mut seen: Vec<usize> = Vec::new();
        for site in self.sites.iter().filter(|s| s.occupied) {
            let name = site.adsorbate.clone().unwrap_or_default();
            if let Some(known) = known_species {
                if !known.contains(&name) {
                    if let (Some(fragment), Some(fragi)) =
                        (&site.fragment, &site.fragment_indices)
                    {
                        result.push((fragment.clone(), fragi.clone()));
                        seen.extend(fragi.iter().copied());
                    }
                    continue;
                }
            }
            if let Some(adsi) = &site.adsorbate_indices {
                if !adsi.iter().all(|i| seen.contains(i)) {
                    result.push((name, adsi.clone()));
                    seen.extend(adsi.iter().copied());
                }
            }
        }
        result.sort_by(|a, b| a.1.cmp(&b.1));
        result
    }

    /// Each fragment as a (name, fragment indices) pair
    pub fn fragments(&self) -> Vec<(String, Vec<usize>)> {
        let mut result: Vec<(String, Vec<usize>)> = self
            .sites
            .iter()
            .filter(|s| s.occupied)
            .filter_map(|s| {
                Some((s.fragment.clone()?, s.fragment_indices.clone()?))
            })
            .collect();
        result.sort_by(|a, b| a.1.cmp(&b.1));
        result
    }

    /// Label multisets used by the labeling machinery
    pub fn multidentate_fragment_labels(&self) -> &[String] {
        &self.multidentate_fragments
    }

    /// Whole-molecule labels of multidentate adsorbates
    pub fn multidentate_adsorbate_labels(&self) -> &[String] {
        &self.multidentate_labels
    }

    /// Sorted labels of all occupied sites
    ///
    /// With `fragmentation` every fragment contributes its own label, so
    /// multidentate species with different orientations compare different.
    /// Without it, the fragment labels of each multidentate molecule are
    /// collapsed back into one whole-molecule label by multiset difference.
    /// When labeling was disabled at resolution the Hill formula of the
    /// adsorbate atoms stands in for the label multiset.
    pub fn occupied_labels(&self, fragmentation: bool) -> Vec<String> {
        if !self.labeling {
            let symbols: Vec<&str> = self
                .inventory
                .ids()
                .iter()
                .map(|&i| self.structure.atom(i).expect("index valid").symbol())
                .collect();
            if symbols.is_empty() {
                return Vec::new();
            }
            return vec![hill_formula(&symbols)];
        }

        let labs: Vec<String> = self
            .label_list
            .iter()
            .filter(|l| l.as_str() != "0")
            .cloned()
            .collect();
        let mut labels = if fragmentation {
            labs
        } else {
            // Multiset difference: duplicate labels are meaningful, so the
            // collapse counts occurrences instead of using set difference.
            let mut counts: HashMap<&str, i64> = HashMap::new();
            for lab in &labs {
                *counts.entry(lab.as_str()).or_insert(0) += 1;
            }
            for lab in &self.multidentate_fragments {
                *counts.entry(lab.as_str()).or_insert(0) -= 1;
            }
            let mut remaining: Vec<String> = Vec::new();
            for lab in &labs {
                let count = counts.get_mut(lab.as_str()).expect("counted above");
                if *count > 0 {
                    remaining.push(lab.clone());
                    *count -= 1;
                }
            }
            remaining.extend(self.multidentate_labels.iter().cloned());
            remaining
        };
        labels.sort();
        labels
    }
}

/// Enumerates all occupied adsorption sites of a structure
///
/// Convenience entry point for callers that only need the occupied
/// subset of the resolved snapshot, optionally restricted to one surface
/// context.
pub fn enumerate_occupied_sites(
    structure: &AtomicStructure,
    geometry: &SiteGeometry,
    config: &CoverageConfig,
    surface: Option<&str>,
) -> Result<Vec<Site>> {
    let coverage = AdsorbateCoverage::resolve(structure, geometry, config)?;
    Ok(coverage
        .sites()
        .iter()
        .filter(|s| s.occupied)
        .filter(|s| surface.map(|f| s.surface == f).unwrap_or(true))
        .cloned()
        .collect())
}

/// The point a binding atom is matched against for a site
fn anchor_point(site: &Site, heights: Option<&HashMap<SiteKind, f64>>) -> Vector3D {
    match heights {
        Some(heights) if site.normal.is_finite() => {
            let height = heights.get(&site.kind).copied().unwrap_or(0.0);
            site.position + site.normal * height
        }
        _ => site.position,
    }
}
