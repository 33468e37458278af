/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Stochastic coverage pattern generation
//!
//! Each trial picks an image, an action and a species at random, applies
//! the mutation, re-resolves the occupancy and keeps the structure only
//! when it passes the exclusion-zone and minimum-distance checks and is
//! not a duplicate of an earlier accepted pattern. Rejections are soft:
//! the loop simply samples again until the requested number of accepted
//! patterns is reached or the optional attempt cap fires. With an
//! exhausted configuration space the unbounded loop never terminates on
//! its own, so long runs should set the cap.

use std::collections::HashMap;

use rand::rngs::StdRng;

use crate::atoms::neighbors::atoms_too_close_after_addition;
use crate::atoms::AtomicStructure;
use crate::coverage::{build_graph, AdsorbateCoverage, CoverageGraphOptions};
use crate::io::TrajectoryWriter;
use crate::sites::{Site, SiteGeometry, SiteKind};
use crate::species::registry::site_heights;
use crate::utils::{choice, make_rng, weighted_choice};

use super::actions::{add_adsorbate_to_site, remove_adsorbate_from_site};
use super::common::{
    orientation_vector, resolve_coverage, site_allowed_for_species, six_fold_allowed,
    validate_config, Action, ExclusionZone, PatternGeneratorConfig,
};
use super::errors::{PatternError, Result};
use super::history::PatternHistory;
use super::log::TrialLog;

/// Options for one stochastic generation run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Number of accepted, non-duplicate structures to generate
    pub n_gen: usize,

    /// Actions to sample from
    pub actions: Vec<Action>,

    /// Per-action probability weights; keys must cover `actions` exactly
    pub action_probabilities: Option<HashMap<Action, f64>>,

    /// Whether to discard duplicates via labels and graph isomorphism
    pub unique: bool,

    /// Iteration guard: stop after this many trials even if `n_gen` has
    /// not been reached. `None` keeps sampling indefinitely.
    pub max_attempts: Option<usize>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            n_gen: 1,
            actions: vec![Action::Add, Action::Remove, Action::Move],
            action_probabilities: None,
            unique: true,
            max_attempts: None,
        }
    }
}

/// Outcome of a stochastic run
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    /// Number of structures written to the archive
    pub n_generated: usize,
    /// Number of trials attempted
    pub n_attempts: usize,
}

/// Generates adsorbate coverage patterns stochastically
pub struct StochasticPatternGenerator {
    images: Vec<AtomicStructure>,
    geometry: SiteGeometry,
    config: PatternGeneratorConfig,
    heights: HashMap<SiteKind, f64>,
    multidentate: Vec<String>,
    site_nblist: Vec<Vec<usize>>,
    bidentate_nblist: Vec<Vec<usize>>,
    rng: StdRng,
}

impl StochasticPatternGenerator {
    /// Creates a new stochastic generator
    ///
    /// # Arguments
    ///
    /// * `images` - Starting structures; each trial mutates a copy of one
    /// * `geometry` - Site geometry shared by all images
    /// * `config` - Generator configuration
    ///
    /// # Errors
    ///
    /// Configuration errors (unknown species, mismatched weight maps, no
    /// images) are raised here, before any trial runs.
    pub fn new(
        images: Vec<AtomicStructure>,
        geometry: SiteGeometry,
        config: PatternGeneratorConfig,
    ) -> Result<Self> {
        let (_, multidentate) = validate_config(&images, &config)?;
        let heights = site_heights(config.heights.as_ref());
        let site_nblist = geometry.neighbor_site_list(2);
        let bidentate_nblist = if multidentate.is_empty() {
            Vec::new()
        } else {
            geometry.neighbor_site_list(1)
        };
        let rng = make_rng(config.seed);
        Ok(Self {
            images,
            geometry,
            config,
            heights,
            multidentate,
            site_nblist,
            bidentate_nblist,
            rng,
        })
    }

    /// The site geometry used by the generator
    pub fn geometry(&self) -> &SiteGeometry {
        &self.geometry
    }

    /// Runs stochastic generation
    ///
    /// Accepted structures are appended to the archive together with their
    /// label multisets; every trial is recorded in the trial log.
    pub fn run(&mut self, options: &RunOptions) -> Result<RunSummary> {
        if let Some(weights) = &options.action_probabilities {
            if weights.len() != options.actions.len()
                || !options.actions.iter().all(|a| weights.contains_key(a))
            {
                return Err(PatternError::ActionWeightMismatch);
            }
        }

        let mut log = TrialLog::open(self.config.logfile.as_deref())?;
        let mut writer =
            TrajectoryWriter::open(&self.config.trajectory, self.config.append_trajectory)?;
        let mut history = PatternHistory::new();

        if options.unique && self.config.append_trajectory {
            log.write(&format!(
                "Loading graphs for existing structures in {}. This might take a while.",
                self.config.trajectory.display()
            ));
            for (structure, _) in crate::io::read_trajectory(&self.config.trajectory)? {
                let coverage =
                    resolve_coverage(&structure, &self.geometry, self.config.dmax, true)?;
                let labels = coverage.occupied_labels(self.config.fragmentation);
                let graph = build_graph(&coverage, &self.geometry, &self.graph_options());
                history.push(labels, graph);
            }
        }

        let mut n_generated = 0usize;
        let mut n_attempts = 0usize;
        while n_generated < options.n_gen {
            if let Some(cap) = options.max_attempts {
                if n_attempts >= cap {
                    log.write(&format!(
                        "Attempt cap {} reached after {} accepted patterns. Stopping.",
                        cap, n_generated
                    ));
                    break;
                }
            }
            n_attempts += 1;

            let mut atoms = weighted_choice(
                &mut self.rng,
                &self.images,
                self.config.image_probabilities.as_deref(),
            )?
            .clone();
            let clean_slab = atoms.adsorbate_indices().is_empty();

            let action = if clean_slab {
                if !options.actions.contains(&Action::Add) {
                    log.write("There is no adsorbate in the image. The only available action is add.");
                    continue;
                }
                Action::Add
            } else {
                let weights: Option<Vec<f64>> = options
                    .action_probabilities
                    .as_ref()
                    .map(|w| options.actions.iter().map(|a| w[a]).collect());
                *weighted_choice(&mut self.rng, &options.actions, weights.as_deref())?
            };
            log.write(&format!("Action: {}", action));

            let outcome = match action {
                Action::Add => self.try_add(&mut atoms, clean_slab, options.unique, &mut log)?,
                Action::Remove => self.try_remove(&mut atoms, options.unique, &mut log)?,
                Action::Move => self.try_move(&mut atoms, options.unique, &mut log)?,
                Action::Replace => self.try_replace(&mut atoms, options.unique, &mut log)?,
            };
            let Some(coverage) = outcome else {
                continue;
            };

            let labels = coverage.occupied_labels(self.config.fragmentation);
            if options.unique {
                let graph = build_graph(&coverage, &self.geometry, &self.graph_options());
                if let Some(kind) = history.find_duplicate(&labels, &graph, clean_slab) {
                    log.write(&format!("Duplicate found by {:?}. Discarded!", kind));
                    continue;
                }
                history.push(labels.clone(), graph);
            }

            log.write(&format!("Succeed! Pattern generated: {:?}", labels));
            writer.write(&atoms, &labels)?;
            n_generated += 1;
        }

        Ok(RunSummary {
            n_generated,
            n_attempts,
        })
    }

    fn graph_options(&self) -> CoverageGraphOptions {
        CoverageGraphOptions {
            fragmentation: self.config.fragmentation,
            ..CoverageGraphOptions::default()
        }
    }

    /// Candidate sites for adding `species`, outside the exclusion zone
    fn candidate_sites(
        &self,
        sites: &[Site],
        zone: &ExclusionZone,
        species: &str,
    ) -> Result<Vec<usize>> {
        let mut result = Vec::new();
        for (i, site) in sites.iter().enumerate() {
            if zone.excluded.contains(&i) {
                continue;
            }
            if !site_allowed_for_species(&self.geometry, site, species, &self.config) {
                continue;
            }
            if !six_fold_allowed(site, species, self.geometry.allow_6fold())? {
                continue;
            }
            result.push(i);
        }
        Ok(result)
    }

    /// Places `species` on `sites[nsi]`, orienting multidentate species
    /// toward a free neighbor site; returns the number of atoms added or
    /// `None` when no orientation is available
    fn place(
        &mut self,
        atoms: &mut AtomicStructure,
        sites: &[Site],
        nsi: usize,
        species: &str,
        zone: &ExclusionZone,
    ) -> Result<Option<usize>> {
        let nst = &sites[nsi];
        let height = self.heights.get(&nst.kind).copied().unwrap_or(0.0);

        if self.multidentate.iter().any(|s| s.as_str() == species) {
            let candidates: Vec<usize> = self.bidentate_nblist[nsi]
                .iter()
                .copied()
                .filter(|&n| n != nsi && !zone.excluded.contains(&n))
                .collect();
            if candidates.is_empty() {
                return Ok(None);
            }
            let nbsi = *choice(&mut self.rng, &candidates)?;
            let orientation = orientation_vector(atoms, nst, &sites[nbsi]);
            let n = add_adsorbate_to_site(atoms, species, nst, height, Some(orientation))?;
            Ok(Some(n))
        } else {
            let n = add_adsorbate_to_site(atoms, species, nst, height, None)?;
            Ok(Some(n))
        }
    }

    /// Post-placement validation: no new occupancy inside the exclusion
    /// neighborhood, and no inter-adsorbate distance violation
    fn accept_placement(
        &self,
        atoms: &AtomicStructure,
        zone: &ExclusionZone,
        n_added: usize,
        unique: bool,
    ) -> Result<Option<AdsorbateCoverage>> {
        let coverage = resolve_coverage(atoms, &self.geometry, self.config.dmax, unique)?;
        let crowded = coverage
            .sites()
            .iter()
            .enumerate()
            .any(|(i, s)| s.occupied && zone.neighborhood.contains(&i));
        if crowded {
            return Ok(None);
        }
        let ads_ids = atoms.adsorbate_indices();
        if atoms_too_close_after_addition(
            atoms,
            &ads_ids,
            n_added,
            self.config.min_adsorbate_distance,
        ) {
            return Ok(None);
        }
        Ok(Some(coverage))
    }

    fn try_add(
        &mut self,
        atoms: &mut AtomicStructure,
        clean_slab: bool,
        unique: bool,
        log: &mut TrialLog,
    ) -> Result<Option<AdsorbateCoverage>> {
        let (sites, zone) = if clean_slab {
            (self.geometry.snapshot(), ExclusionZone::empty())
        } else {
            let coverage = resolve_coverage(atoms, &self.geometry, self.config.dmax, unique)?;
            let zone = ExclusionZone::new(coverage.sites(), &self.site_nblist);
            (coverage.sites().to_vec(), zone)
        };

        let weights: Option<Vec<f64>> = self
            .config
            .species_probabilities
            .as_ref()
            .map(|w| self.config.adsorbate_species.iter().map(|s| w[s]).collect());
        let species =
            weighted_choice(&mut self.rng, &self.config.adsorbate_species, weights.as_deref())?
                .clone();

        let nsids = self.candidate_sites(&sites, &zone, &species)?;
        if nsids.is_empty() {
            log.write(&format!(
                "Not enough space to add {} to any site. Addition failed!",
                species
            ));
            return Ok(None);
        }
        let nsi = *choice(&mut self.rng, &nsids)?;

        let Some(n_added) = self.place(atoms, &sites, nsi, &species, &zone)? else {
            log.write(&format!(
                "Not enough space to add {} to any site. Addition failed!",
                species
            ));
            return Ok(None);
        };

        let accepted = self.accept_placement(atoms, &zone, n_added, unique)?;
        if accepted.is_none() {
            log.write(&format!(
                "The added {} is too close to another adsorbate. Addition failed!",
                species
            ));
        }
        Ok(accepted)
    }

    fn try_remove(
        &mut self,
        atoms: &mut AtomicStructure,
        unique: bool,
        log: &mut TrialLog,
    ) -> Result<Option<AdsorbateCoverage>> {
        let coverage = resolve_coverage(atoms, &self.geometry, self.config.dmax, unique)?;
        let occupied: Vec<Site> = coverage.occupied_sites().into_iter().cloned().collect();
        if occupied.is_empty() {
            log.write("There is no occupied site. Removal failed!");
            return Ok(None);
        }
        let rmst = choice(&mut self.rng, &occupied)?.clone();
        remove_adsorbate_from_site(atoms, &rmst)?;

        if atoms.adsorbate_indices().is_empty() {
            log.write("Last adsorbate has been removed from the image.");
            return Ok(None);
        }
        Ok(Some(resolve_coverage(
            atoms,
            &self.geometry,
            self.config.dmax,
            unique,
        )?))
    }

    fn try_move(
        &mut self,
        atoms: &mut AtomicStructure,
        unique: bool,
        log: &mut TrialLog,
    ) -> Result<Option<AdsorbateCoverage>> {
        let coverage = resolve_coverage(atoms, &self.geometry, self.config.dmax, unique)?;
        let sites = coverage.sites().to_vec();
        // The exclusion zone is taken before the removal, so the moved
        // adsorbate cannot land within two shells of its old position.
        let zone = ExclusionZone::new(&sites, &self.site_nblist);
        if zone.occupied.is_empty() {
            log.write("There is no occupied site. Move failed!");
            return Ok(None);
        }
        let rmsti = *choice(&mut self.rng, &zone.occupied)?;
        let rmst = sites[rmsti].clone();
        let Some(species) = rmst.adsorbate.clone() else {
            return Ok(None);
        };
        remove_adsorbate_from_site(atoms, &rmst)?;

        let nsids = self.candidate_sites(&sites, &zone, &species)?;
        if nsids.is_empty() {
            log.write(&format!(
                "Not enough space to place {} on any other site. Move failed!",
                species
            ));
            return Ok(None);
        }
        let nsi = *choice(&mut self.rng, &nsids)?;
        let Some(n_added) = self.place(atoms, &sites, nsi, &species, &zone)? else {
            log.write(&format!(
                "Not enough space to place {} on any other site. Move failed!",
                species
            ));
            return Ok(None);
        };

        let accepted = self.accept_placement(atoms, &zone, n_added, unique)?;
        if accepted.is_none() {
            log.write(&format!(
                "The new position of {} is too close to another adsorbate. Move failed!",
                species
            ));
        }
        Ok(accepted)
    }

    fn try_replace(
        &mut self,
        atoms: &mut AtomicStructure,
        unique: bool,
        log: &mut TrialLog,
    ) -> Result<Option<AdsorbateCoverage>> {
        let coverage = resolve_coverage(atoms, &self.geometry, self.config.dmax, unique)?;
        let sites = coverage.sites().to_vec();
        let zone = ExclusionZone::new(&sites, &self.site_nblist);
        if zone.occupied.is_empty() {
            log.write("There is no occupied site. Replacement failed!");
            return Ok(None);
        }
        let rpsti = *choice(&mut self.rng, &zone.occupied)?;
        let rpst = sites[rpsti].clone();
        let old_species = rpst.adsorbate.clone().unwrap_or_default();
        remove_adsorbate_from_site(atoms, &rpst)?;

        // A different species, honoring the same site-forbidding rules
        let mut new_options: Vec<String> = self
            .config
            .adsorbate_species
            .iter()
            .filter(|s| **s != old_species)
            .filter(|s| site_allowed_for_species(&self.geometry, &rpst, s.as_str(), &self.config))
            .cloned()
            .collect();
        if self.geometry.allow_6fold() && rpst.kind.is_subsurface() {
            let mut gated = Vec::new();
            for s in new_options {
                if six_fold_allowed(&rpst, &s, true)? {
                    gated.push(s);
                }
            }
            new_options = gated;
        }
        if new_options.is_empty() {
            log.write("No eligible species for replacement. Replacement failed!");
            return Ok(None);
        }
        let weights: Option<Vec<f64>> = self
            .config
            .species_probabilities
            .as_ref()
            .map(|w| new_options.iter().map(|s| w[s]).collect());
        let species =
            weighted_choice(&mut self.rng, &new_options, weights.as_deref())?.clone();

        let Some(n_added) = self.place(atoms, &sites, rpsti, &species, &zone)? else {
            log.write(&format!(
                "Not enough space to add {} to any site. Replacement failed!",
                species
            ));
            return Ok(None);
        };

        let accepted = self.accept_placement(atoms, &zone, n_added, unique)?;
        if accepted.is_none() {
            log.write(&format!(
                "The added {} is too close to another adsorbate. Replacement failed!",
                species
            ));
        }
        Ok(accepted)
    }
}
