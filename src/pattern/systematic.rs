/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Systematic coverage pattern enumeration
//!
//! The exhaustive counterpart of the stochastic generator: for every input
//! image, every eligible (site, species, orientation) combination of the
//! chosen action is tried, with the same exclusion-zone and
//! minimum-distance checks and the same duplicate filter. Useful to
//! enumerate all unique patterns at low coverage; the combination count
//! explodes at higher coverages, so each image's output can be capped.

use std::collections::HashMap;

use crate::atoms::neighbors::atoms_too_close_after_addition;
use crate::atoms::AtomicStructure;
use crate::coverage::{build_graph, CoverageGraphOptions};
use crate::io::TrajectoryWriter;
use crate::sites::{Site, SiteGeometry, SiteKind};
use crate::species::formula_atom_count;
use crate::species::registry::site_heights;

use super::actions::{add_adsorbate_to_site, remove_adsorbate_from_site};
use super::common::{
    orientation_vector, resolve_coverage, site_allowed_for_species, six_fold_allowed,
    validate_config, Action, ExclusionZone, PatternGeneratorConfig,
};
use super::errors::Result;
use super::history::PatternHistory;
use super::log::TrialLog;

/// Options for one systematic enumeration run
#[derive(Debug, Clone)]
pub struct EnumerationOptions {
    /// The action to enumerate exhaustively
    pub action: Action,

    /// Whether to discard duplicates via labels and graph isomorphism
    pub unique: bool,

    /// Whether to enumerate every orientation of multidentate species;
    /// otherwise only the first available orientation is tried
    pub enumerate_orientations: bool,

    /// Stop generating for an image once this many structures were written
    pub max_gen_per_image: Option<usize>,
}

impl Default for EnumerationOptions {
    fn default() -> Self {
        Self {
            action: Action::Add,
            unique: true,
            enumerate_orientations: true,
            max_gen_per_image: None,
        }
    }
}

/// Outcome of a systematic run
#[derive(Debug, Clone, Copy)]
pub struct EnumerationSummary {
    /// Number of structures written to the archive
    pub n_generated: usize,
    /// Number of candidates discarded as duplicates
    pub n_duplicates: usize,
}

/// Per-run working state threaded through the enumeration methods
struct Enumeration {
    writer: TrajectoryWriter,
    log: TrialLog,
    history: PatternHistory,
    options: EnumerationOptions,
    n_generated: usize,
    n_duplicates: usize,
    n_written_for_image: usize,
}

impl Enumeration {
    fn image_cap_reached(&self) -> bool {
        self.options
            .max_gen_per_image
            .map(|c| self.n_written_for_image >= c)
            .unwrap_or(false)
    }
}

/// Generates adsorbate coverage patterns systematically
pub struct SystematicPatternGenerator {
    images: Vec<AtomicStructure>,
    geometry: SiteGeometry,
    config: PatternGeneratorConfig,
    heights: HashMap<SiteKind, f64>,
    multidentate: Vec<String>,
    site_nblist: Vec<Vec<usize>>,
    bidentate_nblist: Vec<Vec<usize>>,
}

impl SystematicPatternGenerator {
    /// Creates a new systematic generator
    ///
    /// Configuration errors are raised here, before any enumeration runs.
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
        Ok(Self {
            images,
            geometry,
            config,
            heights,
            multidentate,
            site_nblist,
            bidentate_nblist,
        })
    }

    /// Runs the enumeration over every input image
    pub fn run(&mut self, options: &EnumerationOptions) -> Result<EnumerationSummary> {
        let writer =
            TrajectoryWriter::open(&self.config.trajectory, self.config.append_trajectory)?;
        let mut log = TrialLog::open(self.config.logfile.as_deref())?;
        let mut history = PatternHistory::new();

        if options.unique && self.config.append_trajectory {
            log.write(&format!(
                "Loading graphs for existing structures in {}. This might take a while.",
                self.config.trajectory.display()
            ));
            for (structure, _) in crate::io::read_trajectory(&self.config.trajectory)? {
                let coverage =
                    resolve_coverage(&structure, &self.geometry, self.config.dmax, true)?;
                let labels = coverage.occupied_labels(options.enumerate_orientations);
                let graph = build_graph(&coverage, &self.geometry, &self.graph_options(options));
                history.push(labels, graph);
            }
        }

        let mut state = Enumeration {
            writer,
            log,
            history,
            options: options.clone(),
            n_generated: 0,
            n_duplicates: 0,
            n_written_for_image: 0,
        };

        let images = self.images.clone();
        for (n, image) in images.iter().enumerate() {
            state.n_written_for_image = 0;
            state
                .log
                .write(&format!("Generating all possible patterns for image {}", n));

            let clean_slab = image.adsorbate_indices().is_empty();
            if clean_slab && options.action != Action::Add {
                state.log.write(&format!(
                    "There is no adsorbate in image {}. The only available action is add.",
                    n
                ));
                continue;
            }

            let duplicates_before = state.n_duplicates;
            match options.action {
                Action::Add => self.enumerate_add(image, clean_slab, &mut state)?,
                Action::Remove => self.enumerate_remove(image, &mut state)?,
                Action::Move => self.enumerate_move(image, &mut state)?,
                Action::Replace => self.enumerate_replace(image, &mut state)?,
            }
            state.log.write(&format!(
                "{} duplicates discarded for image {}",
                state.n_duplicates - duplicates_before,
                n
            ));
        }

        Ok(EnumerationSummary {
            n_generated: state.n_generated,
            n_duplicates: state.n_duplicates,
        })
    }

    fn graph_options(&self, options: &EnumerationOptions) -> CoverageGraphOptions {
        CoverageGraphOptions {
            fragmentation: options.enumerate_orientations,
            ..CoverageGraphOptions::default()
        }
    }

    /// Validates, deduplicates and emits one candidate structure
    fn accept(
        &self,
        atoms: AtomicStructure,
        zone: &ExclusionZone,
        n_added: Option<usize>,
        clean_slab: bool,
        state: &mut Enumeration,
    ) -> Result<()> {
        let coverage =
            resolve_coverage(&atoms, &self.geometry, self.config.dmax, state.options.unique)?;
        if let Some(n_added) = n_added {
            let crowded = coverage
                .sites()
                .iter()
                .enumerate()
                .any(|(i, s)| s.occupied && zone.neighborhood.contains(&i));
            if crowded {
                return Ok(());
            }
            let ads_ids = atoms.adsorbate_indices();
            if atoms_too_close_after_addition(
                &atoms,
                &ads_ids,
                n_added,
                self.config.min_adsorbate_distance,
            ) {
                return Ok(());
            }
        }

        let labels = coverage.occupied_labels(state.options.enumerate_orientations);
        if state.options.unique {
            let graph = build_graph(&coverage, &self.geometry, &self.graph_options(&state.options));
            if state
                .history
                .find_duplicate(&labels, &graph, clean_slab)
                .is_some()
            {
                state.n_duplicates += 1;
                return Ok(());
            }
            state.history.push(labels.clone(), graph);
        }

        state.log.write(&format!(
            "Succeed! Pattern {} generated: {:?}",
            state.n_generated, labels
        ));
        state.writer.write(&atoms, &labels)?;
        state.n_generated += 1;
        state.n_written_for_image += 1;
        Ok(())
    }

    /// Orientation targets for a multidentate species on site `nsi`
    fn orientation_targets(&self, nsi: usize, zone: &ExclusionZone) -> Vec<usize> {
        self.bidentate_nblist[nsi]
            .iter()
            .copied()
            .filter(|&n| n != nsi && !zone.excluded.contains(&n))
            .collect()
    }

    fn enumerate_add(
        &mut self,
        image: &AtomicStructure,
        clean_slab: bool,
        state: &mut Enumeration,
    ) -> Result<()> {
        let (sites, zone) = if clean_slab {
            (self.geometry.snapshot(), ExclusionZone::empty())
        } else {
            let coverage =
                resolve_coverage(image, &self.geometry, self.config.dmax, state.options.unique)?;
            let zone = ExclusionZone::new(coverage.sites(), &self.site_nblist);
            (coverage.sites().to_vec(), zone)
        };

        for nsi in 0..sites.len() {
            if zone.excluded.contains(&nsi) {
                continue;
            }
            // With multidentate species in play, a site without free
            // orientation neighbors is skipped entirely.
            let targets = if self.multidentate.is_empty() {
                Vec::new()
            } else {
                let t = self.orientation_targets(nsi, &zone);
                if t.is_empty() && !sites[nsi].kind.is_subsurface() {
                    continue;
                }
                t
            };

            let species_list = self.config.adsorbate_species.clone();
            for species in &species_list {
                if !site_allowed_for_species(&self.geometry, &sites[nsi], species, &self.config) {
                    continue;
                }
                if !six_fold_allowed(&sites[nsi], species, self.geometry.allow_6fold())? {
                    continue;
                }
                if formula_atom_count(species)? > 1 && sites[nsi].kind.is_subsurface() {
                    continue;
                }

                if self.multidentate.iter().any(|s| s == species) {
                    let mut orientation_sites = targets.clone();
                    if !state.options.enumerate_orientations {
                        orientation_sites.truncate(1);
                    }
                    for nbsi in orientation_sites {
                        let mut atoms = image.clone();
                        let orientation =
                            orientation_vector(&atoms, &sites[nsi], &sites[nbsi]);
                        let height =
                            self.heights.get(&sites[nsi].kind).copied().unwrap_or(0.0);
                        let n = add_adsorbate_to_site(
                            &mut atoms,
                            species,
                            &sites[nsi],
                            height,
                            Some(orientation),
                        )?;
                        self.accept(atoms, &zone, Some(n), clean_slab, state)?;
                        if state.image_cap_reached() {
                            return Ok(());
                        }
                    }
                } else {
                    let mut atoms = image.clone();
                    let height = self.heights.get(&sites[nsi].kind).copied().unwrap_or(0.0);
                    let n =
                        add_adsorbate_to_site(&mut atoms, species, &sites[nsi], height, None)?;
                    self.accept(atoms, &zone, Some(n), clean_slab, state)?;
                    if state.image_cap_reached() {
                        return Ok(());
                    }
                }
            }
        }
        Ok(())
    }

    fn enumerate_remove(
        &mut self,
        image: &AtomicStructure,
        state: &mut Enumeration,
    ) -> Result<()> {
        let coverage =
            resolve_coverage(image, &self.geometry, self.config.dmax, state.options.unique)?;
        let occupied: Vec<Site> = coverage.occupied_sites().into_iter().cloned().collect();
        if occupied.is_empty() {
            state.log.write("There is no occupied site. Removal failed!");
            return Ok(());
        }

        let mut removed: Vec<Vec<usize>> = Vec::new();
        for rmst in &occupied {
            let Some(molecule) = rmst.adsorbate_indices.clone() else {
                continue;
            };
            // The same adsorbate is removed only once, no matter how many
            // sites it spans.
            if removed.contains(&molecule) {
                continue;
            }
            removed.push(molecule);

            let mut atoms = image.clone();
            remove_adsorbate_from_site(&mut atoms, rmst)?;
            if atoms.adsorbate_indices().is_empty() {
                state
                    .log
                    .write("Last adsorbate has been removed. Writing the bare structure.");
                state.writer.write(&atoms, &[])?;
                state.n_generated += 1;
                state.n_written_for_image += 1;
                return Ok(());
            }
            self.accept(atoms, &ExclusionZone::empty(), None, false, state)?;
            if state.image_cap_reached() {
                return Ok(());
            }
        }
        Ok(())
    }

    fn enumerate_move(
        &mut self,
        image: &AtomicStructure,
        state: &mut Enumeration,
    ) -> Result<()> {
        let coverage =
            resolve_coverage(image, &self.geometry, self.config.dmax, state.options.unique)?;
        let sites = coverage.sites().to_vec();
        let zone = ExclusionZone::new(&sites, &self.site_nblist);
        if zone.occupied.is_empty() {
            state.log.write("There is no occupied site. Move failed!");
            return Ok(());
        }

        let mut moved: Vec<Vec<usize>> = Vec::new();
        for &rmsti in &zone.occupied {
            let rmst = sites[rmsti].clone();
            let Some(molecule) = rmst.adsorbate_indices.clone() else {
                continue;
            };
            if moved.contains(&molecule) {
                continue;
            }
            moved.push(molecule);
            let Some(species) = rmst.adsorbate.clone() else {
                continue;
            };

            let mut removed_atoms = image.clone();
            remove_adsorbate_from_site(&mut removed_atoms, &rmst)?;

            for nsi in 0..sites.len() {
                if zone.excluded.contains(&nsi) {
                    continue;
                }
                if !site_allowed_for_species(&self.geometry, &sites[nsi], &species, &self.config)
                {
                    continue;
                }
                if !six_fold_allowed(&sites[nsi], &species, self.geometry.allow_6fold())? {
                    continue;
                }
                if formula_atom_count(&species)? > 1 && sites[nsi].kind.is_subsurface() {
                    continue;
                }

                let height = self.heights.get(&sites[nsi].kind).copied().unwrap_or(0.0);
                if self.multidentate.iter().any(|s| *s == species) {
                    let mut orientation_sites = self.orientation_targets(nsi, &zone);
                    if orientation_sites.is_empty() {
                        continue;
                    }
                    if !state.options.enumerate_orientations {
                        orientation_sites.truncate(1);
                    }
                    for nbsi in orientation_sites {
                        let mut atoms = removed_atoms.clone();
                        let orientation =
                            orientation_vector(&atoms, &sites[nsi], &sites[nbsi]);
                        let n = add_adsorbate_to_site(
                            &mut atoms,
                            &species,
                            &sites[nsi],
                            height,
                            Some(orientation),
                        )?;
                        self.accept(atoms, &zone, Some(n), false, state)?;
                        if state.image_cap_reached() {
                            return Ok(());
                        }
                    }
                } else {
                    let mut atoms = removed_atoms.clone();
                    let n =
                        add_adsorbate_to_site(&mut atoms, &species, &sites[nsi], height, None)?;
                    self.accept(atoms, &zone, Some(n), false, state)?;
                    if state.image_cap_reached() {
                        return Ok(());
                    }
                }
            }
        }
        Ok(())
    }

    fn enumerate_replace(
        &mut self,
        image: &AtomicStructure,
        state: &mut Enumeration,
    ) -> Result<()> {
        let coverage =
            resolve_coverage(image, &self.geometry, self.config.dmax, state.options.unique)?;
        let sites = coverage.sites().to_vec();
        let zone = ExclusionZone::new(&sites, &self.site_nblist);
        if zone.occupied.is_empty() {
            state
                .log
                .write("There is no occupied site. Replacement failed!");
            return Ok(());
        }

        let mut replaced: Vec<Vec<usize>> = Vec::new();
        for &rpsti in &zone.occupied {
            let rpst = sites[rpsti].clone();
            let Some(molecule) = rpst.adsorbate_indices.clone() else {
                continue;
            };
            if replaced.contains(&molecule) {
                continue;
            }
            replaced.push(molecule);
            let old_species = rpst.adsorbate.clone().unwrap_or_default();

            let mut removed_atoms = image.clone();
            remove_adsorbate_from_site(&mut removed_atoms, &rpst)?;

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

            let height = self.heights.get(&rpst.kind).copied().unwrap_or(0.0);
            for species in &new_options {
                if self.multidentate.iter().any(|s| s == species) {
                    let mut orientation_sites = self.orientation_targets(rpsti, &zone);
                    if orientation_sites.is_empty() {
                        continue;
                    }
                    if !state.options.enumerate_orientations {
                        orientation_sites.truncate(1);
                    }
                    for nbsi in orientation_sites {
                        let mut atoms = removed_atoms.clone();
                        let orientation = orientation_vector(&atoms, &rpst, &sites[nbsi]);
                        let n = add_adsorbate_to_site(
                            &mut atoms,
                            species,
                            &rpst,
                            height,
                            Some(orientation),
                        )?;
                        self.accept(atoms, &zone, Some(n), false, state)?;
                        if state.image_cap_reached() {
                            return Ok(());
                        }
                    }
                } else {
                    let mut atoms = removed_atoms.clone();
                    let n = add_adsorbate_to_site(&mut atoms, species, &rpst, height, None)?;
                    self.accept(atoms, &zone, Some(n), false, state)?;
                    if state.image_cap_reached() {
                        return Ok(());
                    }
                }
            }
        }
        Ok(())
    }
}
