/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Site geometry interchange object
//!
//! `SiteGeometry` is the contract between the external site provider and
//! the coverage engine: the ordered site list, the surface/subsurface
//! substrate index sets, the substrate adjacency matrix, and the label
//! registry derived from the site signatures. It is shared read-only
//! across all resolution calls; occupancy snapshots are cloned from it.
//!
//! Substrate atoms are assumed to occupy the leading indices of the
//! structure, with adsorbate atoms appended after them; the adjacency
//! matrix is indexed by those substrate indices.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use ndarray::Array2;

use super::errors::{Result, SiteError};
use super::site::Site;

/// Static site geometry shared across resolution and search
#[derive(Debug, Clone)]
pub struct SiteGeometry {
    /// Ordered list of pristine (unoccupied) sites
    sites: Vec<Site>,
    /// Indices of surface-exposed substrate atoms
    surface_indices: Vec<usize>,
    /// Indices of subsurface substrate atoms
    subsurface_indices: Vec<usize>,
    /// Substrate adjacency matrix
    adjacency: Array2<u8>,
    /// Whether adsorption into 6-fold subsurface sites is allowed
    allow_6fold: bool,
    /// Whether composition participates in label signatures
    composition_effect: bool,
    /// Signature -> numeric label registry
    label_registry: BTreeMap<String, u32>,
}

impl SiteGeometry {
    /// Create a new site geometry
    ///
    /// # Arguments
    ///
    /// * `sites` - Ordered site list from the provider
    /// * `surface_indices` - Surface-exposed substrate atom indices
    /// * `subsurface_indices` - Subsurface substrate atom indices
    /// * `adjacency` - Square substrate adjacency matrix
    /// * `allow_6fold` - Whether 6-fold subsurface adsorption is allowed
    /// * `composition_effect` - Whether composition enters label signatures
    pub fn new(
        mut sites: Vec<Site>,
        surface_indices: Vec<usize>,
        subsurface_indices: Vec<usize>,
        adjacency: Array2<u8>,
        allow_6fold: bool,
        composition_effect: bool,
    ) -> Result<Self> {
        let (rows, cols) = adjacency.dim();
        if rows != cols {
            return Err(SiteError::NonSquareAdjacency { rows, cols });
        }
        for &i in surface_indices.iter().chain(subsurface_indices.iter()) {
            if i >= rows {
                return Err(SiteError::SurfaceIndexOutOfRange { index: i, count: rows });
            }
        }
        for site in &sites {
            for &i in &site.indices {
                if i >= rows {
                    return Err(SiteError::SiteIndexOutOfRange { index: i, count: rows });
                }
            }
        }
        for site in sites.iter_mut() {
            site.reset_occupancy();
        }

        // The registry is built from the sorted signature set, so it does
        // not depend on the provider's site ordering.
        let signatures: BTreeSet<String> = sites
            .iter()
            .map(|s| s.signature(composition_effect))
            .collect();
        let label_registry: BTreeMap<String, u32> = signatures
            .into_iter()
            .zip(1u32..)
            .collect();

        Ok(Self {
            sites,
            surface_indices,
            subsurface_indices,
            adjacency,
            allow_6fold,
            composition_effect,
            label_registry,
        })
    }

    /// Number of sites
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// The pristine site list
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// A fresh occupancy snapshot (pristine clone of the site list)
    pub fn snapshot(&self) -> Vec<Site> {
        self.sites.clone()
    }

    /// Surface-exposed substrate atom indices
    pub fn surface_indices(&self) -> &[usize] {
        &self.surface_indices
    }

    /// Subsurface substrate atom indices
    pub fn subsurface_indices(&self) -> &[usize] {
        &self.subsurface_indices
    }

    /// Number of substrate atoms covered by the adjacency matrix
    pub fn substrate_count(&self) -> usize {
        self.adjacency.nrows()
    }

    /// All substrate atom indices
    pub fn substrate_indices(&self) -> Vec<usize> {
        (0..self.substrate_count()).collect()
    }

    /// The substrate adjacency matrix
    pub fn adjacency(&self) -> &Array2<u8> {
        &self.adjacency
    }

    /// Whether adsorption into 6-fold subsurface sites is allowed
    pub fn allow_6fold(&self) -> bool {
        self.allow_6fold
    }

    /// Whether composition participates in label signatures
    pub fn composition_effect(&self) -> bool {
        self.composition_effect
    }

    /// The signature -> numeric label registry
    pub fn label_registry(&self) -> &BTreeMap<String, u32> {
        &self.label_registry
    }

    /// Numeric label of a site
    pub fn site_label(&self, site: &Site) -> Option<u32> {
        self.label_registry
            .get(&site.signature(self.composition_effect))
            .copied()
    }

    /// Site-site adjacency from shared substrate atoms
    ///
    /// Two sites are adjacent when their defining index tuples overlap.
    /// When 6-fold subsurface sites are enabled, a pair involving one is
    /// adjacent only on a full three-atom overlap.
    pub fn site_adjacency(&self) -> Array2<u8> {
        let n = self.sites.len();
        let mut matrix = Array2::zeros((n, n));
        for i in 0..n {
            for j in (i + 1)..n {
                let si = &self.sites[i];
                let sj = &self.sites[j];
                let overlap = si
                    .indices
                    .iter()
                    .filter(|x| sj.indices.contains(x))
                    .count();
                if overlap == 0 {
                    continue;
                }
                let connected = if self.allow_6fold
                    && (si.kind.is_subsurface() || sj.kind.is_subsurface())
                {
                    overlap == 3
                } else {
                    true
                };
                if connected {
                    matrix[(i, j)] = 1;
                    matrix[(j, i)] = 1;
                }
            }
        }
        matrix
    }

    /// Site indices within `shells` adjacency shells of each site
    ///
    /// Computed by breadth-first search over the site adjacency; every list
    /// contains the site itself (shell zero) and is sorted ascending.
    pub fn neighbor_site_list(&self, shells: usize) -> Vec<Vec<usize>> {
        let adjacency = self.site_adjacency();
        let n = self.sites.len();
        let mut result = Vec::with_capacity(n);
        for start in 0..n {
            let mut depth = vec![usize::MAX; n];
            let mut queue = VecDeque::new();
            depth[start] = 0;
            queue.push_back(start);
            while let Some(current) = queue.pop_front() {
                if depth[current] == shells {
                    continue;
                }
                for next in 0..n {
                    if adjacency[(current, next)] == 1 && depth[next] == usize::MAX {
                        depth[next] = depth[current] + 1;
                        queue.push_back(next);
                    }
                }
            }
            let mut reachable: Vec<usize> =
                (0..n).filter(|&i| depth[i] != usize::MAX).collect();
            reachable.sort_unstable();
            result.push(reachable);
        }
        result
    }
}
