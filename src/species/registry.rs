/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Adsorbate species registries and default placement heights
//!
//! The adsorbate nomenclature follows the convention that the first element
//! is the bonding element (or, for multidentate species, the bonding
//! element with the smaller atomic number) and hydrogens directly follow
//! the atom they bond to. Hydrogen is never a bonding element except in H
//! and H2.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::formula::{expand_formula, sorted_symbol_key};
use crate::sites::SiteKind;

/// Elements that mark an atom as part of an adsorbate
///
/// Adsorbate elements must be different from the catalyst elements.
pub const ADSORBATE_ELEMENTS: [&str; 5] = ["S", "C", "H", "O", "N"];

/// Whether a symbol belongs to the adsorbate element alphabet
pub fn is_adsorbate_element(symbol: &str) -> bool {
    ADSORBATE_ELEMENTS.contains(&symbol)
}

/// Monodentate adsorbate species (bind vertically through one site)
pub const MONODENTATE_ADSORBATES: [&str; 25] = [
    "H", "C", "N", "O", "S",
    "CH", "NH", "OH", "SH", "CO", "NO", "CN", "CS", "NS",
    "CH2", "NH2", "OH2", "SH2", "COH", "NOH",
    "CH3", "NH3", "OCH",
    "OCH2",
    "OCH3",
];

/// Multidentate adsorbate species (lie laterally across several sites)
pub const MULTIDENTATE_ADSORBATES: [&str; 32] = [
    "H2", "C2", "N2", "O2", "S2", "OS",
    "CO2", "NO2", "N2O", "O2S", "CS2", "NS2", "CHN", "CHO", "NHO", "COS", "C3", "O3",
    "CHOH", "CH2O", "COOH", "CHOO", "OHOH",
    "CH3O", "CH2OH", "CH3S", "CH2CO",
    "CH3OH", "CHOOH", "CH3CO",
    "CH3COOH",
    "CHCHCHCHCHCH",
];

/// Expanded symbol sequence for every registered adsorbate name
static ADSORBATE_FORMULAS: Lazy<Vec<(&'static str, String)>> = Lazy::new(|| {
    MONODENTATE_ADSORBATES
        .iter()
        .chain(MULTIDENTATE_ADSORBATES.iter())
        .map(|&name| {
            let expanded = expand_formula(name).expect("registry names are valid formulas");
            (name, expanded)
        })
        .collect()
});

/// Whether a species name is in the monodentate registry
pub fn is_monodentate(name: &str) -> bool {
    MONODENTATE_ADSORBATES.contains(&name)
}

/// Whether a species name is in the multidentate registry
pub fn is_multidentate(name: &str) -> bool {
    MULTIDENTATE_ADSORBATES.contains(&name)
}

/// Whether a species name is in either adsorbate registry
pub fn is_known_species(name: &str) -> bool {
    is_monodentate(name) || is_multidentate(name)
}

/// Resolves the canonical adsorbate name for a molecule's symbol sequence
///
/// Matching proceeds in three stages: exact symbol-sequence match against
/// the registry, then an order-insensitive (multiset) match, then the raw
/// concatenated sequence when no registry entry fits.
pub fn resolve_adsorbate_name<S: AsRef<str>>(symbols: &[S]) -> String {
    let joined: String = symbols.iter().map(|s| s.as_ref()).collect();
    for (name, expanded) in ADSORBATE_FORMULAS.iter() {
        if *expanded == joined {
            return (*name).to_string();
        }
    }
    let key = sorted_symbol_key(symbols);
    for (name, expanded) in ADSORBATE_FORMULAS.iter() {
        let expanded_syms: Vec<String> = expanded.chars().map(|c| c.to_string()).collect();
        if sorted_symbol_key(&expanded_syms) == key {
            return (*name).to_string();
        }
    }
    joined
}

/// Default adsorbate height above each site kind (in Å)
pub static SITE_HEIGHTS: Lazy<HashMap<SiteKind, f64>> = Lazy::new(|| {
    HashMap::from([
        (SiteKind::Ontop, 1.7),
        (SiteKind::Bridge, 1.7),
        (SiteKind::ShortBridge, 1.7),
        (SiteKind::LongBridge, 1.7),
        (SiteKind::Fcc, 1.6),
        (SiteKind::Hcp, 1.6),
        (SiteKind::ThreeFold, 1.6),
        (SiteKind::FourFold, 1.6),
        (SiteKind::FiveFold, 1.6),
        (SiteKind::SixFold, 0.0),
    ])
});

/// Default site heights, optionally overlaid with user entries
pub fn site_heights(overrides: Option<&HashMap<SiteKind, f64>>) -> HashMap<SiteKind, f64> {
    let mut heights = SITE_HEIGHTS.clone();
    if let Some(overrides) = overrides {
        for (&kind, &height) in overrides {
            heights.insert(kind, height);
        }
    }
    heights
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_membership() {
        assert!(is_monodentate("CO"));
        assert!(is_multidentate("CH3OH"));
        assert!(!is_known_species("XYZ"));
    }

    #[test]
    fn test_resolve_exact_match() {
        assert_eq!(resolve_adsorbate_name(&["C", "O"]), "CO");
        assert_eq!(resolve_adsorbate_name(&["O", "H", "H"]), "OH2");
        assert_eq!(resolve_adsorbate_name(&["C", "H", "H", "H", "O", "H"]), "CH3OH");
    }

    #[test]
    fn test_resolve_multiset_match() {
        // O C is not a registered sequence, but its multiset matches CO
        assert_eq!(resolve_adsorbate_name(&["O", "C"]), "CO");
    }

    #[test]
    fn test_resolve_falls_back_to_raw() {
        assert_eq!(resolve_adsorbate_name(&["N", "N", "N"]), "NNN");
    }

    #[test]
    fn test_site_heights_override() {
        let overrides = HashMap::from([(SiteKind::Fcc, 1.3)]);
        let heights = site_heights(Some(&overrides));
        assert_eq!(heights[&SiteKind::Fcc], 1.3);
        assert_eq!(heights[&SiteKind::Ontop], 1.7);
        assert_eq!(heights[&SiteKind::SixFold], 0.0);
    }
}
