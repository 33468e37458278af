/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Template geometries for adsorbate placement
//!
//! Templates are defined in a local frame with the bonding atom at the
//! origin. Monodentate species extend along +z (the surface normal after
//! placement); multidentate species extend along +x (the direction of the
//! orientation site after placement). Atom order matches the species
//! nomenclature, so the symbol sequence of a placed molecule resolves back
//! to its registered name.

use super::errors::{Result, SpeciesError};
use crate::atoms::Vector3D;

/// One template atom: element symbol and offset from the bonding atom
pub type TemplateAtom = (&'static str, Vector3D);

fn v(x: f64, y: f64, z: f64) -> Vector3D {
    Vector3D::new(x, y, z)
}

/// Returns the template geometry for a species, if one is defined
pub fn adsorbate_template(name: &str) -> Option<Vec<TemplateAtom>> {
    let template: Vec<TemplateAtom> = match name {
        // Single atoms
        "H" => vec![("H", v(0.0, 0.0, 0.0))],
        "C" => vec![("C", v(0.0, 0.0, 0.0))],
        "N" => vec![("N", v(0.0, 0.0, 0.0))],
        "O" => vec![("O", v(0.0, 0.0, 0.0))],
        "S" => vec![("S", v(0.0, 0.0, 0.0))],
        // Vertical diatomics
        "CH" => vec![("C", v(0.0, 0.0, 0.0)), ("H", v(0.0, 0.0, 1.09))],
        "NH" => vec![("N", v(0.0, 0.0, 0.0)), ("H", v(0.0, 0.0, 1.02))],
        "OH" => vec![("O", v(0.0, 0.0, 0.0)), ("H", v(0.0, 0.0, 0.97))],
        "SH" => vec![("S", v(0.0, 0.0, 0.0)), ("H", v(0.0, 0.0, 1.34))],
        "CO" => vec![("C", v(0.0, 0.0, 0.0)), ("O", v(0.0, 0.0, 1.15))],
        "NO" => vec![("N", v(0.0, 0.0, 0.0)), ("O", v(0.0, 0.0, 1.16))],
        "CN" => vec![("C", v(0.0, 0.0, 0.0)), ("N", v(0.0, 0.0, 1.16))],
        "CS" => vec![("C", v(0.0, 0.0, 0.0)), ("S", v(0.0, 0.0, 1.54))],
        "NS" => vec![("N", v(0.0, 0.0, 0.0)), ("S", v(0.0, 0.0, 1.50))],
        // Vertical polyatomics, hydrogens tilted away from the surface
        "CH2" => vec![
            ("C", v(0.0, 0.0, 0.0)),
            ("H", v(0.90, 0.0, 0.62)),
            ("H", v(-0.90, 0.0, 0.62)),
        ],
        "NH2" => vec![
            ("N", v(0.0, 0.0, 0.0)),
            ("H", v(0.81, 0.0, 0.62)),
            ("H", v(-0.81, 0.0, 0.62)),
        ],
        "OH2" => vec![
            ("O", v(0.0, 0.0, 0.0)),
            ("H", v(0.76, 0.0, 0.59)),
            ("H", v(-0.76, 0.0, 0.59)),
        ],
        "SH2" => vec![
            ("S", v(0.0, 0.0, 0.0)),
            ("H", v(0.96, 0.0, 0.93)),
            ("H", v(-0.96, 0.0, 0.93)),
        ],
        "COH" => vec![
            ("C", v(0.0, 0.0, 0.0)),
            ("O", v(0.0, 0.0, 1.33)),
            ("H", v(0.82, 0.0, 1.85)),
        ],
        "NOH" => vec![
            ("N", v(0.0, 0.0, 0.0)),
            ("O", v(0.0, 0.0, 1.30)),
            ("H", v(0.82, 0.0, 1.82)),
        ],
        "CH3" => vec![
            ("C", v(0.0, 0.0, 0.0)),
            ("H", v(1.02, 0.0, 0.37)),
            ("H", v(-0.51, 0.89, 0.37)),
            ("H", v(-0.51, -0.89, 0.37)),
        ],
        "NH3" => vec![
            ("N", v(0.0, 0.0, 0.0)),
            ("H", v(0.95, 0.0, 0.38)),
            ("H", v(-0.47, 0.82, 0.38)),
            ("H", v(-0.47, -0.82, 0.38)),
        ],
        "OCH" => vec![
            ("O", v(0.0, 0.0, 0.0)),
            ("C", v(0.0, 0.0, 1.31)),
            ("H", v(0.94, 0.0, 1.87)),
        ],
        "OCH2" => vec![
            ("O", v(0.0, 0.0, 0.0)),
            ("C", v(0.0, 0.0, 1.31)),
            ("H", v(0.94, 0.0, 1.87)),
            ("H", v(-0.94, 0.0, 1.87)),
        ],
        "OCH3" => vec![
            ("O", v(0.0, 0.0, 0.0)),
            ("C", v(0.0, 0.0, 1.43)),
            ("H", v(1.02, 0.0, 1.80)),
            ("H", v(-0.51, 0.89, 1.80)),
            ("H", v(-0.51, -0.89, 1.80)),
        ],
        // Lateral multidentate species
        "H2" => vec![("H", v(0.0, 0.0, 0.0)), ("H", v(0.75, 0.0, 0.0))],
        "C2" => vec![("C", v(0.0, 0.0, 0.0)), ("C", v(1.20, 0.0, 0.0))],
        "N2" => vec![("N", v(0.0, 0.0, 0.0)), ("N", v(1.10, 0.0, 0.0))],
        "O2" => vec![("O", v(0.0, 0.0, 0.0)), ("O", v(1.21, 0.0, 0.0))],
        "S2" => vec![("S", v(0.0, 0.0, 0.0)), ("S", v(1.89, 0.0, 0.0))],
        "OS" => vec![("O", v(0.0, 0.0, 0.0)), ("S", v(1.49, 0.0, 0.0))],
        "CO2" => vec![
            ("C", v(0.0, 0.0, 0.0)),
            ("O", v(1.16, 0.0, 0.0)),
            ("O", v(-1.16, 0.0, 0.0)),
        ],
        "CHO" => vec![
            ("C", v(0.0, 0.0, 0.0)),
            ("H", v(-0.55, 0.0, 0.95)),
            ("O", v(1.20, 0.0, 0.15)),
        ],
        "CHOH" => vec![
            ("C", v(0.0, 0.0, 0.0)),
            ("H", v(-0.55, 0.0, 0.95)),
            ("O", v(1.35, 0.0, 0.10)),
            ("H", v(1.70, 0.0, 1.00)),
        ],
        "OHOH" => vec![
            ("O", v(0.0, 0.0, 0.0)),
            ("H", v(-0.30, 0.0, 0.92)),
            ("O", v(1.45, 0.0, 0.0)),
            ("H", v(1.75, 0.0, 0.92)),
        ],
        "CH3OH" => vec![
            ("C", v(0.0, 0.0, 0.0)),
            ("H", v(-0.51, 0.89, 0.37)),
            ("H", v(-0.51, -0.89, 0.37)),
            ("H", v(-0.36, 0.0, 1.03)),
            ("O", v(1.43, 0.0, 0.0)),
            ("H", v(1.74, 0.0, 0.92)),
        ],
        _ => return None,
    };
    Some(template)
}

/// Whether a placement template exists for the species
pub fn has_template(name: &str) -> bool {
    adsorbate_template(name).is_some()
}

/// Returns the template or a missing-template error
pub fn require_template(name: &str) -> Result<Vec<TemplateAtom>> {
    adsorbate_template(name).ok_or_else(|| SpeciesError::MissingTemplate(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::formula::parse_formula;
    use crate::species::registry::resolve_adsorbate_name;

    #[test]
    fn test_template_order_matches_nomenclature() {
        for name in ["CO", "OH", "CH3", "OH2", "CH3OH", "CHO", "H2"] {
            let template = adsorbate_template(name).unwrap();
            let symbols: Vec<String> = template.iter().map(|(s, _)| s.to_string()).collect();
            let expected = parse_formula(name).unwrap();
            assert_eq!(symbols, expected, "template order for {}", name);
        }
    }

    #[test]
    fn test_placed_template_resolves_to_its_name() {
        let template = adsorbate_template("CH3OH").unwrap();
        let symbols: Vec<String> = template.iter().map(|(s, _)| s.to_string()).collect();
        assert_eq!(resolve_adsorbate_name(&symbols), "CH3OH");
    }

    #[test]
    fn test_bonding_atom_is_at_origin() {
        for name in ["CO", "CH3", "CH3OH", "O2"] {
            let template = adsorbate_template(name).unwrap();
            assert!(template[0].1.length() < 1e-12);
        }
    }

    #[test]
    fn test_missing_template_is_an_error() {
        assert!(require_template("CHCHCHCHCHCH").is_err());
    }
}
