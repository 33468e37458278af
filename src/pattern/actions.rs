/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Adsorbate placement and removal actions
//!
//! Placement instantiates a species template on a site: monodentate
//! species stand along the site normal, multidentate species lie toward a
//! chosen orientation direction. Removal deletes the whole molecule
//! recorded on the site.

use crate::atoms::{Atom, AtomicStructure, Vector3D};
use crate::sites::Site;
use crate::species::require_template;

use super::errors::{PatternError, Result};

/// Adds an adsorbate species to a site
///
/// # Arguments
///
/// * `structure` - Structure to extend; new atoms are appended at the end
/// * `species` - Registered species name
/// * `site` - Target site
/// * `height` - Height of the bonding atom above the site (in Å)
/// * `orientation` - Lateral direction for multidentate placement; `None`
///   keeps the template azimuth
///
/// # Returns
///
/// The number of atoms added.
pub fn add_adsorbate_to_site(
    structure: &mut AtomicStructure,
    species: &str,
    site: &Site,
    height: f64,
    orientation: Option<Vector3D>,
) -> Result<usize> {
    let template = require_template(species)?;

    let normal = if site.normal.is_finite() && site.normal.length() > 1e-6 {
        site.normal.normalize()
    } else {
        Vector3D::unit_z()
    };
    let base = site.position + normal * height;

    // Local frame: z along the normal, x toward the orientation target
    // when one is given.
    let (x_axis, y_axis) = match orientation {
        Some(direction) => {
            let lateral = direction - normal * direction.dot(&normal);
            if lateral.length() > 1e-6 {
                let x = lateral.normalize();
                (x, normal.cross(&x))
            } else {
                default_frame(&normal)
            }
        }
        None => default_frame(&normal),
    };

    for (symbol, offset) in &template {
        let position =
            base + x_axis * offset.x + y_axis * offset.y + normal * offset.z;
        structure.add_atom(Atom::new(symbol, position));
    }
    Ok(template.len())
}

/// In-plane axes completing the normal to a right-handed frame
fn default_frame(normal: &Vector3D) -> (Vector3D, Vector3D) {
    let trial = if normal.x.abs() < 0.9 {
        Vector3D::new(1.0, 0.0, 0.0)
    } else {
        Vector3D::new(0.0, 1.0, 0.0)
    };
    let x = (trial - *normal * trial.dot(normal)).normalize();
    (x, normal.cross(&x))
}

/// Removes the adsorbate molecule occupying a site
///
/// # Returns
///
/// The number of atoms removed.
pub fn remove_adsorbate_from_site(
    structure: &mut AtomicStructure,
    site: &Site,
) -> Result<usize> {
    let indices = site
        .adsorbate_indices
        .as_ref()
        .filter(|_| site.occupied)
        .ok_or(PatternError::SiteNotOccupied)?;
    structure.remove_atoms(indices);
    Ok(indices.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::Cell;
    use crate::sites::SiteKind;
    use approx::assert_relative_eq;

    fn bare_slab() -> AtomicStructure {
        let cell = Cell::orthorhombic(5.6, 5.6, 20.0, [true, true, false]).unwrap();
        let mut s = AtomicStructure::new(cell);
        s.add_atom(Atom::new("Pt", Vector3D::new(0.0, 0.0, 10.0)));
        s
    }

    fn ontop_site() -> Site {
        Site::new(
            SiteKind::Ontop,
            "fcc111",
            vec![0],
            Vector3D::new(0.0, 0.0, 10.0),
            Vector3D::unit_z(),
        )
    }

    #[test]
    fn test_vertical_placement() {
        let mut structure = bare_slab();
        let n = add_adsorbate_to_site(&mut structure, "CO", &ontop_site(), 1.7, None).unwrap();
        assert_eq!(n, 2);
        assert_eq!(structure.atom_count(), 3);

        let c = structure.atom(1).unwrap();
        assert_eq!(c.symbol(), "C");
        assert_relative_eq!(c.position().z, 11.7, epsilon = 1e-10);
        let o = structure.atom(2).unwrap();
        assert_eq!(o.symbol(), "O");
        assert_relative_eq!(o.position().z, 12.85, epsilon = 1e-10);
    }

    #[test]
    fn test_lateral_placement_follows_orientation() {
        let mut structure = bare_slab();
        let orientation = Vector3D::new(0.0, 1.0, 0.0);
        add_adsorbate_to_site(&mut structure, "O2", &ontop_site(), 1.7, Some(orientation))
            .unwrap();
        let second = structure.atom(2).unwrap();
        // The O-O axis points along +y
        assert_relative_eq!(second.position().y, 1.21, epsilon = 1e-10);
        assert_relative_eq!(second.position().x, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_remove_requires_occupied_site() {
        let mut structure = bare_slab();
        let site = ontop_site();
        assert!(remove_adsorbate_from_site(&mut structure, &site).is_err());
    }

    #[test]
    fn test_remove_deletes_molecule() {
        let mut structure = bare_slab();
        add_adsorbate_to_site(&mut structure, "CO", &ontop_site(), 1.7, None).unwrap();
        let mut site = ontop_site();
        site.occupied = true;
        site.adsorbate_indices = Some(vec![1, 2]);
        let n = remove_adsorbate_from_site(&mut structure, &site).unwrap();
        assert_eq!(n, 2);
        assert_eq!(structure.atom_count(), 1);
    }
}
