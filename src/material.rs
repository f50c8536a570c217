#![warn(missing_docs)]
//! Module for handling detector materials
//!
//! A [`Material`] combines a density, an elemental composition by mass fraction
//! and an [`OpticalPropertyTable`]. The catalog functions at the bottom of this
//! module define the concrete materials of the fiber calorimeter: a vacuum
//! world, a tungsten absorber tank, the polystyrene fiber core, the PMMA fiber
//! cladding and the pyrex glass photodetector.
use crate::error::{EmcResult, EmcalError};
use crate::gram_per_cubic_centimeter;
use crate::optical_table::{OpticalPropertyTable, PropertyKind};
use serde::{Deserialize, Serialize};
use uom::si::energy::electronvolt;
use uom::si::f64::{Energy, MassDensity};

/// Chemical elements used by the material catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum Element {
    /// hydrogen
    H,
    /// boron
    B,
    /// carbon
    C,
    /// oxygen
    O,
    /// sodium
    Na,
    /// aluminium
    Al,
    /// silicon
    Si,
    /// potassium
    K,
    /// tungsten
    W,
}

impl Element {
    /// Return the atomic number of this element.
    #[must_use]
    pub const fn atomic_number(&self) -> u32 {
        match self {
            Self::H => 1,
            Self::B => 5,
            Self::C => 6,
            Self::O => 8,
            Self::Na => 11,
            Self::Al => 13,
            Self::Si => 14,
            Self::K => 19,
            Self::W => 74,
        }
    }
    /// Return the molar mass of this element in g/mole.
    #[must_use]
    pub const fn molar_mass(&self) -> f64 {
        match self {
            Self::H => 1.01,
            Self::B => 10.81,
            Self::C => 12.01,
            Self::O => 16.00,
            Self::Na => 22.99,
            Self::Al => 26.98,
            Self::Si => 28.09,
            Self::K => 39.10,
            Self::W => 183.84,
        }
    }
}

/// A detector material with elemental composition and optical properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    name: String,
    density: MassDensity,
    composition: Vec<(Element, f64)>, // mass fractions, summing to 1.0
    table: OpticalPropertyTable,
}

impl Material {
    /// Create a new [`Material`] without optical properties.
    ///
    /// # Errors
    ///
    /// This function will return an [`EmcalError::Material`] if
    ///   - the composition is empty
    ///   - a mass fraction is not positive or not finite
    ///   - the mass fractions do not sum to 1.0 (within 1e-3)
    ///   - the density is not positive
    pub fn new(
        name: &str,
        density: MassDensity,
        composition: &[(Element, f64)],
    ) -> EmcResult<Self> {
        if composition.is_empty() {
            return Err(EmcalError::Material(format!(
                "{name}: composition must not be empty"
            )));
        }
        if composition
            .iter()
            .any(|(_, fraction)| !fraction.is_finite() || *fraction <= 0.0)
        {
            return Err(EmcalError::Material(format!(
                "{name}: mass fractions must be positive and finite"
            )));
        }
        let sum: f64 = composition.iter().map(|(_, fraction)| fraction).sum();
        if !approx::relative_eq!(sum, 1.0, max_relative = 1e-3) {
            return Err(EmcalError::Material(format!(
                "{name}: mass fractions sum to {sum} instead of 1.0"
            )));
        }
        if density.value <= 0.0 || !density.value.is_finite() {
            return Err(EmcalError::Material(format!(
                "{name}: density must be positive and finite"
            )));
        }
        Ok(Self {
            name: name.to_string(),
            density,
            composition: composition.to_vec(),
            table: OpticalPropertyTable::new(),
        })
    }
    /// Attach an [`OpticalPropertyTable`] to this material.
    pub fn set_optical_table(&mut self, table: OpticalPropertyTable) {
        self.table = table;
    }
    /// Return the name of this material.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Return the density of this material.
    #[must_use]
    pub const fn density(&self) -> MassDensity {
        self.density
    }
    /// Return the elemental composition (mass fractions) of this material.
    #[must_use]
    pub fn composition(&self) -> &[(Element, f64)] {
        &self.composition
    }
    /// Return the optical property table of this material.
    #[must_use]
    pub const fn optical_table(&self) -> &OpticalPropertyTable {
        &self.table
    }
    /// Return the refractive index of this material at the given photon energy.
    #[must_use]
    pub fn refractive_index(&self, energy: Energy) -> Option<f64> {
        self.table.refractive_index(energy)
    }
}

/// The shared photon energy axis of all optical tables in the catalog (20
/// samples from 2.0 eV to 5.0 eV).
#[must_use]
pub fn photon_energy_axis() -> Vec<Energy> {
    [
        2.0, 2.158, 2.316, 2.474, 2.632, 2.789, 2.947, 3.105, 3.263, 3.421, 3.579, 3.737, 3.895,
        4.053, 4.211, 4.368, 4.526, 4.684, 4.842, 5.0,
    ]
    .iter()
    .map(|e| Energy::new::<electronvolt>(*e))
    .collect()
}

// Bulk absorption length of the fiber plastics in meters, sampled on the
// photon energy axis above.
const FIBER_ABSORPTION_LENGTH: [f64; 20] = [
    3.448, 4.082, 6.329, 9.174, 12.346, 13.889, 15.152, 17.241, 18.868, 20.000, 26.316, 35.714,
    45.455, 47.619, 52.632, 52.632, 55.556, 52.632, 52.632, 47.619,
];

/// The world material: an (almost) perfect vacuum.
///
/// # Errors
///
/// This function will return an error if the material definition is invalid.
pub fn vacuum() -> EmcResult<Material> {
    Material::new(
        "Galactic",
        gram_per_cubic_centimeter!(1.0e-25),
        &[(Element::H, 1.0)],
    )
}

/// The absorber tank material: tungsten.
///
/// # Errors
///
/// This function will return an error if the material definition is invalid.
pub fn tungsten() -> EmcResult<Material> {
    Material::new(
        "Tungsten",
        gram_per_cubic_centimeter!(19.3),
        &[(Element::W, 1.0)],
    )
}

/// The fiber core material: polystyrene with its optical property table.
///
/// The refractive index (1.59 to 1.6375) lies above the index of the PMMA
/// cladding over the whole energy axis, so the core/cladding boundary supports
/// total internal reflection.
///
/// # Errors
///
/// This function will return an error if the material definition or one of its
/// optical tables is invalid.
pub fn polystyrene() -> EmcResult<Material> {
    let mut material = Material::new(
        "Polystyrene",
        gram_per_cubic_centimeter!(1.05),
        &[(Element::C, 0.5), (Element::H, 0.5)],
    )?;
    let axis = photon_energy_axis();
    let mut table = OpticalPropertyTable::new();
    table.add_property(
        PropertyKind::RefractiveIndex,
        &axis,
        &[
            1.59, 1.5925, 1.595, 1.5975, 1.6, 1.6025, 1.605, 1.6075, 1.61, 1.6125, 1.615, 1.6175,
            1.62, 1.6225, 1.625, 1.6275, 1.63, 1.6325, 1.635, 1.6375,
        ],
    )?;
    table.add_property(
        PropertyKind::Reflectivity,
        &axis,
        &[
            0.02, 0.027, 0.034, 0.041, 0.048, 0.055, 0.062, 0.069, 0.076, 0.083, 0.091, 0.097,
            0.104, 0.111, 0.118, 0.125, 0.132, 0.139, 0.146, 0.153,
        ],
    )?;
    table.add_property(PropertyKind::AbsorptionLength, &axis, &FIBER_ABSORPTION_LENGTH)?;
    material.set_optical_table(table);
    Ok(material)
}

/// The fiber cladding material: PMMA with its optical property table.
///
/// # Errors
///
/// This function will return an error if the material definition or one of its
/// optical tables is invalid.
pub fn pmma() -> EmcResult<Material> {
    let mut material = Material::new(
        "PMMA",
        gram_per_cubic_centimeter!(1.190),
        &[
            (Element::C, 0.3334),
            (Element::H, 0.5333),
            (Element::O, 0.1333),
        ],
    )?;
    let axis = photon_energy_axis();
    let mut table = OpticalPropertyTable::new();
    table.add_property(
        PropertyKind::RefractiveIndex,
        &axis,
        &[
            1.49, 1.4925, 1.495, 1.4975, 1.5, 1.5025, 1.505, 1.5075, 1.51, 1.5125, 1.515, 1.5175,
            1.52, 1.5225, 1.525, 1.5275, 1.53, 1.5325, 1.535, 1.5375,
        ],
    )?;
    table.add_property(
        PropertyKind::Reflectivity,
        &axis,
        &[
            0.04, 0.047, 0.054, 0.061, 0.068, 0.075, 0.082, 0.089, 0.096, 0.103, 0.11, 0.117,
            0.124, 0.131, 0.138, 0.145, 0.152, 0.159, 0.166, 0.173,
        ],
    )?;
    table.add_property(PropertyKind::AbsorptionLength, &axis, &FIBER_ABSORPTION_LENGTH)?;
    material.set_optical_table(table);
    Ok(material)
}

/// The photodetector material: pyrex glass modeling an idealized absorbing
/// sensor (unit refractive index, zero reflectivity).
///
/// # Errors
///
/// This function will return an error if the material definition or one of its
/// optical tables is invalid.
pub fn pyrex() -> EmcResult<Material> {
    let mut material = Material::new(
        "PyrexGlass",
        gram_per_cubic_centimeter!(2.23),
        &[
            (Element::B, 0.040064),
            (Element::O, 0.539562),
            (Element::Na, 0.028191),
            (Element::Al, 0.011644),
            (Element::Si, 0.377220),
            (Element::K, 0.003321),
        ],
    )?;
    let axis = photon_energy_axis();
    let mut table = OpticalPropertyTable::new();
    table.add_property(PropertyKind::RefractiveIndex, &axis, &[1.0; 20])?;
    table.add_property(PropertyKind::Reflectivity, &axis, &[0.0; 20])?;
    material.set_optical_table(table);
    Ok(material)
}
