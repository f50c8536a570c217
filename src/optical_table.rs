#![warn(missing_docs)]
//! Module for handling wavelength dependent optical properties of a material
//!
//! An [`OpticalPropertyTable`] maps photon energy to refractive index, absorption
//! length and reflectivity. All properties of one table share a single, strictly
//! increasing energy axis. Lookups linearly interpolate between bracketing
//! samples and clamp at the axis ends.
use crate::error::{EmcResult, EmcalError};
use itertools::Itertools;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uom::si::f64::{Energy, Length};
use uom::si::{energy::electronvolt, length::meter};

/// The property kinds an [`OpticalPropertyTable`] can hold.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
pub enum PropertyKind {
    /// refractive index (dimensionless)
    #[strum(serialize = "RINDEX")]
    RefractiveIndex,
    /// bulk absorption length (stored in meters)
    #[strum(serialize = "ABSLENGTH")]
    AbsorptionLength,
    /// boundary reflectivity (dimensionless, 0.0..=1.0)
    #[strum(serialize = "REFLECTIVITY")]
    Reflectivity,
}

/// Structure for handling the optical properties of a single material.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpticalPropertyTable {
    energies: Vec<f64>, // photon energies in electronvolts
    properties: BTreeMap<PropertyKind, Vec<f64>>,
}

impl OpticalPropertyTable {
    /// Create a new (empty) [`OpticalPropertyTable`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Add a property to this table.
    ///
    /// Values for [`PropertyKind::AbsorptionLength`] must be given in meters, all
    /// other kinds are dimensionless. The first property added fixes the energy
    /// axis of the table; all further properties must be sampled on exactly the
    /// same axis.
    ///
    /// # Errors
    ///
    /// This function will return an [`EmcalError::OpticalTable`] if
    ///   - the energy axis and the value array differ in length
    ///   - the energy axis is empty, not finite or not strictly increasing
    ///   - the energy axis does not match the axis of a previously added property
    ///   - a value is not finite
    ///   - the property kind was already added before
    pub fn add_property(
        &mut self,
        kind: PropertyKind,
        energies: &[Energy],
        values: &[f64],
    ) -> EmcResult<()> {
        if energies.len() != values.len() {
            return Err(EmcalError::OpticalTable(format!(
                "{kind}: energy axis has {} entries but value array has {}",
                energies.len(),
                values.len()
            )));
        }
        if energies.is_empty() {
            return Err(EmcalError::OpticalTable(format!(
                "{kind}: energy axis must not be empty"
            )));
        }
        let axis: Vec<f64> = energies.iter().map(|e| e.get::<electronvolt>()).collect();
        if axis.iter().any(|e| !e.is_finite() || *e <= 0.0) {
            return Err(EmcalError::OpticalTable(format!(
                "{kind}: energy axis entries must be finite and positive"
            )));
        }
        if axis.iter().tuple_windows().any(|(lo, hi)| lo >= hi) {
            return Err(EmcalError::OpticalTable(format!(
                "{kind}: energy axis must be strictly increasing"
            )));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(EmcalError::OpticalTable(format!(
                "{kind}: property values must be finite"
            )));
        }
        if !self.properties.is_empty() && self.energies != axis {
            return Err(EmcalError::OpticalTable(format!(
                "{kind}: energy axis differs from the axis already defined for this table"
            )));
        }
        if self.properties.contains_key(&kind) {
            return Err(EmcalError::OpticalTable(format!(
                "{kind}: property was already added"
            )));
        }
        self.energies = axis;
        self.properties.insert(kind, values.to_vec());
        Ok(())
    }
    /// Return the value of the given property at the given photon energy.
    ///
    /// The value is linearly interpolated between the bracketing energy samples.
    /// Energies below the first or above the last sample return the respective
    /// boundary sample (clamping). An energy exactly on a sample returns that
    /// sample exactly. `None` is returned if the property kind is not present.
    #[must_use]
    pub fn lookup(&self, kind: PropertyKind, energy: Energy) -> Option<f64> {
        let values = self.properties.get(&kind)?;
        let e = energy.get::<electronvolt>();
        let first = *self.energies.first()?;
        let last = *self.energies.last()?;
        if e <= first {
            return values.first().copied();
        }
        if e >= last {
            return values.last().copied();
        }
        #[allow(clippy::float_cmp)]
        if let Some(idx) = self.energies.iter().position(|sample| *sample == e) {
            return values.get(idx).copied();
        }
        let idx = self.energies.iter().position(|sample| *sample > e)?;
        let (e_lo, e_hi) = (self.energies[idx - 1], self.energies[idx]);
        let (v_lo, v_hi) = (values[idx - 1], values[idx]);
        Some((e - e_lo) / (e_hi - e_lo) * (v_hi - v_lo) + v_lo)
    }
    /// Return the refractive index at the given photon energy.
    #[must_use]
    pub fn refractive_index(&self, energy: Energy) -> Option<f64> {
        self.lookup(PropertyKind::RefractiveIndex, energy)
    }
    /// Return the bulk absorption length at the given photon energy.
    #[must_use]
    pub fn absorption_length(&self, energy: Energy) -> Option<Length> {
        self.lookup(PropertyKind::AbsorptionLength, energy)
            .map(Length::new::<meter>)
    }
    /// Return the boundary reflectivity at the given photon energy.
    #[must_use]
    pub fn reflectivity(&self, energy: Energy) -> Option<f64> {
        self.lookup(PropertyKind::Reflectivity, energy)
    }
    /// Return `true` if no property was added so far.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
    /// Return the shared energy axis of this table.
    #[must_use]
    pub fn energy_axis(&self) -> Vec<Energy> {
        self.energies
            .iter()
            .map(|e| Energy::new::<electronvolt>(*e))
            .collect()
    }
    /// Log all properties of this table (the equivalent of a table dump on a
    /// run manager console).
    pub fn dump(&self, material_name: &str) {
        info!("optical property table of {material_name}");
        info!("  energy axis (eV): {:?}", self.energies);
        for (kind, values) in &self.properties {
            info!("  {kind}: {values:?}");
        }
    }
}
