#![warn(missing_docs)]
//! Construction of the fiber calorimeter detector model
//!
//! [`DetectorModel::build`] assembles the full setup: a vacuum world, the
//! tungsten absorber tank with its fiber channels carved out, the
//! polystyrene/PMMA fibers placed concentrically inside the channels and the
//! pyrex photodetector slab immediately downstream of the tank's far face.
//! The model is built once at initialization and is read-only during
//! transport.
use crate::error::{EmcResult, EmcalError};
use crate::geometry::{GeometryGraph, Shape, Solid, Volume, VolumeRole};
use crate::material::{self, Material};
use crate::surface::{ReflectionModel, SurfaceDescriptor, SurfaceFinish, SurfaceStore, SurfaceType};
use crate::{centimeter, meter, millimeter};
use log::{info, warn};
use nalgebra::{vector, Point3};
use serde::Serialize;
use std::collections::BTreeMap;
use uom::si::f64::Length;

/// Configuration knobs of the detector construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DetectorConfig {
    /// number of scintillating fibers placed across the tank width
    pub fiber_count: usize,
    /// fail construction if any unintended volume overlap is detected;
    /// otherwise offending pairs are only logged
    pub check_overlaps: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            fiber_count: 1,
            check_overlaps: true,
        }
    }
}

/// The immutable detector model: geometry, materials and optical surfaces.
#[derive(Debug, Clone, Serialize)]
pub struct DetectorModel {
    config: DetectorConfig,
    geometry: GeometryGraph,
    materials: BTreeMap<String, Material>,
    surfaces: SurfaceStore,
}

impl DetectorModel {
    /// Build the detector model.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the fiber count is zero or the fibers do not fit into the tank width
    ///   - a material or optical table definition is invalid
    ///   - `check_overlaps` is set and an unintended volume overlap is found
    pub fn build(config: &DetectorConfig) -> EmcResult<Self> {
        if config.fiber_count == 0 {
            return Err(EmcalError::Configuration(
                "fiber count must be at least 1".into(),
            ));
        }
        let tank_half_xy = millimeter!(1.47);
        let tank_half_z = centimeter!(12.6);
        let tank_position = millimeter!(0.0, 0.0, 130.0);
        let fiber_radius = millimeter!(0.47 / 2.0);
        let core_radius = fiber_radius * 0.98;
        let detector_half_z = millimeter!(1.0);

        #[allow(clippy::cast_precision_loss)]
        let fiber_spacing = tank_half_xy * (2.0 / config.fiber_count as f64);
        if fiber_spacing < fiber_radius * 2.0 {
            return Err(EmcalError::Configuration(format!(
                "{} fibers do not fit into the tank width",
                config.fiber_count
            )));
        }
        let fiber_x_positions: Vec<Length> = (0..config.fiber_count)
            .map(|k| {
                #[allow(clippy::cast_precision_loss)]
                let offset = fiber_spacing * (k as f64 + 0.5);
                offset - tank_half_xy
            })
            .collect();

        let mut geometry = GeometryGraph::new();
        let world_solid = Solid::new(Shape::Box {
            half_size: vector![meter!(1.2), meter!(1.2), meter!(1.2)],
        })?;
        let world = geometry.add_volume(
            Volume::new(
                "World",
                VolumeRole::World,
                world_solid,
                millimeter!(0.0, 0.0, 0.0),
                "Galactic",
            ),
            None,
        )?;

        // the tank with one carved channel per fiber
        let mut tank_solid = Solid::new(Shape::Box {
            half_size: vector![tank_half_xy, tank_half_xy, tank_half_z],
        })?;
        for x in &fiber_x_positions {
            tank_solid.subtract(
                Shape::Tube {
                    inner_radius: millimeter!(0.0),
                    outer_radius: fiber_radius,
                    half_length: tank_half_z + millimeter!(1.0),
                },
                vector![*x, millimeter!(0.0), millimeter!(0.0)],
            )?;
        }
        geometry.add_volume(
            Volume::new(
                "Tank",
                VolumeRole::Absorber,
                tank_solid,
                tank_position,
                "Tungsten",
            ),
            Some(world),
        )?;

        let mut surfaces = SurfaceStore::new();
        for (k, x) in fiber_x_positions.iter().enumerate() {
            let (core_name, cladding_name) = if config.fiber_count == 1 {
                ("FiberCore".to_string(), "FiberCladding".to_string())
            } else {
                (format!("FiberCore_{k}"), format!("FiberCladding_{k}"))
            };
            let fiber_position = Point3::new(*x, millimeter!(0.0), tank_position.z);
            let core_solid = Solid::new(Shape::Tube {
                inner_radius: millimeter!(0.0),
                outer_radius: core_radius,
                half_length: tank_half_z,
            })?;
            geometry.add_volume(
                Volume::new(
                    &core_name,
                    VolumeRole::FiberCore,
                    core_solid,
                    fiber_position,
                    "Polystyrene",
                ),
                Some(world),
            )?;
            let cladding_solid = Solid::new(Shape::Tube {
                inner_radius: core_radius,
                outer_radius: fiber_radius,
                half_length: tank_half_z,
            })?;
            geometry.add_volume(
                Volume::new(
                    &cladding_name,
                    VolumeRole::FiberCladding,
                    cladding_solid,
                    fiber_position,
                    "PMMA",
                ),
                Some(world),
            )?;
            surfaces.add_skin(
                &core_name,
                SurfaceDescriptor::new(
                    &format!("{core_name}OpticalSurface"),
                    SurfaceType::DielectricDielectric,
                    SurfaceFinish::Polished,
                    ReflectionModel::Unified,
                ),
            );
            surfaces.add_skin(
                &cladding_name,
                SurfaceDescriptor::new(
                    &format!("{cladding_name}OpticalSurface"),
                    SurfaceType::DielectricDielectric,
                    SurfaceFinish::Polished,
                    ReflectionModel::Unified,
                ),
            );
        }

        // detector slab immediately downstream of the tank's far face
        let detector_solid = Solid::new(Shape::Box {
            half_size: vector![tank_half_xy, tank_half_xy, detector_half_z],
        })?;
        let detector_position = Point3::new(
            millimeter!(0.0),
            millimeter!(0.0),
            tank_position.z + tank_half_z + detector_half_z,
        );
        geometry.add_volume(
            Volume::new(
                "Detector",
                VolumeRole::Detector,
                detector_solid,
                detector_position,
                "PyrexGlass",
            ),
            Some(world),
        )?;
        surfaces.add_skin(
            "Detector",
            SurfaceDescriptor::new(
                "DetectorSurface",
                SurfaceType::DielectricMetal,
                SurfaceFinish::Polished,
                ReflectionModel::Unified,
            ),
        );

        let mut materials = BTreeMap::new();
        for material in [
            material::vacuum()?,
            material::tungsten()?,
            material::polystyrene()?,
            material::pmma()?,
            material::pyrex()?,
        ] {
            materials.insert(material.name().to_string(), material);
        }

        let offending = geometry.overlap_check();
        if !offending.is_empty() {
            if config.check_overlaps {
                return Err(EmcalError::Geometry(format!(
                    "unintended volume overlaps: {offending:?}"
                )));
            }
            for (a, b) in &offending {
                warn!("volumes <{a}> and <{b}> overlap");
            }
        }
        info!(
            "detector model built: {} volumes, {} fibers, {} optical surfaces",
            geometry.volume_count(),
            config.fiber_count,
            surfaces.len()
        );
        Ok(Self {
            config: *config,
            geometry,
            materials,
            surfaces,
        })
    }
    /// Return the construction configuration of this model.
    #[must_use]
    pub const fn config(&self) -> &DetectorConfig {
        &self.config
    }
    /// Return the volume hierarchy of this model.
    #[must_use]
    pub const fn geometry(&self) -> &GeometryGraph {
        &self.geometry
    }
    /// Return the optical surface attachments of this model.
    #[must_use]
    pub const fn surfaces(&self) -> &SurfaceStore {
        &self.surfaces
    }
    /// Return the material with the given name.
    #[must_use]
    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }
    /// Return the material assigned to the volume with the given name.
    #[must_use]
    pub fn material_of_volume(&self, volume_name: &str) -> Option<&Material> {
        let id = self.geometry.resolve(volume_name)?;
        self.materials.get(self.geometry.volume(id)?.material())
    }
    /// Log the optical property tables of all materials.
    pub fn dump_optical_tables(&self) {
        for (name, material) in &self.materials {
            if !material.optical_table().is_empty() {
                material.optical_table().dump(name);
            }
        }
    }
    /// Serialize this model to a YAML string.
    ///
    /// # Errors
    ///
    /// This function will return an error if serialization fails.
    pub fn to_yaml(&self) -> EmcResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| EmcalError::Other(format!("model serialization failed: {e}")))
    }
}
