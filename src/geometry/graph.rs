#![warn(missing_docs)]
//! The nested volume hierarchy of the detector
//!
//! Volumes form a tree rooted at the world volume. The graph is built once at
//! initialization and is read-only during transport; worker threads share it
//! without locking.
use crate::error::{EmcResult, EmcalError};
use crate::geometry::shape::Solid;
use itertools::Itertools;
use nalgebra::Point3;
use petgraph::{prelude::DiGraph, stable_graph::NodeIndex, Direction};
use serde::{Deserialize, Serialize};
use uom::si::f64::Length;

/// Identifier of a volume within a [`GeometryGraph`].
pub type VolumeId = NodeIndex;

/// Coarse classification of a volume, used by the step filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum VolumeRole {
    /// the world volume
    World,
    /// the absorber tank
    Absorber,
    /// a scintillating fiber core
    FiberCore,
    /// a fiber cladding
    FiberCladding,
    /// the sensitive photodetector
    Detector,
}

impl VolumeRole {
    /// Return `true` if this role belongs to the fiber region (core or
    /// cladding).
    #[must_use]
    pub const fn is_fiber(&self) -> bool {
        matches!(self, Self::FiberCore | Self::FiberCladding)
    }
}

/// A geometric region of the detector with a solid, a placement and a material
/// reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    name: String,
    role: VolumeRole,
    solid: Solid,
    position: Point3<Length>, // relative to the world frame
    material: String,
}

impl Volume {
    /// Create a new [`Volume`].
    #[must_use]
    pub fn new(
        name: &str,
        role: VolumeRole,
        solid: Solid,
        position: Point3<Length>,
        material: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            role,
            solid,
            position,
            material: material.to_string(),
        }
    }
    /// Return the name of this volume.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Return the role of this volume.
    #[must_use]
    pub const fn role(&self) -> VolumeRole {
        self.role
    }
    /// Return the solid of this volume.
    #[must_use]
    pub const fn solid(&self) -> &Solid {
        &self.solid
    }
    /// Return the placement of this volume (world frame).
    #[must_use]
    pub const fn position(&self) -> &Point3<Length> {
        &self.position
    }
    /// Return the name of this volume's material.
    #[must_use]
    pub fn material(&self) -> &str {
        &self.material
    }
}

/// The nested volume hierarchy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeometryGraph {
    g: DiGraph<Volume, ()>,
}

impl GeometryGraph {
    /// Create a new (empty) [`GeometryGraph`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Add a volume to the hierarchy.
    ///
    /// The first volume added must be the world (no parent); every further
    /// volume must name an existing parent.
    ///
    /// # Errors
    ///
    /// This function will return an [`EmcalError::Geometry`] if
    ///   - a second volume without a parent is added
    ///   - the given parent does not exist
    ///   - a volume with the same name was already added
    pub fn add_volume(&mut self, volume: Volume, parent: Option<VolumeId>) -> EmcResult<VolumeId> {
        if self.resolve(volume.name()).is_some() {
            return Err(EmcalError::Geometry(format!(
                "volume name <{}> already exists",
                volume.name()
            )));
        }
        let Some(parent) = parent else {
            if self.g.node_count() != 0 {
                return Err(EmcalError::Geometry(
                    "only the first volume (the world) may be added without a parent".into(),
                ));
            }
            return Ok(self.g.add_node(volume));
        };
        if self.g.node_weight(parent).is_none() {
            return Err(EmcalError::Geometry(format!(
                "parent volume of <{}> does not exist",
                volume.name()
            )));
        }
        let id = self.g.add_node(volume);
        self.g.add_edge(parent, id, ());
        Ok(id)
    }
    /// Resolve a volume name to its [`VolumeId`]. Returns `None` for unknown
    /// names (e.g. boundary ambiguities reported by the transport engine).
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<VolumeId> {
        self.g
            .node_indices()
            .find(|id| self.g[*id].name() == name)
    }
    /// Return the volume with the given id.
    #[must_use]
    pub fn volume(&self, id: VolumeId) -> Option<&Volume> {
        self.g.node_weight(id)
    }
    /// Return the role of the volume with the given name.
    #[must_use]
    pub fn role(&self, name: &str) -> Option<VolumeRole> {
        self.resolve(name).map(|id| self.g[id].role())
    }
    /// Return the id of the world volume.
    #[must_use]
    pub fn world(&self) -> Option<VolumeId> {
        self.g
            .node_indices()
            .find(|id| self.g[*id].role() == VolumeRole::World)
    }
    /// Return the child volumes of the given volume in insertion order.
    #[must_use]
    pub fn children(&self, id: VolumeId) -> Vec<VolumeId> {
        let mut children: Vec<VolumeId> =
            self.g.neighbors_directed(id, Direction::Outgoing).collect();
        children.sort_unstable();
        children
    }
    /// Return the number of volumes.
    #[must_use]
    pub fn volume_count(&self) -> usize {
        self.g.node_count()
    }
    /// Return all volume names in insertion order.
    #[must_use]
    pub fn volume_names(&self) -> Vec<String> {
        self.g
            .node_indices()
            .map(|id| self.g[id].name().to_string())
            .collect()
    }
    /// Check all sibling pairs for unintended geometric intersection.
    ///
    /// Returns the offending name pairs; an empty vector means the hierarchy is
    /// consistent. Regions removed by a solid's cutouts do not count as
    /// intersections. This is a developer-time integrity check performed at
    /// construction, not a runtime transport path.
    #[must_use]
    pub fn overlap_check(&self) -> Vec<(String, String)> {
        let mut offending = Vec::new();
        for parent in self.g.node_indices() {
            for pair in self.children(parent).iter().combinations(2) {
                let (a, b) = (&self.g[*pair[0]], &self.g[*pair[1]]);
                if a.solid().overlaps(a.position(), b.solid(), b.position()) {
                    offending.push((a.name().to_string(), b.name().to_string()));
                }
            }
        }
        offending
    }
}
