#![warn(missing_docs)]
//! Module for handling the detector geometry
//!
//! [`shape`] defines the primitive and composite solids, [`graph`] the nested
//! volume hierarchy built on top of them.
pub mod graph;
pub mod shape;

pub use graph::{GeometryGraph, Volume, VolumeId, VolumeRole};
pub use shape::{Cutout, Shape, Solid};
