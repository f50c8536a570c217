//! Monte Carlo core for a scintillating-fiber electromagnetic calorimeter.
//!
//! This crate models a layered optical detector (a scintillating-fiber
//! core/cladding embedded in a tungsten absorber tank, followed by a
//! photodetector slab), assigns each material wavelength dependent optical
//! properties and filters the per-step callbacks of an external transport
//! engine into energy-deposit and photon-arrival records.
//!
//! The detector model ([`detector::DetectorModel`]) is built once at
//! initialization and shared read-only between all transport worker threads;
//! each worker owns a private [`session::TransportSession`] whose record sink
//! is merged at end of run.
#![allow(clippy::module_name_repetitions)]

pub mod console;
pub mod detector;
pub mod error;
pub mod geometry;
pub mod material;
pub mod optical_table;
pub mod physics;
pub mod records;
pub mod session;
pub mod stepping;
pub mod surface;
pub mod utils;

pub use detector::{DetectorConfig, DetectorModel};
pub use session::TransportSession;
pub use stepping::{FilterConfig, Step, StepFilter, TrackStatus};
