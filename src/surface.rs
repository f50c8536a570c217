#![warn(missing_docs)]
//! Module for handling optical boundary surfaces
//!
//! A [`SurfaceDescriptor`] declares how the transport engine's boundary process
//! has to treat a photon crossing between two volumes: boundary type, finish
//! and reflection model. Descriptors are attached either to a volume skin or
//! to an explicit ordered pair of volumes and are resolved with
//! [`SurfaceStore::classify`]. The actual reflection/refraction sampling is
//! executed by the external engine, not here.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uom::si::angle::radian;
use uom::si::f64::Angle;

/// The boundary type of an optical surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum SurfaceType {
    /// boundary between two dielectric media (refract or specular reflect)
    #[strum(serialize = "dielectric_dielectric")]
    DielectricDielectric,
    /// boundary between a dielectric and a metal (any non reflected photon is absorbed)
    #[strum(serialize = "dielectric_metal")]
    DielectricMetal,
}

/// The finish of an optical surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum SurfaceFinish {
    /// perfectly smooth surface
    #[strum(serialize = "polished")]
    Polished,
}

/// The reflection model used to compute boundary probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum ReflectionModel {
    /// unified model semantics: finish and model jointly select how
    /// reflection/refraction probabilities are computed
    #[strum(serialize = "unified")]
    Unified,
}

/// A declarative description of one optical boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceDescriptor {
    name: String,
    surface_type: SurfaceType,
    finish: SurfaceFinish,
    model: ReflectionModel,
}

impl SurfaceDescriptor {
    /// Create a new [`SurfaceDescriptor`].
    #[must_use]
    pub fn new(
        name: &str,
        surface_type: SurfaceType,
        finish: SurfaceFinish,
        model: ReflectionModel,
    ) -> Self {
        Self {
            name: name.to_string(),
            surface_type,
            finish,
            model,
        }
    }
    /// Return the name of this surface.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Return the boundary type of this surface.
    #[must_use]
    pub const fn surface_type(&self) -> SurfaceType {
        self.surface_type
    }
    /// Return the finish of this surface.
    #[must_use]
    pub const fn finish(&self) -> SurfaceFinish {
        self.finish
    }
    /// Return the reflection model of this surface.
    #[must_use]
    pub const fn model(&self) -> ReflectionModel {
        self.model
    }
}

/// Store of all surface attachments of a detector model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceStore {
    skins: BTreeMap<String, SurfaceDescriptor>,
    borders: BTreeMap<(String, String), SurfaceDescriptor>,
}

impl SurfaceStore {
    /// Create a new (empty) [`SurfaceStore`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Attach a descriptor to a volume skin. The descriptor applies whenever a
    /// photon step touches the boundary of the given volume.
    pub fn add_skin(&mut self, volume: &str, descriptor: SurfaceDescriptor) {
        self.skins.insert(volume.to_string(), descriptor);
    }
    /// Attach a descriptor to an explicit ordered pair of volumes.
    pub fn add_border(&mut self, pre_volume: &str, post_volume: &str, descriptor: SurfaceDescriptor) {
        self.borders
            .insert((pre_volume.to_string(), post_volume.to_string()), descriptor);
    }
    /// Resolve the surface descriptor for a photon crossing from `pre_volume`
    /// into `post_volume`.
    ///
    /// A border surface registered for the exact ordered pair takes precedence,
    /// followed by the skin of the entered volume and finally the skin of the
    /// left volume. `None` is returned if no surface is attached to the
    /// crossing.
    #[must_use]
    pub fn classify(&self, pre_volume: &str, post_volume: &str) -> Option<&SurfaceDescriptor> {
        self.borders
            .get(&(pre_volume.to_string(), post_volume.to_string()))
            .or_else(|| self.skins.get(post_volume))
            .or_else(|| self.skins.get(pre_volume))
    }
    /// Return the number of attached surfaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.skins.len() + self.borders.len()
    }
    /// Return `true` if no surface is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skins.is_empty() && self.borders.is_empty()
    }
}

/// Calculate the Fresnel reflectance for an unpolarized photon hitting the
/// boundary between media of refractive index `n_pre` and `n_post` under the
/// given angle of incidence (measured from the surface normal).
///
/// Beyond the critical angle the reflectance is 1.0 (total internal
/// reflection).
#[must_use]
pub fn fresnel_reflectance(n_pre: f64, n_post: f64, incidence: Angle) -> f64 {
    let alpha = incidence.get::<radian>();
    let sin_beta_squared = (n_pre / n_post) * (n_pre / n_post) * alpha.sin() * alpha.sin();
    if sin_beta_squared >= 1.0 {
        return 1.0;
    }
    let cos_alpha = alpha.cos();
    let cos_beta = (1.0 - sin_beta_squared).sqrt();
    // s-polarization
    let r_s = (n_pre * cos_alpha - n_post * cos_beta) / (n_pre * cos_alpha + n_post * cos_beta);
    // p-polarization
    let r_p = (n_post * cos_alpha - n_pre * cos_beta) / (n_post * cos_alpha + n_pre * cos_beta);
    // so far, we assume unpolarized (50/50) photons -> take average
    (r_s * r_s + r_p * r_p) / 2.
}

/// Calculate the critical angle of total internal reflection for a photon
/// traveling from a medium of index `n_core` towards a medium of lower index
/// `n_cladding`. Returns `None` if `n_core <= n_cladding` (no total internal
/// reflection possible).
#[must_use]
pub fn critical_angle(n_core: f64, n_cladding: f64) -> Option<Angle> {
    if n_core <= n_cladding {
        return None;
    }
    Some(Angle::new::<radian>((n_cladding / n_core).asin()))
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn polished_dielectric(name: &str) -> SurfaceDescriptor {
        SurfaceDescriptor::new(
            name,
            SurfaceType::DielectricDielectric,
            SurfaceFinish::Polished,
            ReflectionModel::Unified,
        )
    }
    #[test]
    fn descriptor_accessors() {
        let descriptor = polished_dielectric("fiberCoreSurface");
        assert_eq!(descriptor.name(), "fiberCoreSurface");
        assert_eq!(descriptor.surface_type(), SurfaceType::DielectricDielectric);
        assert_eq!(descriptor.finish(), SurfaceFinish::Polished);
        assert_eq!(descriptor.model(), ReflectionModel::Unified);
    }
    #[test]
    fn display() {
        assert_eq!(
            format!("{}", SurfaceType::DielectricDielectric),
            "dielectric_dielectric"
        );
        assert_eq!(format!("{}", SurfaceType::DielectricMetal), "dielectric_metal");
        assert_eq!(format!("{}", SurfaceFinish::Polished), "polished");
        assert_eq!(format!("{}", ReflectionModel::Unified), "unified");
    }
    #[test]
    fn classify_skin() {
        let mut store = SurfaceStore::new();
        store.add_skin("FiberCore", polished_dielectric("coreSkin"));
        assert_eq!(
            store.classify("FiberCladding", "FiberCore").unwrap().name(),
            "coreSkin"
        );
        assert_eq!(
            store.classify("FiberCore", "FiberCladding").unwrap().name(),
            "coreSkin"
        );
        assert!(store.classify("Tank", "Detector").is_none());
    }
    #[test]
    fn classify_post_skin_before_pre_skin() {
        let mut store = SurfaceStore::new();
        store.add_skin("FiberCore", polished_dielectric("coreSkin"));
        store.add_skin("FiberCladding", polished_dielectric("claddingSkin"));
        assert_eq!(
            store.classify("FiberCore", "FiberCladding").unwrap().name(),
            "claddingSkin"
        );
    }
    #[test]
    fn classify_border_takes_precedence() {
        let mut store = SurfaceStore::new();
        store.add_skin("FiberCore", polished_dielectric("coreSkin"));
        store.add_border("FiberCladding", "FiberCore", polished_dielectric("border"));
        assert_eq!(
            store.classify("FiberCladding", "FiberCore").unwrap().name(),
            "border"
        );
        // border surfaces are ordered pairs
        assert_eq!(
            store.classify("FiberCore", "FiberCladding").unwrap().name(),
            "coreSkin"
        );
    }
    #[test]
    fn fresnel_same_index() {
        assert_eq!(
            fresnel_reflectance(1.0, 1.0, Angle::new::<radian>(0.0)),
            0.0
        );
    }
    #[test]
    fn fresnel_glass_perpendicular() {
        assert_abs_diff_eq!(
            fresnel_reflectance(1.0, 1.5, Angle::new::<radian>(0.0)),
            0.04
        );
    }
    #[test]
    fn fresnel_total_internal_reflection() {
        // polystyrene core -> PMMA cladding at 2.0 eV
        let theta_c = critical_angle(1.59, 1.49).unwrap();
        assert_relative_eq!(theta_c.get::<radian>(), (1.49f64 / 1.59).asin());
        assert_eq!(
            fresnel_reflectance(1.59, 1.49, theta_c + Angle::new::<radian>(0.01)),
            1.0
        );
        assert!(fresnel_reflectance(1.59, 1.49, theta_c - Angle::new::<radian>(0.01)) < 1.0);
    }
    #[test]
    fn critical_angle_wrong_order() {
        assert!(critical_angle(1.49, 1.59).is_none());
    }
}
