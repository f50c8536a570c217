#![warn(missing_docs)]
//! Primitive and composite shapes of the detector geometry
//!
//! All shapes are placed axis aligned in the world frame: boxes with their
//! faces normal to the coordinate axes, tubes with their axis along the beam
//! (z) axis. Every volume of the calorimeter is placed unrotated, so rotations
//! are not modeled.
use crate::error::{EmcResult, EmcalError};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use uom::si::f64::Length;
use uom::si::length::meter;

/// A primitive, axis aligned shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// a box given by its half sizes along x, y and z
    Box {
        /// half size along each coordinate axis
        half_size: Vector3<Length>,
    },
    /// a (hollow) cylinder along the z axis
    Tube {
        /// inner radius (zero for a full cylinder)
        inner_radius: Length,
        /// outer radius
        outer_radius: Length,
        /// half length along the z axis
        half_length: Length,
    },
}

impl Shape {
    /// Check this shape for consistency.
    ///
    /// # Errors
    ///
    /// This function will return an [`EmcalError::Geometry`] if a dimension is
    /// not positive / finite or if a tube's inner radius is not smaller than
    /// its outer radius.
    pub fn validate(&self) -> EmcResult<()> {
        match self {
            Self::Box { half_size } => {
                if half_size
                    .iter()
                    .any(|half| half.value <= 0.0 || !half.value.is_finite())
                {
                    return Err(EmcalError::Geometry(
                        "box half sizes must be positive and finite".into(),
                    ));
                }
            }
            Self::Tube {
                inner_radius,
                outer_radius,
                half_length,
            } => {
                if inner_radius.value < 0.0 || !inner_radius.value.is_finite() {
                    return Err(EmcalError::Geometry(
                        "tube inner radius must be non-negative and finite".into(),
                    ));
                }
                if outer_radius.value <= 0.0 || !outer_radius.value.is_finite() {
                    return Err(EmcalError::Geometry(
                        "tube outer radius must be positive and finite".into(),
                    ));
                }
                if inner_radius >= outer_radius {
                    return Err(EmcalError::Geometry(
                        "tube inner radius must be smaller than its outer radius".into(),
                    ));
                }
                if half_length.value <= 0.0 || !half_length.value.is_finite() {
                    return Err(EmcalError::Geometry(
                        "tube half length must be positive and finite".into(),
                    ));
                }
            }
        }
        Ok(())
    }
    /// Return the half size of the axis aligned bounding box of this shape in
    /// meters.
    #[must_use]
    pub fn bounding_half_size(&self) -> Vector3<f64> {
        match self {
            Self::Box { half_size } => Vector3::new(
                half_size.x.get::<meter>(),
                half_size.y.get::<meter>(),
                half_size.z.get::<meter>(),
            ),
            Self::Tube {
                outer_radius,
                half_length,
                ..
            } => Vector3::new(
                outer_radius.get::<meter>(),
                outer_radius.get::<meter>(),
                half_length.get::<meter>(),
            ),
        }
    }
}

fn position_in_meters(position: &Point3<Length>) -> Vector3<f64> {
    Vector3::new(
        position.x.get::<meter>(),
        position.y.get::<meter>(),
        position.z.get::<meter>(),
    )
}

// strict interval overlap; touching faces do not count
fn intervals_overlap(center_a: f64, half_a: f64, center_b: f64, half_b: f64) -> bool {
    (center_a - center_b).abs() < half_a + half_b - f64::EPSILON
}

fn interval_contained(center_outer: f64, half_outer: f64, center_inner: f64, half_inner: f64) -> bool {
    center_inner - half_inner >= center_outer - half_outer - f64::EPSILON
        && center_inner + half_inner <= center_outer + half_outer + f64::EPSILON
}

/// Check whether two placed primitive shapes geometrically intersect.
///
/// Boxes and box/tube pairs are compared via their bounding boxes. Coaxial
/// tube pairs are compared by their radial annuli, so e.g. a fiber core and
/// the surrounding cladding annulus do not count as overlapping. Touching
/// faces are not an overlap.
#[must_use]
pub fn shapes_overlap(
    shape_a: &Shape,
    position_a: &Point3<Length>,
    shape_b: &Shape,
    position_b: &Point3<Length>,
) -> bool {
    let pos_a = position_in_meters(position_a);
    let pos_b = position_in_meters(position_b);
    if let (
        Shape::Tube {
            inner_radius: inner_a,
            outer_radius: outer_a,
            half_length: half_a,
        },
        Shape::Tube {
            inner_radius: inner_b,
            outer_radius: outer_b,
            half_length: half_b,
        },
    ) = (shape_a, shape_b)
    {
        let coaxial = approx::abs_diff_eq!(pos_a.x, pos_b.x) && approx::abs_diff_eq!(pos_a.y, pos_b.y);
        if coaxial {
            let radial_overlap = inner_a.get::<meter>() < outer_b.get::<meter>() - f64::EPSILON
                && inner_b.get::<meter>() < outer_a.get::<meter>() - f64::EPSILON;
            return radial_overlap
                && intervals_overlap(
                    pos_a.z,
                    half_a.get::<meter>(),
                    pos_b.z,
                    half_b.get::<meter>(),
                );
        }
    }
    let half_a = shape_a.bounding_half_size();
    let half_b = shape_b.bounding_half_size();
    (0..3).all(|axis| intervals_overlap(pos_a[axis], half_a[axis], pos_b[axis], half_b[axis]))
}

/// Check whether a placed primitive shape is fully contained in another one.
///
/// The test is conservative: bounding boxes are used except for coaxial tube
/// pairs, where the radial annuli are compared directly.
#[must_use]
pub fn shape_contained_in(
    inner_shape: &Shape,
    inner_position: &Point3<Length>,
    outer_shape: &Shape,
    outer_position: &Point3<Length>,
) -> bool {
    let pos_inner = position_in_meters(inner_position);
    let pos_outer = position_in_meters(outer_position);
    if let (
        Shape::Tube {
            inner_radius: hole_inner,
            outer_radius: rim_inner,
            half_length: half_inner,
        },
        Shape::Tube {
            inner_radius: hole_outer,
            outer_radius: rim_outer,
            half_length: half_outer,
        },
    ) = (inner_shape, outer_shape)
    {
        let coaxial = approx::abs_diff_eq!(pos_inner.x, pos_outer.x)
            && approx::abs_diff_eq!(pos_inner.y, pos_outer.y);
        if coaxial {
            return hole_inner.get::<meter>() >= hole_outer.get::<meter>() - f64::EPSILON
                && rim_inner.get::<meter>() <= rim_outer.get::<meter>() + f64::EPSILON
                && interval_contained(
                    pos_outer.z,
                    half_outer.get::<meter>(),
                    pos_inner.z,
                    half_inner.get::<meter>(),
                );
        }
    }
    let half_inner = inner_shape.bounding_half_size();
    let half_outer = outer_shape.bounding_half_size();
    (0..3).all(|axis| {
        interval_contained(
            pos_outer[axis],
            half_outer[axis],
            pos_inner[axis],
            half_inner[axis],
        )
    })
}

/// A cutout subtracted from the base shape of a [`Solid`], placed relative to
/// the base shape's center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cutout {
    /// the subtracted shape
    pub shape: Shape,
    /// placement of the cutout relative to the base shape
    pub offset: Vector3<Length>,
}

/// A solid: a base shape minus a list of cutout shapes.
///
/// This models Boolean subtraction (e.g. the fiber channels carved out of the
/// absorber tank) as an explicit data structure, so the overlap check can
/// reason about carved regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    base: Shape,
    cutouts: Vec<Cutout>,
}

impl Solid {
    /// Create a new [`Solid`] from a base shape without cutouts.
    ///
    /// # Errors
    ///
    /// This function will return an [`EmcalError::Geometry`] if the base shape
    /// is inconsistent.
    pub fn new(base: Shape) -> EmcResult<Self> {
        base.validate()?;
        Ok(Self {
            base,
            cutouts: Vec::new(),
        })
    }
    /// Subtract a cutout shape, placed relative to the base shape's center.
    ///
    /// # Errors
    ///
    /// This function will return an [`EmcalError::Geometry`] if the cutout
    /// shape is inconsistent.
    pub fn subtract(&mut self, shape: Shape, offset: Vector3<Length>) -> EmcResult<()> {
        shape.validate()?;
        self.cutouts.push(Cutout { shape, offset });
        Ok(())
    }
    /// Return the base shape of this solid.
    #[must_use]
    pub const fn base(&self) -> &Shape {
        &self.base
    }
    /// Return the cutouts of this solid.
    #[must_use]
    pub fn cutouts(&self) -> &[Cutout] {
        &self.cutouts
    }
    /// Check whether two placed solids geometrically intersect.
    ///
    /// The base shapes are compared first; a solid whose base shape is fully
    /// contained in one of the other solid's cutouts does not overlap it (that
    /// region was carved away).
    #[must_use]
    pub fn overlaps(
        &self,
        position: &Point3<Length>,
        other: &Self,
        other_position: &Point3<Length>,
    ) -> bool {
        if !shapes_overlap(&self.base, position, &other.base, other_position) {
            return false;
        }
        if self.base_inside_cutout_of(position, other, other_position)
            || other.base_inside_cutout_of(other_position, self, position)
        {
            return false;
        }
        true
    }
    fn base_inside_cutout_of(
        &self,
        position: &Point3<Length>,
        other: &Self,
        other_position: &Point3<Length>,
    ) -> bool {
        other.cutouts.iter().any(|cutout| {
            let cutout_position = Point3::new(
                other_position.x + cutout.offset.x,
                other_position.y + cutout.offset.y,
                other_position.z + cutout.offset.z,
            );
            shape_contained_in(&self.base, position, &cutout.shape, &cutout_position)
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::millimeter;
    use nalgebra::vector;

    fn box_shape(half_x: f64, half_y: f64, half_z: f64) -> Shape {
        Shape::Box {
            half_size: vector![millimeter!(half_x), millimeter!(half_y), millimeter!(half_z)],
        }
    }
    fn tube(inner: f64, outer: f64, half_z: f64) -> Shape {
        Shape::Tube {
            inner_radius: millimeter!(inner),
            outer_radius: millimeter!(outer),
            half_length: millimeter!(half_z),
        }
    }
    #[test]
    fn validate_wrong() {
        assert!(box_shape(-1.0, 1.0, 1.0).validate().is_err());
        assert!(box_shape(f64::NAN, 1.0, 1.0).validate().is_err());
        assert!(tube(-0.1, 1.0, 1.0).validate().is_err());
        assert!(tube(1.0, 1.0, 1.0).validate().is_err());
        assert!(tube(0.0, 1.0, -1.0).validate().is_err());
        assert!(tube(0.0, 1.0, 1.0).validate().is_ok());
        assert!(box_shape(1.0, 1.0, 1.0).validate().is_ok());
    }
    #[test]
    fn boxes_overlap() {
        let a = box_shape(1.0, 1.0, 1.0);
        let origin = millimeter!(0.0, 0.0, 0.0);
        assert!(shapes_overlap(&a, &origin, &a, &millimeter!(1.5, 0.0, 0.0)));
        assert!(!shapes_overlap(&a, &origin, &a, &millimeter!(3.0, 0.0, 0.0)));
    }
    #[test]
    fn touching_faces_are_no_overlap() {
        let a = box_shape(1.0, 1.0, 1.0);
        assert!(!shapes_overlap(
            &a,
            &millimeter!(0.0, 0.0, 0.0),
            &a,
            &millimeter!(2.0, 0.0, 0.0)
        ));
    }
    #[test]
    fn coaxial_tubes_with_disjoint_annuli() {
        let core = tube(0.0, 0.2303, 126.0);
        let cladding = tube(0.2303, 0.235, 126.0);
        let position = millimeter!(0.0, 0.0, 130.0);
        assert!(!shapes_overlap(&core, &position, &cladding, &position));
        let full = tube(0.0, 0.235, 126.0);
        assert!(shapes_overlap(&core, &position, &full, &position));
    }
    #[test]
    fn tube_contained_in_cutout_cylinder() {
        let cladding = tube(0.2303, 0.235, 126.0);
        let channel = tube(0.0, 0.235, 127.0);
        let position = millimeter!(0.0, 0.0, 130.0);
        assert!(shape_contained_in(&cladding, &position, &channel, &position));
        assert!(!shape_contained_in(&channel, &position, &cladding, &position));
    }
    #[test]
    fn solid_subtraction_removes_overlap() {
        // a tank with a carved fiber channel does not overlap the fiber inside it
        let mut tank = Solid::new(box_shape(1.47, 1.47, 126.0)).unwrap();
        tank.subtract(
            tube(0.0, 0.235, 127.0),
            vector![millimeter!(0.0), millimeter!(0.0), millimeter!(0.0)],
        )
        .unwrap();
        let fiber = Solid::new(tube(0.0, 0.2303, 126.0)).unwrap();
        let position = millimeter!(0.0, 0.0, 130.0);
        assert!(!tank.overlaps(&position, &fiber, &position));
        let solid_tank = Solid::new(box_shape(1.47, 1.47, 126.0)).unwrap();
        assert!(solid_tank.overlaps(&position, &fiber, &position));
    }
    #[test]
    fn solid_subtract_invalid_cutout() {
        let mut tank = Solid::new(box_shape(1.0, 1.0, 1.0)).unwrap();
        assert!(tank
            .subtract(
                tube(1.0, 0.5, 1.0),
                vector![millimeter!(0.0), millimeter!(0.0), millimeter!(0.0)]
            )
            .is_err());
    }
}
