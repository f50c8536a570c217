#![warn(missing_docs)]
//! Module for additional uom macros that facilitate the creation of Points or single unit values
/// helper macro to create the units
#[macro_export]
macro_rules! uom_unit_creator {
    ($unit:ident, $unit_type:ident, $val1:expr) => {
        $unit_type::new::<$unit>($val1)
    };
    ($unit:ident, $unit_type:ident, $val1:expr, $val2:expr, $val3:expr) => {{
        use nalgebra::Point3;
        Point3::new(
            $unit_type::new::<$unit>($val1),
            $unit_type::new::<$unit>($val2),
            $unit_type::new::<$unit>($val3),
        )
    }};
    ($unit:ident, $unit_type:ident, $( $x:expr ),*) => {
        {
            use std::vec::Vec;
            let mut temp_vec = Vec::new();
            $(
                temp_vec.push($unit_type::new::<$unit>($x));
            )*
            temp_vec
        }
    };
}

///macro to create a Length in meter
#[macro_export]
macro_rules! meter {
    ($( $x:expr ),*) =>{
        {
            use uom::si::{f64::Length, length::meter};
            $crate::uom_unit_creator![meter, Length, $( $x ),*]
        }
    };
}
///macro to create a Length in centimeter
#[macro_export]
macro_rules! centimeter {
    ($( $x:expr ),*) =>{{
        use uom::si::{f64::Length, length::centimeter};
        $crate::uom_unit_creator![centimeter, Length, $( $x ),*]
    }};
}
///macro to create a Length in millimeter
#[macro_export]
macro_rules! millimeter {
    ($( $x:expr ),*) =>{{
        use uom::si::{f64::Length, length::millimeter};
        $crate::uom_unit_creator![millimeter, Length, $( $x ),*]
    }};
}
///macro to create an Energy in electronvolt
#[macro_export]
macro_rules! electronvolt {
    ($( $x:expr ),*) =>{{
        use uom::si::{energy::electronvolt, f64::Energy};
        $crate::uom_unit_creator![electronvolt, Energy, $( $x ),*]
    }};
}
///macro to create an Energy in kiloelectronvolt
#[macro_export]
macro_rules! kiloelectronvolt {
    ($( $x:expr ),*) =>{{
        use uom::si::{energy::kiloelectronvolt, f64::Energy};
        $crate::uom_unit_creator![kiloelectronvolt, Energy, $( $x ),*]
    }};
}
///macro to create an Energy in megaelectronvolt
#[macro_export]
macro_rules! megaelectronvolt {
    ($( $x:expr ),*) =>{{
        use uom::si::{energy::megaelectronvolt, f64::Energy};
        $crate::uom_unit_creator![megaelectronvolt, Energy, $( $x ),*]
    }};
}
///macro to create a Time in nanosecond
#[macro_export]
macro_rules! nanosecond {
    ($( $x:expr ),*) =>{{
        use uom::si::{f64::Time, time::nanosecond};
        $crate::uom_unit_creator![nanosecond, Time, $( $x ),*]
    }};
}
///macro to create a MassDensity in gram per cubic centimeter
#[macro_export]
macro_rules! gram_per_cubic_centimeter {
    ($( $x:expr ),*) =>{{
        use uom::si::{f64::MassDensity, mass_density::gram_per_cubic_centimeter};
        $crate::uom_unit_creator![gram_per_cubic_centimeter, MassDensity, $( $x ),*]
    }};
}
