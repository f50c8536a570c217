//! Helper functions and macros used across the crate
pub mod uom_macros;
