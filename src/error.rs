#![warn(missing_docs)]
//! Emcal specific error structures
use std::{error::Error, fmt::Display};

/// Emcal application specific Result type
pub type EmcResult<T> = std::result::Result<T, EmcalError>;

/// Errors that can be returned by various emcal functions.
#[derive(Debug, PartialEq, Eq)]
pub enum EmcalError {
    /// invalid run configuration (unknown physics list name, bad fiber count, ...)
    Configuration(String),
    /// errors while building or validating the detector geometry
    Geometry(String),
    /// errors while handling optical property tables
    OpticalTable(String),
    /// errors while handling materials (composition, density)
    Material(String),
    /// errors console io
    Console(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for EmcalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(m) => {
                write!(f, "Configuration:{m}")
            }
            Self::Geometry(m) => {
                write!(f, "Geometry:{m}")
            }
            Self::OpticalTable(m) => {
                write!(f, "OpticalTable:{m}")
            }
            Self::Material(m) => {
                write!(f, "Material:{m}")
            }
            Self::Console(m) => {
                write!(f, "Console:{m}")
            }
            Self::Other(m) => write!(f, "Emcal Error:Other:{m}"),
        }
    }
}
impl Error for EmcalError {}

impl std::convert::From<String> for EmcalError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn from() {
        let error = EmcalError::from("test".to_string());
        assert_eq!(error, EmcalError::Other("test".to_string()));
    }
    #[test]
    fn display() {
        assert_eq!(
            format!("{}", EmcalError::Configuration("test".to_string())),
            "Configuration:test"
        );
        assert_eq!(
            format!("{}", EmcalError::Geometry("test".to_string())),
            "Geometry:test"
        );
        assert_eq!(
            format!("{}", EmcalError::OpticalTable("test".to_string())),
            "OpticalTable:test"
        );
        assert_eq!(
            format!("{}", EmcalError::Material("test".to_string())),
            "Material:test"
        );
        assert_eq!(
            format!("{}", EmcalError::Console("test".to_string())),
            "Console:test"
        );
        assert_eq!(
            format!("{}", EmcalError::Other("test".to_string())),
            "Emcal Error:Other:test"
        );
    }
    #[test]
    fn debug() {
        assert_eq!(
            format!("{:?}", EmcalError::Geometry("test".to_string())),
            "Geometry(\"test\")"
        );
    }
}
