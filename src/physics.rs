#![warn(missing_docs)]
//! Registry of the physics configurations accepted by the run driver
//!
//! The actual process construction is the external transport engine's job;
//! this module only validates configuration names against a closed
//! enumeration so that an unknown name fails fast before any transport
//! begins, instead of falling through silently.
use crate::error::{EmcResult, EmcalError};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use uom::si::energy::kiloelectronvolt;
use uom::si::f64::{Energy, Length};
use uom::si::length::micrometer;

/// The pre-built hadronic physics bundles selectable by name.
#[allow(missing_docs)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum PhysicsListKind {
    #[strum(serialize = "FTFP_BERT")]
    FtfpBert,
    #[strum(serialize = "FTFP_BERT_EMV")]
    FtfpBertEmv,
    #[strum(serialize = "FTFP_BERT_EMX")]
    FtfpBertEmx,
    #[strum(serialize = "FTFP_BERT_EMY")]
    FtfpBertEmy,
    #[strum(serialize = "FTFP_BERT_EMZ")]
    FtfpBertEmz,
    #[strum(serialize = "FTFP_BERT_TRV")]
    FtfpBertTrv,
    #[strum(serialize = "FTF_BIC")]
    FtfBic,
    #[strum(serialize = "QBBC")]
    Qbbc,
    #[strum(serialize = "QGSP_BERT")]
    QgspBert,
    #[strum(serialize = "QGSP_BERT_EMV")]
    QgspBertEmv,
    #[strum(serialize = "QGSP_BERT_EMX")]
    QgspBertEmx,
    #[strum(serialize = "QGSP_BERT_HP")]
    QgspBertHp,
    #[strum(serialize = "QGSP_BIC")]
    QgspBic,
    #[strum(serialize = "QGSP_BIC_EMY")]
    QgspBicEmy,
    #[strum(serialize = "QGSP_BIC_HP")]
    QgspBicHp,
    #[strum(serialize = "QGSP_FTFP_BERT")]
    QgspFtfpBert,
    #[strum(serialize = "QGSP_FTFP_BERT_EMV")]
    QgspFtfpBertEmv,
    #[strum(serialize = "QGS_BIC")]
    QgsBic,
}

impl Default for PhysicsListKind {
    fn default() -> Self {
        Self::QgspBert
    }
}

impl PhysicsListKind {
    /// Resolve a physics list configuration name.
    ///
    /// # Errors
    ///
    /// This function will return an [`EmcalError::Configuration`] naming the
    /// offending identifier if the name is not part of the closed enumeration.
    pub fn from_name(name: &str) -> EmcResult<Self> {
        Self::iter()
            .find(|kind| format!("{kind}") == name)
            .ok_or_else(|| {
                EmcalError::Configuration(format!("unknown physics list <{name}>"))
            })
    }
}

/// Atomic deexcitation settings selected by the run driver's cut knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum DeexcitationCut {
    /// fluorescence, Auger emission and PIXE enabled, fine production cut
    Full,
    /// fluorescence only, fine production cut
    Fluorescence,
    /// fluorescence only, coarse production cut
    FluorescenceCoarse,
    /// deexcitation disabled, coarse production cut
    Off,
}

impl DeexcitationCut {
    /// Resolve the numeric cut knob (0..=3) of the run driver.
    ///
    /// # Errors
    ///
    /// This function will return an [`EmcalError::Configuration`] for values
    /// outside 0..=3.
    pub fn from_index(index: u32) -> EmcResult<Self> {
        match index {
            0 => Ok(Self::Full),
            1 => Ok(Self::Fluorescence),
            2 => Ok(Self::FluorescenceCoarse),
            3 => Ok(Self::Off),
            _ => Err(EmcalError::Configuration(format!(
                "unknown deexcitation cut <{index}> (must be 0..=3)"
            ))),
        }
    }
    /// Return `true` if fluorescence is simulated.
    #[must_use]
    pub const fn fluorescence(&self) -> bool {
        !matches!(self, Self::Off)
    }
    /// Return `true` if Auger electron emission is simulated.
    #[must_use]
    pub const fn auger(&self) -> bool {
        matches!(self, Self::Full)
    }
    /// Return `true` if particle-induced X-ray emission is simulated.
    #[must_use]
    pub const fn pixe(&self) -> bool {
        matches!(self, Self::Full)
    }
    /// Return the low-energy end of the electromagnetic tables.
    #[must_use]
    pub fn low_energy_limit(&self) -> Energy {
        match self {
            Self::Full => Energy::new::<kiloelectronvolt>(1.0),
            Self::Fluorescence => Energy::new::<kiloelectronvolt>(10.0),
            Self::FluorescenceCoarse | Self::Off => Energy::new::<kiloelectronvolt>(100.0),
        }
    }
    /// Return the secondary production cut.
    #[must_use]
    pub fn production_cut(&self) -> Length {
        match self {
            Self::Full | Self::Fluorescence => Length::new::<micrometer>(100.0),
            Self::FluorescenceCoarse | Self::Off => Length::new::<micrometer>(1000.0),
        }
    }
}
