#![warn(missing_docs)]
//! Handling the emcal CLI
//!
//! This module parses and validates the command line of the run driver. All
//! configuration errors are reported before any transport begins.
use crate::detector::DetectorConfig;
use crate::error::{EmcResult, EmcalError};
use crate::physics::{DeexcitationCut, PhysicsListKind};
use crate::stepping::FilterConfig;
use clap::Parser;
use std::path::PathBuf;
use uom::si::energy::megaelectronvolt;
use uom::si::f64::Energy;

/// Command line arguments of the emcal run driver.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// number of events to simulate
    #[arg(short = 'n', long, default_value_t = 10)]
    pub events: u32,

    /// kinetic energy of the primary particle in MeV
    #[arg(short = 'E', long, default_value_t = 100.0)]
    pub energy: f64,

    /// primary particle species
    #[arg(short, long, default_value = "gamma")]
    pub particle: String,

    /// hadronic physics list name (e.g. QGSP_BERT)
    #[arg(long, default_value = "QGSP_BERT")]
    pub physics_list: String,

    /// atomic deexcitation cut selector (0..=3)
    #[arg(long, default_value_t = 0)]
    pub deexcitation_cut: u32,

    /// number of scintillating fibers in the tank
    #[arg(short, long, default_value_t = 1)]
    pub fibers: usize,

    /// number of transport worker threads
    #[arg(short, long, default_value_t = 1)]
    pub threads: usize,

    /// skip the construction-time volume overlap check
    #[arg(long)]
    pub no_overlap_check: bool,

    /// forcibly terminate tracks leaving the world volume
    #[arg(long)]
    pub kill_on_world_exit: bool,

    /// emit a flat log-line record for every step with an energy deposit or a
    /// detector arrival
    #[arg(long)]
    pub log_steps: bool,

    /// write the constructed detector model to the given YAML file
    #[arg(long)]
    pub dump_model: Option<PathBuf>,
}

/// A fully validated run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// number of events to simulate
    pub events: u32,
    /// kinetic energy of the primary particle
    pub energy: Energy,
    /// primary particle species
    pub particle: String,
    /// validated physics list
    pub physics_list: PhysicsListKind,
    /// validated deexcitation settings
    pub deexcitation: DeexcitationCut,
    /// number of transport worker threads
    pub threads: usize,
    /// detector construction knobs
    pub detector: DetectorConfig,
    /// step filter knobs
    pub filter: FilterConfig,
    /// optional YAML model dump target
    pub dump_model: Option<PathBuf>,
}

impl TryFrom<Args> for RunConfig {
    type Error = EmcalError;

    fn try_from(args: Args) -> EmcResult<Self> {
        if !args.energy.is_finite() || args.energy <= 0.0 {
            return Err(EmcalError::Console(format!(
                "primary energy must be positive, got {}",
                args.energy
            )));
        }
        if args.particle.is_empty() {
            return Err(EmcalError::Console("particle name must not be empty".into()));
        }
        if args.threads == 0 {
            return Err(EmcalError::Console("thread count must be at least 1".into()));
        }
        let physics_list = PhysicsListKind::from_name(&args.physics_list)?;
        let deexcitation = DeexcitationCut::from_index(args.deexcitation_cut)?;
        Ok(Self {
            events: args.events,
            energy: Energy::new::<megaelectronvolt>(args.energy),
            particle: args.particle,
            physics_list,
            deexcitation,
            threads: args.threads,
            detector: DetectorConfig {
                fiber_count: args.fibers,
                check_overlaps: !args.no_overlap_check,
            },
            filter: FilterConfig {
                kill_on_world_exit: args.kill_on_world_exit,
                log_steps: args.log_steps,
            },
            dump_model: args.dump_model,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_matches::assert_matches;

    fn default_args() -> Args {
        Args::parse_from(["emcal"])
    }
    #[test]
    fn defaults_are_valid() {
        let config = RunConfig::try_from(default_args()).unwrap();
        assert_eq!(config.events, 10);
        assert_eq!(config.physics_list, PhysicsListKind::QgspBert);
        assert_eq!(config.deexcitation, DeexcitationCut::Full);
        assert_eq!(config.detector.fiber_count, 1);
        assert!(config.detector.check_overlaps);
        assert!(!config.filter.kill_on_world_exit);
    }
    #[test]
    fn full_command_line() {
        let args = Args::parse_from([
            "emcal",
            "--events",
            "1000",
            "--energy",
            "250.0",
            "--particle",
            "e-",
            "--physics-list",
            "QGSP_BIC_HP",
            "--fibers",
            "3",
            "--deexcitation-cut",
            "2",
            "--threads",
            "4",
            "--kill-on-world-exit",
            "--log-steps",
        ]);
        let config = RunConfig::try_from(args).unwrap();
        assert_eq!(config.events, 1000);
        assert_eq!(config.particle, "e-");
        assert_eq!(config.physics_list, PhysicsListKind::QgspBicHp);
        assert_eq!(config.deexcitation, DeexcitationCut::FluorescenceCoarse);
        assert_eq!(config.detector.fiber_count, 3);
        assert_eq!(config.threads, 4);
        assert!(config.filter.kill_on_world_exit);
        assert!(config.filter.log_steps);
    }
    #[test]
    fn invalid_energy() {
        let mut args = default_args();
        args.energy = -1.0;
        assert_matches!(RunConfig::try_from(args), Err(EmcalError::Console(_)));
    }
    #[test]
    fn invalid_physics_list() {
        let mut args = default_args();
        args.physics_list = "QGSP_TYPO".to_string();
        assert_matches!(RunConfig::try_from(args), Err(EmcalError::Configuration(_)));
    }
    #[test]
    fn invalid_threads() {
        let mut args = default_args();
        args.threads = 0;
        assert_matches!(RunConfig::try_from(args), Err(EmcalError::Console(_)));
    }
}
