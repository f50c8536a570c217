use clap::Parser;
use emcal::console::{Args, RunConfig};
use emcal::detector::DetectorModel;
use emcal::error::{EmcResult, EmcalError};
use log::info;
use std::fs;

fn main() -> EmcResult<()> {
    env_logger::init();
    let config = RunConfig::try_from(Args::parse())?;
    info!(
        "run configuration: {} events, {} at {:.3} MeV, physics list {}, deexcitation {}",
        config.events,
        config.particle,
        config.energy.get::<uom::si::energy::megaelectronvolt>(),
        config.physics_list,
        config.deexcitation
    );

    let model = DetectorModel::build(&config.detector)?;
    model.dump_optical_tables();

    if let Some(path) = &config.dump_model {
        fs::write(path, model.to_yaml()?).map_err(|e| {
            EmcalError::Console(format!("cannot write model dump {}: {e}", path.display()))
        })?;
        info!("detector model written to {}", path.display());
    }

    info!(
        "detector ready: {} volumes, {} optical surfaces, {} transport workers",
        model.geometry().volume_count(),
        model.surfaces().len(),
        config.threads
    );
    // Transport itself is driven by the external engine, which invokes one
    // TransportSession per worker thread with the per-step callback.
    Ok(())
}
