use clap::Parser;
use ndarray::Array1;
use std::time::Instant;

use wavetrain::ensemble::WavePacketEnsemble;
use wavetrain::utils::io::{complex_to_disk, density_to_disk};
use wavetrain_common::read_toml;

#[derive(Parser)]
pub struct CommandLineArguments {
    /// Path to the run's parameter toml
    #[clap(long, short)]
    toml: String,

    /// Also dump the complex wavefunction over the grid
    #[clap(long)]
    wavefunction: bool,
}

fn main() -> anyhow::Result<()> {
    // Start timer
    let now = Instant::now();

    // Parse path to toml
    let args = CommandLineArguments::parse();
    let params = read_toml(&args.toml)?;

    // New ensemble from the packet parameter arrays
    let ensemble = WavePacketEnsemble::new(
        params.positions,
        params.momenta,
        params.widths,
        params.masses,
        params.nospread,
    )?;
    println!("Wave Packet Ensemble\n{}", ensemble);

    // Evaluation grids
    let times = Array1::linspace(
        params.time_limits[0],
        params.time_limits[1],
        params.num_points,
    );
    let positions = Array1::linspace(
        params.position_limits[0],
        params.position_limits[1],
        params.num_points,
    );

    // Time-position density field and fixed-detector series for the
    // downstream plotting tooling
    let field = ensemble.density_field(&times, &positions)?;
    let series = ensemble.detector_series(&times, params.detector_position)?;
    density_to_disk(format!("{}_density.npy", params.sim_name), &field)?;
    density_to_disk(format!("{}_detector.npy", params.sim_name), &series)?;

    if args.wavefunction {
        let ψ = ensemble.superposition_field(&times, &positions)?;
        for handle in complex_to_disk(format!("{}_psi", params.sim_name), &ψ.into_dyn())? {
            handle
                .join()
                .expect("npy writer thread panicked");
        }
    }

    println!("Finished evaluation in {} seconds", now.elapsed().as_secs());
    Ok(())
}
