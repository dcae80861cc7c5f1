use super::runner::{InitialState, JobResult};
use std::time::Duration;
use tracing::info;

pub fn report_initial_state(state: &InitialState) {
    info!("Ground-state orbital energy: {:.6} au", state.energies[0]);
    info!("Photon energy: {:.6} au", state.photon);
    info!("Final-state energy: {:.6} au", state.final_energy);
    info!("K:  {}", state.k_label());
}

pub fn report_job(result: &JobResult, photon_label: &str) {
    info!("\nDirection theta = {:.3}", result.theta);
    info!(" Dipole moment:");
    for (axis, t) in ["x", "y", "z"].iter().zip(result.dipole.iter()) {
        info!("   {}: ({:+.5e}, {:+.5e})", axis, t.re, t.im);
    }
    info!(" Photon energy [eV]:  {}", photon_label);
    info!(" Cross section :      {:.4}", result.cross_section);
}

pub fn report_summary(results: &[JobResult], elapsed: Duration) {
    info!("\nPhotoionization run finished: {} directions", results.len());
    info!("k(theta)\ttot sigma");
    for result in results {
        info!("{:.3}\t\t{:.5}", result.theta, result.cross_section);
    }
    info!("CPU time: {:.5} s", elapsed.as_secs_f64());
}
