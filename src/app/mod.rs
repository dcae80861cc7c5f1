mod jobs;
mod report;
mod runner;

pub use jobs::{job_count, DirectionJob, DirectionJobs};
pub use runner::{
    contract_block, final_state_energy, photon_energy_au, prepare_initial_state, wavevector,
    CrossSectionPipeline, InitialState, JobResult,
};

use self::report::{report_initial_state, report_job, report_summary};
use crate::config::{Args, InitialStateConfig, InputData, SweepConfig, WriteMode};
use crate::error::{PhotoError, Result};
use crate::io::{append_results, setup_output, write_results_block, DiskReader};
use crate::physics::{ContinuumBuilder, CoulombPartialWaves, CrossSectionModel};
use color_eyre::eyre::{self, WrapErr};
use std::time::Instant;
use tracing::info;

/// How a run is carried out.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Stop after computing `k`.
    pub dump: bool,
    /// Evaluate directions on the rayon pool.
    pub parallel: bool,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub k: f64,
    /// Photon energy in hartree.
    pub photon: f64,
    pub results: Vec<JobResult>,
}

#[derive(Debug, Clone)]
pub enum RunOutcome {
    Dumped { k: f64 },
    Completed(RunSummary),
}

/// Run with the stock Coulomb continuum builder.
pub fn execute(input: &InputData, options: &RunOptions) -> Result<RunOutcome> {
    execute_with(input, options, |sweep| CoulombPartialWaves::new(sweep.ion_charge))
}

/// Run with a continuum builder made from the sweep settings.
///
/// The results block is appended only after every job has succeeded.
pub fn execute_with<C, B>(input: &InputData, options: &RunOptions, make_builder: B) -> Result<RunOutcome>
where
    C: ContinuumBuilder,
    B: FnOnce(&SweepConfig) -> C,
{
    let initial = InitialStateConfig::from_input(input)?;
    let reader = DiskReader::new(initial.basis);
    let state = prepare_initial_state(&reader, &initial)?;
    report_initial_state(&state);

    if options.dump {
        return Ok(RunOutcome::Dumped { k: state.k });
    }

    let sweep = SweepConfig::from_input(input)?;
    let jobs = DirectionJobs::from_input(input, &state.k_label())?;
    info!("Evaluating {} directions in the {:?} gauge", jobs.len(), sweep.gauge);

    let continuum = make_builder(&sweep);
    let formula = CrossSectionModel::new(sweep.formula, sweep.polarization);
    let pipeline = CrossSectionPipeline::new(&reader, &state, &sweep, &continuum, formula);
    let results = pipeline.run(&jobs, options.parallel)?;
    for result in &results {
        report_job(result, &initial.photon_label);
    }

    if sweep.write == WriteMode::Append {
        let rows: Vec<(f64, f64)> = results.iter().map(|r| (r.theta, r.cross_section)).collect();
        let mut block = Vec::new();
        write_results_block(&mut block, &sweep, &initial.photon_label, &rows).map_err(|source| {
            PhotoError::Output {
                path: sweep.results_path.clone(),
                source,
            }
        })?;
        append_results(&sweep.results_path, &block)?;
    }

    Ok(RunOutcome::Completed(RunSummary {
        k: state.k,
        photon: state.photon,
        results,
    }))
}

/// Exit status for a failed run: the code of the first [`PhotoError`] in the
/// chain, 1 for anything else.
pub fn exit_code(err: &eyre::Report) -> i32 {
    err.chain()
        .find_map(|e| e.downcast_ref::<PhotoError>())
        .map_or(1, PhotoError::exit_code)
}

pub struct PhotoApplication {
    args: Args,
    input: InputData,
}

impl PhotoApplication {
    pub fn from_cli() -> eyre::Result<Self> {
        let args = Args::parse_args(std::env::args_os())?;
        let input = InputData::load(&args.input)
            .wrap_err_with(|| format!("Unable to read input file: {}", args.input.display()))?;
        Ok(Self { args, input })
    }

    pub fn run(self) -> eyre::Result<()> {
        setup_output(self.args.output.as_ref(), self.args.verbose);
        info!("Reading input from: {}", self.args.input.display());

        let start = Instant::now();
        let options = RunOptions {
            dump: self.args.dump,
            parallel: self.args.parallel,
        };

        match execute(&self.input, &options).wrap_err("Photoionization run failed")? {
            RunOutcome::Dumped { k } => info!("Dump mode: k = {:.3}, stopping", k),
            RunOutcome::Completed(summary) => report_summary(&summary.results, start.elapsed()),
        }

        Ok(())
    }
}
