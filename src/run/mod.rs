//! Template a control file and run the sampler, producing a posterior chain.

use crate::chain::PosteriorChain;
use crate::table::Table;
use crate::template;
use crate::template::{BaseFreq, Clock, Coalescent, GtrModel, Mcmc};
use crate::{exec, utils};
use clap::Parser;
use color_eyre::eyre::{Report, Result, WrapErr};
use log::info;
use std::path::PathBuf;

// ----------------------------------------------------------------------------
// Shared Arguments

/// MCMC and parallelization arguments shared by both analyses.
#[derive(Clone, Debug, Parser)]
pub struct RunArgs {
    /// Number of MCMC generations.
    #[clap(long, required = true)]
    pub n_generations: u64,

    /// Sample the posterior every n generations.
    #[clap(long, required = true)]
    pub sample_every: u64,

    /// Print progress to screen every n generations.
    ///
    /// Defaults to the sampling interval.
    #[clap(long)]
    pub print_every: Option<u64>,

    /// Name of the metadata column holding the collection time (decimal years).
    #[clap(long, default_value = "time")]
    pub time_column: String,

    /// Name of the metadata column holding the collection-time uncertainty.
    #[clap(long)]
    pub uncertainty_column: Option<String>,

    /// Run the sampler on a GPU device.
    ///
    /// Incompatible with more than one thread.
    #[clap(long)]
    pub use_gpu: bool,

    /// Number of sampler instances on CPU.
    #[clap(long, default_value_t = 1)]
    pub n_threads: u32,

    /// Output directory for the posterior chain.
    ///
    /// Must not exist yet, each chain exclusively owns its directory.
    #[clap(short = 'o', long, required = true)]
    pub output_dir: PathBuf,
}

impl RunArgs {
    pub fn mcmc(&self) -> Mcmc {
        Mcmc {
            n_generations: self.n_generations,
            sample_every: self.sample_every,
            print_every: self.print_every,
        }
    }
}

// ----------------------------------------------------------------------------
// GTR Single Partition

/// Arguments of the GTR single-partition analysis.
#[derive(Clone, Debug, Parser)]
#[clap(verbatim_doc_comment)]
pub struct GtrArgs {
    /// Sample metadata (TSV/CSV) with id, Sequence, and time columns.
    #[clap(short = 'a', long, required = true)]
    pub alignment: PathBuf,

    /// Base frequency treatment.
    #[clap(long, value_enum, default_value_t = BaseFreq::default())]
    pub base_freq: BaseFreq,

    /// Number of gamma rate categories of the site model.
    #[clap(long, default_value_t = 4)]
    pub site_gamma: u32,

    /// Estimate a proportion of invariant sites.
    #[clap(long, action = clap::ArgAction::Set, default_value_t = true)]
    pub site_invariant: bool,

    /// Molecular clock model.
    #[clap(long, value_enum, default_value_t = Clock::default())]
    pub clock: Clock,

    /// Coalescent population model.
    #[clap(long, value_enum, default_value_t = Coalescent::default())]
    pub coalescent_model: Coalescent,

    /// Number of skygrid intervals. Required for the skygrid coalescent.
    #[clap(long)]
    pub skygrid_intervals: Option<u32>,

    /// Skygrid time span in years before the most recent sample.
    /// Required for the skygrid coalescent.
    #[clap(long)]
    pub skygrid_duration: Option<f64>,

    #[clap(flatten)]
    pub run: RunArgs,
}

impl GtrArgs {
    pub fn model(&self) -> GtrModel {
        GtrModel {
            base_freq: self.base_freq,
            site_gamma: self.site_gamma,
            site_invariant: self.site_invariant,
            clock: self.clock,
            coalescent: self.coalescent_model,
            skygrid_intervals: self.skygrid_intervals,
            skygrid_duration: self.skygrid_duration,
        }
    }
}

/// Run the GTR single-partition analysis.
pub fn gtr_single_partition(args: &GtrArgs) -> Result<PosteriorChain, Report> {
    let metadata = Table::read(&args.alignment, None)?;
    let samples = template::join_samples(
        &metadata,
        &args.run.time_column,
        args.run.uncertainty_column.as_deref(),
    )?;
    info!("Templating control file for {} samples.", samples.len());

    // render before any file or directory is created, so configuration
    // errors leave no partial output behind
    let control = template::render_gtr_single_partition(&samples, &args.model(), &args.run.mcmc())?;

    run_beast(control, &args.run)
}

// ----------------------------------------------------------------------------
// Site Heterogeneous HKY

/// Arguments of the site-heterogeneous HKY analysis.
#[derive(Clone, Debug, Parser)]
#[clap(verbatim_doc_comment)]
pub struct HkyArgs {
    /// Coding-region sample metadata (TSV/CSV) with id, Sequence, and time columns.
    #[clap(long, required = true)]
    pub coding_regions: PathBuf,

    /// Non-coding-region sample metadata (TSV/CSV) with id and Sequence columns.
    #[clap(long, required = true)]
    pub noncoding_regions: PathBuf,

    #[clap(flatten)]
    pub run: RunArgs,
}

/// Run the site-heterogeneous HKY analysis over a coding/non-coding pair.
pub fn site_heterogeneous_hky(args: &HkyArgs) -> Result<PosteriorChain, Report> {
    let coding = Table::read(&args.coding_regions, None)?;
    let noncoding = Table::read(&args.noncoding_regions, None)?;
    let samples = template::join_partitioned(
        &coding,
        &noncoding,
        &args.run.time_column,
        args.run.uncertainty_column.as_deref(),
    )?;
    info!("Templating control file for {} partitioned samples.", samples.len());

    let control = template::render_site_heterogeneous_hky(&samples, &args.run.mcmc())?;

    run_beast(control, &args.run)
}

// ----------------------------------------------------------------------------
// Execution

/// Write the control file into a fresh chain directory and invoke the sampler.
fn run_beast(control: String, args: &RunArgs) -> Result<PosteriorChain, Report> {
    // the GPU/thread conflict is checked before any file is written
    let command = exec::beast(
        std::path::Path::new(crate::chain::CONTROL_FILE),
        &args.output_dir,
        args.use_gpu,
        args.n_threads,
    )?;

    let chain = PosteriorChain::new(utils::create_fresh_dir(&args.output_dir)?);
    std::fs::write(chain.control_path(), control)
        .wrap_err_with(|| format!("Failed to write control file: {:?}", chain.control_path()))?;

    command.run()?;

    info!("Posterior chain written to: {chain}");
    Ok(chain)
}

#[cfg(test)]
mod tests;
