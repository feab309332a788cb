//! Summarize a posterior chain into a maximum-clade-credibility tree.

use crate::chain::{NexusTree, PosteriorChain};
use crate::{exec, utils};
use clap::Parser;
use color_eyre::eyre::{Report, Result};
use log::info;
use std::path::PathBuf;

/// Arguments for maximum-clade-credibility summarization.
#[derive(Clone, Debug, Parser)]
#[clap(verbatim_doc_comment)]
pub struct Args {
    /// Posterior chain directory to summarize.
    #[clap(short = 'p', long, required = true)]
    pub posterior: PathBuf,

    /// Burn-in generations to discard before summarizing.
    #[clap(short = 'b', long, default_value_t = 0)]
    pub burn_in: u64,

    /// Output directory for the summary tree.
    #[clap(short = 'o', long, required = true)]
    pub output_dir: PathBuf,
}

/// Derive the single summary phylogeny maximizing total clade posterior
/// support from a chain's sampled trees.
pub fn maximum_clade_credibility(args: &Args) -> Result<NexusTree, Report> {
    let posterior = PosteriorChain::open(&args.posterior)?;

    let result = NexusTree::new(utils::create_fresh_dir(&args.output_dir)?);
    exec::treeannotator(&posterior.trees_path(), &result.nexus_path(), args.burn_in).run()?;

    info!("Maximum-clade-credibility tree written to: {:?}", result.nexus_path());
    Ok(result)
}

#[cfg(test)]
mod tests;
