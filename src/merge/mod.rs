//! Merge posterior chains that sample one shared posterior distribution.
//!
//! Chains are only mergeable when they were produced from one identical
//! control file, checked by content checksum. The external combiner applies
//! a single burn-in to all of its inputs, so per-chain burn-ins require one
//! trimming invocation per chain per stream before the final merge.

use crate::chain;
use crate::chain::PosteriorChain;
use crate::exec;
use crate::exec::ExternalCommand;
use crate::utils;
use clap::Parser;
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Help;
use log::info;
use std::path::{Path, PathBuf};

// ----------------------------------------------------------------------------
// Arguments

/// Arguments for merging posterior chains.
#[derive(Clone, Debug, Parser)]
#[clap(verbatim_doc_comment)]
pub struct Args {
    /// Posterior chain directories to merge.
    #[clap(short = 'c', long, required = true, num_args = 1..)]
    pub chains: Vec<PathBuf>,

    /// Burn-in generations to discard: one shared value, or one per chain.
    #[clap(short = 'b', long, required = true, num_args = 1..)]
    pub burn_in: Vec<u64>,

    /// Resample (thin) the merged chain to this generation interval.
    ///
    /// Must be a positive multiple of the original sampling interval; the
    /// multiple-of contract is enforced by the combiner itself.
    #[clap(long)]
    pub resample: Option<u64>,

    /// Output directory for the merged chain.
    #[clap(short = 'o', long, required = true)]
    pub output_dir: PathBuf,
}

// ----------------------------------------------------------------------------
// Combiner Plan

/// One planned `logcombiner` invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct CombinerCall {
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    pub burn_in: u64,
    pub trees: bool,
    pub resample: Option<u64>,
}

impl CombinerCall {
    pub fn command(&self) -> ExternalCommand {
        exec::logcombiner(&self.inputs, &self.output, self.burn_in, self.trees, self.resample)
    }
}

/// Plan the combiner invocations for a merge.
///
/// Pure path construction: nothing is created on disk, so configuration
/// errors are raised before any output exists.
pub fn plan(
    chains: &[PosteriorChain],
    burn_in: &[u64],
    resample: Option<u64>,
    result: &PosteriorChain,
    scratch: &Path,
) -> Result<Vec<CombinerCall>, Report> {
    if burn_in.len() != 1 && burn_in.len() != chains.len() {
        return Err(eyre!(
            "Number of burn-in values ({}) is neither 1 nor the number of chains ({}).",
            burn_in.len(),
            chains.len()
        ))
        .suggestion("Pass one shared burn-in, or exactly one per chain.");
    }
    if resample == Some(0) {
        return Err(eyre!("Resample interval must be positive."));
    }

    let mut calls = Vec::new();

    let (log_inputs, trees_inputs, merge_burn_in) = if burn_in.len() > 1 {
        // the combiner applies one burn-in to all inputs, so differing
        // burn-ins are stripped chain by chain first
        let mut logs = Vec::new();
        let mut trees = Vec::new();
        for (i, (chain, burn_in)) in chains.iter().zip(burn_in.iter()).enumerate() {
            let log = scratch.join(format!("chain_{i}.log"));
            calls.push(CombinerCall {
                inputs: vec![chain.log_path()],
                output: log.clone(),
                burn_in: *burn_in,
                trees: false,
                resample: None,
            });
            logs.push(log);

            let tree = scratch.join(format!("chain_{i}.trees"));
            calls.push(CombinerCall {
                inputs: vec![chain.trees_path()],
                output: tree.clone(),
                burn_in: *burn_in,
                trees: true,
                resample: None,
            });
            trees.push(tree);
        }
        // per-chain burn-in is already gone, the merge itself discards nothing
        (logs, trees, 0)
    } else {
        let logs = chains.iter().map(|c| c.log_path()).collect();
        let trees = chains.iter().map(|c| c.trees_path()).collect();
        (logs, trees, burn_in[0])
    };

    // resampling applies only to the final merge
    calls.push(CombinerCall {
        inputs: log_inputs,
        output: result.log_path(),
        burn_in: merge_burn_in,
        trees: false,
        resample,
    });
    calls.push(CombinerCall {
        inputs: trees_inputs,
        output: result.trees_path(),
        burn_in: merge_burn_in,
        trees: true,
        resample,
    });

    Ok(calls)
}

// ----------------------------------------------------------------------------
// Merge

/// Package the merged chain directory before the combiner runs.
///
/// The control file is copied byte for byte from the first chain, carrying
/// over the shared checksum. The operators file is intentionally empty:
/// operator weights are not meaningfully mergeable across a combined chain.
pub fn prepare_output(
    chains: &[PosteriorChain],
    output_dir: &Path,
) -> Result<PosteriorChain, Report> {
    let result = PosteriorChain::new(utils::create_fresh_dir(&output_dir)?);

    std::fs::copy(chains[0].control_path(), result.control_path())
        .wrap_err_with(|| format!("Failed to copy control file to: {result}"))?;
    std::fs::write(result.ops_path(), "")
        .wrap_err_with(|| format!("Failed to create operators placeholder in: {result}"))?;

    Ok(result)
}

/// Merge posterior chains into a single combined chain.
pub fn merge_chains(args: &Args) -> Result<PosteriorChain, Report> {
    let chains = args
        .chains
        .iter()
        .map(PosteriorChain::open)
        .collect::<Result<Vec<_>, Report>>()?;

    // cheap compatibility check before any expensive work
    let checksum = chain::shared_checksum(&chains)?;
    info!("Merging {} chains with control-file checksum {checksum}.", chains.len());

    // configuration errors surface before the output directory is allocated
    let scratch = tempfile::tempdir().wrap_err("Failed to create scratch directory.")?;
    let result = PosteriorChain::new(&args.output_dir);
    let calls = plan(&chains, &args.burn_in, args.resample, &result, scratch.path())?;

    let result = prepare_output(&chains, &args.output_dir)?;

    for call in &calls {
        call.command().run()?;
    }

    info!("Merged chain written to: {result}");
    Ok(result)
}
