//! On-disk layout of posterior chains and Nexus phylogenies.
//!
//! A chain is a directory bundling four artifacts written by a single BEAST
//! run: the sampled-parameter log, the sampled-trees file, the operator
//! analysis, and the XML control file that fully specifies the run. Two
//! chains sample the same posterior iff their control files are
//! byte-identical, which is checked by content checksum.

use crate::table::Table;
use crate::utils;
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Help;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Sampled-parameter log, tab-delimited, first column `state`.
pub const LOG_FILE: &str = "posterior.log";
/// Sampled trees in Nexus format.
pub const TREES_FILE: &str = "posterior.trees";
/// Operator analysis. Intentionally empty for merged chains.
pub const OPS_FILE: &str = "posterior.ops";
/// XML run specification consumed by the sampler.
pub const CONTROL_FILE: &str = "control_file.xml";
/// Single Nexus phylogeny inside a tree directory.
pub const NEXUS_FILE: &str = "data.nex";

// ----------------------------------------------------------------------------
// Posterior Chain

/// One run's posterior sample directory.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PosteriorChain {
    /// Directory holding the four chain artifacts.
    pub path: PathBuf,
}

impl std::fmt::Display for PosteriorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl PosteriorChain {
    /// Point at a chain directory without checking its contents.
    ///
    /// Used for freshly allocated output directories that the external
    /// binaries have not populated yet.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        PosteriorChain { path: path.as_ref().to_path_buf() }
    }

    /// Open an existing chain directory, verifying all four artifacts exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Report> {
        let chain = Self::new(path);
        for file in [LOG_FILE, TREES_FILE, OPS_FILE, CONTROL_FILE] {
            let path = chain.path.join(file);
            if !path.is_file() {
                return Err(eyre!("Chain artifact is missing: {path:?}")
                    .suggestion("Is this directory a BEAST posterior chain?"));
            }
        }
        Ok(chain)
    }

    pub fn log_path(&self) -> PathBuf {
        self.path.join(LOG_FILE)
    }

    pub fn trees_path(&self) -> PathBuf {
        self.path.join(TREES_FILE)
    }

    pub fn ops_path(&self) -> PathBuf {
        self.path.join(OPS_FILE)
    }

    pub fn control_path(&self) -> PathBuf {
        self.path.join(CONTROL_FILE)
    }

    /// Content checksum of the control file, the chain's identity.
    pub fn checksum(&self) -> Result<String, Report> {
        utils::sha256_file(&self.control_path())
            .wrap_err_with(|| format!("Failed to checksum control file of chain: {self}"))
    }

    /// Read the sampled-parameter log into a table.
    pub fn read_log(&self) -> Result<Table<String>, Report> {
        let log = Table::read(&self.log_path(), Some('\t'))?;
        if log.headers.first().map(String::as_str) != Some("state") {
            return Err(eyre!(
                "First column of posterior log is not 'state': {:?}",
                self.log_path()
            ));
        }
        Ok(log)
    }
}

/// Require one shared control-file checksum across chains.
///
/// Note this is textual equality of the control files, not semantic
/// equivalence of the models they specify.
pub fn shared_checksum(chains: &[PosteriorChain]) -> Result<String, Report> {
    if chains.is_empty() {
        return Err(eyre!("At least one chain is required."));
    }
    let checksums: Vec<String> =
        chains.iter().map(|c| c.checksum()).collect::<Result<Vec<_>, Report>>()?;
    let unique = checksums.iter().unique().collect_vec();
    if unique.len() > 1 {
        return Err(eyre!(
            "Chains do not share a posterior distribution as they were generated \
             with different inputs/parameters/priors, so they cannot be combined."
        )
        .suggestion("All chains must be produced from one identical control file."));
    }
    Ok(checksums[0].clone())
}

/// Last generation index and sampling step of a posterior log.
///
/// Computed from the final two `state` values; used to bound the burn-in
/// slider of the trace dashboard.
pub fn generation_bounds(log: &Table<String>) -> Result<(u64, u64), Report> {
    let states = log.get_column("state")?;
    if states.len() < 2 {
        return Err(eyre!("Posterior log has fewer than two sampled generations."));
    }
    let end: u64 = states[states.len() - 1]
        .parse()
        .wrap_err_with(|| format!("Failed to parse generation index: {}", states[states.len() - 1]))?;
    let prev: u64 = states[states.len() - 2]
        .parse()
        .wrap_err_with(|| format!("Failed to parse generation index: {}", states[states.len() - 2]))?;
    Ok((end, end - prev))
}

// ----------------------------------------------------------------------------
// Nexus Tree

/// A single summarized phylogeny directory.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct NexusTree {
    /// Directory holding the Nexus file.
    pub path: PathBuf,
}

impl NexusTree {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        NexusTree { path: path.as_ref().to_path_buf() }
    }

    /// Open an existing tree directory, verifying the Nexus file exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Report> {
        let tree = Self::new(path);
        let nexus = tree.nexus_path();
        if !nexus.is_file() {
            return Err(eyre!("Nexus file is missing: {nexus:?}"));
        }
        Ok(tree)
    }

    pub fn nexus_path(&self) -> PathBuf {
        self.path.join(NEXUS_FILE)
    }
}

#[cfg(test)]
pub mod tests;
