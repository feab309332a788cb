//! Argument-vector construction and synchronous invocation of the external
//! BEAST toolchain (`beast`, `logcombiner`, `treeannotator`) and the `augur`
//! conversion steps.
//!
//! Every invocation is blocking: the wrapper spawns the process, inherits its
//! stdio so progress is visible on the terminal, waits for completion, and
//! propagates a non-zero exit as a fatal error. There is no retry and no
//! partial-result salvage.

use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Help;
use itertools::Itertools;
use log::info;
use std::path::{Path, PathBuf};
use std::process::Command;

// ----------------------------------------------------------------------------
// External Command

/// A fully constructed command line for an external binary.
///
/// Construction is separate from invocation: usage errors in the argument
/// vector surface before any process spawns.
#[derive(Clone, Debug, PartialEq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory of the child process.
    pub cwd: Option<PathBuf>,
}

impl std::fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.program, self.args.iter().join(" "))
    }
}

impl ExternalCommand {
    pub fn new(program: &str, args: Vec<String>) -> Self {
        ExternalCommand { program: program.to_string(), args, cwd: None }
    }

    pub fn current_dir<P: AsRef<Path>>(mut self, cwd: P) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Run the command synchronously and propagate a non-zero exit.
    pub fn run(&self) -> Result<(), Report> {
        info!("Running: {self}");

        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }

        let status = command
            .status()
            .wrap_err_with(|| format!("Failed to launch external binary: {}", self.program))
            .suggestion(format!("Is '{}' installed and on your PATH?", self.program))?;

        if !status.success() {
            return Err(eyre!("External binary exited with {status}: {self}"));
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// BEAST Toolchain

/// Construct the `beast` command for a control file.
///
/// GPU mode is mutually exclusive with multi-threading: the sampler pins a
/// single instance to the device, so requesting both is a usage error raised
/// before invocation.
pub fn beast(
    control_file: &Path,
    chain_dir: &Path,
    use_gpu: bool,
    n_threads: u32,
) -> Result<ExternalCommand, Report> {
    if n_threads == 0 {
        return Err(eyre!("At least one thread is required."));
    }

    let mut args: Vec<String> = Vec::new();
    if use_gpu {
        if n_threads != 1 {
            return Err(eyre!(
                "GPU execution is incompatible with multi-threading (n_threads={n_threads})."
            )
            .suggestion("Please use --n-threads 1 with --use-gpu."));
        }
        args.extend(["-beagle_GPU", "-beagle_cuda", "-beagle_instances", "1"].map(String::from));
    } else {
        args.extend(["-beagle_CPU", "-beagle_SSE", "-beagle_instances"].map(String::from));
        args.push(n_threads.to_string());
    }
    args.push(control_file.display().to_string());

    Ok(ExternalCommand::new("beast", args).current_dir(chain_dir))
}

/// Construct a `logcombiner` command.
///
/// The tool both trims burn-in and concatenates; `-trees` switches it from
/// parameter logs to tree files. `resample` is forwarded as given, its
/// multiple-of-sampling-interval contract is enforced by the tool itself.
pub fn logcombiner(
    inputs: &[PathBuf],
    output: &Path,
    burn_in: u64,
    trees: bool,
    resample: Option<u64>,
) -> ExternalCommand {
    let mut args: Vec<String> = vec!["-burnin".to_string(), burn_in.to_string()];
    if trees {
        args.push("-trees".to_string());
    }
    if let Some(resample) = resample {
        args.push("-resample".to_string());
        args.push(resample.to_string());
    }
    args.extend(inputs.iter().map(|p| p.display().to_string()));
    args.push(output.display().to_string());

    ExternalCommand::new("logcombiner", args)
}

/// Construct a `treeannotator` command summarizing a posterior trees file
/// into a single maximum-clade-credibility tree.
pub fn treeannotator(trees: &Path, output: &Path, burn_in: u64) -> ExternalCommand {
    let args = vec![
        "-burnin".to_string(),
        burn_in.to_string(),
        trees.display().to_string(),
        output.display().to_string(),
    ];
    ExternalCommand::new("treeannotator", args)
}

/// Construct the `augur import beast` step: convert an MCC tree into a
/// Newick tree plus a node-data JSON keyed to calendar time.
pub fn augur_import(
    mcc_tree: &Path,
    output_tree: &Path,
    output_node_data: &Path,
    most_recent_tip_date: f64,
) -> ExternalCommand {
    let args = vec![
        "import".to_string(),
        "beast".to_string(),
        "--mcc".to_string(),
        mcc_tree.display().to_string(),
        "--most-recent-tip-date".to_string(),
        most_recent_tip_date.to_string(),
        "--output-tree".to_string(),
        output_tree.display().to_string(),
        "--output-node-data".to_string(),
        output_node_data.display().to_string(),
    ];
    ExternalCommand::new("augur", args)
}

/// Construct the `augur export v2` step: combine tree, node data, and viewer
/// config into a viewer-compatible dataset.
pub fn augur_export(
    tree: &Path,
    node_data: &Path,
    auspice_config: &Path,
    output: &Path,
) -> ExternalCommand {
    let args = vec![
        "export".to_string(),
        "v2".to_string(),
        "--tree".to_string(),
        tree.display().to_string(),
        "--node-data".to_string(),
        node_data.display().to_string(),
        "--auspice-config".to_string(),
        auspice_config.display().to_string(),
        "--output".to_string(),
        output.display().to_string(),
    ];
    ExternalCommand::new("augur", args)
}

#[cfg(test)]
mod tests;
