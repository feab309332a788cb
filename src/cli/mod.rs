//! [Command-line interface](Cli) (CLI) of the main binary.

use crate::{auspice, merge, plugin, run, summarize, trace, Verbosity};
use clap::{Parser, Subcommand};

// ----------------------------------------------------------------------------
// CLI Entry Point
// ----------------------------------------------------------------------------

/// The command-line interface (CLI).
///
/// Parses user input from the command-line in the main function.
/// ```no_run
/// use clap::Parser;
/// let args = beastpipe::Cli::parse();
/// ```
#[derive(Debug, Parser)]
#[clap(name = "beastpipe", author, version)]
#[clap(about = "beastpipe orchestrates BEAST phylogenetic analyses: control-file templating, chain merging, and convergence diagnostics.")]
pub struct Cli {
    /// Pass CLI arguments to a particular [Command].
    #[clap(subcommand)]
    #[clap(help = "Set the command.")]
    pub command: Command,

    /// Set the output [Verbosity] level.
    #[clap(short = 'v', long)]
    #[clap(value_enum, default_value_t = Verbosity::default())]
    #[clap(global = true)]
    #[clap(help = "Set the output verbosity level.")]
    pub verbosity: Verbosity,
}

/// CLI [commands](#variants). Used to decide which operation the CLI
/// arguments should be passed to.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sample a posterior under a GTR single-partition model.
    #[clap(about = "Sample a posterior under a GTR single-partition model.")]
    GtrSinglePartition(run::GtrArgs),

    /// Sample a posterior under per-partition HKY substitution models.
    #[clap(about = "Sample a posterior under per-partition HKY models.")]
    SiteHeterogeneousHky(run::HkyArgs),

    /// Combine posterior chains that sample one shared posterior.
    #[clap(about = "Combine posterior chains that sample one shared posterior.")]
    MergeChains(merge::Args),

    /// Summarize a chain into a maximum-clade-credibility phylogeny.
    #[clap(about = "Summarize a chain into a maximum-clade-credibility phylogeny.")]
    MaximumCladeCredibility(summarize::Args),

    /// Render the interactive trace dashboard for posterior chains.
    #[clap(about = "Render the interactive trace dashboard for posterior chains.")]
    Traceplot(trace::Args),

    /// Stage a maximum-clade-credibility tree for the Auspice viewer.
    #[clap(about = "Stage a maximum-clade-credibility tree for the Auspice viewer.")]
    AuspiceExport(auspice::Args),

    /// List the actions registered with the host framework.
    #[clap(about = "List registered actions.")]
    Actions(plugin::ListArgs),
}
