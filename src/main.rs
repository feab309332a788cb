use beastpipe::cli::{Cli, Command};
use beastpipe::{auspice, merge, plugin, run, summarize, trace};
use clap::Parser;
use color_eyre::eyre::{Report, Result};

fn main() -> Result<(), Report> {
    // ------------------------------------------------------------------------
    // CLI Setup

    // Parse CLI parameters
    let args = Cli::parse();

    // initialize color_eyre crate for colorized logs
    color_eyre::install()?;

    // Set logging/verbosity level via RUST_LOG
    std::env::set_var("RUST_LOG", args.verbosity.to_string());

    // initialize env_logger crate for logging/verbosity level
    env_logger::init();

    // the host registry is an explicit collaborator, populated once at
    // process start
    let mut registry = plugin::MemoryRegistry::new();
    plugin::register(&mut registry)?;

    // check which CLI command we're running
    match args.command {
        Command::GtrSinglePartition(args) => _ = run::gtr_single_partition(&args)?,
        Command::SiteHeterogeneousHky(args) => _ = run::site_heterogeneous_hky(&args)?,
        Command::MergeChains(args) => _ = merge::merge_chains(&args)?,
        Command::MaximumCladeCredibility(args) => _ = summarize::maximum_clade_credibility(&args)?,
        Command::Traceplot(args) => trace::traceplot(&args)?,
        Command::AuspiceExport(args) => auspice::export(&args)?,
        // List registered actions as a table
        Command::Actions(args) => {
            println!("\n{}", plugin::list_actions(&registry, &args)?.to_markdown()?)
        }
    }

    Ok(())
}
