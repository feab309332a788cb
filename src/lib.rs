//! `beastpipe` orchestrates the BEAST phylogenetics toolchain.
//!
//! The heavy computation (MCMC sampling, tree annotation) is delegated
//! entirely to the external `beast`, `logcombiner`, `treeannotator`, and
//! `augur` binaries, invoked synchronously via their command-line contracts.
//! This crate contributes the glue around them:
//!
//! 1. **Control-file templating**: fills BEAST XML templates with sample
//!    metadata (sequence, sampling time, uncertainty) and run parameters.
//! 1. **Chain merging**: validates that chains originate from identical
//!    control files (by checksum), strips burn-in, and combines logs/trees.
//! 1. **Diagnostics**: renders an interactive trace dashboard with
//!    convergence statistics, and stages phylogeny exports for the Auspice
//!    viewer.

pub mod auspice;
pub mod chain;
pub mod cli;
pub mod exec;
pub mod merge;
pub mod plugin;
pub mod run;
pub mod summarize;
pub mod table;
pub mod template;
pub mod trace;
pub mod utils;

#[doc(inline)]
pub use crate::chain::PosteriorChain;
#[doc(inline)]
pub use crate::cli::Cli;
#[doc(inline)]
pub use crate::table::Table;
#[doc(inline)]
pub use crate::utils::verbosity::Verbosity;
