//! Registration of formats, semantic types, and actions with a host
//! framework.
//!
//! The host's registry is an explicit collaborator passed in at process
//! start, not ambient global state. The crate ships an in-memory registry so
//! the CLI can list the registered surface; a real host supplies its own
//! [`Registry`] implementation and receives the identical declarations.

use crate::table::Table;
use clap::Parser;
use color_eyre::eyre::{eyre, Report, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use strum::IntoEnumIterator;

// ----------------------------------------------------------------------------
// Formats and Semantic Types

/// On-disk file and directory formats declared by this plugin.
#[derive(Clone, Copy, Debug, Deserialize, EnumIter, PartialEq, Serialize)]
pub enum Format {
    /// Tab-delimited sampled-parameter log, first column `state`.
    PosteriorLog,
    /// Nexus tree file.
    Nexus,
    /// BEAST XML run specification.
    ControlFile,
    /// Operator-weight log, may be intentionally empty.
    OpsFile,
    /// Directory bundling log, trees, ops, and control file.
    PosteriorDir,
    /// Directory holding a single Nexus phylogeny.
    NexusDir,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Typed semantic categories of the plugin's artifacts.
#[derive(Clone, Copy, Debug, Deserialize, EnumIter, PartialEq, Serialize)]
pub enum SemanticType {
    /// A chain of posterior samples produced by the sampler.
    ChainBeast,
    /// A maximum-clade-credibility phylogeny.
    PhylogenyMcc,
}

impl SemanticType {
    /// The artifact format backing the semantic type.
    pub fn format(&self) -> Format {
        match self {
            SemanticType::ChainBeast => Format::PosteriorDir,
            SemanticType::PhylogenyMcc => Format::NexusDir,
        }
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            SemanticType::ChainBeast => "Chain[BEAST]",
            SemanticType::PhylogenyMcc => "Phylogeny[MCC]",
        };
        write!(f, "{}", name)
    }
}

// ----------------------------------------------------------------------------
// Actions

/// A typed input or output slot of an action.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Slot {
    pub name: &'static str,
    pub semantic: SemanticType,
    /// True for list-valued slots (ex. the chains of a merge).
    pub collection: bool,
}

/// One registered operation with its typed surface.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub inputs: Vec<Slot>,
    /// Plain parameters as name and type description.
    pub parameters: Vec<(&'static str, &'static str)>,
    pub outputs: Vec<Slot>,
}

fn slot(name: &'static str, semantic: SemanticType) -> Slot {
    Slot { name, semantic, collection: false }
}

fn slot_list(name: &'static str, semantic: SemanticType) -> Slot {
    Slot { name, semantic, collection: true }
}

/// The plugin's action declarations.
pub fn actions() -> Vec<ActionSpec> {
    vec![
        ActionSpec {
            name: "gtr-single-partition",
            description: "Sample a posterior under a GTR single-partition model.",
            inputs: Vec::new(),
            parameters: vec![
                ("alignment", "metadata"),
                ("time", "metadata column"),
                ("time-uncertainty", "metadata column"),
                ("n-generations", "positive int"),
                ("sample-every", "positive int"),
                ("print-every", "positive int"),
                ("base-freq", "estimated | empirical"),
                ("site-gamma", "positive int"),
                ("site-invariant", "bool"),
                ("clock", "strict | ucln"),
                ("coalescent-model", "constant | exponential | skygrid"),
                ("skygrid-intervals", "positive int"),
                ("skygrid-duration", "positive float"),
                ("use-gpu", "bool"),
                ("n-threads", "positive int"),
            ],
            outputs: vec![slot("chain", SemanticType::ChainBeast)],
        },
        ActionSpec {
            name: "site-heterogeneous-hky",
            description: "Sample a posterior under per-partition HKY models.",
            inputs: Vec::new(),
            parameters: vec![
                ("coding-regions", "metadata"),
                ("noncoding-regions", "metadata"),
                ("time", "metadata column"),
                ("time-uncertainty", "metadata column"),
                ("n-generations", "positive int"),
                ("sample-every", "positive int"),
                ("print-every", "positive int"),
                ("use-gpu", "bool"),
                ("n-threads", "positive int"),
            ],
            outputs: vec![slot("chain", SemanticType::ChainBeast)],
        },
        ActionSpec {
            name: "merge-chains",
            description: "Combine chains that sample one shared posterior.",
            inputs: vec![slot_list("chains", SemanticType::ChainBeast)],
            parameters: vec![
                ("burn-in", "non-negative int, one shared or one per chain"),
                ("resample", "positive int"),
            ],
            outputs: vec![slot("posterior", SemanticType::ChainBeast)],
        },
        ActionSpec {
            name: "maximum-clade-credibility",
            description: "Summarize a chain into a single MCC phylogeny.",
            inputs: vec![slot("posterior", SemanticType::ChainBeast)],
            parameters: vec![("burn-in", "non-negative int")],
            outputs: vec![slot("tree", SemanticType::PhylogenyMcc)],
        },
        ActionSpec {
            name: "traceplot",
            description: "Render the interactive trace dashboard for chains.",
            inputs: vec![slot_list("chains", SemanticType::ChainBeast)],
            parameters: vec![("parameters", "posterior log columns")],
            outputs: Vec::new(),
        },
        ActionSpec {
            name: "auspice-export",
            description: "Stage an MCC phylogeny for the Auspice viewer.",
            inputs: vec![slot("tree", SemanticType::PhylogenyMcc)],
            parameters: vec![("most-recent-tip-date", "decimal year")],
            outputs: Vec::new(),
        },
    ]
}

// ----------------------------------------------------------------------------
// Registry

/// The host framework's registration surface.
pub trait Registry {
    fn register_format(&mut self, format: Format) -> Result<(), Report>;
    fn register_semantic_type(
        &mut self,
        semantic: SemanticType,
        format: Format,
    ) -> Result<(), Report>;
    fn register_action(&mut self, action: ActionSpec) -> Result<(), Report>;
}

/// Register every format, semantic type, and action with a host registry.
///
/// Called exactly once at process start.
pub fn register<R: Registry>(registry: &mut R) -> Result<(), Report> {
    for format in Format::iter() {
        registry.register_format(format)?;
    }
    for semantic in SemanticType::iter() {
        registry.register_semantic_type(semantic, semantic.format())?;
    }
    for action in actions() {
        registry.register_action(action)?;
    }
    Ok(())
}

/// In-memory registry used by the CLI.
#[derive(Clone, Debug, Default)]
pub struct MemoryRegistry {
    pub formats: Vec<Format>,
    pub semantic_types: Vec<(SemanticType, Format)>,
    pub actions: Vec<ActionSpec>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Registry for MemoryRegistry {
    fn register_format(&mut self, format: Format) -> Result<(), Report> {
        if self.formats.contains(&format) {
            return Err(eyre!("Format is already registered: {format}"));
        }
        self.formats.push(format);
        Ok(())
    }

    fn register_semantic_type(
        &mut self,
        semantic: SemanticType,
        format: Format,
    ) -> Result<(), Report> {
        if !self.formats.contains(&format) {
            return Err(eyre!("Semantic type {semantic} is bound to an unregistered format: {format}"));
        }
        self.semantic_types.push((semantic, format));
        Ok(())
    }

    fn register_action(&mut self, action: ActionSpec) -> Result<(), Report> {
        if self.actions.iter().any(|a| a.name == action.name) {
            return Err(eyre!("Action is already registered: {}", action.name));
        }
        self.actions.push(action);
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Listing

/// Arguments for listing the registered actions.
#[derive(Clone, Debug, Parser)]
pub struct ListArgs {
    /// Restrict the listing to one action name.
    #[clap(short = 'n', long)]
    pub name: Option<String>,
}

/// Tabulate the registered actions.
pub fn list_actions(registry: &MemoryRegistry, args: &ListArgs) -> Result<Table<String>, Report> {
    let mut table = Table::new();
    table.headers =
        vec!["Action", "Inputs", "Parameters", "Outputs"].into_iter().map(String::from).collect();

    for action in &registry.actions {
        if let Some(name) = &args.name {
            if action.name != name.as_str() {
                continue;
            }
        }
        let fmt_slot = |s: &Slot| match s.collection {
            true => format!("{}: List[{}]", s.name, s.semantic),
            false => format!("{}: {}", s.name, s.semantic),
        };
        let row = vec![
            action.name.to_string(),
            action.inputs.iter().map(fmt_slot).join("; "),
            action.parameters.iter().map(|(name, _)| *name).join("; "),
            action.outputs.iter().map(fmt_slot).join("; "),
        ];
        table.rows.push(row);
    }

    Ok(table)
}
