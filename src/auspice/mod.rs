//! Stage a maximum-clade-credibility tree for the Auspice viewer.
//!
//! Two external conversion steps produce the viewer dataset: `augur import
//! beast` turns the Nexus summary tree into a Newick tree plus node-data
//! JSON, and `augur export v2` combines those with a viewer config into a
//! dataset file. The remainder is path plumbing: an HTML shell, the
//! available-dataset manifest, and the data endpoint directory.

use crate::chain::NexusTree;
use crate::{exec, utils};
use chrono::Local;
use clap::Parser;
use color_eyre::eyre::{Report, Result, WrapErr};
use indoc::formatdoc;
use log::info;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Name of the staged viewer dataset.
pub const DATASET_NAME: &str = "beast-mcc";

/// Arguments for the viewer export.
#[derive(Clone, Debug, Parser)]
#[clap(verbatim_doc_comment)]
pub struct Args {
    /// Maximum-clade-credibility tree directory.
    #[clap(short = 't', long, required = true)]
    pub tree: PathBuf,

    /// Collection time of the most recent sample, in decimal years.
    ///
    /// Anchors the tree's relative node times to calendar time.
    #[clap(long, required = true)]
    pub most_recent_tip_date: f64,

    /// Dataset title shown by the viewer.
    #[clap(long, default_value = "BEAST maximum clade credibility tree")]
    pub title: String,

    /// Output directory for the staged viewer assets.
    #[clap(short = 'o', long, required = true)]
    pub output_dir: PathBuf,
}

/// Paths of everything staged into the output directory.
#[derive(Clone, Debug, PartialEq)]
pub struct Staging {
    pub tree: PathBuf,
    pub node_data: PathBuf,
    pub config: PathBuf,
    pub dataset: PathBuf,
    pub manifest: PathBuf,
    pub index: PathBuf,
}

impl Staging {
    /// Lay out the staging paths under an output directory.
    pub fn new(output_dir: &Path) -> Self {
        Staging {
            tree: output_dir.join("tree.nwk"),
            node_data: output_dir.join("node_data.json"),
            config: output_dir.join("auspice_config.json"),
            dataset: output_dir.join("dataset").join(format!("{DATASET_NAME}.json")),
            manifest: output_dir.join("datasets.json"),
            index: output_dir.join("index.html"),
        }
    }
}

fn viewer_config(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "panels": ["tree"],
        "colorings": [
            {"key": "num_date", "title": "Sampling date", "type": "continuous"}
        ],
        "display_defaults": {"branch_label": "none"}
    })
}

fn dataset_manifest() -> serde_json::Value {
    json!({
        "generated": Local::now().to_rfc3339(),
        "datasets": [
            {"request": DATASET_NAME, "url": format!("dataset/{DATASET_NAME}.json")}
        ]
    })
}

fn index_shell(title: &str) -> String {
    formatdoc! {r#"
        <!DOCTYPE html>
        <html>
        <head>
          <meta charset="utf-8"/>
          <title>{title}</title>
        </head>
        <body>
          <p>{title}</p>
          <p>Serve this directory with Auspice to browse the phylogeny:</p>
          <pre>auspice view --datasetDir dataset</pre>
        </body>
        </html>"#}
}

/// Convert the summary tree and stage the viewer layout.
pub fn export(args: &Args) -> Result<(), Report> {
    let tree = NexusTree::open(&args.tree)?;

    let output_dir = utils::create_fresh_dir(&args.output_dir)?;
    let staging = Staging::new(&output_dir);

    // import: summary tree -> newick + node-data keyed to calendar time
    exec::augur_import(
        &tree.nexus_path(),
        &staging.tree,
        &staging.node_data,
        args.most_recent_tip_date,
    )
    .run()?;

    // export: tree + node-data + config -> viewer dataset
    let config = serde_json::to_string_pretty(&viewer_config(&args.title))
        .wrap_err("Failed to serialize the viewer config.")?;
    std::fs::write(&staging.config, config)
        .wrap_err_with(|| format!("Failed to write viewer config: {:?}", staging.config))?;

    std::fs::create_dir_all(output_dir.join("dataset"))
        .wrap_err("Failed to create the dataset directory.")?;
    exec::augur_export(&staging.tree, &staging.node_data, &staging.config, &staging.dataset)
        .run()?;

    // static assets: HTML shell and available-dataset manifest
    let manifest = serde_json::to_string_pretty(&dataset_manifest())
        .wrap_err("Failed to serialize the dataset manifest.")?;
    std::fs::write(&staging.manifest, manifest)
        .wrap_err_with(|| format!("Failed to write manifest: {:?}", staging.manifest))?;
    std::fs::write(&staging.index, index_shell(&args.title))
        .wrap_err_with(|| format!("Failed to write viewer shell: {:?}", staging.index))?;

    info!("Viewer assets staged in: {output_dir:?}");
    Ok(())
}

#[cfg(test)]
mod tests;
