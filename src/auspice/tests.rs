use crate::auspice;
use crate::auspice::{Args, Staging};

use clap::Parser;
use color_eyre::eyre::{Report, Result};
use std::path::Path;
use tempfile::TempDir;

#[test]
fn staging_layout() -> Result<(), Report> {
    let staging = Staging::new(Path::new("viewer"));

    assert_eq!(Path::new("viewer/tree.nwk"), staging.tree);
    assert_eq!(Path::new("viewer/node_data.json"), staging.node_data);
    assert_eq!(Path::new("viewer/dataset/beast-mcc.json"), staging.dataset);
    assert_eq!(Path::new("viewer/datasets.json"), staging.manifest);
    assert_eq!(Path::new("viewer/index.html"), staging.index);
    Ok(())
}

#[test]
fn missing_tree_fails_before_any_output() -> Result<(), Report> {
    let dir = TempDir::new()?;
    let args = Args::parse_from([
        "auspice-export",
        "--tree",
        dir.path().join("mcc").to_str().unwrap(),
        "--most-recent-tip-date",
        "2019.7",
        "--output-dir",
        dir.path().join("viewer").to_str().unwrap(),
    ]);

    assert!(auspice::export(&args).is_err());
    assert!(!args.output_dir.exists());
    Ok(())
}
