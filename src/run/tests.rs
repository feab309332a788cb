use crate::run::{gtr_single_partition, GtrArgs};

use clap::Parser;
use color_eyre::eyre::{Report, Result};
use std::fs;
use tempfile::TempDir;

fn gtr_args(dir: &TempDir, extra: &[&str]) -> Result<GtrArgs, Report> {
    let metadata = dir.path().join("samples.tsv");
    fs::write(
        &metadata,
        "id\tSequence\ttime\nEBOV/A\tACGT\t2014.2\nEBOV/B\tACGA\t2014.6\n",
    )?;

    let output_dir = dir.path().join("chain");
    let mut input = vec![
        "gtr-single-partition",
        "--alignment",
        metadata.to_str().unwrap(),
        "--n-generations",
        "1000",
        "--sample-every",
        "100",
        "--output-dir",
        output_dir.to_str().unwrap(),
    ];
    input.extend(extra);
    Ok(GtrArgs::parse_from(input))
}

#[test]
fn skygrid_misconfiguration_fails_before_any_output() -> Result<(), Report> {
    let dir = TempDir::new()?;
    // skygrid is the default coalescent and is unparameterized here
    let args = gtr_args(&dir, &[])?;

    assert!(gtr_single_partition(&args).is_err());
    // no chain directory was allocated
    assert!(!args.run.output_dir.exists());
    Ok(())
}

#[test]
fn gpu_thread_conflict_fails_before_any_output() -> Result<(), Report> {
    let dir = TempDir::new()?;
    let args = gtr_args(
        &dir,
        &["--skygrid-intervals", "10", "--skygrid-duration", "5.0", "--use-gpu", "--n-threads", "4"],
    )?;

    assert!(gtr_single_partition(&args).is_err());
    assert!(!args.run.output_dir.exists());
    Ok(())
}
