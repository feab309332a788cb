use crate::summarize;
use crate::summarize::Args;

use clap::Parser;
use color_eyre::eyre::{Report, Result};
use tempfile::TempDir;

#[test]
fn missing_posterior_fails_before_any_output() -> Result<(), Report> {
    let dir = TempDir::new()?;
    let args = Args::parse_from([
        "maximum-clade-credibility",
        "--posterior",
        dir.path().join("nonexistent").to_str().unwrap(),
        "--burn-in",
        "500",
        "--output-dir",
        dir.path().join("mcc").to_str().unwrap(),
    ]);

    assert!(summarize::maximum_clade_credibility(&args).is_err());
    assert!(!args.output_dir.exists());
    Ok(())
}
