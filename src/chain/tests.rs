use crate::chain::{generation_bounds, shared_checksum, PosteriorChain};

use color_eyre::eyre::{Report, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write a minimal chain directory for tests.
pub fn write_chain(dir: &Path, name: &str, control: &str, log: &str) -> Result<PathBuf, Report> {
    let path = dir.join(name);
    fs::create_dir_all(&path)?;
    fs::write(path.join("control_file.xml"), control)?;
    fs::write(path.join("posterior.log"), log)?;
    fs::write(path.join("posterior.trees"), "#NEXUS\nbegin trees;\nend;\n")?;
    fs::write(path.join("posterior.ops"), "")?;
    Ok(path)
}

pub const LOG: &str = "# BEAST\nstate\tposterior\tlikelihood\n0\t-105.2\t-100.1\n1000\t-104.9\t-99.8\n2000\t-104.8\t-99.9\n";

#[test]
fn open_requires_all_artifacts() -> Result<(), Report> {
    let dir = TempDir::new()?;
    let path = write_chain(dir.path(), "chain1", "<beast/>", LOG)?;
    assert!(PosteriorChain::open(&path).is_ok());

    fs::remove_file(path.join("posterior.ops"))?;
    assert!(PosteriorChain::open(&path).is_err());
    Ok(())
}

#[test]
fn checksum_matches_iff_control_files_identical() -> Result<(), Report> {
    let dir = TempDir::new()?;
    let a = PosteriorChain::open(write_chain(dir.path(), "a", "<beast seed=\"1\"/>", LOG)?)?;
    let b = PosteriorChain::open(write_chain(dir.path(), "b", "<beast seed=\"1\"/>", LOG)?)?;
    let c = PosteriorChain::open(write_chain(dir.path(), "c", "<beast seed=\"2\"/>", LOG)?)?;

    assert_eq!(a.checksum()?, b.checksum()?);
    assert_ne!(a.checksum()?, c.checksum()?);

    assert!(shared_checksum(&[a.clone(), b.clone()]).is_ok());
    assert!(shared_checksum(&[a, b, c]).is_err());
    Ok(())
}

#[test]
fn shared_checksum_requires_chains() -> Result<(), Report> {
    assert!(shared_checksum(&[]).is_err());
    Ok(())
}

#[test]
fn log_parse_and_generation_bounds() -> Result<(), Report> {
    let dir = TempDir::new()?;
    let chain = PosteriorChain::open(write_chain(dir.path(), "a", "<beast/>", LOG)?)?;

    let log = chain.read_log()?;
    // comment line skipped, three sampled generations
    assert_eq!(3, log.rows.len());

    let observed = generation_bounds(&log)?;
    let expected = (2000, 1000);
    assert_eq!(expected, observed);
    Ok(())
}

#[test]
fn log_requires_state_column() -> Result<(), Report> {
    let dir = TempDir::new()?;
    let log = "generation\tlikelihood\n0\t-100.1\n";
    let chain = PosteriorChain::open(write_chain(dir.path(), "a", "<beast/>", log)?)?;
    assert!(chain.read_log().is_err());
    Ok(())
}
