use crate::utils::{create_fresh_dir, get_delimiter, sha256_file};

use color_eyre::eyre::{Report, Result};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn delimiter_from_extension() -> Result<(), Report> {
    assert_eq!('\t', get_delimiter(&"samples.tsv")?);
    assert_eq!('\t', get_delimiter(&"posterior.log")?);
    assert_eq!(',', get_delimiter(&"samples.csv")?);
    assert!(get_delimiter(&"samples.nex").is_err());
    Ok(())
}

#[test]
fn fresh_dir_refuses_existing_path() -> Result<(), Report> {
    let dir = TempDir::new()?;

    let target = dir.path().join("chain");
    create_fresh_dir(&target)?;
    assert!(target.is_dir());

    // a second allocation of the same path must fail
    assert!(create_fresh_dir(&target).is_err());
    Ok(())
}

#[test]
fn sha256_is_content_identity() -> Result<(), Report> {
    let mut a = NamedTempFile::new()?;
    let mut b = NamedTempFile::new()?;
    let mut c = NamedTempFile::new()?;
    writeln!(a, "<beast version=\"1.10.4\"/>")?;
    writeln!(b, "<beast version=\"1.10.4\"/>")?;
    writeln!(c, "<beast version=\"1.10.5\"/>")?;

    assert_eq!(sha256_file(&a.path())?, sha256_file(&b.path())?);
    assert_ne!(sha256_file(&a.path())?, sha256_file(&c.path())?);
    Ok(())
}
