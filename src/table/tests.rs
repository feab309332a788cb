use crate::table::Table;

use color_eyre::eyre::{Report, Result};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn row_size_mismatch() -> Result<(), Report> {
    let mut table = Table::new();
    table.headers = vec!["id", "seq", "time"];
    table.add_row(vec!["A", "ACGT", "2002.3"])?;
    assert!(table.add_row(vec!["B", "ACGT"]).is_err());
    Ok(())
}

#[test]
fn read_skips_comments_and_blank_lines() -> Result<(), Report> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "# BEAST v1.10.4")?;
    writeln!(file, "# generated at runtime")?;
    writeln!(file, "state\tposterior\tlikelihood")?;
    writeln!(file)?;
    writeln!(file, "0\t-105.2\t-100.1")?;
    writeln!(file, "1000\t-104.9\t-99.8")?;

    let table = Table::read(file.path(), Some('\t'))?;

    let expected = vec!["state", "posterior", "likelihood"];
    assert_eq!(expected, table.headers);
    assert_eq!(2, table.rows.len());

    let observed = table.get("likelihood", 1)?;
    assert_eq!("-99.8", observed.as_str());
    Ok(())
}

#[test]
fn unknown_column() -> Result<(), Report> {
    let mut table = Table::new();
    table.headers = vec!["state"];
    table.add_row(vec!["0"])?;
    assert!(table.get_column("clock.rate").is_err());
    Ok(())
}

#[test]
fn markdown_render() -> Result<(), Report> {
    let mut table = Table::new();
    table.headers = vec!["action", "outputs"];
    table.add_row(vec!["merge-chains", "posterior"])?;

    let observed = table.to_markdown()?;
    assert!(observed.contains("| merge-chains |"));
    Ok(())
}
