//! Filesystem and checksum helpers shared across commands.

pub mod verbosity;

use color_eyre::eyre::{eyre, ContextCompat, Report, Result, WrapErr};
use color_eyre::Help;
use sha2::{Digest, Sha256};
use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// Get delimiter based on file extension.
///
/// ## Arguments
///
/// - `path` - File path.
///
/// Note that `.txt` is assumed to be tab-delimited!
///
/// ```rust
/// use beastpipe::utils::get_delimiter;
///
/// assert_eq!(get_delimiter(&"samples.tsv")?, '\t');
/// assert_eq!(get_delimiter(&"samples.csv")?, ',');
/// assert!(get_delimiter(&"samples").is_err());
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
pub fn get_delimiter<P>(path: &P) -> Result<char, Report>
where
    P: AsRef<Path> + Debug,
{
    let ext = path
        .as_ref()
        .extension()
        .wrap_err(format!("Failed to get file extension: {path:?}"))?
        .to_str()
        .wrap_err(format!("Failed to convert file extension to str: {path:?}"))?;
    // convert extension to the expected delimiter
    match ext {
        "tsv" | "txt" | "log" => Ok('\t'),
        "csv" => Ok(','),
        _ext => {
            Err(eyre!("Unknown file extension: {_ext:?}").suggestion("Options: tsv, csv, or txt"))
        }
    }
}

/// Allocate a fresh output directory.
///
/// Every artifact directory is exclusively owned by the step that creates it,
/// so an already existing path is refused rather than reused.
pub fn create_fresh_dir<P>(path: &P) -> Result<PathBuf, Report>
where
    P: AsRef<Path> + Debug,
{
    let path = path.as_ref();
    if path.exists() {
        return Err(eyre!("Output directory already exists: {path:?}")
            .suggestion("Please remove it or choose a different --output-dir."));
    }
    std::fs::create_dir_all(path)
        .wrap_err_with(|| format!("Failed to create output directory: {path:?}"))?;
    Ok(path.to_path_buf())
}

/// SHA-256 hex digest of a file's contents.
///
/// This is a textual-equality check: two files get the same digest iff they
/// are byte-identical.
pub fn sha256_file<P>(path: &P) -> Result<String, Report>
where
    P: AsRef<Path> + Debug,
{
    let bytes =
        std::fs::read(path.as_ref()).wrap_err_with(|| format!("Failed to read file: {path:?}"))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests;
