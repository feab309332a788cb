//! A row-based [Table] for sample metadata and posterior logs.

use crate::utils;
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// A row-based table of generic data.
///
/// # Examples
///
/// ```
/// use beastpipe::Table;
///
/// let mut table = Table::new();
/// table.headers = vec!["id", "seq", "time"];
/// table.add_row(vec!["A", "ACGT", "2002.3"]);
///
/// println!("{}", table.to_markdown()?);
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Table<T> {
    /// Names of the table columns.
    pub headers: Vec<T>,
    /// Rows of table values.
    pub rows: Vec<Vec<T>>,
    /// Optional file path for where the table was read from.
    pub path: Option<PathBuf>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Table<T> {
    /// Create a new table with empty headers and rows.
    pub fn new() -> Self {
        Table { headers: Vec::new(), rows: Vec::new(), path: None }
    }
}

/// Methods for when the table data can be compared to strings and displayed as a string.
impl<'t, T> Table<T>
where
    T: PartialEq<&'t str> + std::fmt::Display,
{
    /// Add a new row to the table.
    ///
    /// # Arguments
    ///
    /// * `row` - A vector of new data to add as a row.
    pub fn add_row(&'t mut self, row: Vec<T>) -> Result<(), Report> {
        // if table already has rows, check that the new row is the correct length
        if !self.rows.is_empty() {
            let new = row.len();
            let ex = self.rows[0].len();
            if ex != new {
                return Err(eyre!("New row size ({new}) does not match existing table ({ex})."));
            }
        }
        self.rows.push(row);
        Ok(())
    }

    /// Get table value at a particular column and row index.
    ///
    /// # Arguments
    ///
    /// * `header` - Column name.
    /// * `row` - Row index (0-based).
    pub fn get(&'t self, header: &'t str, row: usize) -> Result<&T, Report> {
        let header_i = self.get_header_index(header)?;
        let row = self.get_row(row)?;
        Ok(&row[header_i])
    }

    /// Return a vector of table values in a column.
    ///
    /// # Arguments
    ///
    /// * `header` - Column name.
    ///
    /// # Examples
    ///
    /// ```
    /// use beastpipe::Table;
    ///
    /// let mut table = Table::new();
    /// table.headers = vec!["state", "likelihood"];
    /// table.add_row(vec!["0", "-100.1"]);
    /// table.add_row(vec!["1000", "-99.8"]);
    ///
    /// let observed = table.get_column("likelihood")?;
    /// let expected = vec![&"-100.1", &"-99.8"];
    /// assert_eq!(expected, observed);
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn get_column(&'t self, header: &'t str) -> Result<Vec<&T>, Report> {
        let header_i = self.get_header_index(header)?;
        let column = self.rows.iter().map(|row| &row[header_i]).collect();
        Ok(column)
    }

    /// Return a vector of table values in a row.
    ///
    /// # Arguments
    ///
    /// * `row` - Row index (0-based).
    pub fn get_row(&'t self, i: usize) -> Result<&[T], Report> {
        if i >= self.rows.len() {
            Err(eyre!("Row ({i}) does not exist in the table."))
        } else {
            Ok(&self.rows[i])
        }
    }

    /// Get the column index (0-based) corresponding to the header.
    pub fn get_header_index(&'t self, header: &'t str) -> Result<usize, Report> {
        let pos =
            self.headers.iter().position(|h| *h == header).ok_or_else(|| {
                eyre!("Column '{header}' was not found in table: {:?}.", self.path)
            })?;

        Ok(pos)
    }

}

impl Table<String> {
    /// Read a TSV or CSV file into a Table.
    ///
    /// Lines that are blank or start with `#` are skipped, so BEAST posterior
    /// logs can be read with the same parser as sample metadata.
    ///
    /// # Arguments
    ///
    /// * `path` - File path.
    /// * `delim` - Optional delimiter. Otherwise, will be identified based on the path suffix.
    pub fn read(path: &Path, delim: Option<char>) -> Result<Table<String>, Report> {
        let mut table = Table::new();

        // if not provided, lookup delimiter from file extension
        let delim = match delim {
            Some(c) => c,
            None => utils::get_delimiter(&path)?,
        };

        // attempt to open the file path
        let file = File::open(path).wrap_err_with(|| eyre!("Failed to read file: {path:?}"))?;

        // read and parse lines
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let row = line.split(delim).map(String::from).collect_vec();
            // if headers are empty, this is the first line, write headers
            if table.headers.is_empty() {
                table.headers = row;
            }
            // otherwise regular row
            else {
                table.rows.push(row);
            }
        }

        table.path = Some(path.to_path_buf());

        Ok(table)
    }
}

/// Methods for when the table data can be compared to strings, cloned, and can be displayed.
impl<'t, T> Table<T>
where
    T: PartialEq<&'t str> + Clone + std::fmt::Display,
{
    /// Convert table to markdown format.
    pub fn to_markdown(&self) -> Result<String, Report> {
        // get the maximum width of each column
        let col_widths = self
            .headers
            .iter()
            .enumerate()
            .map(|(col_i, header)| {
                let header_width = header.to_string().len();
                self
                    // iterate through this column's rows,
                    // get max string width, +2 to add space on either side
                    .rows
                    .iter()
                    .map(|row| {
                        let cell_width = row[col_i].to_string().len();
                        if cell_width >= header_width {
                            cell_width + 2
                        } else {
                            header_width + 2
                        }
                    })
                    .max()
                    .unwrap_or(header_width + 2)
            })
            .collect_vec();

        let mut markdown = String::from("|");
        // frame in between headers and rows
        let mut header_frame = String::from("|");

        // Create the header line
        for (header, col_width) in self.headers.iter().zip(col_widths.iter()) {
            let cell = format!("{:^width$}|", header, width = *col_width);
            markdown.push_str(&cell);

            let frame = format!("{}|", "-".repeat(*col_width));
            header_frame.push_str(&frame);
        }
        markdown.push('\n');
        markdown.push_str(&header_frame);
        markdown.push('\n');

        // Create the row lines
        for row in &self.rows {
            markdown.push('|');
            for (col_i, col_width) in col_widths.iter().enumerate() {
                let cell = format!("{:^width$}|", row[col_i], width = *col_width);
                markdown.push_str(&cell);
            }
            markdown.push('\n');
        }

        Ok(markdown)
    }
}

#[cfg(test)]
mod tests;
