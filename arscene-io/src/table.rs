//! Header-named delimited tables
//!
//! Capture exports are plain delimited text with a header line naming each
//! column. This module handles:
//! - Auto-detection of the delimiter (comma, tab, semicolon, space)
//! - Case-insensitive header lookup
//! - Blank-line skipping while keeping source line numbers for diagnostics

use crate::error::{LoadError, Result};
use std::collections::HashMap;

/// Supported delimiters for capture tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Space,
    Tab,
    Semicolon,
}

impl Delimiter {
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Space => ' ',
            Delimiter::Tab => '\t',
            Delimiter::Semicolon => ';',
        }
    }

    /// Detect delimiter from a line of text.
    ///
    /// Comma, tab and semicolon win over space so that headers with padded
    /// names still split on the real separator.
    pub fn detect_from_line(line: &str) -> Option<Self> {
        let counts = [
            (line.matches(',').count(), Delimiter::Comma),
            (line.matches('\t').count(), Delimiter::Tab),
            (line.matches(';').count(), Delimiter::Semicolon),
        ];

        counts
            .iter()
            .filter(|(count, _)| *count > 0)
            .max_by_key(|(count, _)| *count)
            .map(|(_, delimiter)| *delimiter)
            .or_else(|| line.trim().contains(' ').then_some(Delimiter::Space))
    }

    fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Delimiter::Space => line.split_whitespace().map(clean_cell).collect(),
            other => line.split(other.as_char()).map(clean_cell).collect(),
        }
    }
}

fn clean_cell(cell: &str) -> &str {
    let cell = cell.trim();
    cell.strip_prefix('"')
        .and_then(|c| c.strip_suffix('"'))
        .unwrap_or(cell)
}

/// A parsed table: header plus data rows tagged with their source line
#[derive(Debug, Clone)]
pub struct Table {
    pub source: String,
    pub delimiter: Delimiter,
    columns: HashMap<String, usize>,
    rows: Vec<(usize, Vec<String>)>,
}

impl Table {
    /// Parse table text. `source` names the origin in error messages.
    pub fn parse(source: &str, text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
            .filter(|(_, l)| !l.trim().is_empty());

        let (_, header) = lines.next().ok_or_else(|| LoadError::EmptySource {
            path: source.to_string(),
        })?;
        // A single-column header has no delimiter; splitting on comma is harmless
        let delimiter = Delimiter::detect_from_line(header).unwrap_or(Delimiter::Comma);

        let columns = delimiter
            .split(header)
            .into_iter()
            .enumerate()
            .map(|(i, name)| (name.to_lowercase(), i))
            .collect();

        let rows = lines
            .map(|(n, l)| (n, delimiter.split(l).into_iter().map(String::from).collect()))
            .collect();

        Ok(Self {
            source: source.to_string(),
            delimiter,
            columns,
            rows,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(&name.to_lowercase())
    }

    /// Fail with `MissingColumn` for the first required column not in the header
    pub fn require_columns(&self, required: &[&str]) -> Result<()> {
        match required.iter().find(|c| !self.has_column(c)) {
            Some(column) => Err(LoadError::MissingColumn {
                path: self.source.clone(),
                column: column.to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |(line, cells)| Row {
            table: self,
            line: *line,
            cells,
        })
    }
}

/// One data row with typed cell accessors
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    pub line: usize,
    cells: &'a [String],
}

impl<'a> Row<'a> {
    /// Raw text of a cell; missing or empty cells are an error
    pub fn text(&self, column: &str) -> std::result::Result<&'a str, String> {
        let index = self
            .table
            .columns
            .get(&column.to_lowercase())
            .ok_or_else(|| format!("unknown column '{}'", column))?;
        match self.cells.get(*index).map(String::as_str) {
            Some(cell) if !cell.is_empty() => Ok(cell),
            _ => Err(format!("missing value for '{}'", column)),
        }
    }

    /// A finite float cell
    pub fn float(&self, column: &str) -> std::result::Result<f32, String> {
        let text = self.text(column)?;
        match text.parse::<f32>() {
            Ok(v) if v.is_finite() => Ok(v),
            Ok(_) => Err(format!("non-finite value '{}' for '{}'", text, column)),
            Err(_) => Err(format!("invalid number '{}' for '{}'", text, column)),
        }
    }
}
