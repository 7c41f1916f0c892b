//! In-memory tables of named columns.
//!
//! A [`Table`] is what one worksheet becomes after loading: a header of
//! unique column names and rows of [`Cell`]s, every row exactly as wide as
//! the header.

use std::fmt;

/// One spreadsheet cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Excel serial date-time (days since 1899-12-30).
    DateTime(f64),
    /// A cell error such as `#DIV/0!`, kept as text.
    Error(String),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) | Self::Error(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) | Self::DateTime(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

/// Rows of cells under a header of unique column names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create an empty table with the given header.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `row` in column `name`.
    pub fn get(&self, row: usize, name: &str) -> Option<&Cell> {
        let col = self.column_index(name)?;
        self.rows.get(row).map(|r| &r[col])
    }

    /// Append a row, padding with empty cells or truncating to the header width.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Empty);
        self.rows.push(row);
    }

    /// Set column `name` to `value` on every row, adding the column at the
    /// end if it does not exist yet.
    pub fn fill_column(&mut self, name: &str, value: Cell) {
        match self.column_index(name) {
            Some(col) => {
                for row in &mut self.rows {
                    row[col] = value.clone();
                }
            }
            None => {
                self.columns.push(name.to_string());
                for row in &mut self.rows {
                    row.push(value.clone());
                }
            }
        }
    }

    /// Move column `name` to the last position. No-op if absent.
    pub fn move_column_last(&mut self, name: &str) {
        let Some(col) = self.column_index(name) else {
            return;
        };
        let column = self.columns.remove(col);
        self.columns.push(column);
        for row in &mut self.rows {
            let cell = row.remove(col);
            row.push(cell);
        }
    }

    /// Stack tables vertically.
    ///
    /// The result has the union of all columns, in order of first
    /// appearance. Rows keep their input order; a row from a table that
    /// lacks one of the columns gets an empty cell there.
    pub fn concat<I>(tables: I) -> Table
    where
        I: IntoIterator<Item = Table>,
    {
        let tables: Vec<Table> = tables.into_iter().collect();

        let mut columns: Vec<String> = Vec::new();
        for table in &tables {
            for column in &table.columns {
                if !columns.contains(column) {
                    columns.push(column.clone());
                }
            }
        }

        let total_rows = tables.iter().map(Table::row_count).sum();
        let mut combined = Table {
            columns,
            rows: Vec::with_capacity(total_rows),
        };

        for table in tables {
            let mapping: Vec<usize> = table
                .columns
                .iter()
                .filter_map(|c| combined.column_index(c))
                .collect();

            for row in table.rows {
                let mut out = vec![Cell::Empty; combined.columns.len()];
                for (cell, &target) in row.into_iter().zip(&mapping) {
                    out[target] = cell;
                }
                combined.rows.push(out);
            }
        }

        combined
    }
}

/// Turn raw header cells into unique column names.
///
/// Blank headers become `Unnamed: <index>`; a repeated name gets `.1`, `.2`,
/// ... appended until it is unique.
pub fn normalize_headers<I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    let mut columns: Vec<String> = Vec::new();

    for (index, name) in raw.into_iter().enumerate() {
        let base = match name {
            Some(name) if !name.is_empty() => name,
            _ => format!("Unnamed: {index}"),
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while columns.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        columns.push(candidate);
    }

    columns
}
