//! Spreadsheet reading (xlsx/xls via `calamine`) and writing (xlsx via
//! `rust_xlsxwriter`).

use std::path::Path;
use std::time::Instant;

use calamine::{Data, Range, Reader, open_workbook_auto};
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, XlsxError};
use tracing::debug;

use crate::error::MergeError;
use crate::io::reader::check_input;
use crate::io::writer::{StagedFile, WriteStatistics};
use crate::table::{Cell, Table, normalize_headers};

/// Rows per worksheet, header included.
pub const MAX_ROWS: usize = 1_048_576;

/// Columns per worksheet.
pub const MAX_COLUMNS: usize = 16_384;

const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Largest integer magnitude a worksheet number holds exactly (2^53).
const MAX_EXACT_INT: u64 = 1 << 53;

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Int(i) => Cell::Int(*i),
            Data::Float(f) => Cell::Float(*f),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) => Cell::DateTime(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Error(e) => Cell::Error(e.to_string()),
        }
    }
}

fn header_name(data: &Data) -> Option<String> {
    match data {
        Data::Empty => None,
        other => Some(other.to_string().trim().to_string()),
    }
}

/// Build a table from a worksheet range: first row is the header, fully
/// blank rows are skipped.
pub fn table_from_range(range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Table::default();
    };

    let mut table = Table::new(normalize_headers(header.iter().map(header_name)));
    for row in rows {
        let cells: Vec<Cell> = row.iter().map(Cell::from).collect();
        if cells.iter().all(Cell::is_empty) {
            continue;
        }
        table.push_row(cells);
    }
    table
}

/// Load the first worksheet of the workbook at `path` as a table.
///
/// The workbook handle is dropped before this returns, on success and on
/// failure.
///
/// # Errors
///
/// Returns an error if the file is missing, is not a readable xlsx/xls
/// workbook, or contains no worksheets.
pub fn read_first_sheet(path: &Path) -> Result<Table, MergeError> {
    check_input(path)?;

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| MergeError::failed_to_read_spreadsheet(path.to_path_buf(), e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| MergeError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?
        .map_err(|e| MergeError::failed_to_read_spreadsheet(path.to_path_buf(), e.to_string()))?;

    let table = table_from_range(&range);
    debug!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "Worksheet loaded"
    );
    Ok(table)
}

/// Write `table` as a single-sheet workbook at `path`.
///
/// One bold header row, then the data rows; no index column.
///
/// # Errors
///
/// [`MergeError::RowLimitExceeded`] before anything is written if the table
/// does not fit a worksheet; otherwise write failures, with the destination
/// left untouched.
pub fn write_table(
    table: &Table,
    path: &Path,
    sheet_name: &str,
) -> Result<WriteStatistics, MergeError> {
    if table.row_count() + 1 > MAX_ROWS || table.column_count() > MAX_COLUMNS {
        return Err(MergeError::RowLimitExceeded {
            rows: table.row_count(),
            columns: table.column_count(),
        });
    }

    let start = Instant::now();
    let mut workbook = build_workbook(table, sheet_name).map_err(|e| xlsx_err(path, e))?;

    let staged = StagedFile::create(path).map_err(|source| MergeError::FailedToCreateOutput {
        path: path.to_path_buf(),
        source,
    })?;
    workbook.save(staged.path()).map_err(|e| xlsx_err(path, e))?;
    staged.commit().map_err(|source| MergeError::FailedToWrite {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(WriteStatistics::measure(path, start))
}

fn xlsx_err(path: &Path, err: XlsxError) -> MergeError {
    MergeError::FailedToWriteSpreadsheet {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

fn build_workbook(table: &Table, sheet_name: &str) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let datetime_format = Format::new().set_num_format(DATETIME_FORMAT);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    // Limits were checked by the caller, so the casts below cannot truncate.
    for (col, name) in table.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, col as ColNum, name, &header_format)?;
    }

    for (index, row) in table.rows().iter().enumerate() {
        let r = (index + 1) as RowNum;
        for (col, cell) in row.iter().enumerate() {
            let c = col as ColNum;
            match cell {
                Cell::Empty => {}
                Cell::Text(s) | Cell::Error(s) => {
                    worksheet.write_string(r, c, s)?;
                }
                Cell::Int(i) if i.unsigned_abs() <= MAX_EXACT_INT => {
                    worksheet.write_number(r, c, *i as f64)?;
                }
                // Beyond f64 precision; text keeps every digit.
                Cell::Int(i) => {
                    worksheet.write_string(r, c, i.to_string())?;
                }
                Cell::Float(f) => {
                    worksheet.write_number(r, c, *f)?;
                }
                Cell::Bool(b) => {
                    worksheet.write_boolean(r, c, *b)?;
                }
                Cell::DateTime(serial) => {
                    worksheet.write_number_with_format(r, c, *serial, &datetime_format)?;
                }
            }
        }
    }

    Ok(workbook)
}
