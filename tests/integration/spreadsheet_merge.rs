//! End-to-end spreadsheet merges.

use calamine::{Data, Reader, open_workbook_auto};
use mergestudio::config::Config;
use mergestudio::document::DocumentType;
use mergestudio::error::{Error, MergeError};
use mergestudio::io::read_first_sheet;
use mergestudio::merge::{MergeJob, MergedContent};
use mergestudio::output::NoProgress;
use mergestudio::table::Cell;
use tempfile::TempDir;

use crate::common::{dir_entries, paths_in, write_workbook};

#[test]
fn test_differing_columns_are_unioned() {
    let dir = TempDir::new().unwrap();
    let inputs = paths_in(dir.path(), &["north.xlsx", "south.xlsx"]);
    write_workbook(&inputs[0], &["A", "B"], 5);
    write_workbook(&inputs[1], &["B", "C"], 7);
    let output = dir.path().join("combined.xlsx");

    let report = MergeJob::new(DocumentType::Spreadsheet, inputs, &output)
        .unwrap()
        .run(&Config::default(), &mut NoProgress)
        .unwrap();
    assert_eq!(
        report.content,
        MergedContent::Table {
            rows: 12,
            columns: 4
        }
    );

    let table = read_first_sheet(&output).unwrap();
    assert_eq!(table.columns(), ["A", "B", "C", "Source_File"]);
    assert_eq!(table.row_count(), 12);

    for row in 0..5 {
        assert_eq!(table.get(row, "C"), Some(&Cell::Empty), "row {row}");
        assert_eq!(table.get(row, "Source_File"), Some(&Cell::text("north.xlsx")));
    }
    for row in 5..12 {
        assert_eq!(table.get(row, "A"), Some(&Cell::Empty), "row {row}");
        assert_eq!(table.get(row, "Source_File"), Some(&Cell::text("south.xlsx")));
    }

    // Row order within each source is kept.
    assert_eq!(table.get(0, "A"), Some(&Cell::Float(10.0)));
    assert_eq!(table.get(4, "A"), Some(&Cell::Float(50.0)));
    assert_eq!(table.get(5, "B"), Some(&Cell::Float(10.0)));
    assert_eq!(table.get(11, "C"), Some(&Cell::Float(71.0)));
}

#[test]
fn test_output_is_a_single_sheet_without_index_column() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("only.xlsx");
    write_workbook(&input, &["Name", "Qty"], 2);
    let output = dir.path().join("out.xlsx");

    MergeJob::new(DocumentType::Spreadsheet, [&input], &output)
        .unwrap()
        .run(&Config::default(), &mut NoProgress)
        .unwrap();

    let mut workbook = open_workbook_auto(&output).unwrap();
    assert_eq!(workbook.sheet_names(), ["Sheet1"]);

    let range = workbook.worksheet_range_at(0).unwrap().unwrap();
    let header: Vec<String> = range.rows().next().unwrap().iter().map(Data::to_string).collect();
    assert_eq!(header, ["Name", "Qty", "Source_File"]);
    assert_eq!(range.height(), 3);
}

#[test]
fn test_legacy_extension_input_with_missing_file() {
    let dir = TempDir::new().unwrap();
    let present = dir.path().join("a.xlsx");
    write_workbook(&present, &["A"], 1);
    let missing = dir.path().join("old.xls");
    let output = dir.path().join("out.xlsx");

    let err = MergeJob::new(DocumentType::Spreadsheet, [&present, &missing], &output)
        .unwrap()
        .run(&Config::default(), &mut NoProgress)
        .unwrap_err();

    assert!(matches!(err, Error::Merge(MergeError::FileNotFound { .. })));
    assert_eq!(dir_entries(dir.path()), ["a.xlsx"]);
}

#[test]
fn test_empty_sheet_contributes_no_rows() {
    let dir = TempDir::new().unwrap();
    let inputs = paths_in(dir.path(), &["data.xlsx", "header_only.xlsx"]);
    write_workbook(&inputs[0], &["A"], 3);
    write_workbook(&inputs[1], &["A", "Z"], 0);
    let output = dir.path().join("out.xlsx");

    MergeJob::new(DocumentType::Spreadsheet, inputs, &output)
        .unwrap()
        .run(&Config::default(), &mut NoProgress)
        .unwrap();

    let table = read_first_sheet(&output).unwrap();
    assert_eq!(table.columns(), ["A", "Z", "Source_File"]);
    assert_eq!(table.row_count(), 3);
}
