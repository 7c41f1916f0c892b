//! End-to-end PDF merges.

use mergestudio::config::{CompressionLevel, Config};
use mergestudio::document::DocumentType;
use mergestudio::error::{Error, MergeError};
use mergestudio::merge::{MergeJob, MergedContent};
use mergestudio::output::{NoProgress, Phase, Progress};
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{dir_entries, page_markers, paths_in, write_pdf};

#[rstest]
#[case(CompressionLevel::None)]
#[case(CompressionLevel::Standard)]
#[case(CompressionLevel::Maximum)]
fn test_pages_are_concatenated_in_source_order(#[case] compression: CompressionLevel) {
    let dir = TempDir::new().unwrap();
    let inputs = paths_in(dir.path(), &["one.pdf", "two.pdf", "three.pdf"]);
    write_pdf(&inputs[0], 2, "one");
    write_pdf(&inputs[1], 3, "two");
    write_pdf(&inputs[2], 1, "three");
    let output = dir.path().join("merged.pdf");

    let config = Config {
        compression,
        ..Config::default()
    };
    let report = MergeJob::new(DocumentType::Pdf, inputs, &output)
        .unwrap()
        .run(&config, &mut NoProgress)
        .unwrap();

    assert_eq!(report.content, MergedContent::Pages(6));
    assert_eq!(report.output_size, std::fs::metadata(&output).unwrap().len());
    assert_eq!(
        page_markers(&output),
        ["one-0", "one-1", "two-0", "two-1", "two-2", "three-0"]
    );
}

#[test]
fn test_same_file_twice() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("twice.pdf");
    write_pdf(&input, 2, "t");
    let output = dir.path().join("out.pdf");

    MergeJob::new(DocumentType::Pdf, [&input, &input], &output)
        .unwrap()
        .run(&Config::default(), &mut NoProgress)
        .unwrap();

    assert_eq!(page_markers(&output), ["t-0", "t-1", "t-0", "t-1"]);
}

#[test]
fn test_inputs_are_not_modified() {
    let dir = TempDir::new().unwrap();
    let inputs = paths_in(dir.path(), &["a.pdf", "b.pdf"]);
    write_pdf(&inputs[0], 1, "a");
    write_pdf(&inputs[1], 1, "b");
    let before: Vec<Vec<u8>> = inputs.iter().map(|p| std::fs::read(p).unwrap()).collect();

    MergeJob::new(DocumentType::Pdf, inputs.clone(), dir.path().join("out.pdf"))
        .unwrap()
        .run(&Config::default(), &mut NoProgress)
        .unwrap();

    let after: Vec<Vec<u8>> = inputs.iter().map(|p| std::fs::read(p).unwrap()).collect();
    assert_eq!(before, after);
}

#[test]
fn test_progress_sequence() {
    let dir = TempDir::new().unwrap();
    let inputs = paths_in(dir.path(), &["a.pdf", "b.pdf"]);
    write_pdf(&inputs[0], 1, "a");
    write_pdf(&inputs[1], 1, "b");

    let mut events: Vec<Progress> = Vec::new();
    let mut observer = |p: &Progress| events.push(p.clone());
    MergeJob::new(DocumentType::Pdf, inputs, dir.path().join("out.pdf"))
        .unwrap()
        .run(&Config::default(), &mut observer)
        .unwrap();

    let fractions: Vec<f64> = events.iter().map(|p| p.fraction).collect();
    assert_eq!(fractions, [0.0, 0.45, 0.95, 1.0]);
    assert_eq!(events[1].message, "Processing b.pdf...");
    assert_eq!(events[2].phase, Phase::Writing);
    assert_eq!(events[3].phase, Phase::Complete);
}

#[test]
fn test_corrupt_input_leaves_destination_untouched() {
    let dir = TempDir::new().unwrap();
    let inputs = paths_in(dir.path(), &["good.pdf", "broken.pdf"]);
    write_pdf(&inputs[0], 3, "g");
    std::fs::write(&inputs[1], b"%PDF-1.5\nthis is not really a pdf").unwrap();
    let output = dir.path().join("out.pdf");
    std::fs::write(&output, b"previous result").unwrap();

    let err = MergeJob::new(DocumentType::Pdf, inputs, &output)
        .unwrap()
        .run(&Config::default(), &mut NoProgress)
        .unwrap_err();

    assert!(matches!(err, Error::Merge(_)));
    assert!(err.user_message().contains("broken.pdf"));
    assert_eq!(std::fs::read(&output).unwrap(), b"previous result");
    assert_eq!(dir_entries(dir.path()), ["broken.pdf", "good.pdf", "out.pdf"]);
}

#[test]
fn test_output_directory_must_exist() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("a.pdf");
    write_pdf(&input, 1, "a");

    let err = MergeJob::new(DocumentType::Pdf, [&input], dir.path().join("no/such/dir/out.pdf"))
        .unwrap()
        .run(&Config::default(), &mut NoProgress)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Merge(MergeError::OutputDirectoryMissing { .. })
    ));
}

#[test]
fn test_spreadsheet_given_to_pdf_merge() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("table.xlsx");
    crate::common::write_workbook(&input, &["A"], 1);

    let err = MergeJob::new(DocumentType::Pdf, [&input], dir.path().join("out.pdf"))
        .unwrap()
        .run(&Config::default(), &mut NoProgress)
        .unwrap_err();

    assert!(matches!(err, Error::Merge(MergeError::FailedToLoadPdf { .. })));
}
