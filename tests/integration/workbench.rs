//! The workbench driven the way a desktop front end drives it.

use std::path::PathBuf;

use mergestudio::document::{DocumentType, FileFilter};
use mergestudio::merge::MergedContent;
use mergestudio::output::Progress;
use mergestudio::shell::{Dialogs, MergeOutcome};
use mergestudio::{Config, Workbench};
use tempfile::TempDir;

use crate::common::{dir_entries, page_markers, write_pdf, write_workbook};

/// Front end stand-in: answers pickers from queues, records what it shows.
#[derive(Default)]
struct FakeUi {
    file_picks: Vec<Vec<PathBuf>>,
    save_picks: Vec<Option<PathBuf>>,
    filters: Vec<Vec<String>>,
    shown: Vec<(String, String)>,
    progress: Vec<Progress>,
}

impl Dialogs for FakeUi {
    fn pick_files(&mut self, filter: &FileFilter, _title: &str) -> Vec<PathBuf> {
        self.filters.push(filter.patterns().to_vec());
        if self.file_picks.is_empty() {
            Vec::new()
        } else {
            self.file_picks.remove(0)
        }
    }

    fn pick_save_path(
        &mut self,
        filter: &FileFilter,
        _title: &str,
        _default_extension: &str,
    ) -> Option<PathBuf> {
        self.filters.push(filter.patterns().to_vec());
        if self.save_picks.is_empty() {
            None
        } else {
            self.save_picks.remove(0)
        }
    }

    fn warn(&mut self, title: &str, message: &str) {
        self.shown.push((title.to_string(), message.to_string()));
    }

    fn error(&mut self, title: &str, message: &str) {
        self.shown.push((title.to_string(), message.to_string()));
    }

    fn info(&mut self, title: &str, message: &str) {
        self.shown.push((title.to_string(), message.to_string()));
    }

    fn progress(&mut self, progress: &Progress) {
        self.progress.push(progress.clone());
    }
}

fn config_in(dir: &TempDir) -> Config {
    Config::default().with_session_path(dir.path().join("state").join("session.json"))
}

#[test]
fn test_pdf_session_flow() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("state")).unwrap();
    let a = dir.path().join("a.pdf");
    let b = dir.path().join("b.pdf");
    write_pdf(&a, 2, "a");
    write_pdf(&b, 1, "b");
    let output = dir.path().join("merged.pdf");

    let mut ui = FakeUi {
        file_picks: vec![vec![b.clone(), a.clone()]],
        save_picks: vec![Some(output.clone())],
        ..Default::default()
    };

    let mut bench = Workbench::open(config_in(&dir)).unwrap();
    assert_eq!(bench.select_files(&mut ui), 2);
    assert_eq!(bench.summary().title(), "Selected PDF Files (2)");

    let outcome = bench.merge_files(&mut ui);
    assert!(outcome.is_merged());
    assert_eq!(page_markers(&output), ["b-0", "a-0", "a-1"]);
    assert_eq!(ui.filters, [vec!["*.pdf".to_string()], vec!["*.pdf".to_string()]]);
    assert_eq!(ui.shown.len(), 1);
    assert_eq!(ui.shown[0].0, "Success");
    assert_eq!(
        ui.shown[0].1,
        format!("Successfully merged 2 PDF files!\n\nSaved to: {}", output.display())
    );
    assert!(
        ui.progress
            .windows(2)
            .all(|w| w[0].fraction <= w[1].fraction)
    );

    // Restart: the selection is still there, in the same order.
    drop(bench);
    let bench = Workbench::open(config_in(&dir)).unwrap();
    assert_eq!(
        bench.files(),
        [b.display().to_string(), a.display().to_string()]
    );
}

#[test]
fn test_spreadsheet_tab_flow() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("state")).unwrap();
    let q1 = dir.path().join("q1.xlsx");
    let q2 = dir.path().join("q2.xlsx");
    write_workbook(&q1, &["Region", "Sales"], 2);
    write_workbook(&q2, &["Region", "Returns"], 3);
    let output = dir.path().join("year.xlsx");

    let mut ui = FakeUi {
        file_picks: vec![vec![q1.clone(), q2.clone(), q1.clone()]],
        save_picks: vec![None, Some(output.clone())],
        ..Default::default()
    };

    let mut bench = Workbench::open(config_in(&dir)).unwrap();
    bench.switch_tab(DocumentType::Spreadsheet);
    assert_eq!(bench.select_files(&mut ui), 2);

    // First attempt: the user cancels the save picker.
    assert!(matches!(bench.merge_files(&mut ui), MergeOutcome::Cancelled));
    assert!(!output.exists());

    let MergeOutcome::Merged(report) = bench.merge_files(&mut ui) else {
        panic!("second attempt should merge");
    };
    assert_eq!(
        report.content,
        MergedContent::Table {
            rows: 5,
            columns: 4
        }
    );
    assert_eq!(ui.filters[0], ["*.xlsx", "*.xls"]);
    assert_eq!(ui.filters[1], ["*.xlsx"]);
    assert!(ui.shown[0].1.starts_with("Successfully merged 2 Excel files!"));
    assert_eq!(ui.progress.last().map(|p| p.fraction), Some(1.0));
}

#[test]
fn test_empty_tab_merge_touches_nothing() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("state")).unwrap();
    let mut ui = FakeUi {
        save_picks: vec![Some(dir.path().join("out.xlsx"))],
        ..Default::default()
    };

    let mut bench = Workbench::open(config_in(&dir)).unwrap();
    bench.add_files([dir.path().join("x.pdf")]);
    bench.switch_tab(DocumentType::Spreadsheet);
    let before = dir_entries(&dir.path().join("state"));

    let outcome = bench.merge_files(&mut ui);

    assert!(matches!(outcome, MergeOutcome::NothingSelected));
    assert_eq!(
        ui.shown,
        [(
            "No Files".to_string(),
            "Please select EXCEL files to merge.".to_string()
        )]
    );
    assert!(ui.filters.is_empty());
    assert_eq!(dir_entries(&dir.path().join("state")), before);
    assert_eq!(dir_entries(dir.path()), ["state"]);
}

#[test]
fn test_failed_merge_keeps_selection_for_retry() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("state")).unwrap();
    let good = dir.path().join("good.pdf");
    let late = dir.path().join("late.pdf");
    write_pdf(&good, 1, "g");
    let output = dir.path().join("out.pdf");

    let mut ui = FakeUi {
        save_picks: vec![Some(output.clone()), Some(output.clone())],
        ..Default::default()
    };
    let mut bench = Workbench::open(config_in(&dir)).unwrap();
    bench.add_files([&good, &late]);

    let outcome = bench.merge_files(&mut ui);
    assert!(matches!(outcome, MergeOutcome::Failed(_)));
    assert_eq!(ui.shown[0].0, "Error");
    assert!(ui.shown[0].1.contains("late.pdf"));
    assert!(!output.exists());

    // The missing file shows up without a size; after creating it the
    // same selection merges.
    assert_eq!(bench.summary().entries[1].size, None);
    write_pdf(&late, 2, "l");
    assert!(bench.merge_files(&mut ui).is_merged());
    assert_eq!(page_markers(&output), ["g-0", "l-0", "l-1"]);
}

#[test]
fn test_unwritable_session_does_not_block_work() {
    let dir = TempDir::new().unwrap();
    // The session directory is never created, so every save fails.
    let config =
        Config::default().with_session_path(dir.path().join("missing").join("session.json"));
    let a = dir.path().join("a.pdf");
    write_pdf(&a, 1, "a");

    let mut bench = Workbench::open(config).unwrap();
    assert_eq!(bench.add_files([&a]), 1);
    bench.switch_tab(DocumentType::Spreadsheet);
    bench.switch_tab(DocumentType::Pdf);
    assert_eq!(bench.files().len(), 1);
    assert!(!dir.path().join("missing").exists());
}
