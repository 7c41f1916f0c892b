//! Session record persistence.

use mergestudio::document::DocumentType;
use mergestudio::session::{Session, SessionStore};
use rstest::rstest;
use tempfile::TempDir;

#[rstest]
#[case(vec![], vec![], DocumentType::Pdf)]
#[case(vec!["/a.pdf", "/b.pdf"], vec![], DocumentType::Pdf)]
#[case(vec![], vec!["/q1.xlsx"], DocumentType::Spreadsheet)]
#[case(vec!["/dir with spaces/ü.pdf"], vec!["C:\\data\\x.xls"], DocumentType::Spreadsheet)]
fn test_save_then_load_round_trips(
    #[case] pdf_files: Vec<&str>,
    #[case] excel_files: Vec<&str>,
    #[case] current_tab: DocumentType,
) {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path().join("session.json"));
    let session = Session {
        pdf_files: pdf_files.into_iter().map(String::from).collect(),
        excel_files: excel_files.into_iter().map(String::from).collect(),
        current_tab,
    };

    store.save(&session);

    assert_eq!(store.load(), Some(session));
}

#[test]
fn test_record_uses_documented_field_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    let store = SessionStore::new(&path);

    store.save(&Session {
        pdf_files: vec!["/a.pdf".to_string()],
        excel_files: vec![],
        current_tab: DocumentType::Spreadsheet,
    });

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        raw,
        serde_json::json!({
            "pdf_files": ["/a.pdf"],
            "excel_files": [],
            "current_tab": "excel",
        })
    );
}

#[rstest]
#[case::truncated("{\"pdf_files\": [\"/a.pdf\"")]
#[case::not_json("hello")]
#[case::wrong_shape("[1, 2, 3]")]
#[case::empty("")]
fn test_corrupted_record_gives_default_session(#[case] content: &str) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, content).unwrap();

    let session = SessionStore::new(&path).load_or_default();

    assert_eq!(session, Session::default());
    assert!(session.pdf_files.is_empty());
    assert!(session.excel_files.is_empty());
    assert_eq!(session.current_tab, DocumentType::Pdf);
}

#[test]
fn test_missing_record_gives_no_session() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path().join("never-written.json"));

    assert_eq!(store.load(), None);
    assert_eq!(store.load_or_default(), Session::default());
}
