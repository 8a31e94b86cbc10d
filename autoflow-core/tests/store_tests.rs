//! Store degradation, atomic-write-safety, and on-disk-format tests.

use assert_fs::prelude::*;
use predicates::prelude::predicate;

use autoflow_core::store::{load_document, save_document, DB_FILE};
use autoflow_core::types::{Document, PipelineConfig, Stage, StageId};

fn demo_config() -> PipelineConfig {
    PipelineConfig {
        name: None,
        stages: vec![Stage {
            id: StageId::from("contacto"),
            label: "Contacto".to_owned(),
            extra: Default::default(),
        }],
        fields: Default::default(),
    }
}

// ---------------------------------------------------------------------------
// 1. Degraded loads
// ---------------------------------------------------------------------------

#[test]
fn missing_store_degrades_to_empty_document() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let doc = load_document(&dir.path().join(DB_FILE));
    assert!(doc.opportunities.is_empty());
    assert!(doc.config.is_none());
}

#[test]
fn corrupt_store_degrades_to_empty_document() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let db = dir.child(DB_FILE);
    db.write_str("{\"opportunities\": [oops").expect("write");
    let doc = load_document(db.path());
    assert_eq!(doc, Document::default());
}

#[test]
fn wrong_shape_store_degrades_to_empty_document() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let db = dir.child(DB_FILE);
    db.write_str("[1, 2, 3]").expect("write");
    let doc = load_document(db.path());
    assert_eq!(doc, Document::default());
}

// ---------------------------------------------------------------------------
// 2. Save semantics
// ---------------------------------------------------------------------------

#[test]
fn save_then_load_preserves_document() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let path = dir.path().join(DB_FILE);
    let doc = Document {
        opportunities: vec![],
        config: Some(demo_config()),
    };
    save_document(&path, &doc).expect("save");
    assert_eq!(load_document(&path), doc);
}

#[test]
fn save_overwrites_previous_document_wholesale() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let path = dir.path().join(DB_FILE);
    save_document(
        &path,
        &Document {
            opportunities: vec![],
            config: Some(demo_config()),
        },
    )
    .expect("first save");
    save_document(&path, &Document::default()).expect("second save");
    assert_eq!(load_document(&path), Document::default());
}

#[test]
fn saved_file_is_human_readable_json() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let db = dir.child(DB_FILE);
    save_document(
        db.path(),
        &Document {
            opportunities: vec![],
            config: Some(demo_config()),
        },
    )
    .expect("save");
    // Pretty-printed: multi-line with indentation, keys visible in plain text.
    db.assert(predicate::str::contains("\"opportunities\""));
    db.assert(predicate::str::contains("\n  "));
    db.assert(predicate::str::contains("contacto"));
}

#[test]
fn save_leaves_no_tmp_sibling() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let path = dir.path().join(DB_FILE);
    save_document(&path, &Document::default()).expect("save");
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .expect("read_dir")
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "tmp files left behind: {leftovers:?}");
}
