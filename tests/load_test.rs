//! Integration tests for loading persisted document trees.

use docdown::export::{to_json, to_markdown, ExportOptions, JsonFormat};
use docdown::model::{Document, GroupKind, Item};
use docdown::{load, Error};

#[test]
fn test_json_round_trip_preserves_output() {
    let mut doc = Document::new("round-trip");
    doc.add_to_body(Item::Title {
        text: "Round Trip".to_string(),
    });
    let list = doc.add_to_body(Item::Group {
        kind: GroupKind::OrderedList,
    });
    doc.add_child(list, Item::enumerated_item("one", "1."));
    doc.add_child(list, Item::enumerated_item("two", "2."));

    let json = to_json(&doc, JsonFormat::Pretty).unwrap();
    let loaded = load::from_str(&json).unwrap();

    let options = ExportOptions::default();
    assert_eq!(
        to_markdown(&doc, &options).unwrap(),
        to_markdown(&loaded, &options).unwrap()
    );
}

#[test]
fn test_load_from_file() {
    let mut doc = Document::new("on-disk");
    doc.add_to_body(Item::Paragraph {
        text: "persisted".to_string(),
    });
    let json = to_json(&doc, JsonFormat::Compact).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("document.json");
    std::fs::write(&path, json).unwrap();

    let loaded = load::from_file(&path).unwrap();
    assert_eq!(loaded.name, "on-disk");
    assert_eq!(
        to_markdown(&loaded, &ExportOptions::default()).unwrap(),
        "persisted"
    );
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = load::from_file(dir.path().join("absent.json"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_load_rejects_dangling_caption() {
    let json = r#"{
        "name": "bad",
        "nodes": [
            {"label": "table", "caption": 7, "markdown": "| a |"}
        ],
        "body": [0]
    }"#;

    let result = load::from_str(json);
    assert!(matches!(result, Err(Error::CaptionMissing(_))));
}

#[test]
fn test_load_rejects_node_with_two_parents() {
    let json = r#"{
        "name": "bad",
        "nodes": [
            {"label": "group", "kind": "list", "children": [1]},
            {"label": "list_item", "text": "shared", "enumerated": false}
        ],
        "body": [0, 1]
    }"#;

    let result = load::from_str(json);
    assert!(matches!(result, Err(Error::Structure(_))));
}

#[test]
fn test_load_rejects_section_header_level_zero() {
    let json = r#"{
        "name": "bad",
        "nodes": [{"label": "section_header", "text": "Intro", "level": 0}],
        "body": [0]
    }"#;

    let result = load::from_str(json);
    assert!(matches!(result, Err(Error::Structure(_))));
}

#[test]
fn test_unknown_label_loads_and_degrades() {
    let json = r#"{
        "name": "forward-compatible",
        "nodes": [
            {"label": "paragraph", "text": "known"},
            {"label": "waveform", "samples": 42}
        ],
        "body": [0, 1]
    }"#;

    let doc = load::from_str(json).unwrap();
    let markdown = to_markdown(&doc, &ExportOptions::default()).unwrap();
    assert!(markdown.contains("known"));
    assert!(markdown.contains("<missing-text>"));
}

#[test]
fn test_load_reads_page_provenance() {
    let json = r#"{
        "name": "paged",
        "metadata": {"page_count": 2},
        "nodes": [
            {"label": "paragraph", "text": "first", "page": 1},
            {"label": "paragraph", "text": "second", "page": 2}
        ],
        "body": [0, 1]
    }"#;

    let doc = load::from_str(json).unwrap();
    let options = ExportOptions::new().with_page(1);
    assert_eq!(to_markdown(&doc, &options).unwrap(), "first");
}
