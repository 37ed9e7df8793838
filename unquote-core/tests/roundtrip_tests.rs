/// Integration tests for unquote-core
///
/// These tests drive the full round trip over real files:
/// extract into a scratch copy, edit on disk, write back, clean up.

use std::fs;
use std::path::PathBuf;

use unquote_core::{
    Cursor, DirScratch, Editor, FileBuffer, Notifier, Position, Range, SaveOutcome,
};

struct QuietNotifier;

impl Notifier for QuietNotifier {
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
}

fn write_host(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("host.json");
    fs::write(&path, content).unwrap();
    path
}

fn editor() -> Editor<DirScratch, QuietNotifier> {
    Editor::new(DirScratch::temp().unwrap(), QuietNotifier)
}

#[test]
fn test_full_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_host(&dir, r#"{"payload": "{\"n\":1}"}"#);
    let mut buffer = FileBuffer::open(&path);
    let mut editor = editor();

    let copy_id = editor
        .open(&buffer, Cursor::Caret(Position::new(1, 15)))
        .unwrap();

    // the scratch copy holds the pretty-printed embedded document
    assert_eq!(fs::read_to_string(&copy_id).unwrap(), "{\n  \"n\": 1\n}");

    // the user edits the scratch copy on disk
    fs::write(&copy_id, "{\n  \"n\": 2,\n  \"s\": \"a\\\"b\"\n}").unwrap();

    let outcome = editor.save(&copy_id, &mut buffer).unwrap();
    assert_eq!(outcome, SaveOutcome::Written);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        r#"{"payload": "{\"n\":2,\"s\":\"a\\\"b\"}"}"#
    );

    // write-back cleaned up: entry cleared, scratch file gone
    assert_eq!(editor.open_count(), 0);
    assert!(!PathBuf::from(&copy_id).exists());

    // the written-back field decodes to the edited value
    let host: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let embedded: serde_json::Value =
        serde_json::from_str(host["payload"].as_str().unwrap()).unwrap();
    assert_eq!(embedded["n"], 2);
    assert_eq!(embedded["s"], "a\"b");
}

#[test]
fn test_unchanged_save_round_trips_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_host(&dir, r#"{"cfg": "{\"a\":[1,2],\"b\":\"x\"}"}"#);
    let mut buffer = FileBuffer::open(&path);
    let mut editor = editor();

    let before: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let before_embedded: serde_json::Value =
        serde_json::from_str(before["cfg"].as_str().unwrap()).unwrap();

    // caret anywhere inside the quoted span finds the same target
    for col in [9, 15, 33] {
        let copy_id = editor
            .open(&buffer, Cursor::Caret(Position::new(1, col)))
            .unwrap();
        let outcome = editor.save(&copy_id, &mut buffer).unwrap();
        assert_eq!(outcome, SaveOutcome::Written);

        let after: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let after_embedded: serde_json::Value =
            serde_json::from_str(after["cfg"].as_str().unwrap()).unwrap();
        assert_eq!(after_embedded, before_embedded);
    }
}

#[test]
fn test_selection_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_host(&dir, r#"{"k": "[1, 2, 3]"}"#);
    let mut buffer = FileBuffer::open(&path);
    let mut editor = editor();

    // selection including the quotes: columns 7..18 cover "[1, 2, 3]"
    let selection = Range::new(Position::new(1, 7), Position::new(1, 18));
    let copy_id = editor
        .open(&buffer, Cursor::Selection(selection))
        .unwrap();
    assert_eq!(
        fs::read_to_string(&copy_id).unwrap(),
        "[\n  1,\n  2,\n  3\n]"
    );

    fs::write(&copy_id, "[4]").unwrap();
    editor.save(&copy_id, &mut buffer).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"k": "[4]"}"#);
}

#[test]
fn test_malformed_write_back_escapes_raw_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_host(&dir, r#"{"payload": "{\"n\":1}"}"#);
    let mut buffer = FileBuffer::open(&path);
    let mut editor = editor();

    let copy_id = editor
        .open(&buffer, Cursor::Caret(Position::new(1, 15)))
        .unwrap();
    fs::write(&copy_id, r#"hello "world""#).unwrap();

    let outcome = editor.save(&copy_id, &mut buffer).unwrap();
    assert_eq!(outcome, SaveOutcome::WrittenRaw);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        r#"{"payload": "hello \"world\""}"#
    );
    // the save completed, so the round trip is over
    assert_eq!(editor.open_count(), 0);
}

#[test]
fn test_close_without_saving_leaves_source_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let original = r#"{"payload": "{\"n\":1}"}"#;
    let path = write_host(&dir, original);
    let buffer = FileBuffer::open(&path);
    let mut editor = editor();

    let copy_id = editor
        .open(&buffer, Cursor::Caret(Position::new(1, 15)))
        .unwrap();
    fs::write(&copy_id, "{\"n\": 999}").unwrap();

    editor.close(&copy_id);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
    assert!(!PathBuf::from(&copy_id).exists());
    assert_eq!(editor.open_count(), 0);
}

#[test]
fn test_shutdown_removes_all_scratch_files() {
    let dir = tempfile::tempdir().unwrap();
    let path_a = dir.path().join("a.json");
    let path_b = dir.path().join("b.json");
    fs::write(&path_a, r#"{"x": "{\"n\":1}"}"#).unwrap();
    fs::write(&path_b, r#"{"y": "{\"n\":2}"}"#).unwrap();

    let mut editor = editor();
    let copy_a = editor
        .open(&FileBuffer::open(&path_a), Cursor::Caret(Position::new(1, 9)))
        .unwrap();
    let copy_b = editor
        .open(&FileBuffer::open(&path_b), Cursor::Caret(Position::new(1, 9)))
        .unwrap();
    assert_eq!(editor.open_count(), 2);

    editor.shutdown();
    assert_eq!(editor.open_count(), 0);
    assert!(!PathBuf::from(&copy_a).exists());
    assert!(!PathBuf::from(&copy_b).exists());
}

#[test]
fn test_multiline_host_document() {
    let dir = tempfile::tempdir().unwrap();
    let content = "{\n  \"name\": \"demo\",\n  \"payload\": \"{\\\"on\\\":true}\"\n}\n";
    let path = write_host(&dir, content);
    let mut buffer = FileBuffer::open(&path);
    let mut editor = editor();

    // caret on line 3 inside the payload literal
    let copy_id = editor
        .open(&buffer, Cursor::Caret(Position::new(3, 17)))
        .unwrap();
    assert_eq!(
        fs::read_to_string(&copy_id).unwrap(),
        "{\n  \"on\": true\n}"
    );

    fs::write(&copy_id, "{\"on\": false}").unwrap();
    editor.save(&copy_id, &mut buffer).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "{\n  \"name\": \"demo\",\n  \"payload\": \"{\\\"on\\\":false}\"\n}\n"
    );
}
