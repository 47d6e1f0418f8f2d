//! Reading documents from files, strings and readers.

use cxml::{Document, Error, ParseOptions};
use cxml_source_map::FileId;
use pretty_assertions::assert_eq;
use std::io::Write;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn write_temp(xml: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(xml.as_bytes()).unwrap();
    file
}

#[test]
fn test_open_reads_file() {
    init_tracing();
    let file = write_temp("<A><B>42</B></A>");

    let doc = Document::open("A", file.path()).unwrap();
    assert!(doc.is_parsed());
    assert_eq!(doc.root_name(), Some("A"));
    assert_eq!(doc.number_child::<i32>("B").unwrap(), 42);
    doc.done().unwrap();

    let registered = doc.source_context().get_file(FileId(0));
    assert_eq!(
        registered.map(|f| f.path.clone()),
        Some(file.path().display().to_string())
    );
}

#[test]
fn test_missing_file() {
    let err = Document::open("A", "does/not/exist.xml").unwrap_err();
    assert!(matches!(err, Error::SourceNotFound { .. }));
    insta::assert_snapshot!(err.to_string(), @"XML file does/not/exist.xml not found");
    assert_eq!(err.to_diagnostic().code.as_deref(), Some("CX-2-1"));
}

#[test]
fn test_unreadable_path() {
    let dir = tempfile::tempdir().unwrap();

    // A directory exists but cannot be read as text
    let mut doc = Document::new();
    let err = doc.read_file(dir.path()).unwrap_err();
    assert!(matches!(err, Error::Read { .. }), "got {:?}", err);
    assert!(!doc.is_parsed());
}

#[test]
fn test_wrong_root_name() {
    let file = write_temp("<X><B/></X>");

    let err = Document::open("A", file.path()).unwrap_err();
    match &err {
        Error::UnrecognisedRoot {
            expected, found, ..
        } => {
            assert_eq!(expected, "A");
            assert_eq!(found, "X");
        }
        other => panic!("expected UnrecognisedRoot, got {:?}", other),
    }
    insta::assert_snapshot!(err.to_string(), @"unrecognised root node X (expected A)");
}

#[test]
fn test_read_reader() {
    let mut doc = Document::with_root_name("A");
    doc.read_reader("<A><C>fred</C></A>".as_bytes()).unwrap();

    assert_eq!(doc.string_child("C").unwrap(), "fred");
    let registered = doc.source_context().get_file(FileId(0)).unwrap();
    assert_eq!(registered.path, "<stream>");
}

#[test]
fn test_read_only_once() {
    let file = write_temp("<A/>");
    let mut doc = Document::new();
    doc.read_string("<A><B/></A>").unwrap();

    let err = doc.read_file(file.path()).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"XML document has already been read");

    // The first tree is still bound
    assert_eq!(doc.all_node_children().unwrap().len(), 1);
}

#[test]
fn test_options_from_json() {
    let options: ParseOptions =
        serde_json::from_str(r#"{ "keep-whitespace-text": false, "max-depth": 4 }"#).unwrap();
    let mut doc = Document::new().with_options(options);
    doc.read_string("<A>\n  <B> 7 </B>\n</A>").unwrap();

    let root = doc.tree().unwrap().root.clone();
    assert_eq!(root.children.len(), 1);

    // Whitespace inside non-empty text is kept
    assert_eq!(doc.string_child("B").unwrap(), " 7 ");
    assert_eq!(doc.number_child::<i32>("B").unwrap(), 7);
}

#[test]
fn test_render_error_points_into_source() {
    let mut doc = Document::new();
    doc.read_string("<A>\n  <B>1</B>\n  <Z/>\n</A>").unwrap();
    doc.string_child("B").unwrap();

    let err = doc.done().unwrap_err();
    let location = err.location().unwrap();
    assert_eq!(location.display_position(), "3:3");

    let text = doc.render_error(&err);
    assert!(text.contains("<string>"), "Got: {}", text);
    assert!(text.contains("[CX-2-8] Unexpected XML Tag"), "Got: {}", text);
    assert!(text.contains("<Z> is not expected in <A>"), "Got: {}", text);
    assert!(text.contains("? Check the spelling of <Z>, or remove it?"), "Got: {}", text);
}

#[test]
fn test_render_parse_error() {
    let mut doc = Document::with_root_name("A");
    let err = doc.read_string("<A/><A/>").unwrap_err();

    assert!(matches!(err, Error::Parse(cxml_tree::Error::MultipleRoots { .. })));
    let text = doc.render_error(&err);
    assert!(text.contains("[CX-1-6] Multiple XML Root Elements"), "Got: {}", text);
}

#[test]
fn test_diagnostic_json() {
    let doc = Document::with_root_name("A");
    let err = doc.node_child("B").unwrap_err();

    let json = err.to_diagnostic().to_json();
    assert_eq!(json["code"], "CX-2-4");
    assert_eq!(json["kind"], "error");
    assert_eq!(json["title"], "No Document Position");
    assert!(json.get("location").is_none());

    let mut doc = Document::new();
    doc.read_string("<A/>").unwrap();
    let json = doc.node_child("B").unwrap_err().to_diagnostic().to_json();
    assert_eq!(json["code"], "CX-2-5");
    assert_eq!(json["problem"], "<A> requires a <B> child");
    assert!(json.get("location").is_some());
}
