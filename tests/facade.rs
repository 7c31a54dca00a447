use drawkit::{init_logging, Editor, Point, Tool, BUILD_DATE, VERSION};

#[test]
fn test_build_metadata() {
    assert!(!VERSION.is_empty());
    assert!(BUILD_DATE.ends_with("UTC"));
}

#[test]
fn test_logging_installs_once() {
    assert!(init_logging().is_ok());
    assert!(init_logging().is_err());
}

#[test]
fn test_reexported_editor_round_trip() {
    let mut editor = Editor::new();
    editor.set_tool(Tool::Rectangle).unwrap();
    editor
        .create_rectangle(Point::new(0.0, 0.0), Point::new(50.0, 30.0))
        .unwrap();
    assert_eq!(editor.scene().len(), 1);
    editor.undo().unwrap();
    assert!(editor.scene().is_empty());
}
