use drawkit_editor::{export_json, export_to_file, import_from_file, PendingEdit};

use crate::common::{editor_with, rect, squares};

#[tokio::test]
async fn test_export_json_contains_every_object() {
    let scene = squares(3);
    let json = export_json(scene.clone()).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let text = value.to_string();
    for object in scene.objects() {
        assert!(text.contains(&object.id.to_string()));
    }
}

#[tokio::test]
async fn test_file_round_trip_keeps_groups_and_ids() {
    let mut editor = editor_with(squares(4));
    editor.select(0, true).unwrap();
    editor.select(1, true).unwrap();
    editor.group_selection().unwrap();
    editor.add_object(rect(0.5, 0.25, 3.0, 4.0)).unwrap();
    let scene = editor.export_snapshot(PendingEdit::Finish).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drawing.json");
    export_to_file(scene.clone(), &path).await.unwrap();
    assert!(path.exists());

    let loaded = import_from_file(&path).await.unwrap();
    assert_eq!(loaded, scene);
}

#[tokio::test]
async fn test_import_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = import_from_file(dir.path().join("missing.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, drawkit_core::Error::Io(_)));
}

#[tokio::test]
async fn test_import_rejects_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();
    let err = import_from_file(&path).await.unwrap_err();
    assert!(matches!(err, drawkit_core::Error::Serialization(_)));
}
