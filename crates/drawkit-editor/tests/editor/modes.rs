use drawkit_core::{Error, ModeError, TopologyError};
use drawkit_editor::model::{CloseMode, Point, Segment, Style, SymmetricPath};
use drawkit_editor::{Actions, Editor, Graphic, Graphical, Hotspot, Interaction, PendingEdit, Tool};

use crate::common::{editor_with_selected, path_of, polyline, rect};

fn text_editor(content: &str) -> Editor {
    let mut editor = Editor::new();
    editor.set_tool(Tool::Text).unwrap();
    editor.create_text(Point::new(0.0, 0.0), content).unwrap();
    editor
}

fn text_content(editor: &Editor) -> String {
    editor.selected_text().unwrap().content.clone()
}

#[test]
fn test_pen_construction() {
    let mut editor = Editor::new();
    editor.set_tool(Tool::Pen).unwrap();
    editor.begin_path(Point::new(0.0, 0.0)).unwrap();
    editor.add_line(Point::new(10.0, 0.0)).unwrap();
    editor
        .add_curve(Point::new(12.0, 2.0), Point::new(12.0, 8.0), Point::new(10.0, 10.0))
        .unwrap();
    editor.add_line(Point::new(5.0, 20.0)).unwrap();
    assert_eq!(editor.draft().unwrap().segments().len(), 4);

    assert!(editor.undo_construction_step().unwrap());
    let actions = editor.update_construction_actions();
    assert!(actions.contains(Actions::FINISH_PATH | Actions::CLOSE_NEW_PATH | Actions::UNDO_STEP));

    let index = editor.finish_path(Some(CloseMode::Line)).unwrap();
    assert_eq!(index, 0);
    assert!(editor.interaction().is_idle());
    let path = path_of(&editor, 0);
    assert!(path.is_closed());
    assert_eq!(path.drawing_segment_count(), 3);
    assert!(editor.scene().objects()[0].selected);
    assert_eq!(editor.history_descriptions(), vec!["Add path".to_string()]);

    editor.undo().unwrap();
    assert!(editor.scene().is_empty());
}

#[test]
fn test_construction_needs_the_pen() {
    let mut editor = Editor::new();
    let err = editor.begin_path(Point::new(0.0, 0.0)).unwrap_err();
    assert!(matches!(
        err,
        Error::Mode(ModeError::WrongTool {
            required: "pen",
            ..
        })
    ));
}

#[test]
fn test_finishing_a_bare_move_is_refused() {
    let mut editor = Editor::new();
    editor.set_tool(Tool::Pen).unwrap();
    editor.begin_path(Point::new(0.0, 0.0)).unwrap();
    assert!(!editor.undo_construction_step().unwrap());

    let err = editor.finish_path(None).unwrap_err();
    assert!(matches!(
        err,
        Error::Topology(TopologyError::NotEnoughSegments { .. })
    ));
    assert!(matches!(editor.interaction(), Interaction::Constructing(_)));

    editor.abandon_path().unwrap();
    assert!(editor.interaction().is_idle());
    assert!(editor.scene().is_empty());
    assert!(!editor.can_undo());
}

#[test]
fn test_live_interaction_blocks_tool_switch_and_undo() {
    let mut editor = Editor::new();
    editor.set_tool(Tool::Pen).unwrap();
    editor.begin_path(Point::new(0.0, 0.0)).unwrap();

    let err = editor.set_tool(Tool::Select).unwrap_err();
    assert!(matches!(
        err,
        Error::Mode(ModeError::InteractionActive {
            active: "path construction"
        })
    ));
    assert_eq!(editor.tool(), Tool::Pen);
    assert!(editor.undo().is_err());
    assert!(editor.delete_selection().is_err());
}

#[test]
fn test_construction_steps_need_a_draft() {
    let mut editor = Editor::new();
    let err = editor.add_line(Point::new(1.0, 1.0)).unwrap_err();
    assert!(matches!(
        err,
        Error::Mode(ModeError::NotActive {
            expected: "path construction"
        })
    ));
}

#[test]
fn test_distortion_commits_one_edit() {
    let mut editor = editor_with_selected(rect(0.0, 0.0, 10.0, 10.0));
    let original = editor.scene().clone();
    editor.begin_distortion().unwrap();
    assert!(editor
        .move_distortion_corner(Hotspot::NorthEast, Point::new(20.0, 20.0))
        .unwrap());
    assert!(!editor
        .move_distortion_corner(Hotspot::East, Point::new(30.0, 5.0))
        .unwrap());

    let preview = editor.distortion_preview().unwrap();
    assert!(preview.bounds().contains(Point::new(20.0, 20.0)));
    assert_eq!(editor.scene(), &original);

    editor.finish_distortion().unwrap();
    assert!(editor.interaction().is_idle());
    assert_eq!(editor.scene().objects()[0].graphic, preview);
    assert_eq!(editor.history_descriptions(), vec!["Distort".to_string()]);

    editor.undo().unwrap();
    assert_eq!(editor.scene(), &original);
}

#[test]
fn test_distorting_a_symmetric_path_substitutes_it() {
    let vase = SymmetricPath::new(
        vec![
            Segment::move_to(Point::new(1.0, 0.0)),
            Segment::line_to(Point::new(2.0, 5.0)),
        ],
        Point::new(0.0, 6.0),
        Point::new(0.0, -1.0),
        Style::default(),
    )
    .unwrap();
    let mut editor = editor_with_selected(Graphic::Symmetric(vase));
    let original = editor.scene().clone();
    editor.begin_distortion().unwrap();
    let corner = editor.scene().bounds().max;
    editor
        .move_distortion_corner(Hotspot::NorthEast, Point::new(corner.x + 3.0, corner.y))
        .unwrap();
    editor.finish_distortion().unwrap();

    let object = &editor.scene().objects()[0];
    assert!(matches!(object.graphic, Graphic::Path(_)));
    assert_ne!(object.id, original.objects()[0].id);
    assert!(object.selected);

    editor.undo().unwrap();
    assert_eq!(editor.scene(), &original);
}

#[test]
fn test_distortion_identity_and_abandon() {
    let mut editor = editor_with_selected(rect(0.0, 0.0, 10.0, 10.0));
    editor.begin_distortion().unwrap();
    editor.finish_distortion().unwrap();
    assert!(!editor.can_undo());

    editor.begin_distortion().unwrap();
    editor
        .move_distortion_corner(Hotspot::SouthWest, Point::new(-5.0, -5.0))
        .unwrap();
    editor.abandon_distortion().unwrap();
    assert!(editor.interaction().is_idle());
    assert!(!editor.can_undo());
    assert_eq!(
        editor.scene().objects()[0].bounds(),
        drawkit_editor::BBox::new(0.0, 0.0, 10.0, 10.0)
    );
}

#[test]
fn test_only_paths_can_be_distorted() {
    let mut editor = text_editor("Hi");
    editor.set_tool(Tool::Select).unwrap();
    let err = editor.begin_distortion().unwrap_err();
    assert!(matches!(
        err,
        Error::Topology(TopologyError::Unsupported {
            operation: "distort",
            kind: "text"
        })
    ));
}

#[test]
fn test_text_edit_commits_on_finish() {
    let mut editor = text_editor("Hello");
    editor.begin_text_edit().unwrap();
    assert_eq!(editor.text_edit_buffer().unwrap().cursor, 5);

    editor.insert_text(" world").unwrap();
    editor.cursor_home().unwrap();
    assert!(editor.delete_forward().unwrap());
    editor.cursor_end().unwrap();
    assert!(editor.backspace().unwrap());
    assert_eq!(text_content(&editor), "Hello");
    assert!(editor.undo().is_err());

    editor.finish_text_edit().unwrap();
    assert_eq!(text_content(&editor), "ello worl");
    assert_eq!(editor.history_descriptions()[0], "Edit text");

    editor.undo().unwrap();
    assert_eq!(text_content(&editor), "Hello");
}

#[test]
fn test_text_edit_abandon_and_no_change() {
    let mut editor = text_editor("Hello");
    let recorded = editor.history().undo_len();

    editor.begin_text_edit().unwrap();
    editor.insert_text("!").unwrap();
    editor.abandon_text_edit().unwrap();
    assert_eq!(text_content(&editor), "Hello");

    editor.begin_text_edit().unwrap();
    editor.finish_text_edit().unwrap();
    assert!(editor.interaction().is_idle());
    assert_eq!(editor.history().undo_len(), recorded);
}

#[test]
fn test_text_edit_needs_a_text() {
    let mut editor = editor_with_selected(rect(0.0, 0.0, 1.0, 1.0));
    assert!(editor.begin_text_edit().unwrap_err().is_recoverable());
    assert!(editor.insert_text("x").is_err());
}

#[test]
fn test_snapshot_finishes_or_discards_text_edit() {
    let mut editor = text_editor("Draft");
    editor.begin_text_edit().unwrap();
    editor.insert_text(" 2").unwrap();
    let snapshot = editor.export_snapshot(PendingEdit::Discard).unwrap();
    assert!(editor.interaction().is_idle());
    let Graphic::Text(text) = &snapshot.objects()[0].graphic else {
        panic!("expected a text");
    };
    assert_eq!(text.content, "Draft");

    editor.begin_text_edit().unwrap();
    editor.insert_text(" 2").unwrap();
    let snapshot = editor.export_snapshot(PendingEdit::Finish).unwrap();
    let Graphic::Text(text) = &snapshot.objects()[0].graphic else {
        panic!("expected a text");
    };
    assert_eq!(text.content, "Draft 2");
}

#[test]
fn test_path_edit_follows_undo() {
    let mut editor = editor_with_selected(polyline(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]));
    editor.begin_path_edit().unwrap();
    editor.select_control(2).unwrap();
    editor.delete_point().unwrap();
    assert_eq!(editor.selected_control().unwrap().0, 1);

    editor.undo().unwrap();
    assert!(matches!(editor.interaction(), Interaction::PathEdit(_)));
    editor.select_control(2).unwrap();
    editor.finish_path_edit().unwrap();
    assert!(editor.interaction().is_idle());
}

#[test]
fn test_path_edit_needs_single_path() {
    let mut editor = text_editor("T");
    editor.set_tool(Tool::Select).unwrap();
    let err = editor.begin_path_edit().unwrap_err();
    assert!(matches!(err, Error::Topology(TopologyError::NotAPath { kind: "text" })));

    editor.deselect_all().unwrap();
    assert!(editor.begin_path_edit().is_err());
}

#[test]
fn test_tool_actions_follow_selection() {
    let mut editor = editor_with_selected(rect(0.0, 0.0, 10.0, 10.0));
    let actions = editor.update_tool_actions();
    assert!(actions.contains(Actions::EDIT_PATH | Actions::DISTORT | Actions::DELETE | Actions::GROUP));
    assert!(!actions.intersects(Actions::UNGROUP | Actions::EDIT_TEXT | Actions::UNDO));

    editor.set_tool(Tool::Pen).unwrap();
    let actions = editor.update_tool_actions();
    assert!(actions.contains(Actions::BEGIN_PATH));
    assert!(!actions.contains(Actions::EDIT_PATH));

    editor.set_tool(Tool::Zoom).unwrap();
    assert!(editor.update_tool_actions().is_empty());
}

#[test]
fn test_edit_actions_in_path_edit() {
    let mut editor = editor_with_selected(polyline(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]));
    editor.begin_path_edit().unwrap();
    editor.select_control(1).unwrap();

    let state = editor.update_actions();
    let edit = state.edit;
    assert!(edit.contains(
        Actions::TO_BEZIER
            | Actions::ADD_POINT
            | Actions::DELETE_POINT
            | Actions::CLOSE_PATH
            | Actions::BREAK_PATH
            | Actions::FINISH
    ));
    assert!(!edit.intersects(
        Actions::TO_LINE | Actions::OPEN_PATH | Actions::MAKE_CONTINUOUS | Actions::TOGGLE_JOIN
    ));
    assert!(!state.tool.contains(Actions::DELETE));
    assert!(state.construction.is_empty());
}
