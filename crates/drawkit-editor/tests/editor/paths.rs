use drawkit_core::{EmptyResultError, Error, TopologyError};
use drawkit_editor::model::{CloseMode, Conversion, Point, Segment, SegmentKind, Style, SymmetricPath};
use drawkit_editor::{Graphic, Interaction};

use crate::common::{assert_close, editor_with_selected, path, path_of, polyline, rect};

fn hook() -> Graphic {
    path(vec![
        Segment::move_to(Point::new(-10.0, 0.0)),
        Segment::bezier(Point::new(-7.0, 0.0), Point::new(0.0, 4.0), Point::new(0.0, 0.0)),
        Segment::bezier(Point::new(-3.0, 0.0), Point::new(7.0, 0.0), Point::new(10.0, 0.0)),
    ])
}

fn vase() -> Graphic {
    Graphic::Symmetric(
        SymmetricPath::new(
            vec![
                Segment::move_to(Point::new(1.0, 0.0)),
                Segment::line_to(Point::new(2.0, 5.0)),
            ],
            Point::new(0.0, 6.0),
            Point::new(0.0, -1.0),
            Style::default(),
        )
        .unwrap(),
    )
}

fn incoming_handle(editor: &drawkit_editor::Editor) -> Point {
    match &path_of(editor, 0).segments()[1] {
        Segment::Bezier { c2, .. } => c2.pos,
        other => panic!("expected a bezier, found {}", other.name()),
    }
}

#[test]
fn test_close_then_open_restores_path() {
    for mode in [CloseMode::Line, CloseMode::Continuous, CloseMode::MergeEnds] {
        let original = polyline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let mut editor = editor_with_selected(original.clone());
        editor.begin_path_edit().unwrap();
        let before = path_of(&editor, 0).clone();

        editor.close_path(mode).unwrap();
        assert!(path_of(&editor, 0).is_closed());
        editor.open_path(true).unwrap();

        let after = path_of(&editor, 0);
        assert_eq!(after.segments().len(), before.segments().len(), "{mode:?}");
        assert_eq!(after.endpoints(), before.endpoints(), "{mode:?}");
    }
}

#[test]
fn test_open_keeping_closing_segment() {
    let mut editor = editor_with_selected(rect(0.0, 0.0, 10.0, 10.0));
    editor.begin_path_edit().unwrap();
    let before = path_of(&editor, 0).segments().len();
    editor.open_path(false).unwrap();

    let path = path_of(&editor, 0);
    assert!(!path.is_closed());
    assert_eq!(path.segments().len(), before);
    let last = path.segments().last().unwrap();
    assert_eq!(last.kind(), SegmentKind::Line);
    assert_eq!(last.end(), Some(Point::new(0.0, 0.0)));
}

#[test]
fn test_close_twice_is_refused() {
    let mut editor = editor_with_selected(rect(0.0, 0.0, 10.0, 10.0));
    editor.begin_path_edit().unwrap();
    let err = editor.close_path(CloseMode::Line).unwrap_err();
    assert!(matches!(err, Error::Topology(TopologyError::AlreadyClosed)));
    assert_eq!(editor.history().undo_len(), 0);
}

#[test]
fn test_continuity_keeps_neighbour_distance() {
    let mut editor = editor_with_selected(hook());
    editor.begin_path_edit().unwrap();
    editor.select_control(4).unwrap();

    editor.make_continuous(false).unwrap();
    assert_close(incoming_handle(&editor), Point::new(4.0, 0.0));

    editor.move_point(Point::new(-3.0, 4.0)).unwrap();
    editor.make_continuous(false).unwrap();
    assert_close(incoming_handle(&editor), Point::new(2.4, -3.2));
}

#[test]
fn test_equidistant_continuity() {
    let mut editor = editor_with_selected(hook());
    editor.begin_path_edit().unwrap();
    editor.select_control(4).unwrap();
    editor.move_point(Point::new(-3.0, 4.0)).unwrap();
    editor.make_continuous(true).unwrap();
    assert_close(incoming_handle(&editor), Point::new(3.0, -4.0));
}

#[test]
fn test_continuity_without_neighbour_handle() {
    let mut editor = editor_with_selected(polyline(&[(0.0, 0.0), (10.0, 0.0)]));
    editor.begin_path_edit().unwrap();
    editor.select_control(1).unwrap();
    let err = editor.make_continuous(false).unwrap_err();
    assert!(matches!(err, Error::Topology(TopologyError::NoNeighborHandle)));
}

#[test]
fn test_double_join_toggle_is_identity() {
    let original = vase();
    let mut editor = editor_with_selected(original.clone());
    editor.begin_path_edit().unwrap();

    editor.toggle_join_anchor().unwrap();
    let Graphic::Symmetric(toggled) = &editor.scene().objects()[0].graphic else {
        panic!("expected a symmetric path");
    };
    assert!(toggled.join().is_some());

    editor.toggle_join_anchor().unwrap();
    assert_eq!(editor.scene().objects()[0].graphic, original);
}

#[test]
fn test_symmetric_slot_must_be_partial() {
    let mut editor = editor_with_selected(vase());
    editor.begin_path_edit().unwrap();
    let err = editor
        .set_symmetric_join(Some(Segment::line_to(Point::new(0.0, 6.0))))
        .unwrap_err();
    assert!(err.is_recoverable());
    assert_eq!(editor.scene().objects()[0].graphic, vase());
}

#[test]
fn test_convert_line_to_curve_and_undo() {
    let mut editor = editor_with_selected(polyline(&[(0.0, 0.0), (9.0, 0.0)]));
    editor.begin_path_edit().unwrap();
    editor.select_control(1).unwrap();
    editor.convert_segment(Conversion::ToBezier).unwrap();

    let Segment::Bezier { c1, c2, .. } = &path_of(&editor, 0).segments()[1] else {
        panic!("expected a bezier");
    };
    assert_close(c1.pos, Point::new(3.0, 0.0));
    assert_close(c2.pos, Point::new(6.0, 0.0));

    assert_eq!(editor.undo().unwrap(), "Convert to curve");
    assert_eq!(path_of(&editor, 0).segments()[1].kind(), SegmentKind::Line);
    assert!(matches!(editor.interaction(), Interaction::PathEdit(_)));
}

#[test]
fn test_first_segment_stays_a_move() {
    let mut editor = editor_with_selected(polyline(&[(0.0, 0.0), (9.0, 0.0)]));
    editor.begin_path_edit().unwrap();
    let err = editor.convert_segment(Conversion::ToLine).unwrap_err();
    assert!(matches!(
        err,
        Error::Topology(TopologyError::FirstSegmentMustBeMove)
    ));
}

#[test]
fn test_break_path_splits_into_two_objects() {
    let mut editor = editor_with_selected(polyline(&[
        (0.0, 0.0),
        (10.0, 0.0),
        (20.0, 0.0),
        (30.0, 0.0),
    ]));
    editor.begin_path_edit().unwrap();
    editor.select_control(2).unwrap();
    editor.break_path().unwrap();

    assert_eq!(editor.scene().len(), 2);
    assert_eq!(path_of(&editor, 0).drawing_segment_count(), 2);
    let tail = path_of(&editor, 1);
    assert_eq!(tail.drawing_segment_count(), 1);
    assert_eq!(tail.segments()[0].end(), Some(Point::new(20.0, 0.0)));

    editor.undo().unwrap();
    assert_eq!(editor.scene().len(), 1);
    assert_eq!(path_of(&editor, 0).drawing_segment_count(), 3);
}

#[test]
fn test_break_at_either_end_is_empty() {
    let mut editor = editor_with_selected(polyline(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]));
    editor.begin_path_edit().unwrap();

    editor.select_control(0).unwrap();
    let err = editor.break_path().unwrap_err();
    assert!(matches!(
        err,
        Error::EmptyResult(EmptyResultError::BreakSide { side: "first" })
    ));

    editor.select_control(2).unwrap();
    let err = editor.break_path().unwrap_err();
    assert!(matches!(
        err,
        Error::EmptyResult(EmptyResultError::BreakSide { side: "second" })
    ));
    assert_eq!(editor.scene().len(), 1);
}

#[test]
fn test_add_point_subdivides_segment() {
    let mut editor = editor_with_selected(polyline(&[(0.0, 0.0), (10.0, 0.0)]));
    editor.begin_path_edit().unwrap();
    editor.select_control(1).unwrap();
    let anchor = editor.add_point().unwrap();

    assert_eq!(anchor, 1);
    let (selected, control) = editor.selected_control().unwrap();
    assert_eq!(selected, 1);
    assert_close(control.pos, Point::new(5.0, 0.0));
    assert_eq!(path_of(&editor, 0).drawing_segment_count(), 2);
}

#[test]
fn test_deleting_last_point_removes_object() {
    let mut editor = editor_with_selected(polyline(&[(3.0, 4.0)]));
    editor.begin_path_edit().unwrap();
    editor.delete_point().unwrap();

    assert!(editor.scene().is_empty());
    assert!(editor.interaction().is_idle());

    editor.undo().unwrap();
    assert_eq!(editor.scene().len(), 1);
}

#[test]
fn test_control_navigation_wraps() {
    let mut editor = editor_with_selected(polyline(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]));
    editor.begin_path_edit().unwrap();
    assert_eq!(editor.previous_control().unwrap(), 2);
    assert_eq!(editor.next_control().unwrap(), 0);
    assert!(editor.select_control(3).is_err());
}

#[test]
fn test_merge_and_split_paths() {
    let mut editor = crate::common::editor_with(drawkit_editor::SceneGraph::new());
    editor.add_object(polyline(&[(0.0, 0.0), (10.0, 0.0)])).unwrap();
    editor.add_object(polyline(&[(0.0, 5.0), (10.0, 5.0)])).unwrap();
    editor.select(0, true).unwrap();

    editor.merge_selected_paths().unwrap();
    assert_eq!(editor.scene().len(), 1);
    assert_eq!(path_of(&editor, 0).subpath_count(), 2);
    assert!(editor.scene().objects()[0].selected);

    editor.split_selected_path().unwrap();
    assert_eq!(editor.scene().len(), 2);
    assert_eq!(path_of(&editor, 1).segments()[0].end(), Some(Point::new(0.0, 5.0)));
}

#[test]
fn test_merge_needs_two_paths() {
    let mut editor = editor_with_selected(polyline(&[(0.0, 0.0), (10.0, 0.0)]));
    let err = editor.merge_selected_paths().unwrap_err();
    assert!(matches!(
        err,
        Error::EmptyResult(EmptyResultError::NothingToMerge { found: 1 })
    ));
    let err = editor.split_selected_path().unwrap_err();
    assert!(matches!(err, Error::EmptyResult(EmptyResultError::NothingToSplit)));
}
