use drawkit_core::{shared, Error, ModeError};
use drawkit_editor::{EditLog, Editor, Graphic, SceneGraph};
use drawkit_settings::Config;
use proptest::prelude::*;

use crate::common::{editor_with, ids, rect, squares};

#[test]
fn test_add_deselect_add_select_scenario() {
    let mut editor = Editor::new();
    editor.add_object(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
    editor.add_object(rect(20.0, 0.0, 10.0, 10.0)).unwrap();

    assert_eq!(
        editor.history_descriptions(),
        vec!["Add path".to_string(), "Add path".to_string()]
    );
    let after = editor.scene().clone();

    editor.undo().unwrap();
    assert_eq!(editor.scene().len(), 1);
    assert!(editor.scene().objects()[0].selected);
    editor.undo().unwrap();
    assert!(editor.scene().is_empty());

    editor.redo().unwrap();
    editor.redo().unwrap();
    assert_eq!(editor.scene(), &after);
    let objects = editor.scene().objects();
    assert!(!objects[0].selected);
    assert!(objects[1].selected);
}

#[test]
fn test_delete_and_undo_restores_order() {
    let mut editor = editor_with(squares(10));
    let before = ids(editor.scene());
    for index in [7, 2, 5] {
        editor.select(index, true).unwrap();
    }
    editor.delete_selection().unwrap();

    let remaining: Vec<_> = before
        .iter()
        .enumerate()
        .filter(|(i, _)| ![2, 5, 7].contains(i))
        .map(|(_, id)| *id)
        .collect();
    assert_eq!(ids(editor.scene()), remaining);

    editor.undo().unwrap();
    assert_eq!(ids(editor.scene()), before);
    editor.redo().unwrap();
    assert_eq!(ids(editor.scene()), remaining);
}

#[test]
fn test_failed_transaction_rolls_back() {
    let mut editor = editor_with(squares(3));
    let before = editor.scene().clone();
    let err = editor
        .transaction("Broken", |ctx, builder| {
            builder.push(drawkit_editor::EditCommand::select(
                ctx,
                drawkit_editor::ObjectRef::root(0),
                true,
            )?);
            builder.push(drawkit_editor::EditCommand::remove(
                ctx,
                drawkit_editor::ObjectRef::root(9),
            )?);
            Ok(())
        })
        .unwrap_err();
    assert!(err.is_invariant_violation());
    assert_eq!(editor.scene(), &before);
    assert!(!editor.can_undo());
}

#[test]
fn test_empty_transaction_is_refused() {
    let mut editor = editor_with(squares(1));
    let err = editor.transaction("Nothing", |_, _| Ok(())).unwrap_err();
    assert!(err.is_recoverable());
    assert!(!editor.can_undo());
}

#[test]
fn test_undo_on_empty_history() {
    let mut editor = Editor::new();
    let err = editor.undo().unwrap_err();
    assert!(matches!(
        err,
        Error::Mode(ModeError::HistoryEmpty { action: "undo" })
    ));
}

#[test]
fn test_new_edit_clears_redo() {
    let mut editor = editor_with(squares(2));
    editor.select(0, true).unwrap();
    editor.undo().unwrap();
    assert!(editor.can_redo());
    editor.select(1, true).unwrap();
    assert!(!editor.can_redo());
}

#[test]
fn test_history_limit_drops_oldest() {
    let mut config = Config::default();
    config.editor.history_limit = 3;
    let mut editor = Editor::from_config(&config);
    editor.load(squares(5));
    for i in 0..5 {
        editor.select(i, true).unwrap();
    }
    assert_eq!(editor.history().undo_len(), 3);
    for _ in 0..3 {
        editor.undo().unwrap();
    }
    assert!(!editor.can_undo());
    let selected = editor.scene().selected_indices();
    assert_eq!(selected, vec![0, 1]);
}

#[test]
fn test_modified_flag_follows_save_point() {
    let log = shared(EditLog::default());
    let mut editor = Editor::new().with_sink(log.clone());
    editor.load(squares(2));
    assert!(!editor.is_modified());

    editor.select(0, true).unwrap();
    assert!(editor.is_modified());
    assert_eq!(log.borrow().modified, Some(true));

    editor.undo().unwrap();
    assert!(!editor.is_modified());
    assert_eq!(log.borrow().modified, Some(false));

    editor.redo().unwrap();
    editor.mark_saved();
    assert!(!editor.is_modified());
    assert_eq!(log.borrow().history, Some((true, false)));
}

#[test]
fn test_sink_receives_posted_edits() {
    let log = shared(EditLog::default());
    let mut editor = Editor::new().with_sink(log.clone());
    editor.add_object(rect(0.0, 0.0, 5.0, 5.0)).unwrap();
    editor.move_selection(1.0, 0.0).unwrap();

    let log = log.borrow();
    let descriptions: Vec<&str> = log.posted.iter().map(|p| p.description.as_str()).collect();
    assert_eq!(descriptions, vec!["Add path", "Move"]);
    assert!(log.posted[0].timestamp <= log.posted[1].timestamp);
}

#[derive(Debug, Clone)]
enum Op {
    Add(i16, i16),
    Select(usize),
    Move(i16, i16),
    Delete,
    Group,
    Front,
    Back,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-50i16..50, -50i16..50).prop_map(|(x, y)| Op::Add(x, y)),
        (0usize..8).prop_map(Op::Select),
        (-10i16..10, -10i16..10).prop_map(|(x, y)| Op::Move(x, y)),
        Just(Op::Delete),
        Just(Op::Group),
        Just(Op::Front),
        Just(Op::Back),
    ]
}

fn apply(editor: &mut Editor, op: &Op) {
    let _ = match *op {
        Op::Add(x, y) => editor
            .add_object(rect(x as f64, y as f64, 4.0, 3.0))
            .map(|_| ()),
        Op::Select(i) if i < editor.scene().len() => editor.select(i, true),
        Op::Select(_) => Ok(()),
        Op::Move(dx, dy) => editor.move_selection(dx as f64, dy as f64),
        Op::Delete => editor.delete_selection(),
        Op::Group => editor.group_selection(),
        Op::Front => editor.bring_to_front(),
        Op::Back => editor.send_to_back(),
    };
}

proptest! {
    #[test]
    fn prop_undo_all_then_redo_all_round_trips(ops in prop::collection::vec(op(), 1..24)) {
        let mut editor = Editor::new();
        for op in &ops {
            apply(&mut editor, op);
        }
        let after = editor.scene().clone();
        let recorded = editor.history().undo_len();

        for _ in 0..recorded {
            editor.undo().unwrap();
        }
        prop_assert_eq!(editor.scene(), &SceneGraph::new());

        for _ in 0..recorded {
            editor.redo().unwrap();
        }
        prop_assert_eq!(editor.scene(), &after);
    }

    #[test]
    fn prop_delete_any_subset_and_undo(mask in prop::collection::vec(any::<bool>(), 10)) {
        let mut editor = editor_with(squares(10));
        let before = ids(editor.scene());
        for (i, &pick) in mask.iter().enumerate() {
            if pick {
                editor.select(i, true).unwrap();
            }
        }
        let picked = mask.iter().filter(|&&b| b).count();
        match editor.delete_selection() {
            Ok(()) => prop_assert_eq!(editor.scene().len(), 10 - picked),
            Err(e) => prop_assert!(picked == 0 && e.is_recoverable()),
        }
        while editor.can_undo() {
            editor.undo().unwrap();
        }
        prop_assert_eq!(ids(editor.scene()), before);
        prop_assert!(editor.scene().objects().iter().all(|o| !o.selected));
    }
}

#[test]
fn test_group_undo_restores_members() {
    let mut editor = editor_with(squares(4));
    let before = editor.scene().clone();
    editor.select(1, true).unwrap();
    editor.select(3, true).unwrap();
    editor.group_selection().unwrap();

    let objects = editor.scene().objects();
    assert_eq!(objects.len(), 3);
    let Graphic::Group(group) = &objects[1].graphic else {
        panic!("expected a group at index 1");
    };
    assert_eq!(group.objects.len(), 2);

    editor.undo().unwrap();
    editor.undo().unwrap();
    editor.undo().unwrap();
    assert_eq!(editor.scene(), &before);
}
