use drawkit_editor::model::{Font, Paint, Point};
use drawkit_editor::scene::{PaintTarget, SelectionKind};
use drawkit_editor::{
    BBox, ContainerPath, Drawable, Editor, Graphic, Group, Hotspot, SceneGraph, SceneVisitor, Tool,
};

use crate::common::{editor_with, editor_with_selected, ids, rect, squares};

/// Three squares stacked on the same spot.
fn stack() -> SceneGraph {
    let mut scene = SceneGraph::new();
    for i in 0..3 {
        let object = Drawable::new(rect(0.0, 0.0, 10.0 + i as f64, 10.0));
        scene.insert(&ContainerPath::root(), i, object).unwrap();
    }
    scene
}

#[test]
fn test_click_selects_topmost() {
    let mut editor = editor_with(stack());
    let hit = editor.click_select(Point::new(5.0, 5.0), false).unwrap();
    assert_eq!(hit, Some(2));
    assert_eq!(editor.scene().selected_indices(), vec![2]);

    let miss = editor.click_select(Point::new(500.0, 500.0), false).unwrap();
    assert_eq!(miss, None);
    assert!(editor.scene().selected_indices().is_empty());
}

#[test]
fn test_click_extends_selection() {
    let mut editor = editor_with(squares(3));
    editor.click_select(Point::new(5.0, 5.0), false).unwrap();
    editor.click_select(Point::new(45.0, 5.0), true).unwrap();
    assert_eq!(editor.scene().selected_indices(), vec![0, 2]);
}

#[test]
fn test_double_click_cycles_down_the_stack() {
    let mut editor = editor_with(stack());
    let p = Point::new(5.0, 5.0);
    let picks: Vec<_> = (0..4).map(|_| editor.cycle_select(p).unwrap()).collect();
    assert_eq!(picks, vec![Some(2), Some(1), Some(0), Some(2)]);
    assert_eq!(editor.scene().selected_indices(), vec![2]);
}

#[test]
fn test_double_click_cycle_follows_objects_across_reorder_and_undo() {
    let mut editor = editor_with(stack());
    let original = ids(editor.scene());
    let p = Point::new(5.0, 5.0);
    assert_eq!(editor.cycle_select(p).unwrap(), Some(2));
    assert_eq!(editor.cycle_select(p).unwrap(), Some(1));

    // The picked object moves to the top; the next pick is the one beneath it.
    editor.bring_to_front().unwrap();
    assert_eq!(editor.cycle_select(p).unwrap(), Some(1));
    assert_eq!(editor.scene().objects()[1].id, original[2]);

    // History replay starts the cycle over at the top.
    editor.undo().unwrap();
    editor.undo().unwrap();
    assert_eq!(editor.cycle_select(p).unwrap(), Some(2));
}

#[test]
fn test_hit_tolerance_expands_bounds() {
    let scene = squares(1);
    assert_eq!(scene.hit_test(Point::new(11.5, 5.0), 2.0), Some(0));
    assert_eq!(scene.hit_test(Point::new(12.5, 5.0), 2.0), None);
}

#[test]
fn test_hotspot_and_resize() {
    let mut editor = editor_with_selected(rect(0.0, 0.0, 10.0, 10.0));
    assert_eq!(editor.hotspot_at(Point::new(10.5, 9.0)), Some(Hotspot::NorthEast));
    assert_eq!(editor.hotspot_at(Point::new(5.0, -1.0)), Some(Hotspot::South));
    assert_eq!(editor.hotspot_at(Point::new(5.0, 5.0)), None);

    editor
        .resize_selection(Hotspot::NorthEast, Point::new(20.0, 30.0))
        .unwrap();
    assert_eq!(editor.selection_bounds(), BBox::new(0.0, 0.0, 20.0, 30.0));

    editor
        .resize_selection(Hotspot::West, Point::new(-10.0, 0.0))
        .unwrap();
    assert_eq!(editor.selection_bounds(), BBox::new(-10.0, 0.0, 20.0, 30.0));

    editor.undo().unwrap();
    editor.undo().unwrap();
    assert_eq!(editor.selection_bounds(), BBox::new(0.0, 0.0, 10.0, 10.0));
}

#[test]
fn test_move_selection() {
    let mut editor = editor_with(squares(2));
    editor.select(1, true).unwrap();
    editor.move_selection(5.0, -5.0).unwrap();
    assert_eq!(
        editor.scene().objects()[1].bounds(),
        BBox::new(25.0, -5.0, 35.0, 5.0)
    );
    assert_eq!(
        editor.scene().objects()[0].bounds(),
        BBox::new(0.0, 0.0, 10.0, 10.0)
    );
}

#[test]
fn test_ungroup_restores_members_in_place() {
    let mut editor = editor_with(squares(4));
    let before = ids(editor.scene());
    editor.select(1, true).unwrap();
    editor.select(2, true).unwrap();
    editor.group_selection().unwrap();
    assert_eq!(editor.selection_summary().kind(), SelectionKind::Group);

    editor.ungroup_selection().unwrap();
    assert_eq!(ids(editor.scene()), before);
    assert_eq!(editor.scene().selected_indices(), vec![1, 2]);

    editor.undo().unwrap();
    assert_eq!(editor.scene().len(), 3);
}

#[test]
fn test_ungroup_without_group_selected() {
    let mut editor = editor_with_selected(rect(0.0, 0.0, 1.0, 1.0));
    assert!(editor.ungroup_selection().unwrap_err().is_recoverable());
}

#[test]
fn test_ordering() {
    let mut editor = editor_with(squares(4));
    let before = ids(editor.scene());
    editor.select(0, true).unwrap();
    editor.select(2, true).unwrap();

    editor.bring_to_front().unwrap();
    assert_eq!(
        ids(editor.scene()),
        vec![before[1], before[3], before[0], before[2]]
    );

    editor.send_to_back().unwrap();
    assert_eq!(
        ids(editor.scene()),
        vec![before[0], before[2], before[1], before[3]]
    );

    editor.raise_selection().unwrap();
    assert_eq!(
        ids(editor.scene()),
        vec![before[1], before[0], before[2], before[3]]
    );

    editor.lower_selection().unwrap();
    assert_eq!(
        ids(editor.scene()),
        vec![before[0], before[2], before[1], before[3]]
    );
}

#[test]
fn test_style_recurses_into_groups() {
    let mut editor = editor_with(squares(3));
    editor.select(0, true).unwrap();
    editor.select(1, true).unwrap();
    editor.group_selection().unwrap();
    editor.select(1, true).unwrap();

    let red = Paint::rgb(255, 0, 0);
    editor.set_fill(Some(red)).unwrap();
    assert_eq!(editor.selected_paint(PaintTarget::Fill), Some(red));

    let group = editor.scene().objects()[0].as_group().unwrap();
    assert!(group
        .objects
        .iter()
        .all(|o| o.graphic.style().unwrap().fill == Some(red)));
    assert_eq!(editor.history_descriptions()[0], "Change fill");

    editor.undo().unwrap();
    assert_eq!(editor.selected_paint(PaintTarget::Fill), None);
}

#[test]
fn test_set_font_only_touches_text() {
    let mut editor = Editor::new();
    editor.set_tool(Tool::Text).unwrap();
    editor.create_text(Point::new(0.0, 0.0), "Label").unwrap();
    editor.add_object(rect(0.0, 20.0, 5.0, 5.0)).unwrap();
    editor.select_all().unwrap();

    let font = Font {
        family: "Sans".to_string(),
        size: 24.0,
        bold: true,
        italic: false,
    };
    editor.set_font(font.clone()).unwrap();
    assert_eq!(editor.selected_font(), Some(font));
    let text = editor.selected_text().unwrap();
    assert_eq!(text.content, "Label");
    assert!(text.extent.width > 0.0);
}

#[test]
fn test_selection_summary_is_mixed() {
    let mut editor = Editor::new();
    editor.set_tool(Tool::Text).unwrap();
    editor.create_text(Point::new(0.0, 0.0), "A").unwrap();
    editor.add_object(rect(0.0, 20.0, 5.0, 5.0)).unwrap();
    assert_eq!(editor.selection_summary().kind(), SelectionKind::Path);

    editor.select_all().unwrap();
    let summary = editor.selection_summary();
    assert_eq!(summary.count, 2);
    assert_eq!(summary.kind(), SelectionKind::Mixed);
    assert!(editor.selected_shape().is_some());

    editor.deselect_all().unwrap();
    assert_eq!(editor.selection_summary().kind(), SelectionKind::None);
}

#[derive(Default)]
struct Outline {
    lines: Vec<String>,
}

impl SceneVisitor for Outline {
    fn visit(&mut self, depth: usize, object: &Drawable) {
        self.lines
            .push(format!("{}{}", "  ".repeat(depth), object.graphic.kind_name()));
    }

    fn enter_group(&mut self, depth: usize, _group: &Drawable) {
        self.lines.push(format!("{}group", "  ".repeat(depth)));
    }
}

#[test]
fn test_visitor_walks_nested_groups() {
    let inner = Drawable::new(Graphic::Group(Group {
        objects: vec![Drawable::new(rect(0.0, 0.0, 1.0, 1.0))],
    }));
    let outer = Drawable::new(Graphic::Group(Group {
        objects: vec![inner, Drawable::new(rect(2.0, 0.0, 1.0, 1.0))],
    }));
    let mut scene = SceneGraph::new();
    scene.insert(&ContainerPath::root(), 0, outer).unwrap();
    scene
        .insert(&ContainerPath::root(), 1, Drawable::new(rect(5.0, 0.0, 1.0, 1.0)))
        .unwrap();

    let mut outline = Outline::default();
    scene.walk(&mut outline);
    assert_eq!(
        outline.lines,
        vec!["group", "  group", "    path", "  path", "path"]
    );
}

#[test]
fn test_nested_lookup_by_identity() {
    let leaf = Drawable::new(rect(0.0, 0.0, 1.0, 1.0));
    let leaf_id = leaf.id;
    let group = Drawable::new(Graphic::Group(Group {
        objects: vec![Drawable::new(rect(3.0, 3.0, 1.0, 1.0)), leaf],
    }));
    let mut scene = squares(2);
    scene.insert(&ContainerPath::root(), 1, group).unwrap();

    let at = scene.find(leaf_id).unwrap();
    assert_eq!(at.container, ContainerPath::root().child(1));
    assert_eq!(at.index, 1);
    assert_eq!(scene.expect(&at, leaf_id).unwrap().id, leaf_id);
}
