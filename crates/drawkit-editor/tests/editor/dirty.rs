use drawkit_editor::model::{Paint, Point};
use drawkit_editor::{BBox, Editor, Repaint, Tool, Viewport};
use drawkit_settings::GridSettings;
use proptest::prelude::*;

use crate::common::{editor_with, editor_with_selected, rect, squares};

fn region(editor: &mut Editor) -> BBox {
    match editor.take_repaint() {
        Repaint::Region(bbox) => bbox,
        other => panic!("expected a region, found {other:?}"),
    }
}

proptest! {
    #[test]
    fn prop_move_repaints_old_and_new_bounds(
        x in -100.0f64..100.0,
        y in -100.0f64..100.0,
        w in 0.5f64..50.0,
        h in 0.5f64..50.0,
        dx in -60.0f64..60.0,
        dy in -60.0f64..60.0,
    ) {
        prop_assume!(dx != 0.0 || dy != 0.0);
        let mut editor = editor_with_selected(rect(x, y, w, h));
        let before = editor.scene().objects()[0].bounds();
        editor.take_repaint();

        editor.move_selection(dx, dy).unwrap();
        let after = editor.scene().objects()[0].bounds();
        let dirty = region(&mut editor);
        prop_assert!(dirty.contains_box(&before));
        prop_assert!(dirty.contains_box(&after));

        editor.undo().unwrap();
        let dirty = region(&mut editor);
        prop_assert!(dirty.contains_box(&before));
        prop_assert!(dirty.contains_box(&after));
    }
}

#[test]
fn test_restyle_repaints_only_the_object() {
    let mut editor = editor_with(squares(3));
    editor.select(1, true).unwrap();
    editor.take_repaint();
    editor.set_fill(Some(Paint::rgb(0, 0, 255))).unwrap();
    let stroke = editor.scene().objects()[1].graphic.style().unwrap().stroke_overhang();
    assert_eq!(
        region(&mut editor),
        BBox::new(20.0, 0.0, 30.0, 10.0).inflate(stroke)
    );
    assert_eq!(editor.take_repaint(), Repaint::Nothing);
}

#[test]
fn test_wider_stroke_repaints_its_overhang() {
    let mut editor = editor_with_selected(rect(0.0, 0.0, 10.0, 10.0));
    editor.set_stroke_width(1.0).unwrap();
    editor.take_repaint();

    editor.set_stroke_width(10.0).unwrap();
    let dirty = region(&mut editor);
    assert!(dirty.contains_box(&BBox::new(-5.0, -5.0, 15.0, 15.0)));

    editor.undo().unwrap();
    let dirty = region(&mut editor);
    assert!(dirty.contains_box(&BBox::new(-5.0, -5.0, 15.0, 15.0)));
}

#[test]
fn test_unstroked_restyle_has_no_overhang() {
    let mut editor = editor_with_selected(rect(0.0, 0.0, 10.0, 10.0));
    editor.set_stroke(None).unwrap();
    editor.take_repaint();
    editor.set_stroke_width(8.0).unwrap();
    assert_eq!(region(&mut editor), BBox::new(0.0, 0.0, 10.0, 10.0));
}

#[test]
fn test_object_set_changes_repaint_everything() {
    let mut editor = editor_with(squares(3));
    editor.take_repaint();
    editor.add_object(rect(50.0, 50.0, 1.0, 1.0)).unwrap();
    assert_eq!(editor.take_repaint(), Repaint::Full);

    editor.select(0, true).unwrap();
    editor.take_repaint();
    editor.bring_to_front().unwrap();
    assert_eq!(editor.take_repaint(), Repaint::Full);
}

#[test]
fn test_grid_change_repaints_everything() {
    let mut editor = editor_with(squares(1));
    editor.take_repaint();
    editor.set_grid(editor.grid().clone());
    assert_eq!(editor.take_repaint(), Repaint::Nothing);

    editor.set_grid(GridSettings {
        visible: false,
        spacing_mm: 5.0,
    });
    assert_eq!(editor.take_repaint(), Repaint::Full);
}

#[test]
fn test_region_maps_to_view_space() {
    let mut viewport = Viewport::new(200.0, 100.0);
    viewport.set_zoom(2.0);
    let view = viewport.world_to_view_bbox(&BBox::new(0.0, 0.0, 10.0, 5.0));
    assert_eq!(view.width(), 20.0);
    assert_eq!(view.height(), 10.0);
    assert_eq!(view.max.y, 100.0);
}

#[test]
fn test_render_cache_invalidated_by_edits_and_undo() {
    let mut editor = editor_with_selected(rect(0.0, 0.0, 10.0, 10.0));
    assert_eq!(editor.display_list().items.len(), 1);
    assert!(editor.render_cache_valid());

    editor.move_selection(1.0, 1.0).unwrap();
    assert!(!editor.render_cache_valid());
    editor.display_list();
    assert!(editor.render_cache_valid());

    editor.undo().unwrap();
    assert!(!editor.render_cache_valid());

    editor.display_list();
    editor.viewport_mut().set_zoom(3.0);
    assert_eq!(editor.display_list().items.len(), 1);
}

#[test]
fn test_pen_curve_repaints_its_handles() {
    let mut editor = Editor::new();
    editor.set_tool(Tool::Pen).unwrap();
    editor.begin_path(Point::new(0.0, 0.0)).unwrap();
    editor.take_repaint();

    editor
        .add_curve(Point::new(0.0, 20.0), Point::new(10.0, 20.0), Point::new(10.0, 0.0))
        .unwrap();
    let handles = BBox::new(0.0, 0.0, 10.0, 20.0);
    assert!(region(&mut editor).contains_box(&handles));

    assert!(editor.undo_construction_step().unwrap());
    assert!(region(&mut editor).contains_box(&handles));

    // Nothing left to drop, nothing to repaint.
    assert!(!editor.undo_construction_step().unwrap());
    assert_eq!(editor.take_repaint(), Repaint::Nothing);
}
