#![allow(dead_code)]

use drawkit_editor::model::{PathShape, Point, Segment, Style};
use drawkit_editor::{BBox, ContainerPath, Drawable, Editor, Graphic, SceneGraph};

pub fn rect(x: f64, y: f64, w: f64, h: f64) -> Graphic {
    Graphic::Path(PathShape::rectangle(
        BBox::new(x, y, x + w, y + h),
        Style::default(),
    ))
}

/// Open polyline through `points`.
pub fn polyline(points: &[(f64, f64)]) -> Graphic {
    let points: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
    Graphic::Path(PathShape::polyline(&points, Style::default()).unwrap())
}

pub fn path(segments: Vec<Segment>) -> Graphic {
    Graphic::Path(
        PathShape::from_parts(segments, Default::default(), Style::default()).unwrap(),
    )
}

/// Scene of `n` unselected 10x10 squares laid out left to right.
pub fn squares(n: usize) -> SceneGraph {
    let mut scene = SceneGraph::new();
    for i in 0..n {
        let object = Drawable::new(rect(i as f64 * 20.0, 0.0, 10.0, 10.0));
        scene.insert(&ContainerPath::root(), i, object).unwrap();
    }
    scene
}

pub fn editor_with(scene: SceneGraph) -> Editor {
    let mut editor = Editor::new();
    editor.load(scene);
    editor
}

/// Editor holding `graphic` as its only, selected object.
pub fn editor_with_selected(graphic: Graphic) -> Editor {
    let mut scene = SceneGraph::new();
    scene
        .insert(&ContainerPath::root(), 0, Drawable::new(graphic).selected(true))
        .unwrap();
    editor_with(scene)
}

pub fn ids(scene: &SceneGraph) -> Vec<uuid::Uuid> {
    scene.objects().iter().map(|o| o.id).collect()
}

pub fn path_of(editor: &Editor, index: usize) -> &PathShape {
    match &editor.scene().objects()[index].graphic {
        Graphic::Path(p) => p,
        other => panic!("expected a path, found {}", other.kind_name()),
    }
}

pub fn assert_close(a: Point, b: Point) {
    assert!(
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
        "{a:?} != {b:?}"
    );
}
