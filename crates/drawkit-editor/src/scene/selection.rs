//! Selection queries over the scene graph.
//!
//! Selection is stored as one boolean per object. Everything in this module is
//! derived from those flags on demand:
//! - **Summary**: counts per kind and an overall classification
//! - **Accessors**: the first selected shape, text or bitmap
//! - **Dominant values**: the most frequent paint or font among selected leaves
//! - **Hit cycling**: repeated double-clicks walk down the stack of hits
//!
//! A selected group counts as selecting every leaf below it.

use drawkit_core::constants::POINT_EPSILON;
use drawkit_core::ObjectId;

use super::{Drawable, Graphic, SceneGraph};
use crate::model::{BitmapShape, Font, Paint, Point, TextShape};

/// Aggregate classification of the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    None,
    Path,
    Symmetric,
    Text,
    Bitmap,
    Group,
    Mixed,
}

/// Counts of selected root objects per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionSummary {
    pub count: usize,
    pub paths: usize,
    pub symmetric: usize,
    pub texts: usize,
    pub bitmaps: usize,
    pub groups: usize,
}

impl SelectionSummary {
    /// Summarizes the selected root objects of `scene`.
    pub fn of(scene: &SceneGraph) -> Self {
        let mut summary = Self::default();
        for obj in scene.objects().iter().filter(|o| o.selected) {
            summary.count += 1;
            match obj.graphic {
                Graphic::Path(_) => summary.paths += 1,
                Graphic::Symmetric(_) => summary.symmetric += 1,
                Graphic::Text(_) => summary.texts += 1,
                Graphic::Bitmap(_) => summary.bitmaps += 1,
                Graphic::Group(_) => summary.groups += 1,
            }
        }
        summary
    }

    /// Single kind when every selected object shares it, otherwise `Mixed`.
    pub fn kind(&self) -> SelectionKind {
        let kinds = [
            (self.paths, SelectionKind::Path),
            (self.symmetric, SelectionKind::Symmetric),
            (self.texts, SelectionKind::Text),
            (self.bitmaps, SelectionKind::Bitmap),
            (self.groups, SelectionKind::Group),
        ];
        let mut present = kinds.iter().filter(|(n, _)| *n > 0);
        match (present.next(), present.next()) {
            (None, _) => SelectionKind::None,
            (Some((_, kind)), None) => *kind,
            _ => SelectionKind::Mixed,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_single(&self) -> bool {
        self.count == 1
    }
}

/// Which paint of a style to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaintTarget {
    Stroke,
    Fill,
}

/// Selected leaf objects in z-order, descending into groups.
pub fn selected_leaves(scene: &SceneGraph) -> Vec<&Drawable> {
    fn collect<'a>(objects: &'a [Drawable], inherited: bool, out: &mut Vec<&'a Drawable>) {
        for obj in objects {
            let selected = inherited || obj.selected;
            match obj.as_group() {
                Some(group) => collect(&group.objects, selected, out),
                None if selected => out.push(obj),
                None => {}
            }
        }
    }
    let mut out = Vec::new();
    collect(scene.objects(), false, &mut out);
    out
}

/// First selected path or symmetric path.
pub fn selected_shape(scene: &SceneGraph) -> Option<&Drawable> {
    selected_leaves(scene)
        .into_iter()
        .find(|o| o.graphic.is_editable_path())
}

/// First selected text.
pub fn selected_text(scene: &SceneGraph) -> Option<&TextShape> {
    selected_leaves(scene).into_iter().find_map(|o| match &o.graphic {
        Graphic::Text(t) => Some(t),
        _ => None,
    })
}

/// First selected bitmap.
pub fn selected_bitmap(scene: &SceneGraph) -> Option<&BitmapShape> {
    selected_leaves(scene).into_iter().find_map(|o| match &o.graphic {
        Graphic::Bitmap(b) => Some(b),
        _ => None,
    })
}

/// Most frequent stroke or fill paint among selected leaves.
///
/// Ties go to the paint met first in z-order. Leaves without that paint are
/// ignored.
pub fn selected_paint(scene: &SceneGraph, target: PaintTarget) -> Option<Paint> {
    dominant(selected_leaves(scene).into_iter().filter_map(|o| {
        let style = o.graphic.style()?;
        match target {
            PaintTarget::Stroke => style.stroke,
            PaintTarget::Fill => style.fill,
        }
    }))
}

/// Most frequent font among selected texts.
pub fn selected_font(scene: &SceneGraph) -> Option<Font> {
    dominant(
        selected_leaves(scene)
            .into_iter()
            .filter_map(|o| match &o.graphic {
                Graphic::Text(t) => Some(t.font.clone()),
                _ => None,
            }),
    )
}

fn dominant<T: PartialEq>(values: impl Iterator<Item = T>) -> Option<T> {
    let mut tally: Vec<(T, usize)> = Vec::new();
    for value in values {
        match tally.iter_mut().find(|(v, _)| *v == value) {
            Some((_, n)) => *n += 1,
            None => tally.push((value, 1)),
        }
    }
    let mut best: Option<(T, usize)> = None;
    for (value, n) in tally {
        if best.as_ref().map_or(true, |(_, m)| n > *m) {
            best = Some((value, n));
        }
    }
    best.map(|(value, _)| value)
}

/// Cycles through stacked objects on repeated double-clicks.
///
/// A click at (about) the same point as the previous one picks the next object
/// beneath the previous hit, wrapping to the top. A click elsewhere starts over
/// with the topmost hit. The previous hit is remembered by identity, so
/// reordering or deleting objects between clicks never shifts the cycle.
#[derive(Debug, Clone, Default)]
pub struct HitCycler {
    last: Option<(Point, ObjectId)>,
}

impl HitCycler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks the root index to select for a double-click at `p`.
    ///
    /// # Arguments
    ///
    /// * `scene` - The scene to hit-test
    /// * `p` - Click position in document units
    /// * `tolerance` - Pick tolerance around bounding boxes
    pub fn cycle(&mut self, scene: &SceneGraph, p: Point, tolerance: f64) -> Option<usize> {
        let hits = scene.hits_at(p, tolerance);
        let Some(&top) = hits.first() else {
            self.last = None;
            return None;
        };
        let objects = scene.objects();
        let next = match self.last {
            Some((q, prev)) if q.distance_to(&p) <= tolerance.max(POINT_EPSILON) => hits
                .iter()
                .position(|&i| objects[i].id == prev)
                .map_or(top, |pos| hits[(pos + 1) % hits.len()]),
            _ => top,
        };
        self.last = Some((p, objects[next].id));
        Some(next)
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
