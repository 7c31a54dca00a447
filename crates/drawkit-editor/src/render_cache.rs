//! Single-slot display-list cache keyed by the viewport.

use lyon::math::{vector, Transform};
use tracing::trace;

use drawkit_core::ObjectId;

use crate::model::{Graphical, Style};
use crate::scene::{Drawable, SceneGraph, SceneVisitor};
use crate::viewport::{Viewport, ViewportKey};

/// One object's outline in view space.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    pub id: ObjectId,
    pub selected: bool,
    pub style: Option<Style>,
    pub path: lyon::path::Path,
}

/// Leaf outlines in paint order.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    pub items: Vec<DisplayItem>,
}

impl DisplayList {
    /// Renders every leaf of `scene` into view space.
    pub fn build(scene: &SceneGraph, viewport: &Viewport) -> Self {
        struct Collect {
            transform: Transform,
            items: Vec<DisplayItem>,
        }

        impl SceneVisitor for Collect {
            fn visit(&mut self, _depth: usize, object: &Drawable) {
                self.items.push(DisplayItem {
                    id: object.id,
                    selected: object.selected,
                    style: object.graphic.style().cloned(),
                    path: object.graphic.render().transformed(&self.transform),
                });
            }
        }

        let zoom = viewport.zoom() as f32;
        let (pan_x, pan_y) = viewport.pan();
        let (_, height) = viewport.canvas_size();
        let transform = Transform::scale(zoom, -zoom)
            .then_translate(vector(pan_x as f32, (height - pan_y) as f32));
        let mut collect = Collect {
            transform,
            items: Vec::new(),
        };
        scene.walk(&mut collect);
        Self {
            items: collect.items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Holds the display list of the last viewport it was built for.
#[derive(Debug, Clone, Default)]
pub struct RenderCache {
    slot: Option<(ViewportKey, DisplayList)>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn needs_update(&self, viewport: &Viewport) -> bool {
        self.slot
            .as_ref()
            .map_or(true, |(key, _)| *key != viewport.key())
    }

    /// Cached display list, rebuilt when empty or built for another viewport.
    pub fn get_or_build(&mut self, scene: &SceneGraph, viewport: &Viewport) -> &DisplayList {
        if self.needs_update(viewport) {
            self.slot = None;
        }
        let (_, list) = self.slot.get_or_insert_with(|| {
            trace!("Rebuilding display list for {}", viewport);
            (viewport.key(), DisplayList::build(scene, viewport))
        });
        list
    }

    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    pub fn is_valid(&self) -> bool {
        self.slot.is_some()
    }
}
