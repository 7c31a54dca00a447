//! Depth-first traversal of the scene graph for external collaborators.

use super::{Drawable, Group, SceneGraph};

/// Receives scene objects in z-order.
pub trait SceneVisitor {
    /// Called for every non-group object.
    fn visit(&mut self, depth: usize, object: &Drawable);

    fn enter_group(&mut self, _depth: usize, _group: &Drawable) {}

    fn leave_group(&mut self, _depth: usize, _group: &Drawable) {}
}

impl SceneGraph {
    pub fn walk(&self, visitor: &mut dyn SceneVisitor) {
        walk_group(&self.root, 0, visitor);
    }
}

fn walk_group(group: &Group, depth: usize, visitor: &mut dyn SceneVisitor) {
    for object in &group.objects {
        match object.as_group() {
            Some(inner) => {
                visitor.enter_group(depth, object);
                walk_group(inner, depth + 1, visitor);
                visitor.leave_group(depth, object);
            }
            None => visitor.visit(depth, object),
        }
    }
}
