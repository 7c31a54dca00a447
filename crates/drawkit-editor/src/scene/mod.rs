//! Scene graph: an ordered, index-addressable and recursively nestable sequence
//! of drawable objects.
//!
//! Z-order is sequence order (last is topmost). Objects hold no back-pointers;
//! callers address them through [`ObjectRef`] and resolve containers freshly.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

use drawkit_core::{InvariantError, ObjectId, Result};

use crate::bbox::BBox;
use crate::model::{
    BitmapShape, Graphical, PathShape, Point, Style, SymmetricPath, TextShape,
};

mod editable;
pub mod selection;
pub mod visitor;

pub use editable::AnchorSlot;
pub use selection::{HitCycler, PaintTarget, SelectionKind, SelectionSummary};
pub use visitor::SceneVisitor;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Group {
    pub objects: Vec<Drawable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Graphic {
    Path(PathShape),
    Symmetric(SymmetricPath),
    Text(TextShape),
    Bitmap(BitmapShape),
    Group(Group),
}

impl Graphic {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Graphic::Path(_) => "path",
            Graphic::Symmetric(_) => "symmetric path",
            Graphic::Text(_) => "text",
            Graphic::Bitmap(_) => "bitmap",
            Graphic::Group(_) => "group",
        }
    }

    pub fn style(&self) -> Option<&Style> {
        match self {
            Graphic::Path(p) => Some(&p.style),
            Graphic::Symmetric(s) => Some(&s.style),
            Graphic::Text(t) => Some(&t.style),
            Graphic::Bitmap(_) | Graphic::Group(_) => None,
        }
    }

    pub fn style_mut(&mut self) -> Option<&mut Style> {
        match self {
            Graphic::Path(p) => Some(&mut p.style),
            Graphic::Symmetric(s) => Some(&mut s.style),
            Graphic::Text(t) => Some(&mut t.style),
            Graphic::Bitmap(_) | Graphic::Group(_) => None,
        }
    }
}

impl Graphical for Graphic {
    fn render(&self) -> lyon::path::Path {
        match self {
            Graphic::Path(s) => s.render(),
            Graphic::Symmetric(s) => s.render(),
            Graphic::Text(s) => s.render(),
            Graphic::Bitmap(s) => s.render(),
            Graphic::Group(g) => {
                let mut builder = lyon::path::Path::builder();
                for child in &g.objects {
                    append_path(&mut builder, &child.graphic.render());
                }
                builder.build()
            }
        }
    }

    fn bounds(&self) -> BBox {
        match self {
            Graphic::Path(s) => s.bounds(),
            Graphic::Symmetric(s) => s.bounds(),
            Graphic::Text(s) => s.bounds(),
            Graphic::Bitmap(s) => s.bounds(),
            Graphic::Group(g) => g
                .objects
                .iter()
                .fold(BBox::EMPTY, |acc, o| acc.union(&o.graphic.bounds())),
        }
    }

    fn map_points(&mut self, f: &mut dyn FnMut(Point) -> Point) {
        match self {
            Graphic::Path(s) => s.map_points(f),
            Graphic::Symmetric(s) => s.map_points(f),
            Graphic::Text(s) => s.map_points(f),
            Graphic::Bitmap(s) => s.map_points(f),
            Graphic::Group(g) => {
                for child in &mut g.objects {
                    child.graphic.map_points(f);
                }
            }
        }
    }
}

fn append_path(builder: &mut lyon::path::path::Builder, path: &lyon::path::Path) {
    use lyon::path::Event;
    for event in path.iter() {
        match event {
            Event::Begin { at } => {
                builder.begin(at);
            }
            Event::Line { to, .. } => {
                builder.line_to(to);
            }
            Event::Quadratic { ctrl, to, .. } => {
                builder.quadratic_bezier_to(ctrl, to);
            }
            Event::Cubic {
                ctrl1, ctrl2, to, ..
            } => {
                builder.cubic_bezier_to(ctrl1, ctrl2, to);
            }
            Event::End { close, .. } => builder.end(close),
        }
    }
}

/// A scene object with identity and selection flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    pub id: ObjectId,
    #[serde(default)]
    pub selected: bool,
    pub graphic: Graphic,
}

impl Drawable {
    /// Wraps a graphic with a fresh identity.
    pub fn new(graphic: Graphic) -> Self {
        Self {
            id: Uuid::new_v4(),
            selected: false,
            graphic,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn bounds(&self) -> BBox {
        self.graphic.bounds()
    }

    pub fn as_group(&self) -> Option<&Group> {
        match &self.graphic {
            Graphic::Group(g) => Some(g),
            _ => None,
        }
    }
}

/// Indices of nested groups from the root to a container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ContainerPath(SmallVec<[usize; 4]>);

impl ContainerPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path of the group at `index` inside this container.
    pub fn child(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.0.push(index);
        path
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

/// Address of an object: its container and its index there.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    pub container: ContainerPath,
    pub index: usize,
}

impl ObjectRef {
    pub fn new(container: ContainerPath, index: usize) -> Self {
        Self { container, index }
    }

    pub fn root(index: usize) -> Self {
        Self::new(ContainerPath::root(), index)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneGraph {
    root: Group,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn objects(&self) -> &[Drawable] {
        &self.root.objects
    }

    pub fn len(&self) -> usize {
        self.root.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.objects.is_empty()
    }

    pub fn container(&self, path: &ContainerPath) -> Result<&Group> {
        let mut group = &self.root;
        for &i in path.indices() {
            group = group
                .objects
                .get(i)
                .and_then(Drawable::as_group)
                .ok_or_else(|| InvariantError::ContainerNotFound {
                    path: path.indices().to_vec(),
                })?;
        }
        Ok(group)
    }

    pub fn container_mut(&mut self, path: &ContainerPath) -> Result<&mut Group> {
        let mut group = &mut self.root;
        for &i in path.indices() {
            group = match group.objects.get_mut(i).map(|d| &mut d.graphic) {
                Some(Graphic::Group(g)) => g,
                _ => {
                    return Err(InvariantError::ContainerNotFound {
                        path: path.indices().to_vec(),
                    }
                    .into())
                }
            };
        }
        Ok(group)
    }

    pub fn get(&self, at: &ObjectRef) -> Result<&Drawable> {
        let group = self.container(&at.container)?;
        group.objects.get(at.index).ok_or_else(|| {
            InvariantError::IndexOutOfRange {
                index: at.index,
                len: group.objects.len(),
            }
            .into()
        })
    }

    /// Resolves `at` and checks that it still holds object `id`.
    pub fn expect(&self, at: &ObjectRef, id: ObjectId) -> Result<&Drawable> {
        let found = self.container(&at.container)?.objects.get(at.index);
        match found {
            Some(d) if d.id == id => Ok(d),
            other => Err(InvariantError::IdentityMismatch {
                expected: id,
                found: other.map(|d| d.id),
                index: at.index,
            }
            .into()),
        }
    }

    pub fn expect_mut(&mut self, at: &ObjectRef, id: ObjectId) -> Result<&mut Drawable> {
        let found = self.container_mut(&at.container)?.objects.get_mut(at.index);
        match found {
            Some(d) if d.id == id => Ok(d),
            other => Err(InvariantError::IdentityMismatch {
                expected: id,
                found: other.map(|d| d.id),
                index: at.index,
            }
            .into()),
        }
    }

    pub fn insert(&mut self, container: &ContainerPath, index: usize, object: Drawable) -> Result<()> {
        let group = self.container_mut(container)?;
        if index > group.objects.len() {
            return Err(InvariantError::IndexOutOfRange {
                index,
                len: group.objects.len(),
            }
            .into());
        }
        group.objects.insert(index, object);
        Ok(())
    }

    /// Removes the object at `index` after checking its identity.
    pub fn remove(&mut self, container: &ContainerPath, index: usize, id: ObjectId) -> Result<Drawable> {
        self.expect(&ObjectRef::new(container.clone(), index), id)?;
        let group = self.container_mut(container)?;
        Ok(group.objects.remove(index))
    }

    /// Locates an object anywhere in the graph.
    pub fn find(&self, id: ObjectId) -> Option<ObjectRef> {
        fn search(group: &Group, path: &ContainerPath, id: ObjectId) -> Option<ObjectRef> {
            for (i, obj) in group.objects.iter().enumerate() {
                if obj.id == id {
                    return Some(ObjectRef::new(path.clone(), i));
                }
                if let Some(g) = obj.as_group() {
                    if let Some(found) = search(g, &path.child(i), id) {
                        return Some(found);
                    }
                }
            }
            None
        }
        search(&self.root, &ContainerPath::root(), id)
    }

    pub fn bounds(&self) -> BBox {
        self.root
            .objects
            .iter()
            .fold(BBox::EMPTY, |acc, o| acc.union(&o.bounds()))
    }

    /// Root indices whose tolerance-expanded bounds contain `p`, topmost first.
    pub fn hits_at(&self, p: Point, tolerance: f64) -> Vec<usize> {
        (0..self.len())
            .rev()
            .filter(|&i| self.root.objects[i].graphic.contains_point(p, tolerance))
            .collect()
    }

    /// Topmost root object under `p`.
    pub fn hit_test(&self, p: Point, tolerance: f64) -> Option<usize> {
        self.hits_at(p, tolerance).first().copied()
    }

    /// Selected root indices in ascending order.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.root
            .objects
            .iter()
            .enumerate()
            .filter(|(_, o)| o.selected)
            .map(|(i, _)| i)
            .collect()
    }

    /// `at` itself, or every leaf below it when it is a group.
    pub fn leaf_refs(&self, at: &ObjectRef) -> Result<Vec<ObjectRef>> {
        let obj = self.get(at)?;
        match obj.as_group() {
            None => Ok(vec![at.clone()]),
            Some(group) => {
                let container = at.container.child(at.index);
                let mut leaves = Vec::new();
                for i in 0..group.objects.len() {
                    leaves.extend(self.leaf_refs(&ObjectRef::new(container.clone(), i))?);
                }
                Ok(leaves)
            }
        }
    }
}
