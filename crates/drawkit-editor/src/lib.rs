//! # drawkit editor
//!
//! Editing core of a vector drawing program: a shape model with a
//! segment-level path state machine, a nestable scene graph, a transactional
//! command engine with bounded undo/redo, dirty-region tracking and the tool
//! and interaction state that gates every edit.
//!
//! ## Architecture
//!
//! ```text
//! Editor (single mutator)
//!   ├── SceneGraph (ordered, nestable drawables)
//!   ├── UndoHistory (EditCommand stacks)
//!   ├── DirtyTracker (repaint region)
//!   ├── Tool / Interaction (mode gating)
//!   └── Viewport + RenderCache (display list)
//! ```
//!
//! Every change goes through [`Editor::transaction`]. Commands apply on
//! construction, so a transaction that fails part-way is rolled back before
//! the error reaches the caller.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use drawkit_editor::{Editor, Tool};
//! use drawkit_editor::model::Point;
//!
//! let mut editor = Editor::new();
//! editor.set_tool(Tool::Rectangle)?;
//! editor.create_rectangle(Point::new(0.0, 0.0), Point::new(50.0, 30.0))?;
//! editor.undo()?;
//! ```

pub mod actions;
pub mod bbox;
pub mod commands;
pub mod dirty;
pub mod distortion;
pub mod editor;
pub mod export;
pub mod geometry;
pub mod history;
pub mod model;
pub mod render_cache;
pub mod scene;
pub mod tools;
pub mod viewport;

pub use actions::{ActionState, Actions};
pub use bbox::{BBox, Hotspot};
pub use commands::{CompoundBuilder, CompoundEdit, EditCommand, EditContext};
pub use dirty::{DirtyTracker, Repaint};
pub use distortion::Distortion;
pub use editor::{EditLog, EditSink, Editor, NullSink, PendingEdit, PostedEdit};
pub use export::{export_json, export_to_file, import_from_file};
pub use history::{HistoryEntry, UndoHistory};
pub use model::{
    CloseMode, Closure, Conversion, Font, Graphical, Paint, PathShape, Point, Segment, Style,
    StyleDefaults, SymmetricPath, TextShape,
};
pub use render_cache::{DisplayItem, DisplayList, RenderCache};
pub use scene::{
    ContainerPath, Drawable, Graphic, Group, ObjectRef, SceneGraph, SceneVisitor,
};
pub use tools::{Interaction, PathDraft, Tool};
pub use viewport::Viewport;
