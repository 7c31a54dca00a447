//! Tool selection and the interaction state machine.
//!
//! At most one interaction is live at a time: constructing a new path, editing
//! the points of one path, distorting one shape, or editing the content of one
//! text. Encoding them as one enum makes the mutual exclusion structural.

use drawkit_core::{ObjectId, Result, TopologyError};

use crate::bbox::BBox;
use crate::distortion::Distortion;
use crate::model::{CloseMode, Closure, PathShape, Point, Segment, Style};
use crate::scene::ObjectRef;

/// Tool chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    #[default]
    Select,
    Pen,
    Rectangle,
    Text,
    Zoom,
}

impl Tool {
    pub const ALL: [Tool; 5] = [Tool::Select, Tool::Pen, Tool::Rectangle, Tool::Text, Tool::Zoom];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Pen => "pen",
            Tool::Rectangle => "rectangle",
            Tool::Text => "text",
            Tool::Zoom => "zoom",
        }
    }
}

/// A path under construction with the pen tool. Nothing is in the scene yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PathDraft {
    segments: Vec<Segment>,
}

impl PathDraft {
    pub fn new(start: Point) -> Self {
        Self {
            segments: vec![Segment::move_to(start)],
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Current pen position.
    pub fn current_point(&self) -> Point {
        self.segments
            .iter()
            .rev()
            .find_map(Segment::end)
            .unwrap_or_default()
    }

    /// Box around the newest step from the pen position before it, handles
    /// included.
    pub fn last_step_bounds(&self) -> BBox {
        let Some((last, rest)) = self.segments.split_last() else {
            return BBox::EMPTY;
        };
        let start = rest.iter().rev().find_map(Segment::end).unwrap_or_default();
        let controls = last.controls().into_iter().map(|c| c.effective(start));
        BBox::from_points(std::iter::once(start).chain(controls))
    }

    pub fn line_to(&mut self, p: Point) {
        self.segments.push(Segment::line_to(p));
    }

    pub fn curve_to(&mut self, c1: Point, c2: Point, to: Point) {
        self.segments.push(Segment::bezier(c1, c2, to));
    }

    /// Starts a new subpath at `p`.
    pub fn move_to(&mut self, p: Point) {
        self.segments.push(Segment::move_to(p));
    }

    /// Drops the last step. The initial move is kept.
    pub fn pop(&mut self) -> Option<Segment> {
        if self.segments.len() > 1 {
            self.segments.pop()
        } else {
            None
        }
    }

    pub fn drawing_segment_count(&self) -> usize {
        self.segments.iter().filter(|s| s.draws()).count()
    }

    /// Builds the finished shape, optionally closed with `close`.
    pub fn to_shape(&self, style: Style, close: Option<CloseMode>) -> Result<PathShape> {
        let found = self.drawing_segment_count();
        if found == 0 {
            return Err(TopologyError::NotEnoughSegments { required: 1, found }.into());
        }
        let mut segments = self.segments.clone();
        while segments.last().is_some_and(|s| !s.draws()) {
            segments.pop();
        }
        let path = PathShape::from_parts(segments, Closure::Open, style)?;
        match close {
            Some(mode) => path.closed(mode),
            None => Ok(path),
        }
    }
}

/// The shape in path-edit mode and its selected control.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEditState {
    pub target: ObjectRef,
    pub id: ObjectId,
    pub selected: usize,
}

/// A live text edit. The buffer is committed as one command on finish.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditState {
    pub target: ObjectRef,
    pub id: ObjectId,
    pub buffer: String,
    /// Cursor position in characters.
    pub cursor: usize,
}

impl TextEditState {
    pub fn new(target: ObjectRef, id: ObjectId, content: &str) -> Self {
        Self {
            target,
            id,
            buffer: content.to_string(),
            cursor: content.chars().count(),
        }
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(chars)
            .map_or(self.buffer.len(), |(i, _)| i)
    }

    pub fn insert(&mut self, text: &str) {
        let at = self.byte_offset(self.cursor);
        self.buffer.insert_str(at, text);
        self.cursor += text.chars().count();
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.buffer.remove(at);
        true
    }

    /// Deletes the character under the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.buffer.chars().count() {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.buffer.remove(at);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.buffer.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.buffer.chars().count();
    }
}

/// The live interaction.
#[derive(Debug, Clone, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Constructing(PathDraft),
    PathEdit(PathEditState),
    Distortion(Distortion),
    TextEdit(TextEditState),
}

impl Interaction {
    pub fn name(&self) -> &'static str {
        match self {
            Interaction::Idle => "idle",
            Interaction::Constructing(_) => "path construction",
            Interaction::PathEdit(_) => "path edit",
            Interaction::Distortion(_) => "distortion",
            Interaction::TextEdit(_) => "text edit",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }
}
