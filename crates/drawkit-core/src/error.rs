//! Error handling for drawkit
//!
//! Provides the error taxonomy of the edit engine:
//! - Topology errors (illegal segment conversions, illegal open/close transitions)
//! - Empty-result errors (merge/break/split producing nothing)
//! - Mode errors (operations refused by the current tool or interaction)
//! - Invariant errors (history replay against a scene that no longer matches)
//!
//! The first three classes are expected and recoverable: the command that raised
//! them never mutated the scene graph. Invariant errors are internal faults.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::types::ObjectId;

/// Topology error type
///
/// Raised synchronously by the pure geometric operations when a requested change
/// would break a structural invariant of a path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopologyError {
    /// The axis segment of a symmetric path is structural
    #[error("The symmetry axis cannot be converted")]
    AxisNotConvertible,

    /// Join and closing slots of a symmetric path have dedicated operations
    #[error("The {slot} segment of a symmetric path cannot be converted directly")]
    SlotNotConvertible {
        /// Either `"join"` or `"closing"`.
        slot: &'static str,
    },

    /// Conversion between two segment kinds is not allowed
    #[error("Cannot convert a {from} segment to {to}")]
    IllegalConversion {
        /// Kind of the segment being converted.
        from: &'static str,
        /// Requested kind.
        to: &'static str,
    },

    /// Every path must start with a move
    #[error("The first segment of a path must be a move")]
    FirstSegmentMustBeMove,

    /// Partial segments only appear as the closing segment of a closed path
    #[error("A {kind} segment may only close a path")]
    MisplacedPartial {
        /// Kind of the partial segment.
        kind: &'static str,
    },

    /// A closed path lacks its closing segment
    #[error("A closed path must end in a closing segment")]
    MissingClosingSegment,

    /// The path is already closed
    #[error("Path is already closed")]
    AlreadyClosed,

    /// The path is already open
    #[error("Path is already open")]
    AlreadyOpen,

    /// Too few drawing segments for the operation
    #[error("Operation needs at least {required} drawing segments, found {found}")]
    NotEnoughSegments {
        /// Minimum number of drawing segments.
        required: usize,
        /// Number of drawing segments present.
        found: usize,
    },

    /// Moves and synthetic segments cannot be subdivided
    #[error("A {kind} segment cannot be subdivided")]
    NotSubdividable {
        /// Kind of the segment.
        kind: &'static str,
    },

    /// Continuity needs a Bezier handle on both sides of the anchor
    #[error("No neighbouring Bezier handle to make continuous")]
    NoNeighborHandle,

    /// The symmetry axis has zero length
    #[error("The symmetry axis has zero length")]
    DegenerateAxis,

    /// A symmetric half-path is a single subpath
    #[error("A symmetric half-path cannot contain several subpaths")]
    MultipleSubpaths,

    /// The selected control index does not exist
    #[error("Control point {index} does not exist (shape has {count})")]
    NoSuchControl {
        /// Requested flat control index.
        index: usize,
        /// Number of controls of the shape.
        count: usize,
    },

    /// The operation does not apply to this kind of shape
    #[error("Cannot {operation} a {kind}")]
    Unsupported {
        /// Requested operation.
        operation: &'static str,
        /// Kind of the shape.
        kind: &'static str,
    },

    /// The object is not a path-like shape
    #[error("A {kind} has no editable path")]
    NotAPath {
        /// Kind of the object.
        kind: &'static str,
    },
}

/// Empty-result error type
///
/// Raised when an operation would produce zero segments or zero objects. The
/// command is aborted and the prior state is left untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmptyResultError {
    /// One side of a break would contain no drawing segment
    #[error("Breaking here would leave the {side} part empty")]
    BreakSide {
        /// Either `"first"` or `"second"`.
        side: &'static str,
    },

    /// Fewer than two paths are available for a merge
    #[error("Merge needs at least two paths, found {found}")]
    NothingToMerge {
        /// Number of eligible paths.
        found: usize,
    },

    /// The path has a single subpath
    #[error("The path has a single subpath, nothing to split")]
    NothingToSplit,

    /// The operation needs a selection
    #[error("Nothing is selected")]
    NothingSelected,

    /// The edit would not change anything
    #[error("The edit has no effect")]
    NoChange,
}

/// Mode error type
///
/// Raised when the current tool or interaction mode does not allow an operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModeError {
    /// The operation requires another tool
    #[error("This operation requires the {required} tool (current: {current})")]
    WrongTool {
        /// Tool required by the operation.
        required: &'static str,
        /// Tool currently active.
        current: &'static str,
    },

    /// Another interaction must be finished or abandoned first
    #[error("Finish or abandon the current {active} first")]
    InteractionActive {
        /// Name of the active interaction.
        active: &'static str,
    },

    /// The operation requires an interaction that is not active
    #[error("No {expected} in progress")]
    NotActive {
        /// Name of the expected interaction.
        expected: &'static str,
    },

    /// History has nothing to replay
    #[error("Nothing to {action}")]
    HistoryEmpty {
        /// Either `"undo"` or `"redo"`.
        action: &'static str,
    },
}

/// Invariant error type
///
/// The scene graph no longer matches what a command captured. This should not
/// occur given correct sequencing and is never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantError {
    /// The object at an index is not the one the command expected
    #[error("Expected object {expected} at index {index}, found {found:?}")]
    IdentityMismatch {
        /// Identity captured by the command.
        expected: ObjectId,
        /// Identity found in the scene, if any.
        found: Option<ObjectId>,
        /// Index inside the container.
        index: usize,
    },

    /// A container path does not resolve to a group
    #[error("No group at container path {path:?}")]
    ContainerNotFound {
        /// Indices from the root to the missing group.
        path: Vec<usize>,
    },

    /// An index is outside its container
    #[error("Index {index} out of range (container holds {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Container length.
        len: usize,
    },

    /// The object has the wrong kind for the command
    #[error("Object {id} is not a {expected}")]
    WrongKind {
        /// Identity of the object.
        id: ObjectId,
        /// Kind the command expected.
        expected: &'static str,
    },
}

/// Main error type for drawkit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Topology error
    #[error(transparent)]
    Topology(#[from] TopologyError),

    /// Empty-result error
    #[error(transparent)]
    EmptyResult(#[from] EmptyResultError),

    /// Mode error
    #[error(transparent)]
    Mode(#[from] ModeError),

    /// Invariant error
    #[error("Internal error: {0}")]
    Invariant(#[from] InvariantError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Background task failed
    #[error("Background task failed: {0}")]
    Task(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Expected conditions that leave the scene untouched
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Topology(_) | Error::EmptyResult(_) | Error::Mode(_)
        )
    }

    /// Check if this is an invariant violation
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Error::Invariant(_))
    }

    /// Message suitable for the status line of the UI.
    pub fn user_message(&self) -> String {
        match self {
            Error::Invariant(_) => {
                "The edit history is inconsistent and has been cleared".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Result type alias for drawkit operations
pub type Result<T> = std::result::Result<T, Error>;
