//! Type aliases for identities and shared collaborator state.
//!
//! The edit engine is single-threaded, so collaborators that need to observe
//! the engine (sinks, recorders in tests) share state through `Rc<RefCell<T>>`.

use std::cell::RefCell;
use std::rc::Rc;

use uuid::Uuid;

/// Stable identity of a drawable object.
///
/// Identities survive undo/redo; substitutions swap one identity for another.
pub type ObjectId = Uuid;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// # Example
/// ```rust,ignore
/// let log: Shared<Vec<String>> = shared(Vec::new());
/// log.borrow_mut().push("posted".into());
/// ```
pub type Shared<T> = Rc<RefCell<T>>;

/// Wraps a value into a [`Shared`] cell.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
