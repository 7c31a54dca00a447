//! # drawkit Core
//!
//! Core types shared by every drawkit crate: the error taxonomy of the edit
//! engine, engine-wide constants, storage-unit conversions and the shared-state
//! type aliases used at the collaborator seams.

pub mod constants;
pub mod error;
pub mod types;
pub mod units;

pub use error::{
    EmptyResultError, Error, InvariantError, ModeError, Result, TopologyError,
};

pub use types::{shared, ObjectId, Shared};

pub use units::{LengthUnit, STORAGE_UNITS_PER_MM};
