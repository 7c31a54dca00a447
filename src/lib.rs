//! # drawkit
//!
//! Editing core of a vector drawing program.
//!
//! ## Architecture
//!
//! drawkit is organized as a workspace with three crates:
//!
//! 1. **drawkit-core** - Error taxonomy, identifiers, constants and units
//! 2. **drawkit-settings** - Editor configuration and its persistence
//! 3. **drawkit-editor** - Shape model, scene graph, commands and undo history
//!
//! This crate re-exports the public surface of all three and sets up logging.

pub use drawkit_core::{
    EmptyResultError, Error, InvariantError, ModeError, ObjectId, Result, TopologyError,
};

pub use drawkit_settings::{
    Config, ConfigError, EditorSettings, FontSettings, GridSettings, SettingsError,
    SettingsManager, StyleSettings,
};

pub use drawkit_editor::{
    export_json, export_to_file, import_from_file, ActionState, Actions, BBox, CloseMode,
    Closure, ContainerPath, Conversion, DisplayItem, DisplayList, Drawable, EditCommand, EditLog,
    EditSink, Editor, Font, Graphic, Graphical, Group, HistoryEntry, Hotspot, Interaction,
    NullSink, ObjectRef, Paint, PathDraft, PathShape, PendingEdit, Point, PostedEdit, Repaint,
    SceneGraph, SceneVisitor, Segment, Style, StyleDefaults, SymmetricPath, TextShape, Tool,
    UndoHistory, Viewport,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Console output with `RUST_LOG` support, `info` unless overridden.
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!("drawkit {} built {}", VERSION, BUILD_DATE);
    Ok(())
}
