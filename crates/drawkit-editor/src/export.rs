//! Background export of scene snapshots.
//!
//! Serialization runs on the blocking pool so a large document never stalls
//! the editor; the snapshot is an owned clone taken with
//! [`Editor::export_snapshot`](crate::Editor::export_snapshot).

use std::path::Path;

use tracing::info;

use drawkit_core::{Error, Result};

use crate::scene::SceneGraph;

/// Serializes `scene` to pretty JSON off the calling task.
pub async fn export_json(scene: SceneGraph) -> Result<String> {
    let json = tokio::task::spawn_blocking(move || serde_json::to_string_pretty(&scene))
        .await
        .map_err(|e| Error::Task(e.to_string()))??;
    Ok(json)
}

/// Writes `scene` as JSON to `path`.
pub async fn export_to_file(scene: SceneGraph, path: impl AsRef<Path>) -> Result<()> {
    let count = scene.len();
    let json = export_json(scene).await?;
    tokio::fs::write(path.as_ref(), json).await?;
    info!("Exported {} object(s) to {}", count, path.as_ref().display());
    Ok(())
}

/// Reads a scene written by [`export_to_file`].
pub async fn import_from_file(path: impl AsRef<Path>) -> Result<SceneGraph> {
    let json = tokio::fs::read_to_string(path.as_ref()).await?;
    let scene = tokio::task::spawn_blocking(move || serde_json::from_str::<SceneGraph>(&json))
        .await
        .map_err(|e| Error::Task(e.to_string()))??;
    info!("Imported {} object(s) from {}", scene.len(), path.as_ref().display());
    Ok(scene)
}
