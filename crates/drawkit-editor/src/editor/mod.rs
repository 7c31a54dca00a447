//! The editor: scene graph, history and interaction state behind one mutator.
//!
//! This module is split into submodules by concern:
//! - `scene_ops`: object creation, deletion, selection, grouping, ordering, style
//! - `path_edit`: point-level editing of one path
//! - `construct`: building a new path with the pen tool
//! - `distort`: four-corner distortion of one shape
//! - `text_edit`: live editing of one text
//! - `sink`: notifications to the document/UI collaborator

mod construct;
mod distort;
mod path_edit;
mod scene_ops;
pub mod sink;
mod text_edit;

use tracing::{debug, error, warn};

use drawkit_core::{EmptyResultError, Error, ModeError, Result};
use drawkit_settings::{Config, GridSettings};

use crate::actions::{self, ActionState, Actions};
use crate::bbox::{BBox, Hotspot};
use crate::commands::{CompoundBuilder, CompoundEdit, EditContext};
use crate::dirty::{DirtyTracker, Repaint};
use crate::history::UndoHistory;
use crate::model::{
    ApproxTextMeasure, BitmapShape, Font, Paint, StyleDefaults, TextMeasure, TextShape,
};
use crate::render_cache::{DisplayList, RenderCache};
use crate::scene::{
    selection, Drawable, HitCycler, PaintTarget, SceneGraph, SelectionSummary,
};
use crate::tools::{Interaction, Tool};
use crate::viewport::Viewport;

pub use sink::{EditLog, EditSink, NullSink, PostedEdit};

/// What to do with an unfinished text edit or distortion before a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingEdit {
    Finish,
    Discard,
}

pub struct Editor {
    scene: SceneGraph,
    history: UndoHistory,
    dirty: DirtyTracker,
    defaults: StyleDefaults,
    measure: Box<dyn TextMeasure>,
    sink: Box<dyn EditSink>,
    tool: Tool,
    interaction: Interaction,
    viewport: Viewport,
    render_cache: RenderCache,
    hit_cycler: HitCycler,
    hit_tolerance: f64,
    hotspot_tolerance: f64,
    grid: GridSettings,
    modified: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Editor seeded with the tolerances, history depth and defaults of `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            scene: SceneGraph::new(),
            history: UndoHistory::new(config.editor.history_limit),
            dirty: DirtyTracker::new(),
            defaults: StyleDefaults::from_config(config),
            measure: Box::new(ApproxTextMeasure),
            sink: Box::new(NullSink),
            tool: Tool::default(),
            interaction: Interaction::Idle,
            viewport: Viewport::default(),
            render_cache: RenderCache::new(),
            hit_cycler: HitCycler::new(),
            hit_tolerance: config.editor.hit_tolerance,
            hotspot_tolerance: config.editor.hotspot_tolerance,
            grid: config.grid.clone(),
            modified: false,
        }
    }

    pub fn with_sink(mut self, sink: impl EditSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn with_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }

    /// Re-reads tolerances, history depth, defaults and grid from `config`.
    pub fn apply_config(&mut self, config: &Config) {
        self.hit_tolerance = config.editor.hit_tolerance;
        self.hotspot_tolerance = config.editor.hotspot_tolerance;
        self.history.set_limit(config.editor.history_limit);
        self.defaults = StyleDefaults::from_config(config);
        self.set_grid(config.grid.clone());
    }

    // ---- accessors --------------------------------------------------------

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn defaults(&self) -> &StyleDefaults {
        &self.defaults
    }

    pub fn set_defaults(&mut self, defaults: StyleDefaults) {
        self.defaults = defaults;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn grid(&self) -> &GridSettings {
        &self.grid
    }

    /// Changes the background grid, which repaints everything.
    pub fn set_grid(&mut self, grid: GridSettings) {
        if self.grid != grid {
            self.grid = grid;
            self.dirty.force_full();
            self.render_cache.invalidate();
        }
    }

    /// Replaces the document, e.g. after loading. History starts over.
    pub fn load(&mut self, scene: SceneGraph) {
        self.scene = scene;
        self.interaction = Interaction::Idle;
        self.hit_cycler.reset();
        self.history.clear();
        self.history.mark_saved();
        self.dirty.force_full();
        self.render_cache.invalidate();
        self.notify_history();
    }

    /// Switches tool. Refused while an interaction is live.
    pub fn set_tool(&mut self, tool: Tool) -> Result<()> {
        if !self.interaction.is_idle() {
            warn!(
                "Refusing to switch to the {} tool during {}",
                tool.name(),
                self.interaction.name()
            );
            return Err(ModeError::InteractionActive {
                active: self.interaction.name(),
            }
            .into());
        }
        debug!("Tool {} -> {}", self.tool.name(), tool.name());
        self.tool = tool;
        Ok(())
    }

    fn require_idle(&self) -> Result<()> {
        if self.interaction.is_idle() {
            Ok(())
        } else {
            Err(ModeError::InteractionActive {
                active: self.interaction.name(),
            }
            .into())
        }
    }

    fn require_tool(&self, required: Tool) -> Result<()> {
        if self.tool == required {
            Ok(())
        } else {
            Err(ModeError::WrongTool {
                required: required.name(),
                current: self.tool.name(),
            }
            .into())
        }
    }

    // ---- transactions -----------------------------------------------------

    fn split(&mut self) -> (EditContext<'_>, &mut UndoHistory) {
        (
            EditContext {
                scene: &mut self.scene,
                dirty: &mut self.dirty,
                defaults: &self.defaults,
                measure: self.measure.as_ref(),
            },
            &mut self.history,
        )
    }

    /// Runs `build` as one undoable transaction.
    ///
    /// Every command pushed to the builder is already applied. If `build` fails
    /// the applied commands are reverted and the scene is left as it was. A
    /// transaction that pushed nothing fails with `NoChange`.
    pub fn transaction<F>(&mut self, label: &str, build: F) -> Result<()>
    where
        F: FnOnce(&mut EditContext<'_>, &mut CompoundBuilder) -> Result<()>,
    {
        let (mut ctx, history) = self.split();
        let mut builder = CompoundEdit::begin(label);
        if let Err(e) = build(&mut ctx, &mut builder) {
            if let Err(rollback) = builder.rollback(&mut ctx) {
                error!("Rollback of '{}' failed: {}", label, rollback);
                history.clear();
                self.notify_history();
                return Err(rollback);
            }
            self.render_cache.invalidate();
            return Err(e);
        }
        let Some(command) = builder.end() else {
            return Err(EmptyResultError::NoChange.into());
        };
        let entry = history.record(command);
        let posted = PostedEdit {
            description: entry.command.description(),
            timestamp: entry.recorded_at,
        };
        self.sink.edit_posted(&posted);
        self.notify_history();
        Ok(())
    }

    fn notify_history(&mut self) {
        if !self.dirty.is_clean() {
            self.render_cache.invalidate();
        }
        self.sink
            .history_changed(self.history.can_undo(), self.history.can_redo());
        let modified = self.history.is_modified();
        if modified != self.modified {
            self.modified = modified;
            self.sink.modified_changed(modified);
        }
    }

    fn require_history_mode(&self) -> Result<()> {
        match self.interaction {
            Interaction::Idle | Interaction::PathEdit(_) => Ok(()),
            _ => Err(ModeError::InteractionActive {
                active: self.interaction.name(),
            }
            .into()),
        }
    }

    /// Reverts the newest transaction and returns its description.
    pub fn undo(&mut self) -> Result<String> {
        self.require_history_mode()?;
        let (mut ctx, history) = self.split();
        let result = history.undo(&mut ctx);
        self.after_replay(result)
    }

    /// Re-applies the newest undone transaction and returns its description.
    pub fn redo(&mut self) -> Result<String> {
        self.require_history_mode()?;
        let (mut ctx, history) = self.split();
        let result = history.redo(&mut ctx);
        self.after_replay(result)
    }

    fn after_replay(&mut self, result: Result<String>) -> Result<String> {
        if let Err(Error::Invariant(_)) = &result {
            self.interaction = Interaction::Idle;
            self.dirty.force_full();
        }
        self.revalidate_path_edit();
        self.hit_cycler.reset();
        self.render_cache.invalidate();
        self.notify_history();
        result
    }

    /// Re-resolves the path-edit target after history replay moved or removed it.
    fn revalidate_path_edit(&mut self) {
        let Interaction::PathEdit(state) = &mut self.interaction else {
            return;
        };
        let count = self.scene.find(state.id).and_then(|at| {
            let count = self.scene.get(&at).ok()?.graphic.control_count().ok()?;
            state.target = at;
            Some(count)
        });
        match count {
            Some(count) if count > 0 => state.selected = state.selected.min(count - 1),
            _ => {
                debug!("Path-edit target is gone, leaving path edit");
                self.interaction = Interaction::Idle;
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Undo descriptions, newest first.
    pub fn history_descriptions(&self) -> Vec<String> {
        self.history.descriptions()
    }

    pub fn is_modified(&self) -> bool {
        self.history.is_modified()
    }

    pub fn mark_saved(&mut self) {
        self.history.mark_saved();
        self.notify_history();
    }

    // ---- repaint ----------------------------------------------------------

    /// Hands the accumulated repaint region to the renderer once.
    pub fn take_repaint(&mut self) -> Repaint {
        self.dirty.take()
    }

    pub fn peek_repaint(&self) -> Repaint {
        self.dirty.peek()
    }

    /// Display list for the current viewport, cached until the next change.
    pub fn display_list(&mut self) -> &DisplayList {
        self.render_cache.get_or_build(&self.scene, &self.viewport)
    }

    pub fn render_cache_valid(&self) -> bool {
        self.render_cache.is_valid()
    }

    // ---- export -----------------------------------------------------------

    /// Finishes or discards a live text edit or distortion and clones the scene
    /// for a background task.
    pub fn export_snapshot(&mut self, pending: PendingEdit) -> Result<SceneGraph> {
        let text = matches!(self.interaction, Interaction::TextEdit(_));
        let distortion = matches!(self.interaction, Interaction::Distortion(_));
        match pending {
            PendingEdit::Finish if text => self.finish_text_edit()?,
            PendingEdit::Discard if text => self.abandon_text_edit()?,
            PendingEdit::Finish if distortion => self.finish_distortion()?,
            PendingEdit::Discard if distortion => self.abandon_distortion()?,
            _ => {}
        }
        debug!("Snapshot of {} object(s) taken for export", self.scene.len());
        Ok(self.scene.clone())
    }

    // ---- actions ----------------------------------------------------------

    pub fn update_tool_actions(&self) -> Actions {
        actions::tool_actions(self.tool, &self.interaction, &self.scene, &self.history)
    }

    pub fn update_edit_actions(&self) -> Actions {
        actions::edit_actions(&self.interaction, &self.scene)
    }

    pub fn update_construction_actions(&self) -> Actions {
        actions::construction_actions(&self.interaction)
    }

    pub fn update_actions(&self) -> ActionState {
        ActionState {
            tool: self.update_tool_actions(),
            edit: self.update_edit_actions(),
            construction: self.update_construction_actions(),
        }
    }

    // ---- selection accessors ----------------------------------------------

    pub fn selection_summary(&self) -> SelectionSummary {
        SelectionSummary::of(&self.scene)
    }

    pub fn selected_shape(&self) -> Option<&Drawable> {
        selection::selected_shape(&self.scene)
    }

    pub fn selected_text(&self) -> Option<&TextShape> {
        selection::selected_text(&self.scene)
    }

    pub fn selected_bitmap(&self) -> Option<&BitmapShape> {
        selection::selected_bitmap(&self.scene)
    }

    pub fn selected_paint(&self, target: PaintTarget) -> Option<Paint> {
        selection::selected_paint(&self.scene, target)
    }

    pub fn selected_font(&self) -> Option<Font> {
        selection::selected_font(&self.scene)
    }

    /// Union of the selected root objects' bounds.
    pub fn selection_bounds(&self) -> BBox {
        self.scene
            .objects()
            .iter()
            .filter(|o| o.selected)
            .fold(BBox::EMPTY, |acc, o| acc.union(&o.bounds()))
    }

    /// Resize handle of the selection bounds under `p`.
    pub fn hotspot_at(&self, p: crate::model::Point) -> Option<Hotspot> {
        let bounds = self.selection_bounds();
        if bounds.is_empty() {
            return None;
        }
        bounds.hotspot_at(p, self.hotspot_tolerance)
    }
}
