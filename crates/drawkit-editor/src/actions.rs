//! Legal-action masks for the UI.
//!
//! Three independent axes are computed: what the current tool allows with the
//! current selection, what the live path/distortion/text edit allows, and what
//! the path under construction allows. Path-edit actions are found by running
//! the pure operation and keeping the ones that succeed.

use bitflags::bitflags;

use crate::history::UndoHistory;
use crate::model::{CloseMode, Conversion};
use crate::scene::{selection, AnchorSlot, Graphic, SceneGraph, SelectionSummary};
use crate::tools::{Interaction, Tool};

bitflags! {
    /// Actions the UI may enable.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Actions: u64 {
        const UNDO             = 1 << 0;
        const REDO             = 1 << 1;
        const SELECT_ALL       = 1 << 2;
        const DESELECT_ALL     = 1 << 3;
        const DELETE           = 1 << 4;
        const MOVE             = 1 << 5;
        const RESIZE           = 1 << 6;
        const GROUP            = 1 << 7;
        const UNGROUP          = 1 << 8;
        const MERGE_PATHS      = 1 << 9;
        const SPLIT_PATH       = 1 << 10;
        const RAISE            = 1 << 11;
        const LOWER            = 1 << 12;
        const SET_STYLE        = 1 << 13;
        const SET_FONT         = 1 << 14;
        const EDIT_PATH        = 1 << 15;
        const DISTORT          = 1 << 16;
        const EDIT_TEXT        = 1 << 17;
        const CREATE_RECTANGLE = 1 << 18;
        const CREATE_TEXT      = 1 << 19;
        const BEGIN_PATH       = 1 << 20;

        const TO_LINE          = 1 << 24;
        const TO_BEZIER        = 1 << 25;
        const TO_MOVE          = 1 << 26;
        const TO_CLOSING_MOVE  = 1 << 27;
        const ADD_POINT        = 1 << 28;
        const DELETE_POINT     = 1 << 29;
        const MAKE_CONTINUOUS  = 1 << 30;
        const OPEN_PATH        = 1 << 31;
        const CLOSE_PATH       = 1 << 32;
        const BREAK_PATH       = 1 << 33;
        const TOGGLE_JOIN      = 1 << 34;
        const TOGGLE_CLOSING   = 1 << 35;
        const FINISH           = 1 << 36;
        const ABANDON          = 1 << 37;

        const ADD_SEGMENT      = 1 << 40;
        const UNDO_STEP        = 1 << 41;
        const FINISH_PATH      = 1 << 42;
        const CLOSE_NEW_PATH   = 1 << 43;
    }
}

/// All three action axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionState {
    pub tool: Actions,
    pub edit: Actions,
    pub construction: Actions,
}

impl ActionState {
    pub fn all(&self) -> Actions {
        self.tool | self.edit | self.construction
    }
}

/// Actions of the current tool, crossed with the selection kind.
pub fn tool_actions(
    tool: Tool,
    interaction: &Interaction,
    scene: &SceneGraph,
    history: &UndoHistory,
) -> Actions {
    let mut actions = Actions::empty();
    let idle = interaction.is_idle();
    if idle || matches!(interaction, Interaction::PathEdit(_)) {
        actions.set(Actions::UNDO, history.can_undo());
        actions.set(Actions::REDO, history.can_redo());
    }
    if !idle {
        return actions;
    }

    match tool {
        Tool::Pen => actions |= Actions::BEGIN_PATH,
        Tool::Rectangle => actions |= Actions::CREATE_RECTANGLE,
        Tool::Text => actions |= Actions::CREATE_TEXT,
        Tool::Zoom => return actions,
        Tool::Select => {}
    }

    let summary = SelectionSummary::of(scene);
    actions.set(
        Actions::SELECT_ALL,
        scene.objects().iter().any(|o| !o.selected),
    );
    if summary.is_empty() {
        return actions;
    }

    actions |= Actions::DESELECT_ALL | Actions::DELETE | Actions::MOVE | Actions::RESIZE;
    actions |= Actions::RAISE | Actions::LOWER | Actions::GROUP;
    actions.set(Actions::UNGROUP, summary.groups > 0);
    actions.set(Actions::MERGE_PATHS, summary.paths >= 2);

    let leaves = selection::selected_leaves(scene);
    actions.set(
        Actions::SET_STYLE,
        leaves.iter().any(|o| o.graphic.style().is_some()),
    );
    actions.set(
        Actions::SET_FONT,
        leaves.iter().any(|o| matches!(o.graphic, Graphic::Text(_))),
    );

    if tool == Tool::Select && summary.is_single() {
        let single = scene
            .selected_indices()
            .first()
            .and_then(|&i| scene.objects().get(i));
        if let Some(object) = single {
            match &object.graphic {
                Graphic::Path(p) => {
                    actions |= Actions::EDIT_PATH | Actions::DISTORT;
                    actions.set(Actions::SPLIT_PATH, p.subpath_count() >= 2);
                }
                Graphic::Symmetric(_) => actions |= Actions::EDIT_PATH | Actions::DISTORT,
                Graphic::Text(_) => actions |= Actions::EDIT_TEXT,
                Graphic::Bitmap(_) | Graphic::Group(_) => {}
            }
        }
    }
    actions
}

/// Actions of the live path edit, distortion or text edit.
pub fn edit_actions(interaction: &Interaction, scene: &SceneGraph) -> Actions {
    match interaction {
        Interaction::PathEdit(state) => {
            let Ok(object) = scene.expect(&state.target, state.id) else {
                return Actions::ABANDON;
            };
            let g = &object.graphic;
            let c = state.selected;
            let mut actions = Actions::FINISH | Actions::ABANDON;
            let conversions = [
                (Actions::TO_LINE, Conversion::ToLine),
                (Actions::TO_BEZIER, Conversion::ToBezier),
                (Actions::TO_MOVE, Conversion::ToMove),
                (Actions::TO_CLOSING_MOVE, Conversion::ToClosingMove),
            ];
            for (flag, conversion) in conversions {
                actions.set(flag, g.converted_at(c, conversion).is_ok());
            }
            actions.set(Actions::ADD_POINT, g.with_point_added(c).is_ok());
            actions.set(Actions::DELETE_POINT, g.with_point_deleted(c).is_ok());
            actions.set(Actions::MAKE_CONTINUOUS, g.made_continuous(c, false).is_ok());
            actions.set(Actions::OPEN_PATH, g.opened(true).is_ok());
            actions.set(Actions::CLOSE_PATH, g.closed(CloseMode::Line).is_ok());
            actions.set(Actions::BREAK_PATH, g.broken_at(c).is_ok());
            actions.set(Actions::TOGGLE_JOIN, g.toggled_anchor(AnchorSlot::Join).is_ok());
            actions.set(
                Actions::TOGGLE_CLOSING,
                g.toggled_anchor(AnchorSlot::Closing).is_ok(),
            );
            actions
        }
        Interaction::Distortion(_) | Interaction::TextEdit(_) => Actions::FINISH | Actions::ABANDON,
        Interaction::Idle | Interaction::Constructing(_) => Actions::empty(),
    }
}

/// Actions of the path under construction.
pub fn construction_actions(interaction: &Interaction) -> Actions {
    let Interaction::Constructing(draft) = interaction else {
        return Actions::empty();
    };
    let mut actions = Actions::ADD_SEGMENT | Actions::ABANDON;
    actions.set(Actions::UNDO_STEP, draft.segments().len() > 1);
    let drawing = draft.drawing_segment_count();
    actions.set(Actions::FINISH_PATH, drawing >= 1);
    actions.set(Actions::CLOSE_NEW_PATH, drawing >= 1);
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;
    use crate::tools::PathDraft;

    #[test]
    fn test_construction_axis() {
        assert_eq!(construction_actions(&Interaction::Idle), Actions::empty());
        let mut draft = PathDraft::new(Point::new(0.0, 0.0));
        let actions = construction_actions(&Interaction::Constructing(draft.clone()));
        assert!(!actions.contains(Actions::FINISH_PATH));
        assert!(!actions.contains(Actions::UNDO_STEP));
        draft.line_to(Point::new(1.0, 0.0));
        let actions = construction_actions(&Interaction::Constructing(draft));
        assert!(actions.contains(Actions::FINISH_PATH | Actions::UNDO_STEP | Actions::ABANDON));
    }
}
