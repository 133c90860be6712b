//! # Reducer Layer
//!
//! Every state transition in shortlist is a pure function over [`AppState`]:
//! it takes the current state by reference plus an operation payload and
//! returns a [`CmdResult`]. No I/O, no globals, no framework coupling — the
//! same functions serve the CLI, tests, or any other host.
//!
//! ## No-op semantics
//!
//! Operations that hit a missing id or an unmet precondition (moving an
//! already-used item, reordering to the current position, ...) are **silent
//! no-ops**: they return a `CmdResult` whose `state` is `None`, and the host
//! keeps its prior state untouched. These cases arise routinely from stale
//! UI events and are never errors. Validation failures (tag naming rules)
//! are the exception: they surface as `ShortlistError::Validation` and the
//! state is likewise left alone.
//!
//! ## Module layout
//!
//! One operation family per module, mirroring the data model:
//!
//! - [`movement`]: input list → main list and back
//! - [`reorder`]: positional splicing, single item and multi-item block
//! - [`selection`]: the `{selected_items, anchor_item}` state machine
//! - [`tags`]: tag pool CRUD plus dual-record usage-count bookkeeping
//! - [`project`]: project lifecycle, input-list CRUD, archive import/export

use crate::error::Result;
use crate::model::{AppState, Tag};
use uuid::Uuid;

pub mod helpers;
pub mod movement;
pub mod project;
pub mod reorder;
pub mod selection;
pub mod tags;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Outcome of one reducer operation.
///
/// `state` is `Some(next)` when the operation changed anything and `None`
/// for a no-op; callers that hold the prior state keep it as-is in the
/// latter case. `committed` is set by the API facade once it has swapped
/// the new state in.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub state: Option<AppState>,
    pub created_tag: Option<Tag>,
    pub committed: bool,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn changed(state: AppState) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }

    pub fn is_noop(&self) -> bool {
        self.state.is_none() && !self.committed
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_created_tag(mut self, tag: Tag) -> Self {
        self.created_tag = Some(tag);
        self
    }
}

/// Where a drag started, as decoded by the gesture layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// A single item picked up from an input list.
    InputItem { list_id: Uuid, item_id: Uuid },
    /// A single main-list item.
    MainItem { item_id: Uuid },
    /// The current multi-selection, dragged as one block.
    MainSelection { item_ids: Vec<Uuid> },
}

/// Where a drag was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Append at the end of the main list.
    MainListEnd,
    /// Insert at a 1-based main-list position.
    MainListAt(u32),
}

/// Routes a decoded drop descriptor to the operation it means. The gesture
/// layer owns hit-testing and decoding; the reducer's job begins here.
pub fn apply_drop(state: &AppState, source: DragSource, target: DropTarget) -> Result<CmdResult> {
    let main_len = state
        .current_project
        .as_ref()
        .map(|p| p.main_list.len() as u32)
        .unwrap_or(0);

    match (source, target) {
        (DragSource::InputItem { list_id, item_id }, DropTarget::MainListEnd) => {
            movement::move_to_main_list(state, list_id, item_id, None)
        }
        (DragSource::InputItem { list_id, item_id }, DropTarget::MainListAt(pos)) => {
            movement::move_to_main_list(state, list_id, item_id, Some(pos))
        }
        (DragSource::MainItem { item_id }, DropTarget::MainListAt(pos)) => {
            reorder::reorder_single(state, item_id, pos)
        }
        (DragSource::MainItem { item_id }, DropTarget::MainListEnd) => {
            reorder::reorder_single(state, item_id, main_len.max(1))
        }
        (DragSource::MainSelection { item_ids }, DropTarget::MainListAt(pos)) => {
            if item_ids.len() == 1 {
                reorder::reorder_single(state, item_ids[0], pos)
            } else {
                reorder::reorder_multiple(state, &item_ids, pos)
            }
        }
        (DragSource::MainSelection { item_ids }, DropTarget::MainListEnd) => {
            if item_ids.len() == 1 {
                reorder::reorder_single(state, item_ids[0], main_len.max(1))
            } else {
                reorder::reorder_multiple(state, &item_ids, main_len.saturating_add(1))
            }
        }
    }
}
