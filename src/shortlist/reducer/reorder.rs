use crate::error::Result;
use crate::model::AppState;
use crate::reducer::{helpers, CmdResult};
use uuid::Uuid;

/// Moves one main-list item to a new 1-based rank with a stable
/// insertion-shift: every item between the old and new position moves by
/// exactly one slot. A no-op when the item is missing or already at the
/// requested rank.
pub fn reorder_single(state: &AppState, item_id: Uuid, new_position: u32) -> Result<CmdResult> {
    Ok(helpers::update(state, |next| {
        let Some(project) = next.current_project.as_mut() else {
            return false;
        };
        let Some(current) = project
            .main_list
            .iter()
            .find(|i| i.id == item_id)
            .map(|i| i.order)
        else {
            return false;
        };
        if new_position == 0 || new_position == current {
            return false;
        }

        if new_position < current {
            // Moving up: everything in [new, current) slides down one rank.
            for item in &mut project.main_list {
                if item.order >= new_position && item.order < current {
                    item.order += 1;
                }
            }
        } else {
            // Moving down: everything in (current, new] slides up one rank.
            for item in &mut project.main_list {
                if item.order > current && item.order <= new_position {
                    item.order -= 1;
                }
            }
        }
        if let Some(item) = project.main_list.iter_mut().find(|i| i.id == item_id) {
            item.order = new_position;
        }
        helpers::touch(project);
        true
    }))
}

/// Moves a multi-selection as one block, preserving its internal relative
/// order. The drop position is interpreted against the sequence that
/// remains once the selected items are taken out, so removing them cannot
/// shift the meaning of the requested slot; the insertion index is clamped
/// to that sequence. Orders are reassigned densely afterwards.
///
/// Preconditions: more than one id, all of them main-list items. Otherwise
/// a no-op.
pub fn reorder_multiple(
    state: &AppState,
    selected_ids: &[Uuid],
    new_position: u32,
) -> Result<CmdResult> {
    if selected_ids.len() < 2 {
        return Ok(CmdResult::unchanged());
    }

    Ok(helpers::update(state, |next| {
        let Some(project) = next.current_project.as_mut() else {
            return false;
        };
        let all_in_main = selected_ids
            .iter()
            .all(|id| project.main_list.iter().any(|item| item.id == *id));
        if !all_in_main {
            return false;
        }

        let mut items = std::mem::take(&mut project.main_list);
        items.sort_by_key(|item| item.order);
        let (mut selected, mut rest): (Vec<_>, Vec<_>) = items
            .into_iter()
            .partition(|item| selected_ids.contains(&item.id));

        let insert_at = (new_position.saturating_sub(1) as usize).min(rest.len());
        let mut rebuilt = Vec::with_capacity(selected.len() + rest.len());
        rebuilt.extend(rest.drain(..insert_at));
        rebuilt.append(&mut selected);
        rebuilt.append(&mut rest);
        for (i, item) in rebuilt.iter_mut().enumerate() {
            item.order = i as u32 + 1;
        }
        project.main_list = rebuilt;
        helpers::touch(project);
        true
    }))
}
