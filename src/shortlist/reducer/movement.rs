use crate::error::Result;
use crate::model::{AppState, MainListItem};
use crate::reducer::{helpers, CmdMessage, CmdResult};
use uuid::Uuid;

/// Picks an input-list item into the main list, appending when `position`
/// is `None` and splicing in at the 1-based position otherwise.
///
/// The source item stays in its input list with `is_used` flipped to true.
/// A no-op when the item is missing or already used. An explicit position
/// past `len + 1` is not clamped; the resulting order gap persists until
/// the next contiguity-restoring operation.
pub fn move_to_main_list(
    state: &AppState,
    source_list_id: Uuid,
    item_id: Uuid,
    position: Option<u32>,
) -> Result<CmdResult> {
    let mut content = String::new();
    let result = helpers::update(state, |next| {
        let Some(project) = next.current_project.as_mut() else {
            return false;
        };
        let Some(list) = project.input_lists.iter_mut().find(|l| l.id == source_list_id) else {
            return false;
        };
        let Some(item) = list.items.iter_mut().find(|i| i.id == item_id) else {
            return false;
        };
        if item.is_used {
            return false;
        }

        item.is_used = true;
        content = item.content.clone();
        let entry_tags = item.tags.clone();

        let order = match position {
            Some(pos) => {
                for existing in &mut project.main_list {
                    if existing.order >= pos {
                        existing.order += 1;
                    }
                }
                pos
            }
            None => project.main_list.len() as u32 + 1,
        };

        project.main_list.push(MainListItem {
            id: item_id,
            content: content.clone(),
            source_list_id,
            tags: entry_tags,
            order,
        });
        helpers::touch(project);
        true
    });

    if result.is_noop() {
        return Ok(result);
    }
    Ok(result.with_message(CmdMessage::success(format!("Picked: {}", content))))
}

/// Removes a main-list item, closes the rank gap it leaves, resets
/// `is_used` on the source input item (matched by shared id within the
/// source list), and drops the id from the selection.
pub fn remove_from_main_list(state: &AppState, item_id: Uuid) -> Result<CmdResult> {
    let mut content = String::new();
    let result = helpers::update(state, |next| {
        let Some(project) = next.current_project.as_mut() else {
            return false;
        };
        let Some(pos) = project.main_list.iter().position(|i| i.id == item_id) else {
            return false;
        };

        let removed = project.main_list.remove(pos);
        content = removed.content.clone();
        for item in &mut project.main_list {
            if item.order > removed.order {
                item.order -= 1;
            }
        }

        if let Some(list) = project
            .input_lists
            .iter_mut()
            .find(|l| l.id == removed.source_list_id)
        {
            if let Some(source) = list.items.iter_mut().find(|i| i.id == removed.id) {
                source.is_used = false;
            }
        }

        next.ui.selected_items.retain(|&id| id != item_id);
        helpers::touch(project);
        true
    });

    if result.is_noop() {
        return Ok(result);
    }
    Ok(result.with_message(CmdMessage::success(format!("Dropped: {}", content))))
}
