use crate::error::{Result, ShortlistError};
use crate::model::{AppState, InputList, InputListItem, Project, ProjectArchive, UiState};
use crate::reducer::{helpers, CmdMessage, CmdResult};
use std::collections::HashMap;
use uuid::Uuid;

/// Starts a fresh project and makes it current. Selection is reset and the
/// pool's usage counts are recounted against the (empty) new project.
pub fn create(state: &AppState, name: &str) -> Result<CmdResult> {
    let name = validate_list_name(name, "Project")?;

    let mut next = state.clone();
    next.current_project = Some(Project::new(name.clone()));
    next.ui = UiState::default();
    helpers::recount_tag_usage(&mut next);

    Ok(CmdResult::changed(next)
        .with_message(CmdMessage::success(format!("Project created: {}", name))))
}

/// Adds an empty input list. The name must be non-blank, unique among the
/// project's lists, and must not collide (case-insensitively) with a pool
/// tag name — the reserved-name rule works in both directions.
pub fn add_input_list(state: &AppState, name: &str) -> Result<CmdResult> {
    let name = validate_list_name(name, "List")?;
    let lower = name.to_lowercase();

    if let Some(project) = &state.current_project {
        if project
            .input_lists
            .iter()
            .any(|l| l.name.to_lowercase() == lower)
        {
            return Err(ShortlistError::Validation(format!(
                "A list named \"{}\" already exists",
                name
            )));
        }
    }
    if state.tag_pool.iter().any(|t| t.name.to_lowercase() == lower) {
        return Err(ShortlistError::Validation(format!(
            "\"{}\" is reserved by a tag",
            name
        )));
    }

    let result = helpers::update(state, |next| {
        let Some(project) = next.current_project.as_mut() else {
            return false;
        };
        project.input_lists.push(InputList::new(name.clone()));
        helpers::touch(project);
        true
    });

    if result.is_noop() {
        return Ok(result);
    }
    Ok(result.with_message(CmdMessage::success(format!("List added: {}", name))))
}

/// Deletes an input list with its items, plus every main-list entry that
/// was sourced from it. Main-list orders are re-densified.
pub fn delete_input_list(state: &AppState, list_id: Uuid) -> Result<CmdResult> {
    let mut name = String::new();
    let result = helpers::update(state, |next| {
        let Some(project) = next.current_project.as_mut() else {
            return false;
        };
        let Some(pos) = project.input_lists.iter().position(|l| l.id == list_id) else {
            return false;
        };

        name = project.input_lists.remove(pos).name;
        project.main_list.retain(|item| item.source_list_id != list_id);
        helpers::densify_orders(project);
        helpers::touch(project);
        true
    });

    if result.is_noop() {
        return Ok(result);
    }
    Ok(result.with_message(CmdMessage::success(format!("List deleted: {}", name))))
}

/// Appends already-validated contents as fresh unused items. Dedup,
/// sanitization and size caps are the importer's job, not ours.
pub fn add_items(state: &AppState, list_id: Uuid, contents: &[String]) -> Result<CmdResult> {
    if contents.is_empty() {
        return Ok(CmdResult::unchanged());
    }
    let count = contents.len();
    let result = helpers::update(state, |next| {
        let Some(project) = next.current_project.as_mut() else {
            return false;
        };
        let Some(list) = project.input_lists.iter_mut().find(|l| l.id == list_id) else {
            return false;
        };
        list.items
            .extend(contents.iter().cloned().map(InputListItem::new));
        helpers::touch(project);
        true
    });

    if result.is_noop() {
        return Ok(result);
    }
    Ok(result.with_message(CmdMessage::success(format!("Added {} item(s)", count))))
}

/// Deletes an input item outright. If it was picked, its main-list twin
/// goes with it and orders are re-densified.
pub fn delete_item(state: &AppState, list_id: Uuid, item_id: Uuid) -> Result<CmdResult> {
    Ok(helpers::update(state, |next| {
        let Some(project) = next.current_project.as_mut() else {
            return false;
        };
        let Some(list) = project.input_lists.iter_mut().find(|l| l.id == list_id) else {
            return false;
        };
        let Some(pos) = list.items.iter().position(|i| i.id == item_id) else {
            return false;
        };

        list.items.remove(pos);
        let had_twin = project.main_list.iter().any(|i| i.id == item_id);
        if had_twin {
            project.main_list.retain(|i| i.id != item_id);
            helpers::densify_orders(project);
        }
        helpers::touch(project);
        true
    }))
}

/// Marks an input list as the active one in the UI state. `None` clears
/// it; naming a list that doesn't exist is a no-op.
pub fn set_active_input_list(state: &AppState, list_id: Option<Uuid>) -> Result<CmdResult> {
    if state.ui.active_input_list == list_id {
        return Ok(CmdResult::unchanged());
    }
    Ok(helpers::update(state, |next| {
        if let Some(id) = list_id {
            let exists = next
                .current_project
                .as_ref()
                .is_some_and(|p| p.input_lists.iter().any(|l| l.id == id));
            if !exists {
                return false;
            }
        }
        next.ui.active_input_list = list_id;
        true
    }))
}

/// Imports a foreign archive as the current project. Every entity id is
/// regenerated through one remapping table, so an input item and its
/// main-list twin (same old id) come out sharing the same new id, and
/// `source_list_id` back-references stay consistent. Archived tags merge
/// into the pool: a case-insensitive name match reuses the pool tag,
/// anything else is inserted under a fresh id. Usage counts are recomputed
/// from the records themselves.
pub fn import_archive(state: &AppState, archive: &ProjectArchive) -> Result<CmdResult> {
    let mut next = state.clone();

    let mut tag_map: HashMap<Uuid, Uuid> = HashMap::new();
    for tag in &archive.tags {
        let lower = tag.name.to_lowercase();
        if let Some(existing) = next
            .tag_pool
            .iter()
            .find(|t| t.name.to_lowercase() == lower)
        {
            tag_map.insert(tag.id, existing.id);
        } else {
            let mut fresh = tag.clone();
            fresh.id = Uuid::new_v4();
            tag_map.insert(tag.id, fresh.id);
            next.tag_pool.push(fresh);
        }
    }

    let mut ids: HashMap<Uuid, Uuid> = HashMap::new();
    let mut project = archive.project.clone();
    project.id = Uuid::new_v4();

    for list in &mut project.input_lists {
        list.id = remap(&mut ids, list.id);
        for item in &mut list.items {
            item.id = remap(&mut ids, item.id);
            item.tags = remap_tags(&tag_map, &item.tags);
        }
    }
    for item in &mut project.main_list {
        item.id = remap(&mut ids, item.id);
        item.source_list_id = remap(&mut ids, item.source_list_id);
        item.tags = remap_tags(&tag_map, &item.tags);
    }
    // Validated archives arrive contiguous already; hand-edited ones are
    // healed here rather than trusted.
    helpers::densify_orders(&mut project);

    let name = project.name.clone();
    next.current_project = Some(project);
    next.ui = UiState::default();
    helpers::recount_tag_usage(&mut next);

    Ok(CmdResult::changed(next)
        .with_message(CmdMessage::success(format!("Imported project: {}", name))))
}

/// Reopens one of our own saved archives: ids are kept, archived tags not
/// yet in the pool are restored, and usage counts are recounted.
pub fn activate_archive(state: &AppState, archive: &ProjectArchive) -> Result<CmdResult> {
    let mut next = state.clone();

    for tag in &archive.tags {
        if !next.tag_pool.iter().any(|t| t.id == tag.id) {
            next.tag_pool.push(tag.clone());
        }
    }
    next.current_project = Some(archive.project.clone());
    next.ui = UiState::default();
    helpers::recount_tag_usage(&mut next);

    Ok(CmdResult::changed(next))
}

/// The exportable shape of the current project: the project plus only the
/// pool tags its records actually reference. Pure read.
pub fn export_archive(state: &AppState) -> Result<ProjectArchive> {
    let project = state
        .current_project
        .as_ref()
        .ok_or_else(|| ShortlistError::Api("No active project".to_string()))?;

    let mut referenced: Vec<Uuid> = Vec::new();
    let record_tags = project
        .main_list
        .iter()
        .map(|i| &i.tags)
        .chain(project.input_lists.iter().flat_map(|l| l.items.iter()).map(|i| &i.tags));
    for tags in record_tags {
        for &tag in tags {
            if !referenced.contains(&tag) {
                referenced.push(tag);
            }
        }
    }

    let tags = state
        .tag_pool
        .iter()
        .filter(|t| referenced.contains(&t.id))
        .cloned()
        .collect();

    Ok(ProjectArchive {
        project: project.clone(),
        tags,
    })
}

fn remap(ids: &mut HashMap<Uuid, Uuid>, old: Uuid) -> Uuid {
    *ids.entry(old).or_insert_with(Uuid::new_v4)
}

fn remap_tags(tag_map: &HashMap<Uuid, Uuid>, tags: &[Uuid]) -> Vec<Uuid> {
    tags.iter().filter_map(|t| tag_map.get(t).copied()).collect()
}

fn validate_list_name(name: &str, what: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ShortlistError::Validation(format!(
            "{} name cannot be empty",
            what
        )));
    }
    Ok(trimmed.to_string())
}
