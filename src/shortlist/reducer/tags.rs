use crate::error::{Result, ShortlistError};
use crate::model::{AppState, Tag};
use crate::reducer::{helpers, CmdMessage, CmdResult};
use uuid::Uuid;

const TAG_NAME_MAX: usize = 50;

/// Creates a pool tag with `usage_count = 0`. Name rules: trimmed, 1–50
/// chars, unique case-insensitively among tags, and not equal
/// (case-insensitively) to any input-list name — list names are reserved.
/// A failed rule returns `Validation` and leaves the state alone.
pub fn create(state: &AppState, name: &str, color: &str) -> Result<CmdResult> {
    let name = validate_name(state, name, None)?;
    let tag = Tag::new(name, color.to_string());

    let mut next = state.clone();
    next.tag_pool.push(tag.clone());

    let message = CmdMessage::success(format!("Tag created: {}", tag.name));
    Ok(CmdResult::changed(next)
        .with_created_tag(tag)
        .with_message(message))
}

/// Renames/recolors a tag. Validation is the same as [`create`] except the
/// uniqueness check skips the tag itself, so renaming to its own name
/// (including a pure case change) is legal. Unknown tag ids are a no-op.
pub fn edit(state: &AppState, tag_id: Uuid, name: &str, color: &str) -> Result<CmdResult> {
    if !state.tag_pool.iter().any(|t| t.id == tag_id) {
        return Ok(CmdResult::unchanged());
    }
    let name = validate_name(state, name, Some(tag_id))?;

    let result = helpers::update(state, |next| {
        let Some(tag) = next.tag_pool.iter_mut().find(|t| t.id == tag_id) else {
            return false;
        };
        tag.name = name.clone();
        tag.color = color.to_string();
        true
    });
    Ok(result.with_message(CmdMessage::success("Tag updated")))
}

/// Removes a tag from the pool and strips its id from every item record in
/// the project, both main-list and input-list sides.
pub fn delete(state: &AppState, tag_id: Uuid) -> Result<CmdResult> {
    let mut name = String::new();
    let result = helpers::update(state, |next| {
        let Some(pos) = next.tag_pool.iter().position(|t| t.id == tag_id) else {
            return false;
        };
        name = next.tag_pool.remove(pos).name;

        if let Some(project) = next.current_project.as_mut() {
            for item in &mut project.main_list {
                item.tags.retain(|&t| t != tag_id);
            }
            for list in &mut project.input_lists {
                for item in &mut list.items {
                    item.tags.retain(|&t| t != tag_id);
                }
            }
            helpers::touch(project);
        }
        true
    });

    if result.is_noop() {
        return Ok(result);
    }
    Ok(result.with_message(CmdMessage::success(format!("Tag deleted: {}", name))))
}

/// Applies a tag to items. For each id, the main-list record and the
/// same-id input-list record are updated together; `usage_count` goes up
/// by the number of records actually modified, so tagging one logical item
/// that lives in both places counts as two.
pub fn add(state: &AppState, item_ids: &[Uuid], tag_id: Uuid) -> Result<CmdResult> {
    apply_tag(state, item_ids, tag_id, true)
}

/// Strips a tag from items, decrementing `usage_count` by the number of
/// records actually changed, floored at zero.
pub fn remove(state: &AppState, item_ids: &[Uuid], tag_id: Uuid) -> Result<CmdResult> {
    apply_tag(state, item_ids, tag_id, false)
}

fn apply_tag(state: &AppState, item_ids: &[Uuid], tag_id: Uuid, adding: bool) -> Result<CmdResult> {
    Ok(helpers::update(state, |next| {
        if !next.tag_pool.iter().any(|t| t.id == tag_id) {
            return false;
        }
        let Some(project) = next.current_project.as_mut() else {
            return false;
        };

        let mut touched: u32 = 0;
        for &id in item_ids {
            // Both records of a shared id move in the same transition; the
            // tag arrays of the pair stay set-equal.
            if let Some(item) = project.main_list.iter_mut().find(|i| i.id == id) {
                if toggle_tag(&mut item.tags, tag_id, adding) {
                    touched += 1;
                }
            }
            for list in &mut project.input_lists {
                if let Some(item) = list.items.iter_mut().find(|i| i.id == id) {
                    if toggle_tag(&mut item.tags, tag_id, adding) {
                        touched += 1;
                    }
                }
            }
        }
        if touched == 0 {
            return false;
        }

        helpers::touch(project);
        if let Some(tag) = next.tag_pool.iter_mut().find(|t| t.id == tag_id) {
            tag.usage_count = if adding {
                tag.usage_count + touched
            } else {
                tag.usage_count.saturating_sub(touched)
            };
        }
        true
    }))
}

fn toggle_tag(tags: &mut Vec<Uuid>, tag_id: Uuid, adding: bool) -> bool {
    if adding {
        if tags.contains(&tag_id) {
            return false;
        }
        tags.push(tag_id);
        true
    } else {
        let before = tags.len();
        tags.retain(|&t| t != tag_id);
        tags.len() != before
    }
}

fn validate_name(state: &AppState, name: &str, editing: Option<Uuid>) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ShortlistError::Validation(
            "Tag name cannot be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > TAG_NAME_MAX {
        return Err(ShortlistError::Validation(format!(
            "Tag name cannot exceed {} characters",
            TAG_NAME_MAX
        )));
    }

    let lower = trimmed.to_lowercase();
    let duplicate = state
        .tag_pool
        .iter()
        .any(|t| Some(t.id) != editing && t.name.to_lowercase() == lower);
    if duplicate {
        return Err(ShortlistError::Validation(format!(
            "A tag named \"{}\" already exists",
            trimmed
        )));
    }

    if let Some(project) = &state.current_project {
        let reserved = project
            .input_lists
            .iter()
            .any(|list| list.name.to_lowercase() == lower);
        if reserved {
            return Err(ShortlistError::Validation(format!(
                "\"{}\" is reserved by an input list",
                trimmed
            )));
        }
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::helpers::records_with_tag;
    use crate::store::memory::fixtures::StateFixture;

    fn tag_by_name<'a>(state: &'a AppState, name: &str) -> &'a Tag {
        state
            .tag_pool
            .iter()
            .find(|t| t.name == name)
            .expect("tag should exist")
    }

    #[test]
    fn create_trims_and_starts_unused() {
        let fx = StateFixture::new();
        let result = create(&fx.state, "  urgent  ", "#d33").unwrap();

        let tag = result.created_tag.unwrap();
        assert_eq!(tag.name, "urgent");
        assert_eq!(tag.usage_count, 0);
        assert_eq!(result.state.unwrap().tag_pool.len(), 1);
    }

    #[test]
    fn create_rejects_empty_and_whitespace_names() {
        let fx = StateFixture::new();
        assert!(matches!(
            create(&fx.state, "", "#d33"),
            Err(ShortlistError::Validation(_))
        ));
        assert!(matches!(
            create(&fx.state, "   ", "#d33"),
            Err(ShortlistError::Validation(_))
        ));
    }

    #[test]
    fn create_rejects_names_over_fifty_chars() {
        let fx = StateFixture::new();
        let long = "x".repeat(51);
        assert!(matches!(
            create(&fx.state, &long, "#d33"),
            Err(ShortlistError::Validation(_))
        ));
        assert!(create(&fx.state, &"x".repeat(50), "#d33").is_ok());
    }

    #[test]
    fn create_rejects_case_insensitive_duplicates() {
        let fx = StateFixture::new().with_tag("Urgent");
        assert!(matches!(
            create(&fx.state, "urgent", "#d33"),
            Err(ShortlistError::Validation(_))
        ));
    }

    #[test]
    fn create_rejects_input_list_names() {
        let fx = StateFixture::new().with_list("Todo Items", &[]);
        let err = create(&fx.state, "todo items", "#d33");
        assert!(matches!(err, Err(ShortlistError::Validation(_))));
        // Pool untouched: the caller still holds the prior state.
        assert!(fx.state.tag_pool.is_empty());
    }

    #[test]
    fn edit_allows_renaming_to_its_own_name() {
        let fx = StateFixture::new().with_tag("urgent");
        let id = fx.tag_id("urgent");

        let result = edit(&fx.state, id, "URGENT", "#000").unwrap();
        let next = result.state.unwrap();
        assert_eq!(tag_by_name(&next, "URGENT").color, "#000");
    }

    #[test]
    fn edit_still_rejects_other_tags_names() {
        let fx = StateFixture::new().with_tag("urgent").with_tag("later");
        let err = edit(&fx.state, fx.tag_id("later"), "Urgent", "#000");
        assert!(matches!(err, Err(ShortlistError::Validation(_))));
    }

    #[test]
    fn edit_of_unknown_tag_is_a_noop() {
        let fx = StateFixture::new().with_tag("urgent");
        let result = edit(&fx.state, Uuid::new_v4(), "other", "#000").unwrap();
        assert!(result.is_noop());
    }

    #[test]
    fn tagging_a_picked_item_touches_both_records() {
        let fx = StateFixture::new()
            .with_list("Pool", &["a"])
            .picked("Pool", "a")
            .with_tag("urgent");
        let item = fx.main_id("a");
        let tag = fx.tag_id("urgent");

        let result = add(&fx.state, &[item], tag).unwrap();
        let next = result.state.unwrap();

        assert_eq!(tag_by_name(&next, "urgent").usage_count, 2);
        let project = next.current_project.as_ref().unwrap();
        let main = project.main_list.iter().find(|i| i.id == item).unwrap();
        let input = project.input_lists[0]
            .items
            .iter()
            .find(|i| i.id == item)
            .unwrap();
        assert_eq!(main.tags, input.tags);
        assert_eq!(records_with_tag(project, tag), 2);
    }

    #[test]
    fn tagging_an_unpicked_item_counts_one_record() {
        let fx = StateFixture::new().with_list("Pool", &["a"]).with_tag("urgent");
        let result = add(&fx.state, &[fx.item_id("Pool", "a")], fx.tag_id("urgent")).unwrap();
        assert_eq!(
            tag_by_name(&result.state.unwrap(), "urgent").usage_count,
            1
        );
    }

    #[test]
    fn re_tagging_already_tagged_records_is_a_noop() {
        let fx = StateFixture::new()
            .with_list("Pool", &["a"])
            .with_tag("urgent")
            .tagged("urgent", &["a"]);
        let result = add(&fx.state, &[fx.item_id("Pool", "a")], fx.tag_id("urgent")).unwrap();
        assert!(result.is_noop());
    }

    #[test]
    fn untagging_decrements_by_records_changed() {
        let fx = StateFixture::new()
            .with_list("Pool", &["a"])
            .picked("Pool", "a")
            .with_tag("urgent")
            .tagged("urgent", &["a"]);
        assert_eq!(tag_by_name(&fx.state, "urgent").usage_count, 2);

        let result = remove(&fx.state, &[fx.main_id("a")], fx.tag_id("urgent")).unwrap();
        let next = result.state.unwrap();
        assert_eq!(tag_by_name(&next, "urgent").usage_count, 0);

        let project = next.current_project.as_ref().unwrap();
        assert!(project.main_list[0].tags.is_empty());
        assert!(project.input_lists[0].items[0].tags.is_empty());
    }

    #[test]
    fn usage_count_never_goes_negative() {
        let fx = StateFixture::new()
            .with_list("Pool", &["a"])
            .with_tag("urgent")
            .tagged("urgent", &["a"]);
        let mut state = fx.state.clone();
        // Simulate a stale stored count.
        state.tag_pool[0].usage_count = 0;

        let result = remove(&state, &[fx.item_id("Pool", "a")], fx.tag_id("urgent")).unwrap();
        assert_eq!(tag_by_name(&result.state.unwrap(), "urgent").usage_count, 0);
    }

    #[test]
    fn delete_cascades_through_every_record() {
        let fx = StateFixture::new()
            .with_list("Pool", &["a", "b"])
            .picked("Pool", "a")
            .with_tag("urgent")
            .tagged("urgent", &["a", "b"]);
        let tag = fx.tag_id("urgent");

        let result = delete(&fx.state, tag).unwrap();
        let next = result.state.unwrap();

        assert!(next.tag_pool.is_empty());
        let project = next.current_project.as_ref().unwrap();
        assert_eq!(records_with_tag(project, tag), 0);
    }

    #[test]
    fn delete_of_unknown_tag_is_a_noop() {
        let fx = StateFixture::new().with_tag("urgent");
        assert!(delete(&fx.state, Uuid::new_v4()).unwrap().is_noop());
    }

    #[test]
    fn tagging_with_an_unknown_tag_is_a_noop() {
        let fx = StateFixture::new().with_list("Pool", &["a"]);
        let result = add(&fx.state, &[fx.item_id("Pool", "a")], Uuid::new_v4()).unwrap();
        assert!(result.is_noop());
    }
}
