use crate::model::{AppState, InputListItem, MainListItem, Project};
use crate::reducer::CmdResult;
use chrono::Utc;
use uuid::Uuid;

/// Which list an item id resolves to for selection purposes. The main list
/// is one context; every input list is its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListContext {
    Main,
    Input(Uuid),
}

/// Clone-and-edit plumbing shared by the reducer operations. The closure
/// mutates the cloned state and returns `true` if anything changed; a
/// `false` discards the clone so the caller reports a no-op.
pub(crate) fn update<F>(state: &AppState, f: F) -> CmdResult
where
    F: FnOnce(&mut AppState) -> bool,
{
    let mut next = state.clone();
    if f(&mut next) {
        CmdResult::changed(next)
    } else {
        CmdResult::unchanged()
    }
}

pub fn find_main_item(project: &Project, id: Uuid) -> Option<&MainListItem> {
    project.main_list.iter().find(|item| item.id == id)
}

pub fn find_input_item(project: &Project, id: Uuid) -> Option<&InputListItem> {
    project
        .input_lists
        .iter()
        .flat_map(|list| list.items.iter())
        .find(|item| item.id == id)
}

/// Resolves an item id to its list context, checking the main list first.
pub fn item_context(project: &Project, id: Uuid) -> Option<ListContext> {
    if find_main_item(project, id).is_some() {
        return Some(ListContext::Main);
    }
    project
        .input_lists
        .iter()
        .find(|list| list.items.iter().any(|item| item.id == id))
        .map(|list| ListContext::Input(list.id))
}

/// Item ids of a context in display order: main list by rank, input lists
/// by insertion order.
pub fn context_ids(project: &Project, context: ListContext) -> Vec<Uuid> {
    match context {
        ListContext::Main => {
            let mut items: Vec<&MainListItem> = project.main_list.iter().collect();
            items.sort_by_key(|item| item.order);
            items.iter().map(|item| item.id).collect()
        }
        ListContext::Input(list_id) => project
            .input_lists
            .iter()
            .find(|list| list.id == list_id)
            .map(|list| list.items.iter().map(|item| item.id).collect())
            .unwrap_or_default(),
    }
}

/// Reassigns main-list orders to a dense 1..N by current rank.
pub fn densify_orders(project: &mut Project) {
    project.main_list.sort_by_key(|item| item.order);
    for (i, item) in project.main_list.iter_mut().enumerate() {
        item.order = i as u32 + 1;
    }
}

/// Number of item records (input and main counted separately) carrying a
/// tag. This is the ground truth `usage_count` caches.
pub fn records_with_tag(project: &Project, tag_id: Uuid) -> u32 {
    let in_main = project
        .main_list
        .iter()
        .filter(|item| item.tags.contains(&tag_id))
        .count();
    let in_inputs = project
        .input_lists
        .iter()
        .flat_map(|list| list.items.iter())
        .filter(|item| item.tags.contains(&tag_id))
        .count();
    (in_main + in_inputs) as u32
}

/// Recomputes every pool tag's `usage_count` against the current project
/// (or zero when there is none). Used when a whole project is swapped in.
pub fn recount_tag_usage(state: &mut AppState) {
    for i in 0..state.tag_pool.len() {
        let count = state
            .current_project
            .as_ref()
            .map(|p| records_with_tag(p, state.tag_pool[i].id))
            .unwrap_or(0);
        state.tag_pool[i].usage_count = count;
    }
}

pub fn touch(project: &mut Project) {
    project.updated_at = Utc::now();
}

#[cfg(test)]
pub(crate) fn main_contents_in_order(project: &Project) -> Vec<String> {
    let mut items: Vec<&MainListItem> = project.main_list.iter().collect();
    items.sort_by_key(|item| item.order);
    items.iter().map(|item| item.content.clone()).collect()
}

#[cfg(test)]
pub(crate) fn main_orders_sorted(project: &Project) -> Vec<u32> {
    let mut orders: Vec<u32> = project.main_list.iter().map(|item| item.order).collect();
    orders.sort_unstable();
    orders
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StateFixture;

    #[test]
    fn context_checks_main_list_first() {
        let fx = StateFixture::new().with_list("Pool", &["a"]).picked("Pool", "a");
        let id = fx.item_id("Pool", "a");

        // Same id lives in both places; main wins.
        assert_eq!(
            item_context(fx.state.current_project.as_ref().unwrap(), id),
            Some(ListContext::Main)
        );
    }

    #[test]
    fn densify_closes_gaps_and_keeps_rank_order() {
        let fx = StateFixture::new()
            .with_list("Pool", &["a", "b"])
            .picked("Pool", "a")
            .picked("Pool", "b");
        let mut project = fx.state.current_project.unwrap();
        project.main_list[0].order = 4;
        project.main_list[1].order = 9;

        densify_orders(&mut project);

        assert_eq!(main_orders_sorted(&project), vec![1, 2]);
        assert_eq!(main_contents_in_order(&project), vec!["a", "b"]);
    }
}
