use crate::error::Result;
use crate::model::AppState;
use crate::reducer::helpers::{self, ListContext};
use crate::reducer::CmdResult;
use uuid::Uuid;

/// One click on an item, with the two modifier flags the gesture layer
/// reports. Shift takes precedence over multi when a usable anchor exists.
///
/// - Shift with an anchor in the same list context: extend the selection by
///   the contiguous range between anchor and target (union, not replace).
///   Cross-context ranges, dead anchors, and shift-without-anchor all fall
///   back to a plain single-select of the target.
/// - Multi (no shift): toggle the target. Adding makes it the anchor;
///   removing the current anchor promotes the first remaining selected id
///   (or clears the anchor when the selection empties).
/// - Plain click: selection becomes exactly the target.
///
/// Unknown ids are a no-op. Already-selected ids elsewhere in the set are
/// never revalidated here; stale ids persist by design.
pub fn select_item(
    state: &AppState,
    item_id: Uuid,
    is_multi_select: bool,
    is_shift_select: bool,
) -> Result<CmdResult> {
    Ok(helpers::update(state, |next| {
        let Some(project) = next.current_project.as_ref() else {
            return false;
        };
        let Some(target_context) = helpers::item_context(project, item_id) else {
            return false;
        };

        if is_shift_select {
            if let Some(range) = shift_range(project, next.ui.anchor_item, item_id, target_context)
            {
                for id in range {
                    if !next.ui.selected_items.contains(&id) {
                        next.ui.selected_items.push(id);
                    }
                }
                return true;
            }
            // No usable anchor: plain single-select.
            next.ui.selected_items = vec![item_id];
            next.ui.anchor_item = Some(item_id);
            return true;
        }

        if is_multi_select {
            if let Some(pos) = next.ui.selected_items.iter().position(|&id| id == item_id) {
                next.ui.selected_items.remove(pos);
                if next.ui.anchor_item == Some(item_id) {
                    next.ui.anchor_item = next.ui.selected_items.first().copied();
                }
            } else {
                next.ui.selected_items.push(item_id);
                next.ui.anchor_item = Some(item_id);
            }
            return true;
        }

        next.ui.selected_items = vec![item_id];
        next.ui.anchor_item = Some(item_id);
        true
    }))
}

pub fn clear_selection(state: &AppState) -> Result<CmdResult> {
    if state.ui.selected_items.is_empty() && state.ui.anchor_item.is_none() {
        return Ok(CmdResult::unchanged());
    }
    Ok(helpers::update(state, |next| {
        next.ui.selected_items.clear();
        next.ui.anchor_item = None;
        true
    }))
}

/// The contiguous id range between anchor and target in display order, or
/// `None` when the anchor is absent, dead, or in a different list context.
fn shift_range(
    project: &crate::model::Project,
    anchor: Option<Uuid>,
    target_id: Uuid,
    target_context: ListContext,
) -> Option<Vec<Uuid>> {
    let anchor = anchor?;
    let anchor_context = helpers::item_context(project, anchor)?;
    if anchor_context != target_context {
        return None;
    }

    let ids = helpers::context_ids(project, target_context);
    let a = ids.iter().position(|&id| id == anchor)?;
    let b = ids.iter().position(|&id| id == target_id)?;
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    Some(ids[lo..=hi].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StateFixture;

    fn main_fixture() -> StateFixture {
        StateFixture::new()
            .with_list("Pool", &["a", "b", "c", "d"])
            .picked("Pool", "a")
            .picked("Pool", "b")
            .picked("Pool", "c")
            .picked("Pool", "d")
    }

    fn apply(state: &AppState, id: Uuid, multi: bool, shift: bool) -> AppState {
        select_item(state, id, multi, shift)
            .unwrap()
            .state
            .expect("selection should change state")
    }

    #[test]
    fn plain_click_replaces_selection_and_anchor() {
        let fx = main_fixture();
        let a = fx.main_id("a");
        let b = fx.main_id("b");

        let state = apply(&fx.state, a, false, false);
        let state = apply(&state, b, false, false);

        assert_eq!(state.ui.selected_items, vec![b]);
        assert_eq!(state.ui.anchor_item, Some(b));
    }

    #[test]
    fn shift_click_selects_the_range_from_the_anchor() {
        let fx = main_fixture();

        let state = apply(&fx.state, fx.main_id("a"), false, false);
        let state = apply(&state, fx.main_id("c"), false, true);

        assert_eq!(
            state.ui.selected_items,
            vec![fx.main_id("a"), fx.main_id("b"), fx.main_id("c")]
        );
        // The anchor stays where the range was pivoted from.
        assert_eq!(state.ui.anchor_item, Some(fx.main_id("a")));
    }

    #[test]
    fn shift_click_extends_rather_than_replaces() {
        let fx = main_fixture();
        let d = fx.main_id("d");

        // d is multi-selected first, then a range a..b is shift-added.
        let state = apply(&fx.state, d, true, false);
        let state = apply(&state, fx.main_id("a"), true, false);
        let state = apply(&state, fx.main_id("b"), false, true);

        assert!(state.ui.selected_items.contains(&d));
        assert!(state.ui.selected_items.contains(&fx.main_id("a")));
        assert!(state.ui.selected_items.contains(&fx.main_id("b")));
        assert_eq!(state.ui.selected_items.len(), 3);
    }

    #[test]
    fn shift_click_works_upward_from_the_anchor() {
        let fx = main_fixture();

        let state = apply(&fx.state, fx.main_id("c"), false, false);
        let state = apply(&state, fx.main_id("a"), false, true);

        assert_eq!(state.ui.selected_items.len(), 3);
        assert!(state.ui.selected_items.contains(&fx.main_id("b")));
    }

    #[test]
    fn cross_context_shift_falls_back_to_single_select() {
        let fx = StateFixture::new()
            .with_list("Pool", &["a", "b"])
            .with_list("Extras", &["x"])
            .picked("Pool", "a");

        // Anchor in the main list, shift-target in an input list.
        let state = apply(&fx.state, fx.main_id("a"), false, false);
        let x = fx.item_id("Extras", "x");
        let state = apply(&state, x, false, true);

        assert_eq!(state.ui.selected_items, vec![x]);
        assert_eq!(state.ui.anchor_item, Some(x));
    }

    #[test]
    fn ranges_never_span_two_input_lists() {
        let fx = StateFixture::new()
            .with_list("Pool", &["a", "b"])
            .with_list("Extras", &["x", "y"]);

        let a = fx.item_id("Pool", "a");
        let y = fx.item_id("Extras", "y");
        let state = apply(&fx.state, a, false, false);
        let state = apply(&state, y, false, true);

        assert_eq!(state.ui.selected_items, vec![y]);
    }

    #[test]
    fn shift_with_a_dead_anchor_falls_back_to_single_select() {
        let fx = main_fixture();
        let mut state = fx.state.clone();
        state.ui.anchor_item = Some(Uuid::new_v4());

        let state = apply(&state, fx.main_id("b"), false, true);
        assert_eq!(state.ui.selected_items, vec![fx.main_id("b")]);
        assert_eq!(state.ui.anchor_item, Some(fx.main_id("b")));
    }

    #[test]
    fn multi_toggle_off_the_anchor_promotes_the_first_survivor() {
        let fx = main_fixture();
        let a = fx.main_id("a");
        let b = fx.main_id("b");

        let state = apply(&fx.state, a, true, false);
        let state = apply(&state, b, true, false);
        assert_eq!(state.ui.anchor_item, Some(b));

        let state = apply(&state, b, true, false);
        assert_eq!(state.ui.selected_items, vec![a]);
        assert_eq!(state.ui.anchor_item, Some(a));
    }

    #[test]
    fn multi_toggle_off_a_non_anchor_leaves_the_anchor_alone() {
        let fx = main_fixture();
        let a = fx.main_id("a");
        let b = fx.main_id("b");

        let state = apply(&fx.state, a, true, false);
        let state = apply(&state, b, true, false);
        let state = apply(&state, a, true, false);

        assert_eq!(state.ui.selected_items, vec![b]);
        assert_eq!(state.ui.anchor_item, Some(b));
    }

    #[test]
    fn toggling_the_last_item_off_clears_the_anchor() {
        let fx = main_fixture();
        let a = fx.main_id("a");

        let state = apply(&fx.state, a, true, false);
        let state = apply(&state, a, true, false);

        assert!(state.ui.selected_items.is_empty());
        assert_eq!(state.ui.anchor_item, None);
    }

    #[test]
    fn selecting_an_unknown_id_is_a_noop() {
        let fx = main_fixture();
        let result = select_item(&fx.state, Uuid::new_v4(), false, false).unwrap();
        assert!(result.is_noop());
    }

    #[test]
    fn stale_ids_survive_unrelated_selection_changes() {
        let fx = main_fixture();
        let ghost = Uuid::new_v4();
        let mut state = fx.state.clone();
        state.ui.selected_items = vec![ghost];

        let state = apply(&state, fx.main_id("a"), true, false);
        assert!(state.ui.selected_items.contains(&ghost));
    }

    #[test]
    fn clear_selection_empties_everything() {
        let fx = main_fixture();
        let state = apply(&fx.state, fx.main_id("a"), false, false);

        let result = clear_selection(&state).unwrap();
        let next = result.state.unwrap();
        assert!(next.ui.selected_items.is_empty());
        assert_eq!(next.ui.anchor_item, None);

        // Clearing an empty selection is a no-op.
        assert!(clear_selection(&next).unwrap().is_noop());
    }
}
