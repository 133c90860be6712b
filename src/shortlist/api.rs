//! # API Facade
//!
//! `ShortlistApi` is the single entry point for hosts (the CLI, tests, any
//! future UI). It owns the one [`AppState`] value, dispatches to the pure
//! reducer functions, and commits the transitions they return — a no-op
//! result leaves the held state untouched, which is exactly the
//! reference-identity contract the reducer promises.
//!
//! The facade is also where reducer and store meet: saving, reopening and
//! deleting projects goes through the injected [`DataStore`], so the same
//! api runs against the filesystem in production and `InMemoryStore` in
//! tests. No business logic lives here and nothing here writes to stdout.

use crate::error::Result;
use crate::model::{AppState, ProjectArchive, ProjectSummary};
use crate::reducer::{self, movement, project, reorder, selection, tags};
use crate::reducer::{CmdMessage, CmdResult, DragSource, DropTarget};
use crate::store::DataStore;
use uuid::Uuid;

pub struct ShortlistApi<S: DataStore> {
    store: S,
    state: AppState,
}

impl<S: DataStore> ShortlistApi<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: AppState::default(),
        }
    }

    pub fn with_state(store: S, state: AppState) -> Self {
        Self { store, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    // --- Project lifecycle ---

    pub fn create_project(&mut self, name: &str) -> Result<CmdResult> {
        let result = project::create(&self.state, name)?;
        Ok(self.commit(result))
    }

    pub fn add_input_list(&mut self, name: &str) -> Result<CmdResult> {
        let result = project::add_input_list(&self.state, name)?;
        Ok(self.commit(result))
    }

    pub fn delete_input_list(&mut self, list_id: Uuid) -> Result<CmdResult> {
        let result = project::delete_input_list(&self.state, list_id)?;
        Ok(self.commit(result))
    }

    pub fn add_items(&mut self, list_id: Uuid, contents: &[String]) -> Result<CmdResult> {
        let result = project::add_items(&self.state, list_id, contents)?;
        Ok(self.commit(result))
    }

    pub fn delete_item(&mut self, list_id: Uuid, item_id: Uuid) -> Result<CmdResult> {
        let result = project::delete_item(&self.state, list_id, item_id)?;
        Ok(self.commit(result))
    }

    pub fn set_active_input_list(&mut self, list_id: Option<Uuid>) -> Result<CmdResult> {
        let result = project::set_active_input_list(&self.state, list_id)?;
        Ok(self.commit(result))
    }

    // --- Item movement & reordering ---

    pub fn pick_item(
        &mut self,
        source_list_id: Uuid,
        item_id: Uuid,
        position: Option<u32>,
    ) -> Result<CmdResult> {
        let result = movement::move_to_main_list(&self.state, source_list_id, item_id, position)?;
        Ok(self.commit(result))
    }

    pub fn drop_item(&mut self, item_id: Uuid) -> Result<CmdResult> {
        let result = movement::remove_from_main_list(&self.state, item_id)?;
        Ok(self.commit(result))
    }

    pub fn reorder_single(&mut self, item_id: Uuid, new_position: u32) -> Result<CmdResult> {
        let result = reorder::reorder_single(&self.state, item_id, new_position)?;
        Ok(self.commit(result))
    }

    pub fn reorder_multiple(
        &mut self,
        selected_ids: &[Uuid],
        new_position: u32,
    ) -> Result<CmdResult> {
        let result = reorder::reorder_multiple(&self.state, selected_ids, new_position)?;
        Ok(self.commit(result))
    }

    pub fn apply_drop(&mut self, source: DragSource, target: DropTarget) -> Result<CmdResult> {
        let result = reducer::apply_drop(&self.state, source, target)?;
        Ok(self.commit(result))
    }

    // --- Selection ---

    pub fn select_item(
        &mut self,
        item_id: Uuid,
        is_multi_select: bool,
        is_shift_select: bool,
    ) -> Result<CmdResult> {
        let result = selection::select_item(&self.state, item_id, is_multi_select, is_shift_select)?;
        Ok(self.commit(result))
    }

    pub fn clear_selection(&mut self) -> Result<CmdResult> {
        let result = selection::clear_selection(&self.state)?;
        Ok(self.commit(result))
    }

    // --- Tags ---

    pub fn create_tag(&mut self, name: &str, color: &str) -> Result<CmdResult> {
        let result = tags::create(&self.state, name, color)?;
        Ok(self.commit(result))
    }

    pub fn edit_tag(&mut self, tag_id: Uuid, name: &str, color: &str) -> Result<CmdResult> {
        let result = tags::edit(&self.state, tag_id, name, color)?;
        Ok(self.commit(result))
    }

    pub fn delete_tag(&mut self, tag_id: Uuid) -> Result<CmdResult> {
        let result = tags::delete(&self.state, tag_id)?;
        Ok(self.commit(result))
    }

    pub fn tag_items(&mut self, item_ids: &[Uuid], tag_id: Uuid) -> Result<CmdResult> {
        let result = tags::add(&self.state, item_ids, tag_id)?;
        Ok(self.commit(result))
    }

    pub fn untag_items(&mut self, item_ids: &[Uuid], tag_id: Uuid) -> Result<CmdResult> {
        let result = tags::remove(&self.state, item_ids, tag_id)?;
        Ok(self.commit(result))
    }

    // --- Store bridging ---

    /// Persists the current project and refreshes the saved-project
    /// summaries in state.
    pub fn save_current(&mut self) -> Result<CmdResult> {
        let archive = project::export_archive(&self.state)?;
        let name = archive.project.name.clone();
        self.store.save_project(&archive)?;

        let mut next = self.state.clone();
        next.saved_projects = self.store.list_projects()?;
        let result = CmdResult::changed(next)
            .with_message(CmdMessage::success(format!("Project saved: {}", name)));
        Ok(self.commit(result))
    }

    /// Reopens a saved project as the current one (ids kept, selection
    /// reset, tag usage recounted).
    pub fn open_project(&mut self, id: Uuid) -> Result<CmdResult> {
        let archive = self.store.get_project(&id)?;
        let name = archive.project.name.clone();
        let mut result = project::activate_archive(&self.state, &archive)?;
        if let Some(next) = result.state.as_mut() {
            next.saved_projects = self.store.list_projects()?;
        }
        let result = result.with_message(CmdMessage::info(format!("Opened project: {}", name)));
        Ok(self.commit(result))
    }

    /// Refreshes and returns the saved-project summaries.
    pub fn list_saved(&mut self) -> Result<Vec<ProjectSummary>> {
        let summaries = self.store.list_projects()?;
        if self.state.saved_projects != summaries {
            self.state.saved_projects = summaries.clone();
        }
        Ok(summaries)
    }

    pub fn delete_saved(&mut self, id: Uuid) -> Result<CmdResult> {
        self.store.delete_project(&id)?;
        let mut next = self.state.clone();
        next.saved_projects = self.store.list_projects()?;
        let result =
            CmdResult::changed(next).with_message(CmdMessage::success("Project deleted"));
        Ok(self.commit(result))
    }

    /// Restores the persisted tag pool into state, keeping any tags the
    /// session already created. Meant for host startup, before a project
    /// is opened (opening recounts usage).
    pub fn load_tag_pool(&mut self) -> Result<()> {
        let stored = self.store.load_tags()?;
        for tag in stored {
            if !self.state.tag_pool.iter().any(|t| t.id == tag.id) {
                self.state.tag_pool.push(tag);
            }
        }
        Ok(())
    }

    pub fn persist_tag_pool(&mut self) -> Result<()> {
        self.store.save_tags(&self.state.tag_pool)
    }

    // --- Archive import/export ---

    pub fn export_archive(&self) -> Result<ProjectArchive> {
        project::export_archive(&self.state)
    }

    pub fn import_archive(&mut self, archive: &ProjectArchive) -> Result<CmdResult> {
        let result = project::import_archive(&self.state, archive)?;
        Ok(self.commit(result))
    }

    fn commit(&mut self, mut result: CmdResult) -> CmdResult {
        if let Some(next) = result.state.take() {
            self.state = next;
            result.committed = true;
        }
        result
    }
}
