use super::DataStore;
use crate::error::{Result, ShortlistError};
use crate::model::{ProjectArchive, ProjectSummary, Tag};
use std::collections::HashMap;
use uuid::Uuid;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    projects: HashMap<Uuid, ProjectArchive>,
    tags: Vec<Tag>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataStore for InMemoryStore {
    fn save_project(&mut self, archive: &ProjectArchive) -> Result<()> {
        self.projects.insert(archive.project.id, archive.clone());
        Ok(())
    }

    fn get_project(&self, id: &Uuid) -> Result<ProjectArchive> {
        self.projects
            .get(id)
            .cloned()
            .ok_or(ShortlistError::ProjectNotFound(*id))
    }

    fn list_projects(&self) -> Result<Vec<ProjectSummary>> {
        let mut summaries: Vec<ProjectSummary> = self
            .projects
            .values()
            .map(|a| a.project.summary())
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    fn delete_project(&mut self, id: &Uuid) -> Result<()> {
        if self.projects.remove(id).is_none() {
            return Err(ShortlistError::ProjectNotFound(*id));
        }
        Ok(())
    }

    fn save_tags(&mut self, tags: &[Tag]) -> Result<()> {
        self.tags = tags.to_vec();
        Ok(())
    }

    fn load_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.tags.clone())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::model::AppState;
    use crate::reducer::{movement, project, tags};
    use uuid::Uuid;

    /// Builds `AppState` values by running the real reducer operations, so
    /// fixture states can only be states the reducer itself produces.
    pub struct StateFixture {
        pub state: AppState,
    }

    impl Default for StateFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StateFixture {
        pub fn new() -> Self {
            let state = project::create(&AppState::default(), "Test Project")
                .unwrap()
                .state
                .unwrap();
            Self { state }
        }

        pub fn with_list(mut self, name: &str, contents: &[&str]) -> Self {
            self.state = project::add_input_list(&self.state, name)
                .unwrap()
                .state
                .unwrap();
            if !contents.is_empty() {
                let list_id = self.list_id(name);
                let contents: Vec<String> = contents.iter().map(|c| c.to_string()).collect();
                self.state = project::add_items(&self.state, list_id, &contents)
                    .unwrap()
                    .state
                    .unwrap();
            }
            self
        }

        pub fn with_tag(mut self, name: &str) -> Self {
            self.state = tags::create(&self.state, name, "#4f8ef7")
                .unwrap()
                .state
                .unwrap();
            self
        }

        /// Applies a tag to items looked up by content across input lists.
        /// Picked items get both records tagged, like the real operation.
        pub fn tagged(mut self, tag: &str, contents: &[&str]) -> Self {
            let tag_id = self.tag_id(tag);
            let ids: Vec<Uuid> = contents.iter().map(|c| self.input_id(c)).collect();
            self.state = tags::add(&self.state, &ids, tag_id).unwrap().state.unwrap();
            self
        }

        /// Moves an item into the main list (appended at the end).
        pub fn picked(mut self, list: &str, content: &str) -> Self {
            let list_id = self.list_id(list);
            let item_id = self.item_id(list, content);
            self.state = movement::move_to_main_list(&self.state, list_id, item_id, None)
                .unwrap()
                .state
                .unwrap();
            self
        }

        pub fn list_id(&self, name: &str) -> Uuid {
            self.project()
                .input_lists
                .iter()
                .find(|l| l.name == name)
                .map(|l| l.id)
                .expect("fixture list should exist")
        }

        pub fn item_id(&self, list: &str, content: &str) -> Uuid {
            self.project()
                .input_lists
                .iter()
                .find(|l| l.name == list)
                .and_then(|l| l.items.iter().find(|i| i.content == content))
                .map(|i| i.id)
                .expect("fixture item should exist")
        }

        pub fn main_id(&self, content: &str) -> Uuid {
            self.project()
                .main_list
                .iter()
                .find(|i| i.content == content)
                .map(|i| i.id)
                .expect("fixture main item should exist")
        }

        pub fn tag_id(&self, name: &str) -> Uuid {
            self.state
                .tag_pool
                .iter()
                .find(|t| t.name == name)
                .map(|t| t.id)
                .expect("fixture tag should exist")
        }

        fn input_id(&self, content: &str) -> Uuid {
            self.project()
                .input_lists
                .iter()
                .flat_map(|l| l.items.iter())
                .find(|i| i.content == content)
                .map(|i| i.id)
                .expect("fixture item should exist")
        }

        fn project(&self) -> &crate::model::Project {
            self.state
                .current_project
                .as_ref()
                .expect("fixture should have a project")
        }
    }
}
