use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reusable label in the process-wide tag pool.
///
/// `usage_count` is derived-but-stored: the number of item records currently
/// carrying this tag, where an item present in both an input list and the
/// main list counts as two records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub usage_count: u32,
}

impl Tag {
    pub fn new(name: String, color: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            color,
            created_at: Utc::now(),
            usage_count: 0,
        }
    }
}

/// A candidate item sitting in an input list. `is_used` flips to true once
/// the item has been picked into the main list; the record itself stays put.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputListItem {
    pub id: Uuid,
    pub content: String,
    pub is_used: bool,
    pub tags: Vec<Uuid>,
}

impl InputListItem {
    pub fn new(content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            is_used: false,
            tags: Vec::new(),
        }
    }
}

/// A named staging collection of candidate items, ordered by insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputList {
    pub id: Uuid,
    pub name: String,
    pub items: Vec<InputListItem>,
}

impl InputList {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            items: Vec::new(),
        }
    }
}

/// An entry in the ranked main list.
///
/// `id` equals the id of the input item it was picked from — two records,
/// one logical key. `order` is a dense 1-based rank across the main list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainListItem {
    pub id: Uuid,
    pub content: String,
    pub source_list_id: Uuid,
    pub tags: Vec<Uuid>,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub input_lists: Vec<InputList>,
    pub main_list: Vec<MainListItem>,
}

impl Project {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: now,
            updated_at: now,
            input_lists: Vec::new(),
            main_list: Vec::new(),
        }
    }

    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            id: self.id,
            name: self.name.clone(),
            updated_at: self.updated_at,
            main_count: self.main_list.len(),
        }
    }
}

/// What the store keeps per saved project so listing doesn't require
/// reading every project file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: Uuid,
    pub name: String,
    pub updated_at: DateTime<Utc>,
    pub main_count: usize,
}

/// The persisted/exported shape: a project plus the subset of the tag pool
/// its items reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectArchive {
    pub project: Project,
    pub tags: Vec<Tag>,
}

/// Selection state. `selected_items` is an unordered set of item ids valid
/// in either the main list or an input list; ids are not pruned when items
/// are deleted elsewhere. `anchor_item` is the pivot for shift-range
/// selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiState {
    pub selected_items: Vec<Uuid>,
    pub active_input_list: Option<Uuid>,
    pub anchor_item: Option<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub current_project: Option<Project>,
    pub saved_projects: Vec<ProjectSummary>,
    pub tag_pool: Vec<Tag>,
    pub ui: UiState,
}
