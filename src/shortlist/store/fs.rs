use super::DataStore;
use crate::error::{Result, ShortlistError};
use crate::model::{ProjectArchive, ProjectSummary, Tag};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File-based project storage: `data.json` holds the summary index, each
/// project lives in its own `project-{uuid}.json`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn project_filename(id: &Uuid) -> String {
        format!("project-{}.json", id)
    }

    fn project_path(&self, id: &Uuid) -> PathBuf {
        self.root.join(Self::project_filename(id))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(ShortlistError::Io)?;
        }
        Ok(())
    }

    fn load_index(&self) -> Result<HashMap<Uuid, ProjectSummary>> {
        let index_file = self.root.join("data.json");
        if !index_file.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(index_file).map_err(ShortlistError::Io)?;
        let index: HashMap<Uuid, ProjectSummary> =
            serde_json::from_str(&content).map_err(ShortlistError::Serialization)?;
        Ok(index)
    }

    fn save_index(&self, index: &HashMap<Uuid, ProjectSummary>) -> Result<()> {
        let index_file = self.root.join("data.json");
        let content =
            serde_json::to_string_pretty(index).map_err(ShortlistError::Serialization)?;
        fs::write(index_file, content).map_err(ShortlistError::Io)?;
        Ok(())
    }
}

impl DataStore for FileStore {
    fn save_project(&mut self, archive: &ProjectArchive) -> Result<()> {
        self.ensure_dir()?;

        // 1. Update the summary index
        let mut index = self.load_index()?;
        index.insert(archive.project.id, archive.project.summary());
        self.save_index(&index)?;

        // 2. Write the project file
        let content =
            serde_json::to_string_pretty(archive).map_err(ShortlistError::Serialization)?;
        fs::write(self.project_path(&archive.project.id), content).map_err(ShortlistError::Io)?;

        Ok(())
    }

    fn get_project(&self, id: &Uuid) -> Result<ProjectArchive> {
        let path = self.project_path(id);
        if !path.exists() {
            return Err(ShortlistError::ProjectNotFound(*id));
        }
        let content = fs::read_to_string(path).map_err(ShortlistError::Io)?;
        let archive: ProjectArchive =
            serde_json::from_str(&content).map_err(ShortlistError::Serialization)?;
        Ok(archive)
    }

    fn list_projects(&self) -> Result<Vec<ProjectSummary>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let index = self.load_index()?;
        let mut summaries: Vec<ProjectSummary> = index.into_values().collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    fn delete_project(&mut self, id: &Uuid) -> Result<()> {
        let mut index = self.load_index()?;
        if index.remove(id).is_none() {
            return Err(ShortlistError::ProjectNotFound(*id));
        }
        self.save_index(&index)?;

        let path = self.project_path(id);
        if path.exists() {
            fs::remove_file(path).map_err(ShortlistError::Io)?;
        }
        Ok(())
    }

    fn save_tags(&mut self, tags: &[Tag]) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(tags).map_err(ShortlistError::Serialization)?;
        fs::write(self.root.join("tags.json"), content).map_err(ShortlistError::Io)?;
        Ok(())
    }

    fn load_tags(&self) -> Result<Vec<Tag>> {
        let path = self.root.join("tags.json");
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path).map_err(ShortlistError::Io)?;
        let tags: Vec<Tag> =
            serde_json::from_str(&content).map_err(ShortlistError::Serialization)?;
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Project;
    use tempfile::TempDir;

    fn archive(name: &str) -> ProjectArchive {
        ProjectArchive {
            project: Project::new(name.to_string()),
            tags: Vec::new(),
        }
    }

    #[test]
    fn round_trips_a_project_through_disk() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("store"));

        let a = archive("A");
        store.save_project(&a).unwrap();
        let loaded = store.get_project(&a.project.id).unwrap();

        assert_eq!(loaded, a);
    }

    #[test]
    fn listing_reads_only_the_index() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());

        let a = archive("A");
        store.save_project(&a).unwrap();
        // Corrupt the project file; the summary listing must not care.
        fs::write(store.project_path(&a.project.id), "not json").unwrap();

        let listed = store.list_projects().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "A");
    }

    #[test]
    fn empty_root_lists_nothing() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("missing"));
        assert!(store.list_projects().unwrap().is_empty());
    }

    #[test]
    fn tag_pool_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        assert!(store.load_tags().unwrap().is_empty());

        let tags = vec![crate::model::Tag::new("urgent".into(), "#d33".into())];
        store.save_tags(&tags).unwrap();
        assert_eq!(store.load_tags().unwrap(), tags);
    }

    #[test]
    fn delete_drops_index_entry_and_file() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());

        let a = archive("A");
        store.save_project(&a).unwrap();
        store.delete_project(&a.project.id).unwrap();

        assert!(!store.project_path(&a.project.id).exists());
        assert!(matches!(
            store.get_project(&a.project.id),
            Err(ShortlistError::ProjectNotFound(_))
        ));
    }
}
