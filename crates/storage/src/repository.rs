//! Snapshot persistence and export on top of a key-value store.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use contour_core::Snapshot;
use tokio::fs;
use tracing::info;

use super::{KeyValueStore, Result};

/// Key the application state is stored under.
pub const STATE_KEY: &str = "lifeContourData";

/// Saves and loads the full application state.
///
/// Loading returns the raw bytes: merging them onto the initial state is the
/// engine's job.
pub struct SnapshotRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SnapshotRepository<S> {
    /// Create a repository using [`STATE_KEY`].
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: STATE_KEY.to_string(),
        }
    }

    /// Use a different key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Previously saved state, or `None` on first run.
    pub async fn load_raw(&self) -> Result<Option<Vec<u8>>> {
        self.store.get(&self.key).await
    }

    /// Replace the saved state with `snapshot`.
    pub async fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        let bytes = snapshot.to_json_bytes()?;
        self.store.set(&self.key, &bytes).await
    }
}

/// Name of the export document for `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("contour-life-{}.json", date.format("%Y-%m-%d"))
}

/// Write `snapshot` as indented JSON into `dir`, returning the file path.
pub async fn export_snapshot(dir: &Path, snapshot: &Snapshot, date: NaiveDate) -> Result<PathBuf> {
    fs::create_dir_all(dir).await?;
    let path = dir.join(export_file_name(date));
    fs::write(&path, snapshot.to_json_pretty()?.as_bytes()).await?;
    info!(path = %path.display(), tasks = snapshot.tasks.len(), "Exported state");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{JsonFileStore, MemoryStore};
    use contour_core::{SphereId, Task, TaskId};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }

    fn sample() -> Snapshot {
        let mut snapshot = Snapshot::initial();
        snapshot
            .tasks
            .push(Task::new(TaskId::new(1), "Stretch", SphereId::Health, date()));
        snapshot.last_task_id = TaskId::new(1);
        snapshot
    }

    #[tokio::test]
    async fn test_first_run_has_no_state() {
        let repo = SnapshotRepository::new(MemoryStore::new());
        assert!(repo.load_raw().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_uses_state_key() {
        let store = MemoryStore::new();
        let mut repo = SnapshotRepository::new(store.clone());

        repo.save(&sample()).await.unwrap();

        let raw = store.get(STATE_KEY).await.unwrap().unwrap();
        let decoded: Snapshot = serde_json::from_slice(&raw).unwrap();
        assert_eq!(decoded, sample());
    }

    #[tokio::test]
    async fn test_file_backed_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).await.unwrap();
        let mut repo = SnapshotRepository::new(store).with_key("profile");

        repo.save(&sample()).await.unwrap();

        let raw = repo.load_raw().await.unwrap().unwrap();
        let decoded: Snapshot = serde_json::from_slice(&raw).unwrap();
        assert_eq!(decoded, sample());
        assert!(dir.path().join("profile.json").exists());
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(date()), "contour-life-2024-02-29.json");
    }

    #[tokio::test]
    async fn test_export_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();

        let path = export_snapshot(dir.path(), &sample(), date()).await.unwrap();

        assert_eq!(path, dir.path().join("contour-life-2024-02-29.json"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains('\n'));
        assert!(text.contains("\"lastTaskId\": 1"));
        let decoded: Snapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, sample());
    }
}
