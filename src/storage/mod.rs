//! Storage layer for project persistence.
//!
//! Persistence is a key-value store: the whole project collection lives
//! under one namespaced key as a serialized array, loaded wholesale and
//! written back wholesale on every change. [`ProjectStore`] serializes its
//! read-modify-write sequences through a single writer lock and rejects
//! stale updates by version, so two in-flight edits cannot silently drop
//! each other's writes.

mod saver;
mod sqlite;

pub use saver::DebouncedSaver;
pub use sqlite::SqliteKv;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use crate::error::{StorageError, StorageResult};
use crate::model::{Profile, Project};

/// Key holding the serialized project collection.
pub const PROJECTS_KEY: &str = "loopbook.projects";
/// Key holding the personal-info record.
pub const PROFILE_KEY: &str = "loopbook.profile";
/// Key holding the currency-preference code.
pub const CURRENCY_KEY: &str = "loopbook.currency";

/// Abstract key-value persistence service.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under a key.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Write a value under a key, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    /// Remove a key and its value.
    async fn remove(&self, key: &str) -> StorageResult<()>;
    /// Remove every key.
    async fn clear(&self) -> StorageResult<()>;
}

/// Project collection store over a key-value backend.
///
/// Constructed explicitly and passed to call sites; there is no process-wide
/// store handle.
pub struct ProjectStore {
    kv: Arc<dyn KeyValueStore>,
    // Serializes every read-modify-write of the collection.
    write_lock: Mutex<()>,
}

impl ProjectStore {
    /// Create a store over the given key-value backend.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            write_lock: Mutex::new(()),
        }
    }

    /// Load the whole project collection.
    ///
    /// An absent key yields an empty list. A parse failure also yields an
    /// empty list; the failure is logged, not surfaced.
    pub async fn get_all(&self) -> StorageResult<Vec<Project>> {
        let raw = match self.kv.get(PROJECTS_KEY).await? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };
        match serde_json::from_str(&raw) {
            Ok(projects) => Ok(projects),
            Err(e) => {
                warn!(error = %e, key = PROJECTS_KEY, "Failed to parse stored projects, returning empty collection");
                Ok(Vec::new())
            }
        }
    }

    /// Look up one project by id.
    pub async fn get(&self, id: &str) -> StorageResult<Option<Project>> {
        Ok(self.get_all().await?.into_iter().find(|p| p.id == id))
    }

    /// Append a new project and write the collection back. Returns the
    /// project as persisted, with `updated_at` refreshed by the write.
    pub async fn save(&self, mut project: Project) -> StorageResult<Project> {
        let _guard = self.write_lock.lock().await;
        let mut projects = self.get_all().await?;
        project.touch();
        projects.push(project.clone());
        self.write_all(&projects).await?;
        Ok(project)
    }

    /// Replace the project matching `project.id` and write the collection
    /// back.
    ///
    /// Fails with [`StorageError::ProjectNotFound`] when the id is absent and
    /// with [`StorageError::VersionConflict`] when the stored version differs
    /// from the incoming one. On success the version is bumped and
    /// `updated_at` refreshed; the returned project carries both.
    pub async fn update(&self, mut project: Project) -> StorageResult<Project> {
        let _guard = self.write_lock.lock().await;
        let mut projects = self.get_all().await?;
        let slot = projects
            .iter_mut()
            .find(|p| p.id == project.id)
            .ok_or_else(|| StorageError::ProjectNotFound {
                project_id: project.id.clone(),
            })?;
        if slot.version != project.version {
            return Err(StorageError::VersionConflict {
                project_id: project.id.clone(),
                expected: slot.version,
                found: project.version,
            });
        }
        project.version += 1;
        project.touch();
        *slot = project.clone();
        self.write_all(&projects).await?;
        Ok(project)
    }

    /// Remove a project by id and write the collection back. Deleting an
    /// unknown id is a no-op.
    pub async fn delete(&self, id: &str) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut projects = self.get_all().await?;
        projects.retain(|p| p.id != id);
        self.write_all(&projects).await
    }

    /// Load the personal-info record, if one has been saved.
    pub async fn profile(&self) -> StorageResult<Option<Profile>> {
        let raw = match self.kv.get(PROFILE_KEY).await? {
            Some(raw) => raw,
            None => return Ok(None),
        };
        match serde_json::from_str(&raw) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                warn!(error = %e, key = PROFILE_KEY, "Failed to parse stored profile");
                Ok(None)
            }
        }
    }

    /// Save the personal-info record.
    pub async fn set_profile(&self, profile: &Profile) -> StorageResult<()> {
        let raw = serde_json::to_string(profile)?;
        self.kv.set(PROFILE_KEY, &raw).await
    }

    /// Load the currency-preference code, if one has been saved.
    pub async fn currency(&self) -> StorageResult<Option<String>> {
        self.kv.get(CURRENCY_KEY).await
    }

    /// Save the currency-preference code.
    pub async fn set_currency(&self, code: &str) -> StorageResult<()> {
        self.kv.set(CURRENCY_KEY, code).await
    }

    async fn write_all(&self, projects: &[Project]) -> StorageResult<()> {
        let raw = serde_json::to_string(projects)?;
        self.kv.set(PROJECTS_KEY, &raw).await
    }
}
