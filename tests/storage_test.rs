//! Integration tests for the key-value project store.
//!
//! Tests run against an in-memory SQLite backend.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use loopbook::error::StorageError;
use loopbook::model::{
    Artifact, ArtifactKind, Decision, DecisionOrigin, ExplorationLoop, LoopSection, Phase, Profile,
    Project, RefSection,
};
use loopbook::storage::{DebouncedSaver, KeyValueStore, ProjectStore, SqliteKv, PROJECTS_KEY};

/// Create an in-memory store for testing
async fn create_test_store() -> (Arc<ProjectStore>, Arc<SqliteKv>) {
    let kv = Arc::new(
        SqliteKv::new_in_memory()
            .await
            .expect("Failed to create in-memory store"),
    );
    let store = Arc::new(ProjectStore::new(kv.clone()));
    (store, kv)
}

mod collection_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_all_empty_store() {
        let (store, _kv) = create_test_store().await;
        let projects = store.get_all().await.unwrap();
        assert!(projects.is_empty());
    }

    #[tokio::test]
    async fn test_create_project_scenario() {
        let (store, _kv) = create_test_store().await;
        let before = Utc::now();

        store
            .save(Project::new("Mobile App Redesign"))
            .await
            .unwrap();

        let projects = store.get_all().await.unwrap();
        assert_eq!(projects.len(), 1);
        let project = &projects[0];
        assert_eq!(project.title, "Mobile App Redesign");
        assert_eq!(project.phase, Phase::Framing);
        assert!(!project.id.is_empty());
        assert!(project.started_at >= before);
        assert!(project.started_at <= Utc::now());
    }

    #[tokio::test]
    async fn test_save_round_trip_preserves_fields() {
        let (store, _kv) = create_test_store().await;

        let mut project = Project::new("Round trip")
            .with_phase(Phase::Exploration)
            .with_description("desc");
        project.add_artifact(Artifact::new(ArtifactKind::Document, "file:///spec.pdf", "Spec"));
        let mut l = ExplorationLoop::new("How might we?");
        l.add_item(LoopSection::Explore, "an angle");
        l.attach_artifact(RefSection::Explore, project.artifacts[0].id.clone());
        project.add_loop(l);
        project.add_decision(Decision::new("go", DecisionOrigin::Project));

        let saved = store.save(project.clone()).await.unwrap();
        let fetched = store.get(&project.id).await.unwrap().unwrap();

        // The write refreshes updated_at; everything else round-trips.
        assert_eq!(fetched, saved);
        assert_eq!(fetched.title, project.title);
        assert_eq!(fetched.phase, project.phase);
        assert_eq!(fetched.artifacts, project.artifacts);
        assert_eq!(fetched.loops, project.loops);
        assert_eq!(fetched.decisions, project.decisions);
        assert_eq!(fetched.started_at, project.started_at);
        assert!(fetched.updated_at >= project.updated_at);
    }

    #[tokio::test]
    async fn test_get_nonexistent_project() {
        let (store, _kv) = create_test_store().await;
        let result = store.get("nonexistent-id").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_and_bumps_version() {
        let (store, _kv) = create_test_store().await;

        let saved = store.save(Project::new("before")).await.unwrap();
        assert_eq!(saved.version, 0);

        let mut edited = saved.clone();
        edited.title = "after".to_string();
        let updated = store.update(edited).await.unwrap();
        assert_eq!(updated.version, 1);

        let fetched = store.get(&saved.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "after");
        assert_eq!(fetched.version, 1);
        assert!(fetched.updated_at >= saved.updated_at);
    }

    #[tokio::test]
    async fn test_update_unknown_project_fails() {
        let (store, _kv) = create_test_store().await;

        let result = store.update(Project::new("never saved")).await;
        assert!(matches!(
            result,
            Err(StorageError::ProjectNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_rejects_stale_version() {
        let (store, _kv) = create_test_store().await;

        let saved = store.save(Project::new("contested")).await.unwrap();

        // First writer wins and bumps the version.
        let mut first = saved.clone();
        first.title = "first edit".to_string();
        store.update(first).await.unwrap();

        // Second writer still holds version 0 and must be rejected.
        let mut second = saved.clone();
        second.title = "second edit".to_string();
        let result = store.update(second).await;
        assert!(matches!(
            result,
            Err(StorageError::VersionConflict {
                expected: 1,
                found: 0,
                ..
            })
        ));

        let fetched = store.get(&saved.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "first edit");
    }

    #[tokio::test]
    async fn test_delete_project() {
        let (store, _kv) = create_test_store().await;

        let saved = store.save(Project::new("doomed")).await.unwrap();
        store.save(Project::new("survivor")).await.unwrap();

        store.delete(&saved.id).await.unwrap();

        let projects = store.get_all().await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].title, "survivor");
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() {
        let (store, _kv) = create_test_store().await;
        store.save(Project::new("kept")).await.unwrap();

        store.delete("missing").await.unwrap();

        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupted_collection_reads_as_empty() {
        let (store, kv) = create_test_store().await;

        kv.set(PROJECTS_KEY, "not json at all").await.unwrap();

        let projects = store.get_all().await.unwrap();
        assert!(projects.is_empty());
    }
}

mod preference_tests {
    use super::*;

    #[tokio::test]
    async fn test_profile_round_trip() {
        let (store, _kv) = create_test_store().await;

        assert!(store.profile().await.unwrap().is_none());

        let profile = Profile {
            name: Some("Ada".to_string()),
            contact: Some("ada@example.com".to_string()),
            business: Some("Studio Ada".to_string()),
        };
        store.set_profile(&profile).await.unwrap();

        let fetched = store.profile().await.unwrap().unwrap();
        assert_eq!(fetched, profile);
    }

    #[tokio::test]
    async fn test_currency_round_trip() {
        let (store, _kv) = create_test_store().await;

        assert!(store.currency().await.unwrap().is_none());

        store.set_currency("EUR").await.unwrap();
        assert_eq!(store.currency().await.unwrap().unwrap(), "EUR");

        store.set_currency("USD").await.unwrap();
        assert_eq!(store.currency().await.unwrap().unwrap(), "USD");
    }
}

mod saver_tests {
    use super::*;

    #[tokio::test]
    async fn test_debounced_saves_coalesce() {
        let (store, _kv) = create_test_store().await;
        let saved = store.save(Project::new("draft")).await.unwrap();

        let saver = DebouncedSaver::new(store.clone(), Duration::from_millis(50));

        let mut edit = saved.clone();
        edit.title = "draft v2".to_string();
        saver.queue(edit).await;

        let mut edit = saved.clone();
        edit.title = "draft v3".to_string();
        saver.queue(edit).await;

        tokio::time::sleep(Duration::from_millis(150)).await;

        let fetched = store.get(&saved.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "draft v3");
        // Both edits collapsed into a single write.
        assert_eq!(fetched.version, 1);
        assert!(!saver.has_pending().await);
    }

    #[tokio::test]
    async fn test_edits_spanning_debounce_windows_all_persist() {
        let (store, _kv) = create_test_store().await;
        let saved = store.save(Project::new("draft")).await.unwrap();

        let saver = DebouncedSaver::new(store.clone(), Duration::from_millis(50));

        // The caller keeps editing the same loaded copy across windows.
        let mut edit = saved.clone();
        edit.title = "first autosave".to_string();
        saver.queue(edit.clone()).await;

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(
            store.get(&saved.id).await.unwrap().unwrap().title,
            "first autosave"
        );

        // Still version 0 in the caller's copy; the saver rebases it.
        edit.title = "second autosave".to_string();
        saver.queue(edit).await;

        tokio::time::sleep(Duration::from_millis(150)).await;

        let fetched = store.get(&saved.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "second autosave");
        assert_eq!(fetched.version, 2);
    }

    #[tokio::test]
    async fn test_flush_persists_immediately() {
        let (store, _kv) = create_test_store().await;
        let saved = store.save(Project::new("draft")).await.unwrap();

        let saver = DebouncedSaver::new(store.clone(), Duration::from_secs(60));

        let mut edit = saved.clone();
        edit.title = "flushed".to_string();
        saver.queue(edit).await;

        let flushed = saver.flush().await.unwrap();
        assert_eq!(flushed.unwrap().title, "flushed");
        assert!(!saver.has_pending().await);

        let fetched = store.get(&saved.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "flushed");
        assert_eq!(fetched.version, 1);
    }

    #[tokio::test]
    async fn test_flush_with_nothing_pending() {
        let (store, _kv) = create_test_store().await;
        let saver = DebouncedSaver::new(store.clone(), Duration::from_millis(50));

        let flushed = saver.flush().await.unwrap();
        assert!(flushed.is_none());
    }
}
