use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tokio::{fs, io::AsyncWriteExt};
use uuid::Uuid;

use crate::{
    db::profile_store::{parse_profile, storage_key, ProfileStore},
    error::{AppError, AppResult},
    models::UserProfile,
};

/// Stores one pretty-printed JSON document per user under a directory
///
/// Writes go to a temporary sibling file that is fsynced and then renamed over the
/// target, so readers never observe a half-written profile.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    dir: PathBuf,
}

impl FileProfileStore {
    /// Creates the store, creating `dir` if it does not exist yet
    pub async fn new(dir: impl Into<PathBuf>) -> AppResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| storage_error("create profile directory", &dir, e))?;

        tracing::info!(dir = %dir.display(), "Using file profile store");

        Ok(Self { dir })
    }

    fn path_for(&self, name: &str) -> AppResult<PathBuf> {
        Ok(self.dir.join(format!("{}.json", storage_key(name)?)))
    }

    async fn write_atomic(&self, path: &Path, contents: &[u8]) -> std::io::Result<()> {
        let tmp_path = self.dir.join(format!(".tmp-{}", Uuid::new_v4()));

        let result: std::io::Result<()> = async {
            let mut file = fs::File::create(&tmp_path).await?;
            file.write_all(contents).await?;
            file.sync_all().await?;
            drop(file);
            fs::rename(&tmp_path, path).await
        }
        .await;

        if result.is_err() {
            let _ = fs::remove_file(&tmp_path).await;
        }

        result
    }
}

fn storage_error(action: &str, path: &Path, err: std::io::Error) -> AppError {
    AppError::Storage(format!("failed to {} {}: {}", action, path.display(), err))
}

#[async_trait::async_trait]
impl ProfileStore for FileProfileStore {
    async fn load(&self, name: &str) -> AppResult<UserProfile> {
        let path = self.path_for(name)?;

        match fs::read(&path).await {
            Ok(bytes) => {
                let profile = parse_profile(name, &bytes)?;
                tracing::debug!(
                    user = %name,
                    emotions = profile.emotional_states().len(),
                    shown = profile.shown_items().len(),
                    "Loaded profile"
                );
                Ok(profile)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(user = %name, "No stored profile, starting fresh");
                Ok(UserProfile::new(name))
            }
            Err(e) => Err(storage_error("read", &path, e)),
        }
    }

    async fn save(&self, profile: &UserProfile) -> AppResult<()> {
        let path = self.path_for(profile.name())?;
        let json = serde_json::to_vec_pretty(profile)
            .map_err(|e| AppError::Internal(format!("Profile serialization error: {}", e)))?;

        self.write_atomic(&path, &json)
            .await
            .map_err(|e| storage_error("write", &path, e))?;

        tracing::debug!(user = %profile.name(), path = %path.display(), "Saved profile");
        Ok(())
    }

    async fn exists(&self, name: &str) -> AppResult<bool> {
        let path = self.path_for(name)?;
        fs::try_exists(&path)
            .await
            .map_err(|e| storage_error("stat", &path, e))
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Emotion, ShownItem};

    async fn test_store() -> (tempfile::TempDir, FileProfileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProfileStore::new(dir.path().join("profiles")).await.unwrap();
        (dir, store)
    }

    fn sample_profile() -> UserProfile {
        let mut profile = UserProfile::new("alice");
        profile.record_emotion(Emotion::Happy);
        profile.record_gratitude("sunny weather");
        profile.record_shown(ShownItem {
            emotion: Emotion::Happy,
            title: "Never Give Up".to_string(),
            reference_url: "https://www.youtube.com/watch?v=abc".to_string(),
        });
        profile
    }

    #[tokio::test]
    async fn test_load_missing_returns_fresh_profile_without_saving() {
        let (_dir, store) = test_store().await;

        let profile = store.load("alice").await.unwrap();
        assert_eq!(profile, UserProfile::new("alice"));
        assert!(!store.exists("alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let (_dir, store) = test_store().await;
        let profile = sample_profile();

        store.save(&profile).await.unwrap();

        assert!(store.exists("alice").await.unwrap());
        assert_eq!(store.load("alice").await.unwrap(), profile);
    }

    #[tokio::test]
    async fn test_resave_is_byte_identical() {
        let (_dir, store) = test_store().await;
        store.save(&sample_profile()).await.unwrap();
        let path = store.path_for("alice").unwrap();
        let first = std::fs::read(&path).unwrap();

        let loaded = store.load("alice").await.unwrap();
        store.save(&loaded).await.unwrap();
        let second = std::fs::read(&path).unwrap();

        let reloaded = store.load("alice").await.unwrap();
        store.save(&reloaded).await.unwrap();
        let third = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[tokio::test]
    async fn test_malformed_record_is_corrupt_and_left_alone() {
        let (_dir, store) = test_store().await;
        let path = store.path_for("alice").unwrap();
        std::fs::write(&path, b"{ not json").unwrap();

        let err = store.load("alice").await.unwrap_err();
        assert!(matches!(err, AppError::CorruptProfile { ref name, .. } if name == "alice"));
        assert_eq!(std::fs::read(&path).unwrap(), b"{ not json");
    }

    #[tokio::test]
    async fn test_unknown_emotion_label_is_corrupt() {
        let (_dir, store) = test_store().await;
        let path = store.path_for("alice").unwrap();
        std::fs::write(
            &path,
            br#"{"name":"alice","emotionalStates":["ecstatic"],"gratitudeEntries":[],"shownItems":[]}"#,
        )
        .unwrap();

        let err = store.load("alice").await.unwrap_err();
        assert!(matches!(err, AppError::CorruptProfile { .. }));
    }

    #[tokio::test]
    async fn test_hostile_name_stays_inside_directory() {
        let (dir, store) = test_store().await;
        let profile = UserProfile::new("../escape");

        store.save(&profile).await.unwrap();

        assert!(!dir.path().join("escape.json").exists());
        assert_eq!(store.load("../escape").await.unwrap(), profile);
    }

    #[tokio::test]
    async fn test_save_leaves_no_temp_files() {
        let (dir, store) = test_store().await;
        store.save(&sample_profile()).await.unwrap();
        store.save(&sample_profile()).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path().join("profiles"))
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(entries, vec!["alice.json".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let (_dir, store) = test_store().await;
        assert!(matches!(
            store.load("").await,
            Err(AppError::Validation(_))
        ));
    }
}
