//! Avatar and favicon uploads.
//!
//! An upload is stored at `<user_id>/<kind>-<random>.<ext>`, the profile is
//! pointed at its public URL, and the object it replaces is removed on a
//! best-effort basis (a failed removal is only logged).

use rand::distributions::Alphanumeric;
use rand::Rng;

use linkbio_core::prelude::*;
use linkbio_core::{MediaKind, Profile};

use crate::config::MediaSettings;
use crate::services::{ObjectStore, SettingsStore};

const SUFFIX_LEN: usize = 12;

/// An image file picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MediaUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// File extension for the stored object
    pub fn extension(&self) -> String {
        let from_name = std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()));
        if let Some(ext) = from_name {
            return ext.to_ascii_lowercase();
        }
        // "image/svg+xml" -> "svg"
        self.content_type
            .split_once('/')
            .map(|(_, sub)| sub.split(['+', ';']).next().unwrap_or(sub).trim())
            .filter(|sub| !sub.is_empty())
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| "bin".to_string())
    }
}

/// Size limit for one kind of media
pub fn max_bytes(kind: MediaKind, limits: &MediaSettings) -> u64 {
    match kind {
        MediaKind::Avatar => limits.max_avatar_bytes,
        MediaKind::Favicon => limits.max_favicon_bytes,
    }
}

pub fn validate_upload(upload: &MediaUpload, kind: MediaKind, limits: &MediaSettings) -> Result<()> {
    if !upload.content_type.trim().starts_with("image/") {
        return Err(Error::validation("Please choose an image file"));
    }
    if upload.bytes.is_empty() {
        return Err(Error::validation("The selected file is empty"));
    }
    let limit = max_bytes(kind, limits);
    if upload.bytes.len() as u64 > limit {
        return Err(Error::validation(format!(
            "The {kind} must be at most {} KB",
            limit / 1024
        )));
    }
    Ok(())
}

/// Object path for a new upload
pub fn object_path(user_id: &str, kind: MediaKind, upload: &MediaUpload) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{user_id}/{kind}-{suffix}.{}", upload.extension())
}

fn current_url(profile: &Profile, kind: MediaKind) -> Option<&str> {
    match kind {
        MediaKind::Avatar => profile.avatar_url.as_deref(),
        MediaKind::Favicon => profile.favicon_url.as_deref(),
    }
}

/// Upload a new avatar or favicon and point the profile at it.
///
/// Returns the new public URL. On any failure the profile is unchanged.
pub async fn replace_media<O, S>(
    objects: &O,
    store: &S,
    profile: &mut Profile,
    kind: MediaKind,
    upload: MediaUpload,
    limits: &MediaSettings,
) -> Result<String>
where
    O: ObjectStore + Sync,
    S: SettingsStore + Sync,
{
    validate_upload(&upload, kind, limits)?;

    let path = object_path(&profile.user_id, kind, &upload);
    let content_type = upload.content_type.clone();
    let stored = objects
        .upload(&path, upload.bytes, &content_type)
        .await
        .context(format!("Uploading {kind}"))?;
    let url = objects.public_url(&stored);

    if let Err(e) = store.update_profile_media(&profile.id, kind, &url).await {
        error!("Failed to record new {} for profile {}: {}", kind, profile.id, e);
        if let Err(cleanup) = objects.remove(std::slice::from_ref(&stored)).await {
            warn!("Failed to remove orphaned upload {}: {}", stored, cleanup);
        }
        return Err(e);
    }

    // Only objects living in our bucket can be removed
    let base = objects.public_url("");
    let previous = current_url(profile, kind)
        .and_then(|old| old.strip_prefix(base.as_str()))
        .filter(|old_path| !old_path.is_empty() && *old_path != stored)
        .map(str::to_string);
    if let Some(old_path) = previous {
        if let Err(e) = objects.remove(std::slice::from_ref(&old_path)).await {
            warn!("Failed to remove previous {} {}: {}", kind, old_path, e);
        }
    }

    match kind {
        MediaKind::Avatar => profile.avatar_url = Some(url.clone()),
        MediaKind::Favicon => profile.favicon_url = Some(url.clone()),
    }
    info!("Updated {} for profile {}", kind, profile.id);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{MemoryObjectStore, MemorySettingsStore};
    use linkbio_core::ProfileSettings;

    const BASE: &str = "https://cdn.test/profile-media";

    fn setup() -> (MemoryObjectStore, MemorySettingsStore, Profile) {
        let profile = Profile::new("p1", "u1", "ada");
        let store =
            MemorySettingsStore::new().with_profile(profile.clone(), ProfileSettings::default());
        (MemoryObjectStore::new(BASE), store, profile)
    }

    async fn replace(
        objects: &MemoryObjectStore,
        store: &MemorySettingsStore,
        profile: &mut Profile,
        kind: MediaKind,
        upload: MediaUpload,
    ) -> Result<String> {
        replace_media(objects, store, profile, kind, upload, &MediaSettings::default()).await
    }

    fn png(len: usize) -> MediaUpload {
        MediaUpload::new("Me.PNG", "image/png", vec![7; len])
    }

    #[test]
    fn test_extension() {
        assert_eq!(png(1).extension(), "png");
        assert_eq!(MediaUpload::new("icon", "image/svg+xml", vec![]).extension(), "svg");
        assert_eq!(MediaUpload::new("", "", vec![]).extension(), "bin");
    }

    #[test]
    fn test_object_path_shape() {
        let path = object_path("u1", MediaKind::Favicon, &png(1));
        let (dir, file) = path.split_once('/').unwrap();
        assert_eq!(dir, "u1");
        assert!(file.starts_with("favicon-"));
        assert!(file.ends_with(".png"));
        assert_eq!(file.len(), "favicon-".len() + SUFFIX_LEN + ".png".len());
    }

    #[test]
    fn test_validation() {
        let limits = MediaSettings::default();
        let text = MediaUpload::new("a.txt", "text/plain", vec![1]);
        assert!(validate_upload(&text, MediaKind::Avatar, &limits).unwrap_err().is_validation());

        let too_big = png(limits.max_favicon_bytes as usize + 1);
        assert!(validate_upload(&too_big, MediaKind::Favicon, &limits).is_err());
        assert!(validate_upload(&too_big, MediaKind::Avatar, &limits).is_ok());
    }

    #[tokio::test]
    async fn test_replace_removes_previous_object() {
        let (objects, store, mut profile) = setup();
        let first = replace(&objects, &store, &mut profile, MediaKind::Avatar, png(10))
            .await
            .unwrap();
        assert_eq!(profile.avatar_url.as_deref(), Some(first.as_str()));
        assert_eq!(objects.len().await, 1);

        let second = replace(&objects, &store, &mut profile, MediaKind::Avatar, png(20))
            .await
            .unwrap();
        assert_ne!(first, second);
        assert_eq!(objects.len().await, 1);
        assert_eq!(
            store.profile("p1").await.unwrap().avatar_url.as_deref(),
            Some(second.as_str())
        );
    }

    #[tokio::test]
    async fn test_external_previous_url_is_left_alone() {
        let (objects, store, mut profile) = setup();
        profile.favicon_url = Some("https://elsewhere.test/icon.png".into());

        replace(&objects, &store, &mut profile, MediaKind::Favicon, png(4))
            .await
            .unwrap();
        assert!(profile.favicon_url.unwrap().starts_with(BASE));
    }

    #[tokio::test]
    async fn test_failed_removal_is_not_an_error() {
        let (objects, store, mut profile) = setup();
        replace(&objects, &store, &mut profile, MediaKind::Avatar, png(1))
            .await
            .unwrap();

        objects.set_fail_remove(true);
        assert!(replace(&objects, &store, &mut profile, MediaKind::Avatar, png(2))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_failed_upload_leaves_profile() {
        let (objects, store, mut profile) = setup();
        objects.set_fail_upload(true);
        let before = profile.clone();

        let err = replace(&objects, &store, &mut profile, MediaKind::Avatar, png(1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Upload { .. }));
        assert_eq!(profile, before);
    }

    #[tokio::test]
    async fn test_failed_profile_update_removes_upload() {
        let (objects, store, mut profile) = setup();
        store.set_failing(true);

        assert!(replace(&objects, &store, &mut profile, MediaKind::Avatar, png(1))
            .await
            .is_err());
        assert_eq!(objects.len().await, 0);
        assert!(profile.avatar_url.is_none());
    }
}
