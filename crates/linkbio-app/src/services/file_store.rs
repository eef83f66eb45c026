//! File-backed settings store: one JSON document per profile.
//!
//! `<root>/<profile_id>.json` holds `{"profile": {...}, "settings": {...}}`.
//! A bare settings object (no `settings` key) is also accepted on read, so a
//! plain exported settings record can be rendered or edited directly.
//! Reads take a shared `fs2` lock. Updates hold an exclusive one across the
//! whole read, change and write, so concurrent updates never drop each other.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use linkbio_core::prelude::*;
use linkbio_core::{AppearanceUpdate, Link, MediaKind, Profile, ProfileSettings};
use serde::Serialize;

use super::SettingsStore;

const DOCUMENT_EXTENSION: &str = "json";

/// Owner of documents that carry no profile record
pub const LOCAL_OWNER_ID: &str = "local";

/// A profile record together with its settings
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    pub settings: ProfileSettings,
}

impl ProfileDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let wrapped = value
            .as_object()
            .is_some_and(|obj| obj.contains_key("settings"));

        if !wrapped {
            let mut settings: ProfileSettings = serde_json::from_value(value)?;
            settings.normalize();
            return Ok(Self {
                profile: None,
                settings,
            });
        }

        let mut obj = match value {
            serde_json::Value::Object(obj) => obj,
            _ => return Err(Error::validation("Profile document must be an object")),
        };
        let profile = match obj.remove("profile") {
            Some(serde_json::Value::Null) | None => None,
            Some(v) => Some(serde_json::from_value(v)?),
        };
        let mut settings: ProfileSettings = match obj.remove("settings") {
            Some(serde_json::Value::Null) | None => ProfileSettings::default(),
            Some(v) => serde_json::from_value(v)?,
        };
        settings.normalize();
        Ok(Self { profile, settings })
    }

    /// The stored profile, or a local one named after the document
    pub fn profile_or_local(&self, profile_id: &str) -> Profile {
        self.profile
            .clone()
            .unwrap_or_else(|| Profile::new(profile_id, LOCAL_OWNER_ID, profile_id))
    }
}

/// Settings store over a directory of profile documents
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    root: PathBuf,
}

impl FileSettingsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at a document's directory, plus the profile id the
    /// document is stored under (its file stem).
    pub fn for_document(path: &Path) -> Result<(Self, String)> {
        let profile_id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::validation(format!("Not a profile document: {}", path.display())))?
            .to_string();
        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok((Self::new(root), profile_id))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn document_path(&self, profile_id: &str) -> Result<PathBuf> {
        if profile_id.is_empty() || profile_id.contains(['/', '\\']) || profile_id.starts_with('.')
        {
            return Err(Error::not_found(format!("Profile {profile_id:?}")));
        }
        Ok(self
            .root
            .join(format!("{profile_id}.{DOCUMENT_EXTENSION}")))
    }

    pub fn read_document(&self, profile_id: &str) -> Result<ProfileDocument> {
        let path = self.document_path(profile_id)?;
        read_locked(&path)
    }

    pub fn write_document(&self, profile_id: &str, document: &ProfileDocument) -> Result<()> {
        let path = self.document_path(profile_id)?;
        let mut file = self.open_exclusive(&path)?;
        write_locked(&mut file, &path, document)?;
        debug!("Wrote profile document {:?}", path);
        Ok(())
    }

    /// Read-modify-write a document under one exclusive lock. A missing or
    /// empty document starts from defaults.
    fn modify(&self, profile_id: &str, f: impl FnOnce(&mut ProfileDocument) -> Result<()>) -> Result<()> {
        let path = self.document_path(profile_id)?;
        let mut file = self.open_exclusive(&path)?;

        let content = read_content(&mut file, &path)?;
        let mut document = if content.trim().is_empty() {
            ProfileDocument::default()
        } else {
            ProfileDocument::from_json(&content)?
        };
        f(&mut document)?;

        write_locked(&mut file, &path, &document)?;
        debug!("Updated profile document {:?}", path);
        Ok(())
    }

    /// Open (creating if needed) and exclusively lock a document.
    /// The lock is released when the file is dropped.
    fn open_exclusive(&self, path: &Path) -> Result<File> {
        std::fs::create_dir_all(&self.root)
            .map_err(|e| Error::storage(format!("Failed to create {}: {e}", self.root.display())))?;

        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| Error::storage(format!("Failed to open {}: {e}", path.display())))?;

        file.lock_exclusive()
            .map_err(|e| Error::storage(format!("Failed to lock {}: {e}", path.display())))?;
        Ok(file)
    }

    fn documents(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut paths: Vec<PathBuf> = std::fs::read_dir(&self.root)
            .map_err(|e| Error::storage(format!("Failed to list {}: {e}", self.root.display())))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(DOCUMENT_EXTENSION))
            .collect();
        paths.sort();
        Ok(paths)
    }
}

fn read_locked(path: &Path) -> Result<ProfileDocument> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::not_found(format!("Profile document {}", path.display())));
        }
        Err(e) => return Err(Error::storage(format!("Failed to open {}: {e}", path.display()))),
    };
    file.lock_shared()
        .map_err(|e| Error::storage(format!("Failed to lock {}: {e}", path.display())))?;

    let content = read_content(&mut file, path)?;
    // Left behind by an update that failed before its first write
    if content.trim().is_empty() {
        return Err(Error::not_found(format!("Profile document {}", path.display())));
    }
    ProfileDocument::from_json(&content)
}

fn read_content(file: &mut File, path: &Path) -> Result<String> {
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::storage(format!("Failed to read {}: {e}", path.display())))?;
    Ok(content)
}

/// Replace the whole content of an exclusively locked document
fn write_locked(file: &mut File, path: &Path, document: &ProfileDocument) -> Result<()> {
    let content = serde_json::to_string_pretty(document)?;
    file.set_len(0)
        .and_then(|_| file.seek(SeekFrom::Start(0)).map(|_| ()))
        .and_then(|_| file.write_all(content.as_bytes()))
        .and_then(|_| file.flush())
        .map_err(|e| Error::storage(format!("Failed to write {}: {e}", path.display())))
}

impl SettingsStore for FileSettingsStore {
    async fn fetch_settings(&self, profile_id: &str) -> Result<ProfileSettings> {
        Ok(self.read_document(profile_id)?.settings)
    }

    async fn replace_links(&self, profile_id: &str, links: &[Link]) -> Result<()> {
        self.modify(profile_id, |doc| {
            doc.settings.links = links.to_vec();
            Ok(())
        })
    }

    async fn update_appearance(&self, profile_id: &str, update: &AppearanceUpdate) -> Result<()> {
        self.modify(profile_id, |doc| {
            doc.settings.apply(update);
            Ok(())
        })
    }

    async fn profile_by_username(&self, username: &str) -> Result<Option<Profile>> {
        for path in self.documents()? {
            match read_locked(&path) {
                Ok(ProfileDocument {
                    profile: Some(profile),
                    ..
                }) if profile.username == username => return Ok(Some(profile)),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable profile document {:?}: {}", path, e),
            }
        }
        Ok(None)
    }

    async fn update_profile_media(
        &self,
        profile_id: &str,
        kind: MediaKind,
        url: &str,
    ) -> Result<()> {
        self.modify(profile_id, |doc| {
            let profile = doc
                .profile
                .as_mut()
                .ok_or_else(|| Error::not_found("Profile"))?;
            match kind {
                MediaKind::Avatar => profile.avatar_url = Some(url.to_string()),
                MediaKind::Favicon => profile.favicon_url = Some(url.to_string()),
            }
            Ok(())
        })
    }
}
