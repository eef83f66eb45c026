//! Link editing workflow.
//!
//! Holds the profile's link list, the draft being composed and the id of the
//! link being edited, if any. Local edits never touch storage; [`LinkEditor::save`]
//! writes the whole list in one replace and leaves local state alone whatever
//! the outcome.

use linkbio_core::prelude::*;
use linkbio_core::{EditIntent, Link, LinkDraft, LinkId};
use url::Url;

use crate::services::SettingsStore;

/// Schemes kept as-is even without `//`
const OPAQUE_SCHEMES: &[&str] = &["mailto", "tel", "sms"];

/// Give scheme-less URLs an `https://` prefix. No reachability check.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match Url::parse(trimmed) {
        Ok(url) if trimmed.contains("://") || OPAQUE_SCHEMES.contains(&url.scheme()) => {
            trimmed.to_string()
        }
        _ => format!("https://{trimmed}"),
    }
}

/// Persist a full link list for a profile
pub async fn save_links<S>(store: &S, profile_id: &str, links: &[Link]) -> Result<()>
where
    S: SettingsStore + Sync,
{
    match store.replace_links(profile_id, links).await {
        Ok(()) => {
            info!("Saved {} links for profile {}", links.len(), profile_id);
            Ok(())
        }
        Err(e) => {
            error!("Failed to save links for profile {}: {}", profile_id, e);
            Err(e)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEditor {
    profile_id: String,
    links: Vec<Link>,
    draft: LinkDraft,
    editing: Option<LinkId>,
    dirty: bool,
}

impl LinkEditor {
    pub fn new(profile_id: impl Into<String>, links: Vec<Link>) -> Self {
        Self {
            profile_id: profile_id.into(),
            links,
            draft: LinkDraft::default(),
            editing: None,
            dirty: false,
        }
    }

    pub fn profile_id(&self) -> &str {
        &self.profile_id
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn draft(&self) -> &LinkDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut LinkDraft {
        &mut self.draft
    }

    pub fn editing_id(&self) -> Option<&LinkId> {
        self.editing.as_ref()
    }

    /// Local changes not yet saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replace the list wholesale (e.g. after a reload), dropping any edit
    pub fn reset(&mut self, links: Vec<Link>) {
        self.links = links;
        self.cancel_edit();
        self.dirty = false;
    }

    /// Add or update a link from `draft`.
    ///
    /// Rejects drafts without a title or URL, leaving everything untouched.
    /// With an edit in progress the edited link is replaced in place;
    /// otherwise a new link with a fresh id is appended.
    pub fn submit(&mut self, mut draft: LinkDraft) -> Result<LinkId> {
        draft.validate()?;
        draft.url = normalize_url(&draft.url);

        let id = match self.editing.take() {
            Some(id) => match self.links.iter_mut().find(|l| l.id == id) {
                Some(slot) => {
                    *slot = draft.into_link(id.clone());
                    debug!("Updated link {}", id);
                    id
                }
                None => {
                    // The edited link was removed underneath us
                    warn!("Edited link {} no longer exists, adding as new", id);
                    self.append(draft)
                }
            },
            None => self.append(draft),
        };

        self.draft = LinkDraft::default();
        self.dirty = true;
        Ok(id)
    }

    /// Submit the editor's own draft. A rejected draft stays in place.
    pub fn submit_draft(&mut self) -> Result<LinkId> {
        let draft = self.draft.clone();
        self.submit(draft)
    }

    fn append(&mut self, draft: LinkDraft) -> LinkId {
        let mut id = LinkId::generate();
        while self.links.iter().any(|l| l.id == id) {
            id = LinkId::generate();
        }
        self.links.push(draft.into_link(id.clone()));
        debug!("Added link {}", id);
        id
    }

    /// Load a link into the draft for editing
    pub fn begin_edit(&mut self, id: &LinkId) -> Result<()> {
        let link = self
            .links
            .iter()
            .find(|l| &l.id == id)
            .ok_or_else(|| Error::not_found("Link"))?;
        self.draft = LinkDraft::from(link);
        self.editing = Some(id.clone());
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.draft = LinkDraft::default();
        self.editing = None;
    }

    /// Remove a link; deleting the link being edited also drops the edit
    pub fn delete(&mut self, id: &LinkId) -> Option<Link> {
        let index = self.links.iter().position(|l| &l.id == id)?;
        let removed = self.links.remove(index);
        if self.editing.as_ref() == Some(id) {
            self.cancel_edit();
        }
        self.dirty = true;
        debug!("Deleted link {}", id);
        Some(removed)
    }

    /// Apply an intent raised from an editable render tree
    pub fn apply(&mut self, intent: &EditIntent) -> Result<()> {
        match intent {
            EditIntent::Edit(id) => self.begin_edit(id),
            EditIntent::Delete(id) => self
                .delete(id)
                .map(|_| ())
                .ok_or_else(|| Error::not_found("Link")),
        }
    }

    /// Record that `saved` reached storage; clean only if nothing changed since
    pub fn mark_saved(&mut self, saved: &[Link]) {
        if self.links == saved {
            self.dirty = false;
        }
    }

    /// Persist the current list as one atomic replace
    pub async fn save<S>(&mut self, store: &S) -> Result<()>
    where
        S: SettingsStore + Sync,
    {
        save_links(store, &self.profile_id, &self.links).await?;
        self.dirty = false;
        Ok(())
    }
}
