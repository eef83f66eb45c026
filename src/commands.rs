//! Command implementations behind the `linkbio` CLI
//!
//! Each command loads what it needs from the project (config, profile
//! documents), runs one workflow, and returns the [`HeadlessEvent`] that
//! describes the outcome. Printing is left to the caller.

use std::path::Path;

use linkbio_app::config::{init_config_dir, Settings};
use linkbio_app::services::FileSettingsStore;
use linkbio_app::{load_public_page, LinkEditor, PageOutcome, PublicPage};
use linkbio_core::prelude::*;
use linkbio_core::{LayoutType, LinkDraft, LinkDisplay, LinkId, Viewport};

use crate::headless::HeadlessEvent;

/// Terminal width assumed when none is given
pub const DEFAULT_RENDER_WIDTH: u16 = 80;

/// Options for `linkbio render`
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderRequest {
    pub width: Option<u16>,
    /// Render with this layout instead of the stored one
    pub layout: Option<LayoutType>,
}

/// Render the profile document at `document` to a render tree.
pub fn render_document(
    document: &Path,
    settings: &Settings,
    request: RenderRequest,
) -> Result<HeadlessEvent> {
    let (store, profile_id) = FileSettingsStore::for_document(document)?;
    let loaded = store.read_document(&profile_id)?;
    let profile = loaded.profile_or_local(&profile_id);

    let mut page = PublicPage::new(profile, loaded.settings);
    if let Some(layout) = request.layout {
        page.settings.layout_type = layout;
    }
    apply_ui_overrides(&mut page, settings);

    let viewport = viewport_for(settings, request.width);
    let tree = page.render(viewport);
    info!(
        "Rendered {} as {} ({} items)",
        page.profile.username,
        tree.layout,
        tree.item_count()
    );
    Ok(HeadlessEvent::rendered(&page.profile.username, viewport, tree))
}

/// Render the public page for a username from the project's profile store.
///
/// Unknown users, invalid usernames and storage failures all produce a
/// `page_not_found` event.
pub async fn render_page(
    project_path: &Path,
    settings: &Settings,
    username: &str,
    width: Option<u16>,
) -> HeadlessEvent {
    let store = FileSettingsStore::new(settings.storage.data_dir(project_path));
    match load_public_page(&store, username).await {
        PageOutcome::Found(mut page) => {
            apply_ui_overrides(&mut page, settings);
            let viewport = viewport_for(settings, width);
            let tree = page.render(viewport);
            HeadlessEvent::rendered(&page.profile.username, viewport, tree)
        }
        PageOutcome::NotFound => HeadlessEvent::page_not_found(username),
    }
}

/// Current links of a profile document
pub fn list_links(document: &Path) -> Result<HeadlessEvent> {
    let (store, profile_id) = FileSettingsStore::for_document(document)?;
    let loaded = store.read_document(&profile_id)?;
    Ok(HeadlessEvent::links(&loaded.settings.links))
}

/// Fields of `linkbio links add`
#[derive(Debug, Clone, Default)]
pub struct NewLink {
    pub title: String,
    pub url: String,
    pub icon: Option<String>,
    pub display: Option<LinkDisplay>,
    pub photo_url: Option<String>,
}

impl From<NewLink> for LinkDraft {
    fn from(new: NewLink) -> Self {
        LinkDraft {
            title: new.title,
            url: new.url,
            icon: new.icon.unwrap_or_default(),
            display: new.display.unwrap_or_default(),
            photo_url: new.photo_url,
        }
    }
}

/// Append a link to a profile document and save it.
///
/// A document that does not exist yet starts with no links.
pub async fn add_link(document: &Path, new: NewLink) -> Result<HeadlessEvent> {
    let mut editor = open_editor(document)?;
    let (store, _) = FileSettingsStore::for_document(document)?;

    let id = editor.submit(new.into())?;
    editor.save(&store).await?;

    let link = editor
        .links()
        .iter()
        .find(|l| l.id == id)
        .ok_or_else(|| Error::not_found("Link"))?;
    Ok(HeadlessEvent::link_added(link))
}

/// Remove a link by id and save the document
pub async fn remove_link(document: &Path, link_id: &str) -> Result<HeadlessEvent> {
    let mut editor = open_editor(document)?;
    let (store, _) = FileSettingsStore::for_document(document)?;

    let id = LinkId::from(link_id);
    if editor.delete(&id).is_none() {
        return Err(Error::not_found(format!("Link {link_id}")));
    }
    editor.save(&store).await?;
    Ok(HeadlessEvent::link_removed(&id))
}

/// Create `.linkbio/config.toml` with commented defaults
pub fn init_project(project_path: &Path) -> Result<HeadlessEvent> {
    let path = init_config_dir(project_path)?;
    Ok(HeadlessEvent::config_created(&path))
}

fn open_editor(document: &Path) -> Result<LinkEditor> {
    let (store, profile_id) = FileSettingsStore::for_document(document)?;
    let links = match store.read_document(&profile_id) {
        Ok(loaded) => loaded.settings.links,
        Err(Error::NotFound { .. }) => {
            debug!("No document at {}, starting empty", document.display());
            Vec::new()
        }
        Err(e) => return Err(e),
    };
    Ok(LinkEditor::new(profile_id, links))
}

fn viewport_for(settings: &Settings, width: Option<u16>) -> Viewport {
    Viewport::from_width(
        width.unwrap_or(DEFAULT_RENDER_WIDTH),
        settings.ui.narrow_breakpoint,
    )
}

fn apply_ui_overrides(page: &mut PublicPage, settings: &Settings) {
    if let Some(shadow) = settings.ui.text_shadow {
        page.settings.text_shadow = shadow;
    }
}
