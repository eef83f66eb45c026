//! Public profile pages.
//!
//! A missing profile is a normal outcome, not an error: lookups resolve to
//! [`PageOutcome::NotFound`], and so do storage failures (after logging), so
//! the visitor always lands on a determinate view.

use percent_encoding::percent_decode_str;
use serde::Serialize;

use linkbio_core::prelude::*;
use linkbio_core::{
    layout, validate_username, Background, Palette, Profile, ProfileSettings, RenderOptions,
    RenderTree, Theme, Viewport,
};

use crate::services::SettingsStore;

/// Everything needed to draw a public profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicPage {
    pub profile: Profile,
    pub settings: ProfileSettings,
}

impl PublicPage {
    pub fn new(profile: Profile, settings: ProfileSettings) -> Self {
        Self { profile, settings }
    }

    /// Read-only render of the link list
    pub fn render(&self, viewport: Viewport) -> RenderTree {
        layout::select(
            self.settings.layout_type,
            &self.settings.links,
            RenderOptions::new(self.settings.text_shadow).viewport(viewport),
        )
    }

    pub fn theme(&self) -> &'static Theme {
        self.settings.theme()
    }

    pub fn palette(&self) -> &'static Palette {
        self.theme().palette(self.settings.is_dark_mode)
    }

    pub fn background(&self) -> Background {
        self.settings.background()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    Found(Box<PublicPage>),
    NotFound,
}

impl PageOutcome {
    pub fn page(&self) -> Option<&PublicPage> {
        match self {
            PageOutcome::Found(page) => Some(page),
            PageOutcome::NotFound => None,
        }
    }
}

/// Turn a raw path segment (`%40ada`, `@ada`, `ada`) into a username
pub fn parse_username(segment: &str) -> Option<String> {
    let decoded = percent_decode_str(segment.trim()).decode_utf8().ok()?;
    let username = decoded.trim().trim_start_matches('@');
    validate_username(username).ok()?;
    Some(username.to_string())
}

/// Look up a public profile by the username segment of its URL
pub async fn load_public_page<S>(store: &S, segment: &str) -> PageOutcome
where
    S: SettingsStore + Sync,
{
    let Some(username) = parse_username(segment) else {
        debug!("Rejected profile path segment {:?}", segment);
        return PageOutcome::NotFound;
    };

    let profile = match store.profile_by_username(&username).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            debug!("No profile for username {}", username);
            return PageOutcome::NotFound;
        }
        Err(e) => {
            warn!("Profile lookup for {} failed: {}", username, e);
            return PageOutcome::NotFound;
        }
    };

    let settings = match store.fetch_settings(&profile.id).await {
        Ok(settings) => settings,
        Err(Error::NotFound { .. }) => {
            debug!("Profile {} has no settings record, using defaults", profile.id);
            ProfileSettings::default()
        }
        Err(e) => {
            warn!("Settings lookup for profile {} failed: {}", profile.id, e);
            return PageOutcome::NotFound;
        }
    };

    PageOutcome::Found(Box::new(PublicPage::new(profile, settings)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemorySettingsStore;
    use linkbio_core::{LayoutType, Link};

    fn store() -> MemorySettingsStore {
        let settings = ProfileSettings {
            theme_id: "nature".into(),
            layout_type: LayoutType::Bento,
            links: vec![Link::new("GitHub", "https://github.com/x").with_icon("github")],
            ..Default::default()
        };
        MemorySettingsStore::new()
            .with_profile(Profile::new("p1", "u1", "ada"), settings)
            .with_profile(Profile::new("p2", "u2", "grace"), ProfileSettings::default())
    }

    #[test]
    fn test_parse_username() {
        assert_eq!(parse_username("ada").as_deref(), Some("ada"));
        assert_eq!(parse_username("%40ada").as_deref(), Some("ada"));
        assert_eq!(parse_username("@ada.l").as_deref(), Some("ada.l"));
        assert_eq!(parse_username("a%2Fb"), None);
        assert_eq!(parse_username("%FF%FE"), None);
        assert_eq!(parse_username(""), None);
    }

    #[tokio::test]
    async fn test_found_page_renders_its_layout() {
        let outcome = load_public_page(&store(), "ada").await;
        let page = outcome.page().unwrap();
        assert_eq!(page.theme().id, "nature");

        let tree = page.render(Viewport::Narrow);
        assert_eq!(tree.layout, LayoutType::Bento);
        assert_eq!(tree.tile_count(), 1);
        assert!(tree.rows().all(|r| r.controls.is_none()));
    }

    #[tokio::test]
    async fn test_unknown_username_is_not_found() {
        assert_eq!(load_public_page(&store(), "nobody").await, PageOutcome::NotFound);
        assert_eq!(load_public_page(&store(), "no way").await, PageOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_found() {
        let store = store();
        store.set_failing(true);
        assert_eq!(load_public_page(&store, "ada").await, PageOutcome::NotFound);
    }
}
