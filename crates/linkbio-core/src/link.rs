//! Profile links and their deserialization boundary.
//!
//! Stored link records are loosely shaped: fields may be missing, `null`, or
//! carry the wrong type. All defaulting happens here, while deserializing, so
//! the renderers and the editing workflow only ever see fully populated
//! [`Link`] values.

use std::collections::HashSet;

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::icons::{self, Glyph, DEFAULT_ICON};

/// Length of generated link identifiers
pub const LINK_ID_LEN: usize = 21;

/// Message shown when a link is submitted without a title or URL
pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in both title and URL";

/// Opaque, client-generated link identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LinkId(String);

impl LinkId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        let id: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(LINK_ID_LEN)
            .map(char::from)
            .collect();
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LinkId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for LinkId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for LinkId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(lenient::text(deserializer)?
            .filter(|s| !s.is_empty())
            .map(LinkId)
            .unwrap_or_else(LinkId::generate))
    }
}

/// Which parts of a link are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkDisplay {
    #[default]
    Both,
    Icon,
    Title,
}

impl LinkDisplay {
    /// Parse a stored display mode. Unrecognized values mean `Both`.
    pub fn parse(value: &str) -> Self {
        match value {
            "icon" => LinkDisplay::Icon,
            "title" => LinkDisplay::Title,
            _ => LinkDisplay::Both,
        }
    }

    /// Next mode in display order (wraps)
    pub fn next(self) -> Self {
        match self {
            LinkDisplay::Both => LinkDisplay::Icon,
            LinkDisplay::Icon => LinkDisplay::Title,
            LinkDisplay::Title => LinkDisplay::Both,
        }
    }

    pub fn shows_icon(&self) -> bool {
        matches!(self, LinkDisplay::Both | LinkDisplay::Icon)
    }

    pub fn shows_title(&self) -> bool {
        matches!(self, LinkDisplay::Both | LinkDisplay::Title)
    }
}

impl std::fmt::Display for LinkDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkDisplay::Both => write!(f, "both"),
            LinkDisplay::Icon => write!(f, "icon"),
            LinkDisplay::Title => write!(f, "title"),
        }
    }
}

impl<'de> Deserialize<'de> for LinkDisplay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(lenient::text(deserializer)?
            .map(|s| LinkDisplay::parse(&s))
            .unwrap_or_default())
    }
}

/// One entry in a profile's link list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default = "LinkId::generate")]
    pub id: LinkId,

    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub url: String,

    #[serde(default = "default_icon", deserialize_with = "lenient::icon")]
    pub icon: String,

    #[serde(default)]
    pub display: LinkDisplay,

    #[serde(
        default,
        alias = "photoUrl",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_url: Option<String>,
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

impl Link {
    /// Create a link with a fresh id and default icon/display
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: LinkId::generate(),
            title: title.into(),
            url: url.into(),
            icon: default_icon(),
            display: LinkDisplay::Both,
            photo_url: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<LinkId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_display(mut self, display: LinkDisplay) -> Self {
        self.display = display;
        self
    }

    pub fn with_photo(mut self, photo_url: impl Into<String>) -> Self {
        self.photo_url = Some(photo_url.into());
        self
    }

    /// Resolved glyph for this link's icon key
    pub fn glyph(&self) -> &'static Glyph {
        icons::resolve(&self.icon)
    }
}

/// A link being composed in the editor (everything but the id)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkDraft {
    pub title: String,
    pub url: String,
    pub icon: String,
    pub display: LinkDisplay,
    pub photo_url: Option<String>,
}

impl LinkDraft {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Title and URL are both required
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() || self.url.trim().is_empty() {
            return Err(Error::validation(REQUIRED_FIELDS_MESSAGE));
        }
        Ok(())
    }

    /// Build a link from this draft, applying the same defaults as the
    /// deserialization boundary.
    pub fn into_link(self, id: LinkId) -> Link {
        let icon = match self.icon.trim() {
            "" => default_icon(),
            icon => icon.to_string(),
        };
        Link {
            id,
            title: self.title.trim().to_string(),
            url: self.url.trim().to_string(),
            icon,
            display: self.display,
            photo_url: self.photo_url.filter(|p| !p.trim().is_empty()),
        }
    }
}

impl From<&Link> for LinkDraft {
    fn from(link: &Link) -> Self {
        Self {
            title: link.title.clone(),
            url: link.url.clone(),
            icon: link.icon.clone(),
            display: link.display,
            photo_url: link.photo_url.clone(),
        }
    }
}

/// Regenerate ids that collide with an earlier link in the list.
///
/// Returns how many ids were replaced.
pub fn ensure_unique_ids(links: &mut [Link]) -> usize {
    let mut seen = HashSet::new();
    let mut replaced = 0;
    for link in links.iter_mut() {
        if !seen.insert(link.id.clone()) {
            let mut fresh = LinkId::generate();
            while seen.contains(&fresh) {
                fresh = LinkId::generate();
            }
            tracing::warn!("Duplicate link id {}, assigned {}", link.id, fresh);
            link.id = fresh.clone();
            seen.insert(fresh);
            replaced += 1;
        }
    }
    replaced
}

/// Tolerant field deserializers: wrong types and `null` become defaults.
mod lenient {
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer};

    use crate::icons::DEFAULT_ICON;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MaybeText {
        Text(String),
        Signed(i64),
        Unsigned(u64),
        Other(IgnoredAny),
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<MaybeText>::deserialize(deserializer)? {
            Some(MaybeText::Text(s)) => Some(s),
            Some(MaybeText::Signed(n)) => Some(n.to_string()),
            Some(MaybeText::Unsigned(n)) => Some(n.to_string()),
            Some(MaybeText::Other(_)) | None => None,
        })
    }

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(text(deserializer)?.unwrap_or_default())
    }

    pub fn optional_text<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(text(deserializer)?.filter(|s| !s.trim().is_empty()))
    }

    pub fn icon<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(optional_text(deserializer)?.unwrap_or_else(|| DEFAULT_ICON.to_string()))
    }
}
