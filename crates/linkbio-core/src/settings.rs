//! Profile settings: appearance plus the ordered link list.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::link::{ensure_unique_ids, Link};
use crate::theme::{self, Theme, DEFAULT_THEME};

/// Layout renderer selection.
///
/// Stored as a free-form tag; anything other than `bento` or `mixed`
/// (including a missing value) means `Links`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutType {
    #[default]
    Links,
    Bento,
    Mixed,
}

impl LayoutType {
    pub const ALL: [LayoutType; 3] = [LayoutType::Links, LayoutType::Bento, LayoutType::Mixed];

    pub fn parse(tag: &str) -> Self {
        match tag {
            "bento" => LayoutType::Bento,
            "mixed" => LayoutType::Mixed,
            _ => LayoutType::Links,
        }
    }

    /// Next layout in display order (wraps)
    pub fn next(self) -> Self {
        match self {
            LayoutType::Links => LayoutType::Bento,
            LayoutType::Bento => LayoutType::Mixed,
            LayoutType::Mixed => LayoutType::Links,
        }
    }
}

impl std::fmt::Display for LayoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutType::Links => write!(f, "links"),
            LayoutType::Bento => write!(f, "bento"),
            LayoutType::Mixed => write!(f, "mixed"),
        }
    }
}

impl<'de> Deserialize<'de> for LayoutType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tag = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match tag {
            Some(serde_json::Value::String(s)) => LayoutType::parse(&s),
            _ => LayoutType::Links,
        })
    }
}

/// Typeface family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Sans,
    Serif,
    Mono,
    Rounded,
    Display,
}

impl FontStyle {
    pub fn parse(key: &str) -> Self {
        match key {
            "serif" => FontStyle::Serif,
            "mono" | "monospace" => FontStyle::Mono,
            "rounded" => FontStyle::Rounded,
            "display" => FontStyle::Display,
            _ => FontStyle::Sans,
        }
    }

    /// CSS-style font family stack
    pub fn family(&self) -> &'static str {
        match self {
            FontStyle::Sans => "Inter, system-ui, sans-serif",
            FontStyle::Serif => "Georgia, 'Times New Roman', serif",
            FontStyle::Mono => "'JetBrains Mono', ui-monospace, monospace",
            FontStyle::Rounded => "Nunito, 'Varela Round', sans-serif",
            FontStyle::Display => "'Playfair Display', serif",
        }
    }
}

impl<'de> Deserialize<'de> for FontStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let key = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match key {
            Some(serde_json::Value::String(s)) => FontStyle::parse(&s),
            _ => FontStyle::Sans,
        })
    }
}

/// Stored background selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundStyle {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl BackgroundStyle {
    pub fn custom(url: impl Into<String>) -> Self {
        Self {
            id: CUSTOM_BACKGROUND.to_string(),
            url: Some(url.into()),
        }
    }

    pub fn catalog(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: None,
        }
    }
}

/// Background id whose `url` is used literally
pub const CUSTOM_BACKGROUND: &str = "custom";
/// Background id meaning "use the theme's flat background"
pub const NO_BACKGROUND: &str = "none";

/// Fixed background catalog: `(id, image url)`
pub const BACKGROUNDS: &[(&str, &str)] = &[
    ("mountains", "/backgrounds/mountains.jpg"),
    ("forest", "/backgrounds/forest.jpg"),
    ("waves", "/backgrounds/waves.jpg"),
    ("city-night", "/backgrounds/city-night.jpg"),
    ("gradient-aurora", "/backgrounds/gradient-aurora.svg"),
    ("gradient-peach", "/backgrounds/gradient-peach.svg"),
    ("paper", "/backgrounds/paper.png"),
];

/// A background after resolution against the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Background {
    /// The theme palette's flat background color
    ThemeFlat,
    Catalog { id: String, url: String },
    Custom { url: String },
}

impl Background {
    pub fn resolve(style: Option<&BackgroundStyle>) -> Self {
        let Some(style) = style else {
            return Background::ThemeFlat;
        };
        match style.id.as_str() {
            "" | NO_BACKGROUND => Background::ThemeFlat,
            CUSTOM_BACKGROUND => match style.url.as_deref().map(str::trim) {
                Some(url) if !url.is_empty() => Background::Custom {
                    url: url.to_string(),
                },
                _ => Background::ThemeFlat,
            },
            id => match BACKGROUNDS.iter().find(|(key, _)| *key == id) {
                Some((key, url)) => Background::Catalog {
                    id: (*key).to_string(),
                    url: (*url).to_string(),
                },
                None => {
                    tracing::debug!("Unknown background id {:?}, using theme background", id);
                    Background::ThemeFlat
                }
            },
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        match self {
            Background::ThemeFlat => None,
            Background::Catalog { url, .. } | Background::Custom { url } => Some(url),
        }
    }
}

/// Appearance and links of one profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSettings {
    #[serde(default = "default_theme_id", deserialize_with = "theme_id")]
    pub theme_id: String,

    #[serde(default, deserialize_with = "flag")]
    pub is_dark_mode: bool,

    #[serde(default)]
    pub font_style: FontStyle,

    #[serde(default)]
    pub layout_type: LayoutType,

    #[serde(
        default,
        deserialize_with = "background_style",
        skip_serializing_if = "Option::is_none"
    )]
    pub background_style: Option<BackgroundStyle>,

    #[serde(default, deserialize_with = "flag")]
    pub text_shadow: bool,

    #[serde(default, deserialize_with = "link_list")]
    pub links: Vec<Link>,
}

fn default_theme_id() -> String {
    DEFAULT_THEME.to_string()
}

fn theme_id<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) if !s.is_empty() => s,
        _ => default_theme_id(),
    })
}

/// Anything but a JSON boolean reads as `false`
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    Ok(matches!(
        Option::<serde_json::Value>::deserialize(deserializer)?,
        Some(serde_json::Value::Bool(true))
    ))
}

/// A background that does not parse is dropped, leaving the theme background
fn background_style<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<BackgroundStyle>, D::Error> {
    let value = match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => return Ok(None),
        Some(value) => value,
    };
    match serde_json::from_value(value) {
        Ok(style) => Ok(Some(style)),
        Err(e) => {
            tracing::debug!("Ignoring malformed background_style: {}", e);
            Ok(None)
        }
    }
}

/// Links stored as `null` count as an empty list
fn link_list<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<Link>, D::Error> {
    Ok(Option::<Vec<Link>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            theme_id: default_theme_id(),
            is_dark_mode: false,
            font_style: FontStyle::default(),
            layout_type: LayoutType::default(),
            background_style: None,
            text_shadow: false,
            links: Vec::new(),
        }
    }
}

impl ProfileSettings {
    /// Parse a stored settings record and restore the link id invariant
    pub fn from_json(json: &str) -> Result<Self> {
        let mut settings: ProfileSettings = serde_json::from_str(json)?;
        settings.normalize();
        Ok(settings)
    }

    /// Regenerate duplicate link ids. Returns the number replaced.
    pub fn normalize(&mut self) -> usize {
        ensure_unique_ids(&mut self.links)
    }

    pub fn theme(&self) -> &'static Theme {
        theme::resolve(&self.theme_id)
    }

    pub fn background(&self) -> Background {
        Background::resolve(self.background_style.as_ref())
    }

    /// Apply an appearance change to this copy
    pub fn apply(&mut self, update: &AppearanceUpdate) {
        if let Some(theme_id) = &update.theme_id {
            self.theme_id = theme_id.clone();
        }
        if let Some(dark) = update.is_dark_mode {
            self.is_dark_mode = dark;
        }
        if let Some(font) = update.font_style {
            self.font_style = font;
        }
        if let Some(layout) = update.layout_type {
            self.layout_type = layout;
        }
        if let Some(background) = &update.background_style {
            self.background_style = background.clone();
        }
        if let Some(shadow) = update.text_shadow {
            self.text_shadow = shadow;
        }
    }
}

/// Partial appearance change; `None` leaves a field untouched.
///
/// `background_style: Some(None)` clears the background.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppearanceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_dark_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_type: Option<LayoutType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_style: Option<Option<BackgroundStyle>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_shadow: Option<bool>,
}

impl AppearanceUpdate {
    pub fn is_empty(&self) -> bool {
        self == &AppearanceUpdate::default()
    }

    /// A custom background needs a URL
    pub fn validate(&self) -> Result<()> {
        if let Some(Some(style)) = &self.background_style {
            if style.id == CUSTOM_BACKGROUND
                && style.url.as_deref().map(str::trim).unwrap_or("").is_empty()
            {
                return Err(Error::validation("A custom background needs an image URL"));
            }
        }
        Ok(())
    }
}
