//! Icon catalog for profile links.
//!
//! Every link names its icon by a string key. [`resolve`] maps that key to a
//! [`Glyph`] with an exact, case-sensitive match against [`CATALOG`]; any miss
//! (including the empty string) yields the `link` glyph. Resolution never
//! fails.
//!
//! Each glyph carries two renditions selected at draw time by [`IconMode`]:
//! - `IconMode::Unicode` — safe characters that work in all terminals
//! - `IconMode::NerdFonts` — rich Nerd Font glyphs (requires Nerd Font installed)

use serde::{Deserialize, Serialize};

/// Key of the catalog's designated default glyph
pub const DEFAULT_ICON: &str = "link";

/// Icon rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconMode {
    /// Safe Unicode characters that work in all terminals (default)
    #[default]
    Unicode,
    /// Nerd Font glyphs — requires a Nerd Font installed in the terminal
    NerdFonts,
}

impl std::fmt::Display for IconMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IconMode::Unicode => write!(f, "unicode"),
            IconMode::NerdFonts => write!(f, "nerd_fonts"),
        }
    }
}

/// A resolved visual symbol for a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Glyph {
    /// Catalog key (`"github"`, `"mail"`, ...)
    pub key: &'static str,
    /// Human readable name, used as alt text
    pub label: &'static str,
    #[serde(skip)]
    unicode: &'static str,
    #[serde(skip)]
    nerd: &'static str,
}

impl Glyph {
    const fn new(
        key: &'static str,
        label: &'static str,
        unicode: &'static str,
        nerd: &'static str,
    ) -> Self {
        Self {
            key,
            label,
            unicode,
            nerd,
        }
    }

    /// The symbol to draw for the given mode
    pub fn symbol(&self, mode: IconMode) -> &'static str {
        match mode {
            IconMode::Unicode => self.unicode,
            IconMode::NerdFonts => self.nerd,
        }
    }

    /// Whether this is the catalog's fallback glyph
    pub fn is_default(&self) -> bool {
        self.key == DEFAULT_ICON
    }
}

/// The fixed glyph catalog. The first entry is the default.
pub const CATALOG: &[Glyph] = &[
    Glyph::new(DEFAULT_ICON, "Link", "\u{1f517}", "\u{f0c1}"), // nf-fa-link
    Glyph::new("globe", "Website", "\u{1f310}", "\u{f0ac}"),   // nf-fa-globe
    Glyph::new("mail", "Email", "\u{2709}", "\u{f0e0}"),       // nf-fa-envelope
    Glyph::new("phone", "Phone", "\u{260e}", "\u{f095}"),      // nf-fa-phone
    Glyph::new("github", "GitHub", "\u{2325}", "\u{f09b}"),    // nf-fa-github
    Glyph::new("gitlab", "GitLab", "\u{2325}", "\u{f296}"),    // nf-fa-gitlab
    Glyph::new("twitter", "Twitter", "\u{1d54f}", "\u{f099}"), // nf-fa-twitter
    Glyph::new("x", "X", "\u{1d54f}", "\u{e61b}"),
    Glyph::new("instagram", "Instagram", "\u{25ce}", "\u{f16d}"), // nf-fa-instagram
    Glyph::new("facebook", "Facebook", "\u{24d5}", "\u{f09a}"),   // nf-fa-facebook
    Glyph::new("linkedin", "LinkedIn", "\u{24c1}", "\u{f0e1}"),   // nf-fa-linkedin
    Glyph::new("youtube", "YouTube", "\u{25b6}", "\u{f167}"),     // nf-fa-youtube_play
    Glyph::new("twitch", "Twitch", "\u{25a3}", "\u{f1e8}"),       // nf-fa-twitch
    Glyph::new("tiktok", "TikTok", "\u{266a}", "\u{e7d4}"),
    Glyph::new("discord", "Discord", "\u{25d0}", "\u{f392}"),
    Glyph::new("spotify", "Spotify", "\u{266b}", "\u{f1bc}"), // nf-fa-spotify
    Glyph::new("music", "Music", "\u{266b}", "\u{f001}"),     // nf-fa-music
    Glyph::new("camera", "Photos", "\u{25a3}", "\u{f030}"),   // nf-fa-camera
    Glyph::new("code", "Code", "\u{2039}\u{203a}", "\u{f121}"), // nf-fa-code
    Glyph::new("book", "Blog", "\u{2261}", "\u{f02d}"),       // nf-fa-book
    Glyph::new("shop", "Shop", "\u{2302}", "\u{f07a}"),       // nf-fa-shopping_cart
    Glyph::new("coffee", "Coffee", "\u{2615}", "\u{f0f4}"),   // nf-fa-coffee
    Glyph::new("heart", "Support", "\u{2665}", "\u{f004}"),   // nf-fa-heart
    Glyph::new("calendar", "Calendar", "\u{25a6}", "\u{f073}"), // nf-fa-calendar
];

/// Resolve an icon key to a glyph. Unknown keys resolve to the default.
pub fn resolve(name: &str) -> &'static Glyph {
    CATALOG
        .iter()
        .find(|glyph| glyph.key == name)
        .unwrap_or(&CATALOG[0])
}

/// Whether `name` is an exact catalog key
pub fn is_known(name: &str) -> bool {
    CATALOG.iter().any(|glyph| glyph.key == name)
}
