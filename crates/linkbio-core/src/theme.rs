//! Theme catalog.
//!
//! A theme id selects a pair of palettes; `is_dark_mode` picks one of the
//! pair independently of the id. Unknown ids fall back to [`DEFAULT_THEME`].

use serde::Serialize;

/// Id of the fallback theme
pub const DEFAULT_THEME: &str = "default";

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb` notation
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Colors for one appearance of a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: Rgb,
    pub surface: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub accent: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub light: Palette,
    pub dark: Palette,
}

impl Theme {
    pub fn palette(&self, dark_mode: bool) -> &Palette {
        if dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }

    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_THEME
    }
}

const fn palette(background: Rgb, surface: Rgb, text: Rgb, muted: Rgb, accent: Rgb) -> Palette {
    Palette {
        background,
        surface,
        text,
        muted,
        accent,
    }
}

/// The fixed theme catalog. The first entry is the default.
pub const THEMES: &[Theme] = &[
    Theme {
        id: DEFAULT_THEME,
        name: "Default",
        light: palette(
            Rgb(250, 250, 250),
            Rgb(255, 255, 255),
            Rgb(24, 24, 27),
            Rgb(113, 113, 122),
            Rgb(37, 99, 235),
        ),
        dark: palette(
            Rgb(9, 9, 11),
            Rgb(24, 24, 27),
            Rgb(244, 244, 245),
            Rgb(161, 161, 170),
            Rgb(96, 165, 250),
        ),
    },
    Theme {
        id: "nature",
        name: "Nature",
        light: palette(
            Rgb(236, 253, 245),
            Rgb(209, 250, 229),
            Rgb(6, 78, 59),
            Rgb(4, 120, 87),
            Rgb(16, 185, 129),
        ),
        dark: palette(
            Rgb(2, 44, 34),
            Rgb(6, 78, 59),
            Rgb(209, 250, 229),
            Rgb(110, 231, 183),
            Rgb(52, 211, 153),
        ),
    },
    Theme {
        id: "ocean",
        name: "Ocean",
        light: palette(
            Rgb(240, 249, 255),
            Rgb(224, 242, 254),
            Rgb(12, 74, 110),
            Rgb(3, 105, 161),
            Rgb(14, 165, 233),
        ),
        dark: palette(
            Rgb(8, 47, 73),
            Rgb(12, 74, 110),
            Rgb(224, 242, 254),
            Rgb(125, 211, 252),
            Rgb(56, 189, 248),
        ),
    },
    Theme {
        id: "sunset",
        name: "Sunset",
        light: palette(
            Rgb(255, 247, 237),
            Rgb(255, 237, 213),
            Rgb(124, 45, 18),
            Rgb(194, 65, 12),
            Rgb(249, 115, 22),
        ),
        dark: palette(
            Rgb(67, 20, 7),
            Rgb(124, 45, 18),
            Rgb(255, 237, 213),
            Rgb(253, 186, 116),
            Rgb(251, 146, 60),
        ),
    },
    Theme {
        id: "midnight",
        name: "Midnight",
        light: palette(
            Rgb(238, 242, 255),
            Rgb(224, 231, 255),
            Rgb(30, 27, 75),
            Rgb(67, 56, 202),
            Rgb(99, 102, 241),
        ),
        dark: palette(
            Rgb(15, 23, 42),
            Rgb(30, 41, 59),
            Rgb(226, 232, 240),
            Rgb(148, 163, 184),
            Rgb(129, 140, 248),
        ),
    },
    Theme {
        id: "minimal",
        name: "Minimal",
        light: palette(
            Rgb(255, 255, 255),
            Rgb(245, 245, 245),
            Rgb(0, 0, 0),
            Rgb(115, 115, 115),
            Rgb(0, 0, 0),
        ),
        dark: palette(
            Rgb(0, 0, 0),
            Rgb(23, 23, 23),
            Rgb(255, 255, 255),
            Rgb(163, 163, 163),
            Rgb(255, 255, 255),
        ),
    },
    Theme {
        id: "candy",
        name: "Candy",
        light: palette(
            Rgb(253, 242, 248),
            Rgb(252, 231, 243),
            Rgb(131, 24, 67),
            Rgb(190, 24, 93),
            Rgb(236, 72, 153),
        ),
        dark: palette(
            Rgb(80, 7, 36),
            Rgb(131, 24, 67),
            Rgb(252, 231, 243),
            Rgb(249, 168, 212),
            Rgb(244, 114, 182),
        ),
    },
];

/// Resolve a theme id. Unknown ids resolve to the default theme.
pub fn resolve(id: &str) -> &'static Theme {
    THEMES.iter().find(|t| t.id == id).unwrap_or(&THEMES[0])
}
