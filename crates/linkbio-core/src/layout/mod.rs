//! Layout renderers and the profile content selector.
//!
//! Three renderers turn an ordered link list into a [`RenderTree`]:
//! - [`list`] — one row per link
//! - [`grid`] — equal tiles, 2 columns on narrow viewports, 3 otherwise
//! - [`mixed`] — the first two links as featured tiles, the rest as rows
//!
//! All of them are pure and total: an empty list renders an empty tree, and
//! malformed links render with blank text instead of failing.

pub mod grid;
pub mod list;
pub mod mixed;

use serde::Serialize;

use crate::link::Link;
use crate::render::{EditControls, LinkRow, LinkTile, RenderTree, TileMedia};
use crate::settings::LayoutType;

/// Viewport width class. Decides the grid column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    Narrow,
    #[default]
    Wide,
}

impl Viewport {
    /// Classify a width against a breakpoint (same unit for both)
    pub fn from_width(width: u16, breakpoint: u16) -> Self {
        if width < breakpoint {
            Viewport::Narrow
        } else {
            Viewport::Wide
        }
    }

    pub fn grid_columns(&self) -> u8 {
        match self {
            Viewport::Narrow => 2,
            Viewport::Wide => 3,
        }
    }
}

/// Whether rendered links carry edit controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    ReadOnly,
    Editable,
}

/// Inputs shared by every renderer besides the links themselves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub text_shadow: bool,
    pub viewport: Viewport,
    pub edit: EditMode,
}

impl RenderOptions {
    pub fn new(text_shadow: bool) -> Self {
        Self {
            text_shadow,
            ..Self::default()
        }
    }

    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.edit = if editable {
            EditMode::Editable
        } else {
            EditMode::ReadOnly
        };
        self
    }
}

/// Render `links` with the renderer named by `layout`.
///
/// `Bento` uses the grid renderer, `Mixed` the mixed renderer, and `Links`
/// (which is also what any unrecognized stored tag parses to) the list
/// renderer.
pub fn select(layout: LayoutType, links: &[Link], options: RenderOptions) -> RenderTree {
    match layout {
        LayoutType::Bento => grid::render(links, options),
        LayoutType::Mixed => mixed::render(links, options),
        LayoutType::Links => list::render(links, options),
    }
}

fn controls(link: &Link, options: &RenderOptions) -> Option<EditControls> {
    match options.edit {
        EditMode::Editable => Some(EditControls::for_link(&link.id)),
        EditMode::ReadOnly => None,
    }
}

pub(crate) fn row(link: &Link, options: &RenderOptions) -> LinkRow {
    LinkRow {
        link_id: link.id.clone(),
        href: link.url.clone(),
        label: link.display.shows_title().then(|| link.title.clone()),
        glyph: link.display.shows_icon().then(|| link.glyph()),
        controls: controls(link, options),
    }
}

/// Tiles prefer the photo over the glyph whenever the icon slot is shown
pub(crate) fn tile(link: &Link, options: &RenderOptions, featured: bool) -> LinkTile {
    let media = link.display.shows_icon().then(|| match &link.photo_url {
        Some(photo) => TileMedia::Photo(photo.clone()),
        None => TileMedia::Glyph(link.glyph()),
    });
    LinkTile {
        link_id: link.id.clone(),
        href: link.url.clone(),
        label: link.display.shows_title().then(|| link.title.clone()),
        media,
        featured,
        controls: controls(link, options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::LinkDisplay;

    fn links(n: usize) -> Vec<Link> {
        (0..n)
            .map(|i| {
                Link::new(format!("Link {i}"), format!("https://example.com/{i}"))
                    .with_id(format!("{i}"))
            })
            .collect()
    }

    #[test]
    fn test_viewport_breakpoint() {
        assert_eq!(Viewport::from_width(59, 60), Viewport::Narrow);
        assert_eq!(Viewport::from_width(60, 60), Viewport::Wide);
        assert_eq!(Viewport::Narrow.grid_columns(), 2);
        assert_eq!(Viewport::Wide.grid_columns(), 3);
    }

    #[test]
    fn test_select_dispatch() {
        let l = links(3);
        let opts = RenderOptions::default();
        assert_eq!(select(LayoutType::Links, &l, opts).row_count(), 3);
        assert_eq!(select(LayoutType::Bento, &l, opts).tile_count(), 3);
        let mixed = select(LayoutType::Mixed, &l, opts);
        assert_eq!(mixed.featured_count(), 2);
        assert_eq!(mixed.row_count(), 1);
    }

    #[test]
    fn test_unrecognized_tag_renders_as_list() {
        let tree = select(LayoutType::parse("carousel"), &links(2), RenderOptions::default());
        assert_eq!(tree.layout, LayoutType::Links);
        assert_eq!(tree.row_count(), 2);
    }

    #[test]
    fn test_item_counts_for_all_sizes() {
        for n in 0..8 {
            let l = links(n);
            let opts = RenderOptions::default();
            assert_eq!(select(LayoutType::Links, &l, opts).item_count(), n);
            assert_eq!(select(LayoutType::Bento, &l, opts).item_count(), n);

            let mixed = select(LayoutType::Mixed, &l, opts);
            assert_eq!(mixed.item_count(), n);
            assert_eq!(mixed.featured_count(), n.min(2));
            assert_eq!(mixed.row_count(), n.saturating_sub(2));
        }
    }

    #[test]
    fn test_order_preserved_in_every_layout() {
        let l = links(5);
        let expected: Vec<_> = l.iter().map(|link| &link.id).collect();
        for layout in LayoutType::ALL {
            let tree = select(layout, &l, RenderOptions::default());
            assert_eq!(tree.link_ids(), expected, "{layout}");
        }
    }

    #[test]
    fn test_missing_display_renders_like_both() {
        let parsed: Link =
            serde_json::from_str(r#"{"id":"1","title":"Site","url":"https://s","icon":"globe"}"#)
                .unwrap();
        let explicit = parsed.clone().with_display(LinkDisplay::Both);
        for layout in LayoutType::ALL {
            assert_eq!(
                select(layout, std::slice::from_ref(&parsed), RenderOptions::default()),
                select(layout, std::slice::from_ref(&explicit), RenderOptions::default()),
            );
        }
    }

    #[test]
    fn test_editable_nodes_carry_controls() {
        let l = links(3);
        let opts = RenderOptions::default().editable(true);
        for layout in LayoutType::ALL {
            let tree = select(layout, &l, opts);
            assert!(tree.rows().all(|r| r.controls.is_some()));
            assert!(tree.tiles().all(|t| t.controls.is_some()));
        }
        let read_only = select(LayoutType::Links, &l, RenderOptions::default());
        assert!(read_only.rows().all(|r| r.controls.is_none()));
    }

    #[test]
    fn test_text_shadow_flag_is_carried() {
        assert!(select(LayoutType::Bento, &links(1), RenderOptions::new(true)).text_shadow);
        assert!(!select(LayoutType::Bento, &links(1), RenderOptions::new(false)).text_shadow);
    }
}
