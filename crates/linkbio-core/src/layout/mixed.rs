//! Mixed renderer: featured tiles followed by rows.
//!
//! The first [`FEATURED_COUNT`] links become square tiles side by side (same
//! photo/glyph precedence as the grid); every later link is a list row.

use super::{row, tile, RenderOptions};
use crate::link::Link;
use crate::render::RenderTree;
use crate::settings::LayoutType;

/// Number of leading links rendered as featured tiles
pub const FEATURED_COUNT: usize = 2;

/// Featured tiles always sit two abreast
pub const FEATURED_COLUMNS: u8 = 2;

pub fn render(links: &[Link], options: RenderOptions) -> RenderTree {
    let split = links.len().min(FEATURED_COUNT);
    let (featured, regular) = links.split_at(split);

    let mut tree = RenderTree::new(LayoutType::Mixed, options.text_shadow);
    tree.push_grid(
        FEATURED_COLUMNS,
        featured.iter().map(|link| tile(link, &options, true)).collect(),
    );
    tree.push_rows(regular.iter().map(|link| row(link, &options)).collect());
    tree
}
