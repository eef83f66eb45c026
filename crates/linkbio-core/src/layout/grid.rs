//! Grid ("bento") renderer: every link as an equal tile.
//!
//! The viewport picks the column count: 2 when narrow, 3 otherwise.

use super::{tile, RenderOptions};
use crate::link::Link;
use crate::render::RenderTree;
use crate::settings::LayoutType;

pub fn render(links: &[Link], options: RenderOptions) -> RenderTree {
    let mut tree = RenderTree::new(LayoutType::Bento, options.text_shadow);
    tree.push_grid(
        options.viewport.grid_columns(),
        links.iter().map(|link| tile(link, &options, false)).collect(),
    );
    tree
}
