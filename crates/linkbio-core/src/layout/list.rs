//! List renderer: one row per link, in list order.

use super::{row, RenderOptions};
use crate::link::Link;
use crate::render::RenderTree;
use crate::settings::LayoutType;

pub fn render(links: &[Link], options: RenderOptions) -> RenderTree {
    let mut tree = RenderTree::new(LayoutType::Links, options.text_shadow);
    tree.push_rows(links.iter().map(|link| row(link, &options)).collect());
    tree
}
