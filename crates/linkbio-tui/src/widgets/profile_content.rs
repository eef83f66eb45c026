//! The rendered link list: stacks the blocks of a render tree and scrolls
//! so the selected link stays visible.

use linkbio_core::{IconMode, LinkId, RenderBlock, RenderTree};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Paragraph, Widget},
};

use super::link_rows::ROW_HEIGHT;
use super::tile_grid::TILE_HEIGHT;
use super::{LinkRows, TileGrid};
use crate::theme::styles::ProfileStyles;

/// Blank rows between consecutive blocks
const BLOCK_GAP: u16 = 1;

const EMPTY_MESSAGE: &str = "No links yet";

pub struct ProfileContent<'a> {
    tree: &'a RenderTree,
    styles: &'a ProfileStyles,
    icons: IconMode,
    selected: Option<&'a LinkId>,
}

impl<'a> ProfileContent<'a> {
    pub fn new(tree: &'a RenderTree, styles: &'a ProfileStyles, icons: IconMode) -> Self {
        Self {
            tree,
            styles,
            icons,
            selected: None,
        }
    }

    pub fn selected(mut self, selected: Option<&'a LinkId>) -> Self {
        self.selected = selected;
        self
    }

    fn block_height(block: &RenderBlock) -> u16 {
        match block {
            RenderBlock::Rows { rows } => LinkRows::height(rows),
            RenderBlock::Grid { columns, tiles } => TileGrid::height(*columns, tiles.len()),
        }
    }

    /// Total rows the unclipped content needs
    pub fn height(&self) -> u16 {
        let blocks = self.tree.blocks.len() as u16;
        self.tree
            .blocks
            .iter()
            .map(Self::block_height)
            .fold(0u16, u16::saturating_add)
            .saturating_add(blocks.saturating_sub(1) * BLOCK_GAP)
    }

    /// Top row and height of the selected link within the unclipped content
    fn selected_span(&self) -> Option<(u16, u16)> {
        let selected = self.selected?;
        let mut y = 0u16;
        for block in &self.tree.blocks {
            match block {
                RenderBlock::Rows { rows } => {
                    if let Some(i) = rows.iter().position(|r| &r.link_id == selected) {
                        return Some((y + i as u16 * ROW_HEIGHT, ROW_HEIGHT));
                    }
                }
                RenderBlock::Grid { columns, tiles } => {
                    if let Some(i) = tiles.iter().position(|t| &t.link_id == selected) {
                        let row = i as u16 / u16::from((*columns).max(1));
                        return Some((y + row * TILE_HEIGHT, TILE_HEIGHT));
                    }
                }
            }
            y = y.saturating_add(Self::block_height(block) + BLOCK_GAP);
        }
        None
    }

    /// First content row shown in a viewport `visible` rows tall
    pub fn scroll_offset(&self, visible: u16) -> u16 {
        let total = self.height();
        if total <= visible {
            return 0;
        }
        match self.selected_span() {
            Some((top, height)) if top + height > visible => {
                (top + height - visible).min(total - visible)
            }
            _ => 0,
        }
    }

    fn render_blocks(&self, area: Rect, buf: &mut Buffer) {
        let mut y = area.y;
        for block in &self.tree.blocks {
            let height = Self::block_height(block);
            let block_area = Rect::new(area.x, y, area.width, height);
            match block {
                RenderBlock::Rows { rows } => LinkRows::new(rows, self.styles, self.icons)
                    .selected(self.selected)
                    .render(block_area, buf),
                RenderBlock::Grid { columns, tiles } => {
                    TileGrid::new(*columns, tiles, self.styles, self.icons)
                        .selected(self.selected)
                        .render(block_area, buf)
                }
            }
            y = y.saturating_add(height + BLOCK_GAP);
        }
    }
}

impl Widget for ProfileContent<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        if self.tree.is_empty() {
            Paragraph::new(Line::styled(EMPTY_MESSAGE, self.styles.muted))
                .alignment(Alignment::Center)
                .render(area, buf);
            return;
        }

        let total = self.height();
        if total <= area.height {
            self.render_blocks(area, buf);
            return;
        }

        // Draw everything off-screen, then copy the visible window
        let offset = self.scroll_offset(area.height);
        let mut scratch = Buffer::empty(Rect::new(0, 0, area.width, total));
        self.render_blocks(scratch.area, &mut scratch);

        for dy in 0..area.height {
            for dx in 0..area.width {
                let Some(cell) = scratch.cell((dx, dy + offset)) else {
                    continue;
                };
                if let Some(target) = buf.cell_mut((area.x + dx, area.y + dy)) {
                    *target = cell.clone();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_styles, TestTerminal};
    use linkbio_core::{layout, LayoutType, Link, RenderOptions};

    fn links(n: usize) -> Vec<Link> {
        (0..n)
            .map(|i| Link::new(format!("Link {i}"), "https://x").with_id(format!("{i}")))
            .collect()
    }

    fn tree(layout: LayoutType, n: usize) -> RenderTree {
        layout::select(layout, &links(n), RenderOptions::default())
    }

    #[test]
    fn test_empty_tree_shows_placeholder() {
        let tree = tree(LayoutType::Links, 0);
        let styles = test_styles();

        let mut term = TestTerminal::new();
        term.render_widget(
            ProfileContent::new(&tree, &styles, IconMode::Unicode),
            term.area(),
        );

        assert!(term.buffer_contains(EMPTY_MESSAGE));
    }

    #[test]
    fn test_mixed_layout_height() {
        let tree = tree(LayoutType::Mixed, 4);
        let styles = test_styles();
        let content = ProfileContent::new(&tree, &styles, IconMode::Unicode);
        // One row of featured tiles, a gap, two rows
        assert_eq!(content.height(), TILE_HEIGHT + BLOCK_GAP + 2 * ROW_HEIGHT);
    }

    #[test]
    fn test_mixed_layout_draws_tiles_then_rows() {
        let tree = tree(LayoutType::Mixed, 3);
        let styles = test_styles();

        let mut term = TestTerminal::new();
        term.render_widget(
            ProfileContent::new(&tree, &styles, IconMode::Unicode),
            term.area(),
        );

        assert!(term.line_contains(2, "Link 0"));
        assert!(term.line_contains(2, "Link 1"));
        assert!(term.line_contains(TILE_HEIGHT + BLOCK_GAP + 1, "Link 2"));
    }

    #[test]
    fn test_no_scroll_when_selection_visible() {
        let tree = tree(LayoutType::Links, 10);
        let styles = test_styles();
        let id = LinkId::from("1");
        let content = ProfileContent::new(&tree, &styles, IconMode::Unicode).selected(Some(&id));
        assert_eq!(content.scroll_offset(12), 0);
    }

    #[test]
    fn test_scrolls_to_selected_link() {
        let tree = tree(LayoutType::Links, 10);
        let styles = test_styles();
        let id = LinkId::from("7");

        let content = ProfileContent::new(&tree, &styles, IconMode::Unicode).selected(Some(&id));
        // Link 7 spans rows 21..24; a 12-row viewport must start at 12
        assert_eq!(content.scroll_offset(12), 12);

        let mut term = TestTerminal::compact();
        term.render_widget(content, term.area());
        assert!(term.buffer_contains("Link 7"));
        assert!(!term.buffer_contains("Link 0"));
    }
}
