//! Square-ish link tiles laid out in equal columns (grid layout, and the
//! featured head of the mixed layout)

use linkbio_core::{IconMode, LinkId, LinkTile, TileMedia};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::truncate;
use crate::theme::styles::ProfileStyles;

/// Height of one tile card
pub const TILE_HEIGHT: u16 = 5;

/// Marker drawn where a photo would be
const PHOTO_MARK: &str = "▣ photo";

pub struct TileGrid<'a> {
    columns: u8,
    tiles: &'a [LinkTile],
    styles: &'a ProfileStyles,
    icons: IconMode,
    selected: Option<&'a LinkId>,
}

impl<'a> TileGrid<'a> {
    pub fn new(
        columns: u8,
        tiles: &'a [LinkTile],
        styles: &'a ProfileStyles,
        icons: IconMode,
    ) -> Self {
        Self {
            columns: columns.max(1),
            tiles,
            styles,
            icons,
            selected: None,
        }
    }

    pub fn selected(mut self, selected: Option<&'a LinkId>) -> Self {
        self.selected = selected;
        self
    }

    /// Rows needed for `count` tiles in `columns` columns
    pub fn height(columns: u8, count: usize) -> u16 {
        let columns = usize::from(columns.max(1));
        (count.div_ceil(columns) as u16).saturating_mul(TILE_HEIGHT)
    }

    fn tile_lines(&self, tile: &LinkTile, width: u16) -> Vec<Line<'static>> {
        let width = width as usize;
        let mut lines = Vec::with_capacity(2);
        match &tile.media {
            Some(TileMedia::Photo(_)) => {
                lines.push(Line::from(Span::styled(PHOTO_MARK, self.styles.accent)))
            }
            Some(TileMedia::Glyph(glyph)) => lines.push(Line::from(Span::styled(
                glyph.symbol(self.icons),
                self.styles.accent,
            ))),
            None => {}
        }
        if let Some(label) = &tile.label {
            lines.push(Line::from(Span::styled(
                truncate(label, width),
                self.styles.label,
            )));
        }
        if tile.controls.is_some() {
            lines.push(Line::from(Span::styled("d·x", self.styles.muted)));
        }
        lines
    }
}

impl Widget for TileGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = u16::from(self.columns);
        let tile_width = area.width / columns;
        if tile_width < 3 {
            return;
        }

        for (i, tile) in self.tiles.iter().enumerate() {
            let col = i as u16 % columns;
            let row = i as u16 / columns;
            let y = area.y + row.saturating_mul(TILE_HEIGHT);
            if y + TILE_HEIGHT > area.bottom() {
                break;
            }
            // Last column absorbs the remainder
            let width = if col + 1 == columns {
                area.width - col * tile_width
            } else {
                tile_width
            };
            let card = Rect::new(area.x + col * tile_width, y, width, TILE_HEIGHT);

            let block = self.styles.card_block(self.selected == Some(&tile.link_id));
            let inner = block.inner(card);
            block.render(card, buf);

            let lines = self.tile_lines(tile, inner.width);
            let top_pad = inner.height.saturating_sub(lines.len() as u16) / 2;
            let text_area = Rect::new(
                inner.x,
                inner.y + top_pad,
                inner.width,
                inner.height - top_pad,
            );
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .render(text_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_styles, TestTerminal};
    use linkbio_core::{layout, Link, LinkDisplay, RenderOptions, Viewport};

    fn tiles(links: &[Link], viewport: Viewport) -> (u8, Vec<LinkTile>) {
        let options = RenderOptions::default().viewport(viewport);
        let tree = layout::grid::render(links, options);
        (viewport.grid_columns(), tree.tiles().cloned().collect())
    }

    #[test]
    fn test_grid_height() {
        assert_eq!(TileGrid::height(3, 0), 0);
        assert_eq!(TileGrid::height(3, 3), TILE_HEIGHT);
        assert_eq!(TileGrid::height(2, 3), 2 * TILE_HEIGHT);
    }

    #[test]
    fn test_tiles_fill_columns() {
        let links: Vec<_> = ["One", "Two", "Three"]
            .iter()
            .map(|t| Link::new(*t, "https://x"))
            .collect();
        let (columns, tiles) = tiles(&links, Viewport::Wide);
        let styles = test_styles();

        let mut term = TestTerminal::new();
        term.render_widget(
            TileGrid::new(columns, &tiles, &styles, IconMode::Unicode),
            term.area(),
        );

        // Glyph on the first interior row, label on the second
        assert!(term.line_contains(2, "One"));
        assert!(term.line_contains(2, "Two"));
        assert!(term.line_contains(2, "Three"));
    }

    #[test]
    fn test_narrow_grid_wraps_to_second_row() {
        let links: Vec<_> = ["One", "Two", "Three"]
            .iter()
            .map(|t| Link::new(*t, "https://x"))
            .collect();
        let (columns, tiles) = tiles(&links, Viewport::Narrow);
        let styles = test_styles();

        let mut term = TestTerminal::compact();
        term.render_widget(
            TileGrid::new(columns, &tiles, &styles, IconMode::Unicode),
            term.area(),
        );

        assert!(term.line_contains(2, "Two"));
        assert!(!term.line_contains(2, "Three"));
        assert!(term.line_contains(2 + TILE_HEIGHT, "Three"));
    }

    #[test]
    fn test_photo_tile_shows_photo_mark() {
        let links = [Link::new("Trip", "https://x").with_photo("https://cdn/trip.jpg")];
        let (columns, tiles) = tiles(&links, Viewport::Wide);
        let styles = test_styles();

        let mut term = TestTerminal::new();
        term.render_widget(
            TileGrid::new(columns, &tiles, &styles, IconMode::Unicode),
            term.area(),
        );

        assert!(term.buffer_contains(PHOTO_MARK));
        assert!(term.buffer_contains("Trip"));
    }

    #[test]
    fn test_title_only_tile_has_single_line() {
        let links = [Link::new("Plain", "https://x").with_display(LinkDisplay::Title)];
        let (columns, tiles) = tiles(&links, Viewport::Wide);
        let styles = test_styles();

        let mut term = TestTerminal::new();
        term.render_widget(
            TileGrid::new(columns, &tiles, &styles, IconMode::Unicode),
            term.area(),
        );

        // Centered in the 3-row interior
        assert!(term.line_contains(2, "Plain"));
    }
}
