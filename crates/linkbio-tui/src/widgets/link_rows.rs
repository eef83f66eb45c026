//! Full-width link rows (list layout, and the tail of the mixed layout)

use linkbio_core::{IconMode, LinkId, LinkRow};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::truncate;
use crate::theme::styles::ProfileStyles;

/// Height of one row card (border + label + border)
pub const ROW_HEIGHT: u16 = 3;

/// Edit hints drawn inside editable rows
const EDIT_HINT: &str = "d·x";

pub struct LinkRows<'a> {
    rows: &'a [LinkRow],
    styles: &'a ProfileStyles,
    icons: IconMode,
    selected: Option<&'a LinkId>,
}

impl<'a> LinkRows<'a> {
    pub fn new(rows: &'a [LinkRow], styles: &'a ProfileStyles, icons: IconMode) -> Self {
        Self {
            rows,
            styles,
            icons,
            selected: None,
        }
    }

    pub fn selected(mut self, selected: Option<&'a LinkId>) -> Self {
        self.selected = selected;
        self
    }

    /// Rows needed to draw every link
    pub fn height(rows: &[LinkRow]) -> u16 {
        (rows.len() as u16).saturating_mul(ROW_HEIGHT)
    }

    fn row_line(&self, row: &LinkRow, width: u16) -> Line<'static> {
        let mut text = String::new();
        if let Some(glyph) = row.glyph {
            text.push_str(glyph.symbol(self.icons));
        }
        if let Some(label) = &row.label {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(label);
        }
        let hint_width = if row.controls.is_some() {
            EDIT_HINT.len() + 1
        } else {
            0
        };
        let available = (width as usize).saturating_sub(hint_width);

        let mut spans = vec![Span::styled(truncate(&text, available), self.styles.label)];
        if row.controls.is_some() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(EDIT_HINT, self.styles.muted));
        }
        Line::from(spans)
    }
}

impl Widget for LinkRows<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (i, row) in self.rows.iter().enumerate() {
            let y = area.y + (i as u16).saturating_mul(ROW_HEIGHT);
            if y + ROW_HEIGHT > area.bottom() {
                break;
            }
            let card = Rect::new(area.x, y, area.width, ROW_HEIGHT);
            let block = self.styles.card_block(self.selected == Some(&row.link_id));
            let inner = block.inner(card);
            block.render(card, buf);

            Paragraph::new(self.row_line(row, inner.width))
                .alignment(Alignment::Center)
                .render(inner, buf);
        }
    }
}
