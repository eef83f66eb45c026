//! Styles for profile content, built from the active theme palette.

use linkbio_core::Palette;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette::rgb;

/// Styles for one render of the profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileStyles {
    pub page: Style,
    pub card: Style,
    pub text: Style,
    pub muted: Style,
    pub accent: Style,
    /// Link labels; bold when text shadow is on
    pub label: Style,
    pub border: Style,
    pub border_selected: Style,
}

impl ProfileStyles {
    pub fn new(palette: &Palette, text_shadow: bool) -> Self {
        let page = Style::default()
            .bg(rgb(palette.background))
            .fg(rgb(palette.text));
        let card = Style::default()
            .bg(rgb(palette.surface))
            .fg(rgb(palette.text));
        let mut label = card;
        if text_shadow {
            label = label.add_modifier(Modifier::BOLD);
        }
        Self {
            page,
            card,
            text: Style::default().fg(rgb(palette.text)),
            muted: Style::default().fg(rgb(palette.muted)),
            accent: Style::default().fg(rgb(palette.accent)),
            label,
            border: Style::default().fg(rgb(palette.muted)),
            border_selected: Style::default()
                .fg(rgb(palette.accent))
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Rounded card for a link row or tile
    pub fn card_block(&self, selected: bool) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(if selected {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(if selected {
                self.border_selected
            } else {
                self.border
            })
            .style(self.card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkbio_core::theme;
    use ratatui::style::Color;

    #[test]
    fn test_styles_follow_palette() {
        let palette = theme::resolve("default").palette(true);
        let styles = ProfileStyles::new(palette, false);
        assert_eq!(styles.page.bg, Some(rgb(palette.background)));
        assert_eq!(styles.accent.fg, Some(rgb(palette.accent)));
        assert!(matches!(styles.card.bg, Some(Color::Rgb(..))));
    }

    #[test]
    fn test_text_shadow_bolds_labels() {
        let palette = theme::resolve("default").palette(false);
        let plain = ProfileStyles::new(palette, false);
        let shadowed = ProfileStyles::new(palette, true);
        assert!(!plain.label.add_modifier.contains(Modifier::BOLD));
        assert!(shadowed.label.add_modifier.contains(Modifier::BOLD));
    }
}
