//! Profile header: avatar placeholder, display name, handle and bio

use linkbio_core::Profile;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::theme::styles::ProfileStyles;

pub struct ProfileHeader<'a> {
    profile: &'a Profile,
    styles: &'a ProfileStyles,
}

impl<'a> ProfileHeader<'a> {
    pub fn new(profile: &'a Profile, styles: &'a ProfileStyles) -> Self {
        Self { profile, styles }
    }

    /// Initials in a badge; a camera mark when an avatar image is set
    fn avatar(&self) -> Span<'static> {
        let badge = match &self.profile.avatar_url {
            Some(_) => "( ◉ )".to_string(),
            None => format!("( {} )", self.profile.initials()),
        };
        Span::styled(badge, self.styles.accent.add_modifier(Modifier::BOLD))
    }
}

impl Widget for ProfileHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let mut lines = vec![
            Line::from(self.avatar()),
            Line::from(Span::styled(
                self.profile.title(),
                self.styles.text.add_modifier(Modifier::BOLD),
            )),
        ];
        if !self.profile.display_name.trim().is_empty() {
            lines.push(Line::from(Span::styled(
                format!("@{}", self.profile.username),
                self.styles.muted,
            )));
        }
        if !self.profile.bio.trim().is_empty() {
            lines.push(Line::from(Span::styled(
                self.profile.bio.trim().to_string(),
                self.styles.text,
            )));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
