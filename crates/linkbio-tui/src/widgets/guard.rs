//! Screens shown instead of the profile while the route guard holds it back

use linkbio_app::GuardDecision;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::theme::palette;

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Pending indicator while the session resolves
pub struct PendingScreen {
    frame: usize,
}

impl PendingScreen {
    /// `frame` advances the spinner
    pub fn new(frame: usize) -> Self {
        Self { frame }
    }
}

impl Widget for PendingScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .style(Style::default().bg(palette::GUARD_BG))
            .render(area, buf);

        let spinner = SPINNER[self.frame % SPINNER.len()];
        let line = Line::from(vec![
            Span::styled(spinner, Style::default().fg(palette::AUTH_RESOLVING)),
            Span::styled(
                " Checking session…",
                Style::default().fg(palette::GUARD_TEXT),
            ),
        ]);
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(middle_row(area), buf);
    }
}

/// Sign-in prompt after the guard redirected
pub struct RedirectScreen<'a> {
    decision: &'a GuardDecision,
}

impl<'a> RedirectScreen<'a> {
    pub fn new(decision: &'a GuardDecision) -> Self {
        Self { decision }
    }
}

impl Widget for RedirectScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .style(Style::default().bg(palette::GUARD_BG))
            .render(area, buf);

        let target = self.decision.redirect_url().unwrap_or_default();
        let from = match self.decision {
            GuardDecision::Redirect { from, .. } => from.path.as_str(),
            _ => "",
        };
        let muted = Style::default().fg(palette::GUARD_MUTED);
        let lines = vec![
            Line::styled(
                "Sign in required",
                Style::default()
                    .fg(palette::GUARD_TEXT)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::styled(format!("{from} needs a signed-in owner"), muted),
            Line::styled(format!("→ {target}"), Style::default().fg(palette::STATUS_INFO)),
            Line::default(),
            Line::from(vec![
                Span::styled("i", Style::default().fg(palette::STATUS_KEY)),
                Span::styled(" sign in   ", muted),
                Span::styled("q", Style::default().fg(palette::STATUS_KEY)),
                Span::styled(" quit", muted),
            ]),
        ];

        let [_, body, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(lines.len() as u16),
            Constraint::Fill(1),
        ])
        .areas(area);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(body, buf);
    }
}

fn middle_row(area: Rect) -> Rect {
    Rect::new(area.x, area.y + area.height / 2, area.width, area.height.min(1))
}
