//! Status bar widget
//!
//! Shows who is signed in, the active layout and theme, and either the
//! latest status message or the key hints for the current screen.

use linkbio_app::state::{PreviewState, StatusKind};
use linkbio_app::{AuthPhase, GuardDecision};
use linkbio_core::Viewport;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::palette;

pub struct StatusBar<'a> {
    state: &'a PreviewState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a PreviewState) -> Self {
        Self { state }
    }

    fn auth_indicator(&self) -> Span<'static> {
        let (icon, label, color) = match self.state.auth.phase() {
            AuthPhase::Resolving => ("◌", "resolving".to_string(), palette::AUTH_RESOLVING),
            AuthPhase::Unauthenticated => ("○", "signed out".to_string(), palette::AUTH_SIGNED_OUT),
            AuthPhase::Authenticated if self.state.is_editable() => {
                ("●", "owner".to_string(), palette::AUTH_OWNER)
            }
            AuthPhase::Authenticated => {
                let who = self.state.auth.user_id().unwrap_or("visitor");
                ("●", who.to_string(), palette::AUTH_VISITOR)
            }
        };
        Span::styled(
            format!("{icon} {label}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )
    }

    fn appearance(&self) -> Span<'static> {
        let settings = &self.state.settings;
        let mode = if settings.is_dark_mode { "dark" } else { "light" };
        let viewport = match self.state.viewport() {
            Viewport::Narrow => "narrow",
            Viewport::Wide => "wide",
        };
        Span::styled(
            format!(
                " {} · {} {} · {}",
                settings.layout_type,
                settings.theme().name,
                mode,
                viewport
            ),
            Style::default().fg(palette::STATUS_FG),
        )
    }

    fn hints(&self) -> Vec<Span<'static>> {
        let keys: &[(&str, &str)] = match self.state.decision() {
            GuardDecision::Pending => &[("q", "quit")],
            GuardDecision::Redirect { .. } => &[("i", "sign in"), ("q", "quit")],
            GuardDecision::Allow if self.state.is_editable() => &[
                ("j/k", "select"),
                ("d", "display"),
                ("x", "delete"),
                ("l", "layout"),
                ("t", "dark"),
                ("o", "sign out"),
            ],
            GuardDecision::Allow => &[("j/k", "select"), ("r", "reload"), ("o", "sign out")],
        };
        keys.iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(format!(" {key}"), Style::default().fg(palette::STATUS_KEY)),
                    Span::styled(format!(" {label}"), Style::default().fg(palette::STATUS_FG)),
                ]
            })
            .collect()
    }

    fn message(&self) -> Option<Span<'static>> {
        let status = self.state.status.as_ref()?;
        let color = match status.kind {
            StatusKind::Info => palette::STATUS_INFO,
            StatusKind::Error => palette::STATUS_ERROR,
        };
        Some(Span::styled(
            format!(" {}", status.text),
            Style::default().fg(color),
        ))
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![self.auth_indicator(), self.appearance()];
        if self.state.saving {
            spans.push(Span::styled(
                " · saving…",
                Style::default().fg(palette::AUTH_RESOLVING),
            ));
        }
        spans.push(Span::raw(" │"));
        match self.message() {
            Some(message) => spans.push(message),
            None => spans.extend(self.hints()),
        }

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(palette::STATUS_BG))
            .render(area, buf);
    }
}
