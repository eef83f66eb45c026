//! Main render/view function (View in TEA pattern)

use linkbio_app::state::PreviewState;
use linkbio_app::GuardDecision;
use ratatui::layout::Rect;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::layout;
use crate::theme::styles::ProfileStyles;
use crate::widgets;

/// Ticks per spinner frame
const SPINNER_TICKS: usize = 4;

/// Render the complete UI (View function in TEA)
pub fn view(frame: &mut Frame, state: &PreviewState) {
    let area = frame.area();
    let areas = layout::create(area);

    // Guard screens cover everything above the status bar
    let body = Rect::new(area.x, area.y, area.width, areas.status.y - area.y);

    match state.decision() {
        GuardDecision::Pending => {
            frame.render_widget(widgets::PendingScreen::new(state.ticks / SPINNER_TICKS), body);
        }
        decision @ GuardDecision::Redirect { .. } => {
            frame.render_widget(widgets::RedirectScreen::new(&decision), body);
        }
        GuardDecision::Allow => {
            let styles = ProfileStyles::new(state.palette(), state.text_shadow());
            frame.render_widget(Block::default().style(styles.page), area);

            frame.render_widget(
                widgets::ProfileHeader::new(&state.profile, &styles),
                areas.header,
            );

            let tree = state.render_tree();
            frame.render_widget(
                widgets::ProfileContent::new(&tree, &styles, state.icons)
                    .selected(state.selected_link_id()),
                areas.content,
            );
        }
    }

    frame.render_widget(widgets::StatusBar::new(state), areas.status);
}
