//! Preview state (Model in TEA pattern)

use linkbio_core::{
    layout, IconMode, Link, LinkId, Palette, Profile, ProfileSettings, RenderOptions, RenderTree,
    Viewport,
};

use crate::auth::AuthState;
use crate::config::Settings;
use crate::editor::LinkEditor;
use crate::guard::{GuardDecision, Location, RouteGuard};

/// Location the preview sits on: the owner's dashboard
pub const PREVIEW_LOCATION: &str = "/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewPhase {
    #[default]
    Running,
    Quitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line toast shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PreviewState {
    pub phase: PreviewPhase,
    pub profile: Profile,
    /// Appearance as last persisted; the link list lives in `editor`
    pub settings: ProfileSettings,
    pub editor: LinkEditor,
    pub auth: AuthState,
    pub guard: RouteGuard,
    pub location: Location,
    pub selected: Option<usize>,
    pub width: u16,
    pub height: u16,
    pub narrow_breakpoint: u16,
    pub text_shadow_override: Option<bool>,
    pub icons: IconMode,
    pub status: Option<StatusMessage>,
    /// A link or appearance write is in flight
    pub saving: bool,
    /// Ticks seen so far; drives the pending spinner
    pub ticks: usize,
}

impl PreviewState {
    pub fn new(profile: Profile, settings: ProfileSettings, config: &Settings) -> Self {
        let editor = LinkEditor::new(profile.id.clone(), settings.links.clone());
        Self {
            phase: PreviewPhase::Running,
            profile,
            settings,
            editor,
            auth: AuthState::resolving(),
            guard: RouteGuard::from_settings(&config.auth),
            location: Location::new(PREVIEW_LOCATION),
            selected: None,
            width: 80,
            height: 24,
            narrow_breakpoint: config.ui.narrow_breakpoint,
            text_shadow_override: config.ui.text_shadow,
            icons: config.ui.icons,
            status: None,
            saving: false,
            ticks: 0,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == PreviewPhase::Quitting
    }

    pub fn decision(&self) -> GuardDecision {
        self.guard.evaluate(&self.auth, &self.location)
    }

    /// Links carry edit controls only for the signed-in owner
    pub fn is_editable(&self) -> bool {
        self.decision() == GuardDecision::Allow
            && self.auth.user_id() == Some(self.profile.user_id.as_str())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::from_width(self.width, self.narrow_breakpoint)
    }

    pub fn text_shadow(&self) -> bool {
        self.text_shadow_override.unwrap_or(self.settings.text_shadow)
    }

    pub fn palette(&self) -> &'static Palette {
        self.settings.theme().palette(self.settings.is_dark_mode)
    }

    pub fn links(&self) -> &[Link] {
        self.editor.links()
    }

    pub fn render_tree(&self) -> RenderTree {
        let options = RenderOptions::new(self.text_shadow())
            .viewport(self.viewport())
            .editable(self.is_editable());
        layout::select(self.settings.layout_type, self.links(), options)
    }

    pub fn selected_link_id(&self) -> Option<&LinkId> {
        self.selected
            .and_then(|i| self.links().get(i))
            .map(|link| &link.id)
    }

    pub fn select_next(&mut self) {
        let len = self.links().len();
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        });
    }

    pub fn select_previous(&mut self) {
        let len = self.links().len();
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        });
    }

    /// Keep the selection inside the list after it shrinks
    pub fn clamp_selection(&mut self) {
        let len = self.links().len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(i) if i >= len => Some(len - 1),
            other => other,
        };
    }

    pub fn set_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
    }
}
