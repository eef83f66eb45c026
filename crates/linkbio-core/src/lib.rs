//! # linkbio-core - Core Domain Types
//!
//! Foundation crate for linkbio. Provides the profile data model, the icon
//! and theme catalogs, and the pure layout renderers that turn a link list
//! into a [`RenderTree`].
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, regex, rand, tracing).
//!
//! ## Public API
//!
//! ### Data Model (`link`, `settings`, `profile`, `session`)
//! - [`Link`], [`LinkId`], [`LinkDisplay`], [`LinkDraft`] - Link records and drafts
//! - [`ProfileSettings`], [`LayoutType`], [`FontStyle`], [`Background`] - Appearance
//! - [`Profile`] - Public identity record
//! - [`Session`], [`User`], [`AuthEvent`] - Auth backend shapes
//!
//! ### Catalogs (`icons`, `theme`)
//! - [`icons::resolve()`] - Icon key to [`Glyph`], never fails
//! - [`theme::resolve()`] - Theme id to [`Theme`], never fails
//!
//! ### Rendering (`layout`, `render`)
//! - [`layout::select()`] - Profile content selector
//! - [`RenderTree`], [`RenderBlock`], [`LinkRow`], [`LinkTile`] - Render output
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use linkbio_core::prelude::*;
//! ```

pub mod error;
pub mod icons;
pub mod layout;
pub mod link;
pub mod logging;
pub mod profile;
pub mod render;
pub mod session;
pub mod settings;
pub mod theme;

/// Prelude for common imports used throughout all linkbio crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use icons::{Glyph, IconMode, DEFAULT_ICON};
pub use layout::{EditMode, RenderOptions, Viewport};
pub use link::{Link, LinkDisplay, LinkDraft, LinkId, REQUIRED_FIELDS_MESSAGE};
pub use profile::{validate_username, MediaKind, Profile};
pub use render::{
    EditControls, EditIntent, LinkRow, LinkTile, RenderBlock, RenderTree, TileMedia,
};
pub use session::{AuthEvent, AuthEventKind, Session, User};
pub use settings::{
    AppearanceUpdate, Background, BackgroundStyle, FontStyle, LayoutType, ProfileSettings,
};
pub use theme::{Palette, Rgb, Theme};
