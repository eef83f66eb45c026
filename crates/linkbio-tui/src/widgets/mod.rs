//! Custom widget components

mod guard;
mod header;
mod link_rows;
mod profile_content;
mod status_bar;
mod tile_grid;

pub use guard::{PendingScreen, RedirectScreen};
pub use header::ProfileHeader;
pub use link_rows::LinkRows;
pub use profile_content::ProfileContent;
pub use status_bar::StatusBar;
pub use tile_grid::TileGrid;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `text` to at most `width` columns, marking the cut with `…`
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
