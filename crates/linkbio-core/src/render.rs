//! Render tree produced by the layout renderers.
//!
//! The tree is presentation-neutral: the terminal preview draws it with
//! ratatui and the headless mode prints it as JSON.

use serde::Serialize;

use crate::icons::Glyph;
use crate::link::LinkId;
use crate::settings::LayoutType;

/// An edit request raised from a rendered link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "link_id", rename_all = "snake_case")]
pub enum EditIntent {
    Edit(LinkId),
    Delete(LinkId),
}

impl EditIntent {
    pub fn link_id(&self) -> &LinkId {
        match self {
            EditIntent::Edit(id) | EditIntent::Delete(id) => id,
        }
    }
}

/// Edit affordances attached to a node in editable mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditControls {
    pub edit: EditIntent,
    pub delete: EditIntent,
}

impl EditControls {
    pub fn for_link(id: &LinkId) -> Self {
        Self {
            edit: EditIntent::Edit(id.clone()),
            delete: EditIntent::Delete(id.clone()),
        }
    }
}

/// A link rendered as a full-width row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRow {
    pub link_id: LinkId,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyph: Option<&'static Glyph>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls: Option<EditControls>,
}

/// What fills a tile's media slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TileMedia {
    Photo(String),
    Glyph(&'static Glyph),
}

/// A link rendered as a square tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkTile {
    pub link_id: LinkId,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<TileMedia>,
    /// Tiles heading the mixed layout
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls: Option<EditControls>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderBlock {
    Rows { rows: Vec<LinkRow> },
    Grid { columns: u8, tiles: Vec<LinkTile> },
}

impl RenderBlock {
    pub fn len(&self) -> usize {
        match self {
            RenderBlock::Rows { rows } => rows.len(),
            RenderBlock::Grid { tiles, .. } => tiles.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The rendered representation of a profile's link list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderTree {
    pub layout: LayoutType,
    pub text_shadow: bool,
    pub blocks: Vec<RenderBlock>,
}

impl RenderTree {
    pub fn new(layout: LayoutType, text_shadow: bool) -> Self {
        Self {
            layout,
            text_shadow,
            blocks: Vec::new(),
        }
    }

    /// Append a block of rows; empty blocks are dropped
    pub fn push_rows(&mut self, rows: Vec<LinkRow>) {
        if !rows.is_empty() {
            self.blocks.push(RenderBlock::Rows { rows });
        }
    }

    /// Append a grid block; empty blocks are dropped
    pub fn push_grid(&mut self, columns: u8, tiles: Vec<LinkTile>) {
        if !tiles.is_empty() {
            self.blocks.push(RenderBlock::Grid { columns, tiles });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total rendered links
    pub fn item_count(&self) -> usize {
        self.blocks.iter().map(RenderBlock::len).sum()
    }

    pub fn row_count(&self) -> usize {
        self.rows().count()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }

    pub fn featured_count(&self) -> usize {
        self.tiles().filter(|t| t.featured).count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &LinkRow> {
        self.blocks.iter().flat_map(|block| match block {
            RenderBlock::Rows { rows } => rows.as_slice(),
            RenderBlock::Grid { .. } => &[],
        })
    }

    pub fn tiles(&self) -> impl Iterator<Item = &LinkTile> {
        self.blocks.iter().flat_map(|block| match block {
            RenderBlock::Grid { tiles, .. } => tiles.as_slice(),
            RenderBlock::Rows { .. } => &[],
        })
    }

    /// Link ids in render order
    pub fn link_ids(&self) -> Vec<&LinkId> {
        self.blocks
            .iter()
            .flat_map(|block| -> Vec<&LinkId> {
                match block {
                    RenderBlock::Rows { rows } => rows.iter().map(|r| &r.link_id).collect(),
                    RenderBlock::Grid { tiles, .. } => tiles.iter().map(|t| &t.link_id).collect(),
                }
            })
            .collect()
    }
}
