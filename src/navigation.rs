//! Navigation Stack
//!
//! One [`NavigationFrame`] per visited menu level. Only the top frame is
//! visible; frames below are hidden until the ones above are popped.

use ratatui::style::Color;
use tracing::{debug, warn};

use crate::config::MenuItem;
use crate::error::{PiMenuError, Result};
use crate::icons::{default_icon_name, BACK_ICON};

// ─────────────────────────────────────────────────────────────────────────────
// Tiles
// ─────────────────────────────────────────────────────────────────────────────

/// What pressing a tile does, captured when the frame is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileAction {
    Back,
    Branch {
        children: Vec<MenuItem>,
        path: Vec<String>,
    },
    Run {
        command: String,
    },
    /// Display-only item
    Inert,
}

/// Default tile colors
pub mod colors {
    use ratatui::style::Color;

    pub const LEAF: Color = Color::Rgb(0xb9, 0x1d, 0x47);
    pub const BRANCH: Color = Color::Rgb(0x2b, 0x57, 0x97);
    pub const BACK: Color = Color::Rgb(0x00, 0xa3, 0x00);
}

/// Immutable record bound to one grid cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub label: String,
    pub icon: String,
    pub color: Color,
    pub action: TileAction,
}

impl Tile {
    pub fn back() -> Self {
        Self {
            label: "back…".to_string(),
            icon: BACK_ICON.to_string(),
            color: colors::BACK,
            action: TileAction::Back,
        }
    }

    /// Build the tile for `item`, whose ancestors' ids are `parent_path`
    pub fn for_item(item: &MenuItem, parent_path: &[String]) -> Self {
        let (label, default_color, action) = if item.is_branch() {
            let mut path = parent_path.to_vec();
            path.push(item.path_id().to_string());
            (
                format!("{}…", item.label),
                colors::BRANCH,
                TileAction::Branch {
                    children: item.children.clone().unwrap_or_default(),
                    path,
                },
            )
        } else {
            let action = match &item.command {
                Some(command) => TileAction::Run {
                    command: command.clone(),
                },
                None => TileAction::Inert,
            };
            (item.label.clone(), colors::LEAF, action)
        };

        Self {
            label,
            icon: item
                .icon
                .clone()
                .unwrap_or_else(|| default_icon_name(&item.label)),
            color: resolve_color(item.color.as_deref(), default_color),
            action,
        }
    }
}

/// Configured color (`"#rrggbb"`, `"red"`, …), else `default`
pub fn resolve_color(configured: Option<&str>, default: Color) -> Color {
    let Some(value) = configured else {
        return default;
    };
    value.parse().unwrap_or_else(|_| {
        warn!(color = value, "Unknown tile color, using default");
        default
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Grid layout
// ─────────────────────────────────────────────────────────────────────────────

/// Row-major tile grid: `rows = floor(sqrt(k))`, `cols = ceil(k / rows)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
}

impl GridLayout {
    pub fn for_tiles(count: usize) -> Self {
        if count == 0 {
            return Self { rows: 0, cols: 0 };
        }
        let mut rows = 1;
        while (rows + 1) * (rows + 1) <= count {
            rows += 1;
        }
        Self {
            rows,
            cols: count.div_ceil(rows),
        }
    }

    /// `(row, col)` of the tile at `index`
    pub fn cell(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Index of the tile at `(row, col)`, if that cell is used
    pub fn index(&self, row: usize, col: usize, count: usize) -> Option<usize> {
        let index = row * self.cols + col;
        (row < self.rows && col < self.cols && index < count).then_some(index)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Frames and stack
// ─────────────────────────────────────────────────────────────────────────────

/// One rendered menu level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationFrame {
    /// Ancestor ids, used only for correlation in logs
    pub path: Vec<String>,
    pub tiles: Vec<Tile>,
    pub visible: bool,
}

impl NavigationFrame {
    fn new(items: &[MenuItem], path: Vec<String>, with_back: bool) -> Self {
        let mut tiles = Vec::with_capacity(items.len() + usize::from(with_back));
        if with_back {
            tiles.push(Tile::back());
        }
        tiles.extend(items.iter().map(|item| Tile::for_item(item, &path)));

        Self {
            path,
            tiles,
            visible: true,
        }
    }

    pub fn has_back(&self) -> bool {
        self.tiles
            .first()
            .is_some_and(|t| t.action == TileAction::Back)
    }

    pub fn layout(&self) -> GridLayout {
        GridLayout::for_tiles(self.tiles.len())
    }
}

/// Stack of visited menu levels, root at the bottom
#[derive(Debug, Default)]
pub struct NavigationStack {
    frames: Vec<NavigationFrame>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every frame and show a root frame for `tree`
    pub fn initialize(&mut self, tree: &[MenuItem]) {
        self.frames.clear();
        self.frames.push(NavigationFrame::new(tree, Vec::new(), false));
        debug!(tiles = tree.len(), "Navigation initialized");
    }

    /// Descend into `items`; the current top frame is hidden, not dropped
    pub fn push(&mut self, items: &[MenuItem], path: Vec<String>) {
        let with_back = !self.frames.is_empty();
        if let Some(top) = self.frames.last_mut() {
            top.visible = false;
        }
        debug!(path = ?path, depth = self.frames.len() + 1, "Push frame");
        self.frames.push(NavigationFrame::new(items, path, with_back));
    }

    /// Drop the top frame and show the one below
    ///
    /// The root frame cannot be popped; the stack is left untouched.
    pub fn pop(&mut self) -> Result<NavigationFrame> {
        if self.frames.len() <= 1 {
            return Err(PiMenuError::EmptyStack);
        }
        let popped = self.frames.pop().ok_or(PiMenuError::EmptyStack)?;
        if let Some(top) = self.frames.last_mut() {
            top.visible = true;
        }
        debug!(path = ?popped.path, depth = self.frames.len(), "Pop frame");
        Ok(popped)
    }

    /// Keep only the root frame
    pub fn reset_to_root(&mut self) {
        self.frames.truncate(1);
        if let Some(root) = self.frames.first_mut() {
            root.visible = true;
        }
        debug!("Navigation reset to root");
    }

    pub fn top(&self) -> Option<&NavigationFrame> {
        self.frames.last()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[NavigationFrame] {
        &self.frames
    }

    pub fn is_root(&self) -> bool {
        self.frames.len() <= 1
    }
}
