//! Icon lookup with fallbacks
//!
//! `<dir>/<name>.png`, then `<dir>/<name>.gif`, then `<dir>/cancel.gif`.
//! A missing icon is never an error, the tile just renders without one.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

/// Icon shown on the back tile
pub const BACK_ICON: &str = "arrow.left";
/// Universal fallback, looked up as `<dir>/cancel.gif`
pub const FALLBACK_ICON: &str = "cancel";

/// A resolved logical icon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub name: String,
    pub path: Option<PathBuf>,
}

impl Icon {
    /// Image bytes, if a file was found
    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.path.as_ref().and_then(|p| fs::read(p).ok())
    }

    /// One-character stand-in for the bitmap
    pub fn glyph(&self) -> String {
        let marker = if self.path.is_some() { '◆' } else { '◇' };
        let letter = self
            .name
            .rsplit('.')
            .next()
            .and_then(|s| s.chars().next())
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default();
        format!("{marker}{letter}")
    }
}

/// Resolves and memoizes icons for one icon directory
#[derive(Debug)]
pub struct IconResolver {
    dir: PathBuf,
    cache: HashMap<String, Icon>,
}

impl IconResolver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: HashMap::new(),
        }
    }

    pub fn resolve(&mut self, name: &str) -> &Icon {
        let dir = &self.dir;
        self.cache.entry(name.to_string()).or_insert_with(|| {
            let path = [
                dir.join(format!("{name}.png")),
                dir.join(format!("{name}.gif")),
                dir.join(format!("{FALLBACK_ICON}.gif")),
            ]
            .into_iter()
            .find(|p| p.is_file());

            debug!(icon = name, found = ?path, "Resolved icon");
            Icon {
                name: name.to_string(),
                path,
            }
        })
    }
}

/// Icon name for an item without an explicit `icon`
pub fn default_icon_name(label: &str) -> String {
    let initial = label
        .chars()
        .next()
        .map(|c| c.to_lowercase().to_string())
        .unwrap_or_default();
    format!("scrabble.{initial}")
}
