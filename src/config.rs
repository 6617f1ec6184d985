//! Menu configuration loading
//!
//! The menu is a YAML sequence of items. Each item is either a leaf
//! (`command`), a branch (`items`) or an inert display tile (neither).
//!
//! ```yaml
//! - label: Network
//!   items:
//!     - label: Ping
//!       command: ping -c 3 1.1.1.1
//! - label: Reboot
//!   color: "#603cba"
//!   command: sudo reboot
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use serde::Deserialize;
use tracing::debug;

use crate::error::{PiMenuError, Result};

/// File name of the menu definition, looked up next to the executable
pub const CONFIG_FILE_NAME: &str = "pimenu.yaml";

/// One entry of the menu tree
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuItem {
    pub label: String,
    /// Stable id used for the navigation path (falls back to `label`)
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default, rename = "items")]
    pub children: Option<Vec<MenuItem>>,
}

impl MenuItem {
    /// Leaf with a command
    pub fn leaf(label: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
            ..Self::inert(label)
        }
    }

    /// Branch with nested items
    pub fn branch(label: impl Into<String>, children: Vec<MenuItem>) -> Self {
        Self {
            children: Some(children),
            ..Self::inert(label)
        }
    }

    /// Display-only tile
    pub fn inert(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            name: None,
            icon: None,
            color: None,
            command: None,
            children: None,
        }
    }

    /// `items` wins over `command` when both are present
    pub fn is_branch(&self) -> bool {
        self.children.is_some()
    }

    /// Path segment contributed by this item
    pub fn path_id(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.label)
    }
}

/// Root-level items, immutable until an explicit reload
pub type MenuTree = Arc<[MenuItem]>;

/// Last observed modification time of the configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigVersion(Option<SystemTime>);

impl ConfigVersion {
    /// Read the current version of `path`
    pub fn of(path: &Path) -> Self {
        Self(fs::metadata(path).and_then(|m| m.modified()).ok())
    }
}

/// Parse the menu file at `path`
pub fn load(path: &Path) -> Result<(MenuTree, ConfigVersion)> {
    let version = ConfigVersion::of(path);
    let text = fs::read_to_string(path).map_err(|e| config_error(path, read_reason(&e)))?;
    let tree = parse(&text).map_err(|reason| config_error(path, reason))?;

    debug!(path = %path.display(), items = tree.len(), "Loaded menu configuration");
    Ok((tree, version))
}

/// Parse a menu document
pub fn parse(text: &str) -> std::result::Result<MenuTree, String> {
    let items: Vec<MenuItem> = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
    Ok(items.into())
}

/// Cheap modification check, done on every back-navigation
pub fn has_changed(path: &Path, previous: ConfigVersion) -> bool {
    ConfigVersion::of(path) != previous
}

/// Location of the menu file and its last loaded version
#[derive(Debug, Clone)]
pub struct ConfigSource {
    path: PathBuf,
    version: Option<ConfigVersion>,
}

impl ConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            version: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the tree and remember its version
    pub fn load(&mut self) -> Result<MenuTree> {
        let (tree, version) = load(&self.path)?;
        self.version = Some(version);
        Ok(tree)
    }

    /// True when the file was edited since the last `load`
    pub fn has_changed(&self) -> bool {
        match self.version {
            Some(version) => has_changed(&self.path, version),
            None => true,
        }
    }
}

fn read_reason(err: &std::io::Error) -> String {
    match err.kind() {
        ErrorKind::NotFound => format!("missing {}", CONFIG_FILE_NAME),
        _ => err.to_string(),
    }
}

fn config_error(path: &Path, reason: String) -> PiMenuError {
    PiMenuError::ConfigParse {
        path: path.to_path_buf(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_items() {
        let tree = parse(
            r##"
- label: Tools
  name: tools
  items:
    - label: Uptime
      command: uptime
- label: Logo
  icon: logo
  color: "#ff0000"
"##,
        )
        .unwrap();

        assert_eq!(tree.len(), 2);
        assert!(tree[0].is_branch());
        assert_eq!(tree[0].path_id(), "tools");
        let children = tree[0].children.as_ref().unwrap();
        assert_eq!(children[0].command.as_deref(), Some("uptime"));
        assert_eq!(tree[1].icon.as_deref(), Some("logo"));
        assert!(tree[1].command.is_none() && !tree[1].is_branch());
    }

    #[test]
    fn items_win_over_command() {
        let tree = parse("- label: Both\n  command: ls\n  items: []\n").unwrap();
        assert!(tree[0].is_branch());
    }

    #[test]
    fn label_is_required() {
        assert!(parse("- command: ls\n").is_err());
    }

    #[test]
    fn root_must_be_a_sequence() {
        assert!(parse("label: Alone\n").is_err());
    }

    #[test]
    fn path_id_falls_back_to_label() {
        assert_eq!(MenuItem::leaf("Shell", "sh").path_id(), "Shell");
    }
}
