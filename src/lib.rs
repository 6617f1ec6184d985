//! PiMenu - touchscreen tile launcher

pub mod config;
pub mod error;
pub mod execution;
pub mod icons;
pub mod navigation;
pub mod runner;
pub mod settings;
pub mod tui;

pub use config::{ConfigSource, ConfigVersion, MenuItem, MenuTree};
pub use error::{FixSuggestion, PiMenuError};
pub use execution::{ExecutionController, ExecutionPhase};
pub use icons::{Icon, IconResolver};
pub use navigation::{GridLayout, NavigationFrame, NavigationStack, Tile, TileAction};
pub use runner::{parse_command, run, ProcessHandle, ProcessStatus};
pub use settings::Settings;
