//! TUI Module - Kiosk launcher screen
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        UI LAYER (widgets/)                          │
//! │  Pure rendering. TileGrid, OutputPane, TerminateButton, Modal.      │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ AppState (read-only)
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      DOMAIN LAYER (state.rs)                        │
//! │  NavigationStack + ExecutionController. Actions → transitions.      │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ Action
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       INPUT LAYER (events.rs)                       │
//! │  Keys and taps, hit-tested against the rendered grid.               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod events;
mod state;
mod theme;

pub mod widgets;

pub use app::{render, TuiApp};
pub use events::{handle_key_event, handle_mouse_event, Action};
pub use state::{AppState, Modal};
pub use theme::KioskTheme;

use crate::error::PiMenuError;
use crate::settings::Settings;

/// Run the launcher on `state`; returns the fatal error that ended it
pub async fn run(state: AppState, settings: Settings) -> anyhow::Result<Option<PiMenuError>> {
    TuiApp::new(state, settings).run().await
}
