//! AppState - Domain Layer
//!
//! Owns the navigation stack, the icon resolver and the (single) running
//! execution. Input handlers translate user intent into [`Action`]s and
//! feed them to [`AppState::dispatch`]; rendering only reads this state.

use tracing::{debug, info, warn};

use crate::config::ConfigSource;
use crate::error::{FixSuggestion, PiMenuError, Result};
use crate::execution::{ExecutionController, ExecutionPhase};
use crate::icons::IconResolver;
use crate::navigation::{NavigationStack, Tile, TileAction};

use super::events::Action;

// ─────────────────────────────────────────────────────────────────────────────
// Modal dialogs
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Command finished; acknowledging dismisses the execution screen
    Finished { message: String },
    /// A command could not be started
    Error { message: String },
    /// Configuration unusable; acknowledging quits
    Fatal { message: String },
}

impl Modal {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Finished { .. } => "Status",
            Self::Error { .. } => "Error",
            Self::Fatal { .. } => "Error!",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Finished { message } | Self::Error { message } | Self::Fatal { message } => {
                message
            }
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Finished { .. })
    }
}

fn describe(err: &PiMenuError) -> String {
    match err.fix_suggestion() {
        Some(fix) => format!("{err}\n\n{fix}"),
        None => err.to_string(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Core State
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct AppState {
    pub config: ConfigSource,
    pub nav: NavigationStack,
    pub icons: IconResolver,
    pub execution: Option<ExecutionController>,
    pub modal: Option<Modal>,
    /// Keyboard cursor within the top frame
    pub selected: usize,
    pub should_quit: bool,
    fatal: Option<PiMenuError>,
}

impl AppState {
    pub fn new(config: ConfigSource, icons: IconResolver) -> Self {
        Self {
            config,
            nav: NavigationStack::new(),
            icons,
            execution: None,
            modal: None,
            selected: 0,
            should_quit: false,
            fatal: None,
        }
    }

    /// (Re)load the menu file and show its root frame
    pub fn load(&mut self) -> Result<()> {
        let tree = self.config.load()?;
        self.nav.initialize(&tree);
        self.selected = 0;
        info!(path = %self.config.path().display(), "Menu loaded");
        Ok(())
    }

    /// Record a fatal error and show it; acknowledging it quits
    pub fn fail(&mut self, err: PiMenuError) {
        warn!(error = %err, "Fatal error");
        self.modal = Some(Modal::Fatal {
            message: describe(&err),
        });
        self.fatal = Some(err);
    }

    pub fn take_fatal(&mut self) -> Option<PiMenuError> {
        self.fatal.take()
    }

    pub fn top_tiles(&self) -> &[Tile] {
        self.nav.top().map(|f| f.tiles.as_slice()).unwrap_or(&[])
    }

    /// Icon stand-ins for the top frame's tiles
    pub fn tile_glyphs(&mut self) -> Vec<String> {
        let Some(frame) = self.nav.top() else {
            return Vec::new();
        };
        frame
            .tiles
            .iter()
            .map(|tile| self.icons.resolve(&tile.icon).glyph())
            .collect()
    }

    pub fn is_running(&self) -> bool {
        self.execution.is_some()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Dispatch
    // ─────────────────────────────────────────────────────────────────────

    pub async fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Acknowledge => self.acknowledge().await,
            Action::Terminate => self.request_terminate(),
            Action::Back => self.go_back(),
            Action::Activate => self.activate(self.selected),
            Action::ActivateTile(index) => {
                self.selected = index;
                self.activate(index);
            }
            Action::Move { dx, dy } => self.move_selection(dx, dy),
            Action::None => {}
        }
    }

    /// Run the pressed tile's bound action
    pub fn activate(&mut self, index: usize) {
        if self.modal.is_some() || self.is_running() {
            return;
        }
        let Some(action) = self.top_tiles().get(index).map(|t| t.action.clone()) else {
            return;
        };

        match action {
            TileAction::Back => self.go_back(),
            TileAction::Branch { children, path } => {
                self.nav.push(&children, path);
                self.selected = 0;
            }
            TileAction::Run { command } => self.launch(&command),
            TileAction::Inert => debug!(index, "Inert tile pressed"),
        }
    }

    /// Pop one level, or reload from the root if the file changed
    pub fn go_back(&mut self) {
        if self.modal.is_some() || self.is_running() || self.nav.is_root() {
            return;
        }
        if self.config.has_changed() {
            info!("Configuration changed, reloading");
            self.reload();
            return;
        }
        if let Err(e) = self.nav.pop() {
            debug!(error = %e, "Back ignored");
        }
        self.selected = 0;
    }

    /// Start `command`; refused while another one is active
    pub fn launch(&mut self, command: &str) {
        if let Some(exec) = &self.execution {
            warn!(active = exec.command(), "Launch refused, a command is active");
            return;
        }

        let mut exec = ExecutionController::launch(command);
        if exec.phase() == ExecutionPhase::Dismissed {
            if let Some(err) = exec.take_error() {
                self.report(err);
            }
            self.return_to_menu();
            return;
        }
        self.execution = Some(exec);
    }

    /// Drain output and raise the exit notification once
    pub fn tick(&mut self) {
        let Some(exec) = self.execution.as_mut() else {
            return;
        };
        exec.tick();
        if exec.phase() == ExecutionPhase::Finished && self.modal.is_none() {
            if let Some(message) = exec.exit_message() {
                self.modal = Some(Modal::Finished { message });
            }
        }
    }

    pub fn request_terminate(&mut self) {
        if let Some(exec) = self.execution.as_mut() {
            exec.request_terminate();
        }
    }

    /// Close the current modal
    pub async fn acknowledge(&mut self) {
        match self.modal.take() {
            Some(Modal::Fatal { message }) => {
                self.modal = Some(Modal::Fatal { message });
                self.should_quit = true;
            }
            Some(Modal::Finished { .. }) => {
                if let Some(mut exec) = self.execution.take() {
                    exec.dismiss().await;
                }
                self.return_to_menu();
            }
            Some(Modal::Error { .. }) | None => {}
        }
    }

    /// After any action the user lands back on the menu root
    fn return_to_menu(&mut self) {
        if self.config.has_changed() {
            self.reload();
        } else {
            self.nav.reset_to_root();
            self.selected = 0;
        }
    }

    fn reload(&mut self) {
        if let Err(e) = self.load() {
            self.report(e);
        }
    }

    /// Show `err` once; fatal errors end the session when acknowledged
    pub fn report(&mut self, err: PiMenuError) {
        if err.is_fatal() {
            self.fail(err);
        } else {
            warn!(error = %err, "Action failed");
            self.modal = Some(Modal::Error {
                message: describe(&err),
            });
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Keyboard cursor
    // ─────────────────────────────────────────────────────────────────────

    pub fn move_selection(&mut self, dx: i32, dy: i32) {
        let Some(frame) = self.nav.top() else {
            return;
        };
        let count = frame.tiles.len();
        if count == 0 {
            return;
        }
        let grid = frame.layout();
        let (row, col) = grid.cell(self.selected.min(count - 1));
        let row = (row as i32 + dy).clamp(0, grid.rows as i32 - 1) as usize;
        let col = (col as i32 + dx).clamp(0, grid.cols as i32 - 1) as usize;

        // The last row may be short; fall back to its last tile
        self.selected = grid.index(row, col, count).unwrap_or(count - 1);
    }
}
