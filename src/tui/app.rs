//! TUI Application - Main entry point and run loop

use std::io::{self, Stdout};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tracing::info;

use super::events::{handle_key_event, handle_mouse_event, poll_event};
use super::state::AppState;
use super::theme::KioskTheme;
use super::widgets::{execution_layout, viewport, ModalDialog, OutputPane, TerminateButton, TileGrid};
use crate::error::PiMenuError;
use crate::settings::Settings;

const WINDOW_TITLE: &str = "PiMenu";

/// TUI Application
pub struct TuiApp {
    state: AppState,
    theme: KioskTheme,
    settings: Settings,
}

impl TuiApp {
    pub fn new(state: AppState, settings: Settings) -> Self {
        Self {
            state,
            theme: KioskTheme::new(),
            settings,
        }
    }

    /// Run until the user quits; returns the fatal error that ended it, if any
    pub async fn run(mut self) -> anyhow::Result<Option<PiMenuError>> {
        let mut terminal = self.setup_terminal()?;
        let result = self.main_loop(&mut terminal).await;
        self.restore_terminal(&mut terminal)?;
        result?;

        Ok(self.state.take_fatal())
    }

    /// Setup terminal for TUI
    fn setup_terminal(&self) -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            SetTitle(WINDOW_TITLE)
        )?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore terminal to normal state
    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Main event loop
    ///
    /// Waits at most one poll interval for input, so command output is
    /// drained on a sub-second cadence without spinning.
    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        info!(fullscreen = self.settings.fullscreen, "Launcher started");

        loop {
            self.state.tick();

            let glyphs = self.state.tile_glyphs();
            let mut area = Rect::default();
            terminal.draw(|frame| {
                area = viewport(frame.area(), self.settings.fullscreen);
                render(frame, area, &self.state, &self.theme, &glyphs);
            })?;

            if let Some(event) = poll_event(self.settings.poll_interval)? {
                let action = match event {
                    Event::Key(key) => handle_key_event(key, &self.state),
                    Event::Mouse(mouse) => handle_mouse_event(mouse, &self.state, area),
                    _ => super::events::Action::None,
                };
                self.state.dispatch(action).await;
            }

            if self.state.should_quit {
                break;
            }
        }

        info!("Launcher stopped");
        Ok(())
    }
}

/// Draw the whole screen for `state` into `area`
pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &KioskTheme, glyphs: &[String]) {
    match &state.execution {
        Some(exec) => {
            let (output, button) = execution_layout(area);
            frame.render_widget(OutputPane::new(exec.command(), exec.lines(), theme), output);
            frame.render_widget(TerminateButton::new(exec.terminate_requested(), theme), button);
        }
        None => {
            frame.render_widget(
                TileGrid::new(state.top_tiles(), glyphs, theme).selected(state.selected),
                area,
            );
        }
    }

    if let Some(modal) = &state.modal {
        frame.render_widget(ModalDialog::new(modal, theme), area);
    }
}
