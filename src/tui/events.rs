//! Event Handling - keyboard and touch input

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use std::time::Duration;

use super::state::AppState;
use super::widgets::{execution_layout, tile_rects};

/// Actions that can be triggered by user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Close the open modal
    Acknowledge,
    Terminate,
    Back,
    /// Press the tile under the keyboard cursor
    Activate,
    /// Press a specific tile (touch)
    ActivateTile(usize),
    Move { dx: i32, dy: i32 },
    None,
}

/// Handle keyboard events
pub fn handle_key_event(key: KeyEvent, state: &AppState) -> Action {
    // Ctrl+C quits from anywhere
    if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    if state.modal.is_some() {
        return match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Esc => Action::Acknowledge,
            _ => Action::None,
        };
    }

    if state.is_running() {
        return match key.code {
            KeyCode::Char('t') | KeyCode::Enter => Action::Terminate,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Enter | KeyCode::Char(' ') => Action::Activate,
        KeyCode::Backspace | KeyCode::Esc => Action::Back,
        KeyCode::Up | KeyCode::Char('k') => Action::Move { dx: 0, dy: -1 },
        KeyCode::Down | KeyCode::Char('j') => Action::Move { dx: 0, dy: 1 },
        KeyCode::Left | KeyCode::Char('h') => Action::Move { dx: -1, dy: 0 },
        KeyCode::Right | KeyCode::Char('l') => Action::Move { dx: 1, dy: 0 },
        _ => Action::None,
    }
}

/// Handle a tap; `area` is the viewport the screen was drawn into
pub fn handle_mouse_event(mouse: MouseEvent, state: &AppState, area: Rect) -> Action {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return Action::None;
    }
    let at = Position::new(mouse.column, mouse.row);

    if state.modal.is_some() {
        return Action::Acknowledge;
    }

    if state.is_running() {
        let (_, button) = execution_layout(area);
        return if button.contains(at) {
            Action::Terminate
        } else {
            Action::None
        };
    }

    tile_rects(area, state.top_tiles().len())
        .iter()
        .position(|rect| rect.contains(at))
        .map_or(Action::None, Action::ActivateTile)
}

/// Poll for input with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        let event = event::read()?;
        match &event {
            Event::Key(key) if key.kind != KeyEventKind::Press => return Ok(None),
            Event::Key(_) | Event::Mouse(_) | Event::Resize(..) => return Ok(Some(event)),
            _ => {}
        }
    }
    Ok(None)
}
