//! Kiosk Theme - flat tile palette

use ratatui::style::{Color, Modifier, Style};

/// Colors for the menu and the execution screen
pub struct KioskTheme {
    pub background: Color,
    pub tile_text: Color,
    pub selection: Color,
    pub output_background: Color,
    pub output_text: Color,
    pub terminate_background: Color,
    pub modal_background: Color,
    pub error_red: Color,
}

impl Default for KioskTheme {
    fn default() -> Self {
        Self {
            background: Color::Black,
            tile_text: Color::White,
            selection: Color::Rgb(255, 196, 13),              // #FFC40D
            output_background: Color::Rgb(45, 137, 239),      // #2D89EF
            output_text: Color::White,
            terminate_background: Color::Rgb(51, 51, 51),     // #333333
            modal_background: Color::Rgb(29, 29, 29),         // #1D1D1D
            error_red: Color::Rgb(238, 17, 17),               // #EE1111
        }
    }
}

impl KioskTheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Style of a tile with background `color`
    pub fn tile(&self, color: Color) -> Style {
        Style::default().bg(color).fg(self.tile_text)
    }

    /// Border of the tile under the keyboard cursor
    pub fn selected_border(&self) -> Style {
        Style::default()
            .fg(self.selection)
            .add_modifier(Modifier::BOLD)
    }

    pub fn output(&self) -> Style {
        Style::default()
            .bg(self.output_background)
            .fg(self.output_text)
    }

    pub fn terminate_button(&self) -> Style {
        Style::default()
            .bg(self.terminate_background)
            .fg(self.tile_text)
            .add_modifier(Modifier::BOLD)
    }

    pub fn modal(&self) -> Style {
        Style::default().bg(self.modal_background).fg(self.tile_text)
    }

    pub fn modal_error_border(&self) -> Style {
        Style::default()
            .fg(self.error_red)
            .add_modifier(Modifier::BOLD)
    }
}
