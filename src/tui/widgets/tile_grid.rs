//! Tile grid for one navigation frame

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use super::tile_rects;
use crate::navigation::Tile;
use crate::tui::theme::KioskTheme;

pub struct TileGrid<'a> {
    tiles: &'a [Tile],
    glyphs: &'a [String],
    selected: usize,
    theme: &'a KioskTheme,
}

impl<'a> TileGrid<'a> {
    /// `glyphs[i]` is the icon stand-in for `tiles[i]`
    pub fn new(tiles: &'a [Tile], glyphs: &'a [String], theme: &'a KioskTheme) -> Self {
        Self {
            tiles,
            glyphs,
            selected: 0,
            theme,
        }
    }

    pub fn selected(mut self, index: usize) -> Self {
        self.selected = index;
        self
    }
}

impl Widget for TileGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.theme.background));

        for (index, (tile, rect)) in self
            .tiles
            .iter()
            .zip(tile_rects(area, self.tiles.len()))
            .enumerate()
        {
            let border_style = if index == self.selected {
                self.theme.selected_border()
            } else {
                Style::default().fg(self.theme.background)
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .border_style(border_style)
                .style(self.theme.tile(tile.color));

            let inner_height = block.inner(rect).height;
            let glyph = self.glyphs.get(index).map(String::as_str).unwrap_or("");
            let mut lines = vec![Line::from(""); usize::from(inner_height.saturating_sub(3) / 2)];
            lines.push(Line::from(glyph.to_string()));
            lines.push(Line::from(""));
            lines.push(Line::from(tile.label.clone()));

            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(rect, buf);
        }
    }
}
