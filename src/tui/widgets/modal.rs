//! Modal acknowledgment dialog

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::centered;
use crate::tui::state::Modal;
use crate::tui::theme::KioskTheme;

const WIDTH: u16 = 44;
const HEIGHT: u16 = 9;

pub struct ModalDialog<'a> {
    modal: &'a Modal,
    theme: &'a KioskTheme,
}

impl<'a> ModalDialog<'a> {
    pub fn new(modal: &'a Modal, theme: &'a KioskTheme) -> Self {
        Self { modal, theme }
    }
}

impl Widget for ModalDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rect = centered(area, WIDTH, HEIGHT);
        Clear.render(rect, buf);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.modal.title()))
            .style(self.theme.modal());
        if self.modal.is_error() {
            block = block.border_style(self.theme.modal_error_border());
        }

        let mut lines: Vec<Line> = self
            .modal
            .message()
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from("[ OK ]"));

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(rect, buf);
    }
}
