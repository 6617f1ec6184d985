//! Execution screen: live output pane and terminate button

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::utils::{strip_newline, truncate};
use crate::tui::theme::KioskTheme;

/// Read-only output, scrolled to the newest line
pub struct OutputPane<'a> {
    title: &'a str,
    lines: &'a [String],
    theme: &'a KioskTheme,
}

impl<'a> OutputPane<'a> {
    pub fn new(title: &'a str, lines: &'a [String], theme: &'a KioskTheme) -> Self {
        Self {
            title,
            lines,
            theme,
        }
    }
}

impl Widget for OutputPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" {} ", truncate(self.title, usize::from(area.width.saturating_sub(4))));
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(self.theme.output());

        let visible = usize::from(block.inner(area).height);
        let skip = self.lines.len().saturating_sub(visible);
        let text: Vec<Line> = self.lines[skip..]
            .iter()
            .map(|l| Line::from(strip_newline(l).to_string()))
            .collect();

        Paragraph::new(text).block(block).render(area, buf);
    }
}

/// Big button requesting termination
pub struct TerminateButton<'a> {
    pending: bool,
    theme: &'a KioskTheme,
}

impl<'a> TerminateButton<'a> {
    /// `pending` once a terminate request was sent
    pub fn new(pending: bool, theme: &'a KioskTheme) -> Self {
        Self { pending, theme }
    }
}

impl Widget for TerminateButton<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label = if self.pending {
            "Terminating…"
        } else {
            "Terminate"
        };
        let mut lines = vec![Line::from(""); usize::from(area.height.saturating_sub(1) / 2)];
        lines.push(Line::from(label));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(self.theme.terminate_button())
            .render(area, buf);
    }
}
