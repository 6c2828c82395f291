use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct Spinner<'a> {
    tick: u64,
    label: &'a str,
}

impl<'a> Spinner<'a> {
    pub fn new(tick: u64, label: &'a str) -> Self {
        Self { tick, label }
    }

    fn frame(&self) -> &'static str {
        FRAMES[(self.tick % FRAMES.len() as u64) as usize]
    }
}

impl Widget for Spinner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        // vertically centered
        let y = area.y + area.height / 2;
        let row = Rect::new(area.x, y, area.width, 1);
        Paragraph::new(Line::from(vec![
            Span::styled(self.frame(), Theme::highlight()),
            Span::raw(" "),
            Span::styled(self.label, Theme::normal()),
        ]))
        .alignment(Alignment::Center)
        .render(row, buf);
    }
}
