use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Small bordered card: a headline value and an optional detail line
pub struct StatCard<'a> {
    title: &'a str,
    value: String,
    detail: Option<String>,
    color: Color,
}

impl<'a> StatCard<'a> {
    pub fn new(title: &'a str, value: impl Into<String>) -> Self {
        Self {
            title,
            value: value.into(),
            detail: None,
            color: Theme::FG,
        }
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Widget for StatCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 {
            return;
        }

        let block = Block::default()
            .title(Span::styled(self.title, Theme::dim()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let mut lines = vec![Line::from(Span::styled(
            self.value,
            Style::default().fg(self.color).add_modifier(Modifier::BOLD),
        ))];
        if let Some(detail) = self.detail {
            lines.push(Line::from(Span::styled(detail, Theme::dim())));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_value_and_detail() {
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        StatCard::new("Wind", "14 km/h NW")
            .detail("Gusts 22 km/h")
            .render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Wind"));
        assert!(text.contains("14 km/h NW"));
        assert!(text.contains("Gusts 22 km/h"));
    }
}
