use crate::models::City;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

pub struct InputWidget<'a> {
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    focused: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            placeholder: "",
            focused: false,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = Vec::new();
        if self.value.is_empty() && !self.placeholder.is_empty() {
            spans.push(Span::styled(self.placeholder, Theme::dim()));
        } else {
            spans.push(Span::styled(self.value, Theme::normal()));
        }
        if self.focused {
            // cursor sits after the text
            spans.push(Span::styled(" ", Theme::selected()));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}

/// Dropdown of matching cities under a search box
pub struct SuggestionList<'a> {
    suggestions: &'a [City],
    selected: usize,
}

impl<'a> SuggestionList<'a> {
    pub fn new(suggestions: &'a [City], selected: usize) -> Self {
        Self {
            suggestions,
            selected,
        }
    }

    /// Rows needed to show every suggestion inside the border
    pub fn height(&self) -> u16 {
        if self.suggestions.is_empty() {
            0
        } else {
            self.suggestions.len() as u16 + 2
        }
    }
}

impl Widget for SuggestionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.suggestions.is_empty() || area.height < 3 {
            return;
        }

        let items: Vec<ListItem> = self
            .suggestions
            .iter()
            .enumerate()
            .map(|(i, city)| {
                let (marker, style) = if i == self.selected {
                    ("> ", Theme::selected())
                } else {
                    ("  ", Theme::normal())
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(city.name, style),
                    Span::styled(format!(", {}", city.region), Theme::dim()),
                ]))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::border_focused()),
            )
            .render(area, buf);
    }
}
