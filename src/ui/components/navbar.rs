use crate::app::Screen;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Tabs, Widget},
};

/// Title and view tabs across the top of the frame
pub struct NavBar {
    screen: Screen,
}

impl NavBar {
    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }
}

impl Widget for NavBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(12), Constraint::Min(10)])
            .split(inner);

        Line::from(Span::styled("TerraCast", Theme::title())).render(chunks[0], buf);

        let titles: Vec<Line> = Screen::ALL
            .iter()
            .enumerate()
            .map(|(i, s)| {
                Line::from(vec![
                    Span::styled(format!("F{} ", i + 1), Theme::nav_key()),
                    Span::raw(s.title()),
                ])
            })
            .collect();

        Tabs::new(titles)
            .select(self.screen.index())
            .style(Theme::nav_label())
            .highlight_style(Theme::highlight().add_modifier(Modifier::UNDERLINED))
            .divider(" | ")
            .render(chunks[1], buf);
    }
}

/// Key hints for the bottom row
pub fn key_hints(screen: Screen) -> Line<'static> {
    let mut spans = vec![
        Span::styled("[F1/F2]", Theme::nav_key()),
        Span::styled("Views ", Theme::nav_label()),
        Span::styled("[↑↓]", Theme::nav_key()),
        Span::styled("Select ", Theme::nav_label()),
        Span::styled("[Enter]", Theme::nav_key()),
        Span::styled("Choose ", Theme::nav_label()),
    ];
    match screen {
        Screen::Dashboard => {
            spans.push(Span::styled("[^R]", Theme::nav_key()));
            spans.push(Span::styled("Refresh ", Theme::nav_label()));
        }
        Screen::Event => {
            spans.push(Span::styled("[Tab]", Theme::nav_key()));
            spans.push(Span::styled("City/Date ", Theme::nav_label()));
        }
    }
    spans.push(Span::styled("[Esc]", Theme::nav_key()));
    spans.push(Span::styled("Clear ", Theme::nav_label()));
    spans.push(Span::styled("[^Q]", Theme::nav_key()));
    spans.push(Span::styled("Quit", Theme::nav_label()));
    Line::from(spans)
}
