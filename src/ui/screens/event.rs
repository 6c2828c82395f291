use crate::app::{PlannerField, PlannerState};
use crate::models::EventForecast;
use crate::ui::components::{humidity_gauge, percent_gauge, InputWidget, StatCard, SuggestionList};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Event planner form: city search, date, submit hint
pub struct PlannerForm<'a> {
    planner: &'a PlannerState,
}

impl<'a> PlannerForm<'a> {
    pub fn new(planner: &'a PlannerState) -> Self {
        Self { planner }
    }
}

impl Widget for PlannerForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = self.planner;
        let city_focused = p.focus == PlannerField::City;
        let suggestions = SuggestionList::new(&p.search.suggestions, p.search.selected);
        let dropdown = if city_focused { suggestions.height() } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),        // Title
                Constraint::Length(3),        // City
                Constraint::Length(dropdown), // Suggestions
                Constraint::Length(3),        // Date
                Constraint::Length(2),        // Hint
                Constraint::Min(0),
            ])
            .split(area);

        Paragraph::new(Span::styled("Plan an event", Theme::title())).render(chunks[0], buf);

        let city_label = if p.city.is_some() { "City ✓" } else { "City" };
        InputWidget::new(city_label, &p.search.query)
            .placeholder("Search for a city...")
            .focused(city_focused)
            .render(chunks[1], buf);

        if city_focused {
            suggestions.render(chunks[2], buf);
        }

        InputWidget::new("Date (YYYY-MM-DD, ↑↓ to shift)", &p.date_input)
            .focused(p.focus == PlannerField::Date)
            .render(chunks[3], buf);

        let hint = match &p.hint {
            Some(hint) => Line::from(Span::styled(hint.as_str(), Theme::warning())),
            None if p.focus == PlannerField::Date => Line::from(vec![
                Span::styled("[Enter]", Theme::nav_key()),
                Span::styled(" Get event forecast", Theme::nav_label()),
            ]),
            None => Line::from(Span::styled(
                "Choose a city, then the date",
                Theme::dim(),
            )),
        };
        Paragraph::new(hint).render(chunks[4], buf);
    }
}

/// Long-range forecast card for a planned event
pub struct EventCard<'a> {
    forecast: &'a EventForecast,
    summary: Option<&'a str>,
}

impl<'a> EventCard<'a> {
    pub fn new(forecast: &'a EventForecast) -> Self {
        Self {
            forecast,
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: Option<&'a str>) -> Self {
        self.summary = summary;
        self
    }
}

impl Widget for EventCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let f = self.forecast;
        let block = Block::default()
            .title(Span::styled(
                format!("Event Forecast for {}", f.city.name),
                Theme::title(),
            ))
            .borders(Borders::ALL)
            .border_style(Theme::border_focused());
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Date + headline
                Constraint::Length(5), // Summary
                Constraint::Length(4), // Stats
                Constraint::Length(4), // Stats
                Constraint::Min(0),
            ])
            .split(inner);

        let category = f.condition.category();
        let headline = vec![
            Line::from(Span::styled(f.date_label(), Theme::header())),
            Line::from(""),
            Line::from(vec![
                Span::styled(category.symbol(), Style::default().fg(category.color())),
                Span::raw("  "),
                Span::styled(
                    format!("{}°C", f.avg_temp),
                    Style::default()
                        .fg(Theme::temp_color(f.avg_temp as f64))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(f.condition.as_str(), Theme::normal()),
            ]),
            Line::from(Span::styled(
                format!("Sunrise {}  Sunset {}", f.sunrise, f.sunset),
                Theme::dim(),
            )),
        ];
        Paragraph::new(headline)
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let summary = match self.summary {
            Some(text) => Span::styled(text, Theme::normal()),
            None => Span::styled("Generating summary...", Theme::dim()),
        };
        Paragraph::new(Line::from(summary))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(Span::styled("AI Summary", Theme::header()))
                    .borders(Borders::ALL)
                    .border_style(Theme::border()),
            )
            .render(chunks[1], buf);

        let thirds = [Constraint::Ratio(1, 3); 3];
        let row1 = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(thirds)
            .split(chunks[2]);
        let row2 = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(thirds)
            .split(chunks[3]);

        percent_gauge("Confidence", f.confidence).render(row1[0], buf);
        percent_gauge("Precipitation", f.precip_chance).render(row1[1], buf);
        StatCard::new("Wind", format!("{} km/h", f.wind_speed_kmh)).render(row1[2], buf);
        humidity_gauge(f.humidity).render(row2[0], buf);
        StatCard::new("UV Index", f.uv_index.to_string()).render(row2[1], buf);

        let anomaly = &f.temperature_anomaly;
        StatCard::new("Temp Anomaly", anomaly.signed())
            .detail(anomaly.description.as_str())
            .color(Theme::anomaly_color(anomaly.description))
            .render(row2[2], buf);
    }
}
