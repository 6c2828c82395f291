use crate::app::SearchState;
use crate::logic::fusion::source_spread;
use crate::models::{City, FusedForecast};
use crate::ui::components::{humidity_gauge, uv_gauge, InputWidget, StatCard, SuggestionList};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Sparkline, Widget, Wrap,
    },
};

/// Hours shown in the temperature chart
const CHART_HOURS: usize = 12;

/// City search box with its suggestion dropdown
pub struct HeroPanel<'a> {
    search: &'a SearchState,
    min_chars: usize,
}

impl<'a> HeroPanel<'a> {
    pub fn new(search: &'a SearchState, min_chars: usize) -> Self {
        Self { search, min_chars }
    }
}

impl Widget for HeroPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let suggestions = SuggestionList::new(&self.search.suggestions, self.search.selected);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Tagline
                Constraint::Length(3), // Input
                Constraint::Length(suggestions.height().max(1)),
                Constraint::Min(0),
            ])
            .split(area);

        Paragraph::new(Span::styled(
            "Fused forecasts from four sources, summarized",
            Theme::dim(),
        ))
        .render(chunks[0], buf);

        InputWidget::new("Search city", &self.search.query)
            .placeholder("e.g. Mumbai, Gujarat")
            .focused(true)
            .render(chunks[1], buf);

        let typed = self.search.query.trim().chars().count();
        if typed > 0 && typed < self.min_chars {
            let hint = format!("Type at least {} characters", self.min_chars);
            Paragraph::new(Span::styled(hint, Theme::dim())).render(chunks[2], buf);
        } else if typed >= self.min_chars && self.search.suggestions.is_empty() {
            Paragraph::new(Span::styled("No matching cities", Theme::warning()))
                .render(chunks[2], buf);
        } else {
            suggestions.render(chunks[2], buf);
        }
    }
}

/// Fused forecast for the selected city
pub struct DashboardScreen<'a> {
    pub city: &'a City,
    pub weather: &'a FusedForecast,
    pub summary: Option<&'a str>,
}

impl<'a> DashboardScreen<'a> {
    pub fn new(city: &'a City, weather: &'a FusedForecast) -> Self {
        Self {
            city,
            weather,
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: Option<&'a str>) -> Self {
        self.summary = summary;
        self
    }
}

impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),  // Header
                Constraint::Length(7),  // Current + summary
                Constraint::Length(10), // Hourly chart
                Constraint::Length(4),  // Info cards
                Constraint::Length(4),  // Info cards
                Constraint::Min(4),     // 10-day strip
            ])
            .split(area);

        self.render_header(chunks[0], buf);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(20)])
            .split(chunks[1]);
        self.render_current(top[0], buf);
        self.render_summary(top[1], buf);

        self.render_hourly(chunks[2], buf);
        self.render_cards(chunks[3], chunks[4], buf);
        self.render_daily(chunks[5], buf);
    }
}

impl DashboardScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::from(vec![
                Span::styled(self.city.name, Theme::title()),
                Span::styled(
                    format!(", {}, {}", self.city.region, self.city.country),
                    Theme::normal(),
                ),
            ]),
            Line::from(Span::styled(
                format!(
                    "Last updated: {}",
                    self.weather.last_updated.format("%Y-%m-%d %H:%M")
                ),
                Theme::dim(),
            )),
        ];
        Paragraph::new(lines).render(area, buf);
    }

    fn render_current(&self, area: Rect, buf: &mut Buffer) {
        let current = &self.weather.current;
        let category = current.condition.category();

        let lines = vec![
            Line::from(Span::styled(
                category.symbol(),
                Style::default().fg(category.color()),
            )),
            Line::from(Span::styled(
                format!("{}°C", current.temperature),
                Style::default()
                    .fg(Theme::temp_color(current.temperature as f64))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(current.condition.as_str(), Theme::normal())),
            Line::from(Span::styled(
                format!(
                    "H {}° L {}°",
                    self.weather.max_temp_next_days(1).unwrap_or(current.temperature),
                    self.weather.min_temp_next_days(1).unwrap_or(current.temperature)
                ),
                Theme::dim(),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(Span::styled("Now", Theme::header()))
                    .borders(Borders::ALL)
                    .border_style(Theme::border()),
            )
            .render(area, buf);
    }

    fn render_summary(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("AI Summary", Theme::header()))
            .title_bottom(Line::from(Span::styled(
                format!(" Confidence {}% ", self.weather.confidence),
                Theme::highlight(),
            )))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let summary = match self.summary {
            Some(text) => Span::styled(text, Theme::normal()),
            None => Span::styled("Generating summary...", Theme::dim()),
        };

        let mut sources = vec![Span::styled("Sources: ", Theme::dim())];
        for (i, reading) in self.weather.raw_readings.iter().enumerate() {
            if i > 0 {
                sources.push(Span::styled(" | ", Theme::dim()));
            }
            sources.push(Span::styled(
                format!("{} {}°", reading.source.short_name(), reading.temperature),
                Theme::normal(),
            ));
        }
        if let Some(spread) = source_spread(&self.weather.raw_readings) {
            sources.push(Span::styled(format!("  (spread {}°)", spread), Theme::dim()));
        }

        Paragraph::new(vec![Line::from(summary), Line::from(""), Line::from(sources)])
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }

    fn render_hourly(&self, area: Rect, buf: &mut Buffer) {
        let hours = self.weather.next_hours(CHART_HOURS);
        if hours.is_empty() {
            return;
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let points: Vec<(f64, f64)> = hours
            .iter()
            .enumerate()
            .map(|(i, h)| (i as f64, h.temperature as f64))
            .collect();
        let lo = hours.iter().map(|h| h.temperature).min().unwrap_or(0) as f64 - 2.0;
        let hi = hours.iter().map(|h| h.temperature).max().unwrap_or(0) as f64 + 2.0;
        let last = hours.len() - 1;

        let x_labels: Vec<Line> = [0, last / 2, last]
            .iter()
            .map(|&i| Line::from(hours[i].time.clone()))
            .collect();
        let y_labels: Vec<Line> = [lo, (lo + hi) / 2.0, hi]
            .iter()
            .map(|v| Line::from(format!("{:.0}°", v)))
            .collect();

        let dataset = Dataset::default()
            .name("Temp °C")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Theme::TEMP_WARM))
            .data(&points);

        Chart::new(vec![dataset])
            .block(
                Block::default()
                    .title(Span::styled("Next 12 hours", Theme::header()))
                    .borders(Borders::ALL)
                    .border_style(Theme::border()),
            )
            .x_axis(
                Axis::default()
                    .style(Theme::dim())
                    .bounds([0.0, last.max(1) as f64])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(Theme::dim())
                    .bounds([lo, hi])
                    .labels(y_labels),
            )
            .render(cols[0], buf);

        let precip: Vec<u64> = hours.iter().map(|h| h.precip_chance as u64).collect();
        Sparkline::default()
            .block(
                Block::default()
                    .title(Span::styled("Rain chance", Theme::header()))
                    .borders(Borders::ALL)
                    .border_style(Theme::border()),
            )
            .data(precip)
            .max(100)
            .style(Style::default().fg(Color::LightBlue))
            .render(cols[1], buf);
    }

    fn render_cards(&self, first: Rect, second: Rect, buf: &mut Buffer) {
        let c = &self.weather.current;
        let quarter = [Constraint::Ratio(1, 4); 4];
        let row1 = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(quarter)
            .split(first);
        let row2 = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(quarter)
            .split(second);

        StatCard::new(
            "Wind",
            format!("{} km/h {}", c.wind.speed_kmh, c.wind.direction.as_str()),
        )
        .detail(format!("Gusts {} km/h", c.wind.gusts_kmh))
        .render(row1[0], buf);

        StatCard::new("Air Quality", format!("AQI {}", c.air_quality.aqi))
            .detail(format!("PM2.5 {}", c.air_quality.pm25))
            .color(aqi_color(c.air_quality.aqi))
            .render(row1[1], buf);

        humidity_gauge(c.humidity).render(row1[2], buf);
        uv_gauge(c.uv_index).render(row1[3], buf);

        StatCard::new("Precipitation", format!("{} mm", c.precipitation_mm)).render(row2[0], buf);
        StatCard::new("Visibility", format!("{} km", c.visibility_km)).render(row2[1], buf);
        StatCard::new("Sunrise", c.sunrise.as_str())
            .color(Theme::WARNING)
            .render(row2[2], buf);
        StatCard::new("Sunset", c.sunset.as_str())
            .color(Color::LightRed)
            .render(row2[3], buf);
    }

    fn render_daily(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("10-day forecast", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        let days = &self.weather.daily;
        if days.is_empty() {
            return;
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, days.len() as u32); days.len()])
            .split(inner);

        for (day, col) in days.iter().zip(columns.iter()) {
            let category = day.condition.category();
            let lines = vec![
                Line::from(Span::styled(day.short_weekday(), Theme::header())),
                Line::from(Span::styled(
                    category.symbol(),
                    Style::default().fg(category.color()),
                )),
                Line::from(vec![
                    Span::styled(
                        format!("{}°", day.max_temp),
                        Style::default().fg(Theme::temp_color(day.max_temp as f64)),
                    ),
                    Span::styled(format!("/{}°", day.min_temp), Theme::dim()),
                ]),
            ];
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .render(*col, buf);
        }
    }
}

fn aqi_color(aqi: u32) -> Color {
    match aqi {
        0..=50 => Theme::SUCCESS,
        51..=100 => Theme::WARNING,
        101..=150 => Color::LightRed,
        _ => Theme::ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasources::{catalog, mock_weather};
    use chrono::Local;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    fn render(screen: DashboardScreen<'_>) -> Buffer {
        let area = Rect::new(0, 0, 100, 40);
        let mut buf = Buffer::empty(area);
        screen.render(area, &mut buf);
        buf
    }

    #[test]
    fn shows_city_and_cards() {
        let city = catalog::find("Mumbai").unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let weather = mock_weather::generate_forecast(&city, Local::now(), &mut rng);

        let buf = render(
            DashboardScreen::new(&city, &weather).with_summary(Some("Sticky and warm.")),
        );
        let rendered = text(&buf);

        assert!(rendered.contains("Mumbai"));
        assert!(rendered.contains("Maharashtra"));
        assert!(rendered.contains("Sticky and warm."));
        assert!(rendered.contains(&format!("Gusts {} km/h", weather.current.wind.gusts_kmh)));
        assert!(rendered.contains(&weather.current.sunrise));
        assert!(rendered.contains("10-day forecast"));
        assert!(rendered.contains(weather.daily[0].short_weekday()));
    }

    #[test]
    fn placeholder_while_summary_pending() {
        let city = catalog::find("Patna").unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let weather = mock_weather::generate_forecast(&city, Local::now(), &mut rng);

        let rendered = text(&render(DashboardScreen::new(&city, &weather)));
        assert!(rendered.contains("Generating summary..."));
    }

    #[test]
    fn hero_hints_until_min_chars() {
        let mut search = SearchState::new();
        search.push('p', 3);

        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        HeroPanel::new(&search, 3).render(area, &mut buf);
        assert!(text(&buf).contains("Type at least 3 characters"));

        search.push('u', 3);
        search.push('n', 3);
        let mut buf = Buffer::empty(area);
        HeroPanel::new(&search, 3).render(area, &mut buf);
        assert!(text(&buf).contains("> Pune"));
    }

    #[test]
    fn aqi_bands() {
        assert_eq!(aqi_color(42), Theme::SUCCESS);
        assert_eq!(aqi_color(120), Color::LightRed);
        assert_eq!(aqi_color(180), Theme::ERROR);
    }
}
