pub mod components;
pub mod screens;
mod theme;

pub use theme::Theme;

use crate::app::{App, LoadPhase, Screen};
use crate::logic::ForecastKind;
use components::{key_hints, MapView, NavBar, Spinner};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};
use screens::{DashboardScreen, EventCard, HeroPanel, PlannerForm};

/// Draw one frame of the whole application
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let backdrop = Theme::backdrop(app.backdrop_category());
    frame.render_widget(Block::default().style(Style::default().bg(backdrop)), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Nav
            Constraint::Min(10),   // Body
            Constraint::Length(1), // Status
            Constraint::Length(1), // Keys
        ])
        .split(area);

    frame.render_widget(NavBar::new(app.screen), rows[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[1]);

    draw_sidebar(frame, app, body[0]);
    draw_main(frame, app, body[1]);

    if let Some(msg) = &app.status_message {
        frame.render_widget(
            Paragraph::new(Span::styled(msg.as_str(), Theme::success())),
            rows[2],
        );
    }
    frame.render_widget(Paragraph::new(key_hints(app.screen)), rows[3]);
}

fn draw_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let form_height = match app.screen {
        Screen::Dashboard => 11,
        Screen::Event => 16,
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(form_height), Constraint::Min(0)])
        .split(area);

    match app.screen {
        Screen::Dashboard => frame.render_widget(
            HeroPanel::new(&app.search, app.ui.search_min_chars),
            chunks[0],
        ),
        Screen::Event => frame.render_widget(PlannerForm::new(&app.planner), chunks[0]),
    }

    if let Some(city) = app.map_city() {
        frame.render_widget(MapView::new(&city, app.map_category()), chunks[1]);
    }
}

fn draw_main(frame: &mut Frame, app: &App, area: Rect) {
    let kind = app.screen.kind();
    if let Some(loading) = app.loading_for(kind) {
        if loading.phase == LoadPhase::Forecast {
            let label = match kind {
                ForecastKind::Current => "Fetching weather...",
                ForecastKind::Event => "Fetching event forecast...",
            };
            frame.render_widget(Spinner::new(app.tick, label), area);
            return;
        }
    }

    if let Some(error) = app.error_for(kind) {
        let y = area.y + area.height / 2;
        frame.render_widget(
            Paragraph::new(Span::styled(error, Theme::error()))
                .alignment(Alignment::Center),
            Rect::new(area.x, y, area.width, 1),
        );
        return;
    }

    match app.screen {
        Screen::Dashboard => match (&app.city, &app.weather) {
            (Some(city), Some(weather)) => frame.render_widget(
                DashboardScreen::new(city, weather).with_summary(app.weather_summary.as_deref()),
                area,
            ),
            (Some(city), None) => draw_welcome(
                frame,
                area,
                &format!("Press Ctrl+R to load the forecast for {}.", city.name),
            ),
            (None, _) => draw_welcome(
                frame,
                area,
                "Search for a city to see its fused forecast.",
            ),
        },
        Screen::Event => match &app.event_forecast {
            Some(forecast) => frame.render_widget(
                EventCard::new(forecast).with_summary(app.event_summary.as_deref()),
                area,
            ),
            None => draw_welcome(
                frame,
                area,
                "Pick a city and a date to forecast your event.",
            ),
        },
    }
}

fn draw_welcome(frame: &mut Frame, area: Rect, text: &str) {
    let y = area.y + area.height / 3;
    let lines = vec![
        Line::from(Span::styled("Welcome to TerraCast", Theme::title())),
        Line::from(""),
        Line::from(Span::styled(text, Theme::dim())),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        Rect::new(area.x, y, area.width, area.height.saturating_sub(y - area.y)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{EVENT_FETCH_ERROR, WEATHER_FETCH_ERROR};
    use crate::config::UiConfig;
    use crate::datasources::{catalog, mock_weather};
    use crate::logic::Ticket;
    use chrono::Local;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn welcome_before_selection() {
        let app = App::new(UiConfig::default());
        let screen = render(&app);
        assert!(screen.contains("TerraCast"));
        assert!(screen.contains("Search for a city to see its fused forecast."));
    }

    #[test]
    fn spinner_while_fetching() {
        let mut app = App::new(UiConfig::default());
        app.select_city(catalog::find("Bhopal").unwrap());
        app.begin(Ticket(1), ForecastKind::Current);
        assert!(render(&app).contains("Fetching weather..."));
    }

    #[test]
    fn error_line_replaces_content() {
        let mut app = App::new(UiConfig::default());
        app.weather_error = Some(WEATHER_FETCH_ERROR.to_string());
        assert!(render(&app).contains(WEATHER_FETCH_ERROR));
    }

    #[test]
    fn event_request_state_stays_on_the_planner() {
        let mut app = App::new(UiConfig::default());
        app.begin(Ticket(1), ForecastKind::Event);
        let dashboard = render(&app);
        assert!(!dashboard.contains("Fetching"));
        assert!(dashboard.contains("Search for a city to see its fused forecast."));

        app.switch_screen(Screen::Event);
        assert!(render(&app).contains("Fetching event forecast..."));

        app.loading = None;
        app.event_error = Some(EVENT_FETCH_ERROR.to_string());
        assert!(render(&app).contains(EVENT_FETCH_ERROR));
        app.switch_screen(Screen::Dashboard);
        assert!(!render(&app).contains(EVENT_FETCH_ERROR));
    }

    #[test]
    fn dashboard_city_without_forecast_offers_reload() {
        let mut app = App::new(UiConfig::default());
        app.select_city(catalog::find("Indore").unwrap());
        assert!(render(&app).contains("Press Ctrl+R to load the forecast for Indore."));
    }

    #[test]
    fn loaded_dashboard_shows_city_and_map() {
        let mut app = App::new(UiConfig::default());
        let city = catalog::find("Hyderabad").unwrap();
        let mut rng = StdRng::seed_from_u64(12);
        app.city = Some(city);
        app.weather = Some(mock_weather::generate_forecast(&city, Local::now(), &mut rng));

        let screen = render(&app);
        assert!(screen.contains("Hyderabad, Telangana, India"));
        assert!(screen.contains("Map - Hyderabad, Telangana"));
        assert!(screen.contains("Generating summary..."));
    }

    #[test]
    fn planner_view_prompts() {
        let mut app = App::new(UiConfig::default());
        app.switch_screen(Screen::Event);
        let screen = render(&app);
        assert!(screen.contains("Plan an event"));
        assert!(screen.contains("Pick a city and a date to forecast your event."));
    }
}
