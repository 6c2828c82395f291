use crate::config::UiConfig;
use crate::datasources::catalog;
use crate::logic::{ForecastKind, ForecastRequest, Outcome, Ticket};
use crate::models::{City, ConditionCategory, EventForecast, FusedForecast};
use chrono::{Local, NaiveDate, TimeDelta};

pub const WEATHER_FETCH_ERROR: &str = "Failed to fetch weather data.";
pub const EVENT_FETCH_ERROR: &str = "Failed to fetch event forecast.";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Event,
}

impl Screen {
    pub const ALL: [Screen; 2] = [Screen::Dashboard, Screen::Event];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Event => "Plan Event",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Screen::Dashboard => 0,
            Screen::Event => 1,
        }
    }

    /// The forecast this screen displays
    pub fn kind(&self) -> ForecastKind {
        match self {
            Screen::Dashboard => ForecastKind::Current,
            Screen::Event => ForecastKind::Event,
        }
    }
}

/// A city search box and its suggestion list
#[derive(Debug, Default)]
pub struct SearchState {
    pub query: String,
    pub suggestions: Vec<City>,
    pub selected: usize,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, c: char, min_chars: usize) {
        self.query.push(c);
        self.refresh(min_chars);
    }

    pub fn backspace(&mut self, min_chars: usize) {
        self.query.pop();
        self.refresh(min_chars);
    }

    /// Re-run the catalog search once the query is long enough
    pub fn refresh(&mut self, min_chars: usize) {
        let query = self.query.trim();
        self.suggestions = if query.chars().count() >= min_chars {
            catalog::search(query)
        } else {
            Vec::new()
        };
        self.selected = 0;
    }

    pub fn next(&mut self) {
        if !self.suggestions.is_empty() && self.selected < self.suggestions.len() - 1 {
            self.selected += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn highlighted(&self) -> Option<City> {
        self.suggestions.get(self.selected).copied()
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.suggestions.clear();
        self.selected = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerField {
    City,
    Date,
}

/// Event planner form
#[derive(Debug)]
pub struct PlannerState {
    pub search: SearchState,
    pub city: Option<City>,
    pub date_input: String,
    pub focus: PlannerField,
    pub hint: Option<String>,
}

impl PlannerState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            search: SearchState::new(),
            city: None,
            date_input: (today + TimeDelta::days(7)).format(DATE_FORMAT).to_string(),
            focus: PlannerField::City,
            hint: None,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            PlannerField::City => PlannerField::Date,
            PlannerField::Date => PlannerField::City,
        };
    }

    pub fn choose_city(&mut self, city: City) {
        self.city = Some(city);
        self.search.query = city.display_name();
        self.search.suggestions.clear();
        self.search.selected = 0;
        self.focus = PlannerField::Date;
        self.hint = None;
    }

    /// Editing the query drops a previously chosen city
    pub fn push_city_char(&mut self, c: char, min_chars: usize) {
        self.city = None;
        self.search.push(c, min_chars);
    }

    pub fn backspace_city(&mut self, min_chars: usize) {
        self.city = None;
        self.search.backspace(min_chars);
    }

    pub fn push_date_char(&mut self, c: char) {
        if (c.is_ascii_digit() || c == '-') && self.date_input.len() < 10 {
            self.date_input.push(c);
        }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date_input.trim(), DATE_FORMAT).ok()
    }

    /// Move the date by `days`, never earlier than tomorrow
    pub fn shift_date(&mut self, days: i64, today: NaiveDate) {
        let earliest = today + TimeDelta::days(1);
        let current = self
            .parsed_date()
            .unwrap_or(today + TimeDelta::days(7));
        let shifted = (current + TimeDelta::days(days)).max(earliest);
        self.date_input = shifted.format(DATE_FORMAT).to_string();
    }

    pub fn validate(&self, today: NaiveDate) -> std::result::Result<(City, NaiveDate), String> {
        let city = self
            .city
            .ok_or_else(|| "Select a city from the suggestions".to_string())?;
        let date = self
            .parsed_date()
            .ok_or_else(|| "Enter the date as YYYY-MM-DD".to_string())?;
        if date <= today {
            return Err("Pick a date after today".to_string());
        }
        Ok((city, date))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Forecast,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loading {
    pub ticket: Ticket,
    pub kind: ForecastKind,
    pub phase: LoadPhase,
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub ui: UiConfig,

    // Input
    pub search: SearchState,
    pub planner: PlannerState,

    // Data. `city` is the dashboard city and always matches `weather`;
    // the event forecast carries its own city.
    pub city: Option<City>,
    pub weather: Option<FusedForecast>,
    pub weather_summary: Option<String>,
    pub event_forecast: Option<EventForecast>,
    pub event_summary: Option<String>,

    // UI state
    pub loading: Option<Loading>,
    pub weather_error: Option<String>,
    pub event_error: Option<String>,
    pub status_message: Option<String>,
    pub tick: u64,
    pending: Option<ForecastRequest>,
}

impl App {
    pub fn new(ui: UiConfig) -> Self {
        Self {
            screen: Screen::Dashboard,
            should_quit: false,
            ui,
            search: SearchState::new(),
            planner: PlannerState::new(Local::now().date_naive()),
            city: None,
            weather: None,
            weather_summary: None,
            event_forecast: None,
            event_summary: None,
            loading: None,
            weather_error: None,
            event_error: None,
            status_message: None,
            tick: 0,
            pending: None,
        }
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Load the dashboard for `city`
    pub fn select_city(&mut self, city: City) {
        tracing::info!("Selected {}", city.display_name());
        self.city = Some(city);
        self.screen = Screen::Dashboard;
        self.search.clear();
        self.weather_error = None;
        self.weather = None;
        self.weather_summary = None;
        self.pending = Some(ForecastRequest::Current(city));
    }

    /// Re-fetch the dashboard city
    pub fn refresh(&mut self) {
        if let Some(city) = self.city {
            self.select_city(city);
            self.set_status("Refreshing...");
        }
    }

    /// Validate the planner form and queue an event forecast
    pub fn submit_event(&mut self) {
        let today = Local::now().date_naive();
        match self.planner.validate(today) {
            Ok((city, date)) => {
                tracing::info!("Planning event in {} on {}", city.name, date);
                self.planner.hint = None;
                self.event_error = None;
                self.event_forecast = None;
                self.event_summary = None;
                self.pending = Some(ForecastRequest::Event(city, date));
            }
            Err(hint) => self.planner.hint = Some(hint),
        }
    }

    /// Hand the queued request to the dispatcher
    pub fn take_request(&mut self) -> Option<ForecastRequest> {
        self.pending.take()
    }

    /// Mark `ticket` as the request whose outcomes are awaited
    pub fn begin(&mut self, ticket: Ticket, kind: ForecastKind) {
        self.loading = Some(Loading {
            ticket,
            kind,
            phase: LoadPhase::Forecast,
        });
    }

    /// In-flight request for `kind`, if any
    pub fn loading_for(&self, kind: ForecastKind) -> Option<Loading> {
        self.loading.filter(|loading| loading.kind == kind)
    }

    pub fn error_for(&self, kind: ForecastKind) -> Option<&str> {
        match kind {
            ForecastKind::Current => self.weather_error.as_deref(),
            ForecastKind::Event => self.event_error.as_deref(),
        }
    }

    /// Fold an outcome into the state. Returns false when the outcome
    /// belongs to a request that has since been replaced.
    pub fn apply(&mut self, outcome: Outcome) -> bool {
        let ticket = outcome.ticket();
        let current = match self.loading {
            Some(loading) if loading.ticket == ticket => loading,
            _ => {
                tracing::debug!("Discarding stale outcome {}", ticket);
                return false;
            }
        };

        match outcome {
            Outcome::WeatherLoaded { result, .. } => match result {
                Ok(forecast) => {
                    self.weather = Some(forecast);
                    self.loading = Some(Loading {
                        phase: LoadPhase::Summary,
                        ..current
                    });
                }
                Err(e) => {
                    tracing::warn!("Weather fetch failed: {}", e);
                    self.weather_error = Some(WEATHER_FETCH_ERROR.to_string());
                    self.loading = None;
                }
            },
            Outcome::EventLoaded { result, .. } => match result {
                Ok(forecast) => {
                    self.event_forecast = Some(forecast);
                    self.loading = Some(Loading {
                        phase: LoadPhase::Summary,
                        ..current
                    });
                }
                Err(e) => {
                    tracing::warn!("Event forecast failed: {}", e);
                    self.event_error = Some(EVENT_FETCH_ERROR.to_string());
                    self.loading = None;
                }
            },
            Outcome::Summarized { kind, summary, .. } => {
                match kind {
                    ForecastKind::Current => self.weather_summary = Some(summary),
                    ForecastKind::Event => self.event_summary = Some(summary),
                }
                self.loading = None;
                self.clear_status();
            }
        }
        true
    }

    /// Category behind the full-frame tint; `None` before any city is chosen
    pub fn backdrop_category(&self) -> Option<ConditionCategory> {
        self.city?;
        Some(
            self.weather
                .as_ref()
                .map(|w| w.current.condition.category())
                .unwrap_or(ConditionCategory::Clear),
        )
    }

    /// City pinned on the map: the dashboard city, or on the planner the
    /// event city once one is chosen
    pub fn map_city(&self) -> Option<City> {
        match self.screen {
            Screen::Dashboard => self.city,
            Screen::Event => self
                .event_forecast
                .as_ref()
                .map(|f| f.city)
                .or(self.planner.city),
        }
    }

    /// Category behind the map tint, taken from the forecast for `map_city`
    pub fn map_category(&self) -> Option<ConditionCategory> {
        match self.screen {
            Screen::Dashboard => self.weather.as_ref().map(|w| w.current.condition),
            Screen::Event => self.event_forecast.as_ref().map(|f| f.condition),
        }
        .map(|condition| condition.category())
    }
}
