mod app;
mod cli;
mod commands;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod ui;

use app::{App, PlannerField, Screen};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use datasources::{MockWeatherProvider, WeatherProvider};
use error::Result;
use logic::{Dispatcher, Summarizer};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if let Some(Commands::Init) = cli.command {
        return commands::init();
    }

    let mut config = match Config::load(cli.config.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Run `terracast init` or copy config/config.yaml.example to config/config.yaml");
            std::process::exit(1);
        }
    };
    if let Some(seed) = cli.seed {
        config.mock.seed = Some(seed);
    }

    let result = match &cli.command {
        None => run_tui(config).await,
        Some(Commands::Init) => Ok(()),
        Some(Commands::Check) => commands::check(&config, cli.data_dir.as_ref()).await,
        Some(Commands::Search { query }) => commands::search(query),
        Some(Commands::Forecast { city, json }) => commands::forecast(&config, city, *json).await,
        Some(Commands::Event { city, date, json }) => {
            commands::event(&config, city, *date, *json).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file while the TUI owns the terminal, to stderr otherwise.
/// `RUST_LOG` overrides the -v flags.
fn init_logging(cli: &Cli) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    if cli.is_interactive() {
        let path = Config::log_path(cli.data_dir.as_ref())?;
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

async fn run_tui(config: Config) -> Result<()> {
    let provider: Arc<dyn WeatherProvider> = Arc::new(MockWeatherProvider::new(config.mock.clone()));
    let summarizer = Arc::new(Summarizer::from_config(&config.gemini)?);
    let summaries_enabled = summarizer.is_enabled();
    let mut dispatcher = Dispatcher::new(provider, summarizer);

    let mut app = App::new(config.ui.clone());
    if !summaries_enabled {
        app.set_status("Gemini API key not set - summaries use fallback text");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &mut dispatcher).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    dispatcher: &mut Dispatcher,
) -> Result<()> {
    let tick_rate = Duration::from_millis(app.ui.tick_rate_ms.max(10));

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // Poll with a timeout so outcomes and the spinner keep moving
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }
        app.on_tick();

        if let Some(request) = app.take_request() {
            let kind = request.kind();
            let ticket = dispatcher.dispatch(request);
            app.begin(ticket, kind);
        }

        while let Some(outcome) = dispatcher.try_next() {
            app.apply(outcome);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => app.quit(),
        KeyCode::Char('r') if ctrl => {
            if app.screen == Screen::Dashboard {
                app.refresh();
            }
        }
        KeyCode::F(1) => app.switch_screen(Screen::Dashboard),
        KeyCode::F(2) => app.switch_screen(Screen::Event),
        code => match app.screen {
            Screen::Dashboard => handle_dashboard_input(app, code),
            Screen::Event => handle_planner_input(app, code),
        },
    }
}

fn handle_dashboard_input(app: &mut App, code: KeyCode) {
    let min_chars = app.ui.search_min_chars;
    match code {
        KeyCode::Char(c) => app.search.push(c, min_chars),
        KeyCode::Backspace => app.search.backspace(min_chars),
        KeyCode::Up => app.search.prev(),
        KeyCode::Down => app.search.next(),
        KeyCode::Enter => {
            if let Some(city) = app.search.highlighted() {
                app.select_city(city);
            }
        }
        KeyCode::Esc => app.search.clear(),
        _ => {}
    }
}

fn handle_planner_input(app: &mut App, code: KeyCode) {
    let min_chars = app.ui.search_min_chars;
    let today = chrono::Local::now().date_naive();
    let planner = &mut app.planner;

    if matches!(code, KeyCode::Tab | KeyCode::BackTab) {
        planner.toggle_focus();
        return;
    }

    match planner.focus {
        PlannerField::City => match code {
            KeyCode::Char(c) => planner.push_city_char(c, min_chars),
            KeyCode::Backspace => planner.backspace_city(min_chars),
            KeyCode::Up => planner.search.prev(),
            KeyCode::Down => planner.search.next(),
            KeyCode::Enter => {
                if let Some(city) = planner.search.highlighted() {
                    planner.choose_city(city);
                } else if planner.city.is_some() {
                    planner.focus = PlannerField::Date;
                }
            }
            KeyCode::Esc => {
                if planner.search.is_empty() {
                    app.switch_screen(Screen::Dashboard);
                } else {
                    planner.search.clear();
                    planner.city = None;
                }
            }
            _ => {}
        },
        PlannerField::Date => match code {
            KeyCode::Char(c) => planner.push_date_char(c),
            KeyCode::Backspace => {
                planner.date_input.pop();
            }
            KeyCode::Up => planner.shift_date(1, today),
            KeyCode::Down => planner.shift_date(-1, today),
            KeyCode::Enter => app.submit_event(),
            KeyCode::Esc => {
                if planner.date_input.is_empty() {
                    app.switch_screen(Screen::Dashboard);
                } else {
                    planner.date_input.clear();
                }
            }
            _ => {}
        },
    }
}
