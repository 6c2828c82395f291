use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "terracast",
    version,
    about = "Fused multi-source weather dashboard with AI summaries"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the data directory (log file location)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Seed the mock weather generator for reproducible forecasts
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Validate config and test the Gemini connection
    Check,
    /// Search the city catalog
    Search {
        /// Part of a city or state name
        query: String,
    },
    /// Print the fused forecast for a city
    Forecast {
        /// City name, e.g. "Mumbai"
        city: String,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the long-range forecast for an event
    Event {
        /// City name, e.g. "Delhi"
        city: String,
        /// Event date (YYYY-MM-DD), defaults to a week from today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Log filter used when `RUST_LOG` is unset
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Whether this invocation hands the terminal to the TUI
    pub fn is_interactive(&self) -> bool {
        self.command.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_command_runs_tui() {
        let cli = Cli::try_parse_from(["terracast"]).unwrap();
        assert!(cli.is_interactive());
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["terracast", "-vv", "search", "pu"]).unwrap();
        assert_eq!(cli.log_level(), "trace");
        assert!(!cli.is_interactive());
    }

    #[test]
    fn event_date_parses() {
        let cli = Cli::try_parse_from([
            "terracast",
            "--seed",
            "42",
            "event",
            "Delhi",
            "--date",
            "2026-10-25",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.seed, Some(42));
        match cli.command {
            Some(Commands::Event { city, date, json }) => {
                assert_eq!(city, "Delhi");
                assert_eq!(date, NaiveDate::from_ymd_opt(2026, 10, 25));
                assert!(json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn rejects_malformed_date() {
        assert!(Cli::try_parse_from(["terracast", "event", "Delhi", "--date", "25/10/2026"]).is_err());
    }
}
