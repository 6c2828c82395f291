use crate::models::{AnomalyLabel, ConditionCategory};
use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    // Base colors
    pub const FG: Color = Color::White;
    pub const DIM: Color = Color::DarkGray;
    pub const ACCENT: Color = Color::LightBlue;
    pub const HIGHLIGHT: Color = Color::Cyan;

    // Status colors
    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;

    // Temperature colors (°C)
    pub const TEMP_COLD: Color = Color::LightBlue;
    pub const TEMP_COOL: Color = Color::Cyan;
    pub const TEMP_WARM: Color = Color::Yellow;
    pub const TEMP_HOT: Color = Color::Red;

    pub const ANOMALY_WARM: Color = Color::LightRed;
    pub const ANOMALY_COOL: Color = Color::LightBlue;

    /// Backdrop before any city is chosen
    pub const EARTH: Color = Color::Rgb(36, 30, 22);

    // Styles
    pub fn title() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn highlight() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Self::FG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn temp_color(temp_c: f64) -> Color {
        if temp_c < 10.0 {
            Self::TEMP_COLD
        } else if temp_c < 20.0 {
            Self::TEMP_COOL
        } else if temp_c < 32.0 {
            Self::TEMP_WARM
        } else {
            Self::TEMP_HOT
        }
    }

    pub fn anomaly_color(label: AnomalyLabel) -> Color {
        match label {
            AnomalyLabel::Warmer => Self::ANOMALY_WARM,
            AnomalyLabel::Cooler => Self::ANOMALY_COOL,
        }
    }

    /// Full-frame background for the current condition
    pub fn backdrop(category: Option<ConditionCategory>) -> Color {
        match category {
            None => Self::EARTH,
            Some(ConditionCategory::Clear) => Color::Rgb(40, 34, 14),
            Some(ConditionCategory::PartlyCloudy) => Color::Rgb(26, 30, 38),
            Some(ConditionCategory::Cloudy) => Color::Rgb(28, 28, 30),
            Some(ConditionCategory::Rain) => Color::Rgb(12, 22, 38),
            Some(ConditionCategory::Thunderstorm) => Color::Rgb(22, 14, 34),
            Some(ConditionCategory::Haze) => Color::Rgb(34, 32, 28),
            Some(ConditionCategory::Windy) => Color::Rgb(14, 30, 32),
        }
    }

    /// Land color on the map canvas
    pub fn map_tint(category: Option<ConditionCategory>) -> Color {
        match category {
            None | Some(ConditionCategory::Clear) => Color::Green,
            Some(ConditionCategory::Rain) | Some(ConditionCategory::Thunderstorm) => Color::Blue,
            Some(ConditionCategory::Cloudy) | Some(ConditionCategory::Haze) => Color::Gray,
            Some(other) => other.color(),
        }
    }

    pub fn nav_key() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_label() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_bands() {
        assert_eq!(Theme::temp_color(5.0), Theme::TEMP_COLD);
        assert_eq!(Theme::temp_color(18.0), Theme::TEMP_COOL);
        assert_eq!(Theme::temp_color(27.0), Theme::TEMP_WARM);
        assert_eq!(Theme::temp_color(38.0), Theme::TEMP_HOT);
    }

    #[test]
    fn backdrop_defaults_to_earth() {
        assert_eq!(Theme::backdrop(None), Theme::EARTH);
        assert_ne!(
            Theme::backdrop(Some(ConditionCategory::Rain)),
            Theme::backdrop(Some(ConditionCategory::Clear))
        );
    }

    #[test]
    fn anomaly_colors_by_sign() {
        assert_eq!(Theme::anomaly_color(AnomalyLabel::Warmer), Theme::ANOMALY_WARM);
        assert_eq!(Theme::anomaly_color(AnomalyLabel::Cooler), Theme::ANOMALY_COOL);
    }
}
