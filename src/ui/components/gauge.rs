use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Bordered value with a proportional bar underneath
pub struct GaugeWidget<'a> {
    title: &'a str,
    value: Option<f64>,
    unit: &'a str,
    min: f64,
    max: f64,
    thresholds: Vec<(f64, Color)>,
    precision: usize,
}

impl<'a> GaugeWidget<'a> {
    pub fn new(title: &'a str, value: Option<f64>, unit: &'a str) -> Self {
        Self {
            title,
            value,
            unit,
            min: 0.0,
            max: 100.0,
            thresholds: Vec::new(),
            precision: 0,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn thresholds(mut self, thresholds: Vec<(f64, Color)>) -> Self {
        self.thresholds = thresholds;
        self
    }

    fn color_for(&self, value: f64) -> Color {
        for (threshold, color) in self.thresholds.iter().rev() {
            if value >= *threshold {
                return *color;
            }
        }
        Theme::FG
    }
}

impl Widget for GaugeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 8 {
            return;
        }

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let Some(value) = self.value else {
            Paragraph::new(Span::styled("N/A", Theme::dim())).render(inner, buf);
            return;
        };

        let color = self.color_for(value);
        let value_str = format!("{:.prec$}{}", value, self.unit, prec = self.precision);
        Paragraph::new(Line::from(Span::styled(value_str, Style::default().fg(color))))
            .render(inner, buf);

        if inner.height >= 2 {
            let y = inner.y + 1;
            let ratio = ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
            let filled = (inner.width as f64 * ratio) as u16;

            for x in inner.x..inner.x + inner.width {
                let ch = if x < inner.x + filled { '█' } else { '░' };
                buf[(x, y)].set_char(ch).set_fg(color);
            }
        }
    }
}

pub fn humidity_gauge(value: u8) -> GaugeWidget<'static> {
    GaugeWidget::new("Humidity", Some(value as f64), "%").thresholds(vec![
        (0.0, Theme::SUCCESS),
        (80.0, Theme::WARNING),
        (90.0, Theme::ERROR),
    ])
}

pub fn uv_gauge(value: u8) -> GaugeWidget<'static> {
    GaugeWidget::new("UV Index", Some(value as f64), "")
        .range(0.0, 11.0)
        .thresholds(vec![
            (0.0, Theme::SUCCESS),
            (3.0, Theme::WARNING),
            (6.0, Color::LightRed),
            (8.0, Theme::ERROR),
        ])
}

/// Generic 0-100% gauge (confidence, precipitation chance)
pub fn percent_gauge(title: &str, value: u8) -> GaugeWidget<'_> {
    GaugeWidget::new(title, Some(value as f64), "%").thresholds(vec![(0.0, Theme::HIGHLIGHT)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn bar_fills_proportionally() {
        let area = Rect::new(0, 0, 12, 4);
        let mut buf = Buffer::empty(area);
        humidity_gauge(50).render(area, &mut buf);

        assert!(row(&buf, 1).contains("50%"));
        let bar = row(&buf, 2);
        assert_eq!(bar.matches('█').count(), 5);
        assert_eq!(bar.matches('░').count(), 5);
    }

    #[test]
    fn percent_gauge_uses_highlight() {
        let area = Rect::new(0, 0, 12, 4);
        let mut buf = Buffer::empty(area);
        percent_gauge("Rain", 30).render(area, &mut buf);

        assert!(row(&buf, 0).contains("Rain"));
        assert!(row(&buf, 1).contains("30%"));
        assert_eq!(row(&buf, 2).matches('█').count(), 3);
        assert_eq!(buf[(1, 2)].fg, Theme::HIGHLIGHT);
    }

    #[test]
    fn missing_value_shows_na() {
        let area = Rect::new(0, 0, 12, 4);
        let mut buf = Buffer::empty(area);
        GaugeWidget::new("Wind", None, "km/h").render(area, &mut buf);
        assert!(row(&buf, 1).contains("N/A"));
    }

    #[test]
    fn too_small_renders_nothing() {
        let area = Rect::new(0, 0, 5, 2);
        let mut buf = Buffer::empty(area);
        uv_gauge(7).render(area, &mut buf);
        assert_eq!(row(&buf, 0).trim(), "");
    }
}
