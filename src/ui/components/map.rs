use crate::models::{City, ConditionCategory};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        Block, Borders, Widget,
    },
};

// Longitude/latitude window around the Indian subcontinent
const LON_BOUNDS: [f64; 2] = [66.0, 98.0];
const LAT_BOUNDS: [f64; 2] = [6.0, 37.0];

/// World map zoomed on India with a marker at the selected city
pub struct MapView<'a> {
    city: &'a City,
    category: Option<ConditionCategory>,
}

impl<'a> MapView<'a> {
    pub fn new(city: &'a City, category: Option<ConditionCategory>) -> Self {
        Self { city, category }
    }
}

impl Widget for MapView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let tint = Theme::map_tint(self.category);
        let (lon, lat) = (self.city.longitude, self.city.latitude);
        let label = self.city.name;

        Canvas::default()
            .block(
                Block::default()
                    .title(Span::styled(
                        format!("Map - {}", self.city.display_name()),
                        Theme::header(),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Theme::border()),
            )
            .marker(Marker::Braille)
            .x_bounds(LON_BOUNDS)
            .y_bounds(LAT_BOUNDS)
            .paint(move |ctx| {
                ctx.draw(&Map {
                    color: tint,
                    resolution: MapResolution::High,
                });
                ctx.layer();
                ctx.draw(&Points {
                    coords: &[(lon, lat)],
                    color: Color::Red,
                });
                ctx.print(
                    lon + 0.6,
                    lat,
                    Line::from(Span::styled(
                        label,
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    )),
                );
            })
            .render(area, buf);
    }
}
