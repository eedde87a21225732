// World map rendering
//
// Center panel: a braille canvas with the built-in world coastline,
// group markers, and the selected laureate's overlays (birth marker,
// birth-to-work connector, shared-prize connectors). The viewport comes
// straight from the scene; the canvas x axis is longitude, y latitude.

use crate::app::AppState;
use crate::scene::Viewport;
use crate::theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Map, MapResolution},
        Block, BorderType, Borders,
    },
    Frame,
};

/// Longitude span (degrees) of the focused viewport.
const FOCUS_LON_SPAN: f64 = 24.0;

/// Latitude span of the focused viewport; half the longitude span to
/// roughly match terminal cell aspect.
const FOCUS_LAT_SPAN: f64 = 12.0;

/// Minimum span of a fitted viewport so a lone marker does not collapse
/// the view to a point.
const MIN_FIT_SPAN: f64 = 4.0;

pub fn render_map(f: &mut Frame, area: Rect, app: &AppState) {
    let (x_bounds, y_bounds) = viewport_bounds(app.scene.viewport);

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(" World Map ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme::ACCENT)),
        )
        .marker(symbols::Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&Map {
                color: theme::COAST_GRAY,
                resolution: MapResolution::High,
            });
            ctx.layer();

            // Connectors go under the markers.
            let overlays = &app.scene.overlays;
            if let Some(line) = &overlays.birth_line {
                ctx.draw(&CanvasLine {
                    x1: line.from.lon,
                    y1: line.from.lat,
                    x2: line.to.lon,
                    y2: line.to.lat,
                    color: line.color,
                });
            }
            for line in &overlays.prize_lines {
                ctx.draw(&CanvasLine {
                    x1: line.from.lon,
                    y1: line.from.lat,
                    x2: line.to.lon,
                    y2: line.to.lat,
                    color: line.color,
                });
            }
            ctx.layer();

            for marker in &app.scene.markers {
                let style = marker.style;
                let label = match style.badge {
                    Some(count) => format!("{}{}", style.glyph(), count),
                    None => style.glyph().to_string(),
                };
                let mut text_style = Style::default().fg(style.color);
                if style.highlighted {
                    text_style = text_style.add_modifier(Modifier::BOLD);
                }
                ctx.print(
                    marker.position.lon,
                    marker.position.lat,
                    Line::from(Span::styled(label, text_style)),
                );
            }

            if let Some(birth) = &overlays.birth_marker {
                ctx.print(
                    birth.position.lon,
                    birth.position.lat,
                    Line::from(Span::styled(
                        "○".to_string(),
                        Style::default().fg(birth.style.color),
                    )),
                );
            }
        });

    f.render_widget(canvas, area);
}

/// Canvas bounds ([west, east], [south, north]) for a viewport.
fn viewport_bounds(viewport: Viewport) -> ([f64; 2], [f64; 2]) {
    match viewport {
        Viewport::World => ([-180.0, 180.0], [-90.0, 90.0]),
        Viewport::Fit { min, max } => {
            let (west, east) = widen(min.lon, max.lon);
            let (south, north) = widen(min.lat, max.lat);
            (
                [west.max(-180.0), east.min(180.0)],
                [south.max(-90.0), north.min(90.0)],
            )
        }
        Viewport::Focus { center } => (
            [
                (center.lon - FOCUS_LON_SPAN / 2.0).max(-180.0),
                (center.lon + FOCUS_LON_SPAN / 2.0).min(180.0),
            ],
            [
                (center.lat - FOCUS_LAT_SPAN / 2.0).max(-90.0),
                (center.lat + FOCUS_LAT_SPAN / 2.0).min(90.0),
            ],
        ),
    }
}

/// Grow an interval symmetrically up to the minimum fitted span.
fn widen(lo: f64, hi: f64) -> (f64, f64) {
    let span = hi - lo;
    if span >= MIN_FIT_SPAN {
        (lo, hi)
    } else {
        let grow = (MIN_FIT_SPAN - span) / 2.0;
        (lo - grow, hi + grow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coord;

    #[test]
    fn world_viewport_spans_the_globe() {
        let (x, y) = viewport_bounds(Viewport::World);
        assert_eq!(x, [-180.0, 180.0]);
        assert_eq!(y, [-90.0, 90.0]);
    }

    #[test]
    fn focus_viewport_centers_on_the_target() {
        let (x, y) = viewport_bounds(Viewport::Focus {
            center: Coord::new(40.0, -74.0),
        });
        assert!(((x[0] + x[1]) / 2.0 + 74.0).abs() < 1e-9);
        assert!(((y[0] + y[1]) / 2.0 - 40.0).abs() < 1e-9);
    }

    #[test]
    fn tight_fit_is_widened_to_a_usable_span() {
        let (x, y) = viewport_bounds(Viewport::Fit {
            min: Coord::new(40.0, -74.0),
            max: Coord::new(40.1, -73.9),
        });
        assert!(x[1] - x[0] >= MIN_FIT_SPAN);
        assert!(y[1] - y[0] >= MIN_FIT_SPAN);
    }
}
