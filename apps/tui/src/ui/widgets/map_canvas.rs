use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::app::App;
use crate::config::CANVAS_HEIGHT;

/// Fixed marker fill, hsla(205, 75%, 60%).
pub const MARKER_COLOR: Color = Color::Rgb(77, 166, 230);
const OUTLINE_COLOR: Color = Color::DarkGray;

/// Draws the base-map outlines and the station markers. The canvas bounds
/// follow the view transform, which is what makes pan/zoom work: the paint
/// closure always draws in canvas coordinates.
pub fn render_map_canvas(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Stations ")
        .title_style(Style::default().fg(Color::Cyan))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < 4 || inner.height < 4 {
        return;
    }

    let (origin_x, origin_y, view_w, view_h) = app.view.window();
    // Circle fill stride, roughly one braille dot in canvas units.
    let fill_step = (view_w / f64::from(inner.width * 2)).max(1.0);

    f.render_widget(
        Canvas::default()
            .paint(|ctx| {
                if let Some(outlines) = &app.outlines {
                    for outline in outlines {
                        for segment in outline.windows(2) {
                            ctx.draw(&CanvasLine {
                                x1: segment[0].0,
                                y1: CANVAS_HEIGHT - segment[0].1,
                                x2: segment[1].0,
                                y2: CANVAS_HEIGHT - segment[1].1,
                                color: OUTLINE_COLOR,
                            });
                        }
                    }
                }

                // Dataset order doubles as stacking order: later markers
                // paint over earlier ones, matching the hit-test direction.
                for marker in &app.markers {
                    let Some((x, y)) = marker.drawable() else {
                        continue;
                    };
                    let color = if marker.active {
                        Color::White
                    } else {
                        MARKER_COLOR
                    };

                    let mut radius = marker.radius;
                    while radius > 0.0 {
                        ctx.draw(&Circle {
                            x,
                            y: CANVAS_HEIGHT - y,
                            radius,
                            color,
                        });
                        radius -= fill_step;
                    }

                    if marker.active {
                        ctx.draw(&Circle {
                            x,
                            y: CANVAS_HEIGHT - y,
                            radius: marker.radius + fill_step * 1.5,
                            color: Color::Yellow,
                        });
                    }
                }
            })
            .x_bounds([origin_x, origin_x + view_w])
            .y_bounds([
                CANVAS_HEIGHT - origin_y - view_h,
                CANVAS_HEIGHT - origin_y,
            ]),
        inner,
    );
}
