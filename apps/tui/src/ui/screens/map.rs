use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::domain::Metric;
use crate::ui::widgets::{map_canvas, nav, tooltip};

/// Fixed regions of the map screen. Computed the same way for drawing and
/// for mouse hit-testing, so the two can never disagree.
#[derive(Debug, Clone, Copy)]
pub struct MapLayout {
    pub nav: Rect,
    pub map: Rect,
    pub side: Rect,
    pub status: Rect,
    pub hints: Rect,
}

pub fn layout(area: Rect) -> MapLayout {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filter tabs
            Constraint::Min(10),   // Map + side panel
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(area.inner(Margin::new(1, 0)));

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(34)])
        .split(outer[1]);

    MapLayout {
        nav: outer[0],
        map: content[0],
        side: content[1],
        status: outer[2],
        hints: outer[3],
    }
}

/// Maps a terminal cell inside the map area to canvas coordinates, honoring
/// the current pan/zoom window. `None` outside the drawable region.
pub fn cell_to_canvas(app: &App, map_area: Rect, column: u16, row: u16) -> Option<(f64, f64)> {
    let inner = map_area.inner(Margin::new(1, 1));
    if inner.width == 0 || inner.height == 0 {
        return None;
    }
    if column < inner.x
        || column >= inner.x + inner.width
        || row < inner.y
        || row >= inner.y + inner.height
    {
        return None;
    }

    let (origin_x, origin_y, view_w, view_h) = app.view.window();
    let fx = (f64::from(column - inner.x) + 0.5) / f64::from(inner.width);
    let fy = (f64::from(row - inner.y) + 0.5) / f64::from(inner.height);
    Some((fx.mul_add(view_w, origin_x), fy.mul_add(view_h, origin_y)))
}

/// Inverse of `cell_to_canvas` for a known canvas point; used to anchor the
/// tooltip when the hover came from the keyboard.
pub fn canvas_to_cell(app: &App, map_area: Rect, point: (f64, f64)) -> (u16, u16) {
    let inner = map_area.inner(Margin::new(1, 1));
    if inner.width == 0 || inner.height == 0 {
        return (map_area.x, map_area.y);
    }
    let (origin_x, origin_y, view_w, view_h) = app.view.window();
    let fx = ((point.0 - origin_x) / view_w).clamp(0.0, 1.0);
    let fy = ((point.1 - origin_y) / view_h).clamp(0.0, 1.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let column = inner.x + (fx * f64::from(inner.width.saturating_sub(1))) as u16;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let row = inner.y + (fy * f64::from(inner.height.saturating_sub(1))) as u16;
    (column, row)
}

pub fn render_map(app: &mut App, f: &mut Frame<'_>) {
    let layout = layout(f.area());

    nav::render_nav(app, f, layout.nav);
    map_canvas::render_map_canvas(app, f, layout.map);
    render_side_panel(app, f, layout.side);
    render_status(app, f, layout.status);
    render_hints(f, layout.hints);

    if let Some(state) = app.tooltip {
        tooltip::render_tooltip(app, state, f, layout.map);
    }
}

fn render_side_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Bubble size ")
        .title_style(Style::default().fg(Color::Green))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let mut lines = Vec::new();
    for metric in Metric::ALL {
        let selected = metric == app.metric;
        let style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let radio = if selected { "(o)" } else { "( )" };
        lines.push(TextLine::from(Span::styled(
            format!("{radio} {}", metric.label()),
            style,
        )));
    }

    lines.push(TextLine::from(""));
    if let Some(scale) = app.scale {
        let [min, max] = scale.domain();
        let [r_min, r_max] = scale.range();
        lines.push(TextLine::from(vec![
            Span::styled("Domain: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{min} to {max}"),
                Style::default().fg(Color::Yellow),
            ),
        ]));
        lines.push(TextLine::from(vec![
            Span::styled("Radius: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{r_min} to {r_max} px"),
                Style::default().fg(Color::Yellow),
            ),
        ]));
    }

    lines.push(TextLine::from(""));
    lines.push(TextLine::from(vec![
        Span::styled("Stations: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{} ({} shown)", app.station_count(), app.visible_count()),
            Style::default().fg(Color::White),
        ),
    ]));
    lines.push(TextLine::from(vec![
        Span::styled("Filter: ", Style::default().fg(Color::Gray)),
        Span::styled(
            app.active_filter.label(),
            Style::default().fg(Color::White),
        ),
    ]));
    lines.push(TextLine::from(vec![
        Span::styled("Zoom: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{:.1}x", app.view.zoom),
            Style::default().fg(Color::White),
        ),
    ]));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_status(app: &mut App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.loading_stations || app.loading_map {
        let label = if app.loading_stations {
            "Loading station data..."
        } else {
            "Loading state geometry..."
        };
        let throbber = throbber_widgets_tui::Throbber::default()
            .label(label)
            .style(Style::default().fg(Color::Cyan));
        f.render_stateful_widget(throbber, inner, &mut app.throbber);
        return;
    }

    let style = if app.status_message.starts_with("Failed") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };
    let paragraph = Paragraph::new(Span::styled(app.status_message.clone(), style))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, inner);
}

fn render_hints(f: &mut Frame<'_>, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(Color::Gray);

    let shortcuts = TextLine::from(vec![
        Span::styled("t/p", key_style),
        Span::styled(": Metric | ", text_style),
        Span::styled("1-4", key_style),
        Span::styled(": Filter | ", text_style),
        Span::styled("Tab", key_style),
        Span::styled(": Station | ", text_style),
        Span::styled("+/-/0", key_style),
        Span::styled(": Zoom | ", text_style),
        Span::styled("arrows", key_style),
        Span::styled(": Pan | ", text_style),
        Span::styled("F1", key_style),
        Span::styled(": Help | ", text_style),
        Span::styled("q", key_style),
        Span::styled(": Quit", text_style),
    ]);

    let paragraph = Paragraph::new(shortcuts).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BASE_SCALE, BASE_TRANSLATE, CANVAS_HEIGHT, CANVAS_WIDTH, MAP_SCALE};
    use crate::geo::projection::AlbersUsa;

    fn test_app() -> App {
        App::new(AlbersUsa::new(
            BASE_SCALE * MAP_SCALE,
            (BASE_TRANSLATE.0 * MAP_SCALE, BASE_TRANSLATE.1 * MAP_SCALE),
        ))
    }

    #[test]
    fn layout_partitions_without_overlap() {
        let layout = layout(Rect::new(0, 0, 120, 40));
        assert!(layout.nav.height == 3);
        assert!(layout.map.y >= layout.nav.y + layout.nav.height);
        assert!(layout.side.x >= layout.map.x + layout.map.width);
        assert!(layout.status.y >= layout.map.y + layout.map.height);
        assert!(layout.hints.y >= layout.status.y + layout.status.height);
    }

    #[test]
    fn cell_mapping_covers_the_full_canvas_at_zoom_one() {
        let app = test_app();
        let map_area = Rect::new(0, 3, 80, 30);
        let inner = map_area.inner(Margin::new(1, 1));

        let top_left = cell_to_canvas(&app, map_area, inner.x, inner.y).unwrap();
        assert!(top_left.0 < CANVAS_WIDTH / f64::from(inner.width));
        assert!(top_left.1 < CANVAS_HEIGHT / f64::from(inner.height));

        let bottom_right = cell_to_canvas(
            &app,
            map_area,
            inner.x + inner.width - 1,
            inner.y + inner.height - 1,
        )
        .unwrap();
        assert!(bottom_right.0 > CANVAS_WIDTH * 0.98);
        assert!(bottom_right.1 > CANVAS_HEIGHT * 0.96);
    }

    #[test]
    fn cells_outside_the_map_do_not_hit() {
        let app = test_app();
        let map_area = Rect::new(0, 3, 80, 30);
        assert!(cell_to_canvas(&app, map_area, 0, 0).is_none());
        assert!(cell_to_canvas(&app, map_area, 200, 10).is_none());
    }

    #[test]
    fn cell_mapping_round_trips_through_its_inverse() {
        let app = test_app();
        let map_area = Rect::new(0, 3, 80, 30);
        let inner = map_area.inner(Margin::new(1, 1));
        let cell = (inner.x + 20, inner.y + 10);
        let point = cell_to_canvas(&app, map_area, cell.0, cell.1).unwrap();
        let back = canvas_to_cell(&app, map_area, point);
        assert!(back.0.abs_diff(cell.0) <= 1);
        assert!(back.1.abs_diff(cell.1) <= 1);
    }
}
