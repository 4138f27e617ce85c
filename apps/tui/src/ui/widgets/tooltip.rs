use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::state::TooltipState;
use crate::app::App;
use crate::data::models::Station;
use crate::ui::screens::map::canvas_to_cell;

/// Station card shown for the hovered marker; mirrors the markup the hover
/// card carries (title, logo URL, product count).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipContent {
    pub title: String,
    pub products: String,
    pub logo_url: String,
}

/// Pure formatting; no side effects beyond string construction.
pub fn tooltip_content(station: &Station) -> TooltipContent {
    TooltipContent {
        title: strip_band_suffix(&station.name),
        products: format!("Uses {} DS products", format_count(station.total_products)),
        logo_url: format!(
            "http://media.npr.org/images/stations/logos/{}.gif",
            station.name.to_lowercase().replace('-', "_")
        ),
    }
}

/// Drops the first "-FM"/"-AM" band suffix from a station call sign.
fn strip_band_suffix(name: &str) -> String {
    let hit = ["-FM", "-AM"]
        .iter()
        .filter_map(|suffix| name.find(suffix))
        .min();
    match hit {
        Some(index) => format!("{}{}", &name[..index], &name[index + 3..]),
        None => name.to_string(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn format_count(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Pops the station card next to the pointer (or next to the marker when
/// the hover came from the keyboard), clamped into the frame.
pub fn render_tooltip(app: &App, state: TooltipState, f: &mut Frame<'_>, map_area: Rect) {
    let Some(stations) = app.stations.as_ref() else {
        return;
    };
    let Some(station) = stations.get(state.station) else {
        return;
    };
    let content = tooltip_content(station);

    let lines = vec![
        TextLine::from(Span::styled(
            content.title,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(Span::styled(
            content.products,
            Style::default().fg(Color::Gray),
        )),
        TextLine::from(Span::styled(
            content.logo_url,
            Style::default().fg(Color::DarkGray),
        )),
    ];

    #[allow(clippy::cast_possible_truncation)]
    let width = (lines.iter().map(TextLine::width).max().unwrap_or(0) as u16 + 2)
        .min(f.area().width);
    let height = 5_u16.min(f.area().height);

    let anchor = state.position.unwrap_or_else(|| {
        app.markers
            .get(state.station)
            .and_then(|marker| marker.center)
            .map_or((map_area.x, map_area.y), |center| {
                canvas_to_cell(app, map_area, center)
            })
    });

    let frame = f.area();
    // above and to the right of the pointer, like the original offset
    let x = (anchor.0 + 1).min(frame.width.saturating_sub(width));
    let y = anchor.1.saturating_sub(height).max(frame.y);

    let popup = Rect::new(x, y, width, height);
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(Text::from(lines)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        ),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(name: &str, products: f64) -> Station {
        Station {
            name: name.to_string(),
            longitude: -77.02,
            latitude: 38.93,
            tsr: 50.0,
            total_products: products,
            product_names: String::new(),
            core_publisher: None,
            composer_pro: None,
            springboard: None,
        }
    }

    #[test]
    fn strips_the_band_suffix_from_the_title() {
        let content = tooltip_content(&station("WAMU-FM", 3.0));
        assert_eq!(content.title, "WAMU");
        let content = tooltip_content(&station("WNYC-AM", 2.0));
        assert_eq!(content.title, "WNYC");
        let content = tooltip_content(&station("KUOW", 1.0));
        assert_eq!(content.title, "KUOW");
    }

    #[test]
    fn derives_the_logo_url_from_the_normalized_name() {
        let content = tooltip_content(&station("WAMU-FM", 3.0));
        assert_eq!(
            content.logo_url,
            "http://media.npr.org/images/stations/logos/wamu_fm.gif"
        );
    }

    #[test]
    fn reports_the_product_count() {
        let content = tooltip_content(&station("KQED-FM", 1.0));
        assert_eq!(content.products, "Uses 1 DS products");
    }

    #[test]
    fn non_integer_counts_print_as_is() {
        assert_eq!(format_count(2.5), "2.5");
        assert_eq!(format_count(f64::NAN), "NaN");
    }
}
