use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Tabs};
use ratatui::Frame;

use crate::app::App;
use crate::domain::Filter;

/// Filter tab bar. Exactly one tab is highlighted at any time.
pub fn render_nav(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles = Filter::ALL
        .iter()
        .map(|filter| TextLine::from(filter.label()))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .select(app.active_filter.index())
        .block(
            Block::default()
                .title(" Filters ")
                .title_style(Style::default().fg(Color::Cyan))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

/// Maps a click inside the tab bar to the control under the pointer. The
/// geometry mirrors how the tab row lays out: one leading pad, then each
/// title followed by " | ".
pub fn filter_at(area: Rect, column: u16, row: u16) -> Option<Filter> {
    let inner = area.inner(Margin::new(1, 1));
    if row != inner.y || column < inner.x + 1 {
        return None;
    }

    let mut x = inner.x + 1;
    for (index, filter) in Filter::ALL.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let width = filter.label().len() as u16;
        if column >= x && column < x + width {
            return Filter::from_index(index);
        }
        x += width + 3;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clicks_land_on_the_right_tab() {
        let area = Rect::new(0, 0, 80, 3);
        let inner = area.inner(Margin::new(1, 1));

        // first column of the first label
        assert_eq!(filter_at(area, inner.x + 1, inner.y), Some(Filter::All));

        // first column of the second label: pad + label + " | "
        #[allow(clippy::cast_possible_truncation)]
        let second = inner.x + 1 + Filter::All.label().len() as u16 + 3;
        assert_eq!(filter_at(area, second, inner.y), Some(Filter::CorePublisher));
    }

    #[test]
    fn clicks_outside_the_row_miss() {
        let area = Rect::new(0, 0, 80, 3);
        let inner = area.inner(Margin::new(1, 1));
        assert_eq!(filter_at(area, inner.x + 1, inner.y + 1), None);
        assert_eq!(filter_at(area, 0, inner.y), None);
    }

    #[test]
    fn divider_gaps_do_not_select() {
        let area = Rect::new(0, 0, 80, 3);
        let inner = area.inner(Margin::new(1, 1));
        #[allow(clippy::cast_possible_truncation)]
        let gap = inner.x + 1 + Filter::All.label().len() as u16 + 1;
        assert_eq!(filter_at(area, gap, inner.y), None);
    }
}
