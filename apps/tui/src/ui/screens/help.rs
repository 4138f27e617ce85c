use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_help(f: &mut Frame<'_>, area: Rect) {
    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let key = |k: &'static str, what: &'static str| {
        TextLine::from(vec![
            Span::styled(
                format!("  {k}"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" - {what}"), Style::default()),
        ])
    };

    let help_text = vec![
        TextLine::from(vec![Span::styled(
            "Station Map",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]),
        TextLine::from(""),
        TextLine::from(
            "Each bubble is one public radio station, sized by the selected metric. \
             Hover a bubble with the mouse (or cycle with Tab) to see the station card.",
        ),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Keyboard Shortcuts:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        key("t", "Size bubbles by total subscription reach (TSR)"),
        key("p", "Size bubbles by number of products in use"),
        key("1", "Show all stations"),
        key("2", "Only stations using Core Publisher"),
        key("3", "Only stations using Composer Pro"),
        key("4", "Only stations using Springboard donation forms"),
        key("Tab / Shift-Tab", "Cycle the highlighted station"),
        key("+ / - / 0", "Zoom in, zoom out, reset the view"),
        key("arrows", "Pan the map"),
        key("Esc", "Clear the highlight / quit"),
        key("q", "Quit"),
        TextLine::from(""),
        TextLine::from(
            "Mouse: move to hover stations, click a filter tab, scroll to zoom.",
        ),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Press Esc to close this help screen",
            Style::default().fg(Color::Yellow),
        )]),
    ];

    let help_paragraph = Paragraph::new(Text::from(help_text))
        .block(help_block)
        .wrap(Wrap { trim: true });

    f.render_widget(help_paragraph, area);
}
