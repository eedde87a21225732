// UI rendering module
//
// The main draw() function lays out the three panels (card list, world
// map, detail popup) plus the status bar, and puts the blocking error
// notice on top when one is pending.

mod cards;
mod map;
mod popup;
mod status_bar;

use crate::app::AppState;
use crate::theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use cards::render_cards;
use map::render_map;
use popup::render_popup;
use status_bar::render_status_bar;

/// Main UI drawing function
pub fn draw(f: &mut Frame, app: &mut AppState) {
    let size = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Status bar
        ])
        .split(size);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(32), // Laureate cards
            Constraint::Percentage(43), // World map
            Constraint::Percentage(25), // Popup / details
        ])
        .split(chunks[0]);

    render_cards(f, body[0], app);
    render_map(f, body[1], app);
    render_popup(f, body[2], app);
    render_status_bar(f, chunks[1], app);

    // The error notice blocks everything until a key dismisses it.
    if let Some(message) = app.notice.clone() {
        render_notice(f, size, &message);
    }
}

fn render_notice(f: &mut Frame, size: Rect, message: &str) {
    let area = centered_rect(size, 50, 20);
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default()
                .fg(theme::TEXT_WHITE)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "press any key to continue",
            Style::default().fg(theme::TEXT_DIM),
        )),
    ];

    let notice = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(theme::NOTICE_RED)),
        );

    f.render_widget(notice, area);
}

/// Rectangle centered in `size`, as percentages of its width and height.
fn centered_rect(size: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(size);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
