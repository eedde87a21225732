// Status bar rendering
//
// Bottom bar: category selector, laureate count, fetch indicator and key
// hints, trimmed to the available width.

use crate::app::AppState;
use crate::theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans = vec![
        Span::styled(" 🏅 ", Style::default().fg(theme::MIXED_GOLD)),
        Span::styled(
            format!("◀ {} ▶", app.context().label()),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];

    if app.loaded {
        spans.push(Span::styled(
            format!("{} laureates", app.records.len()),
            Style::default().fg(theme::TEXT_WHITE),
        ));
        spans.push(Span::raw("  "));
    }

    if app.pending_seq.is_some() {
        spans.push(Span::styled(
            "Fetching…",
            Style::default().fg(theme::MIXED_GOLD),
        ));
        spans.push(Span::raw("  "));
    }

    // Key hints, highest value first; stop when the width runs out.
    let hints: [(&str, &str); 6] = [
        ("↑↓", "Cards "),
        ("Enter", "Select "),
        ("Tab", "Markers "),
        ("Esc", "Clear "),
        ("R", "Reset "),
        ("Q", "Quit "),
    ];
    let used = spans_width(&spans);
    let available = area.width.saturating_sub(2) as usize;
    let mut current = used;
    for (key, desc) in hints {
        let length = key.width() + 1 + desc.width();
        if current + length > available {
            break;
        }
        spans.push(Span::styled(
            key,
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(":{desc}"),
            Style::default().fg(theme::TEXT_DIM),
        ));
        current += length;
    }

    let status_bar = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme::ACCENT)),
        );

    f.render_widget(status_bar, area);
}

/// Display width of the spans already on the bar. The medal emoji is
/// double-width, so char counting would come up short.
fn spans_width(spans: &[Span]) -> usize {
    spans.iter().map(|s| s.content.as_ref().width()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_accounting_counts_wide_glyphs_as_two_cells() {
        let spans = [Span::raw(" 🏅 "), Span::raw("Fetching…")];
        // Two spaces + double-width medal + nine single-width chars.
        assert_eq!(spans_width(&spans), 13);
    }
}
