// Laureate card list rendering
//
// Left panel: one card per laureate of the current fetch. The cursor row
// is inverted; the card of the currently selected laureate additionally
// carries the active mark. Before the first fetch, and for empty
// results, the panel shows a placeholder instead.

use crate::app::{AppState, Selection};
use crate::present;
use crate::theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn render_cards(f: &mut Frame, area: Rect, app: &mut AppState) {
    let title = if app.loaded && !app.category_label.is_empty() {
        format!(" {} Laureates ", app.category_label)
    } else {
        " Laureates ".to_string()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::ACCENT));

    if !app.loaded {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Select a category to explore Nobel Prize winners",
                Style::default().fg(theme::TEXT_DIM),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "←/→ to pick a category",
                Style::default().fg(theme::TEXT_DIM),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    if app.records.is_empty() {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            "No laureates found",
            Style::default().fg(theme::TEXT_DIM),
        )))
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    // Card view models are resolved once per fetch; the draw path only
    // formats them.
    let items: Vec<ListItem> = app
        .cards
        .iter()
        .enumerate()
        .map(|(index, card)| card_item(card, app.selection == Selection::Laureate(index)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("│");

    f.render_stateful_widget(list, area, &mut app.card_cursor);
}

fn card_item(card: &present::CardContent, active: bool) -> ListItem<'static> {
    let color = theme::category_color(card.category);

    let mut name_style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if active {
        name_style = name_style.add_modifier(Modifier::UNDERLINED);
    }
    let name_prefix = if active { "▶ " } else { "" };

    let shared_line = if card.shared_with.is_empty() {
        Line::from(Span::styled(
            "Solo prize",
            Style::default().fg(theme::TEXT_DIM),
        ))
    } else {
        let names: Vec<String> = card
            .shared_with
            .iter()
            .map(|link| link.name.clone())
            .collect();
        Line::from(Span::styled(
            format!("Shared with: {}", names.join(", ")),
            Style::default().fg(theme::PRIZE_PURPLE),
        ))
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("{}{}", name_prefix, card.name),
            name_style,
        )),
        Line::from(Span::styled(
            format!("Nobel Prize {}", card.prize_year),
            Style::default().fg(theme::TEXT_WHITE),
        )),
        Line::from(Span::styled(
            card.achievement.clone(),
            Style::default().fg(theme::TEXT_DIM),
        )),
        Line::from(Span::styled(
            format!("Born: {}", card.birth_location),
            Style::default().fg(theme::TEXT_DIM),
        )),
        Line::from(Span::styled(
            format!("Work: {} ({})", card.work_location, card.work_years),
            Style::default().fg(theme::TEXT_DIM),
        )),
        shared_line,
        Line::from(""),
    ];

    ListItem::new(Text::from(lines))
}
