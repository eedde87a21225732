// Popup panel rendering
//
// Right panel: the open popup for the highlighted marker. Single-member
// groups get the full laureate detail, multi-member groups a numbered
// roster with the selected member emphasized. Rosters longer than one
// page scroll with PageDown/PageUp; the numbers match the 1-9 link keys
// on the visible page.

use crate::app::{config, AppState};
use crate::present::{LaureateDetail, PopupContent, Roster};
use crate::theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render_popup(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::ACCENT));

    let lines = match app.scene.popup.as_ref().filter(|p| p.open) {
        Some(popup) => match &popup.content {
            PopupContent::Single(detail) => detail_lines(detail),
            PopupContent::Roster(roster) => roster_lines(roster, popup.scroll),
        },
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Enter selects the laureate under the cursor,",
                Style::default().fg(theme::TEXT_DIM),
            )),
            Line::from(Span::styled(
                "Tab steps through the map markers.",
                Style::default().fg(theme::TEXT_DIM),
            )),
        ],
    };

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    f.render_widget(paragraph, area);
}

fn detail_lines(detail: &LaureateDetail) -> Vec<Line<'static>> {
    let color = theme::category_color(detail.category);
    let mut lines = vec![
        Line::from(Span::styled(
            detail.name.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Nobel Prize {} · {}", detail.prize_year, detail.category.label()),
            Style::default().fg(theme::TEXT_WHITE),
        )),
        Line::from(""),
        label_value("Work", &detail.work_location),
        label_value("Years", &detail.work_years),
        label_value("Born", &detail.birth_location),
        Line::from(""),
        Line::from(Span::styled(
            detail.achievement.clone(),
            Style::default().fg(theme::TEXT_DIM),
        )),
    ];

    if !detail.shared_with.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Shared with:".to_string(),
            Style::default().fg(theme::PRIZE_PURPLE),
        )));
        for (slot, link) in detail.shared_with.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {}. ", slot + 1),
                    Style::default().fg(theme::ACCENT),
                ),
                Span::styled(link.name.clone(), Style::default().fg(theme::TEXT_WHITE)),
            ]));
        }
    }

    lines
}

fn label_value(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(theme::TEXT_DIM)),
        Span::styled(value.to_string(), Style::default().fg(theme::TEXT_WHITE)),
    ])
}

/// Render the page of roster entries starting at `scroll`. Slot numbers
/// restart at 1 per page, matching what the link keys resolve to.
fn roster_lines(roster: &Roster, scroll: usize) -> Vec<Line<'static>> {
    let total = roster.entries.len();
    let end = (scroll + config::ROSTER_PAGE).min(total);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} laureates · {}", total, roster.place),
            Style::default()
                .fg(theme::TEXT_WHITE)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if scroll > 0 {
        lines.push(Line::from(Span::styled(
            format!("↑ {scroll} more"),
            Style::default().fg(theme::TEXT_DIM),
        )));
    }

    for (slot, entry) in roster.entries[scroll..end].iter().enumerate() {
        let color = theme::category_color(entry.category);
        let mut style = Style::default().fg(color);
        let marker = if entry.emphasized {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            "▶"
        } else {
            " "
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}{}. ", marker, slot + 1),
                Style::default().fg(theme::ACCENT),
            ),
            Span::styled(format!("{} ({})", entry.name, entry.prize_year), style),
        ]));
    }

    if end < total {
        lines.push(Line::from(Span::styled(
            format!("↓ {} more", total - end),
            Style::default().fg(theme::TEXT_DIM),
        )));
    }

    lines.push(Line::from(""));
    let hint = if total > config::ROSTER_PAGE {
        "1-9 to select an entry · PgDn/PgUp to scroll"
    } else {
        "1-9 to select an entry"
    };
    lines.push(Line::from(Span::styled(
        hint.to_string(),
        Style::default().fg(theme::TEXT_DIM),
    )));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Category;
    use crate::present::RosterEntry;

    fn roster(n: usize) -> Roster {
        Roster {
            place: "Workburg".to_string(),
            entries: (0..n)
                .map(|i| RosterEntry {
                    laureate_id: format!("m{i}"),
                    name: format!("Laureate m{i}"),
                    prize_year: 1950,
                    category: Category::Physics,
                    emphasized: false,
                })
                .collect(),
        }
    }

    fn rendered(lines: &[Line<'static>]) -> Vec<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn long_rosters_render_one_page_at_a_time() {
        let text = rendered(&roster_lines(&roster(12), 0));

        // Nine entries visible, the rest announced below the fold.
        assert!(text.iter().any(|l| l.contains("Laureate m8")));
        assert!(!text.iter().any(|l| l.contains("Laureate m9")));
        assert!(text.iter().any(|l| l.contains("↓ 3 more")));
        assert!(text.iter().any(|l| l.contains("PgDn/PgUp")));
    }

    #[test]
    fn scrolled_rosters_restart_slot_numbers() {
        let text = rendered(&roster_lines(&roster(12), 9));

        assert!(text.iter().any(|l| l.contains("↑ 9 more")));
        // The first visible entry is m9, numbered 1 again.
        assert!(text
            .iter()
            .any(|l| l.contains("1. ") && l.contains("Laureate m9")));
        assert!(!text.iter().any(|l| l.contains("Laureate m8")));
    }

    #[test]
    fn short_rosters_show_everything_with_no_scroll_hint() {
        let text = rendered(&roster_lines(&roster(3), 0));

        assert!(text.iter().any(|l| l.contains("Laureate m2")));
        assert!(!text.iter().any(|l| l.contains("more")));
        assert!(!text.iter().any(|l| l.contains("PgDn")));
    }
}
