// Presentation builder
//
// Pure functions from (laureate | location group, category context) to
// the view models the UI renders: marker appearance, popup content and
// laureate cards. Nothing here holds state between calls, so both the
// initial render and every re-render after a selection change go through
// the same code.
//
// All links carry the stable laureate identifier, never an array index;
// indices are only valid within one fetch's result set.

use ratatui::style::Color;
use tracing::warn;

use crate::api::{Category, CategoryContext, LaureateRecord};
use crate::geo::LocationGroup;
use crate::theme;

// ============================================================================
// Marker appearance
// ============================================================================

/// How a single map marker should look.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub color: Color,
    /// Member count, shown when the marker stands for more than one
    /// laureate.
    pub badge: Option<usize>,
    /// Group spans several categories in the combined view.
    pub mixed: bool,
    /// Marker belongs to the current selection.
    pub highlighted: bool,
}

impl MarkerStyle {
    /// Plain single-purpose marker, used for the birth overlay.
    pub fn plain(color: Color) -> Self {
        Self {
            color,
            badge: None,
            mixed: false,
            highlighted: false,
        }
    }

    /// Glyph for the canvas. Highlighted markers get the center dot,
    /// mixed-category markers a shape no single-category marker uses.
    pub fn glyph(&self) -> &'static str {
        if self.highlighted {
            "◉"
        } else if self.mixed {
            "◈"
        } else {
            "●"
        }
    }
}

/// Appearance of a group's marker under the given category context.
pub fn marker_style(
    group: &LocationGroup,
    records: &[LaureateRecord],
    context: CategoryContext,
    highlighted: bool,
) -> MarkerStyle {
    let mixed = context == CategoryContext::All && group.categories.len() > 1;
    let color = if mixed {
        theme::MIXED_GOLD
    } else {
        group
            .members
            .first()
            .and_then(|&index| records.get(index))
            .map(|record| theme::category_color(record.category))
            .unwrap_or(theme::WORK_INDIGO)
    };
    let badge = (group.members.len() > 1).then_some(group.members.len());

    MarkerStyle {
        color,
        badge,
        mixed,
        highlighted,
    }
}

// ============================================================================
// Popup content
// ============================================================================

/// A link to another laureate, resolvable by stable identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub laureate_id: String,
    pub name: String,
}

/// Full detail for a single laureate.
#[derive(Debug, Clone, PartialEq)]
pub struct LaureateDetail {
    pub laureate_id: String,
    pub name: String,
    pub prize_year: i32,
    pub category: Category,
    pub work_location: String,
    pub work_years: String,
    pub birth_location: String,
    pub achievement: String,
    pub shared_with: Vec<Link>,
}

/// One entry in a multi-member marker's roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub laureate_id: String,
    pub name: String,
    pub prize_year: i32,
    pub category: Category,
    /// Entry belongs to the currently selected laureate.
    pub emphasized: bool,
}

/// Roster of everyone at one shared location.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    pub place: String,
    pub entries: Vec<RosterEntry>,
}

/// Popup payload: full detail for single-member groups, a roster for
/// multi-member ones.
#[derive(Debug, Clone, PartialEq)]
pub enum PopupContent {
    Single(LaureateDetail),
    Roster(Roster),
}

impl PopupContent {
    /// Laureate identifiers reachable from the popup's numbered links,
    /// in display order.
    pub fn links(&self) -> Vec<&str> {
        match self {
            PopupContent::Single(detail) => detail
                .shared_with
                .iter()
                .map(|link| link.laureate_id.as_str())
                .collect(),
            PopupContent::Roster(roster) => roster
                .entries
                .iter()
                .map(|entry| entry.laureate_id.as_str())
                .collect(),
        }
    }
}

/// Build the popup payload for a group's marker. `selected` is the index
/// of the currently selected laureate, if any; in a roster that member is
/// emphasized.
pub fn popup_content(
    group: &LocationGroup,
    records: &[LaureateRecord],
    selected: Option<usize>,
) -> PopupContent {
    if let [only] = group.members.as_slice() {
        if let Some(record) = records.get(*only) {
            return PopupContent::Single(laureate_detail(record, records));
        }
    }

    let entries: Vec<RosterEntry> = group
        .members
        .iter()
        .filter_map(|&index| records.get(index).map(|record| (index, record)))
        .map(|(index, record)| RosterEntry {
            laureate_id: record.laureate_id.clone(),
            name: record.name.clone(),
            prize_year: record.prize_year,
            category: record.category,
            emphasized: selected == Some(index),
        })
        .collect();
    let place = group
        .members
        .first()
        .and_then(|&index| records.get(index))
        .map(|record| record.work_location.clone())
        .unwrap_or_default();

    PopupContent::Roster(Roster { place, entries })
}

fn laureate_detail(record: &LaureateRecord, records: &[LaureateRecord]) -> LaureateDetail {
    LaureateDetail {
        laureate_id: record.laureate_id.clone(),
        name: record.name.clone(),
        prize_year: record.prize_year,
        category: record.category,
        work_location: record.work_location.clone(),
        work_years: record.work_years.clone(),
        birth_location: record.birth_location.clone(),
        achievement: record.achievement.clone(),
        shared_with: co_laureate_links(record, records),
    }
}

// ============================================================================
// Cards
// ============================================================================

/// One card in the laureate list.
#[derive(Debug, Clone, PartialEq)]
pub struct CardContent {
    pub laureate_id: String,
    pub name: String,
    pub prize_year: i32,
    pub category: Category,
    pub achievement: String,
    pub birth_location: String,
    pub work_location: String,
    pub work_years: String,
    /// Resolved co-laureate links; empty means a solo prize.
    pub shared_with: Vec<Link>,
}

pub fn card_content(record: &LaureateRecord, records: &[LaureateRecord]) -> CardContent {
    CardContent {
        laureate_id: record.laureate_id.clone(),
        name: record.name.clone(),
        prize_year: record.prize_year,
        category: record.category,
        achievement: record.achievement.clone(),
        birth_location: record.birth_location.clone(),
        work_location: record.work_location.clone(),
        work_years: record.work_years.clone(),
        shared_with: co_laureate_links(record, records),
    }
}

/// Resolve a record's `shared_with` identifiers against the current
/// fetch's records. Identifiers with no match are dropped, not surfaced.
fn co_laureate_links(record: &LaureateRecord, records: &[LaureateRecord]) -> Vec<Link> {
    record
        .shared_with
        .iter()
        .filter_map(|id| {
            let co = records.iter().find(|r| r.laureate_id == *id);
            if co.is_none() {
                warn!(laureate = %id, "co-laureate not in current set; link omitted");
            }
            co.map(|co| Link {
                laureate_id: co.laureate_id.clone(),
                name: co.name.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{group_by_location, Coord, LocationKind};

    fn record(id: &str, category: Category, shared: &[&str]) -> LaureateRecord {
        LaureateRecord {
            laureate_id: id.to_string(),
            name: format!("Laureate {id}"),
            prize_year: 1950,
            category,
            achievement: "for testing".to_string(),
            birth: Coord::new(0.0, 0.0),
            birth_location: "Birthville".to_string(),
            work: Coord::new(40.0, -74.0),
            work_location: "Workburg".to_string(),
            work_years: "1945-1950".to_string(),
            shared_with: shared.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn one_group(records: &[LaureateRecord]) -> LocationGroup {
        let mut groups = group_by_location(records, LocationKind::Work);
        assert_eq!(groups.len(), 1);
        groups.remove(0)
    }

    #[test]
    fn single_member_marker_has_no_badge() {
        let records = vec![record("a", Category::Physics, &[])];
        let group = one_group(&records);

        let style = marker_style(
            &group,
            &records,
            CategoryContext::Single(Category::Physics),
            false,
        );

        assert_eq!(style.badge, None);
        assert!(!style.mixed);
        assert_eq!(style.color, theme::category_color(Category::Physics));
        assert_eq!(style.glyph(), "●");
    }

    #[test]
    fn multi_member_marker_carries_the_member_count() {
        let records = vec![
            record("a", Category::Physics, &[]),
            record("b", Category::Physics, &[]),
            record("c", Category::Physics, &[]),
        ];
        let group = one_group(&records);

        let style = marker_style(
            &group,
            &records,
            CategoryContext::Single(Category::Physics),
            false,
        );

        assert_eq!(style.badge, Some(3));
    }

    #[test]
    fn mixed_marker_only_in_the_combined_view() {
        let records = vec![
            record("a", Category::Physics, &[]),
            record("b", Category::Chemistry, &[]),
        ];
        let group = one_group(&records);

        let combined = marker_style(&group, &records, CategoryContext::All, false);
        assert!(combined.mixed);
        assert_eq!(combined.color, theme::MIXED_GOLD);
        assert_eq!(combined.glyph(), "◈");

        // The same group under a single-category context keeps the
        // category color.
        let single = marker_style(
            &group,
            &records,
            CategoryContext::Single(Category::Physics),
            false,
        );
        assert!(!single.mixed);
        assert_eq!(single.color, theme::category_color(Category::Physics));
    }

    #[test]
    fn highlighted_marker_gets_the_center_dot() {
        let records = vec![record("a", Category::Peace, &[])];
        let group = one_group(&records);

        let style = marker_style(
            &group,
            &records,
            CategoryContext::Single(Category::Peace),
            true,
        );

        assert!(style.highlighted);
        assert_eq!(style.glyph(), "◉");
    }

    #[test]
    fn single_member_popup_is_full_detail() {
        let records = vec![
            record("a", Category::Physics, &["b"]),
            record("b", Category::Physics, &["a"]),
        ];
        // Give b its own location so a's group has one member.
        let mut records = records;
        records[1].work = Coord::new(10.0, 10.0);
        let groups = group_by_location(&records, LocationKind::Work);
        assert_eq!(groups.len(), 2);

        let content = popup_content(&groups[0], &records, Some(0));
        match content {
            PopupContent::Single(detail) => {
                assert_eq!(detail.laureate_id, "a");
                assert_eq!(detail.shared_with.len(), 1);
                assert_eq!(detail.shared_with[0].laureate_id, "b");
            }
            PopupContent::Roster(_) => panic!("expected single-member detail"),
        }
    }

    #[test]
    fn multi_member_popup_emphasizes_the_selected_member() {
        let records = vec![
            record("a", Category::Physics, &[]),
            record("b", Category::Physics, &[]),
        ];
        let group = one_group(&records);

        let content = popup_content(&group, &records, Some(1));
        match content {
            PopupContent::Roster(roster) => {
                assert_eq!(roster.entries.len(), 2);
                assert!(!roster.entries[0].emphasized);
                assert!(roster.entries[1].emphasized);
            }
            PopupContent::Single(_) => panic!("expected roster"),
        }
    }

    #[test]
    fn neutral_roster_emphasizes_nobody() {
        let records = vec![
            record("a", Category::Physics, &[]),
            record("b", Category::Physics, &[]),
        ];
        let group = one_group(&records);

        match popup_content(&group, &records, None) {
            PopupContent::Roster(roster) => {
                assert!(roster.entries.iter().all(|entry| !entry.emphasized));
            }
            PopupContent::Single(_) => panic!("expected roster"),
        }
    }

    #[test]
    fn popup_links_resolve_by_identifier() {
        let records = vec![
            record("a", Category::Physics, &[]),
            record("b", Category::Physics, &[]),
        ];
        let group = one_group(&records);

        let content = popup_content(&group, &records, None);
        assert_eq!(content.links(), vec!["a", "b"]);
    }

    #[test]
    fn dangling_co_laureate_links_are_omitted() {
        let records = vec![record("a", Category::Physics, &["ghost", "a2"])];

        let card = card_content(&records[0], &records);

        // Neither identifier resolves, so the card has no links at all.
        assert!(card.shared_with.is_empty());
    }

    #[test]
    fn card_links_resolve_co_laureates_by_id() {
        let records = vec![
            record("a", Category::Chemistry, &["b", "ghost"]),
            record("b", Category::Chemistry, &["a"]),
        ];

        let card = card_content(&records[0], &records);

        assert_eq!(card.shared_with.len(), 1);
        assert_eq!(card.shared_with[0].laureate_id, "b");
        assert_eq!(card.shared_with[0].name, "Laureate b");
    }
}
