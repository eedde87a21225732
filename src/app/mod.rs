// Application state
//
// AppState owns the fetched laureate set, the derived location groups,
// the selection state machine and the map scene. All mutation of the
// highlight state goes through the transition methods here; the UI only
// reads. Every transition fully undoes the previous selection's visuals
// before adding its own, so no stale overlay or active card can survive
// a transition.

pub mod config;
pub mod event;

use ratatui::widgets::ListState;
use tracing::{debug, warn};

use crate::api::{
    CategoryContext, CategoryResponse, FetchClient, FetchOutcome, LaureateRecord,
};
use crate::geo::{self, Coord, LocationGroup, LocationKind};
use crate::present::{self, CardContent, MarkerStyle, PopupContent};
use crate::scene::{MapScene, Marker, Polyline, Popup, Viewport};
use crate::theme;

/// What, if anything, is currently highlighted. At most one laureate is
/// selected at a time; a group selection highlights a multi-member
/// marker without singling out a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Idle,
    Laureate(usize),
    Group(usize),
}

/// Where a laureate selection came from. Popup-originated selections do
/// not move the viewport, so following a link never yanks the map away
/// from the popup the user is reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOrigin {
    Card,
    Marker,
    Popup,
}

/// Main application state
pub struct AppState {
    /// Whether the application is running
    pub running: bool,

    /// Fetch client; all network work happens on its worker threads.
    pub fetch: FetchClient,

    /// Index into [`config::CONTEXTS`] of the category selector.
    pub context_index: usize,

    /// Sequence token of the most recent fetch. Outcomes with any other
    /// token are stale and discarded.
    pub pending_seq: Option<u64>,

    /// Context the current records were fetched under. Tracked apart
    /// from the selector so a pending category change does not restyle
    /// the previous fetch's markers.
    pub applied_context: CategoryContext,

    /// Display label from the last successful response.
    pub category_label: String,

    /// Laureates of the current fetch, replaced wholesale per fetch.
    pub records: Vec<LaureateRecord>,

    /// Card view models, resolved once per fetch. Link resolution logs
    /// dangling identifiers, so it must not run in the draw path.
    pub cards: Vec<CardContent>,

    /// Work-location groups, rebuilt per fetch, keyed by position.
    pub groups: Vec<LocationGroup>,

    /// Retained drawing state consumed by the canvas renderer.
    pub scene: MapScene,

    pub selection: Selection,

    /// Card list cursor and scroll position. Selecting a laureate moves
    /// it, which scrolls the active card into view.
    pub card_cursor: ListState,

    /// Blocking error notice; while set, any key dismisses it and no
    /// other interaction is processed.
    pub notice: Option<String>,

    /// At least one fetch has been applied (distinguishes the initial
    /// placeholder from an empty result).
    pub loaded: bool,
}

impl AppState {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            running: true,
            fetch: FetchClient::new(base_url),
            context_index: 0,
            pending_seq: None,
            applied_context: CategoryContext::All,
            category_label: String::new(),
            records: Vec::new(),
            cards: Vec::new(),
            groups: Vec::new(),
            scene: MapScene::new(),
            selection: Selection::Idle,
            card_cursor: ListState::default(),
            notice: None,
            loaded: false,
        }
    }

    /// Category context currently chosen in the selector.
    pub fn context(&self) -> CategoryContext {
        config::CONTEXTS[self.context_index % config::CONTEXTS.len()]
    }

    // ------------------------------------------------------------------
    // Fetch lifecycle
    // ------------------------------------------------------------------

    /// Start fetching the selector's current context.
    pub fn request_current(&mut self) {
        let context = self.context();
        self.pending_seq = Some(self.fetch.request(context));
    }

    pub fn next_category(&mut self) {
        self.context_index = (self.context_index + 1) % config::CONTEXTS.len();
        self.clear_selection();
        self.request_current();
    }

    pub fn prev_category(&mut self) {
        self.context_index =
            (self.context_index + config::CONTEXTS.len() - 1) % config::CONTEXTS.len();
        self.clear_selection();
        self.request_current();
    }

    /// Drain completed fetches. Called once per loop iteration.
    pub fn on_tick(&mut self) {
        while let Some(outcome) = self.fetch.try_recv() {
            self.handle_fetch_outcome(outcome);
        }
    }

    pub fn handle_fetch_outcome(&mut self, outcome: FetchOutcome) {
        if Some(outcome.seq) != self.pending_seq {
            // Overtaken by a newer request; the response must not
            // overwrite the newer one's state.
            debug!(seq = outcome.seq, "discarding stale fetch outcome");
            return;
        }
        self.pending_seq = None;

        match outcome.result {
            Ok(response) => self.apply_laureates(response, outcome.context),
            Err(err) => {
                // Previous category's view stays as is.
                warn!(error = %err, "laureate fetch failed");
                self.notice = Some(err.to_string());
            }
        }
    }

    /// Replace the session's laureate set with a fetched response and
    /// rebuild everything derived from it.
    pub fn apply_laureates(&mut self, response: CategoryResponse, context: CategoryContext) {
        let mut records = Vec::with_capacity(response.laureates.len());
        for raw in response.laureates {
            match LaureateRecord::resolve(raw, context) {
                Some(record) => records.push(record),
                None => warn!("laureate with undeterminable category dropped"),
            }
        }

        self.category_label = response.category;
        self.applied_context = context;
        self.records = records;
        let cards = self
            .records
            .iter()
            .map(|record| present::card_content(record, &self.records))
            .collect();
        self.cards = cards;
        self.groups = geo::group_by_location(&self.records, LocationKind::Work);
        self.loaded = true;

        // Category change resets the highlight state; this also rebuilds
        // the marker set from the new groups.
        self.clear_selection();
        self.scene.fit_to_markers();
    }

    // ------------------------------------------------------------------
    // Selection state machine
    // ------------------------------------------------------------------

    /// Location group a laureate belongs to.
    pub fn group_of(&self, laureate: usize) -> Option<usize> {
        self.groups.iter().position(|g| g.members.contains(&laureate))
    }

    /// Group whose marker is currently highlighted, if any.
    pub fn highlighted_group(&self) -> Option<usize> {
        match self.selection {
            Selection::Idle => None,
            Selection::Group(group) => Some(group),
            Selection::Laureate(index) => self.group_of(index),
        }
    }

    /// Select a single laureate: mark its card active, highlight its
    /// group's marker, open the popup with this laureate emphasized, and
    /// show its birth marker, birth-to-work connector and shared-prize
    /// connectors. Selecting the already-selected laureate again is a
    /// no-op in terms of visible state.
    pub fn select_laureate(&mut self, index: usize, origin: SelectOrigin) {
        let Some(record) = self.records.get(index).cloned() else {
            // A selection index with no record is a dangling reference;
            // recover by ignoring it.
            warn!(index, "selection points at no laureate; ignoring");
            return;
        };

        self.undo_selection_visuals();
        self.selection = Selection::Laureate(index);
        self.card_cursor.select(Some(index));
        self.restyle_markers();

        if let Some(group_idx) = self.group_of(index) {
            let content = present::popup_content(&self.groups[group_idx], &self.records, Some(index));
            // The emphasized roster entry starts on-screen: scroll to the
            // page holding it.
            let scroll = match &content {
                PopupContent::Roster(roster) => roster
                    .entries
                    .iter()
                    .position(|entry| entry.emphasized)
                    .map_or(0, |i| (i / config::ROSTER_PAGE) * config::ROSTER_PAGE),
                PopupContent::Single(_) => 0,
            };
            // Content attached before the popup opens, never after.
            self.scene.popup = Some(Popup {
                group: group_idx,
                content,
                open: true,
                scroll,
            });
        }

        // Birth overlay only when born somewhere other than the work
        // location. The birth marker is the one marker grouping does not
        // cover, so it gets the ring offset against everything already
        // placed.
        if record.birth != record.work {
            let placed = self.scene.marker_positions();
            let (dlat, dlon) = geo::marker_offset(record.birth, &placed);
            self.scene.overlays.birth_marker = Some(Marker {
                position: Coord::new(record.birth.lat + dlat, record.birth.lon + dlon),
                style: MarkerStyle::plain(theme::BIRTH_GREEN),
            });
            self.scene.overlays.birth_line = Some(Polyline {
                from: record.birth,
                to: record.work,
                color: theme::BIRTH_GREEN,
            });
        }

        // One connector per co-laureate that resolves in this fetch.
        for id in &record.shared_with {
            match self.records.iter().find(|r| r.laureate_id == *id) {
                Some(co) => self.scene.overlays.prize_lines.push(Polyline {
                    from: record.work,
                    to: co.work,
                    color: theme::PRIZE_PURPLE,
                }),
                None => warn!(laureate = %id, "co-laureate not in current set; connector omitted"),
            }
        }

        if origin != SelectOrigin::Popup {
            self.scene.viewport = Viewport::Focus {
                center: record.work,
            };
        }
    }

    /// Select a multi-member marker without singling out a laureate:
    /// highlight the marker and open a neutral roster popup. Single
    /// member groups route straight to [`Self::select_laureate`].
    pub fn select_group_marker(&mut self, group_idx: usize) {
        let Some(group) = self.groups.get(group_idx) else {
            warn!(group = group_idx, "no such marker; ignoring");
            return;
        };
        if let [only] = group.members.as_slice() {
            let only = *only;
            self.select_laureate(only, SelectOrigin::Marker);
            return;
        }

        self.undo_selection_visuals();
        self.selection = Selection::Group(group_idx);
        self.restyle_markers();

        let content = present::popup_content(&self.groups[group_idx], &self.records, None);
        self.scene.popup = Some(Popup {
            group: group_idx,
            content,
            open: true,
            scroll: 0,
        });
    }

    /// Return to the idle state: no overlays, no highlighted marker, no
    /// active card, no popup.
    pub fn clear_selection(&mut self) {
        self.undo_selection_visuals();
        self.selection = Selection::Idle;
        self.restyle_markers();
    }

    /// Clear the selection and return the map to the world view.
    pub fn reset_view(&mut self) {
        self.clear_selection();
        self.scene.viewport = Viewport::World;
    }

    /// Unconditionally remove every visual the previous selection put
    /// up. Runs before any transition adds its own, never interleaved.
    fn undo_selection_visuals(&mut self) {
        self.scene.overlays.clear();
        self.scene.popup = None;
        self.card_cursor.select(None);
    }

    /// Rebuild every group marker's style for the current selection.
    fn restyle_markers(&mut self) {
        let highlighted = self.highlighted_group();
        self.scene.markers = self
            .groups
            .iter()
            .enumerate()
            .map(|(i, group)| Marker {
                position: group.position,
                style: present::marker_style(
                    group,
                    &self.records,
                    self.applied_context,
                    highlighted == Some(i),
                ),
            })
            .collect();
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Move the card cursor up without changing the selection.
    pub fn cursor_up(&mut self) {
        if self.records.is_empty() {
            self.card_cursor.select(None);
            return;
        }
        match self.card_cursor.selected() {
            None => self.card_cursor.select(Some(self.records.len() - 1)),
            Some(0) => {}
            Some(i) => self.card_cursor.select(Some(i - 1)),
        }
    }

    /// Move the card cursor down without changing the selection.
    pub fn cursor_down(&mut self) {
        if self.records.is_empty() {
            self.card_cursor.select(None);
            return;
        }
        match self.card_cursor.selected() {
            None => self.card_cursor.select(Some(0)),
            Some(i) if i + 1 < self.records.len() => self.card_cursor.select(Some(i + 1)),
            Some(_) => {}
        }
    }

    /// Select the laureate under the card cursor (a card click).
    pub fn select_under_cursor(&mut self) {
        if let Some(index) = self.card_cursor.selected() {
            self.select_laureate(index, SelectOrigin::Card);
        }
    }

    /// Step to the next or previous marker and select it (a marker
    /// click on the neighboring marker).
    pub fn cycle_marker(&mut self, step: isize) {
        if self.groups.is_empty() {
            return;
        }
        let len = self.groups.len() as isize;
        let next = match self.highlighted_group() {
            Some(current) => (current as isize + step).rem_euclid(len),
            None if step >= 0 => 0,
            None => len - 1,
        };
        self.select_group_marker(next as usize);
    }

    /// Follow the popup's numbered link in `slot` (0-based within the
    /// visible page). Selection originates from the popup, so the
    /// viewport stays put.
    pub fn follow_popup_link(&mut self, slot: usize) {
        let id = {
            let Some(popup) = self.scene.popup.as_ref().filter(|p| p.open) else {
                return;
            };
            match popup.content.links().get(popup.scroll + slot) {
                Some(&id) => id.to_string(),
                None => return,
            }
        };
        match self.records.iter().position(|r| r.laureate_id == id) {
            Some(index) => self.select_laureate(index, SelectOrigin::Popup),
            None => warn!(laureate = %id, "popup link no longer resolves; ignoring"),
        }
    }

    /// Scroll the open popup one page of entries down. Clamped to the
    /// last page, so the visible window never goes empty.
    pub fn popup_scroll_down(&mut self) {
        if let Some(popup) = self.scene.popup.as_mut().filter(|p| p.open) {
            let len = popup.content.links().len();
            let last_page = (len.saturating_sub(1) / config::ROSTER_PAGE) * config::ROSTER_PAGE;
            popup.scroll = (popup.scroll + config::ROSTER_PAGE).min(last_page);
        }
    }

    /// Scroll the open popup one page of entries up.
    pub fn popup_scroll_up(&mut self) {
        if let Some(popup) = self.scene.popup.as_mut().filter(|p| p.open) {
            popup.scroll = popup.scroll.saturating_sub(config::ROSTER_PAGE);
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
