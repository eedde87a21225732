// Map scene
//
// The retained set of drawing commands the selection state machine
// produces and the canvas renderer consumes: one marker per location
// group, the transient overlays belonging to the current selection, an
// optional popup and the viewport. The scene never decides anything; it
// only records what the app told it to show.

use ratatui::style::Color;

use crate::geo::Coord;
use crate::present::{MarkerStyle, PopupContent};

/// A marker placed on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coord,
    pub style: MarkerStyle,
}

/// A straight connector between two coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub from: Coord,
    pub to: Coord,
    pub color: Color,
}

/// Transient overlay elements shown only while their owning laureate is
/// selected. Cleared unconditionally on every selection transition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlays {
    /// Birth marker, present when the birth coordinate differs from the
    /// work coordinate.
    pub birth_marker: Option<Marker>,
    /// Connector from birthplace to workplace.
    pub birth_line: Option<Polyline>,
    /// One connector per resolved co-laureate.
    pub prize_lines: Vec<Polyline>,
}

impl Overlays {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.birth_marker.is_none() && self.birth_line.is_none() && self.prize_lines.is_empty()
    }

    pub fn len(&self) -> usize {
        usize::from(self.birth_marker.is_some())
            + usize::from(self.birth_line.is_some())
            + self.prize_lines.len()
    }
}

/// Popup attached to a group's marker. The content is always filled in
/// before `open` is set, so an open popup never shows stale content.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    /// Index of the owning location group within the current fetch.
    pub group: usize,
    pub content: PopupContent,
    pub open: bool,
    /// First visible roster entry. The numbered link keys address the
    /// visible page, so slot 1 is always the top visible entry.
    pub scroll: usize,
}

/// Where the map is looking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Viewport {
    /// Whole world, the initial and reset view.
    World,
    /// Bounds fitted around all current markers, already padded.
    Fit { min: Coord, max: Coord },
    /// Panned and zoomed onto one work location.
    Focus { center: Coord },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    /// Group markers, index-aligned with the app's location groups.
    pub markers: Vec<Marker>,
    pub overlays: Overlays,
    pub popup: Option<Popup>,
    pub viewport: Viewport,
}

impl MapScene {
    pub fn new() -> Self {
        Self {
            markers: Vec::new(),
            overlays: Overlays::default(),
            popup: None,
            viewport: Viewport::World,
        }
    }

    /// Drop everything and return to the world view.
    pub fn clear(&mut self) {
        self.markers.clear();
        self.overlays.clear();
        self.popup = None;
        self.viewport = Viewport::World;
    }

    pub fn marker_positions(&self) -> Vec<Coord> {
        self.markers.iter().map(|m| m.position).collect()
    }

    /// Fit the viewport around all current markers with 10% padding on
    /// each axis. With no markers the world view is kept.
    pub fn fit_to_markers(&mut self) {
        let mut positions = self.markers.iter().map(|m| m.position);
        let Some(first) = positions.next() else {
            self.viewport = Viewport::World;
            return;
        };

        let mut min = first;
        let mut max = first;
        for p in positions {
            min.lat = min.lat.min(p.lat);
            min.lon = min.lon.min(p.lon);
            max.lat = max.lat.max(p.lat);
            max.lon = max.lon.max(p.lon);
        }

        let pad_lat = ((max.lat - min.lat) * 0.1).max(1.0);
        let pad_lon = ((max.lon - min.lon) * 0.1).max(1.0);
        self.viewport = Viewport::Fit {
            min: Coord::new(min.lat - pad_lat, min.lon - pad_lon),
            max: Coord::new(max.lat + pad_lat, max.lon + pad_lon),
        };
    }
}

impl Default for MapScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;

    fn marker(lat: f64, lon: f64) -> Marker {
        Marker {
            position: Coord::new(lat, lon),
            style: MarkerStyle::plain(theme::WORK_INDIGO),
        }
    }

    #[test]
    fn fit_with_no_markers_keeps_the_world_view() {
        let mut scene = MapScene::new();
        scene.viewport = Viewport::Focus {
            center: Coord::new(1.0, 2.0),
        };
        scene.fit_to_markers();
        assert_eq!(scene.viewport, Viewport::World);
    }

    #[test]
    fn fit_pads_the_marker_bounds() {
        let mut scene = MapScene::new();
        scene.markers = vec![marker(10.0, 20.0), marker(30.0, 60.0)];
        scene.fit_to_markers();

        match scene.viewport {
            Viewport::Fit { min, max } => {
                assert!(min.lat < 10.0 && max.lat > 30.0);
                assert!(min.lon < 20.0 && max.lon > 60.0);
            }
            other => panic!("expected fitted viewport, got {other:?}"),
        }
    }

    #[test]
    fn overlay_bookkeeping() {
        let mut overlays = Overlays::default();
        assert!(overlays.is_empty());
        assert_eq!(overlays.len(), 0);

        overlays.birth_marker = Some(marker(0.0, 0.0));
        overlays.prize_lines.push(Polyline {
            from: Coord::new(0.0, 0.0),
            to: Coord::new(1.0, 1.0),
            color: theme::PRIZE_PURPLE,
        });
        assert!(!overlays.is_empty());
        assert_eq!(overlays.len(), 2);

        overlays.clear();
        assert!(overlays.is_empty());
    }
}
