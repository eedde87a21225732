// Spatial grouping and marker placement
//
// Laureate records carry raw coordinates; this module turns them into
// map-ready positions. Records within a small per-axis tolerance of each
// other collapse into one location group, and markers that would still
// land on top of each other get a deterministic ring offset.

use std::collections::BTreeSet;

use crate::api::{Category, LaureateRecord};

/// Per-axis tolerance (degrees) under which two coordinates count as the
/// same location. Applied independently to latitude and longitude, not as
/// a geodesic distance.
pub const EPSILON_DEG: f64 = 0.1;

/// Base ring radius (degrees) for offsetting coincident markers.
pub const OFFSET_RADIUS_DEG: f64 = 0.3;

/// Angular step between offset markers, degrees.
pub const OFFSET_STEP_DEG: f64 = 60.0;

/// Markers per ring before the layout moves to a wider ring.
pub const OFFSET_SLOTS_PER_RING: usize = 6;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Whether `other` falls within the epsilon box around this coordinate.
    ///
    /// This relation is not transitive: A near B and B near C does not
    /// imply A near C. Grouping relies on that staying exactly as is.
    pub fn near(&self, other: Coord) -> bool {
        (self.lat - other.lat).abs() < EPSILON_DEG && (self.lon - other.lon).abs() < EPSILON_DEG
    }
}

/// Which of a laureate's two coordinates to group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    Work,
    Birth,
}

/// A cluster of laureates sharing an approximately equal coordinate.
///
/// Groups are rebuilt from scratch on every fetch and are identified only
/// by their position in the returned vector; they carry no identity across
/// fetches.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationGroup {
    /// Representative coordinate: the coordinate of the first record seen
    /// at this location. Later members never re-center it.
    pub position: Coord,
    /// Indices into the fetched record slice, in input order.
    pub members: Vec<usize>,
    /// Distinct prize categories among the members.
    pub categories: BTreeSet<Category>,
}

/// Cluster records by approximate coordinate equality.
///
/// Records are processed in input order. Each record joins the first
/// existing group whose seed coordinate is within epsilon on both axes,
/// or seeds a new group. Matching is always against the seed coordinate,
/// never a running centroid, so chains of nearby records do not merge
/// transitively. Every record lands in exactly one group.
pub fn group_by_location(records: &[LaureateRecord], kind: LocationKind) -> Vec<LocationGroup> {
    let mut groups: Vec<LocationGroup> = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let at = record.location(kind);
        match groups.iter_mut().find(|group| group.position.near(at)) {
            Some(group) => {
                group.members.push(index);
                group.categories.insert(record.category);
            }
            None => {
                groups.push(LocationGroup {
                    position: at,
                    members: vec![index],
                    categories: BTreeSet::from([record.category]),
                });
            }
        }
    }

    groups
}

/// Compute a (lat, lon) displacement for a marker so it stays visually
/// distinguishable from markers already placed at the same apparent spot.
///
/// Counts the placed markers within epsilon of the candidate. Zero means
/// no offset. Otherwise the marker goes on a ring: six positions spaced
/// 60 degrees apart per ring, each further ring 0.3 degrees wider. Same
/// inputs always produce the same offset.
pub fn marker_offset(candidate: Coord, placed: &[Coord]) -> (f64, f64) {
    let count = placed.iter().filter(|p| p.near(candidate)).count();
    if count == 0 {
        return (0.0, 0.0);
    }

    let angle = (count as f64 * OFFSET_STEP_DEG).to_radians();
    let ring = (count - 1) / OFFSET_SLOTS_PER_RING;
    let distance = OFFSET_RADIUS_DEG + ring as f64 * OFFSET_RADIUS_DEG;

    (angle.cos() * distance, angle.sin() * distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(id: &str, work: (f64, f64), birth: (f64, f64), category: Category) -> LaureateRecord {
        LaureateRecord {
            laureate_id: id.to_string(),
            name: format!("Laureate {id}"),
            prize_year: 1950,
            category,
            achievement: "for testing".to_string(),
            birth: Coord::new(birth.0, birth.1),
            birth_location: "Birthville".to_string(),
            work: Coord::new(work.0, work.1),
            work_location: "Workburg".to_string(),
            work_years: "1945-1950".to_string(),
            shared_with: Vec::new(),
        }
    }

    #[test]
    fn nearby_records_share_a_group() {
        // A and B are within 0.1 on both axes, C is far away.
        let records = vec![
            record("a", (40.0, -74.0), (0.0, 0.0), Category::Physics),
            record("b", (40.05, -74.02), (0.0, 0.0), Category::Physics),
            record("c", (10.0, 10.0), (0.0, 0.0), Category::Physics),
        ];

        let groups = group_by_location(&records, LocationKind::Work);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].members, vec![0, 1]);
        assert_eq!(groups[1].members, vec![2]);
        // The seed coordinate stays at the first record's position.
        assert_eq!(groups[0].position, Coord::new(40.0, -74.0));
    }

    #[test]
    fn group_collects_distinct_categories() {
        let records = vec![
            record("a", (48.85, 2.35), (0.0, 0.0), Category::Physics),
            record("b", (48.86, 2.34), (0.0, 0.0), Category::Chemistry),
            record("c", (48.84, 2.36), (0.0, 0.0), Category::Physics),
        ];

        let groups = group_by_location(&records, LocationKind::Work);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].categories.len(), 2);
    }

    #[test]
    fn matching_is_against_the_seed_not_a_centroid() {
        // B is near A, C is near B but not near A. C must start its own
        // group because membership is tested against A's coordinate only.
        let records = vec![
            record("a", (50.0, 8.0), (0.0, 0.0), Category::Peace),
            record("b", (50.09, 8.09), (0.0, 0.0), Category::Peace),
            record("c", (50.18, 8.18), (0.0, 0.0), Category::Peace),
        ];

        let groups = group_by_location(&records, LocationKind::Work);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].members, vec![0, 1]);
        assert_eq!(groups[1].members, vec![2]);
    }

    #[test]
    fn grouping_by_birth_uses_birth_coordinates() {
        let records = vec![
            record("a", (40.0, -74.0), (52.52, 13.40), Category::Literature),
            record("b", (10.0, 10.0), (52.50, 13.38), Category::Literature),
        ];

        let groups = group_by_location(&records, LocationKind::Birth);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members, vec![0, 1]);
    }

    #[test]
    fn offset_is_zero_with_no_coincident_markers() {
        let placed = vec![Coord::new(10.0, 10.0)];
        let offset = marker_offset(Coord::new(40.0, -74.0), &placed);
        assert_eq!(offset, (0.0, 0.0));
    }

    #[test]
    fn offset_walks_a_ring_and_then_widens() {
        let spot = Coord::new(40.0, -74.0);

        // The first six coincident neighbors keep the marker on the base ring.
        for count in 1..=6usize {
            let placed = vec![spot; count];
            let (dlat, dlon) = marker_offset(spot, &placed);
            let distance = (dlat * dlat + dlon * dlon).sqrt();
            assert!(
                (distance - OFFSET_RADIUS_DEG).abs() < 1e-9,
                "count {count} should stay on the base ring, got {distance}"
            );
        }

        // With a full ring already occupied, the next marker moves to a
        // wider ring.
        let placed = vec![spot; 7];
        let (dlat, dlon) = marker_offset(spot, &placed);
        let distance = (dlat * dlat + dlon * dlon).sqrt();
        assert!((distance - 2.0 * OFFSET_RADIUS_DEG).abs() < 1e-9);
    }

    #[test]
    fn offset_angle_steps_sixty_degrees() {
        let spot = Coord::new(0.0, 0.0);
        let (dlat, dlon) = marker_offset(spot, &[spot]);
        // count = 1: angle 60 degrees, base radius.
        assert!((dlat - OFFSET_RADIUS_DEG * 60f64.to_radians().cos()).abs() < 1e-9);
        assert!((dlon - OFFSET_RADIUS_DEG * 60f64.to_radians().sin()).abs() < 1e-9);
    }

    #[test]
    fn offset_is_deterministic() {
        let spot = Coord::new(59.33, 18.07);
        let placed = vec![spot; 4];
        assert_eq!(marker_offset(spot, &placed), marker_offset(spot, &placed));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Grouping is a partition: every record index appears in exactly
        /// one group, in input order within its group.
        #[test]
        fn prop_grouping_partitions_records(
            coords in prop::collection::vec((-90.0f64..90.0, -180.0f64..180.0), 0..40)
        ) {
            let records: Vec<LaureateRecord> = coords
                .iter()
                .enumerate()
                .map(|(i, &(lat, lon))| {
                    record(&format!("r{i}"), (lat, lon), (lat, lon), Category::Physics)
                })
                .collect();

            let groups = group_by_location(&records, LocationKind::Work);

            let mut seen: Vec<usize> = groups
                .iter()
                .flat_map(|g| g.members.iter().copied())
                .collect();
            seen.sort_unstable();
            let expected: Vec<usize> = (0..records.len()).collect();
            prop_assert_eq!(seen, expected);

            // Every member is within epsilon of its group's seed.
            for group in &groups {
                for &member in &group.members {
                    prop_assert!(group.position.near(records[member].work));
                }
            }
        }

        /// Same inputs, same offsets.
        #[test]
        fn prop_offset_deterministic(
            lat in -90.0f64..90.0,
            lon in -180.0f64..180.0,
            neighbors in 0usize..20,
        ) {
            let spot = Coord::new(lat, lon);
            let placed = vec![spot; neighbors];
            prop_assert_eq!(marker_offset(spot, &placed), marker_offset(spot, &placed));
        }
    }
}
