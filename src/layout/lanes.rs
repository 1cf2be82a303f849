//! Greedy interval partitioning into non-overlapping lanes.

use chrono::NaiveDateTime;

/// Assign each interval a lane index so that intervals sharing a lane never
/// overlap. The returned vector is parallel to `intervals`.
///
/// Intervals are visited in ascending start order (stable, so equal starts
/// keep their input order) and each takes the lowest-numbered lane whose last
/// interval has already ended. This uses the minimum possible number of
/// lanes.
pub fn assign_lanes(intervals: &[(NaiveDateTime, NaiveDateTime)]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    order.sort_by_key(|&i| intervals[i].0);

    let mut lane_ends: Vec<NaiveDateTime> = Vec::new();
    let mut lanes = vec![0; intervals.len()];

    for i in order {
        let (start, end) = intervals[i];
        let lane = match lane_ends.iter().position(|&lane_end| lane_end <= start) {
            Some(free) => free,
            None => {
                lane_ends.push(end);
                lane_ends.len() - 1
            }
        };
        lane_ends[lane] = end;
        lanes[i] = lane;
    }

    lanes
}

/// Number of lanes used by an assignment.
pub fn lane_count(lanes: &[usize]) -> usize {
    lanes.iter().max().map_or(0, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    fn base() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid date")
    }

    fn span(start_h: i64, end_h: i64) -> (NaiveDateTime, NaiveDateTime) {
        (base() + Duration::hours(start_h), base() + Duration::hours(end_h))
    }

    fn overlaps(a: (NaiveDateTime, NaiveDateTime), b: (NaiveDateTime, NaiveDateTime)) -> bool {
        a.0 < b.1 && b.0 < a.1
    }

    /// Largest number of intervals covering a single instant.
    fn max_depth(intervals: &[(NaiveDateTime, NaiveDateTime)]) -> usize {
        intervals
            .iter()
            .map(|&(instant, _)| {
                intervals
                    .iter()
                    .filter(|&&(s, e)| s <= instant && instant < e)
                    .count()
            })
            .max()
            .unwrap_or(0)
    }

    fn interval_sets() -> impl Strategy<Value = Vec<(NaiveDateTime, NaiveDateTime)>> {
        prop::collection::vec((0_i64..7 * 24, 1_i64..5 * 24), 0..25).prop_map(|spans| {
            spans
                .into_iter()
                .map(|(start, len)| span(start, start + len))
                .collect()
        })
    }

    #[test]
    fn empty_input_has_no_lanes() {
        assert!(assign_lanes(&[]).is_empty());
        assert_eq!(lane_count(&[]), 0);
    }

    #[test]
    fn back_to_back_intervals_share_a_lane() {
        let lanes = assign_lanes(&[span(0, 24), span(24, 48), span(48, 50)]);
        assert_eq!(lanes, vec![0, 0, 0]);
    }

    #[test]
    fn overlapping_intervals_stack() {
        let lanes = assign_lanes(&[span(0, 48), span(12, 30), span(24, 60), span(31, 40)]);
        assert_eq!(lanes, vec![0, 1, 2, 1]);
    }

    #[test]
    fn lanes_are_reported_in_input_order() {
        let lanes = assign_lanes(&[span(30, 40), span(0, 35), span(36, 50)]);
        assert_eq!(lanes, vec![1, 0, 0]);
    }

    #[test]
    fn equal_starts_keep_input_order() {
        let lanes = assign_lanes(&[span(0, 10), span(0, 5), span(0, 20)]);
        assert_eq!(lanes, vec![0, 1, 2]);
    }

    proptest! {
        #[test]
        fn shared_lanes_never_overlap(intervals in interval_sets()) {
            let lanes = assign_lanes(&intervals);
            for i in 0..intervals.len() {
                for j in (i + 1)..intervals.len() {
                    if lanes[i] == lanes[j] {
                        prop_assert!(!overlaps(intervals[i], intervals[j]));
                    }
                }
            }
        }

        #[test]
        fn lane_count_equals_maximum_overlap(intervals in interval_sets()) {
            let lanes = assign_lanes(&intervals);
            prop_assert_eq!(lane_count(&lanes), max_depth(&intervals));
        }
    }
}
