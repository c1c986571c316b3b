//! Keep-Segment Arithmetic
//!
//! Computes the complement of requested cut (removal) ranges against the
//! full video duration: the ordered list of segments to keep and
//! concatenate.

use crate::commands::CutSegment;
use crate::TimeSec;

/// A time range to retain
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeepSegment {
    pub start: TimeSec,
    pub end: TimeSec,
}

impl KeepSegment {
    pub fn new(start: TimeSec, end: TimeSec) -> Self {
        Self { start, end }
    }
}

/// Complements the removal segments against `[0, duration]`.
///
/// Segments are sorted by start time first; that is the tie-break rule for
/// out-of-order input. Overlapping removal segments are NOT merged — the
/// cursor tracks each processed segment's end unconditionally, so a segment
/// fully contained in an earlier one can move the cursor backwards and
/// produce overlapping keep regions.
pub fn keep_segments(segments: &[CutSegment], duration: TimeSec) -> Vec<KeepSegment> {
    let mut sorted: Vec<CutSegment> = segments.to_vec();
    sorted.sort_by(|a, b| {
        a.start_time
            .partial_cmp(&b.start_time)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep = Vec::new();
    let mut last_end: TimeSec = 0.0;

    for seg in &sorted {
        if seg.start_time > last_end {
            keep.push(KeepSegment::new(last_end, seg.start_time));
        }
        last_end = seg.end_time;
    }

    if last_end < duration {
        keep.push(KeepSegment::new(last_end, duration));
    }

    keep
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complement_of_two_interior_segments() {
        let cuts = vec![CutSegment::new(10.0, 20.0), CutSegment::new(40.0, 50.0)];
        let keep = keep_segments(&cuts, 100.0);

        assert_eq!(
            keep,
            vec![
                KeepSegment::new(0.0, 10.0),
                KeepSegment::new(20.0, 40.0),
                KeepSegment::new(50.0, 100.0),
            ]
        );
    }

    #[test]
    fn test_cut_from_start() {
        let cuts = vec![CutSegment::new(0.0, 15.0)];
        let keep = keep_segments(&cuts, 60.0);
        assert_eq!(keep, vec![KeepSegment::new(15.0, 60.0)]);
    }

    #[test]
    fn test_cut_to_end() {
        let cuts = vec![CutSegment::new(45.0, 60.0)];
        let keep = keep_segments(&cuts, 60.0);
        assert_eq!(keep, vec![KeepSegment::new(0.0, 45.0)]);
    }

    #[test]
    fn test_unsorted_input_is_sorted_by_start() {
        let cuts = vec![CutSegment::new(40.0, 50.0), CutSegment::new(10.0, 20.0)];
        let keep = keep_segments(&cuts, 100.0);

        assert_eq!(
            keep,
            vec![
                KeepSegment::new(0.0, 10.0),
                KeepSegment::new(20.0, 40.0),
                KeepSegment::new(50.0, 100.0),
            ]
        );
    }

    #[test]
    fn test_no_cuts_keeps_whole_video() {
        let keep = keep_segments(&[], 30.0);
        assert_eq!(keep, vec![KeepSegment::new(0.0, 30.0)]);
    }

    #[test]
    fn test_cut_covering_everything_keeps_nothing() {
        let cuts = vec![CutSegment::new(0.0, 100.0)];
        let keep = keep_segments(&cuts, 100.0);
        assert!(keep.is_empty());
    }

    #[test]
    fn test_overlapping_cuts_are_not_deduplicated() {
        // Documented edge case: a segment contained in an earlier one moves
        // the cursor backwards and yields an overlapping keep region.
        let cuts = vec![CutSegment::new(10.0, 50.0), CutSegment::new(20.0, 30.0)];
        let keep = keep_segments(&cuts, 100.0);

        assert_eq!(
            keep,
            vec![KeepSegment::new(0.0, 10.0), KeepSegment::new(30.0, 100.0)]
        );
    }
}
