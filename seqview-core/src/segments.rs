//! Feature segments
//!
//! Turns the ordered parts of one feature location into drawable segments.
//! Parts closer than the minimum intron width are merged, wider gaps become
//! intron connectors, and parts that jump backwards start non-linear
//! segments (rearrangements) that are laid out separately.

use crate::coords::{CoordinateSpace, WindowKind};
use crate::types::{GenomicPos, SubLocation};

/// Connector drawn between a segment and its predecessor, split into the
/// rising and falling halves of the chevron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntronWidth {
    pub first_half: i32,
    pub second_half: i32,
}

impl IntronWidth {
    pub fn split(gap_pixels: i32) -> Self {
        let gap = gap_pixels.max(0);
        let first_half = gap / 2;
        Self {
            first_half,
            second_half: gap - first_half,
        }
    }

    pub fn total(&self) -> i32 {
        self.first_half + self.second_half
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub begin: GenomicPos,
    pub end: GenomicPos,
    pub complement: bool,
    pub prev_remote: bool,
    pub next_remote: bool,
    pub non_linear: bool,
    /// Connector to the previous linear segment; zero for the first segment
    /// and for non-linear segments
    pub intron: IntronWidth,
    pub show_left_arrow: bool,
    pub show_right_arrow: bool,
}

impl Segment {
    fn start(location: &SubLocation, non_linear: bool, prev_remote: bool) -> Self {
        let complement = location.is_complement();
        Self {
            begin: location.begin,
            end: location.end,
            complement,
            prev_remote,
            next_remote: false,
            non_linear,
            intron: IntronWidth::default(),
            show_left_arrow: complement,
            show_right_arrow: !complement,
        }
    }

    fn extend(&mut self, location: &SubLocation) {
        self.end = self.end.max(location.end);
        self.show_left_arrow |= location.is_complement();
        self.show_right_arrow |= !location.is_complement();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SegmentLayout {
    pub segments: Vec<Segment>,
    pub non_linear_count: usize,
}

impl SegmentLayout {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn linear(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| !s.non_linear)
    }

    pub fn non_linear(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.non_linear)
    }
}

/// Build segments for `locations` as seen through window `kind`.
///
/// A remote part never merges with its neighbours: it closes the segment
/// before it (`next_remote`) and flags the segment after it (`prev_remote`).
///
/// Merging is decided against the segment just before a part, linear or
/// not. Introns and the backward-jump test for a new linear segment are
/// measured from the end of the last linear segment, so the linear row is
/// unaffected by rearranged parts in between.
pub fn build_segments(
    locations: &[SubLocation],
    space: &CoordinateSpace,
    kind: WindowKind,
    min_intron_width: i32,
) -> SegmentLayout {
    let mut layout = SegmentLayout::default();
    let mut current: Option<Segment> = None;
    let mut remote_pending = false;
    // set when the first segment is closed, which is always linear
    let mut last_linear_end: GenomicPos = 0;

    for location in locations {
        if location.remote {
            if let Some(segment) = current.as_mut() {
                segment.next_remote = true;
            }
            remote_pending = true;
            continue;
        }

        let Some(mut segment) = current.take() else {
            current = Some(Segment::start(location, false, remote_pending));
            remote_pending = false;
            continue;
        };

        let gap = space.distance(segment.end + 1, location.begin, kind);
        if location.begin >= segment.end && gap < min_intron_width && !remote_pending {
            segment.extend(location);
            current = Some(segment);
            remote_pending = false;
            continue;
        }

        if !segment.non_linear {
            last_linear_end = segment.end;
        }
        layout.segments.push(segment);

        let next = if location.begin < segment.end || location.begin < last_linear_end {
            layout.non_linear_count += 1;
            Segment::start(location, true, remote_pending)
        } else {
            let mut next = Segment::start(location, false, remote_pending);
            next.intron = IntronWidth::split(space.distance(last_linear_end + 1, location.begin, kind));
            next
        };
        current = Some(next);
        remote_pending = false;
    }

    if let Some(segment) = current {
        layout.segments.push(segment);
    }

    log::debug!(
        "Built {} segments ({} non-linear) from {} locations",
        layout.segments.len(),
        layout.non_linear_count,
        locations.len()
    );
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasConfig;
    use crate::types::Strand;

    // one pixel per base over the whole sequence
    fn space() -> CoordinateSpace {
        let canvas = CanvasConfig {
            column_width: 1,
            ..CanvasConfig::default()
        };
        CoordinateSpace::new(1000, 1000, &canvas).unwrap()
    }

    fn fwd(begin: GenomicPos, end: GenomicPos) -> SubLocation {
        SubLocation::new(begin, end, Strand::Forward)
    }

    #[test]
    fn test_gap_at_threshold_is_an_intron() {
        let s = space();
        // gap from 101 to 106 is 5 px
        let layout = build_segments(&[fwd(1, 100), fwd(106, 200)], &s, WindowKind::Overview, 5);
        assert_eq!(layout.segments.len(), 2);
        assert_eq!(layout.segments[1].intron, IntronWidth { first_half: 2, second_half: 3 });
    }

    #[test]
    fn test_gap_below_threshold_merges() {
        let s = space();
        let layout = build_segments(&[fwd(1, 100), fwd(105, 200)], &s, WindowKind::Overview, 5);
        assert_eq!(layout.segments.len(), 1);
        assert_eq!(layout.segments[0].begin, 1);
        assert_eq!(layout.segments[0].end, 200);
    }

    #[test]
    fn test_merge_combines_arrows() {
        let s = space();
        let layout = build_segments(
            &[fwd(1, 100), SubLocation::new(101, 200, Strand::Reverse)],
            &s,
            WindowKind::Overview,
            5,
        );
        let segment = layout.segments[0];
        assert!(segment.show_left_arrow);
        assert!(segment.show_right_arrow);
        assert!(!segment.complement);
    }

    #[test]
    fn test_backward_jump_is_non_linear() {
        let s = space();
        let layout = build_segments(
            &[fwd(500, 600), SubLocation::new(100, 200, Strand::Reverse), fwd(700, 800)],
            &s,
            WindowKind::Overview,
            5,
        );
        assert_eq!(layout.non_linear_count, 1);
        assert_eq!(layout.segments.len(), 3);
        let rearranged = layout.segments[1];
        assert!(rearranged.non_linear);
        assert!(rearranged.show_left_arrow);
        assert!(!rearranged.show_right_arrow);
        assert_eq!(rearranged.intron, IntronWidth::default());
        assert_eq!(layout.linear().count(), 2);
    }

    #[test]
    fn test_intron_after_rearrangement_spans_linear_neighbours() {
        let s = space();
        let layout = build_segments(
            &[fwd(501, 600), fwd(101, 200), fwd(701, 800)],
            &s,
            WindowKind::Overview,
            5,
        );
        let after = layout.segments[2];
        assert!(!after.non_linear);
        // from 601 to 701, not from the rearranged part's end at 200
        assert_eq!(after.intron.total(), 100);
    }

    #[test]
    fn test_part_before_last_linear_end_stays_rearranged() {
        let s = space();
        let layout = build_segments(
            &[fwd(501, 600), fwd(101, 200), fwd(301, 400), fwd(701, 800)],
            &s,
            WindowKind::Overview,
            5,
        );
        assert_eq!(layout.non_linear_count, 2);
        assert!(layout.segments[2].non_linear);
        assert_eq!(layout.segments[2].intron, IntronWidth::default());
        assert_eq!(layout.segments[3].intron.total(), 100);
    }

    #[test]
    fn test_close_part_merges_into_rearranged_segment() {
        let s = space();
        let layout = build_segments(
            &[fwd(501, 600), fwd(101, 200), fwd(203, 250)],
            &s,
            WindowKind::Overview,
            5,
        );
        assert_eq!(layout.segments.len(), 2);
        assert_eq!(layout.non_linear_count, 1);
        assert_eq!((layout.segments[1].begin, layout.segments[1].end), (101, 250));
    }

    #[test]
    fn test_remote_parts_flag_neighbours() {
        let s = space();
        let layout = build_segments(
            &[
                SubLocation::remote(1, 50, Strand::Forward),
                fwd(100, 200),
                SubLocation::remote(1, 50, Strand::Forward),
                fwd(201, 300),
            ],
            &s,
            WindowKind::Overview,
            5,
        );
        assert_eq!(layout.segments.len(), 2);
        assert!(layout.segments[0].prev_remote);
        assert!(layout.segments[0].next_remote);
        assert!(layout.segments[1].prev_remote);
        assert!(!layout.segments[1].next_remote);
    }

    #[test]
    fn test_only_remote_parts_give_nothing() {
        let s = space();
        let layout = build_segments(
            &[SubLocation::remote(1, 50, Strand::Forward)],
            &s,
            WindowKind::Overview,
            5,
        );
        assert!(layout.is_empty());
    }

    #[test]
    fn test_gap_is_measured_in_window_pixels() {
        let mut s = space();
        // ten pixels per base
        s.set_window(WindowKind::Feature, crate::types::Window::new(1, 100)).unwrap();
        let layout = build_segments(&[fwd(10, 20), fwd(22, 30)], &s, WindowKind::Feature, 5);
        assert_eq!(layout.segments.len(), 2);
        assert_eq!(layout.segments[1].intron.total(), 10);
    }

    #[test]
    fn test_intron_split() {
        assert_eq!(IntronWidth::split(7), IntronWidth { first_half: 3, second_half: 4 });
        assert_eq!(IntronWidth::split(-3), IntronWidth::default());
    }
}
