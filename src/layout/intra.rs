use crate::config::LayoutConfig;

use super::types::{LineSegment, PositionedShape, SegmentKind};

/// Backbone and intra-chain link segments of one placed chain.
pub(crate) fn build_chain_segments(shape: &PositionedShape, config: &LayoutConfig) -> Vec<LineSegment> {
    let points = &shape.points;
    let mut segments: Vec<LineSegment> = points
        .windows(2)
        .map(|pair| LineSegment::new((pair[0].x, pair[0].y), (pair[1].x, pair[1].y), SegmentKind::Backbone))
        .collect();

    if shape.cyclic && points.len() > 1 {
        let last = &points[points.len() - 1];
        let first = &points[0];
        segments.push(LineSegment::new((last.x, last.y), (first.x, first.y), SegmentKind::Backbone));
    }

    let bend = config.internal_angle_correction;
    for group in &shape.link_groups {
        for (depth, &(start, end)) in group.links.iter().enumerate() {
            let from = &points[start];
            let to = &points[end];
            if group.kind.renders_straight() {
                segments.push(LineSegment::new((from.x, from.y), (to.x, to.y), SegmentKind::Chord));
                continue;
            }
            let lift = config.internal_connection_height + depth as f32 * config.internal_connection_padding;
            let from_top = (from.x + bend, from.y - lift);
            let to_top = (to.x - bend, to.y - lift);
            segments.push(LineSegment::new((from.x, from.y), from_top, SegmentKind::Chord));
            segments.push(LineSegment::new(from_top, to_top, SegmentKind::Chord));
            segments.push(LineSegment::new(to_top, (to.x, to.y), SegmentKind::Chord));
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Chain;
    use crate::layout::placement::place_chain;

    #[test]
    fn backbone_joins_consecutive_monomers() {
        let config = LayoutConfig::linear();
        let shape = place_chain(&Chain::new(&["A", "B", "C"], 1), 0, &config);
        let segments = build_chain_segments(&shape, &config);
        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(|s| s.kind == SegmentKind::Backbone));
    }

    #[test]
    fn cyclic_chain_gets_closing_segment() {
        let config = LayoutConfig::linear();
        let mut chain = Chain::new(&["A", "B", "C"], 1);
        chain.cyclic = true;
        let shape = place_chain(&chain, 0, &config);
        let segments = build_chain_segments(&shape, &config);
        assert_eq!(segments.len(), 3);
        let closing = segments[2];
        assert_eq!((closing.x2, closing.y2), (shape.points[0].x, shape.points[0].y));
    }

    #[test]
    fn nested_chords_stack_their_humps() {
        let config = LayoutConfig::linear();
        let chain = Chain::new(&["A", "B", "C", "D", "E"], 1).with_links(&[(0, 4), (1, 3)]);
        let shape = place_chain(&chain, 0, &config);
        let segments = build_chain_segments(&shape, &config);
        let humps: Vec<&LineSegment> = segments.iter().filter(|s| s.kind == SegmentKind::Chord).collect();
        assert_eq!(humps.len(), 6);
        let baseline = shape.points[0].y;
        assert_eq!(humps[1].y1, baseline - config.internal_connection_height);
        assert_eq!(
            humps[4].y1,
            baseline - config.internal_connection_height - config.internal_connection_padding
        );
        assert_eq!(humps[0].x2, shape.points[0].x + config.internal_angle_correction);
    }

    #[test]
    fn ring_closure_is_a_single_straight_line() {
        let config = LayoutConfig::default();
        let chain = Chain::new(&["A", "C", "G"], 2).with_links(&[(0, 2)]);
        let shape = place_chain(&chain, 0, &config);
        let segments = build_chain_segments(&shape, &config);
        let chords: Vec<&LineSegment> = segments.iter().filter(|s| s.kind == SegmentKind::Chord).collect();
        assert_eq!(chords.len(), 1);
        assert_eq!((chords[0].x1, chords[0].x2), (shape.points[0].x, shape.points[2].x));
    }
}
