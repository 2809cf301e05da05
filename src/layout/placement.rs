use std::collections::BTreeMap;
use std::f32::consts::{PI, TAU};

use crate::config::{LayoutConfig, LayoutMode};
use crate::ir::Chain;

use super::stacking::stack_chords;
use super::types::{LinkGroup, LinkGroupKind, Point, PositionedShape, SeqInfo};

/// Points of one ring, relative to the ring's own bounding box.
#[derive(Debug, Clone)]
struct CircleLayout {
    points: Vec<Point>,
    width: f32,
}

pub(crate) fn normalize_link(link: (usize, usize)) -> (usize, usize) {
    (link.0.min(link.1), link.0.max(link.1))
}

fn link_span(link: (usize, usize)) -> usize {
    link.1 - link.0
}

fn ranges_overlap(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0 <= b.1 && b.0 <= a.1
}

fn make_point(chain: &Chain, original_index: usize, monomer_index: usize, x: f32, y: f32) -> Point {
    Point {
        x,
        y,
        shape_category: chain.shape_category,
        symbol: chain.monomers[monomer_index].clone(),
        seq_info: SeqInfo {
            chain_index: original_index,
            original_chain_index: original_index,
            monomer_index,
        },
    }
}

/// Places every monomer of `chain`. Links must already be validated.
pub(crate) fn place_chain(chain: &Chain, original_index: usize, config: &LayoutConfig) -> PositionedShape {
    let shape = match config.mode {
        LayoutMode::Linear => place_linear(chain, original_index, config),
        LayoutMode::Structural => place_structural(chain, original_index, config),
    };
    debug_assert_eq!(shape.points.len(), chain.len());
    shape
}

fn place_linear(chain: &Chain, original_index: usize, config: &LayoutConfig) -> PositionedShape {
    let links: Vec<(usize, usize)> = chain.links.iter().copied().map(normalize_link).collect();
    let stack = stack_chords(&links);
    let chord_offset = stack.max_depth as f32 * config.internal_connection_padding;
    let baseline = config.monomer_size / 2.0 + config.monomer_edge_width + chord_offset;

    let points: Vec<Point> = (0..chain.len())
        .map(|idx| {
            let x = config.monomer_size / 2.0 + idx as f32 * config.connection_line_length;
            make_point(chain, original_index, idx, x, baseline)
        })
        .collect();

    let (width, height) = if chain.is_empty() {
        (0.0, 0.0)
    } else {
        let width = (chain.len() - 1) as f32 * config.connection_line_length + config.monomer_size;
        let mut height = config.monomer_size + config.monomer_edge_width * 2.0 + chord_offset;
        if stack.max_depth > 0 {
            height += config.internal_connection_height;
        }
        (width, height)
    };

    PositionedShape {
        points,
        width,
        height,
        original_index,
        link_groups: stack.groups,
        cyclic: chain.cyclic,
    }
}

/// Picks the ring-closing links: the shortest link of every cluster of
/// overlapping links, decided greedily in input order.
///
/// A link overlapping no candidate becomes one. A link overlapping exactly one
/// candidate replaces it when strictly shorter. Anything else stays a chord.
/// Returns indices into `links`.
fn find_circle_links(links: &[(usize, usize)]) -> Vec<usize> {
    let mut candidates: Vec<usize> = Vec::new();
    for (idx, &link) in links.iter().enumerate() {
        let hits: Vec<usize> = candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| ranges_overlap(links[**c], link))
            .map(|(pos, _)| pos)
            .collect();
        match hits.as_slice() {
            [] => candidates.push(idx),
            [only] => {
                if link_span(link) < link_span(links[candidates[*only]]) {
                    candidates[*only] = idx;
                }
            }
            _ => {}
        }
    }
    candidates
}

/// Lays out monomers `start..=end` evenly on a circle whose circumference
/// approximates the straight-line length of the same run.
///
/// The first and last monomers sit either side of the top of the circle, one
/// sector apart; that gap is where the closing bond is drawn.
fn place_circle(
    chain: &Chain,
    start: usize,
    end: usize,
    original_index: usize,
    config: &LayoutConfig,
) -> CircleLayout {
    let count = end.abs_diff(start) + 1;
    if count <= 1 {
        return CircleLayout {
            points: vec![make_point(chain, original_index, start, 0.0, 0.0)],
            width: config.monomer_size / 2.0,
        };
    }

    let diameter = count as f32 * config.connection_line_length / PI + config.monomer_size;
    let radius = diameter / 2.0;
    let sector = TAU / count as f32;

    let mut max_x = 0.0_f32;
    let mut points = Vec::with_capacity(count);
    for step in 0..count {
        let angle = (step as f32 + 0.5) * sector;
        let x = radius - radius * angle.sin();
        let y = radius - radius * angle.cos();
        max_x = max_x.max(x);
        points.push(make_point(chain, original_index, start + step, x, y));
    }

    CircleLayout {
        points,
        width: max_x + config.monomer_size / 2.0,
    }
}

fn place_structural(chain: &Chain, original_index: usize, config: &LayoutConfig) -> PositionedShape {
    let links: Vec<(usize, usize)> = chain.links.iter().copied().map(normalize_link).collect();
    let circle_links = find_circle_links(&links);

    let mut link_groups: Vec<LinkGroup> = Vec::new();
    let mut circles: BTreeMap<usize, CircleLayout> = BTreeMap::new();
    let mut consumed = vec![false; chain.len()];
    for &idx in &circle_links {
        let (start, end) = links[idx];
        link_groups.push(LinkGroup::single(LinkGroupKind::CircleClosure, (start, end)));
        circles.insert(start, place_circle(chain, start, end, original_index, config));
        consumed[start..=end].fill(true);
    }
    if !circles.is_empty() {
        log::debug!(
            "chain {original_index}: {} circular group(s) {:?}",
            circles.len(),
            circle_links.iter().map(|idx| links[*idx]).collect::<Vec<_>>()
        );
    }

    let mut chords = Vec::new();
    for (idx, &link) in links.iter().enumerate() {
        if circle_links.contains(&idx) {
            continue;
        }
        let reaches_inside = circle_links.iter().any(|c| {
            let (start, end) = links[*c];
            let inside = |i: usize| i > start && i < end;
            inside(link.0) || inside(link.1)
        });
        if reaches_inside {
            link_groups.push(LinkGroup::single(LinkGroupKind::InsideCircle, link));
        } else {
            chords.push(link);
        }
    }

    let stack = stack_chords(&chords);
    let chord_offset = stack.max_depth as f32 * config.internal_connection_padding;
    link_groups.extend(stack.groups);

    let baseline = config.monomer_size / 2.0 + config.monomer_edge_width + chord_offset;
    let mut cursor = config.monomer_size / 2.0;
    let mut points = Vec::with_capacity(chain.len());
    for idx in 0..chain.len() {
        if let Some(circle) = circles.get(&idx) {
            let dy = baseline - circle.points[0].y;
            points.extend(circle.points.iter().map(|p| Point {
                x: p.x + cursor,
                y: p.y + dy,
                ..p.clone()
            }));
            cursor += circle.width + config.connection_line_length;
            continue;
        }
        if consumed[idx] {
            continue;
        }
        points.push(make_point(chain, original_index, idx, cursor, baseline));
        cursor += config.connection_line_length;
    }

    let (width, height) = if points.is_empty() {
        (0.0, 0.0)
    } else {
        let (max_x, max_y) = points
            .iter()
            .fold((0.0_f32, 0.0_f32), |(mx, my), p| (mx.max(p.x), my.max(p.y)));
        (
            max_x + config.monomer_size,
            max_y + config.monomer_size + chord_offset,
        )
    };

    PositionedShape {
        points,
        width,
        height,
        original_index,
        link_groups,
        cyclic: chain.cyclic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(a: &Point, b: &Point) -> f32 {
        ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
    }

    #[test]
    fn linear_points_are_evenly_spaced() {
        let config = LayoutConfig::linear();
        let chain = Chain::new(&["A", "C", "G", "T", "U"], 1).with_links(&[(0, 3)]);
        let shape = place_chain(&chain, 0, &config);
        assert_eq!(shape.points.len(), 5);
        assert_eq!(shape.points[0].x, config.monomer_size / 2.0);
        for pair in shape.points.windows(2) {
            assert!(pair[1].x > pair[0].x);
            assert!((pair[1].x - pair[0].x - config.connection_line_length).abs() < 1e-4);
            assert_eq!(pair[0].y, pair[1].y);
        }
        assert_eq!(shape.width, 4.0 * config.connection_line_length + config.monomer_size);
    }

    #[test]
    fn linear_height_reserves_hump_room() {
        let config = LayoutConfig::linear();
        let plain = place_chain(&Chain::new(&["A", "C", "G"], 1), 0, &config);
        let humped = place_chain(&Chain::new(&["A", "C", "G"], 1).with_links(&[(0, 2)]), 0, &config);
        assert_eq!(plain.height, config.monomer_size + 2.0 * config.monomer_edge_width);
        assert_eq!(
            humped.height,
            plain.height + config.internal_connection_padding + config.internal_connection_height
        );
        assert_eq!(
            humped.points[0].y - plain.points[0].y,
            config.internal_connection_padding
        );
        assert_eq!(humped.link_groups.len(), 1);
        assert_eq!(humped.link_groups[0].kind, LinkGroupKind::Chord);
    }

    #[test]
    fn three_monomer_ring_uses_circumference_diameter() {
        let config = LayoutConfig::default();
        let chain = Chain::new(&["A", "C", "G"], 2).with_links(&[(0, 2)]);
        let shape = place_chain(&chain, 0, &config);
        assert_eq!(shape.points.len(), 3);
        assert_eq!(shape.link_groups.len(), 1);
        assert_eq!(shape.link_groups[0].kind, LinkGroupKind::CircleClosure);
        assert_eq!(shape.link_groups[0].links, vec![(0, 2)]);

        let diameter = 3.0 * config.connection_line_length / PI + config.monomer_size;
        let radius = diameter / 2.0;
        let sector = TAU / 3.0;
        let expected_chord = 2.0 * radius * (sector / 2.0).sin();
        let seam = distance(&shape.points[0], &shape.points[2]);
        assert!((seam - expected_chord).abs() < 1e-3);
        assert!((shape.points[0].y - shape.points[2].y).abs() < 1e-3);
        // The middle monomer hangs at the bottom of the ring.
        assert!(shape.points[1].y > shape.points[0].y);
    }

    #[test]
    fn ring_points_are_evenly_spaced_including_seam() {
        let config = LayoutConfig::default();
        let monomers: Vec<String> = (0..9).map(|i| format!("M{i}")).collect();
        let chain = Chain::new(&monomers, 2).with_links(&[(1, 7)]);
        let shape = place_chain(&chain, 0, &config);
        let ring = &shape.points[1..=7];
        let seam = distance(&ring[0], &ring[6]);
        for pair in ring.windows(2) {
            assert!((distance(&pair[0], &pair[1]) - seam).abs() < 1e-2);
        }
        let order: Vec<usize> = shape.points.iter().map(|p| p.seq_info.monomer_index).collect();
        assert_eq!(order, (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn ring_is_entered_on_the_baseline() {
        let config = LayoutConfig::default();
        let chain = Chain::new(&["A", "B", "C", "D", "E", "F"], 2).with_links(&[(1, 4)]);
        let shape = place_chain(&chain, 0, &config);
        let baseline = shape.points[0].y;
        assert!((shape.points[1].y - baseline).abs() < 1e-3);
        assert!((shape.points[4].y - baseline).abs() < 1e-3);
        assert_eq!(shape.points[5].y, baseline);

        let ring = place_circle(&chain, 1, 4, 0, &config);
        let ring_start = config.monomer_size / 2.0 + config.connection_line_length;
        assert_eq!(
            shape.points[5].x,
            ring_start + ring.width + config.connection_line_length
        );
    }

    #[test]
    fn single_monomer_ring_is_one_point() {
        let config = LayoutConfig::default();
        let ring = place_circle(&Chain::new(&["A", "B", "C"], 2), 1, 1, 0, &config);
        assert_eq!(ring.points.len(), 1);
        assert_eq!((ring.points[0].x, ring.points[0].y), (0.0, 0.0));
        assert_eq!(ring.points[0].seq_info.monomer_index, 1);
        assert_eq!(ring.width, config.monomer_size / 2.0);
    }

    #[test]
    fn shorter_overlapping_link_becomes_the_ring() {
        let config = LayoutConfig::default();
        let monomers: Vec<String> = (0..8).map(|i| format!("M{i}")).collect();
        let chain = Chain::new(&monomers, 2).with_links(&[(0, 7), (2, 4)]);
        let shape = place_chain(&chain, 0, &config);
        let kinds: Vec<(LinkGroupKind, Vec<(usize, usize)>)> = shape
            .link_groups
            .iter()
            .map(|g| (g.kind, g.links.clone()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (LinkGroupKind::CircleClosure, vec![(2, 4)]),
                (LinkGroupKind::Chord, vec![(0, 7)]),
            ]
        );
        assert_eq!(shape.max_chord_depth(), 1);
    }

    #[test]
    fn disjoint_links_form_separate_rings() {
        let config = LayoutConfig::default();
        let monomers: Vec<String> = (0..8).map(|i| format!("M{i}")).collect();
        let chain = Chain::new(&monomers, 2).with_links(&[(0, 2), (4, 7)]);
        let shape = place_chain(&chain, 0, &config);
        let closures = shape
            .link_groups
            .iter()
            .filter(|g| g.kind == LinkGroupKind::CircleClosure)
            .count();
        assert_eq!(closures, 2);
        assert_eq!(shape.points.len(), 8);
    }

    #[test]
    fn link_into_a_ring_is_drawn_straight() {
        let config = LayoutConfig::default();
        let monomers: Vec<String> = (0..8).map(|i| format!("M{i}")).collect();
        let chain = Chain::new(&monomers, 2).with_links(&[(1, 5), (3, 7)]);
        let shape = place_chain(&chain, 0, &config);
        assert_eq!(shape.link_groups[0].kind, LinkGroupKind::CircleClosure);
        assert_eq!(shape.link_groups[1].kind, LinkGroupKind::InsideCircle);
        assert_eq!(shape.link_groups[1].links, vec![(3, 7)]);
        assert_eq!(shape.max_chord_depth(), 0);
    }

    #[test]
    fn whole_chain_ring_and_tiny_chains_are_well_defined() {
        let config = LayoutConfig::default();
        let ring = place_chain(&Chain::new(&["A", "B"], 2).with_links(&[(1, 0)]), 0, &config);
        assert_eq!(ring.points.len(), 2);
        assert!(ring.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));

        let single = place_chain(&Chain::new(&["A"], 2), 0, &config);
        assert_eq!(single.points.len(), 1);
        assert_eq!(single.width, config.monomer_size / 2.0 + config.monomer_size);

        let empty = place_chain(&Chain::new::<&str>(&[], 2), 0, &config);
        assert!(empty.points.is_empty());
        assert_eq!((empty.width, empty.height), (0.0, 0.0));

        let empty_linear = place_chain(&Chain::new::<&str>(&[], 2), 0, &LayoutConfig::linear());
        assert_eq!((empty_linear.width, empty_linear.height), (0.0, 0.0));
    }
}
