use std::collections::BTreeMap;

use ordered_float::OrderedFloat;

use crate::config::LayoutConfig;
use crate::ir::InterLink;

use super::types::{LineSegment, PositionedShape, RoutedLink, SegmentKind};

/// Half-open tolerance applied to a link's span before testing column overlap.
const SPAN_TOLERANCE: f32 = 1.0;

/// A stretch of a vertical column already claimed by inter-chain links.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Occupied {
    start: f32,
    end: f32,
    occupancy: usize,
}

/// Claims `[y_start, y_end]` in one column.
///
/// Returns the jog depth the link needs, or `None` when the span is free and a
/// straight line will do.
fn claim_span(column: &mut Vec<Occupied>, y_start: f32, y_end: f32) -> Option<usize> {
    let probe_start = y_start + SPAN_TOLERANCE;
    let probe_end = y_end - SPAN_TOLERANCE;
    let hits: Vec<usize> = column
        .iter()
        .enumerate()
        .filter(|(_, span)| span.start <= probe_end && probe_start <= span.end)
        .map(|(idx, _)| idx)
        .collect();

    match hits.as_slice() {
        [] => {
            column.push(Occupied {
                start: y_start,
                end: y_end,
                occupancy: 1,
            });
            None
        }
        [only] => {
            let span = &mut column[*only];
            span.start = span.start.min(y_start);
            span.end = span.end.max(y_end);
            span.occupancy += 1;
            Some(span.occupancy)
        }
        _ => {
            let mut merged = Occupied {
                start: y_start,
                end: y_end,
                occupancy: 0,
            };
            for &idx in hits.iter().rev() {
                let span = column.remove(idx);
                merged.start = merged.start.min(span.start);
                merged.end = merged.end.max(span.end);
                merged.occupancy = merged.occupancy.max(span.occupancy);
            }
            merged.occupancy += 1;
            column.push(merged);
            Some(merged.occupancy)
        }
    }
}

fn jogged_segments(x: f32, y_start: f32, y_end: f32, occupancy: usize, config: &LayoutConfig) -> Vec<LineSegment> {
    let jog_x = x + config.external_connection_padding * occupancy as f32;
    let bend = config.external_angle_correction;
    vec![
        LineSegment::new((x, y_start), (jog_x, y_start + bend), SegmentKind::InterChain),
        LineSegment::new((jog_x, y_start + bend), (jog_x, y_end - bend), SegmentKind::InterChain),
        LineSegment::new((jog_x, y_end - bend), (x, y_end), SegmentKind::InterChain),
    ]
}

/// Routes every inter-chain link over the final chain positions.
///
/// Links between nearer chains are routed first. Links that share a column
/// with an already-routed overlapping link are pushed sideways, one padding
/// step per link already stacked in that stretch of the column.
pub(crate) fn route_inter_chain_links(
    shapes: &[PositionedShape],
    links: &[InterLink],
    config: &LayoutConfig,
) -> Vec<RoutedLink> {
    let mut ordered: Vec<InterLink> = links.to_vec();
    ordered.sort_by_key(InterLink::chain_distance);

    let mut columns: BTreeMap<OrderedFloat<f32>, Vec<Occupied>> = BTreeMap::new();
    let mut routed = Vec::with_capacity(ordered.len());
    for link in ordered {
        let from = &shapes[link.from.chain_index].points[link.from.monomer_index];
        let to = &shapes[link.to.chain_index].points[link.to.monomer_index];

        let y_start = from.y.min(to.y);
        let y_end = from.y.max(to.y);
        let occupancy = if from.x == to.x {
            let column = columns.entry(OrderedFloat(from.x)).or_default();
            claim_span(column, y_start, y_end)
        } else {
            None
        };

        let segments = match occupancy {
            Some(depth) => {
                log::trace!("link {:?} jogged at depth {depth}", link);
                jogged_segments(from.x, y_start, y_end, depth, config)
            }
            None => vec![LineSegment::new(
                (from.x, from.y),
                (to.x, to.y),
                SegmentKind::InterChain,
            )],
        };
        routed.push(RoutedLink {
            link,
            occupancy,
            segments,
        });
    }
    routed
}
