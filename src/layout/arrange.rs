use std::collections::{BTreeMap, BTreeSet};

use crate::config::LayoutConfig;
use crate::ir::{InterLink, LinkEndpoint};

use super::types::PositionedShape;

/// Shapes in display order with their inter-chain links remapped to match.
#[derive(Debug, Clone)]
pub(crate) struct Arrangement {
    pub(crate) shapes: Vec<PositionedShape>,
    pub(crate) links: Vec<InterLink>,
}

/// Position of every chain for a given order (position -> chain).
fn positions_of(order: &[usize]) -> Vec<usize> {
    let mut positions = vec![0; order.len()];
    for (pos, &chain) in order.iter().enumerate() {
        positions[chain] = pos;
    }
    positions
}

fn swapped(order: &[usize], a: usize, b: usize) -> Vec<usize> {
    let mut next = order.to_vec();
    next.swap(a, b);
    next
}

/// Moves `target` so it sits immediately after `source`.
fn spliced(order: &[usize], source: usize, target: usize) -> Vec<usize> {
    let mut next = Vec::with_capacity(order.len());
    for &chain in order {
        if chain == target {
            continue;
        }
        next.push(chain);
        if chain == source {
            next.push(target);
        }
    }
    next
}

/// Single best-effort pass pulling linked chains next to each other.
///
/// Links are handled in input order with no backtracking, so an adverse link
/// order can leave some chains apart. Returns the display order
/// (position -> chain).
pub(crate) fn reorder_chains(count: usize, links: &[InterLink]) -> Vec<usize> {
    let mut partners: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
    for link in links {
        partners
            .entry(link.from.chain_index)
            .or_default()
            .insert(link.to.chain_index);
        partners
            .entry(link.to.chain_index)
            .or_default()
            .insert(link.from.chain_index);
    }

    let mut order: Vec<usize> = (0..count).collect();
    let mut positions = positions_of(&order);
    for link in links {
        let source = link.from.chain_index;
        let target = link.to.chain_index;
        let from_pos = positions[source];
        let to_pos = positions[target];
        if from_pos.abs_diff(to_pos) <= 1 || from_pos + 1 >= count {
            continue;
        }

        let neighbour = order[from_pos + 1];
        let neighbour_linked = partners
            .get(&source)
            .is_some_and(|set| set.contains(&neighbour));
        order = if to_pos == target && !neighbour_linked {
            log::trace!("swapping chain {target} with chain {neighbour} next to chain {source}");
            swapped(&order, from_pos + 1, to_pos)
        } else {
            log::trace!("splicing chain {target} in after chain {source}");
            spliced(&order, source, target)
        };
        positions = positions_of(&order);
    }
    order
}

fn remap_endpoint(endpoint: LinkEndpoint, positions: &[usize]) -> LinkEndpoint {
    LinkEndpoint {
        chain_index: positions[endpoint.chain_index],
        ..endpoint
    }
}

/// Headroom reserved above a chain for its stacked chord humps.
fn link_headroom(shape: &PositionedShape, config: &LayoutConfig) -> f32 {
    let depth = shape.max_chord_depth();
    if depth == 0 {
        return 0.0;
    }
    config.monomer_size / 2.0 + (depth - 1) as f32 * config.internal_connection_padding
}

fn recompute_width(shape: &mut PositionedShape, half_item: f32) {
    let max_x = shape.points.iter().fold(0.0_f32, |acc, p| acc.max(p.x));
    shape.width = max_x + half_item;
}

/// Orders, aligns and stacks every placed chain.
///
/// `shapes` must be indexed by original chain index and every link must refer
/// to existing chains and monomers.
pub(crate) fn arrange_chains(
    shapes: Vec<PositionedShape>,
    links: &[InterLink],
    config: &LayoutConfig,
) -> Arrangement {
    let order = reorder_chains(shapes.len(), links);
    let positions = positions_of(&order);
    log::debug!("chain display order {:?}", order);

    let links: Vec<InterLink> = links
        .iter()
        .map(|link| InterLink {
            from: remap_endpoint(link.from, &positions),
            to: remap_endpoint(link.to, &positions),
        })
        .collect();

    let mut by_chain: Vec<Option<PositionedShape>> = shapes.into_iter().map(Some).collect();
    let half_item = config.half_item();
    let mut placed: Vec<PositionedShape> = Vec::with_capacity(order.len());
    let mut y_offset = 0.0_f32;
    let mut min_x = 0.0_f32;

    for (pos, &chain) in order.iter().enumerate() {
        let Some(mut shape) = by_chain[chain].take() else {
            continue;
        };

        let mut x_offset = 0.0_f32;
        for link in &links {
            if link.from.chain_index == pos && link.to.chain_index < pos {
                x_offset = placed[link.to.chain_index].points[link.to.monomer_index].x
                    - shape.points[link.from.monomer_index].x;
            }
            if link.to.chain_index == pos && link.from.chain_index < pos {
                x_offset = placed[link.from.chain_index].points[link.from.monomer_index].x
                    - shape.points[link.to.monomer_index].x;
            }
        }

        let headroom = link_headroom(&shape, config);
        for point in &mut shape.points {
            point.x += x_offset;
            point.y += y_offset + headroom;
            point.seq_info.chain_index = pos;
            min_x = min_x.min(point.x);
        }
        shape.height += headroom;
        recompute_width(&mut shape, half_item);

        y_offset += shape.height + config.margin_between_chains;
        placed.push(shape);
    }

    if min_x < 0.0 {
        let correction = min_x.abs() + half_item;
        log::debug!("shifting all chains right by {correction}");
        for shape in &mut placed {
            for point in &mut shape.points {
                point.x += correction;
            }
            recompute_width(shape, half_item);
        }
    }

    Arrangement {
        shapes: placed,
        links,
    }
}
