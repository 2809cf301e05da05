mod arrange;
mod error;
mod intra;
mod placement;
mod routing;
mod stacking;
pub(crate) mod types;
pub use error::LayoutError;
pub use stacking::ChordStack;
pub use types::*;

use crate::config::LayoutConfig;
use crate::ir::{Chain, InterLink, ParsedHelm};

use arrange::arrange_chains;
use intra::build_chain_segments;
use placement::place_chain;
use routing::route_inter_chain_links;

/// Groups overlapping chord links and reports the deepest stack.
///
/// Links must be normalized so `start < end`.
pub fn stack_chords(links: &[(usize, usize)]) -> ChordStack {
    stacking::stack_chords(links)
}

/// Checks every index before any geometry is computed.
pub fn validate_input(chains: &[Chain], inter_links: &[InterLink]) -> Result<(), LayoutError> {
    for (chain_idx, chain) in chains.iter().enumerate() {
        let len = chain.len();
        for (link_idx, &(a, b)) in chain.links.iter().enumerate() {
            for index in [a, b] {
                if index >= len {
                    return Err(LayoutError::LinkOutOfRange {
                        chain: chain_idx,
                        link: link_idx,
                        index,
                        len,
                    });
                }
            }
            if a == b {
                return Err(LayoutError::DegenerateLink {
                    chain: chain_idx,
                    link: link_idx,
                    index: a,
                });
            }
        }
    }

    let count = chains.len();
    for (link_idx, link) in inter_links.iter().enumerate() {
        for endpoint in [link.from, link.to] {
            let Some(chain) = chains.get(endpoint.chain_index) else {
                return Err(LayoutError::UnknownChain {
                    link: link_idx,
                    chain: endpoint.chain_index,
                    count,
                });
            };
            if endpoint.monomer_index >= chain.len() {
                return Err(LayoutError::InterLinkOutOfRange {
                    link: link_idx,
                    chain: endpoint.chain_index,
                    index: endpoint.monomer_index,
                    len: chain.len(),
                });
            }
        }
        if link.from.chain_index == link.to.chain_index {
            return Err(LayoutError::SelfInterLink {
                link: link_idx,
                chain: link.from.chain_index,
            });
        }
    }
    Ok(())
}

fn canvas_size(shapes: &[PositionedShape], lines: &[RoutedLink], config: &LayoutConfig) -> (f32, f32) {
    let mut width = 0.0_f32;
    for segment in lines.iter().flat_map(|line| line.segments.iter()) {
        width = width
            .max(segment.x1 + config.connection_line_width)
            .max(segment.x2 + config.connection_line_width);
    }
    let mut height = 0.0_f32;
    for shape in shapes {
        width = width.max(shape.width);
        height += shape.height + config.margin_between_chains;
    }
    if !shapes.is_empty() {
        height -= config.margin_between_chains;
    }
    (width, height)
}

/// Runs the whole pipeline: placement, chain arrangement, routing.
///
/// The result is a pure function of the input; nothing is carried between
/// calls.
pub fn compute_layout(
    chains: &[Chain],
    inter_links: &[InterLink],
    config: &LayoutConfig,
) -> Result<Layout, LayoutError> {
    validate_input(chains, inter_links)?;
    log::debug!(
        "laying out {} chain(s), {} inter-chain link(s), mode {:?}",
        chains.len(),
        inter_links.len(),
        config.mode
    );

    let shapes: Vec<PositionedShape> = chains
        .iter()
        .enumerate()
        .map(|(idx, chain)| place_chain(chain, idx, config))
        .collect();

    let arrangement = arrange_chains(shapes, inter_links, config);
    let inter_chain_lines = route_inter_chain_links(&arrangement.shapes, &arrangement.links, config);
    let intra_chain_lines = arrangement
        .shapes
        .iter()
        .map(|shape| build_chain_segments(shape, config))
        .collect();
    let (width, height) = canvas_size(&arrangement.shapes, &inter_chain_lines, config);

    Ok(Layout {
        shapes: arrangement.shapes,
        inter_links: arrangement.links,
        inter_chain_lines,
        intra_chain_lines,
        width,
        height,
    })
}

pub fn compute_helm_layout(parsed: &ParsedHelm, config: &LayoutConfig) -> Result<Layout, LayoutError> {
    compute_layout(&parsed.chains, &parsed.inter_links, config)
}
