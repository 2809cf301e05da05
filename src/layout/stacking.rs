use super::types::{LinkGroup, LinkGroupKind};

/// Result of stacking one chain's chord links.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChordStack {
    pub max_depth: usize,
    pub groups: Vec<LinkGroup>,
}

fn ranges_overlap(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0 <= b.1 && b.0 <= a.1
}

/// Groups chord links whose index ranges share at least one monomer.
///
/// Each group keeps the union of its members' ranges, so a later link that
/// touches the union joins the group even when it misses every individual
/// member. A link bridging several groups folds them into the earliest one.
/// Groups come back in creation order; that order decides which humps sit
/// above which.
pub(crate) fn stack_chords(links: &[(usize, usize)]) -> ChordStack {
    let mut groups: Vec<LinkGroup> = Vec::new();
    let mut max_depth = 0;

    for &link in links {
        let hits: Vec<usize> = groups
            .iter()
            .enumerate()
            .filter(|(_, group)| ranges_overlap((group.start, group.end), link))
            .map(|(idx, _)| idx)
            .collect();

        let Some((&first, rest)) = hits.split_first() else {
            groups.push(LinkGroup::single(LinkGroupKind::Chord, link));
            max_depth = max_depth.max(1);
            continue;
        };

        // Later hits are removed back to front so earlier indices stay valid.
        for &idx in rest.iter().rev() {
            let absorbed = groups.remove(idx);
            let target = &mut groups[first];
            target.start = target.start.min(absorbed.start);
            target.end = target.end.max(absorbed.end);
            target.links.extend(absorbed.links);
        }
        let target = &mut groups[first];
        target.start = target.start.min(link.0);
        target.end = target.end.max(link.1);
        target.links.push(link);
        max_depth = max_depth.max(target.depth());
        log::trace!("chord {:?} stacked at depth {}", link, target.depth());
    }

    ChordStack { max_depth, groups }
}
