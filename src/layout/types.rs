use serde::Serialize;

use crate::ir::InterLink;

/// Back-reference from a placed point to the monomer it draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeqInfo {
    /// Position of the owning chain in display order.
    pub chain_index: usize,
    /// Position of the owning chain in parser order.
    pub original_chain_index: usize,
    pub monomer_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub shape_category: u32,
    pub symbol: String,
    pub seq_info: SeqInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LinkGroupKind {
    /// Overlapping chords drawn as stacked humps above the baseline.
    Chord,
    /// Closing bond of a circular group.
    CircleClosure,
    /// Link reaching into a circle; drawn across it.
    InsideCircle,
}

impl LinkGroupKind {
    pub fn renders_straight(self) -> bool {
        !matches!(self, LinkGroupKind::Chord)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkGroup {
    pub kind: LinkGroupKind,
    /// Normalized `(start, end)` pairs, `start < end`, in stacking order.
    pub links: Vec<(usize, usize)>,
    pub start: usize,
    pub end: usize,
}

impl LinkGroup {
    pub fn single(kind: LinkGroupKind, link: (usize, usize)) -> Self {
        Self {
            kind,
            links: vec![link],
            start: link.0,
            end: link.1,
        }
    }

    pub fn depth(&self) -> usize {
        self.links.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedShape {
    pub points: Vec<Point>,
    pub width: f32,
    pub height: f32,
    pub original_index: usize,
    pub link_groups: Vec<LinkGroup>,
    pub cyclic: bool,
}

impl PositionedShape {
    /// Deepest stack of chord humps; straight groups do not count.
    pub fn max_chord_depth(&self) -> usize {
        self.link_groups
            .iter()
            .filter(|group| group.kind == LinkGroupKind::Chord)
            .map(LinkGroup::depth)
            .max()
            .unwrap_or(0)
    }
}

/// Stroke token a segment is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SegmentKind {
    Backbone,
    Chord,
    InterChain,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineSegment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub kind: SegmentKind,
}

impl LineSegment {
    pub fn new(from: (f32, f32), to: (f32, f32), kind: SegmentKind) -> Self {
        Self {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            kind,
        }
    }
}

/// Polyline for a single inter-chain link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutedLink {
    pub link: InterLink,
    /// Column occupancy that produced the jog; `None` for a direct line.
    pub occupancy: Option<usize>,
    pub segments: Vec<LineSegment>,
}

impl RoutedLink {
    pub fn is_direct(&self) -> bool {
        self.occupancy.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    /// Shapes in final display order.
    pub shapes: Vec<PositionedShape>,
    /// Inter-chain links with chain indices in display order.
    pub inter_links: Vec<InterLink>,
    pub inter_chain_lines: Vec<RoutedLink>,
    /// Backbone and chord segments, one list per shape.
    pub intra_chain_lines: Vec<Vec<LineSegment>>,
    pub width: f32,
    pub height: f32,
}
