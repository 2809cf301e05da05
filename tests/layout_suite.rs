use std::path::Path;

use helm_rs_renderer::config::PolymerShapes;
use helm_rs_renderer::layout::{Layout, LinkGroupKind, SegmentKind};
use helm_rs_renderer::theme::Theme;
use helm_rs_renderer::{LayoutConfig, ParsedHelm, compute_helm_layout, parse_helm, render_svg};

fn load_fixture(name: &str) -> ParsedHelm {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    parse_helm(&input, &PolymerShapes::default()).expect("parse failed")
}

fn assert_consistent(layout: &Layout, parsed: &ParsedHelm, fixture: &str) {
    assert_eq!(layout.shapes.len(), parsed.chains.len(), "{fixture}: chain count");
    assert_eq!(layout.intra_chain_lines.len(), layout.shapes.len(), "{fixture}: line lists");
    assert_eq!(layout.inter_links.len(), parsed.inter_links.len(), "{fixture}: link count");
    assert_eq!(
        layout.inter_chain_lines.len(),
        parsed.inter_links.len(),
        "{fixture}: routed link count"
    );

    for (pos, shape) in layout.shapes.iter().enumerate() {
        let chain = &parsed.chains[shape.original_index];
        assert_eq!(shape.points.len(), chain.len(), "{fixture}: point count");
        for (idx, point) in shape.points.iter().enumerate() {
            assert!(point.x >= 0.0, "{fixture}: negative x {}", point.x);
            assert_eq!(point.seq_info.chain_index, pos, "{fixture}: display index");
            assert_eq!(point.seq_info.original_chain_index, shape.original_index);
            assert_eq!(point.seq_info.monomer_index, idx, "{fixture}: monomer order");
            assert_eq!(point.symbol, chain.monomers[idx], "{fixture}: symbol");
        }
    }

    let mut originals: Vec<usize> = layout.shapes.iter().map(|s| s.original_index).collect();
    originals.sort_unstable();
    assert_eq!(originals, (0..parsed.chains.len()).collect::<Vec<_>>(), "{fixture}: permutation");

    for (link, original) in layout.inter_links.iter().zip(&parsed.inter_links) {
        for (endpoint, source) in [(link.from, original.from), (link.to, original.to)] {
            let shape = &layout.shapes[endpoint.chain_index];
            assert_eq!(shape.original_index, source.chain_index, "{fixture}: remapped chain");
            assert_eq!(endpoint.monomer_index, source.monomer_index);
        }
    }
}

/// Two direct links in one column must not share any stretch of it.
fn assert_no_shared_direct_columns(layout: &Layout, fixture: &str) {
    let direct_vertical: Vec<(f32, f32, f32)> = layout
        .inter_chain_lines
        .iter()
        .filter(|routed| routed.is_direct())
        .map(|routed| routed.segments[0])
        .filter(|seg| seg.x1 == seg.x2)
        .map(|seg| (seg.x1, seg.y1.min(seg.y2), seg.y1.max(seg.y2)))
        .collect();
    for (i, a) in direct_vertical.iter().enumerate() {
        for b in &direct_vertical[i + 1..] {
            if a.0 != b.0 {
                continue;
            }
            let overlapping = a.1 + 1.0 < b.2 - 1.0 && b.1 + 1.0 < a.2 - 1.0;
            assert!(!overlapping, "{fixture}: direct links share column {}", a.0);
        }
    }
}

const FIXTURES: [&str; 6] = [
    "antibody_fragment.helm",
    "cyclic_peptide.helm",
    "long_symbols.helm",
    "nested_links.helm",
    "rna_duplex.helm",
    "two_chains.helm",
];

#[test]
fn layout_all_fixtures() {
    for fixture in FIXTURES {
        let parsed = load_fixture(fixture);
        for config in [LayoutConfig::default(), LayoutConfig::linear()] {
            let layout = compute_helm_layout(&parsed, &config).expect("layout failed");
            assert_consistent(&layout, &parsed, fixture);
            assert_no_shared_direct_columns(&layout, fixture);
            assert!(layout.width > 0.0 && layout.height > 0.0, "{fixture}: empty canvas");
        }
    }
}

#[test]
fn layout_is_deterministic() {
    for fixture in FIXTURES {
        let parsed = load_fixture(fixture);
        let config = LayoutConfig::default();
        let first = compute_helm_layout(&parsed, &config).expect("layout failed");
        let second = compute_helm_layout(&parsed, &config).expect("layout failed");
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap(),
            "{fixture}: layout changed between runs"
        );
    }
}

#[test]
fn render_all_fixtures() {
    let theme = Theme::helm_default();
    for fixture in FIXTURES {
        let parsed = load_fixture(fixture);
        let config = LayoutConfig::default();
        let layout = compute_helm_layout(&parsed, &config).expect("layout failed");
        let svg = render_svg(&layout, &theme, &config);
        assert!(svg.starts_with("<svg"), "{fixture}: missing <svg tag");
        assert!(svg.ends_with("</svg>"), "{fixture}: missing </svg tag");
        let monomers: usize = parsed.chains.iter().map(|c| c.len()).sum();
        assert_eq!(svg.matches("class=\"monomerSelector\"").count(), monomers, "{fixture}");
    }
}

#[test]
fn linear_mode_spaces_every_chain_evenly() {
    let parsed = load_fixture("antibody_fragment.helm");
    let config = LayoutConfig::linear();
    let layout = compute_helm_layout(&parsed, &config).expect("layout failed");
    for shape in &layout.shapes {
        for pair in shape.points.windows(2) {
            assert!((pair[1].x - pair[0].x - config.connection_line_length).abs() < 1e-3);
            assert_eq!(pair[0].y, pair[1].y);
        }
        assert!(
            shape
                .link_groups
                .iter()
                .all(|group| group.kind == LinkGroupKind::Chord)
        );
    }
}

#[test]
fn three_monomer_ring_forms_one_circle() {
    let parsed = parse_helm("PEPTIDE1{A.C.G}$PEPTIDE1,PEPTIDE1,1:R3-3:R3$$$", &PolymerShapes::default())
        .expect("parse failed");
    let layout = compute_helm_layout(&parsed, &LayoutConfig::default()).expect("layout failed");
    let shape = &layout.shapes[0];
    assert_eq!(shape.link_groups.len(), 1);
    assert_eq!(shape.link_groups[0].kind, LinkGroupKind::CircleClosure);
    let chords: Vec<_> = layout.intra_chain_lines[0]
        .iter()
        .filter(|seg| seg.kind == SegmentKind::Chord)
        .collect();
    assert_eq!(chords.len(), 1);
    assert!((shape.points[0].y - shape.points[2].y).abs() < 1e-3);
    assert!(shape.points[1].y > shape.points[0].y);
}

#[test]
fn adjacent_chains_keep_their_order() {
    let parsed = load_fixture("two_chains.helm");
    let layout = compute_helm_layout(&parsed, &LayoutConfig::default()).expect("layout failed");
    let order: Vec<usize> = layout.shapes.iter().map(|s| s.original_index).collect();
    assert_eq!(order, vec![0, 1]);
    assert_eq!(layout.inter_chain_lines.len(), 1);
    assert!(layout.inter_chain_lines[0].is_direct());
    assert_eq!(layout.inter_chain_lines[0].segments.len(), 1);
}

#[test]
fn linked_chains_are_pulled_together() {
    let parsed = parse_helm(
        "PEPTIDE1{A.C}|PEPTIDE2{G.G}|PEPTIDE3{K.C}$PEPTIDE1,PEPTIDE3,2:R3-2:R3$$$",
        &PolymerShapes::default(),
    )
    .expect("parse failed");
    let layout = compute_helm_layout(&parsed, &LayoutConfig::default()).expect("layout failed");
    let link = layout.inter_links[0];
    assert_eq!(link.from.chain_index.abs_diff(link.to.chain_index), 1);
}
