use crate::config::{LayoutConfig, RenderConfig};
use crate::ir::Chain;
use crate::layout::{Layout, LineSegment, Point};
use crate::theme::Theme;
use anyhow::Result;
use std::f32::consts::TAU;
use std::path::Path;

/// Polygon resolution used for every monomer outline.
const SHAPE_POINTS: usize = 30;
const MIN_FONT_SIZE: f32 = 8.0;
const MIN_INDEX_FONT_SIZE: f32 = 9.0;

pub fn render_svg(layout: &Layout, theme: &Theme, config: &LayoutConfig) -> String {
    render_svg_compared(layout, theme, config, None)
}

/// Renders the layout, colouring monomers against `reference` when given.
///
/// `reference` is indexed by original chain index; monomers equal to the
/// reference at the same position get the comparison "equal" palette.
pub fn render_svg_compared(
    layout: &Layout,
    theme: &Theme,
    config: &LayoutConfig,
    reference: Option<&[Chain]>,
) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" fill=\"white\" width=\"{:.2}\" height=\"{:.2}\">",
        layout.width, layout.height
    ));

    for routed in &layout.inter_chain_lines {
        for segment in &routed.segments {
            svg.push_str(&line_svg(segment, theme, config));
        }
    }

    for (shape, segments) in layout.shapes.iter().zip(&layout.intra_chain_lines) {
        for segment in segments {
            svg.push_str(&line_svg(segment, theme, config));
        }
        let comparison = reference.map(|chains| {
            chains
                .get(shape.original_index)
                .map(|chain| chain.monomers.as_slice())
                .unwrap_or_default()
        });
        for (idx, point) in shape.points.iter().enumerate() {
            svg.push_str(&node_svg(point, idx, comparison, theme, config));
        }
    }

    svg.push_str("</svg>");
    svg
}

fn line_svg(segment: &LineSegment, theme: &Theme, config: &LayoutConfig) -> String {
    format!(
        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\"/>",
        segment.x1,
        segment.y1,
        segment.x2,
        segment.y2,
        theme.color_schema.link_color,
        config.connection_line_width
    )
}

fn signed_power(value: f32, exponent: f32) -> f32 {
    value.signum() * value.abs().powf(exponent)
}

/// Superellipse outline: category 1 is a diamond, 2 an ellipse, higher values
/// approach a rounded square.
pub fn basic_shape(
    point_count: usize,
    category: u32,
    center: (f32, f32),
    diameter_x: f32,
    diameter_y: f32,
) -> Vec<(f32, f32)> {
    let power = 2.0 / category.max(1) as f32;
    let step = TAU / point_count.max(1) as f32;
    let radius_x = diameter_x / 2.0;
    let radius_y = diameter_y / 2.0;
    (0..point_count)
        .map(|i| {
            let angle = i as f32 * step;
            (
                center.0 + radius_x * signed_power(angle.cos(), power),
                center.1 + radius_y * signed_power(angle.sin(), power),
            )
        })
        .collect()
}

/// Label text and font size that fit a node of `diameter`.
fn fit_label(symbol: &str, diameter: f32) -> (String, f32) {
    let len = symbol.chars().count();
    let coefficient = if len > 1 { (len / 2).max(1) } else { 1 };
    let font_size = diameter / 2.0 / coefficient as f32;
    if font_size < MIN_FONT_SIZE {
        let short: String = symbol.chars().take(4).collect();
        return (format!("{short}."), MIN_FONT_SIZE);
    }
    (symbol.to_string(), font_size)
}

fn node_svg(
    point: &Point,
    index: usize,
    reference: Option<&[String]>,
    theme: &Theme,
    config: &LayoutConfig,
) -> String {
    let edge = config.monomer_edge_width;
    let diameter = config.monomer_size - (edge + config.monomer_size / 4.0).floor();
    let radius = diameter / 2.0;
    let colors = theme.colors_for_monomer(&point.symbol, index, reference);
    let outline = basic_shape(
        SHAPE_POINTS,
        point.shape_category,
        (radius + edge, radius + edge),
        diameter,
        diameter,
    )
    .iter()
    .map(|(x, y)| format!("{x:.2},{y:.2}"))
    .collect::<Vec<_>>()
    .join(" ");
    let (label, font_size) = fit_label(&point.symbol, diameter);
    let symbol = escape_xml(&point.symbol);

    let mut node = String::new();
    node.push_str(&format!(
        "<g transform=\"matrix(1,0,0,1,{:.2},{:.2})\">",
        point.x - radius,
        point.y - radius
    ));
    node.push_str(&format!(
        "<polygon points=\"{outline}\" fill=\"#FFFFFF\" stroke=\"#FFFFFF\" stroke-width=\"{edge}\"/>"
    ));
    node.push_str(&format!(
        "<polygon points=\"{outline}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{edge}\" class=\"monomerSelector\" data-symbol=\"{symbol}\" data-chain-index=\"{}\" data-original-chain-index=\"{}\" data-monomer-index=\"{}\"/>",
        colors.background,
        colors.border,
        point.seq_info.chain_index,
        point.seq_info.original_chain_index,
        point.seq_info.monomer_index,
    ));
    node.push_str(&format!(
        "<text style=\"pointer-events: none;\" dominant-baseline=\"central\" x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{font_size:.2}\" text-anchor=\"middle\" fill=\"{}\"><tspan>{}</tspan></text>",
        radius + edge,
        radius + edge,
        theme.font_family,
        colors.color,
        escape_xml(&label)
    ));
    node.push_str("</g>");

    let index_size = (diameter / 4.0 - 1.0).max(MIN_INDEX_FONT_SIZE);
    node.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{index_size:.2}\" fill=\"{}\"><tspan>{}</tspan></text>",
        point.x - radius,
        point.y - radius,
        theme.font_family,
        theme.color_schema.index_number_color,
        index + 1
    ));
    node
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme.font_family.clone();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid render size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;
    if let Some(color) = parse_background(&render_cfg.background) {
        pixmap.fill(color);
    }

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(feature = "png")]
fn parse_background(value: &str) -> Option<resvg::tiny_skia::Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some(resvg::tiny_skia::Color::from_rgba8(
        channel(0..2)?,
        channel(2..4)?,
        channel(4..6)?,
        255,
    ))
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig, _theme: &Theme) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
