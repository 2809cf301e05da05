#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, LayoutMode, load_config};
pub use ir::{Chain, InterLink, ParsedHelm};
pub use layout::{Layout, LayoutError, compute_helm_layout, compute_layout};
pub use parser::parse_helm;
pub use render::{render_svg, render_svg_compared};

/// Parses, lays out and renders one HELM notation to SVG.
pub fn render_helm(input: &str, config: &Config) -> anyhow::Result<String> {
    let parsed = parse_helm(input, &config.shapes)?;
    let layout = compute_helm_layout(&parsed, &config.layout)?;
    Ok(render_svg(&layout, &config.theme, &config.layout))
}
