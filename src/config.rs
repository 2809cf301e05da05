use crate::theme::{Color, PartialColor, Theme};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// How a chain's intra-chain links shape its placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Every chain is a straight row; all intra-chain links become humps.
    Linear,
    /// Ring-closing links turn their range into a circle.
    #[default]
    Structural,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub mode: LayoutMode,
    pub monomer_size: f32,
    pub monomer_edge_width: f32,
    pub connection_line_length: f32,
    pub connection_line_width: f32,
    pub internal_connection_padding: f32,
    pub external_connection_padding: f32,
    pub internal_connection_height: f32,
    pub margin_between_chains: f32,
    pub internal_angle_correction: f32,
    pub external_angle_correction: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Structural,
            monomer_size: 40.0,
            monomer_edge_width: 2.0,
            connection_line_length: 60.0,
            connection_line_width: 2.0,
            internal_connection_padding: 10.0,
            external_connection_padding: 15.0,
            internal_connection_height: 30.0,
            margin_between_chains: 30.0,
            internal_angle_correction: 5.0,
            external_angle_correction: 5.0,
        }
    }
}

impl LayoutConfig {
    pub fn linear() -> Self {
        Self {
            mode: LayoutMode::Linear,
            ..Self::default()
        }
    }

    /// Distance from a monomer centre to the outside of its border.
    pub fn half_item(&self) -> f32 {
        self.monomer_size / 2.0 + self.monomer_edge_width
    }
}

/// Polymer type prefix (`PEPTIDE`, `RNA`, ...) to shape category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolymerShapes(pub BTreeMap<String, u32>);

pub const FALLBACK_POLYMER: &str = "PEPTIDE";

impl PolymerShapes {
    pub fn category_for(&self, polymer_type: &str) -> u32 {
        self.0
            .get(polymer_type)
            .or_else(|| self.0.get(FALLBACK_POLYMER))
            .copied()
            .unwrap_or(1)
    }
}

impl Default for PolymerShapes {
    fn default() -> Self {
        let mut map = BTreeMap::new();
        map.insert("PEPTIDE".to_string(), 2);
        map.insert("RNA".to_string(), 1);
        map.insert("CHEM".to_string(), 4);
        map.insert("BLOB".to_string(), 3);
        Self(map)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub shapes: PolymerShapes,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ColorFile {
    background: Option<String>,
    color: Option<String>,
    border: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ComparisonFile {
    equal: Option<PartialColor>,
    not_equal: Option<PartialColor>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ColorSchemaFile {
    default: Option<ColorFile>,
    index_number_color: Option<String>,
    link_color: Option<String>,
    comparison: Option<ComparisonFile>,
    monomers: Option<BTreeMap<String, PartialColor>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    font_family: Option<String>,
    linear: Option<bool>,
    monomer_size: Option<f32>,
    monomer_edge_width: Option<f32>,
    default_connection_line_length: Option<f32>,
    connection_line_width: Option<f32>,
    internal_connection_padding: Option<f32>,
    external_connection_padding: Option<f32>,
    internal_connection_height: Option<f32>,
    margin_between_sub_sequences: Option<f32>,
    c_link_angle_correction_internal: Option<f32>,
    c_link_angle_correction_external: Option<f32>,
    polymer_shapes: Option<BTreeMap<String, u32>>,
    color_schema: Option<ColorSchemaFile>,
    background: Option<String>,
    width: Option<f32>,
    height: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config = parse_config(&contents)?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Overlays a JSON config document onto the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "monochrome" {
            config.theme = Theme::monochrome();
        } else if theme_name == "default" || theme_name == "helm" {
            config.theme = Theme::helm_default();
        } else {
            log::warn!("unknown theme '{theme_name}', keeping the default");
        }
    }
    if let Some(v) = parsed.font_family {
        config.theme.font_family = v;
    }

    if let Some(linear) = parsed.linear {
        config.layout.mode = if linear {
            LayoutMode::Linear
        } else {
            LayoutMode::Structural
        };
    }
    if let Some(v) = parsed.monomer_size {
        config.layout.monomer_size = v;
    }
    if let Some(v) = parsed.monomer_edge_width {
        config.layout.monomer_edge_width = v;
    }
    if let Some(v) = parsed.default_connection_line_length {
        config.layout.connection_line_length = v;
    }
    if let Some(v) = parsed.connection_line_width {
        config.layout.connection_line_width = v;
    }
    if let Some(v) = parsed.internal_connection_padding {
        config.layout.internal_connection_padding = v;
    }
    if let Some(v) = parsed.external_connection_padding {
        config.layout.external_connection_padding = v;
    }
    if let Some(v) = parsed.internal_connection_height {
        config.layout.internal_connection_height = v;
    }
    if let Some(v) = parsed.margin_between_sub_sequences {
        config.layout.margin_between_chains = v;
    }
    if let Some(v) = parsed.c_link_angle_correction_internal {
        config.layout.internal_angle_correction = v;
    }
    if let Some(v) = parsed.c_link_angle_correction_external {
        config.layout.external_angle_correction = v;
    }

    if let Some(shapes) = parsed.polymer_shapes {
        config.shapes.0.extend(shapes);
    }

    if let Some(schema) = parsed.color_schema {
        let target = &mut config.theme.color_schema;
        if let Some(default) = schema.default {
            merge_color(&mut target.default, default);
        }
        if let Some(v) = schema.index_number_color {
            target.index_number_color = v;
        }
        if let Some(v) = schema.link_color {
            target.link_color = v;
        }
        if let Some(comparison) = schema.comparison {
            if let Some(v) = comparison.equal {
                target.comparison.equal = v;
            }
            if let Some(v) = comparison.not_equal {
                target.comparison.not_equal = v;
            }
        }
        if let Some(monomers) = schema.monomers {
            target.monomers.extend(monomers);
        }
    }

    if let Some(v) = parsed.background {
        config.render.background = v;
    }
    if let Some(v) = parsed.width {
        config.render.width = v;
    }
    if let Some(v) = parsed.height {
        config.render.height = v;
    }

    Ok(config)
}

fn merge_color(target: &mut Color, file: ColorFile) {
    if let Some(v) = file.background {
        target.background = v;
    }
    if let Some(v) = file.color {
        target.color = v;
    }
    if let Some(v) = file.border {
        target.border = v;
    }
}
