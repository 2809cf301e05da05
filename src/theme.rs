use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fill, label and border colour of one monomer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub background: String,
    pub color: String,
    pub border: String,
}

/// A colour entry where every field may fall back to the schema default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialColor {
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub border: Option<String>,
}

impl PartialColor {
    fn background(value: &str) -> Self {
        Self {
            background: Some(value.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonColors {
    #[serde(default)]
    pub equal: PartialColor,
    #[serde(default, rename = "notEqual")]
    pub not_equal: PartialColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSchema {
    pub default: Color,
    pub index_number_color: String,
    pub link_color: String,
    pub comparison: ComparisonColors,
    pub monomers: BTreeMap<String, PartialColor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub color_schema: ColorSchema,
}

impl Theme {
    pub fn helm_default() -> Self {
        let mut monomers = BTreeMap::new();
        for (symbol, background) in [
            ("A", "#C8C8C8"),
            ("C", "#E6E600"),
            ("D", "#E60A0A"),
            ("E", "#E60A0A"),
            ("F", "#3232AA"),
            ("G", "#EBEBEB"),
            ("H", "#8282D2"),
            ("I", "#0F820F"),
            ("K", "#145AFF"),
            ("L", "#0F820F"),
            ("M", "#E6E600"),
            ("N", "#00DCDC"),
            ("P", "#DC9682"),
            ("Q", "#00DCDC"),
            ("R", "#145AFF"),
            ("S", "#FA9600"),
            ("T", "#FA9600"),
            ("U", "#B45AB4"),
            ("V", "#0F820F"),
            ("W", "#B45AB4"),
            ("Y", "#3232AA"),
        ] {
            monomers.insert(symbol.to_string(), PartialColor::background(background));
        }

        Self {
            font_family: "arial".to_string(),
            color_schema: ColorSchema {
                default: Color {
                    background: "#F2F2F2".to_string(),
                    color: "#333333".to_string(),
                    border: "#707070".to_string(),
                },
                index_number_color: "#9E9E9E".to_string(),
                link_color: "#333333".to_string(),
                comparison: ComparisonColors {
                    equal: PartialColor::background("#C8E6C9"),
                    not_equal: PartialColor::background("#FFCDD2"),
                },
                monomers,
            },
        }
    }

    pub fn monochrome() -> Self {
        Self {
            font_family: "arial".to_string(),
            color_schema: ColorSchema {
                default: Color {
                    background: "#FFFFFF".to_string(),
                    color: "#000000".to_string(),
                    border: "#000000".to_string(),
                },
                index_number_color: "#666666".to_string(),
                link_color: "#000000".to_string(),
                comparison: ComparisonColors {
                    equal: PartialColor::default(),
                    not_equal: PartialColor::background("#DDDDDD"),
                },
                monomers: BTreeMap::new(),
            },
        }
    }

    /// Resolves the colours of the monomer at `index`.
    ///
    /// With a `reference` sequence the comparison palette replaces the
    /// per-symbol one, so mismatches against the reference stand out.
    pub fn colors_for_monomer(&self, symbol: &str, index: usize, reference: Option<&[String]>) -> Color {
        let schema = &self.color_schema;
        let entry = match reference {
            Some(reference) => {
                if reference.get(index).map(String::as_str) == Some(symbol) {
                    schema.comparison.equal.clone()
                } else {
                    schema.comparison.not_equal.clone()
                }
            }
            None => schema.monomers.get(symbol).cloned().unwrap_or_default(),
        };
        normalize_colors(&entry, &schema.default)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::helm_default()
    }
}

fn normalize_colors(colors: &PartialColor, defaults: &Color) -> Color {
    let pick = |value: &Option<String>, fallback: &str| {
        let raw = value.as_deref().filter(|v| !v.is_empty()).unwrap_or(fallback);
        hex_to_rgba(raw).unwrap_or_else(|| raw.to_string())
    };
    Color {
        background: pick(&colors.background, &defaults.background),
        color: pick(&colors.color, &defaults.color),
        border: pick(&colors.border, &defaults.border),
    }
}

/// Converts `#RRGGBB` or `#RRGGBBAA` into an SVG `rgba(...)` value.
pub fn hex_to_rgba(value: &str) -> Option<String> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    let r = channel(0..2)?;
    let g = channel(2..4)?;
    let b = channel(4..6)?;
    let a = if hex.len() == 8 {
        channel(6..8)? as f32 / 255.0
    } else {
        1.0
    };
    Some(format!("rgba({r}, {g}, {b}, {a})"))
}
