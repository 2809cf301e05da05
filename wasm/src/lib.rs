use helm_rs_renderer::config::{Config, LayoutMode};
use helm_rs_renderer::theme::Theme;
use helm_rs_renderer::render_helm;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HelmRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    monomer_size: Option<f32>,
    linear: Option<bool>,
}

fn build_config(options: HelmRenderOptions) -> Config {
    let mut config = Config::default();
    if options.theme.as_deref() == Some("monochrome") {
        config.theme = Theme::monochrome();
    }
    if let Some(font_family) = options.font_family {
        config.theme.font_family = font_family;
    }
    if let Some(monomer_size) = options.monomer_size {
        config.layout.monomer_size = monomer_size;
    }
    if options.linear == Some(true) {
        config.layout.mode = LayoutMode::Linear;
    }
    config
}

#[wasm_bindgen]
pub fn render_helm_svg(helm: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<HelmRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        HelmRenderOptions::default()
    };

    render_helm(helm, &build_config(options)).map_err(|error| JsValue::from_str(&error.to_string()))
}

#[cfg(test)]
mod tests {
    use helm_rs_renderer::render_helm;

    use crate::{HelmRenderOptions, build_config};

    #[test]
    fn renders_cyclic_peptide_with_inter_chain_bond() {
        let helm = "PEPTIDE1{C.A.A.C.G.K}|PEPTIDE2{F.W.Y}$PEPTIDE1,PEPTIDE1,4:R3-1:R3|PEPTIDE1,PEPTIDE2,6:R3-2:R3$$$";
        let svg = render_helm(helm, &build_config(HelmRenderOptions::default()))
            .expect("cyclic peptide should render");

        assert!(svg.contains("<svg"));
        assert!(svg.contains("data-symbol=\"W\""));
    }

    #[test]
    fn linear_option_switches_mode() {
        let config = build_config(HelmRenderOptions {
            linear: Some(true),
            ..Default::default()
        });
        assert_eq!(config.layout.mode, helm_rs_renderer::LayoutMode::Linear);
    }
}
