use crate::config::{Config, LayoutMode, load_config};
use crate::ir::ParsedHelm;
use crate::layout::compute_helm_layout;
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_helm;
use crate::render::{render_svg_compared, write_output_png, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "helmr", version, about = "HELM biopolymer renderer in Rust")]
pub struct Args {
    /// Input file with one HELM notation per line, or '-' for stdin
    #[arg(short = 'i', long = "input", conflicts_with = "helm")]
    pub input: Option<PathBuf>,

    /// HELM notation given inline
    #[arg(long = "helm")]
    pub helm: Option<String>,

    /// Output file (svg/png/json). Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (layout constants, polymer shapes, colour schema)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Lay every chain out as a straight row
    #[arg(long = "linear")]
    pub linear: bool,

    /// Reference HELM notation; monomers are coloured by whether they match it
    #[arg(long = "compare")]
    pub compare: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
            OutputFormat::Json => "json",
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if args.linear {
        config.layout.mode = LayoutMode::Linear;
    }

    let input = match &args.helm {
        Some(helm) => helm.clone(),
        None => read_input(args.input.as_deref())?,
    };
    let notations = split_notations(&input);
    if notations.is_empty() {
        return Err(anyhow::anyhow!("No HELM notation found in input"));
    }

    let reference = args
        .compare
        .as_deref()
        .map(|helm| parse_helm(helm, &config.shapes))
        .transpose()?;

    if notations.len() == 1 {
        return render_one(
            &notations[0],
            &config,
            reference.as_ref(),
            args.output_format,
            args.output.as_deref(),
        );
    }

    let outputs = resolve_multi_outputs(args.output.as_deref(), args.output_format, notations.len())?;
    log::debug!("rendering {} notations", notations.len());
    for (notation, output) in notations.iter().zip(&outputs) {
        render_one(notation, &config, reference.as_ref(), args.output_format, Some(output))?;
    }
    Ok(())
}

fn render_one(
    notation: &str,
    config: &Config,
    reference: Option<&ParsedHelm>,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let parsed = parse_helm(notation, &config.shapes)?;
    let layout = compute_helm_layout(&parsed, &config.layout)?;
    if format == OutputFormat::Json {
        return write_layout_dump(output, &layout);
    }

    let svg = render_svg_compared(
        &layout,
        &config.theme,
        &config.layout,
        reference.map(|r| r.chains.as_slice()),
    );
    match format {
        OutputFormat::Png => {
            let output = output.ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
            write_output_png(&svg, output, &config.render, &config.theme)
        }
        _ => write_output_svg(&svg, output),
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

/// One notation per non-empty line.
fn split_notations(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn resolve_multi_outputs(output: Option<&Path>, format: OutputFormat, count: usize) -> Result<Vec<PathBuf>> {
    let ext = format.extension();
    let base = output.ok_or_else(|| anyhow::anyhow!("Output path required for multi-line input"))?;
    if base.is_dir() {
        return Ok((0..count)
            .map(|idx| base.join(format!("helm-{}.{}", idx + 1, ext)))
            .collect());
    }
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("helm");
    let parent = base.parent().unwrap_or_else(|| Path::new("."));
    Ok((0..count)
        .map(|idx| parent.join(format!("{}-{}.{}", stem, idx + 1, ext)))
        .collect())
}
