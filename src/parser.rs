use crate::config::PolymerShapes;
use crate::ir::{Chain, InterLink, ParsedHelm};
use anyhow::{Result, anyhow, bail};
use once_cell::sync::Lazy;
use regex::Regex;

static POLYMER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<id>[A-Za-z]+[0-9]+)\{(?P<body>[^}]*)\}").unwrap());
static CONNECTIONS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$(?P<body>[^$]*)\$").unwrap());
static POSITION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?P<pos>[0-9]+):").unwrap());
static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").unwrap());

/// Parses a HELM notation string into chains and inter-chain links.
///
/// Only the simple-polymer and connection sections are read; polymer groups,
/// annotations and the version tag are ignored.
pub fn parse_helm(input: &str, shapes: &PolymerShapes) -> Result<ParsedHelm> {
    let input = input.trim();
    let polymer_section = input.split('$').next().unwrap_or_default();

    let mut ids: Vec<String> = Vec::new();
    let mut chains: Vec<Chain> = Vec::new();
    for caps in POLYMER_RE.captures_iter(polymer_section) {
        let id = caps["id"].to_string();
        let polymer_type = DIGITS_RE.replace_all(&id, "");
        let monomers: Vec<String> = caps["body"].split('.').map(strip_brackets).collect();
        chains.push(Chain {
            monomers,
            links: Vec::new(),
            shape_category: shapes.category_for(&polymer_type),
            cyclic: false,
        });
        ids.push(id);
    }
    if chains.is_empty() {
        bail!("no HELM polymers found in '{input}'");
    }

    let mut inter_links = Vec::new();
    if let Some(caps) = CONNECTIONS_RE.captures(input) {
        for raw in caps["body"].split('|') {
            let connection: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
            if connection.is_empty() {
                continue;
            }
            let items: Vec<&str> = connection.split(',').collect();
            let [from_id, to_id, positions] = items.as_slice() else {
                bail!("malformed HELM connection '{connection}'");
            };
            let (first, second) = parse_positions(positions)?;

            if from_id == to_id {
                let Some(chain_idx) = ids.iter().position(|id| id == from_id) else {
                    log::warn!("connection '{connection}' names unknown polymer {from_id}");
                    continue;
                };
                let link = (first.min(second), first.max(second));
                chains[chain_idx].links.push(link);
                continue;
            }

            let from = ids.iter().position(|id| id == from_id);
            let to = ids.iter().position(|id| id == to_id);
            match (from, to) {
                (Some(from), Some(to)) => inter_links.push(InterLink::new((from, first), (to, second))),
                _ => log::warn!("connection '{connection}' names an unknown polymer"),
            }
        }
    }

    log::debug!(
        "parsed {} polymer(s) and {} inter-chain link(s)",
        chains.len(),
        inter_links.len()
    );
    Ok(ParsedHelm { chains, inter_links })
}

fn strip_brackets(monomer: &str) -> String {
    monomer
        .strip_prefix('[')
        .and_then(|m| m.strip_suffix(']'))
        .unwrap_or(monomer)
        .to_string()
}

/// Reads `a:R3-b:R2` into zero-based monomer positions.
fn parse_positions(raw: &str) -> Result<(usize, usize)> {
    let positions: Vec<usize> = POSITION_RE
        .captures_iter(raw)
        .map(|caps| caps["pos"].parse::<usize>())
        .collect::<Result<_, _>>()?;
    let [first, second] = positions.as_slice() else {
        bail!("expected two monomer positions in '{raw}'");
    };
    let to_zero_based = |pos: usize| {
        pos.checked_sub(1)
            .ok_or_else(|| anyhow!("monomer positions are 1-based, got 0 in '{raw}'"))
    };
    Ok((to_zero_based(*first)?, to_zero_based(*second)?))
}
