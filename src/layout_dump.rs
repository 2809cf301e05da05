use crate::layout::{Layout, SegmentKind};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub chains: Vec<ChainDump>,
    pub links: Vec<LinkDump>,
}

#[derive(Debug, Serialize)]
pub struct ChainDump {
    pub index: usize,
    pub original_index: usize,
    pub width: f32,
    pub height: f32,
    pub cyclic: bool,
    pub points: Vec<PointDump>,
    pub lines: Vec<LineDump>,
}

#[derive(Debug, Serialize)]
pub struct PointDump {
    pub symbol: String,
    pub monomer_index: usize,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Serialize)]
pub struct LineDump {
    pub kind: SegmentKind,
    pub points: [[f32; 2]; 2],
}

#[derive(Debug, Serialize)]
pub struct LinkDump {
    pub from: [usize; 2],
    pub to: [usize; 2],
    pub occupancy: Option<usize>,
    pub lines: Vec<LineDump>,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let chains = layout
            .shapes
            .iter()
            .zip(&layout.intra_chain_lines)
            .enumerate()
            .map(|(index, (shape, segments))| ChainDump {
                index,
                original_index: shape.original_index,
                width: shape.width,
                height: shape.height,
                cyclic: shape.cyclic,
                points: shape
                    .points
                    .iter()
                    .map(|point| PointDump {
                        symbol: point.symbol.clone(),
                        monomer_index: point.seq_info.monomer_index,
                        x: point.x,
                        y: point.y,
                    })
                    .collect(),
                lines: segments
                    .iter()
                    .map(|seg| LineDump {
                        kind: seg.kind,
                        points: [[seg.x1, seg.y1], [seg.x2, seg.y2]],
                    })
                    .collect(),
            })
            .collect();

        let links = layout
            .inter_chain_lines
            .iter()
            .map(|routed| LinkDump {
                from: [routed.link.from.chain_index, routed.link.from.monomer_index],
                to: [routed.link.to.chain_index, routed.link.to.monomer_index],
                occupancy: routed.occupancy,
                lines: routed
                    .segments
                    .iter()
                    .map(|seg| LineDump {
                        kind: seg.kind,
                        points: [[seg.x1, seg.y1], [seg.x2, seg.y2]],
                    })
                    .collect(),
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            chains,
            links,
        }
    }
}

/// Writes the layout as pretty JSON to `path`, or stdout when absent.
pub fn write_layout_dump(path: Option<&Path>, layout: &Layout) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout);
    match path {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, &dump)?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &dump)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
