use serde::{Deserialize, Serialize};

/// One polymer strand: ordered monomers plus the links that stay inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    pub monomers: Vec<String>,
    pub links: Vec<(usize, usize)>,
    pub shape_category: u32,
    #[serde(default)]
    pub cyclic: bool,
}

impl Chain {
    pub fn new<S: AsRef<str>>(monomers: &[S], shape_category: u32) -> Self {
        Self {
            monomers: monomers.iter().map(|m| m.as_ref().to_string()).collect(),
            links: Vec::new(),
            shape_category,
            cyclic: false,
        }
    }

    pub fn with_links(mut self, links: &[(usize, usize)]) -> Self {
        self.links.extend_from_slice(links);
        self
    }

    pub fn len(&self) -> usize {
        self.monomers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monomers.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkEndpoint {
    pub chain_index: usize,
    pub monomer_index: usize,
}

/// A bond between monomers of two different chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterLink {
    pub from: LinkEndpoint,
    pub to: LinkEndpoint,
}

impl InterLink {
    pub fn new(from: (usize, usize), to: (usize, usize)) -> Self {
        Self {
            from: LinkEndpoint {
                chain_index: from.0,
                monomer_index: from.1,
            },
            to: LinkEndpoint {
                chain_index: to.0,
                monomer_index: to.1,
            },
        }
    }

    /// Number of stacking positions between the two chains.
    pub fn chain_distance(&self) -> usize {
        self.from.chain_index.abs_diff(self.to.chain_index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedHelm {
    pub chains: Vec<Chain>,
    pub inter_links: Vec<InterLink>,
}
