use thiserror::Error;

/// Malformed layout input. Raised before any geometry is computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("chain {chain}: link #{link} references monomer {index}, but the chain has {len} monomers")]
    LinkOutOfRange {
        chain: usize,
        link: usize,
        index: usize,
        len: usize,
    },

    #[error("chain {chain}: link #{link} connects monomer {index} to itself")]
    DegenerateLink { chain: usize, link: usize, index: usize },

    #[error("inter-chain link #{link} references chain {chain}, but only {count} chains exist")]
    UnknownChain { link: usize, chain: usize, count: usize },

    #[error(
        "inter-chain link #{link} references monomer {index} of chain {chain}, which has {len} monomers"
    )]
    InterLinkOutOfRange {
        link: usize,
        chain: usize,
        index: usize,
        len: usize,
    },

    #[error("inter-chain link #{link} connects chain {chain} to itself")]
    SelfInterLink { link: usize, chain: usize },
}
