//! The flat directory node that roots every archive.

use rostercar_crypto::ContentHasher;
use rostercar_types::{Block, BlockCodec, ContentId};

use crate::error::{DagError, DagResult};
use crate::pb::{PbLink, PbNode};
use crate::unixfs::{DataType, UnixFsData};

/// One named child of a [`DirectoryNode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Entry name as given by the payload.
    pub name: String,
    /// Identifier of the child: a raw leaf, or a file node for chunked content.
    pub id: ContentId,
    /// Cumulative size of the child's subgraph (dag-pb `Tsize`). For a raw
    /// leaf this is the content length.
    pub size: u64,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, id: ContentId, size: u64) -> Self {
        Self {
            name: name.into(),
            id,
            size,
        }
    }
}

/// A UnixFS directory whose entries keep the order they were added in.
///
/// Entries are neither sorted nor deduplicated, so the same ordered entry
/// list always encodes to the same bytes and a different order (or a
/// repeated name) yields a different root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectoryNode {
    pub entries: Vec<DirectoryEntry>,
}

impl DirectoryNode {
    pub fn new(entries: Vec<DirectoryEntry>) -> Self {
        Self { entries }
    }

    /// Canonical dag-pb bytes.
    pub fn encode(&self) -> Vec<u8> {
        PbNode {
            links: self
                .entries
                .iter()
                .map(|e| PbLink::new(e.id, e.name.clone(), e.size))
                .collect(),
            data: Some(UnixFsData::directory().encode()),
        }
        .encode()
    }

    /// Encode and address as a dag-pb block.
    pub fn to_block(&self) -> Block {
        ContentHasher::DAG_PB.block(self.encode())
    }

    /// Decode a stored directory block.
    pub fn from_block(block: &Block) -> DagResult<Self> {
        if block.codec() != BlockCodec::DagPb {
            return Err(DagError::UnexpectedCodec {
                id: *block.id(),
                expected: BlockCodec::DagPb,
                actual: block.codec(),
            });
        }
        let node = PbNode::decode(block.data())?;
        let data = node
            .data
            .as_deref()
            .ok_or_else(|| DagError::decode("PBNode", "missing Data"))?;
        if UnixFsData::decode(data)?.data_type != DataType::Directory {
            return Err(DagError::WrongNodeType {
                id: *block.id(),
                expected: "directory",
            });
        }
        let entries = node
            .links
            .into_iter()
            .map(|link| DirectoryEntry {
                name: link.name.unwrap_or_default(),
                id: link.hash,
                size: link.tsize.unwrap_or(0),
            })
            .collect();
        Ok(Self { entries })
    }

    /// First entry with the given name.
    pub fn get(&self, name: &str) -> Option<&DirectoryEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
