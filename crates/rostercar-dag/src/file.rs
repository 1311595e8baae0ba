//! Chunked file nodes for payloads larger than one leaf.

use rostercar_crypto::ContentHasher;
use rostercar_types::{Block, ContentId};

use crate::pb::{PbLink, PbNode};
use crate::unixfs::UnixFsData;

/// A UnixFS file node linking raw chunks in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileNode {
    /// `(chunk id, chunk length)` in content order.
    pub chunks: Vec<(ContentId, u64)>,
}

impl FileNode {
    pub fn new(chunks: Vec<(ContentId, u64)>) -> Self {
        Self { chunks }
    }

    /// Total content length.
    pub fn filesize(&self) -> u64 {
        self.chunks.iter().map(|(_, size)| size).sum()
    }

    /// Canonical dag-pb bytes. Chunk links carry an empty name.
    pub fn encode(&self) -> Vec<u8> {
        PbNode {
            links: self
                .chunks
                .iter()
                .map(|(id, size)| PbLink::new(*id, "", *size))
                .collect(),
            data: Some(UnixFsData::file(self.chunks.iter().map(|(_, s)| *s).collect()).encode()),
        }
        .encode()
    }

    /// Encode and address as a dag-pb block.
    pub fn to_block(&self) -> Block {
        ContentHasher::DAG_PB.block(self.encode())
    }
}
