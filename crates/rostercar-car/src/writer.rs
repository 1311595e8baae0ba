use std::io::Write;

use rostercar_store::BlockStore;
use rostercar_types::{varint, Block, ContentId};
use tracing::{debug, info};

use crate::error::CarResult;
use crate::header::CarHeader;

/// Streams a block store out as a CARv1 archive.
///
/// ```text
/// varint(len) | dag-cbor { roots: [root], version: 1 }
/// varint(len) | cid | block bytes      (once per stored block)
/// ```
///
/// Blocks are emitted in store insertion order. There is no trailer.
pub struct CarWriter<'s, S: BlockStore + ?Sized> {
    root: ContentId,
    header: Vec<u8>,
    store: &'s S,
}

impl<'s, S: BlockStore + ?Sized> CarWriter<'s, S> {
    /// Prepare a writer declaring `root` as the archive's only root.
    pub fn new(root: ContentId, store: &'s S) -> CarResult<Self> {
        let header = header_frame(&CarHeader::new(&[root]))?;
        Ok(Self {
            root,
            header,
            store,
        })
    }

    /// The declared root.
    pub fn root(&self) -> &ContentId {
        &self.root
    }

    /// The length-prefixed header frame.
    pub fn header_frame(&self) -> &[u8] {
        &self.header
    }

    /// Lazily encoded frames: the header, then one frame per block.
    ///
    /// The block list is snapshotted when this is called; call it again for a
    /// fresh pass.
    pub fn frames(&self) -> Frames {
        Frames::new(self.header.clone(), self.store.blocks())
    }

    /// Write the whole archive. Returns the number of bytes written.
    pub fn write_to<W: Write>(&self, mut out: W) -> CarResult<u64> {
        let mut written = 0u64;
        let mut blocks = 0usize;
        for frame in self.frames() {
            out.write_all(&frame)?;
            written += frame.len() as u64;
            blocks += 1;
        }
        out.flush()?;
        info!(root = %self.root, blocks = blocks.saturating_sub(1), bytes = written, "wrote CAR");
        Ok(written)
    }

    /// The whole archive in memory.
    pub fn to_vec(&self) -> Vec<u8> {
        self.frames().flatten().collect()
    }
}

/// Iterator over encoded CAR frames.
#[derive(Debug)]
pub struct Frames {
    header: Option<Vec<u8>>,
    blocks: std::vec::IntoIter<Block>,
}

impl Frames {
    pub fn new(header: Vec<u8>, blocks: std::vec::IntoIter<Block>) -> Self {
        Self {
            header: Some(header),
            blocks,
        }
    }
}

impl Iterator for Frames {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(header) = self.header.take() {
            return Some(header);
        }
        self.blocks.next().map(|block| block_frame(&block))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.blocks.len() + usize::from(self.header.is_some());
        (n, Some(n))
    }
}

impl ExactSizeIterator for Frames {}

/// Encode a header as a length-prefixed frame.
pub fn header_frame(header: &CarHeader) -> CarResult<Vec<u8>> {
    let body = header.encode()?;
    let mut frame = Vec::with_capacity(body.len() + varint::encoded_len(body.len() as u64));
    varint::encode(&mut frame, body.len() as u64);
    frame.extend_from_slice(&body);
    Ok(frame)
}

/// Encode a block as a length-prefixed `cid | bytes` frame.
pub fn block_frame(block: &Block) -> Vec<u8> {
    let cid = block.id().to_bytes();
    let len = (cid.len() + block.data().len()) as u64;
    let mut frame = Vec::with_capacity(varint::encoded_len(len) + len as usize);
    varint::encode(&mut frame, len);
    frame.extend_from_slice(&cid);
    frame.extend_from_slice(block.data());
    debug!(block = %block.id(), frame_len = frame.len(), "encoded block frame");
    frame
}
