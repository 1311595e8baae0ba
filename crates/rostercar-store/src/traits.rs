use bytes::Bytes;
use rostercar_types::{Block, ContentId};

use crate::error::StoreResult;

/// Content-addressed block store.
///
/// All implementations must satisfy these invariants:
/// - Blocks are immutable once written. Writing a block that is already
///   present is a no-op that returns the same identifier.
/// - A block whose bytes do not hash to its identifier is rejected.
/// - [`blocks`](Self::blocks) yields every stored block exactly once, in the
///   order each identifier was first written.
pub trait BlockStore: Send + Sync {
    /// Store a block and return its identifier.
    fn put(&self, block: Block) -> StoreResult<ContentId>;

    /// Read a block's bytes. Absence is `None`, not an error.
    fn get(&self, id: &ContentId) -> Option<Bytes>;

    /// Check whether a block exists in the store.
    fn has(&self, id: &ContentId) -> bool {
        self.get(id).is_some()
    }

    /// Snapshot of every stored block in insertion order.
    ///
    /// Each call starts a fresh traversal; blocks written after the call are
    /// not included in the returned iterator.
    fn blocks(&self) -> std::vec::IntoIter<Block>;

    /// Store several blocks and return their identifiers.
    ///
    /// Stops at the first rejected block.
    fn put_batch(&self, blocks: Vec<Block>) -> StoreResult<Vec<ContentId>> {
        blocks.into_iter().map(|block| self.put(block)).collect()
    }
}
