use std::collections::HashMap;
use std::sync::RwLock;

use bytes::Bytes;
use rostercar_crypto::ContentHasher;
use rostercar_types::{Block, ContentId};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::BlockStore;

#[derive(Default)]
struct Inner {
    /// Identifiers in first-insertion order.
    order: Vec<ContentId>,
    blocks: HashMap<ContentId, Bytes>,
}

/// In-memory, insertion-ordered block store.
///
/// One store backs one pipeline run. Blocks are held as [`Bytes`], so the
/// snapshots handed out by [`BlockStore::blocks`] share memory with the store
/// instead of copying block contents.
pub struct InMemoryBlockStore {
    inner: RwLock<Inner>,
}

impl InMemoryBlockStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Number of blocks currently stored.
    pub fn len(&self) -> usize {
        self.inner.read().expect("lock poisoned").order.len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total bytes across all stored blocks.
    pub fn total_bytes(&self) -> u64 {
        self.inner
            .read()
            .expect("lock poisoned")
            .blocks
            .values()
            .map(|data| data.len() as u64)
            .sum()
    }

    /// Identifiers in insertion order.
    pub fn ids(&self) -> Vec<ContentId> {
        self.inner.read().expect("lock poisoned").order.clone()
    }
}

impl Default for InMemoryBlockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockStore for InMemoryBlockStore {
    fn put(&self, block: Block) -> StoreResult<ContentId> {
        if !ContentHasher::verify_block(&block) {
            let computed = ContentHasher::new(block.codec()).hash(block.data());
            return Err(StoreError::HashMismatch {
                id: *block.id(),
                computed,
            });
        }
        let (id, data) = block.into_parts();
        let mut inner = self.inner.write().expect("lock poisoned");
        if inner.blocks.contains_key(&id) {
            debug!(block = %id, "block already stored");
            return Ok(id);
        }
        debug!(block = %id, size = data.len(), "stored block");
        inner.order.push(id);
        inner.blocks.insert(id, data);
        Ok(id)
    }

    fn get(&self, id: &ContentId) -> Option<Bytes> {
        self.inner
            .read()
            .expect("lock poisoned")
            .blocks
            .get(id)
            .cloned()
    }

    fn has(&self, id: &ContentId) -> bool {
        self.inner
            .read()
            .expect("lock poisoned")
            .blocks
            .contains_key(id)
    }

    fn blocks(&self) -> std::vec::IntoIter<Block> {
        let inner = self.inner.read().expect("lock poisoned");
        inner
            .order
            .iter()
            .filter_map(|id| inner.blocks.get(id).map(|data| Block::new(*id, data.clone())))
            .collect::<Vec<_>>()
            .into_iter()
    }
}

impl std::fmt::Debug for InMemoryBlockStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBlockStore")
            .field("block_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rostercar_types::BlockCodec;

    fn raw(content: &[u8]) -> Block {
        ContentHasher::RAW.block(content.to_vec())
    }

    // -----------------------------------------------------------------------
    // Core put / get
    // -----------------------------------------------------------------------

    #[test]
    fn put_and_get() {
        let store = InMemoryBlockStore::new();
        let id = store.put(raw(b"<svg>A</svg>")).unwrap();
        assert_eq!(id.codec(), BlockCodec::Raw);

        let data = store.get(&id).expect("should exist");
        assert_eq!(data.as_ref(), b"<svg>A</svg>");
    }

    #[test]
    fn get_missing_returns_none() {
        let store = InMemoryBlockStore::new();
        let id = ContentHasher::RAW.hash(b"missing");
        assert!(store.get(&id).is_none());
        assert!(!store.has(&id));
    }

    #[test]
    fn lookup_by_independently_built_id() {
        let store = InMemoryBlockStore::new();
        store.put(raw(b"probe")).unwrap();
        let rebuilt = ContentId::from_bytes(&ContentHasher::RAW.hash(b"probe").to_bytes()).unwrap();
        assert!(store.has(&rebuilt));
    }

    // -----------------------------------------------------------------------
    // Content-addressing correctness
    // -----------------------------------------------------------------------

    #[test]
    fn put_is_idempotent() {
        let store = InMemoryBlockStore::new();
        let id1 = store.put(raw(b"identical")).unwrap();
        let id2 = store.put(raw(b"identical")).unwrap();
        assert_eq!(id1, id2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn same_bytes_different_codec_are_distinct() {
        let store = InMemoryBlockStore::new();
        store.put(ContentHasher::RAW.block(b"x".to_vec())).unwrap();
        store.put(ContentHasher::DAG_PB.block(b"x".to_vec())).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn rejects_mismatched_block() {
        let store = InMemoryBlockStore::new();
        let id = ContentHasher::RAW.hash(b"claimed");
        let err = store.put(Block::new(id, b"actual".to_vec())).unwrap_err();
        assert!(matches!(err, StoreError::HashMismatch { .. }));
        assert!(store.is_empty());
    }

    // -----------------------------------------------------------------------
    // Enumeration
    // -----------------------------------------------------------------------

    #[test]
    fn blocks_follow_insertion_order() {
        let store = InMemoryBlockStore::new();
        let ids: Vec<ContentId> = [&b"ccc"[..], b"aaa", b"bbb"]
            .iter()
            .map(|c| store.put(raw(c)).unwrap())
            .collect();

        let listed: Vec<ContentId> = store.blocks().map(|b| *b.id()).collect();
        assert_eq!(listed, ids);
        assert_eq!(store.ids(), ids);
    }

    #[test]
    fn reinsert_keeps_original_position() {
        let store = InMemoryBlockStore::new();
        let first = store.put(raw(b"first")).unwrap();
        let second = store.put(raw(b"second")).unwrap();
        store.put(raw(b"first")).unwrap();
        assert_eq!(store.ids(), vec![first, second]);
    }

    #[test]
    fn blocks_is_restartable() {
        let store = InMemoryBlockStore::new();
        store.put(raw(b"one")).unwrap();
        store.put(raw(b"two")).unwrap();

        let a: Vec<Block> = store.blocks().collect();
        let b: Vec<Block> = store.blocks().collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn blocks_is_a_snapshot() {
        let store = InMemoryBlockStore::new();
        store.put(raw(b"before")).unwrap();
        let iter = store.blocks();
        store.put(raw(b"after")).unwrap();
        assert_eq!(iter.count(), 1);
        assert_eq!(store.blocks().count(), 2);
    }

    #[test]
    fn empty_store_enumerates_nothing() {
        let store = InMemoryBlockStore::new();
        assert_eq!(store.blocks().count(), 0);
    }

    // -----------------------------------------------------------------------
    // Batch / utility
    // -----------------------------------------------------------------------

    #[test]
    fn put_batch() {
        let store = InMemoryBlockStore::new();
        let ids = store
            .put_batch(vec![raw(b"batch-1"), raw(b"batch-2"), raw(b"batch-1")])
            .unwrap();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0], ids[2]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn total_bytes() {
        let store = InMemoryBlockStore::new();
        store.put(raw(b"12345")).unwrap();
        store.put(raw(b"123456789")).unwrap();
        assert_eq!(store.total_bytes(), 14);
    }

    #[test]
    fn stored_bytes_hash_to_id() {
        let store = InMemoryBlockStore::new();
        store.put(raw(b"verify me")).unwrap();
        for block in store.blocks() {
            assert!(ContentHasher::verify_block(&block));
        }
    }

    #[test]
    fn debug_format() {
        let store = InMemoryBlockStore::new();
        store.put(raw(b"x")).unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryBlockStore"));
        assert!(debug.contains("block_count"));
    }
}
