use rostercar_crypto::ContentHasher;
use rostercar_store::BlockStore;
use rostercar_types::ContentId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::directory::{DirectoryEntry, DirectoryNode};
use crate::error::{DagError, DagResult};
use crate::file::FileNode;
use crate::payload::Payload;

/// Conventional UnixFS chunk size (256 KiB).
pub const DEFAULT_MAX_LEAF_SIZE: usize = 262_144;

/// Importer settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Largest payload stored as a single raw leaf. Larger payloads are split
    /// into chunks of this size under a file node.
    pub max_leaf_size: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_leaf_size: DEFAULT_MAX_LEAF_SIZE,
        }
    }
}

impl ImportConfig {
    pub fn validate(&self) -> DagResult<()> {
        if self.max_leaf_size == 0 {
            return Err(DagError::InvalidConfig(
                "max_leaf_size must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Builds the archive DAG into a block store.
///
/// The importer is the only writer to the store during a run. Blocks are
/// written leaf-first, so the directory node is always the last block
/// inserted.
pub struct Importer<'s, S: BlockStore + ?Sized> {
    store: &'s S,
    config: ImportConfig,
}

impl<'s, S: BlockStore + ?Sized> Importer<'s, S> {
    /// Create an importer writing into `store`.
    pub fn new(store: &'s S, config: ImportConfig) -> DagResult<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// Import payloads in order and return the root directory's identifier.
    ///
    /// Fails with [`DagError::EmptyInput`] before touching the store if there
    /// are no payloads.
    pub fn import<I>(&self, payloads: I) -> DagResult<ContentId>
    where
        I: IntoIterator<Item = Payload>,
    {
        let mut payloads = payloads.into_iter().peekable();
        if payloads.peek().is_none() {
            return Err(DagError::EmptyInput);
        }

        let mut entries = Vec::new();
        for payload in payloads {
            let (id, size) = self.import_payload(&payload)?;
            debug!(name = %payload.name, block = %id, size, "imported payload");
            entries.push(DirectoryEntry::new(payload.name, id, size));
        }

        let directory = DirectoryNode::new(entries);
        let root = self.store.put(directory.to_block())?;
        info!(root = %root, entries = directory.len(), "import complete");
        Ok(root)
    }

    /// Store one payload; returns its entry id and cumulative size.
    fn import_payload(&self, payload: &Payload) -> DagResult<(ContentId, u64)> {
        let content = &payload.content;
        if content.len() <= self.config.max_leaf_size {
            let id = self.store.put(ContentHasher::RAW.block(content.clone()))?;
            return Ok((id, content.len() as u64));
        }

        let mut chunks = Vec::new();
        let mut offset = 0;
        while offset < content.len() {
            let end = (offset + self.config.max_leaf_size).min(content.len());
            let chunk = content.slice(offset..end);
            let size = chunk.len() as u64;
            let id = self.store.put(ContentHasher::RAW.block(chunk))?;
            chunks.push((id, size));
            offset = end;
        }
        debug!(name = %payload.name, chunks = chunks.len(), "split oversized payload");

        let file = FileNode::new(chunks);
        let block = file.to_block();
        let tsize = block.size() + file.filesize();
        let id = self.store.put(block)?;
        Ok((id, tsize))
    }
}

/// Import with the default configuration.
pub fn import<S, I>(payloads: I, store: &S) -> DagResult<ContentId>
where
    S: BlockStore + ?Sized,
    I: IntoIterator<Item = Payload>,
{
    Importer::new(store, ImportConfig::default())?.import(payloads)
}
