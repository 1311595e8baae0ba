use std::io::Write;

use rostercar_car::{CarWriter, Frames};
use rostercar_dag::{ImportConfig, Importer, Payload};
use rostercar_store::{BlockStore, InMemoryBlockStore};
use rostercar_types::{Block, ContentId};
use tracing::info;

use crate::error::SdkResult;

/// Download name for an archive of `count` cards.
pub fn archive_file_name(count: usize) -> String {
    format!("{count} Player Images.car")
}

/// Build an archive with the default import settings.
pub fn build<I>(payloads: I) -> SdkResult<Archive>
where
    I: IntoIterator<Item = Payload>,
{
    ArchiveBuilder::new().build(payloads)
}

/// Configures and runs the import-then-serialize pipeline.
#[derive(Clone, Debug, Default)]
pub struct ArchiveBuilder {
    config: ImportConfig,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the import settings.
    pub fn config(mut self, config: ImportConfig) -> Self {
        self.config = config;
        self
    }

    /// Split payloads larger than `size` bytes into chunks.
    pub fn max_leaf_size(mut self, size: usize) -> Self {
        self.config.max_leaf_size = size;
        self
    }

    /// Import every payload into a fresh store, then prepare the archive.
    ///
    /// The import runs to completion before any frame exists, so the archive
    /// always sees the finished store. Empty input fails with
    /// [`SdkError::EmptyInput`](crate::SdkError::EmptyInput).
    pub fn build<I>(self, payloads: I) -> SdkResult<Archive>
    where
        I: IntoIterator<Item = Payload>,
    {
        let store = InMemoryBlockStore::new();
        let root = Importer::new(&store, self.config)?.import(payloads)?;
        info!(root = %root, blocks = store.len(), bytes = store.total_bytes(), "archive ready");
        Ok(Archive { root, store })
    }
}

/// A finished archive, ready to stream.
///
/// The archive owns the block store of the run that produced it and only
/// hands out copies of its blocks, so its contents are fixed once built.
/// Dropping the archive, even halfway through streaming, discards the store.
#[derive(Debug)]
pub struct Archive {
    root: ContentId,
    store: InMemoryBlockStore,
}

impl Archive {
    /// The root directory's identifier.
    pub fn root(&self) -> &ContentId {
        &self.root
    }

    /// Number of block frames (leaves, file nodes and the directory).
    pub fn block_count(&self) -> usize {
        self.store.len()
    }

    /// Blocks in archive order.
    pub fn blocks(&self) -> std::vec::IntoIter<Block> {
        self.store.blocks()
    }

    /// Look up one block by identifier.
    pub fn block(&self, id: &ContentId) -> Option<Block> {
        self.store.get(id).map(|data| Block::new(*id, data))
    }

    /// A serializer over this archive's store.
    pub fn writer(&self) -> SdkResult<CarWriter<'_, InMemoryBlockStore>> {
        Ok(CarWriter::new(self.root, &self.store)?)
    }

    /// Lazily encoded frames. Each call starts from the header again.
    pub fn frames(&self) -> SdkResult<Frames> {
        Ok(self.writer()?.frames())
    }

    /// Write the archive. Returns the number of bytes written.
    pub fn write_to<W: Write>(&self, out: W) -> SdkResult<u64> {
        Ok(self.writer()?.write_to(out)?)
    }

    /// The whole archive in memory.
    pub fn into_bytes(self) -> SdkResult<Vec<u8>> {
        Ok(self.writer()?.to_vec())
    }
}
