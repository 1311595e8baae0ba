//! Content-addressed block storage for rostercar.
//!
//! A block store maps [`ContentId`](rostercar_types::ContentId)s to immutable
//! bytes. It is the only place a pipeline run keeps the blocks it produces:
//! the importer writes to it and the archive writer reads it back out.
//!
//! # Storage Backends
//!
//! All backends implement the [`BlockStore`] trait:
//!
//! - [`InMemoryBlockStore`] -- insertion-ordered, `HashMap`-indexed store
//!
//! # Design Rules
//!
//! 1. Blocks are immutable once written (content-addressing guarantees this).
//! 2. A block is only accepted if its identifier matches its bytes.
//! 3. Enumeration follows insertion order; re-inserting never moves a block.
//! 4. The store never interprets block contents.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryBlockStore;
pub use traits::BlockStore;
