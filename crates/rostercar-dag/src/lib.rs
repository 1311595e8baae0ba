//! UnixFS DAG import for rostercar.
//!
//! Turns an ordered list of named [`Payload`]s into a two-level Merkle DAG:
//! one raw leaf per payload (or a chunked file node for oversized ones),
//! all linked from a single dag-pb directory node whose identifier is the
//! archive root.
//!
//! The node encoding is spelled out here rather than left to defaults:
//! raw leaves, one flat directory, links in input order, no mode or mtime
//! metadata, canonical dag-pb field order. Those choices are what make the
//! root identifier reproducible.

pub mod directory;
pub mod error;
pub mod file;
pub mod importer;
pub mod payload;
pub mod pb;
pub mod unixfs;

pub use directory::{DirectoryEntry, DirectoryNode};
pub use error::{DagError, DagResult};
pub use file::FileNode;
pub use importer::{import, ImportConfig, Importer, DEFAULT_MAX_LEAF_SIZE};
pub use payload::Payload;
pub use pb::{PbLink, PbNode};
pub use unixfs::{DataType, UnixFsData};
