//! CARv1 archives for rostercar.
//!
//! A CAR ("content addressable archive") is a header naming the root
//! identifier followed by every block of the DAG, each framed with a varint
//! length prefix:
//!
//! - **CarHeader**: dag-cbor `{ roots, version: 1 }`
//! - **CarWriter**: streams a [`BlockStore`](rostercar_store::BlockStore) out as frames
//! - **CarReader**: parses an archive and re-hashes every block against its CID

pub mod error;
pub mod header;
pub mod reader;
pub mod writer;

pub use error::{CarError, CarResult};
pub use header::CarHeader;
pub use reader::{Blocks, CarReader, VerifyReport};
pub use writer::{block_frame, header_frame, CarWriter, Frames};
