//! Foundation types for rostercar.
//!
//! Every other rostercar crate depends on `rostercar-types`. It defines how a
//! block is named ([`ContentId`]), what a block is ([`Block`]), and the
//! unsigned LEB128 varints shared by the dag-pb and CAR encodings.
//!
//! # Key Types
//!
//! - [`ContentId`]: CIDv1 over a sha2-256 multihash, tagged with a [`BlockCodec`]
//! - [`BlockCodec`]: `raw` leaves vs. `dag-pb` nodes
//! - [`Block`]: immutable bytes paired with their identifier

pub mod block;
pub mod cid;
pub mod error;
pub mod varint;

pub use block::Block;
pub use cid::{BlockCodec, ContentId, SHA2_256};
pub use error::TypeError;
