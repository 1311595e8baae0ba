//! High-level rostercar API.
//!
//! [`build`] runs the whole pipeline: import the payloads into a fresh block
//! store, then stream that store out as a CARv1 archive. This is the main
//! entry point for applications exporting a roster of cards.

pub mod archive;
pub mod error;

pub use archive::{archive_file_name, build, Archive, ArchiveBuilder};
pub use error::{SdkError, SdkResult};

// Re-export key types
pub use rostercar_car::{CarReader, CarWriter, Frames, VerifyReport};
pub use rostercar_dag::{ImportConfig, Payload};
pub use rostercar_types::{Block, BlockCodec, ContentId};
