//! Hashing for rostercar.
//!
//! Derives codec-tagged sha2-256 content identifiers and verifies blocks
//! against them. All hashing wraps the `sha2` crate.

pub mod hasher;

pub use hasher::ContentHasher;
