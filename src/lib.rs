//! Stylus: music library snapshot and drift detection
//!
//! Maintains a persisted snapshot of a music library directory tree,
//! detects when the tree has drifted from the snapshot via cheap content
//! fingerprints, and groups discovered audio files by album artist.

pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod library;
pub mod logging;
pub mod metadata;
pub mod store;
pub mod tree;
