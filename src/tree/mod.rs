//! Snapshot tree
//!
//! The persisted model of a music library directory tree: folders carry a
//! fingerprint of their immediate contents, files carry their byte size and
//! extracted tags. The builder materializes the tree from the filesystem and
//! the scanner re-checks a persisted tree against it.

pub mod builder;
pub mod fingerprint;
pub mod node;
pub mod path;
pub mod scanner;
