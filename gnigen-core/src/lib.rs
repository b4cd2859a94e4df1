//! Core collaborators for the gnigen GNI exporter.
//!
//! The exporter never touches the disk or spawns processes directly. It talks
//! to a [`FileSystem`] and a [`QueryCommand`], both defined here together with
//! their OS-backed implementations.

mod file;
mod query;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// File operations
pub use file::{FileSystem, OsFileSystem, join_workspace_path};
// Build-graph queries
pub use query::{BazelQuery, FileQuery, QueryCommand};
