//! In-memory directory tree behind the arbor shell.
//!
//! [`FileSystem`] owns a [`tree::Tree`] of files and directories plus a
//! working directory, and exposes navigation, CRUD, copy/move, substring
//! search and JSON export. Nothing here touches the host file system.

pub mod error;
pub mod export;
pub mod fs;
pub mod node;
pub mod path;
pub mod search;
pub mod tree;

pub use error::FsError;
pub use fs::FileSystem;
pub use node::NodeKind;
