//! Line-oriented shell over [`arbor_vfs::FileSystem`].

pub mod commands;
pub mod config;
pub mod error;
pub mod parser;
pub mod shell;

pub use error::ShellError;
pub use shell::Shell;
