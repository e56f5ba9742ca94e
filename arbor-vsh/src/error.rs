use arbor_vfs::FsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Fs(#[from] FsError),
    #[error("Invalid Command")]
    UnknownCommand(String),
    #[error("Invalid arguments")]
    InvalidArguments(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShellError {
    pub fn code(&self) -> &str {
        match self {
            Self::Fs(e) => e.code(),
            Self::UnknownCommand(_) => "SHELL_UNKNOWN_COMMAND",
            Self::InvalidArguments(_) => "SHELL_INVALID_ARGUMENTS",
            Self::Io(_) => "SHELL_IO_ERROR",
        }
    }

    /// Usage mistakes are echoed on stdout as a bare message; everything
    /// else goes to stderr with an `Error:` prefix.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::UnknownCommand(_) | Self::InvalidArguments(_))
    }

    pub fn is_rejection(&self) -> bool {
        match self {
            Self::Fs(e) => e.is_rejection(),
            Self::UnknownCommand(_) | Self::InvalidArguments(_) => true,
            Self::Io(_) => false,
        }
    }
}
