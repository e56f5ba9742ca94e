use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid option: {0}")]
    InvalidOption(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Directory '{0}' already exists")]
    DirectoryAlreadyExists(String),
    #[error("Directory '{0}' does not exist")]
    DirectoryDoesNotExist(String),
    #[error("File '{0}' already exists")]
    FileAlreadyExists(String),
    #[error("File '{0}' does not exist")]
    FileDoesNotExist(String),
    #[error("Directory '{0}' is not empty")]
    DirectoryNotEmpty(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FsError {
    pub fn code(&self) -> &str {
        match self {
            Self::InvalidPath(_) => "FS_INVALID_PATH",
            Self::InvalidName(_) => "FS_INVALID_NAME",
            Self::InvalidOption(_) => "FS_INVALID_OPTION",
            Self::InvalidOperation(_) => "FS_INVALID_OPERATION",
            Self::DirectoryAlreadyExists(_) => "FS_DIRECTORY_EXISTS",
            Self::DirectoryDoesNotExist(_) => "FS_DIRECTORY_NOT_FOUND",
            Self::FileAlreadyExists(_) => "FS_FILE_EXISTS",
            Self::FileDoesNotExist(_) => "FS_FILE_NOT_FOUND",
            Self::DirectoryNotEmpty(_) => "FS_NOT_EMPTY",
            Self::Json(_) => "FS_JSON_ERROR",
        }
    }

    /// True for failures caused by the request rather than by serialization.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Json(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_shell_output() {
        assert_eq!(
            FsError::DirectoryAlreadyExists("a".into()).to_string(),
            "Directory 'a' already exists"
        );
        assert_eq!(
            FsError::InvalidPath("x is not a directory".into()).to_string(),
            "Invalid path: x is not a directory"
        );
        assert_eq!(
            FsError::DirectoryNotEmpty("d".into()).to_string(),
            "Directory 'd' is not empty"
        );
    }

    #[test]
    fn codes_are_distinct_per_variant() {
        assert_eq!(FsError::InvalidName(String::new()).code(), "FS_INVALID_NAME");
        assert_eq!(FsError::FileDoesNotExist("f".into()).code(), "FS_FILE_NOT_FOUND");
        assert!(FsError::InvalidOption("-x".into()).is_rejection());
    }
}
