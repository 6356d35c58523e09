use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the name list, folder listing, operation log and rename engine.
#[derive(Error, Debug)]
pub enum RenameError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("A file with that name already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Invalid file name: '{0}'")]
    InvalidName(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Parse error in {} at line {line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

impl RenameError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Short machine-friendly name of the error kind, used in JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::AlreadyExists(_) => "already_exists",
            Self::InvalidName(_) => "invalid_name",
            Self::Io { .. } => "io",
            Self::Parse { .. } => "parse",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists(_))
    }
}

pub type Result<T> = std::result::Result<T, RenameError>;
