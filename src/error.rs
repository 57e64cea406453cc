//! error - таксономия ошибок менеджера версий.
//!
//! Классы (для кодов выхода CLI):
//! - Usage: некорректный идентификатор версии;
//! - State: AlreadyExists / NotFound / SourceNotFound / CannotDeleteCurrent / NotInitialized;
//! - Io: ошибки файловой системы, JSON и (фатальные) ошибки внешних инструментов.
//!
//! ExternalTool в мутирующих операциях понижается до предупреждения (см. manager::create).

use std::io;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, VersionError>;

#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    #[error("invalid version identifier '{input}': {reason}")]
    InvalidVersion { input: String, reason: String },

    #[error("version {version} already exists")]
    AlreadyExists { version: String },

    #[error("version {version} does not exist")]
    NotFound { version: String },

    #[error("source version {version} does not exist")]
    SourceNotFound { version: String },

    #[error("cannot delete current version {version}; use --force or switch to another version first")]
    CannotDeleteCurrent { version: String },

    #[error("documentation root {} is not initialized", path.display())]
    NotInitialized { path: PathBuf },

    #[error("i/o error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("json error at {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{tool}: {detail}")]
    ExternalTool { tool: String, detail: String },
}

/// Bucket used by the CLI to pick an exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Usage,
    State,
    Io,
}

impl ErrorClass {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorClass::Usage => 2,
            ErrorClass::State => 3,
            ErrorClass::Io => 4,
        }
    }
}

impl VersionError {
    pub fn class(&self) -> ErrorClass {
        match self {
            VersionError::InvalidVersion { .. } => ErrorClass::Usage,
            VersionError::AlreadyExists { .. }
            | VersionError::NotFound { .. }
            | VersionError::SourceNotFound { .. }
            | VersionError::CannotDeleteCurrent { .. }
            | VersionError::NotInitialized { .. } => ErrorClass::State,
            VersionError::Io { .. }
            | VersionError::Json { .. }
            | VersionError::ExternalTool { .. } => ErrorClass::Io,
        }
    }

    pub fn io(path: &Path, source: io::Error) -> Self {
        VersionError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn json(path: &Path, source: serde_json::Error) -> Self {
        VersionError::Json {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn tool<T: Into<String>, D: Into<String>>(tool: T, detail: D) -> Self {
        VersionError::ExternalTool {
            tool: tool.into(),
            detail: detail.into(),
        }
    }
}

/// `.map_err(io_at(path))` shorthand.
pub(crate) fn io_at(path: &Path) -> impl FnOnce(io::Error) -> VersionError + '_ {
    move |e| VersionError::io(path, e)
}
