//! pointer - персистентный указатель текущей версии.
//!
//! Файл: <docs_root>/current_version.txt, одна строка с идентификатором.
//! Запись атомарная (tmp + rename). Значение загружается вызывающей стороной
//! явно и передаётся в операции менеджера как `&mut CurrentPointer`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Result, VersionError};
use crate::util::write_atomic;
use crate::version::VersionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentPointer {
    path: PathBuf,
    version: VersionId,
}

impl CurrentPointer {
    pub fn new(path: &Path, version: VersionId) -> Self {
        Self {
            path: path.to_path_buf(),
            version,
        }
    }

    /// Ok(None) if the file is absent or holds something that is not a version.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let text = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(VersionError::io(path, e)),
        };
        match VersionId::parse(text.trim()) {
            Ok(version) => Ok(Some(Self::new(path, version))),
            Err(e) => {
                log::warn!("pointer: ignoring {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    pub fn store(&self) -> Result<()> {
        write_atomic(&self.path, self.version.as_str().as_bytes())
    }

    /// Update in memory and persist.
    pub fn set(&mut self, version: VersionId) -> Result<()> {
        self.version = version;
        self.store()
    }

    pub fn version(&self) -> &VersionId {
        &self.version
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is(&self, version: &VersionId) -> bool {
        self.version == *version
    }
}
