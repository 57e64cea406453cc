//! meta - метаданные версии (.version-meta.json в корне каталога версии).
//!
//! Формат:
//! {
//!   "version": "v1.1.0",
//!   "created": "2024-12-19T16:45:00Z",
//!   "source": "v1.0.0",      // null для синтезированной версии
//!   "message": "Release ..."  // null если не задано
//! }
//!
//! Файл пишется при создании версии и никогда не копируется из исходной.

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VersionError};
use crate::util::{now_utc, write_json_atomic};
use crate::version::VersionId;

pub const META_FILE: &str = ".version-meta.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionMeta {
    pub version: VersionId,
    pub created: DateTime<Utc>,
    pub source: Option<VersionId>,
    pub message: Option<String>,
}

impl VersionMeta {
    pub fn new(version: VersionId, source: Option<VersionId>, message: Option<String>) -> Self {
        Self {
            version,
            created: now_utc(),
            source,
            message,
        }
    }
}

pub fn meta_path(version_dir: &Path) -> std::path::PathBuf {
    version_dir.join(META_FILE)
}

pub fn write_meta(version_dir: &Path, meta: &VersionMeta) -> Result<()> {
    write_json_atomic(&meta_path(version_dir), meta)
}

/// Ok(None) when the directory has no metadata file.
pub fn read_meta(version_dir: &Path) -> Result<Option<VersionMeta>> {
    let p = meta_path(version_dir);
    let bytes = match fs::read(&p) {
        Ok(b) => b,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(VersionError::io(&p, e)),
    };
    let meta = serde_json::from_slice(&bytes).map_err(|e| VersionError::json(&p, e))?;
    Ok(Some(meta))
}
