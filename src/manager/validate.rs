//! manager/validate - проверка структуры версии.
//!
//! Проверки:
//! - каждый обязательный раздел существует;
//! - в каждом есть index-документ (любой файл index.*);
//! - .rst/.md документы декодируются как UTF-8.
//! Проблемы содержимого собираются в отчёт; ошибкой завершаются только I/O сбои.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;
use walkdir::WalkDir;

use crate::error::{io_at, Result};
use crate::pointer::CurrentPointer;
use crate::tree::walk_err;
use crate::version::VersionId;

use super::core::VersionManager;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    MissingSection { path: PathBuf },
    MissingIndex { path: PathBuf },
    UndecodableDocument { path: PathBuf },
}

impl ValidationIssue {
    /// Path relative to the version root.
    pub fn path(&self) -> &Path {
        match self {
            ValidationIssue::MissingSection { path }
            | ValidationIssue::MissingIndex { path }
            | ValidationIssue::UndecodableDocument { path } => path,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingSection { path } => {
                write!(f, "missing required folder: {}", path.display())
            }
            ValidationIssue::MissingIndex { path } => {
                write!(f, "missing index document: {}", path.display())
            }
            ValidationIssue::UndecodableDocument { path } => {
                write!(f, "document is not valid UTF-8: {}", path.display())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub version: VersionId,
    pub passed: bool,
    pub issues: Vec<ValidationIssue>,
}

impl VersionManager {
    /// Validate `version`, or the current one when None.
    pub fn validate(
        &self,
        pointer: &CurrentPointer,
        version: Option<&str>,
    ) -> Result<ValidationReport> {
        let version = match version {
            Some(s) => VersionId::parse(s)?,
            None => pointer.version().clone(),
        };
        self.require(&version)?;
        let root = self.cfg.version_dir(version.as_str());
        let mut issues = Vec::new();

        for section in &self.cfg.required_sections {
            let dir = root.join(section);
            if !dir.is_dir() {
                issues.push(ValidationIssue::MissingSection {
                    path: PathBuf::from(section),
                });
            } else if !has_index(&dir)? {
                issues.push(ValidationIssue::MissingIndex {
                    path: Path::new(section).join("index"),
                });
            }
        }

        for entry in WalkDir::new(&root).follow_links(false).min_depth(1) {
            let entry = entry.map_err(|e| walk_err(&root, e))?;
            if !entry.file_type().is_file() || !is_document(entry.path()) {
                continue;
            }
            let bytes = fs::read(entry.path()).map_err(io_at(entry.path()))?;
            if std::str::from_utf8(&bytes).is_err() {
                let rel = entry.path().strip_prefix(&root).unwrap_or(entry.path());
                issues.push(ValidationIssue::UndecodableDocument {
                    path: rel.to_path_buf(),
                });
            }
        }

        debug!("validate: {} issue(s) in {}", issues.len(), version);
        Ok(ValidationReport {
            version,
            passed: issues.is_empty(),
            issues,
        })
    }
}

fn has_index(dir: &Path) -> Result<bool> {
    for entry in fs::read_dir(dir).map_err(io_at(dir))? {
        let entry = entry.map_err(io_at(dir))?;
        let p = entry.path();
        if p.is_file() && p.file_stem().map(|s| s == "index").unwrap_or(false) {
            return Ok(true);
        }
    }
    Ok(false)
}

fn is_document(p: &Path) -> bool {
    matches!(
        p.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()).as_deref(),
        Some("rst") | Some("md")
    )
}
