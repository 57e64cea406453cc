//! manager/list - перечень версий.
//!
//! Listing хранит только отсортированные идентификаторы; сводки (счётчики
//! файлов, даты) вычисляются лениво при итерации. iter() можно вызывать
//! повторно - каждый проход начинается заново.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::pointer::CurrentPointer;
use crate::tree::count_files;
use crate::version::VersionId;

use super::core::VersionManager;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionSummary {
    pub version: VersionId,
    pub is_current: bool,
    pub is_latest: bool,
    pub rst_files: u64,
    pub md_files: u64,
    pub other_files: u64,
    pub created: DateTime<Utc>,
    pub path: PathBuf,
}

pub struct Listing<'a> {
    mgr: &'a VersionManager,
    versions: Vec<VersionId>,
    current: VersionId,
    tags: Option<HashMap<String, DateTime<Utc>>>,
}

impl<'a> Listing<'a> {
    pub fn current(&self) -> &VersionId {
        &self.current
    }

    pub fn latest(&self) -> Option<&VersionId> {
        self.versions.first()
    }

    /// Identifiers, highest first.
    pub fn versions(&self) -> &[VersionId] {
        &self.versions
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Result<VersionSummary>> + '_ {
        self.versions
            .iter()
            .enumerate()
            .map(move |(i, v)| self.summarize(v, i == 0))
    }

    fn summarize(&self, v: &VersionId, is_latest: bool) -> Result<VersionSummary> {
        let path = self.mgr.cfg.version_dir(v.as_str());
        let counts = count_files(&path)?;
        let created = self.mgr.version_date(v, self.tags.as_ref())?;
        Ok(VersionSummary {
            version: v.clone(),
            is_current: *v == self.current,
            is_latest,
            rst_files: counts.rst,
            md_files: counts.md,
            other_files: counts.other,
            created,
            path,
        })
    }
}

impl<'l, 'a> IntoIterator for &'l Listing<'a> {
    type Item = Result<VersionSummary>;
    type IntoIter = Box<dyn Iterator<Item = Result<VersionSummary>> + 'l>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl VersionManager {
    pub fn list(&self, pointer: &CurrentPointer) -> Result<Listing<'_>> {
        Ok(Listing {
            mgr: self,
            versions: self.versions()?,
            current: pointer.version().clone(),
            tags: self.tag_dates(),
        })
    }
}
