//! manager/core - структура VersionManager и общие хелперы.
//!
//! - versions(): каталоги <docs_root>/<vX.Y.Z>, отсортированные по убыванию;
//! - version_date(): дата версии согласно DateSource;
//! - regenerate_descriptors(): versions.json + switcher.json, всегда вместе.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::config::{DateSource, DocsConfig};
use crate::error::{Result, VersionError};
use crate::meta::read_meta;
use crate::pointer::CurrentPointer;
use crate::registry::{build_versions, write_descriptors, DatedVersion, SwitcherEntry, VersionsDocument};
use crate::util::mtime_of;
use crate::vcs::{GitCli, VersionControl};
use crate::version::VersionId;

/// Result of a descriptor regeneration: exactly what was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptors {
    pub versions: VersionsDocument,
    pub switcher: Vec<SwitcherEntry>,
}

pub struct VersionManager {
    pub(crate) cfg: DocsConfig,
    pub(crate) vcs: Box<dyn VersionControl>,
}

impl VersionManager {
    /// Config from env, rooted at `repo_root`, git as the version-control tool.
    pub fn open(repo_root: &Path) -> Self {
        Self::open_with_config(DocsConfig::from_env().with_repo_root(repo_root))
    }

    pub fn open_with_config(cfg: DocsConfig) -> Self {
        let vcs = Box::new(GitCli::new(&cfg.repo_root));
        Self { cfg, vcs }
    }

    /// Replace the version-control collaborator.
    pub fn with_vcs(mut self, vcs: Box<dyn VersionControl>) -> Self {
        self.vcs = vcs;
        self
    }

    pub fn config(&self) -> &DocsConfig {
        &self.cfg
    }

    /// Load the persisted pointer of an initialized root.
    pub fn load_pointer(&self) -> Result<CurrentPointer> {
        match CurrentPointer::load(&self.cfg.pointer_path())? {
            Some(p) => Ok(p),
            None => Err(VersionError::NotInitialized {
                path: self.cfg.docs_root(),
            }),
        }
    }

    /// All version directories, highest first.
    pub fn versions(&self) -> Result<Vec<VersionId>> {
        let root = self.cfg.docs_root();
        let rd = match fs::read_dir(&root) {
            Ok(rd) => rd,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(VersionError::io(&root, e)),
        };
        let mut out = Vec::new();
        for entry in rd {
            let entry = entry.map_err(|e| VersionError::io(&root, e))?;
            if !is_version_dir(&entry.path()) {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if VersionId::is_version_name(name) {
                out.push(VersionId::parse(name)?);
            }
        }
        out.sort_by(|a, b| b.cmp(a));
        Ok(out)
    }

    pub fn exists(&self, version: &VersionId) -> bool {
        is_version_dir(&self.cfg.version_dir(version.as_str()))
    }

    pub(crate) fn require(&self, version: &VersionId) -> Result<()> {
        if self.exists(version) {
            Ok(())
        } else {
            Err(VersionError::NotFound {
                version: version.to_string(),
            })
        }
    }

    /// Tag dates when the date source asks for them; tool failures fall back silently.
    pub(crate) fn tag_dates(&self) -> Option<HashMap<String, DateTime<Utc>>> {
        if self.cfg.date_source != DateSource::GitTags {
            return None;
        }
        match self.vcs.tag_dates() {
            Ok(m) => Some(m),
            Err(e) => {
                warn!("dates: tag history unavailable, using metadata: {e}");
                None
            }
        }
    }

    pub(crate) fn version_date(
        &self,
        version: &VersionId,
        tags: Option<&HashMap<String, DateTime<Utc>>>,
    ) -> Result<DateTime<Utc>> {
        let dir = self.cfg.version_dir(version.as_str());
        if let Some(d) = tags.and_then(|t| t.get(version.as_str())) {
            return Ok(*d);
        }
        if self.cfg.date_source == DateSource::Filesystem {
            return mtime_of(&dir);
        }
        match read_meta(&dir) {
            Ok(Some(m)) => Ok(m.created),
            Ok(None) => mtime_of(&dir),
            Err(e) => {
                warn!("dates: unreadable metadata for {version}: {e}");
                mtime_of(&dir)
            }
        }
    }

    /// Rebuild both descriptors from the directory tree and the pointer.
    pub fn regenerate_descriptors(&self, pointer: &CurrentPointer) -> Result<Descriptors> {
        let versions = self.versions()?;
        let tags = self.tag_dates();
        let mut dated = Vec::with_capacity(versions.len());
        for v in versions {
            let date = self.version_date(&v, tags.as_ref())?;
            dated.push(DatedVersion { version: v, date });
        }
        let doc = build_versions(&self.cfg, pointer.version(), &dated);
        let switcher = write_descriptors(&self.cfg, &doc)?;
        debug!(
            "descriptors: {} version(s), current={}, latest={}",
            doc.versions.len(),
            doc.current,
            doc.latest
        );
        Ok(Descriptors {
            versions: doc,
            switcher,
        })
    }
}

/// Shared by versions() and exists(): symlinked version directories count as versions.
fn is_version_dir(p: &Path) -> bool {
    p.is_dir()
}
