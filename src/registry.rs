//! Version registry and switcher descriptors.
//!
//! Формат versions.json:
//! {
//!   "current": "v1.1.0",
//!   "latest": "v1.1.0",
//!   "versions": [
//!     {"version":"v1.1.0","title":"v1.1.0 (current)","url":"/documentation/v1.1.0/",
//!      "is_current":true,"date":"2024-12-19T16:45:00Z","status":"active"},
//!     ...
//!   ]
//! }
//!
//! Формат switcher.json: [{"version":"v1.1.0","url":"...","preferred":true}, ...]
//!
//! Both documents are pure functions of (version list, pointer, dates) and are
//! always written together, in full, via tmp + rename.

use serde::{Deserialize, Serialize};

use crate::config::DocsConfig;
use crate::error::Result;
use crate::util::{format_date, write_json_atomic};
use crate::version::VersionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionStatus {
    Active,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    pub version: String,
    pub title: String,
    pub url: String,
    pub is_current: bool,
    pub date: String,
    pub status: VersionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionsDocument {
    pub current: String,
    pub latest: String,
    pub versions: Vec<VersionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitcherEntry {
    pub version: String,
    pub url: String,
    pub preferred: bool,
}

/// Input row for [`build_versions`]: a version and its resolved creation date.
pub struct DatedVersion {
    pub version: VersionId,
    pub date: chrono::DateTime<chrono::Utc>,
}

/// `versions` must be sorted descending (highest first).
pub fn build_versions(cfg: &DocsConfig, current: &VersionId, versions: &[DatedVersion]) -> VersionsDocument {
    let latest = versions
        .first()
        .map(|d| d.version.to_string())
        .unwrap_or_else(|| current.to_string());

    let entries = versions
        .iter()
        .map(|d| {
            let is_current = d.version == *current;
            VersionEntry {
                version: d.version.to_string(),
                title: if is_current {
                    format!("{} (current)", d.version)
                } else {
                    d.version.to_string()
                },
                url: cfg.version_url(d.version.as_str()),
                is_current,
                date: format_date(&d.date),
                status: if is_current {
                    VersionStatus::Active
                } else {
                    VersionStatus::Archived
                },
            }
        })
        .collect();

    VersionsDocument {
        current: current.to_string(),
        latest,
        versions: entries,
    }
}

/// Projection of the registry; `preferred` marks `latest` only.
pub fn build_switcher(cfg: &DocsConfig, doc: &VersionsDocument) -> Vec<SwitcherEntry> {
    doc.versions
        .iter()
        .map(|e| SwitcherEntry {
            version: e.version.clone(),
            url: cfg.switcher_url(&e.version),
            preferred: e.version == doc.latest,
        })
        .collect()
}

/// Write both descriptors. The switcher is derived here so the two never diverge.
pub fn write_descriptors(cfg: &DocsConfig, doc: &VersionsDocument) -> Result<Vec<SwitcherEntry>> {
    let switcher = build_switcher(cfg, doc);
    write_json_atomic(&cfg.versions_path(), doc)?;
    write_json_atomic(&cfg.switcher_path(), &switcher)?;
    Ok(switcher)
}
