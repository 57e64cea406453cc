//! skeleton - синтез первой версии документации (v1.0.0).
//!
//! Структура:
//!   <docs_root>/v1.0.0/index.rst
//!   <docs_root>/v1.0.0/<section>/index.rst   (для каждого skeleton_sections)
//!   <docs_root>/v1.0.0/.version-meta.json
//!
//! Сборка идёт через staging-каталог, как и клон (см. tree).

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::DocsConfig;
use crate::error::{io_at, Result, VersionError};
use crate::meta::{write_meta, VersionMeta};
use crate::tree::staging_dir;
use crate::util::now_utc;
use crate::version::VersionId;

pub const INITIAL_VERSION: &str = "v1.0.0";

pub fn initial_version() -> Result<VersionId> {
    VersionId::parse(INITIAL_VERSION)
}

/// "api-reference" -> "Api Reference"
pub fn section_title(section: &str) -> String {
    section
        .split(|c| c == '-' || c == '_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut cs = w.chars();
            match cs.next() {
                Some(f) => f.to_uppercase().chain(cs).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn underline(title: &str, ch: char) -> String {
    std::iter::repeat(ch).take(title.chars().count()).collect()
}

pub fn section_index(title: &str, version: &VersionId) -> String {
    format!(
        "{title}\n{rule}\n\n\
         Welcome to the {title} section.\n\n\
         .. toctree::\n   :maxdepth: 2\n   :caption: Contents:\n\n\
         Getting Started\n---------------\n\n\
         This section contains guides for {lower}.\n\n\
         .. note::\n   This documentation is version-controlled. You're viewing version {version}.\n",
        rule = underline(title, '='),
        lower = title.to_lowercase(),
    )
}

pub fn main_index(project: &str, version: &VersionId, sections: &[String]) -> String {
    let title = format!("{project} - {version}");
    let mut toc = String::new();
    for s in sections {
        toc.push_str(&format!("   {s}/index\n"));
    }
    format!(
        "{title}\n{rule}\n\n\
         Welcome to the {project}.\n\n\
         .. toctree::\n   :maxdepth: 2\n   :caption: Documentation Sections:\n\n\
         {toc}\n\
         Version Information\n-------------------\n\n\
         You are currently viewing documentation for **{version}**.\n\n\
         * Release Date: {date}\n\
         * Status: Active\n",
        rule = underline(&title, '='),
        date = now_utc().format("%Y-%m-%d"),
    )
}

/// Write the skeleton for `version` under the docs root. Errors if it exists.
pub fn synthesize(cfg: &DocsConfig, version: &VersionId) -> Result<PathBuf> {
    let docs_root = cfg.docs_root();
    let target = docs_root.join(version.as_str());
    if target.exists() {
        return Err(VersionError::AlreadyExists {
            version: version.to_string(),
        });
    }
    let staging = staging_dir(&docs_root, version.as_str());
    let res = write_skeleton(cfg, &staging, version)
        .and_then(|_| fs::rename(&staging, &target).map_err(io_at(&target)));
    if let Err(e) = res {
        if staging.exists() {
            if let Err(rm) = fs::remove_dir_all(&staging) {
                warn!("skeleton: failed to remove staging {}: {}", staging.display(), rm);
            }
        }
        return Err(e);
    }
    info!(
        "skeleton: created {} with {} section(s)",
        target.display(),
        cfg.skeleton_sections.len()
    );
    Ok(target)
}

fn write_skeleton(cfg: &DocsConfig, root: &Path, version: &VersionId) -> Result<()> {
    for section in &cfg.skeleton_sections {
        let dir = root.join(section);
        fs::create_dir_all(&dir).map_err(io_at(&dir))?;
        let index = dir.join("index.rst");
        fs::write(&index, section_index(&section_title(section), version)).map_err(io_at(&index))?;
    }
    let main = root.join("index.rst");
    fs::write(&main, main_index(&cfg.project_title, version, &cfg.skeleton_sections))
        .map_err(io_at(&main))?;
    write_meta(root, &VersionMeta::new(version.clone(), None, None))
}
