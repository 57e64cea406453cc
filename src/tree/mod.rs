//! tree - операции над деревом каталога версии.
//!
//! - clone_tree(): клон через staging-каталог + rename (ничего не остаётся при сбое);
//! - count_files(): статистика документов для list();
//! - diff_trees(): сравнение двух версий по относительным путям.
//!
//! Staging: <docs_root>/.staging-<name>-<pid>. Имя начинается с точки и
//! не проходит VersionId::is_version_name, так что list() его не видит.

pub mod diff;
pub mod rewrite;

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::error::{io_at, Result, VersionError};
use crate::meta::{write_meta, VersionMeta, META_FILE};

pub use diff::{diff_trees, TreeDiff};
pub use rewrite::{NoRewrite, TextRewrite, VersionRefRewriter};

pub const STAGING_PREFIX: &str = ".staging-";

/// Decides which files go through the rewrite step.
pub type RewriteFilter<'a> = &'a dyn Fn(&Path) -> bool;

/// Clone `src` into `<docs_root>/<name>`, writing `meta` into the copy before it
/// becomes visible.
///
/// Errors if the target exists. On any failure the staging directory is
/// removed and the target never appears.
pub fn clone_tree(
    src: &Path,
    docs_root: &Path,
    name: &str,
    meta: Option<&VersionMeta>,
    rewriter: &dyn TextRewrite,
    filter: RewriteFilter<'_>,
) -> Result<PathBuf> {
    let target = docs_root.join(name);
    if target.exists() {
        return Err(VersionError::AlreadyExists {
            version: name.to_string(),
        });
    }
    let staging = staging_dir(docs_root, name);
    if staging.exists() {
        fs::remove_dir_all(&staging).map_err(io_at(&staging))?;
    }

    let res = copy_into(src, &staging, rewriter, filter).and_then(|files| {
        if let Some(m) = meta {
            write_meta(&staging, m)?;
        }
        fs::rename(&staging, &target).map_err(io_at(&target))?;
        Ok(files)
    });

    match res {
        Ok(files) => {
            debug!(
                "tree: cloned {} -> {} ({} file(s))",
                src.display(),
                target.display(),
                files
            );
            Ok(target)
        }
        Err(e) => {
            if staging.exists() {
                if let Err(rm) = fs::remove_dir_all(&staging) {
                    warn!("tree: failed to remove staging {}: {}", staging.display(), rm);
                }
            }
            Err(e)
        }
    }
}

pub fn staging_dir(docs_root: &Path, name: &str) -> PathBuf {
    docs_root.join(format!("{}{}-{}", STAGING_PREFIX, name, std::process::id()))
}

/// Remove `.staging-*` leftovers of interrupted clones. Returns how many were removed.
pub fn purge_staging(docs_root: &Path) -> Result<usize> {
    let rd = match fs::read_dir(docs_root) {
        Ok(rd) => rd,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(VersionError::io(docs_root, e)),
    };
    let mut removed = 0;
    for entry in rd {
        let entry = entry.map_err(io_at(docs_root))?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with(STAGING_PREFIX) {
            let p = entry.path();
            fs::remove_dir_all(&p).map_err(io_at(&p))?;
            warn!("tree: removed stale staging dir {}", p.display());
            removed += 1;
        }
    }
    Ok(removed)
}

fn copy_into(
    src: &Path,
    dst: &Path,
    rewriter: &dyn TextRewrite,
    filter: RewriteFilter<'_>,
) -> Result<u64> {
    fs::create_dir_all(dst).map_err(io_at(dst))?;
    let mut files = 0u64;

    for entry in WalkDir::new(src).follow_links(false).min_depth(1) {
        let entry = entry.map_err(|e| walk_err(src, e))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| VersionError::io(entry.path(), std::io::ErrorKind::InvalidInput.into()))?;
        if entry.depth() == 1 && rel == Path::new(META_FILE) {
            continue;
        }
        let out = dst.join(rel);
        let ft = entry.file_type();

        if ft.is_dir() {
            fs::create_dir_all(&out).map_err(io_at(&out))?;
        } else if ft.is_symlink() {
            copy_symlink(entry.path(), &out)?;
        } else {
            copy_file(entry.path(), rel, &out, rewriter, filter)?;
            files += 1;
        }
    }
    Ok(files)
}

fn copy_file(
    from: &Path,
    rel: &Path,
    to: &Path,
    rewriter: &dyn TextRewrite,
    filter: RewriteFilter<'_>,
) -> Result<()> {
    if filter(rel) {
        let bytes = fs::read(from).map_err(io_at(from))?;
        match String::from_utf8(bytes) {
            Ok(text) => {
                let data = match rewriter.rewrite(rel, &text)? {
                    Some(new_text) => new_text,
                    None => text,
                };
                fs::write(to, data).map_err(io_at(to))?;
            }
            Err(e) => {
                warn!("tree: {} is not UTF-8, copied without rewrite", rel.display());
                fs::write(to, e.into_bytes()).map_err(io_at(to))?;
            }
        }
    } else {
        fs::copy(from, to).map_err(io_at(to))?;
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(from: &Path, to: &Path) -> Result<()> {
    let target = fs::read_link(from).map_err(io_at(from))?;
    std::os::unix::fs::symlink(&target, to).map_err(io_at(to))
}

#[cfg(not(unix))]
fn copy_symlink(from: &Path, to: &Path) -> Result<()> {
    // без поддержки symlink копируем содержимое цели
    fs::copy(from, to).map_err(io_at(to))?;
    Ok(())
}

pub(crate) fn walk_err(root: &Path, e: walkdir::Error) -> VersionError {
    let path = e.path().unwrap_or(root).to_path_buf();
    let io = e
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop"));
    VersionError::Io { path, source: io }
}

/// Document counts of a version tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileCounts {
    pub rst: u64,
    pub md: u64,
    pub other: u64,
}

impl FileCounts {
    pub fn total(&self) -> u64 {
        self.rst + self.md + self.other
    }
}

pub fn count_files(root: &Path) -> Result<FileCounts> {
    let mut c = FileCounts::default();
    for entry in WalkDir::new(root).follow_links(false).min_depth(1) {
        let entry = entry.map_err(|e| walk_err(root, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.depth() == 1 && entry.file_name() == META_FILE {
            continue;
        }
        match entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("rst") => c.rst += 1,
            Some("md") => c.md += 1,
            _ => c.other += 1,
        }
    }
    Ok(c)
}
