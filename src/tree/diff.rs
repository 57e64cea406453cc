//! Comparison of two version trees by relative file path and content.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::error::{io_at, Result};
use crate::meta::META_FILE;

use super::walk_err;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeDiff {
    pub only_in_a: Vec<PathBuf>,
    pub only_in_b: Vec<PathBuf>,
    pub changed: Vec<PathBuf>,
    pub unchanged: u64,
}

impl TreeDiff {
    pub fn is_identical(&self) -> bool {
        self.only_in_a.is_empty() && self.only_in_b.is_empty() && self.changed.is_empty()
    }
}

/// Paths in the result are sorted and relative to the tree roots.
pub fn diff_trees(a: &Path, b: &Path) -> Result<TreeDiff> {
    let files_a = list_files(a)?;
    let mut files_b = list_files(b)?;
    let mut diff = TreeDiff::default();

    for (rel, len_a) in files_a {
        match files_b.remove(&rel) {
            None => diff.only_in_a.push(rel),
            Some(len_b) => {
                if len_a != len_b || !same_content(&a.join(&rel), &b.join(&rel))? {
                    diff.changed.push(rel);
                } else {
                    diff.unchanged += 1;
                }
            }
        }
    }
    diff.only_in_b = files_b.into_keys().collect();
    Ok(diff)
}

fn list_files(root: &Path) -> Result<BTreeMap<PathBuf, u64>> {
    let mut out = BTreeMap::new();
    for entry in WalkDir::new(root).follow_links(false).min_depth(1) {
        let entry = entry.map_err(|e| walk_err(root, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.depth() == 1 && entry.file_name() == META_FILE {
            continue;
        }
        let len = entry.metadata().map(|m| m.len()).unwrap_or(0);
        if let Ok(rel) = entry.path().strip_prefix(root) {
            out.insert(rel.to_path_buf(), len);
        }
    }
    Ok(out)
}

fn same_content(a: &Path, b: &Path) -> Result<bool> {
    let da = fs::read(a).map_err(io_at(a))?;
    let db = fs::read(b).map_err(io_at(b))?;
    Ok(da == db)
}
