//! vcs - внешний инструмент контроля версий (git).
//!
//! Используется только для:
//! - создания аннотированного тега версии (+ опциональный push);
//! - получения дат тегов (DateSource::GitTags).
//!
//! Все ошибки возвращаются как VersionError::ExternalTool; мутирующие операции
//! менеджера понижают их до предупреждений.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};
use log::debug;

use crate::error::{Result, VersionError};

pub trait VersionControl {
    fn create_tag(&self, tag: &str, message: &str) -> Result<()>;

    fn push_tag(&self, tag: &str, remote: &str) -> Result<()>;

    /// Tag name -> tag creation date.
    fn tag_dates(&self) -> Result<HashMap<String, DateTime<Utc>>>;
}

/// Shells out to the `git` binary in `repo_root`.
pub struct GitCli {
    repo_root: PathBuf,
}

impl GitCli {
    pub fn new(repo_root: &Path) -> Self {
        Self {
            repo_root: repo_root.to_path_buf(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        debug!("vcs: git {}", args.join(" "));
        let out = Command::new("git")
            .args(args)
            .current_dir(&self.repo_root)
            .output()
            .map_err(|e| VersionError::tool("git", format!("failed to run git: {e}")))?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(VersionError::tool(
                "git",
                format!("git {} exited with {}: {}", args.join(" "), out.status, stderr.trim()),
            ));
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}

impl VersionControl for GitCli {
    fn create_tag(&self, tag: &str, message: &str) -> Result<()> {
        self.run(&["tag", "-a", tag, "-m", message]).map(|_| ())
    }

    fn push_tag(&self, tag: &str, remote: &str) -> Result<()> {
        self.run(&["push", remote, tag]).map(|_| ())
    }

    fn tag_dates(&self) -> Result<HashMap<String, DateTime<Utc>>> {
        let out = self.run(&[
            "for-each-ref",
            "refs/tags",
            "--format=%(refname:short) %(creatordate:iso-strict)",
        ])?;
        Ok(parse_tag_dates(&out))
    }
}

/// Parse `<tag> <iso-strict date>` lines; malformed lines are skipped.
pub fn parse_tag_dates(out: &str) -> HashMap<String, DateTime<Utc>> {
    let mut map = HashMap::new();
    for line in out.lines() {
        let Some((tag, date)) = line.trim().split_once(' ') else {
            continue;
        };
        if let Ok(d) = DateTime::parse_from_rfc3339(date.trim()) {
            map.insert(tag.to_string(), d.with_timezone(&Utc));
        }
    }
    map
}

/// For trees that are not under version control.
pub struct NoVcs;

impl VersionControl for NoVcs {
    fn create_tag(&self, _tag: &str, _message: &str) -> Result<()> {
        Err(VersionError::tool("vcs", "version control is disabled"))
    }

    fn push_tag(&self, _tag: &str, _remote: &str) -> Result<()> {
        Err(VersionError::tool("vcs", "version control is disabled"))
    }

    fn tag_dates(&self) -> Result<HashMap<String, DateTime<Utc>>> {
        Ok(HashMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_for_each_ref_output() {
        let out = "v1.0.0 2024-12-19T16:45:00+00:00\nv1.1.0 2025-01-02T10:00:00+02:00\ngarbage\nv2 notadate\n";
        let m = parse_tag_dates(out);
        assert_eq!(m.len(), 2);
        assert_eq!(m["v1.1.0"].to_rfc3339(), "2025-01-02T08:00:00+00:00");
    }

    #[test]
    fn no_vcs_refuses_tags() {
        let e = NoVcs.create_tag("v1.0.0", "x").unwrap_err();
        assert!(matches!(e, VersionError::ExternalTool { .. }));
        assert!(NoVcs.tag_dates().unwrap().is_empty());
    }
}
