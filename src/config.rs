//! Centralized configuration for the version manager.
//!
//! Goals:
//! - Single place to collect tunables instead of scattering env lookups.
//! - DocsConfig::from_env() reads DOCVER_* variables; `with_*` setters override.
//! - All on-disk locations are derived from `repo_root` (see the path helpers).
//!
//! Layout (defaults):
//!   <repo>/documentation/<version>/...
//!   <repo>/documentation/current_version.txt
//!   <repo>/_static/versions.json
//!   <repo>/_static/switcher.json

use std::fmt;
use std::path::{Path, PathBuf};

use crate::util::{env_bool, env_list, env_string};

pub const POINTER_FILE: &str = "current_version.txt";
pub const VERSIONS_FILE: &str = "versions.json";
pub const SWITCHER_FILE: &str = "switcher.json";

/// Where the registry `date` of a version comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateSource {
    /// `.version-meta.json` (falls back to directory mtime).
    Metadata,
    /// Directory modification time.
    Filesystem,
    /// Tag creation date from version control (falls back to Metadata).
    GitTags,
}

impl DateSource {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metadata" | "meta" => Some(DateSource::Metadata),
            "filesystem" | "fs" | "mtime" => Some(DateSource::Filesystem),
            "git" | "tags" | "git-tags" => Some(DateSource::GitTags),
            _ => None,
        }
    }
}

impl fmt::Display for DateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DateSource::Metadata => "metadata",
            DateSource::Filesystem => "filesystem",
            DateSource::GitTags => "git",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug)]
pub struct DocsConfig {
    /// Repository root; everything else is relative to it.
    /// Env: DOCVER_REPO (default ".")
    pub repo_root: PathBuf,

    /// Env: DOCVER_DOCS_DIR (default "documentation")
    pub docs_dir: String,

    /// Env: DOCVER_STATIC_DIR (default "_static")
    pub static_dir: String,

    /// Prefix for switcher urls, e.g. "https://docs.example.org". Empty keeps urls relative.
    /// Env: DOCVER_BASE_URL
    pub base_url: String,

    /// Title used in synthesized index documents.
    /// Env: DOCVER_PROJECT_TITLE
    pub project_title: String,

    /// Sections every version must carry (checked by validate).
    /// Env: DOCVER_REQUIRED_SECTIONS (comma list)
    pub required_sections: Vec<String>,

    /// Sections synthesized for the first version.
    pub skeleton_sections: Vec<String>,

    /// Extensions of documents whose version references are rewritten on clone.
    /// Env: DOCVER_REWRITE_EXT (comma list, without dots)
    pub rewrite_extensions: Vec<String>,

    /// Env: DOCVER_DATE_SOURCE = metadata|filesystem|git
    pub date_source: DateSource,

    /// Push tags to `git_remote` after creating them.
    /// Env: DOCVER_PUSH_TAGS = 0|1
    pub push_tags: bool,

    /// Env: DOCVER_GIT_REMOTE (default "origin")
    pub git_remote: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        let required: Vec<String> = ["user-guide", "api-reference", "examples"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut skeleton = required.clone();
        skeleton.extend(
            ["tutorials", "contributing", "migration"]
                .iter()
                .map(|s| s.to_string()),
        );
        Self {
            repo_root: PathBuf::from("."),
            docs_dir: "documentation".to_string(),
            static_dir: "_static".to_string(),
            base_url: String::new(),
            project_title: "Project Documentation".to_string(),
            required_sections: required,
            skeleton_sections: skeleton,
            rewrite_extensions: vec!["rst".into(), "md".into(), "txt".into()],
            date_source: DateSource::Metadata,
            push_tags: false,
            git_remote: "origin".to_string(),
        }
    }
}

impl DocsConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Some(v) = env_string("DOCVER_REPO") {
            cfg.repo_root = PathBuf::from(v);
        }
        if let Some(v) = env_string("DOCVER_DOCS_DIR") {
            cfg.docs_dir = v;
        }
        if let Some(v) = env_string("DOCVER_STATIC_DIR") {
            cfg.static_dir = v;
        }
        if let Some(v) = env_string("DOCVER_BASE_URL") {
            cfg.base_url = v;
        }
        if let Some(v) = env_string("DOCVER_PROJECT_TITLE") {
            cfg.project_title = v;
        }
        if let Some(v) = env_list("DOCVER_REQUIRED_SECTIONS") {
            for s in &v {
                if !cfg.skeleton_sections.contains(s) {
                    cfg.skeleton_sections.push(s.clone());
                }
            }
            cfg.required_sections = v;
        }
        if let Some(v) = env_list("DOCVER_REWRITE_EXT") {
            cfg.rewrite_extensions = v
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect();
        }
        if let Some(v) = env_string("DOCVER_DATE_SOURCE") {
            match DateSource::parse(&v) {
                Some(ds) => cfg.date_source = ds,
                None => log::warn!("config: unknown DOCVER_DATE_SOURCE={v}, keeping {}", cfg.date_source),
            }
        }
        if let Some(on) = env_bool("DOCVER_PUSH_TAGS") {
            cfg.push_tags = on;
        }
        if let Some(v) = env_string("DOCVER_GIT_REMOTE") {
            cfg.git_remote = v;
        }

        cfg
    }

    pub fn with_repo_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.repo_root = root.into();
        self
    }

    pub fn with_docs_dir<S: Into<String>>(mut self, dir: S) -> Self {
        self.docs_dir = dir.into();
        self
    }

    pub fn with_static_dir<S: Into<String>>(mut self, dir: S) -> Self {
        self.static_dir = dir.into();
        self
    }

    pub fn with_base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_project_title<S: Into<String>>(mut self, title: S) -> Self {
        self.project_title = title.into();
        self
    }

    pub fn with_required_sections<S: AsRef<str>>(mut self, sections: &[S]) -> Self {
        self.required_sections = sections.iter().map(|s| s.as_ref().to_string()).collect();
        for s in &self.required_sections {
            if !self.skeleton_sections.contains(s) {
                self.skeleton_sections.push(s.clone());
            }
        }
        self
    }

    pub fn with_skeleton_sections<S: AsRef<str>>(mut self, sections: &[S]) -> Self {
        self.skeleton_sections = sections.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    pub fn with_rewrite_extensions<S: AsRef<str>>(mut self, exts: &[S]) -> Self {
        self.rewrite_extensions = exts
            .iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    pub fn with_date_source(mut self, ds: DateSource) -> Self {
        self.date_source = ds;
        self
    }

    pub fn with_push_tags(mut self, on: bool) -> Self {
        self.push_tags = on;
        self
    }

    pub fn with_git_remote<S: Into<String>>(mut self, remote: S) -> Self {
        self.git_remote = remote.into();
        self
    }

    // ---------- derived paths ----------

    pub fn docs_root(&self) -> PathBuf {
        self.repo_root.join(&self.docs_dir)
    }

    pub fn version_dir(&self, version: &str) -> PathBuf {
        self.docs_root().join(version)
    }

    pub fn pointer_path(&self) -> PathBuf {
        self.docs_root().join(POINTER_FILE)
    }

    pub fn static_root(&self) -> PathBuf {
        self.repo_root.join(&self.static_dir)
    }

    pub fn versions_path(&self) -> PathBuf {
        self.static_root().join(VERSIONS_FILE)
    }

    pub fn switcher_path(&self) -> PathBuf {
        self.static_root().join(SWITCHER_FILE)
    }

    /// Site-relative url of a version, e.g. `/documentation/v1.0.0/`.
    pub fn version_url(&self, version: &str) -> String {
        format!("/{}/{}/", self.docs_dir.trim_matches('/'), version)
    }

    /// Url as published in the switcher (base_url prefixed when set).
    pub fn switcher_url(&self, version: &str) -> String {
        let rel = self.version_url(version);
        if self.base_url.is_empty() {
            rel
        } else {
            format!("{}{}", self.base_url.trim_end_matches('/'), rel)
        }
    }

    pub fn is_rewritable(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let e = e.to_ascii_lowercase();
                self.rewrite_extensions.iter().any(|x| *x == e)
            })
            .unwrap_or(false)
    }
}

impl fmt::Display for DocsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DocsConfig {{ \
             repo_root: {}, \
             docs_dir: {}, \
             static_dir: {}, \
             base_url: {}, \
             required_sections: [{}], \
             rewrite_extensions: [{}], \
             date_source: {}, \
             push_tags: {}, \
             git_remote: {} \
             }}",
            self.repo_root.display(),
            self.docs_dir,
            self.static_dir,
            if self.base_url.is_empty() {
                "(relative)"
            } else {
                self.base_url.as_str()
            },
            self.required_sections.join(","),
            self.rewrite_extensions.join(","),
            self.date_source,
            self.push_tags,
            self.git_remote,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout() {
        let cfg = DocsConfig::default().with_repo_root("/repo");
        assert_eq!(cfg.docs_root(), PathBuf::from("/repo/documentation"));
        assert_eq!(
            cfg.pointer_path(),
            PathBuf::from("/repo/documentation/current_version.txt")
        );
        assert_eq!(cfg.versions_path(), PathBuf::from("/repo/_static/versions.json"));
        assert_eq!(cfg.switcher_path(), PathBuf::from("/repo/_static/switcher.json"));
        assert_eq!(cfg.version_url("v1.0.0"), "/documentation/v1.0.0/");
    }

    #[test]
    fn switcher_url_prefix() {
        let cfg = DocsConfig::default().with_base_url("https://docs.example.org/");
        assert_eq!(
            cfg.switcher_url("v2.0.0"),
            "https://docs.example.org/documentation/v2.0.0/"
        );
        assert_eq!(DocsConfig::default().switcher_url("v2.0.0"), "/documentation/v2.0.0/");
    }

    #[test]
    fn required_sections_extend_skeleton() {
        let cfg = DocsConfig::default().with_required_sections(&["user-guide", "faq"]);
        assert!(cfg.skeleton_sections.iter().any(|s| s == "faq"));
        assert_eq!(cfg.required_sections, vec!["user-guide", "faq"]);
    }

    #[test]
    fn rewritable_by_extension() {
        let cfg = DocsConfig::default().with_rewrite_extensions(&[".RST", "md"]);
        assert!(cfg.is_rewritable(Path::new("a/index.rst")));
        assert!(cfg.is_rewritable(Path::new("b.MD")));
        assert!(!cfg.is_rewritable(Path::new("logo.png")));
        assert!(!cfg.is_rewritable(Path::new("Makefile")));
    }

    #[test]
    fn date_source_names() {
        assert_eq!(DateSource::parse("git"), Some(DateSource::GitTags));
        assert_eq!(DateSource::parse("FS"), Some(DateSource::Filesystem));
        assert_eq!(DateSource::parse("bogus"), None);
    }
}
