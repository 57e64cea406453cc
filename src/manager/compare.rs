//! manager/compare - сравнение двух версий и явное тегирование.

use log::info;

use crate::error::Result;
use crate::tree::{diff_trees, TreeDiff};
use crate::version::VersionId;

use super::core::VersionManager;

impl VersionManager {
    /// File-level differences between two versions (metadata excluded).
    pub fn compare(&self, a: &str, b: &str) -> Result<TreeDiff> {
        let a = VersionId::parse(a)?;
        let b = VersionId::parse(b)?;
        self.require(&a)?;
        self.require(&b)?;
        let diff = diff_trees(
            &self.cfg.version_dir(a.as_str()),
            &self.cfg.version_dir(b.as_str()),
        )?;
        info!(
            "compare: {} vs {}: {} only in {}, {} only in {}, {} changed",
            a,
            b,
            diff.only_in_a.len(),
            a,
            diff.only_in_b.len(),
            b,
            diff.changed.len()
        );
        Ok(diff)
    }

    /// Annotated tag for an existing version. Tool failures are returned, not downgraded.
    pub fn tag(&self, version: &str, message: Option<&str>, push: bool) -> Result<VersionId> {
        let version = VersionId::parse(version)?;
        self.require(&version)?;
        let default_msg = format!("Release {version}");
        self.tag_and_push(&version, message.unwrap_or(&default_msg), push)?;
        Ok(version)
    }

    pub(crate) fn tag_and_push(&self, version: &VersionId, message: &str, push: bool) -> Result<()> {
        self.vcs.create_tag(version.as_str(), message)?;
        info!("tag: created {}", version);
        if push {
            self.vcs.push_tag(version.as_str(), &self.cfg.git_remote)?;
            info!("tag: pushed {} to {}", version, self.cfg.git_remote);
        }
        Ok(())
    }
}
