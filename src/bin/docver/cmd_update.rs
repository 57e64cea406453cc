use anyhow::Result;
use std::path::PathBuf;

pub fn exec(repo: Option<PathBuf>) -> Result<()> {
    let (mgr, pointer) = super::util::open(repo)?;
    let d = mgr.regenerate_descriptors(&pointer)?;
    println!(
        "Updated {} and {} ({} version(s), current {}, latest {})",
        mgr.config().versions_path().display(),
        mgr.config().switcher_path().display(),
        d.versions.versions.len(),
        d.versions.current,
        d.versions.latest
    );
    Ok(())
}
