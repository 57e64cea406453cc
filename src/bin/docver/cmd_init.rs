use anyhow::Result;
use std::path::PathBuf;

pub fn exec(repo: Option<PathBuf>) -> Result<()> {
    let (mgr, pointer) = super::util::open(repo)?;
    println!(
        "Documentation root {} ready, current version {}",
        mgr.config().docs_root().display(),
        pointer.version()
    );
    Ok(())
}
