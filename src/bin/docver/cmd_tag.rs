use anyhow::Result;
use std::path::PathBuf;

pub fn exec(repo: Option<PathBuf>, version: String, message: Option<String>, push: bool) -> Result<()> {
    let (mgr, _pointer) = super::util::open(repo)?;
    let v = mgr.tag(&version, message.as_deref(), push)?;
    if push {
        println!("Created and pushed tag {} to {}", v, mgr.config().git_remote);
    } else {
        println!("Created tag {}", v);
    }
    Ok(())
}
