use anyhow::Result;
use std::path::PathBuf;

pub fn exec(repo: Option<PathBuf>, version: String) -> Result<()> {
    let (mgr, mut pointer) = super::util::open(repo)?;
    mgr.switch_to(&mut pointer, &version)?;
    println!("Switched to version {}", pointer.version());
    Ok(())
}
