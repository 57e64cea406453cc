use anyhow::Result;
use std::path::PathBuf;

use docversions::{VersionError, VersionId};

pub fn exec(repo: Option<PathBuf>, version: String, force: bool, yes: bool) -> Result<()> {
    let (mgr, mut pointer) = super::util::open(repo)?;

    // Проверки до вопроса пользователю: не спрашиваем про заведомо невозможное удаление
    let id = VersionId::parse(&version)?;
    if !mgr.exists(&id) {
        return Err(VersionError::NotFound { version: id.to_string() }.into());
    }
    if pointer.is(&id) && !force {
        return Err(VersionError::CannotDeleteCurrent { version: id.to_string() }.into());
    }
    if !force && !yes && !super::util::confirm(&format!("Delete version {}?", id))? {
        println!("Deletion cancelled.");
        return Ok(());
    }

    let report = mgr.delete(&mut pointer, id.as_str(), force)?;
    println!("Deleted version {}", report.deleted);
    if report.reinitialized {
        println!("No versions left; re-initialized {}", pointer.version());
    } else if let Some(v) = &report.new_current {
        println!("Current version is now {}", v);
    }
    Ok(())
}
