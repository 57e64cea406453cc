//! manager/delete - удаление версии.
//!
//! - текущую версию без force удалить нельзя (CannotDeleteCurrent);
//! - после удаления текущей указатель переходит на старшую из оставшихся;
//! - если не осталось ни одной - синтезируется v1.0.0.
//! Каталог сначала переименовывается в .staging-deleted-*, затем удаляется.
//! Подтверждение пользователем - забота вызывающей стороны (CLI).

use std::fs;

use log::{info, warn};

use crate::error::{io_at, Result, VersionError};
use crate::pointer::CurrentPointer;
use crate::skeleton::{initial_version, synthesize};
use crate::tree::staging_dir;
use crate::version::VersionId;

use super::core::{Descriptors, VersionManager};

#[derive(Debug)]
pub struct DeleteReport {
    pub deleted: VersionId,
    /// Set when the pointer moved because the current version was deleted.
    pub new_current: Option<VersionId>,
    pub reinitialized: bool,
    pub descriptors: Descriptors,
}

impl VersionManager {
    pub fn delete(
        &self,
        pointer: &mut CurrentPointer,
        version: &str,
        force: bool,
    ) -> Result<DeleteReport> {
        let version = VersionId::parse(version)?;
        self.require(&version)?;
        let was_current = pointer.is(&version);
        if was_current && !force {
            return Err(VersionError::CannotDeleteCurrent {
                version: version.to_string(),
            });
        }

        // после rename версия уже не видна; остаток подберёт purge_staging()
        let dir = self.cfg.version_dir(version.as_str());
        let trash = staging_dir(&self.cfg.docs_root(), &format!("deleted-{}", version));
        if trash.exists() {
            fs::remove_dir_all(&trash).map_err(io_at(&trash))?;
        }
        fs::rename(&dir, &trash).map_err(io_at(&dir))?;
        match fs::remove_dir_all(&trash) {
            Ok(()) => info!("delete: removed {}", dir.display()),
            Err(e) => warn!(
                "delete: {} is gone, but {} was not fully removed: {}",
                version,
                trash.display(),
                e
            ),
        }

        let mut new_current = None;
        let mut reinitialized = false;
        if was_current {
            let next = match self.versions()?.into_iter().next() {
                Some(v) => v,
                None => {
                    let v = initial_version()?;
                    synthesize(&self.cfg, &v)?;
                    reinitialized = true;
                    v
                }
            };
            info!("delete: current version is now {}", next);
            pointer.set(next.clone())?;
            new_current = Some(next);
        }

        let descriptors = self.regenerate_descriptors(pointer)?;
        Ok(DeleteReport {
            deleted: version,
            new_current,
            reinitialized,
            descriptors,
        })
    }
}
