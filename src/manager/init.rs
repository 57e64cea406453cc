//! manager/init - initialize(): идемпотентная подготовка корня документации.
//!
//! Семантика:
//! - нет ни одного каталога версии → синтез v1.0.0, указатель = v1.0.0;
//! - указатель отсутствует или ссылается на удалённый каталог → старшая версия;
//! - оставшиеся после сбоя .staging-* удаляются;
//! - дескрипторы пересобираются, если что-то изменилось или их нет.

use std::fs;

use log::info;

use crate::error::{io_at, Result};
use crate::pointer::CurrentPointer;
use crate::skeleton::{initial_version, synthesize};
use crate::tree::purge_staging;

use super::core::VersionManager;

impl VersionManager {
    pub fn initialize(&self) -> Result<CurrentPointer> {
        let root = self.cfg.docs_root();
        fs::create_dir_all(&root).map_err(io_at(&root))?;

        let mut changed = purge_staging(&root)? > 0;
        let pointer_path = self.cfg.pointer_path();
        let versions = self.versions()?;

        let pointer = match versions.first() {
            None => {
                let v = initial_version()?;
                synthesize(&self.cfg, &v)?;
                let p = CurrentPointer::new(&pointer_path, v);
                p.store()?;
                info!("init: created initial version {}", p.version());
                changed = true;
                p
            }
            Some(highest) => match CurrentPointer::load(&pointer_path)? {
                Some(p) if self.exists(p.version()) => p,
                stale => {
                    if let Some(old) = stale {
                        info!("init: current version {} is gone, switching to {}", old.version(), highest);
                    }
                    let p = CurrentPointer::new(&pointer_path, highest.clone());
                    p.store()?;
                    changed = true;
                    p
                }
            },
        };

        let missing_descriptors =
            !self.cfg.versions_path().exists() || !self.cfg.switcher_path().exists();
        if changed || missing_descriptors {
            self.regenerate_descriptors(&pointer)?;
        }
        Ok(pointer)
    }
}
