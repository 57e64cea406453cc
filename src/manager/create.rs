//! manager/create - создание новой версии клонированием существующей.
//!
//! Порядок:
//! 1) нормализация идентификатора (2.0.0 → v2.0.0), проверки AlreadyExists / SourceNotFound;
//! 2) clone_tree() через staging + rename, с заменой ссылок на версию в документах;
//! 3) указатель → новая версия;
//! 4) опциональный тег (ошибки git - только предупреждения);
//! 5) регенерация versions.json + switcher.json.

use std::path::PathBuf;

use log::{info, warn};

use crate::error::{Result, VersionError};
use crate::meta::VersionMeta;
use crate::pointer::CurrentPointer;
use crate::tree::{clone_tree, VersionRefRewriter};
use crate::version::VersionId;

use super::core::{Descriptors, VersionManager};

#[derive(Debug)]
pub struct CreateReport {
    pub version: VersionId,
    pub source: VersionId,
    pub path: PathBuf,
    pub tagged: bool,
    /// Downgraded external-tool failures.
    pub warnings: Vec<VersionError>,
    pub descriptors: Descriptors,
}

impl VersionManager {
    pub fn create(
        &self,
        pointer: &mut CurrentPointer,
        new_version: &str,
        from_version: Option<&str>,
        tag_message: Option<&str>,
    ) -> Result<CreateReport> {
        let version = VersionId::parse(new_version)?;
        if self.exists(&version) {
            return Err(VersionError::AlreadyExists {
                version: version.to_string(),
            });
        }
        let source = match from_version {
            Some(s) => VersionId::parse(s)?,
            None => pointer.version().clone(),
        };
        if !self.exists(&source) {
            return Err(VersionError::SourceNotFound {
                version: source.to_string(),
            });
        }

        info!("create: {} from {}", version, source);
        let meta = VersionMeta::new(
            version.clone(),
            Some(source.clone()),
            tag_message.map(|s| s.to_string()),
        );
        let rewriter = VersionRefRewriter::new(&source, &version);
        let filter = |p: &std::path::Path| self.cfg.is_rewritable(p);
        let path = clone_tree(
            &self.cfg.version_dir(source.as_str()),
            &self.cfg.docs_root(),
            version.as_str(),
            Some(&meta),
            &rewriter,
            &filter,
        )?;

        pointer.set(version.clone())?;

        let mut warnings = Vec::new();
        let mut tagged = false;
        if let Some(msg) = tag_message {
            match self.tag_and_push(&version, msg, self.cfg.push_tags) {
                Ok(()) => tagged = true,
                Err(e) => {
                    warn!("create: version {} created, but tagging failed: {}", version, e);
                    warnings.push(e);
                }
            }
        }

        let descriptors = self.regenerate_descriptors(pointer)?;
        info!("create: current version is now {}", version);

        Ok(CreateReport {
            version,
            source,
            path,
            tagged,
            warnings,
            descriptors,
        })
    }
}
