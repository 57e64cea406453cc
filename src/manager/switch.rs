use log::info;

use crate::error::Result;
use crate::pointer::CurrentPointer;
use crate::version::VersionId;

use super::core::{Descriptors, VersionManager};

impl VersionManager {
    /// Make `version` current. Nothing is written when it does not exist.
    pub fn switch_to(&self, pointer: &mut CurrentPointer, version: &str) -> Result<Descriptors> {
        let version = VersionId::parse(version)?;
        self.require(&version)?;
        let previous = pointer.version().clone();
        pointer.set(version)?;
        let d = self.regenerate_descriptors(pointer)?;
        info!("switch: {} -> {}", previous, pointer.version());
        Ok(d)
    }
}
