// Базовые модули
pub mod error;
pub mod config;
pub mod version;
pub mod util;   // src/util/mod.rs

// Состояние на диске
pub mod pointer; // current_version.txt
pub mod meta;    // .version-meta.json per version

// Дерево версии и производные документы
pub mod tree;     // src/tree/{mod,rewrite,diff}.rs
pub mod skeleton;
pub mod registry; // versions.json + switcher.json

// Внешний инструмент (git)
pub mod vcs;

// High-level API: src/manager/{mod,core,init,create,list,switch,delete,validate,compare}.rs
pub mod manager;

// Удобные реэкспорты
pub use config::{DateSource, DocsConfig};
pub use error::{ErrorClass, Result, VersionError};
pub use manager::{
    CreateReport, DeleteReport, Descriptors, Listing, ValidationIssue, ValidationReport,
    VersionManager, VersionSummary,
};
pub use pointer::CurrentPointer;
pub use registry::{SwitcherEntry, VersionEntry, VersionStatus, VersionsDocument};
pub use tree::{TextRewrite, TreeDiff};
pub use vcs::{GitCli, NoVcs, VersionControl};
pub use version::VersionId;
