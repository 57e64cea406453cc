//! manager - high-level API менеджера версий документации.
//!
//! Разделение по подмодулям:
//! - core.rs     - VersionManager, открытие, перечисление версий, даты, регенерация дескрипторов
//! - init.rs     - initialize(): синтез v1.0.0, восстановление указателя, чистка staging
//! - create.rs   - create(): клон версии + rewrite ссылок + опциональный тег
//! - list.rs     - list(): ленивый перезапускаемый перечень VersionSummary
//! - switch.rs   - switch_to()
//! - delete.rs   - delete(): удаление + переназначение текущей версии
//! - validate.rs - validate(): обязательные разделы и index-документы
//! - compare.rs  - compare() и tag() (дополнительные операции CLI)
//!
//! Указатель текущей версии (CurrentPointer) загружается вызывающей стороной
//! (load_pointer/initialize) и передаётся в каждую операцию явно.

pub mod compare;
pub mod core;
pub mod create;
pub mod delete;
pub mod init;
pub mod list;
pub mod switch;
pub mod validate;

pub use self::core::{Descriptors, VersionManager};
pub use create::CreateReport;
pub use delete::DeleteReport;
pub use list::{Listing, VersionSummary};
pub use validate::{ValidationIssue, ValidationReport};
