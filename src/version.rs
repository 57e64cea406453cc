//! version - идентификаторы версий документации.
//!
//! Формат: v<major>.<minor>.<patch>[-suffix] (допускается и укороченный v5.7).
//! Порядок: числовой кортеж компонент ядра; при равенстве версия без суффикса
//! старше версии с суффиксом, затем сравнение сырой строки. Это полный порядок.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VersionError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionId {
    raw: String,
}

impl VersionId {
    /// Normalize (`2.0.0` -> `v2.0.0`) and validate.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid(input, "empty"));
        }
        let raw = if trimmed.starts_with('v') {
            trimmed.to_string()
        } else {
            format!("v{}", trimmed)
        };
        validate_shape(&raw).map_err(|reason| invalid(input, reason))?;
        Ok(Self { raw })
    }

    /// True if a directory name looks like a version (used when scanning the docs root).
    pub fn is_version_name(name: &str) -> bool {
        name.starts_with('v') && validate_shape(name).is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Numeric core components; non-numeric ones count as zero.
    pub fn components(&self) -> Vec<u64> {
        sort_key(&self.raw)
    }

    pub fn suffix(&self) -> Option<&str> {
        self.raw.split_once('-').map(|(_, s)| s)
    }

    pub fn is_prerelease(&self) -> bool {
        self.suffix().is_some()
    }
}

/// Tuple key of an arbitrary version-like string.
pub fn sort_key(s: &str) -> Vec<u64> {
    let s = s.trim();
    let s = s.strip_prefix('v').unwrap_or(s);
    let core = match s.split_once('-') {
        Some((c, _)) => c,
        None => s,
    };
    core.split('.')
        .map(|p| p.parse::<u64>().unwrap_or(0))
        .collect()
}

fn validate_shape(raw: &str) -> std::result::Result<(), &'static str> {
    let body = raw.strip_prefix('v').ok_or("missing 'v' prefix")?;
    let (core, suffix) = match body.split_once('-') {
        Some((c, s)) => (c, Some(s)),
        None => (body, None),
    };
    if core.is_empty() {
        return Err("missing numeric components");
    }
    for part in core.split('.') {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err("components must be dot-separated numbers");
        }
        if part.parse::<u64>().is_err() {
            return Err("numeric component out of range");
        }
    }
    if let Some(sfx) = suffix {
        if sfx.is_empty()
            || !sfx
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'.')
        {
            return Err("suffix must be alphanumeric");
        }
    }
    Ok(())
}

fn invalid(input: &str, reason: &str) -> VersionError {
    VersionError::InvalidVersion {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

impl Ord for VersionId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.components()
            .cmp(&other.components())
            // без суффикса > с суффиксом
            .then_with(|| other.is_prerelease().cmp(&self.is_prerelease()))
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for VersionId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for VersionId {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VersionId {
    type Error = VersionError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<VersionId> for String {
    fn from(v: VersionId) -> String {
        v.raw
    }
}

impl AsRef<str> for VersionId {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> VersionId {
        VersionId::parse(s).unwrap()
    }

    #[test]
    fn normalizes_missing_prefix() {
        assert_eq!(v("2.0.0").as_str(), "v2.0.0");
        assert_eq!(v(" v1.2.3 ").as_str(), "v1.2.3");
    }

    #[test]
    fn numeric_ordering_not_lexicographic() {
        assert!(v("v5.10.0") > v("v5.9.9"));
        assert!(v("v5.9.9") > v("v5.9.0"));
        assert!(v("v10.0.0") > v("v9.99.99"));
    }

    #[test]
    fn release_sorts_above_prerelease() {
        assert!(v("v2.0.0") > v("v2.0.0-rc1"));
        assert!(v("v2.0.0-rc1") > v("v1.9.9"));
        assert!(v("v2.0.0-rc2") > v("v2.0.0-rc1"));
    }

    #[test]
    fn rejects_malformed() {
        assert!(VersionId::parse("").is_err());
        assert!(VersionId::parse("vfoo").is_err());
        assert!(VersionId::parse("v1..2").is_err());
        assert!(VersionId::parse("v1.2-").is_err());
        assert!(VersionId::parse("v1.2/3").is_err());
    }

    #[test]
    fn rejects_components_beyond_u64() {
        let e = VersionId::parse("v18446744073709551616.0.0").unwrap_err();
        assert!(matches!(e, VersionError::InvalidVersion { .. }));
        assert!(!VersionId::is_version_name("v18446744073709551616.0.0"));
        let max = v("v18446744073709551615.0.0");
        assert!(max > v("v1.0.0"));
        assert_eq!(max.components(), vec![u64::MAX, 0, 0]);
    }

    #[test]
    fn version_names_for_dir_scan() {
        assert!(VersionId::is_version_name("v1.0.0"));
        assert!(VersionId::is_version_name("v5.7"));
        assert!(!VersionId::is_version_name("1.0.0"));
        assert!(!VersionId::is_version_name("vendor"));
        assert!(!VersionId::is_version_name(".staging-v1.0.0-42"));
    }

    #[test]
    fn sort_key_zeroes_non_numeric() {
        assert_eq!(sort_key("v1.x.3"), vec![1, 0, 3]);
        assert_eq!(sort_key("v1.2.3-beta"), vec![1, 2, 3]);
    }

    #[test]
    fn serde_roundtrip_as_string() {
        let id = v("1.4.0");
        let s = serde_json::to_string(&id).unwrap();
        assert_eq!(s, "\"v1.4.0\"");
        let back: VersionId = serde_json::from_str(&s).unwrap();
        assert_eq!(back, id);
    }
}
