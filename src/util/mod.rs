//! util - общие утилиты.
//!
//! Содержит:
//! - write_atomic() / write_json_atomic(): запись через tmp + rename;
//! - env_bool() / env_list(): разбор ENV;
//! - format_date() / mtime_of(): RFC 3339 даты.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{io_at, Result, VersionError};

/// Write `data` to `path` via `<path>.tmp` + rename.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).map_err(io_at(dir))?;
        }
    }
    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp = Path::new(&tmp_name);

    let mut f = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(tmp)
        .map_err(io_at(tmp))?;
    f.write_all(data).map_err(io_at(tmp))?;
    let _ = f.sync_all();
    drop(f);

    fs::rename(tmp, path).map_err(io_at(path))?;
    Ok(())
}

/// Pretty JSON with a trailing newline.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut data = serde_json::to_vec_pretty(value).map_err(|e| VersionError::json(path, e))?;
    data.push(b'\n');
    write_atomic(path, &data)
}

pub fn env_bool(name: &str) -> Option<bool> {
    std::env::var(name).ok().map(|s| parse_bool(&s))
}

pub fn parse_bool(s: &str) -> bool {
    let s = s.trim().to_ascii_lowercase();
    s == "1" || s == "true" || s == "yes" || s == "on"
}

/// Comma-separated list, empty items dropped.
pub fn parse_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(|p| p.to_string())
        .collect()
}

pub fn env_list(name: &str) -> Option<Vec<String>> {
    std::env::var(name)
        .ok()
        .map(|s| parse_list(&s))
        .filter(|v| !v.is_empty())
}

pub fn env_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// `2024-12-19T16:45:00Z`
pub fn format_date(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn now_utc() -> DateTime<Utc> {
    // секундная точность: дата попадает в versions.json как есть
    let now = Utc::now();
    DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now)
}

/// Modification time of a path, as UTC.
pub fn mtime_of(path: &Path) -> Result<DateTime<Utc>> {
    let md = fs::metadata(path).map_err(io_at(path))?;
    let t: SystemTime = md.modified().map_err(io_at(path))?;
    Ok(DateTime::<Utc>::from(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_values() {
        for s in ["1", "true", "YES", " on "] {
            assert!(parse_bool(s), "{s} must be true");
        }
        for s in ["0", "false", "", "nope"] {
            assert!(!parse_bool(s), "{s} must be false");
        }
    }

    #[test]
    fn list_values() {
        assert_eq!(parse_list("a, b,,c "), vec!["a", "b", "c"]);
        assert!(parse_list(" , ").is_empty());
    }

    #[test]
    fn date_format_has_seconds_and_z() {
        let ts = DateTime::from_timestamp(1_734_626_700, 0).unwrap();
        assert_eq!(format_date(&ts), "2024-12-19T16:45:00Z");
    }

    #[test]
    fn atomic_write_replaces_content() {
        let dir = std::env::temp_dir().join(format!(
            "docver-util-{}-{}",
            std::process::id(),
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        let p = dir.join("nested").join("x.json");
        write_json_atomic(&p, &vec![1, 2]).unwrap();
        write_json_atomic(&p, &vec![3]).unwrap();
        let s = fs::read_to_string(&p).unwrap();
        assert_eq!(s, "[\n  3\n]\n");
        assert!(!dir.join("nested").join("x.json.tmp").exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
