use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;

use docversions::{DocsConfig, NoVcs, VersionError, VersionManager, VersionsDocument};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("docvertest-del-{prefix}-{pid}-{t}-{id}"))
}

fn manager(prefix: &str) -> VersionManager {
    let cfg = DocsConfig::default().with_repo_root(unique_root(prefix));
    VersionManager::open_with_config(cfg).with_vcs(Box::new(NoVcs))
}

fn registry(mgr: &VersionManager) -> Result<VersionsDocument> {
    Ok(serde_json::from_slice(&fs::read(mgr.config().versions_path())?)?)
}

#[test]
fn current_version_needs_force() -> Result<()> {
    let mgr = manager("needs-force");
    let mut pointer = mgr.initialize()?;
    mgr.create(&mut pointer, "1.1.0", None, None)?;

    let e = mgr.delete(&mut pointer, "v1.1.0", false).unwrap_err();
    assert!(matches!(e, VersionError::CannotDeleteCurrent { .. }), "got {e:?}");
    assert!(mgr.config().version_dir("v1.1.0").is_dir());
    assert_eq!(pointer.version().as_str(), "v1.1.0");
    Ok(())
}

#[test]
fn forced_delete_of_current_picks_highest_remaining() -> Result<()> {
    let mgr = manager("force-highest");
    let mut pointer = mgr.initialize()?;
    mgr.create(&mut pointer, "1.2.0", None, None)?;
    mgr.create(&mut pointer, "1.10.0", Some("1.0.0"), None)?;
    mgr.create(&mut pointer, "1.5.0", Some("1.0.0"), None)?;
    mgr.switch_to(&mut pointer, "1.10.0")?;

    let report = mgr.delete(&mut pointer, "1.10.0", true)?;
    assert_eq!(report.deleted.as_str(), "v1.10.0");
    assert!(!report.reinitialized);
    assert_eq!(report.new_current.as_ref().map(|v| v.as_str()), Some("v1.5.0"));
    assert_eq!(pointer.version().as_str(), "v1.5.0");

    let reg = registry(&mgr)?;
    assert_eq!(reg.current, "v1.5.0");
    assert_eq!(reg.latest, "v1.5.0");
    assert_eq!(reg.versions.iter().filter(|e| e.is_current).count(), 1);
    assert!(reg.versions.iter().all(|e| e.version != "v1.10.0"));
    assert_eq!(mgr.load_pointer()?.version().as_str(), "v1.5.0");
    Ok(())
}

#[test]
fn deleting_last_version_reinitializes() -> Result<()> {
    let mgr = manager("last");
    let mut pointer = mgr.initialize()?;
    fs::write(mgr.config().version_dir("v1.0.0").join("extra.rst"), "Extra\n=====\n")?;

    let report = mgr.delete(&mut pointer, "v1.0.0", true)?;
    assert!(report.reinitialized);
    assert_eq!(pointer.version().as_str(), "v1.0.0");
    // свежий скелет, а не старое дерево
    assert!(!mgr.config().version_dir("v1.0.0").join("extra.rst").exists());
    assert!(mgr.config().version_dir("v1.0.0").join("index.rst").is_file());

    let reg = registry(&mgr)?;
    assert_eq!(reg.versions.len(), 1);
    assert!(reg.versions[0].is_current);
    assert_eq!(reg.current, "v1.0.0");
    Ok(())
}

#[test]
fn deleting_other_version_keeps_pointer() -> Result<()> {
    let mgr = manager("other");
    let mut pointer = mgr.initialize()?;
    mgr.create(&mut pointer, "2.0.0", None, None)?;

    let report = mgr.delete(&mut pointer, "1.0.0", false)?;
    assert!(report.new_current.is_none());
    assert_eq!(pointer.version().as_str(), "v2.0.0");
    assert_eq!(mgr.versions()?.len(), 1);
    assert_eq!(registry(&mgr)?.versions.len(), 1);
    Ok(())
}

#[test]
fn deleting_missing_version_is_not_found() -> Result<()> {
    let mgr = manager("missing");
    let mut pointer = mgr.initialize()?;
    let e = mgr.delete(&mut pointer, "v3.0.0", true).unwrap_err();
    assert!(matches!(e, VersionError::NotFound { .. }), "got {e:?}");
    assert_eq!(e.class().exit_code(), 3);
    Ok(())
}

#[test]
fn delete_leaves_no_trash_behind() -> Result<()> {
    let mgr = manager("trash");
    let mut pointer = mgr.initialize()?;
    mgr.create(&mut pointer, "1.1.0", None, None)?;
    let root = mgr.config().docs_root();
    // остаток прерванного удаления с тем же именем
    let stale = root.join(format!(".staging-deleted-v1.0.0-{}", std::process::id()));
    fs::create_dir_all(stale.join("user-guide"))?;

    mgr.delete(&mut pointer, "v1.0.0", false)?;
    assert!(!mgr.config().version_dir("v1.0.0").exists());
    let mut leftovers = Vec::new();
    for e in fs::read_dir(&root)? {
        let name = e?.file_name().to_string_lossy().into_owned();
        if name.starts_with(".staging-") {
            leftovers.push(name);
        }
    }
    assert!(leftovers.is_empty(), "leftovers: {leftovers:?}");
    assert_eq!(registry(&mgr)?.versions.len(), 1);
    Ok(())
}
