use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};

use docversions::{
    DateSource, DocsConfig, VersionControl, VersionError, VersionManager, VersionsDocument,
};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("docvertest-tag-{prefix}-{pid}-{t}-{id}"))
}

#[derive(Default)]
struct Recorded {
    calls: Vec<String>,
    fail: bool,
    dates: HashMap<String, DateTime<Utc>>,
}

#[derive(Clone, Default)]
struct RecordingVcs(Rc<RefCell<Recorded>>);

impl VersionControl for RecordingVcs {
    fn create_tag(&self, tag: &str, message: &str) -> docversions::Result<()> {
        let mut r = self.0.borrow_mut();
        r.calls.push(format!("tag {tag} {message}"));
        if r.fail {
            return Err(VersionError::tool("git", "not a git repository"));
        }
        Ok(())
    }

    fn push_tag(&self, tag: &str, remote: &str) -> docversions::Result<()> {
        self.0.borrow_mut().calls.push(format!("push {remote} {tag}"));
        Ok(())
    }

    fn tag_dates(&self) -> docversions::Result<HashMap<String, DateTime<Utc>>> {
        Ok(self.0.borrow().dates.clone())
    }
}

fn manager(prefix: &str, cfg: DocsConfig) -> (VersionManager, RecordingVcs) {
    let vcs = RecordingVcs::default();
    let mgr = VersionManager::open_with_config(cfg.with_repo_root(unique_root(prefix)))
        .with_vcs(Box::new(vcs.clone()));
    (mgr, vcs)
}

#[test]
fn create_with_message_tags() -> Result<()> {
    let (mgr, vcs) = manager("ok", DocsConfig::default());
    let mut pointer = mgr.initialize()?;
    let report = mgr.create(&mut pointer, "1.1.0", None, Some("Release 1.1"))?;
    assert!(report.tagged);
    assert!(report.warnings.is_empty());
    assert_eq!(vcs.0.borrow().calls, vec!["tag v1.1.0 Release 1.1".to_string()]);
    Ok(())
}

#[test]
fn create_without_message_does_not_tag() -> Result<()> {
    let (mgr, vcs) = manager("none", DocsConfig::default());
    let mut pointer = mgr.initialize()?;
    let report = mgr.create(&mut pointer, "1.1.0", None, None)?;
    assert!(!report.tagged);
    assert!(vcs.0.borrow().calls.is_empty());
    Ok(())
}

#[test]
fn tag_failure_is_only_a_warning() -> Result<()> {
    let (mgr, vcs) = manager("fail", DocsConfig::default());
    vcs.0.borrow_mut().fail = true;
    let mut pointer = mgr.initialize()?;

    let report = mgr.create(&mut pointer, "1.1.0", None, Some("msg"))?;
    assert!(!report.tagged);
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(report.warnings[0], VersionError::ExternalTool { .. }));
    assert!(mgr.config().version_dir("v1.1.0").is_dir());
    assert_eq!(pointer.version().as_str(), "v1.1.0");
    assert_eq!(report.descriptors.versions.current, "v1.1.0");
    Ok(())
}

#[test]
fn push_follows_config() -> Result<()> {
    let cfg = DocsConfig::default().with_push_tags(true).with_git_remote("upstream");
    let (mgr, vcs) = manager("push", cfg);
    let mut pointer = mgr.initialize()?;
    mgr.create(&mut pointer, "1.1.0", None, Some("m"))?;
    assert_eq!(
        vcs.0.borrow().calls,
        vec!["tag v1.1.0 m".to_string(), "push upstream v1.1.0".to_string()]
    );
    Ok(())
}

#[test]
fn explicit_tag_propagates_errors() -> Result<()> {
    let (mgr, vcs) = manager("explicit", DocsConfig::default());
    mgr.initialize()?;

    let v = mgr.tag("1.0.0", None, false)?;
    assert_eq!(v.as_str(), "v1.0.0");
    assert_eq!(vcs.0.borrow().calls, vec!["tag v1.0.0 Release v1.0.0".to_string()]);

    vcs.0.borrow_mut().fail = true;
    let e = mgr.tag("1.0.0", Some("again"), false).unwrap_err();
    assert_eq!(e.class().exit_code(), 4);

    let e = mgr.tag("9.9.9", None, false).unwrap_err();
    assert!(matches!(e, VersionError::NotFound { .. }));
    Ok(())
}

#[test]
fn git_tag_dates_feed_the_registry() -> Result<()> {
    let cfg = DocsConfig::default().with_date_source(DateSource::GitTags);
    let (mgr, vcs) = manager("dates", cfg);
    let tagged = Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap();
    vcs.0.borrow_mut().dates.insert("v1.0.0".into(), tagged);

    mgr.initialize()?;
    let doc: VersionsDocument =
        serde_json::from_slice(&fs::read(mgr.config().versions_path())?)?;
    assert_eq!(doc.versions[0].date, "2021-03-04T05:06:07Z");
    Ok(())
}
