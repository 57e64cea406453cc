use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use docversions::{CurrentPointer, DocsConfig, VersionManager};

/// Manager for `--repo` (or DOCVER_REPO), initialized and with its pointer loaded.
pub fn open(repo: Option<PathBuf>) -> Result<(VersionManager, CurrentPointer)> {
    let mut cfg = DocsConfig::from_env();
    if let Some(r) = repo {
        cfg = cfg.with_repo_root(r);
    }
    log::debug!("{}", cfg);
    let mgr = VersionManager::open_with_config(cfg);
    let pointer = mgr
        .initialize()
        .with_context(|| format!("initialize {}", mgr.config().docs_root().display()))?;
    Ok((mgr, pointer))
}

/// y/N prompt on stdin.
pub fn confirm(question: &str) -> Result<bool> {
    print!("{} (y/N): ", question);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
