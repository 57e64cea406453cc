use anyhow::{anyhow, Result};
use std::path::PathBuf;

use super::util::print_json;

pub fn exec(repo: Option<PathBuf>, version: Option<String>, json: bool) -> Result<()> {
    let (mgr, pointer) = super::util::open(repo)?;
    let report = mgr.validate(&pointer, version.as_deref())?;

    if json {
        print_json(&report)?;
    } else if report.passed {
        println!("Documentation validation passed for {}", report.version);
    } else {
        println!("Validation issues found in {}:", report.version);
        for issue in &report.issues {
            println!("  - {}", issue);
        }
    }

    if report.passed {
        Ok(())
    } else {
        Err(anyhow!(
            "validation of {} failed with {} issue(s)",
            report.version,
            report.issues.len()
        ))
    }
}
