use anyhow::Result;
use std::path::PathBuf;

use super::util::print_json;

pub fn exec(repo: Option<PathBuf>, json: bool) -> Result<()> {
    let (mgr, pointer) = super::util::open(repo)?;
    let listing = mgr.list(&pointer)?;

    if json {
        let items = listing.iter().collect::<Result<Vec<_>, _>>()?;
        return print_json(&items);
    }

    if listing.is_empty() {
        println!("No documentation versions found.");
        return Ok(());
    }

    println!("Available documentation versions:");
    println!("  Current: {}", listing.current());
    if let Some(latest) = listing.latest() {
        println!("  Latest:  {}", latest);
    }
    println!();
    for item in &listing {
        let s = item?;
        let status = if s.is_current {
            " (current)"
        } else if s.is_latest {
            " (latest)"
        } else {
            ""
        };
        println!("  - {}{}", s.version, status);
        println!("      path:    {}", s.path.display());
        println!(
            "      files:   {} .rst, {} .md, {} other",
            s.rst_files, s.md_files, s.other_files
        );
        println!("      created: {}", s.created.format("%Y-%m-%d"));
    }
    Ok(())
}
