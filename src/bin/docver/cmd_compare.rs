use anyhow::Result;
use std::path::PathBuf;

use super::util::print_json;

pub fn exec(repo: Option<PathBuf>, a: String, b: String, json: bool) -> Result<()> {
    let (mgr, _pointer) = super::util::open(repo)?;
    let diff = mgr.compare(&a, &b)?;

    if json {
        return print_json(&diff);
    }

    println!("Comparing {} with {}", a, b);
    if diff.is_identical() {
        println!("  identical ({} file(s))", diff.unchanged);
        return Ok(());
    }
    for p in &diff.only_in_a {
        println!("  - {}", p.display());
    }
    for p in &diff.only_in_b {
        println!("  + {}", p.display());
    }
    for p in &diff.changed {
        println!("  ~ {}", p.display());
    }
    println!(
        "  {} removed, {} added, {} changed, {} unchanged",
        diff.only_in_a.len(),
        diff.only_in_b.len(),
        diff.changed.len(),
        diff.unchanged
    );
    Ok(())
}
