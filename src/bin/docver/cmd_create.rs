use anyhow::Result;
use std::path::PathBuf;

pub fn exec(
    repo: Option<PathBuf>,
    version: String,
    from: Option<String>,
    message: Option<String>,
) -> Result<()> {
    let (mgr, mut pointer) = super::util::open(repo)?;
    let report = mgr.create(&mut pointer, &version, from.as_deref(), message.as_deref())?;

    println!(
        "Created documentation version {} from {} at {}",
        report.version,
        report.source,
        report.path.display()
    );
    if report.tagged {
        println!("Created tag {}", report.version);
    }
    for w in &report.warnings {
        eprintln!("warning: {}", w);
    }
    println!("Current version: {}", pointer.version());
    Ok(())
}
