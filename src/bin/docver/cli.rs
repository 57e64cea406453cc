use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Versioned documentation manager.
///
/// Layout (relative to --repo):
///   documentation/<version>/...        version trees
///   documentation/current_version.txt  current version pointer
///   _static/versions.json              registry for the version switcher
///   _static/switcher.json              switcher entries
///
/// No file locking: do not run two docver commands on the same tree at once.
#[derive(Parser, Debug)]
#[command(name = "docver", version, about = "Versioned documentation manager")]
pub struct Cli {
    /// Repository root (env DOCVER_REPO, default ".")
    #[arg(long, global = true)]
    pub repo: Option<PathBuf>,

    /// Only log warnings and errors (RUST_LOG still wins)
    #[arg(long, global = true, default_value_t = false)]
    pub quiet: bool,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Create the documentation root with v1.0.0 if empty (idempotent)
    Init,
    /// Create a new documentation version by cloning an existing one
    ///
    /// Пример:
    ///   docver create 1.1.0 --from v1.0.0 --message "Release 1.1.0"
    Create {
        /// Version to create (e.g. 1.1.0 or v1.1.0)
        version: String,
        /// Source version to copy from (default: current)
        #[arg(long = "from")]
        from: Option<String>,
        /// Tag message; when set an annotated git tag is created
        #[arg(long)]
        message: Option<String>,
    },
    /// List all versions, highest first
    List {
        /// JSON output (array)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Switch the current version
    Switch {
        version: String,
    },
    /// Delete a version
    ///
    /// Without --force the current version cannot be deleted, and a
    /// confirmation is asked unless --yes is given.
    Delete {
        version: String,
        /// Allow deleting the current version; skips confirmation
        #[arg(long, default_value_t = false)]
        force: bool,
        /// Do not ask for confirmation
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },
    /// Validate documentation structure (default: current version)
    Validate {
        #[arg(long)]
        version: Option<String>,
        /// JSON output (single object)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Regenerate versions.json and switcher.json
    Update,
    /// Compare the files of two versions
    Compare {
        a: String,
        b: String,
        /// JSON output (single object)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Create an annotated git tag for an existing version
    Tag {
        version: String,
        /// Tag message (default: "Release <version>")
        #[arg(long)]
        message: Option<String>,
        /// Push the tag to the configured remote (DOCVER_GIT_REMOTE)
        #[arg(long, default_value_t = false)]
        push: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Cli as Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_with_options() {
        let cli = <Cli as Parser>::try_parse_from([
            "docver", "--repo", "/r", "create", "1.1.0", "--from", "v1.0.0", "--message", "m",
        ])
        .unwrap();
        assert_eq!(cli.repo, Some(PathBuf::from("/r")));
        match cli.cmd {
            Cmd::Create { version, from, message } => {
                assert_eq!(version, "1.1.0");
                assert_eq!(from.as_deref(), Some("v1.0.0"));
                assert_eq!(message.as_deref(), Some("m"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn delete_flags() {
        let cli = <Cli as Parser>::try_parse_from(["docver", "delete", "v1.0.0", "--force"]).unwrap();
        assert!(matches!(cli.cmd, Cmd::Delete { force: true, yes: false, .. }));
    }

    #[test]
    fn missing_subcommand_is_usage_error() {
        assert!(<Cli as Parser>::try_parse_from(["docver"]).is_err());
    }
}
