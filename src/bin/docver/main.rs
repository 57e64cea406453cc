use anyhow::Result;
use env_logger::{Builder, Env};

use docversions::VersionError;

mod cli;
mod util;
mod cmd_init;
mod cmd_create;
mod cmd_list;
mod cmd_switch;
mod cmd_delete;
mod cmd_validate;
mod cmd_update;
mod cmd_compare;
mod cmd_tag;

fn init_logger(quiet: bool) {
    // Уровень берём из RUST_LOG, иначе дефолт - info (warn с --quiet).
    let default = if quiet { "warn" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default))
        .format_timestamp_millis()
        .init();
}

fn main() {
    let cli = cli::Cli::parse();
    init_logger(cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

/// 2 - usage, 3 - state, 4 - I/O; 1 for everything else (e.g. failed validation).
fn exit_code(e: &anyhow::Error) -> i32 {
    e.chain()
        .find_map(|c| c.downcast_ref::<VersionError>())
        .map(|ve| ve.class().exit_code())
        .unwrap_or(1)
}

fn run(cli: cli::Cli) -> Result<()> {
    let repo = cli.repo;
    match cli.cmd {
        cli::Cmd::Init => cmd_init::exec(repo),

        cli::Cmd::Create { version, from, message } =>
            cmd_create::exec(repo, version, from, message),

        cli::Cmd::List { json } =>
            cmd_list::exec(repo, json),

        cli::Cmd::Switch { version } =>
            cmd_switch::exec(repo, version),

        cli::Cmd::Delete { version, force, yes } =>
            cmd_delete::exec(repo, version, force, yes),

        cli::Cmd::Validate { version, json } =>
            cmd_validate::exec(repo, version, json),

        cli::Cmd::Update => cmd_update::exec(repo),

        cli::Cmd::Compare { a, b, json } =>
            cmd_compare::exec(repo, a, b, json),

        cli::Cmd::Tag { version, message, push } =>
            cmd_tag::exec(repo, version, message, push),
    }
}
