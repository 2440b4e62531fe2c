// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

pub mod commands;

/// Builds the command-line interface.
///
/// `corpus-runner [-v] [FILTER]` runs the suite; `corpus-runner init`
/// writes a default configuration.
pub fn build_cli() -> Command {
    Command::new("corpus-runner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Runs an interpreter over a corpus of annotated test programs and checks the results.")
        .args_conflicts_with_subcommands(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Also print a line for every passed and skipped test")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to the suite configuration file")
                .value_name("CONFIG")
                .default_value("TestSuite.toml")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("target")
                .short('t')
                .long("target")
                .help("Name of the target to test (defaults to the configured default)")
                .value_name("TARGET")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colored output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("filter")
                .help("Comma-separated path prefixes, relative to the test directory, to restrict the run to")
                .value_name("FILTER")
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("init")
                .about("Create a default suite configuration file")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Where to write the configuration")
                        .value_name("OUTPUT")
                        .default_value("TestSuite.toml")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help("Overwrite an existing file")
                        .action(ArgAction::SetTrue),
                ),
        )
}

/// Dispatches parsed arguments. Returns whether the run succeeded.
pub async fn process_command(matches: ArgMatches) -> Result<bool> {
    if matches.get_flag("no-color") {
        colored::control::set_override(false);
    }

    match matches.subcommand() {
        Some(("init", init_matches)) => {
            let output = init_matches
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("TestSuite.toml"));
            let force = init_matches.get_flag("force");
            commands::init::execute(output, force)
        }
        _ => {
            let config = matches
                .get_one::<PathBuf>("config")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("TestSuite.toml"));
            let target = matches.get_one::<String>("target").cloned();
            let filter = matches.get_one::<String>("filter").cloned();
            let verbose = matches.get_flag("verbose");

            commands::run::execute(config, target, filter, verbose).await
        }
    }
}
