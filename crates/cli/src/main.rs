// FILE: crates/cli/src/main.rs

use anyhow::Result;
use clap::{Arg, Command};

mod commands;
mod jobs;

fn build_cli() -> Command {
    Command::new("bookmend")
        .version("0.1.0")
        .about("Scripted bulk corrections for book-metadata records")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to the service config file")
                .global(true),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .value_name("URL")
                .help("Override the backing service base URL")
                .global(true),
        )
        .subcommand(
            Command::new("trim-titles")
                .about("Strip leading and trailing whitespace from edition titles")
                .arg(
                    Arg::new("file")
                        .short('f')
                        .long("file")
                        .required(true)
                        .value_name("PATH")
                        .help("Path to the dump file (.gz accepted)"),
                )
                .arg(
                    Arg::new("limit")
                        .short('l')
                        .long("limit")
                        .value_name("N")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("1")
                        .help("Limit the number of edits; 0 means unlimited"),
                )
                .arg(
                    Arg::new("write-changes")
                        .short('w')
                        .long("write-changes")
                        .value_name("BOOL")
                        .value_parser(bookmend_core::parse_bool)
                        .default_value("false")
                        .help("Actually write changes to the service (yes/no)"),
                )
                .arg(
                    Arg::new("log-dir")
                        .long("log-dir")
                        .value_name("DIR")
                        .default_value("logs")
                        .help("Directory for per-run log files"),
                ),
        )
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("trim-titles", sub_matches)) => commands::trim_titles(sub_matches),
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}
