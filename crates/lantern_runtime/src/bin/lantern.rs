//! Lantern CLI entry point.

use lantern_runtime::Repl;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    files: Vec<PathBuf>,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();
    for arg in args.into_iter().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            other if other.starts_with('-') => {
                return Err(format!("unknown option: {other}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
    }
    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }
    if config.show_version {
        println!("lantern {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut repl = Repl::new()?;

    // Loaded files establish context; print their query results as a script
    // run would.
    for file in &config.files {
        let responses = repl.session_mut().load(&file.display().to_string())?;
        for response in &responses {
            if let Some(output) = response.render() {
                println!("{output}");
            }
        }
    }

    // With files given, the run is a script execution unless asked otherwise.
    if config.batch_mode || !config.files.is_empty() {
        return Ok(());
    }

    repl.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "Lantern - a symbolic-expression interpreter with a logic layer

USAGE:
    lantern [OPTIONS] [FILES...]

ARGUMENTS:
    [FILES...]    .logic files to process (then exit)

OPTIONS:
    -h, --help       Print help information
    -V, --version    Print version information
    -b, --batch      Exit after loading files even when none are given

REPL FORMS:
    (fact <conclusion> <hypothesis>...)   Store a fact       (alias: !)
    (query <relation>...)                 Run a query        (alias: ?)
    (load <path>)                         Process a file
    Ctrl+D                                Exit"
    );
}
