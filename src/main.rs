//! Gridfill - a spreadsheet grid with drag-to-extend autofill

mod command;
mod config;
mod error;
mod logging;
#[cfg(feature = "tui")]
mod tui;

use anyhow::{Context, bail};
use gridfill_core::Sheet;
use std::env;
use std::path::PathBuf;

fn print_usage() {
    eprintln!("Usage: gridfill [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --command <CMDS>      Run ';'-separated commands and exit");
    eprintln!("      --rows <N>            Initial number of rows (1-1000)");
    eprintln!("      --cols <N>            Initial number of columns (1-1000)");
    eprintln!("      --config <FILE>       Read settings from FILE instead of the user config");
    eprintln!("      --log-file <FILE>     Append log output to FILE");
    eprintln!("  -h, --help                Print help");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  set <cell> <value>        fill <range> <end> [copy|series]");
    eprintln!("  sum <target> <cell>...    merge <range>   unmerge <cell>");
    eprintln!("  clear <range>             grow rows|cols  size   print <range>");
}

#[derive(Debug, Default)]
struct Args {
    command: Option<String>,
    rows: Option<usize>,
    cols: Option<usize>,
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
    help: bool,
}

fn parse_args(args: &[String]) -> anyhow::Result<Args> {
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-h" | "--help" => parsed.help = true,
            "-c" | "--command" => parsed.command = Some(take_value(args, &mut i, flag)?.to_string()),
            "--rows" => parsed.rows = Some(parse_count(flag, take_value(args, &mut i, flag)?)?),
            "--cols" => parsed.cols = Some(parse_count(flag, take_value(args, &mut i, flag)?)?),
            "--config" => parsed.config = Some(PathBuf::from(take_value(args, &mut i, flag)?)),
            "--log-file" => parsed.log_file = Some(PathBuf::from(take_value(args, &mut i, flag)?)),
            arg if arg.starts_with('-') => bail!("Unknown option: {}", arg),
            arg => bail!("Unexpected argument: {}", arg),
        }
        i += 1;
    }
    Ok(parsed)
}

/// Step past a flag to its value.
fn take_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> anyhow::Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .with_context(|| format!("{} requires a value", flag))
}

fn parse_count(flag: &str, value: &str) -> anyhow::Result<usize> {
    value
        .parse::<usize>()
        .with_context(|| format!("{} expects a number, got '{}'", flag, value))
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };
    if args.help {
        print_usage();
        return;
    }

    if let Err(e) = logging::init(args.log_file.as_deref(), args.command.is_some()) {
        eprintln!("Warning: {:#}", e);
    }

    let (settings, mut warnings) = config::load_settings(args.config.as_ref());
    let settings = settings.with_overrides(args.rows, args.cols, &mut warnings);
    for warning in warnings {
        eprintln!("Warning: {}", warning);
        log::warn!("{}", warning);
    }

    if let Some(script) = args.command {
        let mut sheet = Sheet::with_size(settings.initial_rows, settings.initial_cols);
        let stdout = std::io::stdout();
        if let Err(e) = command::run_script(&mut sheet, &script, &mut stdout.lock()) {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = run_interactive(&settings) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "tui")]
fn run_interactive(settings: &config::Settings) -> anyhow::Result<()> {
    let mut app = tui::App::new(settings);
    tui::run(&mut app).context("terminal UI failed")
}

#[cfg(not(feature = "tui"))]
fn run_interactive(_settings: &config::Settings) -> anyhow::Result<()> {
    bail!("built without the `tui` feature; use -c to run commands")
}
