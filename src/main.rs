//! Gridcalc - command-mode front end for the spreadsheet core.

mod config;

use anyhow::{Context, bail};
use std::env;
use std::path::PathBuf;

use gridcalc_core::Spreadsheet;
use gridcalc_engine::engine::evaluate;

fn print_usage() {
    eprintln!("Usage: gridcalc [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --set <NAME=CONTENT>  Set a cell (can be repeated, applied in order)");
    eprintln!("  -c, --command <EXPR>      Evaluate an expression and print the result");
    eprintln!("  --config <FILE>           Load settings from TOML file");
    eprintln!("  --no-config               Do not load settings.toml from config dir");
    eprintln!("  -h, --help                Print help");
}

struct Args {
    edits: Vec<(String, String)>,
    command: Option<String>,
    config_file: Option<PathBuf>,
    no_config: bool,
}

/// Returns `None` when help was requested.
fn parse_args(args: &[String]) -> anyhow::Result<Option<Args>> {
    let mut parsed = Args {
        edits: Vec::new(),
        command: None,
        config_file: None,
        no_config: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(None),
            "-s" | "--set" => {
                i += 1;
                let edit = args.get(i).context("--set requires NAME=CONTENT")?;
                let Some((name, content)) = edit.split_once('=') else {
                    bail!("--set expects NAME=CONTENT, got {:?}", edit);
                };
                parsed.edits.push((name.to_string(), content.to_string()));
            }
            "-c" | "--command" => {
                i += 1;
                let expr = args.get(i).context("--command requires an expression")?;
                parsed.command = Some(expr.clone());
            }
            "--config" => {
                i += 1;
                let path = args.get(i).context("--config requires a file path")?;
                parsed.config_file = Some(PathBuf::from(path));
            }
            "--no-config" => parsed.no_config = true,
            arg => bail!("Unknown option: {}", arg),
        }
        i += 1;
    }
    Ok(Some(parsed))
}

/// Apply edits in order; rejected edits are reported and skipped.
fn apply_edits(sheet: &mut Spreadsheet, edits: &[(String, String)]) -> bool {
    let mut ok = true;
    for (name, content) in edits {
        if let Err(e) = sheet.set_contents_of_cell(name, content) {
            eprintln!("Error: {}: {}", name, e);
            ok = false;
        }
    }
    ok
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let args = match parse_args(&args) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    let (settings, mut warnings) = config::load_settings(args.config_file.as_ref(), args.no_config);
    let mut sheet = settings.spreadsheet(&mut warnings);
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    let mut ok = apply_edits(&mut sheet, &args.edits);

    if let Some(expr) = args.command {
        let expr = expr.strip_prefix('=').unwrap_or(&expr);
        let result = evaluate(expr, |name| {
            sheet.get_cell_value(name).ok().and_then(|v| v.as_number())
        });
        match result {
            Ok(n) => println!("{}", n),
            Err(e) => {
                println!("#ERR: {}", e);
                ok = false;
            }
        }
    } else {
        for name in sheet.names_of_nonempty_cells() {
            if let Ok(value) = sheet.get_cell_value(name) {
                println!("{} = {}", name, value);
            }
        }
    }

    if !ok {
        std::process::exit(1);
    }
}
