mod cli;

use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};

use huex::colors::{AnsiScheme, ColorScheme};
use huex::{PrinterBuilder, SourceQueue};

fn run() -> Result<i32> {
    let matches = cli::build_cli().get_matches();

    let line_size = matches
        .get_one::<u64>("count")
        .copied()
        .unwrap_or(huex::DEFAULT_LINE_SIZE as u64) as usize;
    let group_size = matches
        .get_one::<u64>("group")
        .copied()
        .unwrap_or(huex::DEFAULT_GROUP_SIZE as u64) as usize;
    let skip = matches.get_one::<u64>("start").copied().unwrap_or(0);
    let limit = matches.get_one::<u64>("limit").copied();
    let raw = matches.get_flag("raw");
    let show_color = !matches.get_flag("no_color");
    // Raw output reconstructs the byte stream itself; eliding lines there
    // would corrupt it.
    let autoskip = matches.get_flag("autoskip") && !raw;
    let ascii_only = matches.get_flag("ascii");

    let scheme: Option<Box<dyn ColorScheme>> = if show_color {
        Some(Box::new(AnsiScheme::for_stdout()?))
    } else {
        None
    };

    let files: Vec<PathBuf> = matches
        .get_many::<PathBuf>("FILE")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default();
    let mut source = SourceQueue::new(files);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let mut printer = PrinterBuilder::new(&mut handle)
        .color_scheme(scheme)
        .show_hex(!raw)
        .ascii_only(ascii_only)
        .enable_autoskip(autoskip)
        .line_size(line_size)
        .group_size(group_size)
        .skip(skip)
        .limit(limit)
        .build()?;
    printer
        .print_all(&mut source)
        .context("failed to write output")?;
    drop(printer);

    Ok(if source.had_errors() { 1 } else { 0 })
}

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            process::exit(1);
        }
    }
}
