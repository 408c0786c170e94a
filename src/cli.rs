use std::path::PathBuf;

use clap::{
    crate_description, crate_name, crate_version, value_parser, Arg, ArgAction, ColorChoice,
    Command,
};

use const_format::formatcp;
use thiserror::Error;

use huex::{DEFAULT_GROUP_SIZE, DEFAULT_LINE_SIZE, MAX_LINE_SIZE};

#[derive(Debug, Error, PartialEq)]
pub enum ParseNumError {
    #[error("empty value")]
    Empty,
    #[error("invalid number '{0}'")]
    Invalid(String),
}

/// Parses a non-negative byte count, in decimal or with a `0x` prefix.
pub fn parse_hex_or_int(n: &str) -> Result<u64, ParseNumError> {
    if n.is_empty() {
        return Err(ParseNumError::Empty);
    }
    let parsed = if let Some(hex) = n.strip_prefix("0x").or_else(|| n.strip_prefix("0X")) {
        if hex.starts_with('+') {
            None
        } else {
            u64::from_str_radix(hex, 16).ok()
        }
    } else {
        n.parse::<u64>().ok()
    };
    parsed.ok_or_else(|| ParseNumError::Invalid(n.to_string()))
}

pub fn build_cli() -> Command {
    Command::new(crate_name!())
        .color(ColorChoice::Auto)
        .max_term_width(90)
        .version(crate_version!())
        .about(crate_description!())
        .after_help(
            "With multiple FILE arguments, the files' contents are concatenated. With no \
             arguments, or when FILE is '-', read from standard input.",
        )
        .arg(
            Arg::new("FILE")
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .help("The files to display, concatenated in order"),
        )
        .arg(
            Arg::new("count")
                .short('c')
                .long("count")
                .num_args(1)
                .value_name("N")
                .value_parser(value_parser!(u64).range(1..=MAX_LINE_SIZE as u64))
                .default_value(formatcp!("{}", DEFAULT_LINE_SIZE))
                .help(formatcp!(
                    "Display N bytes per line [default: {}, maximum: {}]",
                    DEFAULT_LINE_SIZE,
                    MAX_LINE_SIZE
                )),
        )
        .arg(
            Arg::new("group")
                .short('g')
                .long("group")
                .num_args(1)
                .value_name("N")
                .value_parser(value_parser!(u64).range(0..=MAX_LINE_SIZE as u64))
                .default_value(formatcp!("{}", DEFAULT_GROUP_SIZE))
                .help(formatcp!(
                    "Group N bytes together in the hex field; 0 disables grouping [default: {}]",
                    DEFAULT_GROUP_SIZE
                )),
        )
        .arg(
            Arg::new("start")
                .short('s')
                .long("start")
                .num_args(1)
                .value_name("N")
                .value_parser(parse_hex_or_int)
                .help("Start N bytes after the start of the input. Accepts 0x-prefixed hex"),
        )
        .arg(
            Arg::new("limit")
                .short('l')
                .long("limit")
                .num_args(1)
                .value_name("N")
                .value_parser(parse_hex_or_int)
                .help("Stop after N bytes of input. Accepts 0x-prefixed hex"),
        )
        .arg(
            Arg::new("autoskip")
                .short('a')
                .long("autoskip")
                .action(ArgAction::SetTrue)
                .help("Replace runs of all-zero lines with a single '*'"),
        )
        .arg(
            Arg::new("no_color")
                .short('N')
                .long("no-color")
                .action(ArgAction::SetTrue)
                .help("Suppress color output"),
        )
        .arg(
            Arg::new("raw")
                .short('R')
                .long("raw")
                .action(ArgAction::SetTrue)
                .conflicts_with("no_color")
                .help("Dump colorized bytes without the hex display"),
        )
        .arg(
            Arg::new("ascii")
                .short('A')
                .long("ascii")
                .action(ArgAction::SetTrue)
                .help("Don't use Unicode characters in the text column"),
        )
}
