//! Resolve styles for a JSON document tree.
//!
//! Usage:
//!   cargo run -p page-styles-cli -- [OPTIONS] [INPUT]
//!
//! Reads the document from INPUT (or stdin when omitted or `-`) and writes
//! the resolved tree as JSON to stdout.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use page_styles::{resolve_styles, PageDefaults, SourceDocument, StyleOptions};
use page_stylesheet::{Stylesheet, StylesheetConfig};

struct Args {
    input: Option<PathBuf>,
    page: PageDefaults,
    stylesheet: StylesheetConfig,
    compact: bool,
}

fn usage() {
    eprintln!("Usage: page-styles [OPTIONS] [INPUT]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --dpi <N>            Fallback dpi for pages without one (default: 72)");
    eprintln!("  --rem-base <N>       Fallback rem base for pages without fontSize (default: 18)");
    eprintln!("  --strict             Fail on malformed lengths");
    eprintln!("  --no-expand          Keep shorthand properties as written");
    eprintln!("  --compact            Emit single-line JSON");
    eprintln!("  -h, --help           Show this help");
}

fn parse_number(flag: &str, raw: Option<&String>) -> Result<f32, String> {
    let raw = raw.ok_or_else(|| format!("{} expects a value", flag))?;
    raw.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or_else(|| format!("{} expects a positive number, got {:?}", flag, raw))
}

fn parse_args(args: &[String]) -> Result<Option<Args>, String> {
    let mut parsed = Args {
        input: None,
        page: PageDefaults::default(),
        stylesheet: StylesheetConfig::default(),
        compact: false,
    };
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--dpi" => {
                i += 1;
                parsed.page.dpi = parse_number("--dpi", args.get(i))?;
            }
            "--rem-base" => {
                i += 1;
                parsed.page.rem_base = parse_number("--rem-base", args.get(i))?;
            }
            "--strict" => parsed.stylesheet.strict = true,
            "--no-expand" => parsed.stylesheet.expand_shorthands = false,
            "--compact" => parsed.compact = true,
            "--help" | "-h" => return Ok(None),
            "-" => parsed.input = None,
            other if other.starts_with("--") => return Err(format!("unknown option {}", other)),
            other => parsed.input = Some(PathBuf::from(other)),
        }
        i += 1;
    }
    Ok(Some(parsed))
}

fn read_input(input: Option<&PathBuf>) -> io::Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::with_capacity(4096);
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn run(args: Args) -> Result<(), String> {
    let json = read_input(args.input.as_ref()).map_err(|e| match &args.input {
        Some(path) => format!("read {}: {}", path.display(), e),
        None => format!("read stdin: {}", e),
    })?;
    let document = SourceDocument::from_json(&json).map_err(|e| e.to_string())?;

    let options = StyleOptions {
        page: args.page,
        ..StyleOptions::default()
    };
    let stylesheet = Stylesheet::new(args.stylesheet);
    let styled = resolve_styles(&stylesheet, &document, &options).map_err(|e| e.to_string())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = if args.compact {
        serde_json::to_writer(&mut out, &styled)
    } else {
        serde_json::to_writer_pretty(&mut out, &styled)
    };
    written.map_err(|e| format!("write output: {}", e))?;
    writeln!(out).map_err(|e| format!("write output: {}", e))
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let parsed = match parse_args(&args) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            usage();
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("{}", message);
            usage();
            return ExitCode::from(2);
        }
    };

    match run(parsed) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("page-styles: {}", message);
            ExitCode::FAILURE
        }
    }
}
