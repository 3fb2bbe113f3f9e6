//! CLI tool for gridcols - derives column views from a grid state JSON file
//!
//! Usage:
//!   gridcols_cli <state.json>                        # Output report JSON to stdout
//!   gridcols_cli <state.json> --prefs prefs.json     # Apply grid preferences
//!   gridcols_cli <state.json> -o out.json            # Output report JSON to file
//!
//! Set `RUST_LOG=gridcols=trace` to see selector recomputations.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use gridcols::report_json;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: gridcols_cli <state.json> [--prefs prefs.json] [-o output.json]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let mut prefs_path = None;
    let mut output_path = None;
    let mut rest = args[2..].iter();
    while let Some(flag) = rest.next() {
        match flag.as_str() {
            "--prefs" => prefs_path = rest.next(),
            "-o" => output_path = rest.next(),
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
    }

    // Read inputs
    let state_json = match fs::read_to_string(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };
    let prefs_json = prefs_path.map(|path| match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            std::process::exit(1);
        }
    });

    // Derive
    let json = match report_json(&state_json, prefs_json.as_deref()) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error deriving columns: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
