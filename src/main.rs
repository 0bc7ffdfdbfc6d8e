// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of classdiff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! classdiff CLI entrypoint.
//!
//! Compares one or more candidate `classDiagram` files against a reference and prints a report
//! per candidate, either as text (with an annotated listing) or as one JSON object per line.

use std::io::{self, IsTerminal, Read, Write};
use std::path::Path;
use std::str::FromStr;

use classdiff::config::{load_config, AppConfig, OutputFormat};
use classdiff::render::{highlight_lines, render_highlighted, render_report_text};
use classdiff::{compare_sources_with, ClassDiffError, DiffReport};
use log::{debug, info, LevelFilter};
use rayon::prelude::*;
use serde::Serialize;

const STDIN_ARG: &str = "-";

/// Exit code for `--check` when at least one candidate differs from the reference.
const EXIT_DIFFERENT: i32 = 3;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--json] [--no-highlight] [--no-color] [--check] [--config <path>] [--log-level <level>] <reference> <candidate>...\n  {program} --schema\n\nUse `-` for at most one input to read it from stdin.\n\n--json          print one JSON object per candidate and line\n--no-highlight  skip the annotated candidate listing\n--no-color      disable ANSI colors\n--check         exit with {EXIT_DIFFERENT} if any candidate differs\n--config        configuration file (default: ./classdiff.toml if present)\n--log-level     off, error, warn, info, debug or trace (default: RUST_LOG or warn)\n--schema        print the JSON schema of a report and exit"
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    json: bool,
    no_highlight: bool,
    no_color: bool,
    check: bool,
    schema: bool,
    config: Option<String>,
    log_level: Option<String>,
    reference: Option<String>,
    candidates: Vec<String>,
}

fn set_flag(flag: &mut bool) -> Result<(), ()> {
    if *flag {
        return Err(());
    }
    *flag = true;
    Ok(())
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => set_flag(&mut options.json)?,
            "--no-highlight" => set_flag(&mut options.no_highlight)?,
            "--no-color" => set_flag(&mut options.no_color)?,
            "--check" => set_flag(&mut options.check)?,
            "--schema" => set_flag(&mut options.schema)?,
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                options.config = Some(args.next().ok_or(())?);
            }
            "--log-level" => {
                if options.log_level.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                LevelFilter::from_str(&raw).map_err(|_| ())?;
                options.log_level = Some(raw);
            }
            _ if arg.starts_with('-') && arg != STDIN_ARG => return Err(()),
            _ => {
                if options.reference.is_none() {
                    options.reference = Some(arg);
                } else {
                    options.candidates.push(arg);
                }
            }
        }
    }

    if options.schema {
        return if options.reference.is_none() { Ok(options) } else { Err(()) };
    }

    if options.reference.is_none() || options.candidates.is_empty() {
        return Err(());
    }

    let stdin_inputs = options
        .reference
        .iter()
        .chain(options.candidates.iter())
        .filter(|input| input.as_str() == STDIN_ARG)
        .count();
    if stdin_inputs > 1 {
        return Err(());
    }

    Ok(options)
}

fn init_logging(level: Option<&str>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level.and_then(|raw| LevelFilter::from_str(raw).ok()) {
        builder.filter_level(level);
    }
    builder.init();
}

fn read_source(input: &str) -> Result<String, ClassDiffError> {
    if input == STDIN_ARG {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .map_err(|err| ClassDiffError::io("<stdin>", err))?;
        return Ok(source);
    }
    std::fs::read_to_string(input).map_err(|err| ClassDiffError::io(input, err))
}

/// Merge command-line flags over the loaded configuration.
fn apply_overrides(config: &mut AppConfig, options: &CliOptions) {
    if options.json {
        config.output.format = OutputFormat::Json;
    }
    if options.no_highlight {
        config.output.highlight = false;
    }
    if options.no_color {
        config.output.color = false;
    }
}

#[derive(Serialize)]
struct CandidateReport<'a> {
    candidate: &'a str,
    report: &'a DiffReport,
}

fn write_text(
    out: &mut impl Write,
    name: &str,
    source: &str,
    report: &DiffReport,
    config: &AppConfig,
    with_header: bool,
    color: bool,
) -> io::Result<()> {
    if with_header {
        writeln!(out, "== {name} ==")?;
    }
    write!(out, "{}", render_report_text(report, color))?;
    if config.output.highlight && !report.identical {
        writeln!(out)?;
        write!(out, "{}", render_highlighted(&highlight_lines(source, report), color))?;
    }
    Ok(())
}

fn run(options: &CliOptions) -> Result<i32, ClassDiffError> {
    let stdout = io::stdout();
    let to_stdout_err = |err| ClassDiffError::write("<stdout>", err);

    if options.schema {
        let schema = schemars::schema_for!(DiffReport);
        let mut out = stdout.lock();
        writeln!(out, "{}", serde_json::to_string_pretty(&schema)?).map_err(to_stdout_err)?;
        return Ok(0);
    }

    let mut config = load_config(options.config.as_deref().map(Path::new))?;
    apply_overrides(&mut config, options);
    let color = config.output.color && stdout.is_terminal();
    let compare = config.compare_options();
    debug!(config:?; "Resolved configuration");

    let reference_path = options
        .reference
        .as_deref()
        .ok_or_else(|| ClassDiffError::Usage("missing reference".to_owned()))?;
    let reference = read_source(reference_path)?;
    let candidates = options
        .candidates
        .iter()
        .map(|path| read_source(path).map(|source| (path.as_str(), source)))
        .collect::<Result<Vec<_>, _>>()?;

    info!(candidates = candidates.len(); "Comparing candidates against reference");
    let reports = candidates
        .par_iter()
        .map(|(_, source)| compare_sources_with(&reference, source, &compare))
        .collect::<Vec<_>>();

    let mut out = stdout.lock();
    for (idx, ((name, source), report)) in candidates.iter().zip(&reports).enumerate() {
        match config.output.format {
            OutputFormat::Json => {
                let line = serde_json::to_string(&CandidateReport { candidate: name, report })?;
                writeln!(out, "{line}").map_err(to_stdout_err)?;
            }
            OutputFormat::Text => {
                if idx > 0 {
                    writeln!(out).map_err(to_stdout_err)?;
                }
                write_text(&mut out, name, source, report, &config, candidates.len() > 1, color)
                    .map_err(to_stdout_err)?;
            }
        }
    }
    out.flush().map_err(to_stdout_err)?;

    let differing = reports.iter().filter(|report| !report.identical).count();
    info!(differing; "Comparison finished");
    if options.check && differing > 0 {
        return Ok(EXIT_DIFFERENT);
    }
    Ok(0)
}

fn main() {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "classdiff".to_owned());

    let options = match parse_options(args) {
        Ok(options) => options,
        Err(()) => {
            print_usage(&program);
            std::process::exit(2);
        }
    };

    init_logging(options.log_level.as_deref());
    debug!(options:?; "Parsed arguments");

    match run(&options) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("classdiff: {err}");
            std::process::exit(err.exit_code());
        }
    }
}
