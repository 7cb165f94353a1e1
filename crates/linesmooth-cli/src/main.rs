//! linesmooth: simplify WKT linestrings from the command line.
//!
//! Reads one WKT `LINESTRING` per line (from the positional argument, a
//! file, or stdin), simplifies each with the chosen algorithm, and prints
//! one result per input line. The first unreadable geometry stops the
//! run with a non-zero exit code.
//!
//! # Usage
//!
//! ```text
//! linesmooth --algorithm douglas-peucker --tolerance 0.003 "LINESTRING (0 0, 1 0.001, 2 0)"
//! linesmooth --tolerance 0.003 --linear-tolerance --input coast.wkt --json
//! ```
//!
//! Log verbosity follows `RUST_LOG`, or `-v`/`-vv`/`-vvv` when it is unset.

#![allow(clippy::print_stderr)]

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use linesmooth_core::diagnostics::{Clock, simplify_with_diagnostics};
use linesmooth_core::{
    SimplifierKind, SimplifyConfig, SimplifyDiagnostics, SimplifyError, area_tolerance, wkt,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Simplify WKT linestrings with Visvalingam-Whyatt or Douglas-Peucker.
#[derive(Parser)]
#[command(name = "linesmooth", version)]
struct Cli {
    /// WKT LINESTRING to simplify. When omitted, lines are read from
    /// `--input` or stdin.
    wkt: Option<String>,

    /// File with one WKT LINESTRING per line.
    #[arg(short, long, conflicts_with = "wkt")]
    input: Option<PathBuf>,

    /// Simplification algorithm.
    #[arg(short, long, value_enum, default_value_t = Algorithm::Visvalingam)]
    algorithm: Algorithm,

    /// Tolerance: an area for Visvalingam-Whyatt, a distance for
    /// Douglas-Peucker.
    #[arg(short, long, default_value_t = SimplifyConfig::DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Treat `--tolerance` as a distance and square it for
    /// Visvalingam-Whyatt.
    #[arg(long)]
    linear_tolerance: bool,

    /// Full simplification config as a JSON string.
    ///
    /// When provided, `--algorithm`, `--tolerance` and
    /// `--linear-tolerance` are ignored.
    #[arg(long)]
    config_json: Option<String>,

    /// Print one JSON record per input line instead of bare WKT.
    #[arg(long)]
    json: bool,

    /// Print a diagnostics line per input to stderr.
    #[arg(long)]
    diagnostics: bool,

    /// Increase log verbosity (when `RUST_LOG` is unset).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Algorithm selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// Visvalingam-Whyatt (area tolerance).
    Visvalingam,
    /// Douglas-Peucker (distance tolerance).
    DouglasPeucker,
}

impl From<Algorithm> for SimplifierKind {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Visvalingam => Self::Visvalingam,
            Algorithm::DouglasPeucker => Self::DouglasPeucker,
        }
    }
}

/// Errors that end a run.
#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error("error parsing --config-json: {0}")]
    ConfigJson(#[source] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[source] SimplifyError),

    #[error("line {line}: {source}")]
    Geometry {
        line: usize,
        #[source]
        source: SimplifyError,
    },

    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// One output record in `--json` mode.
#[derive(Serialize)]
struct Record<'a> {
    line: usize,
    output: Option<String>,
    diagnostics: &'a SimplifyDiagnostics,
}

/// Build a [`SimplifyConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and the
/// individual flags are ignored. Either way the result is validated.
fn config_from_cli(cli: &Cli) -> Result<SimplifyConfig, RunError> {
    let config = if let Some(ref json) = cli.config_json {
        serde_json::from_str(json).map_err(RunError::ConfigJson)?
    } else {
        let algorithm = SimplifierKind::from(cli.algorithm);
        let tolerance = if cli.linear_tolerance && algorithm == SimplifierKind::Visvalingam {
            area_tolerance(cli.tolerance)
        } else {
            cli.tolerance
        };
        SimplifyConfig::new(algorithm, tolerance)
    };
    config.validate().map_err(RunError::InvalidConfig)?;
    Ok(config)
}

/// Pick the input source: the positional WKT, a file, or stdin.
fn open_input(cli: &Cli) -> Result<Box<dyn BufRead>, RunError> {
    if let Some(ref text) = cli.wkt {
        return Ok(Box::new(io::Cursor::new(text.clone().into_bytes())));
    }
    if let Some(ref path) = cli.input {
        let file = File::open(path).map_err(|source| RunError::Open {
            path: path.clone(),
            source,
        })?;
        return Ok(Box::new(BufReader::new(file)));
    }
    Ok(Box::new(io::stdin().lock()))
}

/// Simplify every non-blank input line, writing one result per line.
fn run(
    cli: &Cli,
    config: &SimplifyConfig,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<usize, RunError> {
    let mut processed = 0;

    for (index, text) in input.lines().enumerate() {
        let text = text?;
        if text.trim().is_empty() {
            continue;
        }
        let line = index + 1;

        let polyline = wkt::parse(&text).map_err(|source| RunError::Geometry { line, source })?;
        let (result, diagnostics) = simplify_with_diagnostics(&polyline, config, &StdClock);
        let output = result.as_ref().map(wkt::serialize);

        if output.is_none() {
            tracing::warn!(
                line,
                points = polyline.len(),
                "fewer than 3 points, line not simplified",
            );
        }
        if cli.diagnostics {
            eprintln!("line {line}: {}", diagnostics.report());
        }

        if cli.json {
            let record = Record {
                line,
                output,
                diagnostics: &diagnostics,
            };
            serde_json::to_writer(&mut out, &record)?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}", output.unwrap_or_default())?;
        }
        processed += 1;
    }

    out.flush()?;
    Ok(processed)
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = config_from_cli(&cli).and_then(|config| {
        tracing::info!(
            algorithm = %config.algorithm,
            tolerance = config.tolerance,
            "starting simplification",
        );
        let input = open_input(&cli)?;
        run(&cli, &config, input, io::stdout().lock())
    });

    match result {
        Ok(processed) => {
            tracing::info!(processed, "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// [`Clock`] implementation backed by [`std::time::Instant`].
struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, since: &Instant) -> Duration {
        since.elapsed()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("linesmooth").chain(args.iter().copied())).unwrap()
    }

    fn run_to_string(cli: &Cli, input: &str) -> Result<String, RunError> {
        let config = config_from_cli(cli)?;
        let mut out = Vec::new();
        run(cli, &config, input.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_visvalingam_with_zero_tolerance() {
        let config = config_from_cli(&cli(&[])).unwrap();
        assert_eq!(config, SimplifyConfig::default());
    }

    #[test]
    fn linear_tolerance_is_squared_for_visvalingam_only() {
        let config = config_from_cli(&cli(&["-t", "0.5", "--linear-tolerance"])).unwrap();
        assert!((config.tolerance - 0.25).abs() < f64::EPSILON);

        let config = config_from_cli(&cli(&[
            "-a",
            "douglas-peucker",
            "-t",
            "0.5",
            "--linear-tolerance",
        ]))
        .unwrap();
        assert_eq!(config.algorithm, SimplifierKind::DouglasPeucker);
        assert!((config.tolerance - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn config_json_overrides_flags() {
        let args = cli(&[
            "-t",
            "9",
            "--config-json",
            r#"{"algorithm":"douglas_peucker","tolerance":1.5}"#,
        ]);
        let config = config_from_cli(&args).unwrap();
        assert_eq!(
            config,
            SimplifyConfig::new(SimplifierKind::DouglasPeucker, 1.5)
        );
    }

    #[test]
    fn bad_config_json_is_reported() {
        let args = cli(&["--config-json", "{not json"]);
        assert!(matches!(
            config_from_cli(&args),
            Err(RunError::ConfigJson(_))
        ));
    }

    #[test]
    fn invalid_tolerance_is_rejected() {
        let args = cli(&["--config-json", r#"{"tolerance":-2.0}"#]);
        assert!(matches!(
            config_from_cli(&args),
            Err(RunError::InvalidConfig(SimplifyError::InvalidTolerance(_)))
        ));
    }

    #[test]
    fn writes_one_result_per_input_line() {
        let args = cli(&["-a", "douglas-peucker", "-t", "1"]);
        let input = "LINESTRING (0 0, 1 0.5, 2 0)\n\nLINESTRING (0 0, 1 5, 2 0)\n";
        let out = run_to_string(&args, input).unwrap();
        assert_eq!(out, "LINESTRING (0 0, 2 0)\nLINESTRING (0 0, 1 5, 2 0)\n");
    }

    #[test]
    fn visvalingam_short_line_prints_empty_line() {
        let args = cli(&["-t", "1"]);
        let out = run_to_string(&args, "LINESTRING (0 0, 1 1)\n").unwrap();
        assert_eq!(out, "\n");
    }

    #[test]
    fn json_mode_emits_records() {
        let args = cli(&["-t", "1", "--json"]);
        let out = run_to_string(&args, "LINESTRING (0 0, 1 0.01, 2 0)\nLINESTRING (0 0, 1 1)\n")
            .unwrap();
        let records: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["line"], 1);
        assert_eq!(records[0]["output"], "LINESTRING (0 0, 2 0)");
        assert_eq!(records[0]["diagnostics"]["points_before"], 3);
        assert_eq!(records[0]["diagnostics"]["points_after"], 2);
        assert!(records[1]["output"].is_null());
        assert_eq!(records[1]["diagnostics"]["simplified"], false);
    }

    #[test]
    fn unsupported_geometry_stops_the_run() {
        let args = cli(&[]);
        let err = run_to_string(&args, "LINESTRING (0 0, 1 1, 2 2)\nPOINT (1 2)\n").unwrap_err();
        assert!(matches!(
            err,
            RunError::Geometry {
                line: 2,
                source: SimplifyError::UnsupportedGeometryType { .. }
            }
        ));
        assert_eq!(
            err.to_string(),
            "line 2: unsupported geometry type \"POINT\": only LINESTRING can be simplified",
        );
    }

    #[test]
    fn positional_wkt_conflicts_with_input_file() {
        let result = Cli::try_parse_from([
            "linesmooth",
            "--input",
            "lines.wkt",
            "LINESTRING (0 0, 1 1)",
        ]);
        assert!(result.is_err());
    }
}
