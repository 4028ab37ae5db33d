// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use serde::Serialize;
use std::{
    collections::BTreeMap,
    fmt::Display,
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use yard_engine::prelude::*;

type Units = u64;

const USAGE: &str = "usage: yard <input> [-o <output>] [--report <json>] [--exclusive-count]";

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

#[derive(Debug)]
enum DriverError {
    Usage(String),
    Io(io::Error),
    Report(serde_json::Error),
}

impl Display for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverError::Usage(msg) => write!(f, "{msg}\n{USAGE}"),
            DriverError::Io(e) => write!(f, "I/O error: {e}"),
            DriverError::Report(e) => write!(f, "Failed to write report: {e}"),
        }
    }
}

impl std::error::Error for DriverError {}

impl From<io::Error> for DriverError {
    fn from(err: io::Error) -> Self {
        DriverError::Io(err)
    }
}

impl From<serde_json::Error> for DriverError {
    fn from(err: serde_json::Error) -> Self {
        DriverError::Report(err)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct DriverConfig {
    input: PathBuf,
    output: Option<PathBuf>,
    report: Option<PathBuf>,
    yard: YardConfig,
}

impl DriverConfig {
    fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self, DriverError> {
        let mut input = None;
        let mut output = None;
        let mut report = None;
        let mut yard = YardConfig::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-o" | "--output" => {
                    let path = args
                        .next()
                        .ok_or_else(|| DriverError::Usage(format!("{arg} needs a path")))?;
                    output = Some(PathBuf::from(path));
                }
                "--report" => {
                    let path = args
                        .next()
                        .ok_or_else(|| DriverError::Usage(format!("{arg} needs a path")))?;
                    report = Some(PathBuf::from(path));
                }
                "--exclusive-count" => yard.count_boundary = CountBoundary::Exclusive,
                flag if flag.starts_with('-') => {
                    return Err(DriverError::Usage(format!("unknown option {flag}")));
                }
                path if input.is_none() => input = Some(PathBuf::from(path)),
                extra => {
                    return Err(DriverError::Usage(format!("unexpected argument {extra}")));
                }
            }
        }

        let input = input.ok_or_else(|| DriverError::Usage("missing input file".into()))?;
        Ok(Self {
            input,
            output,
            report,
            yard,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize)]
struct RunReport {
    count_boundary: String,
    commands: BTreeMap<&'static str, usize>,
    failures: usize,
    skipped_lines: usize,
    final_lot_count: usize,
    elapsed_ms: u128,
}

fn process<R: BufRead, W: Write>(
    yard: &mut Yard<Units>,
    input: R,
    out: &mut W,
    report: &mut RunReport,
) -> Result<(), DriverError> {
    for (lineno, bytes) in input.split(b'\n').enumerate() {
        let bytes = bytes?;
        let line = match std::str::from_utf8(&bytes) {
            Ok(line) => line.trim_end_matches('\r'),
            Err(e) => {
                warn!(line = lineno + 1, error = %e, "Skipping line that is not UTF-8");
                report.skipped_lines += 1;
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let command: Command<Units> = match line.parse() {
            Ok(c) => c,
            Err(e) => {
                warn!(line = lineno + 1, error = %e, "Skipping line");
                report.skipped_lines += 1;
                continue;
            }
        };

        *report.commands.entry(command.name()).or_default() += 1;
        if let Some(response) = yard.execute(command) {
            if response.is_failure() {
                report.failures += 1;
            }
            writeln!(out, "{response}")?;
        }
    }
    out.flush()?;
    Ok(())
}

fn run(config: DriverConfig) -> Result<(), DriverError> {
    let mut yard = Yard::new(config.yard.clone());
    let mut report = RunReport {
        count_boundary: config.yard.count_boundary.to_string(),
        ..RunReport::default()
    };

    let input = BufReader::new(File::open(&config.input)?);
    let mut out: Box<dyn Write> = match &config.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let started = Instant::now();
    process(&mut yard, input, &mut out, &mut report)?;
    report.elapsed_ms = started.elapsed().as_millis();
    report.final_lot_count = yard.lot_count();
    info!(
        elapsed_ms = report.elapsed_ms,
        lots = report.final_lot_count,
        "Finished command stream"
    );

    if let Some(path) = &config.report {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &report)?;
        writer.flush()?;
    }
    Ok(())
}

fn main() -> ExitCode {
    enable_tracing();

    let result = DriverConfig::from_args(std::env::args().skip(1)).and_then(run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_args() {
        let cfg = DriverConfig::from_args(args(&[
            "in.txt",
            "-o",
            "out.txt",
            "--report",
            "r.json",
            "--exclusive-count",
        ]))
        .unwrap();
        assert_eq!(cfg.input, PathBuf::from("in.txt"));
        assert_eq!(cfg.output, Some(PathBuf::from("out.txt")));
        assert_eq!(cfg.report, Some(PathBuf::from("r.json")));
        assert_eq!(cfg.yard.count_boundary, CountBoundary::Exclusive);

        let cfg = DriverConfig::from_args(args(&["in.txt"])).unwrap();
        assert_eq!(cfg.output, None);
        assert_eq!(cfg.yard, YardConfig::default());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(matches!(
            DriverConfig::from_args(args(&[])),
            Err(DriverError::Usage(_))
        ));
        assert!(matches!(
            DriverConfig::from_args(args(&["in.txt", "-o"])),
            Err(DriverError::Usage(_))
        ));
        assert!(matches!(
            DriverConfig::from_args(args(&["in.txt", "--verbose"])),
            Err(DriverError::Usage(_))
        ));
        assert!(matches!(
            DriverConfig::from_args(args(&["a.txt", "b.txt"])),
            Err(DriverError::Usage(_))
        ));
    }

    #[test]
    fn test_process_stream() {
        let input = "create_parking_lot 10 2\n\
                     add_truck 1 10\n\
                     bogus line\n\
                     \n\
                     ready 10\n\
                     ready 10\n\
                     count 10\n\
                     load 10 4\n";
        let mut yard = Yard::default();
        let mut out = Vec::new();
        let mut report = RunReport::default();
        process(&mut yard, input.as_bytes(), &mut out, &mut report).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "10\n1 10\n-1\n1\n1 -1\n"
        );
        assert_eq!(report.skipped_lines, 1);
        assert_eq!(report.failures, 1);
        assert_eq!(report.commands.get("ready"), Some(&2));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["skipped_lines"], 1);
    }

    #[test]
    fn test_process_skips_invalid_utf8() {
        let input: &[u8] =
            b"create_parking_lot 10 2\nadd_truck 1 10\n\xff\xfe\ncount 0\r\nadd_truck 2 10\n";
        let mut yard = Yard::default();
        let mut out = Vec::new();
        let mut report = RunReport::default();
        process(&mut yard, input, &mut out, &mut report).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "10\n1\n10\n");
        assert_eq!(report.skipped_lines, 1);
        assert_eq!(yard.lot(Capacity::new(10)).map(|l| l.total_count()), Some(2));
    }
}
