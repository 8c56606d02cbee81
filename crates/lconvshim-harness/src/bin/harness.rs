//! CLI entrypoint for the lconvshim conformance harness.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};

use lconvshim_harness::conformance::decision_for_case;
use lconvshim_harness::fixtures;
use lconvshim_harness::header::{LconvShape, render_header};
use lconvshim_harness::snapshot::LocaleSnapshot;
use lconvshim_harness::structured_log::{
    ArtifactIndex, LogEmitter, LogEntry, LogLevel, Outcome, StreamKind, now_utc,
    validate_log_file,
};
use lconvshim_harness::{ConformanceReport, HarnessError, TestRunner, VerificationSummary};

/// Conformance tooling for lconvshim.
#[derive(Debug, Parser)]
#[command(name = "lconvshim-harness")]
#[command(about = "Conformance testing harness for lconvshim")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Strict,
    Hardened,
    Both,
}

impl ModeArg {
    fn modes(self) -> &'static [&'static str] {
        match self {
            Self::Strict => &["strict"],
            Self::Hardened => &["hardened"],
            Self::Both => &["strict", "hardened"],
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the implementation against fixture files.
    Verify {
        /// Directory containing fixture JSON files.
        #[arg(long)]
        fixture: PathBuf,
        /// Runtime mode(s) to run.
        #[arg(long, value_enum, default_value_t = ModeArg::Both)]
        mode: ModeArg,
        /// Output report path (markdown).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Structured JSONL log path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Artifact index JSON path (requires --log).
        #[arg(long, requires = "log")]
        artifact_index: Option<PathBuf>,
        /// Run identifier used in trace ids.
        #[arg(long, default_value = "local")]
        run_id: String,
        /// Optional fixed timestamp string for deterministic report generation.
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Render the locale.h compatibility header.
    Header {
        /// Output path (if omitted, prints to stdout).
        #[arg(long)]
        output: Option<PathBuf>,
        /// Emit the empty `struct lconv` shape (matches the `opaque-lconv` build).
        #[arg(long)]
        opaque: bool,
    },
    /// Print categories and C-locale conventions as JSON.
    Snapshot {
        /// Output JSON path (if omitted, prints to stdout).
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Validate a structured JSONL log file.
    ValidateLog {
        #[arg(long)]
        log: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn write_or_print(path: Option<&Path>, text: &str) -> Result<(), HarnessError> {
    match path {
        Some(p) => std::fs::write(p, text).map_err(|e| HarnessError::io(p, e)),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

fn run(command: Command) -> Result<bool, HarnessError> {
    match command {
        Command::Verify {
            fixture,
            mode,
            report,
            log,
            artifact_index,
            run_id,
            timestamp,
        } => verify(
            &fixture,
            mode,
            report.as_deref(),
            log.as_deref(),
            artifact_index.as_deref(),
            &run_id,
            timestamp,
        ),
        Command::Header { output, opaque } => {
            let shape = if opaque {
                LconvShape::Opaque
            } else {
                LconvShape::Populated
            };
            write_or_print(output.as_deref(), &render_header(shape))?;
            Ok(true)
        }
        Command::Snapshot { output } => {
            let mut json = LocaleSnapshot::capture().to_json()?;
            json.push('\n');
            write_or_print(output.as_deref(), &json)?;
            Ok(true)
        }
        Command::ValidateLog { log } => {
            let (lines, errors) =
                validate_log_file(&log).map_err(|e| HarnessError::io(&log, e))?;
            for err in &errors {
                eprintln!("{err}");
            }
            println!("{lines} lines, {} errors", errors.len());
            Ok(errors.is_empty())
        }
    }
}

fn verify(
    fixture_dir: &Path,
    mode: ModeArg,
    report_path: Option<&Path>,
    log_path: Option<&Path>,
    index_path: Option<&Path>,
    run_id: &str,
    timestamp: Option<String>,
) -> Result<bool, HarnessError> {
    const CAMPAIGN: &str = "locale";
    let started = Instant::now();
    let sets = fixtures::load_dir(fixture_dir)?;

    let mut emitter = match log_path {
        Some(p) => Some(
            LogEmitter::to_file(p, CAMPAIGN, run_id).map_err(|e| HarnessError::io(p, e))?,
        ),
        None => None,
    };
    let log_err = |e| HarnessError::io(log_path.unwrap_or(Path::new("<log>")), e);

    if let Some(em) = emitter.as_mut() {
        em.emit_entry(
            LogEntry::new("", LogLevel::Info, "verify_start")
                .with_stream(StreamKind::Conformance)
                .with_details(serde_json::json!({ "fixture_sets": sets.len() })),
        )
        .map_err(log_err)?;
    }

    let timestamp = timestamp.unwrap_or_else(now_utc);
    let mut markdown = String::new();
    let mut all_passed = true;

    for active in mode.modes() {
        let runner = TestRunner::new(CAMPAIGN, *active);
        let mut results = Vec::new();
        for (path, set) in &sets {
            let set_results = runner.run(set);
            if let Some(em) = emitter.as_mut() {
                let applied = set.cases.iter().filter(|c| runner.applies_to(c));
                for (case, r) in applied.zip(&set_results) {
                    let mut entry = LogEntry::new("", LogLevel::Info, "case_result")
                        .with_stream(StreamKind::Conformance)
                        .with_mode(*active)
                        .with_symbol(&case.function)
                        .with_case(&r.case_name)
                        .with_outcome(if r.passed { Outcome::Pass } else { Outcome::Fail })
                        .with_artifacts(vec![path.display().to_string()])
                        .with_details(serde_json::json!({
                            "expected": r.expected,
                            "actual": r.actual,
                        }));
                    if let Some(decision) = decision_for_case(&case.function, &case.inputs, active)
                    {
                        entry = entry
                            .with_decision_action(decision.action().as_str())
                            .with_healing_action(decision.healing().as_str());
                    }
                    if !r.passed {
                        entry.level = LogLevel::Error;
                    }
                    em.emit_entry(entry).map_err(log_err)?;
                }
            }
            results.extend(set_results);
        }

        let summary = VerificationSummary::from_results(results);
        println!("[{active}] {}/{} passed", summary.passed, summary.total);
        for (function, tally) in summary.by_function() {
            println!("  {function}: {}/{}", tally.passed, tally.total);
        }
        for failure in summary.failures() {
            println!("  FAIL {}", failure.case_name);
        }
        all_passed &= summary.all_passed();

        let report = ConformanceReport {
            title: format!("lconvshim conformance ({active})"),
            mode: (*active).to_string(),
            timestamp: timestamp.clone(),
            summary,
        };
        markdown.push_str(&report.to_markdown());
        markdown.push('\n');
    }

    if let Some(p) = report_path {
        std::fs::write(p, &markdown).map_err(|e| HarnessError::io(p, e))?;
    }

    if let Some(mut em) = emitter {
        em.emit_entry(
            LogEntry::new("", LogLevel::Info, "verify_end")
                .with_stream(StreamKind::Conformance)
                .with_outcome(if all_passed { Outcome::Pass } else { Outcome::Fail })
                .with_duration_ms(
                    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                ),
        )
        .map_err(log_err)?;
        em.flush().map_err(log_err)?;
    }

    if let (Some(index_path), Some(log_path)) = (index_path, log_path) {
        let mut index = ArtifactIndex::new(run_id, CAMPAIGN);
        index
            .add_file(log_path, "log")
            .map_err(|e| HarnessError::io(log_path, e))?;
        if let Some(p) = report_path {
            index.add_file(p, "report").map_err(|e| HarnessError::io(p, e))?;
        }
        let json = index.to_json()?;
        std::fs::write(index_path, json).map_err(|e| HarnessError::io(index_path, e))?;
    }

    Ok(all_passed)
}
