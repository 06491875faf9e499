// system-tests/tests/helpers/artifacts.rs
// ============================================================================
// Module: Case Artifacts
// Description: Per-test artifact directory and case outcome summaries.
// Purpose: Record which SKUs passed or failed, at which stage, and why.
// Dependencies: system-tests, storefront-harness, serde, serde_jcs
// ============================================================================

//! ## Overview
//! A [`TestReporter`] owns one directory under the run root. Suites record
//! each case outcome and write JSON artifacts through it. `summary.json` and
//! `summary.md` list every recorded case with its stage on failure, plus the
//! artifacts written. The summary is also written when a test panics or
//! returns early.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Instant;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use storefront_harness::CaseError;
use storefront_harness::CaseReport;
use storefront_harness::CaseStage;
use system_tests::config::SystemTestConfig;

/// Run root shared by every test in this process.
fn run_root() -> io::Result<PathBuf> {
    static DEFAULT_ROOT: OnceLock<PathBuf> = OnceLock::new();
    let config = SystemTestConfig::load().map_err(io::Error::other)?;
    Ok(config.run_root.unwrap_or_else(|| {
        DEFAULT_ROOT
            .get_or_init(|| {
                let stamp =
                    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
                PathBuf::from("target/system-tests").join(format!("run_{stamp}"))
            })
            .clone()
    }))
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
enum CaseOutcome {
    Passed {
        expected_name: String,
        actual_name: String,
        masked_cart_id: String,
    },
    Failed {
        stage: CaseStage,
        error: String,
    },
}

#[derive(Debug, Clone, Serialize)]
struct CaseEntry {
    sku: String,
    #[serde(flatten)]
    outcome: CaseOutcome,
}

#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    test_name: &'a str,
    status: &'a str,
    duration_ms: u128,
    cases: &'a [CaseEntry],
    notes: &'a [String],
    artifacts: &'a [String],
}

/// Artifact writer and case ledger for one system test.
pub struct TestReporter {
    root: PathBuf,
    test_name: String,
    started: Instant,
    cases: Vec<CaseEntry>,
    artifacts: Vec<String>,
    finalized: bool,
}

impl TestReporter {
    /// Creates `<run root>/<test_name>` for the test's artifacts.
    pub fn new(test_name: &str) -> io::Result<Self> {
        let root = run_root()?.join(test_name);
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            test_name: test_name.to_string(),
            started: Instant::now(),
            cases: Vec::new(),
            artifacts: Vec::new(),
            finalized: false,
        })
    }

    /// Records a passing case.
    pub fn record_pass(&mut self, report: &CaseReport) {
        self.cases.push(CaseEntry {
            sku: report.sku.clone(),
            outcome: CaseOutcome::Passed {
                expected_name: report.expected_name.clone(),
                actual_name: report.actual_name.clone(),
                masked_cart_id: report.masked_cart_id.clone(),
            },
        });
    }

    /// Records a failed case with the stage it failed in.
    pub fn record_failure(&mut self, err: &CaseError) {
        self.cases.push(CaseEntry {
            sku: err.sku.clone(),
            outcome: CaseOutcome::Failed {
                stage: err.stage,
                error: err.failure.to_string(),
            },
        });
    }

    /// Records either outcome of a case run.
    pub fn record(&mut self, outcome: &Result<CaseReport, CaseError>) {
        match outcome {
            Ok(report) => self.record_pass(report),
            Err(err) => self.record_failure(err),
        }
    }

    /// Writes canonical JSON to `name` and lists it in the summary.
    pub fn write_json<T: Serialize>(&mut self, name: &str, value: &T) -> io::Result<()> {
        let bytes = serde_jcs::to_vec(value).map_err(|err| io::Error::other(err.to_string()))?;
        fs::write(self.root.join(name), bytes)?;
        if !self.artifacts.iter().any(|existing| existing == name) {
            self.artifacts.push(name.to_string());
        }
        Ok(())
    }

    /// Writes `summary.json` and `summary.md` with the given status.
    pub fn finish(&mut self, status: &str, notes: Vec<String>) -> io::Result<()> {
        let mut artifacts = self.artifacts.clone();
        artifacts.extend(["summary.json".to_string(), "summary.md".to_string()]);
        let summary = RunSummary {
            test_name: &self.test_name,
            status,
            duration_ms: self.started.elapsed().as_millis(),
            cases: &self.cases,
            notes: &notes,
            artifacts: &artifacts,
        };
        let json = serde_jcs::to_vec(&summary).map_err(|err| io::Error::other(err.to_string()))?;
        fs::write(self.root.join("summary.json"), json)?;
        fs::write(self.root.join("summary.md"), summary_markdown(&summary))?;
        self.finalized = true;
        Ok(())
    }
}

impl Drop for TestReporter {
    fn drop(&mut self) {
        if self.finalized {
            return;
        }
        let status = if std::thread::panicking() { "panic" } else { "incomplete" };
        let _ = self.finish(status, vec!["test ended before its summary was written".to_string()]);
    }
}

fn summary_markdown(summary: &RunSummary<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", summary.test_name);
    let _ = writeln!(out, "Status: {} ({} ms)\n", summary.status, summary.duration_ms);
    out.push_str("| SKU | Result | Detail |\n|---|---|---|\n");
    for case in summary.cases {
        let (result, detail) = match &case.outcome {
            CaseOutcome::Passed {
                actual_name,
                ..
            } => ("passed".to_string(), actual_name.clone()),
            CaseOutcome::Failed {
                stage,
                error,
            } => (format!("failed at {stage}"), error.clone()),
        };
        let _ = writeln!(out, "| {} | {result} | {} |", case.sku, detail.replace('|', "\\|"));
    }
    for note in summary.notes {
        let _ = writeln!(out, "\n> {note}");
    }
    out
}
