//! Plain-text report output.

use std::fmt::Write;

use probe_domain::testing::FailureKind;
use probe_domain::{AssertionResult, CaseOutcome, CaseReport, RunReport};

const INDENT: &str = "      ";

fn failure_label(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::Transport(kind) => kind.title(),
        FailureKind::UnexpectedStatus => "unexpected status",
        FailureKind::AssertionFailure => "assertion failed",
    }
}

fn write_assertion(out: &mut String, result: &AssertionResult) {
    let assertion = &result.assertion;
    let expected = if assertion.operator.is_unary() {
        assertion.operator.symbol()
    } else {
        format!("{} {}", assertion.operator.symbol(), assertion.expected)
    };
    let _ = writeln!(
        out,
        "{INDENT}- {}: expected {expected}, actual {}",
        assertion.field, result.actual
    );
}

fn write_case(out: &mut String, case: &CaseReport) {
    let verdict = if case.passed() { "PASS" } else { "FAIL" };
    let _ = write!(
        out,
        "{verdict}  {} [{}] ({} ms)",
        case.name, case.category, case.duration_ms
    );
    if let Some(kind) = case.failure_kind() {
        let _ = write!(out, " - {}", failure_label(kind));
    }
    out.push('\n');

    match &case.outcome {
        CaseOutcome::TransportError { message, .. } => {
            let _ = writeln!(out, "{INDENT}{message}");
        }
        CaseOutcome::Completed { .. } => {
            for result in case.failures() {
                write_assertion(out, result);
            }
        }
    }

    if let Some(note) = &case.note {
        let _ = writeln!(out, "{INDENT}note: {note}");
    }
}

/// Renders a human-readable summary: one line per case, failure details
/// under failed cases, and a closing totals line.
#[must_use]
pub fn render_text(report: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Running {} case(s) against {}",
        report.total, report.base_address
    );
    out.push('\n');

    for case in &report.cases {
        write_case(&mut out, case);
    }

    out.push('\n');
    let _ = writeln!(
        out,
        "{} passed, {} failed, {} total ({:.1}% pass rate)",
        report.passed,
        report.failed,
        report.total,
        report.pass_rate()
    );
    out
}
