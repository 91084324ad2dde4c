//! Runs the catalog end to end against an in-process fake of
//! JSONPlaceholder.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use pretty_assertions::assert_eq;
use probe::{EXIT_FAILURE, EXIT_SUCCESS, exit_code, jsonplaceholder_cases};
use probe_application::{RunCase, RunSuite};
use probe_domain::{
    Assertion, BaseAddress, CaseOutcome, Category, ComparisonOperator, FailureKind, TestCase,
    TransportErrorKind,
};
use probe_infrastructure::{
    ProbeConfig, ReportFormat, ReqwestHttpClient, SystemClock, render_text,
};

fn config(base_address: BaseAddress) -> ProbeConfig {
    ProbeConfig {
        base_address,
        timeout_ms: 5_000,
        category: None,
        report_format: ReportFormat::Text,
    }
}

fn runner(base: BaseAddress, timeout_ms: u64) -> RunSuite<ReqwestHttpClient, SystemClock> {
    let client = Arc::new(ReqwestHttpClient::new().unwrap());
    RunSuite::new(
        RunCase::new(client, base).with_timeout_ms(timeout_ms),
        Arc::new(SystemClock::new()),
    )
}

#[tokio::test]
async fn test_catalog_passes_against_fake_service() {
    let base = common::fake_jsonplaceholder().await;

    let report = probe::run(&config(base)).await.expect("run should start");

    let failing: Vec<_> = report
        .cases
        .iter()
        .filter(|c| !c.passed())
        .map(|c| c.name.as_str())
        .collect();
    assert!(failing.is_empty(), "failing cases: {failing:?}\n{}", render_text(&report));
    assert_eq!(report.total, 12);
    assert_eq!(exit_code(&report), EXIT_SUCCESS);
}

#[tokio::test]
async fn test_report_keeps_catalog_order() {
    let base = common::fake_jsonplaceholder().await;

    let report = probe::run(&config(base)).await.unwrap();

    let expected: Vec<_> = jsonplaceholder_cases()
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    let actual: Vec<_> = report.cases.into_iter().map(|c| c.name).collect();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn test_negative_category_only() {
    let base = common::fake_jsonplaceholder().await;
    let mut config = config(base);
    config.category = Some(Category::Negative);

    let report = probe::run(&config).await.unwrap();

    assert_eq!(report.total, 3);
    assert!(report.cases.iter().all(|c| c.category == Category::Negative));
    assert!(report.all_passed());
}

#[tokio::test]
async fn test_wrong_service_fails_and_sets_exit_code() {
    // Every route answers 404.
    let addr = common::serve(Router::new()).await;
    let base = BaseAddress::parse(&format!("http://{addr}")).unwrap();

    let report = probe::run(&config(base)).await.unwrap();

    assert_eq!(report.passed, 1);
    assert!(report.case("GET /nu-exista - unknown endpoint").unwrap().passed());
    assert_eq!(
        report.case("GET /posts/2 - post fields").unwrap().failure_kind(),
        Some(FailureKind::UnexpectedStatus)
    );
    assert_eq!(exit_code(&report), EXIT_FAILURE);
}

#[tokio::test]
async fn test_every_item_over_empty_sequence_passes() {
    let base = common::fake_jsonplaceholder().await;

    // The fake has no comments for post 1000, so the array is empty.
    let case = TestCase::get("GET /comments?postId=1000", "/comments")
        .with_query("postId", "1000")
        .expect(Assertion::status(200))
        .expect(Assertion::body_equals("size()", 0).unwrap())
        .expect(
            Assertion::body(
                "postId",
                ComparisonOperator::every_item(ComparisonOperator::Equals),
                1000,
            )
            .unwrap(),
        );

    let report = runner(base, 5_000).run(&[case]).await;
    assert!(report.all_passed(), "{}", render_text(&report));
}

#[tokio::test]
async fn test_timeout_is_a_transport_failure() {
    let router = Router::new().route(
        "/posts/2",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "{}"
        }),
    );
    let addr = common::serve(router).await;
    let base = BaseAddress::parse(&format!("http://{addr}")).unwrap();

    let case = TestCase::get("GET /posts/2", "/posts/2").expect(Assertion::status(200));
    let report = runner(base, 100).run(&[case]).await;

    let case = &report.cases[0];
    assert_eq!(
        case.failure_kind(),
        Some(FailureKind::Transport(TransportErrorKind::Timeout))
    );
    assert!(matches!(case.outcome, CaseOutcome::TransportError { .. }));
    assert!(case.failures().is_empty());
}

#[tokio::test]
async fn test_unreachable_service_fails_every_case() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let base = BaseAddress::parse(&format!("http://{addr}")).unwrap();

    let report = probe::run(&config(base)).await.unwrap();

    assert_eq!(report.failed, 12);
    for case in &report.cases {
        assert!(
            matches!(case.failure_kind(), Some(FailureKind::Transport(_))),
            "{} did not fail in transport",
            case.name
        );
    }
    assert_eq!(exit_code(&report), EXIT_FAILURE);
}
