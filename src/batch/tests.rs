//! Unit tests for the batch orchestrator.

use std::fs;
use std::sync::{Arc, Mutex};

use camino::{Utf8Path, Utf8PathBuf};
use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::{
    BatchAccounting, BatchOptions, BatchRunner, MockCommenterFetcher, MockProgressIndicator,
    OutputOptions, ProgressError, QuotaGuard,
};
use crate::github::{IntakeError, MockRateLimitGateway, RateLimitInfo};
use crate::telemetry::tests::RecordingSink;
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent};
use crate::worklist::LoadError;

const HEADER: &str = "org,repository,number,url,state,created_at,merged_at,user.login,month_year,title";

struct Workspace {
    _dir: TempDir,
    input: Utf8PathBuf,
    output: Utf8PathBuf,
}

impl Workspace {
    fn write_input(&self, numbers: &[&str]) {
        let mut text = format!("{HEADER}\n");
        for number in numbers {
            text.push_str(&format!(
                "acme,widget-api,{number},https://github.com/acme/widget-api/pull/{number},\
                 open,2023-01-10T10:00:00Z,,octocat,2023-01,Title\n"
            ));
        }
        fs::write(&self.input, text).expect("input should be written");
    }

    fn options(&self, verbose: bool, append: bool) -> BatchOptions {
        BatchOptions {
            verbose,
            output: OutputOptions {
                append,
                ..OutputOptions::new(self.output.clone())
            },
        }
    }
}

#[fixture]
fn workspace() -> Workspace {
    let dir = TempDir::new().expect("temporary directory should be created");
    let root = Utf8Path::from_path(dir.path())
        .expect("temporary path should be UTF-8")
        .to_owned();
    Workspace {
        input: root.join("prs.csv"),
        output: root.join("commenters.csv"),
        _dir: dir,
    }
}

fn quota_with_remaining(remaining: u32) -> MockRateLimitGateway {
    let mut gateway = MockRateLimitGateway::new();
    gateway
        .expect_rate_limit()
        .returning(move || Ok(RateLimitInfo::new(5000, remaining, 1_700_000_000)));
    gateway
}

/// Fetcher returning the comment count keyed by pull request number.
fn fetcher_with_counts(
    counts: &'static [(&'static str, usize)],
    visited: Arc<Mutex<Vec<String>>>,
) -> MockCommenterFetcher {
    let mut fetcher = MockCommenterFetcher::new();
    fetcher.expect_fetch_commenters().returning(move |item, _| {
        visited
            .lock()
            .expect("visited mutex should be available")
            .push(item.to_string());
        counts
            .iter()
            .find(|(number, _)| *number == item.number().as_str())
            .map(|(_, count)| *count)
            .ok_or_else(|| IntakeError::Api {
                message: format!("no comments for {item}"),
            })
    });
    fetcher
}

fn console_text(console: Vec<u8>) -> String {
    String::from_utf8(console).expect("console output should be UTF-8")
}

#[rstest]
#[tokio::test]
async fn tallies_items_in_file_order(workspace: Workspace) {
    workspace.write_input(&["1", "2", "3"]);
    let visited = Arc::new(Mutex::new(Vec::new()));
    let fetcher = fetcher_with_counts(&[("1", 0), ("2", 3), ("3", 0)], Arc::clone(&visited));
    let gateway = quota_with_remaining(100);
    let telemetry = NoopTelemetrySink;

    let mut runner = BatchRunner::new(
        &fetcher,
        QuotaGuard::new(&gateway, 2),
        &telemetry,
        Vec::new(),
        workspace.options(false, false),
    );
    let accounting = runner
        .perform_action(&workspace.input)
        .await
        .expect("batch should complete");

    assert_eq!(
        (
            accounting.without_comments(),
            accounting.with_comments(),
            accounting.total_comments()
        ),
        (2, 1, 3)
    );
    assert_eq!(
        *visited.lock().expect("visited mutex should be available"),
        vec!["acme/widget-api/1", "acme/widget-api/2", "acme/widget-api/3"]
    );
    let console = console_text(runner.into_console());
    assert!(
        console.ends_with(
            "Nbr of PR without comments: 2\n\
             Nbr of PR with comments:    1\n\
             Total comments:             3\n"
        ),
        "unexpected console output: {console}"
    );
}

#[rstest]
#[tokio::test]
async fn insufficient_quota_skips_every_fetch(workspace: Workspace) {
    workspace.write_input(&["1", "2", "3"]);
    let mut fetcher = MockCommenterFetcher::new();
    fetcher.expect_fetch_commenters().times(0);
    let gateway = quota_with_remaining(5);
    let telemetry = NoopTelemetrySink;

    let mut runner = BatchRunner::new(
        &fetcher,
        QuotaGuard::new(&gateway, 2),
        &telemetry,
        Vec::new(),
        workspace.options(false, false),
    );
    let result = runner.perform_action(&workspace.input).await;

    assert_eq!(
        result,
        Err(IntakeError::InsufficientQuota {
            required: 6,
            remaining: 5,
            reset_at: 1_700_000_000,
        })
    );
}

#[rstest]
#[tokio::test]
async fn rejected_input_stops_before_quota_and_fetch(workspace: Workspace) {
    fs::write(
        &workspace.input,
        "org,repository,url\nacme,widget-api,https://example.com\n",
    )
    .expect("input should be written");
    let mut fetcher = MockCommenterFetcher::new();
    fetcher.expect_fetch_commenters().times(0);
    let mut gateway = MockRateLimitGateway::new();
    gateway.expect_rate_limit().times(0);
    let telemetry = RecordingSink::default();

    let mut runner = BatchRunner::new(
        &fetcher,
        QuotaGuard::new(&gateway, 2),
        &telemetry,
        Vec::new(),
        workspace.options(false, false),
    );
    let result = runner.perform_action(&workspace.input).await;

    assert!(
        matches!(
            result,
            Err(IntakeError::InputRejected(LoadError::HeaderFieldCount {
                found: 3,
                expected: 10
            }))
        ),
        "expected header rejection, got {result:?}"
    );
    assert!(!workspace.output.exists(), "no output file should exist");
    let console = console_text(runner.into_console());
    assert!(console.contains(&format!("Could not load \"{}\"", workspace.input)));
    assert!(
        telemetry
            .take()
            .iter()
            .any(|event| matches!(event, TelemetryEvent::InputRejected { .. })),
        "rejection should be recorded"
    );
}

#[rstest]
#[tokio::test]
async fn fetch_failure_is_counted_and_batch_continues(workspace: Workspace) {
    workspace.write_input(&["1", "404", "3"]);
    let visited = Arc::new(Mutex::new(Vec::new()));
    let fetcher = fetcher_with_counts(&[("1", 2), ("3", 1)], Arc::clone(&visited));
    let gateway = quota_with_remaining(100);
    let telemetry = RecordingSink::default();

    let mut runner = BatchRunner::new(
        &fetcher,
        QuotaGuard::new(&gateway, 2),
        &telemetry,
        Vec::new(),
        workspace.options(false, false),
    );
    let accounting = runner
        .perform_action(&workspace.input)
        .await
        .expect("batch should complete despite a failed item");

    assert_eq!(accounting.failed(), 1);
    assert_eq!(accounting.with_comments(), 2);
    assert_eq!(accounting.total_comments(), 3);
    assert_eq!(
        visited.lock().expect("visited mutex should be available").len(),
        3
    );
    assert!(
        telemetry.take().iter().any(|event| matches!(
            event,
            TelemetryEvent::ItemFailed { pull_request, .. } if pull_request == "acme/widget-api/404"
        )),
        "failure should be recorded"
    );
    let console = console_text(runner.into_console());
    assert!(console.contains("Nbr of PR that failed:      1"));
}

#[rstest]
#[tokio::test]
async fn progress_failure_is_not_fatal(workspace: Workspace) {
    workspace.write_input(&["1", "2"]);
    let fetcher = fetcher_with_counts(&[("1", 1), ("2", 1)], Arc::new(Mutex::new(Vec::new())));
    let gateway = quota_with_remaining(100);
    let telemetry = NoopTelemetrySink;
    let mut progress = MockProgressIndicator::new();
    progress.expect_start().withf(|length| *length == 2).times(1).return_const(());
    progress.expect_advance().times(2).returning(|| {
        Err(ProgressError {
            message: "terminal went away".to_owned(),
        })
    });
    progress.expect_finish().times(1).return_const(());

    let mut runner = BatchRunner::new(
        &fetcher,
        QuotaGuard::new(&gateway, 2),
        &telemetry,
        Vec::new(),
        workspace.options(false, false),
    )
    .with_progress(Box::new(progress));
    let accounting = runner
        .perform_action(&workspace.input)
        .await
        .expect("batch should complete");

    assert_eq!(accounting.total_comments(), 2);
}

#[rstest]
#[tokio::test]
async fn verbose_mode_reports_checks_without_progress(workspace: Workspace) {
    workspace.write_input(&["7"]);
    let fetcher = fetcher_with_counts(&[("7", 4)], Arc::new(Mutex::new(Vec::new())));
    let gateway = quota_with_remaining(100);
    let telemetry = NoopTelemetrySink;
    let mut progress = MockProgressIndicator::new();
    progress.expect_start().times(0);
    progress.expect_advance().times(0);
    progress.expect_finish().times(0);

    let mut runner = BatchRunner::new(
        &fetcher,
        QuotaGuard::new(&gateway, 2),
        &telemetry,
        Vec::new(),
        workspace.options(true, false),
    )
    .with_progress(Box::new(progress));
    runner
        .perform_action(&workspace.input)
        .await
        .expect("batch should complete");

    let console = console_text(runner.into_console());
    for expected in [
        "Checking input file",
        "  - Header is correct",
        "  - At least one Pull Request data available",
        "(1 Pull Request to analyze)",
        "  acme/widget-api/7: 4 comment(s)",
    ] {
        assert!(
            console.contains(expected),
            "missing `{expected}` in: {console}"
        );
    }
}

#[rstest]
#[case::replace(false, false)]
#[case::append(true, true)]
#[tokio::test]
async fn existing_output_follows_append_mode(
    workspace: Workspace,
    #[case] append: bool,
    #[case] preserved: bool,
) {
    workspace.write_input(&["1"]);
    fs::write(&workspace.output, "previous,row,here\n").expect("output should be seeded");
    let fetcher = fetcher_with_counts(&[("1", 0)], Arc::new(Mutex::new(Vec::new())));
    let gateway = quota_with_remaining(100);
    let telemetry = NoopTelemetrySink;

    let mut runner = BatchRunner::new(
        &fetcher,
        QuotaGuard::new(&gateway, 2),
        &telemetry,
        Vec::new(),
        workspace.options(false, append),
    );
    runner
        .perform_action(&workspace.input)
        .await
        .expect("batch should complete");

    assert_eq!(workspace.output.exists(), preserved);
}

#[rstest]
#[tokio::test]
async fn records_processing_and_summary_events(workspace: Workspace) {
    workspace.write_input(&["1"]);
    let fetcher = fetcher_with_counts(&[("1", 2)], Arc::new(Mutex::new(Vec::new())));
    let gateway = quota_with_remaining(100);
    let telemetry = RecordingSink::default();

    let mut runner = BatchRunner::new(
        &fetcher,
        QuotaGuard::new(&gateway, 2),
        &telemetry,
        Vec::new(),
        workspace.options(false, false),
    );
    let accounting = runner
        .perform_action(&workspace.input)
        .await
        .expect("batch should complete");

    let mut expected = BatchAccounting::default();
    expected.record(2);
    assert_eq!(accounting, expected);
    assert_eq!(
        telemetry.take(),
        vec![
            TelemetryEvent::ProcessingStarted {
                input: workspace.input.to_string(),
            },
            TelemetryEvent::BatchSummary {
                without_comments: 0,
                with_comments: 1,
                total_comments: 2,
                failed: 0,
            },
        ]
    );
}
