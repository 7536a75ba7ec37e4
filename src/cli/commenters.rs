//! Batch commenter retrieval for a pull request list.

use std::io::{self, Write};

use camino::Utf8Path;
use pr_commenters::batch::{
    BatchOptions, BatchRunner, CsvCommenterRecorder, ProgressIndicator, QuotaGuard,
    TerminalProgress,
};
use pr_commenters::telemetry::{
    JsonlFileTelemetrySink, NoopTelemetrySink, QuotaStage, TelemetryEvent, TelemetrySink,
};
use pr_commenters::{
    ApiBase, CommentersConfig, IntakeError, OctocrabCommentGateway, PersonalAccessToken,
    RateLimitGateway,
};

/// Runs the batch described by `config`.
///
/// # Errors
///
/// Returns [`IntakeError`] when the token, API URL, debug log, input file,
/// quota, or output file is unusable.
pub async fn run(config: &CommentersConfig) -> Result<(), IntakeError> {
    let input = config.require_input()?;
    let token = PersonalAccessToken::new(config.resolve_token()?)?;
    let api_base = ApiBase::parse(&config.api_url)?;
    let gateway = OctocrabCommentGateway::for_token(&token, &api_base)?;

    let telemetry = open_telemetry(config)?;
    if telemetry.is_enabled() {
        announce_debug_session(config)?;
        telemetry.record(TelemetryEvent::SessionStarted);
        record_quota(&gateway, telemetry.as_ref(), QuotaStage::Start).await;
    }

    let recorder = CsvCommenterRecorder::new(&gateway);
    let quota = QuotaGuard::new(&gateway, config.requests_per_pull_request);
    let options = BatchOptions {
        verbose: config.verbose,
        output: config.output_options(),
    };

    let mut runner = BatchRunner::new(
        &recorder,
        quota,
        telemetry.as_ref(),
        io::stdout().lock(),
        options,
    )
    .with_progress(progress_for(config.verbose));
    let outcome = runner.perform_action(input).await;
    drop(runner);

    if telemetry.is_enabled() {
        record_quota(&gateway, telemetry.as_ref(), QuotaStage::End).await;
    }
    outcome.map(|_| ())
}

fn open_telemetry(config: &CommentersConfig) -> Result<Box<dyn TelemetrySink>, IntakeError> {
    if !config.debug {
        return Ok(Box::new(NoopTelemetrySink));
    }

    let path = Utf8Path::new(&config.debug_log);
    let sink = JsonlFileTelemetrySink::open(path).map_err(|error| IntakeError::Io {
        message: format!("cannot open debug log \"{path}\": {error}"),
    })?;
    Ok(Box::new(sink))
}

fn announce_debug_session(config: &CommentersConfig) -> Result<(), IntakeError> {
    write!(
        io::stdout().lock(),
        "*** Debug mode enabled ***\nSee \"{}\" for the trace\n\n",
        config.debug_log
    )
    .map_err(|error| IntakeError::Io {
        message: error.to_string(),
    })
}

async fn record_quota<G: RateLimitGateway>(
    gateway: &G,
    telemetry: &dyn TelemetrySink,
    stage: QuotaStage,
) {
    match gateway.rate_limit().await {
        Ok(info) => telemetry.record(TelemetryEvent::QuotaSnapshot {
            stage,
            remaining: info.remaining(),
            limit: info.limit(),
        }),
        Err(error) => tracing::warn!("could not read quota for the debug log: {error}"),
    }
}

fn progress_for(verbose: bool) -> Box<dyn ProgressIndicator> {
    if verbose {
        return Box::new(TerminalProgress::hidden());
    }

    match TerminalProgress::new() {
        Ok(progress) => Box::new(progress),
        Err(error) => {
            tracing::warn!("progress bar unavailable: {error}");
            Box::new(TerminalProgress::hidden())
        }
    }
}
