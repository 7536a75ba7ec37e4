//! End-of-batch summary.

use std::io::{self, Write};

use super::accounting::BatchAccounting;
use crate::github::IntakeError;
use crate::telemetry::{TelemetryEvent, TelemetrySink};

/// Writes the summary lines for `accounting` to `writer`.
///
/// The failed line only appears when at least one fetch failed.
///
/// # Errors
///
/// Returns the I/O error raised by the writer.
pub fn write_summary_to<W: Write>(writer: &mut W, accounting: &BatchAccounting) -> io::Result<()> {
    writeln!(
        writer,
        "Nbr of PR without comments: {}",
        accounting.without_comments()
    )?;
    writeln!(
        writer,
        "Nbr of PR with comments:    {}",
        accounting.with_comments()
    )?;
    writeln!(
        writer,
        "Total comments:             {}",
        accounting.total_comments()
    )?;
    if accounting.failed() > 0 {
        writeln!(writer, "Nbr of PR that failed:      {}", accounting.failed())?;
    }
    Ok(())
}

/// Prints the summary and records it in the debug session.
///
/// # Errors
///
/// Returns [`IntakeError::Io`] when the summary cannot be written.
pub fn report_summary<W: Write>(
    writer: &mut W,
    telemetry: &dyn TelemetrySink,
    accounting: &BatchAccounting,
) -> Result<(), IntakeError> {
    write_summary_to(writer, accounting).map_err(|error| IntakeError::Io {
        message: error.to_string(),
    })?;

    telemetry.record(TelemetryEvent::BatchSummary {
        without_comments: accounting.without_comments(),
        with_comments: accounting.with_comments(),
        total_comments: accounting.total_comments(),
        failed: accounting.failed(),
    });
    Ok(())
}
