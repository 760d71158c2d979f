//! Running a sweep from parsed arguments.

use crate::cli::Cli;
use crate::error::Result;
use crate::output::Formatter;
use logsweep_domain::LogStore;
use logsweep_janitor::{Janitor, SweepEvent, SweepResult};
use std::io::Write;

/// Run one sweep against `store`, writing progress and the summary to `out`.
///
/// Per-entity problems only show up in the progress output, the summary's
/// failure count and its skip list; an `Err` means the sweep never started or the output failed.
pub fn execute<S, W>(
    cli: &Cli,
    store: &mut S,
    formatter: &Formatter,
    out: &mut W,
) -> Result<SweepResult>
where
    S: LogStore,
    W: Write,
{
    let config = cli.janitor_config();
    config.validate()?;
    tracing::debug!("Starting sweep with {:?}", config);

    let janitor = Janitor::new(config);
    let mut write_error = None;

    let result = janitor.sweep(store, &mut |event: &SweepEvent| {
        if let Some(line) = formatter.progress(event) {
            if let Err(e) = writeln!(out, "{}", line) {
                write_error.get_or_insert(e);
            }
        }
    })?;

    if let Some(e) = write_error {
        return Err(e.into());
    }

    writeln!(out, "{}", formatter.summary(&result)?)?;
    Ok(result)
}
