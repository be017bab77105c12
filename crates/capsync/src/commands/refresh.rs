use clap::ArgMatches;
use tracing::{error, info};

use capsync_core::{CancelFlag, JobResult, TickReport};

use super::helpers::Context;

pub(crate) fn handle_refresh_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.refresh_started");

    let ctx = Context::load();
    let coordinator = ctx.coordinator()?;
    let report = coordinator.run_tick_cancellable(&CancelFlag::new());

    print_report(&report, json_output)?;

    match report.result() {
        JobResult::Success => info!(
            event = "cli.refresh_completed",
            attempted = report.attempted,
            updated = report.updated
        ),
        JobResult::Failure => error!(
            event = "cli.refresh_failed",
            attempted = report.attempted,
            failed = report.failed
        ),
    }
    into_exit_status(&report)
}

pub(crate) fn print_report(
    report: &TickReport,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    if let Some(listing_error) = &report.listing_error {
        eprintln!("❌ Could not read accounts: {}", listing_error);
        return Ok(());
    }

    if report.attempted == 0 && !report.cancelled {
        println!("No accounts configured.");
        return Ok(());
    }

    println!(
        "Refreshed {} account(s): {} updated, {} unchanged, {} unavailable, {} failed",
        report.attempted, report.updated, report.unchanged, report.unavailable, report.failed
    );
    if report.cancelled {
        println!("Cancelled: {} account(s) skipped", report.skipped);
    }
    for failure in &report.failures {
        eprintln!(
            "  {}: {} ({})",
            failure.account_name, failure.message, failure.error_code
        );
    }

    Ok(())
}

/// Map the tick's job result to the process exit status.
pub(crate) fn into_exit_status(report: &TickReport) -> Result<(), Box<dyn std::error::Error>> {
    match report.result() {
        JobResult::Success => Ok(()),
        JobResult::Failure if report.listing_error.is_some() => {
            Err("refresh failed: could not read accounts".into())
        }
        JobResult::Failure if report.cancelled => Err("refresh cancelled".into()),
        JobResult::Failure => Err(format!(
            "refresh failed for {} of {} account(s)",
            report.failed, report.attempted
        )
        .into()),
    }
}
